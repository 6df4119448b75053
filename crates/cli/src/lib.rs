#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the `phmd5sum` command: it parses arguments with `clap`,
//! installs the `tracing` subscriber from the [`logging`] crate, hashes each
//! operand with [`phmd5`] and prints one `<hex> *<name>` line per operand.
//!
//! # Design
//!
//! [`run`] takes the argument iterator and both output handles, so tests drive
//! the whole command against in-memory buffers. It returns the process exit
//! status; the binary converts it with [`exit_code_from`].
//!
//! # Exit status
//!
//! - `0`: every operand was hashed;
//! - `1`: at least one operand could not be read (the others are still
//!   printed);
//! - `2`: the command line was invalid.
//!
//! # Examples
//!
//! ```
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let status = cli::run(["phmd5sum", "--version"], &mut stdout, &mut stderr);
//! assert_eq!(status, 0);
//! assert!(String::from_utf8(stdout).unwrap().starts_with("phmd5sum"));
//! ```

mod arguments;
mod command;
mod execution;

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::error::ErrorKind;

pub use arguments::{ParsedArgs, parse_args};
pub use execution::render_hex;

/// Name used in usage text and diagnostics.
pub const PROGRAM_NAME: &str = "phmd5sum";

/// Every operand was hashed.
pub const EXIT_SUCCESS: i32 = 0;
/// At least one operand failed.
pub const EXIT_FAILURE: i32 = 1;
/// The command line was rejected.
pub const EXIT_USAGE: i32 = 2;

/// Runs the command with `arguments` (including the program name).
///
/// Help and version output go to `stdout`; digests go to `stdout`;
/// diagnostics go to `stderr`.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();
    if args.is_empty() {
        args.push(OsString::from(PROGRAM_NAME));
    }

    match parse_args(args) {
        Ok(parsed) => execution::execute(parsed, stdout, stderr),
        Err(error) => match error.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                if write!(stdout, "{}", error.render()).is_err() {
                    return EXIT_FAILURE;
                }
                EXIT_SUCCESS
            }
            _ => {
                let _ = write!(stderr, "{}", error.render());
                EXIT_USAGE
            }
        },
    }
}

/// Converts a status from [`run`] into a process exit code.
#[must_use]
pub fn exit_code_from(status: i32) -> ExitCode {
    u8::try_from(status).map_or(ExitCode::FAILURE, ExitCode::from)
}
