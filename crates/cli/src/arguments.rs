use std::ffi::OsString;
use std::num::NonZeroUsize;

use logging::VerbosityConfig;
use phmd5::Backend;

use crate::PROGRAM_NAME;
use crate::command::{
    ARG_BACKEND, ARG_BLOCK_SIZE, ARG_FILES, ARG_PARALLEL, ARG_PREFIX, ARG_QUIET, ARG_UPPER,
    ARG_VERBOSE, clap_command,
};

/// Options recognised on the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedArgs {
    /// Print upper-case hex.
    pub uppercase: bool,
    /// Digest only the first 16 KiB of each operand.
    pub prefix_only: bool,
    /// Slice size for per-slice digests.
    pub block_size: Option<NonZeroUsize>,
    /// Hash operands on the rayon pool.
    pub parallel: bool,
    /// Backend requested with `--backend`.
    pub backend: Option<Backend>,
    /// Diagnostic verbosity.
    pub verbosity: VerbosityConfig,
    /// Operands in command-line order; `-` is standard input.
    pub operands: Vec<OsString>,
}

/// Parses `arguments` (including the program name).
///
/// # Errors
///
/// Returns the `clap` error for unknown flags, bad values, conflicts, and for
/// `--help` / `--version`, which `clap` reports as errors.
pub fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
{
    let matches = clap_command(PROGRAM_NAME).try_get_matches_from(arguments)?;

    let verbosity = if matches.get_flag(ARG_QUIET) {
        VerbosityConfig::quiet()
    } else {
        VerbosityConfig::from_verbose_level(matches.get_count(ARG_VERBOSE))
    };

    Ok(ParsedArgs {
        uppercase: matches.get_flag(ARG_UPPER),
        prefix_only: matches.get_flag(ARG_PREFIX),
        block_size: matches.get_one::<NonZeroUsize>(ARG_BLOCK_SIZE).copied(),
        parallel: matches.get_flag(ARG_PARALLEL),
        backend: matches.get_one::<Backend>(ARG_BACKEND).copied(),
        verbosity,
        operands: matches
            .get_many::<OsString>(ARG_FILES)
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
    })
}

/// Parses a slice size: a positive integer with an optional binary `K`, `M`
/// or `G` suffix.
pub(crate) fn parse_block_size_argument(value: &str) -> Result<NonZeroUsize, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("--block-size value must not be empty".to_owned());
    }

    let (digits, shift) = match trimmed.as_bytes()[trimmed.len() - 1].to_ascii_uppercase() {
        b'K' => (&trimmed[..trimmed.len() - 1], 10),
        b'M' => (&trimmed[..trimmed.len() - 1], 20),
        b'G' => (&trimmed[..trimmed.len() - 1], 30),
        _ => (trimmed, 0),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!(
            "invalid --block-size '{trimmed}': expected a size with an optional K/M/G suffix"
        ));
    }

    let too_large =
        || format!("invalid --block-size '{trimmed}': size exceeds the supported range");
    let base: usize = digits.parse().map_err(|_| too_large())?;
    let size = base
        .checked_mul(1usize << shift)
        .ok_or_else(too_large)?;

    NonZeroUsize::new(size)
        .ok_or_else(|| format!("invalid --block-size '{trimmed}': size must be positive"))
}

pub(crate) fn parse_backend_argument(value: &str) -> Result<Backend, String> {
    value.parse::<Backend>().map_err(|error| error.to_string())
}
