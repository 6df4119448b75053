use std::ffi::{OsStr, OsString};
use std::fs::File;
use std::io::{self, Read, Write};
use std::num::NonZeroUsize;

use phmd5::io::{PREFIX_LEN, digest_blocks_on, feed_reader};
use phmd5::{Backend, Digest, Md5};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::arguments::ParsedArgs;
use crate::{EXIT_FAILURE, EXIT_SUCCESS, PROGRAM_NAME};

const STDIN_OPERAND: &str = "-";

/// Digest of one operand, plus its slice digests when requested.
#[derive(Debug)]
struct OperandDigest {
    file: Digest,
    blocks: Vec<Digest>,
}

#[derive(Clone, Copy)]
struct Mode {
    backend: Backend,
    prefix_only: bool,
    block_size: Option<NonZeroUsize>,
}

/// Renders `digest` as hex.
#[must_use]
pub fn render_hex(digest: &Digest, uppercase: bool) -> String {
    use std::fmt::Write as _;
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _ = if uppercase {
            write!(out, "{byte:02X}")
        } else {
            write!(out, "{byte:02x}")
        };
    }
    out
}

pub(crate) fn execute<Out, Err>(parsed: ParsedArgs, stdout: &mut Out, stderr: &mut Err) -> i32
where
    Out: Write,
    Err: Write,
{
    logging::init_tracing(parsed.verbosity);

    let mode = Mode {
        backend: parsed.backend.map_or_else(phmd5::active_backend, Backend::resolve),
        prefix_only: parsed.prefix_only,
        block_size: parsed.block_size,
    };
    info!(target: "phmd5sum", backend = mode.backend.name(), "hashing with backend");

    let operands = if parsed.operands.is_empty() {
        vec![OsString::from(STDIN_OPERAND)]
    } else {
        parsed.operands
    };

    let results: Vec<io::Result<OperandDigest>> = if parsed.parallel {
        debug!(target: "phmd5sum", operands = operands.len(), "hashing in parallel");
        operands
            .par_iter()
            .map(|operand| digest_operand(operand, mode))
            .collect()
    } else {
        operands
            .iter()
            .map(|operand| digest_operand(operand, mode))
            .collect()
    };

    let mut status = EXIT_SUCCESS;
    for (operand, result) in operands.iter().zip(results) {
        let name = operand.to_string_lossy();
        let written = match result {
            Ok(digest) => write_digest(stdout, &name, &digest, parsed.uppercase),
            Err(error) => {
                status = EXIT_FAILURE;
                writeln!(stderr, "{PROGRAM_NAME}: {name}: {error}")
            }
        };
        if let Err(error) = written {
            if error.kind() != io::ErrorKind::BrokenPipe {
                let _ = writeln!(stderr, "{PROGRAM_NAME}: write error: {error}");
            }
            return EXIT_FAILURE;
        }
    }

    if stdout.flush().is_err() {
        return EXIT_FAILURE;
    }
    status
}

fn write_digest<W: Write>(
    out: &mut W,
    name: &str,
    digest: &OperandDigest,
    uppercase: bool,
) -> io::Result<()> {
    writeln!(out, "{} *{name}", render_hex(&digest.file, uppercase))?;
    for (index, block) in digest.blocks.iter().enumerate() {
        writeln!(out, "{} *{name}[{index}]", render_hex(block, uppercase))?;
    }
    Ok(())
}

fn digest_operand(operand: &OsStr, mode: Mode) -> io::Result<OperandDigest> {
    if operand == STDIN_OPERAND {
        debug!(target: "phmd5sum", "reading standard input");
        digest_stream(io::stdin().lock(), mode)
    } else {
        debug!(target: "phmd5sum", path = %operand.to_string_lossy(), "reading file");
        digest_stream(File::open(operand)?, mode)
    }
}

fn digest_stream<R: Read>(reader: R, mode: Mode) -> io::Result<OperandDigest> {
    if let Some(block_size) = mode.block_size {
        let result = digest_blocks_on(reader, block_size.get(), mode.backend)
            .map_err(|error| match error {
                phmd5::Error::Io(error) => error,
                other => io::Error::new(io::ErrorKind::InvalidInput, other),
            })?;
        return Ok(OperandDigest {
            file: result.file,
            blocks: result.blocks,
        });
    }

    let mut hasher = Md5::with_backend(mode.backend);
    if mode.prefix_only {
        feed_reader(&mut hasher, reader.take(PREFIX_LEN))?;
    } else {
        feed_reader(&mut hasher, reader)?;
    }
    Ok(OperandDigest {
        file: hasher.finalize(),
        blocks: Vec::new(),
    })
}
