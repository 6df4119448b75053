use std::io;

use thiserror::Error;

/// Errors surfaced by the coordinator and stream helpers.
///
/// The compression cores themselves cannot fail; every variant here is either
/// a rejected caller contract or an I/O failure from a reader.
#[derive(Debug, Error)]
pub enum Error {
    /// [`process_dual`](crate::process_dual) was handed spans of different lengths.
    #[error("dual-lane update requires equal spans, got {left} and {right} bytes")]
    LengthMismatch {
        /// Length of the first stream's span.
        left: usize,
        /// Length of the second stream's span.
        right: usize,
    },
    /// A slice size of zero was requested for per-slice digests.
    #[error("slice size must be at least one byte, got {size}")]
    InvalidBlockSize {
        /// The rejected size.
        size: usize,
    },
    /// A backend name did not match any known backend.
    #[error("unknown MD5 backend `{name}` (expected scalar, portable, sse2 or neon)")]
    UnknownBackend {
        /// The unrecognised name.
        name: String,
    },
    /// Reading the input failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}
