//! Streaming MD5 with SIMD single-lane and dual-lane compression cores.
//!
//! [`Md5`] is an incremental context: feed bytes in spans of any length and
//! alignment, then [`finalize`](Md5::finalize) it once. Whole 64-byte blocks
//! run through one of several interchangeable compression cores:
//!
//! - a scalar core, always available;
//! - a single-lane vector core that rotates 32-bit values inside a 128-bit
//!   register by duplicating each dword and shifting the 64-bit half;
//! - a dual-lane vector core that advances two independent streams per pass,
//!   one in each 64-bit half of the register.
//!
//! The dual-lane core is reached through [`process_dual`],
//! [`process_shared`] and [`DualHasher`]. Backend selection happens once per
//! process; see [`Backend`] and the `PHMD5_BACKEND` environment variable.
//!
//! # Example
//!
//! ```
//! use phmd5::{DualHasher, Md5, digest, process_dual};
//!
//! let hash = digest(b"abc");
//! assert_eq!(hash[..4], [0x90u8, 0x01, 0x50, 0x98]);
//!
//! let mut first = Md5::new();
//! let mut second = Md5::new();
//! process_dual(&mut first, &mut second, b"left", b"rite").unwrap();
//! assert_eq!(first.finalize(), digest(b"left"));
//! assert_eq!(second.finalize(), digest(b"rite"));
//!
//! let mut pair = DualHasher::new();
//! pair.update(b"uneven", b"spans are fine");
//! let (a, b) = pair.finalize();
//! assert_eq!(a, digest(b"uneven"));
//! assert_eq!(b, digest(b"spans are fine"));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod context;
mod dispatcher;
mod dual;
mod error;
pub mod io;
mod scalar;
mod schedule;
mod simd;
mod state;

#[cfg(feature = "rayon")]
#[cfg_attr(docsrs, doc(cfg(feature = "rayon")))]
mod rayon_support;

pub use context::Md5;
pub use dispatcher::{BACKEND_ENV, Backend};
pub use dual::{DualHasher, process_dual, process_shared};
pub use error::Error;
pub use schedule::BLOCK_LEN;
pub use state::DigestState;

#[cfg(feature = "rayon")]
pub use rayon_support::{ParallelMd5, digest_files};

/// MD5 digest type (16 bytes / 128 bits).
pub type Digest = [u8; 16];

/// Digest of `input`.
#[must_use]
pub fn digest(input: &[u8]) -> Digest {
    Md5::digest(input)
}

/// Digests every input, in order.
///
/// Inputs are taken two at a time so that their common-length prefix runs
/// through the dual-lane core.
pub fn digest_batch<T: AsRef<[u8]>>(inputs: &[T]) -> Vec<Digest> {
    let backend = active_backend();
    let mut digests = Vec::with_capacity(inputs.len());

    let mut pairs = inputs.chunks_exact(2);
    for pair in pairs.by_ref() {
        let mut hasher = DualHasher::with_backend(backend);
        hasher.update(pair[0].as_ref(), pair[1].as_ref());
        let (first, second) = hasher.finalize();
        digests.extend([first, second]);
    }
    if let [last] = pairs.remainder() {
        let mut hasher = Md5::with_backend(backend);
        hasher.update(last.as_ref());
        digests.push(hasher.finalize());
    }

    digests
}

/// The backend selected for this process.
///
/// Useful for logging or diagnostics.
pub fn active_backend() -> Backend {
    dispatcher::global().backend()
}
