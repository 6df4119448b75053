//! Digests over readers and files.
//!
//! All helpers read through a fixed 64 KiB buffer, retry reads interrupted by
//! signals, and never hold more than one buffer of input in memory.

use std::fs::File;
use std::io::{self, ErrorKind, Read};
use std::ops::ControlFlow;
use std::path::Path;

use tracing::{debug, trace};

use crate::Digest;
use crate::context::Md5;
use crate::dispatcher::Backend;
use crate::dual::process_shared;
use crate::error::Error;

/// Read buffer size used by every helper in this module.
pub const IO_BUFFER_LEN: usize = 64 * 1024;

/// Bytes covered by [`digest_file_prefix`].
pub const PREFIX_LEN: u64 = 16 * 1024;

/// Digest of a file and of each fixed-size slice of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockDigests {
    /// Digest of the whole input.
    pub file: Digest,
    /// Digest of each slice; the last one is zero-padded to the slice size.
    pub blocks: Vec<Digest>,
    /// Input length in bytes.
    pub len: u64,
}

/// Reads `reader` to the end and returns its digest.
///
/// # Errors
///
/// Propagates read errors other than [`ErrorKind::Interrupted`].
pub fn digest_reader<R: Read>(reader: R) -> io::Result<Digest> {
    digest_reader_with(reader, |_| ControlFlow::Continue(()))
}

/// Like [`digest_reader`], calling `observe` with the running byte count
/// after every read.
///
/// # Errors
///
/// Propagates read errors; returns [`ErrorKind::Interrupted`] when `observe`
/// breaks.
pub fn digest_reader_with<R, F>(reader: R, observe: F) -> io::Result<Digest>
where
    R: Read,
    F: FnMut(u64) -> ControlFlow<()>,
{
    let mut hasher = Md5::new();
    feed_reader_with(&mut hasher, reader, observe)?;
    Ok(hasher.finalize())
}

/// Reads `reader` to the end into an existing context, returning the number
/// of bytes read.
///
/// # Errors
///
/// Propagates read errors other than [`ErrorKind::Interrupted`].
pub fn feed_reader<R: Read>(hasher: &mut Md5, reader: R) -> io::Result<u64> {
    feed_reader_with(hasher, reader, |_| ControlFlow::Continue(()))
}

/// Like [`feed_reader`], calling `observe` with the context's running byte
/// count after every read.
///
/// # Errors
///
/// Propagates read errors; returns [`ErrorKind::Interrupted`] when `observe`
/// breaks.
pub fn feed_reader_with<R, F>(hasher: &mut Md5, mut reader: R, mut observe: F) -> io::Result<u64>
where
    R: Read,
    F: FnMut(u64) -> ControlFlow<()>,
{
    let mut buffer = vec![0u8; IO_BUFFER_LEN];
    let mut consumed = 0u64;

    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => return Ok(consumed),
            Ok(n) => n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        };
        hasher.update(&buffer[..read]);
        consumed += read as u64;
        trace!(target: "phmd5::io", read, total = hasher.len(), "hashed chunk");

        if observe(hasher.len()).is_break() {
            debug!(target: "phmd5::io", total = hasher.len(), "digest cancelled");
            return Err(io::Error::new(ErrorKind::Interrupted, "digest cancelled"));
        }
    }
}

/// Digest of the file at `path`.
///
/// # Errors
///
/// Returns open and read errors.
pub fn digest_file<P: AsRef<Path>>(path: P) -> io::Result<Digest> {
    let path = path.as_ref();
    debug!(target: "phmd5::io", path = %path.display(), "digesting file");
    digest_reader(File::open(path)?)
}

/// Digest of the first [`PREFIX_LEN`] bytes of the file at `path` (the whole
/// file when shorter).
///
/// # Errors
///
/// Returns open and read errors.
pub fn digest_file_prefix<P: AsRef<Path>>(path: P) -> io::Result<Digest> {
    let path = path.as_ref();
    debug!(target: "phmd5::io", path = %path.display(), "digesting file prefix");
    digest_reader(File::open(path)?.take(PREFIX_LEN))
}

/// Digest of `data` zero-padded up to `block_size` bytes.
///
/// Data already at least `block_size` long is digested as is.
#[must_use]
pub fn digest_padded(data: &[u8], block_size: usize) -> Digest {
    let mut hasher = Md5::new();
    hasher.update(data);
    hasher.update_zeros(block_size.saturating_sub(data.len()) as u64);
    hasher.finalize()
}

/// Reads `reader` once, producing its digest together with the digest of every
/// `block_size`-byte slice; a short final slice is zero-padded to
/// `block_size`. Empty input has no slices.
///
/// # Errors
///
/// Returns [`Error::InvalidBlockSize`] for a zero `block_size` and
/// [`Error::Io`] for read failures.
pub fn digest_blocks<R: Read>(reader: R, block_size: usize) -> Result<BlockDigests, Error> {
    digest_blocks_on(reader, block_size, crate::active_backend())
}

/// [`digest_blocks`] on an explicit backend.
///
/// # Errors
///
/// Same as [`digest_blocks`].
pub fn digest_blocks_on<R: Read>(
    mut reader: R,
    block_size: usize,
    backend: Backend,
) -> Result<BlockDigests, Error> {
    if block_size == 0 {
        return Err(Error::InvalidBlockSize { size: block_size });
    }

    let mut file = Md5::with_backend(backend);
    let mut slice = Md5::with_backend(backend);
    let mut blocks = Vec::new();
    let mut filled = 0usize;
    let mut buffer = vec![0u8; IO_BUFFER_LEN];

    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        };

        let mut chunk = &buffer[..read];
        while !chunk.is_empty() {
            let take = (block_size - filled).min(chunk.len());
            let (head, rest) = chunk.split_at(take);
            process_shared(&mut file, &mut slice, head);
            filled += take;
            chunk = rest;

            if filled == block_size {
                blocks.push(slice.finalize_reset());
                filled = 0;
            }
        }
    }

    if filled > 0 {
        slice.update_zeros((block_size - filled) as u64);
        blocks.push(slice.finalize());
    }

    let len = file.len();
    debug!(
        target: "phmd5::io",
        len,
        block_size,
        slices = blocks.len(),
        "digested slices"
    );
    Ok(BlockDigests {
        file: file.finalize(),
        blocks,
        len,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reader that yields one byte per call and an interruption in between.
    struct Stuttering<'a> {
        data: &'a [u8],
        interrupt: bool,
    }

    impl Read for Stuttering<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(ErrorKind::Interrupted.into());
            }
            let n = self.data.len().min(buf.len()).min(1);
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn reader_retries_interrupted_reads() {
        let reader = Stuttering {
            data: b"abc",
            interrupt: false,
        };
        assert_eq!(digest_reader(reader).unwrap(), crate::digest(b"abc"));
    }

    #[test]
    fn observer_can_cancel() {
        let data = vec![7u8; IO_BUFFER_LEN * 3];
        let mut seen = Vec::new();
        let err = digest_reader_with(&data[..], |total| {
            seen.push(total);
            if total >= IO_BUFFER_LEN as u64 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Interrupted);
        assert_eq!(seen, vec![IO_BUFFER_LEN as u64]);
    }

    #[test]
    fn padded_digest_appends_zeros() {
        let mut explicit = b"tail".to_vec();
        explicit.resize(100, 0);
        assert_eq!(digest_padded(b"tail", 100), crate::digest(&explicit));
        assert_eq!(digest_padded(b"longer", 3), crate::digest(b"longer"));
    }

    #[test]
    fn zero_block_size_is_rejected() {
        let err = digest_blocks(&b"abc"[..], 0).unwrap_err();
        assert!(matches!(err, Error::InvalidBlockSize { size: 0 }));
    }

    #[test]
    fn slices_match_padded_digests() {
        let data: Vec<u8> = (0..1000u32).map(|i| (i % 253) as u8).collect();
        let result = digest_blocks(&data[..], 300).unwrap();

        assert_eq!(result.len, 1000);
        assert_eq!(result.file, crate::digest(&data));
        assert_eq!(result.blocks.len(), 4);
        for (digest, chunk) in result.blocks.iter().zip(data.chunks(300)) {
            assert_eq!(*digest, digest_padded(chunk, 300));
        }
    }

    #[test]
    fn empty_input_has_no_slices() {
        let result = digest_blocks(io::empty(), 4096).unwrap();
        assert!(result.blocks.is_empty());
        assert_eq!(result.file, crate::digest(b""));
    }

    #[test]
    fn feed_reader_extends_a_running_context() {
        let mut hasher = Md5::with_backend(Backend::Scalar);
        hasher.update(b"ab");
        assert_eq!(feed_reader(&mut hasher, &b"c"[..]).unwrap(), 1);
        assert_eq!(hasher.finalize(), crate::digest(b"abc"));
    }

    #[test]
    fn explicit_backend_gives_same_slices() {
        let data = vec![0x11u8; 5000];
        let default = digest_blocks(&data[..], 1024).unwrap();
        let portable = digest_blocks_on(&data[..], 1024, Backend::Portable).unwrap();
        assert_eq!(default, portable);
    }
}
