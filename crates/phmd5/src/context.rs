//! Incremental MD5 context.

use std::io;

use crate::Digest;
use crate::dispatcher::{self, Backend};
use crate::schedule::BLOCK_LEN;
use crate::state::DigestState;

/// Padding never exceeds one block plus the length trailer.
const MAX_PADDING: usize = BLOCK_LEN + 8;

/// Streaming MD5 hasher.
///
/// Feed bytes with [`update`](Self::update) in spans of any length and
/// alignment, then consume the context with [`finalize`](Self::finalize).
/// Whole blocks that start on a 4-byte boundary go straight from the caller's
/// slice to the compression core; anything else is staged through an internal
/// 64-byte buffer first.
///
/// # Example
///
/// ```
/// use phmd5::Md5;
///
/// let mut hasher = Md5::new();
/// hasher.update(b"a");
/// hasher.update(b"bc");
/// assert_eq!(hasher.finalize(), phmd5::digest(b"abc"));
/// ```
#[derive(Clone, Debug)]
pub struct Md5 {
    pub(crate) state: DigestState,
    len: u64,
    buffer: [u8; BLOCK_LEN],
    pub(crate) backend: Backend,
}

impl Default for Md5 {
    fn default() -> Self {
        Self::new()
    }
}

impl Md5 {
    /// Starts a digest on the process-wide backend.
    #[must_use]
    pub fn new() -> Self {
        Self::with_backend(dispatcher::global().backend())
    }

    /// Starts a digest on `backend`, or on [`Backend::Scalar`] when `backend`
    /// is not compiled into this build.
    #[must_use]
    pub const fn with_backend(backend: Backend) -> Self {
        Self {
            state: DigestState::INITIAL,
            len: 0,
            buffer: [0u8; BLOCK_LEN],
            backend: backend.resolve(),
        }
    }

    /// One-shot digest of `data`.
    #[must_use]
    pub fn digest(data: &[u8]) -> Digest {
        let mut hasher = Self::new();
        hasher.update(data);
        hasher.finalize()
    }

    /// Backend used by this context.
    #[must_use]
    pub const fn backend(&self) -> Backend {
        self.backend
    }

    /// Total bytes fed so far, modulo 2^64.
    #[must_use]
    pub const fn len(&self) -> u64 {
        self.len
    }

    /// Whether nothing has been fed yet (or exactly 2^64 bytes have).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Chaining value after the last complete block.
    #[must_use]
    pub const fn state(&self) -> DigestState {
        self.state
    }

    /// Feeds `data` into the digest.
    pub fn update(&mut self, data: &[u8]) {
        let rest = self.top_up(data);
        self.absorb(rest);
    }

    /// Feeds `count` zero bytes without materializing them.
    pub fn update_zeros(&mut self, count: u64) {
        let residual = self.residual();
        self.len = self.len.wrapping_add(count);

        let mut remaining = count;
        if residual != 0 {
            let room = BLOCK_LEN - residual;
            let take = usize::try_from(remaining).map_or(room, |n| n.min(room));
            self.buffer[residual..residual + take].fill(0);
            remaining -= take as u64;
            if residual + take < BLOCK_LEN {
                return;
            }
            self.backend.compress(&mut self.state, &self.buffer);
        }

        let blocks = remaining / BLOCK_LEN as u64;
        if blocks > 0 {
            self.backend.compress_zeros(&mut self.state, blocks);
        }
        let tail = (remaining % BLOCK_LEN as u64) as usize;
        self.buffer[..tail].fill(0);
    }

    /// Pads the message and returns the digest.
    #[must_use]
    pub fn finalize(mut self) -> Digest {
        let bit_len = self.len.wrapping_mul(8);
        let residual = self.residual();
        let zeros_end = if residual < BLOCK_LEN - 8 {
            BLOCK_LEN - 8 - residual
        } else {
            2 * BLOCK_LEN - 8 - residual
        };

        let mut padding = [0u8; MAX_PADDING];
        padding[0] = 0x80;
        padding[zeros_end..zeros_end + 8].copy_from_slice(&bit_len.to_le_bytes());
        self.update(&padding[..zeros_end + 8]);

        debug_assert_eq!(self.residual(), 0);
        self.state.to_bytes()
    }

    /// Returns the digest and restarts the context on the same backend.
    pub fn finalize_reset(&mut self) -> Digest {
        let fresh = Self::with_backend(self.backend);
        std::mem::replace(self, fresh).finalize()
    }

    fn residual(&self) -> usize {
        (self.len % BLOCK_LEN as u64) as usize
    }

    /// Counts `data`, completes a partially filled buffer from its head and
    /// returns what is left. A non-empty return means the buffer is empty.
    pub(crate) fn top_up<'a>(&mut self, data: &'a [u8]) -> &'a [u8] {
        let residual = self.residual();
        self.len = self.len.wrapping_add(data.len() as u64);
        if residual == 0 {
            return data;
        }

        let take = (BLOCK_LEN - residual).min(data.len());
        self.buffer[residual..residual + take].copy_from_slice(&data[..take]);
        if residual + take == BLOCK_LEN {
            self.backend.compress(&mut self.state, &self.buffer);
        }
        &data[take..]
    }

    /// Compresses the whole blocks of `data` and stages its tail. The buffer
    /// must be empty and `data` already counted.
    pub(crate) fn absorb(&mut self, data: &[u8]) {
        let whole = data.len() - data.len() % BLOCK_LEN;
        let (blocks, tail) = data.split_at(whole);

        if !blocks.is_empty() {
            if is_word_aligned(blocks) {
                self.backend.compress(&mut self.state, blocks);
            } else {
                for block in blocks.chunks_exact(BLOCK_LEN) {
                    self.buffer.copy_from_slice(block);
                    self.backend.compress(&mut self.state, &self.buffer);
                }
            }
        }
        self.buffer[..tail.len()].copy_from_slice(tail);
    }
}

pub(crate) fn is_word_aligned(data: &[u8]) -> bool {
    data.as_ptr().cast::<u32>().is_aligned()
}

impl io::Write for Md5 {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
