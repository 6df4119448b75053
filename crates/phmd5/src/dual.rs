//! Feeding two contexts through the dual-lane core.
//!
//! The dual-lane core wants equal, block-aligned runs from both streams. The
//! helpers here top up each context's residual buffer, send the longest run
//! that is whole blocks for both streams through one dual-lane pass, and hand
//! whatever is left to each context's single-stream path.

use crate::Digest;
use crate::context::{Md5, is_word_aligned};
use crate::dispatcher::Backend;
use crate::error::Error;
use crate::schedule::BLOCK_LEN;

/// Feeds `data_first` to `first` and `data_second` to `second`, two streams
/// at a time where possible.
///
/// The spans must have the same length; otherwise neither context is touched
/// and [`Error::LengthMismatch`] is returned. Use [`DualHasher`] for streams
/// that advance at different rates.
///
/// # Errors
///
/// Returns [`Error::LengthMismatch`] when the spans differ in length.
pub fn process_dual(
    first: &mut Md5,
    second: &mut Md5,
    data_first: &[u8],
    data_second: &[u8],
) -> Result<(), Error> {
    if data_first.len() != data_second.len() {
        return Err(Error::LengthMismatch {
            left: data_first.len(),
            right: data_second.len(),
        });
    }
    feed_pair(first, second, data_first, data_second);
    Ok(())
}

/// Feeds the same bytes to two contexts whose buffered offsets may differ,
/// such as a whole-file digest and a digest of the current slice.
pub fn process_shared(first: &mut Md5, second: &mut Md5, data: &[u8]) {
    feed_pair(first, second, data, data);
}

fn feed_pair(first: &mut Md5, second: &mut Md5, data_first: &[u8], data_second: &[u8]) {
    let rest_first = first.top_up(data_first);
    let rest_second = second.top_up(data_second);

    let common = rest_first.len().min(rest_second.len());
    let whole = common - common % BLOCK_LEN;
    let backend = first.backend;

    if whole == 0
        || backend != second.backend
        || !is_word_aligned(rest_first)
        || !is_word_aligned(rest_second)
    {
        first.absorb(rest_first);
        second.absorb(rest_second);
        return;
    }

    let (blocks_first, tail_first) = rest_first.split_at(whole);
    let (blocks_second, tail_second) = rest_second.split_at(whole);
    backend.compress_dual(
        &mut first.state,
        &mut second.state,
        blocks_first,
        blocks_second,
    );
    first.absorb(tail_first);
    second.absorb(tail_second);
}

/// Two MD5 contexts advanced together.
///
/// [`update`](Self::update) accepts spans of different lengths: the common
/// prefix goes through the dual-lane path and the longer span's remainder is
/// processed on its own.
///
/// # Example
///
/// ```
/// use phmd5::DualHasher;
///
/// let mut pair = DualHasher::new();
/// pair.update(b"abc", b"");
/// let (first, second) = pair.finalize();
/// assert_eq!(first, phmd5::digest(b"abc"));
/// assert_eq!(second, phmd5::digest(b""));
/// ```
#[derive(Clone, Debug, Default)]
pub struct DualHasher {
    first: Md5,
    second: Md5,
}

impl DualHasher {
    /// Two fresh contexts on the process-wide backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Two fresh contexts on `backend`.
    #[must_use]
    pub const fn with_backend(backend: Backend) -> Self {
        Self {
            first: Md5::with_backend(backend),
            second: Md5::with_backend(backend),
        }
    }

    /// Feeds one span to each stream.
    pub fn update(&mut self, first: &[u8], second: &[u8]) {
        let common = first.len().min(second.len());
        let (head_first, tail_first) = first.split_at(common);
        let (head_second, tail_second) = second.split_at(common);

        feed_pair(&mut self.first, &mut self.second, head_first, head_second);
        self.first.update(tail_first);
        self.second.update(tail_second);
    }

    /// Feeds the same span to both streams.
    pub fn update_shared(&mut self, data: &[u8]) {
        process_shared(&mut self.first, &mut self.second, data);
    }

    /// The first stream's context.
    #[must_use]
    pub const fn first(&self) -> &Md5 {
        &self.first
    }

    /// The second stream's context.
    #[must_use]
    pub const fn second(&self) -> &Md5 {
        &self.second
    }

    /// Finalizes both streams.
    #[must_use]
    pub fn finalize(self) -> (Digest, Digest) {
        (self.first.finalize(), self.second.finalize())
    }

    /// Splits into the two underlying contexts.
    #[must_use]
    pub fn into_parts(self) -> (Md5, Md5) {
        (self.first, self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(backend: Backend, data: &[u8]) -> Digest {
        let mut hasher = Md5::with_backend(backend);
        hasher.update(data);
        hasher.finalize()
    }

    #[test]
    fn mismatch_leaves_contexts_untouched() {
        let mut first = Md5::new();
        let mut second = Md5::new();
        first.update(b"seed");

        let err = process_dual(&mut first, &mut second, &[0; 64], &[0; 65]).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { left: 64, right: 65 }));
        assert_eq!(first.len(), 4);
        assert!(second.is_empty());
    }

    #[test]
    fn dual_path_matches_single_streams_on_every_backend() {
        let data_a: Vec<u8> = (0..640u32).map(|i| (i * 7) as u8).collect();
        let data_b: Vec<u8> = (0..640u32).map(|i| (i * 13 + 5) as u8).collect();

        for backend in Backend::available() {
            for len in [0, 1, 63, 64, 65, 127, 128, 640] {
                let mut a = Md5::with_backend(backend);
                let mut b = Md5::with_backend(backend);
                process_dual(&mut a, &mut b, &data_a[..len], &data_b[..len]).unwrap();
                assert_eq!(a.finalize(), single(backend, &data_a[..len]), "{backend} {len}");
                assert_eq!(b.finalize(), single(backend, &data_b[..len]), "{backend} {len}");
            }
        }
    }

    #[test]
    fn shared_data_with_offset_residuals() {
        let data: Vec<u8> = (0..1000u32).map(|i| (i % 251) as u8).collect();

        let mut whole = Md5::new();
        let mut slice = Md5::new();
        whole.update(&[9; 17]);
        process_shared(&mut whole, &mut slice, &data);

        let mut expected_whole = Md5::new();
        expected_whole.update(&[9; 17]);
        expected_whole.update(&data);

        assert_eq!(whole.finalize(), expected_whole.finalize());
        assert_eq!(slice.finalize(), crate::digest(&data));
    }

    #[test]
    fn mixed_backends_fall_back_to_single_streams() {
        let data = [0x42u8; 256];
        let mut a = Md5::with_backend(Backend::Scalar);
        let mut b = Md5::with_backend(Backend::Portable);
        process_dual(&mut a, &mut b, &data, &data).unwrap();
        assert_eq!(a.finalize(), b.finalize());
    }

    #[test]
    fn dual_hasher_splits_uneven_spans() {
        let mut pair = DualHasher::new();
        pair.update(&[1; 200], &[2; 70]);
        pair.update(&[3; 5], &[4; 300]);
        assert_eq!(pair.first().len(), 205);
        assert_eq!(pair.second().len(), 370);

        let mut first = [1u8; 205].to_vec();
        first[200..].fill(3);
        let mut second = vec![2u8; 70];
        second.extend_from_slice(&[4; 300]);

        let (da, db) = pair.finalize();
        assert_eq!(da, crate::digest(&first));
        assert_eq!(db, crate::digest(&second));
    }

    #[test]
    fn into_parts_keeps_progress() {
        let mut pair = DualHasher::with_backend(Backend::Scalar);
        pair.update_shared(b"abc");
        let (a, b) = pair.into_parts();
        assert_eq!(a.backend(), Backend::Scalar);
        assert_eq!(a.finalize(), b.finalize());
    }
}
