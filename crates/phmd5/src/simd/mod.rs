//! Vector compression cores.
//!
//! Both cores are written once against the [`Lanes`] trait and instantiated
//! per backend. A [`Lanes`] value is a 128-bit register viewed as four 32-bit
//! dwords. Only dwords 0 and 2 carry MD5 state:
//!
//! - the single-lane core keeps its stream in dword 0;
//! - the dual-lane core keeps stream A in dword 0 and stream B in dword 2.
//!
//! Dwords 1 and 3 are scratch space for the rotation trick. SSE2 has no
//! per-lane rotate, so [`Lanes::rotl_even`] duplicates each even dword into
//! its odd neighbour, then shifts each 64-bit half right by `32 - shift`. The
//! low dword of each half then holds `rotl32(x, shift)`. Nothing in the
//! schedule moves data between the two 64-bit halves, so the streams never
//! observe each other.
//!
//! # Available Backends
//!
//! - **SSE2**: baseline on x86_64, used on x86 when compiled with `sse2`
//! - **NEON**: little-endian aarch64
//! - **Portable**: plain integer rendition of the SSE2 semantics, any target

#[cfg(any(target_arch = "x86_64", all(target_arch = "x86", target_feature = "sse2")))]
pub(crate) mod sse2;

#[cfg(all(target_arch = "aarch64", target_endian = "little"))]
pub(crate) mod neon;

pub(crate) mod portable;

use crate::schedule::{BLOCK_LEN, Round, SCHEDULE, WORDS_PER_BLOCK, load_words};
use crate::state::DigestState;

/// Bytes consumed per stream by one interleaving load.
pub(crate) const PAIR_LOAD_LEN: usize = 8;

/// A 128-bit register of four 32-bit dwords.
pub(crate) trait Lanes: Copy {
    /// Broadcasts `value` to all four dwords.
    fn splat(value: u32) -> Self;

    /// Places `a` in dword 0 and `b` in dword 2.
    fn pair(a: u32, b: u32) -> Self;

    /// Reads dword 0.
    fn lane_a(self) -> u32;

    /// Reads dword 2.
    fn lane_b(self) -> u32;

    fn add(self, rhs: Self) -> Self;

    fn and(self, rhs: Self) -> Self;

    fn or(self, rhs: Self) -> Self;

    fn xor(self, rhs: Self) -> Self;

    /// `!self & rhs`
    fn andnot(self, rhs: Self) -> Self;

    fn not(self) -> Self;

    /// Rotates dwords 0 and 2 left by `shift` (1..=31); dwords 1 and 3 become
    /// the upper halves of the 64-bit shift and carry no meaning.
    fn rotl_even(self, shift: u32) -> Self;

    /// Interleaving load of two consecutive message words from each stream.
    ///
    /// Both slices are [`PAIR_LOAD_LEN`] bytes. Returns
    /// `[a0, a0, b0, b0]` and `[a1, a1, b1, b1]`.
    fn load_pairs(a: &[u8], b: &[u8]) -> [Self; 2];
}

#[inline(always)]
fn round_fn<L: Lanes>(round: Round, x: L, y: L, z: L) -> L {
    match round {
        Round::F => x.and(y).or(x.andnot(z)),
        Round::G => x.and(z).or(z.andnot(y)),
        Round::H => x.xor(y).xor(z),
        Round::I => y.xor(x.or(z.not())),
    }
}

#[inline(always)]
fn run_schedule<L: Lanes>(h: [L; 4], word: impl Fn(usize) -> L) -> [L; 4] {
    let [mut a, mut b, mut c, mut d] = h;

    for step in &SCHEDULE {
        let mixed = a
            .add(round_fn(step.round, b, c, d))
            .add(word(step.word))
            .add(L::splat(step.k));
        let next = mixed.rotl_even(step.shift).add(b);
        a = d;
        d = c;
        c = b;
        b = next;
    }

    [a.add(h[0]), b.add(h[1]), c.add(h[2]), d.add(h[3])]
}

/// Single-lane core: same contract as [`crate::scalar::compress`].
#[inline]
pub(crate) fn compress<L: Lanes>(state: &mut DigestState, blocks: &[u8]) {
    debug_assert!(!blocks.is_empty() && blocks.len() % BLOCK_LEN == 0);

    let mut h = state.0.map(L::splat);
    for block in blocks.chunks_exact(BLOCK_LEN) {
        let words = load_words(block);
        h = run_schedule(h, |i| L::splat(words[i]));
    }
    state.0 = h.map(L::lane_a);
}

/// Single-lane zero-fill core: `blocks` all-zero blocks, no memory reads.
#[inline]
pub(crate) fn compress_zeros<L: Lanes>(state: &mut DigestState, blocks: u64) {
    let zero = L::splat(0);
    let mut h = state.0.map(L::splat);
    for _ in 0..blocks {
        h = run_schedule(h, |_| zero);
    }
    state.0 = h.map(L::lane_a);
}

/// Dual-lane core: one block from each stream per pass.
///
/// `blocks_a` and `blocks_b` must have the same length, a positive multiple
/// of [`BLOCK_LEN`].
#[inline]
pub(crate) fn compress_dual<L: Lanes>(
    state_a: &mut DigestState,
    state_b: &mut DigestState,
    blocks_a: &[u8],
    blocks_b: &[u8],
) {
    assert_eq!(
        blocks_a.len(),
        blocks_b.len(),
        "dual-lane compression requires equal block runs"
    );
    debug_assert!(!blocks_a.is_empty() && blocks_a.len() % BLOCK_LEN == 0);

    let mut h: [L; 4] = std::array::from_fn(|i| L::pair(state_a.0[i], state_b.0[i]));

    for (block_a, block_b) in blocks_a
        .chunks_exact(BLOCK_LEN)
        .zip(blocks_b.chunks_exact(BLOCK_LEN))
    {
        let mut words = [L::splat(0); WORDS_PER_BLOCK];
        for (pair, (a, b)) in block_a
            .chunks_exact(PAIR_LOAD_LEN)
            .zip(block_b.chunks_exact(PAIR_LOAD_LEN))
            .enumerate()
        {
            let [lo, hi] = L::load_pairs(a, b);
            words[pair * 2] = lo;
            words[pair * 2 + 1] = hi;
        }
        h = run_schedule(h, |i| words[i]);
    }

    state_a.0 = h.map(L::lane_a);
    state_b.0 = h.map(L::lane_b);
}
