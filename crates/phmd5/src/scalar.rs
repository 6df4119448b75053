//! Portable scalar compression function.
//!
//! This is the reference core: every vector backend must agree with it word
//! for word, and it is the fallback whenever no vector unit is available.

use crate::schedule::{BLOCK_LEN, SCHEDULE, WORDS_PER_BLOCK, load_words};
use crate::state::DigestState;

/// Compresses `blocks` (a positive multiple of [`BLOCK_LEN`] bytes) into `state`.
pub(crate) fn compress(state: &mut DigestState, blocks: &[u8]) {
    debug_assert!(!blocks.is_empty() && blocks.len() % BLOCK_LEN == 0);

    for block in blocks.chunks_exact(BLOCK_LEN) {
        let words = load_words(block);
        state.0 = run_schedule(state.0, |i| words[i]);
    }
}

/// Compresses `blocks` all-zero blocks into `state` without reading memory.
pub(crate) fn compress_zeros(state: &mut DigestState, blocks: u64) {
    for _ in 0..blocks {
        state.0 = run_schedule(state.0, |_| 0);
    }
}

#[inline(always)]
fn run_schedule(h: [u32; 4], word: impl Fn(usize) -> u32) -> [u32; 4] {
    let [mut a, mut b, mut c, mut d] = h;

    for step in &SCHEDULE {
        debug_assert!(step.word < WORDS_PER_BLOCK);
        let mixed = a
            .wrapping_add(step.round.apply(b, c, d))
            .wrapping_add(word(step.word))
            .wrapping_add(step.k);
        let next = b.wrapping_add(mixed.rotate_left(step.shift));
        a = d;
        d = c;
        c = b;
        b = next;
    }

    [
        h[0].wrapping_add(a),
        h[1].wrapping_add(b),
        h[2].wrapping_add(c),
        h[3].wrapping_add(d),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Single padded block for "abc".
    fn abc_block() -> [u8; BLOCK_LEN] {
        let mut block = [0u8; BLOCK_LEN];
        block[..3].copy_from_slice(b"abc");
        block[3] = 0x80;
        block[56] = 24;
        block
    }

    #[test]
    fn single_block_matches_rfc1321_abc() {
        let mut state = DigestState::INITIAL;
        compress(&mut state, &abc_block());
        assert_eq!(
            state.to_bytes(),
            [
                0x90, 0x01, 0x50, 0x98, 0x3c, 0xd2, 0x4f, 0xb0, 0xd6, 0x96, 0x3f, 0x7d, 0x28,
                0xe1, 0x7f, 0x72
            ]
        );
    }

    #[test]
    fn multiple_blocks_chain_in_order() {
        let mut data = vec![0u8; BLOCK_LEN * 3];
        for (i, byte) in data.iter_mut().enumerate() {
            *byte = (i * 7 + 3) as u8;
        }

        let mut together = DigestState::INITIAL;
        compress(&mut together, &data);

        let mut one_by_one = DigestState::INITIAL;
        for block in data.chunks_exact(BLOCK_LEN) {
            compress(&mut one_by_one, block);
        }

        assert_eq!(together, one_by_one);
    }

    #[test]
    fn zero_fast_path_matches_generic_path_from_arbitrary_state() {
        let starts = [
            DigestState::INITIAL,
            DigestState::from_words([0, 0, 0, 0]),
            DigestState::from_words([u32::MAX; 4]),
            DigestState::from_words([0x0123_4567, 0x89ab_cdef, 0xfedc_ba98, 0x7654_3210]),
        ];

        for start in starts {
            for blocks in 1..=3u64 {
                let mut generic = start;
                compress(&mut generic, &vec![0u8; BLOCK_LEN * blocks as usize]);

                let mut fast = start;
                compress_zeros(&mut fast, blocks);

                assert_eq!(generic, fast, "start {start:?}, {blocks} blocks");
            }
        }
    }

    #[test]
    fn zero_blocks_leave_state_untouched() {
        let mut state = DigestState::from_words([1, 2, 3, 4]);
        compress_zeros(&mut state, 0);
        assert_eq!(state.words(), [1, 2, 3, 4]);
    }
}
