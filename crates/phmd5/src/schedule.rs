//! The RFC 1321 step schedule.
//!
//! All compression cores walk the same 64-entry table instead of unrolling
//! four near-identical rounds by hand. Each [`Step`] names the nonlinear
//! function, the message word it consumes, the rotation amount, and the
//! additive constant.

/// Bytes per MD5 block.
pub const BLOCK_LEN: usize = 64;

/// Number of 32-bit message words per block.
pub(crate) const WORDS_PER_BLOCK: usize = BLOCK_LEN / 4;

/// `floor(2^32 * |sin(i + 1)|)` for `i` in `0..64`.
pub(crate) const K: [u32; 64] = [
    0xd76a_a478, 0xe8c7_b756, 0x2420_70db, 0xc1bd_ceee, 0xf57c_0faf, 0x4787_c62a, 0xa830_4613, 0xfd46_9501,
    0x6980_98d8, 0x8b44_f7af, 0xffff_5bb1, 0x895c_d7be, 0x6b90_1122, 0xfd98_7193, 0xa679_438e, 0x49b4_0821,
    0xf61e_2562, 0xc040_b340, 0x265e_5a51, 0xe9b6_c7aa, 0xd62f_105d, 0x0244_1453, 0xd8a1_e681, 0xe7d3_fbc8,
    0x21e1_cde6, 0xc337_07d6, 0xf4d5_0d87, 0x455a_14ed, 0xa9e3_e905, 0xfcef_a3f8, 0x676f_02d9, 0x8d2a_4c8a,
    0xfffa_3942, 0x8771_f681, 0x6d9d_6122, 0xfde5_380c, 0xa4be_ea44, 0x4bde_cfa9, 0xf6bb_4b60, 0xbebf_bc70,
    0x289b_7ec6, 0xeaa1_27fa, 0xd4ef_3085, 0x0488_1d05, 0xd9d4_d039, 0xe6db_99e5, 0x1fa2_7cf8, 0xc4ac_5665,
    0xf429_2244, 0x432a_ff97, 0xab94_23a7, 0xfc93_a039, 0x655b_59c3, 0x8f0c_cc92, 0xffef_f47d, 0x8584_5dd1,
    0x6fa8_7e4f, 0xfe2c_e6e0, 0xa301_4314, 0x4e08_11a1, 0xf753_7e82, 0xbd3a_f235, 0x2ad7_d2bb, 0xeb86_d391,
];

/// Rotation amounts, cycled four at a time within each round.
const SHIFTS: [[u32; 4]; 4] = [
    [7, 12, 17, 22],
    [5, 9, 14, 20],
    [4, 11, 16, 23],
    [6, 10, 15, 21],
];

/// Every distinct rotation amount used by the schedule.
#[cfg(test)]
pub(crate) const ROTATIONS: [u32; 16] = [4, 5, 6, 7, 9, 10, 11, 12, 14, 15, 16, 17, 20, 21, 22, 23];

/// Nonlinear mixing function of one round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Round {
    /// `(x & y) | (!x & z)`
    F,
    /// `(x & z) | (y & !z)`
    G,
    /// `x ^ y ^ z`
    H,
    /// `y ^ (x | !z)`
    I,
}

impl Round {
    #[inline(always)]
    pub(crate) const fn apply(self, x: u32, y: u32, z: u32) -> u32 {
        match self {
            Self::F => (x & y) | (!x & z),
            Self::G => (x & z) | (y & !z),
            Self::H => x ^ y ^ z,
            Self::I => y ^ (x | !z),
        }
    }
}

/// One of the 64 MD5 steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Step {
    pub(crate) round: Round,
    pub(crate) word: usize,
    pub(crate) shift: u32,
    pub(crate) k: u32,
}

pub(crate) const SCHEDULE: [Step; 64] = build_schedule();

const fn build_schedule() -> [Step; 64] {
    let mut steps = [Step {
        round: Round::F,
        word: 0,
        shift: 0,
        k: 0,
    }; 64];

    let mut i = 0;
    while i < 64 {
        let round = i / 16;
        let k = i % 16;
        let (function, word) = match round {
            0 => (Round::F, k),
            1 => (Round::G, (1 + 5 * k) % 16),
            2 => (Round::H, (5 + 3 * k) % 16),
            _ => (Round::I, (7 * k) % 16),
        };
        steps[i] = Step {
            round: function,
            word,
            shift: SHIFTS[round][i % 4],
            k: K[i],
        };
        i += 1;
    }

    steps
}

/// Reads the sixteen little-endian message words of one block.
#[inline(always)]
pub(crate) fn load_words(block: &[u8]) -> [u32; WORDS_PER_BLOCK] {
    debug_assert_eq!(block.len(), BLOCK_LEN);
    std::array::from_fn(|i| {
        let at = i * 4;
        u32::from_le_bytes([block[at], block[at + 1], block[at + 2], block[at + 3]])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_visits_every_word_once_per_round() {
        for round in SCHEDULE.chunks_exact(16) {
            let mut seen = [false; 16];
            for step in round {
                assert!(!seen[step.word], "word {} repeated", step.word);
                seen[step.word] = true;
            }
        }
    }

    #[test]
    fn schedule_matches_rfc1321_spot_checks() {
        assert_eq!(
            SCHEDULE[0],
            Step {
                round: Round::F,
                word: 0,
                shift: 7,
                k: 0xd76a_a478,
            }
        );
        assert_eq!(
            SCHEDULE[19],
            Step {
                round: Round::G,
                word: 0,
                shift: 20,
                k: 0xe9b6_c7aa,
            }
        );
        assert_eq!(
            SCHEDULE[32],
            Step {
                round: Round::H,
                word: 5,
                shift: 4,
                k: 0xfffa_3942,
            }
        );
        assert_eq!(
            SCHEDULE[63],
            Step {
                round: Round::I,
                word: 9,
                shift: 21,
                k: 0xeb86_d391,
            }
        );
    }

    #[test]
    fn constants_follow_sine_table() {
        for (i, &k) in K.iter().enumerate() {
            let expected = ((i as f64 + 1.0).sin().abs() * 4_294_967_296.0) as u32;
            assert_eq!(k, expected, "constant {i}");
        }
    }

    #[test]
    fn rotation_list_covers_schedule() {
        for step in &SCHEDULE {
            assert!(ROTATIONS.contains(&step.shift));
        }
    }

    #[test]
    fn words_are_little_endian() {
        let mut block = [0u8; BLOCK_LEN];
        block[..4].copy_from_slice(&[0x01, 0x02, 0x03, 0x04]);
        block[60..].copy_from_slice(&[0xff, 0x00, 0x00, 0x80]);
        let words = load_words(&block);
        assert_eq!(words[0], 0x0403_0201);
        assert_eq!(words[15], 0x8000_00ff);
    }
}
