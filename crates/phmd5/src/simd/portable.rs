//! Integer rendition of the 128-bit lane semantics.
//!
//! Mirrors the SSE2 backend dword for dword, including the contents of the
//! scratch dwords after a rotation, so the vector cores can be exercised and
//! selected on targets without a supported vector unit.

use super::{Lanes, PAIR_LOAD_LEN};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Portable([u32; 4]);

impl Portable {
    #[inline(always)]
    fn zip(self, rhs: Self, op: impl Fn(u32, u32) -> u32) -> Self {
        Self(std::array::from_fn(|i| op(self.0[i], rhs.0[i])))
    }
}

#[inline(always)]
fn le_word(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

impl Lanes for Portable {
    #[inline(always)]
    fn splat(value: u32) -> Self {
        Self([value; 4])
    }

    #[inline(always)]
    fn pair(a: u32, b: u32) -> Self {
        Self([a, a, b, b])
    }

    #[inline(always)]
    fn lane_a(self) -> u32 {
        self.0[0]
    }

    #[inline(always)]
    fn lane_b(self) -> u32 {
        self.0[2]
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        self.zip(rhs, u32::wrapping_add)
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        self.zip(rhs, |x, y| x & y)
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        self.zip(rhs, |x, y| x | y)
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        self.zip(rhs, |x, y| x ^ y)
    }

    #[inline(always)]
    fn andnot(self, rhs: Self) -> Self {
        self.zip(rhs, |x, y| !x & y)
    }

    #[inline(always)]
    fn not(self) -> Self {
        Self(self.0.map(|x| !x))
    }

    #[inline(always)]
    fn rotl_even(self, shift: u32) -> Self {
        debug_assert!((1..32).contains(&shift));
        let half = |low: u32| {
            let duplicated = (u64::from(low) << 32) | u64::from(low);
            duplicated >> (32 - shift)
        };
        let lo = half(self.0[0]);
        let hi = half(self.0[2]);
        Self([lo as u32, (lo >> 32) as u32, hi as u32, (hi >> 32) as u32])
    }

    #[inline(always)]
    fn load_pairs(a: &[u8], b: &[u8]) -> [Self; 2] {
        debug_assert!(a.len() >= PAIR_LOAD_LEN && b.len() >= PAIR_LOAD_LEN);
        let (a0, a1) = (le_word(a, 0), le_word(a, 4));
        let (b0, b1) = (le_word(b, 0), le_word(b, 4));
        [Self([a0, a0, b0, b0]), Self([a1, a1, b1, b1])]
    }
}
