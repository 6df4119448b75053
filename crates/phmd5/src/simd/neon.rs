//! ARM NEON lanes for little-endian aarch64.
//!
//! NEON could rotate with two variable shifts, but the dual-lane layout wants
//! the same dword-pairing as the SSE2 path, so this backend reproduces the
//! duplicate-and-shift rotation: `trn1` copies dwords 0 and 2 into their odd
//! neighbours and a 64-bit `ushl` by a negative count performs the right shift.
//!
//! # Safety
//!
//! NEON is mandatory on aarch64, so the intrinsics are always available. The
//! loads go through byte pointers (`vld1_u8`), which carry no alignment
//! requirement, after a length check.

#![allow(unsafe_code)]
#![allow(unused_unsafe)]

use core::arch::aarch64::{
    uint32x4_t, vaddq_u32, vandq_u32, vbicq_u32, vcombine_u32, vdup_lane_u32, vdupq_n_s64,
    vdupq_n_u32, veorq_u32, vgetq_lane_u32, vld1_u8, vmvnq_u32, vorrq_u32, vreinterpret_u32_u8,
    vreinterpretq_u32_u64, vreinterpretq_u64_u32, vsetq_lane_u32, vshlq_u64, vtrn1q_u32,
};

use super::{Lanes, PAIR_LOAD_LEN};

#[derive(Clone, Copy)]
pub(crate) struct Neon(uint32x4_t);

impl Lanes for Neon {
    #[inline(always)]
    fn splat(value: u32) -> Self {
        Self(unsafe { vdupq_n_u32(value) })
    }

    #[inline(always)]
    fn pair(a: u32, b: u32) -> Self {
        Self(unsafe { vsetq_lane_u32::<3>(b, vsetq_lane_u32::<2>(b, vdupq_n_u32(a))) })
    }

    #[inline(always)]
    fn lane_a(self) -> u32 {
        unsafe { vgetq_lane_u32::<0>(self.0) }
    }

    #[inline(always)]
    fn lane_b(self) -> u32 {
        unsafe { vgetq_lane_u32::<2>(self.0) }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self(unsafe { vaddq_u32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        Self(unsafe { vandq_u32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        Self(unsafe { vorrq_u32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        Self(unsafe { veorq_u32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn andnot(self, rhs: Self) -> Self {
        // bic computes `first & !second`
        Self(unsafe { vbicq_u32(rhs.0, self.0) })
    }

    #[inline(always)]
    fn not(self) -> Self {
        Self(unsafe { vmvnq_u32(self.0) })
    }

    #[inline(always)]
    fn rotl_even(self, shift: u32) -> Self {
        debug_assert!((1..32).contains(&shift));
        Self(unsafe {
            let duplicated = vreinterpretq_u64_u32(vtrn1q_u32(self.0, self.0));
            let count = vdupq_n_s64(-i64::from(32 - shift));
            vreinterpretq_u32_u64(vshlq_u64(duplicated, count))
        })
    }

    #[inline(always)]
    fn load_pairs(a: &[u8], b: &[u8]) -> [Self; 2] {
        assert!(a.len() >= PAIR_LOAD_LEN && b.len() >= PAIR_LOAD_LEN);
        // SAFETY: both slices hold at least eight readable bytes; byte loads
        // have no alignment requirement.
        unsafe {
            let xa = vreinterpret_u32_u8(vld1_u8(a.as_ptr()));
            let xb = vreinterpret_u32_u8(vld1_u8(b.as_ptr()));
            [
                Self(vcombine_u32(vdup_lane_u32::<0>(xa), vdup_lane_u32::<0>(xb))),
                Self(vcombine_u32(vdup_lane_u32::<1>(xa), vdup_lane_u32::<1>(xb))),
            ]
        }
    }
}
