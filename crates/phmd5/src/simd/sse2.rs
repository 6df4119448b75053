//! SSE2 lanes.
//!
//! # CPU Feature Requirements
//!
//! - **SSE2**: architectural baseline on x86_64. On 32-bit x86 this module is
//!   only compiled when the target enables `sse2` statically, so no runtime
//!   detection is needed before calling into it.
//!
//! # SIMD Strategy
//!
//! SSE2 lacks a 32-bit rotate. [`Sse2::rotl_even`] uses `pshufd` with
//! `_MM_SHUFFLE(2, 2, 0, 0)` to copy dwords 0 and 2 into their upper
//! neighbours, then `psrlq` by `32 - shift`; the low dword of each 64-bit half
//! is the rotated value. The interleaving load reads eight bytes from each
//! stream with `movq` and unpacks them into `[a0, a0, b0, b0]` /
//! `[a1, a1, b1, b1]`.
//!
//! # Safety
//!
//! The intrinsics only require `sse2`, which the `cfg` on this module
//! guarantees. The only raw-pointer access is the eight-byte `movq` load,
//! guarded by a length check.

#![allow(unsafe_code)]
#![allow(unused_unsafe)]

#[cfg(target_arch = "x86")]
use std::arch::x86::{
    __m128i, _mm_add_epi32, _mm_and_si128, _mm_andnot_si128, _mm_cmpeq_epi32, _mm_cvtsi32_si128,
    _mm_cvtsi128_si32, _mm_loadl_epi64, _mm_or_si128, _mm_set_epi32, _mm_set1_epi32,
    _mm_shuffle_epi32, _mm_srl_epi64, _mm_srli_si128, _mm_unpackhi_epi32, _mm_unpacklo_epi32,
    _mm_xor_si128,
};
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::{
    __m128i, _mm_add_epi32, _mm_and_si128, _mm_andnot_si128, _mm_cmpeq_epi32, _mm_cvtsi32_si128,
    _mm_cvtsi128_si32, _mm_loadl_epi64, _mm_or_si128, _mm_set_epi32, _mm_set1_epi32,
    _mm_shuffle_epi32, _mm_srl_epi64, _mm_srli_si128, _mm_unpackhi_epi32, _mm_unpacklo_epi32,
    _mm_xor_si128,
};

use super::{Lanes, PAIR_LOAD_LEN};

/// `_MM_SHUFFLE(2, 2, 0, 0)`
const DUPLICATE_EVEN: i32 = 0b10_10_00_00;

#[derive(Clone, Copy)]
pub(crate) struct Sse2(__m128i);

impl Lanes for Sse2 {
    #[inline(always)]
    fn splat(value: u32) -> Self {
        Self(unsafe { _mm_set1_epi32(value as i32) })
    }

    #[inline(always)]
    fn pair(a: u32, b: u32) -> Self {
        Self(unsafe { _mm_set_epi32(b as i32, b as i32, a as i32, a as i32) })
    }

    #[inline(always)]
    fn lane_a(self) -> u32 {
        unsafe { _mm_cvtsi128_si32(self.0) as u32 }
    }

    #[inline(always)]
    fn lane_b(self) -> u32 {
        unsafe { _mm_cvtsi128_si32(_mm_srli_si128::<8>(self.0)) as u32 }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self(unsafe { _mm_add_epi32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        Self(unsafe { _mm_and_si128(self.0, rhs.0) })
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        Self(unsafe { _mm_or_si128(self.0, rhs.0) })
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        Self(unsafe { _mm_xor_si128(self.0, rhs.0) })
    }

    #[inline(always)]
    fn andnot(self, rhs: Self) -> Self {
        Self(unsafe { _mm_andnot_si128(self.0, rhs.0) })
    }

    #[inline(always)]
    fn not(self) -> Self {
        // cmpeq against itself yields all ones without a constant load
        Self(unsafe { _mm_xor_si128(self.0, _mm_cmpeq_epi32(self.0, self.0)) })
    }

    #[inline(always)]
    fn rotl_even(self, shift: u32) -> Self {
        debug_assert!((1..32).contains(&shift));
        Self(unsafe {
            let duplicated = _mm_shuffle_epi32::<DUPLICATE_EVEN>(self.0);
            _mm_srl_epi64(duplicated, _mm_cvtsi32_si128((32 - shift) as i32))
        })
    }

    #[inline(always)]
    fn load_pairs(a: &[u8], b: &[u8]) -> [Self; 2] {
        assert!(a.len() >= PAIR_LOAD_LEN && b.len() >= PAIR_LOAD_LEN);
        // SAFETY: both slices hold at least eight readable bytes and `movq`
        // has no alignment requirement.
        unsafe {
            let xa = _mm_loadl_epi64(a.as_ptr().cast::<__m128i>());
            let xb = _mm_loadl_epi64(b.as_ptr().cast::<__m128i>());
            let mixed = _mm_unpacklo_epi32(xa, xb);
            [
                Self(_mm_unpacklo_epi32(mixed, mixed)),
                Self(_mm_unpackhi_epi32(mixed, mixed)),
            ]
        }
    }
}
