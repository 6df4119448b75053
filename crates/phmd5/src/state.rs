//! MD5 chaining state.

use crate::Digest;

/// The four MD5 chaining words `A`, `B`, `C`, `D`.
///
/// Between blocks this is the RFC 1321 chaining value; after finalization it
/// is the digest itself, serialized word by word in little-endian order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DigestState(pub(crate) [u32; 4]);

impl DigestState {
    /// RFC 1321 initialization vector.
    pub const INITIAL: Self = Self([0x6745_2301, 0xefcd_ab89, 0x98ba_dcfe, 0x1032_5476]);

    /// Builds a state from raw chaining words.
    #[must_use]
    pub const fn from_words(words: [u32; 4]) -> Self {
        Self(words)
    }

    /// Returns the raw chaining words.
    #[must_use]
    pub const fn words(&self) -> [u32; 4] {
        self.0
    }

    /// Serializes the state as the 16-byte digest layout.
    #[must_use]
    pub fn to_bytes(&self) -> Digest {
        let mut out = [0u8; 16];
        for (chunk, word) in out.chunks_exact_mut(4).zip(self.0) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        out
    }

    #[cfg(test)]
    fn from_bytes(bytes: &Digest) -> Self {
        Self(std::array::from_fn(|i| {
            let at = i * 4;
            u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
        }))
    }
}

impl Default for DigestState {
    fn default() -> Self {
        Self::INITIAL
    }
}
