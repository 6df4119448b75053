//! Backend selection and dispatch.
//!
//! The compression cores are monomorphized per backend; this module picks one
//! at runtime and routes each call to it. Detection runs once per process and
//! is cached in a [`OnceLock`]. Setting `PHMD5_BACKEND` to a backend name
//! overrides detection for the whole process; a single context can be pinned
//! with `Md5::with_backend` or `DualHasher::with_backend` instead.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use tracing::{debug, warn};

use crate::error::Error;
use crate::scalar;
use crate::simd;
use crate::state::DigestState;

/// Environment variable consulted by [`Dispatcher::detect`].
pub const BACKEND_ENV: &str = "PHMD5_BACKEND";

/// Implementations of the compression cores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// SSE2 lanes (x86_64, or x86 built with `sse2`).
    Sse2,
    /// NEON lanes (little-endian aarch64).
    Neon,
    /// Software lanes reproducing the SSE2 semantics on any target.
    Portable,
    /// Plain `u32` arithmetic; always available.
    Scalar,
}

impl Backend {
    /// Every backend, in detection preference order.
    pub const ALL: [Self; 4] = [Self::Sse2, Self::Neon, Self::Portable, Self::Scalar];

    /// Lower-case name accepted by [`FromStr`] and `PHMD5_BACKEND`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sse2 => "sse2",
            Self::Neon => "neon",
            Self::Portable => "portable",
            Self::Scalar => "scalar",
        }
    }

    /// Whether this backend is compiled into the current build.
    #[must_use]
    pub const fn is_available(self) -> bool {
        match self {
            Self::Sse2 => cfg!(any(
                target_arch = "x86_64",
                all(target_arch = "x86", target_feature = "sse2")
            )),
            Self::Neon => cfg!(all(target_arch = "aarch64", target_endian = "little")),
            Self::Portable | Self::Scalar => true,
        }
    }

    /// Returns `self` if available, otherwise [`Backend::Scalar`].
    #[must_use]
    pub const fn resolve(self) -> Self {
        if self.is_available() {
            self
        } else {
            Self::Scalar
        }
    }

    /// Backends usable in this build.
    pub fn available() -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(|backend| backend.is_available())
    }

    pub(crate) fn compress(self, state: &mut DigestState, blocks: &[u8]) {
        match self {
            #[cfg(any(target_arch = "x86_64", all(target_arch = "x86", target_feature = "sse2")))]
            Self::Sse2 => simd::compress::<simd::sse2::Sse2>(state, blocks),
            #[cfg(all(target_arch = "aarch64", target_endian = "little"))]
            Self::Neon => simd::compress::<simd::neon::Neon>(state, blocks),
            Self::Portable => simd::compress::<simd::portable::Portable>(state, blocks),
            _ => scalar::compress(state, blocks),
        }
    }

    pub(crate) fn compress_zeros(self, state: &mut DigestState, blocks: u64) {
        match self {
            #[cfg(any(target_arch = "x86_64", all(target_arch = "x86", target_feature = "sse2")))]
            Self::Sse2 => simd::compress_zeros::<simd::sse2::Sse2>(state, blocks),
            #[cfg(all(target_arch = "aarch64", target_endian = "little"))]
            Self::Neon => simd::compress_zeros::<simd::neon::Neon>(state, blocks),
            Self::Portable => simd::compress_zeros::<simd::portable::Portable>(state, blocks),
            _ => scalar::compress_zeros(state, blocks),
        }
    }

    pub(crate) fn compress_dual(
        self,
        state_a: &mut DigestState,
        state_b: &mut DigestState,
        blocks_a: &[u8],
        blocks_b: &[u8],
    ) {
        match self {
            #[cfg(any(target_arch = "x86_64", all(target_arch = "x86", target_feature = "sse2")))]
            Self::Sse2 => {
                simd::compress_dual::<simd::sse2::Sse2>(state_a, state_b, blocks_a, blocks_b);
            }
            #[cfg(all(target_arch = "aarch64", target_endian = "little"))]
            Self::Neon => {
                simd::compress_dual::<simd::neon::Neon>(state_a, state_b, blocks_a, blocks_b);
            }
            Self::Portable => {
                simd::compress_dual::<simd::portable::Portable>(
                    state_a, state_b, blocks_a, blocks_b,
                );
            }
            _ => {
                scalar::compress(state_a, blocks_a);
                scalar::compress(state_b, blocks_b);
            }
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|backend| backend.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownBackend { name: s.to_owned() })
    }
}

/// Holds the backend chosen for this process.
#[derive(Debug)]
pub struct Dispatcher {
    backend: Backend,
}

impl Dispatcher {
    /// Detects the best backend, honouring `PHMD5_BACKEND`.
    #[must_use]
    pub fn detect() -> Self {
        let requested = env::var(BACKEND_ENV).ok();
        let backend = select(requested.as_deref());
        debug!(
            target: "phmd5::dispatch",
            backend = backend.name(),
            "selected MD5 backend"
        );
        Self { backend }
    }

    /// The selected backend.
    #[must_use]
    pub const fn backend(&self) -> Backend {
        self.backend
    }
}

fn select(requested: Option<&str>) -> Backend {
    if let Some(name) = requested.filter(|name| !name.trim().is_empty()) {
        match name.parse::<Backend>() {
            Ok(backend) if backend.is_available() => return backend,
            Ok(backend) => warn!(
                target: "phmd5::dispatch",
                backend = backend.name(),
                "requested backend is not available on this target, detecting instead"
            ),
            Err(err) => warn!(target: "phmd5::dispatch", %err, "ignoring {BACKEND_ENV}"),
        }
    }
    native()
}

const fn native() -> Backend {
    if Backend::Sse2.is_available() {
        Backend::Sse2
    } else if Backend::Neon.is_available() {
        Backend::Neon
    } else {
        Backend::Scalar
    }
}

/// Process-wide dispatcher, initialized on first use.
pub fn global() -> &'static Dispatcher {
    static DISPATCHER: OnceLock<Dispatcher> = OnceLock::new();
    DISPATCHER.get_or_init(Dispatcher::detect)
}
