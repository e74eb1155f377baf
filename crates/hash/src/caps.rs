// Copyright 2025 Irreducible Inc.

//! Process-wide probe for the CPU hash extensions.
//!
//! The probe runs once, on first use, and its answer is final for the lifetime of the process.
//! Nothing in this crate falls back to a software transform when the answer is negative: engine
//! construction fails instead and [`crate::advertised`] lists no algorithms.

use cfg_if::cfg_if;
use lazy_static::lazy_static;
use shani_utils::env::boolean_env_flag_set;
use tracing::{debug, warn};

use crate::HashError;

/// Environment flag that makes the probe report the extensions as unavailable.
pub const DISABLE_ENV_FLAG: &str = "SHANI_DISABLE";

/// Instruction set extensions the block transforms are compiled against, in probe order.
pub const REQUIRED_FEATURES: [&str; 3] = ["sse2", "ssse3", "sha"];

cfg_if! {
	if #[cfg(any(target_arch = "x86", target_arch = "x86_64"))] {
		#[derive(Clone, Copy, Debug, PartialEq, Eq)]
		struct Witness;
	} else {
		/// Uninhabited: the extensions never exist off x86.
		#[derive(Clone, Copy, Debug, PartialEq, Eq)]
		enum Witness {}
	}
}

/// Proof that the running CPU executes the SHA extension instructions.
///
/// The only way to obtain a value is [`ShaExtensions::detect`]. Every engine carries one, which is
/// what makes it sound for the engines to call into the accelerated transforms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShaExtensions(Witness);

lazy_static! {
	static ref PROBE: Result<ShaExtensions, HashError> = probe();
}

impl ShaExtensions {
	/// Return the cached probe result, running the probe on first call.
	pub fn detect() -> Result<Self, HashError> {
		*PROBE
	}

	/// Off x86 no witness can exist, so code holding one is unreachable.
	#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
	pub(crate) fn unreachable(self) -> ! {
		match self.0 {}
	}
}

/// Whether the hash engines can be constructed in this process.
pub fn is_available() -> bool {
	PROBE.is_ok()
}

fn probe() -> Result<ShaExtensions, HashError> {
	let disabled = boolean_env_flag_set(DISABLE_ENV_FLAG);
	let result = evaluate(disabled, &detected_features());
	if let Err(err) = &result {
		warn!(%err, "SHA engines will not be offered");
	}
	result
}

cfg_if! {
	if #[cfg(any(target_arch = "x86", target_arch = "x86_64"))] {
		fn detected_features() -> [(&'static str, bool); 3] {
			[
				("sse2", std::arch::is_x86_feature_detected!("sse2")),
				("ssse3", std::arch::is_x86_feature_detected!("ssse3")),
				("sha", std::arch::is_x86_feature_detected!("sha")),
			]
		}

		fn evaluate(
			disabled: bool,
			features: &[(&'static str, bool)],
		) -> Result<ShaExtensions, HashError> {
			if disabled {
				return Err(HashError::Disabled {
					flag: DISABLE_ENV_FLAG,
				});
			}
			for &(feature, present) in features {
				debug!(feature, present, "probed CPU feature");
				if !present {
					return Err(HashError::Unsupported { missing: feature });
				}
			}
			Ok(ShaExtensions(Witness))
		}
	} else {
		fn detected_features() -> [(&'static str, bool); 3] {
			REQUIRED_FEATURES.map(|feature| (feature, false))
		}

		fn evaluate(
			disabled: bool,
			features: &[(&'static str, bool)],
		) -> Result<ShaExtensions, HashError> {
			if disabled {
				return Err(HashError::Disabled {
					flag: DISABLE_ENV_FLAG,
				});
			}
			let missing = features.last().map_or("sha", |&(feature, _)| feature);
			debug!(missing, "no SHA extensions on this architecture");
			Err(HashError::Unsupported { missing })
		}
	}
}
