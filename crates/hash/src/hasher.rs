// Copyright 2025 Irreducible Inc.

use crate::{streaming::Phase, Algorithm, HashError};

/// Incremental hash engine over byte strings.
///
/// The interface follows [`digest::Digest`], except that construction is fallible (the CPU may
/// lack the extensions) and every operation has a checked `try_` form that reports misuse of a
/// finalized state instead of panicking.
pub trait Hasher: Clone + Sized {
	/// The hash function output type.
	type Digest: AsRef<[u8]> + Copy;

	/// Which entry of the algorithm table this engine implements.
	const ALGORITHM: Algorithm;

	/// Fresh state at the algorithm's IV, or the probe error if the extensions are unavailable.
	fn new() -> Result<Self, HashError>;

	/// Absorb `data`. Fails only once the state is finalized.
	fn try_update(&mut self, data: &[u8]) -> Result<(), HashError>;

	/// Pad and produce the digest. The state stays finalized until [`Hasher::reset`].
	fn try_finalize(&mut self) -> Result<Self::Digest, HashError>;

	/// Return to the IV, from any phase.
	fn reset(&mut self);

	fn phase(&self) -> Phase;

	/// Absorb `data`.
	///
	/// # Panics
	/// If the state is finalized.
	fn update(&mut self, data: impl AsRef<[u8]>) {
		if let Err(err) = self.try_update(data.as_ref()) {
			panic!("{err}");
		}
	}

	fn chain_update(mut self, data: impl AsRef<[u8]>) -> Self {
		self.update(data);
		self
	}

	/// # Panics
	/// If the state is already finalized.
	fn finalize(mut self) -> Self::Digest {
		match self.try_finalize() {
			Ok(digest) => digest,
			Err(err) => panic!("{err}"),
		}
	}

	/// Produce the digest and return to the IV, so the state can be reused at once.
	fn finalize_reset(&mut self) -> Self::Digest {
		let digest = match self.try_finalize() {
			Ok(digest) => digest,
			Err(err) => panic!("{err}"),
		};
		self.reset();
		digest
	}

	/// Write the leading `min(out.len(), digest length)` digest bytes into `out` and return
	/// that count.
	fn finalize_into_slice(&mut self, out: &mut [u8]) -> Result<usize, HashError> {
		let digest = self.try_finalize()?;
		let digest = digest.as_ref();
		let written = out.len().min(digest.len());
		out[..written].copy_from_slice(&digest[..written]);
		Ok(written)
	}
}

/// One-shot digest of `data`.
pub fn hash<H: Hasher>(data: impl AsRef<[u8]>) -> Result<H::Digest, HashError> {
	let mut hasher = H::new()?;
	hasher.try_update(data.as_ref())?;
	hasher.try_finalize()
}

/// Implement the RustCrypto `digest` traits in terms of [`Hasher`].
///
/// The engines have no `Default` (construction can fail), so they are not [`digest::Digest`],
/// but they do satisfy [`digest::DynDigest`] through its blanket implementation.
#[doc(hidden)]
#[macro_export]
macro_rules! impl_digest_traits {
	($ty:ty, $output_size:ty) => {
		impl $crate::digest::HashMarker for $ty {}

		impl $crate::digest::OutputSizeUser for $ty {
			type OutputSize = $output_size;
		}

		impl $crate::digest::Update for $ty {
			fn update(&mut self, data: &[u8]) {
				$crate::Hasher::update(self, data)
			}
		}

		impl $crate::digest::FixedOutput for $ty {
			fn finalize_into(self, out: &mut $crate::digest::Output<Self>) {
				out.copy_from_slice($crate::Hasher::finalize(self).as_ref())
			}
		}

		impl $crate::digest::FixedOutputReset for $ty {
			fn finalize_into_reset(&mut self, out: &mut $crate::digest::Output<Self>) {
				out.copy_from_slice($crate::Hasher::finalize_reset(self).as_ref())
			}
		}

		impl $crate::digest::Reset for $ty {
			fn reset(&mut self) {
				$crate::Hasher::reset(self)
			}
		}
	};
}
