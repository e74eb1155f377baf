// Copyright 2025 Irreducible Inc.

//! SHA-224: the SHA-256 transform with its own IV and a truncated output.

use crate::{
	sha256::Sha256Chaining,
	streaming::{Phase, StreamState},
	Algorithm, HashError, Hasher, ShaExtensions,
};

/// Length in bytes of a SHA-224 digest.
pub const SHA224_DIGEST_SIZE: usize = 28;

/// A SHA-224 digest, `H0‖…‖H6` big-endian.
pub type Sha224Digest = [u8; SHA224_DIGEST_SIZE];

const IV: [u32; 8] = [
	0xc1059ed8, 0x367cd507, 0x3070dd17, 0xf70e5939, 0xffc00b31, 0x68581511, 0x64f98fa7, 0xbefa4fa4,
];

/// Incremental SHA-224 hasher.
#[derive(Clone, Debug)]
pub struct Sha224 {
	state: StreamState<Sha256Chaining>,
	extensions: ShaExtensions,
}

impl Sha224 {
	/// Construct from an already obtained probe witness; never fails.
	pub fn with_extensions(extensions: ShaExtensions) -> Self {
		Self {
			state: StreamState::new(Sha256Chaining::initial(IV, extensions)),
			extensions,
		}
	}

	/// Bytes absorbed since construction or the last reset.
	pub fn total_len(&self) -> u64 {
		self.state.total_len()
	}
}

impl Hasher for Sha224 {
	type Digest = Sha224Digest;

	const ALGORITHM: Algorithm = Algorithm::Sha224;

	fn new() -> Result<Self, HashError> {
		ShaExtensions::detect().map(Self::with_extensions)
	}

	fn try_update(&mut self, data: &[u8]) -> Result<(), HashError> {
		self.state.update(data)
	}

	fn try_finalize(&mut self) -> Result<Sha224Digest, HashError> {
		let full = self.state.finalize()?.to_bytes();
		let mut out = [0u8; SHA224_DIGEST_SIZE];
		out.copy_from_slice(&full[..SHA224_DIGEST_SIZE]);
		Ok(out)
	}

	fn reset(&mut self) {
		self.state
			.reset(Sha256Chaining::initial(IV, self.extensions));
	}

	fn phase(&self) -> Phase {
		self.state.phase()
	}
}

crate::impl_digest_traits!(Sha224, digest::consts::U28);
