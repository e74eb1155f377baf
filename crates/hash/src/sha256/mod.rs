// Copyright 2025 Irreducible Inc.

//! SHA-256 as defined in FIPS 180-4, on the SHA extension instructions.

mod arch;

use crate::{
	streaming::{Block, ChainingValue, Phase, StreamState},
	Algorithm, HashError, Hasher, ShaExtensions,
};

/// Length in bytes of a SHA-256 digest.
pub const SHA256_DIGEST_SIZE: usize = 32;

/// A SHA-256 digest, `H0‖…‖H7` big-endian.
pub type Sha256Digest = [u8; SHA256_DIGEST_SIZE];

const IV: [u32; 8] = [
	0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

/// Round constants, four per schedule group.
pub(crate) const ROUND_CONSTANTS: [[u32; 4]; 16] = [
	[0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5],
	[0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5],
	[0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3],
	[0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174],
	[0xe49b69c1, 0xefbe4786, 0x0fc19dc6, 0x240ca1cc],
	[0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da],
	[0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7],
	[0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967],
	[0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13],
	[0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85],
	[0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3],
	[0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070],
	[0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5],
	[0x391c0cb3, 0x4ed8aa4a, 0x5b9cca4f, 0x682e6ff3],
	[0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208],
	[0x90befffa, 0xa4506ceb, 0xbef9a3f7, 0xc67178f2],
];

/// The eight chaining words in the register layout of `sha256rnds2`.
///
/// Element 0 of each array is the least significant 32-bit lane:
/// `lanes[0] = [H5, H4, H1, H0]` (ABEF), `lanes[1] = [H7, H6, H3, H2]` (CDGH).
pub(crate) type Sha256Lanes = [[u32; 4]; 2];

pub(crate) const fn pack(words: [u32; 8]) -> Sha256Lanes {
	[
		[words[5], words[4], words[1], words[0]],
		[words[7], words[6], words[3], words[2]],
	]
}

pub(crate) const fn unpack(lanes: &Sha256Lanes) -> [u32; 8] {
	[
		lanes[0][3],
		lanes[0][2],
		lanes[1][3],
		lanes[1][2],
		lanes[0][1],
		lanes[0][0],
		lanes[1][1],
		lanes[1][0],
	]
}

/// SHA-256 chaining value; also drives SHA-224, which differs only in IV and output length.
#[derive(Clone, Copy, Debug)]
#[repr(C, align(16))]
pub(crate) struct Sha256Chaining {
	lanes: Sha256Lanes,
	extensions: ShaExtensions,
}

impl Sha256Chaining {
	pub(crate) fn initial(iv: [u32; 8], extensions: ShaExtensions) -> Self {
		Self {
			lanes: pack(iv),
			extensions,
		}
	}

	/// Big-endian serialization of all eight words.
	pub(crate) fn to_bytes(self) -> Sha256Digest {
		let mut out = [0u8; SHA256_DIGEST_SIZE];
		for (chunk, word) in out.chunks_exact_mut(4).zip(unpack(&self.lanes)) {
			chunk.copy_from_slice(&word.to_be_bytes());
		}
		out
	}
}

impl ChainingValue for Sha256Chaining {
	#[inline]
	fn compress(&mut self, blocks: &[Block]) {
		arch::compress(self.extensions, &mut self.lanes, blocks);
	}
}

/// Incremental SHA-256 hasher.
#[derive(Clone, Debug)]
pub struct Sha256 {
	state: StreamState<Sha256Chaining>,
	extensions: ShaExtensions,
}

impl Sha256 {
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

impl Hasher for Sha256 {
	type Digest = Sha256Digest;

	const ALGORITHM: Algorithm = Algorithm::Sha256;

	fn new() -> Result<Self, HashError> {
		ShaExtensions::detect().map(Self::with_extensions)
	}

	fn try_update(&mut self, data: &[u8]) -> Result<(), HashError> {
		self.state.update(data)
	}

	fn try_finalize(&mut self) -> Result<Sha256Digest, HashError> {
		self.state.finalize().map(Sha256Chaining::to_bytes)
	}

	fn reset(&mut self) {
		self.state
			.reset(Sha256Chaining::initial(IV, self.extensions));
	}

	fn phase(&self) -> Phase {
		self.state.phase()
	}
}

crate::impl_digest_traits!(Sha256, digest::consts::U32);
