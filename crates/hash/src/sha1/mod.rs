// Copyright 2025 Irreducible Inc.

//! SHA-1 as defined in FIPS 180-4, on the SHA extension instructions.

mod arch;

use crate::{
	streaming::{Block, ChainingValue, Phase, StreamState},
	Algorithm, HashError, Hasher, ShaExtensions,
};

/// Length in bytes of a SHA-1 digest.
pub const SHA1_DIGEST_SIZE: usize = 20;

/// A SHA-1 digest, `H0‖H1‖H2‖H3‖H4` big-endian.
pub type Sha1Digest = [u8; SHA1_DIGEST_SIZE];

const IV: [u32; 5] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476, 0xc3d2e1f0];

/// The five chaining words in the register layout of `sha1rnds4`/`sha1nexte`.
///
/// Element 0 of each array is the least significant 32-bit lane:
/// `lanes[0] = [H3, H2, H1, H0]`, `lanes[1] = [0, 0, 0, H4]`.
pub(crate) type Sha1Lanes = [[u32; 4]; 2];

pub(crate) const fn pack(words: [u32; 5]) -> Sha1Lanes {
	[[words[3], words[2], words[1], words[0]], [0, 0, 0, words[4]]]
}

pub(crate) const fn unpack(lanes: &Sha1Lanes) -> [u32; 5] {
	[lanes[0][3], lanes[0][2], lanes[0][1], lanes[0][0], lanes[1][3]]
}

#[derive(Clone, Copy, Debug)]
#[repr(C, align(16))]
struct Sha1Chaining {
	lanes: Sha1Lanes,
	extensions: ShaExtensions,
}

impl Sha1Chaining {
	fn initial(extensions: ShaExtensions) -> Self {
		Self {
			lanes: pack(IV),
			extensions,
		}
	}
}

impl ChainingValue for Sha1Chaining {
	#[inline]
	fn compress(&mut self, blocks: &[Block]) {
		arch::compress(self.extensions, &mut self.lanes, blocks);
	}
}

/// Incremental SHA-1 hasher.
///
/// Cloning yields an independent continuation point: both copies can be fed and finalized
/// separately.
#[derive(Clone, Debug)]
pub struct Sha1 {
	state: StreamState<Sha1Chaining>,
	extensions: ShaExtensions,
}

impl Sha1 {
	/// Construct from an already obtained probe witness; never fails.
	pub fn with_extensions(extensions: ShaExtensions) -> Self {
		Self {
			state: StreamState::new(Sha1Chaining::initial(extensions)),
			extensions,
		}
	}

	/// Bytes absorbed since construction or the last reset.
	pub fn total_len(&self) -> u64 {
		self.state.total_len()
	}
}

impl Hasher for Sha1 {
	type Digest = Sha1Digest;

	const ALGORITHM: Algorithm = Algorithm::Sha1;

	fn new() -> Result<Self, HashError> {
		ShaExtensions::detect().map(Self::with_extensions)
	}

	fn try_update(&mut self, data: &[u8]) -> Result<(), HashError> {
		self.state.update(data)
	}

	fn try_finalize(&mut self) -> Result<Sha1Digest, HashError> {
		let chaining = self.state.finalize()?;
		let mut out = [0u8; SHA1_DIGEST_SIZE];
		for (chunk, word) in out.chunks_exact_mut(4).zip(unpack(&chaining.lanes)) {
			chunk.copy_from_slice(&word.to_be_bytes());
		}
		Ok(out)
	}

	fn reset(&mut self) {
		self.state.reset(Sha1Chaining::initial(self.extensions));
	}

	fn phase(&self) -> Phase {
		self.state.phase()
	}
}

crate::impl_digest_traits!(Sha1, digest::consts::U20);
