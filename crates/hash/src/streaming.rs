// Copyright 2025 Irreducible Inc.

//! Merkle–Damgård streaming shared by the SHA-1 and SHA-256 engines.

use std::slice;

use crate::HashError;

/// Input block length in bytes of every engine in this crate.
pub const BLOCK_SIZE: usize = 64;

/// One input block of the compression function.
pub type Block = [u8; BLOCK_SIZE];

/// Bytes at the end of the last block that hold the message length.
const LENGTH_SIZE: usize = 8;

/// A chaining value together with the block transform that advances it.
pub(crate) trait ChainingValue: Clone {
	/// Compress `blocks` in order. An empty slice leaves the value unchanged.
	fn compress(&mut self, blocks: &[Block]);
}

/// Where a hash state is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
	/// Just initialized or reset; no `update` call yet.
	#[default]
	Fresh,
	/// At least one `update` call since the last reset.
	Streaming,
	/// The digest has been read; only `reset` leaves this phase.
	Finalized,
}

/// Partial-block buffer and length counter around a chaining value.
#[derive(Clone, Debug)]
pub(crate) struct StreamState<C> {
	chaining: C,
	buffer: Block,
	/// Valid bytes in `buffer`, always below `BLOCK_SIZE` between calls.
	buffer_len: usize,
	/// Bytes absorbed since the last reset.
	total_len: u64,
	phase: Phase,
}

impl<C: ChainingValue> StreamState<C> {
	pub fn new(iv: C) -> Self {
		Self {
			chaining: iv,
			buffer: [0; BLOCK_SIZE],
			buffer_len: 0,
			total_len: 0,
			phase: Phase::Fresh,
		}
	}

	pub fn reset(&mut self, iv: C) {
		*self = Self::new(iv);
	}

	pub fn phase(&self) -> Phase {
		self.phase
	}

	pub fn total_len(&self) -> u64 {
		self.total_len
	}

	pub fn update(&mut self, mut data: &[u8]) -> Result<(), HashError> {
		if self.phase == Phase::Finalized {
			return Err(HashError::Finalized);
		}
		self.phase = Phase::Streaming;
		// Lengths past 2^64 bits are outside what SHA-1 and SHA-2 define.
		self.total_len = self.total_len.wrapping_add(data.len() as u64);

		if self.buffer_len + data.len() >= BLOCK_SIZE {
			if self.buffer_len > 0 {
				let (head, rest) = data.split_at(BLOCK_SIZE - self.buffer_len);
				self.buffer[self.buffer_len..].copy_from_slice(head);
				self.chaining.compress(slice::from_ref(&self.buffer));
				self.buffer_len = 0;
				data = rest;
			}

			let (blocks, rest) = data.split_at(data.len() - data.len() % BLOCK_SIZE);
			if !blocks.is_empty() {
				self.chaining.compress(bytemuck::cast_slice(blocks));
			}
			data = rest;
		}

		self.buffer[self.buffer_len..self.buffer_len + data.len()].copy_from_slice(data);
		self.buffer_len += data.len();
		Ok(())
	}

	/// Pad the buffered tail and return the final chaining value.
	///
	/// The running chaining value and buffer are left as they were; only the phase moves to
	/// [`Phase::Finalized`].
	pub fn finalize(&mut self) -> Result<C, HashError> {
		if self.phase == Phase::Finalized {
			return Err(HashError::Finalized);
		}

		let mut tail = [[0u8; BLOCK_SIZE]; 2];
		tail[0][..self.buffer_len].copy_from_slice(&self.buffer[..self.buffer_len]);
		tail[0][self.buffer_len] = 0x80;

		let tail_blocks = if self.buffer_len + 1 > BLOCK_SIZE - LENGTH_SIZE {
			2
		} else {
			1
		};
		let bit_len = self.total_len.wrapping_mul(8);
		tail[tail_blocks - 1][BLOCK_SIZE - LENGTH_SIZE..].copy_from_slice(&bit_len.to_be_bytes());

		let mut chaining = self.chaining.clone();
		chaining.compress(&tail[..tail_blocks]);
		self.phase = Phase::Finalized;
		Ok(chaining)
	}
}
