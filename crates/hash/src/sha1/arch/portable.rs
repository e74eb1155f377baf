// Copyright 2025 Irreducible Inc.

//! Lane-exact emulation of the SHA-1 extension instructions.
//!
//! Test-only: the accelerated transform is checked against this one, and this one against an
//! independent SHA-1 implementation, so the register choreography is verified on any host.

#![allow(clippy::needless_range_loop)]

use crate::{sha1::Sha1Lanes, streaming::Block};

/// Four 32-bit lanes, element 0 least significant.
pub(crate) type U32x4 = [u32; 4];

const ROUND_CONSTANTS: [u32; 4] = [0x5a827999, 0x6ed9eba1, 0x8f1bbcdc, 0xca62c1d6];

pub(crate) fn sha1msg1(a: U32x4, b: U32x4) -> U32x4 {
	[a[0] ^ b[2], a[1] ^ b[3], a[2] ^ a[0], a[3] ^ a[1]]
}

pub(crate) fn sha1msg2(a: U32x4, b: U32x4) -> U32x4 {
	let w16 = (a[3] ^ b[2]).rotate_left(1);
	let w17 = (a[2] ^ b[1]).rotate_left(1);
	let w18 = (a[1] ^ b[0]).rotate_left(1);
	let w19 = (a[0] ^ w16).rotate_left(1);
	[w19, w18, w17, w16]
}

pub(crate) fn sha1nexte(a: U32x4, b: U32x4) -> U32x4 {
	[b[0], b[1], b[2], b[3].wrapping_add(a[3].rotate_left(30))]
}

pub(crate) fn sha1rnds4(abcd: U32x4, msg: U32x4, func: usize) -> U32x4 {
	let f: fn(u32, u32, u32) -> u32 = match func {
		0 => |b: u32, c: u32, d: u32| (b & c) ^ (!b & d),
		1 | 3 => |b: u32, c: u32, d: u32| b ^ c ^ d,
		2 => |b: u32, c: u32, d: u32| (b & c) ^ (b & d) ^ (c & d),
		_ => unreachable!("sha1rnds4 selects one of four round functions"),
	};
	let k = ROUND_CONSTANTS[func];

	let [mut d, mut c, mut b, mut a] = abcd;
	let mut e = 0u32;
	for w in [msg[3], msg[2], msg[1], msg[0]] {
		let t = f(b, c, d)
			.wrapping_add(a.rotate_left(5))
			.wrapping_add(w)
			.wrapping_add(e)
			.wrapping_add(k);
		e = d;
		d = c;
		c = b.rotate_left(30);
		b = a;
		a = t;
	}
	[d, c, b, a]
}

fn add(a: U32x4, b: U32x4) -> U32x4 {
	[
		a[0].wrapping_add(b[0]),
		a[1].wrapping_add(b[1]),
		a[2].wrapping_add(b[2]),
		a[3].wrapping_add(b[3]),
	]
}

fn xor(a: U32x4, b: U32x4) -> U32x4 {
	[a[0] ^ b[0], a[1] ^ b[1], a[2] ^ b[2], a[3] ^ b[3]]
}

fn load_reversed(bytes: &[u8]) -> U32x4 {
	let word = |i: usize| {
		u32::from_be_bytes([bytes[4 * i], bytes[4 * i + 1], bytes[4 * i + 2], bytes[4 * i + 3]])
	};
	[word(3), word(2), word(1), word(0)]
}

/// Same dataflow as the accelerated transform, one emulated instruction at a time.
pub(crate) fn compress(lanes: &mut Sha1Lanes, blocks: &[Block]) {
	for block in blocks {
		let mut schedule = [[0u32; 4]; 20];
		for t in 0..4 {
			schedule[t] = load_reversed(&block[16 * t..16 * (t + 1)]);
		}
		for t in 4..20 {
			schedule[t] = sha1msg2(
				xor(sha1msg1(schedule[t - 4], schedule[t - 3]), schedule[t - 2]),
				schedule[t - 1],
			);
		}

		let mut abcd = lanes[0];
		let mut prev_abcd = abcd;
		abcd = sha1rnds4(abcd, add(lanes[1], schedule[0]), 0);
		for (t, &w) in schedule.iter().enumerate().skip(1) {
			let e_w = sha1nexte(prev_abcd, w);
			prev_abcd = abcd;
			abcd = sha1rnds4(abcd, e_w, t / 5);
		}

		lanes[0] = add(lanes[0], abcd);
		lanes[1] = sha1nexte(prev_abcd, lanes[1]);
	}
}

#[cfg(test)]
mod tests {
	use digest::generic_array::GenericArray;
	use proptest::prelude::*;

	use super::*;
	use crate::sha1::{pack, unpack};

	fn reference_compress(words: [u32; 5], blocks: &[Block]) -> [u32; 5] {
		let mut state = words;
		let blocks = blocks
			.iter()
			.map(|block| GenericArray::clone_from_slice(block))
			.collect::<Vec<_>>();
		sha1::compress(&mut state, &blocks);
		state
	}

	pub(super) fn arb_blocks(max: usize) -> impl Strategy<Value = Vec<Block>> {
		(0..=max)
			.prop_flat_map(|n| prop::collection::vec(any::<u8>(), n * 64))
			.prop_map(|bytes| {
				bytes
					.chunks_exact(64)
					.map(|chunk| chunk.try_into().expect("chunk is one block"))
					.collect()
			})
	}

	#[test]
	fn test_zero_blocks_is_identity() {
		let mut lanes = pack([1, 2, 3, 4, 5]);
		compress(&mut lanes, &[]);
		assert_eq!(unpack(&lanes), [1, 2, 3, 4, 5]);
	}

	#[test]
	fn test_nexte_only_touches_top_lane() {
		let out = sha1nexte([9, 9, 9, 0x8000_0001], [1, 2, 3, 4]);
		assert_eq!(out, [1, 2, 3, 4u32.wrapping_add(0x8000_0001u32.rotate_left(30))]);
	}

	proptest! {
		#[test]
		fn test_portable_vs_reference(
			words in any::<[u32; 5]>(),
			blocks in arb_blocks(4),
		) {
			let mut lanes = pack(words);
			compress(&mut lanes, &blocks);
			prop_assert_eq!(unpack(&lanes), reference_compress(words, &blocks));
		}
	}

	#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
	mod sha_ni {
		#[cfg(target_arch = "x86")]
		use std::arch::x86::*;
		#[cfg(target_arch = "x86_64")]
		use std::arch::x86_64::*;

		use proptest::prelude::*;

		use super::{super::*, arb_blocks};
		use crate::{sha1::pack, ShaExtensions};

		fn to_m128(lanes: U32x4) -> __m128i {
			unsafe { _mm_loadu_si128(lanes.as_ptr().cast()) }
		}

		fn from_m128(value: __m128i) -> U32x4 {
			let mut lanes = [0u32; 4];
			unsafe { _mm_storeu_si128(lanes.as_mut_ptr().cast(), value) };
			lanes
		}

		#[target_feature(enable = "sse2,sha")]
		unsafe fn rnds4_native(abcd: __m128i, msg: __m128i, func: usize) -> __m128i {
			match func {
				0 => _mm_sha1rnds4_epu32::<0>(abcd, msg),
				1 => _mm_sha1rnds4_epu32::<1>(abcd, msg),
				2 => _mm_sha1rnds4_epu32::<2>(abcd, msg),
				_ => _mm_sha1rnds4_epu32::<3>(abcd, msg),
			}
		}

		proptest! {
			#[test]
			fn test_primitives_match_instructions(
				a in any::<[u32; 4]>(),
				b in any::<[u32; 4]>(),
				func in 0usize..4,
			) {
				if ShaExtensions::detect().is_err() {
					return Ok(());
				}
				unsafe {
					prop_assert_eq!(sha1msg1(a, b), from_m128(_mm_sha1msg1_epu32(to_m128(a), to_m128(b))));
					prop_assert_eq!(sha1msg2(a, b), from_m128(_mm_sha1msg2_epu32(to_m128(a), to_m128(b))));
					prop_assert_eq!(sha1nexte(a, b), from_m128(_mm_sha1nexte_epu32(to_m128(a), to_m128(b))));
					prop_assert_eq!(sha1rnds4(a, b, func), from_m128(rnds4_native(to_m128(a), to_m128(b), func)));
				}
			}

			#[test]
			fn test_sha_ni_vs_portable(
				words in any::<[u32; 5]>(),
				blocks in arb_blocks(4),
			) {
				if ShaExtensions::detect().is_err() {
					return Ok(());
				}
				let mut expected = pack(words);
				compress(&mut expected, &blocks);
				let mut actual = pack(words);
				unsafe { crate::sha1::arch::sha_ni::compress(&mut actual, &blocks) };
				prop_assert_eq!(actual, expected);
			}
		}
	}
}
