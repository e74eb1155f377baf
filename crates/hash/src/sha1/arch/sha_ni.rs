// Copyright 2025 Irreducible Inc.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use seq_macro::seq;

use crate::{sha1::Sha1Lanes, streaming::Block};

/// Compress `blocks` into `lanes` with `sha1msg1`/`sha1msg2`/`sha1nexte`/`sha1rnds4`.
///
/// # Safety
/// The CPU must support `sse2`, `ssse3` and `sha`.
#[target_feature(enable = "sse2,ssse3,sha")]
pub(crate) unsafe fn compress(lanes: &mut Sha1Lanes, blocks: &[Block]) {
	// Reverses all 16 bytes: big-endian words, with the first word in the top lane.
	let byte_reverse = _mm_set_epi8(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15);

	let mut abcd_state = _mm_loadu_si128(lanes[0].as_ptr().cast());
	let mut e_state = _mm_loadu_si128(lanes[1].as_ptr().cast());

	for block in blocks {
		let mut schedule = [_mm_setzero_si128(); 20];
		seq!(T in 0..4 {
			schedule[T] = _mm_shuffle_epi8(
				_mm_loadu_si128(block.as_ptr().add(16 * T).cast()),
				byte_reverse,
			);
		});
		seq!(T in 4..20 {
			schedule[T] = _mm_sha1msg2_epu32(
				_mm_xor_si128(_mm_sha1msg1_epu32(schedule[T - 4], schedule[T - 3]), schedule[T - 2]),
				schedule[T - 1],
			);
		});

		let mut abcd = abcd_state;
		let mut prev_abcd = abcd;
		abcd = _mm_sha1rnds4_epu32::<0>(abcd, _mm_add_epi32(e_state, schedule[0]));
		seq!(T in 1..20 {
			// E of the next four rounds follows from A four rounds back.
			let e_w = _mm_sha1nexte_epu32(prev_abcd, schedule[T]);
			prev_abcd = abcd;
			abcd = _mm_sha1rnds4_epu32::<{ T / 5 }>(abcd, e_w);
		});

		abcd_state = _mm_add_epi32(abcd_state, abcd);
		e_state = _mm_sha1nexte_epu32(prev_abcd, e_state);
	}

	_mm_storeu_si128(lanes[0].as_mut_ptr().cast(), abcd_state);
	_mm_storeu_si128(lanes[1].as_mut_ptr().cast(), e_state);
}
