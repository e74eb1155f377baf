// Copyright 2025 Irreducible Inc.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use seq_macro::seq;

use crate::{
	sha256::{Sha256Lanes, ROUND_CONSTANTS},
	streaming::Block,
};

/// Compress `blocks` into `lanes` with `sha256msg1`/`sha256msg2`/`sha256rnds2`.
///
/// # Safety
/// The CPU must support `sse2`, `ssse3` and `sha`.
#[target_feature(enable = "sse2,ssse3,sha")]
pub(crate) unsafe fn compress(lanes: &mut Sha256Lanes, blocks: &[Block]) {
	// Byte swap within each 32-bit lane.
	let byte_swap = _mm_set_epi8(12, 13, 14, 15, 8, 9, 10, 11, 4, 5, 6, 7, 0, 1, 2, 3);

	let mut abef_state = _mm_loadu_si128(lanes[0].as_ptr().cast());
	let mut cdgh_state = _mm_loadu_si128(lanes[1].as_ptr().cast());

	for block in blocks {
		let mut schedule = [_mm_setzero_si128(); 16];
		seq!(T in 0..4 {
			schedule[T] = _mm_shuffle_epi8(
				_mm_loadu_si128(block.as_ptr().add(16 * T).cast()),
				byte_swap,
			);
		});
		seq!(T in 4..16 {
			// W[t-7] terms straddle two groups.
			let w_minus_7 = _mm_alignr_epi8::<4>(schedule[T - 1], schedule[T - 2]);
			schedule[T] = _mm_sha256msg2_epu32(
				_mm_add_epi32(_mm_sha256msg1_epu32(schedule[T - 4], schedule[T - 3]), w_minus_7),
				schedule[T - 1],
			);
		});

		let mut abef = abef_state;
		let mut cdgh = cdgh_state;
		seq!(T in 0..16 {
			let wk = _mm_add_epi32(schedule[T], _mm_loadu_si128(ROUND_CONSTANTS[T].as_ptr().cast()));
			cdgh = _mm_sha256rnds2_epu32(cdgh, abef, wk);
			abef = _mm_sha256rnds2_epu32(abef, cdgh, _mm_shuffle_epi32::<0x0e>(wk));
		});

		abef_state = _mm_add_epi32(abef_state, abef);
		cdgh_state = _mm_add_epi32(cdgh_state, cdgh);
	}

	_mm_storeu_si128(lanes[0].as_mut_ptr().cast(), abef_state);
	_mm_storeu_si128(lanes[1].as_mut_ptr().cast(), cdgh_state);
}
