// Copyright 2025 Irreducible Inc.

use cfg_if::cfg_if;

use super::Sha256Lanes;
use crate::{streaming::Block, ShaExtensions};


cfg_if! {
	if #[cfg(any(target_arch = "x86", target_arch = "x86_64"))] {
		pub(crate) mod sha_ni;

		#[inline]
		pub(super) fn compress(_extensions: ShaExtensions, lanes: &mut Sha256Lanes, blocks: &[Block]) {
			// SAFETY: a `ShaExtensions` witness exists only after the probe found every feature
			// `sha_ni::compress` is compiled for.
			unsafe { sha_ni::compress(lanes, blocks) }
		}
	} else {
		pub(super) fn compress(
			extensions: ShaExtensions,
			_lanes: &mut Sha256Lanes,
			_blocks: &[Block],
		) {
			extensions.unreachable()
		}
	}
}
