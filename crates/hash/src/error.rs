// Copyright 2025 Irreducible Inc.

/// Error thrown when a hash engine is used outside its contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HashError {
	/// The CPU lacks an instruction set extension the block transforms are written in.
	#[error("CPU hash extensions are unavailable (missing `{missing}`)")]
	Unsupported { missing: &'static str },
	#[error("CPU hash extensions are disabled by the `{flag}` environment flag")]
	Disabled { flag: &'static str },
	/// The state already produced its digest and has to be reset before it is used again.
	#[error("hash state is finalized; call `reset` before reusing it")]
	Finalized,
}
