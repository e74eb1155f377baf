// Copyright 2025 Irreducible Inc.

//! Incremental SHA-1, SHA-224 and SHA-256 on the x86 SHA extension instructions.
//!
//! There is no software fallback. Whether the engines are usable is decided once per process by
//! [`ShaExtensions::detect`]; when it fails, constructing any engine fails with the same
//! [`HashError`] and [`advertised`] is empty.

pub mod algorithm;
pub mod caps;
mod error;
mod hasher;
pub mod sha1;
pub mod sha224;
pub mod sha256;
mod streaming;

pub use algorithm::{advertised, Algorithm, AlgorithmInfo, Guid, PROVIDER_GUID};
pub use caps::{is_available, ShaExtensions};
pub use digest;
pub use error::HashError;
pub use hasher::{hash, Hasher};
pub use sha1::{Sha1, Sha1Digest};
pub use sha224::{Sha224, Sha224Digest};
pub use sha256::{Sha256, Sha256Digest};
pub use streaming::{Phase, BLOCK_SIZE};
