// Copyright 2025 Irreducible Inc.

//! The table of algorithms a host can register, with their metadata and identifiers.

use std::fmt;

use digest::DynDigest;
use tracing::trace_span;

use crate::{HashError, Hasher, Sha1, Sha224, Sha256, ShaExtensions, BLOCK_SIZE};

/// A 128-bit identifier, displayed in the canonical `8-4-4-4-12` hex form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Guid(pub u128);

impl fmt::Display for Guid {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let v = self.0;
		write!(
			f,
			"{:08x}-{:04x}-{:04x}-{:04x}-{:012x}",
			v >> 96,
			(v >> 80) & 0xffff,
			(v >> 64) & 0xffff,
			(v >> 48) & 0xffff,
			v & 0xffff_ffff_ffff
		)
	}
}

/// Identifies the provider of every algorithm in this crate.
pub const PROVIDER_GUID: Guid = Guid(0xcf99b91b_0c8f_4f6f_80ca_707010ab3f25);

/// Static description of one algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlgorithmInfo {
	pub name: &'static str,
	pub file_name: &'static str,
	pub block_size: usize,
	pub digest_size: usize,
	pub guid: Guid,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
	Sha1,
	Sha224,
	Sha256,
}

impl Algorithm {
	/// Every algorithm, in registration order.
	pub const ALL: [Self; 3] = [Self::Sha1, Self::Sha224, Self::Sha256];

	pub const fn info(self) -> AlgorithmInfo {
		match self {
			Self::Sha1 => AlgorithmInfo {
				name: "SHA-1 (SHA-NI)",
				file_name: "SHA-1 (SHA-NI)",
				block_size: BLOCK_SIZE,
				digest_size: crate::sha1::SHA1_DIGEST_SIZE,
				guid: Guid(0x7131051a_303e_4505_af39_59bbe36762e5),
			},
			Self::Sha224 => AlgorithmInfo {
				name: "SHA-224 (SHA-NI)",
				file_name: "SHA-224 (SHA-NI)",
				block_size: BLOCK_SIZE,
				digest_size: crate::sha224::SHA224_DIGEST_SIZE,
				guid: Guid(0x87573a04_80b7_4a59_b42a_c056b0a77fc6),
			},
			Self::Sha256 => AlgorithmInfo {
				name: "SHA-256 (SHA-NI)",
				file_name: "SHA-256 (SHA-NI)",
				block_size: BLOCK_SIZE,
				digest_size: crate::sha256::SHA256_DIGEST_SIZE,
				guid: Guid(0x59845325_1bd5_453e_b161_a040ac47bad9),
			},
		}
	}

	/// Short lower-case name, as used on command lines.
	pub const fn id(self) -> &'static str {
		match self {
			Self::Sha1 => "sha1",
			Self::Sha224 => "sha224",
			Self::Sha256 => "sha256",
		}
	}

	/// Look up by display name or by short name; the short name ignores case and dashes.
	pub fn from_name(name: &str) -> Option<Self> {
		let short = name.replace('-', "").to_ascii_lowercase();
		Self::ALL
			.into_iter()
			.find(|algorithm| algorithm.info().name == name || algorithm.id() == short)
	}

	pub fn from_guid(guid: Guid) -> Option<Self> {
		Self::ALL
			.into_iter()
			.find(|algorithm| algorithm.info().guid == guid)
	}

	/// A fresh engine behind the object-safe `digest` interface.
	pub fn instantiate(self) -> Result<Box<dyn DynDigest + Send + Sync>, HashError> {
		let _span = trace_span!("instantiate", algorithm = self.id()).entered();
		Ok(match self {
			Self::Sha1 => Box::new(Sha1::new()?),
			Self::Sha224 => Box::new(Sha224::new()?),
			Self::Sha256 => Box::new(Sha256::new()?),
		})
	}
}

impl fmt::Display for Algorithm {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.info().name)
	}
}

/// The algorithms a host should register: all of them when the extensions are present, none
/// otherwise.
pub fn advertised() -> &'static [Algorithm] {
	if ShaExtensions::detect().is_ok() {
		&Algorithm::ALL
	} else {
		&[]
	}
}
