// Copyright 2025 Irreducible Inc.

use std::{
	fs::File,
	io::{self, Read},
	path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use shani_hash::{Algorithm, ShaExtensions};
use shani_utils::tracing::init_tracing;

const READ_SIZE: usize = 64 * 1024;

#[derive(Debug, Parser)]
struct Args {
	/// Hash algorithm: sha1, sha224 or sha256.
	#[arg(short, long, default_value = "sha256", value_parser = parse_algorithm)]
	algorithm: Algorithm,
	/// Files to hash. Standard input is read when none are given.
	files: Vec<PathBuf>,
}

fn parse_algorithm(name: &str) -> Result<Algorithm, String> {
	Algorithm::from_name(name).ok_or_else(|| format!("unknown algorithm `{name}`"))
}

fn digest_reader(algorithm: Algorithm, mut reader: impl Read) -> Result<String> {
	let mut hasher = algorithm.instantiate()?;
	let mut buf = vec![0u8; READ_SIZE];
	loop {
		let n = match reader.read(&mut buf) {
			Ok(0) => break,
			Ok(n) => n,
			Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
			Err(err) => return Err(err.into()),
		};
		hasher.update(&buf[..n]);
	}
	let digest = hasher.finalize();
	Ok(digest.iter().map(|byte| format!("{byte:02x}")).collect())
}

fn main() -> Result<()> {
	let args = Args::parse();

	init_tracing();

	ShaExtensions::detect()
		.with_context(|| format!("{} is not available on this CPU", args.algorithm))?;

	if args.files.is_empty() {
		let digest = digest_reader(args.algorithm, io::stdin().lock())?;
		println!("{digest}  -");
		return Ok(());
	}

	for path in &args.files {
		let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
		let digest = digest_reader(args.algorithm, file)
			.with_context(|| format!("failed to hash {}", path.display()))?;
		tracing::debug!(path = %path.display(), algorithm = args.algorithm.id(), "hashed");
		println!("{digest}  {}", path.display());
	}

	Ok(())
}
