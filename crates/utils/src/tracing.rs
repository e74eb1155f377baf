// Copyright 2025 Irreducible Inc.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is not set.
const DEFAULT_DIRECTIVES: &str = "warn,shani_hash=info";

/// Install a global `fmt` subscriber filtered by `RUST_LOG`.
///
/// Calling this more than once is harmless; only the first subscriber wins.
pub fn init_tracing() {
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

	let _ = tracing_subscriber::registry()
		.with(filter)
		.with(fmt::layer().with_writer(std::io::stderr))
		.try_init();
}
