// Copyright 2025 Irreducible Inc.

const TRUTHY: [&str; 7] = ["1", "on", "ON", "true", "TRUE", "yes", "YES"];

/// Interpret the value of a boolean flag.
///
/// Only the spellings in `TRUTHY` switch a flag on; everything else, including an empty string,
/// reads as off.
pub fn parse_boolean_flag(value: &str) -> bool {
	TRUTHY.contains(&value.trim())
}

/// Read boolean flag from the environment variable.
///
/// Unset and non-unicode variables are treated as off.
pub fn boolean_env_flag_set(flag: &str) -> bool {
	match std::env::var(flag) {
		Ok(val) => parse_boolean_flag(&val),
		Err(_) => false,
	}
}
