use core::ffi::c_int;

use crate::ffi;

/// How connections are opened.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Config {
	/// Ask the engine to serialize access to each connection.
	pub full_mutex: bool,
	/// Interpret `file:` names as URIs.
	pub uri: bool,
	/// Report extended result codes instead of primary ones.
	pub extended_result_codes: bool,
}

impl Default for Config {
	fn default() -> Self {
		Self { full_mutex: true, uri: true, extended_result_codes: true }
	}
}

impl Config {
	#[must_use]
	pub const fn with_full_mutex(mut self, enabled: bool) -> Self {
		self.full_mutex = enabled;
		self
	}

	#[must_use]
	pub const fn with_uri(mut self, enabled: bool) -> Self {
		self.uri = enabled;
		self
	}

	#[must_use]
	pub const fn open_flags(self, in_memory: bool) -> c_int {
		let mut flags = ffi::SQLITE_OPEN_CREATE | ffi::SQLITE_OPEN_READWRITE;
		if self.full_mutex {
			flags |= ffi::SQLITE_OPEN_FULLMUTEX;
		}
		if self.uri {
			flags |= ffi::SQLITE_OPEN_URI;
		}
		if in_memory {
			flags |= ffi::SQLITE_OPEN_MEMORY;
		}
		flags
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_flags_request_create_readwrite_mutex_and_uri() {
		let flags = Config::default().open_flags(false);
		assert_eq!(
			flags,
			ffi::SQLITE_OPEN_CREATE
				| ffi::SQLITE_OPEN_READWRITE
				| ffi::SQLITE_OPEN_FULLMUTEX
				| ffi::SQLITE_OPEN_URI
		);
		assert_eq!(flags & ffi::SQLITE_OPEN_MEMORY, 0);
	}

	#[test]
	fn in_memory_adds_memory_flag() {
		let flags = Config::default().with_full_mutex(false).with_uri(false).open_flags(true);
		assert_eq!(flags, ffi::SQLITE_OPEN_CREATE | ffi::SQLITE_OPEN_READWRITE | ffi::SQLITE_OPEN_MEMORY);
	}
}
