//! SQLite for a dynamically-typed host runtime.
//!
//! The host hands over [`Object`] values; the module turns them into
//! statement parameters, runs statements, and turns result rows back into
//! objects. Connections and cursors reach the host as opaque [`Handle`]s.

pub mod codec;
mod config;
mod connection;
pub mod cursor;
mod error;
mod exec;
pub mod handle;
mod host;
pub mod module;
mod names;
mod statement;
mod value;

pub use hostsql_ffi::ffi;

pub use config::Config;
pub use connection::Connection;
pub use cursor::Cursor;
pub use error::{Error, Result};
pub use exec::SelectMode;
pub use handle::{Handle, HandleKind};
pub use host::{BINARY_CODING, Host, HostString, Object, StdHost};
pub use module::{EXPORTS, Export, FEATURE, Module};
pub use names::MemoryNames;
pub use statement::{Statement, Step};
pub use value::{Value, ValueRef};

/// Always true once the module is loaded; the host asks before relying on it.
#[must_use]
pub const fn is_available() -> bool {
	true
}

pub fn sqlite_lib_version() -> String {
	hostsql_ffi::sqlite_lib_version()
}

pub fn sqlite_lib_version_number() -> i32 {
	hostsql_ffi::sqlite_lib_version_number()
}

pub fn sqlite_source_id() -> String {
	hostsql_ffi::sqlite_source_id()
}
