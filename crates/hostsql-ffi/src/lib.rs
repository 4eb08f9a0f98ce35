use std::ffi::CStr;

#[cfg(feature = "bundled-sqlite")]
use libsqlite3_sys as _;

pub mod ffi;

pub fn sqlite_lib_version_number() -> i32 {
	unsafe { ffi::sqlite3_libversion_number() }
}

pub fn sqlite_lib_version() -> String {
	unsafe { CStr::from_ptr(ffi::sqlite3_libversion()).to_string_lossy().into_owned() }
}

pub fn sqlite_source_id() -> String {
	unsafe { CStr::from_ptr(ffi::sqlite3_sourceid()).to_string_lossy().into_owned() }
}
