use std::cell::Cell;
use std::ffi::{CStr, CString};
use std::ptr::NonNull;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::statement::Statement;
use crate::{Config, Error, Result, ffi};

/// A native database connection owned by a connection handle.
///
/// The pointer is `None` once the connection has been closed. Cursors
/// prepared on this connection share its `alive` flag, which flips to false
/// on close.
#[derive(Debug)]
pub struct Connection {
	db: Option<NonNull<ffi::Sqlite3>>,
	name: String,
	alive: Rc<Cell<bool>>,
}

impl Connection {
	pub(crate) fn open(name: &str, config: Config, in_memory: bool) -> Result<Self> {
		let name_c =
			CString::new(name).map_err(|_| Error::invalid_argument("database path contains a NUL byte"))?;

		let mut db: *mut ffi::Sqlite3 = std::ptr::null_mut();
		let flags = config.open_flags(in_memory);

		let code = unsafe { ffi::sqlite3_open_v2(name_c.as_ptr(), &raw mut db, flags, std::ptr::null()) };
		if code != ffi::SQLITE_OK {
			let error = Error::from_code(code, db_error_message(db));
			if !db.is_null() {
				let _ = unsafe { ffi::sqlite3_close_v2(db) };
			}
			return Err(error);
		}

		let db = NonNull::new(db).ok_or_else(|| Error::misuse("SQLite returned a null connection handle"))?;

		if config.extended_result_codes {
			let code = unsafe { ffi::sqlite3_extended_result_codes(db.as_ptr(), 1) };
			if code != ffi::SQLITE_OK {
				warn!(name, code, "could not enable extended result codes");
			}
		}

		debug!(name, flags, "opened database");
		Ok(Self { db: Some(db), name: name.to_string(), alive: Rc::new(Cell::new(true)) })
	}

	#[must_use]
	pub const fn is_open(&self) -> bool {
		self.db.is_some()
	}

	/// The name the database was opened under: an absolute path or an
	/// in-memory name.
	#[must_use]
	pub fn name(&self) -> &str {
		&self.name
	}

	pub(crate) fn liveness(&self) -> Rc<Cell<bool>> {
		Rc::clone(&self.alive)
	}

	fn db(&self) -> Result<NonNull<ffi::Sqlite3>> {
		self.db.ok_or(Error::Closed(crate::HandleKind::Connection))
	}

	pub fn prepare(&self, sql: &str) -> Result<Statement> {
		Statement::prepare(self.db()?, sql)
	}

	/// Run `sql` to completion without preparing a statement of our own.
	pub fn exec(&self, sql: &str) -> Result<()> {
		let db = self.db()?;
		let sql_c = CString::new(sql).map_err(|_| Error::invalid_argument("SQL contains a NUL byte"))?;

		let code = unsafe {
			ffi::sqlite3_exec(db.as_ptr(), sql_c.as_ptr(), None, std::ptr::null_mut(), std::ptr::null_mut())
		};
		if code == ffi::SQLITE_OK { Ok(()) } else { Err(Error::from_code(code, db_error_message(db.as_ptr()))) }
	}

	/// Rows changed by the most recently completed statement.
	pub fn changes(&self) -> Result<i64> {
		let db = self.db()?;
		Ok(i64::from(unsafe { ffi::sqlite3_changes(db.as_ptr()) }))
	}

	/// Close the native connection. Statements still open on it keep it
	/// alive natively until they are finalized.
	pub fn close(&mut self) -> bool {
		let Some(db) = self.db.take() else {
			return false;
		};
		self.alive.set(false);

		let code = unsafe { ffi::sqlite3_close_v2(db.as_ptr()) };
		debug!(name = %self.name, code, "closed database");
		code == ffi::SQLITE_OK
	}
}

impl Drop for Connection {
	fn drop(&mut self) {
		if self.db.is_some() && !self.close() {
			warn!(name = %self.name, "database did not close cleanly on drop");
		}
	}
}

pub(crate) fn db_error_message(db: *mut ffi::Sqlite3) -> String {
	if db.is_null() {
		return "SQLite error".to_string();
	}

	let message_ptr = unsafe { ffi::sqlite3_errmsg(db) };
	if message_ptr.is_null() {
		return "SQLite error".to_string();
	}

	unsafe { CStr::from_ptr(message_ptr).to_string_lossy().into_owned() }
}
