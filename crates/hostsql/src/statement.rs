use core::ffi::c_int;
use std::ffi::{CStr, CString};
use std::ptr::NonNull;

use tracing::{trace, warn};

use crate::connection::db_error_message;
use crate::value::{Value, ValueRef};
use crate::{Error, Result, ffi};

/// Outcome of one successful step.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Step {
	Row,
	Done,
}

/// An owned prepared statement.
///
/// Keeps a non-owning pointer to the connection it was prepared on, used
/// only to fetch the engine's error text. Finalized exactly once, either
/// through [`Statement::finalize`] or on drop.
#[derive(Debug)]
pub struct Statement {
	stmt: NonNull<ffi::Sqlite3Stmt>,
	db: *mut ffi::Sqlite3,
}

impl Statement {
	/// Prepare the first statement in `sql`. Anything after it is ignored.
	pub(crate) fn prepare(db: NonNull<ffi::Sqlite3>, sql: &str) -> Result<Self> {
		let sql_c = CString::new(sql).map_err(|_| Error::invalid_argument("SQL contains a NUL byte"))?;

		let mut stmt: *mut ffi::Sqlite3Stmt = std::ptr::null_mut();
		let code = unsafe {
			ffi::sqlite3_prepare_v2(db.as_ptr(), sql_c.as_ptr(), -1, &raw mut stmt, std::ptr::null_mut())
		};
		if code != ffi::SQLITE_OK {
			let error = Error::from_code(code, db_error_message(db.as_ptr()));
			if !stmt.is_null() {
				let _ = unsafe { ffi::sqlite3_finalize(stmt) };
			}
			return Err(error);
		}

		let stmt = NonNull::new(stmt).ok_or_else(|| Error::misuse("SQL did not produce a statement"))?;
		trace!(sql, "prepared statement");

		Ok(Self { stmt, db: db.as_ptr() })
	}

	pub fn bind_value(&mut self, index: c_int, value: ValueRef<'_>) -> Result<()> {
		match value {
			ValueRef::Null => self.bind_null(index),
			ValueRef::Integer(v) => self.bind_i64(index, v),
			ValueRef::Float(v) => self.bind_f64(index, v),
			ValueRef::Text(v) => self.bind_text(index, v),
			ValueRef::Blob(v) => self.bind_blob(index, v),
		}
	}

	pub fn bind_null(&mut self, index: c_int) -> Result<()> {
		let code = unsafe { ffi::sqlite3_bind_null(self.stmt.as_ptr(), index) };
		self.check(code)
	}

	pub fn bind_i64(&mut self, index: c_int, value: i64) -> Result<()> {
		let code = unsafe { ffi::sqlite3_bind_int64(self.stmt.as_ptr(), index, value) };
		self.check(code)
	}

	pub fn bind_f64(&mut self, index: c_int, value: f64) -> Result<()> {
		let code = unsafe { ffi::sqlite3_bind_double(self.stmt.as_ptr(), index, value) };
		self.check(code)
	}

	/// Bind text bytes as-is; the engine copies them.
	pub fn bind_text(&mut self, index: c_int, value: &[u8]) -> Result<()> {
		let len = u64::try_from(value.len()).map_err(|_| Error::invalid_argument("text parameter is too large"))?;

		let code = unsafe {
			ffi::sqlite3_bind_text64(
				self.stmt.as_ptr(),
				index,
				value.as_ptr().cast(),
				len,
				Some(sqlite_transient()),
				ffi::SQLITE_UTF8,
			)
		};
		self.check(code)
	}

	pub fn bind_blob(&mut self, index: c_int, value: &[u8]) -> Result<()> {
		let len = u64::try_from(value.len()).map_err(|_| Error::invalid_argument("blob parameter is too large"))?;

		let code = unsafe {
			ffi::sqlite3_bind_blob64(
				self.stmt.as_ptr(),
				index,
				value.as_ptr().cast(),
				len,
				Some(sqlite_transient()),
			)
		};
		self.check(code)
	}

	pub fn step(&mut self) -> Result<Step> {
		let code = unsafe { ffi::sqlite3_step(self.stmt.as_ptr()) };
		trace!(code, "stepped statement");
		match code {
			ffi::SQLITE_ROW => Ok(Step::Row),
			ffi::SQLITE_DONE | ffi::SQLITE_OK => Ok(Step::Done),
			_ => Err(Error::from_code(code, db_error_message(self.db))),
		}
	}

	/// Rewind the statement so it can be rebound and stepped again. A failed
	/// previous step was already returned by [`Statement::step`]; reset only
	/// logs it.
	pub fn reset(&mut self) {
		let code = unsafe { ffi::sqlite3_reset(self.stmt.as_ptr()) };
		if code != ffi::SQLITE_OK {
			warn!(code, "statement reset reported the previous step's failure");
		}
	}

	#[must_use]
	pub fn column_count(&self) -> usize {
		let n = unsafe { ffi::sqlite3_column_count(self.stmt.as_ptr()) };
		usize::try_from(n).unwrap_or_default()
	}

	#[must_use]
	pub fn column_name(&self, index: c_int) -> Option<String> {
		let ptr = unsafe { ffi::sqlite3_column_name(self.stmt.as_ptr(), index) };
		if ptr.is_null() {
			None
		} else {
			Some(unsafe { CStr::from_ptr(ptr).to_string_lossy().into_owned() })
		}
	}

	#[must_use]
	pub fn column_names(&self) -> Vec<String> {
		column_indexes(self.column_count())
			.map(|index| self.column_name(index).unwrap_or_default())
			.collect()
	}

	#[must_use]
	pub fn row_values(&self) -> Vec<Value> {
		column_indexes(self.column_count()).map(|index| self.column_value(index)).collect()
	}

	#[must_use]
	pub fn column_value(&self, index: c_int) -> Value {
		match unsafe { ffi::sqlite3_column_type(self.stmt.as_ptr(), index) } {
			ffi::SQLITE_INTEGER => {
				Value::Integer(unsafe { ffi::sqlite3_column_int64(self.stmt.as_ptr(), index) })
			}
			ffi::SQLITE_FLOAT => Value::Float(unsafe { ffi::sqlite3_column_double(self.stmt.as_ptr(), index) }),
			ffi::SQLITE_TEXT => {
				let bytes = unsafe { ffi::sqlite3_column_bytes(self.stmt.as_ptr(), index) };
				let ptr = unsafe { ffi::sqlite3_column_text(self.stmt.as_ptr(), index) };
				if ptr.is_null() || bytes <= 0 {
					Value::Text(String::new())
				} else {
					let slice =
						unsafe { std::slice::from_raw_parts(ptr, usize::try_from(bytes).unwrap_or_default()) };
					Value::Text(String::from_utf8_lossy(slice).into_owned())
				}
			}
			ffi::SQLITE_BLOB => {
				let bytes = unsafe { ffi::sqlite3_column_bytes(self.stmt.as_ptr(), index) };
				let ptr = unsafe { ffi::sqlite3_column_blob(self.stmt.as_ptr(), index) };
				if ptr.is_null() || bytes <= 0 {
					Value::Blob(Vec::new())
				} else {
					let slice = unsafe {
						std::slice::from_raw_parts(ptr.cast::<u8>(), usize::try_from(bytes).unwrap_or_default())
					};
					Value::Blob(slice.to_vec())
				}
			}
			_ => Value::Null,
		}
	}

	/// Step to completion, collecting every row.
	pub fn rows(&mut self) -> Result<Vec<Vec<Value>>> {
		let mut rows = Vec::new();
		while self.step()? == Step::Row {
			rows.push(self.row_values());
		}
		Ok(rows)
	}

	/// Release the native statement now rather than at drop.
	pub fn finalize(self) {
		drop(self);
	}

	fn check(&self, code: c_int) -> Result<()> {
		if code == ffi::SQLITE_OK { Ok(()) } else { Err(Error::from_code(code, db_error_message(self.db))) }
	}
}

impl Drop for Statement {
	fn drop(&mut self) {
		let code = unsafe { ffi::sqlite3_finalize(self.stmt.as_ptr()) };
		trace!(code, "finalized statement");
		if code & 0xff == ffi::SQLITE_MISUSE {
			warn!(code, "statement finalize reported misuse");
		}
	}
}

pub(crate) fn parameter_index(offset: usize) -> Result<c_int> {
	c_int::try_from(offset + 1).map_err(|_| Error::invalid_argument("binding index did not fit in c_int"))
}

fn column_indexes(count: usize) -> impl Iterator<Item = c_int> {
	(0..count).map_while(|i| c_int::try_from(i).ok())
}

fn sqlite_transient() -> unsafe extern "C" fn(*mut std::ffi::c_void) {
	unsafe { std::mem::transmute::<isize, unsafe extern "C" fn(*mut std::ffi::c_void)>(-1_isize) }
}
