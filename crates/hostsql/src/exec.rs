use tracing::debug;

use crate::codec;
use crate::connection::Connection;
use crate::cursor::Cursor;
use crate::handle::{self, Handle};
use crate::{Error, Module, Object, Result};

/// What `select` hands back.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum SelectMode {
	/// A list of rows.
	#[default]
	Rows,
	/// The column names followed by the rows.
	Full,
	/// A cursor handle to step through with `next`.
	Set,
}

impl SelectMode {
	/// `full` and `set`, as symbols or strings, pick those modes; anything
	/// else returns rows.
	#[must_use]
	pub fn from_object(value: Option<&Object>) -> Self {
		let name = match value {
			Some(Object::Symbol(name)) => name.as_bytes(),
			Some(Object::Str(text)) => text.contents(),
			_ => return Self::Rows,
		};
		match name {
			b"full" => Self::Full,
			b"set" => Self::Set,
			_ => Self::Rows,
		}
	}
}

impl Module {
	/// Open a database. Without a file (or with `Nil`) a fresh anonymous
	/// in-memory database is opened. Returns `Nil` if the engine refuses.
	pub fn open(&self, file: Option<&Object>) -> Result<Object> {
		let (name, in_memory) = match file {
			None | Some(Object::Nil) => (self.memory_names().next_name(), true),
			Some(Object::Str(path)) => {
				let path = self.host().expand_file_name(&path.to_string_lossy())?;
				(path.to_string_lossy().into_owned(), false)
			}
			Some(other) => return Err(Error::wrong_type("stringp", other)),
		};

		match Connection::open(&name, self.config(), in_memory) {
			Ok(connection) => Ok(Object::Handle(Handle::connection(connection))),
			Err(err) => {
				debug!(name = %name, error = %err, "could not open database");
				Ok(Object::Nil)
			}
		}
	}

	/// Close a connection handle. Cursors on it can no longer step.
	pub fn close(&self, db: &Object) -> Result<bool> {
		Ok(handle::connection(db)?.close())
	}

	/// Run the first statement in `sql` and return the number of rows it
	/// changed. Statements after the first are not run.
	pub fn execute(&self, db: &Object, sql: &Object, values: Option<&Object>) -> Result<i64> {
		let connection = handle::connection(db)?;
		let sql = sql.as_host_string()?.to_string_lossy();
		let values = values.filter(|values| !values.is_nil());
		if let Some(values) = values {
			codec::parameters(values)?;
		}

		let mut stmt = connection.prepare(&sql)?;
		if let Some(values) = values {
			codec::bind_objects(self.host(), &mut stmt, values)?;
		}

		// A single step; a statement that yields rows still counts as run.
		stmt.step()?;
		stmt.finalize();

		connection.changes()
	}

	/// Run a query. See [`SelectMode`] for the shapes of the result.
	pub fn select(&self, db: &Object, sql: &Object, values: Option<&Object>, mode: SelectMode) -> Result<Object> {
		let connection = handle::connection(db)?;
		let sql = sql.as_host_string()?.to_string_lossy();
		let values = values.filter(|values| !values.is_nil());
		if let Some(values) = values {
			codec::parameters(values)?;
		}

		let mut stmt = connection.prepare(&sql)?;
		if let Some(values) = values {
			codec::bind_objects(self.host(), &mut stmt, values)?;
		}

		if mode == SelectMode::Set {
			let cursor = Cursor::new(stmt, connection.liveness());
			debug!(name = connection.name(), "opened cursor");
			return Ok(Object::Handle(Handle::cursor(cursor)));
		}

		let rows = stmt.rows()?;
		let header = (mode == SelectMode::Full).then(|| codec::columns_to_object(&stmt.column_names()));
		Ok(Object::list(header.into_iter().chain(rows.iter().map(|row| codec::row_to_object(row)))))
	}

	pub fn transaction(&self, db: &Object) -> Result<bool> {
		Ok(handle::connection(db)?.exec("begin").is_ok())
	}

	pub fn commit(&self, db: &Object) -> Result<bool> {
		Ok(handle::connection(db)?.exec("commit").is_ok())
	}

	pub fn rollback(&self, db: &Object) -> Result<bool> {
		Ok(handle::connection(db)?.exec("rollback").is_ok())
	}

	/// Run `PRAGMA <pragma>`, discarding any rows it produces.
	pub fn pragma(&self, db: &Object, pragma: &Object) -> Result<bool> {
		let connection = handle::connection(db)?;
		let pragma = pragma.as_host_string()?.to_string_lossy();
		Ok(connection.exec(&format!("PRAGMA {pragma}")).is_ok())
	}
}
