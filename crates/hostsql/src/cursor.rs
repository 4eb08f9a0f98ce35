use std::cell::Cell;
use std::rc::Rc;

use tracing::debug;

use crate::codec;
use crate::handle::{self, HandleKind};
use crate::statement::{Statement, Step};
use crate::value::Value;
use crate::{Error, Object, Result};

/// A prepared statement handed to the host for incremental stepping.
#[derive(Debug)]
pub struct Cursor {
	stmt: Option<Statement>,
	connection_alive: Rc<Cell<bool>>,
	eof: bool,
}

impl Cursor {
	pub(crate) const fn new(stmt: Statement, connection_alive: Rc<Cell<bool>>) -> Self {
		Self { stmt: Some(stmt), connection_alive, eof: false }
	}

	#[must_use]
	pub const fn is_open(&self) -> bool {
		self.stmt.is_some()
	}

	#[must_use]
	pub const fn has_more(&self) -> bool {
		!self.eof
	}

	fn statement(&mut self) -> Result<&mut Statement> {
		self.stmt.as_mut().ok_or(Error::Closed(HandleKind::Cursor))
	}

	/// Step once. `None` marks the end of the results; once reached, the
	/// cursor reports no more rows for the rest of its life and the
	/// statement is not stepped again.
	pub fn next_row(&mut self) -> Result<Option<Vec<Value>>> {
		if !self.connection_alive.get() {
			return Err(Error::Closed(HandleKind::Connection));
		}
		if self.eof {
			self.statement()?;
			return Ok(None);
		}

		let stmt = self.statement()?;
		match stmt.step()? {
			Step::Row => Ok(Some(stmt.row_values())),
			Step::Done => {
				self.eof = true;
				Ok(None)
			}
		}
	}

	pub fn column_names(&mut self) -> Result<Vec<String>> {
		Ok(self.statement()?.column_names())
	}

	/// Finalize the statement. Later operations fail as closed.
	pub fn finalize(&mut self) -> bool {
		match self.stmt.take() {
			Some(stmt) => {
				stmt.finalize();
				debug!("finalized cursor");
				true
			}
			None => false,
		}
	}
}

/// The next row of `cursor` as a list, or `Nil` at the end.
pub fn next(cursor: &Object) -> Result<Object> {
	let row = handle::cursor(cursor)?.next_row()?;
	Ok(row.map_or(Object::Nil, |row| codec::row_to_object(&row)))
}

/// Column names of `cursor` as a list of strings.
pub fn columns(cursor: &Object) -> Result<Object> {
	let names = handle::cursor(cursor)?.column_names()?;
	Ok(codec::columns_to_object(&names))
}

pub fn has_more(cursor: &Object) -> Result<bool> {
	Ok(handle::cursor(cursor)?.has_more())
}

pub fn finalize(cursor: &Object) -> Result<bool> {
	Ok(handle::cursor(cursor)?.finalize())
}
