//! Opaque handles the host holds on to.
//!
//! A [`Handle`] is a reference-counted cell holding either a connection or a
//! cursor. Cloning a handle is what the host does when it copies the value
//! around; when the last clone goes away the resource is dropped and its
//! native object released.

use std::cell::{RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use crate::connection::Connection;
use crate::cursor::Cursor;
use crate::{Error, Object, Result};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HandleKind {
	Connection,
	Cursor,
}

impl HandleKind {
	pub(crate) const fn closed_label(self) -> &'static str {
		match self {
			Self::Connection => "Database",
			Self::Cursor => "Statement",
		}
	}

	pub(crate) const fn object_label(self) -> &'static str {
		match self {
			Self::Connection => "database",
			Self::Cursor => "set",
		}
	}
}

pub(crate) enum Resource {
	Connection(Connection),
	Cursor(Cursor),
}

impl Resource {
	const fn kind(&self) -> HandleKind {
		match self {
			Self::Connection(_) => HandleKind::Connection,
			Self::Cursor(_) => HandleKind::Cursor,
		}
	}

	const fn is_open(&self) -> bool {
		match self {
			Self::Connection(connection) => connection.is_open(),
			Self::Cursor(cursor) => cursor.is_open(),
		}
	}
}

#[derive(Clone)]
pub struct Handle(Rc<RefCell<Resource>>);

impl Handle {
	pub(crate) fn connection(connection: Connection) -> Self {
		Self(Rc::new(RefCell::new(Resource::Connection(connection))))
	}

	pub(crate) fn cursor(cursor: Cursor) -> Self {
		Self(Rc::new(RefCell::new(Resource::Cursor(cursor))))
	}

	#[must_use]
	pub fn kind(&self) -> HandleKind {
		self.0.borrow().kind()
	}

	#[must_use]
	pub fn is_open(&self) -> bool {
		self.0.borrow().is_open()
	}

	#[must_use]
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}
}

impl fmt::Display for Handle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let Ok(resource) = self.0.try_borrow() else {
			return f.write_str("#<sqlite busy>");
		};
		match &*resource {
			Resource::Connection(connection) if connection.is_open() => {
				write!(f, "#<sqlite db={}>", connection.name())
			}
			Resource::Connection(_) => f.write_str("#<sqlite db closed>"),
			Resource::Cursor(cursor) if cursor.is_open() => f.write_str("#<sqlite set>"),
			Resource::Cursor(_) => f.write_str("#<sqlite set closed>"),
		}
	}
}

impl fmt::Debug for Handle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(self, f)
	}
}

/// Whether `value` is a handle of either kind, open or not.
#[must_use]
pub const fn is_handle(value: &Object) -> bool {
	matches!(value, Object::Handle(_))
}

/// Unwrap an open connection handle.
pub fn connection(value: &Object) -> Result<RefMut<'_, Connection>> {
	let resource = borrow(value)?;
	let connection = RefMut::filter_map(resource, |resource| match resource {
		Resource::Connection(connection) => Some(connection),
		Resource::Cursor(_) => None,
	})
	.map_err(|_| Error::WrongKind { expected: HandleKind::Connection })?;

	if connection.is_open() { Ok(connection) } else { Err(Error::Closed(HandleKind::Connection)) }
}

/// Unwrap an open cursor handle.
pub fn cursor(value: &Object) -> Result<RefMut<'_, Cursor>> {
	let resource = borrow(value)?;
	let cursor = RefMut::filter_map(resource, |resource| match resource {
		Resource::Cursor(cursor) => Some(cursor),
		Resource::Connection(_) => None,
	})
	.map_err(|_| Error::WrongKind { expected: HandleKind::Cursor })?;

	if cursor.is_open() { Ok(cursor) } else { Err(Error::Closed(HandleKind::Cursor)) }
}

fn borrow(value: &Object) -> Result<RefMut<'_, Resource>> {
	let handle = value.as_handle().ok_or_else(|| Error::wrong_type("sqlitep", value))?;
	handle.0.try_borrow_mut().map_err(|_| Error::invalid_argument("handle is already in use"))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Config;

	fn memory_connection() -> Handle {
		let connection = Connection::open(":memory:", Config::default(), true).expect("open memory database");
		Handle::connection(connection)
	}

	#[test]
	fn open_connection_validates() {
		let handle = Object::Handle(memory_connection());
		let connection = connection(&handle).expect("validate open connection");
		assert!(connection.is_open());
		assert_eq!(connection.name(), ":memory:");
	}

	#[test]
	fn closed_connection_is_rejected() {
		let handle = Object::Handle(memory_connection());
		assert!(connection(&handle).expect("validate").close());
		assert_eq!(connection(&handle).err(), Some(Error::Closed(HandleKind::Connection)));
		assert!(is_handle(&handle));
	}

	#[test]
	fn non_handles_are_wrong_type() {
		let err = connection(&Object::Integer(42)).expect_err("integer is not a handle");
		assert_eq!(err, Error::WrongType { predicate: "sqlitep", value: "42".to_string() });

		let err = cursor(&Object::string("db")).expect_err("string is not a handle");
		assert!(matches!(err, Error::WrongType { predicate: "sqlitep", .. }));
		assert!(!is_handle(&Object::Nil));
	}

	#[test]
	fn connection_passed_as_cursor_is_wrong_kind() {
		let handle = Object::Handle(memory_connection());
		assert_eq!(cursor(&handle).err(), Some(Error::WrongKind { expected: HandleKind::Cursor }));
	}

	#[test]
	fn clones_share_one_resource() {
		let handle = memory_connection();
		let copy = handle.clone();
		assert!(handle.ptr_eq(&copy));
		assert_eq!(copy.kind(), HandleKind::Connection);

		connection(&Object::Handle(handle)).expect("validate").close();
		assert!(!copy.is_open());
		assert_eq!(copy.to_string(), "#<sqlite db closed>");
	}
}
