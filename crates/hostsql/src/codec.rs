//! Conversion between host objects and statement parameters / result rows.

use core::ffi::c_int;

use crate::host::{Host, HostString};
use crate::statement::{Statement, parameter_index};
use crate::value::{Value, ValueRef};
use crate::{Error, Object, Result};

/// The elements of a parameter collection, which must be a list or a vector.
pub fn parameters(values: &Object) -> Result<&[Object]> {
	values.as_sequence().ok_or_else(|| Error::invalid_argument("VALUES must be a list or a vector"))
}

/// Reset `stmt` and bind each element of `values` to the parameter at the
/// same position. Stops at the first element that cannot be bound.
pub fn bind_objects(host: &dyn Host, stmt: &mut Statement, values: &Object) -> Result<()> {
	let values = parameters(values)?;
	stmt.reset();
	for (offset, value) in values.iter().enumerate() {
		bind_object(host, stmt, parameter_index(offset)?, value)?;
	}
	Ok(())
}

fn bind_object(host: &dyn Host, stmt: &mut Statement, index: c_int, value: &Object) -> Result<()> {
	match value {
		Object::Str(text) if text.is_binary() => {
			if text.contents().len() != text.declared_len() {
				return Err(Error::invalid_argument("BLOB values must be unibyte"));
			}
			stmt.bind_value(index, ValueRef::Blob(text.contents()))
		}
		Object::Str(text) => match text.coding() {
			Some(coding) => {
				let encoded = host.encode_string(text, coding)?;
				stmt.bind_value(index, ValueRef::Text(&encoded))
			}
			None => stmt.bind_value(index, ValueRef::Text(text.contents())),
		},
		Object::Integer(v) => stmt.bind_value(index, ValueRef::Integer(*v)),
		Object::Float(v) => stmt.bind_value(index, ValueRef::Float(*v)),
		Object::T => stmt.bind_value(index, Value::Boolean(true).as_value_ref()),
		Object::False => stmt.bind_value(index, Value::Boolean(false).as_value_ref()),
		other if other.is_nil() => stmt.bind_value(index, ValueRef::Null),
		_ => Err(Error::invalid_argument("invalid argument")),
	}
}

#[must_use]
pub fn value_to_object(value: &Value) -> Object {
	match value {
		Value::Null => Object::Nil,
		Value::Integer(v) => Object::Integer(*v),
		Value::Float(v) => Object::Float(*v),
		Value::Text(v) => Object::Str(HostString::new(v.as_str())),
		Value::Blob(v) => Object::Str(HostString::unibyte(v.as_slice())),
		Value::Boolean(true) => Object::T,
		Value::Boolean(false) => Object::False,
	}
}

#[must_use]
pub fn row_to_object(row: &[Value]) -> Object {
	Object::list(row.iter().map(value_to_object))
}

#[must_use]
pub fn columns_to_object(names: &[String]) -> Object {
	Object::list(names.iter().map(|name| Object::string(name.as_str())))
}
