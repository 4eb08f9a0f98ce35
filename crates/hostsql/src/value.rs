/// A value bound to a statement parameter or decoded from a result column.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Null,
	Integer(i64),
	Float(f64),
	Text(String),
	Blob(Vec<u8>),
	/// Stored natively as the integer 0 or 1; never produced by decoding.
	Boolean(bool),
}

/// Borrowed form of a [`Value`], as handed to the native bind calls.
///
/// Text is kept as raw bytes so that text already encoded by the host into
/// some other coding system reaches the engine untouched.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ValueRef<'a> {
	Null,
	Integer(i64),
	Float(f64),
	Text(&'a [u8]),
	Blob(&'a [u8]),
}

impl Value {
	#[must_use]
	pub fn as_value_ref(&self) -> ValueRef<'_> {
		match self {
			Self::Null => ValueRef::Null,
			Self::Integer(v) => ValueRef::Integer(*v),
			Self::Float(v) => ValueRef::Float(*v),
			Self::Text(v) => ValueRef::Text(v.as_bytes()),
			Self::Blob(v) => ValueRef::Blob(v),
			Self::Boolean(v) => ValueRef::Integer(i64::from(*v)),
		}
	}

	#[must_use]
	pub const fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Self::Integer(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Boolean(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<Vec<u8>> for Value {
	fn from(value: Vec<u8>) -> Self {
		Self::Blob(value)
	}
}

impl<T: Into<Self>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Null, Into::into)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn booleans_bind_as_integers() {
		assert_eq!(Value::Boolean(true).as_value_ref(), ValueRef::Integer(1));
		assert_eq!(Value::Boolean(false).as_value_ref(), ValueRef::Integer(0));
	}

	#[test]
	fn text_refs_expose_utf8_bytes() {
		let value = Value::from("héllo");
		assert_eq!(value.as_value_ref(), ValueRef::Text("héllo".as_bytes()));
	}

	#[test]
	fn options_map_none_to_null() {
		assert!(Value::from(None::<i64>).is_null());
		assert_eq!(Value::from(Some(3_i64)), Value::Integer(3));
	}
}
