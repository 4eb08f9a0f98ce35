//! The host runtime's side of the boundary: its dynamic values and the
//! services (path expansion, text encoding) it lends to the module.

use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;

use encoding_rs::Encoding;

use crate::handle::Handle;
use crate::{Error, Result};

/// Coding-system tag that marks a string as raw bytes.
pub const BINARY_CODING: &str = "binary";

/// A host string: raw bytes, a multibyte flag, and an optional coding tag.
///
/// Multibyte strings hold UTF-8 text. Unibyte strings hold arbitrary bytes,
/// one character per byte.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HostString {
	bytes: Vec<u8>,
	multibyte: bool,
	coding: Option<String>,
}

impl HostString {
	pub fn new(text: impl Into<String>) -> Self {
		Self { bytes: text.into().into_bytes(), multibyte: true, coding: None }
	}

	pub fn unibyte(bytes: impl Into<Vec<u8>>) -> Self {
		Self { bytes: bytes.into(), multibyte: false, coding: None }
	}

	/// A unibyte string tagged to bind as a blob.
	pub fn binary(bytes: impl Into<Vec<u8>>) -> Self {
		Self::unibyte(bytes).with_coding(BINARY_CODING)
	}

	#[must_use]
	pub fn with_coding(mut self, coding: impl Into<String>) -> Self {
		self.coding = Some(coding.into());
		self
	}

	#[must_use]
	pub fn coding(&self) -> Option<&str> {
		self.coding.as_deref()
	}

	#[must_use]
	pub fn is_binary(&self) -> bool {
		self.coding() == Some(BINARY_CODING)
	}

	#[must_use]
	pub const fn is_multibyte(&self) -> bool {
		self.multibyte
	}

	/// The bytes the host hands over when native code copies the string.
	#[must_use]
	pub fn contents(&self) -> &[u8] {
		&self.bytes
	}

	/// Length in characters, as the host reports it.
	#[must_use]
	pub fn declared_len(&self) -> usize {
		if self.multibyte { String::from_utf8_lossy(&self.bytes).chars().count() } else { self.bytes.len() }
	}

	#[must_use]
	pub fn to_string_lossy(&self) -> Cow<'_, str> {
		String::from_utf8_lossy(&self.bytes)
	}
}

impl From<&str> for HostString {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}

impl From<String> for HostString {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}

/// A dynamic host value.
///
/// `Nil` doubles as the empty list, the absent value and the cursor
/// end marker, the way list-based hosts treat it.
#[derive(Clone)]
pub enum Object {
	Nil,
	T,
	False,
	Integer(i64),
	Float(f64),
	Str(HostString),
	Symbol(String),
	List(Vec<Self>),
	Vector(Vec<Self>),
	Handle(Handle),
}

impl Object {
	pub fn string(text: impl Into<String>) -> Self {
		Self::Str(HostString::new(text))
	}

	pub fn symbol(name: impl Into<String>) -> Self {
		Self::Symbol(name.into())
	}

	pub fn list(items: impl IntoIterator<Item = Self>) -> Self {
		Self::List(items.into_iter().collect())
	}

	pub fn vector(items: impl IntoIterator<Item = Self>) -> Self {
		Self::Vector(items.into_iter().collect())
	}

	#[must_use]
	pub const fn from_bool(value: bool) -> Self {
		if value { Self::T } else { Self::Nil }
	}

	#[must_use]
	pub fn is_nil(&self) -> bool {
		match self {
			Self::Nil => true,
			Self::List(items) => items.is_empty(),
			_ => false,
		}
	}

	#[must_use]
	pub fn is_symbol(&self, name: &str) -> bool {
		matches!(self, Self::Symbol(symbol) if symbol == name)
	}

	/// Elements of a list or vector; `Nil` is the empty list.
	#[must_use]
	pub fn as_sequence(&self) -> Option<&[Self]> {
		match self {
			Self::Nil => Some(&[]),
			Self::List(items) | Self::Vector(items) => Some(items),
			_ => None,
		}
	}

	pub fn as_host_string(&self) -> Result<&HostString> {
		match self {
			Self::Str(text) => Ok(text),
			other => Err(Error::wrong_type("stringp", other)),
		}
	}

	#[must_use]
	pub const fn as_handle(&self) -> Option<&Handle> {
		match self {
			Self::Handle(handle) => Some(handle),
			_ => None,
		}
	}
}

impl PartialEq for Object {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::T, Self::T) | (Self::False, Self::False) => true,
			(Self::Integer(a), Self::Integer(b)) => a == b,
			(Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
			(Self::Str(a), Self::Str(b)) => a.contents() == b.contents(),
			(Self::Symbol(a), Self::Symbol(b)) => a == b,
			(Self::Vector(a), Self::Vector(b)) => a == b,
			(Self::Handle(a), Self::Handle(b)) => a.ptr_eq(b),
			(a, b) if a.is_nil() && b.is_nil() => true,
			(Self::List(a), Self::List(b)) => a == b,
			_ => false,
		}
	}
}

impl fmt::Debug for Object {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(self, f)
	}
}

impl fmt::Display for Object {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Nil => f.write_str("nil"),
			Self::T => f.write_str("t"),
			Self::False => f.write_str(":false"),
			Self::Integer(v) => write!(f, "{v}"),
			Self::Float(v) => write!(f, "{v:?}"),
			Self::Str(text) => write!(f, "{:?}", text.to_string_lossy()),
			Self::Symbol(name) => f.write_str(name),
			Self::List(items) => write_items(f, "(", items, ")"),
			Self::Vector(items) => write_items(f, "[", items, "]"),
			Self::Handle(handle) => write!(f, "{handle}"),
		}
	}
}

fn write_items(f: &mut fmt::Formatter<'_>, open: &str, items: &[Object], close: &str) -> fmt::Result {
	f.write_str(open)?;
	for (i, item) in items.iter().enumerate() {
		if i > 0 {
			f.write_str(" ")?;
		}
		write!(f, "{item}")?;
	}
	f.write_str(close)
}

impl From<i64> for Object {
	fn from(value: i64) -> Self {
		Self::Integer(value)
	}
}

impl From<f64> for Object {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl From<&str> for Object {
	fn from(value: &str) -> Self {
		Self::string(value)
	}
}

impl From<HostString> for Object {
	fn from(value: HostString) -> Self {
		Self::Str(value)
	}
}

impl From<Handle> for Object {
	fn from(value: Handle) -> Self {
		Self::Handle(value)
	}
}

/// Services the host runtime provides to the module.
pub trait Host {
	/// Resolve a user-supplied file name to an absolute path.
	fn expand_file_name(&self, name: &str) -> Result<PathBuf>;

	/// Encode `text` with the named coding system.
	fn encode_string(&self, text: &HostString, coding: &str) -> Result<Vec<u8>>;
}

/// Host services for hosts that have no path or coding machinery of their
/// own.
///
/// Expands a leading `~` to the home directory and encodes with any WHATWG
/// encoding label, plus the host's own names for UTF-8 and Latin-1. A
/// trailing `-unix`/`-dos`/`-mac` end-of-line suffix is ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdHost;

impl Host for StdHost {
	fn expand_file_name(&self, name: &str) -> Result<PathBuf> {
		let expanded = match name.strip_prefix('~') {
			Some(rest) if rest.is_empty() || rest.starts_with('/') => {
				let home = dirs::home_dir().ok_or_else(|| Error::invalid_argument("home directory not found"))?;
				home.join(rest.trim_start_matches('/'))
			}
			_ => PathBuf::from(name),
		};

		std::path::absolute(&expanded)
			.map_err(|err| Error::invalid_argument(format!("cannot expand {name}: {err}")))
	}

	fn encode_string(&self, text: &HostString, coding: &str) -> Result<Vec<u8>> {
		let encoding = coding_encoding(coding)
			.ok_or_else(|| Error::invalid_argument(format!("Invalid coding system: {coding}")))?;
		let decoded = text.to_string_lossy();

		// encoding_rs only decodes UTF-16; its encoder writes UTF-8 instead.
		if encoding == encoding_rs::UTF_16LE {
			return Ok(decoded.encode_utf16().flat_map(u16::to_le_bytes).collect());
		}
		if encoding == encoding_rs::UTF_16BE {
			return Ok(decoded.encode_utf16().flat_map(u16::to_be_bytes).collect());
		}

		let (bytes, _, unmappable) = encoding.encode(&decoded);
		if unmappable {
			return Err(Error::invalid_argument(format!("cannot encode string as {coding}")));
		}
		Ok(bytes.into_owned())
	}
}

fn coding_encoding(coding: &str) -> Option<&'static Encoding> {
	let base = coding.trim_end_matches("-unix").trim_end_matches("-dos").trim_end_matches("-mac");
	let label = match base {
		"utf-8-emacs" | "prefer-utf-8" | "undecided" => "utf-8",
		"latin-1" | "iso-latin-1" => "iso-8859-1",
		"utf-16le" | "utf-16-le" => "utf-16le",
		"utf-16be" | "utf-16-be" => "utf-16be",
		other => other,
	};
	Encoding::for_label(label.as_bytes())
}
