use core::ffi::c_int;

use thiserror::Error;

use crate::ffi;
use crate::handle::HandleKind;

/// Every failure the boundary can surface to the host.
///
/// Validation failures (`Closed`, `WrongKind`, `WrongType`,
/// `InvalidArgument`) are produced before any native call is made. Native
/// statuses are classified by [`Error::from_code`] so that lock contention
/// can be told apart from every other engine failure.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum Error {
	#[error("{} closed", .0.closed_label())]
	Closed(HandleKind),

	#[error("Invalid {} object", .expected.object_label())]
	WrongKind { expected: HandleKind },

	#[error("Wrong type argument: {predicate}, {value}")]
	WrongType { predicate: &'static str, value: String },

	#[error("{0}")]
	InvalidArgument(String),

	#[error("{message}")]
	Locked { code: c_int, message: String },

	#[error("{message}")]
	Query { code: c_int, message: String },

	#[error("Wrong number of arguments: {name}, {got}")]
	Arity { name: &'static str, got: usize },

	#[error("Symbol's function definition is void: {0}")]
	UnknownFunction(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
	/// Classify a native status. Extended codes are reduced to their primary
	/// code first, so `SQLITE_BUSY_SNAPSHOT` still counts as busy.
	pub fn from_code(code: c_int, message: impl Into<String>) -> Self {
		match code & 0xff {
			ffi::SQLITE_BUSY | ffi::SQLITE_LOCKED => Self::Locked { code, message: message.into() },
			_ => Self::Query { code, message: message.into() },
		}
	}

	pub(crate) fn wrong_type(predicate: &'static str, value: &crate::Object) -> Self {
		Self::WrongType { predicate, value: value.to_string() }
	}

	pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
		Self::InvalidArgument(message.into())
	}

	pub(crate) fn misuse(message: impl Into<String>) -> Self {
		Self::Query { code: ffi::SQLITE_MISUSE, message: message.into() }
	}

	#[must_use]
	pub const fn is_locked(&self) -> bool {
		matches!(self, Self::Locked { .. })
	}

	/// Native status code, when the failure came from the engine.
	#[must_use]
	pub const fn code(&self) -> Option<c_int> {
		match self {
			Self::Locked { code, .. } | Self::Query { code, .. } => Some(*code),
			_ => None,
		}
	}

	/// Name of the host condition this failure is raised as.
	#[must_use]
	pub const fn signal(&self) -> &'static str {
		match self {
			Self::Locked { .. } => "sqlite-locked-error",
			Self::WrongType { .. } => "wrong-type-argument",
			Self::Arity { .. } => "wrong-number-of-arguments",
			Self::UnknownFunction(_) => "void-function",
			Self::Closed(_) | Self::WrongKind { .. } | Self::InvalidArgument(_) | Self::Query { .. } => {
				"error"
			}
		}
	}
}
