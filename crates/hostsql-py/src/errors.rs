use super::*;

pyo3::create_exception!(hostsql, Error, pyo3::exceptions::PyException);
pyo3::create_exception!(hostsql, LockedError, Error);
pyo3::create_exception!(hostsql, ClosedError, Error);
pyo3::create_exception!(hostsql, InvalidObjectError, Error);
pyo3::create_exception!(hostsql, InvalidArgumentError, Error);

macro_rules! add_exception {
	($module:expr, $py:expr, $name:ident) => {
		$module.add(stringify!($name), $py.get_type::<$name>())?;
	};
}

pub(crate) fn add_module_exceptions(py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
	add_exception!(m, py, Error);
	add_exception!(m, py, LockedError);
	add_exception!(m, py, ClosedError);
	add_exception!(m, py, InvalidObjectError);
	add_exception!(m, py, InvalidArgumentError);
	Ok(())
}

/// Raise a module failure as the matching Python exception. Engine failures
/// carry the native status as `code`.
pub(crate) fn to_py_err(py: Python<'_>, err: &hostsql::Error) -> PyErr {
	let message = err.to_string();
	let py_err = match err {
		hostsql::Error::Locked { .. } => LockedError::new_err(message),
		hostsql::Error::Closed(_) => ClosedError::new_err(message),
		hostsql::Error::WrongKind { .. } => InvalidObjectError::new_err(message),
		hostsql::Error::InvalidArgument(_) => InvalidArgumentError::new_err(message),
		hostsql::Error::WrongType { .. } | hostsql::Error::Arity { .. } => {
			pyo3::exceptions::PyTypeError::new_err(message)
		}
		hostsql::Error::Query { .. } | hostsql::Error::UnknownFunction(_) => Error::new_err(message),
	};

	if let Some(code) = err.code()
		&& let Err(attr_err) = py_err.value(py).setattr("code", code)
	{
		tracing::warn!(code, error = %attr_err, "could not attach the status code to the exception");
	}
	py_err
}
