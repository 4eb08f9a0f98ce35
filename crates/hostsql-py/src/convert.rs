use super::*;

/// A connection or cursor as Python sees it.
#[pyclass(unsendable, module = "hostsql", name = "Handle")]
pub(crate) struct PyHandle {
	handle: Handle,
}

#[pymethods]
impl PyHandle {
	#[getter]
	fn kind(&self) -> &'static str {
		match self.handle.kind() {
			HandleKind::Connection => "database",
			HandleKind::Cursor => "set",
		}
	}

	#[getter]
	fn is_open(&self) -> bool {
		self.handle.is_open()
	}

	fn __repr__(&self) -> String {
		self.handle.to_string()
	}

	fn __eq__(&self, other: &Bound<'_, Self>) -> bool {
		self.handle.ptr_eq(&other.borrow().handle)
	}
}

/// Text tagged with the codec Python should encode it with before binding.
#[pyclass(frozen, module = "hostsql", name = "Coded")]
pub(crate) struct Coded {
	text: String,
	coding: String,
}

#[pymethods]
impl Coded {
	#[new]
	fn new(text: String, coding: String) -> Self {
		Self { text, coding }
	}

	fn __repr__(&self) -> String {
		format!("Coded({:?}, {:?})", self.text, self.coding)
	}
}

pub(crate) fn to_object(value: &Bound<'_, PyAny>) -> PyResult<Object> {
	if value.is_none() {
		return Ok(Object::Nil);
	}
	if let Ok(value) = value.cast::<PyBool>() {
		return Ok(if value.is_true() { Object::T } else { Object::False });
	}
	if let Ok(value) = value.cast::<PyInt>() {
		return Ok(Object::Integer(value.extract::<i64>()?));
	}
	if let Ok(value) = value.cast::<PyFloat>() {
		return Ok(Object::Float(value.value()));
	}
	if let Ok(value) = value.cast::<PyString>() {
		return Ok(Object::string(value.to_str()?));
	}
	if let Ok(value) = value.cast::<PyBytes>() {
		return Ok(Object::Str(HostString::binary(value.as_bytes())));
	}
	if let Ok(value) = value.cast::<PyByteArray>() {
		return Ok(Object::Str(HostString::binary(value.to_vec())));
	}
	if let Ok(value) = value.cast::<Coded>() {
		let coded = value.get();
		return Ok(Object::Str(HostString::new(coded.text.as_str()).with_coding(coded.coding.as_str())));
	}
	if let Ok(value) = value.cast::<PyHandle>() {
		return Ok(Object::Handle(value.borrow().handle.clone()));
	}
	if let Ok(items) = value.cast::<PyList>() {
		return items.iter().map(|item| to_object(&item)).collect::<PyResult<Vec<_>>>().map(Object::List);
	}
	if let Ok(items) = value.cast::<PyTuple>() {
		return items.iter().map(|item| to_object(&item)).collect::<PyResult<Vec<_>>>().map(Object::Vector);
	}

	// Anything else travels as an opaque symbol that the codec refuses to bind.
	Ok(Object::symbol(value.repr()?.to_str()?))
}

pub(crate) fn to_python(py: Python<'_>, value: &Object) -> PyResult<Py<PyAny>> {
	let value = match value {
		Object::Nil => py.None(),
		Object::T => PyBool::new(py, true).to_owned().into_any().unbind(),
		Object::False => PyBool::new(py, false).to_owned().into_any().unbind(),
		Object::Integer(v) => (*v).into_pyobject(py)?.unbind().into_any(),
		Object::Float(v) => (*v).into_pyobject(py)?.unbind().into_any(),
		Object::Str(text) if text.is_multibyte() => PyString::new(py, &text.to_string_lossy()).unbind().into_any(),
		Object::Str(text) => PyBytes::new(py, text.contents()).unbind().into_any(),
		Object::Symbol(name) => PyString::new(py, name).unbind().into_any(),
		Object::List(items) => PyList::new(py, to_python_items(py, items)?)?.unbind().into_any(),
		Object::Vector(items) => PyTuple::new(py, to_python_items(py, items)?)?.unbind().into_any(),
		Object::Handle(handle) => Py::new(py, PyHandle { handle: handle.clone() })?.into_any(),
	};
	Ok(value)
}

fn to_python_items(py: Python<'_>, items: &[Object]) -> PyResult<Vec<Py<PyAny>>> {
	items.iter().map(|item| to_python(py, item)).collect()
}

/// Path expansion and text encoding done by the running interpreter.
pub(crate) struct PyHost;

impl Host for PyHost {
	fn expand_file_name(&self, name: &str) -> hostsql::Result<PathBuf> {
		Python::attach(|py| -> PyResult<PathBuf> {
			let path = PyModule::import(py, "os.path")?;
			let expanded = path.getattr("expanduser")?.call1((name,))?;
			path.getattr("abspath")?.call1((expanded,))?.extract::<PathBuf>()
		})
		.map_err(|err| hostsql::Error::InvalidArgument(err.to_string()))
	}

	fn encode_string(&self, text: &HostString, coding: &str) -> hostsql::Result<Vec<u8>> {
		Python::attach(|py| -> PyResult<Vec<u8>> {
			let text = PyString::new(py, &text.to_string_lossy());
			let encoded = text.call_method1("encode", (coding,))?;
			Ok(encoded.cast::<PyBytes>()?.as_bytes().to_vec())
		})
		.map_err(|err| hostsql::Error::InvalidArgument(err.to_string()))
	}
}
