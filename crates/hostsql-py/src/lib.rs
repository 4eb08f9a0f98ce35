use std::path::PathBuf;

use hostsql::{Handle, HandleKind, Host, HostString, Module, Object, SelectMode, cursor};
use pyo3::prelude::*;
use pyo3::types::{PyAny, PyBool, PyByteArray, PyBytes, PyFloat, PyInt, PyList, PyString, PyTuple};

mod convert;
mod errors;

pub(crate) use convert::*;
pub(crate) use errors::*;

thread_local! {
	static MODULE: Module = Module::new(PyHost);
}

fn with_module<T>(f: impl FnOnce(&Module) -> T) -> T {
	MODULE.with(f)
}

fn optional_object(value: Option<&Bound<'_, PyAny>>) -> PyResult<Option<Object>> {
	value.map(to_object).transpose()
}

#[pyfunction]
#[pyo3(signature = (file = None))]
fn open(py: Python<'_>, file: Option<&Bound<'_, PyAny>>) -> PyResult<Py<PyAny>> {
	let file = optional_object(file)?;
	let db = with_module(|module| module.open(file.as_ref())).map_err(|err| to_py_err(py, &err))?;
	to_python(py, &db)
}

#[pyfunction]
fn close(py: Python<'_>, db: &Bound<'_, PyAny>) -> PyResult<bool> {
	let db = to_object(db)?;
	with_module(|module| module.close(&db)).map_err(|err| to_py_err(py, &err))
}

#[pyfunction]
#[pyo3(signature = (db, sql, values = None))]
fn execute(
	py: Python<'_>,
	db: &Bound<'_, PyAny>,
	sql: &Bound<'_, PyAny>,
	values: Option<&Bound<'_, PyAny>>,
) -> PyResult<i64> {
	let (db, sql, values) = (to_object(db)?, to_object(sql)?, optional_object(values)?);
	with_module(|module| module.execute(&db, &sql, values.as_ref())).map_err(|err| to_py_err(py, &err))
}

#[pyfunction]
#[pyo3(signature = (db, sql, values = None, mode = None))]
fn select(
	py: Python<'_>,
	db: &Bound<'_, PyAny>,
	sql: &Bound<'_, PyAny>,
	values: Option<&Bound<'_, PyAny>>,
	mode: Option<&Bound<'_, PyAny>>,
) -> PyResult<Py<PyAny>> {
	let (db, sql, values) = (to_object(db)?, to_object(sql)?, optional_object(values)?);
	let mode = SelectMode::from_object(optional_object(mode)?.as_ref());
	let rows = with_module(|module| module.select(&db, &sql, values.as_ref(), mode))
		.map_err(|err| to_py_err(py, &err))?;
	to_python(py, &rows)
}

#[pyfunction]
fn transaction(py: Python<'_>, db: &Bound<'_, PyAny>) -> PyResult<bool> {
	let db = to_object(db)?;
	with_module(|module| module.transaction(&db)).map_err(|err| to_py_err(py, &err))
}

#[pyfunction]
fn commit(py: Python<'_>, db: &Bound<'_, PyAny>) -> PyResult<bool> {
	let db = to_object(db)?;
	with_module(|module| module.commit(&db)).map_err(|err| to_py_err(py, &err))
}

#[pyfunction]
fn rollback(py: Python<'_>, db: &Bound<'_, PyAny>) -> PyResult<bool> {
	let db = to_object(db)?;
	with_module(|module| module.rollback(&db)).map_err(|err| to_py_err(py, &err))
}

#[pyfunction]
fn pragma(py: Python<'_>, db: &Bound<'_, PyAny>, pragma: &Bound<'_, PyAny>) -> PyResult<bool> {
	let (db, pragma) = (to_object(db)?, to_object(pragma)?);
	with_module(|module| module.pragma(&db, &pragma)).map_err(|err| to_py_err(py, &err))
}

#[pyfunction]
fn next(py: Python<'_>, set: &Bound<'_, PyAny>) -> PyResult<Py<PyAny>> {
	let row = cursor::next(&to_object(set)?).map_err(|err| to_py_err(py, &err))?;
	to_python(py, &row)
}

#[pyfunction]
fn columns(py: Python<'_>, set: &Bound<'_, PyAny>) -> PyResult<Py<PyAny>> {
	let names = cursor::columns(&to_object(set)?).map_err(|err| to_py_err(py, &err))?;
	to_python(py, &names)
}

#[pyfunction]
fn more(py: Python<'_>, set: &Bound<'_, PyAny>) -> PyResult<bool> {
	cursor::has_more(&to_object(set)?).map_err(|err| to_py_err(py, &err))
}

#[pyfunction]
fn finalize(py: Python<'_>, set: &Bound<'_, PyAny>) -> PyResult<bool> {
	cursor::finalize(&to_object(set)?).map_err(|err| to_py_err(py, &err))
}

#[pyfunction]
fn is_handle(value: &Bound<'_, PyAny>) -> bool {
	value.is_instance_of::<PyHandle>()
}

#[pyfunction]
#[expect(clippy::missing_const_for_fn, reason = "PyO3 functions are not const")]
fn available() -> bool {
	hostsql::is_available()
}

#[pyfunction]
fn sqlite_lib_version() -> String {
	hostsql::sqlite_lib_version()
}

/// `(name, min_args, max_args, doc)` for every function the module exports.
#[pyfunction]
fn exports(py: Python<'_>) -> PyResult<Py<PyList>> {
	let entries = hostsql::EXPORTS.iter().map(|export| (export.name, export.min_args, export.max_args, export.doc));
	Ok(PyList::new(py, entries)?.unbind())
}

/// Call an export by its host name, e.g. `funcall("sqlite-open")`.
#[pyfunction]
#[pyo3(signature = (name, *args))]
fn funcall(py: Python<'_>, name: &str, args: &Bound<'_, PyTuple>) -> PyResult<Py<PyAny>> {
	let args = args.iter().map(|arg| to_object(&arg)).collect::<PyResult<Vec<_>>>()?;
	let result = with_module(|module| module.funcall(name, &args)).map_err(|err| to_py_err(py, &err))?;
	to_python(py, &result)
}

#[pymodule]
#[pyo3(name = "hostsql")]
fn hostsql_module(py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
	m.add_function(wrap_pyfunction!(open, m)?)?;
	m.add_function(wrap_pyfunction!(close, m)?)?;
	m.add_function(wrap_pyfunction!(execute, m)?)?;
	m.add_function(wrap_pyfunction!(select, m)?)?;
	m.add_function(wrap_pyfunction!(transaction, m)?)?;
	m.add_function(wrap_pyfunction!(commit, m)?)?;
	m.add_function(wrap_pyfunction!(rollback, m)?)?;
	m.add_function(wrap_pyfunction!(pragma, m)?)?;
	m.add_function(wrap_pyfunction!(next, m)?)?;
	m.add_function(wrap_pyfunction!(columns, m)?)?;
	m.add_function(wrap_pyfunction!(more, m)?)?;
	m.add_function(wrap_pyfunction!(finalize, m)?)?;
	m.add_function(wrap_pyfunction!(is_handle, m)?)?;
	m.add_function(wrap_pyfunction!(available, m)?)?;
	m.add_function(wrap_pyfunction!(sqlite_lib_version, m)?)?;
	m.add_function(wrap_pyfunction!(exports, m)?)?;
	m.add_function(wrap_pyfunction!(funcall, m)?)?;
	m.add_class::<PyHandle>()?;
	m.add_class::<Coded>()?;
	m.add("FEATURE", hostsql::FEATURE)?;
	m.add("SQLITE_VERSION_NUMBER", hostsql::sqlite_lib_version_number())?;
	m.add("SQLITE_SOURCE_ID", hostsql::sqlite_source_id())?;
	m.add("using_amalgamation", cfg!(feature = "bundled-sqlite"))?;
	add_module_exceptions(py, m)?;
	Ok(())
}
