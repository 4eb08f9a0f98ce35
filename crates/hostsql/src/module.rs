//! The module as the host sees it: one [`Module`] value carrying the host
//! services, and a table of exported functions the host registers by name.

use std::sync::Arc;

use crate::cursor;
use crate::exec::SelectMode;
use crate::handle;
use crate::host::{Host, StdHost};
use crate::names::MemoryNames;
use crate::{Config, Error, Object, Result};

/// Feature name the host provides once the exports are registered.
pub const FEATURE: &str = "sqlite-backport-module";

pub struct Module {
	host: Box<dyn Host>,
	config: Config,
	names: Arc<MemoryNames>,
}

impl Default for Module {
	fn default() -> Self {
		Self::new(StdHost)
	}
}

impl Module {
	pub fn new(host: impl Host + 'static) -> Self {
		Self { host: Box::new(host), config: Config::default(), names: MemoryNames::process() }
	}

	#[must_use]
	pub fn with_config(mut self, config: Config) -> Self {
		self.config = config;
		self
	}

	/// Use a private counter for anonymous database names instead of the
	/// process-wide one.
	#[must_use]
	pub fn with_memory_names(mut self, names: Arc<MemoryNames>) -> Self {
		self.names = names;
		self
	}

	pub fn host(&self) -> &dyn Host {
		self.host.as_ref()
	}

	pub const fn config(&self) -> Config {
		self.config
	}

	pub fn memory_names(&self) -> &MemoryNames {
		&self.names
	}

	/// Call an export by name, the way the host does after registration.
	/// Trailing optional arguments may be left out.
	pub fn funcall(&self, name: &str, args: &[Object]) -> Result<Object> {
		let export = find_export(name).ok_or_else(|| Error::UnknownFunction(name.to_string()))?;
		if args.len() < export.min_args || args.len() > export.max_args {
			return Err(Error::Arity { name: export.name, got: args.len() });
		}
		(export.call)(self, args)
	}
}

/// One function the module exports to the host.
#[derive(Debug, Copy, Clone)]
pub struct Export {
	pub name: &'static str,
	pub min_args: usize,
	pub max_args: usize,
	pub doc: &'static str,
	pub call: fn(&Module, &[Object]) -> Result<Object>,
}

pub const EXPORTS: &[Export] = &[
	Export {
		name: "sqlite-open",
		min_args: 0,
		max_args: 1,
		doc: "Open FILE as an sqlite database.\nIf FILE is nil, an in-memory database will be opened instead.",
		call: call_open,
	},
	Export { name: "sqlite-close", min_args: 1, max_args: 1, doc: "Close the sqlite database DB.", call: call_close },
	Export {
		name: "sqlite-execute",
		min_args: 2,
		max_args: 3,
		doc: "Execute the first statement of QUERY in DB.\n\
		      If VALUES is non-nil, it should be a vector or a list of values\n\
		      to bind when executing a statement like\n\n   insert into foo values (?, ?, ...)\n\n\
		      Value is the number of affected rows.",
		call: call_execute,
	},
	Export {
		name: "sqlite-select",
		min_args: 2,
		max_args: 4,
		doc: "Select data from the database DB that matches QUERY.\n\
		      If VALUES is non-nil, it should be a list or a vector specifying the\n\
		      values that will be interpolated into a parameterized statement.\n\n\
		      RETURN-TYPE can be either nil (the matching data as a list of rows),\n\
		      `full' (the same, but the first element is the list of column names),\n\
		      or `set' (a set object to be read with `sqlite-next').",
		call: call_select,
	},
	Export {
		name: "sqlite-transaction",
		min_args: 1,
		max_args: 1,
		doc: "Start a transaction in DB.",
		call: call_transaction,
	},
	Export { name: "sqlite-commit", min_args: 1, max_args: 1, doc: "Commit a transaction in DB.", call: call_commit },
	Export {
		name: "sqlite-rollback",
		min_args: 1,
		max_args: 1,
		doc: "Roll back a transaction in DB.",
		call: call_rollback,
	},
	Export { name: "sqlite-pragma", min_args: 2, max_args: 2, doc: "Execute PRAGMA in DB.", call: call_pragma },
	Export {
		name: "sqlite-next",
		min_args: 1,
		max_args: 1,
		doc: "Return the next row from SET, or nil when there are no more.",
		call: call_next,
	},
	Export {
		name: "sqlite-columns",
		min_args: 1,
		max_args: 1,
		doc: "Return the column names of SET.",
		call: call_columns,
	},
	Export {
		name: "sqlite-more-p",
		min_args: 1,
		max_args: 1,
		doc: "Say whether there are any further results in SET.",
		call: call_more_p,
	},
	Export {
		name: "sqlite-finalize",
		min_args: 1,
		max_args: 1,
		doc: "Mark this SET as being finished.\nThis will free the resources held by SET.",
		call: call_finalize,
	},
	Export {
		name: "sqlitep",
		min_args: 1,
		max_args: 1,
		doc: "Say whether OBJECT is an SQLite object.",
		call: call_sqlitep,
	},
	Export {
		name: "sqlite-available-p",
		min_args: 0,
		max_args: 0,
		doc: "Return t if sqlite3 support is available.",
		call: call_available_p,
	},
];

pub fn find_export(name: &str) -> Option<&'static Export> {
	EXPORTS.iter().find(|export| export.name == name)
}

fn arg(args: &[Object], index: usize) -> Option<&Object> {
	args.get(index)
}

fn required(args: &[Object], index: usize) -> Result<&Object> {
	arg(args, index).ok_or_else(|| Error::invalid_argument("missing argument"))
}

fn call_open(module: &Module, args: &[Object]) -> Result<Object> {
	module.open(arg(args, 0))
}

fn call_close(module: &Module, args: &[Object]) -> Result<Object> {
	module.close(required(args, 0)?).map(Object::from_bool)
}

fn call_execute(module: &Module, args: &[Object]) -> Result<Object> {
	module.execute(required(args, 0)?, required(args, 1)?, arg(args, 2)).map(Object::Integer)
}

fn call_select(module: &Module, args: &[Object]) -> Result<Object> {
	let mode = SelectMode::from_object(arg(args, 3));
	module.select(required(args, 0)?, required(args, 1)?, arg(args, 2), mode)
}

fn call_transaction(module: &Module, args: &[Object]) -> Result<Object> {
	module.transaction(required(args, 0)?).map(Object::from_bool)
}

fn call_commit(module: &Module, args: &[Object]) -> Result<Object> {
	module.commit(required(args, 0)?).map(Object::from_bool)
}

fn call_rollback(module: &Module, args: &[Object]) -> Result<Object> {
	module.rollback(required(args, 0)?).map(Object::from_bool)
}

fn call_pragma(module: &Module, args: &[Object]) -> Result<Object> {
	module.pragma(required(args, 0)?, required(args, 1)?).map(Object::from_bool)
}

fn call_next(_: &Module, args: &[Object]) -> Result<Object> {
	cursor::next(required(args, 0)?)
}

fn call_columns(_: &Module, args: &[Object]) -> Result<Object> {
	cursor::columns(required(args, 0)?)
}

fn call_more_p(_: &Module, args: &[Object]) -> Result<Object> {
	cursor::has_more(required(args, 0)?).map(Object::from_bool)
}

fn call_finalize(_: &Module, args: &[Object]) -> Result<Object> {
	cursor::finalize(required(args, 0)?).map(Object::from_bool)
}

fn call_sqlitep(_: &Module, args: &[Object]) -> Result<Object> {
	Ok(Object::from_bool(handle::is_handle(required(args, 0)?)))
}

fn call_available_p(_: &Module, _: &[Object]) -> Result<Object> {
	Ok(Object::from_bool(crate::is_available()))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn module() -> Module {
		Module::default().with_memory_names(Arc::new(MemoryNames::new()))
	}

	#[test]
	fn export_names_are_unique() {
		let mut names: Vec<_> = EXPORTS.iter().map(|export| export.name).collect();
		names.sort_unstable();
		names.dedup();
		assert_eq!(names.len(), EXPORTS.len());
		assert_eq!(EXPORTS.len(), 14);
		assert!(EXPORTS.iter().all(|export| export.min_args <= export.max_args && !export.doc.is_empty()));
	}

	#[test]
	fn funcall_checks_arity() {
		let module = module();
		let err = module.funcall("sqlite-close", &[]).expect_err("close needs a handle");
		assert_eq!(err, Error::Arity { name: "sqlite-close", got: 0 });

		let err = module
			.funcall("sqlite-open", &[Object::Nil, Object::Nil])
			.expect_err("open takes at most one argument");
		assert_eq!(err.signal(), "wrong-number-of-arguments");
	}

	#[test]
	fn funcall_rejects_unknown_names() {
		let err = module().funcall("sqlite-vacuum", &[]).expect_err("no such export");
		assert_eq!(err, Error::UnknownFunction("sqlite-vacuum".to_string()));
	}

	#[test]
	fn private_name_counter_starts_at_one() {
		let module = module();
		let db = module.funcall("sqlite-open", &[]).expect("open");
		assert_eq!(db.to_string(), "#<sqlite db=:memory:1>");
		assert_eq!(module.memory_names().issued(), 1);
	}

	#[test]
	fn funcall_drives_a_whole_session() {
		let module = module();
		let db = module.funcall("sqlite-open", &[]).expect("open");
		assert_eq!(module.funcall("sqlitep", &[db.clone()]).expect("sqlitep"), Object::T);
		assert_eq!(module.funcall("sqlite-available-p", &[]).expect("available"), Object::T);

		module
			.funcall("sqlite-execute", &[db.clone(), Object::from("create table t (a, b)")])
			.expect("create table");
		let inserted = module
			.funcall(
				"sqlite-execute",
				&[
					db.clone(),
					Object::from("insert into t values (?, ?)"),
					Object::list([Object::Integer(1), Object::from("x")]),
				],
			)
			.expect("insert");
		assert_eq!(inserted, Object::Integer(1));

		let set = module
			.funcall("sqlite-select", &[db.clone(), Object::from("select * from t"), Object::Nil, Object::symbol("set")])
			.expect("select set");
		assert_eq!(module.funcall("sqlitep", &[set.clone()]).expect("sqlitep"), Object::T);
		assert_eq!(
			module.funcall("sqlite-columns", &[set.clone()]).expect("columns"),
			Object::list([Object::from("a"), Object::from("b")])
		);
		assert_eq!(
			module.funcall("sqlite-next", &[set.clone()]).expect("first row"),
			Object::list([Object::Integer(1), Object::from("x")])
		);
		assert_eq!(module.funcall("sqlite-next", &[set.clone()]).expect("end"), Object::Nil);
		assert_eq!(module.funcall("sqlite-more-p", &[set.clone()]).expect("more-p"), Object::Nil);
		assert_eq!(module.funcall("sqlite-finalize", &[set]).expect("finalize"), Object::T);
		assert_eq!(module.funcall("sqlite-close", &[db]).expect("close"), Object::T);
	}

	#[test]
	fn select_modes_can_be_given_as_strings() {
		let module = module();
		let db = module.funcall("sqlite-open", &[]).expect("open");
		let query = Object::from("select 1 as one");

		let set = module
			.funcall("sqlite-select", &[db.clone(), query.clone(), Object::Nil, Object::from("set")])
			.expect("select set");
		assert!(matches!(set, Object::Handle(_)), "expected a cursor handle, got {set}");
		assert_eq!(module.funcall("sqlite-next", &[set]).expect("row"), Object::list([Object::Integer(1)]));

		let full = module
			.funcall("sqlite-select", &[db, query, Object::Nil, Object::from("full")])
			.expect("select full");
		assert_eq!(full.to_string(), r#"(("one") (1))"#);
	}

	#[test]
	fn sqlitep_is_false_for_plain_values() {
		assert_eq!(module().funcall("sqlitep", &[Object::from("db")]).expect("sqlitep"), Object::Nil);
	}
}
