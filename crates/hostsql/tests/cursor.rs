use hostsql::{Error, HandleKind, Module, Object, SelectMode, cursor};

fn open_with_rows(module: &Module, count: i64) -> Object {
	let db = module.open(None).expect("open memory database");
	module.execute(&db, &Object::from("create table t (a, b)"), None).expect("create table");
	for n in 1..=count {
		let values = Object::list([Object::Integer(n), Object::string(format!("row {n}"))]);
		module.execute(&db, &Object::from("insert into t values (?, ?)"), Some(&values)).expect("insert");
	}
	db
}

fn select_set(module: &Module, db: &Object) -> Object {
	module.select(db, &Object::from("select a, b from t order by a"), None, SelectMode::Set).expect("select set")
}

#[test]
fn cursor_steps_to_the_end_marker() {
	let module = Module::default();
	let db = open_with_rows(&module, 2);
	let set = select_set(&module, &db);

	assert!(cursor::has_more(&set).expect("more before stepping"));
	assert_eq!(
		cursor::next(&set).expect("first row"),
		Object::list([Object::Integer(1), Object::from("row 1")])
	);
	assert_eq!(
		cursor::next(&set).expect("second row"),
		Object::list([Object::Integer(2), Object::from("row 2")])
	);
	// The last row was read but the end has not been seen yet.
	assert!(cursor::has_more(&set).expect("more after last row"));

	assert_eq!(cursor::next(&set).expect("end marker"), Object::Nil);
	assert!(!cursor::has_more(&set).expect("no more after end"));
}

#[test]
fn cursor_stays_at_the_end_once_reached() {
	let module = Module::default();
	let db = open_with_rows(&module, 1);
	let set = select_set(&module, &db);

	cursor::next(&set).expect("only row");
	assert!(cursor::next(&set).expect("end marker").is_nil());

	// A restarted statement would see both rows again.
	let values = Object::list([Object::Integer(2), Object::from("row 2")]);
	module.execute(&db, &Object::from("insert into t values (?, ?)"), Some(&values)).expect("insert");
	assert!(cursor::next(&set).expect("still at the end").is_nil());
	assert!(cursor::next(&set).expect("still at the end").is_nil());
	assert!(!cursor::has_more(&set).expect("no more rows"));
}

const OVERFLOWING_SELECT: &str = "select abs(-9223372036854775807 - 1) from t";

fn assert_integer_overflow(err: &Error) {
	match err {
		Error::Query { code, message } => {
			assert_eq!(code & 0xff, 1);
			assert_eq!(message, "integer overflow");
		}
		other => panic!("expected a query error, got {other:?}"),
	}
	assert_eq!(err.signal(), "error");
}

#[test]
fn failing_eager_select_reports_the_engine_error() {
	let module = Module::default();
	let db = open_with_rows(&module, 2);

	for mode in [SelectMode::Rows, SelectMode::Full] {
		let err = module.select(&db, &Object::from(OVERFLOWING_SELECT), None, mode).expect_err("overflow");
		assert_integer_overflow(&err);
	}

	// The failed statement was finalized, so nothing holds the table.
	module.execute(&db, &Object::from("drop table t"), None).expect("drop table");
	assert!(module.close(&db).expect("close"));
}

#[test]
fn failing_step_surfaces_from_next() {
	let module = Module::default();
	let db = open_with_rows(&module, 2);

	let set = module.select(&db, &Object::from(OVERFLOWING_SELECT), None, SelectMode::Set).expect("select set");
	let err = cursor::next(&set).expect_err("overflow on first step");
	assert_integer_overflow(&err);
	assert!(cursor::has_more(&set).expect("end was never reached"));

	assert!(cursor::finalize(&set).expect("finalize"));
	module.execute(&db, &Object::from("drop table t"), None).expect("drop table");
}

#[test]
fn empty_cursor_reports_end_immediately() {
	let module = Module::default();
	let db = open_with_rows(&module, 0);
	let set = select_set(&module, &db);

	assert_eq!(cursor::next(&set).expect("end marker"), Object::Nil);
	assert!(!cursor::has_more(&set).expect("no more rows"));
}

#[test]
fn cursor_columns_name_the_result() {
	let module = Module::default();
	let db = open_with_rows(&module, 1);
	let set = module
		.select(&db, &Object::from("select a as key, b from t"), None, SelectMode::Set)
		.expect("select set");
	assert_eq!(cursor::columns(&set).expect("columns"), Object::list([Object::from("key"), Object::from("b")]));
}

#[test]
fn bound_cursor_filters_rows() {
	let module = Module::default();
	let db = open_with_rows(&module, 3);
	let set = module
		.select(&db, &Object::from("select a from t where a > ?"), Some(&Object::list([Object::Integer(1)])), SelectMode::Set)
		.expect("select set");

	assert_eq!(cursor::next(&set).expect("row"), Object::list([Object::Integer(2)]));
	assert_eq!(cursor::next(&set).expect("row"), Object::list([Object::Integer(3)]));
	assert!(cursor::next(&set).expect("end").is_nil());
}

#[test]
fn finalized_cursor_is_closed() {
	let module = Module::default();
	let db = open_with_rows(&module, 1);
	let set = select_set(&module, &db);

	assert!(cursor::finalize(&set).expect("finalize"));
	assert_eq!(set.to_string(), "#<sqlite set closed>");

	let closed = Error::Closed(HandleKind::Cursor);
	assert_eq!(cursor::next(&set).err(), Some(closed.clone()));
	assert_eq!(cursor::columns(&set).err(), Some(closed.clone()));
	assert_eq!(cursor::has_more(&set).err(), Some(closed.clone()));
	assert_eq!(cursor::finalize(&set).err(), Some(closed.clone()));
	assert_eq!(closed.to_string(), "Statement closed");
}

#[test]
fn handles_of_the_wrong_kind_are_rejected() {
	let module = Module::default();
	let db = open_with_rows(&module, 1);
	let set = select_set(&module, &db);

	let err = cursor::next(&db).expect_err("connection is not a cursor");
	assert_eq!(err.to_string(), "Invalid set object");

	let err = module.execute(&set, &Object::from("select 1"), None).expect_err("cursor is not a connection");
	assert_eq!(err, Error::WrongKind { expected: HandleKind::Connection });
	assert_eq!(err.to_string(), "Invalid database object");

	let err = cursor::next(&Object::Integer(3)).expect_err("integer is not a handle");
	assert_eq!(err.signal(), "wrong-type-argument");
}

#[test]
fn cursor_outliving_its_connection_reports_database_closed() {
	let module = Module::default();
	let db = open_with_rows(&module, 2);
	let set = select_set(&module, &db);
	cursor::next(&set).expect("first row");

	module.close(&db).expect("close with a live cursor");

	assert_eq!(cursor::next(&set).err(), Some(Error::Closed(HandleKind::Connection)));
	assert_eq!(cursor::columns(&set).expect("columns still readable"), Object::list([Object::from("a"), Object::from("b")]));
	assert!(cursor::has_more(&set).expect("more-p still answers"));
	assert!(cursor::finalize(&set).expect("finalize releases the statement"));
}

#[test]
fn dropping_the_last_reference_releases_the_cursor() {
	let module = Module::default();
	let db = open_with_rows(&module, 1);
	{
		let set = select_set(&module, &db);
		cursor::next(&set).expect("row");
	}
	// With the cursor gone the table can be dropped without a busy statement.
	module.execute(&db, &Object::from("drop table t"), None).expect("drop table");
	assert!(module.close(&db).expect("close"));
}
