use std::env;

fn main() {
	println!("cargo:rerun-if-env-changed=HOSTSQL_SQLITE_LIB_DIR");

	let bundled = env::var_os("CARGO_FEATURE_BUNDLED_SQLITE").is_some();

	match bundled {
		// libsqlite3-sys compiles the amalgamation and emits the link directives.
		true => {}
		false => link_system(),
	}
}

fn link_system() {
	if let Ok(dir) = env::var("HOSTSQL_SQLITE_LIB_DIR") {
		println!("cargo:rustc-link-search=native={dir}");
		println!("cargo:rustc-link-lib=dylib=sqlite3");
		return;
	}

	let linked = pkg_config::Config::new()
		.atleast_version("3.34.1")
		.print_system_libs(false)
		.probe("sqlite3")
		.is_ok();

	if !linked {
		println!("cargo:rustc-link-lib=dylib=sqlite3");
	}
}
