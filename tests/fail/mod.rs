use std::fs;

use pie::{
	frontend::{parse::parse, program::run},
	ir::source::lex,
};

use crate::common::{expected_error, programs};

/// Ensures every failing program stops with the error it names.
#[test]
fn run_fail_tests() {
	for path in programs("tests/fail/programs") {
		let path_str = path.as_os_str().to_str().unwrap().to_owned();
		let source = fs::read_to_string(path).expect(&path_str);
		let expected = expected_error(&source).expect(&path_str);
		let found = match lex(&source) {
			Err(_) => "lex".to_owned(),
			Ok(lexed_source) => match parse(&lexed_source) {
				Err(_) => "parse".to_owned(),
				Ok(declarations) => match run(&declarations).error {
					Some(error) => format!("{:?}", error.kind),
					None => panic!("{path_str} was accepted"),
				},
			},
		};
		assert!(found.starts_with(&expected), "{path_str}: expected {expected}, found {found}");
	}
}
