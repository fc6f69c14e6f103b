use std::{
	ffi::OsStr,
	fs,
	path::{Path, PathBuf},
};

use pie::{
	frontend::{
		parse::parse,
		program::{run, Output, Session},
	},
	ir::source::lex,
	report::report_elaboration_error,
};

pub const EXTENSION: &str = "pie";

/// Every program in a directory, in a stable order.
pub fn programs(directory: impl AsRef<Path>) -> Vec<PathBuf> {
	let mut paths: Vec<_> = fs::read_dir(directory)
		.unwrap()
		.flatten()
		.map(|x| x.path())
		.filter(|x| x.extension() == Some(OsStr::new(EXTENSION)))
		.collect();
	paths.sort();
	paths
}

/// Lines of the form `;; => output` give what a program prints for its bare expressions, in order.
pub fn expected_outputs(source: &str) -> Vec<String> {
	source.lines().filter_map(|line| line.trim().strip_prefix(";; =>")).map(|x| x.trim().to_owned()).collect()
}

/// A line of the form `; error: kind` names the error a failing program stops with.
pub fn expected_error(source: &str) -> Option<String> {
	source.lines().find_map(|line| line.trim().strip_prefix("; error:")).map(|x| x.trim().to_owned())
}

pub fn printed_outputs(session: &Session) -> Vec<String> {
	session
		.outputs
		.iter()
		.filter_map(|output| match output {
			Output::Normal { ty, term } => Some(format!("(the {ty} {term})")),
			Output::Hole { .. } => None,
		})
		.collect()
}

/// Runs a program that must be accepted.
pub fn pass_program(path: PathBuf) -> (String, Session) {
	let path_str = path.as_os_str().to_str().unwrap().to_owned();
	let source = fs::read_to_string(path).expect(&path_str);
	let lexed_source = lex(&source).ok().expect(&path_str);
	let declarations = parse(&lexed_source).expect(&path_str);
	let session = run(&declarations);
	if let Some(error) = &session.error {
		report_elaboration_error(&source, error);
		panic!("{}", path_str);
	}
	(source, session)
}
