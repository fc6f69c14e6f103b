use pie::frontend::{context::SerializedBinding, program::Output};

use crate::common::{expected_outputs, pass_program, printed_outputs, programs};

/// Ensures all example programs are accepted and print the normal forms they state.
#[test]
fn run_examples() {
	for path in programs("tests/examples/programs") {
		let path_str = path.as_os_str().to_str().unwrap().to_owned();
		let (source, session) = pass_program(path);
		assert_eq!(printed_outputs(&session), expected_outputs(&source), "{path_str}");
	}
}

/// Ensures every claim in an accepted program ends up defined.
#[test]
fn examples_leave_no_pending_claims() {
	for path in programs("tests/examples/programs") {
		let path_str = path.as_os_str().to_str().unwrap().to_owned();
		let (_, session) = pass_program(path);
		for (name, binding) in session.context.serialize() {
			assert!(!matches!(binding, SerializedBinding::Claim(_)), "{path_str}: {name}");
		}
	}
}

#[test]
fn holes_are_reported_with_their_types() {
	let (_, session) = pass_program("tests/examples/programs/holes.pie".into());
	let holes: Vec<_> = session
		.outputs
		.iter()
		.filter_map(|output| match output {
			Output::Hole { ty, .. } => Some(ty.to_string()),
			Output::Normal { .. } => None,
		})
		.collect();
	assert_eq!(holes, vec!["Nat".to_owned(), "(→ Atom Atom)".to_owned()]);
}
