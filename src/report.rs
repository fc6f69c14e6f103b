use peg::error::ParseError;

use crate::{
	common::Range,
	frontend::elaborate::{ElaborationError, ElaborationErrorKind, ExpectedFormer, ExpectedLength},
	ir::{
		source::{LexError, LexErrorKind, LexedSource},
		syntax::Term,
	},
};

pub fn report_tokenization_error(source: &str, lex_error: LexError) {
	let range = (lex_error.0, lex_error.0 + 1);
	print!("{}", format_line_error(source, range, "error", &format_lex_error(source, lex_error)));
}

pub fn report_parse_error(source: &LexedSource, error: ParseError<usize>) {
	let end = (source.source.len(), source.source.len() + 1);
	print!(
		"{}",
		format_line_error(
			source.source,
			source.ranges.get(error.location).copied().unwrap_or(end),
			"error",
			&format!("parse error: expected one of: {:?}", error.expected.tokens().collect::<Vec<_>>()),
		)
	);
}

pub fn report_elaboration_error(source: &str, error: &ElaborationError) {
	print!("{}", format_line_error(source, error.range, "error", &display_error(&error.kind)));
}

pub fn report_hole(source: &str, range: Range, ty: &Term) {
	print!("{}", format_line_error(source, range, "hole", &format!("expected {ty}")));
}

/// Formats a message pointing at a range of one source line, underlining it with carets.
pub fn format_line_error(source: &str, range: Range, severity: &str, error_string: &str) -> String {
	const TAB_WIDTH: usize = 3;
	// SAFETY: Repeated spaces form a valid string.
	const TAB_REPLACEMENT: &str = unsafe { std::str::from_utf8_unchecked(&[b' '; TAB_WIDTH]) };

	let mut lines = source.split_inclusive('\n');
	let mut line_number: usize = 0;
	let mut bytes_left = range.0;
	let (line, bytes_left, width) = loop {
		if let Some(line) = lines.next() {
			line_number += 1;
			if line.len() <= bytes_left {
				bytes_left -= line.len();
			} else {
				// Underline at most to the end of the line.
				let width = (range.1.max(range.0 + 1) - range.0).min(line.trim_end().len().saturating_sub(bytes_left));
				break (line, bytes_left, width.max(1));
			}
		} else {
			// This is a cold path, so this is fine.
			let (i, last) = source.split('\n').enumerate().last().unwrap_or((0, ""));
			line_number = i + 1;
			break (last, last.len(), 1);
		}
	};

	let visual_line = line.replace('\t', TAB_REPLACEMENT).trim_end().to_owned();
	let visual_offset = unicode_width::UnicodeWidthStr::width(line[0..bytes_left].replace('\t', TAB_REPLACEMENT).as_str());
	let visual_width =
		unicode_width::UnicodeWidthStr::width(line[bytes_left..].chars().take(width).collect::<String>().as_str());

	let displayed_line_number = line_number.to_string();
	let dummy_line_number = " ".repeat(displayed_line_number.len());
	let mut report = format!("[{}:{}] {severity}: {error_string}\n", line_number, bytes_left);
	report += &format!("{} |\n", dummy_line_number);
	report += &format!("{} | {}\n", displayed_line_number, visual_line);
	report += &format!("{} | {}{}\n", dummy_line_number, " ".repeat(visual_offset), "^".repeat(visual_width.max(1)));
	report
}

fn format_lex_error(source: &str, LexError(location, kind): LexError) -> String {
	fn char_list_string(chars: &[char]) -> String {
		chars.iter().map(|c| format!("`{c}`")).collect::<Vec<_>>().join(", ")
	}

	match kind {
		LexErrorKind::UnrecognizedLexemePrefix => format!(
			"lex error: unrecognized lexeme prefix `{}`",
			source[location..].chars().next().map(|c| c.escape_default().to_string()).unwrap_or_default()
		),
		LexErrorKind::UnexpectedEnd(expected) =>
			format!("lex error: expected one of {}; found end of input", char_list_string(expected)),
	}
}

fn describe_former(former: ExpectedFormer) -> &'static str {
	match former {
		ExpectedFormer::Pi => "a function type",
		ExpectedFormer::Arrow => "a non-dependent function type",
		ExpectedFormer::Sigma => "a pair type",
		ExpectedFormer::List => "a list type",
		ExpectedFormer::Equal => "an equality type",
		ExpectedFormer::Vec => "a vector type",
		ExpectedFormer::Either => "an Either type",
	}
}

pub fn display_error(kind: &ElaborationErrorKind) -> String {
	use ElaborationErrorKind as E;
	match kind {
		E::NotInScope(name) => format!("elaboration error: `{name}` is not in scope"),
		E::NotYetDefined(name) => format!("elaboration error: `{name}` is claimed but not yet defined"),
		E::TypeMismatch { expected, found } =>
			format!("elaboration error: type mismatch\nexpected: {expected}\nfound: {found}"),
		E::NotTheSame { ty, left, right } =>
			format!("elaboration error: {left} and {right} are not the same {ty}"),
		E::ExpectedFormer { expected, found } =>
			format!("elaboration error: expected {}, found {found}", describe_former(*expected)),
		E::NameCollision(name) => format!("elaboration error: `{name}` is already bound"),
		E::NotClaimed(name) => format!("elaboration error: `{name}` has not been claimed"),
		E::AlreadyDefined(name) => format!("elaboration error: `{name}` is already defined"),
		E::CouldNotSynthesize =>
			"elaboration error: cannot determine the type of this expression; annotate it with `the`".to_owned(),
		E::UniverseHasNoType => "elaboration error: U is a type, but it does not have a type".to_owned(),
		E::InvalidAtom(symbol) =>
			format!("elaboration error: invalid atom `'{symbol}`; atoms consist of letters and hyphens"),
		E::VecLength { expected, found } => {
			let expected = match expected {
				ExpectedLength::Zero => "zero",
				ExpectedLength::Successor => "a successor",
			};
			format!("elaboration error: expected a vector whose length is {expected}, found length {found}")
		}
		E::TacticInapplicable { goal } => format!("tactic error: the tactic does not apply to the goal {goal}"),
		E::NoProofInProgress => "tactic error: no goals remain".to_owned(),
		E::ProofIncomplete { goal } => format!("tactic error: the proof is incomplete; unsolved goal: {goal}"),
		E::CouldNotInferMotive => "tactic error: cannot infer a motive; give one explicitly".to_owned(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_points_at_second_line() {
		let report = format_line_error("(claim x Nat)\n(define x 'a)", (24, 26), "error", "mismatch");
		let lines: Vec<_> = report.lines().collect();
		assert_eq!(lines[0], "[2:10] error: mismatch");
		assert_eq!(lines[2], "2 | (define x 'a)");
		assert_eq!(lines[3], "  |           ^^");
	}

	#[test]
	fn test_error_past_the_end() {
		let report = format_line_error("(add1", (5, 6), "error", "unexpected end");
		assert!(report.starts_with("[1:5] error: unexpected end"));
	}

	#[test]
	fn test_messages_print_terms() {
		let message = display_error(&ElaborationErrorKind::TypeMismatch { expected: Term::Nat, found: Term::Atom });
		assert_eq!(message, "elaboration error: type mismatch\nexpected: Nat\nfound: Atom");
	}
}
