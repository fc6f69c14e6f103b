use std::str::Chars;

use crate::common::Range;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Token {
	Whitespace,
	Keyword(Keyword),
	Identifier,
	Number,
	ParenL,
	ParenR,
	Tick,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Keyword {
	// Declarations.
	Claim,
	Define,
	CheckSame,
	DefineTactically,

	The,
	Todo,
	Universe,

	// Natural numbers.
	Nat,
	Zero,
	Add1,
	WhichNat,
	IterNat,
	RecNat,
	IndNat,

	// Dependent functions.
	Arrow,
	Pi,
	Lambda,

	// Dependent pairs.
	Sigma,
	Pair,
	Cons,
	Car,
	Cdr,

	Atom,
	Trivial,
	Sole,

	// Lists.
	List,
	ListNil,
	ListCons,
	RecList,
	IndList,

	// Empty type.
	Absurd,
	IndAbsurd,

	// Equality.
	Equal,
	Same,
	Replace,
	Trans,
	Cong,
	Symm,
	IndEqual,

	// Vectors.
	Vec,
	VecNil,
	VecCons,
	Head,
	Tail,
	IndVec,

	// Sums.
	Either,
	Left,
	Right,
	IndEither,
}

#[derive(Debug)]
pub struct LexError(pub usize, pub LexErrorKind);

#[derive(Debug)]
pub enum LexErrorKind {
	UnrecognizedLexemePrefix,
	UnexpectedEnd(&'static [char]),
}

struct Scanner<'s> {
	len: usize,
	chars: Chars<'s>,
}

impl<'s> Scanner<'s> {
	pub fn new(source: &'s str) -> Self { Self { len: source.len(), chars: source.chars() } }

	pub fn position(&self) -> usize { self.len - self.chars.as_str().len() }

	pub fn next(&mut self) -> Option<(char, usize)> {
		let position = self.position();
		Some((self.chars.next()?, position))
	}

	pub fn pop(&mut self) -> Option<char> { self.chars.next() }

	pub fn peek(&mut self) -> Option<char> { self.chars.clone().next() }
}

pub struct LexedSource<'s> {
	pub source: &'s str,
	pub tokens: Box<[Token]>,
	pub ranges: Box<[Range]>,
}

/// Characters that may appear inside a symbol.
fn is_symbolic(c: char) -> bool { !(c.is_whitespace() || matches!(c, '(' | ')' | '[' | ']' | '\'' | ';' | '"' | '`' | ',')) }

fn keyword_or_identifier(string: &str) -> Token {
	use Token::*;

	use self::Keyword::*;
	match string {
		"claim" => Keyword(Claim),
		"define" => Keyword(Define),
		"check-same" => Keyword(CheckSame),
		"define-tactically" => Keyword(DefineTactically),

		"the" => Keyword(The),
		"TODO" => Keyword(Todo),
		"U" => Keyword(Universe),

		"Nat" => Keyword(Nat),
		"zero" => Keyword(Zero),
		"add1" => Keyword(Add1),
		"which-Nat" => Keyword(WhichNat),
		"iter-Nat" => Keyword(IterNat),
		"rec-Nat" => Keyword(RecNat),
		"ind-Nat" => Keyword(IndNat),

		"->" | "→" => Keyword(Arrow),
		"Pi" | "Π" => Keyword(Pi),
		"lambda" | "λ" => Keyword(Lambda),

		"Sigma" | "Σ" => Keyword(Sigma),
		"Pair" => Keyword(Pair),
		"cons" => Keyword(Cons),
		"car" => Keyword(Car),
		"cdr" => Keyword(Cdr),

		"Atom" => Keyword(Atom),
		"Trivial" => Keyword(Trivial),
		"sole" => Keyword(Sole),

		"List" => Keyword(List),
		"nil" => Keyword(ListNil),
		"::" => Keyword(ListCons),
		"rec-List" => Keyword(RecList),
		"ind-List" => Keyword(IndList),

		"Absurd" => Keyword(Absurd),
		"ind-Absurd" => Keyword(IndAbsurd),

		"=" => Keyword(Equal),
		"same" => Keyword(Same),
		"replace" => Keyword(Replace),
		"trans" => Keyword(Trans),
		"cong" => Keyword(Cong),
		"symm" => Keyword(Symm),
		"ind-=" => Keyword(IndEqual),

		"Vec" => Keyword(Vec),
		"vecnil" => Keyword(VecNil),
		"vec::" => Keyword(VecCons),
		"head" => Keyword(Head),
		"tail" => Keyword(Tail),
		"ind-Vec" => Keyword(IndVec),

		"Either" => Keyword(Either),
		"left" => Keyword(Left),
		"right" => Keyword(Right),
		"ind-Either" => Keyword(IndEither),

		_ if string.bytes().all(|b| b.is_ascii_digit()) => Number,
		_ => Identifier,
	}
}

pub fn lex(source: &str) -> Result<LexedSource, LexError> {
	use LexErrorKind::*;
	use Token::*;
	let mut scanner = Scanner::new(source);
	let mut tokens = Vec::new();
	let mut ranges = Vec::new();
	while let Some((initial, start)) = scanner.next() {
		let token = match initial {
			c if c.is_whitespace() => {
				while scanner.peek().is_some_and(char::is_whitespace) {
					scanner.pop();
				}
				Whitespace
			}
			';' => {
				while let Some(c) = scanner.peek() {
					scanner.pop();
					if c == '\n' {
						break;
					}
				}
				Whitespace
			}
			'(' | '[' => ParenL,
			')' | ']' => ParenR,
			'\'' => {
				const EXPECTED: [char; 1] = ['a'];
				match scanner.peek() {
					Some(_) => Tick,
					None => return Err(LexError(scanner.position(), UnexpectedEnd(&EXPECTED))),
				}
			}
			c if is_symbolic(c) => {
				while scanner.peek().is_some_and(is_symbolic) {
					scanner.pop();
				}
				keyword_or_identifier(&source[start..scanner.position()])
			}
			_ => return Err(LexError(start, UnrecognizedLexemePrefix)),
		};
		tokens.push(token);
		ranges.push((start, scanner.position()));
	}

	debug_assert!(tokens.len() == ranges.len());
	Ok(LexedSource { source, tokens: tokens.into_boxed_slice(), ranges: ranges.into_boxed_slice() })
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_symbols_and_keywords() {
		let lexed = lex("(vec:: 'olive vecnil) ; comment\n[→ n-1 12]").ok().unwrap();
		assert_eq!(
			&*lexed.tokens,
			&[
				Token::ParenL,
				Token::Keyword(Keyword::VecCons),
				Token::Whitespace,
				Token::Tick,
				Token::Identifier,
				Token::Whitespace,
				Token::Keyword(Keyword::VecNil),
				Token::ParenR,
				Token::Whitespace,
				Token::Whitespace,
				Token::ParenL,
				Token::Keyword(Keyword::Arrow),
				Token::Whitespace,
				Token::Identifier,
				Token::Whitespace,
				Token::Number,
				Token::ParenR,
			]
		);
	}

	#[test]
	fn test_ranges_are_byte_offsets() {
		let lexed = lex("(λ (x) x)").ok().unwrap();
		assert_eq!(lexed.ranges[1], (1, 3));
		assert_eq!(lexed.ranges[4], (5, 6));
	}

	#[test]
	fn test_rejects_string_literal() { assert!(matches!(lex("\"x\""), Err(LexError(0, LexErrorKind::UnrecognizedLexemePrefix)))); }
}
