use peg::error::ParseError;

use crate::{
	common::{Name, Range},
	ir::{
		presyntax::{Declaration, Expression, ParsedName, Parameter, Preterm, Tactic, TacticKind},
		source::{Keyword, LexedSource, Token},
	},
};

/// Parses a sequence of top-level declarations from a lexed source.
pub fn parse(source: &LexedSource) -> Result<Vec<Declaration>, ParseError<usize>> {
	let parser = Parser { source: source.source, ranges: &source.ranges };
	presyntax_parse::program(&source.tokens, &parser)
}

/// Parses a single expression from a lexed source.
pub fn parse_expression(source: &LexedSource) -> Result<Expression, ParseError<usize>> {
	let parser = Parser { source: source.source, ranges: &source.ranges };
	presyntax_parse::lone_expression(&source.tokens, &parser)
}

pub struct Parser<'s> {
	source: &'s str,
	ranges: &'s [Range],
}

impl<'s> Parser<'s> {
	fn text(&self, token_index: usize) -> &'s str {
		let range = self.ranges[token_index];
		&self.source[range.0..range.1]
	}

	fn identifier(&self, token_index: usize) -> Name { self.text(token_index).into() }

	fn number(&self, token_index: usize) -> Option<u64> { self.text(token_index).parse::<u64>().ok() }

	/// Converts a half-open span of token indices into a byte range.
	fn span(&self, init: usize, fini: usize) -> Range { (self.ranges[init].0, self.ranges[fini.max(init + 1) - 1].1) }
}

peg::parser! {
  grammar presyntax_parse(parser: &Parser) for [Token] {
		rule _ = [Token::Whitespace]*

		rule open() = [Token::ParenL] _

		rule close() = _ [Token::ParenR]

		rule keyword(k: Keyword) = [Token::Keyword(x) if x == k]

		// Tactic names are not reserved, so they are matched on the identifier's spelling.
		rule word(w: &'static str) = pos:position!() [Token::Identifier] {? if parser.text(pos) == w { Ok(()) } else { Err(w) } }

		rule identifier() -> Name
			= pos:position!() [Token::Identifier] {parser.identifier(pos)}

		rule number() -> u64
			= pos:position!() [Token::Number] {? parser.number(pos).ok_or("number") }

		// Any symbol may follow a tick; atoms are validated during elaboration.
		rule symbol() -> Name
			= pos:position!() [Token::Identifier | Token::Keyword(_) | Token::Number] {parser.identifier(pos)}

		rule parsed_name() -> ParsedName
			= init:position!() name:identifier() fini:position!() {ParsedName { range: parser.span(init, fini), name }}

		rule parameter() -> Parameter
			= open() name:parsed_name() _ ty:expression() close() {Parameter { name, ty }}

		rule e() -> Box<Expression>
			= _ expression:expression() {expression.into()}

		#[cache]
		pub rule expression() -> Expression
			= init:position!() preterm:preterm() fini:position!() {preterm.at(parser.span(init, fini))}

		rule preterm() -> Preterm
			= name:identifier() {Preterm::Variable(name)}
			/ n:number() {Preterm::Number(n)}
			/ [Token::Tick] symbol:symbol() {Preterm::Quote(symbol)}
			/ keyword(Keyword::Todo) {Preterm::Todo}
			/ keyword(Keyword::Universe) {Preterm::Universe}
			/ keyword(Keyword::Nat) {Preterm::Nat}
			/ keyword(Keyword::Zero) {Preterm::Zero}
			/ keyword(Keyword::Atom) {Preterm::Atom}
			/ keyword(Keyword::Trivial) {Preterm::Trivial}
			/ keyword(Keyword::Sole) {Preterm::Sole}
			/ keyword(Keyword::ListNil) {Preterm::ListNil}
			/ keyword(Keyword::Absurd) {Preterm::Absurd}
			/ keyword(Keyword::VecNil) {Preterm::VecNil}
			/ open() preterm:form() close() {preterm}

		rule form() -> Preterm
			= keyword(Keyword::The) ty:e() term:e() {Preterm::The { ty, term }}

			// Natural numbers.
			/ keyword(Keyword::Add1) n:e() {Preterm::Add1(n)}
			/ keyword(Keyword::WhichNat) target:e() base:e() step:e() {Preterm::WhichNat { target, base, step }}
			/ keyword(Keyword::IterNat) target:e() base:e() step:e() {Preterm::IterNat { target, base, step }}
			/ keyword(Keyword::RecNat) target:e() base:e() step:e() {Preterm::RecNat { target, base, step }}
			/ keyword(Keyword::IndNat) target:e() motive:e() base:e() step:e() {Preterm::IndNat { target, motive, base, step }}

			// Dependent functions.
			/ keyword(Keyword::Arrow) types:(_ t:expression() {t})*<2,> {?
				let mut domains = types;
				let codomain = domains.pop().ok_or("codomain")?;
				Ok(Preterm::Arrow { domains, codomain: codomain.into() })
			}
			/ keyword(Keyword::Pi) _ open() parameters:(parameter() ++ _) close() family:e() {Preterm::Pi { parameters, family }}
			/ keyword(Keyword::Lambda) _ open() parameters:(parsed_name() ++ _) close() body:e() {Preterm::Lambda { parameters, body }}

			// Dependent pairs.
			/ keyword(Keyword::Sigma) _ open() parameters:(parameter() ++ _) close() family:e() {Preterm::Sigma { parameters, family }}
			/ keyword(Keyword::Pair) a:e() d:e() {Preterm::Pair(a, d)}
			/ keyword(Keyword::Cons) a:e() d:e() {Preterm::Cons(a, d)}
			/ keyword(Keyword::Car) p:e() {Preterm::Car(p)}
			/ keyword(Keyword::Cdr) p:e() {Preterm::Cdr(p)}

			// Lists.
			/ keyword(Keyword::List) ty:e() {Preterm::List(ty)}
			/ keyword(Keyword::ListCons) head:e() tail:e() {Preterm::ListCons(head, tail)}
			/ keyword(Keyword::RecList) target:e() base:e() step:e() {Preterm::RecList { target, base, step }}
			/ keyword(Keyword::IndList) target:e() motive:e() base:e() step:e() {Preterm::IndList { target, motive, base, step }}

			// Empty type.
			/ keyword(Keyword::IndAbsurd) target:e() motive:e() {Preterm::IndAbsurd { target, motive }}

			// Equality.
			/ keyword(Keyword::Equal) ty:e() from:e() to:e() {Preterm::Equal { ty, from, to }}
			/ keyword(Keyword::Same) witness:e() {Preterm::Same(witness)}
			/ keyword(Keyword::Replace) target:e() motive:e() base:e() {Preterm::Replace { target, motive, base }}
			/ keyword(Keyword::Trans) left:e() right:e() {Preterm::Trans(left, right)}
			/ keyword(Keyword::Cong) target:e() function:e() {Preterm::Cong { target, function }}
			/ keyword(Keyword::Symm) target:e() {Preterm::Symm(target)}
			/ keyword(Keyword::IndEqual) target:e() motive:e() base:e() {Preterm::IndEqual { target, motive, base }}

			// Vectors.
			/ keyword(Keyword::Vec) ty:e() len:e() {Preterm::Vec { ty, len }}
			/ keyword(Keyword::VecCons) head:e() tail:e() {Preterm::VecCons(head, tail)}
			/ keyword(Keyword::Head) target:e() {Preterm::Head(target)}
			/ keyword(Keyword::Tail) target:e() {Preterm::Tail(target)}
			/ keyword(Keyword::IndVec) len:e() target:e() motive:e() base:e() step:e() {Preterm::IndVec { len, target, motive, base, step }}

			// Sums.
			/ keyword(Keyword::Either) left:e() right:e() {Preterm::Either(left, right)}
			/ keyword(Keyword::Left) value:e() {Preterm::Left(value)}
			/ keyword(Keyword::Right) value:e() {Preterm::Right(value)}
			/ keyword(Keyword::IndEither) target:e() motive:e() left:e() right:e() {Preterm::IndEither { target, motive, left, right }}

			// Function application.
			/ callee:expression() arguments:(_ a:expression() {a})+ {Preterm::Apply { callee: callee.into(), arguments }}

		rule motive() -> Option<Expression>
			= (_ m:expression() {m})?

		rule tactic_kind() -> TacticKind
			= word("intro") _ name:parsed_name() {TacticKind::Intro(name)}
			/ word("exact") _ e:expression() {TacticKind::Exact(e)}
			/ word("exists") _ e:expression() _ name:parsed_name() {TacticKind::Exists(e, name)}
			/ word("split") {TacticKind::Split}
			/ word("elimNat") _ target:expression() motive:motive() {TacticKind::ElimNat { target, motive }}
			/ word("elimList") _ target:expression() motive:motive() {TacticKind::ElimList { target, motive }}
			/ word("elimVec") _ target:expression() motive:motive() {TacticKind::ElimVec { target, motive }}
			/ word("elimEither") _ target:expression() motive:motive() {TacticKind::ElimEither { target, motive }}
			/ word("elimEqual") _ target:expression() motive:motive() {TacticKind::ElimEqual { target, motive }}
			/ word("elimAbsurd") _ target:expression() {TacticKind::ElimAbsurd { target }}
			/ keyword(Keyword::Left) {TacticKind::Left}
			/ keyword(Keyword::Right) {TacticKind::Right}

		rule tactic() -> Tactic
			= init:position!() open() kind:tactic_kind() close() fini:position!() {Tactic { range: parser.span(init, fini), kind }}

		rule declaration() -> Declaration
			= open() keyword(Keyword::Claim) _ name:parsed_name() _ ty:expression() close() {Declaration::Claim(name, ty)}
			/ open() keyword(Keyword::Define) _ name:parsed_name() _ term:expression() close() {Declaration::Define(name, term)}
			/ open() keyword(Keyword::CheckSame) _ ty:expression() _ left:expression() _ right:expression() close()
				{Declaration::CheckSame { ty, left, right }}
			/ open() keyword(Keyword::DefineTactically) _ name:parsed_name() tactics:(_ t:tactic() {t})* close()
				{Declaration::DefineTactically(name, tactics)}
			/ expression:expression() {Declaration::Expression(expression)}

		pub rule program() -> Vec<Declaration>
			= _ declarations:(declaration() ** _) _ {declarations}

		pub rule lone_expression() -> Expression
			= _ expression:expression() _ {expression}
  }
}
