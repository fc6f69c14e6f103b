use std::fmt::{self, Write};

use crate::{
	frontend::unelaborate::Unelaborate as _,
	ir::{
		presyntax::{Expression, Parameter, ParsedName, Preterm},
		syntax::Term,
	},
};

/// Prints an expression as an s-expression that reads back to the same expression.
pub fn print(expression: &Expression, f: &mut impl Write) -> fmt::Result {
	use Preterm as P;
	match &expression.preterm {
		P::Variable(name) => write!(f, "{name}"),
		P::Todo => write!(f, "TODO"),
		P::Universe => write!(f, "U"),
		P::Nat => write!(f, "Nat"),
		P::Zero => write!(f, "zero"),
		P::Number(n) => write!(f, "{n}"),
		P::Atom => write!(f, "Atom"),
		P::Quote(symbol) => write!(f, "'{symbol}"),
		P::Trivial => write!(f, "Trivial"),
		P::Sole => write!(f, "sole"),
		P::ListNil => write!(f, "nil"),
		P::Absurd => write!(f, "Absurd"),
		P::VecNil => write!(f, "vecnil"),

		P::The { ty, term } => form(f, "the", [&**ty, &**term]),

		P::Add1(prev) => form(f, "add1", [&**prev]),
		P::WhichNat { target, base, step } => form(f, "which-Nat", [&**target, &**base, &**step]),
		P::IterNat { target, base, step } => form(f, "iter-Nat", [&**target, &**base, &**step]),
		P::RecNat { target, base, step } => form(f, "rec-Nat", [&**target, &**base, &**step]),
		P::IndNat { target, motive, base, step } => form(f, "ind-Nat", [&**target, &**motive, &**base, &**step]),

		P::Arrow { domains, codomain } => form(f, "→", domains.iter().chain([&**codomain])),
		P::Pi { parameters, family } => binder_form(f, "Π", parameters, family),
		P::Lambda { parameters, body } => {
			write!(f, "(λ ")?;
			names(f, parameters)?;
			write!(f, " ")?;
			print(body, f)?;
			write!(f, ")")
		}
		P::Apply { callee, arguments } => {
			write!(f, "(")?;
			print(callee, f)?;
			for argument in arguments {
				write!(f, " ")?;
				print(argument, f)?;
			}
			write!(f, ")")
		}

		P::Sigma { parameters, family } => binder_form(f, "Σ", parameters, family),
		P::Pair(car, cdr) => form(f, "Pair", [&**car, &**cdr]),
		P::Cons(car, cdr) => form(f, "cons", [&**car, &**cdr]),
		P::Car(pair) => form(f, "car", [&**pair]),
		P::Cdr(pair) => form(f, "cdr", [&**pair]),

		P::List(element) => form(f, "List", [&**element]),
		P::ListCons(head, tail) => form(f, "::", [&**head, &**tail]),
		P::RecList { target, base, step } => form(f, "rec-List", [&**target, &**base, &**step]),
		P::IndList { target, motive, base, step } => form(f, "ind-List", [&**target, &**motive, &**base, &**step]),

		P::IndAbsurd { target, motive } => form(f, "ind-Absurd", [&**target, &**motive]),

		P::Equal { ty, from, to } => form(f, "=", [&**ty, &**from, &**to]),
		P::Same(witness) => form(f, "same", [&**witness]),
		P::Replace { target, motive, base } => form(f, "replace", [&**target, &**motive, &**base]),
		P::Trans(left, right) => form(f, "trans", [&**left, &**right]),
		P::Cong { target, function } => form(f, "cong", [&**target, &**function]),
		P::Symm(target) => form(f, "symm", [&**target]),
		P::IndEqual { target, motive, base } => form(f, "ind-=", [&**target, &**motive, &**base]),

		P::Vec { ty, len } => form(f, "Vec", [&**ty, &**len]),
		P::VecCons(head, tail) => form(f, "vec::", [&**head, &**tail]),
		P::Head(target) => form(f, "head", [&**target]),
		P::Tail(target) => form(f, "tail", [&**target]),
		P::IndVec { len, target, motive, base, step } => form(f, "ind-Vec", [&**len, &**target, &**motive, &**base, &**step]),

		P::Either(left, right) => form(f, "Either", [&**left, &**right]),
		P::Left(value) => form(f, "left", [&**value]),
		P::Right(value) => form(f, "right", [&**value]),
		P::IndEither { target, motive, left, right } => form(f, "ind-Either", [&**target, &**motive, &**left, &**right]),
	}
}

fn form<'e>(f: &mut impl Write, head: &str, arguments: impl IntoIterator<Item = &'e Expression>) -> fmt::Result {
	write!(f, "({head}")?;
	for argument in arguments {
		write!(f, " ")?;
		print(argument, f)?;
	}
	write!(f, ")")
}

fn names(f: &mut impl Write, parameters: &[ParsedName]) -> fmt::Result {
	write!(f, "(")?;
	for (i, parameter) in parameters.iter().enumerate() {
		if i > 0 {
			write!(f, " ")?;
		}
		write!(f, "{}", parameter.name)?;
	}
	write!(f, ")")
}

fn binder_form(f: &mut impl Write, head: &str, parameters: &[Parameter], family: &Expression) -> fmt::Result {
	write!(f, "({head} (")?;
	for (i, Parameter { name, ty }) in parameters.iter().enumerate() {
		if i > 0 {
			write!(f, " ")?;
		}
		write!(f, "({} ", name.name)?;
		print(ty, f)?;
		write!(f, ")")?;
	}
	write!(f, ") ")?;
	print(family, f)?;
	write!(f, ")")
}

impl fmt::Display for Expression {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { print(self, f) }
}

impl fmt::Display for Term {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { print(&self.unelaborate(), f) }
}

#[cfg(test)]
mod tests {
	use crate::{
		frontend::{
			context::{Context, Renaming},
			parse::parse_expression,
		},
		ir::source::lex,
	};

	fn round_trip(source: &str) -> String {
		let context = Context::empty();
		let expression = parse_expression(&lex(source).unwrap()).unwrap();
		let (_, term) = context.synthesize(&Renaming::empty(), &expression).unwrap();
		term.to_string()
	}

	#[test]
	fn test_prints_sugared_forms() {
		assert_eq!(round_trip("(the (-> Nat Atom Nat) (lambda (x y) (add1 x)))"), "(the (→ Nat Atom Nat) (λ (x y) (add1 x)))");
		assert_eq!(round_trip("(the (Pair Nat Nat) (cons 1 zero))"), "(the (Pair Nat Nat) (cons 1 0))");
	}

	#[test]
	fn test_prints_dependent_binders() {
		assert_eq!(
			round_trip("(the (Pi ((n Nat) (v (Vec Atom n))) Atom) (lambda (n v) 'a))"),
			"(the (Π ((n Nat)) (→ (Vec Atom n) Atom)) (λ (n v) 'a))"
		);
	}

	#[test]
	fn test_printed_terms_parse_again() {
		let printed = round_trip("(the (Sigma ((n Nat)) (= Nat n n)) (cons 2 (same 2)))");
		assert_eq!(round_trip(&printed), printed);
	}
}
