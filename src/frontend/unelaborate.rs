use std::rc::Rc;

use crate::{
	common::{Binder, Name, Range},
	ir::{
		presyntax::{Expression, Parameter, ParsedName, Preterm},
		syntax::Term,
	},
	utility::bx,
};

/// Unelaborated expressions are never reported against a source.
const NOWHERE: Range = (0, 0);

pub trait Unelaborate {
	type Pre;
	fn unelaborate(&self) -> Self::Pre;
}

fn e(term: &Rc<Term>) -> Box<Expression> { bx!(term.unelaborate()) }

fn parsed(name: &Name) -> ParsedName { ParsedName { range: NOWHERE, name: name.clone() } }

fn parameter(name: &Name, ty: &Rc<Term>) -> Parameter { Parameter { name: parsed(name), ty: ty.unelaborate() } }

/// The value of a closed numeral.
fn numeral(mut term: &Term) -> Option<u64> {
	let mut n = 0;
	loop {
		match term {
			Term::Zero => return Some(n),
			Term::Add1(prev) => {
				n += 1;
				term = &**prev;
			}
			_ => return None,
		}
	}
}

fn is_dependent(family: &Binder<Rc<Term>>) -> bool { family.body.occurs_free(&family.parameter) }

type Telescope<'t> = fn(&'t Term) -> Option<(&'t Rc<Term>, &'t Binder<Rc<Term>>)>;

/// Gathers consecutive dependent binders of one former into a parameter list.
fn telescope<'t>(
	base: &'t Rc<Term>,
	family: &'t Binder<Rc<Term>>,
	next: Telescope<'t>,
) -> (Vec<Parameter>, Box<Expression>) {
	let mut parameters = vec![parameter(&family.parameter, base)];
	let mut body = &family.body;
	while let Some((base, family)) = next(body).filter(|(_, family)| is_dependent(family)) {
		parameters.push(parameter(&family.parameter, base));
		body = &family.body;
	}
	(parameters, e(body))
}

impl Unelaborate for Term {
	type Pre = Expression;
	fn unelaborate(&self) -> Self::Pre {
		use Preterm as P;
		use Term as T;
		let preterm = match self {
			T::Variable(name) => P::Variable(name.clone()),
			T::The { ty, term } => P::The { ty: e(ty), term: e(term) },
			T::Todo { range, .. } => return P::Todo.at(*range),
			T::Universe => P::Universe,

			// Natural numbers.
			T::Nat => P::Nat,
			T::Zero => P::Number(0),
			T::Add1(prev) => match numeral(self) {
				Some(n) => P::Number(n),
				None => P::Add1(e(prev)),
			},
			T::WhichNat { target, base, step, .. } => P::WhichNat { target: e(target), base: e(base), step: e(step) },
			T::IterNat { target, base, step, .. } => P::IterNat { target: e(target), base: e(base), step: e(step) },
			T::RecNat { target, base, step, .. } => P::RecNat { target: e(target), base: e(base), step: e(step) },
			T::IndNat { target, motive, base, step } =>
				P::IndNat { target: e(target), motive: e(motive), base: e(base), step: e(step) },

			// Dependent functions.
			T::Pi { base, family } if !is_dependent(family) => {
				let mut domains = vec![base.unelaborate()];
				let mut codomain = &family.body;
				while let T::Pi { base, family } = codomain.as_ref() {
					if is_dependent(family) {
						break;
					}
					domains.push(base.unelaborate());
					codomain = &family.body;
				}
				P::Arrow { domains, codomain: e(codomain) }
			}
			T::Pi { base, family } => {
				let next: Telescope = |term| match term {
					T::Pi { base, family } => Some((base, family)),
					_ => None,
				};
				let (parameters, family) = telescope(base, family, next);
				P::Pi { parameters, family }
			}
			T::Lambda(function) => {
				let mut parameters = vec![parsed(&function.parameter)];
				let mut body = &function.body;
				while let T::Lambda(function) = body.as_ref() {
					parameters.push(parsed(&function.parameter));
					body = &function.body;
				}
				P::Lambda { parameters, body: e(body) }
			}
			T::Apply { .. } => {
				let mut arguments = Vec::new();
				let mut callee = self;
				while let T::Apply { callee: inner, argument } = callee {
					arguments.push(argument.unelaborate());
					callee = &**inner;
				}
				arguments.reverse();
				P::Apply { callee: bx!(callee.unelaborate()), arguments }
			}

			// Dependent pairs.
			T::Sigma { base, family } if !is_dependent(family) => P::Pair(e(base), e(&family.body)),
			T::Sigma { base, family } => {
				let next: Telescope = |term| match term {
					T::Sigma { base, family } => Some((base, family)),
					_ => None,
				};
				let (parameters, family) = telescope(base, family, next);
				P::Sigma { parameters, family }
			}
			T::Cons(car, cdr) => P::Cons(e(car), e(cdr)),
			T::Car(pair) => P::Car(e(pair)),
			T::Cdr(pair) => P::Cdr(e(pair)),

			T::Atom => P::Atom,
			T::Quote(symbol) => P::Quote(symbol.clone()),

			T::Trivial => P::Trivial,
			T::Sole => P::Sole,

			// Lists.
			T::List(element) => P::List(e(element)),
			T::ListNil => P::ListNil,
			T::ListCons(head, tail) => P::ListCons(e(head), e(tail)),
			T::RecList { target, base, step, .. } => P::RecList { target: e(target), base: e(base), step: e(step) },
			T::IndList { target, motive, base, step } =>
				P::IndList { target: e(target), motive: e(motive), base: e(base), step: e(step) },

			T::Absurd => P::Absurd,
			T::IndAbsurd { target, motive } => P::IndAbsurd { target: e(target), motive: e(motive) },

			// Equality.
			T::Equal { ty, from, to } => P::Equal { ty: e(ty), from: e(from), to: e(to) },
			T::Same(witness) => P::Same(e(witness)),
			T::Replace { target, motive, base } => P::Replace { target: e(target), motive: e(motive), base: e(base) },
			T::Trans(left, right) => P::Trans(e(left), e(right)),
			T::Cong { target, function, .. } => P::Cong { target: e(target), function: e(function) },
			T::Symm(target) => P::Symm(e(target)),
			T::IndEqual { target, motive, base } =>
				P::IndEqual { target: e(target), motive: e(motive), base: e(base) },

			// Vectors.
			T::Vec { ty, len } => P::Vec { ty: e(ty), len: e(len) },
			T::VecNil => P::VecNil,
			T::VecCons(head, tail) => P::VecCons(e(head), e(tail)),
			T::Head(target) => P::Head(e(target)),
			T::Tail(target) => P::Tail(e(target)),
			T::IndVec { len, target, motive, base, step } => P::IndVec {
				len: e(len),
				target: e(target),
				motive: e(motive),
				base: e(base),
				step: e(step),
			},

			// Sums.
			T::Either(left, right) => P::Either(e(left), e(right)),
			T::Left(value) => P::Left(e(value)),
			T::Right(value) => P::Right(e(value)),
			T::IndEither { target, motive, left, right } =>
				P::IndEither { target: e(target), motive: e(motive), left: e(left), right: e(right) },
		};
		preterm.at(NOWHERE)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		common::{bind, name},
		utility::rc,
	};

	#[test]
	fn test_numerals_are_resugared() {
		assert!(matches!(Term::number(3).unelaborate().preterm, Preterm::Number(3)));
		let open = Term::Add1(rc!(Term::Variable(name("n"))));
		assert!(matches!(open.unelaborate().preterm, Preterm::Add1(_)));
	}

	#[test]
	fn test_non_dependent_pi_is_an_arrow() {
		let arrow = Term::Pi {
			base: rc!(Term::Nat),
			family: bind(name("x"), Term::Pi { base: rc!(Term::Atom), family: bind(name("y"), Term::Nat) }),
		};
		let Preterm::Arrow { domains, .. } = arrow.unelaborate().preterm else { panic!() };
		assert_eq!(domains.len(), 2);
	}

	#[test]
	fn test_dependent_pi_keeps_its_parameters() {
		let vec = Term::Vec { ty: rc!(Term::Atom), len: rc!(Term::Variable(name("n"))) };
		let pi = Term::Pi { base: rc!(Term::Nat), family: bind(name("n"), vec) };
		let Preterm::Pi { parameters, .. } = pi.unelaborate().preterm else { panic!() };
		assert_eq!(&*parameters[0].name.name, "n");
	}

	#[test]
	fn test_application_is_flattened() {
		let apply = |callee, argument| Term::Apply { callee: rc!(callee), argument: rc!(argument) };
		let term = apply(apply(Term::Variable(name("f")), Term::Zero), Term::Sole);
		let Preterm::Apply { arguments, .. } = term.unelaborate().preterm else { panic!() };
		assert_eq!(arguments.len(), 2);
	}
}
