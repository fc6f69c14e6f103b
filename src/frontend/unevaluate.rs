use std::rc::Rc;

use crate::{
	common::bind,
	frontend::{context::Context, evaluate::EvaluateWith as _},
	ir::{
		semantics::{Neutral, Normal, Value},
		syntax::Term,
	},
	utility::rc,
};

impl Context {
	/// Reads back a value of type `U` as a type term.
	pub fn read_back_type(&self, ty: &Value) -> Term {
		use Value as V;
		match ty.force() {
			V::Neutral { neutral, .. } => self.read_back_neutral(&neutral),

			V::Universe => Term::Universe,
			V::Nat => Term::Nat,
			V::Atom => Term::Atom,
			V::Trivial => Term::Trivial,
			V::Absurd => Term::Absurd,

			V::Pi { base, family } => {
				let parameter = self.fresh(family.parameter());
				let variable = Value::variable(parameter.clone(), base.as_ref().clone());
				Term::Pi {
					base: rc!(self.read_back_type(&base)),
					family: bind(
						parameter.clone(),
						self.assume(parameter, base.into()).read_back_type(&family.evaluate_with(variable)),
					),
				}
			}
			V::Sigma { base, family } => {
				let parameter = self.fresh(family.parameter());
				let variable = Value::variable(parameter.clone(), base.as_ref().clone());
				Term::Sigma {
					base: rc!(self.read_back_type(&base)),
					family: bind(
						parameter.clone(),
						self.assume(parameter, base.into()).read_back_type(&family.evaluate_with(variable)),
					),
				}
			}

			V::List(element) => Term::List(rc!(self.read_back_type(&element))),
			V::Equal { ty, from, to } => Term::Equal {
				ty: rc!(self.read_back_type(&ty)),
				from: rc!(self.read_back(&ty, &from)),
				to: rc!(self.read_back(&ty, &to)),
			},
			V::Vec { ty, len } =>
				Term::Vec { ty: rc!(self.read_back_type(&ty)), len: rc!(self.read_back(&Value::Nat, &len)) },
			V::Either(left, right) =>
				Term::Either(rc!(self.read_back_type(&left)), rc!(self.read_back_type(&right))),

			value => unreachable!("read back a non-type as a type: {value:?}"),
		}
	}

	/// Reads back a value as a normal-form term of type `ty`, eta-expanding functions and pairs.
	pub fn read_back(&self, ty: &Value, value: &Value) -> Term {
		use Value as V;
		let value = value.force();
		match (ty.force(), value) {
			(V::Universe, value) => self.read_back_type(&value),

			// Eta.
			(V::Pi { base, family }, value) => {
				let suggestion = match &value {
					V::Lambda(closure) => closure.parameter().clone(),
					_ => family.parameter().clone(),
				};
				let parameter = self.fresh(&suggestion);
				let variable = Value::variable(parameter.clone(), base.as_ref().clone());
				let body = self.assume(parameter.clone(), base.into()).read_back(
					&family.evaluate_with(variable.clone()),
					&value.apply(variable),
				);
				Term::Lambda(bind(parameter, body))
			}
			(V::Sigma { base, family }, value) => {
				let car = value.car();
				Term::Cons(
					rc!(self.read_back(&base, &car)),
					rc!(self.read_back(&family.evaluate_with(car), &value.cdr())),
				)
			}
			(V::Trivial, _) => Term::Sole,
			(V::Absurd, V::Neutral { neutral, .. }) =>
				Term::The { ty: rc!(Term::Absurd), term: rc!(self.read_back_neutral(&neutral)) },

			(_, V::Neutral { neutral, .. }) => self.read_back_neutral(&neutral),

			(V::Nat, V::Zero) => Term::Zero,
			(V::Nat, V::Add1(prev)) => Term::Add1(rc!(self.read_back(&V::Nat, &prev))),
			(V::Atom, V::Quote(symbol)) => Term::Quote(symbol),
			(V::List(_), V::ListNil) => Term::ListNil,
			(V::List(element), V::ListCons(head, tail)) =>
				Term::ListCons(rc!(self.read_back(&element, &head)), rc!(self.read_back(ty, &tail))),
			(V::Equal { ty, .. }, V::Same(witness)) => Term::Same(rc!(self.read_back(&ty, &witness))),
			(V::Vec { .. }, V::VecNil) => Term::VecNil,
			(V::Vec { ty, len }, V::VecCons(head, tail)) => match len.force() {
				V::Add1(prev) => Term::VecCons(
					rc!(self.read_back(&ty, &head)),
					rc!(self.read_back(&V::Vec { ty: ty.clone(), len: prev }, &tail)),
				),
				len => unreachable!("vec:: at a length that is not a successor: {len:?}"),
			},
			(V::Either(left, _), V::Left(value)) => Term::Left(rc!(self.read_back(&left, &value))),
			(V::Either(_, right), V::Right(value)) => Term::Right(rc!(self.read_back(&right, &value))),

			(ty, value) => unreachable!("read back {value:?} at the wrong type {ty:?}"),
		}
	}

	fn read_back_normal(&self, normal: &Normal) -> Term { self.read_back(&normal.ty, &normal.value) }

	fn read_back_normal_rc(&self, normal: &Normal) -> Rc<Term> { rc!(self.read_back_normal(normal)) }

	fn read_back_neutral_rc(&self, neutral: &Neutral) -> Rc<Term> { rc!(self.read_back_neutral(neutral)) }

	/// Reads back a stuck eliminator, reading its non-target arguments back at their recorded types.
	pub fn read_back_neutral(&self, neutral: &Neutral) -> Term {
		use Neutral as N;
		match neutral {
			N::Variable(name) => Term::Variable(name.clone()),
			N::Todo { range, ty } => Term::Todo { range: *range, ty: rc!(self.read_back_type(ty)) },

			// Natural numbers.
			N::WhichNat { target, base, step } => Term::WhichNat {
				target: self.read_back_neutral_rc(target),
				base_ty: rc!(self.read_back_type(&base.ty)),
				base: self.read_back_normal_rc(base),
				step: self.read_back_normal_rc(step),
			},
			N::IterNat { target, base, step } => Term::IterNat {
				target: self.read_back_neutral_rc(target),
				base_ty: rc!(self.read_back_type(&base.ty)),
				base: self.read_back_normal_rc(base),
				step: self.read_back_normal_rc(step),
			},
			N::RecNat { target, base, step } => Term::RecNat {
				target: self.read_back_neutral_rc(target),
				base_ty: rc!(self.read_back_type(&base.ty)),
				base: self.read_back_normal_rc(base),
				step: self.read_back_normal_rc(step),
			},
			N::IndNat { target, motive, base, step } => Term::IndNat {
				target: self.read_back_neutral_rc(target),
				motive: self.read_back_normal_rc(motive),
				base: self.read_back_normal_rc(base),
				step: self.read_back_normal_rc(step),
			},

			// Dependent functions.
			N::Apply { callee, argument } =>
				Term::Apply { callee: self.read_back_neutral_rc(callee), argument: self.read_back_normal_rc(argument) },

			// Dependent pairs.
			N::Car(pair) => Term::Car(self.read_back_neutral_rc(pair)),
			N::Cdr(pair) => Term::Cdr(self.read_back_neutral_rc(pair)),

			// Lists.
			N::RecList { target, base, step } => Term::RecList {
				target: self.read_back_neutral_rc(target),
				base_ty: rc!(self.read_back_type(&base.ty)),
				base: self.read_back_normal_rc(base),
				step: self.read_back_normal_rc(step),
			},
			N::IndList { target, motive, base, step } => Term::IndList {
				target: self.read_back_neutral_rc(target),
				motive: self.read_back_normal_rc(motive),
				base: self.read_back_normal_rc(base),
				step: self.read_back_normal_rc(step),
			},

			// Empty type.
			N::IndAbsurd { target, motive } => Term::IndAbsurd {
				target: rc!(Term::The { ty: rc!(Term::Absurd), term: self.read_back_neutral_rc(target) }),
				motive: self.read_back_normal_rc(motive),
			},

			// Equality.
			N::Replace { target, motive, base } => Term::Replace {
				target: self.read_back_neutral_rc(target),
				motive: self.read_back_normal_rc(motive),
				base: self.read_back_normal_rc(base),
			},
			N::TransLeft { left, right } =>
				Term::Trans(self.read_back_neutral_rc(left), self.read_back_normal_rc(right)),
			N::TransRight { left, right } =>
				Term::Trans(self.read_back_normal_rc(left), self.read_back_neutral_rc(right)),
			N::TransBoth { left, right } =>
				Term::Trans(self.read_back_neutral_rc(left), self.read_back_neutral_rc(right)),
			N::Cong { target, ty, function } => Term::Cong {
				target: self.read_back_neutral_rc(target),
				ty: rc!(self.read_back_type(ty)),
				function: self.read_back_normal_rc(function),
			},
			N::Symm(target) => Term::Symm(self.read_back_neutral_rc(target)),
			N::IndEqual { target, motive, base } => Term::IndEqual {
				target: self.read_back_neutral_rc(target),
				motive: self.read_back_normal_rc(motive),
				base: self.read_back_normal_rc(base),
			},

			// Vectors.
			N::Head(target) => Term::Head(self.read_back_neutral_rc(target)),
			N::Tail(target) => Term::Tail(self.read_back_neutral_rc(target)),
			N::IndVecBoth { len, target, motive, base, step } => Term::IndVec {
				len: self.read_back_neutral_rc(len),
				target: self.read_back_neutral_rc(target),
				motive: self.read_back_normal_rc(motive),
				base: self.read_back_normal_rc(base),
				step: self.read_back_normal_rc(step),
			},
			N::IndVecTarget { len, target, motive, base, step } => Term::IndVec {
				len: self.read_back_normal_rc(len),
				target: self.read_back_neutral_rc(target),
				motive: self.read_back_normal_rc(motive),
				base: self.read_back_normal_rc(base),
				step: self.read_back_normal_rc(step),
			},

			// Sums.
			N::IndEither { target, motive, left, right } => Term::IndEither {
				target: self.read_back_neutral_rc(target),
				motive: self.read_back_normal_rc(motive),
				left: self.read_back_normal_rc(left),
				right: self.read_back_normal_rc(right),
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		common::name,
		frontend::{context::Renaming, conversion::alpha_equivalent, parse::parse_expression},
		ir::{semantics::Closure, source::lex},
	};

	#[test]
	fn test_functions_are_eta_expanded() {
		let context = Context::empty().bind_free(name("f"), Value::arrow(Value::Nat, Value::Nat)).unwrap();
		let ty = Value::arrow(Value::Nat, Value::Nat);
		let term = context.read_back(&ty, &context.evaluate(&Term::Variable(name("f"))));
		let expected = Term::Lambda(bind(
			name("x"),
			rc!(Term::Apply { callee: rc!(Term::Variable(name("f"))), argument: rc!(Term::Variable(name("x"))) }),
		));
		assert!(alpha_equivalent(&term, &expected));
	}

	#[test]
	fn test_trivial_reads_back_as_sole() {
		let context = Context::empty().bind_free(name("t"), Value::Trivial).unwrap();
		let term = context.read_back(&Value::Trivial, &context.evaluate(&Term::Variable(name("t"))));
		assert!(matches!(term, Term::Sole));
	}

	#[test]
	fn test_pairs_are_eta_expanded() {
		let ty = Value::Sigma { base: rc!(Value::Atom), family: rc!(Closure::native("a", |_| Value::Atom)) };
		let context = Context::empty().bind_free(name("p"), ty.clone()).unwrap();
		let term = context.read_back(&ty, &context.evaluate(&Term::Variable(name("p"))));
		let Term::Cons(car, cdr) = term else { panic!() };
		assert!(matches!(car.as_ref(), Term::Car(_)));
		assert!(matches!(cdr.as_ref(), Term::Cdr(_)));
	}

	#[test]
	fn test_neutral_absurd_is_annotated() {
		let context = Context::empty().bind_free(name("nope"), Value::Absurd).unwrap();
		let term = context.read_back(&Value::Absurd, &context.evaluate(&Term::Variable(name("nope"))));
		assert!(matches!(term, Term::The { .. }));
	}

	#[test]
	fn test_read_back_is_idempotent() {
		let context = Context::empty()
			.bind_free(name("n"), Value::Nat)
			.unwrap()
			.bind_free(name("f"), Value::arrow(Value::Nat, Value::Nat))
			.unwrap();
		let sources = [
			"(the (-> Nat Nat) (lambda (y) (add1 y)))",
			"(f (add1 n))",
			"(the (Sigma ((k Nat)) (Vec Atom k)) (cons 1 (vec:: 'a vecnil)))",
			"(the (= Nat n n) (same n))",
			"(the (-> (Pair Nat Nat) (Pair Nat Nat)) (lambda (p) p))",
			"(rec-Nat n 0 (lambda (k almost) (f almost)))",
		];
		for source in sources {
			let expr = parse_expression(&lex(source).unwrap()).unwrap();
			let (ty, term) = context.synthesize(&Renaming::empty(), &expr).unwrap();
			let ty = context.evaluate(&ty);
			let once = context.read_back(&ty, &context.evaluate(&term));
			let twice = context.read_back(&ty, &context.evaluate(&once));
			assert!(alpha_equivalent(&once, &twice), "{source}: {once} then {twice}");
		}
	}
}
