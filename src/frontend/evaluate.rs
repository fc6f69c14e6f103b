use std::rc::Rc;

use crate::{
	common::Binder,
	ir::{
		semantics::{Closure, Delay, DelayState, Environment, Neutral, Normal, Value},
		syntax::Term,
	},
	utility::rc,
};

pub trait Evaluate {
	type Value;
	/// Transforms a core term into a value.
	fn evaluate(&self) -> Self::Value { self.evaluate_in(&Environment::empty()) }

	fn evaluate_in(&self, environment: &Environment) -> Self::Value;
}

pub trait EvaluateWith {
	/// Instantiates a closure with an argument.
	fn evaluate_with(&self, argument: Value) -> Value;
}

impl Evaluate for Binder<Rc<Term>> {
	type Value = Closure;
	fn evaluate_in(&self, environment: &Environment) -> Self::Value {
		Closure::Syntax { environment: environment.clone(), parameter: self.parameter.clone(), body: self.body.clone() }
	}
}

impl EvaluateWith for Closure {
	fn evaluate_with(&self, argument: Value) -> Value {
		match self {
			Closure::Syntax { environment, parameter, body } =>
				body.evaluate_in(&environment.extend(parameter.clone(), argument)),
			Closure::Native { function, .. } => function(argument),
		}
	}
}

/// Defers evaluation of a sub-term until it is forced.
fn later(environment: &Environment, term: &Rc<Term>) -> Value {
	match term.as_ref() {
		Term::Variable(_)
		| Term::Universe
		| Term::Nat
		| Term::Zero
		| Term::Atom
		| Term::Quote(_)
		| Term::Trivial
		| Term::Sole
		| Term::ListNil
		| Term::Absurd
		| Term::VecNil => term.evaluate_in(environment),
		_ => Value::Delay(rc!(Delay::new(environment.clone(), term.clone()))),
	}
}

impl Evaluate for Term {
	type Value = Value;
	fn evaluate_in(&self, environment: &Environment) -> Self::Value {
		use Term as T;
		match self {
			// Variables.
			T::Variable(name) => match environment.lookup(name) {
				Some(value) => value.clone(),
				None => panic!("unbound variable `{name}` during evaluation"),
			},

			// Annotations.
			T::The { term, .. } => term.evaluate_in(environment),

			// Holes.
			T::Todo { range, ty } => {
				let ty = ty.evaluate_in(environment);
				Value::neutral(ty.clone(), Neutral::Todo { range: *range, ty })
			}

			// Types.
			T::Universe => Value::Universe,

			// Natural numbers.
			T::Nat => Value::Nat,
			T::Zero => Value::Zero,
			T::Add1(prev) => Value::Add1(rc!(later(environment, prev))),
			T::WhichNat { target, base_ty, base, step } => target.evaluate_in(environment).which_nat(
				base_ty.evaluate_in(environment),
				base.evaluate_in(environment),
				step.evaluate_in(environment),
			),
			T::IterNat { target, base_ty, base, step } => target.evaluate_in(environment).iter_nat(
				base_ty.evaluate_in(environment),
				base.evaluate_in(environment),
				step.evaluate_in(environment),
			),
			T::RecNat { target, base_ty, base, step } => target.evaluate_in(environment).rec_nat(
				base_ty.evaluate_in(environment),
				base.evaluate_in(environment),
				step.evaluate_in(environment),
			),
			T::IndNat { target, motive, base, step } => target.evaluate_in(environment).ind_nat(
				motive.evaluate_in(environment),
				base.evaluate_in(environment),
				step.evaluate_in(environment),
			),

			// Dependent functions.
			T::Pi { base, family } =>
				Value::Pi { base: rc!(base.evaluate_in(environment)), family: rc!(family.evaluate_in(environment)) },
			T::Lambda(body) => Value::Lambda(rc!(body.evaluate_in(environment))),
			T::Apply { callee, argument } => callee.evaluate_in(environment).apply(later(environment, argument)),

			// Dependent pairs.
			T::Sigma { base, family } =>
				Value::Sigma { base: rc!(base.evaluate_in(environment)), family: rc!(family.evaluate_in(environment)) },
			T::Cons(car, cdr) => Value::Cons(rc!(later(environment, car)), rc!(later(environment, cdr))),
			T::Car(pair) => pair.evaluate_in(environment).car(),
			T::Cdr(pair) => pair.evaluate_in(environment).cdr(),

			// Atoms.
			T::Atom => Value::Atom,
			T::Quote(symbol) => Value::Quote(symbol.clone()),

			// Unit.
			T::Trivial => Value::Trivial,
			T::Sole => Value::Sole,

			// Lists.
			T::List(ty) => Value::List(rc!(ty.evaluate_in(environment))),
			T::ListNil => Value::ListNil,
			T::ListCons(head, tail) =>
				Value::ListCons(rc!(later(environment, head)), rc!(later(environment, tail))),
			T::RecList { target, base_ty, base, step } => target.evaluate_in(environment).rec_list(
				base_ty.evaluate_in(environment),
				base.evaluate_in(environment),
				step.evaluate_in(environment),
			),
			T::IndList { target, motive, base, step } => target.evaluate_in(environment).ind_list(
				motive.evaluate_in(environment),
				base.evaluate_in(environment),
				step.evaluate_in(environment),
			),

			// Empty type.
			T::Absurd => Value::Absurd,
			T::IndAbsurd { target, motive } =>
				target.evaluate_in(environment).ind_absurd(motive.evaluate_in(environment)),

			// Equality.
			T::Equal { ty, from, to } => Value::Equal {
				ty: rc!(ty.evaluate_in(environment)),
				from: rc!(later(environment, from)),
				to: rc!(later(environment, to)),
			},
			T::Same(witness) => Value::Same(rc!(later(environment, witness))),
			T::Replace { target, motive, base } => target
				.evaluate_in(environment)
				.replace(motive.evaluate_in(environment), base.evaluate_in(environment)),
			T::Trans(left, right) => left.evaluate_in(environment).trans(right.evaluate_in(environment)),
			T::Cong { target, ty, function } => target
				.evaluate_in(environment)
				.cong(ty.evaluate_in(environment), function.evaluate_in(environment)),
			T::Symm(target) => target.evaluate_in(environment).symm(),
			T::IndEqual { target, motive, base } => target
				.evaluate_in(environment)
				.ind_equal(motive.evaluate_in(environment), base.evaluate_in(environment)),

			// Vectors.
			T::Vec { ty, len } =>
				Value::Vec { ty: rc!(ty.evaluate_in(environment)), len: rc!(later(environment, len)) },
			T::VecNil => Value::VecNil,
			T::VecCons(head, tail) => Value::VecCons(rc!(later(environment, head)), rc!(later(environment, tail))),
			T::Head(target) => target.evaluate_in(environment).head(),
			T::Tail(target) => target.evaluate_in(environment).tail(),
			T::IndVec { len, target, motive, base, step } => len.evaluate_in(environment).ind_vec(
				target.evaluate_in(environment),
				motive.evaluate_in(environment),
				base.evaluate_in(environment),
				step.evaluate_in(environment),
			),

			// Sums.
			T::Either(left, right) =>
				Value::Either(rc!(left.evaluate_in(environment)), rc!(right.evaluate_in(environment))),
			T::Left(value) => Value::Left(rc!(later(environment, value))),
			T::Right(value) => Value::Right(rc!(later(environment, value))),
			T::IndEither { target, motive, left, right } => target.evaluate_in(environment).ind_either(
				motive.evaluate_in(environment),
				left.evaluate_in(environment),
				right.evaluate_in(environment),
			),
		}
	}
}

impl Delay {
	/// Computes the suspended value on the first call and returns the cached value afterwards.
	pub fn force(&self) -> Value {
		let state = std::mem::replace(&mut *self.0.borrow_mut(), DelayState::Forcing);
		let value = match state {
			DelayState::Forced(value) => value,
			DelayState::Pending(environment, term) => term.evaluate_in(&environment).force(),
			DelayState::Forcing => panic!("delay cell re-entered while being forced"),
		};
		*self.0.borrow_mut() = DelayState::Forced(value.clone());
		value
	}
}

// Eliminators. Each has a canonical case and a neutral case; any other target shape is ill-typed.
impl Value {
	/// Resolves the outermost delay cells, yielding a canonical or neutral value.
	pub fn force(&self) -> Self {
		match self {
			Self::Delay(delay) => delay.force(),
			value => value.clone(),
		}
	}

	fn stuck(&self) -> Option<(Self, Rc<Neutral>)> {
		match self {
			Self::Neutral { ty, neutral } => Some((ty.force(), neutral.clone())),
			_ => None,
		}
	}

	pub fn apply(&self, argument: Self) -> Self {
		match self.force() {
			Self::Lambda(closure) => closure.evaluate_with(argument),
			target => match target.stuck() {
				Some((Self::Pi { base, family }, callee)) => Self::neutral(
					family.evaluate_with(argument.clone()),
					Neutral::Apply { callee, argument: Normal::new(base.into(), argument) },
				),
				_ => unreachable!("applied a non-function"),
			},
		}
	}

	pub fn which_nat(&self, base_ty: Self, base: Self, step: Self) -> Self {
		match self.force() {
			Self::Zero => base,
			Self::Add1(prev) => step.apply(prev.into()),
			target => {
				let Some((_, target)) = target.stuck() else { unreachable!("which-Nat on a non-number") };
				Self::neutral(
					base_ty.clone(),
					Neutral::WhichNat {
						target,
						base: Normal::new(base_ty.clone(), base),
						step: Normal::new(Self::arrow(Self::Nat, base_ty), step),
					},
				)
			}
		}
	}

	pub fn iter_nat(&self, base_ty: Self, base: Self, step: Self) -> Self {
		match self.force() {
			Self::Zero => base,
			Self::Add1(prev) => step.apply(prev.iter_nat(base_ty, base, step.clone())),
			target => {
				let Some((_, target)) = target.stuck() else { unreachable!("iter-Nat on a non-number") };
				Self::neutral(
					base_ty.clone(),
					Neutral::IterNat {
						target,
						base: Normal::new(base_ty.clone(), base),
						step: Normal::new(Self::arrow(base_ty.clone(), base_ty), step),
					},
				)
			}
		}
	}

	pub fn rec_nat(&self, base_ty: Self, base: Self, step: Self) -> Self {
		match self.force() {
			Self::Zero => base,
			Self::Add1(prev) => {
				let almost = prev.rec_nat(base_ty, base, step.clone());
				step.apply(prev.into()).apply(almost)
			}
			target => {
				let Some((_, target)) = target.stuck() else { unreachable!("rec-Nat on a non-number") };
				let step_ty = Self::rec_nat_step_type(base_ty.clone());
				Self::neutral(
					base_ty.clone(),
					Neutral::RecNat { target, base: Normal::new(base_ty, base), step: Normal::new(step_ty, step) },
				)
			}
		}
	}

	/// `(Π ((n-1 Nat)) (→ B B))`
	pub fn rec_nat_step_type(base_ty: Self) -> Self {
		Self::pi("n-1", Self::Nat, move |_| Self::arrow(base_ty.clone(), base_ty.clone()))
	}

	pub fn ind_nat(&self, motive: Self, base: Self, step: Self) -> Self {
		match self.force() {
			Self::Zero => base,
			Self::Add1(prev) => {
				let almost = prev.ind_nat(motive, base, step.clone());
				step.apply(prev.into()).apply(almost)
			}
			target => {
				let Some((_, neutral)) = target.stuck() else { unreachable!("ind-Nat on a non-number") };
				Self::neutral(
					motive.apply(target),
					Neutral::IndNat {
						target: neutral,
						motive: Normal::new(Self::arrow(Self::Nat, Self::Universe), motive.clone()),
						base: Normal::new(motive.apply(Self::Zero), base),
						step: Normal::new(Self::ind_nat_step_type(motive), step),
					},
				)
			}
		}
	}

	/// `(Π ((n-1 Nat)) (→ (motive n-1) (motive (add1 n-1))))`
	pub fn ind_nat_step_type(motive: Self) -> Self {
		Self::pi("n-1", Self::Nat, move |prev| {
			Self::arrow(motive.apply(prev.clone()), motive.apply(Self::Add1(rc!(prev))))
		})
	}

	pub fn car(&self) -> Self {
		match self.force() {
			Self::Cons(car, _) => car.into(),
			target => match target.stuck() {
				Some((Self::Sigma { base, .. }, pair)) => Self::neutral(base.into(), Neutral::Car(pair)),
				_ => unreachable!("car of a non-pair"),
			},
		}
	}

	pub fn cdr(&self) -> Self {
		match self.force() {
			Self::Cons(_, cdr) => cdr.into(),
			target => match target.stuck() {
				Some((Self::Sigma { family, .. }, pair)) =>
					Self::neutral(family.evaluate_with(target.car()), Neutral::Cdr(pair)),
				_ => unreachable!("cdr of a non-pair"),
			},
		}
	}

	pub fn rec_list(&self, base_ty: Self, base: Self, step: Self) -> Self {
		match self.force() {
			Self::ListNil => base,
			Self::ListCons(head, tail) => {
				let almost = tail.rec_list(base_ty, base, step.clone());
				step.apply(head.into()).apply(tail.into()).apply(almost)
			}
			target => match target.stuck() {
				Some((Self::List(element), neutral)) => {
					let step_ty = Self::rec_list_step_type(element.into(), base_ty.clone());
					Self::neutral(
						base_ty.clone(),
						Neutral::RecList {
							target: neutral,
							base: Normal::new(base_ty, base),
							step: Normal::new(step_ty, step),
						},
					)
				}
				_ => unreachable!("rec-List on a non-list"),
			},
		}
	}

	/// `(Π ((e E) (es (List E))) (→ B B))`
	pub fn rec_list_step_type(element: Self, base_ty: Self) -> Self {
		let list = Self::List(rc!(element.clone()));
		Self::pi("e", element, move |_| {
			let base_ty = base_ty.clone();
			Self::pi("es", list.clone(), move |_| Self::arrow(base_ty.clone(), base_ty.clone()))
		})
	}

	pub fn ind_list(&self, motive: Self, base: Self, step: Self) -> Self {
		match self.force() {
			Self::ListNil => base,
			Self::ListCons(head, tail) => {
				let almost = tail.ind_list(motive, base, step.clone());
				step.apply(head.into()).apply(tail.into()).apply(almost)
			}
			target => match target.stuck() {
				Some((Self::List(element), neutral)) => Self::neutral(
					motive.apply(target.clone()),
					Neutral::IndList {
						target: neutral,
						motive: Normal::new(Self::arrow(Self::List(element.clone()), Self::Universe), motive.clone()),
						base: Normal::new(motive.apply(Self::ListNil), base),
						step: Normal::new(Self::ind_list_step_type(element.into(), motive), step),
					},
				),
				_ => unreachable!("ind-List on a non-list"),
			},
		}
	}

	/// `(Π ((e E) (es (List E))) (→ (motive es) (motive (:: e es))))`
	pub fn ind_list_step_type(element: Self, motive: Self) -> Self {
		let list = Self::List(rc!(element.clone()));
		Self::pi("e", element, move |head| {
			let motive = motive.clone();
			Self::pi("es", list.clone(), move |tail| {
				Self::arrow(motive.apply(tail.clone()), motive.apply(Self::ListCons(rc!(head.clone()), rc!(tail))))
			})
		})
	}

	pub fn ind_absurd(&self, motive: Self) -> Self {
		let Some((_, target)) = self.force().stuck() else { unreachable!("ind-Absurd on a canonical value") };
		Self::neutral(motive.clone(), Neutral::IndAbsurd { target, motive: Normal::new(Self::Universe, motive) })
	}

	pub fn replace(&self, motive: Self, base: Self) -> Self {
		match self.force() {
			Self::Same(_) => base,
			target => match target.stuck() {
				Some((Self::Equal { ty, from, to }, neutral)) => Self::neutral(
					motive.apply(to.into()),
					Neutral::Replace {
						target: neutral,
						motive: Normal::new(Self::arrow(ty.into(), Self::Universe), motive.clone()),
						base: Normal::new(motive.apply(from.into()), base),
					},
				),
				_ => unreachable!("replace on a non-equality"),
			},
		}
	}

	pub fn trans(&self, other: Self) -> Self {
		match (self.force(), other.force()) {
			(Self::Same(value), Self::Same(_)) => Self::Same(value),
			(Self::Same(from), right) => match right.stuck() {
				Some((Self::Equal { ty, to, .. }, right)) => Self::neutral(
					Self::Equal { ty: ty.clone(), from: from.clone(), to },
					Neutral::TransRight {
						left: Normal::new(
							Self::Equal { ty, from: from.clone(), to: from.clone() },
							Self::Same(from),
						),
						right,
					},
				),
				_ => unreachable!("trans on a non-equality"),
			},
			(left, Self::Same(to)) => match left.stuck() {
				Some((Self::Equal { ty, from, .. }, left)) => Self::neutral(
					Self::Equal { ty: ty.clone(), from, to: to.clone() },
					Neutral::TransLeft {
						left,
						right: Normal::new(Self::Equal { ty, from: to.clone(), to: to.clone() }, Self::Same(to)),
					},
				),
				_ => unreachable!("trans on a non-equality"),
			},
			(left, right) => match (left.stuck(), right.stuck()) {
				(Some((Self::Equal { ty, from, .. }, left)), Some((Self::Equal { to, .. }, right))) =>
					Self::neutral(Self::Equal { ty, from, to }, Neutral::TransBoth { left, right }),
				_ => unreachable!("trans on a non-equality"),
			},
		}
	}

	pub fn cong(&self, ty: Self, function: Self) -> Self {
		match self.force() {
			Self::Same(value) => Self::Same(rc!(function.apply(value.into()))),
			target => match target.stuck() {
				Some((Self::Equal { ty: space, from, to }, neutral)) => Self::neutral(
					Self::equal(ty.clone(), function.apply(from.into()), function.apply(to.into())),
					Neutral::Cong {
						target: neutral,
						ty: ty.clone(),
						function: Normal::new(Self::arrow(space.into(), ty), function),
					},
				),
				_ => unreachable!("cong on a non-equality"),
			},
		}
	}

	pub fn symm(&self) -> Self {
		match self.force() {
			Self::Same(value) => Self::Same(value),
			target => match target.stuck() {
				Some((Self::Equal { ty, from, to }, neutral)) =>
					Self::neutral(Self::Equal { ty, from: to, to: from }, Neutral::Symm(neutral)),
				_ => unreachable!("symm on a non-equality"),
			},
		}
	}

	pub fn ind_equal(&self, motive: Self, base: Self) -> Self {
		match self.force() {
			Self::Same(_) => base,
			target => match target.stuck() {
				Some((Self::Equal { ty, from, to }, neutral)) => Self::neutral(
					motive.apply(to.into()).apply(target.clone()),
					Neutral::IndEqual {
						target: neutral,
						motive: Normal::new(
							Self::ind_equal_motive_type(ty.into(), from.as_ref().clone()),
							motive.clone(),
						),
						base: Normal::new(motive.apply(from.as_ref().clone()).apply(Self::Same(from)), base),
					},
				),
				_ => unreachable!("ind-= on a non-equality"),
			},
		}
	}

	/// `(Π ((to A)) (→ (= A from to) U))`
	pub fn ind_equal_motive_type(ty: Self, from: Self) -> Self {
		let space = ty.clone();
		Self::pi("to", ty, move |to| Self::arrow(Self::equal(space.clone(), from.clone(), to), Self::Universe))
	}

	pub fn head(&self) -> Self {
		match self.force() {
			Self::VecCons(head, _) => head.into(),
			target => match target.stuck() {
				Some((Self::Vec { ty, .. }, neutral)) => Self::neutral(ty.into(), Neutral::Head(neutral)),
				_ => unreachable!("head of a non-vector"),
			},
		}
	}

	pub fn tail(&self) -> Self {
		match self.force() {
			Self::VecCons(_, tail) => tail.into(),
			target => match target.stuck() {
				Some((Self::Vec { ty, len }, neutral)) => match len.force() {
					Self::Add1(prev) => Self::neutral(Self::Vec { ty, len: prev }, Neutral::Tail(neutral)),
					_ => unreachable!("tail of a vector with no known successor length"),
				},
				_ => unreachable!("tail of a non-vector"),
			},
		}
	}

	/// Vector induction, eliminating `target` whose length is `self`.
	pub fn ind_vec(&self, target: Self, motive: Self, base: Self, step: Self) -> Self {
		match (self.force(), target.force()) {
			(Self::Zero, Self::VecNil) => base,
			(Self::Add1(prev), Self::VecCons(head, tail)) => {
				let almost = prev.ind_vec(tail.as_ref().clone(), motive, base, step.clone());
				step.apply(prev.into()).apply(head.into()).apply(tail.into()).apply(almost)
			}
			(len, target) => match target.stuck() {
				Some((Self::Vec { ty: element, len: target_len }, neutral)) => {
					let ty = motive.apply(len.clone()).apply(target.clone());
					let motive_normal =
						Normal::new(Self::ind_vec_motive_type(element.as_ref().clone()), motive.clone());
					let base = Normal::new(motive.apply(Self::Zero).apply(Self::VecNil), base);
					let step = Normal::new(Self::ind_vec_step_type(element.into(), motive), step);
					match len.stuck() {
						Some((_, len_neutral)) if target_len.is_structurally_same_nat(&len) => Self::neutral(
							ty,
							Neutral::IndVecBoth { len: len_neutral, target: neutral, motive: motive_normal, base, step },
						),
						_ => Self::neutral(
							ty,
							Neutral::IndVecTarget {
								len: Normal::new(Self::Nat, len),
								target: neutral,
								motive: motive_normal,
								base,
								step,
							},
						),
					}
				}
				_ => unreachable!("ind-Vec on a non-vector"),
			},
		}
	}

	/// `(Π ((k Nat)) (→ (Vec E k) U))`
	pub fn ind_vec_motive_type(element: Self) -> Self {
		Self::pi("k", Self::Nat, move |len| Self::arrow(Self::vec(element.clone(), len), Self::Universe))
	}

	/// `(Π ((k Nat) (h E) (t (Vec E k))) (→ (motive k t) (motive (add1 k) (vec:: h t))))`
	pub fn ind_vec_step_type(element: Self, motive: Self) -> Self {
		Self::pi("k", Self::Nat, move |len| {
			let (element, motive) = (element.clone(), motive.clone());
			let tail_ty = Self::vec(element.clone(), len.clone());
			Self::pi("h", element, move |head| {
				let (len, motive) = (len.clone(), motive.clone());
				Self::pi("t", tail_ty.clone(), move |tail| {
					Self::arrow(
						motive.apply(len.clone()).apply(tail.clone()),
						motive
							.apply(Self::Add1(rc!(len.clone())))
							.apply(Self::VecCons(rc!(head.clone()), rc!(tail))),
					)
				})
			})
		})
	}

	/// Compares two natural numbers by shape, treating neutrals as equal only when they are the same variable.
	pub fn is_structurally_same_nat(&self, other: &Self) -> bool {
		match (self.force(), other.force()) {
			(Self::Zero, Self::Zero) => true,
			(Self::Add1(a), Self::Add1(b)) => a.is_structurally_same_nat(&b),
			(Self::Neutral { neutral: a, .. }, Self::Neutral { neutral: b, .. }) => match (a.as_ref(), b.as_ref()) {
				(Neutral::Variable(a), Neutral::Variable(b)) => a == b,
				_ => Rc::ptr_eq(&a, &b),
			},
			_ => false,
		}
	}

	pub fn ind_either(&self, motive: Self, left: Self, right: Self) -> Self {
		match self.force() {
			Self::Left(value) => left.apply(value.into()),
			Self::Right(value) => right.apply(value.into()),
			target => match target.stuck() {
				Some((Self::Either(left_ty, right_ty), neutral)) => Self::neutral(
					motive.apply(target.clone()),
					Neutral::IndEither {
						target: neutral,
						motive: Normal::new(
							Self::arrow(Self::Either(left_ty.clone(), right_ty.clone()), Self::Universe),
							motive.clone(),
						),
						left: Normal::new(Self::ind_either_case_type(left_ty.into(), motive.clone(), Self::Left), left),
						right: Normal::new(Self::ind_either_case_type(right_ty.into(), motive, Self::Right), right),
					},
				),
				_ => unreachable!("ind-Either on a non-sum"),
			},
		}
	}

	/// `(Π ((x side)) (motive (inject x)))`
	pub fn ind_either_case_type(side: Self, motive: Self, inject: fn(Rc<Self>) -> Self) -> Self {
		Self::pi("x", side, move |value| motive.apply(inject(rc!(value))))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::common::name;

	fn numeral(value: &Value) -> Option<u64> {
		match value.force() {
			Value::Zero => Some(0),
			Value::Add1(prev) => numeral(&prev).map(|n| n + 1),
			_ => None,
		}
	}

	fn plus() -> Term {
		// λ (n) λ (m) iter-Nat n m (λ (k) (add1 k))
		let n = Term::Variable(name("n"));
		let m = Term::Variable(name("m"));
		let k = Term::Variable(name("k"));
		Term::Lambda(crate::common::bind(
			name("n"),
			rc!(Term::Lambda(crate::common::bind(
				name("m"),
				rc!(Term::IterNat {
					target: n.into(),
					base_ty: Term::Nat.into(),
					base: m.into(),
					step: Term::Lambda(crate::common::bind(name("k"), rc!(Term::Add1(k.into())))).into(),
				}),
			))),
		))
	}

	#[test]
	fn test_iter_nat_adds() {
		let sum = plus().evaluate().apply(Term::number(2).evaluate()).apply(Term::number(3).evaluate());
		assert_eq!(numeral(&sum), Some(5));
	}

	#[test]
	fn test_which_nat_on_zero_returns_base() {
		let term = Term::WhichNat {
			target: Term::Zero.into(),
			base_ty: Term::Nat.into(),
			base: Term::number(2).into(),
			step: Term::Lambda(crate::common::bind(name("x"), rc!(Term::Variable(name("x"))))).into(),
		};
		assert_eq!(numeral(&term.evaluate()), Some(2));
	}

	#[test]
	fn test_delay_is_forced_once() {
		let delay = rc!(Delay::new(Environment::empty(), rc!(Term::Add1(rc!(Term::Zero)))));
		let value = Value::Delay(delay.clone());
		assert!(!delay.is_forced());
		assert_eq!(numeral(&value), Some(1));
		assert!(delay.is_forced());
		assert_eq!(numeral(&value), Some(1));
	}

	#[test]
	fn test_neutral_application_carries_result_type() {
		let ty = Value::arrow(Value::Nat, Value::Atom);
		let function = Value::variable(name("f"), ty);
		let Value::Neutral { ty, neutral } = function.apply(Value::Zero) else { panic!() };
		assert!(matches!(ty.force(), Value::Atom));
		assert!(matches!(neutral.as_ref(), Neutral::Apply { .. }));
	}

	#[test]
	fn test_trans_of_same_is_same() {
		let same = Value::Same(rc!(Value::Zero));
		assert!(matches!(same.trans(same.clone()).force(), Value::Same(_)));
	}

	#[test]
	fn test_trans_with_one_stuck_side() {
		let proof = Value::variable(name("p"), Value::equal(Value::Nat, Value::Zero, Value::Zero));
		let same = Value::Same(rc!(Value::Zero));
		let Value::Neutral { neutral, .. } = proof.trans(same.clone()) else { panic!() };
		assert!(matches!(neutral.as_ref(), Neutral::TransLeft { .. }));
		let Value::Neutral { neutral, .. } = same.trans(proof) else { panic!() };
		assert!(matches!(neutral.as_ref(), Neutral::TransRight { .. }));
	}

	/// `(λ (k t) Nat)`
	fn constant_vec_motive() -> Value {
		Value::Lambda(rc!(Closure::native("k", |_| Value::Lambda(rc!(Closure::native("t", |_| Value::Nat))))))
	}

	#[test]
	fn test_ind_vec_on_stuck_length_and_target() {
		let len = Value::variable(name("n"), Value::Nat);
		let target = Value::variable(name("v"), Value::vec(Value::Atom, len.clone()));
		let result = len.ind_vec(target, constant_vec_motive(), Value::Zero, Value::Zero);
		let Value::Neutral { neutral, .. } = result else { panic!() };
		assert!(matches!(neutral.as_ref(), Neutral::IndVecBoth { .. }));
	}

	#[test]
	fn test_ind_vec_on_known_length_and_stuck_target() {
		let len = Value::Add1(rc!(Value::variable(name("n"), Value::Nat)));
		let target = Value::variable(name("v"), Value::vec(Value::Atom, len.clone()));
		let result = len.ind_vec(target, constant_vec_motive(), Value::Zero, Value::Zero);
		let Value::Neutral { ty, neutral } = result else { panic!() };
		assert!(matches!(ty.force(), Value::Nat));
		assert!(matches!(neutral.as_ref(), Neutral::IndVecTarget { .. }));
	}
}
