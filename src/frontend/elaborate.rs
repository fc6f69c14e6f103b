use std::{rc::Rc, slice};

use crate::{
	common::{bind, name, Binder, Name, Range},
	frontend::{
		context::{Binding, Context, Renaming},
		evaluate::EvaluateWith as _,
	},
	ir::{
		presyntax::{Expression, Parameter, ParsedName, Preterm},
		semantics::Value,
		syntax::Term,
	},
	utility::rc,
};

#[derive(Debug, Clone)]
pub struct ElaborationError {
	pub range: Range,
	pub kind: ElaborationErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedFormer {
	Pi,
	Arrow,
	Sigma,
	List,
	Equal,
	Vec,
	Either,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedLength {
	Zero,
	Successor,
}

#[derive(Debug, Clone)]
pub enum ElaborationErrorKind {
	NotInScope(Name),
	NotYetDefined(Name),
	TypeMismatch { expected: Term, found: Term },
	NotTheSame { ty: Term, left: Term, right: Term },
	ExpectedFormer { expected: ExpectedFormer, found: Term },
	NameCollision(Name),
	NotClaimed(Name),
	AlreadyDefined(Name),
	CouldNotSynthesize,
	UniverseHasNoType,
	InvalidAtom(Name),
	VecLength { expected: ExpectedLength, found: Term },
	TacticInapplicable { goal: Term },
	NoProofInProgress,
	ProofIncomplete { goal: Term },
	CouldNotInferMotive,
}

impl ElaborationErrorKind {
	pub fn at(self, range: Range) -> ElaborationError { ElaborationError { range, kind: self } }
}

/// An elaborated term together with the value of its type.
#[derive(Debug, Clone)]
pub struct Annotated {
	pub ty: Value,
	pub term: Term,
}

impl Term {
	fn annotate(self, ty: Value) -> Annotated { Annotated { ty, term: self } }
}

/// Whether the components of a type former must themselves be in `U`.
#[derive(Clone, Copy)]
enum Size {
	Small,
	Large,
}

/// Symbols are non-empty and made of letters and dashes.
fn is_atom(symbol: &str) -> bool { !symbol.is_empty() && symbol.chars().all(|c| c.is_alphabetic() || c == '-') }

impl Context {
	/// Synthesizes the type of an expression, returning the type and the elaborated term.
	pub fn synthesize(&self, renaming: &Renaming, expr: &Expression) -> Result<(Term, Term), ElaborationError> {
		let Annotated { ty, term } = self.infer(renaming, expr)?;
		Ok((self.read_back_type(&ty), term))
	}

	/// Elaborates an expression that must be a type, including `U` and types over `U`.
	pub fn elaborate_type(&self, renaming: &Renaming, expr: &Expression) -> Result<Term, ElaborationError> {
		match &expr.preterm {
			Preterm::Universe => Ok(Term::Universe),
			_ => match self.elaborate_former(renaming, expr, Size::Large)? {
				Some(term) => Ok(term),
				None => self.check(renaming, expr, &Value::Universe),
			},
		}
	}

	pub(crate) fn expected_former(&self, expected: ExpectedFormer, found: &Value) -> ElaborationErrorKind {
		ElaborationErrorKind::ExpectedFormer { expected, found: self.read_back_type(found) }
	}

	fn component(&self, renaming: &Renaming, expr: &Expression, size: Size) -> Result<Term, ElaborationError> {
		match size {
			Size::Small => self.check(renaming, expr, &Value::Universe),
			Size::Large => self.elaborate_type(renaming, expr),
		}
	}

	/// Elaborates a type former, or returns `None` if the expression is not one.
	fn elaborate_former(
		&self,
		renaming: &Renaming,
		expr: &Expression,
		size: Size,
	) -> Result<Option<Term>, ElaborationError> {
		use Preterm as P;
		let pi = |base, family| Term::Pi { base, family };
		let sigma = |base, family| Term::Sigma { base, family };
		Ok(Some(match &expr.preterm {
			P::Nat => Term::Nat,
			P::Atom => Term::Atom,
			P::Trivial => Term::Trivial,
			P::Absurd => Term::Absurd,
			P::Arrow { domains, codomain } => self.elaborate_arrow(renaming, domains, codomain, size, pi)?,
			P::Pi { parameters, family } => self.elaborate_telescope(renaming, parameters, family, size, pi)?,
			P::Sigma { parameters, family } => self.elaborate_telescope(renaming, parameters, family, size, sigma)?,
			P::Pair(base, family) => self.elaborate_arrow(renaming, slice::from_ref(&**base), family, size, sigma)?,
			P::List(element) => Term::List(rc!(self.component(renaming, element, size)?)),
			P::Vec { ty, len } => {
				let ty = self.component(renaming, ty, size)?;
				let len = self.check(renaming, len, &Value::Nat)?;
				Term::Vec { ty: rc!(ty), len: rc!(len) }
			}
			P::Either(left, right) => Term::Either(
				rc!(self.component(renaming, left, size)?),
				rc!(self.component(renaming, right, size)?),
			),
			P::Equal { ty, from, to } => {
				let ty = self.component(renaming, ty, size)?;
				let ty_value = self.evaluate(&ty);
				let from = self.check(renaming, from, &ty_value)?;
				let to = self.check(renaming, to, &ty_value)?;
				Term::Equal { ty: rc!(ty), from: rc!(from), to: rc!(to) }
			}
			_ => return Ok(None),
		}))
	}

	/// Desugars `(→ A B ... C)` into nested single binders whose names avoid everything written later.
	fn elaborate_arrow(
		&self,
		renaming: &Renaming,
		domains: &[Expression],
		codomain: &Expression,
		size: Size,
		former: fn(Rc<Term>, Binder<Rc<Term>>) -> Term,
	) -> Result<Term, ElaborationError> {
		let Some((first, rest)) = domains.split_first() else { return self.component(renaming, codomain, size) };
		let base = self.component(renaming, first, size)?;
		let parameter = self.fresh_binder(rest.iter().chain([codomain]), &name("x"));
		let family = self
			.assume(parameter.clone(), self.evaluate(&base))
			.elaborate_arrow(renaming, rest, codomain, size, former)?;
		Ok(former(rc!(base), bind(parameter, family)))
	}

	fn elaborate_telescope(
		&self,
		renaming: &Renaming,
		parameters: &[Parameter],
		family: &Expression,
		size: Size,
		former: fn(Rc<Term>, Binder<Rc<Term>>) -> Term,
	) -> Result<Term, ElaborationError> {
		let Some((first, rest)) = parameters.split_first() else { return self.component(renaming, family, size) };
		let base = self.component(renaming, &first.ty, size)?;
		let parameter = self.fresh(&first.name.name);
		let body = self.assume(parameter.clone(), self.evaluate(&base)).elaborate_telescope(
			&renaming.extend(first.name.name.clone(), parameter.clone()),
			rest,
			family,
			size,
			former,
		)?;
		Ok(former(rc!(base), bind(parameter, body)))
	}

	fn check_lambda(
		&self,
		renaming: &Renaming,
		parameters: &[ParsedName],
		body: &Expression,
		ty: &Value,
		range: Range,
	) -> Result<Term, ElaborationError> {
		let Some((first, rest)) = parameters.split_first() else { return self.check(renaming, body, ty) };
		let Value::Pi { base, family } = ty.force() else {
			return Err(self.expected_former(ExpectedFormer::Pi, ty).at(range));
		};
		let parameter = self.fresh(&first.name);
		let variable = Value::variable(parameter.clone(), base.as_ref().clone());
		let body = self.assume(parameter.clone(), base.into()).check_lambda(
			&renaming.extend(first.name.clone(), parameter.clone()),
			rest,
			body,
			&family.evaluate_with(variable),
			range,
		)?;
		Ok(Term::Lambda(bind(parameter, body)))
	}

	/// Checks an expression against a type, directly for constructors and by synthesis otherwise.
	pub fn check(&self, renaming: &Renaming, expr: &Expression, ty: &Value) -> Result<Term, ElaborationError> {
		use Preterm as P;
		use Value as V;
		let range = expr.range;
		Ok(match (&expr.preterm, ty.force()) {
			// Holes.
			(P::Todo, _) => Term::Todo { range, ty: rc!(self.read_back_type(ty)) },

			// Dependent functions.
			(P::Lambda { parameters, body }, _) => self.check_lambda(renaming, parameters, body, ty, range)?,

			// Dependent pairs.
			(P::Cons(car, cdr), V::Sigma { base, family }) => {
				let car = self.check(renaming, car, &base)?;
				let cdr = self.check(renaming, cdr, &family.evaluate_with(self.evaluate(&car)))?;
				Term::Cons(rc!(car), rc!(cdr))
			}
			(P::Cons(..), found) => return Err(self.expected_former(ExpectedFormer::Sigma, &found).at(range)),

			// Lists.
			(P::ListNil, V::List(_)) => Term::ListNil,
			(P::ListNil, found) => return Err(self.expected_former(ExpectedFormer::List, &found).at(range)),

			// Equality.
			(P::Same(witness), V::Equal { ty: space, from, to }) => {
				let witness = self.check(renaming, witness, &space)?;
				let witness_value = self.evaluate(&witness);
				self.same(&space, &from, &witness_value).map_err(|e| e.at(range))?;
				self.same(&space, &to, &witness_value).map_err(|e| e.at(range))?;
				Term::Same(rc!(witness))
			}
			(P::Same(_), found) => return Err(self.expected_former(ExpectedFormer::Equal, &found).at(range)),

			// Vectors.
			(P::VecNil, V::Vec { len, .. }) => match len.force() {
				V::Zero => Term::VecNil,
				len =>
					return Err(ElaborationErrorKind::VecLength {
						expected: ExpectedLength::Zero,
						found: self.read_back(&V::Nat, &len),
					}
					.at(range)),
			},
			(P::VecCons(head, tail), V::Vec { ty: element, len }) => match len.force() {
				V::Add1(prev) => {
					let head = self.check(renaming, head, &element)?;
					let tail = self.check(renaming, tail, &V::Vec { ty: element, len: prev })?;
					Term::VecCons(rc!(head), rc!(tail))
				}
				len =>
					return Err(ElaborationErrorKind::VecLength {
						expected: ExpectedLength::Successor,
						found: self.read_back(&V::Nat, &len),
					}
					.at(range)),
			},
			(P::VecNil | P::VecCons(..), found) =>
				return Err(self.expected_former(ExpectedFormer::Vec, &found).at(range)),

			// Sums.
			(P::Left(value), V::Either(left, _)) => Term::Left(rc!(self.check(renaming, value, &left)?)),
			(P::Right(value), V::Either(_, right)) => Term::Right(rc!(self.check(renaming, value, &right)?)),
			(P::Left(_) | P::Right(_), found) =>
				return Err(self.expected_former(ExpectedFormer::Either, &found).at(range)),

			// Everything else is synthesized and compared.
			_ => {
				let Annotated { ty: found, term } = self.infer(renaming, expr)?;
				self.same_type(ty, &found).map_err(|e| e.at(range))?;
				term
			}
		})
	}

	/// Synthesizes the type of an expression.
	pub(crate) fn infer(&self, renaming: &Renaming, expr: &Expression) -> Result<Annotated, ElaborationError> {
		use Preterm as P;
		use Value as V;
		let range = expr.range;
		Ok(match &expr.preterm {
			// Variables.
			P::Variable(written) => {
				let name = renaming.resolve(written);
				match self.lookup(&name) {
					Some(Binding::Free(ty) | Binding::Define(ty, _)) => Term::Variable(name.clone()).annotate(ty.clone()),
					Some(Binding::Claim(_)) => return Err(ElaborationErrorKind::NotYetDefined(name).at(range)),
					None => return Err(ElaborationErrorKind::NotInScope(written.clone()).at(range)),
				}
			}

			// Annotations.
			P::The { ty, term } => {
				let ty = self.elaborate_type(renaming, ty)?;
				let ty_value = self.evaluate(&ty);
				let term = self.check(renaming, term, &ty_value)?;
				Term::The { ty: rc!(ty), term: rc!(term) }.annotate(ty_value)
			}

			// Types.
			P::Universe => return Err(ElaborationErrorKind::UniverseHasNoType.at(range)),

			// Natural numbers.
			P::Zero => Term::Zero.annotate(V::Nat),
			P::Number(n) => Term::number(*n).annotate(V::Nat),
			P::Add1(prev) => Term::Add1(rc!(self.check(renaming, prev, &V::Nat)?)).annotate(V::Nat),
			P::WhichNat { target, base, step } => {
				let target = self.check(renaming, target, &V::Nat)?;
				let Annotated { ty: base_ty, term: base } = self.infer(renaming, base)?;
				let step = self.check(renaming, step, &V::arrow(V::Nat, base_ty.clone()))?;
				Term::WhichNat {
					target: rc!(target),
					base_ty: rc!(self.read_back_type(&base_ty)),
					base: rc!(base),
					step: rc!(step),
				}
				.annotate(base_ty)
			}
			P::IterNat { target, base, step } => {
				let target = self.check(renaming, target, &V::Nat)?;
				let Annotated { ty: base_ty, term: base } = self.infer(renaming, base)?;
				let step = self.check(renaming, step, &V::arrow(base_ty.clone(), base_ty.clone()))?;
				Term::IterNat {
					target: rc!(target),
					base_ty: rc!(self.read_back_type(&base_ty)),
					base: rc!(base),
					step: rc!(step),
				}
				.annotate(base_ty)
			}
			P::RecNat { target, base, step } => {
				let target = self.check(renaming, target, &V::Nat)?;
				let Annotated { ty: base_ty, term: base } = self.infer(renaming, base)?;
				let step = self.check(renaming, step, &V::rec_nat_step_type(base_ty.clone()))?;
				Term::RecNat {
					target: rc!(target),
					base_ty: rc!(self.read_back_type(&base_ty)),
					base: rc!(base),
					step: rc!(step),
				}
				.annotate(base_ty)
			}
			P::IndNat { target, motive, base, step } => {
				let target = self.check(renaming, target, &V::Nat)?;
				let motive = self.check(renaming, motive, &V::arrow(V::Nat, V::Universe))?;
				let motive_value = self.evaluate(&motive);
				let base = self.check(renaming, base, &motive_value.apply(V::Zero))?;
				let step = self.check(renaming, step, &V::ind_nat_step_type(motive_value.clone()))?;
				let ty = motive_value.apply(self.evaluate(&target));
				Term::IndNat { target: rc!(target), motive: rc!(motive), base: rc!(base), step: rc!(step) }.annotate(ty)
			}

			// Dependent functions.
			P::Apply { callee, arguments } => {
				let mut result = self.infer(renaming, callee)?;
				for argument in arguments {
					let V::Pi { base, family } = result.ty.force() else {
						return Err(self.expected_former(ExpectedFormer::Pi, &result.ty).at(callee.range));
					};
					let argument = self.check(renaming, argument, &base)?;
					let ty = family.evaluate_with(self.evaluate(&argument));
					result = Term::Apply { callee: rc!(result.term), argument: rc!(argument) }.annotate(ty);
				}
				result
			}

			// Dependent pairs.
			P::Car(pair) => {
				let Annotated { ty, term } = self.infer(renaming, pair)?;
				let V::Sigma { base, .. } = ty.force() else {
					return Err(self.expected_former(ExpectedFormer::Sigma, &ty).at(pair.range));
				};
				Term::Car(rc!(term)).annotate(base.into())
			}
			P::Cdr(pair) => {
				let Annotated { ty, term } = self.infer(renaming, pair)?;
				let V::Sigma { family, .. } = ty.force() else {
					return Err(self.expected_former(ExpectedFormer::Sigma, &ty).at(pair.range));
				};
				let car = self.evaluate(&term).car();
				Term::Cdr(rc!(term)).annotate(family.evaluate_with(car))
			}

			// Atoms.
			P::Quote(symbol) if is_atom(symbol) => Term::Quote(symbol.clone()).annotate(V::Atom),
			P::Quote(symbol) => return Err(ElaborationErrorKind::InvalidAtom(symbol.clone()).at(range)),

			// Unit.
			P::Sole => Term::Sole.annotate(V::Trivial),

			// Lists.
			P::ListCons(head, tail) => {
				let head = self.infer(renaming, head)?;
				let list = V::List(rc!(head.ty));
				let tail = self.check(renaming, tail, &list)?;
				Term::ListCons(rc!(head.term), rc!(tail)).annotate(list)
			}
			P::RecList { target, base, step } => {
				let target_range = target.range;
				let Annotated { ty: target_ty, term: target } = self.infer(renaming, target)?;
				let V::List(element) = target_ty.force() else {
					return Err(self.expected_former(ExpectedFormer::List, &target_ty).at(target_range));
				};
				let Annotated { ty: base_ty, term: base } = self.infer(renaming, base)?;
				let step = self.check(renaming, step, &V::rec_list_step_type(element.into(), base_ty.clone()))?;
				Term::RecList {
					target: rc!(target),
					base_ty: rc!(self.read_back_type(&base_ty)),
					base: rc!(base),
					step: rc!(step),
				}
				.annotate(base_ty)
			}
			P::IndList { target, motive, base, step } => {
				let target_range = target.range;
				let Annotated { ty: target_ty, term: target } = self.infer(renaming, target)?;
				let V::List(element) = target_ty.force() else {
					return Err(self.expected_former(ExpectedFormer::List, &target_ty).at(target_range));
				};
				let motive = self.check(renaming, motive, &V::arrow(V::List(element.clone()), V::Universe))?;
				let motive_value = self.evaluate(&motive);
				let base = self.check(renaming, base, &motive_value.apply(V::ListNil))?;
				let step_ty = V::ind_list_step_type(element.into(), motive_value.clone());
				let step = self.check(renaming, step, &step_ty)?;
				let ty = motive_value.apply(self.evaluate(&target));
				Term::IndList { target: rc!(target), motive: rc!(motive), base: rc!(base), step: rc!(step) }
					.annotate(ty)
			}

			// Empty type.
			P::IndAbsurd { target, motive } => {
				let target = self.check(renaming, target, &V::Absurd)?;
				let motive = self.elaborate_type(renaming, motive)?;
				let ty = self.evaluate(&motive);
				Term::IndAbsurd { target: rc!(target), motive: rc!(motive) }.annotate(ty)
			}

			// Equality.
			P::Replace { target, motive, base } => {
				let target_range = target.range;
				let Annotated { ty: target_ty, term: target } = self.infer(renaming, target)?;
				let V::Equal { ty: space, from, to } = target_ty.force() else {
					return Err(self.expected_former(ExpectedFormer::Equal, &target_ty).at(target_range));
				};
				let motive = self.check(renaming, motive, &V::arrow(space.into(), V::Universe))?;
				let motive_value = self.evaluate(&motive);
				let base = self.check(renaming, base, &motive_value.apply(from.into()))?;
				let ty = motive_value.apply(to.into());
				Term::Replace { target: rc!(target), motive: rc!(motive), base: rc!(base) }.annotate(ty)
			}
			P::Trans(left, right) => {
				let Annotated { ty: left_ty, term: left_term } = self.infer(renaming, left)?;
				let V::Equal { ty: space, from, to: middle } = left_ty.force() else {
					return Err(self.expected_former(ExpectedFormer::Equal, &left_ty).at(left.range));
				};
				let Annotated { ty: right_ty, term: right_term } = self.infer(renaming, right)?;
				let V::Equal { ty: right_space, from: right_middle, to } = right_ty.force() else {
					return Err(self.expected_former(ExpectedFormer::Equal, &right_ty).at(right.range));
				};
				self.same_type(&space, &right_space).map_err(|e| e.at(right.range))?;
				self.same(&space, &middle, &right_middle).map_err(|e| e.at(range))?;
				Term::Trans(rc!(left_term), rc!(right_term)).annotate(V::Equal { ty: space, from, to })
			}
			P::Cong { target, function } => {
				let Annotated { ty: target_ty, term: target_term } = self.infer(renaming, target)?;
				let V::Equal { ty: space, from, to } = target_ty.force() else {
					return Err(self.expected_former(ExpectedFormer::Equal, &target_ty).at(target.range));
				};
				let Annotated { ty: function_ty, term: function_term } = self.infer(renaming, function)?;
				let V::Pi { base, family } = function_ty.force() else {
					return Err(self.expected_former(ExpectedFormer::Arrow, &function_ty).at(function.range));
				};
				self.same_type(&space, &base).map_err(|e| e.at(function.range))?;
				// The codomain must not depend on the argument.
				let parameter = self.fresh(family.parameter());
				let codomain = self
					.assume(parameter.clone(), base.as_ref().clone())
					.read_back_type(&family.evaluate_with(V::variable(parameter.clone(), base.into())));
				if codomain.occurs_free(&parameter) {
					return Err(self.expected_former(ExpectedFormer::Arrow, &function_ty).at(function.range));
				}
				let codomain_value = self.evaluate(&codomain);
				let function_value = self.evaluate(&function_term);
				let ty = V::equal(
					codomain_value,
					function_value.apply(from.into()),
					function_value.apply(to.into()),
				);
				Term::Cong { target: rc!(target_term), ty: rc!(codomain), function: rc!(function_term) }.annotate(ty)
			}
			P::Symm(target) => {
				let Annotated { ty: target_ty, term } = self.infer(renaming, target)?;
				let V::Equal { ty: space, from, to } = target_ty.force() else {
					return Err(self.expected_former(ExpectedFormer::Equal, &target_ty).at(target.range));
				};
				Term::Symm(rc!(term)).annotate(V::Equal { ty: space, from: to, to: from })
			}
			P::IndEqual { target, motive, base } => {
				let target_range = target.range;
				let Annotated { ty: target_ty, term: target } = self.infer(renaming, target)?;
				let V::Equal { ty: space, from, to } = target_ty.force() else {
					return Err(self.expected_former(ExpectedFormer::Equal, &target_ty).at(target_range));
				};
				let motive_ty = V::ind_equal_motive_type(space.into(), from.as_ref().clone());
				let motive = self.check(renaming, motive, &motive_ty)?;
				let motive_value = self.evaluate(&motive);
				let base_ty = motive_value.apply(from.as_ref().clone()).apply(V::Same(from));
				let base = self.check(renaming, base, &base_ty)?;
				let ty = motive_value.apply(to.into()).apply(self.evaluate(&target));
				Term::IndEqual { target: rc!(target), motive: rc!(motive), base: rc!(base) }.annotate(ty)
			}

			// Vectors.
			P::Head(target) | P::Tail(target) => {
				let Annotated { ty: target_ty, term } = self.infer(renaming, target)?;
				let V::Vec { ty: element, len } = target_ty.force() else {
					return Err(self.expected_former(ExpectedFormer::Vec, &target_ty).at(target.range));
				};
				let V::Add1(prev) = len.force() else {
					return Err(ElaborationErrorKind::VecLength {
						expected: ExpectedLength::Successor,
						found: self.read_back(&V::Nat, &len),
					}
					.at(target.range));
				};
				match &expr.preterm {
					P::Head(_) => Term::Head(rc!(term)).annotate(element.into()),
					_ => Term::Tail(rc!(term)).annotate(V::Vec { ty: element, len: prev }),
				}
			}
			P::IndVec { len, target, motive, base, step } => {
				let len = self.check(renaming, len, &V::Nat)?;
				let len_value = self.evaluate(&len);
				let target_range = target.range;
				let Annotated { ty: target_ty, term: target } = self.infer(renaming, target)?;
				let V::Vec { ty: element, len: target_len } = target_ty.force() else {
					return Err(self.expected_former(ExpectedFormer::Vec, &target_ty).at(target_range));
				};
				self.same(&V::Nat, &len_value, &target_len).map_err(|e| e.at(target_range))?;
				let motive = self.check(renaming, motive, &V::ind_vec_motive_type(element.as_ref().clone()))?;
				let motive_value = self.evaluate(&motive);
				let base = self.check(renaming, base, &motive_value.apply(V::Zero).apply(V::VecNil))?;
				let step = self.check(renaming, step, &V::ind_vec_step_type(element.into(), motive_value.clone()))?;
				let ty = motive_value.apply(len_value).apply(self.evaluate(&target));
				Term::IndVec {
					len: rc!(len),
					target: rc!(target),
					motive: rc!(motive),
					base: rc!(base),
					step: rc!(step),
				}
				.annotate(ty)
			}

			// Sums.
			P::IndEither { target, motive, left, right } => {
				let target_range = target.range;
				let Annotated { ty: target_ty, term: target } = self.infer(renaming, target)?;
				let V::Either(left_ty, right_ty) = target_ty.force() else {
					return Err(self.expected_former(ExpectedFormer::Either, &target_ty).at(target_range));
				};
				let motive = self.check(renaming, motive, &V::arrow(target_ty.force(), V::Universe))?;
				let motive_value = self.evaluate(&motive);
				let left_case = V::ind_either_case_type(left_ty.into(), motive_value.clone(), V::Left);
				let left = self.check(renaming, left, &left_case)?;
				let right_case = V::ind_either_case_type(right_ty.into(), motive_value.clone(), V::Right);
				let right = self.check(renaming, right, &right_case)?;
				let ty = motive_value.apply(self.evaluate(&target));
				Term::IndEither { target: rc!(target), motive: rc!(motive), left: rc!(left), right: rc!(right) }
					.annotate(ty)
			}

			// Type formers synthesize `U`; constructors without an expected type cannot be synthesized.
			_ => match self.elaborate_former(renaming, expr, Size::Small)? {
				Some(term) => term.annotate(V::Universe),
				None => return Err(ElaborationErrorKind::CouldNotSynthesize.at(range)),
			},
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		frontend::{conversion::alpha_equivalent, parse::parse_expression},
		ir::source::lex,
	};

	fn expression(source: &str) -> Expression { parse_expression(&lex(source).unwrap()).unwrap() }

	fn synthesize(context: &Context, source: &str) -> Result<(Term, Term), ElaborationErrorKind> {
		context.synthesize(&Renaming::empty(), &expression(source)).map_err(|e| e.kind)
	}

	fn normalize(context: &Context, source: &str) -> Term {
		let (ty, term) = synthesize(context, source).unwrap();
		context.read_back(&context.evaluate(&ty), &context.evaluate(&term))
	}

	fn term(source: &str) -> Term {
		let context = Context::empty();
		let (_, term) = synthesize(&context, &format!("(the U {source})")).unwrap();
		term
	}

	#[test]
	fn test_annotated_numeral() {
		let context = Context::empty();
		let (ty, _) = synthesize(&context, "(the Nat (add1 (add1 zero)))").unwrap();
		assert!(matches!(ty, Term::Nat));
		assert!(alpha_equivalent(&normalize(&context, "(the Nat (add1 (add1 zero)))"), &Term::number(2)));
	}

	#[test]
	fn test_which_nat_on_zero() {
		let context = Context::empty();
		assert!(alpha_equivalent(&normalize(&context, "(which-Nat 0 2 (lambda (x) x))"), &Term::number(2)));
	}

	#[test]
	fn test_pair_projections() {
		let context = Context::empty();
		let car = normalize(&context, "(car (the (Pair Atom Atom) (cons 'olive 'oil)))");
		assert!(alpha_equivalent(&car, &Term::Quote(name("olive"))));
		let cdr = normalize(&context, "(cdr (the (Pair Atom Atom) (cons 'olive 'oil)))");
		assert!(alpha_equivalent(&cdr, &Term::Quote(name("oil"))));
	}

	#[test]
	fn test_cons_against_function_type_is_a_shape_mismatch() {
		let context = Context::empty();
		let pair = context.evaluate(&term("(Pair Atom Atom)"));
		let cons = expression("(cons 'a 'b)");
		assert!(context.check(&Renaming::empty(), &cons, &pair).is_ok());
		let function = context.evaluate(&term("(-> Atom Atom)"));
		let error = context.check(&Renaming::empty(), &cons, &function).unwrap_err();
		assert_eq!(error.range, (0, 12));
		assert!(matches!(error.kind, ElaborationErrorKind::ExpectedFormer { expected: ExpectedFormer::Sigma, .. }));
	}

	#[test]
	fn test_ind_nat_addition() {
		let context = Context::empty();
		let source = "(ind-Nat 2 (lambda (k) Nat) 3 (lambda (n-1 almost) (add1 almost)))";
		assert!(alpha_equivalent(&normalize(&context, source), &Term::number(5)));
	}

	#[test]
	fn test_rec_list_length() {
		let context = Context::empty();
		let source = "(rec-List (:: 'a (:: 'b nil)) 0 (lambda (e es n) (add1 n)))";
		assert!(alpha_equivalent(&normalize(&context, source), &Term::number(2)));
	}

	#[test]
	fn test_nil_cannot_be_synthesized() {
		assert!(matches!(synthesize(&Context::empty(), "nil"), Err(ElaborationErrorKind::CouldNotSynthesize)));
	}

	#[test]
	fn test_universe_has_no_type() {
		assert!(matches!(synthesize(&Context::empty(), "U"), Err(ElaborationErrorKind::UniverseHasNoType)));
		// But it is a type, and types over it are types.
		assert!(Context::empty().elaborate_type(&Renaming::empty(), &expression("(-> U U)")).is_ok());
		assert!(matches!(synthesize(&Context::empty(), "(-> U U)"), Err(ElaborationErrorKind::UniverseHasNoType)));
	}

	#[test]
	fn test_invalid_atom() {
		assert!(matches!(synthesize(&Context::empty(), "'a1"), Err(ElaborationErrorKind::InvalidAtom(_))));
	}

	#[test]
	fn test_unbound_and_claimed_variables() {
		let context = Context::empty();
		assert!(matches!(synthesize(&context, "x"), Err(ElaborationErrorKind::NotInScope(_))));
		let context = context.claim(name("x"), Value::Nat).unwrap();
		assert!(matches!(synthesize(&context, "x"), Err(ElaborationErrorKind::NotYetDefined(_))));
	}

	#[test]
	fn test_binders_shadow_definitions() {
		let context = Context::empty().define(name("x"), Value::Atom, Value::Quote(name("a"))).unwrap();
		let (ty, _) = synthesize(&context, "(the (-> Nat Nat) (lambda (x) (add1 x)))").unwrap();
		assert!(matches!(ty, Term::Pi { .. }));
	}

	#[test]
	fn test_same_checks_both_endpoints() {
		let context = Context::empty();
		assert!(synthesize(&context, "(the (= Nat 2 (add1 1)) (same 2))").is_ok());
		assert!(matches!(
			synthesize(&context, "(the (= Nat 2 3) (same 2))"),
			Err(ElaborationErrorKind::NotTheSame { .. })
		));
	}

	#[test]
	fn test_vector_lengths() {
		let context = Context::empty();
		assert!(synthesize(&context, "(head (the (Vec Atom 1) (vec:: 'a vecnil)))").is_ok());
		assert!(matches!(
			synthesize(&context, "(the (Vec Atom 1) vecnil)"),
			Err(ElaborationErrorKind::VecLength { expected: ExpectedLength::Zero, .. })
		));
		assert!(matches!(
			synthesize(&context, "(head (the (Vec Atom 0) vecnil))"),
			Err(ElaborationErrorKind::VecLength { expected: ExpectedLength::Successor, .. })
		));
	}

	#[test]
	fn test_cong_and_symm() {
		let context = Context::empty();
		let source = "(symm (cong (the (= Nat 1 1) (same 1)) (the (-> Nat Nat) (lambda (n) (add1 n)))))";
		let (ty, _) = synthesize(&context, source).unwrap();
		let Term::Equal { from, .. } = ty else { panic!() };
		assert!(alpha_equivalent(&from, &Term::number(2)));
	}

	#[test]
	fn test_todo_records_expected_type() {
		let context = Context::empty();
		let (_, term) = synthesize(&context, "(the (-> Nat Atom) TODO)").unwrap();
		let holes = term.holes();
		assert_eq!(holes.len(), 1);
		assert_eq!(holes[0].0, (19, 23));
		assert!(matches!(holes[0].1.as_ref(), Term::Pi { .. }));
	}

	#[test]
	fn test_check_agrees_with_synthesis() {
		let context = Context::empty().bind_free(name("n"), Value::Nat).unwrap();
		let sources = [
			"(the (Either Nat Atom) (left 3))",
			"(add1 n)",
			"(the (Sigma ((k Nat)) (Vec Atom k)) (cons 1 (vec:: 'a vecnil)))",
			"(the (= Nat n n) (same n))",
			"(which-Nat n 'a (lambda (k) 'b))",
			"(:: 1 nil)",
			"(car (the (Pair Nat Atom) (cons n 'a)))",
		];
		for source in sources {
			let (ty, term) = synthesize(&context, source).unwrap();
			let ty = context.evaluate(&ty);
			let checked = context.check(&Renaming::empty(), &expression(source), &ty).unwrap();
			assert!(alpha_equivalent(&term, &checked), "{source}");
			// The printed normal form is itself accepted at the same type.
			let printed = normalize(&context, source).to_string();
			assert!(context.check(&Renaming::empty(), &expression(&printed), &ty).is_ok(), "{source}: {printed}");
		}
	}
}
