use crate::{
	common::{Binder, Name},
	frontend::{context::Context, elaborate::ElaborationErrorKind},
	ir::{semantics::Value, syntax::Term},
};

/// Decides whether two terms are equal up to consistent renaming of bound variables.
pub fn alpha_equivalent(left: &Term, right: &Term) -> bool { Scopes::default().equivalent(left, right) }

/// Binders entered so far on each side, innermost last.
#[derive(Default)]
struct Scopes {
	left: Vec<Name>,
	right: Vec<Name>,
}

impl Scopes {
	fn under<T>(&mut self, left: &Binder<T>, right: &Binder<T>, f: impl FnOnce(&mut Self, &T, &T) -> bool) -> bool {
		self.left.push(left.parameter.clone());
		self.right.push(right.parameter.clone());
		let result = f(self, &left.body, &right.body);
		self.left.pop();
		self.right.pop();
		result
	}

	fn variables(&self, left: &Name, right: &Name) -> bool {
		let left_index = self.left.iter().rposition(|name| name == left);
		let right_index = self.right.iter().rposition(|name| name == right);
		match (left_index, right_index) {
			(Some(l), Some(r)) => l == r,
			(None, None) => left == right,
			_ => false,
		}
	}

	fn equivalent(&mut self, left: &Term, right: &Term) -> bool {
		use Term as T;
		match (left, right) {
			// Variables.
			(T::Variable(l), T::Variable(r)) => self.variables(l, r),

			// Any two proofs of the empty type are the same.
			(T::The { ty: l, .. }, T::The { ty: r, .. }) if matches!((&**l, &**r), (T::Absurd, T::Absurd)) => true,

			// Holes.
			(T::Todo { range: l, ty: a }, T::Todo { range: r, ty: b }) => l == r && self.equivalent(a, b),

			// Binders.
			(T::Pi { base: l, family: a }, T::Pi { base: r, family: b })
			| (T::Sigma { base: l, family: a }, T::Sigma { base: r, family: b }) =>
				self.equivalent(l, r) && self.under(a, b, |scopes, a, b| scopes.equivalent(a, b)),
			(T::Lambda(a), T::Lambda(b)) => self.under(a, b, |scopes, a, b| scopes.equivalent(a, b)),

			// Leaves.
			(T::Quote(l), T::Quote(r)) => l == r,
			(T::Universe, T::Universe)
			| (T::Nat, T::Nat)
			| (T::Zero, T::Zero)
			| (T::Atom, T::Atom)
			| (T::Trivial, T::Trivial)
			| (T::Sole, T::Sole)
			| (T::ListNil, T::ListNil)
			| (T::Absurd, T::Absurd)
			| (T::VecNil, T::VecNil) => true,

			// Everything else compares the same former child by child.
			_ =>
				std::mem::discriminant(left) == std::mem::discriminant(right) && {
					let (lefts, rights) = (left.children(), right.children());
					lefts.len() == rights.len() && lefts.into_iter().zip(rights).all(|(l, r)| self.equivalent(l, r))
				},
		}
	}
}

impl Context {
	/// Checks that two types are the same by comparing their normal forms.
	pub fn same_type(&self, expected: &Value, found: &Value) -> Result<(), ElaborationErrorKind> {
		let expected = self.read_back_type(expected);
		let found = self.read_back_type(found);
		if alpha_equivalent(&expected, &found) {
			Ok(())
		} else {
			Err(ElaborationErrorKind::TypeMismatch { expected, found })
		}
	}

	/// Checks that two values of type `ty` are the same by comparing their normal forms.
	pub fn same(&self, ty: &Value, left: &Value, right: &Value) -> Result<(), ElaborationErrorKind> {
		let left = self.read_back(ty, left);
		let right = self.read_back(ty, right);
		if alpha_equivalent(&left, &right) {
			Ok(())
		} else {
			Err(ElaborationErrorKind::NotTheSame { ty: self.read_back_type(ty), left, right })
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		common::{bind, name},
		utility::rc,
	};

	fn lambda(parameter: &str, body: Term) -> Term { Term::Lambda(bind(name(parameter), rc!(body))) }

	fn variable(x: &str) -> Term { Term::Variable(name(x)) }

	#[test]
	fn test_bound_names_do_not_matter() {
		assert!(alpha_equivalent(&lambda("x", variable("x")), &lambda("y", variable("y"))));
	}

	#[test]
	fn test_binding_structure_matters() {
		let left = lambda("x", lambda("y", variable("x")));
		let right = lambda("x", lambda("y", variable("y")));
		assert!(!alpha_equivalent(&left, &right));
	}

	#[test]
	fn test_free_variables_compare_by_name() {
		assert!(alpha_equivalent(&variable("f"), &variable("f")));
		assert!(!alpha_equivalent(&variable("f"), &variable("g")));
		// A bound variable never matches a free one of the same spelling.
		assert!(!alpha_equivalent(&lambda("x", variable("x")), &lambda("y", variable("x"))));
	}

	#[test]
	fn test_absurd_proofs_are_equal() {
		let the = |x| Term::The { ty: rc!(Term::Absurd), term: rc!(variable(x)) };
		assert!(alpha_equivalent(&the("a"), &the("b")));
	}

	#[test]
	fn test_quotes_and_holes() {
		assert!(alpha_equivalent(&Term::Quote(name("a")), &Term::Quote(name("a"))));
		assert!(!alpha_equivalent(&Term::Quote(name("a")), &Term::Quote(name("b"))));
		let hole = |range| Term::Todo { range, ty: rc!(Term::Nat) };
		assert!(alpha_equivalent(&hole((0, 4)), &hole((0, 4))));
		assert!(!alpha_equivalent(&hole((0, 4)), &hole((5, 9))));
	}

	#[test]
	fn test_different_formers_differ() {
		let add1 = Term::Add1(rc!(Term::Zero));
		assert!(!alpha_equivalent(&add1, &Term::Car(rc!(Term::Zero))));
		assert!(alpha_equivalent(&add1, &Term::number(1)));
	}

	#[test]
	fn test_same_type_reports_mismatch() {
		let context = Context::empty();
		assert!(context.same_type(&Value::Nat, &Value::Nat).is_ok());
		assert!(matches!(
			context.same_type(&Value::Nat, &Value::Atom),
			Err(ElaborationErrorKind::TypeMismatch { expected: Term::Nat, found: Term::Atom })
		));
	}
}
