use std::rc::Rc;

use crate::{
	common::Name,
	frontend::{
		elaborate::ElaborationErrorKind,
		evaluate::Evaluate as _,
		fresh::freshen,
	},
	ir::{
		presyntax::Expression,
		semantics::{Environment, Value},
		syntax::Term,
	},
	utility::rc,
};

#[derive(Clone, Debug)]
pub enum Binding {
	/// A variable introduced by a binder or a hypothesis.
	Free(Value),
	/// A name whose type is known but whose definition is pending.
	Claim(Value),
	Define(Value, Value),
}

impl Binding {
	pub fn ty(&self) -> &Value {
		match self {
			Self::Free(ty) | Self::Claim(ty) | Self::Define(ty, _) => ty,
		}
	}
}

/// A binding as shown to the user, with types and values read back.
#[derive(Clone, Debug)]
pub enum SerializedBinding {
	Free(Term),
	Claim(Term),
	Define(Term, Term),
}

/// An ordered, persistent list of bindings with pairwise distinct names.
#[derive(Clone, Debug, Default)]
pub struct Context(Option<Rc<ContextEntry>>);

#[derive(Debug)]
struct ContextEntry {
	name: Name,
	binding: Binding,
	rest: Context,
	environment: Environment,
}

impl Context {
	pub fn empty() -> Self { Self(None) }

	fn entries(&self) -> impl Iterator<Item = &ContextEntry> {
		std::iter::successors(self.0.as_deref(), |entry| entry.rest.0.as_deref())
	}

	/// The environment giving each free variable a neutral value and each definition its value.
	pub fn environment(&self) -> Environment {
		self.0.as_ref().map(|entry| entry.environment.clone()).unwrap_or_default()
	}

	pub fn evaluate(&self, term: &Term) -> Value { term.evaluate_in(&self.environment()) }

	pub fn lookup(&self, name: &str) -> Option<&Binding> {
		self.entries().find(|entry| &*entry.name == name).map(|entry| &entry.binding)
	}

	pub fn contains(&self, name: &str) -> bool { self.lookup(name).is_some() }

	fn push(&self, name: Name, binding: Binding) -> Self {
		let environment = match &binding {
			Binding::Free(ty) => self.environment().extend(name.clone(), Value::variable(name.clone(), ty.clone())),
			Binding::Claim(_) => self.environment(),
			Binding::Define(_, value) => self.environment().extend(name.clone(), value.clone()),
		};
		Self(Some(rc!(ContextEntry { name, binding, rest: self.clone(), environment })))
	}

	fn extend(&self, name: Name, binding: Binding) -> Result<Self, ElaborationErrorKind> {
		if self.contains(&name) {
			return Err(ElaborationErrorKind::NameCollision(name));
		}
		Ok(self.push(name, binding))
	}

	pub fn bind_free(&self, name: Name, ty: Value) -> Result<Self, ElaborationErrorKind> {
		self.extend(name, Binding::Free(ty))
	}

	/// Binds a name already known to be unused, such as one produced by `fresh`.
	#[must_use]
	pub fn assume(&self, name: Name, ty: Value) -> Self {
		debug_assert!(!self.contains(&name));
		self.push(name, Binding::Free(ty))
	}

	/// Binds a name already known to be unused to a value.
	#[must_use]
	pub fn assume_definition(&self, name: Name, ty: Value, value: Value) -> Self {
		debug_assert!(!self.contains(&name));
		self.push(name, Binding::Define(ty, value))
	}

	pub fn claim(&self, name: Name, ty: Value) -> Result<Self, ElaborationErrorKind> {
		self.extend(name, Binding::Claim(ty))
	}

	/// Replaces a pending claim with a definition in place, or adds a fresh definition if the name is unused.
	pub fn define(&self, name: Name, ty: Value, value: Value) -> Result<Self, ElaborationErrorKind> {
		match self.lookup(&name) {
			None => Ok(self.push(name, Binding::Define(ty, value))),
			Some(Binding::Claim(_)) => Ok(self.replace(name, Binding::Define(ty, value))),
			Some(_) => Err(ElaborationErrorKind::AlreadyDefined(name)),
		}
	}

	/// Rebuilds the context with the binding for `name` swapped out, keeping every entry where it was.
	fn replace(&self, name: Name, binding: Binding) -> Self {
		let mut later = Vec::new();
		let mut context = self;
		while let Some(entry) = &context.0 {
			if entry.name == name {
				// Later entries are rebuilt on top of the new binding.
				let start = entry.rest.push(name, binding);
				return later.into_iter().rev().fold(start, |context: Self, entry: &ContextEntry| {
					context.push(entry.name.clone(), entry.binding.clone())
				});
			}
			later.push(entry.as_ref());
			context = &entry.rest;
		}
		self.push(name, binding)
	}

	/// Picks a name close to `name` that is not bound in the context.
	pub fn fresh(&self, name: &Name) -> Name { freshen(name, |candidate| self.contains(candidate)) }

	/// Like `fresh`, but also avoids every name written in the given expressions.
	pub fn fresh_binder<'e>(&self, expressions: impl IntoIterator<Item = &'e Expression>, name: &Name) -> Name {
		let occurring: Vec<_> = expressions.into_iter().flat_map(Expression::occurring_names).collect();
		freshen(name, |candidate| self.contains(candidate) || occurring.iter().any(|name| &**name == candidate))
	}

	/// Lists every binding, oldest first, with types and values read back.
	pub fn serialize(&self) -> Vec<(Name, SerializedBinding)> {
		let mut entries: Vec<_> = self.entries().collect();
		entries.reverse();
		entries
			.into_iter()
			.map(|entry| {
				let context = &entry.rest;
				let binding = match &entry.binding {
					Binding::Free(ty) => SerializedBinding::Free(context.read_back_type(ty)),
					Binding::Claim(ty) => SerializedBinding::Claim(context.read_back_type(ty)),
					Binding::Define(ty, value) =>
						SerializedBinding::Define(context.read_back_type(ty), context.read_back(ty, value)),
				};
				(entry.name.clone(), binding)
			})
			.collect()
	}
}

/// A persistent map from binder names as written to the names used in elaborated terms.
#[derive(Clone, Debug, Default)]
pub struct Renaming(Option<Rc<(Name, Name, Renaming)>>);

impl Renaming {
	pub fn empty() -> Self { Self(None) }

	#[must_use]
	pub fn extend(&self, from: Name, to: Name) -> Self { Self(Some(rc!((from, to, self.clone())))) }

	/// The name `name` was renamed to, or `name` itself if it was never bound by a binder.
	pub fn resolve(&self, name: &Name) -> Name {
		let mut renaming = self;
		while let Some(entry) = &renaming.0 {
			if entry.0 == *name {
				return entry.1.clone();
			}
			renaming = &entry.2;
		}
		name.clone()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::common::name;

	#[test]
	fn test_extending_with_a_used_name_fails() {
		let context = Context::empty().bind_free(name("x"), Value::Nat).unwrap();
		assert!(matches!(context.bind_free(name("x"), Value::Atom), Err(ElaborationErrorKind::NameCollision(_))));
		assert!(matches!(context.claim(name("x"), Value::Atom), Err(ElaborationErrorKind::NameCollision(_))));
	}

	#[test]
	fn test_claims_are_not_in_the_environment() {
		let context = Context::empty().claim(name("x"), Value::Nat).unwrap();
		assert!(context.environment().lookup("x").is_none());
		let context = context.define(name("x"), Value::Nat, Value::Zero).unwrap();
		assert!(matches!(context.environment().lookup("x"), Some(Value::Zero)));
		assert!(matches!(context.lookup("x"), Some(Binding::Define(..))));
	}

	#[test]
	fn test_define_keeps_declaration_order() {
		let context = Context::empty()
			.claim(name("a"), Value::Nat)
			.unwrap()
			.claim(name("b"), Value::Atom)
			.unwrap()
			.define(name("a"), Value::Nat, Value::Zero)
			.unwrap();
		let names: Vec<_> = context.serialize().into_iter().map(|(name, _)| name).collect();
		assert_eq!(names, vec![name("a"), name("b")]);
		assert!(matches!(context.lookup("b"), Some(Binding::Claim(_))));
		assert!(matches!(context.define(name("a"), Value::Nat, Value::Zero), Err(ElaborationErrorKind::AlreadyDefined(_))));
	}

	#[test]
	fn test_later_bindings_see_a_definition_made_in_place() {
		let context = Context::empty()
			.claim(name("a"), Value::Nat)
			.unwrap()
			.bind_free(name("x"), Value::Atom)
			.unwrap()
			.define(name("a"), Value::Nat, Value::Zero)
			.unwrap();
		let names: Vec<_> = context.serialize().into_iter().map(|(name, _)| name).collect();
		assert_eq!(names, vec![name("a"), name("x")]);
		assert!(matches!(context.environment().lookup("a"), Some(Value::Zero)));
		assert!(matches!(context.environment().lookup("x"), Some(Value::Neutral { .. })));
	}

	#[test]
	fn test_fresh_avoids_context() {
		let context = Context::empty().bind_free(name("x"), Value::Nat).unwrap();
		assert_eq!(&*context.fresh(&name("x")), "x₁");
		assert_eq!(&*context.fresh(&name("y")), "y");
	}

	#[test]
	fn test_renaming_resolves_innermost() {
		let renaming = Renaming::empty().extend(name("x"), name("x₁")).extend(name("x"), name("x₂"));
		assert_eq!(&*renaming.resolve(&name("x")), "x₂");
		assert_eq!(&*renaming.resolve(&name("y")), "y");
	}
}
