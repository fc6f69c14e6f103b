use std::{cell::RefCell, fmt, rc::Rc};

use super::syntax::Term;
use crate::{
	common::{name, Name, Range},
	utility::rc,
};

/// The semantic domain. Sub-values may be delayed; use `force` before inspecting the outermost former.
#[derive(Clone, Debug)]
pub enum Value {
	// Suspended computations.
	Delay(Rc<Delay>),

	// Neutrals, annotated with their types.
	Neutral {
		ty: Rc<Self>,
		neutral: Rc<Neutral>,
	},

	// Types.
	Universe,

	// Natural numbers.
	Nat,
	Zero,
	Add1(Rc<Self>),

	// Dependent functions.
	Pi {
		base: Rc<Self>,
		family: Rc<Closure>,
	},
	Lambda(Rc<Closure>),

	// Dependent pairs.
	Sigma {
		base: Rc<Self>,
		family: Rc<Closure>,
	},
	Cons(Rc<Self>, Rc<Self>),

	// Atoms.
	Atom,
	Quote(Name),

	// Unit.
	Trivial,
	Sole,

	// Lists.
	List(Rc<Self>),
	ListNil,
	ListCons(Rc<Self>, Rc<Self>),

	// Empty type.
	Absurd,

	// Equality.
	Equal {
		ty: Rc<Self>,
		from: Rc<Self>,
		to: Rc<Self>,
	},
	Same(Rc<Self>),

	// Vectors.
	Vec {
		ty: Rc<Self>,
		len: Rc<Self>,
	},
	VecNil,
	VecCons(Rc<Self>, Rc<Self>),

	// Sums.
	Either(Rc<Self>, Rc<Self>),
	Left(Rc<Self>),
	Right(Rc<Self>),
}

/// A value paired with its type, as stored inside neutrals for read-back.
#[derive(Clone, Debug)]
pub struct Normal {
	pub ty: Value,
	pub value: Value,
}

impl Normal {
	pub fn new(ty: Value, value: Value) -> Self { Self { ty, value } }
}

#[derive(Clone, Debug)]
pub enum Neutral {
	// Variables and holes.
	Variable(Name),
	Todo {
		range: Range,
		ty: Value,
	},

	// Natural numbers.
	WhichNat {
		target: Rc<Self>,
		base: Normal,
		step: Normal,
	},
	IterNat {
		target: Rc<Self>,
		base: Normal,
		step: Normal,
	},
	RecNat {
		target: Rc<Self>,
		base: Normal,
		step: Normal,
	},
	IndNat {
		target: Rc<Self>,
		motive: Normal,
		base: Normal,
		step: Normal,
	},

	// Dependent functions.
	Apply {
		callee: Rc<Self>,
		argument: Normal,
	},

	// Dependent pairs.
	Car(Rc<Self>),
	Cdr(Rc<Self>),

	// Lists.
	RecList {
		target: Rc<Self>,
		base: Normal,
		step: Normal,
	},
	IndList {
		target: Rc<Self>,
		motive: Normal,
		base: Normal,
		step: Normal,
	},

	// Empty type.
	IndAbsurd {
		target: Rc<Self>,
		motive: Normal,
	},

	// Equality.
	Replace {
		target: Rc<Self>,
		motive: Normal,
		base: Normal,
	},
	// NOTE: One variant per combination of stuck operands.
	TransLeft {
		left: Rc<Self>,
		right: Normal,
	},
	TransRight {
		left: Normal,
		right: Rc<Self>,
	},
	TransBoth {
		left: Rc<Self>,
		right: Rc<Self>,
	},
	Cong {
		target: Rc<Self>,
		ty: Value,
		function: Normal,
	},
	Symm(Rc<Self>),
	IndEqual {
		target: Rc<Self>,
		motive: Normal,
		base: Normal,
	},

	// Vectors.
	Head(Rc<Self>),
	Tail(Rc<Self>),
	IndVecBoth {
		len: Rc<Self>,
		target: Rc<Self>,
		motive: Normal,
		base: Normal,
		step: Normal,
	},
	IndVecTarget {
		len: Normal,
		target: Rc<Self>,
		motive: Normal,
		base: Normal,
		step: Normal,
	},

	// Sums.
	IndEither {
		target: Rc<Self>,
		motive: Normal,
		left: Normal,
		right: Normal,
	},
}

#[derive(Clone)]
pub enum Closure {
	/// A body to be evaluated in its captured environment extended with the argument.
	Syntax { environment: Environment, parameter: Name, body: Rc<Term> },
	/// A function built directly from values, without going through syntax.
	Native { parameter: Name, function: Rc<dyn Fn(Value) -> Value> },
}

impl Closure {
	pub fn native(parameter: &str, function: impl Fn(Value) -> Value + 'static) -> Self {
		Self::Native { parameter: name(parameter), function: Rc::new(function) }
	}

	pub fn parameter(&self) -> &Name {
		match self {
			Self::Syntax { parameter, .. } | Self::Native { parameter, .. } => parameter,
		}
	}
}

impl fmt::Debug for Closure {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Syntax { parameter, body, .. } =>
				f.debug_struct("Closure").field("parameter", parameter).field("body", body).finish(),
			Self::Native { parameter, .. } => f.debug_struct("NativeClosure").field("parameter", parameter).finish(),
		}
	}
}

/// A call-by-need cell: evaluated at most once, then cached.
#[derive(Debug)]
pub struct Delay(pub(crate) RefCell<DelayState>);

#[derive(Debug)]
pub(crate) enum DelayState {
	Pending(Environment, Rc<Term>),
	Forcing,
	Forced(Value),
}

impl Delay {
	pub fn new(environment: Environment, term: Rc<Term>) -> Self {
		Self(RefCell::new(DelayState::Pending(environment, term)))
	}

	#[cfg(test)]
	pub(crate) fn is_forced(&self) -> bool { matches!(&*self.0.borrow(), DelayState::Forced(_)) }
}

/// A persistent association from names to values; extending never disturbs existing sharers.
#[derive(Clone, Debug, Default)]
pub struct Environment(Option<Rc<EnvironmentEntry>>);

#[derive(Debug)]
struct EnvironmentEntry {
	name: Name,
	value: Value,
	rest: Environment,
}

impl Environment {
	pub fn empty() -> Self { Self(None) }

	pub fn lookup(&self, name: &str) -> Option<&Value> {
		let mut environment = self;
		while let Some(entry) = &environment.0 {
			if &*entry.name == name {
				return Some(&entry.value);
			}
			environment = &entry.rest;
		}
		None
	}

	#[must_use]
	pub fn extend(&self, name: Name, value: Value) -> Self {
		Self(Some(rc!(EnvironmentEntry { name, value, rest: self.clone() })))
	}
}

impl Value {
	pub fn neutral(ty: Self, neutral: Neutral) -> Self { Self::Neutral { ty: rc!(ty), neutral: rc!(neutral) } }

	pub fn variable(name: Name, ty: Self) -> Self { Self::neutral(ty, Neutral::Variable(name)) }

	pub fn pi(parameter: &str, base: Self, family: impl Fn(Self) -> Self + 'static) -> Self {
		Self::Pi { base: rc!(base), family: rc!(Closure::native(parameter, family)) }
	}

	/// A non-dependent function type.
	pub fn arrow(base: Self, codomain: Self) -> Self { Self::pi("x", base, move |_| codomain.clone()) }

	pub fn equal(ty: Self, from: Self, to: Self) -> Self { Self::Equal { ty: rc!(ty), from: rc!(from), to: rc!(to) } }

	pub fn vec(ty: Self, len: Self) -> Self { Self::Vec { ty: rc!(ty), len: rc!(len) } }
}

impl From<Rc<Value>> for Value {
	fn from(value: Rc<Value>) -> Self { value.as_ref().clone() }
}
