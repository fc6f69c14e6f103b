use std::rc::Rc;

use crate::common::{Binder, Name, Range};

/// An elaborated term: position-free except for holes, and free of surface sugar.
#[derive(Clone, Debug)]
pub enum Term {
	// Variables.
	Variable(Name),

	// Annotations.
	The {
		ty: Rc<Self>,
		term: Rc<Self>,
	},

	// Holes.
	Todo {
		range: Range,
		ty: Rc<Self>,
	},

	// Types.
	Universe,

	// Natural numbers.
	Nat,
	Zero,
	Add1(Rc<Self>),
	WhichNat {
		target: Rc<Self>,
		base_ty: Rc<Self>,
		base: Rc<Self>,
		step: Rc<Self>,
	},
	IterNat {
		target: Rc<Self>,
		base_ty: Rc<Self>,
		base: Rc<Self>,
		step: Rc<Self>,
	},
	RecNat {
		target: Rc<Self>,
		base_ty: Rc<Self>,
		base: Rc<Self>,
		step: Rc<Self>,
	},
	IndNat {
		target: Rc<Self>,
		motive: Rc<Self>,
		base: Rc<Self>,
		step: Rc<Self>,
	},

	// Dependent functions.
	Pi {
		base: Rc<Self>,
		family: Binder<Rc<Self>>,
	},
	Lambda(Binder<Rc<Self>>),
	Apply {
		callee: Rc<Self>,
		argument: Rc<Self>,
	},

	// Dependent pairs.
	Sigma {
		base: Rc<Self>,
		family: Binder<Rc<Self>>,
	},
	Cons(Rc<Self>, Rc<Self>),
	Car(Rc<Self>),
	Cdr(Rc<Self>),

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
	RecList {
		target: Rc<Self>,
		base_ty: Rc<Self>,
		base: Rc<Self>,
		step: Rc<Self>,
	},
	IndList {
		target: Rc<Self>,
		motive: Rc<Self>,
		base: Rc<Self>,
		step: Rc<Self>,
	},

	// Empty type.
	Absurd,
	IndAbsurd {
		target: Rc<Self>,
		motive: Rc<Self>,
	},

	// Equality.
	Equal {
		ty: Rc<Self>,
		from: Rc<Self>,
		to: Rc<Self>,
	},
	Same(Rc<Self>),
	Replace {
		target: Rc<Self>,
		motive: Rc<Self>,
		base: Rc<Self>,
	},
	Trans(Rc<Self>, Rc<Self>),
	Cong {
		target: Rc<Self>,
		ty: Rc<Self>,
		function: Rc<Self>,
	},
	Symm(Rc<Self>),
	IndEqual {
		target: Rc<Self>,
		motive: Rc<Self>,
		base: Rc<Self>,
	},

	// Vectors.
	Vec {
		ty: Rc<Self>,
		len: Rc<Self>,
	},
	VecNil,
	VecCons(Rc<Self>, Rc<Self>),
	Head(Rc<Self>),
	Tail(Rc<Self>),
	IndVec {
		len: Rc<Self>,
		target: Rc<Self>,
		motive: Rc<Self>,
		base: Rc<Self>,
		step: Rc<Self>,
	},

	// Sums.
	Either(Rc<Self>, Rc<Self>),
	Left(Rc<Self>),
	Right(Rc<Self>),
	IndEither {
		target: Rc<Self>,
		motive: Rc<Self>,
		left: Rc<Self>,
		right: Rc<Self>,
	},
}

impl Term {
	pub fn number(n: u64) -> Self { (0..n).fold(Self::Zero, |term, _| Self::Add1(term.into())) }

	/// The immediate sub-terms, binder bodies included, in left-to-right order.
	pub fn children(&self) -> Vec<&Rc<Self>> {
		use Term::*;
		match self {
			Variable(_) | Universe | Nat | Zero | Atom | Quote(_) | Trivial | Sole | ListNil | Absurd | VecNil =>
				vec![],
			Todo { ty, .. } => vec![ty],
			Add1(a) | Car(a) | Cdr(a) | List(a) | Same(a) | Symm(a) | Head(a) | Tail(a) | Left(a) | Right(a) =>
				vec![a],
			Lambda(body) => vec![&body.body],
			Pi { base, family } | Sigma { base, family } => vec![base, &family.body],
			The { ty: a, term: b }
			| Apply { callee: a, argument: b }
			| Cons(a, b)
			| ListCons(a, b)
			| Trans(a, b)
			| VecCons(a, b)
			| Either(a, b)
			| IndAbsurd { target: a, motive: b }
			| Vec { ty: a, len: b } => vec![a, b],
			Equal { ty: a, from: b, to: c }
			| Replace { target: a, motive: b, base: c }
			| Cong { target: a, ty: b, function: c }
			| IndEqual { target: a, motive: b, base: c } => vec![a, b, c],
			WhichNat { target: a, base_ty: b, base: c, step: d }
			| IterNat { target: a, base_ty: b, base: c, step: d }
			| RecNat { target: a, base_ty: b, base: c, step: d }
			| RecList { target: a, base_ty: b, base: c, step: d }
			| IndNat { target: a, motive: b, base: c, step: d }
			| IndList { target: a, motive: b, base: c, step: d }
			| IndEither { target: a, motive: b, left: c, right: d } => vec![a, b, c, d],
			IndVec { len, target, motive, base, step } => vec![len, target, motive, base, step],
		}
	}

	/// Collects every hole in the term in left-to-right order.
	pub fn holes(&self) -> Vec<(Range, Rc<Self>)> {
		let mut holes = Vec::new();
		self.collect_holes(&mut holes);
		holes
	}

	fn collect_holes(&self, holes: &mut Vec<(Range, Rc<Self>)>) {
		if let Self::Todo { range, ty } = self {
			return holes.push((*range, ty.clone()));
		}
		for child in self.children() {
			child.collect_holes(holes);
		}
	}

	pub fn occurs_free(&self, name: &str) -> bool {
		match self {
			Self::Variable(x) => &**x == name,
			Self::Lambda(body) => &*body.parameter != name && body.body.occurs_free(name),
			Self::Pi { base, family } | Self::Sigma { base, family } =>
				base.occurs_free(name) || (&*family.parameter != name && family.body.occurs_free(name)),
			_ => self.children().into_iter().any(|child| child.occurs_free(name)),
		}
	}
}
