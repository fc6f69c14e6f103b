use std::collections::HashSet;

use crate::common::{Name, Range};

#[derive(Debug, Clone)]
pub struct Expression {
	pub range: Range,
	pub preterm: Preterm,
}

/// A name written at a binding site.
#[derive(Debug, Clone)]
pub struct ParsedName {
	pub range: Range,
	pub name: Name,
}

/// A `(name type)` entry of a `Π` or `Σ` telescope.
#[derive(Debug, Clone)]
pub struct Parameter {
	pub name: ParsedName,
	pub ty: Expression,
}

#[derive(Debug, Clone)]
pub enum Preterm {
	Variable(Name),
	The { ty: Box<Expression>, term: Box<Expression> },
	Todo,

	// Types.
	Universe,

	// Natural numbers.
	Nat,
	Zero,
	Add1(Box<Expression>),
	Number(u64),
	WhichNat { target: Box<Expression>, base: Box<Expression>, step: Box<Expression> },
	IterNat { target: Box<Expression>, base: Box<Expression>, step: Box<Expression> },
	RecNat { target: Box<Expression>, base: Box<Expression>, step: Box<Expression> },
	IndNat { target: Box<Expression>, motive: Box<Expression>, base: Box<Expression>, step: Box<Expression> },

	// Dependent functions.
	Arrow { domains: Vec<Expression>, codomain: Box<Expression> },
	Pi { parameters: Vec<Parameter>, family: Box<Expression> },
	Lambda { parameters: Vec<ParsedName>, body: Box<Expression> },
	Apply { callee: Box<Expression>, arguments: Vec<Expression> },

	// Dependent pairs.
	Sigma { parameters: Vec<Parameter>, family: Box<Expression> },
	Pair(Box<Expression>, Box<Expression>),
	Cons(Box<Expression>, Box<Expression>),
	Car(Box<Expression>),
	Cdr(Box<Expression>),

	// Atoms.
	Atom,
	Quote(Name),

	// Unit.
	Trivial,
	Sole,

	// Lists.
	List(Box<Expression>),
	ListNil,
	ListCons(Box<Expression>, Box<Expression>),
	RecList { target: Box<Expression>, base: Box<Expression>, step: Box<Expression> },
	IndList { target: Box<Expression>, motive: Box<Expression>, base: Box<Expression>, step: Box<Expression> },

	// Empty type.
	Absurd,
	IndAbsurd { target: Box<Expression>, motive: Box<Expression> },

	// Equality.
	Equal { ty: Box<Expression>, from: Box<Expression>, to: Box<Expression> },
	Same(Box<Expression>),
	Replace { target: Box<Expression>, motive: Box<Expression>, base: Box<Expression> },
	Trans(Box<Expression>, Box<Expression>),
	Cong { target: Box<Expression>, function: Box<Expression> },
	Symm(Box<Expression>),
	IndEqual { target: Box<Expression>, motive: Box<Expression>, base: Box<Expression> },

	// Vectors.
	Vec { ty: Box<Expression>, len: Box<Expression> },
	VecNil,
	VecCons(Box<Expression>, Box<Expression>),
	Head(Box<Expression>),
	Tail(Box<Expression>),
	IndVec {
		len: Box<Expression>,
		target: Box<Expression>,
		motive: Box<Expression>,
		base: Box<Expression>,
		step: Box<Expression>,
	},

	// Sums.
	Either(Box<Expression>, Box<Expression>),
	Left(Box<Expression>),
	Right(Box<Expression>),
	IndEither { target: Box<Expression>, motive: Box<Expression>, left: Box<Expression>, right: Box<Expression> },
}

impl Preterm {
	pub fn at(self, range: Range) -> Expression { Expression { range, preterm: self } }
}

impl Expression {
	/// Every name written in the expression, whether bound or free.
	pub fn occurring_names(&self) -> HashSet<Name> {
		let mut names = HashSet::new();
		self.collect_names(&mut names);
		names
	}

	fn collect_names(&self, names: &mut HashSet<Name>) {
		match &self.preterm {
			Preterm::Variable(name) => {
				names.insert(name.clone());
			}
			Preterm::Pi { parameters, .. } | Preterm::Sigma { parameters, .. } =>
				names.extend(parameters.iter().map(|parameter| parameter.name.name.clone())),
			Preterm::Lambda { parameters, .. } => names.extend(parameters.iter().map(|parameter| parameter.name.clone())),
			_ => (),
		}
		for child in self.children() {
			child.collect_names(names);
		}
	}

	/// The immediate sub-expressions in left-to-right order.
	pub fn children(&self) -> Vec<&Self> {
		use Preterm::*;
		match &self.preterm {
			Variable(_) | Todo | Universe | Nat | Zero | Number(_) | Atom | Quote(_) | Trivial | Sole | ListNil
			| Absurd | VecNil => vec![],
			Add1(a) | Car(a) | Cdr(a) | List(a) | Same(a) | Symm(a) | Head(a) | Tail(a) | Left(a) | Right(a) =>
				vec![&**a],
			The { ty: a, term: b }
			| Pair(a, b)
			| Cons(a, b)
			| ListCons(a, b)
			| Trans(a, b)
			| VecCons(a, b)
			| Either(a, b)
			| IndAbsurd { target: a, motive: b }
			| Cong { target: a, function: b }
			| Vec { ty: a, len: b } => vec![&**a, &**b],
			WhichNat { target: a, base: b, step: c }
			| IterNat { target: a, base: b, step: c }
			| RecNat { target: a, base: b, step: c }
			| RecList { target: a, base: b, step: c }
			| Equal { ty: a, from: b, to: c }
			| Replace { target: a, motive: b, base: c }
			| IndEqual { target: a, motive: b, base: c } => vec![&**a, &**b, &**c],
			IndNat { target: a, motive: b, base: c, step: d }
			| IndList { target: a, motive: b, base: c, step: d }
			| IndEither { target: a, motive: b, left: c, right: d } => vec![&**a, &**b, &**c, &**d],
			IndVec { len, target, motive, base, step } => vec![&**len, &**target, &**motive, &**base, &**step],
			Arrow { domains, codomain } => domains.iter().chain([&**codomain]).collect(),
			Pi { parameters, family } | Sigma { parameters, family } =>
				parameters.iter().map(|parameter| &parameter.ty).chain([&**family]).collect(),
			Lambda { body, .. } => vec![&**body],
			Apply { callee, arguments } => [&**callee].into_iter().chain(arguments).collect(),
		}
	}
}

/// A tactic together with the source range it was written at.
#[derive(Debug, Clone)]
pub struct Tactic {
	pub range: Range,
	pub kind: TacticKind,
}

#[derive(Debug, Clone)]
pub enum TacticKind {
	Intro(ParsedName),
	Exact(Expression),
	Exists(Expression, ParsedName),
	Split,
	ElimNat { target: Expression, motive: Option<Expression> },
	ElimList { target: Expression, motive: Option<Expression> },
	ElimVec { target: Expression, motive: Option<Expression> },
	ElimEither { target: Expression, motive: Option<Expression> },
	ElimEqual { target: Expression, motive: Option<Expression> },
	ElimAbsurd { target: Expression },
	Left,
	Right,
}

/// A top-level form of a program.
#[derive(Debug, Clone)]
pub enum Declaration {
	Claim(ParsedName, Expression),
	Define(ParsedName, Expression),
	CheckSame { ty: Expression, left: Expression, right: Expression },
	DefineTactically(ParsedName, Vec<Tactic>),
	Expression(Expression),
}
