use std::rc::Rc;

use tracing::{debug, trace};

use crate::{
	common::{bind, Name, Range},
	frontend::{
		context::{Binding, Context, Renaming},
		elaborate::{Annotated, ElaborationError, ElaborationErrorKind, ExpectedFormer},
		evaluate::EvaluateWith as _,
	},
	ir::{
		presyntax::{Expression, Tactic, TacticKind},
		semantics::{Closure, Value},
		syntax::Term,
	},
	utility::rc,
};

/// A proof in progress: a tree of goals stored in an arena, rooted at index zero.
#[derive(Clone, Debug)]
pub struct ProofState {
	pub name: Name,
	pub range: Range,
	nodes: Vec<Goal>,
}

#[derive(Clone, Debug)]
struct Goal {
	ty: Value,
	context: Context,
	renaming: Renaming,
	parent: Option<usize>,
	children: Vec<usize>,
	step: Option<Step>,
	complete: bool,
}

/// How a goal was refined; determines how its solution is assembled from its children's.
#[derive(Clone, Debug)]
enum Step {
	Exact(Term),
	Intro(Name),
	Exists { witness: Term, name: Name },
	// NOTE: The second child only exists once the first is solved.
	Split(Rc<Closure>),
	Left,
	Right,
	ElimNat { target: Rc<Term>, motive: Rc<Term> },
	ElimList { target: Rc<Term>, motive: Rc<Term> },
	ElimVec { len: Rc<Term>, target: Rc<Term>, motive: Rc<Term> },
	ElimEither { target: Rc<Term>, motive: Rc<Term> },
	ElimEqual { target: Rc<Term>, motive: Rc<Term> },
	ElimAbsurd { target: Rc<Term>, motive: Rc<Term> },
}

/// A new goal produced by a tactic.
struct Subgoal {
	ty: Value,
	context: Context,
	renaming: Renaming,
}

impl ProofState {
	/// Begins a proof of a claimed but not yet defined name.
	pub fn start(name: Name, context: &Context, range: Range) -> Result<Self, ElaborationError> {
		let Some(Binding::Claim(ty)) = context.lookup(&name) else {
			return Err(ElaborationErrorKind::NotClaimed(name).at(range));
		};
		debug!(%name, "starting proof");
		let root = Goal {
			ty: ty.clone(),
			context: context.clone(),
			renaming: Renaming::empty(),
			parent: None,
			children: Vec::new(),
			step: None,
			complete: false,
		};
		Ok(Self { name, range, nodes: vec![root] })
	}

	pub fn is_complete(&self) -> bool { self.nodes[0].complete }

	/// The type of the proposition being proved.
	pub fn claim(&self) -> &Value { &self.nodes[0].ty }

	/// The first unsolved goal in depth-first, left-to-right order.
	fn focus(&self) -> Option<usize> {
		let mut stack = vec![0];
		while let Some(id) = stack.pop() {
			let goal = &self.nodes[id];
			if goal.complete {
				continue;
			}
			if goal.step.is_none() {
				return Some(id);
			}
			stack.extend(goal.children.iter().rev());
		}
		None
	}

	/// The type of the focused goal, read back in its context.
	pub fn current_goal(&self) -> Option<Term> {
		let goal = &self.nodes[self.focus()?];
		Some(goal.context.read_back_type(&goal.ty))
	}

	/// Applies a tactic to the focused goal, leaving `self` untouched on failure.
	pub fn apply(&self, tactic: &Tactic) -> Result<Self, ElaborationError> {
		let focus = self.focus().ok_or_else(|| ElaborationErrorKind::NoProofInProgress.at(tactic.range))?;
		trace!(goal = focus, tactic = ?tactic.kind, "applying tactic");
		let (step, subgoals) = self.nodes[focus].refine(tactic)?;
		let mut state = self.clone();
		for subgoal in subgoals {
			state.push(focus, subgoal);
		}
		state.nodes[focus].step = Some(step);
		state.settle(focus);
		debug!(name = %state.name, complete = state.is_complete(), "applied tactic");
		Ok(state)
	}

	fn push(&mut self, parent: usize, subgoal: Subgoal) {
		let id = self.nodes.len();
		self.nodes.push(Goal {
			ty: subgoal.ty,
			context: subgoal.context,
			renaming: subgoal.renaming,
			parent: Some(parent),
			children: Vec::new(),
			step: None,
			complete: false,
		});
		self.nodes[parent].children.push(id);
	}

	/// Marks goals complete from `id` upward for as long as all their children are.
	fn settle(&mut self, id: usize) {
		let mut current = Some(id);
		while let Some(id) = current {
			if let Some(Step::Split(family)) = &self.nodes[id].step {
				let first = self.nodes[id].children[0];
				if self.nodes[id].children.len() == 1 && self.nodes[first].complete {
					let goal = &self.nodes[id];
					let car = goal.context.evaluate(&self.solution_of(first));
					let subgoal =
						Subgoal { ty: family.evaluate_with(car), context: goal.context.clone(), renaming: goal.renaming.clone() };
					self.push(id, subgoal);
					return;
				}
			}
			let goal = &self.nodes[id];
			if goal.step.is_none() || !goal.children.iter().all(|&child| self.nodes[child].complete) {
				return;
			}
			self.nodes[id].complete = true;
			current = self.nodes[id].parent;
		}
	}

	/// The elaborated proof, once every goal is solved.
	pub fn solution(&self) -> Option<Term> { self.is_complete().then(|| self.solution_of(0)) }

	/// The elaborated proof, or the first unsolved goal as an error.
	pub fn finish(&self) -> Result<Term, ElaborationError> {
		match self.focus() {
			None => Ok(self.solution_of(0)),
			Some(id) => {
				let goal = &self.nodes[id];
				Err(ElaborationErrorKind::ProofIncomplete { goal: goal.context.read_back_type(&goal.ty) }.at(self.range))
			}
		}
	}

	fn solution_of(&self, id: usize) -> Term {
		let goal = &self.nodes[id];
		let child = |index: usize| rc!(self.solution_of(goal.children[index]));
		let Some(step) = &goal.step else { unreachable!("solutions are only assembled for complete goals") };
		match step {
			Step::Exact(term) => term.clone(),
			Step::Intro(parameter) => Term::Lambda(bind(parameter.clone(), child(0))),
			Step::Exists { witness, .. } => {
				// The child sees the witness under a name; substitute it by evaluation.
				let subgoal = &self.nodes[goal.children[0]];
				let cdr = subgoal.context.evaluate(&child(0));
				Term::Cons(rc!(witness.clone()), rc!(goal.context.read_back(&subgoal.ty, &cdr)))
			}
			Step::Split(_) => Term::Cons(child(0), child(1)),
			Step::Left => Term::Left(child(0)),
			Step::Right => Term::Right(child(0)),
			Step::ElimNat { target, motive } =>
				Term::IndNat { target: target.clone(), motive: motive.clone(), base: child(0), step: child(1) },
			Step::ElimList { target, motive } =>
				Term::IndList { target: target.clone(), motive: motive.clone(), base: child(0), step: child(1) },
			Step::ElimVec { len, target, motive } => Term::IndVec {
				len: len.clone(),
				target: target.clone(),
				motive: motive.clone(),
				base: child(0),
				step: child(1),
			},
			Step::ElimEither { target, motive } =>
				Term::IndEither { target: target.clone(), motive: motive.clone(), left: child(0), right: child(1) },
			Step::ElimEqual { target, motive } =>
				Term::IndEqual { target: target.clone(), motive: motive.clone(), base: child(0) },
			Step::ElimAbsurd { target, motive } => Term::IndAbsurd { target: target.clone(), motive: motive.clone() },
		}
	}
}

impl Goal {
	fn subgoal(&self, ty: Value) -> Subgoal {
		Subgoal { ty, context: self.context.clone(), renaming: self.renaming.clone() }
	}

	fn inapplicable(&self, range: Range) -> ElaborationError {
		ElaborationErrorKind::TacticInapplicable { goal: self.context.read_back_type(&self.ty) }.at(range)
	}

	/// Checks an explicit motive, or abstracts the goal over the given variables.
	fn motive(
		&self,
		motive: Option<&Expression>,
		motive_ty: &Value,
		abstracted: &[&Term],
		range: Range,
	) -> Result<Term, ElaborationError> {
		if let Some(motive) = motive {
			return self.context.check(&self.renaming, motive, motive_ty);
		}
		let body = self.context.read_back_type(&self.ty);
		abstracted.iter().rev().try_fold(body, |body, term| match term {
			Term::Variable(name) => Ok(Term::Lambda(bind(name.clone(), body))),
			_ => Err(ElaborationErrorKind::CouldNotInferMotive.at(range)),
		})
	}

	/// Ensures an eliminator's result type is the goal.
	fn concludes(&self, ty: &Value, range: Range) -> Result<(), ElaborationError> {
		self.context.same_type(&self.ty, ty).map_err(|e| e.at(range))
	}

	fn refine(&self, tactic: &Tactic) -> Result<(Step, Vec<Subgoal>), ElaborationError> {
		use TacticKind as K;
		use Value as V;
		let range = tactic.range;
		Ok(match &tactic.kind {
			K::Intro(written) => {
				let V::Pi { base, family } = self.ty.force() else { return Err(self.inapplicable(range)) };
				let parameter = self.context.fresh(&written.name);
				let variable = V::variable(parameter.clone(), base.as_ref().clone());
				let subgoal = Subgoal {
					ty: family.evaluate_with(variable),
					context: self.context.assume(parameter.clone(), base.into()),
					renaming: self.renaming.extend(written.name.clone(), parameter.clone()),
				};
				(Step::Intro(parameter), vec![subgoal])
			}
			K::Exact(expr) => (Step::Exact(self.context.check(&self.renaming, expr, &self.ty)?), vec![]),
			K::Exists(expr, written) => {
				let V::Sigma { base, family } = self.ty.force() else { return Err(self.inapplicable(range)) };
				let witness = self.context.check(&self.renaming, expr, &base)?;
				let witness_value = self.context.evaluate(&witness);
				let name = self.context.fresh(&written.name);
				let subgoal = Subgoal {
					ty: family.evaluate_with(witness_value.clone()),
					context: self.context.assume_definition(name.clone(), base.into(), witness_value),
					renaming: self.renaming.extend(written.name.clone(), name.clone()),
				};
				(Step::Exists { witness, name }, vec![subgoal])
			}
			K::Split => {
				let V::Sigma { base, family } = self.ty.force() else { return Err(self.inapplicable(range)) };
				(Step::Split(family), vec![self.subgoal(base.into())])
			}
			K::Left | K::Right => {
				let V::Either(left, right) = self.ty.force() else { return Err(self.inapplicable(range)) };
				match &tactic.kind {
					K::Left => (Step::Left, vec![self.subgoal(left.into())]),
					_ => (Step::Right, vec![self.subgoal(right.into())]),
				}
			}
			K::ElimNat { target, motive } => {
				let target = self.context.check(&self.renaming, target, &V::Nat)?;
				let motive = self.motive(motive.as_ref(), &V::arrow(V::Nat, V::Universe), &[&target], range)?;
				let motive_value = self.context.evaluate(&motive);
				self.concludes(&motive_value.apply(self.context.evaluate(&target)), range)?;
				let base = self.subgoal(motive_value.apply(V::Zero));
				let step = self.subgoal(V::ind_nat_step_type(motive_value));
				(Step::ElimNat { target: rc!(target), motive: rc!(motive) }, vec![base, step])
			}
			K::ElimList { target: expr, motive } => {
				let Annotated { ty, term: target } = self.context.infer(&self.renaming, expr)?;
				let V::List(element) = ty.force() else {
					return Err(self.context.expected_former(ExpectedFormer::List, &ty).at(expr.range));
				};
				let motive_ty = V::arrow(V::List(element.clone()), V::Universe);
				let motive = self.motive(motive.as_ref(), &motive_ty, &[&target], range)?;
				let motive_value = self.context.evaluate(&motive);
				self.concludes(&motive_value.apply(self.context.evaluate(&target)), range)?;
				let base = self.subgoal(motive_value.apply(V::ListNil));
				let step = self.subgoal(V::ind_list_step_type(element.into(), motive_value));
				(Step::ElimList { target: rc!(target), motive: rc!(motive) }, vec![base, step])
			}
			K::ElimVec { target: expr, motive } => {
				let Annotated { ty, term: target } = self.context.infer(&self.renaming, expr)?;
				let V::Vec { ty: element, len } = ty.force() else {
					return Err(self.context.expected_former(ExpectedFormer::Vec, &ty).at(expr.range));
				};
				let len = self.context.read_back(&V::Nat, &len);
				let motive_ty = V::ind_vec_motive_type(element.as_ref().clone());
				let motive = self.motive(motive.as_ref(), &motive_ty, &[&len, &target], range)?;
				let motive_value = self.context.evaluate(&motive);
				let result = motive_value.apply(self.context.evaluate(&len)).apply(self.context.evaluate(&target));
				self.concludes(&result, range)?;
				let base = self.subgoal(motive_value.apply(V::Zero).apply(V::VecNil));
				let step = self.subgoal(V::ind_vec_step_type(element.into(), motive_value));
				(Step::ElimVec { len: rc!(len), target: rc!(target), motive: rc!(motive) }, vec![base, step])
			}
			K::ElimEither { target: expr, motive } => {
				let Annotated { ty, term: target } = self.context.infer(&self.renaming, expr)?;
				let V::Either(left, right) = ty.force() else {
					return Err(self.context.expected_former(ExpectedFormer::Either, &ty).at(expr.range));
				};
				let motive = self.motive(motive.as_ref(), &V::arrow(ty.force(), V::Universe), &[&target], range)?;
				let motive_value = self.context.evaluate(&motive);
				self.concludes(&motive_value.apply(self.context.evaluate(&target)), range)?;
				let left = self.subgoal(V::ind_either_case_type(left.into(), motive_value.clone(), V::Left));
				let right = self.subgoal(V::ind_either_case_type(right.into(), motive_value, V::Right));
				(Step::ElimEither { target: rc!(target), motive: rc!(motive) }, vec![left, right])
			}
			K::ElimEqual { target: expr, motive } => {
				let Annotated { ty, term: target } = self.context.infer(&self.renaming, expr)?;
				let V::Equal { ty: space, from, to } = ty.force() else {
					return Err(self.context.expected_former(ExpectedFormer::Equal, &ty).at(expr.range));
				};
				let to = self.context.read_back(&space, &to);
				let motive_ty = V::ind_equal_motive_type(space.into(), from.as_ref().clone());
				let motive = self.motive(motive.as_ref(), &motive_ty, &[&to, &target], range)?;
				let motive_value = self.context.evaluate(&motive);
				let result = motive_value.apply(self.context.evaluate(&to)).apply(self.context.evaluate(&target));
				self.concludes(&result, range)?;
				let base = self.subgoal(motive_value.apply(from.as_ref().clone()).apply(V::Same(from)));
				(Step::ElimEqual { target: rc!(target), motive: rc!(motive) }, vec![base])
			}
			K::ElimAbsurd { target } => {
				let target = self.context.check(&self.renaming, target, &V::Absurd)?;
				let motive = self.context.read_back_type(&self.ty);
				(Step::ElimAbsurd { target: rc!(target), motive: rc!(motive) }, vec![])
			}
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		common::name,
		frontend::{
			conversion::alpha_equivalent,
			evaluate::Evaluate as _,
			parse::{parse, parse_expression},
			program::{run, Output},
		},
		ir::{presyntax::Declaration, source::lex},
	};

	fn claimed(ty: &str) -> Context {
		let context = Context::empty();
		let expr = parse_expression(&lex(ty).unwrap()).unwrap();
		let ty = context.elaborate_type(&Renaming::empty(), &expr).unwrap();
		context.claim(name("p"), context.evaluate(&ty)).unwrap()
	}

	fn tactics(source: &str) -> Vec<Tactic> {
		let declarations = parse(&lex(&format!("(define-tactically p {source})")).unwrap()).unwrap();
		let Some(Declaration::DefineTactically(_, tactics)) = declarations.into_iter().next() else { panic!() };
		tactics
	}

	fn prove(ty: &str, source: &str) -> Result<ProofState, ElaborationError> {
		let context = claimed(ty);
		let start = ProofState::start(name("p"), &context, (0, 0))?;
		tactics(source).iter().try_fold(start, |state, tactic| state.apply(tactic))
	}

	/// Proves `p` with the tactics, then prints the normal form of `application`.
	fn apply_proof(ty: &str, source: &str, application: &str) -> String {
		let program = format!("(claim p {ty}) (define-tactically p {source}) {application}");
		let session = run(&parse(&lex(&program).unwrap()).unwrap());
		assert!(session.error.is_none(), "{program}: {:?}", session.error);
		let Some(Output::Normal { ty, term }) = session.outputs.last() else { panic!("{program}") };
		format!("(the {ty} {term})")
	}

	#[test]
	fn test_identity_by_intro_and_exact() {
		let state = prove("(-> Nat Nat)", "(intro n) (exact n)").unwrap();
		let solution = state.solution().unwrap();
		let identity = Term::Lambda(bind(name("x"), rc!(Term::Variable(name("x")))));
		assert!(alpha_equivalent(&solution, &identity));
	}

	#[test]
	fn test_start_requires_a_pending_claim() {
		let context = Context::empty();
		let error = ProofState::start(name("p"), &context, (0, 0)).unwrap_err();
		assert!(matches!(error.kind, ElaborationErrorKind::NotClaimed(_)));
	}

	#[test]
	fn test_failed_tactic_leaves_state_unchanged() {
		let state = prove("(-> Nat Nat)", "").unwrap();
		let split = &tactics("(split)")[0];
		let error = state.apply(split).unwrap_err();
		assert!(matches!(error.kind, ElaborationErrorKind::TacticInapplicable { .. }));
		assert!(matches!(state.current_goal(), Some(Term::Pi { .. })));
		assert!(state.apply(&tactics("(intro n)")[0]).is_ok());
	}

	#[test]
	fn test_incomplete_proof_has_no_solution() {
		let state = prove("(-> Nat Atom)", "(intro n)").unwrap();
		assert!(!state.is_complete());
		assert!(state.solution().is_none());
		assert!(matches!(state.current_goal(), Some(Term::Atom)));
	}

	#[test]
	fn test_tactics_after_completion_fail() {
		let error = prove("Nat", "(exact 1) (exact 2)").unwrap_err();
		assert!(matches!(error.kind, ElaborationErrorKind::NoProofInProgress));
	}

	#[test]
	fn test_split_creates_second_goal_from_first_solution() {
		let state = prove("(Sigma ((n Nat)) (= Nat n n))", "(split) (exact 3)").unwrap();
		let Some(Term::Equal { from, .. }) = state.current_goal() else { panic!() };
		assert!(alpha_equivalent(&from, &Term::number(3)));
		let state = state.apply(&tactics("(exact (same 3))")[0]).unwrap();
		assert!(state.is_complete());
	}

	#[test]
	fn test_exists_names_the_witness() {
		let state = prove("(Sigma ((n Nat)) (= Nat n 2))", "(exists 2 k) (exact (same k))").unwrap();
		let solution = state.solution().unwrap();
		let Term::Cons(_, cdr) = &solution else { panic!() };
		assert!(alpha_equivalent(cdr, &Term::Same(rc!(Term::number(2)))));
	}

	#[test]
	fn test_elim_nat_with_inferred_motive() {
		let source = "(intro n) (elimNat n) (exact 0) (intro k) (intro almost) (exact (add1 almost))";
		let state = prove("(-> Nat Nat)", source).unwrap();
		let solution = state.solution().unwrap().evaluate();
		assert!(alpha_equivalent(&Context::empty().read_back(&Value::Nat, &solution.apply(Value::Zero)), &Term::Zero));
		let three = Term::number(3).evaluate();
		assert!(alpha_equivalent(&Context::empty().read_back(&Value::Nat, &solution.apply(three)), &Term::number(3)));
	}

	#[test]
	fn test_motive_cannot_be_inferred_for_compound_targets() {
		let error = prove("Nat", "(elimNat (add1 0))").unwrap_err();
		assert!(matches!(error.kind, ElaborationErrorKind::CouldNotInferMotive));
	}

	#[test]
	fn test_either_and_absurd() {
		assert!(prove("(Either Nat Atom)", "(right) (exact 'a)").unwrap().is_complete());
		assert!(prove("(-> Absurd Nat)", "(intro x) (elimAbsurd x)").unwrap().is_complete());
	}

	#[test]
	fn test_elim_list() {
		let cases = "(exact 0) (intro e) (intro es) (intro almost) (exact (add1 almost))";
		for elim in ["(elimList l)", "(elimList l (lambda (xs) Nat))"] {
			let source = format!("(intro l) {elim} {cases}");
			let length = apply_proof("(-> (List Atom) Nat)", &source, "(p (:: 'a (:: 'b nil)))");
			assert_eq!(length, "(the Nat 2)", "{elim}");
		}
	}

	#[test]
	fn test_elim_vec() {
		let ty = "(Pi ((n Nat)) (-> (Vec Atom n) Nat))";
		let cases = "(exact 0) (intro k) (intro h) (intro t) (intro almost) (exact (add1 almost))";
		for elim in ["(elimVec v)", "(elimVec v (lambda (k xs) Nat))"] {
			let source = format!("(intro n) (intro v) {elim} {cases}");
			let length = apply_proof(ty, &source, "(p 2 (vec:: 'a (vec:: 'b vecnil)))");
			assert_eq!(length, "(the Nat 2)", "{elim}");
		}
	}

	#[test]
	fn test_elim_vec_abstracts_length_and_target() {
		let source = "(intro n) (intro v) (elimVec v) (exact 0) (intro k) (intro h) (intro t) (intro almost) \
		              (exact (add1 almost))";
		let state = prove("(Pi ((n Nat)) (-> (Vec Atom n) Nat))", source).unwrap();
		assert_eq!(
			state.solution().unwrap().to_string(),
			"(λ (n v) (ind-Vec n v (λ (n v) Nat) 0 (λ (k h t almost) (add1 almost))))"
		);
	}

	#[test]
	fn test_elim_either() {
		let cases = "(intro n) (exact n) (intro a) (exact 0)";
		for elim in ["(elimEither e)", "(elimEither e (lambda (x) Nat))"] {
			let source = format!("(intro e) {elim} {cases}");
			assert_eq!(apply_proof("(-> (Either Nat Atom) Nat)", &source, "(p (left 3))"), "(the Nat 3)", "{elim}");
			assert_eq!(apply_proof("(-> (Either Nat Atom) Nat)", &source, "(p (right 'a))"), "(the Nat 0)", "{elim}");
		}
	}

	#[test]
	fn test_elim_equal() {
		let ty = "(Pi ((m Nat) (n Nat)) (-> (= Nat m n) (= Nat n m)))";
		for elim in ["(elimEqual h)", "(elimEqual h (lambda (to q) (= Nat to m)))"] {
			let source = format!("(intro m) (intro n) (intro h) {elim} (exact (same m))");
			assert_eq!(apply_proof(ty, &source, "(p 2 2 (same 2))"), "(the (= Nat 2 2) (same 2))", "{elim}");
		}
	}

	#[test]
	fn test_elim_equal_abstracts_endpoint_and_target() {
		let state = prove(
			"(Pi ((m Nat) (n Nat)) (-> (= Nat m n) (= Nat n m)))",
			"(intro m) (intro n) (intro h) (elimEqual h) (exact (same m))",
		)
		.unwrap();
		assert_eq!(state.solution().unwrap().to_string(), "(λ (m n h) (ind-= h (λ (n h) (= Nat n m)) (same m)))");
	}

	#[test]
	fn test_printed_solutions_check_against_their_claims() {
		let proofs = [
			("(-> Nat Nat)", "(intro n) (exact n)"),
			("(-> Nat Nat)", "(intro n) (elimNat n) (exact 0) (intro k) (intro almost) (exact (add1 almost))"),
			("(Sigma ((n Nat)) (= Nat n 2))", "(exists 2 k) (exact (same k))"),
			("(Pair Nat Atom)", "(split) (exact 1) (exact 'b)"),
			("(Either Nat Atom)", "(left) (exact 4)"),
			("(-> Absurd Nat)", "(intro x) (elimAbsurd x)"),
			(
				"(-> (List Atom) Nat)",
				"(intro l) (elimList l) (exact 0) (intro e) (intro es) (intro almost) (exact (add1 almost))",
			),
			(
				"(Pi ((n Nat)) (-> (Vec Atom n) Nat))",
				"(intro n) (intro v) (elimVec v) (exact 0) (intro k) (intro h) (intro t) (intro almost) (exact almost)",
			),
			("(-> (Either Nat Atom) Nat)", "(intro e) (elimEither e) (intro n) (exact n) (intro a) (exact 0)"),
			(
				"(Pi ((m Nat) (n Nat)) (-> (= Nat m n) (= Nat n m)))",
				"(intro m) (intro n) (intro h) (elimEqual h) (exact (same m))",
			),
		];
		for (ty, source) in proofs {
			let context = claimed(ty);
			let state = prove(ty, source).unwrap();
			let printed = state.solution().unwrap().to_string();
			let solution = parse_expression(&lex(&printed).unwrap()).unwrap();
			let checked = context.check(&Renaming::empty(), &solution, state.claim());
			assert!(checked.is_ok(), "{ty}: {printed}: {:?}", checked.err());
		}
	}
}
