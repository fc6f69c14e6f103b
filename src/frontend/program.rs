use tracing::{debug, info};

use crate::{
	common::Range,
	frontend::{
		context::{Binding, Context, Renaming},
		elaborate::{Annotated, ElaborationError},
		tactic::ProofState,
	},
	ir::{presyntax::Declaration, syntax::Term},
};

/// Something a program reports besides errors.
#[derive(Debug, Clone)]
pub enum Output {
	/// A bare expression's type and normal form.
	Normal { ty: Term, term: Term },
	/// A hole and the type expected of it.
	Hole { range: Range, ty: Term },
}

/// The result of running a program: the final context, every output, and the error that stopped it, if any.
#[derive(Debug, Clone, Default)]
pub struct Session {
	pub context: Context,
	pub outputs: Vec<Output>,
	pub error: Option<ElaborationError>,
}

/// Runs each declaration in order, threading one context and stopping at the first error.
pub fn run(declarations: &[Declaration]) -> Session {
	debug!(declarations = declarations.len(), "running program");
	let mut session = Session::default();
	for declaration in declarations {
		if let Err(error) = session.declare(declaration) {
			debug!(range = ?error.range, "stopping at error");
			session.error = Some(error);
			break;
		}
	}
	session
}

impl Session {
	fn holes(&mut self, term: &Term) {
		for (range, ty) in term.holes() {
			info!(?range, "found hole");
			self.outputs.push(Output::Hole { range, ty: ty.as_ref().clone() });
		}
	}

	fn declare(&mut self, declaration: &Declaration) -> Result<(), ElaborationError> {
		let renaming = Renaming::empty();
		match declaration {
			Declaration::Claim(name, ty) => {
				let ty = self.context.elaborate_type(&renaming, ty)?;
				self.holes(&ty);
				let ty = self.context.evaluate(&ty);
				self.context = self.context.claim(name.name.clone(), ty).map_err(|e| e.at(name.range))?;
				debug!(name = %name.name, "claimed");
			}
			Declaration::Define(name, expr) => {
				let Annotated { ty, term } = match self.context.lookup(&name.name) {
					Some(Binding::Claim(ty)) => {
						let ty = ty.clone();
						let term = self.context.check(&renaming, expr, &ty)?;
						Annotated { ty, term }
					}
					_ => self.context.infer(&renaming, expr)?,
				};
				self.holes(&term);
				let value = self.context.evaluate(&term);
				self.context = self.context.define(name.name.clone(), ty, value).map_err(|e| e.at(name.range))?;
				debug!(name = %name.name, "defined");
			}
			Declaration::CheckSame { ty, left, right } => {
				let ty = self.context.elaborate_type(&renaming, ty)?;
				let ty_value = self.context.evaluate(&ty);
				let left = self.context.check(&renaming, left, &ty_value)?;
				let right_range = right.range;
				let right = self.context.check(&renaming, right, &ty_value)?;
				self.holes(&left);
				self.holes(&right);
				let left = self.context.evaluate(&left);
				let right = self.context.evaluate(&right);
				self.context.same(&ty_value, &left, &right).map_err(|e| e.at(right_range))?;
			}
			Declaration::DefineTactically(name, tactics) => {
				let proof = ProofState::start(name.name.clone(), &self.context, name.range)?;
				let proof = tactics.iter().try_fold(proof, |proof, tactic| proof.apply(tactic))?;
				let term = proof.finish()?;
				self.holes(&term);
				let value = self.context.evaluate(&term);
				self.context =
					self.context.define(name.name.clone(), proof.claim().clone(), value).map_err(|e| e.at(name.range))?;
				debug!(name = %name.name, "proved");
			}
			Declaration::Expression(expr) => {
				let (ty, term) = self.context.synthesize(&renaming, expr)?;
				self.holes(&term);
				let ty_value = self.context.evaluate(&ty);
				let term = self.context.read_back(&ty_value, &self.context.evaluate(&term));
				self.outputs.push(Output::Normal { ty, term });
			}
		}
		Ok(())
	}
}
