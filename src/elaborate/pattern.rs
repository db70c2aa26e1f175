//! Pattern analysis and match translation.
//!
//! The engine owns name and wildcard patterns and the shape of the match
//! construct; every structured pattern is delegated to the fragment of the
//! scrutinee's canonical type. A match translates to a chain of conditional
//! expressions over a single evaluation of the scrutinee, terminated by a
//! call to the reserved match-failure hook.

use crate::{
	elaborate::{
		context::Context,
		error::{ElabError, ElabErrorKind},
	},
	fragment::{Bindings, Form, PatBindings},
	ir::{
		ast::{Expr, ExprKind, NameConst, Param, Pat, PatKind},
		ty::TyExpr,
	},
};

/// The function the host must provide for rule exhaustion at run time.
pub const MATCH_FAIL: &str = "__match_fail";

impl Context<'_> {
	/// Checks a pattern against the scrutinee type, binding its identifiers
	/// into the innermost scope. A name bound twice within one pattern is
	/// rejected.
	pub fn ana_pat(&mut self, pat: &Pat, ty: &TyExpr) -> Result<Bindings, ElabError> {
		match &pat.kind {
			PatKind::Name(name) => {
				if self.scopes.binds_term_innermost(*name) {
					return Err(
						ElabErrorKind::Ty(format!(
							"pattern binds `{}` more than once",
							self.interner.resolve(name)
						))
						.at(pat.range),
					);
				}
				let (uniq, _) = self.fresh_uniq(*name);
				self.scopes.bind_term(*name, uniq, ty.clone());
				self.set_uniq(pat.id, uniq);
				Ok(vec![(*name, ty.clone())])
			}
			PatKind::Wildcard => Ok(Vec::new()),
			_ => {
				let form = match &pat.kind {
					PatKind::Int(_) | PatKind::Float(_) | PatKind::Str(_) => Form::Literal,
					PatKind::NameConst(_) => Form::NameConst,
					PatKind::Tuple(_) => Form::Tuple,
					PatKind::Call { .. } => Form::Call,
					PatKind::Name(_) | PatKind::Wildcard => unreachable!(),
				};
				let (fragment, idx) = self.canonical_of(ty, pat.range)?;
				self.set_delegate(pat.id, fragment, form, idx.clone());
				let delegate = self.fragments.get(fragment);
				match form {
					Form::Literal => delegate.ana_pat_literal(self, pat, &idx),
					Form::NameConst => delegate.ana_pat_name_const(self, pat, &idx),
					Form::Tuple => delegate.ana_pat_tuple(self, pat, &idx),
					Form::Call => delegate.ana_pat_call(self, pat, &idx),
					_ => unreachable!(),
				}
			}
		}
	}

	/// Emits the guard deciding whether an analyzed pattern matches the
	/// translated scrutinee, together with the refinement expression for
	/// each identifier the pattern binds.
	pub fn trans_pat(&mut self, pat: &Pat, scrutinee: &Expr) -> Result<(Expr, PatBindings), ElabError> {
		match &pat.kind {
			PatKind::Name(_) => {
				let uniq = self
					.uniq_of(pat.id)
					.ok_or_else(|| ElabErrorKind::Internal("translated pattern was never analyzed".to_owned()).at(pat.range))?;
				Ok((ExprKind::NameConst(NameConst::True).synth(), vec![(uniq, scrutinee.clone())]))
			}
			PatKind::Wildcard => Ok((ExprKind::NameConst(NameConst::True).synth(), Vec::new())),
			_ => {
				let (fragment, form, idx) = self
					.delegate_of(pat.id)
					.ok_or_else(|| ElabErrorKind::Internal("translated pattern has no delegate".to_owned()).at(pat.range))?;
				let delegate = self.fragments.get(fragment);
				match form {
					Form::Literal => delegate.trans_pat_literal(self, pat, &idx, scrutinee),
					Form::NameConst => delegate.trans_pat_name_const(self, pat, &idx, scrutinee),
					Form::Tuple => delegate.trans_pat_tuple(self, pat, &idx, scrutinee),
					Form::Call => delegate.trans_pat_call(self, pat, &idx, scrutinee),
					_ => Err(ElabErrorKind::Internal("pattern dispatched at a non-pattern form".to_owned()).at(pat.range)),
				}
			}
		}
	}

	/// Elaborates a match: the scrutinee synthesizes, each rule's pattern is
	/// analyzed against it, and every rule body agrees on one result type.
	/// Under analysis the expected type is imposed on all bodies; under
	/// synthesis the first body decides.
	pub(crate) fn elab_match(&mut self, e: &Expr, expected: Option<&TyExpr>) -> Result<TyExpr, ElabError> {
		let ExprKind::Match { scrutinee, rules } = &e.kind else {
			return Err(ElabErrorKind::Internal("match elaboration on a non-match node".to_owned()).at(e.range));
		};
		if rules.is_empty() {
			return Err(ElabErrorKind::Ty("match requires at least one rule".to_owned()).at(e.range));
		}
		let scrutinee_ty = self.syn(scrutinee)?;
		let mut result = expected.cloned();
		for rule in rules {
			let mut ctx = self.scoped();
			ctx.ana_pat(&rule.pat, &scrutinee_ty)?;
			match &result {
				Some(ty) => {
					let ty = ty.clone();
					ctx.ana(&rule.body, &ty)?;
				}
				None => result = Some(ctx.syn(&rule.body)?),
			}
		}
		Ok(result.ok_or_else(|| ElabErrorKind::Internal("match elaborated no rule".to_owned()).at(e.range))?)
	}

	/// Translates a match to a right-nested conditional chain. The scrutinee
	/// is evaluated exactly once; each rule body closes over its pattern
	/// bindings through an immediately applied lambda.
	pub(crate) fn trans_match(&mut self, e: &Expr) -> Result<Expr, ElabError> {
		let ExprKind::Match { scrutinee, rules } = &e.kind else {
			return Err(ElabErrorKind::Internal("match translation on a non-match node".to_owned()).at(e.range));
		};
		let scrutinee_trans = self.trans(scrutinee)?;
		// A bare name needs no rebinding to stay single-evaluation.
		let (scrutinee_ref, wrapper) = match &scrutinee_trans.kind {
			ExprKind::Name(_) => (scrutinee_trans.clone(), None),
			_ => {
				let base = self.interner.get_or_intern("scrutinee");
				let (_, minted) = self.fresh_uniq(base);
				(ExprKind::Name(minted).synth(), Some((minted, scrutinee_trans)))
			}
		};

		let fail = self.interner.get_or_intern(MATCH_FAIL);
		let mut chain = ExprKind::Call {
			callee: Box::new(ExprKind::Name(fail).synth()),
			args: Vec::new(),
			keywords: Vec::new(),
		}
		.synth();

		for rule in rules.iter().rev() {
			let (guard, bindings) = self.trans_pat(&rule.pat, &scrutinee_ref)?;
			let mut body = self.trans(&rule.body)?;
			if !bindings.is_empty() {
				let mut params = Vec::with_capacity(bindings.len());
				let mut args = Vec::with_capacity(bindings.len());
				for (uniq, refinement) in bindings {
					params.push(Param::new(self.uniq_name(uniq, rule.pat.range)?, None, (0, 0)));
					args.push(refinement);
				}
				body = ExprKind::Call {
					callee: Box::new(ExprKind::Lambda { params, body: Box::new(body) }.synth()),
					args,
					keywords: Vec::new(),
				}
				.synth();
			}
			chain = if matches!(guard.kind, ExprKind::NameConst(NameConst::True)) {
				// An irrefutable rule shadows everything after it.
				body
			} else {
				ExprKind::IfExp { test: Box::new(guard), body: Box::new(body), orelse: Box::new(chain) }.synth()
			};
		}

		Ok(match wrapper {
			Some((minted, scrutinee_trans)) => ExprKind::Call {
				callee: Box::new(
					ExprKind::Lambda { params: vec![Param::new(minted, None, (0, 0))], body: Box::new(chain) }.synth(),
				),
				args: vec![scrutinee_trans],
				keywords: Vec::new(),
			}
			.synth(),
			None => chain,
		})
	}
}
