//! The unit fragment: the one-element type introduced by the empty tuple.

use crate::{
	elaborate::{
		context::Context,
		error::{ElabError, ElabErrorKind},
	},
	fragment::{Bindings, Fragment, PatBindings},
	ir::{
		ast::{Expr, ExprKind, NameConst, Pat, PatKind},
		ty::Idx,
	},
};

pub struct UnitFragment;

impl Fragment for UnitFragment {
	fn name(&self) -> &'static str { "unit" }

	fn trivial_idx(&self, _ctx: &mut Context, _range: (usize, usize)) -> Result<Idx, ElabError> { Ok(Idx::Unit) }

	fn ana_tuple(&self, _ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<(), ElabError> {
		match &e.kind {
			ExprKind::Tuple(elements) if elements.is_empty() => Ok(()),
			_ => Err(ElabErrorKind::Ty("the unit value is the empty tuple".to_owned()).at(e.range)),
		}
	}

	fn trans_tuple(&self, _ctx: &mut Context, _e: &Expr, _idx: &Idx) -> Result<Expr, ElabError> {
		Ok(ExprKind::Tuple(Vec::new()).synth())
	}

	fn ana_pat_tuple(&self, _ctx: &mut Context, pat: &Pat, _idx: &Idx) -> Result<Bindings, ElabError> {
		match &pat.kind {
			PatKind::Tuple(elements) if elements.is_empty() => Ok(Vec::new()),
			_ => Err(ElabErrorKind::Ty("the unit pattern is the empty tuple".to_owned()).at(pat.range)),
		}
	}

	fn trans_pat_tuple(
		&self,
		_ctx: &mut Context,
		_pat: &Pat,
		_idx: &Idx,
		_scrutinee: &Expr,
	) -> Result<(Expr, PatBindings), ElabError> {
		// A unit pattern always matches.
		Ok((ExprKind::NameConst(NameConst::True).synth(), Vec::new()))
	}
}
