//! The string fragment: string literals, concatenation, and equality.

use crate::{
	elaborate::{
		context::Context,
		error::{ElabError, ElabErrorKind},
	},
	fragment::{Bindings, Fragment, PatBindings},
	ir::{
		ast::{BinOp, CompareOp, Expr, ExprKind, Pat, PatKind},
		ty::{Idx, TyExpr},
	},
	utility::bx,
};

pub struct StringFragment;

impl StringFragment {
	fn ty(&self, ctx: &mut Context, range: (usize, usize)) -> Result<TyExpr, ElabError> {
		ctx.std_ty(self.name(), range)
	}
}

impl Fragment for StringFragment {
	fn name(&self) -> &'static str { "string" }

	fn trivial_idx(&self, _ctx: &mut Context, _range: (usize, usize)) -> Result<Idx, ElabError> { Ok(Idx::Unit) }

	fn ana_literal(&self, _ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<(), ElabError> {
		match &e.kind {
			ExprKind::Str(_) => Ok(()),
			_ => Err(ElabErrorKind::Ty("expected a string literal".to_owned()).at(e.range)),
		}
	}

	fn trans_literal(&self, _ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<Expr, ElabError> {
		Ok(e.kind.clone().synth())
	}

	fn syn_binop(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<TyExpr, ElabError> {
		let ExprKind::BinOp { left, op, right } = &e.kind else {
			return Err(ElabErrorKind::Internal("binary operator dispatch mismatch".to_owned()).at(e.range));
		};
		if *op != BinOp::Add {
			return Err(ElabErrorKind::Ty("strings support only concatenation".to_owned()).at(e.range));
		}
		let ty = self.ty(ctx, e.range)?;
		ctx.ana(left, &ty)?;
		ctx.ana(right, &ty)?;
		Ok(ty)
	}

	fn ana_binop(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<(), ElabError> {
		self.syn_binop(ctx, e, idx).map(drop)
	}

	fn trans_binop(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<Expr, ElabError> {
		let ExprKind::BinOp { left, op, right } = &e.kind else {
			return Err(ElabErrorKind::Internal("binary operator dispatch mismatch".to_owned()).at(e.range));
		};
		Ok(ExprKind::BinOp { left: bx!(ctx.trans(left)?), op: *op, right: bx!(ctx.trans(right)?) }.synth())
	}

	fn syn_compare(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<TyExpr, ElabError> {
		let ExprKind::Compare { left, ops, comparators } = &e.kind else {
			return Err(ElabErrorKind::Internal("comparison dispatch mismatch".to_owned()).at(e.range));
		};
		if ops.iter().any(|op| !matches!(op, CompareOp::Eq | CompareOp::NotEq)) {
			return Err(ElabErrorKind::Ty("strings compare only for equality".to_owned()).at(e.range));
		}
		let ty = self.ty(ctx, e.range)?;
		ctx.ana(left, &ty)?;
		for comparator in comparators {
			ctx.ana(comparator, &ty)?;
		}
		ctx.std_ty("boolean", e.range)
	}

	fn trans_compare(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<Expr, ElabError> {
		let ExprKind::Compare { left, ops, comparators } = &e.kind else {
			return Err(ElabErrorKind::Internal("comparison dispatch mismatch".to_owned()).at(e.range));
		};
		let comparators = comparators.iter().map(|c| ctx.trans(c)).collect::<Result<_, _>>()?;
		Ok(ExprKind::Compare { left: bx!(ctx.trans(left)?), ops: ops.clone(), comparators }.synth())
	}

	fn ana_pat_literal(&self, _ctx: &mut Context, pat: &Pat, _idx: &Idx) -> Result<Bindings, ElabError> {
		match &pat.kind {
			PatKind::Str(_) => Ok(Vec::new()),
			_ => Err(ElabErrorKind::Ty("expected a string literal pattern".to_owned()).at(pat.range)),
		}
	}

	fn trans_pat_literal(
		&self,
		_ctx: &mut Context,
		pat: &Pat,
		_idx: &Idx,
		scrutinee: &Expr,
	) -> Result<(Expr, PatBindings), ElabError> {
		let PatKind::Str(value) = &pat.kind else {
			return Err(ElabErrorKind::Internal("pattern dispatch mismatch".to_owned()).at(pat.range));
		};
		let guard = ExprKind::Compare {
			left: bx!(scrutinee.clone()),
			ops: vec![CompareOp::Eq],
			comparators: vec![ExprKind::Str(value.clone()).synth()],
		}
		.synth();
		Ok((guard, Vec::new()))
	}
}
