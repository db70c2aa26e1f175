//! The num fragment: integer literals and arithmetic.

use crate::{
	elaborate::{
		context::Context,
		error::{ElabError, ElabErrorKind},
	},
	fragment::{Bindings, Fragment, PatBindings},
	ir::{
		ast::{CompareOp, Expr, ExprKind, Pat, PatKind, Stmt, StmtKind, UnaryOp},
		ty::{Idx, TyExpr},
	},
	utility::bx,
};

pub struct NumFragment;

impl NumFragment {
	fn ty(&self, ctx: &mut Context, range: (usize, usize)) -> Result<TyExpr, ElabError> {
		ctx.std_ty(self.name(), range)
	}
}

impl Fragment for NumFragment {
	fn name(&self) -> &'static str { "num" }

	fn trivial_idx(&self, _ctx: &mut Context, _range: (usize, usize)) -> Result<Idx, ElabError> { Ok(Idx::Unit) }

	fn ana_literal(&self, _ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<(), ElabError> {
		match &e.kind {
			ExprKind::Int(_) => Ok(()),
			_ => Err(ElabErrorKind::Ty("expected an integer literal".to_owned()).at(e.range)),
		}
	}

	fn trans_literal(&self, _ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<Expr, ElabError> {
		Ok(e.kind.clone().synth())
	}

	fn syn_binop(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<TyExpr, ElabError> {
		let ExprKind::BinOp { left, right, .. } = &e.kind else {
			return Err(ElabErrorKind::Internal("binary operator dispatch mismatch".to_owned()).at(e.range));
		};
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
		let ExprKind::Compare { left, comparators, .. } = &e.kind else {
			return Err(ElabErrorKind::Internal("comparison dispatch mismatch".to_owned()).at(e.range));
		};
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

	fn syn_unaryop(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<TyExpr, ElabError> {
		let ExprKind::UnaryOp { op, operand } = &e.kind else {
			return Err(ElabErrorKind::Internal("unary operator dispatch mismatch".to_owned()).at(e.range));
		};
		if !matches!(op, UnaryOp::Neg | UnaryOp::Pos) {
			return Err(ElabErrorKind::Ty("numbers support only sign operators".to_owned()).at(e.range));
		}
		let ty = self.ty(ctx, e.range)?;
		ctx.ana(operand, &ty)?;
		Ok(ty)
	}

	fn ana_unaryop(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<(), ElabError> {
		self.syn_unaryop(ctx, e, idx).map(drop)
	}

	fn trans_unaryop(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<Expr, ElabError> {
		let ExprKind::UnaryOp { op, operand } = &e.kind else {
			return Err(ElabErrorKind::Internal("unary operator dispatch mismatch".to_owned()).at(e.range));
		};
		Ok(ExprKind::UnaryOp { op: *op, operand: bx!(ctx.trans(operand)?) }.synth())
	}

	fn check_aug_assign(&self, ctx: &mut Context, stmt: &Stmt, _idx: &Idx) -> Result<(), ElabError> {
		let StmtKind::AugAssign { target, value, .. } = &stmt.kind else {
			return Err(ElabErrorKind::Internal("augmented assignment dispatch mismatch".to_owned()).at(stmt.range));
		};
		let ty = self.ty(ctx, target.range)?;
		ctx.ana(target, &ty)?;
		ctx.ana(value, &ty)
	}

	fn trans_aug_assign(&self, ctx: &mut Context, stmt: &Stmt, _idx: &Idx) -> Result<Vec<Stmt>, ElabError> {
		let StmtKind::AugAssign { target, op, value } = &stmt.kind else {
			return Err(ElabErrorKind::Internal("augmented assignment dispatch mismatch".to_owned()).at(stmt.range));
		};
		Ok(vec![
			StmtKind::AugAssign { target: ctx.trans(target)?, op: *op, value: ctx.trans(value)? }.synth(),
		])
	}

	fn ana_pat_literal(&self, _ctx: &mut Context, pat: &Pat, _idx: &Idx) -> Result<Bindings, ElabError> {
		match &pat.kind {
			PatKind::Int(_) => Ok(Vec::new()),
			_ => Err(ElabErrorKind::Ty("expected an integer literal pattern".to_owned()).at(pat.range)),
		}
	}

	fn trans_pat_literal(
		&self,
		_ctx: &mut Context,
		pat: &Pat,
		_idx: &Idx,
		scrutinee: &Expr,
	) -> Result<(Expr, PatBindings), ElabError> {
		let PatKind::Int(value) = &pat.kind else {
			return Err(ElabErrorKind::Internal("pattern dispatch mismatch".to_owned()).at(pat.range));
		};
		let guard = ExprKind::Compare {
			left: bx!(scrutinee.clone()),
			ops: vec![CompareOp::Eq],
			comparators: vec![ExprKind::Int(*value).synth()],
		}
		.synth();
		Ok((guard, Vec::new()))
	}
}
