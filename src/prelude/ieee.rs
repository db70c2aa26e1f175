//! The ieee fragment: floating-point literals and arithmetic. Absorbs num
//! operands in mixed binary operators.

use crate::{
	elaborate::{
		context::Context,
		error::{ElabError, ElabErrorKind},
	},
	fragment::{Bindings, Fragment, PatBindings},
	ir::{
		ast::{CompareOp, Expr, ExprKind, Pat, PatKind, UnaryOp},
		ty::{Idx, Kind, TyExpr},
	},
	utility::bx,
};

pub struct IeeeFragment;

impl IeeeFragment {
	fn ty(&self, ctx: &mut Context, range: (usize, usize)) -> Result<TyExpr, ElabError> {
		ctx.std_ty(self.name(), range)
	}

	/// Accepts an operand that is already a num or ieee, and analyzes an
	/// unelaborated one at ieee.
	fn ana_operand(&self, ctx: &mut Context, operand: &Expr) -> Result<(), ElabError> {
		let ieee = self.ty(ctx, operand.range)?;
		match ctx.ty_of(operand.id) {
			Some(got) => {
				let num = ctx.std_ty("num", operand.range)?;
				if ctx.ty_expr_eq(&ieee, &got, &Kind::Ty, operand.range)?
					|| ctx.ty_expr_eq(&num, &got, &Kind::Ty, operand.range)?
				{
					Ok(())
				} else {
					Err(ElabErrorKind::TyMismatch { expected: ieee, got }.at(operand.range))
				}
			}
			None => ctx.ana(operand, &ieee),
		}
	}
}

impl Fragment for IeeeFragment {
	fn name(&self) -> &'static str { "ieee" }

	fn precedence(&self) -> &'static [&'static str] { &["num"] }

	fn trivial_idx(&self, _ctx: &mut Context, _range: (usize, usize)) -> Result<Idx, ElabError> { Ok(Idx::Unit) }

	fn ana_literal(&self, _ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<(), ElabError> {
		match &e.kind {
			ExprKind::Float(_) | ExprKind::Int(_) => Ok(()),
			_ => Err(ElabErrorKind::Ty("expected a numeric literal".to_owned()).at(e.range)),
		}
	}

	fn trans_literal(&self, _ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<Expr, ElabError> {
		match &e.kind {
			ExprKind::Float(value) => Ok(ExprKind::Float(*value).synth()),
			// An integer literal at ieee becomes a float at run time.
			ExprKind::Int(value) => Ok(ExprKind::Float(*value as f64).synth()),
			_ => Err(ElabErrorKind::Internal("literal dispatch mismatch".to_owned()).at(e.range)),
		}
	}

	fn syn_binop(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<TyExpr, ElabError> {
		let ExprKind::BinOp { left, right, .. } = &e.kind else {
			return Err(ElabErrorKind::Internal("binary operator dispatch mismatch".to_owned()).at(e.range));
		};
		self.ana_operand(ctx, left)?;
		self.ana_operand(ctx, right)?;
		self.ty(ctx, e.range)
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
		self.ana_operand(ctx, left)?;
		for comparator in comparators {
			self.ana_operand(ctx, comparator)?;
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
			return Err(ElabErrorKind::Ty("floats support only sign operators".to_owned()).at(e.range));
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

	fn ana_pat_literal(&self, _ctx: &mut Context, pat: &Pat, _idx: &Idx) -> Result<Bindings, ElabError> {
		match &pat.kind {
			PatKind::Float(_) | PatKind::Int(_) => Ok(Vec::new()),
			_ => Err(ElabErrorKind::Ty("expected a numeric literal pattern".to_owned()).at(pat.range)),
		}
	}

	fn trans_pat_literal(
		&self,
		_ctx: &mut Context,
		pat: &Pat,
		_idx: &Idx,
		scrutinee: &Expr,
	) -> Result<(Expr, PatBindings), ElabError> {
		let literal = match &pat.kind {
			PatKind::Float(value) => ExprKind::Float(*value),
			PatKind::Int(value) => ExprKind::Float(*value as f64),
			_ => return Err(ElabErrorKind::Internal("pattern dispatch mismatch".to_owned()).at(pat.range)),
		};
		let guard = ExprKind::Compare {
			left: bx!(scrutinee.clone()),
			ops: vec![CompareOp::Eq],
			comparators: vec![literal.synth()],
		}
		.synth();
		Ok((guard, Vec::new()))
	}
}
