//! The boolean fragment: name constants, logical connectives, conditional
//! expressions, and the typed `if` and `while` statements.

use crate::{
	elaborate::{
		context::Context,
		error::{ElabError, ElabErrorKind},
	},
	fragment::{Bindings, Fragment, PatBindings},
	ir::{
		ast::{CompareOp, Expr, ExprKind, NameConst, Pat, PatKind, Stmt, StmtKind, UnaryOp},
		ty::{Idx, TyExpr},
	},
	utility::bx,
};

pub struct BooleanFragment;

impl BooleanFragment {
	fn ty(&self, ctx: &mut Context, range: (usize, usize)) -> Result<TyExpr, ElabError> {
		ctx.std_ty(self.name(), range)
	}
}

impl Fragment for BooleanFragment {
	fn name(&self) -> &'static str { "boolean" }

	fn trivial_idx(&self, _ctx: &mut Context, _range: (usize, usize)) -> Result<Idx, ElabError> { Ok(Idx::Unit) }

	fn ana_name_const(&self, _ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<(), ElabError> {
		match &e.kind {
			ExprKind::NameConst(NameConst::True | NameConst::False) => Ok(()),
			_ => Err(ElabErrorKind::Ty("expected a boolean constant".to_owned()).at(e.range)),
		}
	}

	fn trans_name_const(&self, _ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<Expr, ElabError> {
		Ok(e.kind.clone().synth())
	}

	fn syn_boolop(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<TyExpr, ElabError> {
		let ExprKind::BoolOp { values, .. } = &e.kind else {
			return Err(ElabErrorKind::Internal("boolean operator dispatch mismatch".to_owned()).at(e.range));
		};
		let ty = self.ty(ctx, e.range)?;
		for value in values {
			ctx.ana(value, &ty)?;
		}
		Ok(ty)
	}

	fn trans_boolop(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<Expr, ElabError> {
		let ExprKind::BoolOp { op, values } = &e.kind else {
			return Err(ElabErrorKind::Internal("boolean operator dispatch mismatch".to_owned()).at(e.range));
		};
		let values = values.iter().map(|v| ctx.trans(v)).collect::<Result<_, _>>()?;
		Ok(ExprKind::BoolOp { op: *op, values }.synth())
	}

	fn syn_unaryop(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<TyExpr, ElabError> {
		let ExprKind::UnaryOp { op, operand } = &e.kind else {
			return Err(ElabErrorKind::Internal("unary operator dispatch mismatch".to_owned()).at(e.range));
		};
		if *op != UnaryOp::Not {
			return Err(ElabErrorKind::Ty("booleans support only logical negation".to_owned()).at(e.range));
		}
		let ty = self.ty(ctx, e.range)?;
		ctx.ana(operand, &ty)?;
		Ok(ty)
	}

	fn trans_unaryop(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<Expr, ElabError> {
		let ExprKind::UnaryOp { op, operand } = &e.kind else {
			return Err(ElabErrorKind::Internal("unary operator dispatch mismatch".to_owned()).at(e.range));
		};
		Ok(ExprKind::UnaryOp { op: *op, operand: bx!(ctx.trans(operand)?) }.synth())
	}

	fn syn_compare(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<TyExpr, ElabError> {
		let ExprKind::Compare { left, ops, comparators } = &e.kind else {
			return Err(ElabErrorKind::Internal("comparison dispatch mismatch".to_owned()).at(e.range));
		};
		if ops.iter().any(|op| !matches!(op, CompareOp::Eq | CompareOp::NotEq)) {
			return Err(ElabErrorKind::Ty("booleans are not ordered".to_owned()).at(e.range));
		}
		let ty = self.ty(ctx, e.range)?;
		ctx.ana(left, &ty)?;
		for comparator in comparators {
			ctx.ana(comparator, &ty)?;
		}
		Ok(ty)
	}

	fn trans_compare(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<Expr, ElabError> {
		let ExprKind::Compare { left, ops, comparators } = &e.kind else {
			return Err(ElabErrorKind::Internal("comparison dispatch mismatch".to_owned()).at(e.range));
		};
		let comparators = comparators.iter().map(|c| ctx.trans(c)).collect::<Result<_, _>>()?;
		Ok(ExprKind::Compare { left: bx!(ctx.trans(left)?), ops: ops.clone(), comparators }.synth())
	}

	fn syn_ifexp(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<TyExpr, ElabError> {
		let ExprKind::IfExp { test, body, orelse } = &e.kind else {
			return Err(ElabErrorKind::Internal("conditional dispatch mismatch".to_owned()).at(e.range));
		};
		let ty = self.ty(ctx, e.range)?;
		ctx.ana(test, &ty)?;
		// The first branch decides the type of the whole conditional.
		let result = ctx.syn(body)?;
		ctx.ana(orelse, &result)?;
		Ok(result)
	}

	fn trans_ifexp(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<Expr, ElabError> {
		let ExprKind::IfExp { test, body, orelse } = &e.kind else {
			return Err(ElabErrorKind::Internal("conditional dispatch mismatch".to_owned()).at(e.range));
		};
		Ok(ExprKind::IfExp {
			test: bx!(ctx.trans(test)?),
			body: bx!(ctx.trans(body)?),
			orelse: bx!(ctx.trans(orelse)?),
		}
		.synth())
	}

	fn check_if(&self, ctx: &mut Context, stmt: &Stmt, _idx: &Idx) -> Result<(), ElabError> {
		let StmtKind::If { test, body, orelse } = &stmt.kind else {
			return Err(ElabErrorKind::Internal("if dispatch mismatch".to_owned()).at(stmt.range));
		};
		let ty = self.ty(ctx, test.range)?;
		ctx.ana(test, &ty)?;
		check_block(ctx, body)?;
		check_block(ctx, orelse)
	}

	fn trans_if(&self, ctx: &mut Context, stmt: &Stmt, _idx: &Idx) -> Result<Vec<Stmt>, ElabError> {
		let StmtKind::If { test, body, orelse } = &stmt.kind else {
			return Err(ElabErrorKind::Internal("if dispatch mismatch".to_owned()).at(stmt.range));
		};
		Ok(vec![
			StmtKind::If { test: ctx.trans(test)?, body: ctx.trans_block(body)?, orelse: ctx.trans_block(orelse)? }
				.synth(),
		])
	}

	fn check_while(&self, ctx: &mut Context, stmt: &Stmt, _idx: &Idx) -> Result<(), ElabError> {
		let StmtKind::While { test, body, orelse } = &stmt.kind else {
			return Err(ElabErrorKind::Internal("while dispatch mismatch".to_owned()).at(stmt.range));
		};
		let ty = self.ty(ctx, test.range)?;
		ctx.ana(test, &ty)?;
		check_block(ctx, body)?;
		check_block(ctx, orelse)
	}

	fn trans_while(&self, ctx: &mut Context, stmt: &Stmt, _idx: &Idx) -> Result<Vec<Stmt>, ElabError> {
		let StmtKind::While { test, body, orelse } = &stmt.kind else {
			return Err(ElabErrorKind::Internal("while dispatch mismatch".to_owned()).at(stmt.range));
		};
		Ok(vec![
			StmtKind::While { test: ctx.trans(test)?, body: ctx.trans_block(body)?, orelse: ctx.trans_block(orelse)? }
				.synth(),
		])
	}

	fn ana_pat_name_const(&self, _ctx: &mut Context, pat: &Pat, _idx: &Idx) -> Result<Bindings, ElabError> {
		match &pat.kind {
			PatKind::NameConst(NameConst::True | NameConst::False) => Ok(Vec::new()),
			_ => Err(ElabErrorKind::Ty("expected a boolean constant pattern".to_owned()).at(pat.range)),
		}
	}

	fn trans_pat_name_const(
		&self,
		_ctx: &mut Context,
		pat: &Pat,
		_idx: &Idx,
		scrutinee: &Expr,
	) -> Result<(Expr, PatBindings), ElabError> {
		let guard = match &pat.kind {
			PatKind::NameConst(NameConst::True) => scrutinee.clone(),
			PatKind::NameConst(NameConst::False) =>
				ExprKind::UnaryOp { op: UnaryOp::Not, operand: bx!(scrutinee.clone()) }.synth(),
			_ => return Err(ElabErrorKind::Internal("pattern dispatch mismatch".to_owned()).at(pat.range)),
		};
		Ok((guard, Vec::new()))
	}
}

fn check_block(ctx: &mut Context, block: &[Stmt]) -> Result<(), ElabError> {
	let mut ctx = ctx.scoped();
	for stmt in block {
		ctx.check(stmt)?;
	}
	Ok(())
}
