//! The py fragment: the dynamic escape hatch. Every form is accepted, every
//! subexpression is dynamic, and translation passes the structure through
//! unchanged apart from identifier renaming.

use crate::{
	elaborate::{
		context::Context,
		error::{ElabError, ElabErrorKind},
	},
	fragment::{Bindings, Fragment, PatBindings},
	ir::{
		ast::{CompareOp, Expr, ExprKind, Pat, PatKind, Slice, Stmt, StmtKind},
		ty::{Idx, TyExpr},
	},
	utility::bx,
};

pub struct PyFragment;

impl PyFragment {
	fn ty(&self, ctx: &mut Context, range: (usize, usize)) -> Result<TyExpr, ElabError> {
		ctx.std_ty(self.name(), range)
	}

	fn ana_all<'e>(&self, ctx: &mut Context, exprs: impl IntoIterator<Item = &'e Expr>) -> Result<(), ElabError> {
		for e in exprs {
			let ty = self.ty(ctx, e.range)?;
			ctx.ana(e, &ty)?;
		}
		Ok(())
	}

	fn trans_all(&self, ctx: &mut Context, exprs: &[Expr]) -> Result<Vec<Expr>, ElabError> {
		exprs.iter().map(|e| ctx.trans(e)).collect()
	}
}

impl Fragment for PyFragment {
	fn name(&self) -> &'static str { "py" }

	fn trivial_idx(&self, _ctx: &mut Context, _range: (usize, usize)) -> Result<Idx, ElabError> { Ok(Idx::Unit) }

	fn ana_literal(&self, _ctx: &mut Context, _e: &Expr, _idx: &Idx) -> Result<(), ElabError> { Ok(()) }

	fn trans_literal(&self, _ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<Expr, ElabError> {
		Ok(e.kind.clone().synth())
	}

	fn ana_name_const(&self, _ctx: &mut Context, _e: &Expr, _idx: &Idx) -> Result<(), ElabError> { Ok(()) }

	fn trans_name_const(&self, _ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<Expr, ElabError> {
		Ok(e.kind.clone().synth())
	}

	fn ana_tuple(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<(), ElabError> {
		let ExprKind::Tuple(elements) = &e.kind else {
			return Err(ElabErrorKind::Internal("tuple dispatch mismatch".to_owned()).at(e.range));
		};
		self.ana_all(ctx, elements)
	}

	fn trans_tuple(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<Expr, ElabError> {
		let ExprKind::Tuple(elements) = &e.kind else {
			return Err(ElabErrorKind::Internal("tuple dispatch mismatch".to_owned()).at(e.range));
		};
		Ok(ExprKind::Tuple(self.trans_all(ctx, elements)?).synth())
	}

	fn ana_list(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<(), ElabError> {
		let ExprKind::List(elements) = &e.kind else {
			return Err(ElabErrorKind::Internal("list dispatch mismatch".to_owned()).at(e.range));
		};
		self.ana_all(ctx, elements)
	}

	fn trans_list(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<Expr, ElabError> {
		let ExprKind::List(elements) = &e.kind else {
			return Err(ElabErrorKind::Internal("list dispatch mismatch".to_owned()).at(e.range));
		};
		Ok(ExprKind::List(self.trans_all(ctx, elements)?).synth())
	}

	fn ana_set(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<(), ElabError> {
		let ExprKind::Set(elements) = &e.kind else {
			return Err(ElabErrorKind::Internal("set dispatch mismatch".to_owned()).at(e.range));
		};
		self.ana_all(ctx, elements)
	}

	fn trans_set(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<Expr, ElabError> {
		let ExprKind::Set(elements) = &e.kind else {
			return Err(ElabErrorKind::Internal("set dispatch mismatch".to_owned()).at(e.range));
		};
		Ok(ExprKind::Set(self.trans_all(ctx, elements)?).synth())
	}

	fn ana_dict(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<(), ElabError> {
		let ExprKind::Dict { keys, values } = &e.kind else {
			return Err(ElabErrorKind::Internal("dict dispatch mismatch".to_owned()).at(e.range));
		};
		self.ana_all(ctx, keys.iter().chain(values))
	}

	fn trans_dict(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<Expr, ElabError> {
		let ExprKind::Dict { keys, values } = &e.kind else {
			return Err(ElabErrorKind::Internal("dict dispatch mismatch".to_owned()).at(e.range));
		};
		Ok(ExprKind::Dict { keys: self.trans_all(ctx, keys)?, values: self.trans_all(ctx, values)? }.synth())
	}

	fn ana_lambda(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<(), ElabError> {
		let ExprKind::Lambda { params, body } = &e.kind else {
			return Err(ElabErrorKind::Internal("lambda dispatch mismatch".to_owned()).at(e.range));
		};
		let ty = self.ty(ctx, e.range)?;
		let mut ctx = ctx.scoped();
		for param in params {
			let (uniq, _) = ctx.fresh_uniq(param.name);
			ctx.scopes.bind_term(param.name, uniq, ty.clone());
			ctx.set_uniq(param.id, uniq);
		}
		ctx.ana(body, &ty)
	}

	fn trans_lambda(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<Expr, ElabError> {
		let ExprKind::Lambda { params, body } = &e.kind else {
			return Err(ElabErrorKind::Internal("lambda dispatch mismatch".to_owned()).at(e.range));
		};
		let params = params
			.iter()
			.map(|param| {
				let uniq = ctx.uniq_of(param.id).ok_or_else(|| {
					ElabErrorKind::Internal("parameter was never bound".to_owned()).at(param.range)
				})?;
				Ok(crate::ir::ast::Param::new(ctx.uniq_name(uniq, param.range)?, None, (0, 0)))
			})
			.collect::<Result<Vec<_>, ElabError>>()?;
		Ok(ExprKind::Lambda { params, body: bx!(ctx.trans(body)?) }.synth())
	}

	fn syn_attribute(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<TyExpr, ElabError> {
		self.ty(ctx, e.range)
	}

	fn trans_attribute(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<Expr, ElabError> {
		let ExprKind::Attribute { value, label } = &e.kind else {
			return Err(ElabErrorKind::Internal("attribute dispatch mismatch".to_owned()).at(e.range));
		};
		Ok(ExprKind::Attribute { value: bx!(ctx.trans(value)?), label: *label }.synth())
	}

	fn syn_subscript(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<TyExpr, ElabError> {
		let ExprKind::Subscript { slice, .. } = &e.kind else {
			return Err(ElabErrorKind::Internal("subscript dispatch mismatch".to_owned()).at(e.range));
		};
		self.ana_slice(ctx, slice)?;
		self.ty(ctx, e.range)
	}

	fn trans_subscript(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<Expr, ElabError> {
		let ExprKind::Subscript { value, slice } = &e.kind else {
			return Err(ElabErrorKind::Internal("subscript dispatch mismatch".to_owned()).at(e.range));
		};
		Ok(ExprKind::Subscript { value: bx!(ctx.trans(value)?), slice: self.trans_slice(ctx, slice)? }.synth())
	}

	fn syn_call(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<TyExpr, ElabError> {
		let ExprKind::Call { args, keywords, .. } = &e.kind else {
			return Err(ElabErrorKind::Internal("call dispatch mismatch".to_owned()).at(e.range));
		};
		self.ana_all(ctx, args.iter().chain(keywords.iter().map(|(_, value)| value)))?;
		self.ty(ctx, e.range)
	}

	fn trans_call(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<Expr, ElabError> {
		let ExprKind::Call { callee, args, keywords } = &e.kind else {
			return Err(ElabErrorKind::Internal("call dispatch mismatch".to_owned()).at(e.range));
		};
		let keywords = keywords
			.iter()
			.map(|(name, value)| Ok((*name, ctx.trans(value)?)))
			.collect::<Result<Vec<_>, ElabError>>()?;
		Ok(ExprKind::Call { callee: bx!(ctx.trans(callee)?), args: self.trans_all(ctx, args)?, keywords }.synth())
	}

	fn syn_compare(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<TyExpr, ElabError> {
		let ExprKind::Compare { left, comparators, .. } = &e.kind else {
			return Err(ElabErrorKind::Internal("comparison dispatch mismatch".to_owned()).at(e.range));
		};
		self.ana_all(ctx, std::iter::once(&**left).chain(comparators))?;
		self.ty(ctx, e.range)
	}

	fn trans_compare(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<Expr, ElabError> {
		let ExprKind::Compare { left, ops, comparators } = &e.kind else {
			return Err(ElabErrorKind::Internal("comparison dispatch mismatch".to_owned()).at(e.range));
		};
		Ok(ExprKind::Compare {
			left: bx!(ctx.trans(left)?),
			ops: ops.clone(),
			comparators: self.trans_all(ctx, comparators)?,
		}
		.synth())
	}

	fn syn_binop(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<TyExpr, ElabError> {
		let ExprKind::BinOp { left, right, .. } = &e.kind else {
			return Err(ElabErrorKind::Internal("binary operator dispatch mismatch".to_owned()).at(e.range));
		};
		self.ana_all(ctx, [&**left, &**right])?;
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

	fn syn_boolop(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<TyExpr, ElabError> {
		let ExprKind::BoolOp { values, .. } = &e.kind else {
			return Err(ElabErrorKind::Internal("boolean operator dispatch mismatch".to_owned()).at(e.range));
		};
		self.ana_all(ctx, values)?;
		self.ty(ctx, e.range)
	}

	fn trans_boolop(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<Expr, ElabError> {
		let ExprKind::BoolOp { op, values } = &e.kind else {
			return Err(ElabErrorKind::Internal("boolean operator dispatch mismatch".to_owned()).at(e.range));
		};
		Ok(ExprKind::BoolOp { op: *op, values: self.trans_all(ctx, values)? }.synth())
	}

	fn syn_unaryop(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<TyExpr, ElabError> {
		let ExprKind::UnaryOp { operand, .. } = &e.kind else {
			return Err(ElabErrorKind::Internal("unary operator dispatch mismatch".to_owned()).at(e.range));
		};
		self.ana_all(ctx, [&**operand])?;
		self.ty(ctx, e.range)
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

	fn syn_ifexp(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<TyExpr, ElabError> {
		let ExprKind::IfExp { test, body, orelse } = &e.kind else {
			return Err(ElabErrorKind::Internal("conditional dispatch mismatch".to_owned()).at(e.range));
		};
		self.ana_all(ctx, [&**test, &**body, &**orelse])?;
		self.ty(ctx, e.range)
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

	// Dynamic patterns: literal and constant patterns guard by host equality.

	fn ana_pat_literal(&self, _ctx: &mut Context, _pat: &Pat, _idx: &Idx) -> Result<Bindings, ElabError> {
		Ok(Vec::new())
	}

	fn trans_pat_literal(
		&self,
		_ctx: &mut Context,
		pat: &Pat,
		_idx: &Idx,
		scrutinee: &Expr,
	) -> Result<(Expr, PatBindings), ElabError> {
		let literal = match &pat.kind {
			PatKind::Int(value) => ExprKind::Int(*value),
			PatKind::Float(value) => ExprKind::Float(*value),
			PatKind::Str(value) => ExprKind::Str(value.clone()),
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

	fn ana_pat_name_const(&self, _ctx: &mut Context, _pat: &Pat, _idx: &Idx) -> Result<Bindings, ElabError> {
		Ok(Vec::new())
	}

	fn trans_pat_name_const(
		&self,
		_ctx: &mut Context,
		pat: &Pat,
		_idx: &Idx,
		scrutinee: &Expr,
	) -> Result<(Expr, PatBindings), ElabError> {
		let PatKind::NameConst(constant) = &pat.kind else {
			return Err(ElabErrorKind::Internal("pattern dispatch mismatch".to_owned()).at(pat.range));
		};
		let guard = ExprKind::Compare {
			left: bx!(scrutinee.clone()),
			ops: vec![CompareOp::Eq],
			comparators: vec![ExprKind::NameConst(*constant).synth()],
		}
		.synth();
		Ok((guard, Vec::new()))
	}

	// Dynamic statements.

	fn check_if(&self, ctx: &mut Context, stmt: &Stmt, _idx: &Idx) -> Result<(), ElabError> {
		let StmtKind::If { test, body, orelse } = &stmt.kind else {
			return Err(ElabErrorKind::Internal("if dispatch mismatch".to_owned()).at(stmt.range));
		};
		self.ana_all(ctx, [test])?;
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
		self.ana_all(ctx, [test])?;
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

	fn check_for(&self, ctx: &mut Context, stmt: &Stmt, _idx: &Idx) -> Result<(), ElabError> {
		let StmtKind::For { target, iter, body, orelse } = &stmt.kind else {
			return Err(ElabErrorKind::Internal("for dispatch mismatch".to_owned()).at(stmt.range));
		};
		self.ana_all(ctx, [iter])?;
		let ExprKind::Name(name) = &target.kind else {
			return Err(ElabErrorKind::Ty("loop targets are plain names".to_owned()).at(target.range));
		};
		let ty = self.ty(ctx, target.range)?;
		let mut ctx = ctx.scoped();
		let (uniq, _) = ctx.fresh_uniq(*name);
		ctx.scopes.bind_term(*name, uniq, ty);
		ctx.set_uniq(target.id, uniq);
		for stmt in body {
			ctx.check(stmt)?;
		}
		for stmt in orelse {
			ctx.check(stmt)?;
		}
		Ok(())
	}

	fn trans_for(&self, ctx: &mut Context, stmt: &Stmt, _idx: &Idx) -> Result<Vec<Stmt>, ElabError> {
		let StmtKind::For { target, iter, body, orelse } = &stmt.kind else {
			return Err(ElabErrorKind::Internal("for dispatch mismatch".to_owned()).at(stmt.range));
		};
		let uniq = ctx
			.uniq_of(target.id)
			.ok_or_else(|| ElabErrorKind::Internal("loop target was never bound".to_owned()).at(target.range))?;
		let minted = ctx.uniq_name(uniq, target.range)?;
		Ok(vec![
			StmtKind::For {
				target: ExprKind::Name(minted).synth(),
				iter: ctx.trans(iter)?,
				body: ctx.trans_block(body)?,
				orelse: ctx.trans_block(orelse)?,
			}
			.synth(),
		])
	}

	fn check_with(&self, ctx: &mut Context, stmt: &Stmt, _idx: &Idx) -> Result<(), ElabError> {
		let StmtKind::With { item, binding, body } = &stmt.kind else {
			return Err(ElabErrorKind::Internal("with dispatch mismatch".to_owned()).at(stmt.range));
		};
		self.ana_all(ctx, [item])?;
		let mut ctx = ctx.scoped();
		if let Some(binding) = binding {
			let ExprKind::Name(name) = &binding.kind else {
				return Err(ElabErrorKind::Ty("with bindings are plain names".to_owned()).at(binding.range));
			};
			let ty = ctx.std_ty("py", binding.range)?;
			let (uniq, _) = ctx.fresh_uniq(*name);
			ctx.scopes.bind_term(*name, uniq, ty);
			ctx.set_uniq(binding.id, uniq);
		}
		for stmt in body {
			ctx.check(stmt)?;
		}
		Ok(())
	}

	fn trans_with(&self, ctx: &mut Context, stmt: &Stmt, _idx: &Idx) -> Result<Vec<Stmt>, ElabError> {
		let StmtKind::With { item, binding, body } = &stmt.kind else {
			return Err(ElabErrorKind::Internal("with dispatch mismatch".to_owned()).at(stmt.range));
		};
		let binding = match binding {
			Some(binding) => {
				let uniq = ctx.uniq_of(binding.id).ok_or_else(|| {
					ElabErrorKind::Internal("with binding was never bound".to_owned()).at(binding.range)
				})?;
				Some(ExprKind::Name(ctx.uniq_name(uniq, binding.range)?).synth())
			}
			None => None,
		};
		Ok(vec![
			StmtKind::With { item: ctx.trans(item)?, binding, body: ctx.trans_block(body)? }.synth(),
		])
	}

	fn check_aug_assign(&self, ctx: &mut Context, stmt: &Stmt, _idx: &Idx) -> Result<(), ElabError> {
		let StmtKind::AugAssign { target, value, .. } = &stmt.kind else {
			return Err(ElabErrorKind::Internal("augmented assignment dispatch mismatch".to_owned()).at(stmt.range));
		};
		self.ana_all(ctx, [target, value])
	}

	fn trans_aug_assign(&self, ctx: &mut Context, stmt: &Stmt, _idx: &Idx) -> Result<Vec<Stmt>, ElabError> {
		let StmtKind::AugAssign { target, op, value } = &stmt.kind else {
			return Err(ElabErrorKind::Internal("augmented assignment dispatch mismatch".to_owned()).at(stmt.range));
		};
		Ok(vec![
			StmtKind::AugAssign { target: ctx.trans(target)?, op: *op, value: ctx.trans(value)? }.synth(),
		])
	}

	fn check_assign_targeted(&self, ctx: &mut Context, stmt: &Stmt, _idx: &Idx) -> Result<(), ElabError> {
		let StmtKind::Assign { target, value, .. } = &stmt.kind else {
			return Err(ElabErrorKind::Internal("assignment dispatch mismatch".to_owned()).at(stmt.range));
		};
		match &target.kind {
			ExprKind::Attribute { .. } => {}
			ExprKind::Subscript { slice, .. } => self.ana_slice(ctx, slice)?,
			_ => return Err(ElabErrorKind::Internal("assignment dispatch mismatch".to_owned()).at(target.range)),
		}
		self.ana_all(ctx, [value])
	}

	fn trans_assign_targeted(&self, ctx: &mut Context, stmt: &Stmt, _idx: &Idx) -> Result<Vec<Stmt>, ElabError> {
		let StmtKind::Assign { target, value, .. } = &stmt.kind else {
			return Err(ElabErrorKind::Internal("assignment dispatch mismatch".to_owned()).at(stmt.range));
		};
		let target = match &target.kind {
			ExprKind::Attribute { value, label } =>
				ExprKind::Attribute { value: bx!(ctx.trans(value)?), label: *label }.synth(),
			ExprKind::Subscript { value, slice } =>
				ExprKind::Subscript { value: bx!(ctx.trans(value)?), slice: self.trans_slice(ctx, slice)? }.synth(),
			_ => return Err(ElabErrorKind::Internal("assignment dispatch mismatch".to_owned()).at(target.range)),
		};
		Ok(vec![StmtKind::Assign { target, annotation: None, value: ctx.trans(value)? }.synth()])
	}
}

impl PyFragment {
	fn ana_slice(&self, ctx: &mut Context, slice: &Slice) -> Result<(), ElabError> {
		match slice {
			Slice::Index(e) => self.ana_all(ctx, [&**e]),
			Slice::Bounds { lower, upper, step } => self.ana_all(
				ctx,
				[lower, upper, step].into_iter().flatten().map(|e| &**e),
			),
			Slice::Items(items) => {
				for item in items {
					self.ana_slice(ctx, item)?;
				}
				Ok(())
			}
		}
	}

	fn trans_slice(&self, ctx: &mut Context, slice: &Slice) -> Result<Slice, ElabError> {
		Ok(match slice {
			Slice::Index(e) => Slice::Index(bx!(ctx.trans(e)?)),
			Slice::Bounds { lower, upper, step } => Slice::Bounds {
				lower: lower.as_ref().map(|e| ctx.trans(e)).transpose()?.map(Box::new),
				upper: upper.as_ref().map(|e| ctx.trans(e)).transpose()?.map(Box::new),
				step: step.as_ref().map(|e| ctx.trans(e)).transpose()?.map(Box::new),
			},
			Slice::Items(items) => Slice::Items(
				items.iter().map(|item| self.trans_slice(ctx, item)).collect::<Result<_, _>>()?,
			),
		})
	}
}

fn check_block(ctx: &mut Context, block: &[Stmt]) -> Result<(), ElabError> {
	let mut ctx = ctx.scoped();
	for stmt in block {
		ctx.check(stmt)?;
	}
	Ok(())
}
