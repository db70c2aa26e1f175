//! The function fragment: `fn[param, ..., ret]` types introduced by lambdas
//! and decorated function definitions, eliminated by calls. As the default
//! fragment of its own bodies it also owns the local statement repertoire.

use crate::{
	elaborate::{
		context::Context,
		error::{ElabError, ElabErrorKind},
	},
	fragment::{Fragment, StmtForm},
	ir::{
		ast::{Expr, ExprKind, Handler, Param, Slice, Stmt, StmtKind},
		ty::{Idx, Kind, TyExpr},
	},
};

pub struct FunFragment;

fn sig<'i>(idx: &'i Idx, range: (usize, usize)) -> Result<(&'i [Idx], &'i TyExpr), ElabError> {
	let foreign = || ElabErrorKind::Fragment("function fragment with a foreign index".to_owned()).at(range);
	let Idx::Seq(items) = idx else { return Err(foreign()) };
	let (ret, params) = items.split_last().ok_or_else(foreign)?;
	Ok((params, ret.as_ty().ok_or_else(foreign)?))
}

impl FunFragment {
	fn self_ty(&self, ctx: &Context, idx: Idx, range: (usize, usize)) -> Result<TyExpr, ElabError> {
		let fragment = ctx
			.fragments
			.lookup(self.name())
			.ok_or_else(|| ElabErrorKind::Fragment("fragment is not registered".to_owned()).at(range))?;
		Ok(TyExpr::Canonical { fragment, idx })
	}

	/// Binds parameters into the current scope, checking any written
	/// annotation against the signature.
	fn bind_params(
		&self,
		ctx: &mut Context,
		params: &[Param],
		param_idxs: &[Idx],
		range: (usize, usize),
	) -> Result<(), ElabError> {
		if params.len() != param_idxs.len() {
			return Err(
				ElabErrorKind::Ty(format!("expected {} parameters, found {}", param_idxs.len(), params.len()))
					.at(range),
			);
		}
		for (param, idx) in params.iter().zip(param_idxs) {
			let ty = idx
				.as_ty()
				.ok_or_else(|| ElabErrorKind::Fragment("function fragment with a foreign index".to_owned()).at(range))?
				.clone();
			if let Some(annotation) = &param.annotation {
				let got = ctx.ana_uty_expr(annotation, &Kind::Ty)?;
				if !ctx.ty_expr_eq(&ty, &got, &Kind::Ty, annotation.range)? {
					return Err(ElabErrorKind::TyMismatch { expected: ty, got }.at(annotation.range));
				}
			}
			let (uniq, _) = ctx.fresh_uniq(param.name);
			ctx.scopes.bind_term(param.name, uniq, ty);
			ctx.set_uniq(param.id, uniq);
		}
		Ok(())
	}

	/// Checks a function body. Every statement dispatches as usual, except
	/// that a trailing expression statement is the returned value.
	fn check_suite(&self, ctx: &mut Context, body: &[Stmt], ret: &TyExpr, idx: &Idx, range: (usize, usize)) -> Result<(), ElabError> {
		if body.is_empty() {
			return Err(ElabErrorKind::Ty("function body is empty".to_owned()).at(range));
		}
		let last = body.len() - 1;
		for (position, stmt) in body.iter().enumerate() {
			if position == last {
				if let StmtKind::Expr(e) = &stmt.kind {
					ctx.ana(e, ret)?;
					let fragment = ctx
						.fragments
						.lookup(self.name())
						.ok_or_else(|| ElabErrorKind::Fragment("fragment is not registered".to_owned()).at(stmt.range))?;
					ctx.set_stmt_delegate(stmt.id, fragment, StmtForm::Return, idx.clone());
					continue;
				}
			}
			ctx.check(stmt)?;
		}
		Ok(())
	}
}

impl Fragment for FunFragment {
	fn name(&self) -> &'static str { "fn" }

	fn init_idx(&self, ctx: &mut Context, slice: &Slice, range: (usize, usize)) -> Result<Idx, ElabError> {
		let Slice::Index(e) = slice else {
			return Err(
				ElabErrorKind::TypeFormation("a function type is written `fn[param, ..., ret]`".to_owned()).at(range),
			);
		};
		let items = match &e.kind {
			ExprKind::Tuple(items) => {
				if items.is_empty() {
					return Err(
						ElabErrorKind::TypeFormation("a function type needs a return type".to_owned()).at(range),
					);
				}
				items.iter().collect::<Vec<_>>()
			}
			_ => vec![&**e],
		};
		let items = items
			.into_iter()
			.map(|item| Ok(Idx::ty(ctx.ana_uty_expr(item, &Kind::Ty)?)))
			.collect::<Result<Vec<_>, ElabError>>()?;
		Ok(Idx::Seq(items))
	}

	fn ana_lambda(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<(), ElabError> {
		let ExprKind::Lambda { params, body } = &e.kind else {
			return Err(ElabErrorKind::Internal("lambda dispatch mismatch".to_owned()).at(e.range));
		};
		let (param_idxs, ret) = sig(idx, e.range)?;
		let ret = ret.clone();
		let param_idxs = param_idxs.to_vec();
		let mut ctx = ctx.scoped();
		self.bind_params(&mut ctx, params, &param_idxs, e.range)?;
		ctx.ana(body, &ret)
	}

	fn trans_lambda(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<Expr, ElabError> {
		let ExprKind::Lambda { params, body } = &e.kind else {
			return Err(ElabErrorKind::Internal("lambda dispatch mismatch".to_owned()).at(e.range));
		};
		let params = trans_params(ctx, params)?;
		let body = ctx.trans(body)?;
		Ok(ExprKind::Lambda { params, body: Box::new(body) }.synth())
	}

	fn ana_function_def(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<(), ElabError> {
		let ExprKind::FunctionDef { params, returns, body, .. } = &e.kind else {
			return Err(ElabErrorKind::Internal("function definition dispatch mismatch".to_owned()).at(e.range));
		};
		ctx.set_default_idx(idx.clone())?;
		let (param_idxs, ret) = sig(idx, e.range)?;
		let ret = ret.clone();
		let param_idxs = param_idxs.to_vec();
		if let Some(annotation) = returns {
			let got = ctx.ana_uty_expr(annotation, &Kind::Ty)?;
			if !ctx.ty_expr_eq(&ret, &got, &Kind::Ty, annotation.range)? {
				return Err(ElabErrorKind::TyMismatch { expected: ret, got }.at(annotation.range));
			}
		}
		let mut ctx = ctx.scoped();
		self.bind_params(&mut ctx, params, &param_idxs, e.range)?;
		self.check_suite(&mut ctx, body, &ret, idx, e.range)
	}

	fn syn_function_def(&self, ctx: &mut Context, e: &Expr) -> Result<TyExpr, ElabError> {
		let ExprKind::FunctionDef { params, returns, body, .. } = &e.kind else {
			return Err(ElabErrorKind::Internal("function definition dispatch mismatch".to_owned()).at(e.range));
		};
		let mut items = Vec::with_capacity(params.len() + 1);
		for param in params {
			let annotation = param.annotation.as_ref().ok_or_else(|| {
				ElabErrorKind::Ty("parameter annotations are required to synthesize a function type".to_owned())
					.at(param.range)
			})?;
			items.push(Idx::ty(ctx.ana_uty_expr(annotation, &Kind::Ty)?));
		}
		let returns = returns.as_ref().ok_or_else(|| {
			ElabErrorKind::Ty("a return annotation is required to synthesize a function type".to_owned()).at(e.range)
		})?;
		let ret = ctx.ana_uty_expr(returns, &Kind::Ty)?;
		items.push(Idx::ty(ret.clone()));
		let idx = Idx::Seq(items);
		ctx.set_default_idx(idx.clone())?;
		{
			let (param_idxs, _) = sig(&idx, e.range)?;
			let param_idxs = param_idxs.to_vec();
			let mut ctx = ctx.scoped();
			self.bind_params(&mut ctx, params, &param_idxs, e.range)?;
			self.check_suite(&mut ctx, body, &ret, &idx, e.range)?;
		}
		self.self_ty(ctx, idx, e.range)
	}

	fn trans_function_def(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<Expr, ElabError> {
		let ExprKind::FunctionDef { name, params, body, .. } = &e.kind else {
			return Err(ElabErrorKind::Internal("function definition dispatch mismatch".to_owned()).at(e.range));
		};
		let params = trans_params(ctx, params)?;
		let body = ctx.trans_block(body)?;
		Ok(ExprKind::FunctionDef { name: *name, decorators: Vec::new(), params, returns: None, body }.synth())
	}

	fn syn_call(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<TyExpr, ElabError> {
		let ExprKind::Call { args, keywords, .. } = &e.kind else {
			return Err(ElabErrorKind::Internal("call dispatch mismatch".to_owned()).at(e.range));
		};
		if !keywords.is_empty() {
			return Err(ElabErrorKind::Ty("keyword arguments are not supported".to_owned()).at(e.range));
		}
		let (param_idxs, ret) = sig(idx, e.range)?;
		if args.len() != param_idxs.len() {
			return Err(
				ElabErrorKind::Ty(format!("expected {} arguments, found {}", param_idxs.len(), args.len()))
					.at(e.range),
			);
		}
		let ret = ret.clone();
		let param_tys = param_idxs
			.iter()
			.map(|idx| {
				idx.as_ty().cloned().ok_or_else(|| {
					ElabErrorKind::Fragment("function fragment with a foreign index".to_owned()).at(e.range)
				})
			})
			.collect::<Result<Vec<_>, _>>()?;
		for (arg, ty) in args.iter().zip(&param_tys) {
			ctx.ana(arg, ty)?;
		}
		Ok(ret)
	}

	fn trans_call(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<Expr, ElabError> {
		let ExprKind::Call { callee, args, .. } = &e.kind else {
			return Err(ElabErrorKind::Internal("call dispatch mismatch".to_owned()).at(e.range));
		};
		let callee = ctx.trans(callee)?;
		let args = args.iter().map(|arg| ctx.trans(arg)).collect::<Result<_, _>>()?;
		Ok(ExprKind::Call { callee: Box::new(callee), args, keywords: Vec::new() }.synth())
	}

	// The local statement repertoire of function bodies.

	fn check_expr_stmt(&self, ctx: &mut Context, stmt: &Stmt, _idx: &Idx) -> Result<(), ElabError> {
		let StmtKind::Expr(e) = &stmt.kind else {
			return Err(ElabErrorKind::Internal("statement dispatch mismatch".to_owned()).at(stmt.range));
		};
		ctx.syn(e).map(drop)
	}

	fn trans_expr_stmt(&self, ctx: &mut Context, stmt: &Stmt, _idx: &Idx) -> Result<Vec<Stmt>, ElabError> {
		let StmtKind::Expr(e) = &stmt.kind else {
			return Err(ElabErrorKind::Internal("statement dispatch mismatch".to_owned()).at(stmt.range));
		};
		Ok(vec![StmtKind::Expr(ctx.trans(e)?).synth()])
	}

	fn check_assign(&self, ctx: &mut Context, stmt: &Stmt, _idx: &Idx) -> Result<(), ElabError> {
		let StmtKind::Assign { target, annotation, value } = &stmt.kind else {
			return Err(ElabErrorKind::Internal("statement dispatch mismatch".to_owned()).at(stmt.range));
		};
		let ExprKind::Name(name) = &target.kind else {
			return Err(ElabErrorKind::Ty("assignment targets a plain name here".to_owned()).at(target.range));
		};
		let ty = match annotation {
			Some(annotation) => {
				let ty = ctx.ana_uty_expr(annotation, &Kind::Ty)?;
				ctx.ana(value, &ty)?;
				ty
			}
			None => ctx.syn(value)?,
		};
		let (uniq, _) = ctx.fresh_uniq(*name);
		ctx.scopes.bind_term(*name, uniq, ty);
		ctx.set_uniq(target.id, uniq);
		Ok(())
	}

	fn trans_assign(&self, ctx: &mut Context, stmt: &Stmt, _idx: &Idx) -> Result<Vec<Stmt>, ElabError> {
		let StmtKind::Assign { target, value, .. } = &stmt.kind else {
			return Err(ElabErrorKind::Internal("statement dispatch mismatch".to_owned()).at(stmt.range));
		};
		let uniq = ctx
			.uniq_of(target.id)
			.ok_or_else(|| ElabErrorKind::Internal("assignment target was never bound".to_owned()).at(target.range))?;
		let minted = ctx.uniq_name(uniq, target.range)?;
		Ok(vec![
			StmtKind::Assign { target: ExprKind::Name(minted).synth(), annotation: None, value: ctx.trans(value)? }
				.synth(),
		])
	}

	fn check_return(&self, ctx: &mut Context, stmt: &Stmt, idx: &Idx) -> Result<(), ElabError> {
		let (_, ret) = sig(idx, stmt.range)?;
		let ret = ret.clone();
		match &stmt.kind {
			StmtKind::Return(Some(e)) => ctx.ana(e, &ret),
			StmtKind::Return(None) => {
				let unit = ctx.std_ty("unit", stmt.range)?;
				if ctx.ty_expr_eq(&ret, &unit, &Kind::Ty, stmt.range)? {
					Ok(())
				} else {
					Err(ElabErrorKind::Ty("this function returns a value".to_owned()).at(stmt.range))
				}
			}
			_ => Err(ElabErrorKind::Internal("statement dispatch mismatch".to_owned()).at(stmt.range)),
		}
	}

	fn trans_return(&self, ctx: &mut Context, stmt: &Stmt, _idx: &Idx) -> Result<Vec<Stmt>, ElabError> {
		match &stmt.kind {
			StmtKind::Return(Some(e)) => Ok(vec![StmtKind::Return(Some(ctx.trans(e)?)).synth()]),
			StmtKind::Return(None) => Ok(vec![StmtKind::Return(None).synth()]),
			// A trailing expression statement returns its value.
			StmtKind::Expr(e) => Ok(vec![StmtKind::Return(Some(ctx.trans(e)?)).synth()]),
			_ => Err(ElabErrorKind::Internal("statement dispatch mismatch".to_owned()).at(stmt.range)),
		}
	}

	fn check_assert(&self, ctx: &mut Context, stmt: &Stmt, _idx: &Idx) -> Result<(), ElabError> {
		let StmtKind::Assert { test, msg } = &stmt.kind else {
			return Err(ElabErrorKind::Internal("statement dispatch mismatch".to_owned()).at(stmt.range));
		};
		let boolean = ctx.std_ty("boolean", test.range)?;
		ctx.ana(test, &boolean)?;
		if let Some(msg) = msg {
			let string = ctx.std_ty("string", msg.range)?;
			ctx.ana(msg, &string)?;
		}
		Ok(())
	}

	fn trans_assert(&self, ctx: &mut Context, stmt: &Stmt, _idx: &Idx) -> Result<Vec<Stmt>, ElabError> {
		let StmtKind::Assert { test, msg } = &stmt.kind else {
			return Err(ElabErrorKind::Internal("statement dispatch mismatch".to_owned()).at(stmt.range));
		};
		let msg = msg.as_ref().map(|msg| ctx.trans(msg)).transpose()?;
		Ok(vec![StmtKind::Assert { test: ctx.trans(test)?, msg }.synth()])
	}

	fn check_raise(&self, ctx: &mut Context, stmt: &Stmt, _idx: &Idx) -> Result<(), ElabError> {
		let StmtKind::Raise(exception) = &stmt.kind else {
			return Err(ElabErrorKind::Internal("statement dispatch mismatch".to_owned()).at(stmt.range));
		};
		if let Some(exception) = exception {
			ctx.syn(exception)?;
		}
		Ok(())
	}

	fn trans_raise(&self, ctx: &mut Context, stmt: &Stmt, _idx: &Idx) -> Result<Vec<Stmt>, ElabError> {
		let StmtKind::Raise(exception) = &stmt.kind else {
			return Err(ElabErrorKind::Internal("statement dispatch mismatch".to_owned()).at(stmt.range));
		};
		let exception = exception.as_ref().map(|e| ctx.trans(e)).transpose()?;
		Ok(vec![StmtKind::Raise(exception).synth()])
	}

	fn check_try(&self, ctx: &mut Context, stmt: &Stmt, _idx: &Idx) -> Result<(), ElabError> {
		let StmtKind::Try { body, handlers, orelse, finalbody } = &stmt.kind else {
			return Err(ElabErrorKind::Internal("statement dispatch mismatch".to_owned()).at(stmt.range));
		};
		check_block(ctx, body)?;
		for handler in handlers {
			if let Some(exception) = &handler.exception {
				ctx.syn(exception)?;
			}
			let mut ctx = ctx.scoped();
			if let Some(binding) = handler.binding {
				// Caught exceptions are dynamic values.
				let py = ctx.std_ty("py", handler.range)?;
				let (uniq, _) = ctx.fresh_uniq(binding);
				ctx.scopes.bind_term(binding, uniq, py);
				ctx.set_uniq(handler.id, uniq);
			}
			for stmt in &handler.body {
				ctx.check(stmt)?;
			}
		}
		check_block(ctx, orelse)?;
		check_block(ctx, finalbody)
	}

	fn trans_try(&self, ctx: &mut Context, stmt: &Stmt, _idx: &Idx) -> Result<Vec<Stmt>, ElabError> {
		let StmtKind::Try { body, handlers, orelse, finalbody } = &stmt.kind else {
			return Err(ElabErrorKind::Internal("statement dispatch mismatch".to_owned()).at(stmt.range));
		};
		let mut translated = Vec::with_capacity(handlers.len());
		for handler in handlers {
			let exception = handler.exception.as_ref().map(|e| ctx.trans(e)).transpose()?;
			let binding = match handler.binding {
				Some(_) => {
					let uniq = ctx.uniq_of(handler.id).ok_or_else(|| {
						ElabErrorKind::Internal("handler binding was never bound".to_owned()).at(handler.range)
					})?;
					Some(ctx.uniq_name(uniq, handler.range)?)
				}
				None => None,
			};
			translated.push(Handler::new(exception, binding, ctx.trans_block(&handler.body)?, (0, 0)));
		}
		Ok(vec![
			StmtKind::Try {
				body: ctx.trans_block(body)?,
				handlers: translated,
				orelse: ctx.trans_block(orelse)?,
				finalbody: ctx.trans_block(finalbody)?,
			}
			.synth(),
		])
	}

	fn check_pass(&self, _ctx: &mut Context, _stmt: &Stmt, _idx: &Idx) -> Result<(), ElabError> { Ok(()) }

	fn trans_pass(&self, _ctx: &mut Context, _stmt: &Stmt, _idx: &Idx) -> Result<Vec<Stmt>, ElabError> {
		Ok(vec![StmtKind::Pass.synth()])
	}

	fn check_break(&self, _ctx: &mut Context, _stmt: &Stmt, _idx: &Idx) -> Result<(), ElabError> { Ok(()) }

	fn trans_break(&self, _ctx: &mut Context, _stmt: &Stmt, _idx: &Idx) -> Result<Vec<Stmt>, ElabError> {
		Ok(vec![StmtKind::Break.synth()])
	}

	fn check_continue(&self, _ctx: &mut Context, _stmt: &Stmt, _idx: &Idx) -> Result<(), ElabError> { Ok(()) }

	fn trans_continue(&self, _ctx: &mut Context, _stmt: &Stmt, _idx: &Idx) -> Result<Vec<Stmt>, ElabError> {
		Ok(vec![StmtKind::Continue.synth()])
	}
}

fn trans_params(ctx: &mut Context, params: &[Param]) -> Result<Vec<Param>, ElabError> {
	params
		.iter()
		.map(|param| {
			let uniq = ctx
				.uniq_of(param.id)
				.ok_or_else(|| ElabErrorKind::Internal("parameter was never bound".to_owned()).at(param.range))?;
			Ok(Param::new(ctx.uniq_name(uniq, param.range)?, None, (0, 0)))
		})
		.collect()
}

fn check_block(ctx: &mut Context, block: &[Stmt]) -> Result<(), ElabError> {
	let mut ctx = ctx.scoped();
	for stmt in block {
		ctx.check(stmt)?;
	}
	Ok(())
}
