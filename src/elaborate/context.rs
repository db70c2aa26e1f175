//! The elaboration context.
//!
//! One context threads kinds, types, identifier bindings, and translation
//! annotations through the recursive analysis of a component's members. The
//! engine decides only form class and dispatch; every per-form judgment is
//! delegated to the fragment owning the canonical type at hand.

use std::{
	collections::HashMap,
	ops::{Deref, DerefMut},
};

use lasso::Rodeo;

use crate::{
	common::{Name, NodeId, Uniq},
	elaborate::{
		error::{ElabError, ElabErrorKind},
		scope::Scopes,
	},
	fragment::{Form, FragmentId, Fragments, StaticEnv, StaticValue, StmtForm},
	ir::{
		ast::{Expr, ExprKind, Stmt, StmtKind},
		ty::{Idx, Kind, TyExpr},
	},
};

/// Resolved attributes attached to one AST node as decisions are made.
#[derive(Clone, Debug, Default)]
struct Annot {
	ty: Option<TyExpr>,
	fragment: Option<FragmentId>,
	form: Option<Form>,
	stmt_form: Option<StmtForm>,
	idx: Option<Idx>,
	uniq: Option<Uniq>,
}

pub struct Context<'a> {
	pub fragments: &'a Fragments,
	pub host: &'a StaticEnv,
	pub interner: &'a mut Rodeo,
	pub(crate) scopes: Scopes,
	annots: HashMap<NodeId, Annot>,
	uniq_names: HashMap<Uniq, Name>,
	next_uniq: u32,
	defaults: Vec<(FragmentId, Option<Idx>)>,
	kw_type: Name,
}

impl<'a> Context<'a> {
	pub fn new(fragments: &'a Fragments, host: &'a StaticEnv, interner: &'a mut Rodeo) -> Self {
		let kw_type = interner.get_or_intern("type");
		Self {
			fragments,
			host,
			interner,
			scopes: Scopes::new(),
			annots: HashMap::new(),
			uniq_names: HashMap::new(),
			next_uniq: 0,
			defaults: Vec::new(),
			kw_type,
		}
	}

	/// The reserved head of kind ascriptions.
	pub fn kw_type(&self) -> Name { self.kw_type }

	/// Mints a fresh unique together with its emitted name. Emitted names
	/// carry a reserved `__base_n` shape, disjoint from source identifiers.
	pub fn fresh_uniq(&mut self, base: Name) -> (Uniq, Name) {
		let uniq = Uniq(self.next_uniq);
		self.next_uniq += 1;
		let minted = self.interner.get_or_intern(format!("__{}_{}", self.interner.resolve(&base), uniq.0));
		self.uniq_names.insert(uniq, minted);
		(uniq, minted)
	}

	pub fn uniq_name(&self, uniq: Uniq, range: (usize, usize)) -> Result<Name, ElabError> {
		self
			.uniq_names
			.get(&uniq)
			.copied()
			.ok_or_else(|| ElabErrorKind::Internal("unique has no emitted name".to_owned()).at(range))
	}

	pub fn scoped(&mut self) -> ScopedContext<'_, 'a> {
		self.scopes.push();
		ScopedContext { context: self }
	}

	pub fn with_default(&mut self, fragment: FragmentId) -> DefaultedContext<'_, 'a> {
		self.defaults.push((fragment, None));
		DefaultedContext { context: self }
	}

	/// Installs the index of the innermost default fragment; called by the
	/// fragment itself once it has computed its canonical index.
	pub fn set_default_idx(&mut self, idx: Idx) -> Result<(), ElabError> {
		let Some(top) = self.defaults.last_mut() else {
			return Err(ElabErrorKind::Usage("no default fragment in scope".to_owned()).at((0, 0)));
		};
		top.1 = Some(idx);
		Ok(())
	}

	fn default_delegate(&self, range: (usize, usize)) -> Result<(FragmentId, Idx), ElabError> {
		let Some((fragment, idx)) = self.defaults.last() else {
			return Err(ElabErrorKind::Usage("no default fragment in scope".to_owned()).at(range));
		};
		let idx = idx
			.clone()
			.ok_or_else(|| ElabErrorKind::Usage("default fragment has not installed its index".to_owned()).at(range))?;
		Ok((*fragment, idx))
	}

	// Annotation accessors.

	pub fn ty_of(&self, id: NodeId) -> Option<TyExpr> { self.annots.get(&id).and_then(|a| a.ty.clone()) }

	pub fn uniq_of(&self, id: NodeId) -> Option<Uniq> { self.annots.get(&id).and_then(|a| a.uniq) }

	pub fn idx_of(&self, id: NodeId) -> Option<Idx> { self.annots.get(&id).and_then(|a| a.idx.clone()) }

	pub(crate) fn set_ty(&mut self, id: NodeId, ty: TyExpr) {
		// First annotation wins; re-elaboration answers from the table.
		let annot = self.annots.entry(id).or_default();
		if annot.ty.is_none() {
			annot.ty = Some(ty);
		}
	}

	pub(crate) fn set_uniq(&mut self, id: NodeId, uniq: Uniq) {
		self.annots.entry(id).or_default().uniq = Some(uniq);
	}

	pub(crate) fn set_delegate(&mut self, id: NodeId, fragment: FragmentId, form: Form, idx: Idx) {
		let annot = self.annots.entry(id).or_default();
		annot.fragment = Some(fragment);
		annot.form = Some(form);
		annot.idx = Some(idx);
	}

	fn set_form(&mut self, id: NodeId, form: Form) { self.annots.entry(id).or_default().form = Some(form); }

	pub(crate) fn delegate_of(&self, id: NodeId) -> Option<(FragmentId, Form, Idx)> {
		let annot = self.annots.get(&id)?;
		Some((annot.fragment?, annot.form?, annot.idx.clone()?))
	}

	pub(crate) fn set_stmt_delegate(&mut self, id: NodeId, fragment: FragmentId, form: StmtForm, idx: Idx) {
		let annot = self.annots.entry(id).or_default();
		annot.fragment = Some(fragment);
		annot.stmt_form = Some(form);
		annot.idx = Some(idx);
	}

	/// The canonical type of a registered fragment under its trivial index.
	pub fn std_ty(&mut self, name: &'static str, range: (usize, usize)) -> Result<TyExpr, ElabError> {
		let fragment = self
			.fragments
			.lookup(name)
			.ok_or_else(|| ElabErrorKind::Usage(format!("fragment `{name}` is not registered")).at(range))?;
		let idx = self.fragments.get(fragment).trivial_idx(self, range)?;
		Ok(TyExpr::Canonical { fragment, idx })
	}

	// Synthesis.

	/// Derives a type for `e` bottom-up, annotating the node. Idempotent:
	/// re-entry answers from the annotation table.
	pub fn syn(&mut self, e: &Expr) -> Result<TyExpr, ElabError> {
		if let Some(ty) = self.ty_of(e.id) {
			return Ok(ty);
		}
		let ty = match &e.kind {
			ExprKind::Name(name) => 'name: {
				if let Some((uniq, ty)) = self.scopes.lookup_term(*name).cloned() {
					self.set_uniq(e.id, uniq);
					self.set_form(e.id, Form::Name);
					break 'name ty;
				}
				match self.host.lookup(*name) {
					Some(StaticValue::Component(component)) => {
						self.set_form(e.id, Form::Name);
						TyExpr::Canonical {
							fragment: self.fragments.component(),
							idx: Idx::Component(component.clone()),
						}
					}
					Some(_) =>
						return Err(ElabErrorKind::Ty("name does not denote a value in this context".to_owned()).at(e.range)),
					None => return Err(ElabErrorKind::Ty("unbound identifier".to_owned()).at(e.range)),
				}
			}

			ExprKind::Subscript { value, slice } =>
				if let Some(ty_ast) = slice.as_ascription() {
					let ty = self.ana_uty_expr(ty_ast, &Kind::Ty)?;
					self.ana(value, &ty)?;
					self.set_form(e.id, Form::Ascription);
					ty
				} else {
					self.syn_targeted(e, value, Form::Subscript)?
				},

			ExprKind::Attribute { value, .. } => self.syn_targeted(e, value, Form::Attribute)?,
			ExprKind::Call { callee, .. } => self.syn_targeted(e, callee, Form::Call)?,
			ExprKind::Compare { left, .. } => self.syn_targeted(e, left, Form::Compare)?,
			ExprKind::BoolOp { values, .. } => {
				let first = values
					.first()
					.ok_or_else(|| ElabErrorKind::Internal("empty boolean operator".to_owned()).at(e.range))?;
				self.syn_targeted(e, first, Form::BoolOp)?
			}
			ExprKind::UnaryOp { operand, .. } => self.syn_targeted(e, operand, Form::UnaryOp)?,
			ExprKind::IfExp { test, .. } => self.syn_targeted(e, test, Form::IfExp)?,

			ExprKind::BinOp { .. } => self.binop(e, None)?,

			ExprKind::FunctionDef { decorators, .. } => {
				let first = decorators.first().ok_or_else(|| {
					ElabErrorKind::Ty("function definition requires a fragment decorator".to_owned()).at(e.range)
				})?;
				let Some(StaticValue::Fragment(fragment)) = self.host.evaluate(first) else {
					return Err(
						ElabErrorKind::Ty("function decorator does not name a fragment".to_owned()).at(first.range),
					);
				};
				let delegate = self.fragments.get(fragment);
				let ty = {
					let mut ctx = self.with_default(fragment);
					delegate.syn_function_def(&mut ctx, e)?
				};
				self.ana_ty_expr(&ty, &Kind::Ty, e.range)?;
				let (_, idx) = self.canonical_of(&ty, e.range)?;
				self.set_delegate(e.id, fragment, Form::FunctionDef, idx);
				ty
			}

			ExprKind::Match { .. } => self.elab_match(e, None)?,

			_ => return Err(ElabErrorKind::Ty("cannot synthesize a type for this form".to_owned()).at(e.range)),
		};
		self.set_ty(e.id, ty.clone());
		Ok(ty)
	}

	fn syn_targeted(&mut self, e: &Expr, target: &Expr, form: Form) -> Result<TyExpr, ElabError> {
		let target_ty = self.syn(target)?;
		let (fragment, idx) = self.canonical_of(&target_ty, target.range)?;
		self.set_delegate(e.id, fragment, form, idx.clone());
		let delegate = self.fragments.get(fragment);
		match form {
			Form::Attribute => delegate.syn_attribute(self, e, &idx),
			Form::Subscript => delegate.syn_subscript(self, e, &idx),
			Form::Call => delegate.syn_call(self, e, &idx),
			Form::Compare => delegate.syn_compare(self, e, &idx),
			Form::BoolOp => delegate.syn_boolop(self, e, &idx),
			Form::UnaryOp => delegate.syn_unaryop(self, e, &idx),
			Form::IfExp => delegate.syn_ifexp(self, e, &idx),
			_ => Err(ElabErrorKind::Internal("form is not targeted".to_owned()).at(e.range)),
		}
	}

	// Analysis.

	/// Checks `e` against `ty` top-down. Introduction forms dispatch to the
	/// canonicalized type's fragment; every other form falls back to
	/// subsumption.
	pub fn ana(&mut self, e: &Expr, ty: &TyExpr) -> Result<(), ElabError> {
		if let Some(existing) = self.ty_of(e.id) {
			return if self.ty_expr_eq(ty, &existing, &Kind::Ty, e.range)? {
				Ok(())
			} else {
				Err(ElabErrorKind::TyMismatch { expected: ty.clone(), got: existing }.at(e.range))
			};
		}

		let intro = match &e.kind {
			ExprKind::Int(_) | ExprKind::Float(_) | ExprKind::Str(_) => Some(Form::Literal),
			ExprKind::NameConst(_) => Some(Form::NameConst),
			ExprKind::Tuple(_) => Some(Form::Tuple),
			ExprKind::List(_) => Some(Form::List),
			ExprKind::Dict { .. } => Some(Form::Dict),
			ExprKind::Set(_) => Some(Form::Set),
			ExprKind::Call { .. } => Some(Form::Call),
			ExprKind::UnaryOp { .. } => Some(Form::UnaryOp),
			ExprKind::Lambda { .. } => Some(Form::Lambda),
			ExprKind::FunctionDef { .. } => Some(Form::FunctionDef),
			_ => None,
		};

		match (&e.kind, intro) {
			(ExprKind::Match { .. }, _) => {
				self.elab_match(e, Some(ty))?;
				self.set_ty(e.id, ty.clone());
				Ok(())
			}
			(ExprKind::BinOp { .. }, _) => {
				let got = self.binop(e, Some(ty))?;
				if self.ty_expr_eq(ty, &got, &Kind::Ty, e.range)? {
					self.set_ty(e.id, got);
					Ok(())
				} else {
					Err(ElabErrorKind::TyMismatch { expected: ty.clone(), got }.at(e.range))
				}
			}
			(_, Some(form)) => {
				let (fragment, idx) = self.canonical_of(ty, e.range)?;
				self.set_delegate(e.id, fragment, form, idx.clone());
				let delegate = self.fragments.get(fragment);
				match form {
					Form::Literal => delegate.ana_literal(self, e, &idx)?,
					Form::NameConst => delegate.ana_name_const(self, e, &idx)?,
					Form::Tuple => delegate.ana_tuple(self, e, &idx)?,
					Form::List => delegate.ana_list(self, e, &idx)?,
					Form::Dict => delegate.ana_dict(self, e, &idx)?,
					Form::Set => delegate.ana_set(self, e, &idx)?,
					Form::Call => delegate.ana_call(self, e, &idx)?,
					Form::UnaryOp => delegate.ana_unaryop(self, e, &idx)?,
					Form::Lambda => delegate.ana_lambda(self, e, &idx)?,
					Form::FunctionDef => {
						let mut ctx = self.with_default(fragment);
						delegate.ana_function_def(&mut ctx, e, &idx)?;
					}
					_ => return Err(ElabErrorKind::Internal("form is not introductory".to_owned()).at(e.range)),
				}
				self.set_ty(e.id, ty.clone());
				Ok(())
			}
			(_, None) => {
				// Subsumption.
				let got = self.syn(e)?;
				if self.ty_expr_eq(ty, &got, &Kind::Ty, e.range)? {
					Ok(())
				} else {
					Err(ElabErrorKind::TyMismatch { expected: ty.clone(), got }.at(e.range))
				}
			}
		}
	}

	// Binary-operator dispatch. The only place the engine catches its own
	// typing errors: a side that fails to synthesize simply cedes dispatch
	// to the other.
	fn binop(&mut self, e: &Expr, expected: Option<&TyExpr>) -> Result<TyExpr, ElabError> {
		let ExprKind::BinOp { left, right, .. } = &e.kind else {
			return Err(ElabErrorKind::Internal("binop dispatch on a non-binop node".to_owned()).at(e.range));
		};
		let left_ty = self.syn(left);
		let right_ty = self.syn(right);
		let delegate_ty = match (left_ty, right_ty) {
			(Err(_), Err(_)) => {
				let Some(expected) = expected else {
					return Err(ElabErrorKind::Ty("neither operand synthesizes a type".to_owned()).at(e.range));
				};
				let expected = self.canonicalize(expected, e.range)?;
				let (fragment, idx) = self.canonical_of(&expected, e.range)?;
				self.set_delegate(e.id, fragment, Form::BinOp, idx.clone());
				self.fragments.get(fragment).ana_binop(self, e, &idx)?;
				return Ok(expected);
			}
			(Ok(ty), Err(_)) | (Err(_), Ok(ty)) => ty,
			(Ok(left_ty), Ok(right_ty)) => {
				let (left_fragment, _) = self.canonical_of(&left_ty, left.range)?;
				let (right_fragment, _) = self.canonical_of(&right_ty, right.range)?;
				if left_fragment == right_fragment {
					left_ty
				} else {
					match (
						self.fragments.precedes(right_fragment, left_fragment),
						self.fragments.precedes(left_fragment, right_fragment),
					) {
						(true, true) =>
							return Err(
								ElabErrorKind::Fragment("circular precedence between operand fragments".to_owned())
									.at(e.range),
							),
						(false, false) =>
							return Err(
								ElabErrorKind::Ty("operand types are unrelated by precedence".to_owned()).at(e.range),
							),
						// The absorbing fragment delegates.
						(true, false) => right_ty,
						(false, true) => left_ty,
					}
				}
			}
		};
		let (fragment, idx) = self.canonical_of(&delegate_ty, e.range)?;
		self.set_delegate(e.id, fragment, Form::BinOp, idx.clone());
		self.fragments.get(fragment).syn_binop(self, e, &idx)
	}

	// Statements.

	pub fn check(&mut self, stmt: &Stmt) -> Result<(), ElabError> {
		match &stmt.kind {
			StmtKind::Expr(_) => self.check_default(stmt, StmtForm::Expr),
			StmtKind::Assign { target, .. } => match &target.kind {
				ExprKind::Attribute { value, .. } => self.check_targeted(stmt, value, StmtForm::AssignTargeted),
				ExprKind::Subscript { value, .. } => self.check_targeted(stmt, value, StmtForm::AssignTargeted),
				_ => self.check_default(stmt, StmtForm::Assign),
			},
			StmtKind::AugAssign { target, .. } => self.check_targeted(stmt, target, StmtForm::AugAssign),
			StmtKind::If { test, .. } => self.check_targeted(stmt, test, StmtForm::If),
			StmtKind::While { test, .. } => self.check_targeted(stmt, test, StmtForm::While),
			StmtKind::For { iter, .. } => self.check_targeted(stmt, iter, StmtForm::For),
			StmtKind::With { item, .. } => self.check_targeted(stmt, item, StmtForm::With),
			StmtKind::Return(_) => self.check_default(stmt, StmtForm::Return),
			StmtKind::Raise(_) => self.check_default(stmt, StmtForm::Raise),
			StmtKind::Try { .. } => self.check_default(stmt, StmtForm::Try),
			StmtKind::Assert { .. } => self.check_default(stmt, StmtForm::Assert),
			StmtKind::Pass => self.check_default(stmt, StmtForm::Pass),
			StmtKind::Break => self.check_default(stmt, StmtForm::Break),
			StmtKind::Continue => self.check_default(stmt, StmtForm::Continue),
			StmtKind::Unsupported(form) =>
				Err(ElabErrorKind::Ty(format!("unsupported statement form: {form:?}")).at(stmt.range)),
		}
	}

	fn check_targeted(&mut self, stmt: &Stmt, target: &Expr, form: StmtForm) -> Result<(), ElabError> {
		let target_ty = self.syn(target)?;
		let (fragment, idx) = self.canonical_of(&target_ty, target.range)?;
		self.set_stmt_delegate(stmt.id, fragment, form, idx.clone());
		let delegate = self.fragments.get(fragment);
		match form {
			StmtForm::If => delegate.check_if(self, stmt, &idx),
			StmtForm::While => delegate.check_while(self, stmt, &idx),
			StmtForm::For => delegate.check_for(self, stmt, &idx),
			StmtForm::With => delegate.check_with(self, stmt, &idx),
			StmtForm::AugAssign => delegate.check_aug_assign(self, stmt, &idx),
			StmtForm::AssignTargeted => delegate.check_assign_targeted(self, stmt, &idx),
			_ => Err(ElabErrorKind::Internal("statement form is not targeted".to_owned()).at(stmt.range)),
		}
	}

	fn check_default(&mut self, stmt: &Stmt, form: StmtForm) -> Result<(), ElabError> {
		let (fragment, idx) = self.default_delegate(stmt.range)?;
		self.set_stmt_delegate(stmt.id, fragment, form, idx.clone());
		let delegate = self.fragments.get(fragment);
		match form {
			StmtForm::Expr => delegate.check_expr_stmt(self, stmt, &idx),
			StmtForm::Assign => delegate.check_assign(self, stmt, &idx),
			StmtForm::Return => delegate.check_return(self, stmt, &idx),
			StmtForm::Raise => delegate.check_raise(self, stmt, &idx),
			StmtForm::Try => delegate.check_try(self, stmt, &idx),
			StmtForm::Assert => delegate.check_assert(self, stmt, &idx),
			StmtForm::Pass => delegate.check_pass(self, stmt, &idx),
			StmtForm::Break => delegate.check_break(self, stmt, &idx),
			StmtForm::Continue => delegate.check_continue(self, stmt, &idx),
			_ => Err(ElabErrorKind::Internal("statement form is not a default form".to_owned()).at(stmt.range)),
		}
	}

	// Translation.

	/// Emits the translation of an elaborated expression. Total on
	/// well-typed inputs; the output erases all static structure.
	pub fn trans(&mut self, e: &Expr) -> Result<Expr, ElabError> {
		match &e.kind {
			ExprKind::Name(_) => {
				if let Some(uniq) = self.uniq_of(e.id) {
					return Ok(ExprKind::Name(self.uniq_name(uniq, e.range)?).synth());
				}
				match self.ty_of(e.id) {
					Some(TyExpr::Canonical { idx: Idx::Component(component), .. }) =>
						Ok(ExprKind::Name(component.module_name).synth()),
					_ => Err(ElabErrorKind::Internal("translated name was never elaborated".to_owned()).at(e.range)),
				}
			}
			ExprKind::Match { .. } => self.trans_match(e),
			ExprKind::Subscript { value, .. }
				if self.annots.get(&e.id).and_then(|a| a.form) == Some(Form::Ascription) =>
				self.trans(value),
			_ => {
				let annot = self.annots.get(&e.id).cloned().unwrap_or_default();
				let (Some(fragment), Some(form)) = (annot.fragment, annot.form) else {
					return Err(ElabErrorKind::Internal("translated node has no delegate".to_owned()).at(e.range));
				};
				let idx = annot
					.idx
					.ok_or_else(|| ElabErrorKind::Internal("translated node has no index".to_owned()).at(e.range))?;
				let delegate = self.fragments.get(fragment);
				match form {
					Form::Literal => delegate.trans_literal(self, e, &idx),
					Form::NameConst => delegate.trans_name_const(self, e, &idx),
					Form::Tuple => delegate.trans_tuple(self, e, &idx),
					Form::List => delegate.trans_list(self, e, &idx),
					Form::Dict => delegate.trans_dict(self, e, &idx),
					Form::Set => delegate.trans_set(self, e, &idx),
					Form::Call => delegate.trans_call(self, e, &idx),
					Form::UnaryOp => delegate.trans_unaryop(self, e, &idx),
					Form::Lambda => delegate.trans_lambda(self, e, &idx),
					Form::FunctionDef => delegate.trans_function_def(self, e, &idx),
					Form::Attribute => delegate.trans_attribute(self, e, &idx),
					Form::Subscript => delegate.trans_subscript(self, e, &idx),
					Form::Compare => delegate.trans_compare(self, e, &idx),
					Form::BinOp => delegate.trans_binop(self, e, &idx),
					Form::BoolOp => delegate.trans_boolop(self, e, &idx),
					Form::IfExp => delegate.trans_ifexp(self, e, &idx),
					Form::Name | Form::Match | Form::Ascription =>
						Err(ElabErrorKind::Internal("engine form reached fragment dispatch".to_owned()).at(e.range)),
				}
			}
		}
	}

	pub fn trans_stmt(&mut self, stmt: &Stmt) -> Result<Vec<Stmt>, ElabError> {
		let annot = self.annots.get(&stmt.id).cloned().unwrap_or_default();
		let (Some(fragment), Some(form)) = (annot.fragment, annot.stmt_form) else {
			return Err(ElabErrorKind::Internal("translated statement has no delegate".to_owned()).at(stmt.range));
		};
		let idx = annot
			.idx
			.ok_or_else(|| ElabErrorKind::Internal("translated statement has no index".to_owned()).at(stmt.range))?;
		let delegate = self.fragments.get(fragment);
		match form {
			StmtForm::Expr => delegate.trans_expr_stmt(self, stmt, &idx),
			StmtForm::Assign => delegate.trans_assign(self, stmt, &idx),
			StmtForm::AssignTargeted => delegate.trans_assign_targeted(self, stmt, &idx),
			StmtForm::AugAssign => delegate.trans_aug_assign(self, stmt, &idx),
			StmtForm::Return => delegate.trans_return(self, stmt, &idx),
			StmtForm::If => delegate.trans_if(self, stmt, &idx),
			StmtForm::While => delegate.trans_while(self, stmt, &idx),
			StmtForm::For => delegate.trans_for(self, stmt, &idx),
			StmtForm::With => delegate.trans_with(self, stmt, &idx),
			StmtForm::Try => delegate.trans_try(self, stmt, &idx),
			StmtForm::Raise => delegate.trans_raise(self, stmt, &idx),
			StmtForm::Assert => delegate.trans_assert(self, stmt, &idx),
			StmtForm::Pass => delegate.trans_pass(self, stmt, &idx),
			StmtForm::Break => delegate.trans_break(self, stmt, &idx),
			StmtForm::Continue => delegate.trans_continue(self, stmt, &idx),
		}
	}

	pub fn trans_block(&mut self, stmts: &[Stmt]) -> Result<Vec<Stmt>, ElabError> {
		let mut out = Vec::with_capacity(stmts.len());
		for stmt in stmts {
			out.extend(self.trans_stmt(stmt)?);
		}
		Ok(out)
	}
}

pub struct ScopedContext<'c, 'a> {
	context: &'c mut Context<'a>,
}

impl<'a> Deref for ScopedContext<'_, 'a> {
	type Target = Context<'a>;

	fn deref(&self) -> &Self::Target { self.context }
}

impl DerefMut for ScopedContext<'_, '_> {
	fn deref_mut(&mut self) -> &mut Self::Target { self.context }
}

impl Drop for ScopedContext<'_, '_> {
	fn drop(&mut self) { self.context.scopes.pop(); }
}

pub struct DefaultedContext<'c, 'a> {
	context: &'c mut Context<'a>,
}

impl<'a> Deref for DefaultedContext<'_, 'a> {
	type Target = Context<'a>;

	fn deref(&self) -> &Self::Target { self.context }
}

impl DerefMut for DefaultedContext<'_, '_> {
	fn deref_mut(&mut self) -> &mut Self::Target { self.context }
}

impl Drop for DefaultedContext<'_, '_> {
	fn drop(&mut self) { self.context.defaults.pop(); }
}
