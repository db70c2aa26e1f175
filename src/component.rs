//! Components: named collections of typed members, elaborated in source
//! order and translated to a host module value.
//!
//! A component body is a statement block. An annotated assignment whose
//! annotation is the reserved head `type` declares a type member; any other
//! assignment declares a value member; a decorated function definition in
//! statement position declares a named value member; a bare expression
//! statement is an anonymous effect member. Later members see earlier ones
//! through the ordinary scope maps, so member elaboration is just the
//! expression judgments run in sequence.

use std::rc::Rc;

use lasso::Rodeo;

use crate::{
	common::{Label, Name},
	elaborate::{
		context::Context,
		error::{ElabError, ElabErrorKind},
	},
	fragment::{Fragment, Fragments, StaticEnv},
	ir::{
		ast::{Expr, ExprKind, Slice, Stmt, StmtKind},
		ty::{Idx, Kind, TyExpr},
	},
	utility::rc,
};

/// A component declaration as handed over by the host: a name and the
/// member block.
#[derive(Clone, Debug)]
pub struct ComponentDecl {
	pub name: Name,
	pub range: (usize, usize),
	pub body: Vec<Stmt>,
}

/// The signature of one elaborated member.
#[derive(Clone, Debug)]
pub enum MemberSig {
	/// A term member and its type.
	Value(TyExpr),
	/// A type member and its canonical inhabitant.
	Type(TyExpr),
}

/// An elaborated component. Identity is nominal: two components are the
/// same type only when they are the same declaration.
#[derive(Debug)]
pub struct Component {
	pub name: Name,
	/// The emitted name of the module value holding the term members.
	pub module_name: Name,
	members: Vec<(Label, MemberSig)>,
	/// The member block's translation, ending with the module assembly.
	pub translation: Vec<Stmt>,
}

impl Component {
	pub fn member(&self, label: Label) -> Option<&MemberSig> {
		self.members.iter().find(|(l, _)| *l == label).map(|(_, sig)| sig)
	}

	/// The kind a projection of `label` out of this component carries;
	/// `None` when the label names no type member.
	pub fn kind_of_member(&self, label: Label) -> Option<Kind> {
		match self.member(label)? {
			MemberSig::Type(inhabitant) => Some(Kind::Singleton(Box::new(inhabitant.clone()))),
			MemberSig::Value(_) => None,
		}
	}

	pub fn ty_of_member(&self, label: Label) -> Option<&TyExpr> {
		match self.member(label)? {
			MemberSig::Value(ty) => Some(ty),
			MemberSig::Type(_) => None,
		}
	}

	pub fn labels(&self) -> impl Iterator<Item = Label> + '_ { self.members.iter().map(|(l, _)| *l) }
}

/// Elaborates a component declaration under a host environment, yielding
/// the component and its translation. Members are processed strictly in
/// source order; the first ill-typed member aborts the component.
pub fn elaborate_component(
	fragments: &Fragments,
	host: &StaticEnv,
	interner: &mut Rodeo,
	decl: &ComponentDecl,
) -> Result<Rc<Component>, ElabError> {
	let mut ctx = Context::new(fragments, host, interner);
	let (_, module_name) = ctx.fresh_uniq(decl.name);
	let mut members: Vec<(Label, MemberSig)> = Vec::new();
	let mut translation: Vec<Stmt> = Vec::new();
	let mut term_labels: Vec<(Label, Name)> = Vec::new();

	let declare = |members: &mut Vec<(Label, MemberSig)>, label: Label, sig: MemberSig, range| {
		if members.iter().any(|(l, _)| *l == label) {
			return Err(ElabErrorKind::ComponentFormation("duplicate member name".to_owned()).at(range));
		}
		members.push((label, sig));
		Ok(())
	};

	for stmt in &decl.body {
		match &stmt.kind {
			StmtKind::Pass => {}

			StmtKind::Assign { target, annotation, value } => {
				let ExprKind::Name(label) = &target.kind else {
					return Err(
						ElabErrorKind::ComponentFormation("member target must be a plain name".to_owned())
							.at(target.range),
					);
				};
				let label = *label;
				match annotation.as_ref().and_then(|ann| classify_kind_annotation(&mut ctx, ann).transpose()) {
					// A type member: the right-hand side is a surface type
					// expression checked at the annotated kind.
					Some(kind) => {
						let kind = kind?;
						let ty = ctx.ana_uty_expr(value, &kind)?;
						let inhabitant = ctx.canonicalize_deep(&ty, value.range)?;
						let (uniq, _) = ctx.fresh_uniq(label);
						ctx.scopes.bind_ty_name(label, uniq, Kind::Singleton(Box::new(inhabitant.clone())));
						declare(&mut members, label, MemberSig::Type(inhabitant), stmt.range)?;
					}
					// A value member, analyzed at its annotation when one
					// is present and synthesized otherwise.
					None => {
						let ty = match annotation {
							Some(ann) => {
								let ty = ctx.ana_uty_expr(ann, &Kind::Ty)?;
								ctx.ana(value, &ty)?;
								ty
							}
							None => ctx.syn(value)?,
						};
						// The signature outlives this context, so scope-local
						// type variables must not escape into it.
						let sig_ty = ctx.canonicalize_deep(&ty, value.range)?;
						let translated = ctx.trans(value)?;
						let (uniq, minted) = ctx.fresh_uniq(label);
						ctx.scopes.bind_term(label, uniq, ty);
						translation.push(
							StmtKind::Assign {
								target: ExprKind::Name(minted).synth(),
								annotation: None,
								value: translated,
							}
							.synth(),
						);
						declare(&mut members, label, MemberSig::Value(sig_ty), stmt.range)?;
						term_labels.push((label, minted));
					}
				}
			}

			StmtKind::Expr(expr) => match &expr.kind {
				ExprKind::FunctionDef { name: label, .. } => {
					let ty = ctx.syn(expr)?;
					let sig_ty = ctx.canonicalize_deep(&ty, expr.range)?;
					let translated = ctx.trans(expr)?;
					let (uniq, minted) = ctx.fresh_uniq(*label);
					ctx.scopes.bind_term(*label, uniq, ty);
					translation.push(
						StmtKind::Assign {
							target: ExprKind::Name(minted).synth(),
							annotation: None,
							value: translated,
						}
						.synth(),
					);
					declare(&mut members, *label, MemberSig::Value(sig_ty), stmt.range)?;
					term_labels.push((*label, minted));
				}
				// An effect member: synthesized for its type, kept only for
				// its translation.
				_ => {
					ctx.syn(expr)?;
					let translated = ctx.trans(expr)?;
					translation.push(StmtKind::Expr(translated).synth());
				}
			},

			_ => return Err(ElabErrorKind::ComponentFormation("statement form not allowed as a member".to_owned()).at(stmt.range)),
		}
	}

	// Assemble the module value from the term members.
	let mut keys = Vec::with_capacity(term_labels.len());
	let mut values = Vec::with_capacity(term_labels.len());
	for (label, minted) in &term_labels {
		keys.push(ExprKind::Str(Rc::from(ctx.interner.resolve(label))).synth());
		values.push(ExprKind::Name(*minted).synth());
	}
	translation.push(
		StmtKind::Assign {
			target: ExprKind::Name(module_name).synth(),
			annotation: None,
			value: ExprKind::Dict { keys, values }.synth(),
		}
		.synth(),
	);

	Ok(rc!(Component { name: decl.name, module_name, members, translation }))
}

/// Recognizes the reserved kind annotations `type` and `type[c]`. Any other
/// annotation is an ordinary type ascription for a value member.
fn classify_kind_annotation(ctx: &mut Context, ann: &Expr) -> Result<Option<Kind>, ElabError> {
	match &ann.kind {
		ExprKind::Name(name) if *name == ctx.kw_type() => Ok(Some(Kind::Ty)),
		ExprKind::Subscript { value, slice } => {
			let ExprKind::Name(name) = &value.kind else { return Ok(None) };
			if *name != ctx.kw_type() {
				return Ok(None);
			}
			let Slice::Index(inhabitant) = slice else {
				return Err(
					ElabErrorKind::TypeFormation("a singleton kind takes exactly one type argument".to_owned())
						.at(ann.range),
				);
			};
			let inhabitant = ctx.ana_uty_expr(inhabitant, &Kind::Ty)?;
			Ok(Some(Kind::Singleton(Box::new(inhabitant))))
		}
		_ => Ok(None),
	}
}

/// The engine-owned fragment of component types. Registered at slot zero;
/// its index is always the component itself, making component types nominal.
pub struct ComponentFragment;

impl Fragment for ComponentFragment {
	fn name(&self) -> &'static str { "component" }

	fn syn_attribute(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<TyExpr, ElabError> {
		let ExprKind::Attribute { label, .. } = &e.kind else {
			return Err(ElabErrorKind::Internal("attribute dispatch on a non-attribute node".to_owned()).at(e.range));
		};
		let Idx::Component(component) = idx else {
			return Err(ElabErrorKind::Fragment("component fragment with a foreign index".to_owned()).at(e.range));
		};
		match component.member(*label) {
			Some(MemberSig::Value(ty)) => Ok(ty.clone()),
			Some(MemberSig::Type(_)) =>
				Err(ElabErrorKind::Ty("type member used in value position".to_owned()).at(e.range)),
			None => Err(
				ElabErrorKind::Ty(format!(
					"component `{}` has no member `{}`",
					ctx.interner.resolve(&component.name),
					ctx.interner.resolve(label)
				))
				.at(e.range),
			),
		}
	}

	fn trans_attribute(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<Expr, ElabError> {
		let ExprKind::Attribute { value, label } = &e.kind else {
			return Err(ElabErrorKind::Internal("attribute dispatch on a non-attribute node".to_owned()).at(e.range));
		};
		let Idx::Component(_) = idx else {
			return Err(ElabErrorKind::Fragment("component fragment with a foreign index".to_owned()).at(e.range));
		};
		let module = ctx.trans(value)?;
		let key = ExprKind::Str(Rc::from(ctx.interner.resolve(label))).synth();
		Ok(ExprKind::Subscript { value: Box::new(module), slice: Slice::Index(Box::new(key)) }.synth())
	}
}
