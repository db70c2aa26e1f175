//! Kinds, type expressions, and fragment indices.

use std::rc::Rc;

use crate::{
	common::{Label, Name, Uniq},
	component::Component,
	fragment::FragmentId,
	ir::ast::{Expr, ExprKind, Slice},
};

/// The kind of a type expression. `Singleton(c)` is inhabited, up to
/// equivalence, by exactly the canonical type `c`; `Singleton(c) ≤ Ty`.
#[derive(Clone, Debug)]
pub enum Kind {
	Ty,
	Singleton(Box<TyExpr>),
}

#[derive(Clone, Debug)]
pub enum TyExpr {
	// A bound type variable; its kind lives in the type environment.
	Var(Uniq),
	// An identified fragment together with that fragment's index.
	Canonical { fragment: FragmentId, idx: Idx },
	// A member projection out of a component.
	Projection { component: Rc<Component>, label: Label },
}

/// A fragment-specific index payload. The engine never interprets an index;
/// it only threads indices between a fragment's own handlers and compares
/// them through that fragment's `idx_eq`.
#[derive(Clone, Debug)]
pub enum Idx {
	Unit,
	Num(i64),
	Str(Rc<str>),
	Label(Name),
	Ty(Box<TyExpr>),
	Seq(Vec<Idx>),
	Labeled(Vec<(Label, Idx)>),
	Component(Rc<Component>),
}

impl Idx {
	pub fn ty(ty: TyExpr) -> Self { Self::Ty(Box::new(ty)) }

	pub fn as_ty(&self) -> Option<&TyExpr> {
		match self {
			Self::Ty(ty) => Some(ty),
			_ => None,
		}
	}
}

/// A surface type expression before kind checking, classified by shape from
/// the host AST. Everything else is rejected as a type formation error.
#[derive(Clone, Copy, Debug)]
pub enum UTyExpr<'a> {
	Name(Name),
	Canonical { head: &'a Expr, idx: &'a Slice },
	Projection { path: &'a Expr, label: Label },
}

impl<'a> UTyExpr<'a> {
	pub fn classify(expr: &'a Expr) -> Option<Self> {
		match &expr.kind {
			ExprKind::Name(name) => Some(Self::Name(*name)),
			ExprKind::Subscript { value, slice } => Some(Self::Canonical { head: value, idx: slice }),
			ExprKind::Attribute { value, label } => Some(Self::Projection { path: value, label: *label }),
			_ => None,
		}
	}
}
