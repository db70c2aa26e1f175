//! Scoped binding maps.
//!
//! Three maps share one stack of lexical scopes: term names to uniques and
//! types, type names to type variables, and type-variable uniques to kinds.
//! Lookups search inner scopes outward; binding in an inner scope shadows.

use std::collections::HashMap;

use crate::{
	common::{Name, Uniq},
	ir::ty::{Kind, TyExpr},
};

#[derive(Default)]
struct Scope {
	terms: HashMap<Name, (Uniq, TyExpr)>,
	ty_names: HashMap<Name, Uniq>,
	kinds: HashMap<Uniq, Kind>,
}

/// The root scope is stored apart from the stack, so the innermost scope
/// always exists.
#[derive(Default)]
pub struct Scopes {
	root: Scope,
	stack: Vec<Scope>,
}

impl Scopes {
	pub fn new() -> Self { Self::default() }

	pub fn push(&mut self) { self.stack.push(Scope::default()); }

	pub fn pop(&mut self) {
		let popped = self.stack.pop();
		debug_assert!(popped.is_some(), "popped the root scope");
	}

	fn innermost(&self) -> &Scope { self.stack.last().unwrap_or(&self.root) }

	fn innermost_mut(&mut self) -> &mut Scope { self.stack.last_mut().unwrap_or(&mut self.root) }

	fn outward(&self) -> impl Iterator<Item = &Scope> {
		self.stack.iter().rev().chain(std::iter::once(&self.root))
	}

	pub fn bind_term(&mut self, name: Name, uniq: Uniq, ty: TyExpr) {
		self.innermost_mut().terms.insert(name, (uniq, ty));
	}

	pub fn bind_ty_name(&mut self, name: Name, uniq: Uniq, kind: Kind) {
		let scope = self.innermost_mut();
		scope.ty_names.insert(name, uniq);
		scope.kinds.insert(uniq, kind);
	}

	pub fn lookup_term(&self, name: Name) -> Option<&(Uniq, TyExpr)> {
		self.outward().find_map(|scope| scope.terms.get(&name))
	}

	/// Whether the innermost scope already binds `name`; used to reject
	/// duplicate bindings within one pattern.
	pub fn binds_term_innermost(&self, name: Name) -> bool { self.innermost().terms.contains_key(&name) }

	pub fn lookup_ty_name(&self, name: Name) -> Option<Uniq> {
		self.outward().find_map(|scope| scope.ty_names.get(&name)).copied()
	}

	pub fn kind_of(&self, uniq: Uniq) -> Option<&Kind> {
		self.outward().find_map(|scope| scope.kinds.get(&uniq))
	}
}
