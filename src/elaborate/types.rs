//! Kind checking, canonicalization, and type equality.
//!
//! A type expression is canonicalized by chasing singleton kinds until a
//! `(fragment, index)` pair appears. Equality at kind `Ty` is decided by the
//! owning fragment's index equality; no cross-fragment comparison exists.

use crate::{
	elaborate::{
		context::Context,
		error::{ElabError, ElabErrorKind},
	},
	fragment::StaticValue,
	ir::{
		ast::Expr,
		ty::{Idx, Kind, TyExpr, UTyExpr},
	},
};

impl Context<'_> {
	/// Synthesizes the most precise kind of a well-formed type expression.
	pub fn syn_ty_kind(&mut self, ty: &TyExpr, range: (usize, usize)) -> Result<Kind, ElabError> {
		match ty {
			TyExpr::Var(uniq) => self
				.scopes
				.kind_of(*uniq)
				.cloned()
				.ok_or_else(|| ElabErrorKind::Kind("unbound type variable".to_owned()).at(range)),
			TyExpr::Canonical { .. } => Ok(Kind::Singleton(Box::new(ty.clone()))),
			TyExpr::Projection { component, label } => component.kind_of_member(*label).ok_or_else(|| {
				ElabErrorKind::Kind(format!(
					"component `{}` has no type member `{}`",
					self.interner.resolve(&component.name),
					self.interner.resolve(label)
				))
				.at(range)
			}),
		}
	}

	pub fn ana_ty_expr(&mut self, ty: &TyExpr, kind: &Kind, range: (usize, usize)) -> Result<(), ElabError> {
		let got = self.syn_ty_kind(ty, range)?;
		if self.kind_le(&got, kind, range)? {
			Ok(())
		} else {
			Err(ElabErrorKind::Kind("type expression has the wrong kind".to_owned()).at(range))
		}
	}

	/// The subkinding order: `Singleton(c) ≤ Ty`, singletons of equal
	/// inhabitants are related, and `Ty` is only below itself.
	pub fn kind_le(&mut self, a: &Kind, b: &Kind, range: (usize, usize)) -> Result<bool, ElabError> {
		match (a, b) {
			(_, Kind::Ty) => Ok(true),
			(Kind::Ty, Kind::Singleton(_)) => Ok(false),
			(Kind::Singleton(a), Kind::Singleton(b)) => self.ty_expr_eq(a, b, &Kind::Ty, range),
		}
	}

	/// Chases variables and projections of singleton kind down to the
	/// inhabitant. Variables of kind `Ty` are already canonical for the
	/// purposes of equality and are returned unchanged.
	pub fn canonicalize(&mut self, ty: &TyExpr, range: (usize, usize)) -> Result<TyExpr, ElabError> {
		match self.syn_ty_kind(ty, range)? {
			Kind::Singleton(inhabitant) =>
				if let TyExpr::Canonical { .. } = *inhabitant {
					Ok(*inhabitant)
				} else {
					self.canonicalize(&inhabitant, range)
				},
			Kind::Ty => Ok(ty.clone()),
		}
	}

	/// Canonicalizes a type together with every type nested in its index.
	/// Member signatures cross context boundaries, so any type variable bound
	/// in the current scopes must be resolved away before it escapes.
	pub fn canonicalize_deep(&mut self, ty: &TyExpr, range: (usize, usize)) -> Result<TyExpr, ElabError> {
		match self.canonicalize(ty, range)? {
			TyExpr::Canonical { fragment, idx } => {
				let idx = self.canonicalize_idx(&idx, range)?;
				Ok(TyExpr::Canonical { fragment, idx })
			}
			ty => Ok(ty),
		}
	}

	fn canonicalize_idx(&mut self, idx: &Idx, range: (usize, usize)) -> Result<Idx, ElabError> {
		match idx {
			Idx::Ty(ty) => Ok(Idx::ty(self.canonicalize_deep(ty, range)?)),
			Idx::Seq(items) => Ok(Idx::Seq(
				items.iter().map(|item| self.canonicalize_idx(item, range)).collect::<Result<_, _>>()?,
			)),
			Idx::Labeled(fields) => Ok(Idx::Labeled(
				fields
					.iter()
					.map(|(label, item)| Ok((*label, self.canonicalize_idx(item, range)?)))
					.collect::<Result<_, ElabError>>()?,
			)),
			idx => Ok(idx.clone()),
		}
	}

	/// The fragment and index a type canonicalizes to; fails on abstract
	/// type variables, which identify no fragment.
	pub fn canonical_of(&mut self, ty: &TyExpr, range: (usize, usize)) -> Result<(crate::fragment::FragmentId, Idx), ElabError> {
		match self.canonicalize(ty, range)? {
			TyExpr::Canonical { fragment, idx } => Ok((fragment, idx)),
			_ => Err(ElabErrorKind::Ty("type does not canonicalize to a fragment".to_owned()).at(range)),
		}
	}

	/// Equality of type expressions at a kind. At a singleton kind every
	/// pair of well-formed inhabitants is equal; at kind `Ty` equality is
	/// decided after canonicalization.
	pub fn ty_expr_eq(&mut self, a: &TyExpr, b: &TyExpr, kind: &Kind, range: (usize, usize)) -> Result<bool, ElabError> {
		if let Kind::Singleton(_) = kind {
			self.ana_ty_expr(a, kind, range)?;
			self.ana_ty_expr(b, kind, range)?;
			return Ok(true);
		}
		let a = self.canonicalize(a, range)?;
		let b = self.canonicalize(b, range)?;
		match (&a, &b) {
			(TyExpr::Var(a), TyExpr::Var(b)) => Ok(a == b),
			(
				TyExpr::Canonical { fragment: a_fragment, idx: a_idx },
				TyExpr::Canonical { fragment: b_fragment, idx: b_idx },
			) =>
				if a_fragment == b_fragment {
					self.fragments.get(*a_fragment).idx_eq(self, a_idx, b_idx, range)
				} else {
					Ok(false)
				},
			_ => Ok(false),
		}
	}

	/// Default index equality: structural, with nested types compared at
	/// kind `Ty` and components compared by identity.
	pub fn idx_eq_structural(&mut self, a: &Idx, b: &Idx, range: (usize, usize)) -> Result<bool, ElabError> {
		match (a, b) {
			(Idx::Unit, Idx::Unit) => Ok(true),
			(Idx::Num(a), Idx::Num(b)) => Ok(a == b),
			(Idx::Str(a), Idx::Str(b)) => Ok(a == b),
			(Idx::Label(a), Idx::Label(b)) => Ok(a == b),
			(Idx::Ty(a), Idx::Ty(b)) => self.ty_expr_eq(a, b, &Kind::Ty, range),
			(Idx::Seq(a), Idx::Seq(b)) => {
				if a.len() != b.len() {
					return Ok(false);
				}
				for (a, b) in a.iter().zip(b) {
					if !self.idx_eq_structural(a, b, range)? {
						return Ok(false);
					}
				}
				Ok(true)
			}
			(Idx::Labeled(a), Idx::Labeled(b)) => {
				if a.len() != b.len() {
					return Ok(false);
				}
				for ((a_label, a_idx), (b_label, b_idx)) in a.iter().zip(b) {
					if a_label != b_label || !self.idx_eq_structural(a_idx, b_idx, range)? {
						return Ok(false);
					}
				}
				Ok(true)
			}
			(Idx::Component(a), Idx::Component(b)) => Ok(std::rc::Rc::ptr_eq(a, b)),
			_ => Ok(false),
		}
	}

	/// Validates a surface type expression against an expected kind,
	/// producing the semantic type. The surface grammar admits bound type
	/// names, subscripted and bare fragment references, and component
	/// member projections.
	pub fn ana_uty_expr(&mut self, expr: &Expr, kind: &Kind) -> Result<TyExpr, ElabError> {
		let range = expr.range;
		let Some(uty) = UTyExpr::classify(expr) else {
			return Err(ElabErrorKind::TypeFormation("expression is not a type expression".to_owned()).at(range));
		};
		let ty = match uty {
			UTyExpr::Name(name) =>
				if let Some(uniq) = self.scopes.lookup_ty_name(name) {
					TyExpr::Var(uniq)
				} else {
					match self.host.lookup(name) {
						Some(StaticValue::Fragment(fragment)) => {
							let fragment = *fragment;
							let idx = self.fragments.get(fragment).trivial_idx(self, range)?;
							TyExpr::Canonical { fragment, idx }
						}
						_ =>
							return Err(
								ElabErrorKind::TypeFormation("name does not denote a type".to_owned()).at(range),
							),
					}
				},
			UTyExpr::Canonical { head, idx } => {
				let Some(StaticValue::Fragment(fragment)) = self.host.evaluate(head) else {
					return Err(
						ElabErrorKind::TypeFormation("subscripted type head does not denote a fragment".to_owned())
							.at(head.range),
					);
				};
				let idx = self.fragments.get(fragment).init_idx(self, idx, range)?;
				TyExpr::Canonical { fragment, idx }
			}
			UTyExpr::Projection { path, label } => {
				// An attribute chain may name a fragment through namespaces;
				// otherwise it must project a type member out of a component.
				if let Some(StaticValue::Fragment(fragment)) = self.host.evaluate(expr) {
					let idx = self.fragments.get(fragment).trivial_idx(self, range)?;
					TyExpr::Canonical { fragment, idx }
				} else {
					match self.host.evaluate(path) {
						Some(StaticValue::Component(component)) => {
							if component.kind_of_member(label).is_none() {
								return Err(
									ElabErrorKind::TypeFormation(format!(
										"component `{}` has no type member `{}`",
										self.interner.resolve(&component.name),
										self.interner.resolve(&label)
									))
									.at(range),
								);
							}
							TyExpr::Projection { component, label }
						}
						_ =>
							return Err(
								ElabErrorKind::TypeFormation("projection path does not denote a component".to_owned())
									.at(path.range),
							),
					}
				}
			}
		};
		self.ana_ty_expr(&ty, kind, range)?;
		Ok(ty)
	}
}
