//! The error taxonomy. Every error carries the source range of the node it
//! was raised at; human-readable rendering lives in `report`.

use crate::{
	fragment::{Form, StmtForm},
	ir::ty::TyExpr,
};

#[derive(Debug, Clone)]
pub struct ElabError {
	pub range: (usize, usize),
	pub kind: ElabErrorKind,
}

#[derive(Debug, Clone)]
pub enum ElabErrorKind {
	// A surface type expression cannot be validated into a well-formed type or index.
	TypeFormation(String),
	// A fragment rejected a candidate index.
	TypeValidation(String),
	// A type expression has the wrong kind in context.
	Kind(String),
	// A term is ill-typed, or an unsupported form appears where a supported one is required.
	Ty(String),
	// Specialization of `Ty` carrying the two types that failed to agree.
	TyMismatch { expected: TyExpr, got: TyExpr },
	// A component body is malformed.
	ComponentFormation(String),
	// A fragment is internally malformed.
	Fragment(String),
	// Incorrect use of the framework API, as distinct from a user-level type error.
	Usage(String),
	// An internal invariant has been violated; indicates a bug.
	Internal(String),
}

impl ElabErrorKind {
	pub fn at(self, range: (usize, usize)) -> ElabError { ElabError { range, kind: self } }

	pub fn unsupported(fragment: &'static str, form: Form) -> Self {
		Self::Ty(format!("form `{}` is not supported at type `{}`", form.label(), fragment))
	}

	pub fn unsupported_pat(fragment: &'static str, form: Form) -> Self {
		Self::Ty(format!("pattern form `{}` is not supported at type `{}`", form.label(), fragment))
	}

	pub fn unsupported_stmt(fragment: &'static str, form: StmtForm) -> Self {
		Self::Ty(format!("statement form `{}` is not supported by `{}`", form.label(), fragment))
	}
}
