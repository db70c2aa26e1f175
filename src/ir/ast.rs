//! The host surface syntax.
//!
//! The host parses its own source text and hands the engine trees in this
//! shape; the engine also emits its translations as trees in this shape, so
//! that the host's pretty-printer can turn them back into source text. Every
//! node carries a half-open byte range into the host source for error
//! reporting and a fresh identity for the annotation table.

use std::rc::Rc;

use crate::common::{Label, Name, NodeId};

#[derive(Clone, Debug)]
pub struct Expr {
	pub id: NodeId,
	pub range: (usize, usize),
	pub kind: ExprKind,
}

#[derive(Clone, Debug)]
pub enum ExprKind {
	// Identifiers.
	Name(Name),
	NameConst(NameConst),

	// Literals.
	Int(i64),
	Float(f64),
	Str(Rc<str>),

	// Collections.
	Tuple(Vec<Expr>),
	List(Vec<Expr>),
	Set(Vec<Expr>),
	Dict { keys: Vec<Expr>, values: Vec<Expr> },

	// Targeted forms.
	Attribute { value: Box<Expr>, label: Label },
	Subscript { value: Box<Expr>, slice: Slice },
	Call { callee: Box<Expr>, args: Vec<Expr>, keywords: Vec<(Name, Expr)> },
	Compare { left: Box<Expr>, ops: Vec<CompareOp>, comparators: Vec<Expr> },
	BinOp { left: Box<Expr>, op: BinOp, right: Box<Expr> },
	BoolOp { op: BoolOp, values: Vec<Expr> },
	UnaryOp { op: UnaryOp, operand: Box<Expr> },
	IfExp { test: Box<Expr>, body: Box<Expr>, orelse: Box<Expr> },

	// Functions.
	Lambda { params: Vec<Param>, body: Box<Expr> },
	FunctionDef { name: Name, decorators: Vec<Expr>, params: Vec<Param>, returns: Option<Box<Expr>>, body: Vec<Stmt> },

	// Pattern matching, recognized by the host from its match sugar.
	Match { scrutinee: Box<Expr>, rules: Vec<MatchRule> },
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NameConst {
	True,
	False,
	None,
}

/// The contents of a subscript's brackets. An ascription `value[: ty]` is a
/// bounds slice with only an upper bound; a labeled index `tpl['a': ty]` is a
/// list of bounds slices with string lower bounds.
#[derive(Clone, Debug)]
pub enum Slice {
	Index(Box<Expr>),
	Bounds { lower: Option<Box<Expr>>, upper: Option<Box<Expr>>, step: Option<Box<Expr>> },
	Items(Vec<Slice>),
}

impl Slice {
	/// An ascription slice carries exactly an upper bound.
	pub fn as_ascription(&self) -> Option<&Expr> {
		match self {
			Self::Bounds { lower: None, upper: Some(upper), step: None } => Some(upper),
			_ => None,
		}
	}
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BinOp {
	Add,
	Sub,
	Mul,
	Div,
	FloorDiv,
	Mod,
	Pow,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BoolOp {
	And,
	Or,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UnaryOp {
	Not,
	Neg,
	Pos,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CompareOp {
	Eq,
	NotEq,
	Lt,
	LtE,
	Gt,
	GtE,
}

#[derive(Clone, Debug)]
pub struct Param {
	pub id: NodeId,
	pub range: (usize, usize),
	pub name: Name,
	pub annotation: Option<Expr>,
}

impl Param {
	pub fn new(name: Name, annotation: Option<Expr>, range: (usize, usize)) -> Self {
		Self { id: NodeId::fresh(), range, name, annotation }
	}
}

#[derive(Clone, Debug)]
pub struct MatchRule {
	pub pat: Pat,
	pub body: Expr,
}

#[derive(Clone, Debug)]
pub struct Stmt {
	pub id: NodeId,
	pub range: (usize, usize),
	pub kind: StmtKind,
}

#[derive(Clone, Debug)]
pub enum StmtKind {
	Expr(Expr),
	Assign { target: Expr, annotation: Option<Expr>, value: Expr },
	AugAssign { target: Expr, op: BinOp, value: Expr },
	Return(Option<Expr>),
	If { test: Expr, body: Vec<Stmt>, orelse: Vec<Stmt> },
	While { test: Expr, body: Vec<Stmt>, orelse: Vec<Stmt> },
	For { target: Expr, iter: Expr, body: Vec<Stmt>, orelse: Vec<Stmt> },
	With { item: Expr, binding: Option<Expr>, body: Vec<Stmt> },
	Try { body: Vec<Stmt>, handlers: Vec<Handler>, orelse: Vec<Stmt>, finalbody: Vec<Stmt> },
	Raise(Option<Expr>),
	Assert { test: Expr, msg: Option<Expr> },
	Pass,
	Break,
	Continue,
	// Host forms the engine rejects outright.
	Unsupported(UnsupportedForm),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UnsupportedForm {
	ClassDef,
	AsyncDef,
	Import,
	Directive,
}

#[derive(Clone, Debug)]
pub struct Handler {
	pub id: NodeId,
	pub range: (usize, usize),
	pub exception: Option<Expr>,
	pub binding: Option<Name>,
	pub body: Vec<Stmt>,
}

impl Handler {
	pub fn new(exception: Option<Expr>, binding: Option<Name>, body: Vec<Stmt>, range: (usize, usize)) -> Self {
		Self { id: NodeId::fresh(), range, exception, binding, body }
	}
}

#[derive(Clone, Debug)]
pub struct Pat {
	pub id: NodeId,
	pub range: (usize, usize),
	pub kind: PatKind,
}

#[derive(Clone, Debug)]
pub enum PatKind {
	Name(Name),
	Wildcard,
	Int(i64),
	Float(f64),
	Str(Rc<str>),
	NameConst(NameConst),
	Tuple(Vec<Pat>),
	Call { callee: Name, args: Vec<Pat> },
}

impl ExprKind {
	pub fn at(self, range: (usize, usize)) -> Expr { Expr { id: NodeId::fresh(), range, kind: self } }

	/// Wraps a translation node, which points at no source location.
	pub fn synth(self) -> Expr { self.at((0, 0)) }
}

impl StmtKind {
	pub fn at(self, range: (usize, usize)) -> Stmt { Stmt { id: NodeId::fresh(), range, kind: self } }

	pub fn synth(self) -> Stmt { self.at((0, 0)) }
}

impl PatKind {
	pub fn at(self, range: (usize, usize)) -> Pat { Pat { id: NodeId::fresh(), range, kind: self } }
}
