//! The fragment protocol: the contract every semantic plugin satisfies.
//!
//! A fragment owns the typing and translation rules for one type constructor
//! over specific surface forms. The engine canonicalizes a type to a
//! `(fragment, index)` pair and dispatches the form at hand to that
//! fragment; handlers a fragment does not override answer with a well-typed
//! "unsupported form at this type" error.

use std::{collections::HashMap, rc::Rc};

use crate::{
	common::{Name, Uniq},
	component::Component,
	elaborate::{
		context::Context,
		error::{ElabError, ElabErrorKind},
	},
	ir::{
		ast::{Expr, Pat, Slice, Stmt},
		ty::{Idx, TyExpr},
	},
};

/// Bindings produced by pattern analysis: pattern identifier to type, in
/// syntactic order.
pub type Bindings = Vec<(Name, TyExpr)>;

/// Bindings produced by pattern translation: the unique minted for a pattern
/// identifier to the expression refining the scrutinee down to it.
pub type PatBindings = Vec<(Uniq, Expr)>;

/// The stable identity of a registered fragment, used for equality in
/// canonical types. Cross-fragment index comparison never succeeds.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FragmentId(pub(crate) usize);

/// The surface form an expression node was dispatched at; recorded in the
/// node's annotation to select the fragment method used on translation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Form {
	Name,
	Literal,
	NameConst,
	Tuple,
	List,
	Dict,
	Set,
	Call,
	Lambda,
	FunctionDef,
	Attribute,
	Subscript,
	Compare,
	BinOp,
	BoolOp,
	UnaryOp,
	IfExp,
	Match,
	Ascription,
}

impl Form {
	pub fn label(self) -> &'static str {
		match self {
			Self::Name => "name",
			Self::Literal => "literal",
			Self::NameConst => "name constant",
			Self::Tuple => "tuple",
			Self::List => "list",
			Self::Dict => "dict",
			Self::Set => "set",
			Self::Call => "call",
			Self::Lambda => "lambda",
			Self::FunctionDef => "function definition",
			Self::Attribute => "attribute",
			Self::Subscript => "subscript",
			Self::Compare => "comparison",
			Self::BinOp => "binary operator",
			Self::BoolOp => "boolean operator",
			Self::UnaryOp => "unary operator",
			Self::IfExp => "conditional expression",
			Self::Match => "match",
			Self::Ascription => "ascription",
		}
	}
}

/// The statement form a statement node was dispatched at.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StmtForm {
	Expr,
	Assign,
	AssignTargeted,
	AugAssign,
	Return,
	If,
	While,
	For,
	With,
	Try,
	Raise,
	Assert,
	Pass,
	Break,
	Continue,
}

impl StmtForm {
	pub fn label(self) -> &'static str {
		match self {
			Self::Expr => "expression statement",
			Self::Assign => "assignment",
			Self::AssignTargeted => "targeted assignment",
			Self::AugAssign => "augmented assignment",
			Self::Return => "return",
			Self::If => "if",
			Self::While => "while",
			Self::For => "for",
			Self::With => "with",
			Self::Try => "try",
			Self::Raise => "raise",
			Self::Assert => "assert",
			Self::Pass => "pass",
			Self::Break => "break",
			Self::Continue => "continue",
		}
	}
}

macro_rules! unsupported {
	($self:ident, $e:ident, $form:ident) => {
		Err(ElabErrorKind::unsupported($self.name(), Form::$form).at($e.range))
	};
}

macro_rules! unsupported_pat {
	($self:ident, $p:ident, $form:ident) => {
		Err(ElabErrorKind::unsupported_pat($self.name(), Form::$form).at($p.range))
	};
}

macro_rules! unsupported_stmt {
	($self:ident, $s:ident, $form:ident) => {
		Err(ElabErrorKind::unsupported_stmt($self.name(), StmtForm::$form).at($s.range))
	};
}

#[allow(unused_variables)]
pub trait Fragment {
	/// The registry name of this fragment, also used in diagnostics.
	fn name(&self) -> &'static str;

	/// Names of fragments this one absorbs in binary-operator dispatch.
	/// Immutable after construction.
	fn precedence(&self) -> &'static [&'static str] { &[] }

	/// Validates an index AST and computes the semantic index value for a
	/// subscripted use of this fragment in type position.
	fn init_idx(&self, ctx: &mut Context, slice: &Slice, range: (usize, usize)) -> Result<Idx, ElabError> {
		Err(ElabErrorKind::TypeValidation(format!("type `{}` takes no index", self.name())).at(range))
	}

	/// The index for an un-subscripted use of this fragment in type position.
	fn trivial_idx(&self, ctx: &mut Context, range: (usize, usize)) -> Result<Idx, ElabError> {
		Err(ElabErrorKind::TypeValidation(format!("type `{}` requires an index", self.name())).at(range))
	}

	/// Structural equality on this fragment's indices.
	fn idx_eq(&self, ctx: &mut Context, a: &Idx, b: &Idx, range: (usize, usize)) -> Result<bool, ElabError> {
		ctx.idx_eq_structural(a, b, range)
	}

	// Introduction forms: analysis.

	fn ana_literal(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<(), ElabError> {
		unsupported!(self, e, Literal)
	}

	fn ana_name_const(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<(), ElabError> {
		unsupported!(self, e, NameConst)
	}

	fn ana_tuple(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<(), ElabError> {
		unsupported!(self, e, Tuple)
	}

	fn ana_list(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<(), ElabError> {
		unsupported!(self, e, List)
	}

	fn ana_dict(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<(), ElabError> {
		unsupported!(self, e, Dict)
	}

	fn ana_set(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<(), ElabError> {
		unsupported!(self, e, Set)
	}

	/// Calls analyze by subsumption unless a fragment treats them as a
	/// constructor form.
	fn ana_call(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<(), ElabError> {
		let Some(fragment) = ctx.fragments.lookup(self.name()) else {
			return Err(ElabErrorKind::Fragment("fragment is not registered".to_owned()).at(e.range));
		};
		let expected = TyExpr::Canonical { fragment, idx: idx.clone() };
		let got = ctx.syn(e)?;
		if ctx.ty_expr_eq(&expected, &got, &crate::ir::ty::Kind::Ty, e.range)? {
			Ok(())
		} else {
			Err(ElabErrorKind::TyMismatch { expected, got }.at(e.range))
		}
	}

	fn ana_unaryop(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<(), ElabError> {
		unsupported!(self, e, UnaryOp)
	}

	fn ana_lambda(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<(), ElabError> {
		unsupported!(self, e, Lambda)
	}

	fn ana_function_def(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<(), ElabError> {
		unsupported!(self, e, FunctionDef)
	}

	/// Synthesizes the type of a decorated function definition from its
	/// parameter and return annotations.
	fn syn_function_def(&self, ctx: &mut Context, e: &Expr) -> Result<TyExpr, ElabError> {
		unsupported!(self, e, FunctionDef)
	}

	// An analysis hint for a binary operator neither side of which
	// synthesizes; `idx` is the index of the expected canonical type.
	fn ana_binop(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<(), ElabError> {
		unsupported!(self, e, BinOp)
	}

	// Introduction forms: translation.

	fn trans_literal(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<Expr, ElabError> {
		unsupported!(self, e, Literal)
	}

	fn trans_name_const(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<Expr, ElabError> {
		unsupported!(self, e, NameConst)
	}

	fn trans_tuple(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<Expr, ElabError> {
		unsupported!(self, e, Tuple)
	}

	fn trans_list(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<Expr, ElabError> {
		unsupported!(self, e, List)
	}

	fn trans_dict(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<Expr, ElabError> {
		unsupported!(self, e, Dict)
	}

	fn trans_set(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<Expr, ElabError> {
		unsupported!(self, e, Set)
	}

	fn trans_call(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<Expr, ElabError> {
		unsupported!(self, e, Call)
	}

	fn trans_unaryop(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<Expr, ElabError> {
		unsupported!(self, e, UnaryOp)
	}

	fn trans_lambda(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<Expr, ElabError> {
		unsupported!(self, e, Lambda)
	}

	fn trans_function_def(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<Expr, ElabError> {
		unsupported!(self, e, FunctionDef)
	}

	// Pattern forms.

	fn ana_pat_literal(&self, ctx: &mut Context, pat: &Pat, idx: &Idx) -> Result<Bindings, ElabError> {
		unsupported_pat!(self, pat, Literal)
	}

	fn ana_pat_name_const(&self, ctx: &mut Context, pat: &Pat, idx: &Idx) -> Result<Bindings, ElabError> {
		unsupported_pat!(self, pat, NameConst)
	}

	fn ana_pat_tuple(&self, ctx: &mut Context, pat: &Pat, idx: &Idx) -> Result<Bindings, ElabError> {
		unsupported_pat!(self, pat, Tuple)
	}

	fn ana_pat_call(&self, ctx: &mut Context, pat: &Pat, idx: &Idx) -> Result<Bindings, ElabError> {
		unsupported_pat!(self, pat, Call)
	}

	fn trans_pat_literal(
		&self,
		ctx: &mut Context,
		pat: &Pat,
		idx: &Idx,
		scrutinee: &Expr,
	) -> Result<(Expr, PatBindings), ElabError> {
		unsupported_pat!(self, pat, Literal)
	}

	fn trans_pat_name_const(
		&self,
		ctx: &mut Context,
		pat: &Pat,
		idx: &Idx,
		scrutinee: &Expr,
	) -> Result<(Expr, PatBindings), ElabError> {
		unsupported_pat!(self, pat, NameConst)
	}

	fn trans_pat_tuple(
		&self,
		ctx: &mut Context,
		pat: &Pat,
		idx: &Idx,
		scrutinee: &Expr,
	) -> Result<(Expr, PatBindings), ElabError> {
		unsupported_pat!(self, pat, Tuple)
	}

	fn trans_pat_call(
		&self,
		ctx: &mut Context,
		pat: &Pat,
		idx: &Idx,
		scrutinee: &Expr,
	) -> Result<(Expr, PatBindings), ElabError> {
		unsupported_pat!(self, pat, Call)
	}

	// Targeted forms: synthesis.

	fn syn_attribute(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<TyExpr, ElabError> {
		unsupported!(self, e, Attribute)
	}

	fn syn_subscript(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<TyExpr, ElabError> {
		unsupported!(self, e, Subscript)
	}

	fn syn_call(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<TyExpr, ElabError> {
		unsupported!(self, e, Call)
	}

	fn syn_compare(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<TyExpr, ElabError> {
		unsupported!(self, e, Compare)
	}

	fn syn_binop(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<TyExpr, ElabError> {
		unsupported!(self, e, BinOp)
	}

	fn syn_boolop(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<TyExpr, ElabError> {
		unsupported!(self, e, BoolOp)
	}

	fn syn_unaryop(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<TyExpr, ElabError> {
		unsupported!(self, e, UnaryOp)
	}

	fn syn_ifexp(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<TyExpr, ElabError> {
		unsupported!(self, e, IfExp)
	}

	// Targeted forms: translation.

	fn trans_attribute(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<Expr, ElabError> {
		unsupported!(self, e, Attribute)
	}

	fn trans_subscript(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<Expr, ElabError> {
		unsupported!(self, e, Subscript)
	}

	fn trans_compare(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<Expr, ElabError> {
		unsupported!(self, e, Compare)
	}

	fn trans_binop(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<Expr, ElabError> {
		unsupported!(self, e, BinOp)
	}

	fn trans_boolop(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<Expr, ElabError> {
		unsupported!(self, e, BoolOp)
	}

	fn trans_ifexp(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<Expr, ElabError> {
		unsupported!(self, e, IfExp)
	}

	// Targeted statements.

	fn check_if(&self, ctx: &mut Context, stmt: &Stmt, idx: &Idx) -> Result<(), ElabError> {
		unsupported_stmt!(self, stmt, If)
	}

	fn check_while(&self, ctx: &mut Context, stmt: &Stmt, idx: &Idx) -> Result<(), ElabError> {
		unsupported_stmt!(self, stmt, While)
	}

	fn check_for(&self, ctx: &mut Context, stmt: &Stmt, idx: &Idx) -> Result<(), ElabError> {
		unsupported_stmt!(self, stmt, For)
	}

	fn check_with(&self, ctx: &mut Context, stmt: &Stmt, idx: &Idx) -> Result<(), ElabError> {
		unsupported_stmt!(self, stmt, With)
	}

	fn check_aug_assign(&self, ctx: &mut Context, stmt: &Stmt, idx: &Idx) -> Result<(), ElabError> {
		unsupported_stmt!(self, stmt, AugAssign)
	}

	fn check_assign_targeted(&self, ctx: &mut Context, stmt: &Stmt, idx: &Idx) -> Result<(), ElabError> {
		unsupported_stmt!(self, stmt, AssignTargeted)
	}

	fn trans_if(&self, ctx: &mut Context, stmt: &Stmt, idx: &Idx) -> Result<Vec<Stmt>, ElabError> {
		unsupported_stmt!(self, stmt, If)
	}

	fn trans_while(&self, ctx: &mut Context, stmt: &Stmt, idx: &Idx) -> Result<Vec<Stmt>, ElabError> {
		unsupported_stmt!(self, stmt, While)
	}

	fn trans_for(&self, ctx: &mut Context, stmt: &Stmt, idx: &Idx) -> Result<Vec<Stmt>, ElabError> {
		unsupported_stmt!(self, stmt, For)
	}

	fn trans_with(&self, ctx: &mut Context, stmt: &Stmt, idx: &Idx) -> Result<Vec<Stmt>, ElabError> {
		unsupported_stmt!(self, stmt, With)
	}

	fn trans_aug_assign(&self, ctx: &mut Context, stmt: &Stmt, idx: &Idx) -> Result<Vec<Stmt>, ElabError> {
		unsupported_stmt!(self, stmt, AugAssign)
	}

	fn trans_assign_targeted(&self, ctx: &mut Context, stmt: &Stmt, idx: &Idx) -> Result<Vec<Stmt>, ElabError> {
		unsupported_stmt!(self, stmt, AssignTargeted)
	}

	// Default statements, dispatched to the lexically current default fragment.

	fn check_expr_stmt(&self, ctx: &mut Context, stmt: &Stmt, idx: &Idx) -> Result<(), ElabError> {
		unsupported_stmt!(self, stmt, Expr)
	}

	fn check_assign(&self, ctx: &mut Context, stmt: &Stmt, idx: &Idx) -> Result<(), ElabError> {
		unsupported_stmt!(self, stmt, Assign)
	}

	fn check_return(&self, ctx: &mut Context, stmt: &Stmt, idx: &Idx) -> Result<(), ElabError> {
		unsupported_stmt!(self, stmt, Return)
	}

	fn check_raise(&self, ctx: &mut Context, stmt: &Stmt, idx: &Idx) -> Result<(), ElabError> {
		unsupported_stmt!(self, stmt, Raise)
	}

	fn check_try(&self, ctx: &mut Context, stmt: &Stmt, idx: &Idx) -> Result<(), ElabError> {
		unsupported_stmt!(self, stmt, Try)
	}

	fn check_assert(&self, ctx: &mut Context, stmt: &Stmt, idx: &Idx) -> Result<(), ElabError> {
		unsupported_stmt!(self, stmt, Assert)
	}

	fn check_pass(&self, ctx: &mut Context, stmt: &Stmt, idx: &Idx) -> Result<(), ElabError> {
		unsupported_stmt!(self, stmt, Pass)
	}

	fn check_break(&self, ctx: &mut Context, stmt: &Stmt, idx: &Idx) -> Result<(), ElabError> {
		unsupported_stmt!(self, stmt, Break)
	}

	fn check_continue(&self, ctx: &mut Context, stmt: &Stmt, idx: &Idx) -> Result<(), ElabError> {
		unsupported_stmt!(self, stmt, Continue)
	}

	fn trans_expr_stmt(&self, ctx: &mut Context, stmt: &Stmt, idx: &Idx) -> Result<Vec<Stmt>, ElabError> {
		unsupported_stmt!(self, stmt, Expr)
	}

	fn trans_assign(&self, ctx: &mut Context, stmt: &Stmt, idx: &Idx) -> Result<Vec<Stmt>, ElabError> {
		unsupported_stmt!(self, stmt, Assign)
	}

	fn trans_return(&self, ctx: &mut Context, stmt: &Stmt, idx: &Idx) -> Result<Vec<Stmt>, ElabError> {
		unsupported_stmt!(self, stmt, Return)
	}

	fn trans_raise(&self, ctx: &mut Context, stmt: &Stmt, idx: &Idx) -> Result<Vec<Stmt>, ElabError> {
		unsupported_stmt!(self, stmt, Raise)
	}

	fn trans_try(&self, ctx: &mut Context, stmt: &Stmt, idx: &Idx) -> Result<Vec<Stmt>, ElabError> {
		unsupported_stmt!(self, stmt, Try)
	}

	fn trans_assert(&self, ctx: &mut Context, stmt: &Stmt, idx: &Idx) -> Result<Vec<Stmt>, ElabError> {
		unsupported_stmt!(self, stmt, Assert)
	}

	fn trans_pass(&self, ctx: &mut Context, stmt: &Stmt, idx: &Idx) -> Result<Vec<Stmt>, ElabError> {
		unsupported_stmt!(self, stmt, Pass)
	}

	fn trans_break(&self, ctx: &mut Context, stmt: &Stmt, idx: &Idx) -> Result<Vec<Stmt>, ElabError> {
		unsupported_stmt!(self, stmt, Break)
	}

	fn trans_continue(&self, ctx: &mut Context, stmt: &Stmt, idx: &Idx) -> Result<Vec<Stmt>, ElabError> {
		unsupported_stmt!(self, stmt, Continue)
	}
}

/// The fragment registry. Slot zero is always the component fragment, which
/// the engine itself owns.
pub struct Fragments {
	entries: Vec<Rc<dyn Fragment>>,
}

impl Fragments {
	pub fn new() -> Self {
		Self { entries: vec![Rc::new(crate::component::ComponentFragment)] }
	}

	pub fn register(&mut self, fragment: Rc<dyn Fragment>) -> FragmentId {
		let id = FragmentId(self.entries.len());
		self.entries.push(fragment);
		id
	}

	pub fn get(&self, id: FragmentId) -> Rc<dyn Fragment> { self.entries[id.0].clone() }

	pub fn name(&self, id: FragmentId) -> &'static str { self.entries[id.0].name() }

	pub fn lookup(&self, name: &str) -> Option<FragmentId> {
		self.entries.iter().position(|f| f.name() == name).map(FragmentId)
	}

	pub fn component(&self) -> FragmentId { FragmentId(0) }

	/// Whether `inner` is a member of `outer`'s precedence set.
	pub fn precedes(&self, outer: FragmentId, inner: FragmentId) -> bool {
		let inner_name = self.name(inner);
		self.entries[outer.0].precedence().iter().any(|name| *name == inner_name)
	}
}

impl Default for Fragments {
	fn default() -> Self { Self::new() }
}

/// A value the host's static environment resolves a name to at the point of
/// component declaration.
#[derive(Clone)]
pub enum StaticValue {
	Fragment(FragmentId),
	Component(Rc<Component>),
	Namespace(Rc<HashMap<Name, StaticValue>>),
}

/// The read-only static host environment: the closure and globals visible at
/// the point of component declaration.
#[derive(Default)]
pub struct StaticEnv {
	bindings: HashMap<Name, StaticValue>,
}

impl StaticEnv {
	pub fn new() -> Self { Self::default() }

	pub fn bind(&mut self, name: Name, value: StaticValue) { self.bindings.insert(name, value); }

	pub fn lookup(&self, name: Name) -> Option<&StaticValue> { self.bindings.get(&name) }

	/// Evaluates a static path: a name, or an attribute chain through
	/// namespaces.
	pub fn evaluate(&self, expr: &Expr) -> Option<StaticValue> {
		use crate::ir::ast::ExprKind;
		match &expr.kind {
			ExprKind::Name(name) => self.lookup(*name).cloned(),
			ExprKind::Attribute { value, label } => match self.evaluate(value)? {
				StaticValue::Namespace(namespace) => namespace.get(label).cloned(),
				_ => None,
			},
			_ => None,
		}
	}
}
