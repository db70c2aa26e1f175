use std::rc::Rc;

use lasso::Rodeo;
use tessera::{
	common::Name,
	component::{elaborate_component, Component, ComponentDecl, MemberSig},
	elaborate::error::ElabError,
	fragment::{Fragments, StaticEnv, StaticValue},
	ir::ast::{Expr, ExprKind, Param, Slice, Stmt, StmtKind},
	prelude,
	unparse::pretty_print_ty,
};

pub struct Harness {
	pub interner: Rodeo,
	pub fragments: Fragments,
	pub env: StaticEnv,
}

impl Harness {
	pub fn new() -> Self {
		let mut interner = Rodeo::default();
		let mut fragments = Fragments::new();
		let mut env = StaticEnv::new();
		prelude::install(&mut fragments, &mut env, &mut interner);
		Self { interner, fragments, env }
	}

	pub fn elaborate(&mut self, decl: &ComponentDecl) -> Result<Rc<Component>, ElabError> {
		elaborate_component(&self.fragments, &self.env, &mut self.interner, decl)
	}

	/// Elaborates and binds the component in the host environment, making it
	/// visible to components elaborated afterwards.
	pub fn elaborate_and_bind(&mut self, decl: &ComponentDecl) -> Rc<Component> {
		let component = self.elaborate(decl).unwrap();
		self.env.bind(decl.name, StaticValue::Component(component.clone()));
		component
	}

	pub fn value_ty(&self, component: &Component, label: &str) -> String {
		let label = self.interner.get(label).unwrap();
		match component.member(label).unwrap() {
			MemberSig::Value(ty) => pretty_print_ty(ty, &self.interner, &self.fragments),
			MemberSig::Type(_) => panic!("member is a type member"),
		}
	}

	pub fn type_member(&self, component: &Component, label: &str) -> String {
		let label = self.interner.get(label).unwrap();
		match component.member(label).unwrap() {
			MemberSig::Type(inhabitant) => pretty_print_ty(inhabitant, &self.interner, &self.fragments),
			MemberSig::Value(_) => panic!("member is a value member"),
		}
	}
}

pub fn name(interner: &mut Rodeo, text: &str) -> Expr {
	ExprKind::Name(interner.get_or_intern(text)).synth()
}

pub fn int(value: i64) -> Expr { ExprKind::Int(value).synth() }

pub fn float(value: f64) -> Expr { ExprKind::Float(value).synth() }

pub fn string(text: &str) -> Expr { ExprKind::Str(text.into()).synth() }

pub fn assign(target: Expr, annotation: Option<Expr>, value: Expr) -> Stmt {
	StmtKind::Assign { target, annotation, value }.synth()
}

/// The reserved kind annotation for type members.
pub fn kind_ty(interner: &mut Rodeo) -> Expr { name(interner, "type") }

pub fn subscript(value: Expr, slice: Slice) -> Expr {
	ExprKind::Subscript { value: Box::new(value), slice }.synth()
}

pub fn index(e: Expr) -> Slice { Slice::Index(Box::new(e)) }

pub fn labeled(label: &str, ty: Expr) -> Slice {
	Slice::Bounds { lower: Some(Box::new(string(label))), upper: Some(Box::new(ty)), step: None }
}

pub fn tuple(elements: Vec<Expr>) -> Expr { ExprKind::Tuple(elements).synth() }

pub fn dict(pairs: Vec<(&str, Expr)>) -> Expr {
	let (keys, values) = pairs.into_iter().map(|(key, value)| (string(key), value)).unzip();
	ExprKind::Dict { keys, values }.synth()
}

pub fn call(callee: Expr, args: Vec<Expr>) -> Expr {
	ExprKind::Call { callee: Box::new(callee), args, keywords: Vec::new() }.synth()
}

pub fn binop(left: Expr, op: tessera::ir::ast::BinOp, right: Expr) -> Expr {
	ExprKind::BinOp { left: Box::new(left), op, right: Box::new(right) }.synth()
}

pub fn param(param_name: Name, annotation: Option<Expr>) -> Param {
	Param::new(param_name, annotation, (0, 0))
}

pub fn function_def(
	fn_name: Name,
	decorator: Expr,
	params: Vec<Param>,
	returns: Option<Expr>,
	body: Vec<Stmt>,
) -> Stmt {
	StmtKind::Expr(
		ExprKind::FunctionDef {
			name: fn_name,
			decorators: vec![decorator],
			params,
			returns: returns.map(Box::new),
			body,
		}
		.synth(),
	)
	.synth()
}

pub fn decl(interner: &mut Rodeo, component_name: &str, body: Vec<Stmt>) -> ComponentDecl {
	ComponentDecl { name: interner.get_or_intern(component_name), range: (0, 0), body }
}
