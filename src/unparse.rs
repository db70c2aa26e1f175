//! Pretty-printing of host trees and type expressions, used by diagnostics
//! and by the demo binary to show translations as host source text.

use std::fmt::Write;

use lasso::Rodeo;

use crate::{
	fragment::Fragments,
	ir::{
		ast::{BinOp, BoolOp, CompareOp, Expr, ExprKind, NameConst, Param, Slice, Stmt, StmtKind, UnaryOp},
		ty::{Idx, TyExpr},
	},
	utility::write_separated,
};

const INDENT: &str = "    ";

pub fn pretty_print_expr(e: &Expr, interner: &Rodeo) -> String {
	let mut f = String::new();
	let _ = print_expr(e, &mut f, interner);
	f
}

pub fn pretty_print_block(block: &[Stmt], interner: &Rodeo) -> String {
	let mut f = String::new();
	for stmt in block {
		let _ = print_stmt(stmt, &mut f, interner, 0);
	}
	f
}

pub fn pretty_print_ty(ty: &TyExpr, interner: &Rodeo, fragments: &Fragments) -> String {
	let mut f = String::new();
	let _ = print_ty(ty, &mut f, interner, fragments);
	f
}

pub fn print_expr(e: &Expr, f: &mut String, interner: &Rodeo) -> std::fmt::Result {
	match &e.kind {
		ExprKind::Name(name) => write!(f, "{}", interner.resolve(name)),
		ExprKind::NameConst(NameConst::True) => write!(f, "True"),
		ExprKind::NameConst(NameConst::False) => write!(f, "False"),
		ExprKind::NameConst(NameConst::None) => write!(f, "None"),
		ExprKind::Int(value) => write!(f, "{value}"),
		ExprKind::Float(value) => write!(f, "{value:?}"),
		ExprKind::Str(value) => write!(f, "'{}'", value.escape_default()),
		ExprKind::Tuple(elements) => match elements.as_slice() {
			[] => write!(f, "()"),
			[element] => {
				write!(f, "(")?;
				print_expr(element, f, interner)?;
				write!(f, ",)")
			}
			elements => {
				write!(f, "(")?;
				write_separated(f, ", ", elements, |f, e| print_expr(e, f, interner))?;
				write!(f, ")")
			}
		},
		ExprKind::List(elements) => {
			write!(f, "[")?;
			write_separated(f, ", ", elements, |f, e| print_expr(e, f, interner))?;
			write!(f, "]")
		}
		ExprKind::Set(elements) =>
			if elements.is_empty() {
				write!(f, "set()")
			} else {
				write!(f, "{{")?;
				write_separated(f, ", ", elements, |f, e| print_expr(e, f, interner))?;
				write!(f, "}}")
			},
		ExprKind::Dict { keys, values } => {
			write!(f, "{{")?;
			write_separated(f, ", ", keys.iter().zip(values), |f, (key, value)| {
				print_expr(key, f, interner)?;
				write!(f, ": ")?;
				print_expr(value, f, interner)
			})?;
			write!(f, "}}")
		}
		ExprKind::Attribute { value, label } => {
			print_atom(value, f, interner)?;
			write!(f, ".{}", interner.resolve(label))
		}
		ExprKind::Subscript { value, slice } => {
			print_atom(value, f, interner)?;
			write!(f, "[")?;
			print_slice(slice, f, interner)?;
			write!(f, "]")
		}
		ExprKind::Call { callee, args, keywords } => {
			print_atom(callee, f, interner)?;
			write!(f, "(")?;
			write_separated(f, ", ", args, |f, arg| print_expr(arg, f, interner))?;
			if !args.is_empty() && !keywords.is_empty() {
				write!(f, ", ")?;
			}
			write_separated(f, ", ", keywords, |f, (name, value)| {
				write!(f, "{}=", interner.resolve(name))?;
				print_expr(value, f, interner)
			})?;
			write!(f, ")")
		}
		ExprKind::Compare { left, ops, comparators } => {
			print_atom(left, f, interner)?;
			for (op, comparator) in ops.iter().zip(comparators) {
				write!(f, " {} ", compare_op(*op))?;
				print_atom(comparator, f, interner)?;
			}
			Ok(())
		}
		ExprKind::BinOp { left, op, right } => {
			print_atom(left, f, interner)?;
			write!(f, " {} ", bin_op(*op))?;
			print_atom(right, f, interner)
		}
		ExprKind::BoolOp { op, values } => {
			let separator = match op {
				BoolOp::And => " and ",
				BoolOp::Or => " or ",
			};
			write_separated(f, separator, values, |f, value| print_atom(value, f, interner))
		}
		ExprKind::UnaryOp { op, operand } => {
			match op {
				UnaryOp::Not => write!(f, "not ")?,
				UnaryOp::Neg => write!(f, "-")?,
				UnaryOp::Pos => write!(f, "+")?,
			}
			print_atom(operand, f, interner)
		}
		ExprKind::IfExp { test, body, orelse } => {
			print_atom(body, f, interner)?;
			write!(f, " if ")?;
			print_atom(test, f, interner)?;
			write!(f, " else ")?;
			print_atom(orelse, f, interner)
		}
		ExprKind::Lambda { params, body } => {
			write!(f, "lambda")?;
			if !params.is_empty() {
				write!(f, " ")?;
				print_params(params, f, interner)?;
			}
			write!(f, ": ")?;
			print_expr(body, f, interner)
		}
		ExprKind::FunctionDef { name, .. } => write!(f, "<def {}>", interner.resolve(name)),
		ExprKind::Match { scrutinee, .. } => {
			write!(f, "<match ")?;
			print_expr(scrutinee, f, interner)?;
			write!(f, ">")
		}
	}
}

// Parenthesizes forms that do not bind tighter than an operand position.
fn print_atom(e: &Expr, f: &mut String, interner: &Rodeo) -> std::fmt::Result {
	match &e.kind {
		ExprKind::Compare { .. }
		| ExprKind::BinOp { .. }
		| ExprKind::BoolOp { .. }
		| ExprKind::UnaryOp { .. }
		| ExprKind::IfExp { .. }
		| ExprKind::Lambda { .. } => {
			write!(f, "(")?;
			print_expr(e, f, interner)?;
			write!(f, ")")
		}
		_ => print_expr(e, f, interner),
	}
}

fn print_slice(slice: &Slice, f: &mut String, interner: &Rodeo) -> std::fmt::Result {
	match slice {
		Slice::Index(e) => print_expr(e, f, interner),
		Slice::Bounds { lower, upper, step } => {
			if let Some(lower) = lower {
				print_expr(lower, f, interner)?;
			}
			write!(f, ":")?;
			if let Some(upper) = upper {
				print_expr(upper, f, interner)?;
			}
			if let Some(step) = step {
				write!(f, ":")?;
				print_expr(step, f, interner)?;
			}
			Ok(())
		}
		Slice::Items(items) => write_separated(f, ", ", items, |f, item| print_slice(item, f, interner)),
	}
}

fn print_params(params: &[Param], f: &mut String, interner: &Rodeo) -> std::fmt::Result {
	write_separated(f, ", ", params, |f, param| {
		write!(f, "{}", interner.resolve(&param.name))?;
		if let Some(annotation) = &param.annotation {
			write!(f, ": ")?;
			print_expr(annotation, f, interner)?;
		}
		Ok(())
	})
}

pub fn print_stmt(stmt: &Stmt, f: &mut String, interner: &Rodeo, depth: usize) -> std::fmt::Result {
	let indent = INDENT.repeat(depth);
	match &stmt.kind {
		// A function bound to a name prints as a definition under that name.
		StmtKind::Assign { target, value, .. }
			if matches!((&target.kind, &value.kind), (ExprKind::Name(_), ExprKind::FunctionDef { .. })) =>
		{
			let (ExprKind::Name(bound), ExprKind::FunctionDef { params, body, .. }) = (&target.kind, &value.kind)
			else {
				unreachable!()
			};
			write!(f, "{indent}def {}(", interner.resolve(bound))?;
			print_params(params, f, interner)?;
			writeln!(f, "):")?;
			print_block(body, f, interner, depth + 1)
		}
		StmtKind::Expr(e) => {
			write!(f, "{indent}")?;
			print_expr(e, f, interner)?;
			writeln!(f)
		}
		StmtKind::Assign { target, annotation, value } => {
			write!(f, "{indent}")?;
			print_expr(target, f, interner)?;
			if let Some(annotation) = annotation {
				write!(f, ": ")?;
				print_expr(annotation, f, interner)?;
			}
			write!(f, " = ")?;
			print_expr(value, f, interner)?;
			writeln!(f)
		}
		StmtKind::AugAssign { target, op, value } => {
			write!(f, "{indent}")?;
			print_expr(target, f, interner)?;
			write!(f, " {}= ", bin_op(*op))?;
			print_expr(value, f, interner)?;
			writeln!(f)
		}
		StmtKind::Return(value) => {
			write!(f, "{indent}return")?;
			if let Some(value) = value {
				write!(f, " ")?;
				print_expr(value, f, interner)?;
			}
			writeln!(f)
		}
		StmtKind::If { test, body, orelse } => {
			write!(f, "{indent}if ")?;
			print_expr(test, f, interner)?;
			writeln!(f, ":")?;
			print_block(body, f, interner, depth + 1)?;
			if !orelse.is_empty() {
				writeln!(f, "{indent}else:")?;
				print_block(orelse, f, interner, depth + 1)?;
			}
			Ok(())
		}
		StmtKind::While { test, body, orelse } => {
			write!(f, "{indent}while ")?;
			print_expr(test, f, interner)?;
			writeln!(f, ":")?;
			print_block(body, f, interner, depth + 1)?;
			if !orelse.is_empty() {
				writeln!(f, "{indent}else:")?;
				print_block(orelse, f, interner, depth + 1)?;
			}
			Ok(())
		}
		StmtKind::For { target, iter, body, orelse } => {
			write!(f, "{indent}for ")?;
			print_expr(target, f, interner)?;
			write!(f, " in ")?;
			print_expr(iter, f, interner)?;
			writeln!(f, ":")?;
			print_block(body, f, interner, depth + 1)?;
			if !orelse.is_empty() {
				writeln!(f, "{indent}else:")?;
				print_block(orelse, f, interner, depth + 1)?;
			}
			Ok(())
		}
		StmtKind::With { item, binding, body } => {
			write!(f, "{indent}with ")?;
			print_expr(item, f, interner)?;
			if let Some(binding) = binding {
				write!(f, " as ")?;
				print_expr(binding, f, interner)?;
			}
			writeln!(f, ":")?;
			print_block(body, f, interner, depth + 1)
		}
		StmtKind::Try { body, handlers, orelse, finalbody } => {
			writeln!(f, "{indent}try:")?;
			print_block(body, f, interner, depth + 1)?;
			for handler in handlers {
				write!(f, "{indent}except")?;
				if let Some(exception) = &handler.exception {
					write!(f, " ")?;
					print_expr(exception, f, interner)?;
				}
				if let Some(binding) = &handler.binding {
					write!(f, " as {}", interner.resolve(binding))?;
				}
				writeln!(f, ":")?;
				print_block(&handler.body, f, interner, depth + 1)?;
			}
			if !orelse.is_empty() {
				writeln!(f, "{indent}else:")?;
				print_block(orelse, f, interner, depth + 1)?;
			}
			if !finalbody.is_empty() {
				writeln!(f, "{indent}finally:")?;
				print_block(finalbody, f, interner, depth + 1)?;
			}
			Ok(())
		}
		StmtKind::Raise(exception) => {
			write!(f, "{indent}raise")?;
			if let Some(exception) = exception {
				write!(f, " ")?;
				print_expr(exception, f, interner)?;
			}
			writeln!(f)
		}
		StmtKind::Assert { test, msg } => {
			write!(f, "{indent}assert ")?;
			print_expr(test, f, interner)?;
			if let Some(msg) = msg {
				write!(f, ", ")?;
				print_expr(msg, f, interner)?;
			}
			writeln!(f)
		}
		StmtKind::Pass => writeln!(f, "{indent}pass"),
		StmtKind::Break => writeln!(f, "{indent}break"),
		StmtKind::Continue => writeln!(f, "{indent}continue"),
		StmtKind::Unsupported(form) => writeln!(f, "{indent}<{form:?}>"),
	}
}

fn print_block(block: &[Stmt], f: &mut String, interner: &Rodeo, depth: usize) -> std::fmt::Result {
	if block.is_empty() {
		return writeln!(f, "{}pass", INDENT.repeat(depth));
	}
	for stmt in block {
		print_stmt(stmt, f, interner, depth)?;
	}
	Ok(())
}

pub fn print_ty(ty: &TyExpr, f: &mut String, interner: &Rodeo, fragments: &Fragments) -> std::fmt::Result {
	match ty {
		TyExpr::Var(uniq) => write!(f, "?{}", uniq.0),
		TyExpr::Canonical { fragment, idx } => {
			write!(f, "{}", fragments.name(*fragment))?;
			match idx {
				Idx::Unit => Ok(()),
				idx => {
					write!(f, "[")?;
					print_idx(idx, f, interner, fragments)?;
					write!(f, "]")
				}
			}
		}
		TyExpr::Projection { component, label } =>
			write!(f, "{}.{}", interner.resolve(&component.name), interner.resolve(label)),
	}
}

fn print_idx(idx: &Idx, f: &mut String, interner: &Rodeo, fragments: &Fragments) -> std::fmt::Result {
	match idx {
		Idx::Unit => write!(f, "()"),
		Idx::Num(value) => write!(f, "{value}"),
		Idx::Str(value) => write!(f, "'{}'", value.escape_default()),
		Idx::Label(label) => write!(f, "'{}'", interner.resolve(label)),
		Idx::Ty(ty) => print_ty(ty, f, interner, fragments),
		Idx::Seq(items) => write_separated(f, ", ", items, |f, item| print_idx(item, f, interner, fragments)),
		Idx::Labeled(fields) => write_separated(f, ", ", fields, |f, (label, item)| {
			write!(f, "'{}': ", interner.resolve(label))?;
			print_idx(item, f, interner, fragments)
		}),
		Idx::Component(component) => write!(f, "{}", interner.resolve(&component.name)),
	}
}

fn bin_op(op: BinOp) -> &'static str {
	match op {
		BinOp::Add => "+",
		BinOp::Sub => "-",
		BinOp::Mul => "*",
		BinOp::Div => "/",
		BinOp::FloorDiv => "//",
		BinOp::Mod => "%",
		BinOp::Pow => "**",
	}
}

fn compare_op(op: CompareOp) -> &'static str {
	match op {
		CompareOp::Eq => "==",
		CompareOp::NotEq => "!=",
		CompareOp::Lt => "<",
		CompareOp::LtE => "<=",
		CompareOp::Gt => ">",
		CompareOp::GtE => ">=",
	}
}
