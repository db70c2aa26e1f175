mod common;

use common::*;
use tessera::{
	elaborate::error::ElabErrorKind,
	ir::ast::{BinOp, BoolOp, ExprKind, Handler, MatchRule, NameConst, PatKind, Slice, StmtKind},
};

#[test]
fn typed_members_elaborate_and_translate() {
	let mut h = Harness::new();
	let i = &mut h.interner;
	let coord = assign(name(i, "coord"), Some(kind_ty(i)), name(i, "num"));
	let x = assign(name(i, "x"), Some(name(i, "coord")), int(3));
	let y = assign(name(i, "y"), Some(name(i, "coord")), int(4));
	let body = binop(
		binop(name(i, "a"), BinOp::Mul, name(i, "a")),
		BinOp::Add,
		binop(name(i, "b"), BinOp::Mul, name(i, "b")),
	);
	let norm2 = function_def(
		i.get_or_intern("norm2"),
		name(i, "fn"),
		vec![
			param(i.get_or_intern("a"), Some(name(i, "num"))),
			param(i.get_or_intern("b"), Some(name(i, "num"))),
		],
		Some(name(i, "num")),
		vec![StmtKind::Expr(body).synth()],
	);
	let n = assign(name(i, "n"), None, call(name(i, "norm2"), vec![name(i, "x"), name(i, "y")]));
	let kind = assign(
		name(i, "kind"),
		Some(name(i, "string")),
		ExprKind::Match {
			scrutinee: Box::new(name(i, "n")),
			rules: vec![
				MatchRule { pat: PatKind::Int(25).at((0, 0)), body: string("pythagorean") },
				MatchRule { pat: PatKind::Wildcard.at((0, 0)), body: string("other") },
			],
		}
		.synth(),
	);
	let d = decl(i, "point", vec![coord, x, y, norm2, n, kind]);

	let component = h.elaborate(&d).unwrap();
	assert_eq!(h.type_member(&component, "coord"), "num");
	assert_eq!(h.value_ty(&component, "x"), "num");
	assert_eq!(h.value_ty(&component, "norm2"), "fn[num, num, num]");
	assert_eq!(h.value_ty(&component, "n"), "num");
	assert_eq!(h.value_ty(&component, "kind"), "string");

	// The type member leaves no run-time trace: five value assignments plus
	// the module assembly.
	assert_eq!(component.translation.len(), 6);
	let StmtKind::Assign { value, .. } = &component.translation.last().unwrap().kind else {
		panic!("module assembly is not an assignment")
	};
	let ExprKind::Dict { keys, .. } = &value.kind else { panic!("module value is not a dict") };
	assert_eq!(keys.len(), 5);
}

#[test]
fn match_compiles_to_a_conditional_chain() {
	let mut h = Harness::new();
	let i = &mut h.interner;
	let n = assign(name(i, "n"), Some(name(i, "num")), int(25));
	let kind = assign(
		name(i, "kind"),
		Some(name(i, "string")),
		ExprKind::Match {
			scrutinee: Box::new(name(i, "n")),
			rules: vec![
				MatchRule { pat: PatKind::Int(25).at((0, 0)), body: string("pythagorean") },
				MatchRule { pat: PatKind::Wildcard.at((0, 0)), body: string("other") },
			],
		}
		.synth(),
	);
	let d = decl(i, "point", vec![n, kind]);

	let component = h.elaborate(&d).unwrap();
	// A bare-name scrutinee needs no rebinding, and the trailing wildcard
	// truncates the chain in place of the failure hook.
	let StmtKind::Assign { value, .. } = &component.translation[1].kind else {
		panic!("expected an assignment")
	};
	let ExprKind::IfExp { test, orelse, .. } = &value.kind else { panic!("expected a conditional chain") };
	assert!(matches!(test.kind, ExprKind::Compare { .. }));
	assert!(matches!(orelse.kind, ExprKind::Str(_)));
}

#[test]
fn non_exhaustive_matches_fall_through_to_the_failure_hook() {
	let mut h = Harness::new();
	let i = &mut h.interner;
	let n = assign(name(i, "n"), Some(name(i, "num")), int(3));
	let k = assign(
		name(i, "k"),
		Some(name(i, "string")),
		ExprKind::Match {
			scrutinee: Box::new(name(i, "n")),
			rules: vec![MatchRule { pat: PatKind::Int(25).at((0, 0)), body: string("hit") }],
		}
		.synth(),
	);
	let d = decl(i, "partial", vec![n, k]);

	let component = h.elaborate(&d).unwrap();
	let StmtKind::Assign { value, .. } = &component.translation[1].kind else {
		panic!("expected an assignment")
	};
	let ExprKind::IfExp { orelse, .. } = &value.kind else { panic!("expected a conditional chain") };
	let ExprKind::Call { callee, args, .. } = &orelse.kind else { panic!("expected the failure call") };
	assert!(args.is_empty());
	let ExprKind::Name(fail) = &callee.kind else { panic!("expected a name callee") };
	assert_eq!(h.interner.resolve(fail), "__match_fail");
}

#[test]
fn match_scrutinees_are_evaluated_once() {
	let mut h = Harness::new();
	let i = &mut h.interner;
	let b = assign(name(i, "b"), Some(name(i, "boolean")), ExprKind::NameConst(NameConst::True).synth());
	let s = assign(
		name(i, "s"),
		Some(name(i, "string")),
		ExprKind::Match {
			scrutinee: Box::new(
				ExprKind::BoolOp { op: BoolOp::And, values: vec![name(i, "b"), name(i, "b")] }.synth(),
			),
			rules: vec![
				MatchRule { pat: PatKind::NameConst(NameConst::True).at((0, 0)), body: string("both") },
				MatchRule { pat: PatKind::Wildcard.at((0, 0)), body: string("not") },
			],
		}
		.synth(),
	);
	let d = decl(i, "once", vec![b, s]);

	let component = h.elaborate(&d).unwrap();
	// A compound scrutinee is bound once through an applied lambda; the
	// guards reference the binder, never the original expression.
	let StmtKind::Assign { value, .. } = &component.translation[1].kind else {
		panic!("expected an assignment")
	};
	let ExprKind::Call { callee, args, .. } = &value.kind else { panic!("expected an applied lambda") };
	assert_eq!(args.len(), 1);
	assert!(matches!(args[0].kind, ExprKind::BoolOp { .. }));
	let ExprKind::Lambda { params, body } = &callee.kind else { panic!("expected a lambda") };
	assert_eq!(params.len(), 1);
	let ExprKind::IfExp { test, .. } = &body.kind else { panic!("expected a conditional chain") };
	let ExprKind::Name(scrutinee) = &test.kind else { panic!("expected the scrutinee binder") };
	assert_eq!(*scrutinee, params[0].name);
}

#[test]
fn tuple_patterns_bind_by_position() {
	let mut h = Harness::new();
	let i = &mut h.interner;
	let t = assign(
		name(i, "t"),
		Some(kind_ty(i)),
		subscript(name(i, "tpl"), index(tuple(vec![name(i, "num"), name(i, "num")]))),
	);
	let v = assign(name(i, "v"), Some(name(i, "t")), tuple(vec![int(1), int(2)]));
	let s = assign(
		name(i, "s"),
		None,
		ExprKind::Match {
			scrutinee: Box::new(name(i, "v")),
			rules: vec![MatchRule {
				pat: PatKind::Tuple(vec![
					PatKind::Name(i.get_or_intern("a")).at((0, 0)),
					PatKind::Name(i.get_or_intern("b")).at((0, 0)),
				])
				.at((0, 0)),
				body: binop(name(i, "a"), BinOp::Add, name(i, "b")),
			}],
		}
		.synth(),
	);
	let d = decl(i, "pairs", vec![t, v, s]);

	let component = h.elaborate(&d).unwrap();
	assert_eq!(h.value_ty(&component, "s"), "num");
	// An all-binder pattern is irrefutable: the body is applied directly to
	// the positional projections of the scrutinee.
	let StmtKind::Assign { value, .. } = &component.translation[1].kind else {
		panic!("expected an assignment")
	};
	let ExprKind::Call { callee, args, .. } = &value.kind else { panic!("expected an applied lambda") };
	let ExprKind::Lambda { params, .. } = &callee.kind else { panic!("expected a lambda") };
	assert_eq!(params.len(), 2);
	assert!(args.iter().all(|arg| matches!(arg.kind, ExprKind::Subscript { .. })));
}

#[test]
fn patterns_reject_duplicate_bindings() {
	let mut h = Harness::new();
	let i = &mut h.interner;
	let t = assign(
		name(i, "t"),
		Some(kind_ty(i)),
		subscript(name(i, "tpl"), index(tuple(vec![name(i, "num"), name(i, "num")]))),
	);
	let v = assign(name(i, "v"), Some(name(i, "t")), tuple(vec![int(1), int(2)]));
	let s = assign(
		name(i, "s"),
		None,
		ExprKind::Match {
			scrutinee: Box::new(name(i, "v")),
			rules: vec![MatchRule {
				pat: PatKind::Tuple(vec![
					PatKind::Name(i.get_or_intern("a")).at((0, 0)),
					PatKind::Name(i.get_or_intern("a")).at((0, 0)),
				])
				.at((0, 0)),
				body: name(i, "a"),
			}],
		}
		.synth(),
	);
	let d = decl(i, "pairs", vec![t, v, s]);

	assert!(matches!(h.elaborate(&d), Err(e) if matches!(e.kind, ElabErrorKind::Ty(_))));
}

#[test]
fn record_fields_are_order_insensitive() {
	let mut h = Harness::new();
	let i = &mut h.interner;
	let pair = assign(
		name(i, "pair"),
		Some(kind_ty(i)),
		subscript(name(i, "record"), Slice::Items(vec![labeled("x", name(i, "num")), labeled("y", name(i, "num"))])),
	);
	let riap = assign(
		name(i, "riap"),
		Some(kind_ty(i)),
		subscript(name(i, "record"), Slice::Items(vec![labeled("y", name(i, "num")), labeled("x", name(i, "num"))])),
	);
	let a = assign(name(i, "a"), Some(name(i, "pair")), dict(vec![("y", int(0)), ("x", int(0))]));
	let b = assign(name(i, "b"), Some(name(i, "riap")), name(i, "a"));
	let d = decl(i, "records", vec![pair, riap, a, b]);

	let component = h.elaborate(&d).unwrap();
	assert_eq!(h.type_member(&component, "pair"), h.type_member(&component, "riap"));
	// A dict written against the sorted layout still translates, binding its
	// values before the tuple is assembled.
	let StmtKind::Assign { value, .. } = &component.translation[0].kind else {
		panic!("expected an assignment")
	};
	assert!(matches!(value.kind, ExprKind::Call { .. }));
}

#[test]
fn record_values_run_in_written_order() {
	let mut h = Harness::new();
	let i = &mut h.interner;
	let pair = assign(
		name(i, "pair"),
		Some(kind_ty(i)),
		subscript(name(i, "record"), Slice::Items(vec![labeled("x", name(i, "num")), labeled("y", name(i, "num"))])),
	);
	let a = assign(name(i, "a"), Some(name(i, "pair")), dict(vec![("y", int(1)), ("x", int(2))]));
	let d = decl(i, "records", vec![pair, a]);

	let component = h.elaborate(&d).unwrap();
	// The layout sorts `x` first, but `y`'s value was written first and must
	// run first: the values are lambda arguments in written order, and the
	// tuple body reorders the binders, not the effects.
	let StmtKind::Assign { value, .. } = &component.translation[0].kind else {
		panic!("expected an assignment")
	};
	let ExprKind::Call { callee, args, .. } = &value.kind else { panic!("expected an applied lambda") };
	assert!(matches!(args[0].kind, ExprKind::Int(1)), "the value written first must be passed first");
	assert!(matches!(args[1].kind, ExprKind::Int(2)));
	let ExprKind::Lambda { params, body } = &callee.kind else { panic!("expected a lambda") };
	let ExprKind::Tuple(elements) = &body.kind else { panic!("expected a tuple body") };
	let ExprKind::Name(first) = &elements[0].kind else { panic!("expected a binder reference") };
	assert_eq!(*first, params[1].name);
}

#[test]
fn tpl_fields_are_order_sensitive() {
	let mut h = Harness::new();
	let i = &mut h.interner;
	let pair = assign(
		name(i, "pair"),
		Some(kind_ty(i)),
		subscript(name(i, "tpl"), Slice::Items(vec![labeled("x", name(i, "num")), labeled("y", name(i, "num"))])),
	);
	let riap = assign(
		name(i, "riap"),
		Some(kind_ty(i)),
		subscript(name(i, "tpl"), Slice::Items(vec![labeled("y", name(i, "num")), labeled("x", name(i, "num"))])),
	);
	let a = assign(name(i, "a"), Some(name(i, "pair")), dict(vec![("x", int(0)), ("y", int(0))]));
	let b = assign(name(i, "b"), Some(name(i, "riap")), name(i, "a"));
	let d = decl(i, "tuples", vec![pair, riap, a, b]);

	assert!(matches!(h.elaborate(&d), Err(e) if matches!(e.kind, ElabErrorKind::TyMismatch { .. })));
}

#[test]
fn duplicate_field_labels_are_rejected() {
	let mut h = Harness::new();
	let i = &mut h.interner;
	let pair = assign(
		name(i, "pair"),
		Some(kind_ty(i)),
		subscript(name(i, "record"), Slice::Items(vec![labeled("x", name(i, "num")), labeled("x", name(i, "num"))])),
	);
	let d = decl(i, "records", vec![pair]);

	assert!(matches!(h.elaborate(&d), Err(e) if matches!(e.kind, ElabErrorKind::TypeFormation(_))));
}

#[test]
fn unindexed_fragments_reject_an_index() {
	let mut h = Harness::new();
	let i = &mut h.interner;
	let t = assign(name(i, "t"), Some(kind_ty(i)), subscript(name(i, "num"), index(name(i, "num"))));
	let d = decl(i, "indices", vec![t]);
	assert!(matches!(h.elaborate(&d), Err(e) if matches!(e.kind, ElabErrorKind::TypeValidation(_))));

	// The converse: a fragment whose types all carry an index rejects the
	// un-subscripted spelling.
	let i = &mut h.interner;
	let v = assign(name(i, "v"), Some(name(i, "tpl")), tuple(vec![int(1)]));
	let d = decl(i, "indices", vec![v]);
	assert!(matches!(h.elaborate(&d), Err(e) if matches!(e.kind, ElabErrorKind::TypeValidation(_))));
}

#[test]
fn unit_values_are_the_empty_tuple() {
	let mut h = Harness::new();
	let i = &mut h.interner;
	let u = assign(name(i, "u"), Some(name(i, "unit")), tuple(Vec::new()));
	let d = decl(i, "units", vec![u]);

	let component = h.elaborate(&d).unwrap();
	assert_eq!(h.value_ty(&component, "u"), "unit");
	let StmtKind::Assign { value, .. } = &component.translation[0].kind else {
		panic!("expected an assignment")
	};
	assert!(matches!(&value.kind, ExprKind::Tuple(elements) if elements.is_empty()));
}

#[test]
fn labeled_access_compiles_to_a_position() {
	let mut h = Harness::new();
	let i = &mut h.interner;
	let t = assign(
		name(i, "t"),
		Some(kind_ty(i)),
		subscript(name(i, "tpl"), Slice::Items(vec![labeled("x", name(i, "num")), labeled("y", name(i, "string"))])),
	);
	let v = assign(name(i, "v"), Some(name(i, "t")), dict(vec![("x", int(1)), ("y", string("one"))]));
	let second = assign(
		name(i, "second"),
		None,
		ExprKind::Attribute { value: Box::new(name(i, "v")), label: i.get_or_intern("y") }.synth(),
	);
	let d = decl(i, "points", vec![t, v, second]);

	let component = h.elaborate(&d).unwrap();
	assert_eq!(h.value_ty(&component, "second"), "string");
	let StmtKind::Assign { value, .. } = &component.translation[1].kind else {
		panic!("expected an assignment")
	};
	let ExprKind::Subscript { slice, .. } = &value.kind else { panic!("expected a positional subscript") };
	let Slice::Index(position) = slice else { panic!("expected an index") };
	assert!(matches!(position.kind, ExprKind::Int(1)));
}

#[test]
fn lambdas_check_against_function_types() {
	let mut h = Harness::new();
	let i = &mut h.interner;
	let a = i.get_or_intern("a");
	let f = assign(
		name(i, "f"),
		Some(subscript(name(i, "fn"), index(tuple(vec![name(i, "num"), name(i, "num")])))),
		ExprKind::Lambda { params: vec![param(a, None)], body: Box::new(ExprKind::Name(a).synth()) }.synth(),
	);
	let d = decl(i, "lambdas", vec![f]);

	let component = h.elaborate(&d).unwrap();
	assert_eq!(h.value_ty(&component, "f"), "fn[num, num]");
}

#[test]
fn parameter_annotations_must_agree_with_the_signature() {
	let mut h = Harness::new();
	let i = &mut h.interner;
	let a = i.get_or_intern("a");
	let f = assign(
		name(i, "f"),
		Some(subscript(name(i, "fn"), index(tuple(vec![name(i, "num"), name(i, "num")])))),
		ExprKind::Lambda {
			params: vec![param(a, Some(name(i, "string")))],
			body: Box::new(ExprKind::Name(a).synth()),
		}
		.synth(),
	);
	let d = decl(i, "lambdas", vec![f]);

	assert!(matches!(h.elaborate(&d), Err(e) if matches!(e.kind, ElabErrorKind::TyMismatch { .. })));
}

#[test]
fn function_bodies_support_local_bindings() {
	let mut h = Harness::new();
	let i = &mut h.interner;
	let local = assign(name(i, "b"), None, binop(name(i, "a"), BinOp::Add, name(i, "a")));
	let ret = StmtKind::Return(Some(name(i, "b"))).synth();
	let f = function_def(
		i.get_or_intern("double"),
		name(i, "fn"),
		vec![param(i.get_or_intern("a"), Some(name(i, "num")))],
		Some(name(i, "num")),
		vec![local, ret],
	);
	let use_site = assign(name(i, "n"), None, call(name(i, "double"), vec![int(21)]));
	let d = decl(i, "locals", vec![f, use_site]);

	let component = h.elaborate(&d).unwrap();
	assert_eq!(h.value_ty(&component, "double"), "fn[num, num]");
	assert_eq!(h.value_ty(&component, "n"), "num");
}

#[test]
fn trailing_expressions_return_their_value() {
	let mut h = Harness::new();
	let i = &mut h.interner;
	let tail = StmtKind::Expr(binop(name(i, "a"), BinOp::Mul, name(i, "a"))).synth();
	let f = function_def(
		i.get_or_intern("square"),
		name(i, "fn"),
		vec![param(i.get_or_intern("a"), Some(name(i, "num")))],
		Some(name(i, "num")),
		vec![tail],
	);
	let d = decl(i, "tails", vec![f]);

	let component = h.elaborate(&d).unwrap();
	let StmtKind::Assign { value, .. } = &component.translation[0].kind else {
		panic!("expected an assignment")
	};
	let ExprKind::FunctionDef { body, .. } = &value.kind else { panic!("expected a function definition") };
	assert!(matches!(body.last().map(|s| &s.kind), Some(StmtKind::Return(Some(_)))));
}

#[test]
fn try_handler_bindings_are_renamed_apart() {
	let mut h = Harness::new();
	let i = &mut h.interner;
	let handler = Handler::new(None, Some(i.get_or_intern("e")), vec![StmtKind::Expr(name(i, "e")).synth()], (0, 0));
	let guard = StmtKind::Try {
		body: vec![StmtKind::Pass.synth()],
		handlers: vec![handler],
		orelse: Vec::new(),
		finalbody: Vec::new(),
	}
	.synth();
	let f = function_def(
		i.get_or_intern("f"),
		name(i, "fn"),
		vec![param(i.get_or_intern("a"), Some(name(i, "num")))],
		Some(name(i, "num")),
		vec![guard, StmtKind::Expr(name(i, "a")).synth()],
	);
	let d = decl(i, "tries", vec![f]);

	let component = h.elaborate(&d).unwrap();
	let StmtKind::Assign { value, .. } = &component.translation[0].kind else {
		panic!("expected an assignment")
	};
	let ExprKind::FunctionDef { body, .. } = &value.kind else { panic!("expected a function definition") };
	let StmtKind::Try { handlers, .. } = &body[0].kind else { panic!("expected a try statement") };
	let bound = handlers[0].binding.expect("the handler binds its exception");
	assert!(h.interner.resolve(&bound).starts_with("__e_"));
	let StmtKind::Expr(inner) = &handlers[0].body[0].kind else { panic!("expected an expression statement") };
	let ExprKind::Name(used) = &inner.kind else { panic!("expected a name") };
	assert_eq!(*used, bound);
}

#[test]
fn mixed_numeric_operators_widen_to_ieee() {
	let mut h = Harness::new();
	let i = &mut h.interner;
	let x = assign(name(i, "x"), Some(name(i, "num")), int(2));
	let y = assign(name(i, "y"), Some(name(i, "ieee")), float(1.5));
	let z = assign(name(i, "z"), None, binop(name(i, "x"), BinOp::Add, name(i, "y")));
	let w = assign(name(i, "w"), None, binop(name(i, "y"), BinOp::Mul, name(i, "x")));
	let d = decl(i, "widening", vec![x, y, z, w]);

	let component = h.elaborate(&d).unwrap();
	// Absorption is symmetric in the operands.
	assert_eq!(h.value_ty(&component, "z"), "ieee");
	assert_eq!(h.value_ty(&component, "w"), "ieee");
}

#[test]
fn unrelated_operand_types_are_rejected() {
	let mut h = Harness::new();
	let i = &mut h.interner;
	let s = assign(name(i, "s"), Some(name(i, "string")), string("a"));
	let n = assign(name(i, "n"), Some(name(i, "num")), int(1));
	let z = assign(name(i, "z"), None, binop(name(i, "s"), BinOp::Add, name(i, "n")));
	let d = decl(i, "mixtures", vec![s, n, z]);

	assert!(matches!(h.elaborate(&d), Err(e) if matches!(e.kind, ElabErrorKind::Ty(_))));
}

#[test]
fn boolean_operands_are_checked() {
	let mut h = Harness::new();
	let i = &mut h.interner;
	let b = assign(name(i, "b"), Some(name(i, "boolean")), ExprKind::NameConst(NameConst::True).synth());
	let c = assign(
		name(i, "c"),
		None,
		ExprKind::BoolOp { op: BoolOp::And, values: vec![name(i, "b"), int(1)] }.synth(),
	);
	let d = decl(i, "logic", vec![b, c]);

	assert!(matches!(h.elaborate(&d), Err(e) if matches!(e.kind, ElabErrorKind::Ty(_))));
}

#[test]
fn singleton_kinds_constrain_the_inhabitant() {
	let mut h = Harness::new();
	let i = &mut h.interner;
	let good = assign(name(i, "t"), Some(subscript(kind_ty(i), index(name(i, "num")))), name(i, "num"));
	let d = decl(i, "kinds", vec![good]);
	let component = h.elaborate(&d).unwrap();
	assert_eq!(h.type_member(&component, "t"), "num");

	let i = &mut h.interner;
	let bad = assign(name(i, "u"), Some(subscript(kind_ty(i), index(name(i, "num")))), name(i, "string"));
	let d = decl(i, "kinds", vec![bad]);
	assert!(matches!(h.elaborate(&d), Err(e) if matches!(e.kind, ElabErrorKind::Kind(_))));
}

#[test]
fn members_project_across_components() {
	let mut h = Harness::new();
	let i = &mut h.interner;
	let t = assign(name(i, "t"), Some(kind_ty(i)), name(i, "num"));
	let x = assign(name(i, "x"), Some(name(i, "t")), int(1));
	let d = decl(i, "base", vec![t, x]);
	h.elaborate_and_bind(&d);

	let i = &mut h.interner;
	let y = assign(
		name(i, "y"),
		Some(ExprKind::Attribute { value: Box::new(name(i, "base")), label: i.get_or_intern("t") }.synth()),
		int(2),
	);
	let z = assign(
		name(i, "z"),
		None,
		binop(
			ExprKind::Attribute { value: Box::new(name(i, "base")), label: i.get_or_intern("x") }.synth(),
			BinOp::Add,
			int(1),
		),
	);
	let d = decl(i, "client", vec![y, z]);

	let component = h.elaborate(&d).unwrap();
	assert_eq!(h.value_ty(&component, "y"), "num");
	assert_eq!(h.value_ty(&component, "z"), "num");
	// The value projection compiles to a keyed access into the base module.
	let StmtKind::Assign { value, .. } = &component.translation[1].kind else {
		panic!("expected an assignment")
	};
	let ExprKind::BinOp { left, .. } = &value.kind else { panic!("expected a binary operator") };
	assert!(matches!(left.kind, ExprKind::Subscript { .. }));
}

#[test]
fn type_members_are_rejected_in_value_position() {
	let mut h = Harness::new();
	let i = &mut h.interner;
	let t = assign(name(i, "t"), Some(kind_ty(i)), name(i, "num"));
	let d = decl(i, "base", vec![t]);
	h.elaborate_and_bind(&d);

	let i = &mut h.interner;
	let y = assign(
		name(i, "y"),
		None,
		ExprKind::Attribute { value: Box::new(name(i, "base")), label: i.get_or_intern("t") }.synth(),
	);
	let d = decl(i, "client", vec![y]);

	assert!(matches!(h.elaborate(&d), Err(e) if matches!(e.kind, ElabErrorKind::Ty(_))));
}

#[test]
fn duplicate_member_names_are_rejected() {
	let mut h = Harness::new();
	let i = &mut h.interner;
	let first = assign(name(i, "x"), Some(name(i, "num")), int(1));
	let second = assign(name(i, "x"), Some(name(i, "num")), int(2));
	let d = decl(i, "twice", vec![first, second]);

	assert!(matches!(h.elaborate(&d), Err(e) if matches!(e.kind, ElabErrorKind::ComponentFormation(_))));
}

#[test]
fn function_decorators_must_name_a_fragment() {
	let mut h = Harness::new();
	let i = &mut h.interner;
	let f = function_def(
		i.get_or_intern("f"),
		name(i, "nope"),
		vec![param(i.get_or_intern("a"), Some(name(i, "num")))],
		Some(name(i, "num")),
		vec![StmtKind::Expr(name(i, "a")).synth()],
	);
	let d = decl(i, "decorated", vec![f]);

	assert!(matches!(h.elaborate(&d), Err(e) if matches!(e.kind, ElabErrorKind::Ty(_))));
}

#[test]
fn effect_members_keep_their_translation() {
	let mut h = Harness::new();
	let i = &mut h.interner;
	let n = assign(name(i, "n"), Some(name(i, "num")), int(1));
	let effect = StmtKind::Expr(binop(name(i, "n"), BinOp::Add, name(i, "n"))).synth();
	let d = decl(i, "effects", vec![n, effect]);

	let component = h.elaborate(&d).unwrap();
	// The effect has no member signature, but its translation survives
	// between the value assignment and the module assembly.
	assert_eq!(component.labels().count(), 1);
	assert!(matches!(component.translation[1].kind, StmtKind::Expr(_)));

	// Member bindings are renamed apart in the emitted code.
	let StmtKind::Assign { target, .. } = &component.translation[0].kind else {
		panic!("expected an assignment")
	};
	let ExprKind::Name(minted) = &target.kind else { panic!("expected a name target") };
	assert!(h.interner.resolve(minted).starts_with("__n_"));
}
