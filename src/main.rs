use bpaf::{construct, short, Parser};
use lasso::Rodeo;
use tessera::{
	component::{elaborate_component, ComponentDecl, MemberSig},
	fragment::{Fragments, StaticEnv},
	ir::ast::{BinOp, Expr, ExprKind, MatchRule, Param, PatKind, Slice, Stmt, StmtKind},
	prelude,
	report::report_elaboration_error,
	unparse::{pretty_print_block, pretty_print_ty},
};

pub fn run(sample: &str) {
	let mut interner = Rodeo::default();
	let mut fragments = Fragments::new();
	let mut env = StaticEnv::new();
	prelude::install(&mut fragments, &mut env, &mut interner);

	let decl = match sample {
		"point" => sample_point(&mut interner),
		"record" => sample_record(&mut interner),
		_ => {
			eprintln!("unknown sample `{sample}`; try `point` or `record`");
			std::process::exit(2);
		}
	};

	let component = match elaborate_component(&fragments, &env, &mut interner, &decl) {
		Ok(x) => x,
		Err(e) => {
			report_elaboration_error("", &interner, &fragments, e);
			std::process::exit(1);
		}
	};
	println!("Elaboration complete.");

	println!();

	// Member signatures.
	for label in component.labels() {
		match component.member(label) {
			Some(MemberSig::Value(ty)) =>
				println!("{}: {}", interner.resolve(&label), pretty_print_ty(ty, &interner, &fragments)),
			Some(MemberSig::Type(inhabitant)) => println!(
				"{}: type[{}]",
				interner.resolve(&label),
				pretty_print_ty(inhabitant, &interner, &fragments)
			),
			None => {}
		}
	}

	println!();

	// Translation.
	print!("{}", pretty_print_block(&component.translation, &interner));
}

fn name(interner: &mut Rodeo, text: &str) -> Expr { ExprKind::Name(interner.get_or_intern(text)).synth() }

fn assign(target: Expr, annotation: Option<Expr>, value: Expr) -> Stmt {
	StmtKind::Assign { target, annotation, value }.synth()
}

fn ascription(ty: Expr) -> Option<Expr> { Some(ty) }

/// A small typed component: a singleton type member, annotated values, a
/// decorated function, and a match over its result.
fn sample_point(interner: &mut Rodeo) -> ComponentDecl {
	let coord = assign(name(interner, "coord"), ascription(name(interner, "type")), name(interner, "num"));
	let x = assign(name(interner, "x"), ascription(name(interner, "coord")), ExprKind::Int(3).synth());
	let y = assign(name(interner, "y"), ascription(name(interner, "coord")), ExprKind::Int(4).synth());

	let body = ExprKind::BinOp {
		left: Box::new(
			ExprKind::BinOp {
				left: Box::new(name(interner, "x")),
				op: BinOp::Mul,
				right: Box::new(name(interner, "x")),
			}
			.synth(),
		),
		op: BinOp::Add,
		right: Box::new(
			ExprKind::BinOp {
				left: Box::new(name(interner, "y")),
				op: BinOp::Mul,
				right: Box::new(name(interner, "y")),
			}
			.synth(),
		),
	}
	.synth();
	let norm2 = StmtKind::Expr(
		ExprKind::FunctionDef {
			name: interner.get_or_intern("norm2"),
			decorators: vec![name(interner, "fn")],
			params: vec![
				Param::new(interner.get_or_intern("x"), Some(name(interner, "num")), (0, 0)),
				Param::new(interner.get_or_intern("y"), Some(name(interner, "num")), (0, 0)),
			],
			returns: Some(Box::new(name(interner, "num"))),
			body: vec![StmtKind::Expr(body).synth()],
		}
		.synth(),
	)
	.synth();

	let n = assign(
		name(interner, "n"),
		None,
		ExprKind::Call {
			callee: Box::new(name(interner, "norm2")),
			args: vec![name(interner, "x"), name(interner, "y")],
			keywords: Vec::new(),
		}
		.synth(),
	);

	let kind = assign(
		name(interner, "kind"),
		ascription(name(interner, "string")),
		ExprKind::Match {
			scrutinee: Box::new(name(interner, "n")),
			rules: vec![
				MatchRule { pat: PatKind::Int(25).at((0, 0)), body: ExprKind::Str("pythagorean".into()).synth() },
				MatchRule { pat: PatKind::Wildcard.at((0, 0)), body: ExprKind::Str("other".into()).synth() },
			],
		}
		.synth(),
	);

	ComponentDecl {
		name: interner.get_or_intern("point"),
		range: (0, 0),
		body: vec![coord, x, y, norm2, n, kind],
	}
}

/// A component built around a labeled record type.
fn sample_record(interner: &mut Rodeo) -> ComponentDecl {
	let labeled = |interner: &mut Rodeo, label: &str, ty: &str| Slice::Bounds {
		lower: Some(Box::new(ExprKind::Str(label.into()).synth())),
		upper: Some(Box::new(name(interner, ty))),
		step: None,
	};
	let pair_ty = ExprKind::Subscript {
		value: Box::new(name(interner, "record")),
		slice: Slice::Items(vec![labeled(interner, "x", "num"), labeled(interner, "y", "num")]),
	}
	.synth();
	let pair = assign(name(interner, "pair"), ascription(name(interner, "type")), pair_ty);

	let origin = assign(
		name(interner, "origin"),
		ascription(name(interner, "pair")),
		ExprKind::Dict {
			keys: vec![ExprKind::Str("y".into()).synth(), ExprKind::Str("x".into()).synth()],
			values: vec![ExprKind::Int(0).synth(), ExprKind::Int(0).synth()],
		}
		.synth(),
	);

	let px = assign(
		name(interner, "px"),
		None,
		ExprKind::Attribute { value: Box::new(name(interner, "origin")), label: interner.get_or_intern("x") }.synth(),
	);

	ComponentDecl { name: interner.get_or_intern("pair_demo"), range: (0, 0), body: vec![pair, origin, px] }
}

struct Options {
	sample: String,
}

fn main() {
	let options: Options = construct!(Options {
		sample(short('s').argument::<String>("NAME").help("Sample component to elaborate").fallback("point".to_owned())),
	})
	.to_options()
	.run();

	run(&options.sample);
}
