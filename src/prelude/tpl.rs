//! The tuple fragment, registered twice: `tpl` keeps its fields in written
//! order, `record` sorts them by label at type formation so that two record
//! types with the same field set are equal. Both translate to host tuples,
//! with labeled access compiled down to positional subscripts.

use crate::{
	common::Label,
	elaborate::{
		context::Context,
		error::{ElabError, ElabErrorKind},
	},
	fragment::{Bindings, Fragment, PatBindings},
	ir::{
		ast::{BoolOp, Expr, ExprKind, NameConst, Param, Pat, PatKind, Slice},
		ty::{Idx, Kind, TyExpr},
	},
	utility::bx,
};

pub struct TplFragment {
	/// Sort fields by label at type formation.
	pub sorted: bool,
}

fn field_tys<'i>(idx: &'i Idx, range: (usize, usize)) -> Result<Vec<&'i TyExpr>, ElabError> {
	let foreign = || ElabErrorKind::Fragment("tuple fragment with a foreign index".to_owned()).at(range);
	match idx {
		Idx::Seq(items) => items.iter().map(|item| item.as_ty().ok_or_else(foreign)).collect(),
		Idx::Labeled(fields) => fields.iter().map(|(_, item)| item.as_ty().ok_or_else(foreign)).collect(),
		_ => Err(foreign()),
	}
}

fn labeled_fields<'i>(idx: &'i Idx, range: (usize, usize)) -> Result<&'i [(Label, Idx)], ElabError> {
	match idx {
		Idx::Labeled(fields) => Ok(fields),
		_ => Err(ElabErrorKind::Ty("this tuple type has no labeled fields".to_owned()).at(range)),
	}
}

impl TplFragment {
	fn labeled_item(&self, ctx: &mut Context, slice: &Slice, range: (usize, usize)) -> Result<(Label, Idx), ElabError> {
		let Slice::Bounds { lower: Some(lower), upper: Some(upper), step: None } = slice else {
			return Err(
				ElabErrorKind::TypeFormation(format!("`{}` fields are written as `'label': type`", self.name()))
					.at(range),
			);
		};
		let ExprKind::Str(label) = &lower.kind else {
			return Err(ElabErrorKind::TypeFormation("field labels are string literals".to_owned()).at(lower.range));
		};
		let label = ctx.interner.get_or_intern(&**label);
		let ty = ctx.ana_uty_expr(upper, &Kind::Ty)?;
		Ok((label, Idx::ty(ty)))
	}
}

impl Fragment for TplFragment {
	fn name(&self) -> &'static str {
		if self.sorted {
			"record"
		} else {
			"tpl"
		}
	}

	fn init_idx(&self, ctx: &mut Context, slice: &Slice, range: (usize, usize)) -> Result<Idx, ElabError> {
		match slice {
			// Positional fields: `tpl[a, b]` or `tpl[a]`.
			Slice::Index(e) => {
				if self.sorted {
					return Err(
						ElabErrorKind::TypeFormation("record fields must be labeled".to_owned()).at(range),
					);
				}
				let items = match &e.kind {
					ExprKind::Tuple(items) => items.iter().collect::<Vec<_>>(),
					_ => vec![&**e],
				};
				let items = items
					.into_iter()
					.map(|item| Ok(Idx::ty(ctx.ana_uty_expr(item, &Kind::Ty)?)))
					.collect::<Result<Vec<_>, ElabError>>()?;
				Ok(Idx::Seq(items))
			}
			// Labeled fields: `tpl['a': x, 'b': y]`.
			Slice::Bounds { .. } => Ok(Idx::Labeled(vec![self.labeled_item(ctx, slice, range)?])),
			Slice::Items(items) => {
				let mut fields = items
					.iter()
					.map(|item| self.labeled_item(ctx, item, range))
					.collect::<Result<Vec<_>, _>>()?;
				for (position, (label, _)) in fields.iter().enumerate() {
					if fields[..position].iter().any(|(other, _)| other == label) {
						return Err(
							ElabErrorKind::TypeFormation(format!(
								"duplicate field label `{}`",
								ctx.interner.resolve(label)
							))
							.at(range),
						);
					}
				}
				if self.sorted {
					fields.sort_by(|(a, _), (b, _)| ctx.interner.resolve(a).cmp(ctx.interner.resolve(b)));
				}
				Ok(Idx::Labeled(fields))
			}
		}
	}

	fn ana_tuple(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<(), ElabError> {
		let ExprKind::Tuple(elements) = &e.kind else {
			return Err(ElabErrorKind::Internal("tuple dispatch mismatch".to_owned()).at(e.range));
		};
		let Idx::Seq(_) = idx else {
			return Err(ElabErrorKind::Ty("labeled tuples are introduced by dicts".to_owned()).at(e.range));
		};
		let tys = field_tys(idx, e.range)?;
		if elements.len() != tys.len() {
			return Err(
				ElabErrorKind::Ty(format!("expected {} tuple elements, found {}", tys.len(), elements.len()))
					.at(e.range),
			);
		}
		for (element, ty) in elements.iter().zip(tys) {
			let ty = ty.clone();
			ctx.ana(element, &ty)?;
		}
		Ok(())
	}

	fn trans_tuple(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<Expr, ElabError> {
		let ExprKind::Tuple(elements) = &e.kind else {
			return Err(ElabErrorKind::Internal("tuple dispatch mismatch".to_owned()).at(e.range));
		};
		let elements = elements.iter().map(|element| ctx.trans(element)).collect::<Result<_, _>>()?;
		Ok(ExprKind::Tuple(elements).synth())
	}

	fn ana_dict(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<(), ElabError> {
		let ExprKind::Dict { keys, values } = &e.kind else {
			return Err(ElabErrorKind::Internal("dict dispatch mismatch".to_owned()).at(e.range));
		};
		let fields = labeled_fields(idx, e.range)?;
		if keys.len() != fields.len() {
			return Err(
				ElabErrorKind::Ty(format!("expected {} fields, found {}", fields.len(), keys.len())).at(e.range),
			);
		}
		for (label, item) in fields {
			let position = match_key(ctx, keys, *label)
				.ok_or_else(|| missing_field(ctx, *label).at(e.range))?;
			let ty = item
				.as_ty()
				.ok_or_else(|| ElabErrorKind::Fragment("tuple fragment with a foreign index".to_owned()).at(e.range))?
				.clone();
			ctx.ana(&values[position], &ty)?;
		}
		Ok(())
	}

	fn trans_dict(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<Expr, ElabError> {
		let ExprKind::Dict { keys, values } = &e.kind else {
			return Err(ElabErrorKind::Internal("dict dispatch mismatch".to_owned()).at(e.range));
		};
		let fields = labeled_fields(idx, e.range)?;
		let mut positions = Vec::with_capacity(fields.len());
		for (label, _) in fields {
			positions.push(match_key(ctx, keys, *label).ok_or_else(|| missing_field(ctx, *label).at(e.range))?);
		}
		// A labeled value is emitted as a host tuple in field order, but its
		// values must still run in written order.
		let args = values.iter().map(|value| ctx.trans(value)).collect::<Result<Vec<_>, _>>()?;
		if positions.iter().enumerate().all(|(field, position)| field == *position) {
			return Ok(ExprKind::Tuple(args).synth());
		}
		let mut params = Vec::with_capacity(keys.len());
		for key in keys {
			let ExprKind::Str(text) = &key.kind else {
				return Err(ElabErrorKind::Internal("dict keys survived analysis unlabeled".to_owned()).at(key.range));
			};
			let label = ctx.interner.get_or_intern(&**text);
			let (_, minted) = ctx.fresh_uniq(label);
			params.push(minted);
		}
		let elements = positions.iter().map(|position| ExprKind::Name(params[*position]).synth()).collect();
		let params = params.into_iter().map(|minted| Param::new(minted, None, (0, 0))).collect();
		Ok(
			ExprKind::Call {
				callee: bx!(ExprKind::Lambda { params, body: bx!(ExprKind::Tuple(elements).synth()) }.synth()),
				args,
				keywords: Vec::new(),
			}
			.synth(),
		)
	}

	fn syn_attribute(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<TyExpr, ElabError> {
		let ExprKind::Attribute { label, .. } = &e.kind else {
			return Err(ElabErrorKind::Internal("attribute dispatch mismatch".to_owned()).at(e.range));
		};
		let fields = labeled_fields(idx, e.range)?;
		let field = fields.iter().find(|(l, _)| l == label);
		match field {
			Some((_, item)) => item
				.as_ty()
				.cloned()
				.ok_or_else(|| ElabErrorKind::Fragment("tuple fragment with a foreign index".to_owned()).at(e.range)),
			None => Err(missing_field(ctx, *label).at(e.range)),
		}
	}

	fn trans_attribute(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<Expr, ElabError> {
		let ExprKind::Attribute { value, label } = &e.kind else {
			return Err(ElabErrorKind::Internal("attribute dispatch mismatch".to_owned()).at(e.range));
		};
		let fields = labeled_fields(idx, e.range)?;
		let position = fields
			.iter()
			.position(|(l, _)| l == label)
			.ok_or_else(|| missing_field(ctx, *label).at(e.range))?;
		let value = ctx.trans(value)?;
		Ok(
			ExprKind::Subscript {
				value: bx!(value),
				slice: Slice::Index(bx!(ExprKind::Int(position as i64).synth())),
			}
			.synth(),
		)
	}

	fn syn_subscript(&self, ctx: &mut Context, e: &Expr, idx: &Idx) -> Result<TyExpr, ElabError> {
		let ExprKind::Subscript { slice, .. } = &e.kind else {
			return Err(ElabErrorKind::Internal("subscript dispatch mismatch".to_owned()).at(e.range));
		};
		let position = positional_index(slice)
			.ok_or_else(|| ElabErrorKind::Ty("tuple subscripts are integer literals".to_owned()).at(e.range))?;
		let tys = field_tys(idx, e.range)?;
		tys.get(position).map(|ty| (*ty).clone()).ok_or_else(|| {
			ElabErrorKind::Ty(format!("position {position} is out of bounds for {} fields", tys.len())).at(e.range)
		})
	}

	fn trans_subscript(&self, ctx: &mut Context, e: &Expr, _idx: &Idx) -> Result<Expr, ElabError> {
		let ExprKind::Subscript { value, slice } = &e.kind else {
			return Err(ElabErrorKind::Internal("subscript dispatch mismatch".to_owned()).at(e.range));
		};
		let position = positional_index(slice)
			.ok_or_else(|| ElabErrorKind::Internal("subscript was elaborated without a position".to_owned()).at(e.range))?;
		Ok(
			ExprKind::Subscript {
				value: bx!(ctx.trans(value)?),
				slice: Slice::Index(bx!(ExprKind::Int(position as i64).synth())),
			}
			.synth(),
		)
	}

	fn ana_pat_tuple(&self, ctx: &mut Context, pat: &Pat, idx: &Idx) -> Result<Bindings, ElabError> {
		let PatKind::Tuple(elements) = &pat.kind else {
			return Err(ElabErrorKind::Internal("pattern dispatch mismatch".to_owned()).at(pat.range));
		};
		let tys = field_tys(idx, pat.range)?;
		if elements.len() != tys.len() {
			return Err(
				ElabErrorKind::Ty(format!("expected {} pattern elements, found {}", tys.len(), elements.len()))
					.at(pat.range),
			);
		}
		let tys = tys.into_iter().cloned().collect::<Vec<_>>();
		let mut bindings = Vec::new();
		for (element, ty) in elements.iter().zip(&tys) {
			bindings.extend(ctx.ana_pat(element, ty)?);
		}
		Ok(bindings)
	}

	fn trans_pat_tuple(
		&self,
		ctx: &mut Context,
		pat: &Pat,
		_idx: &Idx,
		scrutinee: &Expr,
	) -> Result<(Expr, PatBindings), ElabError> {
		let PatKind::Tuple(elements) = &pat.kind else {
			return Err(ElabErrorKind::Internal("pattern dispatch mismatch".to_owned()).at(pat.range));
		};
		let mut guards = Vec::new();
		let mut bindings = Vec::new();
		for (position, element) in elements.iter().enumerate() {
			let projected = ExprKind::Subscript {
				value: bx!(scrutinee.clone()),
				slice: Slice::Index(bx!(ExprKind::Int(position as i64).synth())),
			}
			.synth();
			let (guard, sub_bindings) = ctx.trans_pat(element, &projected)?;
			if !matches!(guard.kind, ExprKind::NameConst(NameConst::True)) {
				guards.push(guard);
			}
			bindings.extend(sub_bindings);
		}
		let guard = match guards.len() {
			0 => ExprKind::NameConst(NameConst::True).synth(),
			1 => guards.pop().ok_or_else(|| ElabErrorKind::Internal("guard vanished".to_owned()).at(pat.range))?,
			_ => ExprKind::BoolOp { op: BoolOp::And, values: guards }.synth(),
		};
		Ok((guard, bindings))
	}
}

fn positional_index(slice: &Slice) -> Option<usize> {
	match slice {
		Slice::Index(e) => match &e.kind {
			ExprKind::Int(value) if *value >= 0 => Some(*value as usize),
			_ => None,
		},
		_ => None,
	}
}

fn match_key(ctx: &Context, keys: &[Expr], label: Label) -> Option<usize> {
	let label = ctx.interner.resolve(&label);
	keys.iter().position(|key| matches!(&key.kind, ExprKind::Str(key) if &**key == label))
}

fn missing_field(ctx: &Context, label: Label) -> ElabErrorKind {
	ElabErrorKind::Ty(format!("no field labeled `{}`", ctx.interner.resolve(&label)))
}
