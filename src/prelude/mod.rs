//! The reference fragment library.

pub mod boolean;
pub mod fun;
pub mod ieee;
pub mod num;
pub mod py;
pub mod string;
pub mod tpl;
pub mod unit;

use std::rc::Rc;

use lasso::Rodeo;

use crate::fragment::{Fragment, Fragments, StaticEnv, StaticValue};

fn add(fragments: &mut Fragments, env: &mut StaticEnv, interner: &mut Rodeo, fragment: Rc<dyn Fragment>) {
	let name = interner.get_or_intern(fragment.name());
	let id = fragments.register(fragment);
	env.bind(name, StaticValue::Fragment(id));
}

/// Registers the full reference library and binds each fragment's name in
/// the host environment.
pub fn install(fragments: &mut Fragments, env: &mut StaticEnv, interner: &mut Rodeo) {
	add(fragments, env, interner, Rc::new(unit::UnitFragment));
	add(fragments, env, interner, Rc::new(boolean::BooleanFragment));
	add(fragments, env, interner, Rc::new(num::NumFragment));
	add(fragments, env, interner, Rc::new(ieee::IeeeFragment));
	add(fragments, env, interner, Rc::new(string::StringFragment));
	add(fragments, env, interner, Rc::new(tpl::TplFragment { sorted: false }));
	add(fragments, env, interner, Rc::new(tpl::TplFragment { sorted: true }));
	add(fragments, env, interner, Rc::new(fun::FunFragment));
	add(fragments, env, interner, Rc::new(py::PyFragment));
}
