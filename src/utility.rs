macro_rules! bx {
	($x:expr) => {
		::std::boxed::Box::new($x)
	};
}

pub(crate) use bx;

macro_rules! rc {
	($x:expr) => {
		::std::rc::Rc::new($x)
	};
}

pub(crate) use rc;

pub fn write_separated<T>(
	f: &mut String,
	separator: &str,
	items: impl IntoIterator<Item = T>,
	mut each: impl FnMut(&mut String, T) -> std::fmt::Result,
) -> std::fmt::Result {
	let mut is_first = true;
	for item in items {
		if !is_first {
			use std::fmt::Write;
			f.write_str(separator)?;
		}
		is_first = false;
		each(f, item)?;
	}
	Ok(())
}
