use lasso::Rodeo;

use crate::{
	elaborate::error::{ElabError, ElabErrorKind},
	fragment::Fragments,
	unparse::pretty_print_ty,
};

pub fn report_elaboration_error(source: &str, interner: &Rodeo, fragments: &Fragments, error: ElabError) {
	report_line_error(source, error.range, &display_error(error.kind, interner, fragments));
}

fn report_line_error(source: &str, range: (usize, usize), error_string: &str) {
	const TAB_WIDTH: usize = 3;
	// SAFETY: Repeated spaces form a valid string.
	const TAB_REPLACEMENT: &str = unsafe { std::str::from_utf8_unchecked(&[b' '; TAB_WIDTH]) };

	let mut lines = source.split_inclusive('\n');
	let mut line_number: usize = 0;
	let mut bytes_left = range.0;
	let (line, bytes_left, width) = loop {
		if let Some(line) = lines.next() {
			line_number += 1;
			if line.len() <= bytes_left {
				bytes_left -= line.len();
			} else {
				break (line, bytes_left, (range.1 - range.0).max(1));
			}
		} else {
			// This is a cold path, so this is fine.
			let (i, last) = source.split('\n').enumerate().last().unwrap_or((0, source));
			line_number = i + 1;
			break (last, last.len(), 1);
		}
	};

	print!("[{}:{}] ", line_number, bytes_left);
	println!("error: {error_string}");

	let visual_line = line.replace('\t', TAB_REPLACEMENT).trim_end().to_owned();
	let visual_offset: usize =
		unicode_width::UnicodeWidthStr::width(line[0..bytes_left].replace('\t', TAB_REPLACEMENT).as_str());

	let displayed_line_number = line_number.to_string();
	let dummy_line_number = " ".repeat(displayed_line_number.len());
	println!("{} |", dummy_line_number);
	println!("{} | {}", displayed_line_number, visual_line);
	println!("{} | {}{}", dummy_line_number, " ".repeat(visual_offset), "^".repeat(width));
}

fn display_error(kind: ElabErrorKind, interner: &Rodeo, fragments: &Fragments) -> String {
	match kind {
		ElabErrorKind::TyMismatch { expected, got } => format!(
			"type mismatch\nexpected: {}\nfound: {}",
			pretty_print_ty(&expected, interner, fragments),
			pretty_print_ty(&got, interner, fragments)
		),
		ElabErrorKind::TypeFormation(message) => format!("type formation error: {message}"),
		ElabErrorKind::TypeValidation(message) => format!("type validation error: {message}"),
		ElabErrorKind::Kind(message) => format!("kind error: {message}"),
		ElabErrorKind::Ty(message) => format!("type error: {message}"),
		ElabErrorKind::ComponentFormation(message) => format!("component formation error: {message}"),
		ElabErrorKind::Fragment(message) => format!("fragment error: {message}"),
		ElabErrorKind::Usage(message) => format!("usage error: {message}"),
		ElabErrorKind::Internal(message) => format!("internal error: {message}"),
	}
}
