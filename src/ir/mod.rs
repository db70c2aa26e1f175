pub mod ast;
pub mod ty;
