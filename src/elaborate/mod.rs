pub mod context;
pub mod error;
pub mod pattern;
pub mod scope;
pub mod types;
