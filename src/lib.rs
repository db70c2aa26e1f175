//! A host-embedded typechecking and elaboration toolkit. Type systems are
//! assembled from fragments, each owning the rules of one type constructor;
//! the engine threads bidirectional judgments between them and translates
//! well-typed components back into host syntax.

pub mod common;
pub mod component;
pub mod elaborate;
pub mod fragment;
pub mod ir;
pub mod prelude;
pub mod report;
pub mod unparse;
pub mod utility;
