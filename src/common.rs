use std::sync::atomic::{AtomicU32, Ordering};

use lasso::Spur;

pub type Name = Spur;
pub type Label = Name;

/// A unique identifier minted for one bound occurrence of a term or type identifier.
/// Uniques are never reused within a component; translations refer to identifiers
/// exclusively through the name minted alongside their unique.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Uniq(pub u32);

/// The identity of a surface AST node, used to key the annotation table.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(u32);

static NEXT_NODE: AtomicU32 = AtomicU32::new(0);

impl NodeId {
	pub fn fresh() -> Self { Self(NEXT_NODE.fetch_add(1, Ordering::Relaxed)) }
}
