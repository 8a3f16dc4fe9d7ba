//! Directory walking and inclusion filters

mod filter;
mod walker;

pub use filter::PathFilter;
pub use walker::{MaxDepth, TreeWalker, WalkIter, WalkedFile};

pub(crate) use walker::{accept_entry, base_walk_builder, walk_error};
