//! Merge planning - what is missing and where it goes

mod compare;
mod naming;

pub use compare::{compute_merge_diff, difference};
pub use naming::{split_file_name, suffixed_name, NameResolver};
