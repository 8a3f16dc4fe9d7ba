//! Core type definitions for contentcopy

mod digest;
mod error;
mod index;
mod plan;

pub use digest::FileHash;
pub use error::MergeError;
pub use index::{ContentIndex, IndexStats};
pub use plan::{CopyPlanEntry, DiffEntry, FailurePolicy, MergeDiff, MergeDirection};
