//! # contentcopy - content-addressed directory merge
//!
//! Copies into a destination tree only the files whose content it does not
//! already hold, flattening them into the destination root and suffixing
//! names (`photo_1.jpg`, `photo_2.jpg`, ...) when they collide.
//!
//! The pipeline runs one way: walk ([`scanner`]) → hash and index
//! ([`index`]) → diff and name ([`diff`]) → copy ([`executor`]).

pub mod commands;
pub mod config;
pub mod diff;
pub mod executor;
pub mod hash;
pub mod index;
pub mod logging;
pub mod report;
pub mod scanner;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use report::{MemoryLog, MergeEvent, MergeLog, TracingLog};
pub use types::{ContentIndex, CopyPlanEntry, FileHash, MergeDiff, MergeDirection, MergeError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
