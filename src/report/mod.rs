//! Merge events and the logging sinks that receive them
//!
//! The pipeline never reaches for a global logger. Callers hand a
//! [`MergeLog`] to [`crate::commands::merge::run`] and every step reports
//! through it.

mod memory;

pub use memory::{LogLine, MemoryLog};

use crate::executor::ExecutionStats;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Something worth a log line
#[derive(Debug, Clone, PartialEq)]
pub enum MergeEvent {
    /// Indexing of a tree started
    IndexStarted { root: PathBuf },

    /// Indexing of a tree finished
    IndexFinished {
        root: PathBuf,
        files: usize,
        distinct: usize,
        duration: Duration,
    },

    /// The base name was taken and a suffixed one was chosen
    Renamed { from: OsString, to: OsString },

    /// A file is being copied (or would be, in a dry run)
    Copying { from: PathBuf, to: PathBuf },

    /// Copying a file failed
    CopyFailed { from: PathBuf, message: String },

    /// The run finished
    Completed { stats: ExecutionStats, dry_run: bool },
}

/// Severity of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
    Warn,
}

impl MergeEvent {
    pub fn level(&self) -> Level {
        match self {
            MergeEvent::IndexFinished { .. } => Level::Debug,
            MergeEvent::CopyFailed { .. } => Level::Warn,
            _ => Level::Info,
        }
    }
}

impl fmt::Display for MergeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeEvent::IndexStarted { root } => write!(f, "indexing {}", root.display()),
            MergeEvent::IndexFinished {
                root,
                files,
                distinct,
                duration,
            } => write!(
                f,
                "indexed {}: {} files, {} distinct in {:.2?}",
                root.display(),
                files,
                distinct,
                duration
            ),
            MergeEvent::Renamed { from, to } => write!(
                f,
                "file exists, renaming {} to {}",
                from.to_string_lossy(),
                to.to_string_lossy()
            ),
            MergeEvent::Copying { from, to } => {
                write!(f, "copying {} => {}", from.display(), to.display())
            }
            MergeEvent::CopyFailed { from, message } => {
                write!(f, "failed to copy {}: {}", from.display(), message)
            }
            MergeEvent::Completed { stats, dry_run } => {
                write!(
                    f,
                    "done: {} copied, {} renamed, {} failed",
                    stats.copied, stats.renamed, stats.failed
                )?;
                if *dry_run {
                    f.write_str(" (dry run, nothing written)")?;
                }
                Ok(())
            }
        }
    }
}

/// Receiver of merge events
pub trait MergeLog: Send + Sync {
    fn record(&self, event: &MergeEvent);
}

/// Forwards events to `tracing`; timestamps come from the installed subscriber
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl MergeLog for TracingLog {
    fn record(&self, event: &MergeEvent) {
        match event.level() {
            Level::Debug => tracing::debug!("{}", event),
            Level::Info => tracing::info!("{}", event),
            Level::Warn => tracing::warn!("{}", event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_line_format() {
        let event = MergeEvent::Copying {
            from: PathBuf::from("/src/a.txt"),
            to: PathBuf::from("/dst/a.txt"),
        };
        assert_eq!(event.to_string(), "copying /src/a.txt => /dst/a.txt");
        assert_eq!(event.level(), Level::Info);
    }

    #[test]
    fn test_rename_line_format() {
        let event = MergeEvent::Renamed {
            from: OsString::from("photo.jpg"),
            to: OsString::from("photo_1.jpg"),
        };
        assert_eq!(
            event.to_string(),
            "file exists, renaming photo.jpg to photo_1.jpg"
        );
    }

    #[test]
    fn test_completed_marks_dry_run() {
        let stats = ExecutionStats {
            planned: 3,
            copied: 3,
            renamed: 1,
            ..Default::default()
        };
        let real = MergeEvent::Completed {
            stats: stats.clone(),
            dry_run: false,
        };
        let dry = MergeEvent::Completed {
            stats,
            dry_run: true,
        };

        assert_eq!(real.to_string(), "done: 3 copied, 1 renamed, 0 failed");
        assert!(dry.to_string().ends_with("(dry run, nothing written)"));
    }

    #[test]
    fn test_failure_is_warning() {
        let event = MergeEvent::CopyFailed {
            from: PathBuf::from("x"),
            message: "disk full".to_string(),
        };
        assert_eq!(event.level(), Level::Warn);
        assert!(event.to_string().contains("disk full"));
    }
}
