//! Executor - applies a merge diff to the destination root

pub mod copy;

pub use copy::{claim_destination, fill_destination};

use crate::diff::NameResolver;
use crate::report::{MergeEvent, MergeLog};
use crate::types::{CopyPlanEntry, FailurePolicy, MergeDiff, MergeError};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// How a diff is applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecuteOptions {
    /// Plan and log only
    pub dry_run: bool,

    /// Abort on the first failure, or keep going
    pub failure_policy: FailurePolicy,
}

/// Counters for one execution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionStats {
    /// Entries in the diff
    pub planned: usize,
    /// Entries copied (or that would be copied, in a dry run)
    pub copied: usize,
    /// Entries that needed a `_<n>` suffix
    pub renamed: usize,
    /// Entries that failed
    pub failed: usize,
    /// Bytes written
    pub bytes_copied: u64,
}

/// A failed entry kept for the summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyFailure {
    pub original: PathBuf,
    pub message: String,
}

/// Outcome of applying a diff
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionReport {
    pub stats: ExecutionStats,
    pub plan: Vec<CopyPlanEntry>,
    pub failures: Vec<CopyFailure>,
}

/// Copy every diff entry into `destination_root`
///
/// Entries are handled one at a time in diff order. Each gets a
/// collision-free name from a single [`NameResolver`], so no two entries
/// share an output. A dry run makes the same naming decisions and emits the
/// same events but never touches the filesystem.
///
/// With [`FailurePolicy::Abort`] the first failure is logged and returned.
/// With [`FailurePolicy::Continue`] a per-file failure is logged, recorded
/// in the report and the remaining entries are still processed; the name it
/// had claimed becomes available to later entries. Other errors still abort.
pub fn execute_merge(
    diff: &MergeDiff,
    destination_root: &Path,
    options: &ExecuteOptions,
    log: &dyn MergeLog,
) -> Result<ExecutionReport, MergeError> {
    let mut report = ExecutionReport::default();
    report.stats.planned = diff.len();
    let mut resolver = NameResolver::new(destination_root);

    for entry in diff.iter() {
        match execute_entry(&entry.path, &mut resolver, options.dry_run, log) {
            Ok((planned, bytes)) => {
                report.stats.copied += 1;
                report.stats.bytes_copied += bytes;
                if planned.renamed {
                    report.stats.renamed += 1;
                }
                report.plan.push(planned);
            }
            Err(err) => {
                log.record(&MergeEvent::CopyFailed {
                    from: entry.path.clone(),
                    message: err.to_string(),
                });
                if options.failure_policy == FailurePolicy::Abort || !err.is_per_file() {
                    return Err(err);
                }
                // The partial file is gone, so its name is free again
                if let MergeError::Copy { to, .. } = &err {
                    resolver.release(to);
                }
                report.stats.failed += 1;
                report.failures.push(CopyFailure {
                    original: entry.path.clone(),
                    message: err.to_string(),
                });
            }
        }
    }

    Ok(report)
}

fn execute_entry(
    original: &Path,
    resolver: &mut NameResolver,
    dry_run: bool,
    log: &dyn MergeLog,
) -> Result<(CopyPlanEntry, u64), MergeError> {
    if dry_run {
        let planned = resolver.resolve(original)?;
        log_decision(&planned, log);
        return Ok((planned, 0));
    }

    let (planned, dest_file) = claim_destination(resolver, original)?;
    log_decision(&planned, log);
    let bytes = fill_destination(&planned, dest_file)?;
    Ok((planned, bytes))
}

fn log_decision(planned: &CopyPlanEntry, log: &dyn MergeLog) {
    if planned.renamed {
        if let (Some(from), Some(to)) = (
            planned.original.file_name(),
            planned.destination.file_name(),
        ) {
            log.record(&MergeEvent::Renamed {
                from: from.to_owned(),
                to: to.to_owned(),
            });
        }
    }

    log.record(&MergeEvent::Copying {
        from: planned.original.clone(),
        to: planned.destination.clone(),
    });
}
