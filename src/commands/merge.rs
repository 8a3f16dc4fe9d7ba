//! Main merge command

use crate::diff::compute_merge_diff;
use crate::executor::{execute_merge, CopyFailure, ExecuteOptions, ExecutionStats};
use crate::index::{index_tree, index_tree_parallel};
use crate::report::{MergeEvent, MergeLog};
use crate::scanner::MaxDepth;
use crate::types::{ContentIndex, CopyPlanEntry, MergeDirection, MergeError};
use crate::Config;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// What a merge run did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeSummary {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub direction: MergeDirection,
    pub dry_run: bool,
    /// Distinct contents found in the source
    pub source_contents: usize,
    /// Distinct contents found in the destination
    pub destination_contents: usize,
    /// Entries whose content was missing on the receiving side
    pub missing: usize,
    pub stats: ExecutionStats,
    pub plan: Vec<CopyPlanEntry>,
    pub failures: Vec<CopyFailure>,
}

impl MergeSummary {
    /// Turn recorded copy failures into an error
    pub fn check(&self) -> Result<(), MergeError> {
        if self.stats.failed > 0 {
            return Err(MergeError::PartialFailure {
                failed: self.stats.failed,
                total: self.stats.planned,
            });
        }
        Ok(())
    }
}

/// Run the merge pipeline: index both trees, diff, then copy
///
/// Every step reports through `log`. With `config.threads > 1` both trees
/// are indexed at the same time and hashing within each tree is spread over
/// the workers; both indexes are complete before diffing starts. Copying is
/// always done by this thread alone.
pub fn run(config: &Config, log: &dyn MergeLog) -> Result<MergeSummary, MergeError> {
    let filter = config.path_filter()?;
    let predicate = |path: &Path| filter.includes(path);

    let (source_index, destination_index) = if config.threads > 1 {
        log.record(&MergeEvent::IndexStarted {
            root: config.source.clone(),
        });
        log.record(&MergeEvent::IndexStarted {
            root: config.destination.clone(),
        });

        let per_tree = (config.threads / 2).max(1);
        let (source_result, destination_result) = std::thread::scope(|scope| {
            let source_job = scope.spawn(|| {
                index_tree_parallel(&config.source, config.max_depth, &predicate, per_tree)
            });
            let destination_result = index_tree_parallel(
                &config.destination,
                config.max_depth,
                &predicate,
                per_tree,
            );
            let source_result = source_job.join().unwrap_or_else(|_| {
                Err(MergeError::Validation(
                    "Source indexing thread panicked".to_string(),
                ))
            });
            (source_result, destination_result)
        });

        let source_index = source_result?;
        let destination_index = destination_result?;
        log_indexed(&source_index, log);
        log_indexed(&destination_index, log);
        (source_index, destination_index)
    } else {
        let source_index = index_logged(&config.source, config.max_depth, &predicate, log)?;
        let destination_index =
            index_logged(&config.destination, config.max_depth, &predicate, log)?;
        (source_index, destination_index)
    };

    let diff = compute_merge_diff(&source_index, &destination_index, config.direction);

    let options = ExecuteOptions {
        dry_run: config.dry_run,
        failure_policy: config.failure_policy,
    };
    let report = execute_merge(&diff, &config.destination, &options, log)?;

    log.record(&MergeEvent::Completed {
        stats: report.stats.clone(),
        dry_run: config.dry_run,
    });

    Ok(MergeSummary {
        source: config.source.clone(),
        destination: config.destination.clone(),
        direction: config.direction,
        dry_run: config.dry_run,
        source_contents: source_index.len(),
        destination_contents: destination_index.len(),
        missing: diff.len(),
        stats: report.stats,
        plan: report.plan,
        failures: report.failures,
    })
}

fn index_logged<F>(
    root: &Path,
    max_depth: MaxDepth,
    predicate: &F,
    log: &dyn MergeLog,
) -> Result<ContentIndex, MergeError>
where
    F: Fn(&Path) -> bool,
{
    log.record(&MergeEvent::IndexStarted {
        root: root.to_path_buf(),
    });
    let index = index_tree(root, max_depth, predicate)?;
    log_indexed(&index, log);
    Ok(index)
}

fn log_indexed(index: &ContentIndex, log: &dyn MergeLog) {
    log.record(&MergeEvent::IndexFinished {
        root: index.root_path.clone(),
        files: index.stats.files_indexed,
        distinct: index.len(),
        duration: index.stats.duration,
    });
}
