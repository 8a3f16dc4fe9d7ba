//! Configuration management

mod file;

pub use file::ConfigFile;

use crate::scanner::{MaxDepth, PathFilter};
use crate::types::{FailurePolicy, MergeDirection, MergeError};
use clap::Parser;
use std::path::PathBuf;

/// Merge two folders based on file content hash
#[derive(Debug, Clone, Parser)]
#[command(name = "contentcopy", version, about)]
pub struct Cli {
    /// Tree whose content counts as "already present"
    pub source: PathBuf,

    /// Tree that receives the copies, flattened into its root
    pub destination: PathBuf,

    /// Plan and log every copy without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Skip files with this extension (repeatable), e.g. `--exclude-ext mp4`
    #[arg(long = "exclude-ext", value_name = "EXT")]
    pub exclude_extensions: Vec<String>,

    /// Skip files matching this glob (repeatable)
    #[arg(long = "exclude", value_name = "GLOB")]
    pub exclude_patterns: Vec<String>,

    /// Only consider files less than N directories below each root
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Which tree is scanned for new content
    #[arg(long, value_enum)]
    pub direction: Option<MergeDirection>,

    /// Worker threads for hashing (1 = fully sequential)
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// Log failed copies and continue instead of aborting
    #[arg(long)]
    pub keep_going: bool,

    /// TOML file with defaults for the options above
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the final summary as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// More log output (repeat for trace)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Global configuration for a merge run
#[derive(Debug, Clone)]
pub struct Config {
    /// Source directory
    pub source: PathBuf,

    /// Destination directory
    pub destination: PathBuf,

    /// Dry run (log the plan, don't copy)
    pub dry_run: bool,

    /// Excluded file extensions
    pub exclude_extensions: Vec<String>,

    /// Excluded glob patterns
    pub exclude_patterns: Vec<String>,

    /// Walk depth bound
    pub max_depth: MaxDepth,

    /// Diff direction
    pub direction: MergeDirection,

    /// Number of hashing threads
    pub threads: usize,

    /// Behaviour on copy failure
    pub failure_policy: FailurePolicy,

    /// Print JSON summary
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            destination: PathBuf::new(),
            dry_run: false,
            exclude_extensions: Vec::new(),
            exclude_patterns: Vec::new(),
            max_depth: MaxDepth::Unbounded,
            direction: MergeDirection::default(),
            threads: 1,
            failure_policy: FailurePolicy::Abort,
            json: false,
        }
    }
}

impl Config {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), MergeError> {
        if !self.source.is_dir() {
            return Err(MergeError::Config(format!(
                "Source is not a directory: {}",
                self.source.display()
            )));
        }

        if !self.destination.is_dir() {
            return Err(MergeError::Config(format!(
                "Destination is not a directory: {}",
                self.destination.display()
            )));
        }

        let same = match (self.source.canonicalize(), self.destination.canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => self.source == self.destination,
        };
        if same {
            return Err(MergeError::Config(
                "Source and destination cannot be the same".to_string(),
            ));
        }

        if self.threads == 0 {
            return Err(MergeError::Validation(
                "Thread count must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Inclusion predicate built from the exclusion options
    pub fn path_filter(&self) -> Result<PathFilter, MergeError> {
        PathFilter::new()
            .with_excluded_extensions(&self.exclude_extensions)
            .with_excluded_globs(&self.exclude_patterns)
    }

    /// Layer a config file under the current values
    ///
    /// Values already set away from their defaults are kept; lists are merged.
    pub fn apply_file(&mut self, file: &ConfigFile) {
        if !self.dry_run {
            self.dry_run = file.dry_run.unwrap_or(false);
        }
        self.exclude_extensions
            .extend(file.exclude_extensions.iter().cloned());
        self.exclude_patterns.extend(file.exclude.iter().cloned());
        if self.max_depth == MaxDepth::Unbounded {
            self.max_depth = MaxDepth::from(file.max_depth);
        }
        if let Some(threads) = file.threads {
            self.threads = threads;
        }
        if let Some(direction) = file.direction {
            self.direction = direction;
        }
        if file.keep_going.unwrap_or(false) {
            self.failure_policy = FailurePolicy::Continue;
        }
    }
}

impl TryFrom<Cli> for Config {
    type Error = MergeError;

    /// CLI values win over file values, file values win over defaults
    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let mut config = Config {
            source: cli.source,
            destination: cli.destination,
            dry_run: cli.dry_run,
            exclude_extensions: cli.exclude_extensions,
            exclude_patterns: cli.exclude_patterns,
            max_depth: MaxDepth::from(cli.max_depth),
            json: cli.json,
            ..Config::default()
        };

        if let Some(path) = &cli.config {
            let file = ConfigFile::load(path)?;
            config.apply_file(&file);
        }

        if let Some(direction) = cli.direction {
            config.direction = direction;
        }
        if let Some(threads) = cli.threads {
            config.threads = threads;
        }
        if cli.keep_going {
            config.failure_policy = FailurePolicy::Continue;
        }

        config.path_filter()?;
        config.validate()?;
        Ok(config)
    }
}
