use clap::Parser;
use contentcopy::config::Cli;
use contentcopy::logging::init_logging;
use contentcopy::{Config, TracingLog};
use indicatif::HumanBytes;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet)?;

    // Convert CLI args to Config - this validates immediately
    let config = Config::try_from(cli).inspect_err(|e| tracing::error!("{}", e))?;

    let summary = contentcopy::commands::merge::run(&config, &TracingLog)
        .inspect_err(|e| tracing::error!("{}", e))?;

    if config.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        tracing::info!(
            "{} of {} missing files copied ({})",
            summary.stats.copied,
            summary.missing,
            HumanBytes(summary.stats.bytes_copied)
        );
    }

    summary.check()?;
    Ok(())
}
