use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use freightlens_analysis::AnalysisPipeline;
use freightlens_core::config::CliOverrides;
use freightlens_core::{FreightlensConfig, FreightlensErrorCode};
use freightlens_io::{CsvSnapshotSource, DeliverySource, JsonReportWriter, ReportSink};

#[derive(Parser)]
#[command(name = "freightlens", about = "Per-hub causal analysis of delivery delay")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the snapshot, run every hypothesis for every hub, write the report
    Run(RunArgs),

    /// Print the effective configuration as TOML
    Config {
        /// Project root holding freightlens.toml
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Project root holding freightlens.toml
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Directory containing the CSV snapshot
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Report file to write
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Process hubs one at a time
    #[arg(long)]
    sequential: bool,

    /// Worker threads for parallel hub processing
    #[arg(long)]
    threads: Option<usize>,
}

impl RunArgs {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            data_dir: self.data_dir.clone(),
            output_path: self.output.clone(),
            parallel: self.sequential.then_some(false),
            threads: self.threads,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    freightlens_core::tracing::init_tracing();

    match dispatch(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn dispatch(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Run(args) => run(&args),
        Commands::Config { root } => {
            let config = FreightlensConfig::load(&root, None)
                .map_err(|e| anyhow::anyhow!(e.coded_string()))?;
            let rendered = config
                .to_toml()
                .map_err(|e| anyhow::anyhow!(e.coded_string()))?;
            print!("{rendered}");
            Ok(())
        }
    }
}

fn run(args: &RunArgs) -> anyhow::Result<()> {
    let config = FreightlensConfig::load(&args.root, Some(&args.overrides()))
        .map_err(|e| anyhow::anyhow!(e.coded_string()))
        .context("loading configuration")?;

    let dataset = CsvSnapshotSource::from_config(&config.input)
        .load()
        .map_err(|e| anyhow::anyhow!(e.coded_string()))
        .context("loading input snapshot")?;

    let output = AnalysisPipeline::new(&config)
        .run(&dataset)
        .map_err(|e| anyhow::anyhow!(e.coded_string()))
        .context("running analysis")?;

    let writer = JsonReportWriter::from_config(&config.output);
    writer
        .write(&output.report.findings)
        .map_err(|e| anyhow::anyhow!(e.coded_string()))
        .context("writing report")?;

    tracing::debug!(diagnostics = ?output.diagnostics, "run diagnostics");
    println!(
        "Analysis complete: {} findings written to {}",
        output.report.findings.len(),
        writer.path().display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "freightlens",
            "run",
            "--data-dir",
            "snap",
            "-o",
            "out.json",
            "--sequential",
            "--threads",
            "3",
        ])
        .unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        let overrides = args.overrides();
        assert_eq!(overrides.data_dir, Some(PathBuf::from("snap")));
        assert_eq!(overrides.output_path, Some(PathBuf::from("out.json")));
        assert_eq!(overrides.parallel, Some(false));
        assert_eq!(overrides.threads, Some(3));
    }

    #[test]
    fn test_parallel_is_left_to_config_without_flag() {
        let cli = Cli::try_parse_from(["freightlens", "run"]).unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.root, PathBuf::from("."));
        assert_eq!(args.overrides().parallel, None);
    }

    #[test]
    fn test_config_subcommand_parses() {
        let cli = Cli::try_parse_from(["freightlens", "config", "--root", "/tmp"]).unwrap();
        assert!(matches!(cli.command, Commands::Config { .. }));
    }
}
