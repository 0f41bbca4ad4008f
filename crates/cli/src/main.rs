//! Branch predictor simulator CLI.
//!
//! This binary provides a single entry point for all simulation modes. It performs:
//! 1. **Run:** Feed one workload or trace file through the configured predictor and print statistics.
//! 2. **Compare:** Feed the same stream through every predictor and print one accuracy line each.
//! 3. **Record:** Write a workload's branch stream to a JSON trace file.
//! 4. **List:** Show the available workloads.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process;

use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use bpsim_core::bru::BranchPredictorWrapper;
use bpsim_core::config::{BranchPredictor, Config};
use bpsim_core::sim::{BranchEvent, Simulator, Workload, load_trace, save_trace};
use bpsim_core::stats::STATS_SECTIONS;

#[derive(Parser, Debug)]
#[command(
    name = "bpsim",
    author,
    version,
    about = "Perceptron branch predictor simulator",
    long_about = "Replay benchmark branch streams or trace files through a perceptron, gshare, or static predictor.\n\nExamples:\n  bpsim run --workload pattern\n  bpsim run --trace run.json --config bp.json --latency 4\n  bpsim compare --workload aliasing\n  bpsim record --workload bubblesort --output sort.json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one stream through the configured predictor.
    Run {
        #[command(flatten)]
        source: Source,

        /// JSON configuration file (defaults are used for omitted fields).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the predictor selected in the configuration.
        #[arg(short, long, value_parser = parse_predictor)]
        predictor: Option<BranchPredictor>,

        /// Override the fetch-to-resolve distance in branches.
        #[arg(short, long)]
        latency: Option<usize>,

        /// Statistics sections to print (summary, branch, sites); all when omitted.
        #[arg(long = "stats", value_parser = PossibleValuesParser::new(STATS_SECTIONS.iter().copied()))]
        sections: Vec<String>,
    },

    /// Run one stream through every predictor and compare accuracy.
    Compare {
        #[command(flatten)]
        source: Source,

        /// JSON configuration file (defaults are used for omitted fields).
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write a workload's branch stream to a trace file.
    Record {
        /// Workload to record.
        #[arg(short, long)]
        workload: Workload,

        /// Output trace file.
        #[arg(short, long)]
        output: PathBuf,
    },

    /// List the available workloads.
    List,
}

/// Where the branch stream comes from.
#[derive(Args, Debug)]
struct Source {
    /// Built-in benchmark workload.
    #[arg(short, long, conflicts_with = "trace", default_value = "pattern")]
    workload: Workload,

    /// JSON trace file to replay instead of a workload.
    #[arg(short, long)]
    trace: Option<PathBuf>,
}

impl Source {
    /// Loads the trace file if given, otherwise runs the workload.
    fn events(&self) -> Result<Vec<BranchEvent>, Box<dyn Error>> {
        if let Some(path) = &self.trace {
            info!(path = %path.display(), "loading trace");
            Ok(load_trace(path)?)
        } else {
            let run = self.workload.run();
            info!(
                workload = %self.workload,
                branches = run.events.len(),
                checksum = run.checksum,
                "workload generated"
            );
            Ok(run.events)
        }
    }
}

fn parse_predictor(s: &str) -> Result<BranchPredictor, String> {
    BranchPredictor::ALL
        .into_iter()
        .find(|bp| bp.as_str().eq_ignore_ascii_case(s))
        .ok_or_else(|| format!("unknown predictor '{s}' (expected perceptron, gshare, or static)"))
}

fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn Error>> {
    match path {
        Some(p) => {
            info!(path = %p.display(), "loading config");
            Ok(Config::from_file(p)?)
        }
        None => Ok(Config::default()),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            source,
            config,
            predictor,
            latency,
            sections,
        } => cmd_run(&source, config.as_deref(), predictor, latency, &sections),
        Commands::Compare { source, config } => cmd_compare(&source, config.as_deref()),
        Commands::Record { workload, output } => cmd_record(workload, &output),
        Commands::List => {
            cmd_list();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("[!] FATAL: {e}");
        process::exit(1);
    }
}

/// Runs one stream and prints the requested statistics sections.
fn cmd_run(
    source: &Source,
    config_path: Option<&Path>,
    predictor: Option<BranchPredictor>,
    latency: Option<usize>,
    sections: &[String],
) -> Result<(), Box<dyn Error>> {
    let mut config = load_config(config_path)?;
    if let Some(bp) = predictor {
        config.predictor.branch_predictor = bp;
    }
    if let Some(l) = latency {
        config.general.resolve_latency = l;
    }

    let events = source.events()?;
    let mut sim = Simulator::new(&config)?;

    println!(
        "Predictor: {}  Resolve latency: {}",
        config.predictor.branch_predictor.as_str(),
        config.general.resolve_latency
    );
    if config.predictor.branch_predictor == BranchPredictor::Perceptron {
        let p = &config.predictor.perceptron;
        println!(
            "  Perceptrons: {}  History: {}  Weight bits: {}  Threshold: {}",
            p.num_perceptrons, p.history_length, p.weight_bits, p.training_threshold
        );
    }

    sim.run(events).print_sections(sections);
    Ok(())
}

/// Runs one stream through every predictor.
fn cmd_compare(source: &Source, config_path: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let config = load_config(config_path)?;
    let events = source.events()?;

    println!("{:<12} {:>10} {:>12} {:>10}", "predictor", "lookups", "mispredicts", "accuracy");
    for kind in BranchPredictor::ALL {
        let predictor = BranchPredictorWrapper::with_kind(kind, &config.predictor)?;
        let mut sim = Simulator::with_predictor(predictor, &config.general);
        let stats = sim.run(events.iter().copied());
        println!(
            "{:<12} {:>10} {:>12} {:>9.2}%",
            kind.as_str(),
            stats.lookups(),
            stats.branch_mispredictions,
            stats.accuracy() * 100.0
        );
    }
    Ok(())
}

/// Writes a workload's stream to a trace file.
fn cmd_record(workload: Workload, output: &Path) -> Result<(), Box<dyn Error>> {
    let run = workload.run();
    save_trace(output, &run.events)?;
    println!(
        "[*] Wrote {} branches of '{}' to {} (checksum {})",
        run.events.len(),
        workload,
        output.display(),
        run.checksum
    );
    Ok(())
}

fn cmd_list() {
    for w in Workload::ALL {
        println!("  {:<12} {}", w.name(), w.description());
    }
}
