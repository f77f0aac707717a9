#![forbid(unsafe_code)]

mod cmd;
mod config;
mod output;
mod report;
mod timing;

use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use timing::TimingReport;
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "sccdag: strongly connected components, condensation and DAG paths",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit per-stage counters and timings to stderr.
    #[arg(long, global = true)]
    timing: bool,

    /// Output format (default: pretty on a terminal, text when piped).
    #[arg(long, global = true, value_enum, value_name = "FORMAT")]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Config file (default: $SCCDAG_CONFIG, then ./sccdag.toml).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Analysis",
        about = "Run the full analysis report",
        long_about = "Find strongly connected components, build the condensation DAG, order it, \
                      and solve shortest and longest (critical) paths from the source component.",
        after_help = "EXAMPLES:\n    # Full report for a task graph\n    sccdag analyze tasks.json\n\n    # Start from vertex 4 instead of the file's source\n    sccdag analyze tasks.json --source 4\n\n    # Emit machine-readable output\n    sccdag analyze tasks.json --format json"
    )]
    Analyze(cmd::analyze::AnalyzeArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "List strongly connected components",
        long_about = "List the strongly connected components of the graph with their sizes and members.",
        after_help = "EXAMPLES:\n    # Components only\n    sccdag scc tasks.json\n\n    # One tab-separated row per component\n    sccdag scc tasks.json --format text"
    )]
    Scc(cmd::scc::SccArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "Print the condensation DAG",
        long_about = "Collapse every strongly connected component to one vertex and print the \
                      resulting DAG's edges. Parallel edges between two components keep the \
                      first-seen weight.",
        after_help = "EXAMPLES:\n    # Condensation edges\n    sccdag condense tasks.json\n\n    # Emit machine-readable output\n    sccdag condense tasks.json --format json"
    )]
    Condense(cmd::condense::CondenseArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "Topologically sort the graph",
        long_about = "Topologically sort the condensation DAG and expand it to a vertex order. \
                      With --raw, sort the input graph itself and fail if it has a cycle.",
        after_help = "EXAMPLES:\n    # Component order plus derived vertex order\n    sccdag topo tasks.json\n\n    # Sort the input graph directly\n    sccdag topo dag.json --raw"
    )]
    Topo(cmd::topo::TopoArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "Solve single-source paths",
        long_about = "Solve single-source shortest or longest paths over the condensation DAG, \
                      starting from the component that contains the source vertex.",
        after_help = "EXAMPLES:\n    # Shortest distances and paths\n    sccdag paths tasks.json\n\n    # Longest path to the component holding vertex 7\n    sccdag paths tasks.json --longest --target 7\n\n    # Override the source vertex\n    sccdag paths tasks.json --source 0"
    )]
    Paths(cmd::paths::PathsArgs),

    #[command(
        next_help_heading = "Shell",
        about = "Generate shell completion scripts",
        long_about = "Generate shell completion scripts for supported shells.",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    sccdag completions bash\n\n    # Generate zsh completions\n    sccdag completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn default_filter(verbose: bool, quiet: bool, debug_env: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose || debug_env {
        "sccdag=debug,info"
    } else {
        "sccdag=info,warn"
    }
}

fn init_tracing(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_env("SCCDAG_LOG").unwrap_or_else(|_| {
        EnvFilter::new(default_filter(verbose, quiet, env::var("DEBUG").is_ok()))
    });

    let format = env::var("SCCDAG_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn run(cli: &Cli, output: OutputMode, timing: &mut TimingReport) -> anyhow::Result<()> {
    let load_config = || config::load_config(cli.config.as_deref());

    match &cli.command {
        Commands::Analyze(args) => cmd::analyze::run_analyze(args, output, &load_config()?, timing),
        Commands::Scc(args) => cmd::scc::run_scc(args, output, &load_config()?, timing),
        Commands::Condense(args) => cmd::condense::run_condense(args, output, &load_config()?, timing),
        Commands::Topo(args) => cmd::topo::run_topo(args, output, &load_config()?, timing),
        Commands::Paths(args) => cmd::paths::run_paths(args, output, &load_config()?, timing),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}

fn print_timing(report: &TimingReport) {
    if report.is_empty() {
        eprintln!("timing report: no stages recorded");
        return;
    }
    eprintln!("timing report:");
    eprintln!("{}", report.display_table());
    match serde_json::to_string_pretty(&report.to_json()) {
        Ok(json) => {
            eprintln!("timing report (json):");
            eprintln!("{json}");
        }
        Err(err) => warn!(%err, "failed to serialize timing report"),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let output = cli.output_mode();
    let timing_enabled = cli.timing || timing::timing_enabled_from_env();
    let mut timings = TimingReport::new();

    let command_result = run(&cli, output, &mut timings);

    if timing_enabled {
        print_timing(&timings);
    }

    match command_result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(error = ?err, "command failed");
            if render_error(output, &CliError::from_anyhow(&err)).is_err() {
                eprintln!("error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}
