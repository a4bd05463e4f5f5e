use analytics::{ValueChainEngine, ValueChainReport};
use analyzer::{Advisor, Recommendation};
use anyhow::{Context, bail};
use charts::ChartSize;
use clap::{Args, Parser, Subcommand};
use configuration::Settings;
use core_types::{Actor, ValueChain};
use report::ReportExporter;
use std::path::PathBuf;
use std::process::ExitCode;

mod output;
mod telemetry;

/// The main entry point for the value chain analyzer.
fn main() -> ExitCode {
    // A .env file is optional; it only supplies VALUECHAIN__* overrides.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let settings = match configuration::load_settings(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let _log_guard = telemetry::init(&settings.logging);

    // Execute the appropriate command
    let result = match cli.command {
        Commands::Analyze(args) => handle_analyze(args, &settings),
        Commands::Report(args) => handle_report(args, settings),
        Commands::Charts(args) => handle_charts(args, &settings),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = ?e, "Command failed.");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Per-actor margin and value share analysis for agricultural value chains.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file (TOML or JSON). Defaults to ./valuechain.toml if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the metrics and print the table and recommendations.
    Analyze(AnalyzeArgs),
    /// Compute the metrics and export the PDF report.
    Report(ReportArgs),
    /// Render the gross margin and value share charts as PNG files.
    Charts(ChartsArgs),
}

/// Where the chain comes from: a file, or actors listed on the command line.
#[derive(Args)]
struct ChainArgs {
    /// Chain file (TOML or JSON) with an `actors` list, farm-gate first.
    #[arg(long, short, conflicts_with = "actors")]
    input: Option<PathBuf>,

    /// An actor as NAME:COST:REVENUE. Repeat in chain order.
    #[arg(long = "actor", value_name = "NAME:COST:REVENUE")]
    actors: Vec<Actor>,

    /// Label for the chain (e.g. the commodity). Overrides the file's title.
    #[arg(long)]
    title: Option<String>,
}

#[derive(Args)]
struct AnalyzeArgs {
    #[command(flatten)]
    chain: ChainArgs,

    /// Print the metrics, summary and recommendations as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ReportArgs {
    #[command(flatten)]
    chain: ChainArgs,

    /// Where to write the PDF. Defaults to the configured report file.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Logo image for the first page. Defaults to the configured logo path.
    #[arg(long)]
    logo: Option<PathBuf>,
}

#[derive(Args)]
struct ChartsArgs {
    #[command(flatten)]
    chain: ChainArgs,

    /// Directory to write margin.png and share.png into.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Builds the request-scoped chain from the arguments and checks its size.
fn collect_chain(args: ChainArgs, settings: &Settings) -> anyhow::Result<ValueChain> {
    let mut chain = match args.input {
        Some(path) => configuration::load_chain(&path)
            .with_context(|| format!("Failed to read chain file '{}'", path.display()))?,
        None if !args.actors.is_empty() => ValueChain::new(None, args.actors),
        None => bail!("Provide a chain with --input FILE or one or more --actor NAME:COST:REVENUE"),
    };
    if args.title.is_some() {
        chain.title = args.title;
    }

    settings.chain.check(&chain)?;
    Ok(chain)
}

/// Runs the calculator and the recommendation pass.
fn analyse(chain: &ValueChain, settings: &Settings) -> (ValueChainReport, Vec<Recommendation>) {
    let analysis = ValueChainEngine::new().calculate(chain);
    let recommendations = Advisor::new(settings.analysis.clone()).derive(&analysis.metrics);
    tracing::info!(
        actors = analysis.summary.actor_count,
        recommendations = recommendations.len(),
        "Analysis complete."
    );
    (analysis, recommendations)
}

fn handle_analyze(args: AnalyzeArgs, settings: &Settings) -> anyhow::Result<()> {
    let chain = collect_chain(args.chain, settings)?;
    let (analysis, recommendations) = analyse(&chain, settings);

    if args.json {
        println!("{}", output::to_json(&analysis, &recommendations)?);
    } else {
        output::print_analysis(&analysis, &recommendations);
    }
    Ok(())
}

fn handle_report(args: ReportArgs, mut settings: Settings) -> anyhow::Result<()> {
    let chain = collect_chain(args.chain, &settings)?;
    let (analysis, recommendations) = analyse(&chain, &settings);
    output::print_analysis(&analysis, &recommendations);

    if let Some(logo) = args.logo {
        settings.report.logo_path = logo;
    }
    let destination = args.output.unwrap_or_else(|| settings.report.output_file.clone());

    let written = ReportExporter::new(settings.report)
        .export(&analysis, &recommendations, &destination)
        .context("Failed to export the PDF report")?;

    println!();
    println!("Report saved to {} ({})", written.display(), report::PDF_MIME_TYPE);
    Ok(())
}

fn handle_charts(args: ChartsArgs, settings: &Settings) -> anyhow::Result<()> {
    let chain = collect_chain(args.chain, settings)?;
    let (analysis, _) = analyse(&chain, settings);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create '{}'", args.out_dir.display()))?;
    let size = ChartSize {
        width: settings.report.chart_width,
        height: settings.report.chart_height,
    };
    let files = charts::render_charts(&analysis.metrics, &args.out_dir, size)?;

    println!("Gross margin chart: {}", files.gross_margin.display());
    println!("Value share chart: {}", files.value_share.display());
    Ok(())
}
