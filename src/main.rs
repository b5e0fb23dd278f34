use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use seo_compete::config::{AnalysisDepth, AnalysisOptions, DEFAULT_MAX_TOKENS};
use seo_compete::io::load_snapshot;
use seo_compete::logging::init_logging;
use seo_compete::CompetitiveAnalyzer;

#[derive(Parser)]
#[command(name = "compete")]
#[command(author, version, long_about = None)]
#[command(about = "Compare a site's crawl snapshot against a competitor's and print the analysis as JSON")]
struct Cli {
    /// Snapshot JSON of the site being analyzed
    #[arg(value_name = "MAIN")]
    main: PathBuf,

    /// Snapshot JSON of the competitor
    #[arg(value_name = "COMPETITOR")]
    competitor: PathBuf,

    /// Generate insights with Gemini (needs GEMINI_API_KEY)
    #[arg(long)]
    include_ai: bool,

    /// Output token budget for the model
    #[arg(long, env = "COMPETE_MAX_TOKENS", default_value_t = DEFAULT_MAX_TOKENS)]
    max_tokens: u32,

    /// Requested analysis depth
    #[arg(long, value_enum, default_value_t = AnalysisDepth::Standard)]
    depth: AnalysisDepth,

    /// Focus area (repeatable)
    #[arg(long = "focus-area", value_name = "AREA")]
    focus_areas: Vec<String>,

    /// Pretty-print the JSON result
    #[arg(long)]
    pretty: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let main_snapshot = load_snapshot(&cli.main).await?;
    let competitor_snapshot = load_snapshot(&cli.competitor).await?;

    let options = AnalysisOptions {
        include_ai: cli.include_ai,
        max_tokens: cli.max_tokens,
        analysis_depth: cli.depth,
        focus_areas: cli.focus_areas,
    };
    let analyzer = CompetitiveAnalyzer::from_options(options)?;

    let result = analyzer
        .analyze(&main_snapshot, &competitor_snapshot)
        .await
        .context("competitive analysis failed")?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{}", json);
    Ok(())
}
