//! `qta` - QA Tool Advisor command line
//!
//! # Input (via stdin or --input)
//! JSON with fields: requirements {selected, skill, overrides}, weights
//! {platform, skill_match, modern_features}, top
//!
//! # Output (via stdout)
//! JSON with the top recommendation, an explanation and the ranked table,
//! or a plain-text table with `--format table`

use clap::{Parser, ValueEnum};
use colored::Colorize;
use qa_tool_advisor::catalog::resolve_catalog;
use qa_tool_advisor::config::{DEFAULT_TOP_K, DIAL_RANGE};
use qa_tool_advisor::output::{render_table, AdviceOutput};
use qa_tool_advisor::{AdviceRequest, Advisor, AdvisorError};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Table,
}

#[derive(Debug, Parser)]
#[command(name = "qta", version, about = "Recommend a testing tool for a requirements profile")]
struct Cli {
    /// Request file; reads stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Catalog file (defaults to the config-dir catalog, then the builtin one)
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Number of ranked rows to output (overrides the request)
    #[arg(short, long)]
    top: Option<usize>,

    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Print the catalog as JSON and exit
    #[arg(long)]
    list_tools: bool,
}

fn main() {
    // Initialize tracing if RUST_LOG is set
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        error!("Error: {}", e);
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), AdvisorError> {
    let catalog = resolve_catalog(cli.catalog.as_deref())?;
    info!("Loaded {} tools", catalog.len());

    if cli.list_tools {
        let listing = serde_json::to_string_pretty(&catalog.to_file())
            .map_err(AdvisorError::OutputSerialize)?;
        println!("{}", listing);
        return Ok(());
    }

    let advisor = Advisor::with_catalog(catalog)?;

    let input_json = read_input(cli.input.as_ref())?;
    debug!("Received input: {}", input_json);

    let request: AdviceRequest = if input_json.trim().is_empty() {
        debug!("Empty input, using default request");
        AdviceRequest::default()
    } else {
        serde_json::from_str(&input_json)?
    };

    request.weights.check_range(&DIAL_RANGE)?;

    let recommendation = advisor.recommend(&request)?;

    let limit = cli.top.or(request.top).or(match cli.format {
        Format::Table => Some(DEFAULT_TOP_K),
        Format::Json => None,
    });
    let output = AdviceOutput::new(&recommendation, advisor.catalog(), limit);

    match cli.format {
        Format::Json => println!(
            "{}",
            serde_json::to_string(&output).map_err(AdvisorError::OutputSerialize)?
        ),
        Format::Table => println!("{}", render_table(&output)),
    }

    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<String, AdvisorError> {
    match path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}
