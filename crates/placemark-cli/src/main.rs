mod input;
mod render;
mod report;

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Context;
use chrono::Local;
use clap::{Args, CommandFactory, Parser, Subcommand};
use placemark_core::AppConfig;
use placemark_scraper::SearchClient;
use tracing_subscriber::EnvFilter;

use crate::render::{Format, KeywordResults, RunMetadata};

#[derive(Debug, Parser)]
#[command(name = "placemark-cli")]
#[command(about = "Extract structured fields from map search listings")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract listings from a JSON array or a file with one listing per line
    Extract {
        /// Input file, or `-` for stdin
        #[arg(long, default_value = "-")]
        input: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Search the crawler backend for one or more keywords and extract the results
    Search {
        /// Keywords to search, run in order; repeats are skipped
        #[arg(required = true, num_args = 1..)]
        keywords: Vec<String>,
        /// Maximum number of results per keyword (defaults to `PLACEMARK_SEARCH_LIMIT`)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
        limit: Option<u32>,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, Args)]
struct OutputArgs {
    #[arg(long, value_enum, default_value_t = Format::Tsv)]
    format: Format,
    /// Write to this file instead of stdout
    #[arg(long, conflicts_with_all = ["save", "output_dir"])]
    output: Option<PathBuf>,
    /// Write to a timestamped file under `PLACEMARK_OUTPUT_DIR`
    #[arg(long)]
    save: bool,
    /// Write to a timestamped file under this directory
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Log a summary of the extracted listings
    #[arg(long)]
    summary: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = placemark_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, "configuration loaded");

    match cli.command {
        Some(Commands::Extract { input, output }) => {
            let text = input::read_source(&input)?;
            let listings = input::parse_listings(&text);
            tracing::info!(source = %input, listings = listings.len(), "listings extracted");
            let results = [KeywordResults::new(input::keyword_for(&input), listings)];
            emit(&results, &output, &config)?;
        }
        Some(Commands::Search {
            keywords,
            limit,
            output,
        }) => {
            let search = placemark_core::load_search_config_from_env()?;
            tracing::debug!(search_api_url = %search.api_url, "search configuration loaded");
            let client = SearchClient::from_config(&search)?;
            let limit = limit.unwrap_or(search.limit);
            let results = search_all(&client, &unique_keywords(&keywords), limit).await?;
            emit(&results, &output, &config)?;
        }
        None => Cli::command().print_help()?,
    }

    Ok(())
}

/// Trimmed keywords in first-seen order, without repeats.
fn unique_keywords(keywords: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| seen.insert(*k))
        .map(str::to_owned)
        .collect()
}

/// Runs every keyword in order.
///
/// A failed keyword is logged and skipped; the run only fails when every
/// keyword did.
async fn search_all(
    client: &SearchClient,
    keywords: &[String],
    limit: u32,
) -> anyhow::Result<Vec<KeywordResults>> {
    let mut results = Vec::with_capacity(keywords.len());
    let mut last_error = None;
    for keyword in keywords {
        match client.fetch_listings(keyword, limit).await {
            Ok(listings) => results.push(KeywordResults::new(keyword.as_str(), listings)),
            Err(e) => {
                tracing::warn!(keyword = %keyword, error = %e, "search failed; skipping keyword");
                last_error = Some(e);
            }
        }
    }
    match last_error {
        Some(e) if results.is_empty() => {
            Err(anyhow::Error::new(e).context("every keyword failed"))
        }
        _ => Ok(results),
    }
}

/// Renders `results` and writes them to the destination chosen by `args`.
fn emit(results: &[KeywordResults], args: &OutputArgs, config: &AppConfig) -> anyhow::Result<()> {
    let metadata = RunMetadata::for_results(results, Local::now());
    let rendered = render::render(results, args.format, &metadata)?;

    if args.summary {
        for (keyword, summary) in report::Summary::by_keyword(results) {
            summary.log(keyword);
        }
    }

    match destination(args, config, &metadata) {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(&path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), format = ?args.format, "results saved");
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

/// Output file for this run, or `None` for stdout.
fn destination(args: &OutputArgs, config: &AppConfig, metadata: &RunMetadata) -> Option<PathBuf> {
    if let Some(path) = &args.output {
        return Some(path.clone());
    }
    let dir = match (&args.output_dir, args.save) {
        (Some(dir), _) => dir.clone(),
        (None, true) => config.output_dir.clone(),
        (None, false) => return None,
    };
    Some(dir.join(metadata.default_file_name(args.format)))
}

#[cfg(test)]
mod tests;
