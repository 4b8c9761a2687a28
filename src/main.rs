// src/main.rs
// =============================================================================
// This is the entry point of the spiderling CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing, to stderr)
// 3. Build the HTTP fetcher and the crawl task, then run the crawl
// 4. Print the report as a table or JSON (stdout)
// 5. Exit with proper code (0 = all pages fetched, 1 = some fetches failed,
//    2 = error before the crawl could start)
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use spiderling::crawl::{CrawlReport, CrawlTask};
use spiderling::fetch::HttpFetcher;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// RUST_LOG wins; otherwise info, or debug with --verbose
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// Runs one crawl and turns its report into an exit code
//
// Returns:
//   Ok(0) = every attempted page was fetched
//   Ok(1) = the crawl finished but some fetches failed
//   Err   = the crawl could not be set up
async fn run(cli: Cli) -> Result<i32> {
    let config = cli.crawl_config();

    let fetcher = HttpFetcher::new(config.fetch_timeout, &config.user_agent)
        .context("failed to build HTTP client")?;

    let task = CrawlTask::with_config(&cli.base_url, &cli.pattern, Arc::new(fetcher), config)
        .context("failed to set up crawl")?;

    let report = task.run().await;
    print_results(&report, cli.json)?;

    if report.is_clean() {
        Ok(0)
    } else {
        Ok(1)
    }
}

fn print_results(report: &CrawlReport, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(report)?;
        println!("{}", json_output);
    } else {
        print_table(report);
    }
    Ok(())
}

// Prints one row per crawled page, then a summary
fn print_table(report: &CrawlReport) {
    println!("{:<70} {:>5} {:>6}  {}", "URL", "DEPTH", "LINKS", "ERROR");
    println!("{}", "=".repeat(100));

    for page in &report.pages {
        // Truncate URL if too long for display
        let url_display = if page.url.chars().count() > 67 {
            format!("{}...", page.url.chars().take(67).collect::<String>())
        } else {
            page.url.clone()
        };

        println!(
            "{:<70} {:>5} {:>6}  {}",
            url_display,
            page.depth,
            page.links_found,
            report.error_for(&page.url).unwrap_or("")
        );
    }

    println!();
    println!("Summary:");
    println!("   Seed:    {}", report.seed);
    println!("   Crawled: {}", report.pages.len());
    println!("   Failed:  {}", report.failed_count());
}
