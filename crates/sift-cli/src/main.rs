//! Sift CLI
//!
//! Diagnostic tool for filter-list directories: check URLs against the
//! engine, dump the hiding CSS for a page, and inspect what loaded.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;

use sift_compiler::load_directory;
use sift_core::{collect_hiding_css, should_block, FilterSet};

#[derive(Parser)]
#[command(name = "sift-cli")]
#[command(about = "Sift content filter tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check URLs against the loaded filter lists
    Check {
        /// Directory of filter list files
        #[arg(short, long)]
        filters: PathBuf,

        /// URLs to evaluate
        #[arg(required = true)]
        urls: Vec<String>,

        /// Emit one JSON object per URL
        #[arg(long)]
        json: bool,
    },

    /// Print the element-hiding CSS for a page URL
    Css {
        /// Directory of filter list files
        #[arg(short, long)]
        filters: PathBuf,

        /// Page URL
        url: String,
    },

    /// Show what loaded from a filter directory
    Info {
        /// Directory of filter list files
        #[arg(short, long)]
        filters: PathBuf,
    },
}

#[derive(Serialize)]
struct CheckResult<'a> {
    url: &'a str,
    blocked: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { filters, urls, json } => cmd_check(&filters, &urls, json),
        Commands::Css { filters, url } => cmd_css(&filters, &url),
        Commands::Info { filters } => cmd_info(&filters),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn load_filters(dir: &Path) -> FilterSet {
    let filter_set = load_directory(dir);
    if filter_set.is_empty() {
        eprintln!("warning: no filter lists loaded from '{}'", dir.display());
    }
    filter_set
}

fn cmd_check(filters: &Path, urls: &[String], json: bool) -> Result<(), String> {
    let filter_set = load_filters(filters);

    for url in urls {
        let blocked = should_block(url, &filter_set);
        if json {
            let line = serde_json::to_string(&CheckResult { url, blocked })
                .map_err(|e| format!("Failed to serialize result: {e}"))?;
            println!("{line}");
        } else {
            println!("{}  {}", if blocked { "BLOCK" } else { "ALLOW" }, url);
        }
    }

    Ok(())
}

fn cmd_css(filters: &Path, url: &str) -> Result<(), String> {
    let filter_set = load_filters(filters);
    print!("{}", collect_hiding_css(url, &filter_set));
    Ok(())
}

fn cmd_info(filters: &Path) -> Result<(), String> {
    let filter_set = load_directory(filters);

    if filter_set.is_empty() {
        println!("No filter lists loaded from '{}'", filters.display());
        return Ok(());
    }

    println!("Loaded {} filter lists from '{}'", filter_set.len(), filters.display());
    for list in &filter_set {
        println!(
            "  {} - {} block, {} exception, {} hiding",
            list.name,
            list.blocks.len(),
            list.exceptions.len(),
            list.hiding.len()
        );
    }

    let total: usize = filter_set.iter().map(|list| list.rule_count()).sum();
    println!("  Total:    {total} rules");

    Ok(())
}
