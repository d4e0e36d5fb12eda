//! Version Retention CLI
//!
//! Reports version directories and which of them a retention policy would
//! remove. Nothing is deleted.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use version_retention::{
    MinAge, RetentionConfig, RetentionReport, VersionCatalog, VersionIdentifier,
};

#[derive(Parser)]
#[command(name = "version-retention")]
#[command(about = "Find semver-named directories and report retention candidates")]
struct Cli {
    /// Directory containing the version directories
    #[arg(short, long)]
    path: Option<PathBuf>,

    /// Prefix preceding the version in each directory name (e.g. "Ver")
    #[arg(short = 'P', long)]
    prefix: Option<String>,

    /// Config file (defaults to retention.toml lookup)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the most recent version
    Latest,

    /// Show the oldest version
    Oldest,

    /// List the newest versions, newest first
    Newest {
        #[arg(short = 'n', long, default_value_t = 3)]
        count: usize,
    },

    /// List the oldest versions, oldest first
    OldestN {
        #[arg(short = 'n', long, default_value_t = 3)]
        count: usize,
    },

    /// List versions a retention policy would remove, oldest first
    Candidates {
        /// Number of newest versions to keep
        #[arg(short, long)]
        keep: Option<usize>,

        /// Also keep versions younger than this (e.g. "4d", "2w")
        #[arg(short = 'a', long)]
        min_age: Option<MinAge>,

        /// Print a JSON report
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = RetentionConfig::load_from(cli.config.as_deref())?;
    if let Some(path) = cli.path {
        config.scan.path = path;
    }
    if let Some(prefix) = cli.prefix {
        config.scan.prefix = prefix;
    }

    let mut catalog: VersionCatalog = VersionCatalog::default();
    catalog.initialize(config.scan_path(), &config.scan.prefix)?;

    match cli.command {
        Commands::Latest => {
            match catalog.most_recent()? {
                Some(id) => print_entry(id),
                None => println!("No versions found"),
            }
            Ok(())
        }

        Commands::Oldest => {
            match catalog.oldest()? {
                Some(id) => print_entry(id),
                None => println!("No versions found"),
            }
            Ok(())
        }

        Commands::Newest { count } => {
            match catalog.newest_n(count)? {
                Some(ids) => ids.into_iter().for_each(print_entry),
                None => println!("No versions found"),
            }
            Ok(())
        }

        Commands::OldestN { count } => {
            match catalog.oldest_n(count)? {
                Some(ids) => ids.into_iter().for_each(print_entry),
                None => println!("No versions found"),
            }
            Ok(())
        }

        Commands::Candidates { keep, min_age, json } => {
            let keep = keep.unwrap_or(config.policy.keep);
            let min_age = min_age.or(config.policy.min_age);
            let report = RetentionReport::build(&catalog, keep, min_age)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            match min_age {
                Some(age) => println!(
                    "Keeping {} newest and anything younger than {} ({} versions found)",
                    keep, age, report.version_count
                ),
                None => println!(
                    "Keeping {} newest ({} versions found)",
                    keep, report.version_count
                ),
            }

            if report.candidates.is_empty() {
                println!("Nothing to remove");
            }
            for entry in &report.candidates {
                println!("  {}\t{}", entry.version, entry.name);
            }
            Ok(())
        }
    }
}

fn print_entry(id: &VersionIdentifier) {
    println!("{}\t{}", id, id.raw_name());
}
