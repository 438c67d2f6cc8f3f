//! PCDB CLI (pcdbctl)
//!
//! Command-line tool for building and querying PCDB postcode databases.
//!
//! ## Overview
//!
//! `pcdbctl` provides an ergonomic interface to the database operations:
//! - **build**: Compress a 3-column postcode CSV into a `.pcod` file
//! - **lookup**: Resolve a single postcode to coordinates
//! - **enumerate**: List every postcode under an outward code
//! - **outwards**: List outward codes, optionally filtered by prefix
//! - **stats**: Show whole-database statistics
//!
//! ## Quick Start
//!
//! ```bash
//! # Build a database from a cleaned CSV
//! pcdbctl build postcodes.csv postcodes.pcod
//!
//! # Look up a postcode (case and spacing don't matter)
//! pcdbctl lookup postcodes.pcod "sw1a 1aa"
//!
//! # Enumerate an outward
//! pcdbctl enumerate postcodes.pcod M1
//!
//! # Machine-readable output
//! pcdbctl --json stats postcodes.pcod
//! ```
//!
//! ## Logging
//!
//! Log output honors `RUST_LOG` (default `info`), e.g.
//! `RUST_LOG=pcdb_storage=debug pcdbctl build ...`.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pcdb_storage::{build_database, DatabaseReader, LookupResult};

#[derive(Parser)]
#[command(name = "pcdbctl")]
#[command(about = "PCDB postcode database tool", long_about = None)]
struct Cli {
    /// Emit JSON instead of human-readable output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a database from a postcode,lat,lon CSV
    Build {
        /// Input CSV path
        csv: PathBuf,
        /// Output database path
        out: PathBuf,
    },
    /// Look up a single postcode
    Lookup {
        /// Database path
        db: PathBuf,
        /// Postcode to resolve
        postcode: String,
    },
    /// List every postcode under an outward code
    Enumerate {
        /// Database path
        db: PathBuf,
        /// Outward code (e.g. M1, SW1A)
        outward: String,
    },
    /// List outward codes, optionally filtered by prefix
    Outwards {
        /// Database path
        db: PathBuf,
        /// Prefix filter (e.g. SW)
        prefix: Option<String>,
    },
    /// Show database statistics
    Stats {
        /// Database path
        db: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Build { csv, out } => {
            let summary = build_database(&csv, &out)
                .with_context(|| format!("building {} from {}", out.display(), csv.display()))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!(
                    "{} postcodes in {} outwards -> {} ({} bytes, {} rows dropped)",
                    summary.total_postcodes,
                    summary.total_outwards,
                    out.display(),
                    summary.file_size,
                    summary.records_dropped
                );
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Lookup { db, postcode } => {
            let reader = open(&db)?;
            match reader.lookup(&postcode) {
                Some(hit) => {
                    if cli.json {
                        println!("{}", serde_json::to_string_pretty(&hit)?);
                    } else {
                        println!("{}\t{:.5}\t{:.5}", hit.postcode, hit.lat, hit.lon);
                    }
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    if cli.json {
                        println!("null");
                    } else {
                        eprintln!("{}: not found", postcode);
                    }
                    Ok(ExitCode::FAILURE)
                }
            }
        }

        Commands::Enumerate { db, outward } => {
            let reader = open(&db)?;
            let results = reader.enumerate_outward(&outward);
            print_results(cli.json, &results)?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Outwards { db, prefix } => {
            let reader = open(&db)?;
            let outwards = match prefix {
                Some(prefix) => reader.find_nearby_outwards(&prefix),
                None => reader.outward_list(),
            };
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outwards)?);
            } else {
                for outward in outwards {
                    println!("{}", outward);
                }
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Stats { db } => {
            let reader = open(&db)?;
            let stats = reader.stats();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("outwards:  {}", stats.total_outwards);
                println!("postcodes: {}", stats.total_postcodes);
                println!("file size: {} bytes", stats.file_size);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn open(db: &Path) -> Result<DatabaseReader> {
    DatabaseReader::open(db).with_context(|| format!("opening {}", db.display()))
}

fn print_results(json: bool, results: &[LookupResult]) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(results)?);
    } else {
        for hit in results {
            println!("{}\t{:.5}\t{:.5}", hit.postcode, hit.lat, hit.lon);
        }
    }
    Ok(())
}
