use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "feeledger",
    about = "Fee mention pipeline for scraped repossession cases",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the pipeline over a scraped session and write the JSON artifacts
    Run {
        /// Session JSON produced by the scraper
        #[arg(short, long)]
        input: PathBuf,
        /// Output directory for the artifacts
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
        /// Taxonomy JSON (whitelist and keys keywords); builtin when omitted
        #[arg(long)]
        taxonomy: Option<PathBuf>,
        /// SQLite fee matrix for the authoritative database lookup
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Query the fee matrix for one (client, lienholder, fee type)
    Lookup {
        /// SQLite fee matrix
        #[arg(long)]
        db: PathBuf,
        client: String,
        lienholder: String,
        fee_type: String,
    },
    /// Insert or replace one fee matrix row
    AddFee {
        /// SQLite fee matrix (created if missing)
        #[arg(long)]
        db: PathBuf,
        client: String,
        lienholder: String,
        fee_type: String,
        amount: f64,
    },
}
