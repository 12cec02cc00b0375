mod cli;
mod matrix;
mod run;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            input,
            out,
            taxonomy,
            db,
        } => run::run(&input, &out, taxonomy.as_deref(), db.as_deref()).await,
        Commands::Lookup {
            db,
            client,
            lienholder,
            fee_type,
        } => matrix::lookup(&db, &client, &lienholder, &fee_type).await,
        Commands::AddFee {
            db,
            client,
            lienholder,
            fee_type,
            amount,
        } => matrix::add_fee(&db, &client, &lienholder, &fee_type, amount).await,
    }
}
