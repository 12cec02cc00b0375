use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;

use feeledger_core::{
    to_json_pretty, DatabaseFee, FeeLookup, FeePipeline, FeeQuery, FeeTable, ScrapeSession,
    SqliteFeeLookup, Taxonomy,
};

pub async fn run(
    input: &Path,
    out_dir: &Path,
    taxonomy_path: Option<&Path>,
    db: Option<&Path>,
) -> Result<()> {
    let session: ScrapeSession = serde_json::from_str(
        &fs::read_to_string(input)
            .with_context(|| format!("reading session file {}", input.display()))?,
    )
    .context("parsing session JSON")?;

    let taxonomy = load_taxonomy(taxonomy_path)?;
    let database_fee = resolve_database_fee(db, session.case.as_ref()).await;

    let pipeline = FeePipeline::new(taxonomy);
    let output = pipeline.run(&session.sources, database_fee);

    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;
    write_artifact(out_dir, "raw-entries.json", &output.artifacts.raw_entries)?;
    write_artifact(out_dir, "fees.json", &output.artifacts.records)?;
    write_artifact(out_dir, "report.json", &output.artifacts.report)?;

    print_summary(&output);
    Ok(())
}

fn load_taxonomy(path: Option<&Path>) -> Result<Taxonomy> {
    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading taxonomy file {}", path.display()))?;
            serde_json::from_str(&raw).context("parsing taxonomy JSON")
        }
        None => Ok(Taxonomy::builtin()),
    }
}

/// A failed or impossible lookup degrades to absence: the report is
/// produced either way, just without the authoritative value.
async fn resolve_database_fee(
    db: Option<&Path>,
    case: Option<&FeeQuery>,
) -> Option<DatabaseFee> {
    let (db, case) = match (db, case) {
        (Some(db), Some(case)) => (db, case),
        (Some(_), None) => {
            tracing::warn!("no case information in session, skipping fee lookup");
            return None;
        }
        _ => return None,
    };

    match lookup_fee(db, case).await {
        Ok(fee) => fee,
        Err(error) => {
            tracing::warn!(%error, "fee lookup failed, continuing without authoritative value");
            None
        }
    }
}

async fn lookup_fee(db: &Path, case: &FeeQuery) -> feeledger_core::Result<Option<DatabaseFee>> {
    let matrix = SqliteFeeLookup::open(db).await?;
    matrix.lookup(case).await
}

fn write_artifact<T: serde::Serialize>(out_dir: &Path, name: &str, artifact: &T) -> Result<()> {
    let path = out_dir.join(name);
    let json = to_json_pretty(artifact)?;
    fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn print_summary(output: &feeledger_core::PipelineOutput) {
    println!(
        "Processed {} mentions ({} skipped, {} database-sourced removed), {} after dedup.",
        output.stats.extracted,
        output.stats.skipped,
        output.stats.database_removed,
        output.stats.deduplicated
    );

    for bucket in &output.artifacts.report.buckets {
        let table = FeeTable::for_bucket(bucket);
        println!(
            "  {} [{}]: {} fee(s)",
            table.title,
            bucket.fee_type,
            bucket.members.len()
        );
    }

    match &output.artifacts.report.database_fee {
        Some(fee) => println!(
            "Authoritative fee: ${:.2} ({}, {})",
            fee.amount,
            fee.fee_type,
            if fee.is_fallback {
                "Standard fallback"
            } else {
                "exact lienholder match"
            }
        ),
        None => println!("Authoritative fee: none found"),
    }

    println!("Generated {}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC"));
}
