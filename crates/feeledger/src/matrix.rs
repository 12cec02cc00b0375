use std::path::Path;

use anyhow::Result;

use feeledger_core::{FeeLookup, FeeQuery, SqliteFeeLookup};

pub async fn lookup(db: &Path, client: &str, lienholder: &str, fee_type: &str) -> Result<()> {
    let matrix = SqliteFeeLookup::open(db).await?;
    let query = FeeQuery {
        client: client.to_string(),
        lienholder: lienholder.to_string(),
        fee_type: fee_type.to_string(),
    };

    match matrix.lookup(&query).await? {
        Some(fee) => {
            println!(
                "${:.2} for {} / {} ({})",
                fee.amount,
                fee.lienholder_resolved,
                fee.fee_type,
                if fee.is_fallback {
                    "Standard fallback"
                } else {
                    "exact match"
                }
            );
        }
        None => println!("No matching fee found"),
    }
    Ok(())
}

pub async fn add_fee(
    db: &Path,
    client: &str,
    lienholder: &str,
    fee_type: &str,
    amount: f64,
) -> Result<()> {
    let matrix = SqliteFeeLookup::open(db).await?;
    let id = matrix.add_fee(client, lienholder, fee_type, amount).await?;
    println!("Recorded fee {id}: {client} / {lienholder} / {fee_type} = ${amount:.2}");
    Ok(())
}
