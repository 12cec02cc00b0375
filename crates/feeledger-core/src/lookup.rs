use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};

use crate::Result;

/// Sentinel lienholder consulted when no exact match exists.
pub const STANDARD_LIENHOLDER: &str = "Standard";

const INIT_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS clients (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS lienholders (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS fee_types (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS fee_matrix (
    id INTEGER PRIMARY KEY,
    client_id INTEGER NOT NULL REFERENCES clients(id) ON DELETE CASCADE,
    lienholder_id INTEGER NOT NULL REFERENCES lienholders(id) ON DELETE CASCADE,
    fee_type_id INTEGER NOT NULL REFERENCES fee_types(id) ON DELETE CASCADE,
    amount REAL NOT NULL,
    UNIQUE(client_id, lienholder_id, fee_type_id)
);

CREATE INDEX IF NOT EXISTS idx_fee_matrix_client ON fee_matrix(client_id);
"#;

const MATRIX_SQL: &str = r#"
SELECT fm.id, fm.amount, lh.name, ft.name
FROM fee_matrix fm
JOIN lienholders lh ON fm.lienholder_id = lh.id
JOIN fee_types ft ON fm.fee_type_id = ft.id
WHERE fm.client_id = ? AND fm.lienholder_id = ? AND fm.fee_type_id = ?
"#;

/// Lookup parameters: the case's client, lienholder and repo type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeQuery {
    #[serde(alias = "clientName")]
    pub client: String,
    #[serde(alias = "lienHolderName")]
    pub lienholder: String,
    #[serde(alias = "repoType")]
    pub fee_type: String,
}

/// The single authoritative fee value. Shown in the summary display
/// only, never merged into category buckets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseFee {
    pub amount: f64,
    pub lienholder_resolved: String,
    pub fee_type: String,
    pub is_fallback: bool,
    pub record_id: i64,
}

/// Resolves the authoritative fee for a case. Absence is a valid,
/// non-error result; the pipeline receives the resolved option and
/// never issues this call itself.
#[async_trait]
pub trait FeeLookup: Send + Sync {
    async fn lookup(&self, query: &FeeQuery) -> Result<Option<DatabaseFee>>;
}

/// SQLite-backed fee matrix, keyed by (client, lienholder, fee type)
/// with a `"Standard"` lienholder fallback.
#[derive(Debug, Clone)]
pub struct SqliteFeeLookup {
    pool: Pool<Sqlite>,
}

impl SqliteFeeLookup {
    pub async fn open(path: &Path) -> Result<Self> {
        let url = format!("sqlite://{}?mode=rwc", path.display());
        let pool = SqlitePoolOptions::new().connect(&url).await?;
        sqlx::query(INIT_SQL).execute(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn open_in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        sqlx::query(INIT_SQL).execute(&pool).await?;
        Ok(Self { pool })
    }

    /// Insert or replace one matrix row, creating the referenced
    /// names as needed. Returns the matrix record id.
    pub async fn add_fee(
        &self,
        client: &str,
        lienholder: &str,
        fee_type: &str,
        amount: f64,
    ) -> Result<i64> {
        let client_id = self
            .ensure_name("INSERT OR IGNORE INTO clients (name) VALUES (?)", "SELECT id FROM clients WHERE name = ?", client)
            .await?;
        let lienholder_id = self
            .ensure_name("INSERT OR IGNORE INTO lienholders (name) VALUES (?)", "SELECT id FROM lienholders WHERE name = ?", lienholder)
            .await?;
        let fee_type_id = self
            .ensure_name("INSERT OR IGNORE INTO fee_types (name) VALUES (?)", "SELECT id FROM fee_types WHERE name = ?", fee_type)
            .await?;

        sqlx::query(
            "INSERT OR REPLACE INTO fee_matrix (client_id, lienholder_id, fee_type_id, amount) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(client_id)
        .bind(lienholder_id)
        .bind(fee_type_id)
        .bind(amount)
        .execute(&self.pool)
        .await?;

        let row: (i64,) = sqlx::query_as(
            "SELECT id FROM fee_matrix \
             WHERE client_id = ? AND lienholder_id = ? AND fee_type_id = ?",
        )
        .bind(client_id)
        .bind(lienholder_id)
        .bind(fee_type_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.0)
    }

    async fn ensure_name(&self, insert: &str, select: &str, name: &str) -> Result<i64> {
        sqlx::query(insert).bind(name).execute(&self.pool).await?;
        let row: (i64,) = sqlx::query_as(select)
            .bind(name)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn find_name(&self, select: &str, name: &str) -> Result<Option<i64>> {
        let row: Option<(i64,)> = sqlx::query_as(select)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.0))
    }

    async fn matrix_row(
        &self,
        client_id: i64,
        lienholder_id: i64,
        fee_type_id: i64,
    ) -> Result<Option<(i64, f64, String, String)>> {
        let row = sqlx::query_as(MATRIX_SQL)
            .bind(client_id)
            .bind(lienholder_id)
            .bind(fee_type_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}

#[async_trait]
impl FeeLookup for SqliteFeeLookup {
    async fn lookup(&self, query: &FeeQuery) -> Result<Option<DatabaseFee>> {
        let Some(client_id) = self
            .find_name("SELECT id FROM clients WHERE name = ?", &query.client)
            .await?
        else {
            tracing::warn!(client = %query.client, "client not found in fee matrix");
            return Ok(None);
        };
        let Some(fee_type_id) = self
            .find_name("SELECT id FROM fee_types WHERE name = ?", &query.fee_type)
            .await?
        else {
            tracing::warn!(fee_type = %query.fee_type, "fee type not found in fee matrix");
            return Ok(None);
        };

        if let Some(lienholder_id) = self
            .find_name("SELECT id FROM lienholders WHERE name = ?", &query.lienholder)
            .await?
        {
            if let Some((id, amount, lienholder, fee_type)) =
                self.matrix_row(client_id, lienholder_id, fee_type_id).await?
            {
                return Ok(Some(DatabaseFee {
                    amount,
                    lienholder_resolved: lienholder,
                    fee_type,
                    is_fallback: false,
                    record_id: id,
                }));
            }
        }

        // No exact row; retry with the sentinel lienholder.
        tracing::debug!(
            lienholder = %query.lienholder,
            "no specific fee record, trying Standard lienholder"
        );
        let Some(standard_id) = self
            .find_name("SELECT id FROM lienholders WHERE name = ?", STANDARD_LIENHOLDER)
            .await?
        else {
            return Ok(None);
        };

        match self.matrix_row(client_id, standard_id, fee_type_id).await? {
            Some((id, amount, lienholder, fee_type)) => Ok(Some(DatabaseFee {
                amount,
                lienholder_resolved: format!("{lienholder} (Standard Fallback)"),
                fee_type,
                is_fallback: true,
                record_id: id,
            })),
            None => Ok(None),
        }
    }
}
