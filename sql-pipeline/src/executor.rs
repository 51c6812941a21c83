//! Query execution over a pooled Postgres connection.
//!
//! The statement arrives as fully generated text, so there is no parameter
//! binding; it runs verbatim. Each returned row becomes an ordered
//! column-name → JSON-value map (`serde_json` with `preserve_order` keeps the
//! statement's projected column order).

use std::time::Duration;

use deadpool_postgres::{Config, ManagerConfig, Pool, PoolConfig, RecyclingMethod, Runtime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{Map, Value as JsonValue};
use tokio_postgres::types::Type;
use tokio_postgres::{NoTls, Row};
use tracing::{debug, warn};

use crate::errors::PipelineError;

/// One result row: ordered mapping from column name to scalar value.
pub type ResultRow = Map<String, JsonValue>;

/// Database connection pool configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
    pub password: String,
    pub max_size: usize,
    pub timeout: Duration,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            dbname: "insight".to_string(),
            user: "postgres".to_string(),
            password: String::new(),
            max_size: 16,
            timeout: Duration::from_secs(30),
        }
    }
}

impl DbConfig {
    /// Loads the config from `DB_HOST`, `DB_PORT`, `DB_NAME`, `DB_USER`,
    /// `DB_PASSWORD`, `DB_POOL_SIZE`, `DB_TIMEOUT_SECS` (all optional, with
    /// the defaults above).
    ///
    /// # Errors
    /// Returns [`PipelineError::Config`] when a numeric variable is set but
    /// does not parse; a typo must not silently fall back to the default.
    pub fn from_env() -> Result<Self, PipelineError> {
        let d = Self::default();
        Ok(Self {
            host: std::env::var("DB_HOST").unwrap_or(d.host),
            port: env_parsed("DB_PORT", d.port)?,
            dbname: std::env::var("DB_NAME").unwrap_or(d.dbname),
            user: std::env::var("DB_USER").unwrap_or(d.user),
            password: std::env::var("DB_PASSWORD").unwrap_or(d.password),
            max_size: env_parsed("DB_POOL_SIZE", d.max_size)?,
            timeout: Duration::from_secs(env_parsed("DB_TIMEOUT_SECS", 30)?),
        })
    }

    /// Creates a connection pool from this configuration.
    ///
    /// # Errors
    /// Returns [`PipelineError::CreatePool`] when the pool cannot be built.
    pub fn create_pool(&self) -> Result<Pool, PipelineError> {
        let mut cfg = Config::new();
        cfg.host = Some(self.host.clone());
        cfg.port = Some(self.port);
        cfg.dbname = Some(self.dbname.clone());
        cfg.user = Some(self.user.clone());
        cfg.password = Some(self.password.clone());
        cfg.connect_timeout = Some(self.timeout);

        cfg.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });
        cfg.pool = Some(PoolConfig::new(self.max_size));

        let pool = cfg.create_pool(Some(Runtime::Tokio1), NoTls)?;
        Ok(pool)
    }
}

/// Parses an optional numeric env var, keeping `default` only when the
/// variable is unset or empty.
fn env_parsed<T: std::str::FromStr>(name: &str, default: T) -> Result<T, PipelineError> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v
            .trim()
            .parse()
            .map_err(|_| PipelineError::Config(format!("{name} must be a number, got {v:?}"))),
        _ => Ok(default),
    }
}

/// Executes the authorized statement and materializes every row.
///
/// The pooled connection is scoped to this call and returned to the pool on
/// every exit path when the guard drops.
///
/// # Errors
/// [`PipelineError::Pool`] when no connection can be checked out, and
/// [`PipelineError::Database`] with the engine's message when the statement
/// fails — expected for SQL that passes the gatekeeper but is semantically
/// wrong.
pub async fn execute(pool: &Pool, sql: &str) -> Result<Vec<ResultRow>, PipelineError> {
    debug!(%sql, "executing statement");

    let conn = pool.get().await?;
    let rows = conn.query(sql, &[]).await?;

    let mut out = Vec::with_capacity(rows.len());
    for row in &rows {
        out.push(row_to_json(row)?);
    }

    debug!(rows = out.len(), "statement executed");
    Ok(out)
}

/// Runs `SELECT 1` to verify database connectivity.
pub async fn ping(pool: &Pool) -> Result<(), PipelineError> {
    let conn = pool.get().await?;
    conn.query_one("SELECT 1", &[]).await?;
    Ok(())
}

/// Maps a row into an ordered column-name → JSON-value object using the
/// row's column metadata.
fn row_to_json(row: &Row) -> Result<ResultRow, PipelineError> {
    let mut obj = Map::with_capacity(row.len());
    for (idx, col) in row.columns().iter().enumerate() {
        obj.insert(col.name().to_string(), cell_to_json(row, idx)?);
    }
    Ok(obj)
}

/// Converts one cell to JSON based on its Postgres type.
///
/// NUMERIC (what Postgres returns for `AVG(int)` and `SUM(numeric)`) decodes
/// through [`Decimal`]. Types without a JSON mapping become `null` with a
/// warning rather than failing the whole result set.
fn cell_to_json(row: &Row, idx: usize) -> Result<JsonValue, PipelineError> {
    let ty = row.columns()[idx].type_().clone();

    let value = match ty {
        t if t == Type::BOOL => row.try_get::<_, Option<bool>>(idx)?.map(JsonValue::from),
        t if t == Type::INT2 => row.try_get::<_, Option<i16>>(idx)?.map(JsonValue::from),
        t if t == Type::INT4 => row.try_get::<_, Option<i32>>(idx)?.map(JsonValue::from),
        t if t == Type::INT8 => row.try_get::<_, Option<i64>>(idx)?.map(JsonValue::from),
        t if t == Type::FLOAT4 => row
            .try_get::<_, Option<f32>>(idx)?
            .map(|v| JsonValue::from(v as f64)),
        t if t == Type::FLOAT8 => row.try_get::<_, Option<f64>>(idx)?.map(JsonValue::from),
        t if t == Type::TEXT || t == Type::VARCHAR || t == Type::BPCHAR || t == Type::NAME => row
            .try_get::<_, Option<String>>(idx)?
            .map(JsonValue::String),
        t if t == Type::DATE => row
            .try_get::<_, Option<chrono::NaiveDate>>(idx)?
            .map(|d| JsonValue::String(d.to_string())),
        t if t == Type::TIMESTAMP => row
            .try_get::<_, Option<chrono::NaiveDateTime>>(idx)?
            .map(|t| JsonValue::String(t.to_string())),
        t if t == Type::TIMESTAMPTZ => row
            .try_get::<_, Option<chrono::DateTime<chrono::Utc>>>(idx)?
            .map(|t| JsonValue::String(t.to_rfc3339())),
        t if t == Type::UUID => row
            .try_get::<_, Option<uuid::Uuid>>(idx)?
            .map(|u| JsonValue::String(u.to_string())),
        t if t == Type::NUMERIC => row
            .try_get::<_, Option<Decimal>>(idx)?
            .map(decimal_to_json),
        t if t == Type::JSON || t == Type::JSONB => row.try_get::<_, Option<JsonValue>>(idx)?,
        other => {
            warn!(column = row.columns()[idx].name(), pg_type = %other, "unmapped column type, emitting null");
            None
        }
    };

    Ok(value.unwrap_or(JsonValue::Null))
}

/// Renders a decimal as a JSON number, or as a string when the value does not
/// survive the f64 conversion.
fn decimal_to_json(value: Decimal) -> JsonValue {
    value
        .to_f64()
        .and_then(serde_json::Number::from_f64)
        .map(JsonValue::Number)
        .unwrap_or_else(|| JsonValue::String(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_config_defaults_are_local() {
        let cfg = DbConfig::default();
        assert_eq!(cfg.host, "localhost");
        assert_eq!(cfg.port, 5432);
        assert_eq!(cfg.max_size, 16);
    }

    #[test]
    fn db_config_rejects_malformed_port() {
        unsafe { std::env::set_var("DB_PORT", "not-a-port") };
        let err = DbConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("DB_PORT"));
        unsafe { std::env::remove_var("DB_PORT") };
    }

    #[test]
    fn env_parsed_keeps_default_when_unset() {
        assert_eq!(env_parsed("DB_EXECUTOR_TEST_UNSET", 9u16).ok(), Some(9));
    }

    #[test]
    fn numeric_aggregates_decode_as_json_numbers() {
        // AVG over an int column comes back as NUMERIC.
        let avg: Decimal = "12.34".parse().unwrap();
        assert_eq!(decimal_to_json(avg), JsonValue::from(12.34));
        let count: Decimal = "42".parse().unwrap();
        assert_eq!(decimal_to_json(count), JsonValue::from(42.0));
    }
}
