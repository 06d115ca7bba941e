//! AnyRow extraction helpers.
//!
//! `sqlx::AnyPool` only natively decodes primitive types, so every column
//! holding a UUID, a timestamp, or a JSON token map is fetched as `String`
//! and converted here. All helpers return `sqlx::Error` so they compose
//! with manual row decoding.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use sqlx::{any::AnyRow, Row};
use uuid::Uuid;

pub fn get_uuid(row: &AnyRow, col: &str) -> Result<Uuid, sqlx::Error> {
    let s: String = row.try_get(col)?;
    Uuid::parse_str(&s).map_err(|e| sqlx::Error::Decode(Box::new(e) as _))
}

pub fn get_opt_uuid(row: &AnyRow, col: &str) -> Result<Option<Uuid>, sqlx::Error> {
    let s: Option<String> = row.try_get(col)?;
    s.map(|v| Uuid::parse_str(&v).map_err(|e| sqlx::Error::Decode(Box::new(e) as _)))
        .transpose()
}

/// Boolean column — stored as INTEGER 0/1 so the Any driver decodes it on
/// both backends (SQLite has no bool kind over Any).
pub fn get_bool(row: &AnyRow, col: &str) -> Result<bool, sqlx::Error> {
    if let Ok(v) = row.try_get::<bool, _>(col) {
        return Ok(v);
    }
    let v: i64 = row.try_get(col)?;
    Ok(v != 0)
}

pub fn get_datetime(row: &AnyRow, col: &str) -> Result<DateTime<Utc>, sqlx::Error> {
    let s: String = row.try_get(col)?;
    parse_datetime(&s).map_err(sqlx::Error::Decode)
}

/// Typed JSON column — theme token maps are stored as JSON text.
pub fn get_json<T: DeserializeOwned>(row: &AnyRow, col: &str) -> Result<T, sqlx::Error> {
    let s: String = row.try_get(col)?;
    serde_json::from_str(&s).map_err(|e| sqlx::Error::Decode(Box::new(e) as _))
}

pub fn get_opt_json<T: DeserializeOwned>(
    row: &AnyRow,
    col: &str,
) -> Result<Option<T>, sqlx::Error> {
    let s: Option<String> = row.try_get(col)?;
    s.map(|v| serde_json::from_str(&v).map_err(|e| sqlx::Error::Decode(Box::new(e) as _)))
        .transpose()
}

fn parse_datetime(
    s: &str,
) -> Result<DateTime<Utc>, Box<dyn std::error::Error + Send + Sync + 'static>> {
    // RFC 3339 — what the repository writes, and what Postgres emits over
    // the Any text protocol
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    // SQLite CURRENT_TIMESTAMP format: "2024-01-15 10:30:00"
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.and_utc());
    }
    // With fractional seconds
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(dt.and_utc());
    }
    Err(format!("cannot parse timestamp: {s}").into())
}
