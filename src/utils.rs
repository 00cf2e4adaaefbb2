// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::Once;

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, NaiveDate};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use crate::errors::{StoreError, ValidationError};
use crate::models::{MAX_AMOUNT_VALUE, MAX_NAME_LENGTH};

pub const DEFAULT_TAX_PERCENTAGE: Decimal = Decimal::from_parts(250, 0, 0, false, 1);

static TRACING_INIT: Once = Once::new();

/// Installs the global tracing subscriber. `RUST_LOG` overrides the default
/// `networth=warn` directive.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("networth=warn"));
        fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    });
}

/// Accepts a plain `YYYY-MM-DD` or a full RFC 3339 timestamp
/// (`2026-12-31T00:00:00+00:00`, `...Z`).
pub fn parse_target_date(s: &str) -> Result<NaiveDate, ValidationError> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.date_naive())
        .map_err(|_| ValidationError::InvalidDate(s.to_string()))
}

/// Parses `YYYY-MM` into `(year, month)`.
pub fn parse_period(s: &str) -> Result<(i32, u32)> {
    let s = s.trim();
    let d = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    let (year, month) = (d.year(), d.month());
    validate_period(year, month)?;
    Ok((year, month))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Reads a decimal stored as TEXT, naming the column in the error.
pub fn stored_decimal(raw: &str, what: &str) -> Result<Decimal> {
    Decimal::from_str_exact(raw).with_context(|| format!("Invalid stored {} '{}'", what, raw))
}

pub fn validate_period(year: i32, month: u32) -> Result<(), ValidationError> {
    if !(1..=12).contains(&month) {
        return Err(ValidationError::MonthOutOfRange(month));
    }
    if !(1900..=2100).contains(&year) {
        return Err(ValidationError::YearOutOfRange(year));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::NameLength {
            max: MAX_NAME_LENGTH,
        });
    }
    Ok(name.to_string())
}

pub fn validate_amount(field: &str, amount: Decimal) -> Result<Decimal, ValidationError> {
    if amount.abs() > Decimal::from(MAX_AMOUNT_VALUE) {
        return Err(ValidationError::AmountTooLarge {
            field: field.to_string(),
        });
    }
    Ok(amount)
}

pub fn validate_percentage(field: &str, value: Decimal) -> Result<Decimal, ValidationError> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(ValidationError::PercentageOutOfRange {
            field: field.to_string(),
        });
    }
    Ok(value)
}

pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    add_months(year, month, 1)
}

pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// Moves `n` months forward from `(year, month)`, carrying into the year.
pub fn add_months(year: i32, month: u32, n: u32) -> (i32, u32) {
    let zero_based = month as i64 - 1 + n as i64;
    let y = year as i64 + zero_based.div_euclid(12);
    let m = zero_based.rem_euclid(12) + 1;
    (y as i32, m as u32)
}

/// Whole calendar months from `(from_year, from_month)` to
/// `(to_year, to_month)`; days are ignored.
pub fn months_between(from_year: i32, from_month: u32, to_year: i32, to_month: u32) -> i64 {
    (to_year as i64 - from_year as i64) * 12 + (to_month as i64 - from_month as i64)
}

pub fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

pub fn fmt_opt_money(d: Option<Decimal>) -> String {
    d.map(|v| fmt_money(&v)).unwrap_or_default()
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

pub fn id_for_category(conn: &Connection, name: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM categories WHERE name=?1")?;
    let id: Option<i64> = stmt
        .query_row(params![name.trim()], |r| r.get(0))
        .optional()?;
    id.ok_or_else(|| StoreError::CategoryNotFound(format!("'{}'", name.trim())).into())
}

// Tax settings
pub fn get_tax_percentage(conn: &Connection) -> Result<Decimal> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='tax_percentage'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    match v {
        Some(s) => stored_decimal(&s, "tax_percentage"),
        None => Ok(DEFAULT_TAX_PERCENTAGE),
    }
}

pub fn set_tax_percentage(conn: &Connection, pct: Decimal) -> Result<()> {
    validate_percentage("tax_percentage", pct)?;
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('tax_percentage', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![pct.to_string()],
    )?;
    Ok(())
}
