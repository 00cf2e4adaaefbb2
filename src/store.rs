// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! SQLite persistence for categories, snapshots, goals and income items.
//!
//! Snapshot writes run inside one transaction so the (year, month)
//! uniqueness check, the write, and the cascade into the following month all
//! see the same data.

use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;

use crate::engine::aggregate;
use crate::errors::{StoreError, ValidationError};
use crate::models::{
    Category, CategoryGroup, CategoryKind, Entry, Goal, GoalKind, IncomeItem, Snapshot, Totals,
    TrackingPeriod,
};
use crate::utils::{next_month, previous_month, stored_decimal, validate_name, validate_period};

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

pub fn insert_category(conn: &Connection, category: &Category) -> Result<i64> {
    let name = validate_name(&category.name)?;
    conn.execute(
        "INSERT INTO categories(name, kind, grp, is_personal, display_order) VALUES (?1,?2,?3,?4,?5)",
        params![
            name,
            category.kind.as_str(),
            category.group.as_str(),
            category.is_personal,
            category.display_order
        ],
    )
    .with_context(|| format!("Insert category '{}'", name))?;
    Ok(conn.last_insert_rowid())
}

/// Updates kind, group, ownership and order. Stored snapshot totals are not
/// rewritten here; reads always recompute from entries.
pub fn update_category(conn: &Connection, category: &Category) -> Result<()> {
    let name = validate_name(&category.name)?;
    let n = conn.execute(
        "UPDATE categories SET name=?1, kind=?2, grp=?3, is_personal=?4, display_order=?5 WHERE id=?6",
        params![
            name,
            category.kind.as_str(),
            category.group.as_str(),
            category.is_personal,
            category.display_order,
            category.id
        ],
    )?;
    if n == 0 {
        return Err(StoreError::CategoryNotFound(category.id.to_string()).into());
    }
    Ok(())
}

fn category_from_row(r: &Row<'_>, offset: usize) -> rusqlite::Result<(i64, String, String, String, bool, i64)> {
    Ok((
        r.get(offset)?,
        r.get(offset + 1)?,
        r.get(offset + 2)?,
        r.get(offset + 3)?,
        r.get(offset + 4)?,
        r.get(offset + 5)?,
    ))
}

fn build_category(raw: (i64, String, String, String, bool, i64)) -> Result<Category> {
    let (id, name, kind, grp, is_personal, display_order) = raw;
    let kind: CategoryKind = kind
        .parse()
        .with_context(|| format!("Invalid stored kind for category '{}'", name))?;
    Ok(Category {
        id,
        name,
        kind,
        group: CategoryGroup::from(grp),
        is_personal,
        display_order,
    })
}

pub fn list_categories(conn: &Connection) -> Result<Vec<Category>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, name, kind, grp, is_personal, display_order FROM categories
         ORDER BY display_order, name",
    )?;
    let rows = stmt.query_map([], |r| category_from_row(r, 0))?;
    let mut out = Vec::new();
    for row in rows {
        out.push(build_category(row?)?);
    }
    Ok(out)
}

pub fn category_by_id(conn: &Connection, id: i64) -> Result<Category> {
    let raw = conn
        .query_row(
            "SELECT id, name, kind, grp, is_personal, display_order FROM categories WHERE id=?1",
            params![id],
            |r| category_from_row(r, 0),
        )
        .optional()?
        .ok_or_else(|| StoreError::CategoryNotFound(id.to_string()))?;
    build_category(raw)
}

pub fn category_by_name(conn: &Connection, name: &str) -> Result<Category> {
    let id = crate::utils::id_for_category(conn, name)?;
    category_by_id(conn, id)
}

pub fn delete_category(conn: &Connection, id: i64) -> Result<()> {
    let category = category_by_id(conn, id)?;
    let in_use: i64 = conn.query_row(
        "SELECT (SELECT COUNT(*) FROM entries WHERE category_id=?1)
              + (SELECT COUNT(*) FROM goals WHERE category_id=?1)",
        params![id],
        |r| r.get(0),
    )?;
    if in_use > 0 {
        return Err(StoreError::CategoryInUse(category.name).into());
    }
    conn.execute("DELETE FROM categories WHERE id=?1", params![id])?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

struct SnapshotRow {
    id: i64,
    month: u32,
    year: i32,
    timestamp: DateTime<Utc>,
    change_from_previous: String,
}

/// Snapshot history, newest first. `limit` bounds how many months are
/// loaded; 12 covers every tracking window.
pub fn load_snapshots(conn: &Connection, limit: Option<usize>) -> Result<Vec<Snapshot>> {
    let mut sql = String::from(
        "SELECT id, month, year, timestamp, change_from_previous FROM snapshots
         ORDER BY year DESC, month DESC",
    );
    if let Some(n) = limit {
        sql.push_str(&format!(" LIMIT {}", n));
    }
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |r| {
        Ok(SnapshotRow {
            id: r.get(0)?,
            month: r.get(1)?,
            year: r.get(2)?,
            timestamp: r.get(3)?,
            change_from_previous: r.get(4)?,
        })
    })?;
    let mut heads = Vec::new();
    for row in rows {
        heads.push(row?);
    }
    if heads.is_empty() {
        return Ok(Vec::new());
    }

    let wanted: HashSet<i64> = heads.iter().map(|h| h.id).collect();
    let mut entries_by_snapshot = load_entries(conn, None)?;
    entries_by_snapshot.retain(|id, _| wanted.contains(id));

    let mut out = Vec::with_capacity(heads.len());
    for head in heads {
        let entries = entries_by_snapshot.remove(&head.id).unwrap_or_default();
        out.push(hydrate(head, entries)?);
    }
    Ok(out)
}

pub fn find_snapshot(conn: &Connection, year: i32, month: u32) -> Result<Option<Snapshot>> {
    let id = snapshot_id_for(conn, year, month)?;
    match id {
        Some(id) => Ok(Some(snapshot_by_id(conn, id)?)),
        None => Ok(None),
    }
}

pub fn snapshot_by_id(conn: &Connection, id: i64) -> Result<Snapshot> {
    let head = conn
        .query_row(
            "SELECT id, month, year, timestamp, change_from_previous FROM snapshots WHERE id=?1",
            params![id],
            |r| {
                Ok(SnapshotRow {
                    id: r.get(0)?,
                    month: r.get(1)?,
                    year: r.get(2)?,
                    timestamp: r.get(3)?,
                    change_from_previous: r.get(4)?,
                })
            },
        )
        .optional()?
        .ok_or_else(|| StoreError::SnapshotNotFound(id.to_string()))?;
    hydrate(head, entries_of(conn, id)?)
}

pub fn snapshot_id_for(conn: &Connection, year: i32, month: u32) -> Result<Option<i64>> {
    Ok(conn
        .query_row(
            "SELECT id FROM snapshots WHERE year=?1 AND month=?2",
            params![year, month],
            |r| r.get(0),
        )
        .optional()?)
}

fn entries_of(conn: &Connection, snapshot_id: i64) -> Result<Vec<Entry>> {
    Ok(load_entries(conn, Some(snapshot_id))?
        .remove(&snapshot_id)
        .unwrap_or_default())
}

/// Entries grouped by snapshot id; all snapshots when `only` is `None`.
fn load_entries(conn: &Connection, only: Option<i64>) -> Result<HashMap<i64, Vec<Entry>>> {
    let mut stmt = conn.prepare_cached(
        "SELECT e.snapshot_id, e.id, e.amount,
                c.id, c.name, c.kind, c.grp, c.is_personal, c.display_order
         FROM entries e JOIN categories c ON e.category_id=c.id
         WHERE ?1 IS NULL OR e.snapshot_id=?1
         ORDER BY e.snapshot_id, e.id",
    )?;
    let rows = stmt.query_map(params![only], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, i64>(1)?,
            r.get::<_, String>(2)?,
            category_from_row(r, 3)?,
        ))
    })?;
    let mut out: HashMap<i64, Vec<Entry>> = HashMap::new();
    for row in rows {
        let (snapshot_id, entry_id, amount_s, raw_cat) = row?;
        let category = build_category(raw_cat)?;
        let amount = stored_decimal(&amount_s, "entry amount")?;
        // Built directly: a category's kind may have changed since the entry
        // was written, and reads must not fail on that.
        out.entry(snapshot_id).or_default().push(Entry {
            id: entry_id,
            category_id: category.id,
            category,
            amount,
        });
    }
    Ok(out)
}

/// Derived fields come from the entries and current category metadata;
/// only `change_from_previous` is taken from the stored row.
fn hydrate(head: SnapshotRow, entries: Vec<Entry>) -> Result<Snapshot> {
    let mut totals = aggregate::aggregate(&entries, None);
    totals.change_from_previous = stored_decimal(&head.change_from_previous, "change_from_previous")?;
    Ok(Snapshot {
        id: head.id,
        month: head.month,
        year: head.year,
        timestamp: head.timestamp,
        totals,
        entries,
    })
}

/// Resolves `(category_id, amount)` pairs into validated entries.
fn resolve_entries(conn: &Connection, raw: &[(i64, Decimal)]) -> Result<Vec<Entry>> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(raw.len());
    for (category_id, amount) in raw {
        let category = category_by_id(conn, *category_id)?;
        if !seen.insert(category.id) {
            return Err(ValidationError::DuplicateEntry(category.name).into());
        }
        out.push(Entry::new(0, category, *amount)?);
    }
    Ok(out)
}

fn insert_entries(conn: &Connection, snapshot_id: i64, entries: &[Entry]) -> Result<()> {
    let mut stmt = conn
        .prepare_cached("INSERT INTO entries(snapshot_id, category_id, amount) VALUES (?1,?2,?3)")?;
    for e in entries {
        stmt.execute(params![snapshot_id, e.category_id, e.amount.to_string()])?;
    }
    Ok(())
}

fn ensure_free(conn: &Connection, year: i32, month: u32, except: Option<i64>) -> Result<()> {
    if let Some(existing) = snapshot_id_for(conn, year, month)? {
        if Some(existing) != except {
            return Err(StoreError::SnapshotExists { year, month }.into());
        }
    }
    Ok(())
}

pub fn create_snapshot(
    conn: &mut Connection,
    year: i32,
    month: u32,
    entries: &[(i64, Decimal)],
) -> Result<Snapshot> {
    validate_period(year, month)?;
    let tx = conn.transaction()?;
    ensure_free(&tx, year, month, None)?;
    let resolved = resolve_entries(&tx, entries)?;

    tx.execute(
        "INSERT INTO snapshots(month, year, timestamp) VALUES (?1,?2,?3)",
        params![month, year, Utc::now()],
    )?;
    let id = tx.last_insert_rowid();
    insert_entries(&tx, id, &resolved)?;
    recompute_chain(&tx, month, year)?;
    tx.commit()?;

    tracing::info!(year, month, entries = resolved.len(), "snapshot created");
    snapshot_by_id(conn, id)
}

/// Moves and/or re-enters a snapshot. `entries`, when given, replaces the
/// whole entry set.
pub fn update_snapshot(
    conn: &mut Connection,
    id: i64,
    period: Option<(i32, u32)>,
    entries: Option<&[(i64, Decimal)]>,
) -> Result<Snapshot> {
    let tx = conn.transaction()?;
    let (old_year, old_month): (i32, u32) = tx
        .query_row(
            "SELECT year, month FROM snapshots WHERE id=?1",
            params![id],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .optional()?
        .ok_or_else(|| StoreError::SnapshotNotFound(id.to_string()))?;

    let (year, month) = period.unwrap_or((old_year, old_month));
    validate_period(year, month)?;
    let moved = (year, month) != (old_year, old_month);
    if moved {
        ensure_free(&tx, year, month, Some(id))?;
        tx.execute(
            "UPDATE snapshots SET year=?1, month=?2 WHERE id=?3",
            params![year, month, id],
        )?;
    }

    if let Some(raw) = entries {
        let resolved = resolve_entries(&tx, raw)?;
        tx.execute("DELETE FROM entries WHERE snapshot_id=?1", params![id])?;
        insert_entries(&tx, id, &resolved)?;
    }

    recompute_chain(&tx, month, year)?;
    if moved {
        // The month that used to follow the old slot lost its predecessor.
        let (ny, nm) = next_month(old_year, old_month);
        if snapshot_id_for(&tx, ny, nm)?.is_some() {
            recompute_chain(&tx, nm, ny)?;
        }
    }
    tx.commit()?;

    tracing::info!(id, year, month, moved, "snapshot updated");
    snapshot_by_id(conn, id)
}

pub fn delete_snapshot(conn: &mut Connection, id: i64) -> Result<()> {
    let tx = conn.transaction()?;
    let (year, month): (i32, u32) = tx
        .query_row(
            "SELECT year, month FROM snapshots WHERE id=?1",
            params![id],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .optional()?
        .ok_or_else(|| StoreError::SnapshotNotFound(id.to_string()))?;
    tx.execute("DELETE FROM entries WHERE snapshot_id=?1", params![id])?;
    tx.execute("DELETE FROM snapshots WHERE id=?1", params![id])?;

    let (ny, nm) = next_month(year, month);
    if snapshot_id_for(&tx, ny, nm)?.is_some() {
        recompute_chain(&tx, nm, ny)?;
    }
    tx.commit()?;
    tracing::info!(id, year, month, "snapshot deleted");
    Ok(())
}

fn stored_net_worth(conn: &Connection, year: i32, month: u32) -> Result<Option<Decimal>> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT net_worth FROM snapshots WHERE year=?1 AND month=?2",
            params![year, month],
            |r| r.get(0),
        )
        .optional()?;
    raw.map(|s| stored_decimal(&s, "net_worth")).transpose()
}

/// Recomputes and stores one month's totals against the calendar-previous
/// month. Returns the new net worth, or `None` if no such snapshot.
fn recompute_one(conn: &Connection, year: i32, month: u32) -> Result<Option<Decimal>> {
    let Some(id) = snapshot_id_for(conn, year, month)? else {
        return Ok(None);
    };
    let (py, pm) = previous_month(year, month);
    let previous = stored_net_worth(conn, py, pm)?;
    let entries = entries_of(conn, id)?;
    let totals = aggregate::aggregate(&entries, previous);
    store_totals(conn, id, &totals)?;
    Ok(Some(totals.net_worth))
}

fn store_totals(conn: &Connection, id: i64, t: &Totals) -> Result<()> {
    conn.execute(
        "UPDATE snapshots SET total_assets=?1, total_liabilities=?2, net_worth=?3,
             change_from_previous=?4, personal_wealth=?5, company_wealth=?6
         WHERE id=?7",
        params![
            t.total_assets.to_string(),
            t.total_liabilities.to_string(),
            t.net_worth.to_string(),
            t.change_from_previous.to_string(),
            t.personal_wealth.to_string(),
            t.company_wealth.to_string(),
            id
        ],
    )?;
    Ok(())
}

/// Two-step cascade for an edit of `(year, month)`: recompute that month
/// from its entries, then recompute its immediate calendar successor so its
/// `change_from_previous` reflects the new value.
///
/// The caller is expected to hold a transaction (a
/// [`rusqlite::Transaction`] derefs to [`Connection`]).
pub fn recompute_chain(conn: &Connection, month: u32, year: i32) -> Result<()> {
    recompute_one(conn, year, month)?;
    let (ny, nm) = next_month(year, month);
    if recompute_one(conn, ny, nm)?.is_some() {
        tracing::debug!(year = ny, month = nm, "recomputed successor snapshot");
    }
    Ok(())
}

/// Oldest-first rewrite of every stored total. Returns the number of
/// snapshots touched.
pub fn recompute_all(conn: &mut Connection) -> Result<usize> {
    let tx = conn.transaction()?;
    let periods: Vec<(i32, u32)> = {
        let mut stmt = tx.prepare("SELECT year, month FROM snapshots ORDER BY year, month")?;
        let rows = stmt.query_map([], |r| Ok((r.get(0)?, r.get(1)?)))?;
        rows.collect::<rusqlite::Result<_>>()?
    };
    for (year, month) in &periods {
        recompute_one(&tx, *year, *month)?;
    }
    tx.commit()?;
    tracing::info!(count = periods.len(), "recomputed all snapshots");
    Ok(periods.len())
}

/// Stored totals exactly as persisted, for comparison with a fresh
/// aggregation.
pub fn stored_totals(conn: &Connection, id: i64) -> Result<Totals> {
    let raw: (String, String, String, String, String, String) = conn.query_row(
        "SELECT total_assets, total_liabilities, net_worth, change_from_previous,
                personal_wealth, company_wealth
         FROM snapshots WHERE id=?1",
        params![id],
        |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?, r.get(4)?, r.get(5)?)),
    )?;
    Ok(Totals {
        total_assets: stored_decimal(&raw.0, "total_assets")?,
        total_liabilities: stored_decimal(&raw.1, "total_liabilities")?,
        net_worth: stored_decimal(&raw.2, "net_worth")?,
        change_from_previous: stored_decimal(&raw.3, "change_from_previous")?,
        personal_wealth: stored_decimal(&raw.4, "personal_wealth")?,
        company_wealth: stored_decimal(&raw.5, "company_wealth")?,
        ..Totals::default()
    })
}

// ---------------------------------------------------------------------------
// Goals
// ---------------------------------------------------------------------------

fn check_goal_refs(conn: &Connection, goal: &Goal) -> Result<()> {
    goal.validate()?;
    if let Some(id) = goal.kind.category_id() {
        category_by_id(conn, id)?;
    }
    Ok(())
}

pub fn insert_goal(conn: &Connection, goal: &Goal) -> Result<i64> {
    check_goal_refs(conn, goal)?;
    conn.execute(
        "INSERT INTO goals(name, goal_type, target_value, category_id, tracking_period,
                           target_date, starting_value, is_active, created_at)
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9)",
        params![
            goal.name.trim(),
            goal.kind.goal_type(),
            goal.target_value.to_string(),
            goal.kind.category_id(),
            goal.kind.tracking_period().map(|p| p.as_str()),
            goal.target_date,
            goal.kind.starting_value().map(|v| v.to_string()),
            goal.is_active,
            goal.created_at
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_goal(conn: &Connection, goal: &Goal) -> Result<()> {
    check_goal_refs(conn, goal)?;
    let n = conn.execute(
        "UPDATE goals SET name=?1, goal_type=?2, target_value=?3, category_id=?4,
             tracking_period=?5, target_date=?6, starting_value=?7, is_active=?8
         WHERE id=?9",
        params![
            goal.name.trim(),
            goal.kind.goal_type(),
            goal.target_value.to_string(),
            goal.kind.category_id(),
            goal.kind.tracking_period().map(|p| p.as_str()),
            goal.target_date,
            goal.kind.starting_value().map(|v| v.to_string()),
            goal.is_active,
            goal.id
        ],
    )?;
    if n == 0 {
        return Err(StoreError::GoalNotFound(goal.id).into());
    }
    Ok(())
}

pub fn delete_goal(conn: &Connection, id: i64) -> Result<()> {
    let n = conn.execute("DELETE FROM goals WHERE id=?1", params![id])?;
    if n == 0 {
        return Err(StoreError::GoalNotFound(id).into());
    }
    Ok(())
}

type GoalColumns = (
    i64,
    String,
    String,
    String,
    Option<i64>,
    Option<String>,
    Option<NaiveDate>,
    Option<String>,
    bool,
    DateTime<Utc>,
);

const GOAL_COLUMNS: &str = "id, name, goal_type, target_value, category_id, tracking_period,
     target_date, starting_value, is_active, created_at";

fn goal_from_row(r: &Row<'_>) -> rusqlite::Result<GoalColumns> {
    Ok((
        r.get(0)?,
        r.get(1)?,
        r.get(2)?,
        r.get(3)?,
        r.get(4)?,
        r.get(5)?,
        r.get(6)?,
        r.get(7)?,
        r.get(8)?,
        r.get(9)?,
    ))
}

fn build_goal(raw: GoalColumns) -> Result<Goal> {
    let (id, name, goal_type, target_s, category_id, period_s, target_date, start_s, is_active, created_at) =
        raw;
    let tracking_period = period_s
        .map(|p| p.parse::<TrackingPeriod>())
        .transpose()
        .with_context(|| format!("Invalid stored tracking_period for goal {}", id))?;
    let starting_value = start_s
        .map(|s| stored_decimal(&s, "starting_value"))
        .transpose()?;
    let kind = GoalKind::from_parts(&goal_type, category_id, tracking_period, starting_value)
        .with_context(|| format!("Invalid stored goal {}", id))?;
    Ok(Goal {
        id,
        name,
        kind,
        target_value: stored_decimal(&target_s, "target_value")?,
        target_date,
        is_active,
        created_at,
    })
}

/// Goals newest first.
pub fn list_goals(conn: &Connection, active_only: bool) -> Result<Vec<Goal>> {
    let mut sql = format!("SELECT {} FROM goals", GOAL_COLUMNS);
    if active_only {
        sql.push_str(" WHERE is_active=1");
    }
    sql.push_str(" ORDER BY created_at DESC, id DESC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], goal_from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(build_goal(row?)?);
    }
    Ok(out)
}

pub fn goal_by_id(conn: &Connection, id: i64) -> Result<Goal> {
    let raw = conn
        .query_row(
            &format!("SELECT {} FROM goals WHERE id=?1", GOAL_COLUMNS),
            params![id],
            goal_from_row,
        )
        .optional()?
        .ok_or(StoreError::GoalNotFound(id))?;
    build_goal(raw)
}

// ---------------------------------------------------------------------------
// Income
// ---------------------------------------------------------------------------

pub fn insert_income(conn: &Connection, item: &IncomeItem) -> Result<i64> {
    let name = validate_name(&item.name)?;
    crate::utils::validate_amount("gross_amount", item.gross_amount)?;
    if let Some(pct) = item.tax_percentage {
        crate::utils::validate_percentage("tax_percentage", pct)?;
    }
    conn.execute(
        "INSERT INTO income_items(name, gross_amount, is_taxed, tax_percentage, is_deduction)
         VALUES (?1,?2,?3,?4,?5)",
        params![
            name,
            item.gross_amount.to_string(),
            item.is_taxed,
            item.tax_percentage.map(|p| p.to_string()),
            item.is_deduction
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_income(conn: &Connection) -> Result<Vec<IncomeItem>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, name, gross_amount, is_taxed, tax_percentage, is_deduction
         FROM income_items ORDER BY name",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, bool>(3)?,
            r.get::<_, Option<String>>(4)?,
            r.get::<_, bool>(5)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, name, gross_s, is_taxed, pct_s, is_deduction) = row?;
        out.push(IncomeItem {
            id,
            gross_amount: stored_decimal(&gross_s, "gross_amount")?,
            tax_percentage: pct_s
                .map(|s| stored_decimal(&s, "tax_percentage"))
                .transpose()?,
            name,
            is_taxed,
            is_deduction,
        });
    }
    Ok(out)
}

pub fn delete_income(conn: &Connection, id: i64) -> Result<()> {
    let n = conn.execute("DELETE FROM income_items WHERE id=?1", params![id])?;
    if n == 0 {
        return Err(StoreError::IncomeNotFound(id).into());
    }
    Ok(())
}
