// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::{StoreError, ValidationError};
use crate::models::Snapshot;
use crate::store;
use crate::utils::{fmt_money, id_for_category, maybe_print_json, parse_decimal, parse_period, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let s = add(conn, sub)?;
            println!(
                "Recorded {} net worth {} ({:+})",
                s.label(),
                fmt_money(&s.net_worth()),
                s.totals.change_from_previous.round_dp(2)
            );
        }
        Some(("update", sub)) => {
            let s = update(conn, sub)?;
            println!("Updated {} net worth {}", s.label(), fmt_money(&s.net_worth()));
        }
        Some(("show", sub)) => show(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let (year, month) = parse_period(sub.get_one::<String>("month").unwrap())?;
            let id = existing_id(conn, year, month)?;
            store::delete_snapshot(conn, id)?;
            println!("Removed snapshot {}-{:02}", year, month);
        }
        Some(("recompute", _)) => {
            let n = store::recompute_all(conn)?;
            println!("Recomputed {} snapshot(s)", n);
        }
        _ => {}
    }
    Ok(())
}

/// Resolves repeated `--entry NAME=AMOUNT` values to category ids.
pub fn parse_entries(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<(i64, Decimal)>> {
    let mut out = Vec::new();
    if let Some(values) = sub.get_many::<String>("entry") {
        for raw in values {
            let (name, amount) = raw
                .rsplit_once('=')
                .ok_or_else(|| ValidationError::MalformedEntry(raw.clone()))?;
            let id = id_for_category(conn, name)?;
            out.push((id, parse_decimal(amount)?));
        }
    }
    Ok(out)
}

fn existing_id(conn: &Connection, year: i32, month: u32) -> Result<i64> {
    store::snapshot_id_for(conn, year, month)?
        .ok_or_else(|| StoreError::SnapshotNotFound(format!("{}-{:02}", year, month)).into())
}

pub fn add(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<Snapshot> {
    let (year, month) = parse_period(sub.get_one::<String>("month").unwrap())?;
    let entries = parse_entries(conn, sub)?;
    store::create_snapshot(conn, year, month, &entries)
}

pub fn update(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<Snapshot> {
    let (year, month) = parse_period(sub.get_one::<String>("month").unwrap())?;
    let id = existing_id(conn, year, month)?;
    let new_period = sub
        .get_one::<String>("move-to")
        .map(|s| parse_period(s))
        .transpose()?;
    let entries = if sub.contains_id("entry") {
        Some(parse_entries(conn, sub)?)
    } else {
        None
    };
    store::update_snapshot(conn, id, new_period, entries.as_deref())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let snapshot = match sub.get_one::<String>("month") {
        Some(m) => {
            let (year, month) = parse_period(m)?;
            store::find_snapshot(conn, year, month)?
                .ok_or_else(|| StoreError::SnapshotNotFound(format!("{}-{:02}", year, month)))?
        }
        None => store::load_snapshots(conn, Some(1))?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::SnapshotNotFound("latest".into()))?,
    };
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &snapshot)? {
        return Ok(());
    }

    let data = snapshot
        .entries
        .iter()
        .map(|e| {
            vec![
                e.category.name.clone(),
                e.category.kind.to_string(),
                e.category.group.to_string(),
                fmt_money(&e.amount),
            ]
        })
        .collect();
    println!("Snapshot {}", snapshot.label());
    println!(
        "{}",
        pretty_table(&["Category", "Kind", "Group", "Amount"], data)
    );

    let t = &snapshot.totals;
    let mut summary = vec![
        vec!["Total assets".into(), fmt_money(&t.total_assets)],
        vec!["Total liabilities".into(), fmt_money(&t.total_liabilities)],
        vec!["Net worth".into(), fmt_money(&t.net_worth)],
        vec!["Change".into(), fmt_money(&t.change_from_previous)],
        vec!["Personal".into(), fmt_money(&t.personal_wealth)],
        vec!["Company".into(), fmt_money(&t.company_wealth)],
    ];
    for (group, amount) in &t.by_group {
        let pct = t
            .percentages
            .get(&format!("{}_pct", group))
            .map(|p| format!(" ({}%)", p))
            .unwrap_or_default();
        summary.push(vec![format!("  {}", group), format!("{}{}", fmt_money(amount), pct)]);
    }
    println!("{}", pretty_table(&["Figure", "Value"], summary));
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let limit = sub.get_one::<usize>("limit").copied();
    let snapshots = store::load_snapshots(conn, limit)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &snapshots)? {
        return Ok(());
    }
    let data = snapshots
        .iter()
        .map(|s| {
            vec![
                s.label(),
                fmt_money(&s.totals.total_assets),
                fmt_money(&s.totals.total_liabilities),
                fmt_money(&s.totals.net_worth),
                fmt_money(&s.totals.change_from_previous),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Month", "Assets", "Liabilities", "Net worth", "Change"],
            data
        )
    );
    Ok(())
}
