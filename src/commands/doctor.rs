// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use crate::store;
use crate::utils::{months_between, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = diagnose(conn)?;
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        let data = rows.into_iter().map(|(k, d)| vec![k, d]).collect();
        println!("{}", pretty_table(&["Issue", "Detail"], data));
        println!("Run `networth snapshot recompute` to rewrite stale totals.");
    }
    Ok(())
}

/// `(issue, detail)` pairs; empty when the database is consistent.
pub fn diagnose(conn: &Connection) -> Result<Vec<(String, String)>> {
    let mut rows = Vec::new();

    // Oldest first so gaps and the previous net worth read naturally.
    let mut snapshots = store::load_snapshots(conn, None)?;
    snapshots.reverse();

    // 1) Stored totals that no longer match the entries
    let live: HashMap<(i32, u32), Decimal> = snapshots
        .iter()
        .map(|s| ((s.year, s.month), s.net_worth()))
        .collect();
    for s in &snapshots {
        let stored = store::stored_totals(conn, s.id)?;
        let (py, pm) = crate::utils::previous_month(s.year, s.month);
        let expected_change = live
            .get(&(py, pm))
            .map(|prev| s.net_worth() - prev)
            .unwrap_or(Decimal::ZERO);
        let t = &s.totals;
        if stored.total_assets != t.total_assets
            || stored.total_liabilities != t.total_liabilities
            || stored.net_worth != t.net_worth
            || stored.personal_wealth != t.personal_wealth
            || stored.company_wealth != t.company_wealth
            || stored.change_from_previous != expected_change
        {
            rows.push((
                "stale_totals".into(),
                format!(
                    "{} stored net worth {} vs entries {}",
                    s.label(),
                    stored.net_worth,
                    t.net_worth
                ),
            ));
        }
    }

    // 2) Missing months between recorded snapshots
    for pair in snapshots.windows(2) {
        let gap = months_between(pair[0].year, pair[0].month, pair[1].year, pair[1].month);
        if gap > 1 {
            rows.push((
                "month_gap".into(),
                format!(
                    "{} month(s) missing between {} and {}",
                    gap - 1,
                    pair[0].label(),
                    pair[1].label()
                ),
            ));
        }
    }

    // 3) Goals pointing at categories that are gone
    let mut stmt = conn.prepare(
        "SELECT g.id, g.name, g.category_id FROM goals g
         LEFT JOIN categories c ON g.category_id=c.id
         WHERE g.category_id IS NOT NULL AND c.id IS NULL",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let name: String = r.get(1)?;
        let cat: i64 = r.get(2)?;
        rows.push((
            "goal_missing_category".into(),
            format!("goal #{} '{}' -> category {}", id, name, cat),
        ));
    }

    Ok(rows)
}
