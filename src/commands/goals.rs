// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::income::net_income;
use crate::engine::progress::{self, ProgressContext};
use crate::models::{Goal, GoalKind, GoalProgress, GoalRecord, ProgressStatus, TrackingPeriod};
use crate::store;
use crate::utils::{
    fmt_money, get_tax_percentage, id_for_category, maybe_print_json, parse_decimal,
    parse_target_date, pretty_table,
};
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;

const HISTORY_MONTHS: usize = 12;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let id = add(conn, sub)?;
            let g = store::goal_by_id(conn, id)?;
            println!("Added goal #{} '{}' ({})", g.id, g.name, g.kind.goal_type());
        }
        Some(("list", sub)) => list(conn, sub)?,
        Some(("update", sub)) => {
            let g = update(conn, sub)?;
            println!("Updated goal #{} '{}'", g.id, g.name);
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            store::delete_goal(conn, id)?;
            println!("Removed goal #{}", id);
        }
        Some(("progress", sub)) => show_progress(conn, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<i64> {
    let name = sub.get_one::<String>("name").unwrap();
    let goal_type = sub.get_one::<String>("type").unwrap();
    let target = parse_decimal(sub.get_one::<String>("target").unwrap())?;
    let category_id = sub
        .get_one::<String>("category")
        .map(|c| id_for_category(conn, c))
        .transpose()?;
    let period = sub
        .get_one::<String>("period")
        .map(|p| p.parse::<TrackingPeriod>())
        .transpose()?;
    let mut starting_value = sub
        .get_one::<String>("starting-value")
        .map(|s| parse_decimal(s))
        .transpose()?;

    let mut kind = GoalKind::from_parts(goal_type, category_id, period, starting_value)?;
    if let GoalKind::CategoryTarget { category_id, .. } = kind {
        if starting_value.is_none() && store::category_by_id(conn, category_id)?.is_liability() {
            starting_value = current_debt(conn, category_id)?;
            kind = GoalKind::CategoryTarget {
                category_id,
                starting_value,
            };
        }
    }

    let mut goal = Goal::new(name.trim(), kind, target);
    if let Some(d) = sub.get_one::<String>("date") {
        goal = goal.with_target_date(parse_target_date(d)?);
    }
    store::insert_goal(conn, &goal)
}

/// Magnitude of a liability in the latest snapshot, the paydown baseline.
fn current_debt(conn: &Connection, category_id: i64) -> Result<Option<Decimal>> {
    let latest = store::load_snapshots(conn, Some(1))?;
    Ok(latest
        .first()
        .map(|s| s.category_amount(category_id).abs()))
}

pub fn update(conn: &Connection, sub: &clap::ArgMatches) -> Result<Goal> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut goal = store::goal_by_id(conn, id)?;

    if let Some(name) = sub.get_one::<String>("name") {
        goal.name = name.trim().to_string();
    }
    if let Some(t) = sub.get_one::<String>("target") {
        goal.target_value = parse_decimal(t)?;
    }
    if let Some(d) = sub.get_one::<String>("date") {
        goal.target_date = Some(parse_target_date(d)?);
    }
    if sub.get_flag("clear-date") {
        goal.target_date = None;
    }
    if let Some(p) = sub.get_one::<String>("period") {
        let period: TrackingPeriod = p.parse()?;
        goal.kind = GoalKind::from_parts(
            goal.kind.goal_type(),
            goal.kind.category_id(),
            Some(period),
            goal.kind.starting_value(),
        )?;
    }
    if let Some(active) = sub.get_one::<bool>("active") {
        goal.is_active = *active;
    }
    store::update_goal(conn, &goal)?;
    Ok(goal)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let goals = store::list_goals(conn, !sub.get_flag("all"))?;
    let mut records: Vec<GoalRecord> = Vec::with_capacity(goals.len());
    for g in &goals {
        let category = g
            .kind
            .category_id()
            .map(|id| store::category_by_id(conn, id))
            .transpose()?;
        records.push(g.record(category.as_ref()));
    }
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &records)? {
        return Ok(());
    }
    let data = records
        .into_iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.name,
                r.goal_type,
                fmt_money(&r.target_value),
                r.category.map(|c| c.name).unwrap_or_default(),
                r.tracking_period.map(|p| p.to_string()).unwrap_or_default(),
                r.target_date.map(|d| d.to_string()).unwrap_or_default(),
                if r.is_active { "yes" } else { "no" }.into(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Name", "Type", "Target", "Category", "Period", "Date", "Active"],
            data
        )
    );
    Ok(())
}

/// Progress of every active goal (or one goal by id) as of `today`.
pub fn progress_report(
    conn: &Connection,
    only: Option<i64>,
    today: NaiveDate,
) -> Result<Vec<GoalProgress>> {
    let snapshots = store::load_snapshots(conn, Some(HISTORY_MONTHS))?;
    let categories = store::list_categories(conn)?;
    let income = store::list_income(conn)?;
    let ctx = ProgressContext {
        snapshots: &snapshots,
        categories: &categories,
        net_income: net_income(&income, get_tax_percentage(conn)?),
        today,
    };
    Ok(match only {
        Some(id) => vec![progress::evaluate(&store::goal_by_id(conn, id)?, &ctx)],
        None => progress::evaluate_all(&store::list_goals(conn, true)?, &ctx),
    })
}

fn show_progress(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let only = sub.get_one::<i64>("id").copied();
    let report = progress_report(conn, only, Utc::now().date_naive())?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    let data = report
        .into_iter()
        .map(|p| {
            let status = match p.status {
                Some(ProgressStatus::OnTrack) => "on track",
                Some(ProgressStatus::Behind) => "behind",
                None => "-",
            };
            let eta = p
                .forecast
                .as_ref()
                .and_then(|f| f.forecast_date)
                .map(|d| d.format("%Y-%m").to_string())
                .unwrap_or_default();
            vec![
                p.goal.name,
                p.goal.goal_type,
                fmt_money(&p.current_value),
                fmt_money(&p.target_value),
                format!("{}%", p.progress_percentage),
                if p.is_achieved { "yes" } else { "no" }.into(),
                status.into(),
                eta,
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Goal", "Type", "Current", "Target", "Progress", "Achieved", "Status", "ETA"],
            data
        )
    );
    Ok(())
}
