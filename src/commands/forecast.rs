// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::forecast;
use crate::models::{NetWorthForecast, TrackingPeriod, TrajectoryComparison};
use crate::store;
use crate::utils::{fmt_money, fmt_opt_money, maybe_print_json, parse_decimal, parse_target_date, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;

/// Every tracking window reads at most 12 months back.
const HISTORY_MONTHS: usize = 12;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("trajectory", sub)) => trajectory(conn, sub),
        Some(("eta", sub)) => eta(conn, sub),
        _ => {
            let fc = net_worth(conn, m)?;
            if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &fc)? {
                return Ok(());
            }
            println!(
                "Monthly change ({}, {} point(s)): {}",
                fc.period,
                fc.data_points_used,
                fmt_money(&fc.monthly_change_rate)
            );
            let data = fc
                .projections
                .iter()
                .map(|p| {
                    vec![
                        format!("{}-{:02}", p.year, p.month),
                        fmt_money(&p.projected_net_worth),
                    ]
                })
                .collect();
            println!("{}", pretty_table(&["Month", "Projected net worth"], data));
            Ok(())
        }
    }
}

fn period_of(m: &clap::ArgMatches) -> Result<TrackingPeriod> {
    Ok(m.get_one::<String>("period")
        .map(|s| s.parse::<TrackingPeriod>())
        .transpose()?
        .unwrap_or(TrackingPeriod::Quarter))
}

pub fn net_worth(conn: &Connection, m: &clap::ArgMatches) -> Result<NetWorthForecast> {
    let period = period_of(m)?;
    let months_ahead = forecast::validate_months_ahead(*m.get_one::<u32>("months-ahead").unwrap_or(&12))?;
    let snapshots = store::load_snapshots(conn, Some(HISTORY_MONTHS))?;
    Ok(forecast::net_worth_forecast(&snapshots, period, months_ahead))
}

pub fn trajectory_for(conn: &Connection, m: &clap::ArgMatches) -> Result<TrajectoryComparison> {
    let target = parse_decimal(m.get_one::<String>("target").unwrap())?;
    let date = parse_target_date(m.get_one::<String>("date").unwrap())?;
    let snapshots = store::load_snapshots(conn, Some(HISTORY_MONTHS))?;
    Ok(forecast::trajectory_comparison(&snapshots, target, date))
}

fn trajectory(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let tc = trajectory_for(conn, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &tc)? {
        return Ok(());
    }
    if tc.current_trajectory.is_empty() {
        println!("Not enough data or the target date has passed");
        return Ok(());
    }
    println!(
        "Current pace {} / month, required {} / month",
        fmt_opt_money(tc.current_rate),
        fmt_opt_money(tc.required_rate)
    );
    let data = tc
        .current_trajectory
        .iter()
        .zip(&tc.required_trajectory)
        .map(|(c, r)| vec![c.label.clone(), fmt_money(&c.value), fmt_money(&r.value)])
        .collect();
    println!("{}", pretty_table(&["Month", "Current pace", "Required pace"], data));
    Ok(())
}

fn eta(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let target = parse_decimal(sub.get_one::<String>("target").unwrap())?;
    let period = period_of(sub)?;
    let snapshots = store::load_snapshots(conn, Some(HISTORY_MONTHS))?;
    let months = forecast::estimate_time_to_target(&snapshots, target, period);
    let v = json!({ "target": target, "months": months });
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &v)? {
        return Ok(());
    }
    match months {
        Some(0) => println!("Target {} already reached", fmt_money(&target)),
        Some(n) => println!("Target {} in about {} month(s)", fmt_money(&target), n),
        None => println!("Target {} not reachable at the current pace", fmt_money(&target)),
    }
    Ok(())
}
