// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::income;
use crate::models::IncomeItem;
use crate::store;
use crate::utils::{
    fmt_money, get_tax_percentage, maybe_print_json, parse_decimal, pretty_table,
    set_tax_percentage,
};
use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let id = add(conn, sub)?;
            println!("Added income item #{}", id);
        }
        Some(("list", sub)) => {
            let items = store::list_income(conn)?;
            if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &items)? {
                return Ok(());
            }
            let default_tax = get_tax_percentage(conn)?;
            let data = items
                .iter()
                .map(|i| {
                    vec![
                        i.id.to_string(),
                        i.name.clone(),
                        fmt_money(&i.gross_amount),
                        if i.is_deduction {
                            "deduction".into()
                        } else if i.is_taxed {
                            "taxed".into()
                        } else {
                            "untaxed".into()
                        },
                        i.tax_percentage.map(|p| p.to_string()).unwrap_or_default(),
                        fmt_money(&i.calculate_net(default_tax)),
                    ]
                })
                .collect::<Vec<Vec<String>>>();
            println!(
                "{}",
                pretty_table(&["ID", "Name", "Gross", "Kind", "Tax %", "Net"], data)
            );
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            store::delete_income(conn, id)?;
            println!("Removed income item #{}", id);
        }
        Some(("set-tax", sub)) => {
            let pct = parse_decimal(sub.get_one::<String>("percentage").unwrap())?;
            set_tax_percentage(conn, pct)?;
            println!("Default tax percentage set to {}%", pct);
        }
        Some(("net", sub)) => {
            let default_tax = get_tax_percentage(conn)?;
            let total = income::net_income(&store::list_income(conn)?, default_tax);
            let v = json!({ "net_income": total.round_dp(2), "tax_percentage": default_tax });
            if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &v)? {
                return Ok(());
            }
            println!(
                "Monthly net income: {} (default tax {}%)",
                fmt_money(&total),
                default_tax
            );
        }
        _ => {}
    }
    Ok(())
}

pub fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<i64> {
    let item = IncomeItem {
        id: 0,
        name: sub.get_one::<String>("name").unwrap().trim().to_string(),
        gross_amount: parse_decimal(sub.get_one::<String>("gross").unwrap())?,
        is_taxed: !sub.get_flag("untaxed"),
        tax_percentage: sub
            .get_one::<String>("tax")
            .map(|t| parse_decimal(t))
            .transpose()?,
        is_deduction: sub.get_flag("deduction"),
    };
    store::insert_income(conn, &item)
}
