// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, CategoryKind};
use crate::store;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let id = add(conn, sub)?;
            let c = store::category_by_id(conn, id)?;
            println!("Added {} category '{}' ({})", c.kind, c.name, c.group);
        }
        Some(("list", sub)) => {
            let cats = store::list_categories(conn)?;
            if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cats)? {
                return Ok(());
            }
            let data = cats
                .into_iter()
                .map(|c| {
                    vec![
                        c.name,
                        c.kind.to_string(),
                        c.group.to_string(),
                        if c.is_personal { "personal" } else { "company" }.into(),
                        c.display_order.to_string(),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(&["Category", "Kind", "Group", "Owner", "Order"], data)
            );
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let c = store::category_by_name(conn, name)?;
            store::delete_category(conn, c.id)?;
            println!("Removed category '{}'", c.name);
        }
        _ => {}
    }
    Ok(())
}

pub fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<i64> {
    let name = sub.get_one::<String>("name").unwrap();
    let kind: CategoryKind = sub.get_one::<String>("kind").unwrap().parse()?;
    let group = sub.get_one::<String>("group").unwrap().trim();
    let mut category = Category::new(0, name.trim(), kind, group, !sub.get_flag("company"));
    if let Some(order) = sub.get_one::<i64>("order") {
        category.display_order = *order;
    }
    store::insert_category(conn, &category)
}
