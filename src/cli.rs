// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, arg};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn entry_arg() -> Arg {
    Arg::new("entry")
        .long("entry")
        .value_name("NAME=AMOUNT")
        .action(ArgAction::Append)
        .help("Category balance; repeat once per category")
}

fn period_arg(default: Option<&'static str>) -> Arg {
    let a = Arg::new("period")
        .long("period")
        .value_name("PERIOD")
        .value_parser(["month", "quarter", "half_year", "year"]);
    match default {
        Some(d) => a.default_value(d),
        None => a,
    }
}

pub fn build_cli() -> Command {
    Command::new("networth")
        .about("Monthly net-worth snapshots, trend forecasts and goal tracking")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("category")
                .about("Manage asset and liability categories")
                .subcommand(
                    Command::new("add")
                        .arg(arg!(--name <NAME>).required(true))
                        .arg(
                            arg!(--kind <KIND>)
                                .required(true)
                                .value_parser(["asset", "liability"]),
                        )
                        .arg(arg!(--group <GROUP>).required(true))
                        .arg(
                            Arg::new("company")
                                .long("company")
                                .action(ArgAction::SetTrue)
                                .help("Owned by a company rather than personally"),
                        )
                        .arg(
                            arg!(--order <N>)
                                .required(false)
                                .value_parser(clap::value_parser!(i64)),
                        ),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("rm").arg(arg!(--name <NAME>).required(true))),
        )
        .subcommand(
            Command::new("snapshot")
                .about("Record and inspect monthly snapshots")
                .subcommand(
                    Command::new("add")
                        .arg(arg!(--month <YYYY_MM>).required(true))
                        .arg(entry_arg()),
                )
                .subcommand(
                    Command::new("update")
                        .arg(arg!(--month <YYYY_MM>).required(true))
                        .arg(arg!(--"move-to" <YYYY_MM>).required(false))
                        .arg(entry_arg()),
                )
                .subcommand(json_flags(
                    Command::new("show").arg(arg!(--month <YYYY_MM>).required(false)),
                ))
                .subcommand(json_flags(
                    Command::new("list").arg(
                        arg!(--limit <N>)
                            .required(false)
                            .value_parser(clap::value_parser!(usize)),
                    ),
                ))
                .subcommand(Command::new("rm").arg(arg!(--month <YYYY_MM>).required(true)))
                .subcommand(
                    Command::new("recompute").about("Rewrite stored totals from entries"),
                ),
        )
        .subcommand(
            json_flags(
                Command::new("forecast")
                    .about("Project net worth forward at the trailing average pace")
                    .arg(period_arg(Some("quarter")))
                    .arg(
                        Arg::new("months-ahead")
                            .long("months-ahead")
                            .value_name("N")
                            .default_value("12")
                            .value_parser(clap::value_parser!(u32)),
                    ),
            )
            .subcommand(json_flags(
                Command::new("trajectory")
                    .about("Current pace against the pace a target needs")
                    .arg(arg!(--target <AMOUNT>).required(true))
                    .arg(arg!(--date <DATE>).required(true)),
            ))
            .subcommand(json_flags(
                Command::new("eta")
                    .about("Months until a net-worth target at the current pace")
                    .arg(arg!(--target <AMOUNT>).required(true))
                    .arg(period_arg(Some("quarter"))),
            )),
        )
        .subcommand(
            Command::new("goal")
                .about("Manage goals and show their progress")
                .subcommand(
                    Command::new("add")
                        .arg(arg!(--name <NAME>).required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_name("TYPE")
                                .required(true)
                                .help(
                                    "net_worth_target, category_target, category_monthly, \
                                     category_rate or savings_rate",
                                ),
                        )
                        .arg(arg!(--target <VALUE>).required(true))
                        .arg(arg!(--category <CATEGORY>).required(false))
                        .arg(period_arg(None))
                        .arg(arg!(--date <DATE>).required(false))
                        .arg(arg!(--"starting-value" <VALUE>).required(false)),
                )
                .subcommand(json_flags(
                    Command::new("list").arg(
                        Arg::new("all")
                            .long("all")
                            .action(ArgAction::SetTrue)
                            .help("Include inactive goals"),
                    ),
                ))
                .subcommand(
                    Command::new("update")
                        .arg(
                            arg!(--id <ID>)
                                .required(true)
                                .value_parser(clap::value_parser!(i64)),
                        )
                        .arg(arg!(--name <NAME>).required(false))
                        .arg(arg!(--target <VALUE>).required(false))
                        .arg(arg!(--date <DATE>).required(false))
                        .arg(
                            Arg::new("clear-date")
                                .long("clear-date")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("date"),
                        )
                        .arg(period_arg(None))
                        .arg(
                            arg!(--active <BOOL>)
                                .required(false)
                                .value_parser(clap::value_parser!(bool)),
                        ),
                )
                .subcommand(
                    Command::new("rm").arg(
                        arg!(--id <ID>)
                            .required(true)
                            .value_parser(clap::value_parser!(i64)),
                    ),
                )
                .subcommand(json_flags(
                    Command::new("progress").arg(
                        arg!(--id <ID>)
                            .required(false)
                            .value_parser(clap::value_parser!(i64)),
                    ),
                )),
        )
        .subcommand(
            Command::new("income")
                .about("Manage monthly income items and the default tax rate")
                .subcommand(
                    Command::new("add")
                        .arg(arg!(--name <NAME>).required(true))
                        .arg(arg!(--gross <AMOUNT>).required(true))
                        .arg(
                            Arg::new("untaxed")
                                .long("untaxed")
                                .action(ArgAction::SetTrue),
                        )
                        .arg(arg!(--tax <PERCENT>).required(false))
                        .arg(
                            Arg::new("deduction")
                                .long("deduction")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("rm").arg(
                        arg!(--id <ID>)
                            .required(true)
                            .value_parser(clap::value_parser!(i64)),
                    ),
                )
                .subcommand(
                    Command::new("set-tax").arg(arg!(--percentage <PERCENT>).required(true)),
                )
                .subcommand(json_flags(Command::new("net"))),
        )
        .subcommand(Command::new("doctor").about("Check stored data for inconsistencies"))
}
