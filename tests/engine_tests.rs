// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use networth::engine::{aggregate, forecast, income, status, trend};
use networth::errors::ValidationError;
use networth::models::{
    Category, CategoryKind, Entry, IncomeItem, ProgressStatus, Snapshot, TrackingPeriod,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn asset(id: i64, name: &str, group: &str) -> Category {
    Category::new(id, name, CategoryKind::Asset, group, true)
}

fn liability(id: i64, name: &str) -> Category {
    Category::new(id, name, CategoryKind::Liability, "loan", true)
}

fn snap(year: i32, month: u32, entries: &[(&Category, Decimal)]) -> Snapshot {
    let entries = entries
        .iter()
        .map(|(c, a)| Entry::new(0, (*c).clone(), *a).unwrap())
        .collect();
    Snapshot::new(year, month, entries, None)
}

/// Net-worth-only history, newest first, from oldest-first values.
fn history(start: (i32, u32), values: &[Decimal]) -> Vec<Snapshot> {
    let cash = asset(1, "Cash", "cash");
    let mut out: Vec<Snapshot> = values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let (y, m) = networth::utils::add_months(start.0, start.1, i as u32);
            snap(y, m, &[(&cash, *v)])
        })
        .collect();
    out.reverse();
    out
}

#[test]
fn scenario_a_totals() {
    let cash = asset(1, "Cash", "cash");
    let loan = liability(2, "Loan");
    let s = snap(2026, 1, &[(&cash, dec!(60000)), (&loan, dec!(-10000))]);
    let t = &s.totals;
    assert_eq!(t.total_assets, dec!(60000));
    assert_eq!(t.total_liabilities, dec!(-10000));
    assert_eq!(t.net_worth, dec!(50000));
    assert_eq!(t.personal_wealth, dec!(50000));
    assert_eq!(t.company_wealth, Decimal::ZERO);
    assert_eq!(t.by_group.get("cash"), Some(&dec!(60000)));
    assert_eq!(t.percentages.get("cash_pct"), Some(&dec!(100)));
    assert_eq!(t.change_from_previous, Decimal::ZERO);
}

#[test]
fn aggregation_sums_and_percentages_hold() {
    let cash = asset(1, "Cash", "cash");
    let stocks = asset(2, "Stocks", "investment");
    let btc = asset(3, "BTC", "crypto");
    let card = Category::new(4, "Card", CategoryKind::Liability, "credit", true);
    let s = snap(
        2026,
        2,
        &[
            (&cash, dec!(10000)),
            (&stocks, dec!(20000)),
            (&btc, dec!(5000)),
            (&card, dec!(-1234.56)),
        ],
    );
    let t = &s.totals;
    assert_eq!(t.total_assets + t.total_liabilities, t.net_worth);
    let grouped: Decimal = t.by_group.values().copied().sum();
    assert_eq!(grouped, t.total_assets);
    assert!(!t.by_group.contains_key("credit"));

    assert_eq!(t.percentages.get("cash_pct"), Some(&dec!(28.57)));
    assert_eq!(t.percentages.get("investment_pct"), Some(&dec!(57.14)));
    assert_eq!(t.percentages.get("crypto_pct"), Some(&dec!(14.29)));
    let pct_sum: Decimal = t.percentages.values().copied().sum();
    assert!((pct_sum - dec!(100)).abs() <= dec!(0.05));
}

#[test]
fn percentages_empty_without_assets() {
    let loan = liability(1, "Loan");
    let s = snap(2026, 3, &[(&loan, dec!(-500))]);
    assert!(s.totals.percentages.is_empty());
    assert!(s.totals.by_group.is_empty());
    assert_eq!(s.totals.net_worth, dec!(-500));
}

#[test]
fn company_liabilities_do_not_reduce_company_wealth() {
    let cash = asset(1, "Cash", "cash");
    let company_acct = Category::new(2, "Company account", CategoryKind::Asset, "cash", false);
    let company_loan = Category::new(3, "Company loan", CategoryKind::Liability, "loan", false);
    let s = snap(
        2026,
        1,
        &[
            (&cash, dec!(10000)),
            (&company_acct, dec!(20000)),
            (&company_loan, dec!(-5000)),
        ],
    );
    assert_eq!(s.totals.personal_wealth, dec!(10000));
    assert_eq!(s.totals.company_wealth, dec!(20000));
    assert_eq!(s.totals.net_worth, dec!(25000));
}

#[test]
fn aggregation_is_idempotent() {
    let cash = asset(1, "Cash", "cash");
    let loan = liability(2, "Loan");
    let s = snap(2026, 1, &[(&cash, dec!(60000)), (&loan, dec!(-10000))]);
    let a = aggregate::aggregate(&s.entries, Some(dec!(40000)));
    let b = aggregate::aggregate(&s.entries, Some(dec!(40000)));
    assert_eq!(a, b);
    assert_eq!(a.change_from_previous, dec!(10000));
}

#[test]
fn positive_liability_rejected_at_entry() {
    let loan = liability(2, "Loan");
    let err = Entry::new(0, loan, dec!(100)).unwrap_err();
    assert!(matches!(err, ValidationError::PositiveLiability { .. }));
}

#[test]
fn oversized_amount_rejected_at_entry() {
    let cash = asset(1, "Cash", "cash");
    let err = Entry::new(0, cash, dec!(1000000001)).unwrap_err();
    assert!(matches!(err, ValidationError::AmountTooLarge { .. }));
}

#[test]
fn trend_is_zero_with_fewer_than_two_snapshots() {
    let none = trend::monthly_change_rate(&[], TrackingPeriod::Quarter);
    assert_eq!(none.rate, Decimal::ZERO);
    assert_eq!(none.points_used, 0);

    let one = history((2026, 1), &[dec!(1000)]);
    let t = trend::monthly_change_rate(&one, TrackingPeriod::Year);
    assert_eq!(t.rate, Decimal::ZERO);
    assert_eq!(t.points_used, 0);

    let fc = forecast::net_worth_forecast(&one, TrackingPeriod::Quarter, 6);
    assert_eq!(fc.monthly_change_rate, Decimal::ZERO);
    assert_eq!(fc.data_points_used, 0);
    assert_eq!(fc.projections.len(), 6);
}

#[test]
fn forecast_without_history_has_no_projections() {
    let fc = forecast::net_worth_forecast(&[], TrackingPeriod::Month, 12);
    assert!(fc.projections.is_empty());
    assert_eq!(fc.data_points_used, 0);
}

#[test]
fn trend_window_uses_available_pairs() {
    let snaps = history((2026, 1), &[dec!(10000), dec!(10500), dec!(11250)]);
    let q = trend::monthly_change_rate(&snaps, TrackingPeriod::Quarter);
    assert_eq!(q.points_used, 2);
    assert_eq!(q.rate, dec!(625));

    let m = trend::monthly_change_rate(&snaps, TrackingPeriod::Month);
    assert_eq!(m.points_used, 1);
    assert_eq!(m.rate, dec!(750));
}

#[test]
fn gap_months_shorten_the_window() {
    let cash = asset(1, "Cash", "cash");
    // January and March only.
    let snaps = vec![
        snap(2026, 3, &[(&cash, dec!(3000))]),
        snap(2026, 1, &[(&cash, dec!(1000))]),
    ];
    let t = trend::monthly_change_rate(&snaps, TrackingPeriod::Quarter);
    assert_eq!(t.points_used, 1);
    assert_eq!(t.rate, dec!(2000));
}

#[test]
fn scenario_b_category_trend() {
    let cash = asset(1, "Cash", "cash");
    let snaps = vec![
        snap(2026, 2, &[(&cash, dec!(11000))]),
        snap(2026, 1, &[(&cash, dec!(10000))]),
    ];
    let t = trend::category_change_rate(&snaps, 1, TrackingPeriod::Month);
    assert_eq!(t.rate, dec!(1000));
    assert_eq!(t.points_used, 1);
}

#[test]
fn missing_category_entry_counts_as_zero() {
    let cash = asset(1, "Cash", "cash");
    let stocks = asset(2, "Stocks", "investment");
    let snaps = vec![
        snap(2026, 2, &[(&cash, dec!(100)), (&stocks, dec!(400))]),
        snap(2026, 1, &[(&cash, dec!(100))]),
    ];
    let t = trend::category_change_rate(&snaps, 2, TrackingPeriod::Month);
    assert_eq!(t.rate, dec!(400));
}

#[test]
fn forecast_projects_from_the_unrounded_rate() {
    let snaps = history((2026, 1), &[dec!(10000), dec!(10100), dec!(10200), dec!(10301)]);
    let fc = forecast::net_worth_forecast(&snaps, TrackingPeriod::Quarter, 12);
    // 301 / 3 rounded to cents for display only
    assert_eq!(fc.monthly_change_rate, dec!(100.33));
    assert_eq!(fc.data_points_used, 3);
    assert_eq!(fc.projections[0].projected_net_worth, dec!(10401.33));
    assert_eq!(fc.projections[2].projected_net_worth, dec!(10602));
    assert_eq!(fc.projections[11].projected_net_worth, dec!(11505));
    for p in &fc.projections {
        assert_eq!(p.projected_net_worth, p.projected_net_worth.round_dp(2));
    }
}

#[test]
fn long_forecast_does_not_drift_from_rounding() {
    let snaps = history((2026, 1), &[dec!(100000), dec!(100000), dec!(100000), dec!(101000)]);
    let fc = forecast::net_worth_forecast(&snaps, TrackingPeriod::Quarter, 36);
    assert_eq!(fc.monthly_change_rate, dec!(333.33));
    assert_eq!(fc.projections[35].projected_net_worth, dec!(113000));
}

#[test]
fn forecast_months_roll_over_the_year() {
    let snaps = history((2025, 10), &[dec!(1000), dec!(1200)]);
    let fc = forecast::net_worth_forecast(&snaps, TrackingPeriod::Month, 3);
    let labels: Vec<(i32, u32)> = fc.projections.iter().map(|p| (p.year, p.month)).collect();
    assert_eq!(labels, vec![(2025, 12), (2026, 1), (2026, 2)]);
    assert_eq!(fc.projections[2].projected_net_worth, dec!(1800));
}

#[test]
fn months_ahead_bounds() {
    assert!(forecast::validate_months_ahead(1).is_ok());
    assert!(forecast::validate_months_ahead(36).is_ok());
    assert_eq!(
        forecast::validate_months_ahead(0),
        Err(ValidationError::MonthsAheadOutOfRange(0))
    );
    assert!(forecast::validate_months_ahead(37).is_err());
}

#[test]
fn time_to_target_estimates() {
    let snaps = history((2026, 1), &[dec!(10000), dec!(10500), dec!(11250)]);
    // remaining 3750 at 625/month
    assert_eq!(
        forecast::estimate_time_to_target(&snaps, dec!(15000), TrackingPeriod::Quarter),
        Some(7)
    );
    assert_eq!(
        forecast::estimate_time_to_target(&snaps, dec!(11000), TrackingPeriod::Quarter),
        Some(0)
    );
    let falling = history((2026, 1), &[dec!(2000), dec!(1000)]);
    assert_eq!(
        forecast::estimate_time_to_target(&falling, dec!(5000), TrackingPeriod::Quarter),
        None
    );
    assert_eq!(
        forecast::estimate_time_to_target(&[], dec!(5000), TrackingPeriod::Quarter),
        None
    );
}

#[test]
fn trajectory_runs_from_latest_to_target_month() {
    let snaps = history((2026, 1), &[dec!(10000), dec!(11000)]);
    let date = NaiveDate::from_ymd_opt(2026, 6, 30).unwrap();
    let tc = forecast::trajectory_comparison(&snaps, dec!(15000), date);
    assert_eq!(tc.current_rate, Some(dec!(1000)));
    assert_eq!(tc.required_rate, Some(dec!(1000)));
    assert_eq!(tc.current_trajectory.len(), 5);
    assert_eq!(tc.current_trajectory[0].label, "2026-02");
    assert_eq!(tc.required_trajectory[4].label, "2026-06");
    assert_eq!(tc.required_trajectory[4].value, dec!(15000));

    let past = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
    let empty = forecast::trajectory_comparison(&snaps, dec!(15000), past);
    assert!(empty.current_trajectory.is_empty());
    assert_eq!(empty.current_rate, None);
}

#[test]
fn scenario_e_no_deadline_positive_pace_is_on_track() {
    let snaps = history((2026, 1), &[dec!(1000), dec!(1200)]);
    let today = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
    let f = forecast::goal_forecast(dec!(1000), dec!(200), snaps.first(), None, today);
    assert!(f.on_track);
    assert_eq!(f.required_monthly_change, Decimal::ZERO);
    assert_eq!(f.months_until_target, Some(6));
    assert_eq!(f.forecast_date, NaiveDate::from_ymd_opt(2026, 8, 1));
}

#[test]
fn goal_forecast_with_deadline() {
    let snaps = history((2026, 1), &[dec!(1000), dec!(1200)]);
    let today = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
    let deadline = NaiveDate::from_ymd_opt(2026, 6, 30);
    let f = forecast::goal_forecast(dec!(1000), dec!(200), snaps.first(), deadline, today);
    assert_eq!(f.required_monthly_change, dec!(250));
    assert!(!f.on_track);

    let met = forecast::goal_forecast(dec!(-5), dec!(0), snaps.first(), deadline, today);
    assert!(met.on_track);
    assert_eq!(met.months_until_target, Some(0));
    assert_eq!(met.forecast_date, Some(today));

    let no_history = forecast::goal_forecast(dec!(1000), dec!(0), None, deadline, today);
    assert!(!no_history.on_track);
    assert_eq!(no_history.months_until_target, None);
}

#[test]
fn rate_status_needs_two_months() {
    assert_eq!(status::rate_status(dec!(10), dec!(5), 1), None);
    assert_eq!(
        status::rate_status(dec!(10), dec!(5), 2),
        Some(ProgressStatus::OnTrack)
    );
    assert_eq!(
        status::rate_status(dec!(4), dec!(5), 6),
        Some(ProgressStatus::Behind)
    );
}

#[test]
fn target_status_rules() {
    let today = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
    let deadline = NaiveDate::from_ymd_opt(2026, 7, 1);

    assert_eq!(
        status::target_status(None, false, dec!(100), dec!(0), 5, today),
        None
    );
    assert_eq!(
        status::target_status(deadline, false, dec!(100), dec!(0), 2, today),
        None
    );
    assert_eq!(
        status::target_status(deadline, true, dec!(0), dec!(0), 3, today),
        Some(ProgressStatus::OnTrack)
    );
    let passed = NaiveDate::from_ymd_opt(2025, 12, 31);
    assert_eq!(
        status::target_status(passed, false, dec!(100), dec!(1000), 3, today),
        Some(ProgressStatus::Behind)
    );
    // 6000 over 6 months needs 1000/month; 3600 over 3 months averages 1200.
    assert_eq!(
        status::target_status(deadline, false, dec!(6000), dec!(3600), 3, today),
        Some(ProgressStatus::OnTrack)
    );
    assert_eq!(
        status::target_status(deadline, false, dec!(6000), dec!(2400), 3, today),
        Some(ProgressStatus::Behind)
    );
    // Deadline later this month with the target unmet.
    let this_month = NaiveDate::from_ymd_opt(2026, 1, 31);
    assert_eq!(
        status::target_status(this_month, false, dec!(1), dec!(1000), 3, today),
        Some(ProgressStatus::Behind)
    );
}

#[test]
fn net_income_applies_tax_rules() {
    let items = vec![
        IncomeItem {
            id: 1,
            name: "Salary".into(),
            gross_amount: dec!(5000),
            is_taxed: true,
            tax_percentage: None,
            is_deduction: false,
        },
        IncomeItem {
            id: 2,
            name: "Freelance".into(),
            gross_amount: dec!(1000),
            is_taxed: true,
            tax_percentage: Some(dec!(40)),
            is_deduction: false,
        },
        IncomeItem {
            id: 3,
            name: "Gift".into(),
            gross_amount: dec!(200),
            is_taxed: false,
            tax_percentage: None,
            is_deduction: false,
        },
        IncomeItem {
            id: 4,
            name: "Pension".into(),
            gross_amount: dec!(5000),
            is_taxed: true,
            tax_percentage: Some(dec!(5)),
            is_deduction: true,
        },
    ];
    assert_eq!(items[0].calculate_net(dec!(25)), dec!(3750));
    assert_eq!(items[3].calculate_net(dec!(25)), dec!(-250));
    // 3750 + 600 + 200 - 250
    assert_eq!(income::net_income(&items, dec!(25)), dec!(4300));
}

#[test]
fn savings_rate_against_net_income() {
    let snaps = history((2026, 1), &[dec!(10000), dec!(11000), dec!(12000)]);
    assert_eq!(
        income::savings_rate(&snaps, dec!(3750), TrackingPeriod::HalfYear),
        dec!(26.67)
    );
    assert_eq!(
        income::savings_rate(&snaps, Decimal::ZERO, TrackingPeriod::HalfYear),
        Decimal::ZERO
    );
}
