// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use networth::commands::doctor;
use networth::db::init_schema;
use networth::errors::{StoreError, ValidationError};
use networth::models::{Category, CategoryKind, Goal, GoalKind, IncomeItem, TrackingPeriod};
use networth::store;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const CASH: i64 = 1;
const LOAN: i64 = 2;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    let cash = Category::new(0, "Cash", CategoryKind::Asset, "cash", true);
    let loan = Category::new(0, "Loan", CategoryKind::Liability, "loan", true);
    assert_eq!(store::insert_category(&conn, &cash).unwrap(), CASH);
    assert_eq!(store::insert_category(&conn, &loan).unwrap(), LOAN);
    conn
}

fn change_of(conn: &Connection, year: i32, month: u32) -> Decimal {
    store::find_snapshot(conn, year, month)
        .unwrap()
        .unwrap()
        .totals
        .change_from_previous
}

#[test]
fn create_computes_totals_against_previous_month() {
    let mut conn = setup();
    let jan =
        store::create_snapshot(&mut conn, 2026, 1, &[(CASH, dec!(10000)), (LOAN, dec!(-2000))])
            .unwrap();
    assert_eq!(jan.net_worth(), dec!(8000));
    assert_eq!(jan.totals.change_from_previous, Decimal::ZERO);
    assert_eq!(jan.entries.len(), 2);

    let feb = store::create_snapshot(&mut conn, 2026, 2, &[(CASH, dec!(12000))]).unwrap();
    assert_eq!(feb.totals.change_from_previous, dec!(4000));
    assert_eq!(feb.totals.by_group.get("cash"), Some(&dec!(12000)));

    let stored = store::stored_totals(&conn, feb.id).unwrap();
    assert_eq!(stored.net_worth, dec!(12000));
    assert_eq!(stored.change_from_previous, dec!(4000));
}

#[test]
fn duplicate_month_is_a_conflict() {
    let mut conn = setup();
    store::create_snapshot(&mut conn, 2026, 1, &[(CASH, dec!(1))]).unwrap();
    let err = store::create_snapshot(&mut conn, 2026, 1, &[(CASH, dec!(2))]).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<StoreError>(),
        Some(StoreError::SnapshotExists { year: 2026, month: 1 })
    ));
    assert_eq!(err.to_string(), "Snapshot for 2026-01 already exists");
}

#[test]
fn invalid_entries_are_rejected_without_writing() {
    let mut conn = setup();
    let err = store::create_snapshot(&mut conn, 2026, 1, &[(LOAN, dec!(500))]).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ValidationError>(),
        Some(ValidationError::PositiveLiability { .. })
    ));

    let err = store::create_snapshot(&mut conn, 2026, 1, &[(CASH, dec!(1)), (CASH, dec!(2))])
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ValidationError>(),
        Some(ValidationError::DuplicateEntry(_))
    ));

    let err = store::create_snapshot(&mut conn, 2026, 13, &[]).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ValidationError>(),
        Some(ValidationError::MonthOutOfRange(13))
    ));

    let err = store::create_snapshot(&mut conn, 2026, 1, &[(99, dec!(1))]).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<StoreError>(),
        Some(StoreError::CategoryNotFound(_))
    ));

    assert!(store::load_snapshots(&conn, None).unwrap().is_empty());
}

#[test]
fn editing_a_month_cascades_to_its_successor() {
    let mut conn = setup();
    let jan = store::create_snapshot(&mut conn, 2026, 1, &[(CASH, dec!(10000))]).unwrap();
    store::create_snapshot(&mut conn, 2026, 2, &[(CASH, dec!(12000))]).unwrap();
    assert_eq!(change_of(&conn, 2026, 2), dec!(2000));

    store::update_snapshot(&mut conn, jan.id, None, Some(&[(CASH, dec!(11000))])).unwrap();
    assert_eq!(change_of(&conn, 2026, 2), dec!(1000));
}

#[test]
fn inserting_a_missing_month_updates_the_next_one() {
    let mut conn = setup();
    store::create_snapshot(&mut conn, 2026, 1, &[(CASH, dec!(1000))]).unwrap();
    store::create_snapshot(&mut conn, 2026, 3, &[(CASH, dec!(3000))]).unwrap();
    assert_eq!(change_of(&conn, 2026, 3), Decimal::ZERO);

    store::create_snapshot(&mut conn, 2026, 2, &[(CASH, dec!(2500))]).unwrap();
    assert_eq!(change_of(&conn, 2026, 2), dec!(1500));
    assert_eq!(change_of(&conn, 2026, 3), dec!(500));
}

#[test]
fn moving_a_month_recomputes_both_neighbourhoods() {
    let mut conn = setup();
    store::create_snapshot(&mut conn, 2026, 1, &[(CASH, dec!(1000))]).unwrap();
    let feb = store::create_snapshot(&mut conn, 2026, 2, &[(CASH, dec!(2000))]).unwrap();
    store::create_snapshot(&mut conn, 2026, 3, &[(CASH, dec!(3500))]).unwrap();
    store::create_snapshot(&mut conn, 2026, 7, &[(CASH, dec!(5000))]).unwrap();
    assert_eq!(change_of(&conn, 2026, 3), dec!(1500));

    let moved = store::update_snapshot(&mut conn, feb.id, Some((2026, 6)), None).unwrap();
    assert_eq!((moved.year, moved.month), (2026, 6));
    assert_eq!(moved.totals.change_from_previous, Decimal::ZERO);
    // March lost its predecessor; July gained one.
    assert_eq!(change_of(&conn, 2026, 3), Decimal::ZERO);
    assert_eq!(change_of(&conn, 2026, 7), dec!(3000));

    let err = store::update_snapshot(&mut conn, feb.id, Some((2026, 1)), None).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<StoreError>(),
        Some(StoreError::SnapshotExists { .. })
    ));
}

#[test]
fn deleting_a_month_resets_the_successor() {
    let mut conn = setup();
    let jan = store::create_snapshot(&mut conn, 2026, 1, &[(CASH, dec!(1000))]).unwrap();
    store::create_snapshot(&mut conn, 2026, 2, &[(CASH, dec!(1800))]).unwrap();
    store::delete_snapshot(&mut conn, jan.id).unwrap();
    assert_eq!(change_of(&conn, 2026, 2), Decimal::ZERO);
    assert_eq!(store::load_snapshots(&conn, None).unwrap().len(), 1);
    let err = store::delete_snapshot(&mut conn, jan.id).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<StoreError>(),
        Some(StoreError::SnapshotNotFound(_))
    ));
}

#[test]
fn editing_december_cascades_into_january() {
    let mut conn = setup();
    let nov = store::create_snapshot(&mut conn, 2025, 11, &[(CASH, dec!(9000))]).unwrap();
    store::create_snapshot(&mut conn, 2026, 1, &[(CASH, dec!(12000))]).unwrap();
    assert_eq!(change_of(&conn, 2026, 1), Decimal::ZERO);

    let dec_ = store::create_snapshot(&mut conn, 2025, 12, &[(CASH, dec!(10000))]).unwrap();
    assert_eq!(dec_.totals.change_from_previous, dec!(1000));
    assert_eq!(change_of(&conn, 2026, 1), dec!(2000));

    store::update_snapshot(&mut conn, dec_.id, None, Some(&[(CASH, dec!(11500))])).unwrap();
    assert_eq!(change_of(&conn, 2025, 12), dec!(2500));
    assert_eq!(change_of(&conn, 2026, 1), dec!(500));

    store::update_snapshot(&mut conn, nov.id, None, Some(&[(CASH, dec!(11000))])).unwrap();
    assert_eq!(change_of(&conn, 2025, 12), dec!(500));
}

#[test]
fn deleting_december_resets_january() {
    let mut conn = setup();
    let dec_ = store::create_snapshot(&mut conn, 2025, 12, &[(CASH, dec!(10000))]).unwrap();
    store::create_snapshot(&mut conn, 2026, 1, &[(CASH, dec!(10400))]).unwrap();
    assert_eq!(change_of(&conn, 2026, 1), dec!(400));

    store::delete_snapshot(&mut conn, dec_.id).unwrap();
    assert_eq!(change_of(&conn, 2026, 1), Decimal::ZERO);
    assert!(doctor::diagnose(&conn)
        .unwrap()
        .iter()
        .all(|(kind, _)| kind != "stale_totals"));
}

#[test]
fn recompute_chain_repairs_stale_totals() {
    let mut conn = setup();
    let jan = store::create_snapshot(&mut conn, 2026, 1, &[(CASH, dec!(1000))]).unwrap();
    store::create_snapshot(&mut conn, 2026, 2, &[(CASH, dec!(1500))]).unwrap();
    assert!(doctor::diagnose(&conn).unwrap().is_empty());

    conn.execute(
        "UPDATE snapshots SET net_worth='42' WHERE id=?1",
        params![jan.id],
    )
    .unwrap();
    let issues = doctor::diagnose(&conn).unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].0, "stale_totals");

    store::recompute_chain(&conn, 1, 2026).unwrap();
    assert!(doctor::diagnose(&conn).unwrap().is_empty());
    assert_eq!(store::stored_totals(&conn, jan.id).unwrap().net_worth, dec!(1000));
}

#[test]
fn recompute_all_follows_category_changes() {
    let mut conn = setup();
    let other = Category::new(0, "Car", CategoryKind::Asset, "property", true);
    let car = store::insert_category(&conn, &other).unwrap();
    store::create_snapshot(&mut conn, 2026, 1, &[(CASH, dec!(1000)), (car, dec!(5000))]).unwrap();
    store::create_snapshot(&mut conn, 2026, 2, &[(CASH, dec!(1000)), (car, dec!(4000))]).unwrap();

    let mut changed = store::category_by_id(&conn, car).unwrap();
    changed.is_personal = false;
    store::update_category(&conn, &changed).unwrap();

    // Reads reflect the new ownership straight away.
    let feb = store::find_snapshot(&conn, 2026, 2).unwrap().unwrap();
    assert_eq!(feb.totals.company_wealth, dec!(4000));

    assert_eq!(store::recompute_all(&mut conn).unwrap(), 2);
    assert_eq!(
        store::stored_totals(&conn, feb.id).unwrap().company_wealth,
        dec!(4000)
    );
    assert_eq!(change_of(&conn, 2026, 2), dec!(-1000));
}

#[test]
fn doctor_reports_month_gaps() {
    let mut conn = setup();
    store::create_snapshot(&mut conn, 2025, 11, &[(CASH, dec!(1))]).unwrap();
    store::create_snapshot(&mut conn, 2026, 2, &[(CASH, dec!(2))]).unwrap();
    let issues = doctor::diagnose(&conn).unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].0, "month_gap");
    assert!(issues[0].1.starts_with("2 month(s) missing"));
}

#[test]
fn snapshots_load_newest_first_with_limit() {
    let mut conn = setup();
    for m in 1..=4 {
        store::create_snapshot(&mut conn, 2026, m, &[(CASH, Decimal::from(m * 100))]).unwrap();
    }
    let latest_two = store::load_snapshots(&conn, Some(2)).unwrap();
    let labels: Vec<String> = latest_two.iter().map(|s| s.label()).collect();
    assert_eq!(labels, vec!["2026-04", "2026-03"]);
}

#[test]
fn categories_in_use_cannot_be_deleted() {
    let mut conn = setup();
    store::create_snapshot(&mut conn, 2026, 1, &[(CASH, dec!(1))]).unwrap();
    let err = store::delete_category(&conn, CASH).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<StoreError>(),
        Some(StoreError::CategoryInUse(_))
    ));
    store::delete_category(&conn, LOAN).unwrap();
    let names: Vec<String> = store::list_categories(&conn)
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Cash"]);
}

#[test]
fn goals_round_trip_through_columns() {
    let conn = setup();
    let goal = Goal::new(
        "Pay the loan",
        GoalKind::CategoryTarget {
            category_id: LOAN,
            starting_value: Some(dec!(20000)),
        },
        dec!(0),
    )
    .with_target_date(chrono::NaiveDate::from_ymd_opt(2027, 6, 30).unwrap());
    let id = store::insert_goal(&conn, &goal).unwrap();
    let loaded = store::goal_by_id(&conn, id).unwrap();
    assert_eq!(loaded.kind, goal.kind);
    assert_eq!(loaded.target_date, goal.target_date);

    let rate = Goal::new(
        "Save 20%",
        GoalKind::SavingsRate {
            tracking_period: TrackingPeriod::Quarter,
        },
        dec!(20),
    );
    store::insert_goal(&conn, &rate).unwrap();
    assert_eq!(store::list_goals(&conn, true).unwrap().len(), 2);

    let mut paused = store::goal_by_id(&conn, id).unwrap();
    paused.is_active = false;
    store::update_goal(&conn, &paused).unwrap();
    assert_eq!(store::list_goals(&conn, true).unwrap().len(), 1);
    assert_eq!(store::list_goals(&conn, false).unwrap().len(), 2);

    store::delete_goal(&conn, id).unwrap();
    let err = store::goal_by_id(&conn, id).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<StoreError>(),
        Some(StoreError::GoalNotFound(_))
    ));
}

#[test]
fn goal_validation_limits() {
    let conn = setup();
    let over = Goal::new(
        "Save 120%",
        GoalKind::SavingsRate {
            tracking_period: TrackingPeriod::Year,
        },
        dec!(120),
    );
    let err = store::insert_goal(&conn, &over).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ValidationError>(),
        Some(ValidationError::PercentageOutOfRange { .. })
    ));

    let dangling = Goal::new(
        "Ghost",
        GoalKind::CategoryMonthly {
            category_id: 77,
            tracking_period: TrackingPeriod::Month,
        },
        dec!(10),
    );
    assert!(store::insert_goal(&conn, &dangling).is_err());

    let nameless = Goal::new("   ", GoalKind::NetWorthTarget, dec!(10));
    assert!(store::insert_goal(&conn, &nameless).is_err());

    assert!(matches!(
        GoalKind::from_parts("category_rate", Some(CASH), None, None),
        Err(ValidationError::MissingTrackingPeriod { .. })
    ));
    assert!(matches!(
        GoalKind::from_parts("category_target", None, None, None),
        Err(ValidationError::MissingCategory { .. })
    ));
}

#[test]
fn income_items_persist() {
    let conn = setup();
    let item = IncomeItem {
        id: 0,
        name: "Salary".into(),
        gross_amount: dec!(5000),
        is_taxed: true,
        tax_percentage: None,
        is_deduction: false,
    };
    let id = store::insert_income(&conn, &item).unwrap();
    let items = store::list_income(&conn).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].gross_amount, dec!(5000));
    assert_eq!(items[0].tax_percentage, None);

    let bad = IncomeItem {
        tax_percentage: Some(dec!(101)),
        ..item
    };
    assert!(store::insert_income(&conn, &bad).is_err());

    store::delete_income(&conn, id).unwrap();
    assert!(store::delete_income(&conn, id).is_err());
}

#[test]
fn file_database_keeps_snapshots_between_opens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("networth.sqlite");
    {
        let mut conn = networth::db::open_at(&path).unwrap();
        let cash = Category::new(0, "Cash", CategoryKind::Asset, "cash", true);
        let id = store::insert_category(&conn, &cash).unwrap();
        store::create_snapshot(&mut conn, 2026, 5, &[(id, dec!(750.25))]).unwrap();
    }
    let conn = networth::db::open_at(&path).unwrap();
    let s = store::find_snapshot(&conn, 2026, 5).unwrap().unwrap();
    assert_eq!(s.net_worth(), dec!(750.25));
    assert_eq!(s.entries[0].category.name, "Cash");
}
