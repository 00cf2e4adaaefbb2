// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

/// Input rejected before it reaches the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("month must be between 1 and 12, got {0}")]
    MonthOutOfRange(u32),
    #[error("year must be between 1900 and 2100, got {0}")]
    YearOutOfRange(i32),
    #[error("name must be 1-{max} characters")]
    NameLength { max: usize },
    #[error("{field} exceeds maximum allowed value")]
    AmountTooLarge { field: String },
    #[error("{field} must not be negative")]
    NegativeValue { field: String },
    #[error("{field} must be between 0 and 100")]
    PercentageOutOfRange { field: String },
    #[error("months_ahead must be between 1 and 36, got {0}")]
    MonthsAheadOutOfRange(u32),
    #[error("unknown {field} '{value}' (expected one of: {expected})")]
    UnknownVariant {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("{goal_type} goals require category_id")]
    MissingCategory { goal_type: &'static str },
    #[error("{goal_type} goals require tracking_period")]
    MissingTrackingPeriod { goal_type: &'static str },
    #[error("liability '{category}' must be stored as a negative amount, got {amount}")]
    PositiveLiability { category: String, amount: Decimal },
    #[error("category '{0}' appears more than once in the entries")]
    DuplicateEntry(String),
    #[error("entry '{0}' must look like NAME=AMOUNT")]
    MalformedEntry(String),
    #[error("target_date must be a valid ISO date, got '{0}'")]
    InvalidDate(String),
}

/// Conflicts and dangling references detected against the database.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Snapshot for {year}-{month:02} already exists")]
    SnapshotExists { year: i32, month: u32 },
    #[error("Snapshot {0} not found")]
    SnapshotNotFound(String),
    #[error("Category {0} not found")]
    CategoryNotFound(String),
    #[error("Category '{0}' is referenced by snapshot entries or goals")]
    CategoryInUse(String),
    #[error("Goal {0} not found")]
    GoalNotFound(i64),
    #[error("Income item {0} not found")]
    IncomeNotFound(i64),
}
