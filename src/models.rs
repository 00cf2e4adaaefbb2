// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::engine::aggregate;
use crate::errors::ValidationError;

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_AMOUNT_VALUE: i64 = 1_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    Asset,
    Liability,
}

impl CategoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKind::Asset => "asset",
            CategoryKind::Liability => "liability",
        }
    }
}

impl FromStr for CategoryKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asset" => Ok(CategoryKind::Asset),
            "liability" => Ok(CategoryKind::Liability),
            other => Err(ValidationError::UnknownVariant {
                field: "kind",
                value: other.to_string(),
                expected: "asset, liability",
            }),
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grouping used for the per-group asset breakdown. Anything outside the
/// built-in set is kept verbatim (lowercased) as a user-defined group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryGroup {
    Cash,
    Investment,
    Crypto,
    Property,
    Loan,
    Credit,
    Custom(String),
}

impl CategoryGroup {
    pub fn as_str(&self) -> &str {
        match self {
            CategoryGroup::Cash => "cash",
            CategoryGroup::Investment => "investment",
            CategoryGroup::Crypto => "crypto",
            CategoryGroup::Property => "property",
            CategoryGroup::Loan => "loan",
            CategoryGroup::Credit => "credit",
            CategoryGroup::Custom(name) => name,
        }
    }
}

impl From<&str> for CategoryGroup {
    fn from(s: &str) -> Self {
        let norm = s.trim().to_lowercase();
        match norm.as_str() {
            "cash" => CategoryGroup::Cash,
            "investment" => CategoryGroup::Investment,
            "crypto" => CategoryGroup::Crypto,
            "property" => CategoryGroup::Property,
            "loan" => CategoryGroup::Loan,
            "credit" => CategoryGroup::Credit,
            _ => CategoryGroup::Custom(norm),
        }
    }
}

impl From<String> for CategoryGroup {
    fn from(s: String) -> Self {
        CategoryGroup::from(s.as_str())
    }
}

impl From<CategoryGroup> for String {
    fn from(g: CategoryGroup) -> Self {
        g.as_str().to_string()
    }
}

impl fmt::Display for CategoryGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub kind: CategoryKind,
    pub group: CategoryGroup,
    pub is_personal: bool,
    pub display_order: i64,
}

impl Category {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        kind: CategoryKind,
        group: impl Into<CategoryGroup>,
        is_personal: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            group: group.into(),
            is_personal,
            display_order: 0,
        }
    }

    pub fn is_liability(&self) -> bool {
        self.kind == CategoryKind::Liability
    }
}

/// One category's balance inside a snapshot.
///
/// Liabilities are stored as negative magnitudes, so paying debt down from
/// -20000 to -19500 is a +500 delta with no sign flip anywhere downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub category_id: i64,
    pub category: Category,
    pub amount: Decimal,
}

impl Entry {
    pub fn new(id: i64, category: Category, amount: Decimal) -> Result<Self, ValidationError> {
        if amount.abs() > Decimal::from(MAX_AMOUNT_VALUE) {
            return Err(ValidationError::AmountTooLarge {
                field: format!("amount for '{}'", category.name),
            });
        }
        if category.is_liability() && amount > Decimal::ZERO {
            return Err(ValidationError::PositiveLiability {
                category: category.name.clone(),
                amount,
            });
        }
        Ok(Self {
            id,
            category_id: category.id,
            category,
            amount,
        })
    }
}

/// Derived figures for one snapshot. Never accepted as input; always the
/// output of [`aggregate::aggregate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub total_assets: Decimal,
    pub total_liabilities: Decimal,
    pub net_worth: Decimal,
    pub change_from_previous: Decimal,
    pub personal_wealth: Decimal,
    pub company_wealth: Decimal,
    pub by_group: BTreeMap<String, Decimal>,
    pub percentages: BTreeMap<String, Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: i64,
    pub month: u32,
    pub year: i32,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub totals: Totals,
    pub entries: Vec<Entry>,
}

impl Snapshot {
    /// Builds an unsaved snapshot and computes its totals.
    pub fn new(
        year: i32,
        month: u32,
        entries: Vec<Entry>,
        previous_net_worth: Option<Decimal>,
    ) -> Self {
        let totals = aggregate::aggregate(&entries, previous_net_worth);
        Self {
            id: 0,
            month,
            year,
            timestamp: Utc::now(),
            totals,
            entries,
        }
    }

    pub fn net_worth(&self) -> Decimal {
        self.totals.net_worth
    }

    /// Amount recorded for a category, zero when the snapshot has no entry.
    pub fn category_amount(&self, category_id: i64) -> Decimal {
        self.entries
            .iter()
            .find(|e| e.category_id == category_id)
            .map(|e| e.amount)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn label(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingPeriod {
    Month,
    Quarter,
    HalfYear,
    Year,
}

impl TrackingPeriod {
    pub fn months(&self) -> usize {
        match self {
            TrackingPeriod::Month => 1,
            TrackingPeriod::Quarter => 3,
            TrackingPeriod::HalfYear => 6,
            TrackingPeriod::Year => 12,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackingPeriod::Month => "month",
            TrackingPeriod::Quarter => "quarter",
            TrackingPeriod::HalfYear => "half_year",
            TrackingPeriod::Year => "year",
        }
    }
}

impl FromStr for TrackingPeriod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "month" => Ok(TrackingPeriod::Month),
            "quarter" => Ok(TrackingPeriod::Quarter),
            "half_year" => Ok(TrackingPeriod::HalfYear),
            "year" => Ok(TrackingPeriod::Year),
            other => Err(ValidationError::UnknownVariant {
                field: "period",
                value: other.to_string(),
                expected: "month, quarter, half_year, year",
            }),
        }
    }
}

impl fmt::Display for TrackingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const GOAL_TYPES: &str =
    "net_worth_target, category_target, category_monthly, category_rate, savings_rate";

/// Goal type with exactly the fields each variant needs.
#[derive(Debug, Clone, PartialEq)]
pub enum GoalKind {
    NetWorthTarget,
    CategoryTarget {
        category_id: i64,
        starting_value: Option<Decimal>,
    },
    CategoryMonthly {
        category_id: i64,
        tracking_period: TrackingPeriod,
    },
    CategoryRate {
        category_id: i64,
        tracking_period: TrackingPeriod,
    },
    SavingsRate {
        tracking_period: TrackingPeriod,
    },
}

impl GoalKind {
    /// Assembles a variant from flat columns, rejecting shapes that are
    /// missing a field their type requires.
    pub fn from_parts(
        goal_type: &str,
        category_id: Option<i64>,
        tracking_period: Option<TrackingPeriod>,
        starting_value: Option<Decimal>,
    ) -> Result<Self, ValidationError> {
        match goal_type.trim().to_lowercase().as_str() {
            "net_worth_target" => Ok(GoalKind::NetWorthTarget),
            "category_target" => Ok(GoalKind::CategoryTarget {
                category_id: category_id.ok_or(ValidationError::MissingCategory {
                    goal_type: "category_target",
                })?,
                starting_value,
            }),
            "category_monthly" => Ok(GoalKind::CategoryMonthly {
                category_id: category_id.ok_or(ValidationError::MissingCategory {
                    goal_type: "category_monthly",
                })?,
                tracking_period: tracking_period.ok_or(
                    ValidationError::MissingTrackingPeriod {
                        goal_type: "category_monthly",
                    },
                )?,
            }),
            "category_rate" => Ok(GoalKind::CategoryRate {
                category_id: category_id.ok_or(ValidationError::MissingCategory {
                    goal_type: "category_rate",
                })?,
                tracking_period: tracking_period.ok_or(
                    ValidationError::MissingTrackingPeriod {
                        goal_type: "category_rate",
                    },
                )?,
            }),
            "savings_rate" => Ok(GoalKind::SavingsRate {
                tracking_period: tracking_period.unwrap_or(TrackingPeriod::HalfYear),
            }),
            other => Err(ValidationError::UnknownVariant {
                field: "goal_type",
                value: other.to_string(),
                expected: GOAL_TYPES,
            }),
        }
    }

    pub fn goal_type(&self) -> &'static str {
        match self {
            GoalKind::NetWorthTarget => "net_worth_target",
            GoalKind::CategoryTarget { .. } => "category_target",
            GoalKind::CategoryMonthly { .. } => "category_monthly",
            GoalKind::CategoryRate { .. } => "category_rate",
            GoalKind::SavingsRate { .. } => "savings_rate",
        }
    }

    pub fn category_id(&self) -> Option<i64> {
        match self {
            GoalKind::CategoryTarget { category_id, .. }
            | GoalKind::CategoryMonthly { category_id, .. }
            | GoalKind::CategoryRate { category_id, .. } => Some(*category_id),
            GoalKind::NetWorthTarget | GoalKind::SavingsRate { .. } => None,
        }
    }

    pub fn tracking_period(&self) -> Option<TrackingPeriod> {
        match self {
            GoalKind::CategoryMonthly {
                tracking_period, ..
            }
            | GoalKind::CategoryRate {
                tracking_period, ..
            }
            | GoalKind::SavingsRate { tracking_period } => Some(*tracking_period),
            GoalKind::NetWorthTarget | GoalKind::CategoryTarget { .. } => None,
        }
    }

    pub fn starting_value(&self) -> Option<Decimal> {
        match self {
            GoalKind::CategoryTarget { starting_value, .. } => *starting_value,
            _ => None,
        }
    }

    /// Rate goals expressed as a percentage of net income.
    pub fn is_percentage(&self) -> bool {
        matches!(
            self,
            GoalKind::CategoryRate { .. } | GoalKind::SavingsRate { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    pub id: i64,
    pub name: String,
    pub kind: GoalKind,
    pub target_value: Decimal,
    pub target_date: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Goal {
    pub fn new(name: impl Into<String>, kind: GoalKind, target_value: Decimal) -> Self {
        Self {
            id: 0,
            name: name.into(),
            kind,
            target_value,
            target_date: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    pub fn with_target_date(mut self, date: NaiveDate) -> Self {
        self.target_date = Some(date);
        self
    }

    /// Field-level checks applied before a goal is written.
    pub fn validate(&self) -> Result<(), ValidationError> {
        crate::utils::validate_name(&self.name)?;
        if self.target_value < Decimal::ZERO {
            return Err(ValidationError::NegativeValue {
                field: "target_value".into(),
            });
        }
        crate::utils::validate_amount("target_value", self.target_value)?;
        if self.kind.is_percentage() {
            crate::utils::validate_percentage("target_value", self.target_value)?;
        }
        if let Some(start) = self.kind.starting_value() {
            if start < Decimal::ZERO {
                return Err(ValidationError::NegativeValue {
                    field: "starting_value".into(),
                });
            }
            crate::utils::validate_amount("starting_value", start)?;
        }
        Ok(())
    }

    pub fn record(&self, category: Option<&Category>) -> GoalRecord {
        GoalRecord {
            id: self.id,
            name: self.name.clone(),
            goal_type: self.kind.goal_type().to_string(),
            target_value: self.target_value,
            category_id: self.kind.category_id(),
            category: category.cloned(),
            tracking_period: self.kind.tracking_period(),
            target_date: self.target_date,
            starting_value: self.kind.starting_value(),
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}

/// Flat, serializable view of a [`Goal`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalRecord {
    pub id: i64,
    pub name: String,
    pub goal_type: String,
    pub target_value: Decimal,
    pub category_id: Option<i64>,
    pub category: Option<Category>,
    pub tracking_period: Option<TrackingPeriod>,
    pub target_date: Option<NaiveDate>,
    pub starting_value: Option<Decimal>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeItem {
    pub id: i64,
    pub name: String,
    pub gross_amount: Decimal,
    pub is_taxed: bool,
    pub tax_percentage: Option<Decimal>,
    pub is_deduction: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    OnTrack,
    Behind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalForecast {
    pub forecast_date: Option<NaiveDate>,
    pub months_until_target: Option<i64>,
    pub on_track: bool,
    pub required_monthly_change: Decimal,
    pub current_monthly_change: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_month: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_income: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_change: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub months_tracked: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_value: Option<Decimal>,
}

/// Per-request progress of one goal. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub goal: GoalRecord,
    pub current_value: Decimal,
    pub target_value: Decimal,
    pub progress_percentage: Decimal,
    pub is_achieved: bool,
    pub status: Option<ProgressStatus>,
    pub data_months: usize,
    pub category_name: Option<String>,
    pub details: GoalDetails,
    pub forecast: Option<GoalForecast>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub month: u32,
    pub year: i32,
    pub projected_net_worth: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetWorthForecast {
    pub period: TrackingPeriod,
    pub months_ahead: u32,
    pub monthly_change_rate: Decimal,
    pub data_points_used: usize,
    pub projections: Vec<ForecastPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub label: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryComparison {
    pub current_trajectory: Vec<TrajectoryPoint>,
    pub required_trajectory: Vec<TrajectoryPoint>,
    pub current_rate: Option<Decimal>,
    pub required_rate: Option<Decimal>,
}
