// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::engine::income::rate_of_income;
use crate::engine::{forecast, status, trend};
use crate::models::{
    Category, Goal, GoalDetails, GoalForecast, GoalKind, GoalProgress, ProgressStatus, Snapshot,
    TrackingPeriod,
};

/// Window used for the pace of balance goals in their forecast block.
const FORECAST_WINDOW: TrackingPeriod = TrackingPeriod::Quarter;

/// Everything goal evaluation reads. Loaded once per request and shared
/// across goals.
#[derive(Debug, Clone, Copy)]
pub struct ProgressContext<'a> {
    /// Snapshot history, newest first.
    pub snapshots: &'a [Snapshot],
    pub categories: &'a [Category],
    pub net_income: Decimal,
    pub today: NaiveDate,
}

impl<'a> ProgressContext<'a> {
    pub fn latest(&self) -> Option<&'a Snapshot> {
        self.snapshots.first()
    }

    pub fn category(&self, id: i64) -> Option<&'a Category> {
        self.categories.iter().find(|c| c.id == id)
    }
}

/// Progress of every active goal, in input order.
pub fn evaluate_all(goals: &[Goal], ctx: &ProgressContext<'_>) -> Vec<GoalProgress> {
    goals
        .iter()
        .filter(|g| g.is_active)
        .map(|g| evaluate(g, ctx))
        .collect()
}

/// Where a balance goal stands, oriented so that positive `remaining` and
/// positive `pace` both point toward the target.
struct Standing {
    current: Decimal,
    percentage: Decimal,
    achieved: bool,
    remaining: Decimal,
    accumulated: Decimal,
    pace: Decimal,
}

pub fn evaluate(goal: &Goal, ctx: &ProgressContext<'_>) -> GoalProgress {
    let category = goal.kind.category_id().and_then(|id| ctx.category(id));
    let data_months = ctx.snapshots.len();
    let target = goal.target_value;
    let mut details = GoalDetails::default();

    let (current_value, progress_percentage, is_achieved, status, forecast) = match &goal.kind {
        GoalKind::NetWorthTarget => {
            let latest = ctx.latest();
            details.latest_month = latest.map(Snapshot::label);
            let current = latest.map(Snapshot::net_worth).unwrap_or(Decimal::ZERO);
            let pace = trend::monthly_change_rate(ctx.snapshots, FORECAST_WINDOW).rate;
            let standing = standard_standing(current, target, pace);
            balance_outcome(goal, ctx, standing)
        }
        GoalKind::CategoryTarget {
            category_id,
            starting_value,
        } => {
            let latest = ctx.latest();
            details.latest_month = latest.map(Snapshot::label);
            let is_liability = category.is_some_and(Category::is_liability);
            let raw = latest
                .map(|s| s.category_amount(*category_id))
                .unwrap_or(Decimal::ZERO);
            let current = if is_liability { raw.abs() } else { raw };
            let delta = trend::category_change_rate(ctx.snapshots, *category_id, FORECAST_WINDOW)
                .rate;

            let standing = match (is_liability, starting_value) {
                (true, Some(start)) => {
                    details.starting_value = Some(*start);
                    paydown_standing(*start, current, target, delta)
                }
                // A liability's magnitude grows when its stored amount falls.
                (true, None) => standard_standing(current, target, -delta),
                (false, _) => standard_standing(current, target, delta),
            };
            balance_outcome(goal, ctx, standing)
        }
        GoalKind::CategoryMonthly {
            category_id,
            tracking_period,
        } => {
            let t = trend::category_change_rate(ctx.snapshots, *category_id, *tracking_period);
            details.monthly_change = Some(t.rate.round_dp(2));
            details.months_tracked = Some(t.points_used);
            rate_outcome(t.rate, target, data_months)
        }
        GoalKind::CategoryRate {
            category_id,
            tracking_period,
        } => {
            let t = trend::category_change_rate(ctx.snapshots, *category_id, *tracking_period);
            details.monthly_change = Some(t.rate.round_dp(2));
            details.months_tracked = Some(t.points_used);
            details.net_income = Some(ctx.net_income.round_dp(2));
            let current = rate_of_income(t.rate, ctx.net_income);
            rate_outcome(current, target, data_months)
        }
        GoalKind::SavingsRate { tracking_period } => {
            let t = trend::monthly_change_rate(ctx.snapshots, *tracking_period);
            details.monthly_change = Some(t.rate.round_dp(2));
            details.months_tracked = Some(t.points_used);
            details.net_income = Some(ctx.net_income.round_dp(2));
            let current = rate_of_income(t.rate, ctx.net_income);
            rate_outcome(current, target, data_months)
        }
    };

    let category_name = category.map(|c| c.name.clone());
    details.category_name = category_name.clone();

    tracing::debug!(
        goal = %goal.name,
        goal_type = goal.kind.goal_type(),
        %current_value,
        %progress_percentage,
        is_achieved,
        "evaluated goal"
    );

    GoalProgress {
        goal: goal.record(category),
        current_value,
        target_value: target,
        progress_percentage,
        is_achieved,
        status,
        data_months,
        category_name,
        details,
        forecast,
    }
}

type Outcome = (
    Decimal,
    Decimal,
    bool,
    Option<ProgressStatus>,
    Option<GoalForecast>,
);

fn balance_outcome(goal: &Goal, ctx: &ProgressContext<'_>, s: Standing) -> Outcome {
    let status = status::target_status(
        goal.target_date,
        s.achieved,
        s.remaining,
        s.accumulated,
        ctx.snapshots.len(),
        ctx.today,
    );
    let forecast = forecast::goal_forecast(
        s.remaining,
        s.pace,
        ctx.latest(),
        goal.target_date,
        ctx.today,
    );
    (s.current, s.percentage, s.achieved, status, Some(forecast))
}

/// Comparisons use the exact pace; only the reported value is rounded.
fn rate_outcome(current: Decimal, target: Decimal, data_months: usize) -> Outcome {
    (
        current.round_dp(2),
        progress_percentage(current, target),
        current >= target,
        status::rate_status(current, target, data_months),
        None,
    )
}

fn standard_standing(current: Decimal, target: Decimal, pace: Decimal) -> Standing {
    Standing {
        current,
        percentage: progress_percentage(current, target),
        achieved: current >= target,
        remaining: target - current,
        accumulated: current,
        pace,
    }
}

fn paydown_standing(starting: Decimal, current: Decimal, target: Decimal, pace: Decimal) -> Standing {
    Standing {
        current,
        percentage: paydown_percentage(starting, current, target),
        achieved: current <= target,
        remaining: current - target,
        accumulated: starting - current,
        pace,
    }
}

/// `current / target` as a percentage in `[0, 100]`. A zero target counts
/// as met by any non-negative value.
pub fn progress_percentage(current: Decimal, target: Decimal) -> Decimal {
    let raw = if target > Decimal::ZERO {
        current / target * Decimal::ONE_HUNDRED
    } else if target.is_zero() && current >= Decimal::ZERO {
        Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };
    clamp_percentage(raw)
}

/// Share of the way from `starting` debt down to `target` debt, in
/// `[0, 100]`.
pub fn paydown_percentage(starting: Decimal, current: Decimal, target: Decimal) -> Decimal {
    let raw = if starting > target {
        (starting - current) / (starting - target) * Decimal::ONE_HUNDRED
    } else if starting == target {
        Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };
    clamp_percentage(raw)
}

fn clamp_percentage(raw: Decimal) -> Decimal {
    raw.max(Decimal::ZERO).min(Decimal::ONE_HUNDRED).round_dp(2)
}
