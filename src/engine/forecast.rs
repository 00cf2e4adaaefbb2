// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::engine::trend::{self, Trend};
use crate::errors::ValidationError;
use crate::models::{
    ForecastPoint, GoalForecast, NetWorthForecast, Snapshot, TrackingPeriod, TrajectoryComparison,
    TrajectoryPoint,
};
use crate::utils::{add_months, first_of_month, months_between};

pub const MAX_MONTHS_AHEAD: u32 = 36;

pub fn validate_months_ahead(months_ahead: u32) -> Result<u32, ValidationError> {
    if !(1..=MAX_MONTHS_AHEAD).contains(&months_ahead) {
        return Err(ValidationError::MonthsAheadOutOfRange(months_ahead));
    }
    Ok(months_ahead)
}

/// Straight-line projection from `latest`: point `i` (1-based) is
/// `net_worth + rate * i`, rounded to cents. No compounding.
pub fn project(latest: &Snapshot, rate: Decimal, months_ahead: u32) -> Vec<ForecastPoint> {
    (1..=months_ahead)
        .map(|i| {
            let (year, month) = add_months(latest.year, latest.month, i);
            ForecastPoint {
                month,
                year,
                projected_net_worth: (latest.net_worth() + rate * Decimal::from(i)).round_dp(2),
            }
        })
        .collect()
}

/// Net-worth forecast over `months_ahead` months using the trailing average
/// for `period`. Projections use the unrounded rate; only the reported
/// rate and each projected value are rounded to cents.
pub fn net_worth_forecast(
    snapshots: &[Snapshot],
    period: TrackingPeriod,
    months_ahead: u32,
) -> NetWorthForecast {
    let Trend { rate, points_used } = trend::monthly_change_rate(snapshots, period);
    let projections = snapshots
        .first()
        .map(|latest| project(latest, rate, months_ahead))
        .unwrap_or_default();

    tracing::debug!(
        period = period.as_str(),
        months_ahead,
        %rate,
        points_used,
        "net worth forecast"
    );

    NetWorthForecast {
        period,
        months_ahead,
        monthly_change_rate: rate.round_dp(2),
        data_points_used: points_used,
        projections,
    }
}

/// Months until a net-worth `target` at the current pace. `Some(0)` when
/// already reached, `None` when there is no history or the pace never gets
/// there.
pub fn estimate_time_to_target(
    snapshots: &[Snapshot],
    target: Decimal,
    window: TrackingPeriod,
) -> Option<i64> {
    let latest = snapshots.first()?;
    let remaining = target - latest.net_worth();
    if remaining <= Decimal::ZERO {
        return Some(0);
    }
    let rate = trend::monthly_change_rate(snapshots, window).rate;
    months_to_close(remaining, rate)
}

fn months_to_close(remaining: Decimal, rate: Decimal) -> Option<i64> {
    if rate <= Decimal::ZERO {
        return None;
    }
    (remaining / rate).floor().to_i64().map(|m| m + 1)
}

/// Current-pace and required-pace series from the latest snapshot month to
/// `target_date`, one point per month (inclusive of both ends).
pub fn trajectory_comparison(
    snapshots: &[Snapshot],
    target_value: Decimal,
    target_date: NaiveDate,
) -> TrajectoryComparison {
    let Some(latest) = snapshots.first() else {
        return TrajectoryComparison::default();
    };
    let months_remaining = months_between(
        latest.year,
        latest.month,
        target_date.year(),
        target_date.month(),
    );
    if months_remaining <= 0 {
        return TrajectoryComparison::default();
    }

    let start = latest.net_worth();
    let current_rate = trend::monthly_change_rate(snapshots, TrackingPeriod::Quarter).rate;
    let required_rate = (target_value - start) / Decimal::from(months_remaining);

    let mut current_trajectory = Vec::with_capacity(months_remaining as usize + 1);
    let mut required_trajectory = Vec::with_capacity(months_remaining as usize + 1);
    for i in 0..=months_remaining as u32 {
        let (year, month) = add_months(latest.year, latest.month, i);
        let label = format!("{}-{:02}", year, month);
        let step = Decimal::from(i);
        current_trajectory.push(TrajectoryPoint {
            label: label.clone(),
            value: (start + current_rate * step).round_dp(2),
        });
        required_trajectory.push(TrajectoryPoint {
            label,
            value: (start + required_rate * step).round_dp(2),
        });
    }

    TrajectoryComparison {
        current_trajectory,
        required_trajectory,
        current_rate: Some(current_rate.round_dp(2)),
        required_rate: Some(required_rate.round_dp(2)),
    }
}

/// Deadline and pace analysis for a balance-style goal.
///
/// `remaining` is the distance still to cover and `current_monthly_change`
/// the pace toward it; both are already oriented so that positive means
/// "toward the target".
pub fn goal_forecast(
    remaining: Decimal,
    current_monthly_change: Decimal,
    latest: Option<&Snapshot>,
    target_date: Option<NaiveDate>,
    today: NaiveDate,
) -> GoalForecast {
    let mut months_until_target = None;
    let mut forecast_date = None;

    if current_monthly_change > Decimal::ZERO && remaining > Decimal::ZERO {
        months_until_target = months_to_close(remaining, current_monthly_change);
        if let (Some(latest), Some(months)) = (latest, months_until_target) {
            forecast_date = u32::try_from(months).ok().and_then(|m| {
                let (year, month) = add_months(latest.year, latest.month, m);
                first_of_month(year, month)
            });
        }
    } else if remaining <= Decimal::ZERO {
        months_until_target = Some(0);
        forecast_date = Some(today);
    }

    let mut on_track = false;
    let mut required_monthly_change = Decimal::ZERO;

    match (target_date, latest) {
        (Some(deadline), Some(latest)) => {
            let months_remaining =
                months_between(latest.year, latest.month, deadline.year(), deadline.month());
            if months_remaining > 0 && remaining > Decimal::ZERO {
                required_monthly_change = remaining / Decimal::from(months_remaining);
                on_track = current_monthly_change >= required_monthly_change;
            } else if remaining <= Decimal::ZERO {
                on_track = true;
            } else {
                // Deadline reached without the target: all of it is due now.
                required_monthly_change = remaining;
            }
        }
        (Some(_), None) => {
            on_track = remaining <= Decimal::ZERO;
        }
        (None, _) => {
            on_track = current_monthly_change > Decimal::ZERO || remaining <= Decimal::ZERO;
        }
    }

    GoalForecast {
        forecast_date,
        months_until_target,
        on_track,
        required_monthly_change: required_monthly_change.round_dp(2),
        current_monthly_change: current_monthly_change.round_dp(2),
    }
}
