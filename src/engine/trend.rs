// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Snapshot, TrackingPeriod};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Trend {
    pub rate: Decimal,
    pub points_used: usize,
}

/// Average month-over-month change in net worth.
///
/// `snapshots` must be newest first. Pairs are taken over the snapshots that
/// exist, not over calendar months, so a missing month shortens the window
/// instead of failing.
pub fn monthly_change_rate(snapshots: &[Snapshot], window: TrackingPeriod) -> Trend {
    change_rate_by(snapshots, window, Snapshot::net_worth)
}

/// Average month-over-month change of one category's amount. A snapshot
/// without an entry for the category counts as zero.
pub fn category_change_rate(
    snapshots: &[Snapshot],
    category_id: i64,
    window: TrackingPeriod,
) -> Trend {
    change_rate_by(snapshots, window, |s| s.category_amount(category_id))
}

fn change_rate_by<F>(snapshots: &[Snapshot], window: TrackingPeriod, value: F) -> Trend
where
    F: Fn(&Snapshot) -> Decimal,
{
    if snapshots.len() < 2 {
        return Trend::default();
    }

    let pairs = window.months().min(snapshots.len() - 1);
    let total: Decimal = snapshots
        .windows(2)
        .take(pairs)
        .map(|w| value(&w[0]) - value(&w[1]))
        .sum();

    if pairs == 0 {
        return Trend::default();
    }
    Trend {
        rate: total / Decimal::from(pairs as u64),
        points_used: pairs,
    }
}
