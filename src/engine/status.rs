// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::models::ProgressStatus;
use crate::utils::months_between;

pub const MIN_RATE_DATA_MONTHS: usize = 2;
pub const MIN_TARGET_DATA_MONTHS: usize = 3;

/// Status of a pace goal: `None` until two snapshots exist, then a plain
/// comparison of the measured pace against the target.
pub fn rate_status(
    current_value: Decimal,
    target_value: Decimal,
    data_months: usize,
) -> Option<ProgressStatus> {
    if data_months < MIN_RATE_DATA_MONTHS {
        return None;
    }
    Some(if current_value >= target_value {
        ProgressStatus::OnTrack
    } else {
        ProgressStatus::Behind
    })
}

/// Status of a balance goal with a deadline.
///
/// `remaining` is what is still to cover and `accumulated` what has been
/// covered over the `data_months` of history; the historical monthly average
/// `accumulated / data_months` must keep up with `remaining` spread over the
/// whole months left until `target_date`.
pub fn target_status(
    target_date: Option<NaiveDate>,
    is_achieved: bool,
    remaining: Decimal,
    accumulated: Decimal,
    data_months: usize,
    today: NaiveDate,
) -> Option<ProgressStatus> {
    let deadline = target_date?;
    if data_months < MIN_TARGET_DATA_MONTHS {
        return None;
    }
    if is_achieved {
        return Some(ProgressStatus::OnTrack);
    }
    if deadline < today {
        return Some(ProgressStatus::Behind);
    }

    let months_remaining =
        months_between(today.year(), today.month(), deadline.year(), deadline.month());
    if months_remaining <= 0 {
        return Some(ProgressStatus::Behind);
    }

    let required_monthly = remaining / Decimal::from(months_remaining);
    let current_monthly = accumulated / Decimal::from(data_months as u64);
    Some(if current_monthly >= required_monthly {
        ProgressStatus::OnTrack
    } else {
        ProgressStatus::Behind
    })
}
