// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use crate::engine::trend;
use crate::models::{IncomeItem, Snapshot, TrackingPeriod};

impl IncomeItem {
    /// Monthly net contribution of this item.
    ///
    /// Deductions subtract `gross * rate / 100` using their own rate (zero if
    /// unset). Taxed income keeps `gross * (1 - rate / 100)` where the rate is
    /// the item's own or else `default_tax_percentage`. Untaxed income is
    /// taken gross.
    pub fn calculate_net(&self, default_tax_percentage: Decimal) -> Decimal {
        if self.is_deduction {
            let rate = self.tax_percentage.unwrap_or(Decimal::ZERO);
            return -self.gross_amount * rate / Decimal::ONE_HUNDRED;
        }
        if !self.is_taxed {
            return self.gross_amount;
        }
        let rate = self.tax_percentage.unwrap_or(default_tax_percentage);
        self.gross_amount * (Decimal::ONE - rate / Decimal::ONE_HUNDRED)
    }
}

pub fn net_income(items: &[IncomeItem], default_tax_percentage: Decimal) -> Decimal {
    items
        .iter()
        .map(|item| item.calculate_net(default_tax_percentage))
        .sum()
}

/// Share of net income that the net-worth trend represents, as a
/// percentage rounded to cents. Zero when there is no positive income.
pub fn savings_rate(snapshots: &[Snapshot], net_income: Decimal, window: TrackingPeriod) -> Decimal {
    rate_of_income(trend::monthly_change_rate(snapshots, window).rate, net_income).round_dp(2)
}

pub(crate) fn rate_of_income(monthly_change: Decimal, net_income: Decimal) -> Decimal {
    if net_income <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    monthly_change / net_income * Decimal::ONE_HUNDRED
}
