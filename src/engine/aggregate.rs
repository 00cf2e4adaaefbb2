// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::{CategoryKind, Entry, Totals};

/// Computes every derived figure of a snapshot from its entries.
///
/// Liabilities count toward `personal_wealth` when personal but never toward
/// `company_wealth`. Only assets are grouped; percentages are left empty when
/// there are no positive assets.
pub fn aggregate(entries: &[Entry], previous_net_worth: Option<Decimal>) -> Totals {
    let mut totals = Totals::default();

    for entry in entries {
        let amount = entry.amount;
        let category = &entry.category;
        match category.kind {
            CategoryKind::Asset => {
                totals.total_assets += amount;
                if category.is_personal {
                    totals.personal_wealth += amount;
                } else {
                    totals.company_wealth += amount;
                }
                *totals
                    .by_group
                    .entry(category.group.as_str().to_string())
                    .or_insert(Decimal::ZERO) += amount;
            }
            CategoryKind::Liability => {
                totals.total_liabilities += amount;
                if category.is_personal {
                    totals.personal_wealth += amount;
                }
            }
        }
    }

    totals.net_worth = totals.total_assets + totals.total_liabilities;
    totals.change_from_previous = previous_net_worth
        .map(|prev| totals.net_worth - prev)
        .unwrap_or(Decimal::ZERO);
    totals.percentages = group_percentages(&totals.by_group, totals.total_assets);
    totals
}

/// `{"<group>_pct": share}` rounded to two places, or empty when
/// `total_assets` is not positive.
pub fn group_percentages(
    by_group: &BTreeMap<String, Decimal>,
    total_assets: Decimal,
) -> BTreeMap<String, Decimal> {
    if total_assets <= Decimal::ZERO {
        return BTreeMap::new();
    }
    by_group
        .iter()
        .map(|(group, total)| {
            let pct = (*total / total_assets * Decimal::ONE_HUNDRED).round_dp(2);
            (format!("{}_pct", group), pct)
        })
        .collect()
}
