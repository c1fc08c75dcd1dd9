//! Grouping of line items into annual and project-level summaries.

use std::collections::BTreeMap;

use forest_core::CostCategory;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::resolver::CostLineItem;

/// Cost buckets for one project year.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnualSummary {
    /// Project year.
    pub year: u16,
    /// Labor subtotal.
    pub labor: Decimal,
    /// Input subtotal.
    pub inputs: Decimal,
    /// Service-class subtotal (Service, Legal and FixedAsset collapse here).
    pub services: Decimal,
    /// Year total.
    pub total: Decimal,
}

impl AnnualSummary {
    fn empty(year: u16) -> Self {
        Self {
            year,
            labor: Decimal::ZERO,
            inputs: Decimal::ZERO,
            services: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }
}

/// Aggregated view of a calculation's line items.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Year 0, when present. Never part of `annual`.
    pub installation: Option<AnnualSummary>,
    /// Years > 0 with activity, ascending. Idle years are absent.
    pub annual: Vec<AnnualSummary>,
    /// Sum of every year total, installation included.
    pub project_total: Decimal,
}

/// Group line items by year and category bucket.
///
/// Years are materialized on first touch in an ordered map, so the annual
/// sequence comes out ascending without a separate sort and absent years
/// are never zero-filled.
pub fn aggregate(items: &[CostLineItem]) -> CostBreakdown {
    let mut by_year: BTreeMap<u16, AnnualSummary> = BTreeMap::new();
    for item in items {
        let summary = by_year
            .entry(item.year)
            .or_insert_with(|| AnnualSummary::empty(item.year));
        match item.category {
            CostCategory::Labor => summary.labor += item.total_cost,
            CostCategory::Input => summary.inputs += item.total_cost,
            CostCategory::Service | CostCategory::Legal | CostCategory::FixedAsset => {
                summary.services += item.total_cost
            }
        }
        summary.total += item.total_cost;
    }

    let mut breakdown = CostBreakdown {
        installation: None,
        annual: Vec::with_capacity(by_year.len()),
        project_total: Decimal::ZERO,
    };
    for (year, summary) in by_year {
        breakdown.project_total += summary.total;
        if year == 0 {
            breakdown.installation = Some(summary);
        } else {
            breakdown.annual.push(summary);
        }
    }
    breakdown
}
