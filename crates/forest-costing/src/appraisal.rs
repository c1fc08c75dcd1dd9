//! Investment appraisal over the aggregated cash flows.

use std::collections::BTreeMap;

use forest_core::Species;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::aggregate::CostBreakdown;

/// Annual policy discount rate applied when the caller has no override (10%).
pub fn default_discount_rate() -> Decimal {
    Decimal::new(10, 2)
}

/// Investment-appraisal indicators for one calculation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinancialAppraisal {
    /// Net present value of all cash flows at the discount rate.
    pub npv: Decimal,
    /// Present value of positive flows over present value of negative
    /// flows; 0 when there are no negative flows.
    pub benefit_cost_ratio: Decimal,
    /// Projected revenue of the final harvest.
    pub estimated_harvest_revenue: Decimal,
    /// Reserved indicator. A root-finding IRR solver is intentionally not
    /// part of this engine; the value is always zero.
    pub irr: Decimal,
}

/// Appraise a cost breakdown against the species' harvest economics.
///
/// Costs enter the timeline as negative flows per year. The projected
/// harvest revenue (area × yield × reference price, quantized to cents) is
/// credited in the species' harvest-horizon year even when that year lies
/// outside the calculated window, merging additively with any cost booked
/// there.
pub fn appraise(
    breakdown: &CostBreakdown,
    species: &Species,
    area_ha: Decimal,
    discount_rate: Decimal,
) -> FinancialAppraisal {
    let harvest_revenue = (area_ha * species.yield_per_ha * species.reference_harvest_price)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    let mut flows: BTreeMap<u16, Decimal> = BTreeMap::new();
    for summary in breakdown.installation.iter().chain(breakdown.annual.iter()) {
        flows.insert(summary.year, -summary.total);
    }
    *flows
        .entry(species.harvest_horizon_years)
        .or_insert(Decimal::ZERO) += harvest_revenue;

    let growth = Decimal::ONE + discount_rate;
    let mut npv = Decimal::ZERO;
    let mut benefits_pv = Decimal::ZERO;
    let mut costs_pv = Decimal::ZERO;
    // The map iterates years ascending, so the discount divisor can be
    // grown incrementally instead of re-exponentiating per flow.
    let mut divisor = Decimal::ONE;
    let mut divisor_year = 0u16;
    for (&year, &flow) in &flows {
        while divisor_year < year {
            divisor *= growth;
            divisor_year += 1;
        }
        let present = flow / divisor;
        npv += present;
        if present > Decimal::ZERO {
            benefits_pv += present;
        } else {
            costs_pv -= present;
        }
    }

    let benefit_cost_ratio = if costs_pv > Decimal::ZERO {
        (benefits_pv / costs_pv).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    } else {
        Decimal::ZERO
    };

    FinancialAppraisal {
        npv: npv.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        benefit_cost_ratio,
        estimated_harvest_revenue: harvest_revenue,
        irr: Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::AnnualSummary;
    use forest_core::SpeciesId;

    fn species(horizon: u16, yield_per_ha: Decimal, price: Decimal) -> Species {
        Species {
            id: SpeciesId("teak".to_string()),
            name: "Teak".to_string(),
            base_density: 833,
            harvest_horizon_years: horizon,
            yield_per_ha,
            reference_harvest_price: price,
        }
    }

    fn summary(year: u16, total_cents: i64) -> AnnualSummary {
        AnnualSummary {
            year,
            labor: Decimal::new(total_cents, 2),
            inputs: Decimal::ZERO,
            services: Decimal::ZERO,
            total: Decimal::new(total_cents, 2),
        }
    }

    fn breakdown(installation: Option<AnnualSummary>, annual: Vec<AnnualSummary>) -> CostBreakdown {
        let project_total = installation
            .iter()
            .chain(annual.iter())
            .map(|s| s.total)
            .sum();
        CostBreakdown {
            installation,
            annual,
            project_total,
        }
    }

    #[test]
    fn lone_year_zero_revenue_discounts_to_itself() {
        // Horizon 0: the whole revenue lands undiscounted.
        let s = species(0, Decimal::new(100, 0), Decimal::new(250, 2));
        let b = breakdown(None, vec![]);
        let a = appraise(&b, &s, Decimal::ONE, default_discount_rate());
        assert_eq!(a.estimated_harvest_revenue, Decimal::new(25000, 2));
        assert_eq!(a.npv, Decimal::new(25000, 2));
        // No cost flows: the ratio guard reports 0.
        assert_eq!(a.benefit_cost_ratio, Decimal::ZERO);
        assert_eq!(a.irr, Decimal::ZERO);
    }

    #[test]
    fn npv_discounts_costs_and_revenue() {
        // -100 in year 0, +220 in year 1 at 10%: npv = -100 + 200 = 100
        let s = species(1, Decimal::new(220, 0), Decimal::ONE);
        let b = breakdown(Some(summary(0, 10_000)), vec![]);
        let a = appraise(&b, &s, Decimal::ONE, default_discount_rate());
        assert_eq!(a.npv, Decimal::new(10_000, 2));
        assert_eq!(a.benefit_cost_ratio, Decimal::new(200, 2));
    }

    #[test]
    fn harvest_year_cost_merges_with_revenue() {
        // Year 1 books -110 of maintenance and +220 of harvest: the net
        // +110 discounts to +100, cancelling the year-0 cost exactly.
        let s = species(1, Decimal::new(220, 0), Decimal::ONE);
        let b = breakdown(Some(summary(0, 10_000)), vec![summary(1, 11_000)]);
        let a = appraise(&b, &s, Decimal::ONE, default_discount_rate());
        assert_eq!(a.npv, Decimal::ZERO);
        assert_eq!(a.benefit_cost_ratio, Decimal::new(100, 2));
    }

    #[test]
    fn revenue_lands_outside_calculated_window() {
        // Costs stop at year 1 but the species harvests at year 8; the
        // revenue flow must exist anyway.
        let s = species(8, Decimal::new(150, 0), Decimal::new(12000, 2));
        let b = breakdown(Some(summary(0, 500_000)), vec![summary(1, 100_000)]);
        let a = appraise(&b, &s, Decimal::ONE, default_discount_rate());
        assert_eq!(a.estimated_harvest_revenue, Decimal::new(1_800_000, 2));
        assert!(a.npv > Decimal::ZERO);
        assert!(a.benefit_cost_ratio > Decimal::ONE);
    }

    #[test]
    fn pure_cost_project_has_negative_npv_and_zero_ratio() {
        let s = species(5, Decimal::ZERO, Decimal::ZERO);
        let b = breakdown(Some(summary(0, 10_000)), vec![summary(2, 5_000)]);
        let a = appraise(&b, &s, Decimal::ONE, default_discount_rate());
        assert!(a.npv < Decimal::ZERO);
        assert_eq!(a.estimated_harvest_revenue, Decimal::ZERO);
        assert_eq!(a.benefit_cost_ratio, Decimal::ZERO);
    }

    #[test]
    fn revenue_quantizes_to_cents() {
        // 1.5 ha · 33.333 m³ · 1.115 = 55.7494425 → 55.75
        let s = species(3, Decimal::new(33_333, 3), Decimal::new(1115, 3));
        let b = breakdown(None, vec![]);
        let a = appraise(&b, &s, Decimal::new(15, 1), default_discount_rate());
        assert_eq!(a.estimated_harvest_revenue, Decimal::new(5575, 2));
    }
}
