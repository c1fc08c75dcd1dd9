//! Per-activity cost resolution: technology-package entry to costed line item.

use forest_core::{CostCategory, TechPackageEntry};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Resolved request-level inputs shared by every line item of one
/// calculation.
#[derive(Clone, Debug)]
pub struct PricingContext {
    /// Plantation area in hectares.
    pub area_ha: Decimal,
    /// User-declared cost of one labor day.
    pub labor_unit_cost: Decimal,
    /// User-declared cost of one seedling.
    pub seedling_unit_cost: Decimal,
    /// Terrain factor from [`crate::factors::slope_factor`].
    pub slope_factor: Decimal,
    /// Density factor from [`crate::factors::density_factor`].
    pub density_factor: Decimal,
}

/// One costed activity. Immutable once produced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CostLineItem {
    /// Project year the activity falls in.
    pub year: u16,
    /// Cost category.
    pub category: CostCategory,
    /// Activity description.
    pub activity: String,
    /// Technical quantity scaled to the requested area, before factors.
    pub base_quantity: Decimal,
    /// Quantity after density and slope adjustments, unrounded.
    pub adjusted_quantity: Decimal,
    /// Unit cost the entry resolved to.
    pub unit_cost: Decimal,
    /// adjusted_quantity × unit_cost, quantized to 2 decimals half-up.
    pub total_cost: Decimal,
}

/// Resolve one technology-package entry into a costed line item.
///
/// Pure function; the adjustment order is fixed:
/// 1. scale the technical quantity to the area,
/// 2. density adjustment (labor splits half fixed / half variable,
///    everything else scales fully proportionally),
/// 3. slope adjustment for slope-sensitive labor,
/// 4. unit-cost selection by category,
/// 5. a single quantization of the total.
///
/// Intermediate quantities keep full precision; only the total is rounded.
pub fn resolve_line_item(entry: &TechPackageEntry, ctx: &PricingContext) -> CostLineItem {
    let base_quantity = entry.base_quantity * ctx.area_ha;

    let mut adjusted = base_quantity;
    if entry.density_sensitive {
        adjusted = match entry.category {
            // Site-prep labor does not grow with density, planting labor
            // does; the package models this as a 50/50 split.
            CostCategory::Labor => {
                let half = base_quantity * Decimal::new(5, 1);
                half + half * ctx.density_factor
            }
            _ => base_quantity * ctx.density_factor,
        };
    }
    // Slope degrades human productivity only; input consumption is
    // unaffected by terrain.
    if entry.slope_sensitive && entry.category == CostCategory::Labor {
        adjusted *= ctx.slope_factor;
    }

    let unit_cost = match entry.category {
        CostCategory::Labor => ctx.labor_unit_cost,
        CostCategory::Input if entry.is_seedling => ctx.seedling_unit_cost,
        // Non-seedling inputs and all support categories price from the
        // catalog reference; the match is exhaustive so nothing falls
        // through silently.
        CostCategory::Input | CostCategory::Service | CostCategory::Legal | CostCategory::FixedAsset => {
            entry.reference_unit_cost
        }
    };

    let total_cost =
        (adjusted * unit_cost).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    CostLineItem {
        year: entry.project_year,
        category: entry.category,
        activity: entry.activity.clone(),
        base_quantity,
        adjusted_quantity: adjusted,
        unit_cost,
        total_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forest_core::SpeciesId;

    fn entry(category: CostCategory, base_quantity: Decimal) -> TechPackageEntry {
        TechPackageEntry {
            species: SpeciesId("teak".to_string()),
            project_year: 0,
            category,
            activity: "Test activity".to_string(),
            unit_of_measure: "unit".to_string(),
            base_quantity,
            slope_sensitive: false,
            density_sensitive: false,
            is_seedling: false,
            reference_unit_cost: Decimal::ZERO,
        }
    }

    fn ctx() -> PricingContext {
        PricingContext {
            area_ha: Decimal::ONE,
            labor_unit_cost: Decimal::new(5000, 2),
            seedling_unit_cost: Decimal::new(80, 2),
            slope_factor: Decimal::ONE,
            density_factor: Decimal::ONE,
        }
    }

    #[test]
    fn labor_density_split_is_half_fixed_half_variable() {
        // 80 labor days at factor 1.13: 40 + 40·1.13 = 85.2
        let mut e = entry(CostCategory::Labor, Decimal::new(80, 0));
        e.density_sensitive = true;
        let mut c = ctx();
        c.density_factor = Decimal::new(113, 2);
        let item = resolve_line_item(&e, &c);
        assert_eq!(item.adjusted_quantity, Decimal::new(852, 1));
        assert_eq!(item.total_cost, Decimal::new(426000, 2)); // 85.2 · 50.00
    }

    #[test]
    fn slope_applies_after_density_for_labor() {
        let mut e = entry(CostCategory::Labor, Decimal::new(80, 0));
        e.density_sensitive = true;
        e.slope_sensitive = true;
        let mut c = ctx();
        c.density_factor = Decimal::new(113, 2);
        c.slope_factor = Decimal::new(115, 2);
        let item = resolve_line_item(&e, &c);
        // 85.2 · 1.15 = 97.98, · 50.00 = 4899.00
        assert_eq!(item.adjusted_quantity, Decimal::new(9798, 2));
        assert_eq!(item.total_cost, Decimal::new(489900, 2));
    }

    #[test]
    fn slope_never_touches_inputs() {
        let mut e = entry(CostCategory::Input, Decimal::new(20, 0));
        e.slope_sensitive = true;
        e.reference_unit_cost = Decimal::new(350, 2);
        let mut c = ctx();
        c.slope_factor = Decimal::new(130, 2);
        let item = resolve_line_item(&e, &c);
        assert_eq!(item.adjusted_quantity, Decimal::new(20, 0));
        assert_eq!(item.total_cost, Decimal::new(7000, 2));
    }

    #[test]
    fn seedlings_scale_fully_with_density_and_use_user_price() {
        let mut e = entry(CostCategory::Input, Decimal::new(833, 0));
        e.density_sensitive = true;
        e.is_seedling = true;
        let mut c = ctx();
        c.density_factor = Decimal::new(12, 1); // 1.2
        let item = resolve_line_item(&e, &c);
        // 833 · 1.2 = 999.6, · 0.80 = 799.68
        assert_eq!(item.adjusted_quantity, Decimal::new(9996, 1));
        assert_eq!(item.unit_cost, Decimal::new(80, 2));
        assert_eq!(item.total_cost, Decimal::new(79968, 2));
    }

    #[test]
    fn non_seedling_input_uses_reference_cost() {
        let mut e = entry(CostCategory::Input, Decimal::new(2, 0));
        e.reference_unit_cost = Decimal::new(350, 2);
        let mut c = ctx();
        c.area_ha = Decimal::new(10, 0);
        let item = resolve_line_item(&e, &c);
        assert_eq!(item.base_quantity, Decimal::new(20, 0));
        assert_eq!(item.unit_cost, Decimal::new(350, 2));
        assert_eq!(item.total_cost, Decimal::new(7000, 2));
    }

    #[test]
    fn support_categories_use_reference_cost() {
        for category in [
            CostCategory::Service,
            CostCategory::Legal,
            CostCategory::FixedAsset,
        ] {
            let mut e = entry(category, Decimal::ONE);
            e.reference_unit_cost = Decimal::new(45000, 2);
            let item = resolve_line_item(&e, &ctx());
            assert_eq!(item.unit_cost, Decimal::new(45000, 2));
            assert_eq!(item.total_cost, Decimal::new(45000, 2));
        }
    }

    #[test]
    fn total_is_quantized_to_cents() {
        // 3.333 · 1.115 = 3.716295 → 3.72 after the single rounding step
        let mut e = entry(CostCategory::Input, Decimal::new(3333, 3));
        e.reference_unit_cost = Decimal::new(1115, 3);
        let item = resolve_line_item(&e, &ctx());
        assert_eq!(item.adjusted_quantity, Decimal::new(3333, 3));
        assert_eq!(item.total_cost, Decimal::new(372, 2));
    }
}
