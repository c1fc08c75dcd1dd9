//! Terrain and density adjustment factors.

use rust_decimal::{Decimal, RoundingStrategy};

/// Labor-productivity factor for a terrain slope, as a three-tier step
/// function: flat (< 15%) → 1.00, rolling (15–30%) → 1.15, steep
/// (> 30%) → 1.30.
pub fn slope_factor(slope_percent: u16) -> Decimal {
    if slope_percent < 15 {
        Decimal::new(100, 2)
    } else if slope_percent <= 30 {
        Decimal::new(115, 2)
    } else {
        Decimal::new(130, 2)
    }
}

/// Ratio of the resolved planting density to the species' reference
/// density, quantized to four decimals.
///
/// A zero base density yields a neutral factor of 1 instead of dividing
/// by zero.
pub fn density_factor(base_density: u32, resolved_density: u32) -> Decimal {
    if base_density == 0 {
        return Decimal::ONE;
    }
    (Decimal::from(resolved_density) / Decimal::from(base_density))
        .round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
}
