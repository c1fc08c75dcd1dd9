//! Planting-geometry resolution: spacing specification to plants per hectare.

use forest_core::{PlantingGeometry, PlantingSystem};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::CostingError;

/// Area of one hectare in square meters.
fn hectare_m2() -> Decimal {
    Decimal::new(10_000, 0)
}

/// sin(60°) to six decimals, the footprint factor of equilateral
/// triangular ("tres bolillo") packing.
fn triangular_packing_factor() -> Decimal {
    Decimal::new(866_025, 6)
}

/// Resolve a planting geometry into whole plants per hectare.
///
/// - Square: 10000 / s²
/// - Rectangular: 10000 / (s₁ · s₂)
/// - Triangular: 10000 / (s² · sin 60°)
///
/// The result is rounded half-up to the nearest plant. Non-positive
/// spacings fail with [`CostingError::InvalidGeometry`] even though request
/// validation already rejects them upstream.
pub fn resolve_density(geometry: &PlantingGeometry) -> Result<u32, CostingError> {
    if geometry.primary_spacing_m <= Decimal::ZERO {
        return Err(CostingError::InvalidGeometry(
            "primary spacing must be positive",
        ));
    }
    let footprint_m2 = match geometry.system {
        PlantingSystem::Square => geometry.primary_spacing_m * geometry.primary_spacing_m,
        PlantingSystem::Rectangular => {
            let secondary = geometry
                .secondary_spacing_m
                .filter(|s| *s > Decimal::ZERO)
                .ok_or(CostingError::InvalidGeometry(
                    "rectangular layout requires a positive secondary spacing",
                ))?;
            geometry.primary_spacing_m * secondary
        }
        PlantingSystem::Triangular => {
            geometry.primary_spacing_m * geometry.primary_spacing_m * triangular_packing_factor()
        }
    };
    let plants = (hectare_m2() / footprint_m2)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    plants
        .to_u32()
        .ok_or(CostingError::InvalidGeometry("resolved density out of range"))
}
