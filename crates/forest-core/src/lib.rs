#![deny(warnings)]

//! Core domain models and invariants for the plantation cost estimator.
//!
//! This crate defines serializable reference and request types used across
//! the costing engine with validation helpers to guarantee basic invariants.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unique identifier for an economic zone, e.g. "selva-alta".
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ZoneId(pub String);

/// Unique identifier for a district (ubigeo-style code), e.g. "220901".
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DistrictId(pub String);

/// Unique identifier for a tree species, e.g. "teak".
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpeciesId(pub String);

/// Groups districts with similar labor and input costs.
///
/// The reference costs are suggestions for the caller to pre-fill the
/// user-editable fields of a [`CalculationRequest`]; the engine itself only
/// ever uses the costs the request carries.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EconomicZone {
    /// Zone identifier.
    pub id: ZoneId,
    /// Human-readable zone name (e.g. "Selva Alta").
    pub name: String,
    /// Suggested cost of one labor day.
    pub reference_labor_cost: Decimal,
    /// Suggested cost of one seedling.
    pub reference_seedling_cost: Decimal,
}

/// Smallest administrative unit; carries the terrain descriptor.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct District {
    /// District identifier (official six-digit code).
    pub id: DistrictId,
    /// District name.
    pub name: String,
    /// Economic zone this district belongs to.
    pub zone: ZoneId,
    /// Estimated average terrain slope in percent.
    pub slope_percent: u16,
}

/// A plantable tree species with its reference agronomics.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Species {
    /// Species identifier.
    pub id: SpeciesId,
    /// Common name (e.g. "Bolaina Blanca").
    pub name: String,
    /// Reference planting density in plants per hectare.
    pub base_density: u32,
    /// Years from planting to final harvest.
    pub harvest_horizon_years: u16,
    /// Expected harvest yield per hectare (m³/ha).
    pub yield_per_ha: Decimal,
    /// Reference sale price per yield unit (per m³).
    pub reference_harvest_price: Decimal,
}

/// Cost categories a technology-package activity can belong to.
///
/// The derived ordering (labor first, fixed assets last) is the canonical
/// presentation order for catalog listings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CostCategory {
    /// Human labor, priced per labor day from the request.
    Labor,
    /// Consumable inputs (seedlings, fertilizer, agrochemicals).
    Input,
    /// Contracted services (transport, machinery).
    Service,
    /// Legal and administrative charges.
    Legal,
    /// Fixed assets (tools, small infrastructure).
    FixedAsset,
}

/// One predefined activity of a species' technology package.
///
/// Entries are reference data: the engine reads them and never mutates them.
/// The triple (species, project_year, activity) is unique within a catalog.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TechPackageEntry {
    /// Species this activity belongs to.
    pub species: SpeciesId,
    /// Project year, 0 = installation.
    pub project_year: u16,
    /// Cost category.
    pub category: CostCategory,
    /// Activity description (e.g. "Hole digging").
    pub activity: String,
    /// Unit of measure (e.g. "labor day", "kg", "unit").
    pub unit_of_measure: String,
    /// Technical quantity per hectare on flat terrain.
    pub base_quantity: Decimal,
    /// Whether terrain slope degrades productivity (labor only).
    pub slope_sensitive: bool,
    /// Whether the quantity scales with planting density.
    pub density_sensitive: bool,
    /// Marks Input entries priced from the request's seedling cost.
    pub is_seedling: bool,
    /// Catalog unit cost for non-seedling, non-labor entries.
    pub reference_unit_cost: Decimal,
}

/// Planting layout systems.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlantingSystem {
    /// Plants on a square grid; one spacing.
    Square,
    /// Plants on a rectangular grid; row and plant spacing differ.
    Rectangular,
    /// "Tres bolillo": equilateral triangular packing; one spacing.
    Triangular,
}

/// User-chosen planting geometry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlantingGeometry {
    /// Layout system.
    pub system: PlantingSystem,
    /// Spacing between plants in meters (> 0).
    pub primary_spacing_m: Decimal,
    /// Second spacing in meters; required and > 0 only for Rectangular.
    pub secondary_spacing_m: Option<Decimal>,
}

/// Validated input for one cost calculation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Target district.
    pub district: DistrictId,
    /// Species to plant.
    pub species: SpeciesId,
    /// Plantation area in hectares (> 0).
    pub area_ha: Decimal,
    /// User-declared cost of one labor day (> 0).
    pub labor_unit_cost: Decimal,
    /// User-declared cost of one seedling (> 0).
    pub seedling_unit_cost: Decimal,
    /// First project year to include (0 = installation).
    pub year_start: u16,
    /// Last project year to include (>= year_start).
    pub year_end: u16,
    /// Planting geometry.
    pub geometry: PlantingGeometry,
    /// Include Service/Legal/FixedAsset entries in the calculation.
    pub include_support_categories: bool,
}

/// Validation errors for request invariants, naming the offending field.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A field that must be strictly positive was zero or negative.
    #[error("{field} must be positive")]
    NonPositive {
        /// Offending request field.
        field: &'static str,
    },
    /// A field that must be non-negative was negative.
    #[error("{field} must not be negative")]
    Negative {
        /// Offending field.
        field: &'static str,
    },
    /// The requested year window is inverted.
    #[error("year_end {end} precedes year_start {start}")]
    YearRangeInverted {
        /// Requested first year.
        start: u16,
        /// Requested last year.
        end: u16,
    },
    /// Rectangular geometry without a usable second spacing.
    #[error("secondary_spacing_m is required and must be positive for rectangular geometry")]
    MissingSecondarySpacing,
    /// A required text field was empty.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Offending field.
        field: &'static str,
    },
}

/// Validate a planting geometry.
pub fn validate_geometry(g: &PlantingGeometry) -> Result<(), ValidationError> {
    if g.primary_spacing_m <= Decimal::ZERO {
        return Err(ValidationError::NonPositive {
            field: "primary_spacing_m",
        });
    }
    if g.system == PlantingSystem::Rectangular {
        match g.secondary_spacing_m {
            Some(s) if s > Decimal::ZERO => {}
            _ => return Err(ValidationError::MissingSecondarySpacing),
        }
    }
    Ok(())
}

/// Validate a calculation request before any arithmetic runs.
pub fn validate_request(r: &CalculationRequest) -> Result<(), ValidationError> {
    if r.district.0.trim().is_empty() {
        return Err(ValidationError::EmptyField { field: "district" });
    }
    if r.species.0.trim().is_empty() {
        return Err(ValidationError::EmptyField { field: "species" });
    }
    if r.area_ha <= Decimal::ZERO {
        return Err(ValidationError::NonPositive { field: "area_ha" });
    }
    if r.labor_unit_cost <= Decimal::ZERO {
        return Err(ValidationError::NonPositive {
            field: "labor_unit_cost",
        });
    }
    if r.seedling_unit_cost <= Decimal::ZERO {
        return Err(ValidationError::NonPositive {
            field: "seedling_unit_cost",
        });
    }
    if r.year_end < r.year_start {
        return Err(ValidationError::YearRangeInverted {
            start: r.year_start,
            end: r.year_end,
        });
    }
    validate_geometry(&r.geometry)
}

/// Validate a technology-package entry loaded from a catalog.
pub fn validate_entry(e: &TechPackageEntry) -> Result<(), ValidationError> {
    if e.activity.trim().is_empty() {
        return Err(ValidationError::EmptyField { field: "activity" });
    }
    if e.base_quantity < Decimal::ZERO {
        return Err(ValidationError::Negative {
            field: "base_quantity",
        });
    }
    if e.reference_unit_cost < Decimal::ZERO {
        return Err(ValidationError::Negative {
            field: "reference_unit_cost",
        });
    }
    Ok(())
}

/// Validate a species record.
pub fn validate_species(s: &Species) -> Result<(), ValidationError> {
    if s.name.trim().is_empty() {
        return Err(ValidationError::EmptyField { field: "name" });
    }
    if s.yield_per_ha < Decimal::ZERO {
        return Err(ValidationError::Negative {
            field: "yield_per_ha",
        });
    }
    if s.reference_harvest_price < Decimal::ZERO {
        return Err(ValidationError::Negative {
            field: "reference_harvest_price",
        });
    }
    Ok(())
}
