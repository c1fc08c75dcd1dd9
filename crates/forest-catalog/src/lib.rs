#![deny(warnings)]

//! Reference-data collaborators and the request-level estimation service.
//!
//! The costing engine treats zone, species and technology-package lookups
//! as already resolved; this crate supplies those lookups behind small
//! synchronous traits, ships an in-memory implementation with a built-in
//! seed dataset, and folds validation, lookup and costing failures into a
//! single structured error at the service boundary.

use forest_core::{
    CalculationRequest, District, DistrictId, EconomicZone, Species, SpeciesId, TechPackageEntry,
    ValidationError, ZoneId,
};
use forest_costing::{CalculationResult, CostingError, EstimateContext};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

pub mod seed;

pub use seed::seed_catalog;

/// Lookup failures against reference data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// No district with the given code.
    #[error("district {0} not found")]
    DistrictNotFound(String),
    /// District references a zone the catalog does not carry.
    #[error("economic zone {0} not found")]
    ZoneNotFound(String),
    /// No species with the given id.
    #[error("species {0} not found")]
    SpeciesNotFound(String),
}

/// Technology-package source for a species and year window.
pub trait TechnologyCatalog {
    /// Entries for `species` with project year in `[year_start, year_end]`,
    /// ordered by (year, category, activity). When `include_support` is
    /// false, Service/Legal/FixedAsset entries are excluded.
    fn entries_for(
        &self,
        species: &SpeciesId,
        year_start: u16,
        year_end: u16,
        include_support: bool,
    ) -> Result<Vec<TechPackageEntry>, CatalogError>;
}

/// Zone, district and species reference lookups.
pub trait ReferenceData {
    /// Resolve a district by its code.
    fn district(&self, id: &DistrictId) -> Result<District, CatalogError>;
    /// Resolve an economic zone.
    fn zone(&self, id: &ZoneId) -> Result<EconomicZone, CatalogError>;
    /// Resolve a species.
    fn species(&self, id: &SpeciesId) -> Result<Species, CatalogError>;
}

/// In-memory reference catalog.
///
/// Entries are kept pre-sorted in the canonical (species, year, category,
/// activity) order so queries return stable listings without re-sorting.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCatalog {
    zones: Vec<EconomicZone>,
    districts: Vec<District>,
    species: Vec<Species>,
    entries: Vec<TechPackageEntry>,
}

impl InMemoryCatalog {
    /// Build a catalog from reference records.
    pub fn new(
        zones: Vec<EconomicZone>,
        districts: Vec<District>,
        species: Vec<Species>,
        mut entries: Vec<TechPackageEntry>,
    ) -> Self {
        entries.sort_by(|a, b| {
            (&a.species, a.project_year, a.category, &a.activity).cmp(&(
                &b.species,
                b.project_year,
                b.category,
                &b.activity,
            ))
        });
        Self {
            zones,
            districts,
            species,
            entries,
        }
    }

    /// All technology-package entries, in canonical order.
    pub fn all_entries(&self) -> &[TechPackageEntry] {
        &self.entries
    }

    /// All districts.
    pub fn all_districts(&self) -> &[District] {
        &self.districts
    }

    /// All species records.
    pub fn all_species(&self) -> &[Species] {
        &self.species
    }
}

impl TechnologyCatalog for InMemoryCatalog {
    fn entries_for(
        &self,
        species: &SpeciesId,
        year_start: u16,
        year_end: u16,
        include_support: bool,
    ) -> Result<Vec<TechPackageEntry>, CatalogError> {
        if !self.species.iter().any(|s| &s.id == species) {
            return Err(CatalogError::SpeciesNotFound(species.0.clone()));
        }
        Ok(self
            .entries
            .iter()
            .filter(|e| &e.species == species)
            .filter(|e| (year_start..=year_end).contains(&e.project_year))
            .filter(|e| {
                include_support
                    || matches!(
                        e.category,
                        forest_core::CostCategory::Labor | forest_core::CostCategory::Input
                    )
            })
            .cloned()
            .collect())
    }
}

impl ReferenceData for InMemoryCatalog {
    fn district(&self, id: &DistrictId) -> Result<District, CatalogError> {
        self.districts
            .iter()
            .find(|d| &d.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::DistrictNotFound(id.0.clone()))
    }

    fn zone(&self, id: &ZoneId) -> Result<EconomicZone, CatalogError> {
        self.zones
            .iter()
            .find(|z| &z.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::ZoneNotFound(id.0.clone()))
    }

    fn species(&self, id: &SpeciesId) -> Result<Species, CatalogError> {
        self.species
            .iter()
            .find(|s| &s.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::SpeciesNotFound(id.0.clone()))
    }
}

/// Boundary error for one estimation request: every failure a caller can
/// see is one of these, nothing escapes unstructured.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Malformed request, with the offending field.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Zone, district or species did not resolve.
    #[error(transparent)]
    NotFound(#[from] CatalogError),
    /// The engine rejected the resolved inputs.
    #[error(transparent)]
    Costing(#[from] CostingError),
}

/// Suggested request defaults for a district, from its economic zone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistrictDefaults {
    /// District the defaults apply to.
    pub district: DistrictId,
    /// Zone name the defaults come from.
    pub zone_name: String,
    /// Suggested labor unit cost.
    pub labor_unit_cost: Decimal,
    /// Suggested seedling unit cost.
    pub seedling_unit_cost: Decimal,
    /// District terrain slope in percent.
    pub slope_percent: u16,
    /// Slope factor the engine would apply.
    pub slope_factor: Decimal,
}

/// Request-level service: validates, resolves lookups, runs the engine.
pub struct EstimateService<S> {
    source: S,
    discount_rate: Decimal,
}

impl<S: TechnologyCatalog + ReferenceData> EstimateService<S> {
    /// Service over a reference source, at the policy discount rate.
    pub fn new(source: S) -> Self {
        Self::with_discount_rate(source, forest_costing::default_discount_rate())
    }

    /// Service with an explicit annual discount rate.
    pub fn with_discount_rate(source: S, discount_rate: Decimal) -> Self {
        Self {
            source,
            discount_rate,
        }
    }

    /// Run one cost calculation end to end.
    pub fn estimate(&self, request: &CalculationRequest) -> Result<CalculationResult, ServiceError> {
        // Reject malformed requests before touching reference data.
        forest_core::validate_request(request)?;

        let district = self.source.district(&request.district)?;
        let species = self.source.species(&request.species)?;
        let entries = self.source.entries_for(
            &request.species,
            request.year_start,
            request.year_end,
            request.include_support_categories,
        )?;
        info!(
            district = %district.id.0,
            species = %species.id.0,
            entries = entries.len(),
            slope_percent = district.slope_percent,
            "resolved calculation inputs"
        );

        let ctx = EstimateContext {
            slope_percent: district.slope_percent,
            species: &species,
            entries: &entries,
            discount_rate: self.discount_rate,
        };
        Ok(forest_costing::estimate(request, &ctx)?)
    }

    /// Suggested user-editable costs and terrain profile for a district.
    pub fn suggested_defaults(&self, id: &DistrictId) -> Result<DistrictDefaults, ServiceError> {
        let district = self.source.district(id)?;
        let zone = self.source.zone(&district.zone)?;
        Ok(DistrictDefaults {
            district: district.id,
            zone_name: zone.name,
            labor_unit_cost: zone.reference_labor_cost,
            seedling_unit_cost: zone.reference_seedling_cost,
            slope_percent: district.slope_percent,
            slope_factor: forest_costing::slope_factor(district.slope_percent),
        })
    }
}
