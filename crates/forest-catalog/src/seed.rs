//! Built-in reference dataset: zones, districts, species and their
//! technology packages.
//!
//! Quantities and reference prices follow the published regional cost
//! coefficients the estimator was calibrated against; they are starting
//! points, not market quotes.

use forest_core::{
    CostCategory, District, DistrictId, EconomicZone, Species, SpeciesId, TechPackageEntry, ZoneId,
};
use rust_decimal::Decimal;

use crate::InMemoryCatalog;

fn entry(
    species: &str,
    year: u16,
    category: CostCategory,
    activity: &str,
    unit: &str,
    quantity: Decimal,
) -> TechPackageEntry {
    TechPackageEntry {
        species: SpeciesId(species.to_string()),
        project_year: year,
        category,
        activity: activity.to_string(),
        unit_of_measure: unit.to_string(),
        base_quantity: quantity,
        slope_sensitive: false,
        density_sensitive: false,
        is_seedling: false,
        reference_unit_cost: Decimal::ZERO,
    }
}

fn labor(species: &str, year: u16, activity: &str, days: i64, slope: bool, density: bool) -> TechPackageEntry {
    let mut e = entry(
        species,
        year,
        CostCategory::Labor,
        activity,
        "labor day",
        Decimal::new(days, 0),
    );
    e.slope_sensitive = slope;
    e.density_sensitive = density;
    e
}

fn seedlings(species: &str, year: u16, activity: &str, units: i64) -> TechPackageEntry {
    let mut e = entry(
        species,
        year,
        CostCategory::Input,
        activity,
        "seedling",
        Decimal::new(units, 0),
    );
    e.density_sensitive = true;
    e.is_seedling = true;
    e
}

fn input(species: &str, year: u16, activity: &str, unit: &str, quantity: i64, cost_cents: i64) -> TechPackageEntry {
    let mut e = entry(
        species,
        year,
        CostCategory::Input,
        activity,
        unit,
        Decimal::new(quantity, 0),
    );
    e.reference_unit_cost = Decimal::new(cost_cents, 2);
    e
}

fn support(
    species: &str,
    year: u16,
    category: CostCategory,
    activity: &str,
    cost_cents: i64,
) -> TechPackageEntry {
    let mut e = entry(species, year, category, activity, "lump sum", Decimal::ONE);
    e.reference_unit_cost = Decimal::new(cost_cents, 2);
    e
}

/// Installation-year plus maintenance entries for one species.
///
/// `planting_days` and `seedling_count` carry the density-sensitive load;
/// the rest of the package is fixed per hectare.
fn package(species: &str, planting_days: i64, seedling_count: i64) -> Vec<TechPackageEntry> {
    vec![
        // Year 0: installation
        labor(species, 0, "Land clearing", 20, true, false),
        labor(species, 0, "Hole digging and planting", planting_days, true, true),
        seedlings(species, 0, "Seedlings", seedling_count),
        input(species, 0, "Base fertilizer", "kg", 120, 320),
        support(species, 0, CostCategory::Service, "Seedling transport", 45_000),
        support(species, 0, CostCategory::Legal, "Land titling and permits", 60_000),
        support(species, 0, CostCategory::FixedAsset, "Hand tools", 38_000),
        // Year 1: first maintenance; replanting covers nursery losses
        labor(species, 1, "Weeding", 12, true, false),
        seedlings(species, 1, "Replanting seedlings", seedling_count / 10),
        support(species, 1, CostCategory::Service, "Technical assistance", 30_000),
        // Year 2: second maintenance
        labor(species, 2, "Weeding", 10, true, false),
        labor(species, 2, "Pruning", 8, true, false),
        input(species, 2, "Maintenance fertilizer", "kg", 80, 320),
    ]
}

/// Build the built-in reference catalog.
pub fn seed_catalog() -> InMemoryCatalog {
    let zones = vec![
        EconomicZone {
            id: ZoneId("sierra-norte".to_string()),
            name: "Sierra Norte".to_string(),
            reference_labor_cost: Decimal::new(4500, 2),
            reference_seedling_cost: Decimal::new(80, 2),
        },
        EconomicZone {
            id: ZoneId("selva-alta".to_string()),
            name: "Selva Alta".to_string(),
            reference_labor_cost: Decimal::new(6000, 2),
            reference_seedling_cost: Decimal::new(120, 2),
        },
    ];

    let districts = vec![
        District {
            id: DistrictId("060101".to_string()),
            name: "Cajamarca".to_string(),
            zone: ZoneId("sierra-norte".to_string()),
            slope_percent: 25,
        },
        District {
            id: DistrictId("220901".to_string()),
            name: "San Martín".to_string(),
            zone: ZoneId("selva-alta".to_string()),
            slope_percent: 10,
        },
        District {
            id: DistrictId("100307".to_string()),
            name: "Huánuco".to_string(),
            zone: ZoneId("selva-alta".to_string()),
            slope_percent: 35,
        },
    ];

    let species = vec![
        Species {
            id: SpeciesId("eucalyptus".to_string()),
            name: "Eucalipto Globulus".to_string(),
            base_density: 1111, // 3 m × 3 m square
            harvest_horizon_years: 12,
            yield_per_ha: Decimal::new(180, 0),
            reference_harvest_price: Decimal::new(8000, 2),
        },
        Species {
            id: SpeciesId("bolaina".to_string()),
            name: "Bolaina Blanca".to_string(),
            base_density: 1111,
            harvest_horizon_years: 8,
            yield_per_ha: Decimal::new(120, 0),
            reference_harvest_price: Decimal::new(6000, 2),
        },
        Species {
            id: SpeciesId("teak".to_string()),
            name: "Teca Clonal".to_string(),
            base_density: 833, // 3 m × 4 m rectangular
            harvest_horizon_years: 20,
            yield_per_ha: Decimal::new(150, 0),
            reference_harvest_price: Decimal::new(25000, 2),
        },
    ];

    let mut packages = Vec::new();
    packages.extend(package("eucalyptus", 65, 1111));
    packages.extend(package("bolaina", 80, 1111));
    packages.extend(package("teak", 80, 833));

    InMemoryCatalog::new(zones, districts, species, packages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn seed_entries_are_unique_per_species_year_activity() {
        let catalog = seed_catalog();
        let mut seen = BTreeSet::new();
        for e in catalog.all_entries() {
            let key = (e.species.0.clone(), e.project_year, e.activity.clone());
            assert!(seen.insert(key), "duplicate entry {:?}", e.activity);
        }
    }

    #[test]
    fn seed_entries_validate() {
        let catalog = seed_catalog();
        for e in catalog.all_entries() {
            forest_core::validate_entry(e).unwrap();
        }
        for s in catalog.all_species() {
            forest_core::validate_species(s).unwrap();
        }
    }

    #[test]
    fn every_district_references_a_seeded_zone() {
        let catalog = seed_catalog();
        for district in catalog.all_districts() {
            catalog_zone_exists(&catalog, district);
        }
    }

    fn catalog_zone_exists(catalog: &InMemoryCatalog, district: &District) {
        use crate::ReferenceData;
        catalog.zone(&district.zone).unwrap();
    }

    #[test]
    fn seedling_entries_are_density_sensitive_inputs() {
        let catalog = seed_catalog();
        for e in catalog.all_entries().iter().filter(|e| e.is_seedling) {
            assert_eq!(e.category, CostCategory::Input);
            assert!(e.density_sensitive);
        }
    }

    #[test]
    fn slope_sensitivity_is_labor_only() {
        let catalog = seed_catalog();
        for e in catalog.all_entries().iter().filter(|e| e.slope_sensitive) {
            assert_eq!(e.category, CostCategory::Labor);
        }
    }
}
