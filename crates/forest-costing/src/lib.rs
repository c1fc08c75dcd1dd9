#![deny(warnings)]

//! Plantation cost-calculation engine.
//!
//! This crate turns a validated [`CalculationRequest`] plus already-resolved
//! reference data (terrain slope, species record, technology-package
//! entries) into a year-by-year cost breakdown and investment-appraisal
//! indicators:
//! - planting-geometry resolution into plants per hectare
//! - slope and density adjustment factors
//! - per-activity cost resolution
//! - annual/project aggregation and NPV / benefit-cost appraisal
//!
//! Everything is a pure, synchronous computation on `rust_decimal::Decimal`;
//! lookups against reference data happen before this crate is entered.

use forest_core::{CalculationRequest, Species, TechPackageEntry, ValidationError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod aggregate;
pub mod appraisal;
pub mod factors;
pub mod geometry;
pub mod resolver;

pub use aggregate::{aggregate, AnnualSummary, CostBreakdown};
pub use appraisal::{appraise, default_discount_rate, FinancialAppraisal};
pub use factors::{density_factor, slope_factor};
pub use geometry::resolve_density;
pub use resolver::{resolve_line_item, CostLineItem, PricingContext};

/// Errors produced by the calculation engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CostingError {
    /// Geometry that survived request validation but cannot be priced.
    /// A config/programming problem, fatal to the request only.
    #[error("invalid planting geometry: {0}")]
    InvalidGeometry(&'static str),
    /// Request failed invariant checks before any arithmetic ran.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Reference data already resolved by the caller for one calculation.
#[derive(Clone, Debug)]
pub struct EstimateContext<'a> {
    /// Terrain slope of the chosen district, in percent.
    pub slope_percent: u16,
    /// Species record.
    pub species: &'a Species,
    /// Technology-package entries, already filtered to the request's year
    /// window and category preference.
    pub entries: &'a [TechPackageEntry],
    /// Annual discount rate for the appraisal.
    pub discount_rate: Decimal,
}

/// Terminal output of one calculation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Applied terrain factor.
    pub slope_factor: Decimal,
    /// Applied density factor.
    pub density_factor: Decimal,
    /// Species reference density (plants/ha).
    pub base_density: u32,
    /// Density resolved from the requested geometry (plants/ha).
    pub resolved_density: u32,
    /// Labor unit cost the calculation priced with.
    pub labor_unit_cost_used: Decimal,
    /// Seedling unit cost the calculation priced with.
    pub seedling_unit_cost_used: Decimal,
    /// Every costed activity.
    pub line_items: Vec<CostLineItem>,
    /// Year-0 summary, segregated from the annual sequence.
    pub installation_summary: Option<AnnualSummary>,
    /// Post-installation years with activity, ascending.
    pub annual_summaries: Vec<AnnualSummary>,
    /// Sum of all year totals.
    pub project_total_cost: Decimal,
    /// Investment indicators.
    pub appraisal: FinancialAppraisal,
}

/// Run the full calculation pipeline over one request.
///
/// Validates the request, resolves density and factors, prices every
/// catalog entry, aggregates, and appraises. Pure; each invocation is
/// independent.
pub fn estimate(
    request: &CalculationRequest,
    ctx: &EstimateContext<'_>,
) -> Result<CalculationResult, CostingError> {
    forest_core::validate_request(request)?;

    let resolved_density = geometry::resolve_density(&request.geometry)?;
    let slope = factors::slope_factor(ctx.slope_percent);
    let density = factors::density_factor(ctx.species.base_density, resolved_density);

    let pricing = PricingContext {
        area_ha: request.area_ha,
        labor_unit_cost: request.labor_unit_cost,
        seedling_unit_cost: request.seedling_unit_cost,
        slope_factor: slope,
        density_factor: density,
    };
    let line_items: Vec<CostLineItem> = ctx
        .entries
        .iter()
        .map(|entry| resolver::resolve_line_item(entry, &pricing))
        .collect();

    let breakdown = aggregate::aggregate(&line_items);
    let appraisal = appraisal::appraise(&breakdown, ctx.species, request.area_ha, ctx.discount_rate);

    Ok(CalculationResult {
        slope_factor: slope,
        density_factor: density,
        base_density: ctx.species.base_density,
        resolved_density,
        labor_unit_cost_used: request.labor_unit_cost,
        seedling_unit_cost_used: request.seedling_unit_cost,
        line_items,
        installation_summary: breakdown.installation,
        annual_summaries: breakdown.annual,
        project_total_cost: breakdown.project_total,
        appraisal,
    })
}
