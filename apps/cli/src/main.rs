#![deny(warnings)]

//! Headless CLI: one plantation cost estimate over the built-in catalog.

use anyhow::{bail, Context, Result};
use forest_catalog::{seed_catalog, EstimateService, InMemoryCatalog};
use forest_core::{
    CalculationRequest, DistrictId, PlantingGeometry, PlantingSystem, SpeciesId,
};
use forest_costing::CalculationResult;
use rust_decimal::Decimal;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Args {
    scenario: Option<String>,
    district: Option<String>,
    species: Option<String>,
    area: Option<Decimal>,
    system: Option<String>,
    spacing: Option<Decimal>,
    secondary_spacing: Option<Decimal>,
    labor_cost: Option<Decimal>,
    seedling_cost: Option<Decimal>,
    year_start: Option<u16>,
    year_end: Option<u16>,
    core_only: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        let mut value = |name: &str| {
            it.next()
                .with_context(|| format!("{name} requires a value"))
        };
        match arg.as_str() {
            "--scenario" => args.scenario = Some(value("--scenario")?),
            "--district" => args.district = Some(value("--district")?),
            "--species" => args.species = Some(value("--species")?),
            "--area" => args.area = Some(value("--area")?.parse()?),
            "--system" => args.system = Some(value("--system")?),
            "--spacing" => args.spacing = Some(value("--spacing")?.parse()?),
            "--secondary-spacing" => {
                args.secondary_spacing = Some(value("--secondary-spacing")?.parse()?)
            }
            "--labor-cost" => args.labor_cost = Some(value("--labor-cost")?.parse()?),
            "--seedling-cost" => args.seedling_cost = Some(value("--seedling-cost")?.parse()?),
            "--year-start" => args.year_start = Some(value("--year-start")?.parse()?),
            "--year-end" => args.year_end = Some(value("--year-end")?.parse()?),
            "--core-only" => args.core_only = true,
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(args)
}

fn planting_system(name: &str) -> Result<PlantingSystem> {
    match name {
        "square" => Ok(PlantingSystem::Square),
        "rectangular" => Ok(PlantingSystem::Rectangular),
        "triangular" | "tres-bolillo" => Ok(PlantingSystem::Triangular),
        other => bail!("unknown planting system: {other}"),
    }
}

/// Assemble a request from flags, pulling missing unit costs from the
/// district's zone suggestions.
fn build_request(args: &Args, service: &EstimateService<InMemoryCatalog>) -> Result<CalculationRequest> {
    let district = DistrictId(args.district.clone().unwrap_or_else(|| "220901".to_string()));
    let defaults = service.suggested_defaults(&district)?;
    let system = planting_system(args.system.as_deref().unwrap_or("square"))?;
    Ok(CalculationRequest {
        district,
        species: SpeciesId(args.species.clone().unwrap_or_else(|| "teak".to_string())),
        area_ha: args.area.unwrap_or(Decimal::ONE),
        labor_unit_cost: args.labor_cost.unwrap_or(defaults.labor_unit_cost),
        seedling_unit_cost: args.seedling_cost.unwrap_or(defaults.seedling_unit_cost),
        year_start: args.year_start.unwrap_or(0),
        year_end: args.year_end.unwrap_or(2),
        geometry: PlantingGeometry {
            system,
            primary_spacing_m: args.spacing.unwrap_or(Decimal::new(3, 0)),
            secondary_spacing_m: args.secondary_spacing,
        },
        include_support_categories: !args.core_only,
    })
}

fn print_report(request: &CalculationRequest, result: &CalculationResult) {
    println!(
        "Estimate | district: {} | species: {} | area: {} ha",
        request.district.0, request.species.0, request.area_ha
    );
    println!(
        "Factors | slope: {} | density: {} | plants/ha: {} (base {})",
        result.slope_factor, result.density_factor, result.resolved_density, result.base_density
    );
    println!(
        "Prices | labor day: {} | seedling: {}",
        result.labor_unit_cost_used, result.seedling_unit_cost_used
    );
    if let Some(installation) = &result.installation_summary {
        println!(
            "Install | labor: {} | inputs: {} | services: {} | total: {}",
            installation.labor, installation.inputs, installation.services, installation.total
        );
    }
    for summary in &result.annual_summaries {
        println!(
            "Year {:>2} | labor: {} | inputs: {} | services: {} | total: {}",
            summary.year, summary.labor, summary.inputs, summary.services, summary.total
        );
    }
    println!(
        "Project | total cost: {} | harvest revenue: {} | NPV: {} | B/C: {}",
        result.project_total_cost,
        result.appraisal.estimated_harvest_revenue,
        result.appraisal.npv,
        result.appraisal.benefit_cost_ratio
    );
}

fn main() -> Result<()> {
    // Logging setup
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .init();

    let args = parse_args()?;
    info!(git = env!("GIT_SHA"), "starting plantation cost estimator");

    let service = EstimateService::new(seed_catalog());
    let request: CalculationRequest = match &args.scenario {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading scenario {path}"))?;
            serde_yaml::from_str(&text).context("parsing scenario file")?
        }
        None => build_request(&args, &service)?,
    };

    let result = service.estimate(&request)?;
    print_report(&request, &result);
    Ok(())
}
