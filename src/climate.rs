//! Climate-zone reference data and passive design guidance

use std::collections::BTreeSet;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::models::{ClimateProfile, ClimateZone, MaterialKey};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolarRadiation {
    pub global_horizontal_kwh_m2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DegreeDays {
    pub heating_degree_days: f64,
    pub cooling_degree_days: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClimateSummary {
    pub climate_zone: ClimateZone,
    pub solar_radiation: SolarRadiation,
    pub degree_days: DegreeDays,
    pub materials_priority: Vec<MaterialKey>,
    pub primary_strategy: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignStrategy {
    pub climate_zone: ClimateZone,
    pub primary_strategy: &'static str,
    pub passive_strategies: Vec<&'static str>,
    pub materials_priority: Vec<MaterialKey>,
}

fn resolve_zone(catalog: &Catalog, zone: Option<&str>) -> Result<ClimateZone> {
    match zone {
        Some(code) => catalog.parse_zone(code),
        None => Ok(catalog.config().default_zone),
    }
}

/// Reference data for `zone`, or for the configured default zone when `None`
pub fn get_climate_summary(catalog: &Catalog, zone: Option<&str>) -> Result<ClimateSummary> {
    let profile = catalog.zone_profile(resolve_zone(catalog, zone)?);
    Ok(ClimateSummary {
        climate_zone: profile.zone,
        solar_radiation: SolarRadiation {
            global_horizontal_kwh_m2: profile.solar_radiation_kwh_m2,
        },
        degree_days: DegreeDays {
            heating_degree_days: profile.heating_degree_days,
            cooling_degree_days: profile.cooling_degree_days,
        },
        materials_priority: profile.materials_priority.to_vec(),
        primary_strategy: profile.primary_strategy,
    })
}

pub fn generate_design_recommendations(
    catalog: &Catalog,
    zone: Option<&str>,
) -> Result<DesignStrategy> {
    let profile = catalog.zone_profile(resolve_zone(catalog, zone)?);
    Ok(DesignStrategy {
        climate_zone: profile.zone,
        primary_strategy: profile.primary_strategy,
        passive_strategies: profile.passive_strategies.to_vec(),
        materials_priority: profile.materials_priority.to_vec(),
    })
}

/// Share of the distinct materials in use that the zone prioritizes, 0 - 100
pub fn climate_fit_score(profile: &ClimateProfile, keys: &[MaterialKey]) -> f64 {
    let distinct: BTreeSet<MaterialKey> = keys.iter().copied().collect();
    if distinct.is_empty() {
        return 0.0;
    }
    let matched = distinct.iter().filter(|k| profile.prioritizes(**k)).count();
    matched as f64 / distinct.len() as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::error::EngineError;

    #[test]
    fn test_summary_for_each_zone() {
        let catalog = Catalog::standard();
        let hot = get_climate_summary(catalog, Some("hot")).unwrap();
        let cold = get_climate_summary(catalog, Some("cold")).unwrap();

        assert_eq!(hot.climate_zone, ClimateZone::Hot);
        assert!(hot.degree_days.cooling_degree_days > cold.degree_days.cooling_degree_days);
        assert!(cold.degree_days.heating_degree_days > hot.degree_days.heating_degree_days);
        assert!(
            hot.solar_radiation.global_horizontal_kwh_m2
                > cold.solar_radiation.global_horizontal_kwh_m2
        );
    }

    #[test]
    fn test_default_zone_comes_from_config() {
        let summary = get_climate_summary(Catalog::standard(), None).unwrap();
        assert_eq!(summary.climate_zone, ClimateZone::Temperate);

        let catalog = Catalog::load(EngineConfig::default().with_default_zone(ClimateZone::Cold));
        let strategy = generate_design_recommendations(&catalog, None).unwrap();
        assert_eq!(strategy.climate_zone, ClimateZone::Cold);
        assert_eq!(strategy.primary_strategy, "super-insulated airtight envelope");
    }

    #[test]
    fn test_unknown_zone_is_rejected() {
        let catalog = Catalog::standard();
        assert_eq!(
            get_climate_summary(catalog, Some("tropical")).unwrap_err(),
            EngineError::UnknownClimateZone("tropical".to_string())
        );
        assert!(generate_design_recommendations(catalog, Some("")).is_err());
    }

    #[test]
    fn test_recommendations_follow_profile() {
        let catalog = Catalog::standard();
        let strategy = generate_design_recommendations(catalog, Some("hot")).unwrap();
        assert_eq!(strategy.primary_strategy, "thermal mass with solar shading");
        assert_eq!(strategy.materials_priority[0], MaterialKey::RammedEarth);
        assert_eq!(strategy.passive_strategies.len(), 3);
    }

    #[test]
    fn test_climate_fit_score() {
        let profile = Catalog::standard().zone_profile(ClimateZone::Temperate);
        assert_eq!(climate_fit_score(profile, &[]), 0.0);
        assert_eq!(
            climate_fit_score(profile, &[MaterialKey::Wood, MaterialKey::ReclaimedWood]),
            100.0
        );
        assert_eq!(
            climate_fit_score(
                profile,
                &[
                    MaterialKey::Wood,
                    MaterialKey::Glass,
                    MaterialKey::RecycledSteel,
                    MaterialKey::LowCarbonConcrete
                ]
            ),
            75.0
        );
        // Repeated materials count once
        assert_eq!(
            climate_fit_score(profile, &[MaterialKey::Glass, MaterialKey::Glass, MaterialKey::Wood]),
            50.0
        );
    }
}
