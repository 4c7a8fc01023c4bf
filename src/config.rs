//! Engine configuration supplied to the catalog loader

use serde::Serialize;

use crate::error::{EngineError, Result};
use crate::models::ClimateZone;

/// Average embodied carbon of a conventional steel and concrete frame,
/// kgCO2e per m3 of built volume.
pub const CONVENTIONAL_CARBON_FACTOR: f64 = 2000.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineConfig {
    /// Zone used when a caller asks for climate data without naming one
    pub default_zone: ClimateZone,
    pub baseline_carbon_factor: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_zone: ClimateZone::Temperate,
            baseline_carbon_factor: CONVENTIONAL_CARBON_FACTOR,
        }
    }
}

impl EngineConfig {
    pub fn with_default_zone(mut self, zone: ClimateZone) -> Self {
        self.default_zone = zone;
        self
    }

    pub fn with_baseline_carbon_factor(mut self, factor: f64) -> Result<Self> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(EngineError::InvalidInput(format!(
                "baseline carbon factor must be positive, got {}",
                factor
            )));
        }
        self.baseline_carbon_factor = factor;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.default_zone, ClimateZone::Temperate);
        assert_eq!(config.baseline_carbon_factor, CONVENTIONAL_CARBON_FACTOR);
    }

    #[test]
    fn test_rejects_non_positive_baseline() {
        assert!(EngineConfig::default().with_baseline_carbon_factor(0.0).is_err());
        assert!(EngineConfig::default().with_baseline_carbon_factor(-5.0).is_err());
        assert!(EngineConfig::default().with_baseline_carbon_factor(f64::NAN).is_err());

        let config = EngineConfig::default()
            .with_default_zone(ClimateZone::Cold)
            .with_baseline_carbon_factor(1500.0)
            .unwrap();
        assert_eq!(config.default_zone, ClimateZone::Cold);
        assert_eq!(config.baseline_carbon_factor, 1500.0);
    }
}
