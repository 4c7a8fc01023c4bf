//! Embodied carbon totals, baseline comparison and head-to-head comparison

use std::fmt;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::{EngineError, Result};
use crate::models::{MaterialKey, MaterialQuantity};

/// Minimum savings (percent vs baseline) for each rating tier
pub const EXCELLENT_THRESHOLD: f64 = 50.0;
pub const GOOD_THRESHOLD: f64 = 25.0;
pub const FAIR_THRESHOLD: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceRating {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl PerformanceRating {
    pub fn from_savings(percent: f64) -> Self {
        if percent >= EXCELLENT_THRESHOLD {
            PerformanceRating::Excellent
        } else if percent >= GOOD_THRESHOLD {
            PerformanceRating::Good
        } else if percent >= FAIR_THRESHOLD {
            PerformanceRating::Fair
        } else {
            PerformanceRating::Poor
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PerformanceRating::Excellent => "excellent",
            PerformanceRating::Good => "good",
            PerformanceRating::Fair => "fair",
            PerformanceRating::Poor => "poor",
        }
    }
}

impl fmt::Display for PerformanceRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarbonAssessment {
    pub total_carbon: f64,    // kgCO2e
    pub baseline_carbon: f64, // same volume built conventionally
    /// Negative when the mix is worse than the baseline
    pub carbon_savings_percent: f64,
    pub performance_rating: PerformanceRating,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialCarbon {
    pub material: MaterialKey,
    pub volume_m3: f64,
    pub carbon_kg_co2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialComparison {
    pub material_a: MaterialCarbon,
    pub material_b: MaterialCarbon,
    pub better_choice: MaterialKey,
    /// Absolute gap between the two totals
    pub difference_kg_co2: f64,
}

pub(crate) fn check_volume(volume: f64) -> Result<()> {
    if !volume.is_finite() || volume < 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "volume must be a non-negative number of m3, got {}",
            volume
        )));
    }
    Ok(())
}

/// Sum of volume x carbon factor. Callers validate volumes first.
pub fn total_carbon(catalog: &Catalog, quantities: &[MaterialQuantity]) -> f64 {
    quantities
        .iter()
        .map(|q| q.volume_m3 * catalog.record(q.material).carbon_factor)
        .sum()
}

/// Total embodied carbon of a mix, rated against a conventional baseline
pub fn calculate_embodied_carbon(
    catalog: &Catalog,
    quantities: &[MaterialQuantity],
) -> Result<CarbonAssessment> {
    for q in quantities {
        check_volume(q.volume_m3)?;
    }

    let total = total_carbon(catalog, quantities);
    let volume: f64 = quantities.iter().map(|q| q.volume_m3).sum();
    let baseline = volume * catalog.config().baseline_carbon_factor;

    let savings = if baseline > 0.0 {
        (baseline - total) / baseline * 100.0
    } else {
        0.0
    };

    Ok(CarbonAssessment {
        total_carbon: total,
        baseline_carbon: baseline,
        carbon_savings_percent: savings,
        performance_rating: PerformanceRating::from_savings(savings),
    })
}

/// String-keyed variant: every key and volume is validated before any arithmetic
pub fn calculate_embodied_carbon_raw<S: AsRef<str>>(
    catalog: &Catalog,
    entries: &[(S, f64)],
) -> Result<CarbonAssessment> {
    let quantities = entries
        .iter()
        .map(|(key, volume)| key.as_ref().parse().map(|k| MaterialQuantity::new(k, *volume)))
        .collect::<Result<Vec<_>>>()?;
    calculate_embodied_carbon(catalog, &quantities)
}

/// Carbon of two materials at the same volume. Ties go to `key_a`.
pub fn compare_materials(
    catalog: &Catalog,
    key_a: &str,
    key_b: &str,
    volume: f64,
) -> Result<MaterialComparison> {
    let a: MaterialKey = key_a.parse()?;
    let b: MaterialKey = key_b.parse()?;
    check_volume(volume)?;

    let carbon_a = volume * catalog.record(a).carbon_factor;
    let carbon_b = volume * catalog.record(b).carbon_factor;

    Ok(MaterialComparison {
        material_a: MaterialCarbon {
            material: a,
            volume_m3: volume,
            carbon_kg_co2: carbon_a,
        },
        material_b: MaterialCarbon {
            material: b,
            volume_m3: volume,
            carbon_kg_co2: carbon_b,
        },
        better_choice: if carbon_b < carbon_a { b } else { a },
        difference_kg_co2: (carbon_a - carbon_b).abs(),
    })
}
