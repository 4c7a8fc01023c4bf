//! Data models for materials, climate zones and design results

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::EngineError;

/// Closed set of materials known to the catalog.
///
/// Declaration order is catalog insertion order, which the optimizer relies on
/// for deterministic tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKey {
    Concrete,
    LowCarbonConcrete,
    Steel,
    RecycledSteel,
    Aluminum,
    RecycledAluminum,
    Glass,
    RecycledGlass,
    Brick,
    Wood,
    ReclaimedWood,
    Bamboo,
    Hempcrete,
    StrawBale,
    RammedEarth,
    Cork,
}

impl MaterialKey {
    pub const ALL: [MaterialKey; 16] = [
        MaterialKey::Concrete,
        MaterialKey::LowCarbonConcrete,
        MaterialKey::Steel,
        MaterialKey::RecycledSteel,
        MaterialKey::Aluminum,
        MaterialKey::RecycledAluminum,
        MaterialKey::Glass,
        MaterialKey::RecycledGlass,
        MaterialKey::Brick,
        MaterialKey::Wood,
        MaterialKey::ReclaimedWood,
        MaterialKey::Bamboo,
        MaterialKey::Hempcrete,
        MaterialKey::StrawBale,
        MaterialKey::RammedEarth,
        MaterialKey::Cork,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MaterialKey::Concrete => "concrete",
            MaterialKey::LowCarbonConcrete => "low_carbon_concrete",
            MaterialKey::Steel => "steel",
            MaterialKey::RecycledSteel => "recycled_steel",
            MaterialKey::Aluminum => "aluminum",
            MaterialKey::RecycledAluminum => "recycled_aluminum",
            MaterialKey::Glass => "glass",
            MaterialKey::RecycledGlass => "recycled_glass",
            MaterialKey::Brick => "brick",
            MaterialKey::Wood => "wood",
            MaterialKey::ReclaimedWood => "reclaimed_wood",
            MaterialKey::Bamboo => "bamboo",
            MaterialKey::Hempcrete => "hempcrete",
            MaterialKey::StrawBale => "straw_bale",
            MaterialKey::RammedEarth => "rammed_earth",
            MaterialKey::Cork => "cork",
        }
    }
}

impl FromStr for MaterialKey {
    type Err = EngineError;

    /// Exact match on the snake_case key; case and whitespace are not folded.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MaterialKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| EngineError::UnknownMaterial(s.to_string()))
    }
}

impl fmt::Display for MaterialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClimateZone {
    Hot,
    Temperate,
    Cold,
}

impl ClimateZone {
    pub const ALL: [ClimateZone; 3] = [ClimateZone::Hot, ClimateZone::Temperate, ClimateZone::Cold];

    pub fn as_str(self) -> &'static str {
        match self {
            ClimateZone::Hot => "hot",
            ClimateZone::Temperate => "temperate",
            ClimateZone::Cold => "cold",
        }
    }
}

impl FromStr for ClimateZone {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hot" => Ok(ClimateZone::Hot),
            "temperate" => Ok(ClimateZone::Temperate),
            "cold" => Ok(ClimateZone::Cold),
            _ => Err(EngineError::UnknownClimateZone(s.to_string())),
        }
    }
}

impl fmt::Display for ClimateZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Static per-material coefficients
#[derive(Debug, Clone, Serialize)]
pub struct MaterialRecord {
    pub key: MaterialKey,
    pub name: &'static str,
    pub carbon_factor: f64, // kgCO2e per m3
    pub circularity: f64,   // 0 - 100
    pub unit_cost: f64,     // USD per m3
    pub bauhaus_compliant: bool,
    pub zones: &'static [ClimateZone],
}

impl MaterialRecord {
    pub fn suits(&self, zone: ClimateZone) -> bool {
        self.zones.contains(&zone)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaterialQuantity {
    pub material: MaterialKey,
    pub volume_m3: f64,
}

impl MaterialQuantity {
    pub fn new(material: MaterialKey, volume_m3: f64) -> Self {
        Self { material, volume_m3 }
    }
}

/// Reference data and passive-design guidance for a climate zone
#[derive(Debug, Clone, Serialize)]
pub struct ClimateProfile {
    pub zone: ClimateZone,
    pub solar_radiation_kwh_m2: f64, // global horizontal, per year
    pub heating_degree_days: f64,
    pub cooling_degree_days: f64,
    pub materials_priority: &'static [MaterialKey],
    pub primary_strategy: &'static str,
    pub passive_strategies: &'static [&'static str],
}

impl ClimateProfile {
    pub fn prioritizes(&self, key: MaterialKey) -> bool {
        self.materials_priority.contains(&key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Compliance,
    Substitution,
    ClimateStrategy,
    BudgetConstraint,
    NoImprovement,
}

impl RecommendationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RecommendationKind::Compliance => "compliance",
            RecommendationKind::Substitution => "substitution",
            RecommendationKind::ClimateStrategy => "climate_strategy",
            RecommendationKind::BudgetConstraint => "budget_constraint",
            RecommendationKind::NoImprovement => "no_improvement",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_improvement: Option<String>,
}

/// Derived figures for one design mix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scorecard {
    pub circularity_score: f64,
    pub bauhaus_compliant: bool,
    pub carbon_footprint_kg_co2: f64,
    pub total_cost_usd: f64,
    pub climate_fit_score: f64,
}

/// One slot the optimizer replaced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Substitution {
    pub slot: usize,
    pub original: MaterialKey,
    pub replacement: MaterialKey,
    pub volume_m3: f64,
    pub circularity_gain: f64,
    pub carbon_saved_kg_co2: f64,
    pub cost_change_usd: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Improvements {
    pub circularity_improvement: f64,
    pub carbon_reduction_percent: f64,
    pub cost_change_usd: f64,
    pub climate_fit_improvement: f64,
}

impl Improvements {
    pub fn none() -> Self {
        Self {
            circularity_improvement: 0.0,
            carbon_reduction_percent: 0.0,
            cost_change_usd: 0.0,
            climate_fit_improvement: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizedAlternative {
    pub materials: Vec<MaterialQuantity>,
    pub scorecard: Scorecard,
    pub substitutions: Vec<Substitution>,
    pub improvements: Improvements,
}

/// Result of a single optimizer run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationResult {
    pub climate_zone: ClimateZone,
    pub budget_limit_usd: f64,
    pub current_materials: Vec<MaterialQuantity>,
    pub current_design: Scorecard,
    pub optimized_alternative: OptimizedAlternative,
    pub recommendations: Vec<Recommendation>,
    pub summary: String,
}
