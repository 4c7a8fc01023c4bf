//! Static material and climate-zone tables
//!
//! The tables are hand-curated reference values, not measured data. They are
//! wrapped by [`Catalog`], which is built once through [`Catalog::load`] and
//! shared by reference with every analyzer.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::models::{ClimateProfile, ClimateZone, MaterialKey, MaterialRecord};

const ALL_ZONES: &[ClimateZone] = &[ClimateZone::Hot, ClimateZone::Temperate, ClimateZone::Cold];
const HOT_TEMPERATE: &[ClimateZone] = &[ClimateZone::Hot, ClimateZone::Temperate];
const TEMPERATE_COLD: &[ClimateZone] = &[ClimateZone::Temperate, ClimateZone::Cold];
const HOT_ONLY: &[ClimateZone] = &[ClimateZone::Hot];

// Order must follow MaterialKey::ALL; `Catalog::record` indexes by discriminant.
static MATERIALS: [MaterialRecord; 16] = [
    MaterialRecord {
        key: MaterialKey::Concrete,
        name: "Conventional concrete",
        carbon_factor: 410.0,
        circularity: 20.0,
        unit_cost: 120.0,
        bauhaus_compliant: true,
        zones: HOT_TEMPERATE,
    },
    MaterialRecord {
        key: MaterialKey::LowCarbonConcrete,
        name: "Low-carbon concrete",
        carbon_factor: 250.0,
        circularity: 40.0,
        unit_cost: 160.0,
        bauhaus_compliant: true,
        zones: ALL_ZONES,
    },
    MaterialRecord {
        key: MaterialKey::Steel,
        name: "Structural steel",
        carbon_factor: 14000.0,
        circularity: 65.0,
        unit_cost: 1400.0,
        bauhaus_compliant: true,
        zones: ALL_ZONES,
    },
    MaterialRecord {
        key: MaterialKey::RecycledSteel,
        name: "Recycled steel",
        carbon_factor: 3500.0,
        circularity: 90.0,
        unit_cost: 1200.0,
        bauhaus_compliant: true,
        zones: ALL_ZONES,
    },
    MaterialRecord {
        key: MaterialKey::Aluminum,
        name: "Primary aluminium",
        carbon_factor: 22000.0,
        circularity: 60.0,
        unit_cost: 3000.0,
        bauhaus_compliant: true,
        zones: ALL_ZONES,
    },
    MaterialRecord {
        key: MaterialKey::RecycledAluminum,
        name: "Recycled aluminium",
        carbon_factor: 5000.0,
        circularity: 88.0,
        unit_cost: 2600.0,
        bauhaus_compliant: true,
        zones: ALL_ZONES,
    },
    MaterialRecord {
        key: MaterialKey::Glass,
        name: "Float glass",
        carbon_factor: 3600.0,
        circularity: 55.0,
        unit_cost: 900.0,
        bauhaus_compliant: true,
        zones: ALL_ZONES,
    },
    MaterialRecord {
        key: MaterialKey::RecycledGlass,
        name: "Recycled glass",
        carbon_factor: 2400.0,
        circularity: 72.0,
        unit_cost: 750.0,
        bauhaus_compliant: true,
        zones: ALL_ZONES,
    },
    MaterialRecord {
        key: MaterialKey::Brick,
        name: "Fired clay brick",
        carbon_factor: 350.0,
        circularity: 50.0,
        unit_cost: 220.0,
        bauhaus_compliant: true,
        zones: HOT_TEMPERATE,
    },
    MaterialRecord {
        key: MaterialKey::Wood,
        name: "Timber",
        carbon_factor: 110.0,
        circularity: 70.0,
        unit_cost: 300.0,
        bauhaus_compliant: true,
        zones: TEMPERATE_COLD,
    },
    MaterialRecord {
        key: MaterialKey::ReclaimedWood,
        name: "Reclaimed timber",
        carbon_factor: 30.0,
        circularity: 92.0,
        unit_cost: 380.0,
        bauhaus_compliant: true,
        zones: TEMPERATE_COLD,
    },
    MaterialRecord {
        key: MaterialKey::Bamboo,
        name: "Engineered bamboo",
        carbon_factor: 60.0,
        circularity: 85.0,
        unit_cost: 350.0,
        bauhaus_compliant: false,
        zones: HOT_TEMPERATE,
    },
    MaterialRecord {
        key: MaterialKey::Hempcrete,
        name: "Hempcrete",
        carbon_factor: 20.0,
        circularity: 75.0,
        unit_cost: 280.0,
        bauhaus_compliant: false,
        zones: TEMPERATE_COLD,
    },
    MaterialRecord {
        key: MaterialKey::StrawBale,
        name: "Straw bale",
        carbon_factor: 10.0,
        circularity: 78.0,
        unit_cost: 140.0,
        bauhaus_compliant: false,
        zones: TEMPERATE_COLD,
    },
    MaterialRecord {
        key: MaterialKey::RammedEarth,
        name: "Rammed earth",
        carbon_factor: 40.0,
        circularity: 80.0,
        unit_cost: 180.0,
        bauhaus_compliant: false,
        zones: HOT_ONLY,
    },
    MaterialRecord {
        key: MaterialKey::Cork,
        name: "Expanded cork",
        carbon_factor: 90.0,
        circularity: 82.0,
        unit_cost: 600.0,
        bauhaus_compliant: false,
        zones: TEMPERATE_COLD,
    },
];

// Order must follow ClimateZone::ALL.
static ZONES: [ClimateProfile; 3] = [
    ClimateProfile {
        zone: ClimateZone::Hot,
        solar_radiation_kwh_m2: 2100.0,
        heating_degree_days: 300.0,
        cooling_degree_days: 2500.0,
        materials_priority: &[
            MaterialKey::RammedEarth,
            MaterialKey::LowCarbonConcrete,
            MaterialKey::Brick,
            MaterialKey::Bamboo,
        ],
        primary_strategy: "thermal mass with solar shading",
        passive_strategies: &[
            "night-flush ventilation",
            "deep overhangs and external shading",
            "light-coloured reflective envelope",
        ],
    },
    ClimateProfile {
        zone: ClimateZone::Temperate,
        solar_radiation_kwh_m2: 1400.0,
        heating_degree_days: 2200.0,
        cooling_degree_days: 600.0,
        materials_priority: &[
            MaterialKey::ReclaimedWood,
            MaterialKey::Wood,
            MaterialKey::Hempcrete,
            MaterialKey::RecycledSteel,
            MaterialKey::LowCarbonConcrete,
        ],
        primary_strategy: "balanced passive solar design",
        passive_strategies: &[
            "south-facing glazing with seasonal shading",
            "cross ventilation",
            "moderate thermal mass",
        ],
    },
    ClimateProfile {
        zone: ClimateZone::Cold,
        solar_radiation_kwh_m2: 1000.0,
        heating_degree_days: 5000.0,
        cooling_degree_days: 100.0,
        materials_priority: &[
            MaterialKey::Hempcrete,
            MaterialKey::StrawBale,
            MaterialKey::Cork,
            MaterialKey::Wood,
            MaterialKey::ReclaimedWood,
        ],
        primary_strategy: "super-insulated airtight envelope",
        passive_strategies: &[
            "compact building form",
            "triple glazing on the sunny facade",
            "heat-recovery ventilation",
        ],
    },
];

static STANDARD: OnceLock<Catalog> = OnceLock::new();

/// Read-only material and climate reference data plus engine settings
#[derive(Debug, Clone)]
pub struct Catalog {
    config: EngineConfig,
    materials: &'static [MaterialRecord],
    zones: &'static [ClimateProfile],
}

impl Catalog {
    pub fn load(config: EngineConfig) -> Self {
        Self {
            config,
            materials: &MATERIALS,
            zones: &ZONES,
        }
    }

    /// Process-wide catalog built from the default configuration on first use
    pub fn standard() -> &'static Catalog {
        STANDARD.get_or_init(|| Catalog::load(EngineConfig::default()))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve a material name, failing with `UnknownMaterial`
    pub fn lookup(&self, key: &str) -> Result<&MaterialRecord> {
        let key: MaterialKey = key.parse()?;
        Ok(self.record(key))
    }

    pub fn record(&self, key: MaterialKey) -> &MaterialRecord {
        &self.materials[key as usize]
    }

    /// All records in catalog insertion order
    pub fn materials(&self) -> &[MaterialRecord] {
        self.materials
    }

    pub fn all_keys(&self) -> BTreeSet<MaterialKey> {
        self.materials.iter().map(|m| m.key).collect()
    }

    /// Materials tagged for `zone`, most circular first.
    ///
    /// The sort is stable, so equal circularity keeps catalog order.
    pub fn materials_suitable_for(&self, zone: ClimateZone) -> Vec<MaterialKey> {
        let mut suitable: Vec<&MaterialRecord> =
            self.materials.iter().filter(|m| m.suits(zone)).collect();
        suitable.sort_by(|a, b| b.circularity.total_cmp(&a.circularity));
        suitable.into_iter().map(|m| m.key).collect()
    }

    pub fn zone_profile(&self, zone: ClimateZone) -> &ClimateProfile {
        &self.zones[zone as usize]
    }

    /// Resolve a zone code, failing with `UnknownClimateZone`
    pub fn parse_zone(&self, code: &str) -> Result<ClimateZone> {
        code.parse()
    }
}
