//! Bauhaus Circular
//!
//! Scores a building's bill of materials for circularity, Bauhaus compliance,
//! embodied carbon and climate fit, and proposes a more circular alternative
//! within a budget.

pub mod carbon;
pub mod catalog;
pub mod climate;
pub mod config;
pub mod error;
pub mod input;
pub mod materials;
pub mod models;
pub mod optimizer;

pub use carbon::{calculate_embodied_carbon, calculate_embodied_carbon_raw, compare_materials};
pub use catalog::Catalog;
pub use climate::{generate_design_recommendations, get_climate_summary};
pub use config::EngineConfig;
pub use error::{EngineError, Result};
pub use materials::{analyze_materials, suggest_alternatives};
pub use models::{ClimateZone, MaterialKey, MaterialQuantity, OptimizationResult};
pub use optimizer::{optimize_design, optimize_mix, quick_analysis};
