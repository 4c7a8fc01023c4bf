//! Circularity and Bauhaus-compliance scoring of material sets

use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::models::{ClimateZone, MaterialKey, MaterialRecord};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialAnalysis {
    /// Unweighted mean of the circularity factors, 0 - 100
    pub circular_score: f64,
    pub bauhaus_compliant: bool,
    /// Materials without the Bauhaus flag, in input order
    pub non_compliant: Vec<MaterialKey>,
}

/// A catalog material that is more circular than the one it would replace
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alternative {
    pub name: MaterialKey,
    pub display_name: &'static str,
    pub circular_score: f64,
    pub improvement: f64,
    pub carbon_factor: f64,
    pub unit_cost: f64,
    pub bauhaus_compliant: bool,
    pub zones: &'static [ClimateZone],
}

/// Score a set of material names.
///
/// Every name is resolved before scoring, so one unknown material fails the
/// whole call. Quantities are deliberately ignored here.
pub fn analyze_materials<S: AsRef<str>>(catalog: &Catalog, keys: &[S]) -> Result<MaterialAnalysis> {
    let resolved = keys
        .iter()
        .map(|k| k.as_ref().parse::<MaterialKey>())
        .collect::<Result<Vec<_>>>()?;
    Ok(analyze_keys(catalog, &resolved))
}

pub fn analyze_keys(catalog: &Catalog, keys: &[MaterialKey]) -> MaterialAnalysis {
    let records: Vec<&MaterialRecord> = keys.iter().map(|k| catalog.record(*k)).collect();

    // Empty sets score zero and are vacuously compliant
    let circular_score = if records.is_empty() {
        0.0
    } else {
        records.iter().map(|r| r.circularity).sum::<f64>() / records.len() as f64
    };

    let non_compliant: Vec<MaterialKey> = records
        .iter()
        .filter(|r| !r.bauhaus_compliant)
        .map(|r| r.key)
        .collect();

    MaterialAnalysis {
        circular_score,
        bauhaus_compliant: non_compliant.is_empty(),
        non_compliant,
    }
}

/// Catalog materials more circular than `key`, best first
pub fn suggest_alternatives(catalog: &Catalog, key: &str) -> Result<Vec<Alternative>> {
    let key: MaterialKey = key.parse()?;
    Ok(alternatives_for(catalog, key))
}

pub fn alternatives_for(catalog: &Catalog, key: MaterialKey) -> Vec<Alternative> {
    let base = catalog.record(key);

    let mut better: Vec<&MaterialRecord> = catalog
        .materials()
        .iter()
        .filter(|m| m.key != key && m.circularity > base.circularity)
        .collect();
    // Stable sort keeps catalog order among equal factors
    better.sort_by(|a, b| b.circularity.total_cmp(&a.circularity));

    better
        .into_iter()
        .map(|m| Alternative {
            name: m.key,
            display_name: m.name,
            circular_score: m.circularity,
            improvement: m.circularity - base.circularity,
            carbon_factor: m.carbon_factor,
            unit_cost: m.unit_cost,
            bauhaus_compliant: m.bauhaus_compliant,
            zones: m.zones,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn test_mean_is_unweighted() {
        let catalog = Catalog::standard();
        let keys = ["wood", "glass", "recycled_steel", "low_carbon_concrete"];
        let result = analyze_materials(catalog, &keys).unwrap();

        let expected = (catalog.record(MaterialKey::Wood).circularity
            + catalog.record(MaterialKey::Glass).circularity
            + catalog.record(MaterialKey::RecycledSteel).circularity
            + catalog.record(MaterialKey::LowCarbonConcrete).circularity)
            / 4.0;
        assert_eq!(result.circular_score, expected);
        assert!(result.bauhaus_compliant);
        assert!(result.non_compliant.is_empty());
    }

    #[test]
    fn test_single_material_scores_its_factor() {
        let catalog = Catalog::standard();
        for record in catalog.materials() {
            let result = analyze_keys(catalog, &[record.key]);
            assert_eq!(result.circular_score, record.circularity);
            assert_eq!(result.bauhaus_compliant, record.bauhaus_compliant);
        }
    }

    #[test]
    fn test_one_non_compliant_material_flips_the_set() {
        let catalog = Catalog::standard();
        let result = analyze_materials(catalog, &["steel", "glass", "hempcrete"]).unwrap();
        assert!(!result.bauhaus_compliant);
        assert_eq!(result.non_compliant, vec![MaterialKey::Hempcrete]);
    }

    #[test]
    fn test_empty_set() {
        let catalog = Catalog::standard();
        let result = analyze_materials::<&str>(catalog, &[]).unwrap();
        assert_eq!(result.circular_score, 0.0);
        assert!(result.bauhaus_compliant);
    }

    #[test]
    fn test_unknown_material_is_an_error() {
        let catalog = Catalog::standard();
        let err = analyze_materials(catalog, &["wood", "unobtainium"]).unwrap_err();
        assert_eq!(err, EngineError::UnknownMaterial("unobtainium".to_string()));
    }

    #[test]
    fn test_alternatives_sorted_and_exclude_input() {
        let catalog = Catalog::standard();
        for key in MaterialKey::ALL {
            let alternatives = alternatives_for(catalog, key);
            let base = catalog.record(key).circularity;
            assert!(alternatives.iter().all(|a| a.name != key));
            assert!(alternatives.iter().all(|a| a.circular_score > base));
            for pair in alternatives.windows(2) {
                assert!(pair[0].circular_score > pair[1].circular_score);
            }
        }
    }

    #[test]
    fn test_alternatives_for_low_carbon_concrete() {
        let catalog = Catalog::standard();
        let alternatives = suggest_alternatives(catalog, "low_carbon_concrete").unwrap();
        assert_eq!(alternatives[0].name, MaterialKey::ReclaimedWood);
        assert_eq!(alternatives[0].improvement, 92.0 - 40.0);
        assert!(alternatives.iter().all(|a| a.name != MaterialKey::Concrete));
    }

    #[test]
    fn test_most_circular_material_has_no_alternatives() {
        let catalog = Catalog::standard();
        assert!(suggest_alternatives(catalog, "reclaimed_wood").unwrap().is_empty());
        assert!(suggest_alternatives(catalog, "vibranium").is_err());
    }
}
