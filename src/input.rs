//! Boundary normalization for external callers
//!
//! CAD hosts hand over loosely shaped values (a scalar, a list, a nested tree
//! or nothing at all). These helpers turn them into the strict inputs the
//! engine accepts and reject anything they cannot interpret.

use regex::Regex;
use tracing::{debug, warn};

use crate::error::{EngineError, Result};
use crate::models::{ClimateZone, MaterialQuantity};
use crate::optimizer::build_mix;

const MATERIAL_SPEC_PATTERN: &str =
    r"^\s*([A-Za-z][A-Za-z_]*)\s*[=:]\s*([0-9]*\.?[0-9]+(?:[eE][-+]?[0-9]+)?)\s*$";

/// A value as received from a host environment
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Missing,
    Text(String),
    Number(f64),
    List(Vec<RawValue>),
}

enum Leaf {
    Missing,
    Text(String),
    Number(f64),
}

fn flatten(value: RawValue, out: &mut Vec<Leaf>) {
    match value {
        RawValue::List(items) => {
            for item in items {
                flatten(item, out);
            }
        }
        RawValue::Missing => out.push(Leaf::Missing),
        RawValue::Text(s) => out.push(Leaf::Text(s)),
        RawValue::Number(n) => out.push(Leaf::Number(n)),
    }
}

fn leaves_of(value: RawValue) -> Vec<Leaf> {
    let mut leaves = Vec::new();
    flatten(value, &mut leaves);
    leaves
}

/// `None` for an empty slot (missing or blank)
fn material_leaf(leaf: Leaf) -> Result<Option<String>> {
    match leaf {
        Leaf::Missing => Ok(None),
        Leaf::Text(s) if s.trim().is_empty() => Ok(None),
        Leaf::Text(s) => Ok(Some(s.trim().to_string())),
        Leaf::Number(n) => Err(EngineError::InvalidInput(format!(
            "expected a material name, got the number {}",
            n
        ))),
    }
}

/// `None` for an empty slot (missing or blank)
fn volume_leaf(leaf: Leaf) -> Result<Option<f64>> {
    match leaf {
        Leaf::Missing => Ok(None),
        Leaf::Number(n) => Ok(Some(n)),
        Leaf::Text(s) if s.trim().is_empty() => Ok(None),
        Leaf::Text(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| EngineError::InvalidInput(format!("expected a volume, got '{}'", s))),
    }
}

/// Flatten a host value into material names, skipping empty slots
pub fn normalize_materials(value: RawValue) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for leaf in leaves_of(value) {
        names.extend(material_leaf(leaf)?);
    }
    Ok(names)
}

/// Flatten a host value into volumes in m3, skipping empty slots
pub fn normalize_quantities(value: RawValue) -> Result<Vec<f64>> {
    let mut volumes = Vec::new();
    for leaf in leaves_of(value) {
        volumes.extend(volume_leaf(leaf)?);
    }
    Ok(volumes)
}

/// Strict mix from host values.
///
/// Both trees are flattened and paired by position before anything is
/// dropped. A slot empty on both sides is skipped; a slot empty on only one
/// side is an error, as are mismatched lengths. The old host script padded
/// or truncated instead.
pub fn normalize_design(materials: RawValue, quantities: RawValue) -> Result<Vec<MaterialQuantity>> {
    let material_leaves = leaves_of(materials);
    let volume_leaves = leaves_of(quantities);
    if material_leaves.len() != volume_leaves.len() {
        return Err(EngineError::InvalidInput(format!(
            "{} materials but {} quantities",
            material_leaves.len(),
            volume_leaves.len()
        )));
    }

    let mut names = Vec::with_capacity(material_leaves.len());
    let mut volumes = Vec::with_capacity(volume_leaves.len());
    for (slot, (m, v)) in material_leaves.into_iter().zip(volume_leaves).enumerate() {
        match (material_leaf(m)?, volume_leaf(v)?) {
            (Some(name), Some(volume)) => {
                names.push(name);
                volumes.push(volume);
            }
            (None, None) => {}
            (Some(_), None) => {
                return Err(EngineError::InvalidInput(format!(
                    "slot {} has a material but no quantity",
                    slot
                )));
            }
            (None, Some(_)) => {
                return Err(EngineError::InvalidInput(format!(
                    "slot {} has a quantity but no material",
                    slot
                )));
            }
        }
    }
    debug!(slots = names.len(), "normalized host input");
    build_mix(&names, &volumes)
}

/// Host-side zone policy: codes are trimmed and lowercased, and unknown or
/// missing codes fall back to `fallback`.
///
/// The engine itself rejects anything but an exact code, so this must run
/// before it.
pub fn normalize_zone(raw: Option<&str>, fallback: ClimateZone) -> ClimateZone {
    match raw {
        Some(code) => code.trim().to_ascii_lowercase().parse().unwrap_or_else(|_| {
            warn!(zone = code, fallback = %fallback, "unrecognized climate zone");
            fallback
        }),
        None => fallback,
    }
}

/// Parse a `material=volume` (or `material:volume`) pair
pub fn parse_material_spec(spec: &str) -> Result<MaterialQuantity> {
    Ok(parse_material_specs(&[spec])?.remove(0))
}

pub fn parse_material_specs<S: AsRef<str>>(specs: &[S]) -> Result<Vec<MaterialQuantity>> {
    let re = Regex::new(MATERIAL_SPEC_PATTERN)
        .map_err(|e| EngineError::InvalidInput(e.to_string()))?;

    let mut names = Vec::with_capacity(specs.len());
    let mut volumes = Vec::with_capacity(specs.len());
    for spec in specs {
        let spec = spec.as_ref();
        let cap = re.captures(spec).ok_or_else(|| {
            EngineError::InvalidInput(format!(
                "expected material=volume with a non-negative volume, got '{}'",
                spec
            ))
        })?;
        names.push(cap[1].to_string());
        volumes.push(cap[2].parse::<f64>().map_err(|_| {
            EngineError::InvalidInput(format!("bad volume in '{}'", spec))
        })?);
    }
    build_mix(&names, &volumes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MaterialKey;

    fn text(s: &str) -> RawValue {
        RawValue::Text(s.to_string())
    }

    #[test]
    fn test_scalar_and_missing() {
        assert_eq!(normalize_materials(text("wood")).unwrap(), vec!["wood"]);
        assert!(normalize_materials(RawValue::Missing).unwrap().is_empty());
        assert!(normalize_materials(text("  ")).unwrap().is_empty());
        assert_eq!(normalize_quantities(RawValue::Number(3.5)).unwrap(), vec![3.5]);
    }

    #[test]
    fn test_tree_is_flattened() {
        let tree = RawValue::List(vec![
            RawValue::List(vec![text("wood"), text("glass")]),
            RawValue::List(vec![text("cork")]),
        ]);
        assert_eq!(normalize_materials(tree).unwrap(), vec!["wood", "glass", "cork"]);

        let volumes = RawValue::List(vec![RawValue::Number(1.0), text("2.5")]);
        assert_eq!(normalize_quantities(volumes).unwrap(), vec![1.0, 2.5]);
    }

    #[test]
    fn test_malformed_shapes_are_rejected() {
        assert!(matches!(
            normalize_materials(RawValue::Number(4.0)),
            Err(EngineError::InvalidInput(_))
        ));
        assert!(matches!(
            normalize_quantities(text("lots")),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_normalize_design_is_strict() {
        let mix = normalize_design(
            RawValue::List(vec![text("wood"), text("glass")]),
            RawValue::List(vec![RawValue::Number(30.0), RawValue::Number(15.0)]),
        )
        .unwrap();
        assert_eq!(mix[1], MaterialQuantity::new(MaterialKey::Glass, 15.0));

        // No padding of missing quantities
        assert!(matches!(
            normalize_design(
                RawValue::List(vec![text("wood"), text("glass")]),
                RawValue::Number(30.0)
            ),
            Err(EngineError::InvalidInput(_))
        ));
        assert!(matches!(
            normalize_design(text("plutonium"), RawValue::Number(1.0)),
            Err(EngineError::UnknownMaterial(_))
        ));
    }

    #[test]
    fn test_normalize_design_keeps_slots_aligned() {
        // A gap on one side must not shift later values onto the wrong material
        let err = normalize_design(
            RawValue::List(vec![text("wood"), RawValue::Missing, text("glass")]),
            RawValue::List(vec![
                RawValue::Number(1.0),
                RawValue::Number(2.0),
                RawValue::Missing,
            ]),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));

        assert!(matches!(
            normalize_design(
                RawValue::List(vec![text("wood"), text("glass")]),
                RawValue::List(vec![RawValue::Number(1.0), text(" ")]),
            ),
            Err(EngineError::InvalidInput(_))
        ));

        // Slots empty on both sides are skipped together
        let mix = normalize_design(
            RawValue::List(vec![text("wood"), RawValue::Missing, text("glass")]),
            RawValue::List(vec![
                RawValue::Number(1.0),
                RawValue::Missing,
                RawValue::Number(3.0),
            ]),
        )
        .unwrap();
        assert_eq!(
            mix,
            vec![
                MaterialQuantity::new(MaterialKey::Wood, 1.0),
                MaterialQuantity::new(MaterialKey::Glass, 3.0),
            ]
        );
    }

    #[test]
    fn test_zone_fallback() {
        assert_eq!(normalize_zone(Some("cold"), ClimateZone::Temperate), ClimateZone::Cold);
        assert_eq!(normalize_zone(Some(" HOT "), ClimateZone::Temperate), ClimateZone::Hot);
        assert_eq!(normalize_zone(Some("lunar"), ClimateZone::Temperate), ClimateZone::Temperate);
        assert_eq!(normalize_zone(None, ClimateZone::Cold), ClimateZone::Cold);
    }

    #[test]
    fn test_parse_material_spec() {
        assert_eq!(
            parse_material_spec("wood=45").unwrap(),
            MaterialQuantity::new(MaterialKey::Wood, 45.0)
        );
        assert_eq!(
            parse_material_spec(" recycled_steel : 2.5 ").unwrap(),
            MaterialQuantity::new(MaterialKey::RecycledSteel, 2.5)
        );
        assert!(matches!(parse_material_spec("wood=-3"), Err(EngineError::InvalidInput(_))));
        assert!(matches!(parse_material_spec("wood"), Err(EngineError::InvalidInput(_))));
        assert!(matches!(parse_material_spec("gold=1"), Err(EngineError::UnknownMaterial(_))));
    }

    #[test]
    fn test_parse_material_specs_keeps_order() {
        let mix = parse_material_specs(&["glass=12", "wood=45"]).unwrap();
        assert_eq!(mix[0].material, MaterialKey::Glass);
        assert_eq!(mix[1].material, MaterialKey::Wood);
    }
}
