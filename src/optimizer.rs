//! Design optimizer: scores a mix, searches for a more circular alternative
//! under a budget and synthesizes ranked recommendations.

use std::fmt;

use crate::carbon::{self, check_volume};
use crate::catalog::Catalog;
use crate::climate::climate_fit_score;
use crate::error::{EngineError, Result};
use crate::materials::{alternatives_for, analyze_keys};
use crate::models::{
    ClimateProfile, ClimateZone, Improvements, MaterialKey, MaterialQuantity, OptimizationResult,
    OptimizedAlternative, Recommendation, RecommendationKind, Scorecard, Substitution,
};

/// Budget headroom used by [`quick_analysis`], relative to the current cost
pub const DEFAULT_QUICK_BUDGET_FACTOR: f64 = 1.2;

/// A bill of materials together with the scorecard derived from it.
///
/// The material list can only change through [`DesignMix::evaluate`], so the
/// scorecard always describes the mix it is stored with.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignMix {
    materials: Vec<MaterialQuantity>,
    scorecard: Scorecard,
}

impl DesignMix {
    pub fn evaluate(catalog: &Catalog, zone: ClimateZone, materials: Vec<MaterialQuantity>) -> Self {
        let keys = keys_of(&materials);
        let analysis = analyze_keys(catalog, &keys);
        let scorecard = Scorecard {
            circularity_score: analysis.circular_score,
            bauhaus_compliant: analysis.bauhaus_compliant,
            carbon_footprint_kg_co2: carbon::total_carbon(catalog, &materials),
            total_cost_usd: total_cost(catalog, &materials),
            climate_fit_score: climate_fit_score(catalog.zone_profile(zone), &keys),
        };
        Self {
            materials,
            scorecard,
        }
    }

    pub fn materials(&self) -> &[MaterialQuantity] {
        &self.materials
    }

    pub fn scorecard(&self) -> &Scorecard {
        &self.scorecard
    }

    pub fn into_parts(self) -> (Vec<MaterialQuantity>, Scorecard) {
        (self.materials, self.scorecard)
    }
}

fn keys_of(materials: &[MaterialQuantity]) -> Vec<MaterialKey> {
    materials.iter().map(|q| q.material).collect()
}

pub fn total_cost(catalog: &Catalog, materials: &[MaterialQuantity]) -> f64 {
    materials
        .iter()
        .map(|q| q.volume_m3 * catalog.record(q.material).unit_cost)
        .sum()
}

fn check_budget(budget_limit: f64) -> Result<()> {
    if !budget_limit.is_finite() || budget_limit <= 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "budget limit must be a positive amount, got {}",
            budget_limit
        )));
    }
    Ok(())
}

/// Resolve parallel name/volume lists into a strict mix.
///
/// Checks run in order: lengths, volumes, then material names.
pub fn build_mix<S: AsRef<str>>(materials: &[S], quantities: &[f64]) -> Result<Vec<MaterialQuantity>> {
    if materials.len() != quantities.len() {
        return Err(EngineError::InvalidInput(format!(
            "{} materials but {} quantities",
            materials.len(),
            quantities.len()
        )));
    }
    for volume in quantities {
        check_volume(*volume)?;
    }
    materials
        .iter()
        .zip(quantities)
        .map(|(name, volume)| name.as_ref().parse().map(|k| MaterialQuantity::new(k, *volume)))
        .collect()
}

/// Score a design, search for a more circular alternative within
/// `budget_limit` and the climate zone, and rank recommendations.
pub fn optimize_design<S: AsRef<str>>(
    catalog: &Catalog,
    materials: &[S],
    quantities: &[f64],
    climate_zone: &str,
    budget_limit: f64,
) -> Result<OptimizationResult> {
    let mix = build_mix(materials, quantities)?;
    let zone = catalog.parse_zone(climate_zone)?;
    optimize_mix(catalog, mix, zone, budget_limit)
}

/// Typed entry point behind [`optimize_design`]
pub fn optimize_mix(
    catalog: &Catalog,
    mix: Vec<MaterialQuantity>,
    zone: ClimateZone,
    budget_limit: f64,
) -> Result<OptimizationResult> {
    for q in &mix {
        check_volume(q.volume_m3)?;
    }
    check_budget(budget_limit)?;

    let profile = catalog.zone_profile(zone);
    let current = DesignMix::evaluate(catalog, zone, mix);

    let search = substitution_search(
        catalog,
        profile,
        current.materials(),
        current.scorecard().total_cost_usd,
        budget_limit,
    );

    let alternative = DesignMix::evaluate(catalog, zone, search.materials);
    let improvements = improvements(current.scorecard(), alternative.scorecard());

    let recommendations = synthesize_recommendations(
        catalog,
        profile,
        &current,
        &alternative,
        &search.substitutions,
        search.budget_blocked_slots,
        budget_limit,
    );

    let summary = summarize(
        zone,
        current.scorecard(),
        alternative.scorecard(),
        &improvements,
        search.substitutions.len(),
        budget_limit,
    );

    let (current_materials, current_design) = current.into_parts();
    let (alt_materials, alt_scorecard) = alternative.into_parts();

    Ok(OptimizationResult {
        climate_zone: zone,
        budget_limit_usd: budget_limit,
        current_materials,
        current_design,
        optimized_alternative: OptimizedAlternative {
            materials: alt_materials,
            scorecard: alt_scorecard,
            substitutions: search.substitutions,
            improvements,
        },
        recommendations,
        summary,
    })
}

/// One-call analysis with a budget of [`DEFAULT_QUICK_BUDGET_FACTOR`] times
/// the current cost.
///
/// The current-design scorecard carries the same circularity and carbon
/// figures [`analyze_materials`](crate::materials::analyze_materials) and
/// [`calculate_embodied_carbon`](carbon::calculate_embodied_carbon) report.
pub fn quick_analysis<S: AsRef<str>>(
    catalog: &Catalog,
    materials: &[S],
    quantities: &[f64],
    climate_zone: &str,
) -> Result<OptimizationResult> {
    let mix = build_mix(materials, quantities)?;
    let zone = catalog.parse_zone(climate_zone)?;

    let budget = (total_cost(catalog, &mix) * DEFAULT_QUICK_BUDGET_FACTOR).max(1.0);
    optimize_mix(catalog, mix, zone, budget)
}

struct SearchOutcome {
    materials: Vec<MaterialQuantity>,
    substitutions: Vec<Substitution>,
    /// Unchanged slots where some candidate was rejected only on cost
    budget_blocked_slots: usize,
}

/// Greedy per-slot search in mix order.
///
/// A candidate must be more circular, fit the zone (tag or priority list) and
/// keep the running cost within budget. Candidates arrive most circular first, ties in catalog order, so
/// the first one that qualifies wins.
fn substitution_search(
    catalog: &Catalog,
    profile: &ClimateProfile,
    current: &[MaterialQuantity],
    current_cost: f64,
    budget_limit: f64,
) -> SearchOutcome {
    let mut running_cost = current_cost;
    let mut materials = Vec::with_capacity(current.len());
    let mut substitutions = Vec::new();
    let mut budget_blocked_slots = 0;

    for (slot, quantity) in current.iter().enumerate() {
        let original = catalog.record(quantity.material);
        let mut chosen = None;
        let mut blocked = false;

        for alternative in alternatives_for(catalog, quantity.material) {
            let candidate = catalog.record(alternative.name);
            if !(candidate.suits(profile.zone) || profile.prioritizes(candidate.key)) {
                continue;
            }
            let cost_change = (candidate.unit_cost - original.unit_cost) * quantity.volume_m3;
            if running_cost + cost_change > budget_limit {
                blocked = true;
                continue;
            }
            chosen = Some((candidate, cost_change));
            break;
        }

        match chosen {
            Some((candidate, cost_change)) => {
                running_cost += cost_change;
                substitutions.push(Substitution {
                    slot,
                    original: original.key,
                    replacement: candidate.key,
                    volume_m3: quantity.volume_m3,
                    circularity_gain: candidate.circularity - original.circularity,
                    carbon_saved_kg_co2: (original.carbon_factor - candidate.carbon_factor)
                        * quantity.volume_m3,
                    cost_change_usd: cost_change,
                });
                materials.push(MaterialQuantity::new(candidate.key, quantity.volume_m3));
            }
            None => {
                if blocked {
                    budget_blocked_slots += 1;
                }
                materials.push(*quantity);
            }
        }
    }

    SearchOutcome {
        materials,
        substitutions,
        budget_blocked_slots,
    }
}

fn percent_of(part: f64, whole: f64) -> f64 {
    if whole == 0.0 { 0.0 } else { part / whole * 100.0 }
}

fn improvements(current: &Scorecard, alternative: &Scorecard) -> Improvements {
    Improvements {
        circularity_improvement: alternative.circularity_score - current.circularity_score,
        carbon_reduction_percent: percent_of(
            current.carbon_footprint_kg_co2 - alternative.carbon_footprint_kg_co2,
            current.carbon_footprint_kg_co2,
        ),
        cost_change_usd: alternative.total_cost_usd - current.total_cost_usd,
        climate_fit_improvement: alternative.climate_fit_score - current.climate_fit_score,
    }
}

const TIER_COMPLIANCE: u8 = 3;
const TIER_SUBSTITUTION: u8 = 2;
const TIER_CLIMATE: u8 = 1;

struct Ranked {
    tier: u8,
    impact: f64,
    recommendation: Recommendation,
}

fn synthesize_recommendations(
    catalog: &Catalog,
    profile: &ClimateProfile,
    current: &DesignMix,
    alternative: &DesignMix,
    substitutions: &[Substitution],
    budget_blocked_slots: usize,
    budget_limit: f64,
) -> Vec<Recommendation> {
    let mut ranked = Vec::new();
    let current_card = current.scorecard();

    if !current_card.bauhaus_compliant {
        let mut offenders: Vec<MaterialKey> = Vec::new();
        for q in current.materials() {
            if !catalog.record(q.material).bauhaus_compliant && !offenders.contains(&q.material) {
                offenders.push(q.material);
            }
        }
        let names: Vec<&str> = offenders.iter().map(|k| catalog.record(*k).name).collect();
        let suggestion = catalog
            .materials_suitable_for(profile.zone)
            .into_iter()
            .map(|k| catalog.record(k))
            .find(|m| m.bauhaus_compliant);

        ranked.push(Ranked {
            tier: TIER_COMPLIANCE,
            impact: 0.0,
            recommendation: Recommendation {
                kind: RecommendationKind::Compliance,
                title: "Close the Bauhaus compliance gap".to_string(),
                description: format!(
                    "{} not meet the Bauhaus design criteria, so the design as a whole is not compliant.",
                    match names.len() {
                        1 => format!("{} does", names[0]),
                        _ => format!("{} do", names.join(", ")),
                    }
                ),
                action: match suggestion {
                    Some(m) => format!(
                        "Replace the non-compliant materials with compliant ones such as {}.",
                        m.name
                    ),
                    None => "Replace the non-compliant materials with compliant ones.".to_string(),
                },
                estimated_improvement: None,
            },
        });
    }

    if substitutions.is_empty() {
        let recommendation = if budget_blocked_slots > 0 {
            let pressure = if current_card.total_cost_usd > budget_limit {
                format!(
                    "the current cost of ${:.0} already exceeds the ${:.0} budget",
                    current_card.total_cost_usd, budget_limit
                )
            } else {
                format!(
                    "each would push the cost of ${:.0} past the ${:.0} budget",
                    current_card.total_cost_usd, budget_limit
                )
            };
            Recommendation {
                kind: RecommendationKind::BudgetConstraint,
                title: "Budget limit prevented optimization".to_string(),
                description: format!(
                    "More circular substitutes suited to the {} zone exist for {} material(s), but {}. The current mix is kept unchanged.",
                    profile.zone, budget_blocked_slots, pressure
                ),
                action: "Raise the budget limit or reduce volumes to make room for circular substitutes."
                    .to_string(),
                estimated_improvement: None,
            }
        } else {
            Recommendation {
                kind: RecommendationKind::NoImprovement,
                title: "No qualifying substitutes".to_string(),
                description: format!(
                    "No catalog material suited to the {} zone is more circular than the current selection.",
                    profile.zone
                ),
                action: "Keep the current specification and detail it for disassembly and reuse."
                    .to_string(),
                estimated_improvement: None,
            }
        };
        ranked.push(Ranked {
            tier: TIER_SUBSTITUTION,
            impact: 0.0,
            recommendation,
        });
    }

    for sub in substitutions {
        let original = catalog.record(sub.original);
        let replacement = catalog.record(sub.replacement);
        let reduction = percent_of(sub.carbon_saved_kg_co2, current_card.carbon_footprint_kg_co2);
        ranked.push(Ranked {
            tier: TIER_SUBSTITUTION,
            impact: reduction,
            recommendation: Recommendation {
                kind: RecommendationKind::Substitution,
                title: format!("Replace {} with {}", original.name, replacement.name),
                description: format!(
                    "{:.1} m3 of {} raises circularity from {:.0} to {:.0} and {} {:.0} kgCO2e.",
                    sub.volume_m3,
                    original.name,
                    original.circularity,
                    replacement.circularity,
                    if sub.carbon_saved_kg_co2 < 0.0 { "adds" } else { "cuts" },
                    sub.carbon_saved_kg_co2.abs()
                ),
                action: format!(
                    "Specify {} instead of {} (cost change ${:.0}).",
                    replacement.name, original.name, sub.cost_change_usd
                ),
                estimated_improvement: Some(format!(
                    "{:.1}% {} embodied carbon for the whole design",
                    reduction.abs(),
                    if reduction < 0.0 { "more" } else { "less" }
                )),
            },
        });
    }

    ranked.push(Ranked {
        tier: TIER_CLIMATE,
        impact: 0.0,
        recommendation: Recommendation {
            kind: RecommendationKind::ClimateStrategy,
            title: format!("Apply {}", profile.primary_strategy),
            description: format!(
                "The {} zone receives {:.0} kWh/m2 of solar radiation a year with {:.0} heating and {:.0} cooling degree days.",
                profile.zone,
                profile.solar_radiation_kwh_m2,
                profile.heating_degree_days,
                profile.cooling_degree_days
            ),
            action: format!(
                "Combine {} with {}.",
                profile.primary_strategy,
                profile.passive_strategies.join(", ")
            ),
            estimated_improvement: Some(format!(
                "climate fit {:.0}/100 to {:.0}/100",
                current_card.climate_fit_score,
                alternative.scorecard().climate_fit_score
            )),
        },
    });

    // Stable sort: equal rank keeps generation order
    ranked.sort_by(|a, b| {
        b.tier
            .cmp(&a.tier)
            .then_with(|| b.impact.total_cmp(&a.impact))
    });
    ranked.into_iter().map(|r| r.recommendation).collect()
}

fn summarize(
    zone: ClimateZone,
    current: &Scorecard,
    alternative: &Scorecard,
    improvements: &Improvements,
    substitution_count: usize,
    budget_limit: f64,
) -> String {
    let budget_clause = if alternative.total_cost_usd <= budget_limit {
        "within"
    } else {
        "exceeding"
    };
    format!(
        "Design for the {} zone: circularity {:.1}% -> {:.1}%, embodied carbon {:.0} -> {:.0} kgCO2e ({:.1}% reduction), cost ${:.0} -> ${:.0} {} the ${:.0} budget. {} substitution(s) proposed; Bauhaus compliant: {}.",
        zone,
        current.circularity_score,
        alternative.circularity_score,
        current.carbon_footprint_kg_co2,
        alternative.carbon_footprint_kg_co2,
        improvements.carbon_reduction_percent,
        current.total_cost_usd,
        alternative.total_cost_usd,
        budget_clause,
        budget_limit,
        substitution_count,
        if alternative.bauhaus_compliant { "yes" } else { "no" }
    )
}

fn write_scorecard(f: &mut fmt::Formatter<'_>, card: &Scorecard) -> fmt::Result {
    writeln!(f, "  Circularity:  {:.1}%", card.circularity_score)?;
    writeln!(f, "  Carbon:       {:.0} kgCO2e", card.carbon_footprint_kg_co2)?;
    writeln!(f, "  Cost:         ${:.0}", card.total_cost_usd)?;
    writeln!(f, "  Climate fit:  {:.0}/100", card.climate_fit_score)?;
    writeln!(
        f,
        "  Bauhaus:      {}",
        if card.bauhaus_compliant { "compliant" } else { "not compliant" }
    )
}

impl fmt::Display for OptimizationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Design Optimization ===")?;
        writeln!(
            f,
            "Zone: {}  Budget: ${:.0}",
            self.climate_zone, self.budget_limit_usd
        )?;
        writeln!(f)?;

        writeln!(f, "Current design:")?;
        for q in &self.current_materials {
            writeln!(f, "  {:.2} m3 {}", q.volume_m3, q.material)?;
        }
        write_scorecard(f, &self.current_design)?;
        writeln!(f)?;

        let alt = &self.optimized_alternative;
        writeln!(f, "Optimized alternative:")?;
        for q in &alt.materials {
            writeln!(f, "  {:.2} m3 {}", q.volume_m3, q.material)?;
        }
        write_scorecard(f, &alt.scorecard)?;
        writeln!(
            f,
            "  Improvement:  {:+.1} circularity, {:.1}% carbon reduction, ${:+.0} cost",
            alt.improvements.circularity_improvement,
            alt.improvements.carbon_reduction_percent,
            alt.improvements.cost_change_usd
        )?;
        writeln!(f)?;

        writeln!(f, "Recommendations:")?;
        for (i, rec) in self.recommendations.iter().enumerate() {
            writeln!(f, "{}. [{}] {}", i + 1, rec.kind.as_str().to_uppercase(), rec.title)?;
            writeln!(f, "   {}", rec.description)?;
            writeln!(f, "   -> {}", rec.action)?;
            if let Some(estimate) = &rec.estimated_improvement {
                writeln!(f, "   ~ {}", estimate)?;
            }
        }
        writeln!(f)?;

        writeln!(f, "Summary:")?;
        writeln!(f, "  {}", self.summary)
    }
}
