//! Bauhaus Circular
//!
//! Command-line front end for the material scoring and design optimization engine.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use bauhaus_circular::carbon;
use bauhaus_circular::climate;
use bauhaus_circular::input::parse_material_specs;
use bauhaus_circular::materials;
use bauhaus_circular::optimizer;
use bauhaus_circular::{Catalog, ClimateZone, EngineConfig, MaterialQuantity};

#[derive(Parser)]
#[command(name = "bauhaus-circular")]
#[command(about = "Circularity, embodied carbon and climate-fit optimizer for building materials")]
struct Cli {
    /// Climate zone used when a command does not name one (hot, temperate, cold)
    #[arg(long, env = "BAUHAUS_DEFAULT_ZONE", default_value = "temperate", global = true)]
    default_zone: String,

    /// Conventional construction carbon factor in kgCO2e per m3
    #[arg(long, env = "BAUHAUS_BASELINE_FACTOR", global = true)]
    baseline_factor: Option<f64>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog materials
    Materials {
        /// Only materials suited to this zone, most circular first
        #[arg(short, long)]
        zone: Option<String>,
    },

    /// Circularity and Bauhaus compliance of a material set
    Analyze {
        /// Material names (e.g. wood glass recycled_steel)
        #[arg(required = true)]
        materials: Vec<String>,
    },

    /// More circular substitutes for a material
    Alternatives {
        material: String,

        /// Show at most this many
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Embodied carbon of a mix
    Carbon {
        /// Material volumes as material=m3 (e.g. wood=45 glass=12)
        #[arg(required = true)]
        specs: Vec<String>,
    },

    /// Compare two materials at the same volume
    Compare {
        material_a: String,
        material_b: String,

        /// Volume in m3
        #[arg(long, default_value = "10.0")]
        volume: f64,
    },

    /// Climate reference data and design strategy
    Climate {
        #[arg(short, long)]
        zone: Option<String>,
    },

    /// Search for a more circular mix within a budget
    Optimize {
        #[arg(required = true)]
        specs: Vec<String>,

        #[arg(short, long)]
        zone: Option<String>,

        /// Budget limit in USD
        #[arg(short, long)]
        budget: f64,
    },

    /// Optimize with a budget derived from the current cost
    Quick {
        #[arg(required = true)]
        specs: Vec<String>,

        #[arg(short, long)]
        zone: Option<String>,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_catalog(cli: &Cli) -> Result<Catalog> {
    let zone: ClimateZone = cli
        .default_zone
        .parse()
        .context("invalid --default-zone")?;
    let mut config = EngineConfig::default().with_default_zone(zone);
    if let Some(factor) = cli.baseline_factor {
        config = config
            .with_baseline_carbon_factor(factor)
            .context("invalid --baseline-factor")?;
    }
    debug!(?config, "loading catalog");
    Ok(Catalog::load(config))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn split_mix(mix: &[MaterialQuantity]) -> (Vec<&'static str>, Vec<f64>) {
    mix.iter().map(|q| (q.material.as_str(), q.volume_m3)).unzip()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let catalog = load_catalog(&cli)?;
    let default_zone = catalog.config().default_zone.as_str();

    match &cli.command {
        Commands::Materials { zone } => {
            let keys = match zone {
                Some(code) => catalog.materials_suitable_for(catalog.parse_zone(code)?),
                None => catalog.materials().iter().map(|m| m.key).collect(),
            };
            let records: Vec<_> = keys.into_iter().map(|k| catalog.record(k)).collect();

            if cli.json {
                print_json(&records)?;
            } else {
                println!(
                    "{:<22} {:>12} {:>12} {:>10} {:>8}",
                    "Material", "kgCO2e/m3", "Circularity", "USD/m3", "Bauhaus"
                );
                println!("{}", "-".repeat(68));
                for m in records {
                    println!(
                        "{:<22} {:>12.0} {:>12.0} {:>10.0} {:>8}",
                        m.key,
                        m.carbon_factor,
                        m.circularity,
                        m.unit_cost,
                        if m.bauhaus_compliant { "yes" } else { "no" }
                    );
                }
            }
        }

        Commands::Analyze { materials } => {
            let analysis = materials::analyze_materials(&catalog, materials)?;
            if cli.json {
                print_json(&analysis)?;
            } else {
                println!("Materials: {}", materials.join(", "));
                println!("Circularity score: {:.1}%", analysis.circular_score);
                println!(
                    "Bauhaus compliant: {}",
                    if analysis.bauhaus_compliant { "yes" } else { "no" }
                );
                for key in &analysis.non_compliant {
                    println!("  not compliant: {}", key);
                }
            }
        }

        Commands::Alternatives { material, limit } => {
            let mut alternatives = materials::suggest_alternatives(&catalog, material)?;
            if let Some(limit) = limit {
                alternatives.truncate(*limit);
            }
            if cli.json {
                print_json(&alternatives)?;
            } else if alternatives.is_empty() {
                println!("No catalog material is more circular than '{}'.", material);
            } else {
                println!("Alternatives for '{}':", material);
                for alt in alternatives {
                    println!(
                        "  {:<22} circularity {:>5.1} (+{:.1}), {:.0} kgCO2e/m3, ${:.0}/m3",
                        alt.name, alt.circular_score, alt.improvement, alt.carbon_factor, alt.unit_cost
                    );
                }
            }
        }

        Commands::Carbon { specs } => {
            let mix = parse_material_specs(specs)?;
            let assessment = carbon::calculate_embodied_carbon(&catalog, &mix)?;
            if cli.json {
                print_json(&assessment)?;
            } else {
                println!("Total carbon:       {:.0} kgCO2e", assessment.total_carbon);
                println!("Conventional:       {:.0} kgCO2e", assessment.baseline_carbon);
                println!("Savings:            {:.1}%", assessment.carbon_savings_percent);
                println!("Performance:        {}", assessment.performance_rating);
            }
        }

        Commands::Compare {
            material_a,
            material_b,
            volume,
        } => {
            let comparison = carbon::compare_materials(&catalog, material_a, material_b, *volume)?;
            if cli.json {
                print_json(&comparison)?;
            } else {
                println!("Comparison at {:.1} m3:", volume);
                println!(
                    "  {:<22} {:.0} kgCO2e",
                    comparison.material_a.material, comparison.material_a.carbon_kg_co2
                );
                println!(
                    "  {:<22} {:.0} kgCO2e",
                    comparison.material_b.material, comparison.material_b.carbon_kg_co2
                );
                println!(
                    "Better choice: {} (saves {:.0} kgCO2e)",
                    comparison.better_choice, comparison.difference_kg_co2
                );
            }
        }

        Commands::Climate { zone } => {
            let summary = climate::get_climate_summary(&catalog, zone.as_deref())?;
            let strategy = climate::generate_design_recommendations(&catalog, zone.as_deref())?;
            if cli.json {
                print_json(&(summary, strategy))?;
            } else {
                println!("Climate zone: {}", summary.climate_zone);
                println!(
                    "  Solar radiation: {:.0} kWh/m2",
                    summary.solar_radiation.global_horizontal_kwh_m2
                );
                println!("  Heating degree days: {:.0}", summary.degree_days.heating_degree_days);
                println!("  Cooling degree days: {:.0}", summary.degree_days.cooling_degree_days);
                println!("Primary strategy: {}", strategy.primary_strategy);
                for s in &strategy.passive_strategies {
                    println!("  - {}", s);
                }
                let priority: Vec<&str> =
                    strategy.materials_priority.iter().map(|k| k.as_str()).collect();
                println!("Priority materials: {}", priority.join(", "));
            }
        }

        Commands::Optimize {
            specs,
            zone,
            budget,
        } => {
            let mix = parse_material_specs(specs)?;
            let (names, volumes) = split_mix(&mix);
            let zone = zone.as_deref().unwrap_or(default_zone);
            info!(materials = names.len(), zone, budget, "optimizing design");

            let result = optimizer::optimize_design(&catalog, &names, &volumes, zone, *budget)?;
            if cli.json {
                print_json(&result)?;
            } else {
                println!("{}", result);
            }
        }

        Commands::Quick { specs, zone } => {
            let mix = parse_material_specs(specs)?;
            let (names, volumes) = split_mix(&mix);
            let zone = zone.as_deref().unwrap_or(default_zone);

            let result = optimizer::quick_analysis(&catalog, &names, &volumes, zone)?;
            if cli.json {
                print_json(&result)?;
            } else {
                let design = &result.current_design;
                println!("Circularity: {:.1}%", design.circularity_score);
                println!("Carbon:      {:.0} kgCO2e", design.carbon_footprint_kg_co2);
                println!("Cost:        ${:.0}", design.total_cost_usd);
                println!(
                    "Bauhaus:     {}",
                    if design.bauhaus_compliant { "compliant" } else { "not compliant" }
                );
                if let Some(top) = result.recommendations.first() {
                    println!("Top recommendation: {}", top.title);
                }
            }
        }
    }

    Ok(())
}
