//! # Archery Tuner CLI
//!
//! Command-line front end for `archery_core`. Every command prints a
//! human-readable summary, or JSON with `--json`.
//!
//! Saved configurations go to `--store`, `$ARCHERY_STORE`, or
//! `<data dir>/archery-tuner/configurations.json`.

mod args;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use archery_core::calculations::{
    calculate_optimal_point_weight, calculate_spine_recommendation, calculate_weight_metrics,
    get_manufacturer_spine_recommendations, perform_safety_check,
};
use archery_core::configuration::{create_default_configuration, generate_id, ArrowConfiguration, ConfigurationDraft};
use archery_core::reference::{self, ComponentCategory};
use archery_core::storage::ConfigStore;
use archery_core::CalcError;

use args::{Cli, Commands, SetupArgs};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let json = cli.json;
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if json {
                if let Some(calc_error) = e.downcast_ref::<CalcError>() {
                    if let Ok(error_json) = serde_json::to_string_pretty(calc_error) {
                        eprintln!("{}", error_json);
                    }
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "archery_core=debug,archery=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("archery-tuner"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("configurations.json")
}

#[derive(Debug, Serialize)]
struct OptimalPoint {
    target_gpp: f64,
    point_weight: f64,
}

/// Print `value` as JSON, or hand it to the human-readable printer.
fn emit<T: Serialize>(json: bool, value: &T, human: impl FnOnce(&T)) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human(value);
    }
    Ok(())
}

/// Complete a draft and check it is usable for calculation.
fn build_validated(draft: ConfigurationDraft, id: String) -> Result<ArrowConfiguration> {
    let config = draft.build(id)?;
    config.validate()?;
    Ok(config)
}

fn setup_from_defaults(setup: SetupArgs) -> Result<ArrowConfiguration> {
    let draft = setup.apply(create_default_configuration())?;
    build_validated(draft, generate_id())
}

fn run(cli: Cli) -> Result<()> {
    let json = cli.json;
    let metric = cli.metric;
    let store = ConfigStore::new(cli.store.unwrap_or_else(default_store_path));
    debug!(store = %store.path().display(), "using configuration store");

    match cli.command {
        Commands::Spine {
            draw_weight,
            draw_length,
            point_weight,
            material,
        } => {
            let rec = calculate_spine_recommendation(draw_weight, draw_length, point_weight, material);
            emit(json, &rec, output::print_spine)
        }

        Commands::Manufacturers {
            draw_weight,
            point_weight,
            arrow_length,
        } => {
            let recs = get_manufacturer_spine_recommendations(draw_weight, point_weight, arrow_length);
            emit(json, &recs, |recs| {
                output::print_manufacturers(recs);
                println!("Tuning notes:");
                for note in &reference::embedded().adjustments.notes {
                    println!("  - {}", note);
                }
            })
        }

        Commands::Weight { setup } => {
            let config = setup_from_defaults(setup)?;
            let metrics = calculate_weight_metrics(&config.weight_input());
            emit(json, &metrics, |_| output::print_weight(&config, metric))
        }

        Commands::OptimalPoint { target_gpp, setup } => {
            if target_gpp <= 0.0 || !target_gpp.is_finite() {
                bail!("--target-gpp must be greater than zero");
            }
            let config = setup_from_defaults(setup)?;
            let point_weight = calculate_optimal_point_weight(
                config.draw_weight,
                config.draw_length,
                target_gpp,
                config.shaft_weight,
                config.arrow_length,
                config.nock_weight,
                config.fletching_weight,
            );
            let result = OptimalPoint {
                target_gpp,
                point_weight,
            };
            emit(json, &result, |r| output::print_optimal_point(r.point_weight, r.target_gpp, metric))
        }

        Commands::Check { id, setup } => {
            let config = match id {
                Some(id) => {
                    let stored = store
                        .get(&id)
                        .with_context(|| format!("no saved configuration with id '{}'", id))?;
                    build_validated(setup.apply(ConfigurationDraft::from(stored))?, id)?
                }
                None => setup_from_defaults(setup)?,
            };
            let check = perform_safety_check(&config);
            emit(json, &check, output::print_safety)
        }

        Commands::Shafts { material, spine, name } => {
            let needle = name.map(|n| n.to_lowercase());
            let shafts: Vec<_> = reference::embedded()
                .shafts
                .all()
                .iter()
                .filter(|s| material.map_or(true, |m| s.material == m))
                .filter(|s| spine.map_or(true, |v| s.spine == v))
                .filter(|s| needle.as_deref().map_or(true, |n| s.name.to_lowercase().contains(n)))
                .collect();
            emit(json, &shafts, |shafts| output::print_shafts(shafts.iter().copied()))
        }

        Commands::Components { category } => {
            let table = &reference::embedded().components;
            let components: Vec<_> = match category {
                Some(category) => table.in_category(ComponentCategory::from(category)).collect(),
                None => table.all().iter().collect(),
            };
            emit(json, &components, |components| output::print_components(components.iter().copied()))
        }

        Commands::Overhangs => emit(json, &reference::embedded().overhangs.all(), |options| {
            output::print_overhangs(options)
        }),

        Commands::New { setup } => {
            let config = setup_from_defaults(setup)?;
            if !store.upsert(config.clone()) {
                bail!("could not save to {}", store.path().display());
            }
            emit(json, &config, |config| {
                output::print_configuration(config, metric);
                println!("Saved to {}", store.path().display());
            })
        }

        Commands::List => emit(json, &store.load(), |configs| output::print_configuration_list(configs)),

        Commands::Show { id } => {
            let config = store
                .get(&id)
                .with_context(|| format!("no saved configuration with id '{}'", id))?;
            emit(json, &config, |config| output::print_configuration(config, metric))
        }

        Commands::Delete { id } => {
            if !store.remove(&id) {
                bail!("no saved configuration with id '{}'", id);
            }
            if !json {
                println!("Deleted {}", id);
            }
            Ok(())
        }
    }
}
