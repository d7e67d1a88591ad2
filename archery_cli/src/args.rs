//! Command-line arguments.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use archery_core::configuration::ConfigurationDraft;
use archery_core::reference::{self, ArrowMaterial, ComponentCategory};

#[derive(Parser, Debug)]
#[command(name = "archery")]
#[command(about = "Arrow tuning calculator: spine, weight, FOC and safety checks")]
#[command(version)]
pub struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Also show metric units
    #[arg(long, global = true)]
    pub metric: bool,

    /// Configuration store file
    #[arg(long, global = true, env = "ARCHERY_STORE")]
    pub store: Option<PathBuf>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Recommend a dynamic spine range
    Spine {
        #[arg(long)]
        draw_weight: f64,

        #[arg(long)]
        draw_length: f64,

        #[arg(long, default_value_t = 125.0)]
        point_weight: f64,

        #[arg(long, default_value = "carbon")]
        material: ArrowMaterial,
    },

    /// Look up manufacturer spine charts
    Manufacturers {
        #[arg(long)]
        draw_weight: f64,

        #[arg(long, default_value_t = 100.0)]
        point_weight: f64,

        #[arg(long, default_value_t = 28.0)]
        arrow_length: f64,
    },

    /// Total weight, GPP and FOC for a setup
    Weight {
        #[command(flatten)]
        setup: SetupArgs,
    },

    /// Point weight needed to reach a target GPP
    OptimalPoint {
        /// Desired grains per pound
        #[arg(long)]
        target_gpp: f64,

        #[command(flatten)]
        setup: SetupArgs,
    },

    /// Run safety checks on a stored configuration or on the given setup
    Check {
        /// Stored configuration id; setup flags override its values
        id: Option<String>,

        #[command(flatten)]
        setup: SetupArgs,
    },

    /// List reference shafts
    Shafts {
        #[arg(long)]
        material: Option<ArrowMaterial>,

        /// Only shafts with this spine
        #[arg(long)]
        spine: Option<f64>,

        /// Case-insensitive name filter
        #[arg(long)]
        name: Option<String>,
    },

    /// List reference component weights
    Components {
        #[arg(long, value_enum)]
        category: Option<CategoryArg>,
    },

    /// List suggested overhangs
    Overhangs,

    /// Create and save a configuration from the defaults plus overrides
    New {
        #[command(flatten)]
        setup: SetupArgs,
    },

    /// List saved configurations
    List,

    /// Show a saved configuration
    Show { id: String },

    /// Delete a saved configuration
    Delete { id: String },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryArg {
    Point,
    Nock,
    Fletching,
}

impl From<CategoryArg> for ComponentCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Point => ComponentCategory::Point,
            CategoryArg::Nock => ComponentCategory::Nock,
            CategoryArg::Fletching => ComponentCategory::Fletching,
        }
    }
}

/// Setup values layered over a draft. Unset flags keep the draft's value.
#[derive(Args, Debug, Clone, Default)]
pub struct SetupArgs {
    #[arg(long)]
    pub name: Option<String>,

    /// Draw weight (lb)
    #[arg(long)]
    pub draw_weight: Option<f64>,

    /// Draw length (in)
    #[arg(long)]
    pub draw_length: Option<f64>,

    /// Arrow length (in); derived from draw length + overhang when omitted
    #[arg(long)]
    pub arrow_length: Option<f64>,

    /// Overhang past the riser (in)
    #[arg(long)]
    pub overhang: Option<f64>,

    /// Reference shaft name; fills shaft weight, spine and material
    #[arg(long)]
    pub shaft: Option<String>,

    /// Shaft weight (gr/in)
    #[arg(long)]
    pub shaft_weight: Option<f64>,

    #[arg(long)]
    pub spine: Option<f64>,

    #[arg(long)]
    pub material: Option<ArrowMaterial>,

    /// Point weight (gr)
    #[arg(long)]
    pub point_weight: Option<f64>,

    /// Nock weight (gr)
    #[arg(long)]
    pub nock_weight: Option<f64>,

    /// Fletching weight, full set (gr)
    #[arg(long)]
    pub fletching_weight: Option<f64>,
}

impl SetupArgs {
    /// Apply the flags to `draft`.
    ///
    /// A `--shaft` is resolved first so explicit `--shaft-weight`, `--spine`
    /// and `--material` flags win over the table values. Changing the draw
    /// length or overhang without `--arrow-length` re-derives the arrow
    /// length.
    pub fn apply(self, mut draft: ConfigurationDraft) -> Result<ConfigurationDraft> {
        if let Some(name) = self.shaft {
            let shaft = reference::embedded()
                .shafts
                .find_by_name(&name)
                .with_context(|| format!("unknown shaft '{}' (see `archery shafts`)", name))?;
            draft.shaft_name = Some(shaft.name.clone());
            draft.shaft_weight = Some(shaft.weight_gpi);
            draft.spine_value = Some(shaft.spine);
            draft.arrow_material = Some(shaft.material);
        }

        if self.arrow_length.is_none() && (self.draw_length.is_some() || self.overhang.is_some()) {
            draft.arrow_length = None;
        }

        // A hand-entered spine or weight no longer describes the named shaft
        if self.shaft_weight.is_some() || self.spine.is_some() || self.material.is_some() {
            draft.shaft_name = None;
        }

        draft.name = self.name.or(draft.name);
        draft.draw_weight = self.draw_weight.or(draft.draw_weight);
        draft.draw_length = self.draw_length.or(draft.draw_length);
        draft.arrow_length = self.arrow_length.or(draft.arrow_length);
        draft.overhang = self.overhang.or(draft.overhang);
        draft.shaft_weight = self.shaft_weight.or(draft.shaft_weight);
        draft.spine_value = self.spine.or(draft.spine_value);
        draft.arrow_material = self.material.or(draft.arrow_material);
        draft.point_weight = self.point_weight.or(draft.point_weight);
        draft.nock_weight = self.nock_weight.or(draft.nock_weight);
        draft.fletching_weight = self.fletching_weight.or(draft.fletching_weight);

        Ok(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archery_core::configuration::create_default_configuration;

    fn setup_from(args: &[&str]) -> SetupArgs {
        let argv = ["archery", "weight"].iter().chain(args.iter()).copied();
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Weight { setup } => setup,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_no_flags_keeps_defaults() {
        let draft = setup_from(&[]).apply(create_default_configuration()).unwrap();
        assert_eq!(draft, create_default_configuration());
    }

    #[test]
    fn test_overrides() {
        let draft = setup_from(&["--draw-weight", "45", "--point-weight", "100", "--material", "alu"])
            .apply(create_default_configuration())
            .unwrap();
        assert_eq!(draft.draw_weight, Some(45.0));
        assert_eq!(draft.point_weight, Some(100.0));
        assert_eq!(draft.arrow_material, Some(ArrowMaterial::Aluminum));
        assert!(draft.shaft_name.is_none());
    }

    #[test]
    fn test_shaft_lookup_fills_specs() {
        let draft = setup_from(&["--shaft", "easton 4mm full metal jacket 400"])
            .apply(create_default_configuration())
            .unwrap();
        assert_eq!(draft.shaft_name.as_deref(), Some("Easton 4MM Full Metal Jacket 400"));
        assert_eq!(draft.spine_value, Some(400.0));
        assert_eq!(draft.shaft_weight, Some(8.8));
    }

    #[test]
    fn test_unknown_shaft_is_error() {
        let result = setup_from(&["--shaft", "No Such Shaft"]).apply(create_default_configuration());
        assert!(result.is_err());
    }

    #[test]
    fn test_draw_length_rederives_arrow_length() {
        let stored = ConfigurationDraft {
            arrow_length: Some(29.0),
            ..create_default_configuration()
        };
        let draft = setup_from(&["--draw-length", "30"]).apply(stored.clone()).unwrap();
        assert_eq!(draft.arrow_length, None);
        assert_eq!(draft.build("x").unwrap().arrow_length, 31.0);

        let draft = setup_from(&["--draw-length", "30", "--arrow-length", "30.5"]).apply(stored).unwrap();
        assert_eq!(draft.arrow_length, Some(30.5));
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["archery", "list", "--json", "--store", "/tmp/s.json"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/s.json")));
    }
}
