//! circular-ai CLI: waste item analysis from the command line.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use circular_ai::config::{self, AppConfig};
use circular_ai::models::GeoPoint;
use circular_ai::pipeline::facilities::{FacilityCatalog, FacilityQuery};
use circular_ai::pipeline::{AnalysisRequest, WastePipeline};

#[derive(Parser)]
#[command(name = "circular-ai", version, about = "Waste item analysis and recycler matching")]
struct Cli {
    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse a photo of a waste item.
    Analyze {
        /// Image file (JPEG, PNG, TIFF).
        image: PathBuf,

        /// City used for instructions and facility filtering.
        #[arg(long)]
        city: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,

        #[arg(long, allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Fail instead of falling back when the vision model errors.
        #[arg(long)]
        strict: bool,
    },

    /// Rank recycling facilities for a material.
    Facilities {
        /// Free-text material, e.g. "PET bottle".
        #[arg(long)]
        material: String,

        #[arg(long)]
        city: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,

        #[arg(long, allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Prefer facilities that take hazardous material.
        #[arg(long)]
        hazardous: bool,

        #[arg(long, default_value = "5")]
        limit: usize,
    },

    /// Facilities for a broad category within a radius.
    Nearby {
        /// plastic, metal, paper, hazardous or electronic.
        #[arg(long)]
        category: String,

        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        #[arg(long, default_value = "10")]
        radius_km: f64,

        #[arg(long, default_value = "5")]
        limit: usize,
    },

    /// CPCB regulatory lookups.
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },
}

#[derive(Subcommand)]
enum RulesAction {
    /// Disposal guidelines for a material.
    Guidelines { material: String },
    /// Emergency protocol for a hazardous item.
    Protocol { description: String },
    /// Extended Producer Responsibility obligations.
    Epr { category: String },
    /// Passages similar to a scenario (needs CPCB_PASSAGES_PATH).
    Similar { scenario: String },
}

fn main() -> Result<()> {
    circular_ai::init_tracing();
    tracing::info!("{} v{}", config::APP_NAME, config::APP_VERSION);

    let cli = Cli::parse();
    let mut config = AppConfig::from_env().context("reading configuration")?;

    match cli.command {
        Commands::Analyze {
            image,
            city,
            lat,
            lon,
            strict,
        } => {
            config.strict_genai |= strict;
            let pipeline = WastePipeline::from_config(&config)?;
            let bytes = std::fs::read(&image)
                .with_context(|| format!("reading image {}", image.display()))?;
            let filename = image.file_name().and_then(|n| n.to_str());
            let result = pipeline.run(&AnalysisRequest {
                image_bytes: &bytes,
                filename,
                city: city.as_deref(),
                latitude: lat,
                longitude: lon,
            })?;
            print_json(&result, cli.pretty)
        }
        Commands::Facilities {
            material,
            city,
            lat,
            lon,
            hazardous,
            limit,
        } => {
            let catalog = load_catalog(&config)?;
            let matches = catalog.match_facilities(&FacilityQuery {
                material_type: &material,
                city: city.as_deref(),
                location: GeoPoint::validated(lat, lon),
                hazardous,
                limit,
            });
            print_json(&matches, cli.pretty)
        }
        Commands::Nearby {
            category,
            lat,
            lon,
            radius_km,
            limit,
        } => {
            let Some(point) = GeoPoint::validated(Some(lat), Some(lon)) else {
                bail!("invalid coordinates {lat}, {lon}");
            };
            let catalog = load_catalog(&config)?;
            print_json(
                &catalog.nearby_by_category(point, &category, radius_km, limit),
                cli.pretty,
            )
        }
        Commands::Rules { action } => {
            let pipeline = WastePipeline::from_config(&config)?;
            let lookup = pipeline.lookup();
            match action {
                RulesAction::Guidelines { material } => {
                    print_json(&lookup.guidelines(&material), cli.pretty)
                }
                RulesAction::Protocol { description } => {
                    print_json(&lookup.hazardous_protocol(&description), cli.pretty)
                }
                RulesAction::Epr { category } => {
                    print_json(&lookup.epr_obligations(&category), cli.pretty)
                }
                RulesAction::Similar { scenario } => {
                    print_json(&lookup.similar_cases(&scenario)?, cli.pretty)
                }
            }
        }
    }
}

fn load_catalog(config: &AppConfig) -> Result<FacilityCatalog> {
    FacilityCatalog::load(&config.recyclers_path)
        .with_context(|| format!("loading {}", config.recyclers_path.display()))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}
