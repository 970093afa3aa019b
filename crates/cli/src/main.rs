use carefinder_core::services::CATALOGUE;
use carefinder_core::{
    advice_for, classify, distance_km, Coordinate, CoreConfig, HospitalRegistry,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "carefinder")]
#[command(about = "Carefinder triage and hospital finder CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan text for critical symptoms
    Classify {
        /// Free text, e.g. a patient message
        text: String,
    },
    /// Print the advice for a severity (EMERGENCY or URGENT)
    Advice { severity: String },
    /// Great-circle distance between two points, in km
    #[command(allow_negative_numbers = true)]
    Distance {
        lat1: f64,
        lon1: f64,
        lat2: f64,
        lon2: f64,
    },
    /// Registered hospitals near a point, nearest first
    #[command(allow_negative_numbers = true)]
    Nearby {
        #[arg(long)]
        lat: f64,
        #[arg(long)]
        lon: f64,
        /// Search radius in km (default 5)
        #[arg(long)]
        radius: Option<f64>,
        /// Registry JSON file written by the server
        #[arg(long)]
        registry: PathBuf,
    },
    /// List the medical service catalogue
    Services,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Classify { text }) => match classify(&text) {
            Some(result) => {
                println!("{} ({})", result.warning, result.severity);
                println!("Condition: {}", result.condition);
                println!("Matched: \"{}\"", result.matched_keyword);
                println!();
                println!("{}", result.severity.advice());
            }
            None => println!("No critical symptoms detected."),
        },
        Some(Commands::Advice { severity }) => {
            let advice = advice_for(&severity);
            if advice.is_empty() {
                eprintln!("Unknown severity: {severity} (expected EMERGENCY or URGENT)");
            } else {
                println!("{advice}");
            }
        }
        Some(Commands::Distance {
            lat1,
            lon1,
            lat2,
            lon2,
        }) => {
            let from = Coordinate::new(lat1, lon1)?;
            let to = Coordinate::new(lat2, lon2)?;
            println!("{:.2} km", distance_km(from, to));
        }
        Some(Commands::Nearby {
            lat,
            lon,
            radius,
            registry,
        }) => {
            let origin = Coordinate::new(lat, lon)?;
            let radius = CoreConfig::default().resolve_radius(radius)?;
            let registry = HospitalRegistry::load_from_path(&registry)?;
            let nearby = registry.nearby(origin, radius)?;

            if nearby.is_empty() {
                println!("No registered hospitals within {radius} km.");
            } else {
                for ranked in nearby {
                    println!(
                        "{:>7.2} km  {}  ({})",
                        ranked.distance_km, ranked.facility.name, ranked.facility.address
                    );
                }
            }
        }
        Some(Commands::Services) => {
            for category in CATALOGUE {
                println!("{}", category.category);
                for service in category.services {
                    println!("  {:<24} {:<9} {}", service.id, service.level.as_str(), service.name);
                }
            }
        }
        None => {
            println!("Use 'carefinder --help' for commands");
        }
    }

    Ok(())
}
