use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use novascope_rust::core::domain::{CelestialTarget, ObservationMoment, ObserverLocation};
use novascope_rust::parsing::input::{parse_location, parse_moment, parse_number, parse_target_list};
use novascope_rust::services::{render_single, BatchTable, ObservationRow};
use novascope_rust::NovaScopeConfig;

#[derive(Parser)]
#[command(name = "novascope", about = "Star observability calculator")]
struct Cli {
    /// Configuration file (defaults to novascope.toml in the standard locations)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Star catalog JSON file, overriding the configured one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Observer {
    /// Latitude in degrees, north positive
    #[arg(long, allow_hyphen_values = true)]
    lat: String,
    /// Longitude in degrees, east positive
    #[arg(long, allow_hyphen_values = true)]
    lon: String,
    /// Local date (YYYY-MM-DD); defaults to today
    #[arg(long, allow_hyphen_values = true)]
    date: Option<String>,
    /// Local time (HH:MM[:SS]); defaults to now
    #[arg(long)]
    time: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Observability of one star
    Single {
        #[command(flatten)]
        observer: Observer,
        /// Star name or alias from the catalog
        #[arg(required_unless_present_any = ["ra", "random"])]
        target: Option<String>,
        /// Right ascension in hours, instead of a catalog name
        #[arg(long, requires = "dec", conflicts_with = "target")]
        ra: Option<String>,
        /// Declination in degrees
        #[arg(long, requires = "ra", allow_hyphen_values = true)]
        dec: Option<String>,
        /// Pick a random star from the catalog
        #[arg(long, conflicts_with_all = ["target", "ra"])]
        random: bool,
    },
    /// Observability of several stars
    Batch {
        #[command(flatten)]
        observer: Observer,
        /// Star names; a single argument may hold a comma separated list
        #[arg(required_unless_present = "sample")]
        targets: Vec<String>,
        /// Use the first N catalog stars instead of a list
        #[arg(long, conflicts_with = "targets")]
        sample: Option<usize>,
        /// Only list stars that are observable now
        #[arg(long)]
        observable_only: bool,
    },
}

impl Observer {
    fn resolve(&self) -> Result<(ObserverLocation, ObservationMoment)> {
        let location = parse_location(&self.lat, &self.lon).context("Invalid observer location")?;

        let now = ObservationMoment::from_naive(&chrono::Local::now().naive_local());
        let date = self.date.clone().unwrap_or_else(|| now.date.to_string());
        let time = self.time.clone().unwrap_or_else(|| now.time.to_string());
        let moment = parse_moment(&date, &time).context("Invalid observation time")?;

        Ok((location, moment))
    }
}

fn load_config(cli: &Cli) -> Result<NovaScopeConfig> {
    let mut config = match &cli.config {
        Some(path) => NovaScopeConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => NovaScopeConfig::from_default_location().unwrap_or_else(|e| {
            log::warn!("{}; using built-in defaults", e);
            NovaScopeConfig::default()
        }),
    };

    if let Some(path) = &cli.catalog {
        config.catalog.path = if path.is_relative() {
            std::env::current_dir()
                .context("Failed to read current directory")?
                .join(path)
        } else {
            path.clone()
        };
    }
    Ok(config)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to serialize result")?
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Single {
            observer,
            target,
            ra,
            dec,
            random,
        } => {
            let (location, moment) = observer.resolve()?;
            let service = config.build_service().context("Failed to set up the catalog")?;

            let observation = match (target, ra, dec) {
                _ if *random => {
                    let mut rng = rand::thread_rng();
                    service.observe_random(&location, &moment, &mut rng).await?
                }
                (_, Some(ra), Some(dec)) => {
                    let star = CelestialTarget::new(
                        "Custom target",
                        parse_number("ra", ra)?,
                        parse_number("dec", dec)?,
                    )?;
                    service.observe_target(&location, &moment, &star).await?
                }
                (Some(name), _, _) => service.observe_single(&location, &moment, name).await?,
                _ => anyhow::bail!("Specify a target name, --random, or both --ra and --dec"),
            };

            if cli.json {
                print_json(&ObservationRow::from_observation(&observation))?;
            } else {
                println!("{}", render_single(&observation));
            }
        }
        Commands::Batch {
            observer,
            targets,
            sample,
            observable_only,
        } => {
            let (location, moment) = observer.resolve()?;
            let service = config.build_service().context("Failed to set up the catalog")?;
            let observable_only = *observable_only || config.batch.observable_only;

            let report = match sample {
                Some(count) => {
                    service
                        .observe_catalog_sample(&location, &moment, *count, observable_only)
                        .await?
                }
                None => {
                    let names: Vec<String> = targets
                        .iter()
                        .flat_map(|arg| parse_target_list(arg))
                        .collect();
                    service
                        .observe_batch(&location, &moment, &names, observable_only)
                        .await?
                }
            };

            let table = BatchTable::from_report(&report);
            if cli.json {
                print_json(&table)?;
            } else {
                println!("{}", table.render());
            }
        }
    }

    Ok(())
}
