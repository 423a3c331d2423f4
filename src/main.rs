use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use floodaid::{City, FloodAidConfig, FloodWatch, logging, relief, respond, web};

#[derive(Parser)]
#[command(
    name = "floodaid",
    version,
    about = "Flood relief assistant: relief centers, live weather and flood risk"
)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve {
        /// Port to listen on, overriding the config file
        #[arg(long)]
        port: Option<u16>,
    },
    /// Show current weather for a place
    Weather {
        place: String,
    },
    /// Show weather and flood risk for a place
    Risk {
        place: String,
    },
    /// Ask for help, e.g. "Where can I get food?"
    Ask {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// List relief centers, for one city or all of them
    Centers {
        city: Option<String>,
    },
    /// Risk overview for every covered city
    Dashboard,
    /// Covered cities, relief center count and emergency lines
    Summary,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = FloodAidConfig::load_from_path(cli.config.clone())
        .context("Failed to load configuration")?;
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    logging::init(&config.logging)?;

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            web::run(&config).await?;
        }
        Commands::Weather { place } => {
            let watch = FloodWatch::open_meteo(&config.weather)?;
            match watch.current_conditions(&place).await {
                Some(report) => print!("{report}"),
                None => println!("No weather data for {place}. Check your connection."),
            }
        }
        Commands::Risk { place } => {
            let watch = FloodWatch::open_meteo(&config.weather)?;
            print!("{}", watch.assess(&place).await);
        }
        Commands::Ask { question } => {
            println!("{}", respond(&question.join(" ")));
        }
        Commands::Centers { city } => {
            let directory = relief::directory();
            let cities = match city {
                Some(name) => vec![name.parse::<City>()?],
                None => directory.cities(),
            };
            for city in cities {
                println!("Relief centers in {city}:");
                for center in directory.centers(city) {
                    println!("{center}");
                }
            }
        }
        Commands::Dashboard => {
            let watch = FloodWatch::open_meteo(&config.weather)?;
            println!("{:<10} {:>8}  {:<15} CENTERS", "CITY", "TEMP", "RISK");
            for row in watch.dashboard(relief::directory()).await {
                println!("{row}");
            }
        }
        Commands::Summary => {
            let directory = relief::directory();
            println!("Cities covered:  {}", directory.cities().len());
            println!("Relief centers:  {}", directory.total_centers());
        }
    }

    println!();
    println!(
        "🆘 Emergency: NDMA {} | Rescue: {}",
        relief::NDMA_HELPLINE,
        relief::RESCUE_HELPLINE
    );
    Ok(())
}
