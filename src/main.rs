use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use genetrade::config::{ConfigManager, EstimatorKind};
use genetrade::data::MarketData;
use genetrade::engines::estimation::ForecastAccuracy;
use genetrade::engines::generation::ConsoleProgressCallback;
use genetrade::engines::simulation::Simulation;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Evolve trading strategies with a genetic algorithm", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the evolutionary search and report the best strategy
    Evolve {
        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory holding <TICKER>_data.csv files
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Forecasting method for warm-start seeds (least_squares, method_of_moments, maximum_likelihood)
        #[arg(long)]
        estimator: Option<String>,

        /// Seed for the random generator
        #[arg(long)]
        seed: Option<u64>,

        /// Write the JSON report here instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Score every estimator's rolling forecasts against realized prices
    Accuracy {
        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory holding <TICKER>_data.csv files
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<ConfigManager> {
    let manager = ConfigManager::new();
    if let Some(path) = path {
        manager
            .load_from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?;
    }
    Ok(manager)
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Evolve {
            config,
            data_dir,
            estimator,
            seed,
            output,
        } => {
            let manager = load_config(config.as_ref())?;
            let estimator = estimator
                .map(|name| name.parse::<EstimatorKind>())
                .transpose()?;
            manager.update(|c| {
                if let Some(dir) = data_dir {
                    c.data.directory = dir;
                }
                if let Some(kind) = estimator {
                    c.estimation.estimator = kind;
                }
                if seed.is_some() {
                    c.evolution.seed = seed;
                }
            })?;
            let config = manager.get()?;

            let market = MarketData::load(&config.data, &config.estimation)
                .context("loading price data")?;
            let mut simulation = Simulation::new(config, &market)?;
            let report = simulation.run(&mut ConsoleProgressCallback)?;

            println!(
                "Best net gain: {:.2} (profit {:.2}, generation {})",
                report.best_agent.net_gain, report.best_agent.profit, report.best_agent.generation
            );
            match output {
                Some(path) => report
                    .write_json(&path)
                    .with_context(|| format!("writing report to {}", path.display()))?,
                None => println!("{}", report.to_json()?),
            }
        }
        Commands::Accuracy { config, data_dir } => {
            let manager = load_config(config.as_ref())?;
            manager.update(|c| {
                if let Some(dir) = data_dir {
                    c.data.directory = dir;
                }
            })?;
            let config = manager.get()?;
            let estimation = &config.estimation;

            let market = MarketData::load(&config.data, estimation).context("loading price data")?;

            for (ticker, series) in market.iter() {
                let prices = series.between(estimation.start_date, estimation.end_date);
                println!("{} ({} closes)", ticker, prices.len());
                for kind in EstimatorKind::all() {
                    let estimator = kind.build();
                    let accuracy = ForecastAccuracy::evaluate(
                        estimator.as_ref(),
                        prices,
                        estimation.lookback_days,
                        estimation.forecast_days,
                    )?;
                    match (accuracy.mean(), accuracy.min(), accuracy.max()) {
                        (Some(mean), Some(min), Some(max)) => println!(
                            "  {:<20} windows {:>4}  mean {:>12.4}  min {:>12.4}  max {:>12.4}",
                            kind.as_str(), accuracy.windows(), mean, min, max
                        ),
                        _ => println!("  {:<20} not enough data", kind.as_str()),
                    }
                }
            }
        }
    }

    Ok(())
}
