use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flappy_evo::simulation::evolution;
use flappy_evo::simulation::settings::Settings;
use tracing::info;

#[derive(Parser)]
#[command(name = "flappy-evo")]
#[command(about = "Evolve neural networks that play Flappy Bird")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evolve a population of birds
    Run {
        /// Path to a settings file (JSON); defaults are used when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write per-generation statistics to this JSON file
        #[arg(long)]
        report: Option<PathBuf>,

        /// Override the maximum number of generations
        #[arg(long)]
        generations: Option<u32>,

        /// Override the random seed
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the default settings as JSON
    DumpDefaultConfig,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            report,
            generations,
            seed,
        } => {
            let mut settings = match config {
                Some(path) => Settings::load_from_file(&path)
                    .with_context(|| format!("failed to load settings from {}", path.display()))?,
                None => Settings::default(),
            };
            if let Some(generations) = generations {
                settings.evolution.max_generations = generations;
            }
            if let Some(seed) = seed {
                settings.evolution.seed = seed;
            }

            let evolution = evolution::run(&settings.params, &settings.evolution)
                .context("evolution run failed")?;

            if let Some(best) = evolution.report.best() {
                info!(
                    generation = best.generation,
                    fitness = best.best_fitness,
                    score = best.score,
                    solved = evolution.report.solved,
                    parameters = evolution.champion.parameter_count(),
                    "best generation"
                );
            }

            if let Some(path) = report {
                evolution
                    .report
                    .save_to_file(&path)
                    .with_context(|| format!("failed to write report to {}", path.display()))?;
                info!(path = %path.display(), "report written");
            }
        }
        Commands::DumpDefaultConfig => {
            let json = serde_json::to_string_pretty(&Settings::default())
                .context("failed to serialize default settings")?;
            println!("{json}");
        }
    }

    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}
