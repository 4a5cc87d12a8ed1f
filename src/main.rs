use anyhow::Result;
use clap::{Parser, ValueEnum};
use evo_snake::game::GameConfig;
use evo_snake::modes::{HumanMode, PlayMode, TrainConfig, TrainMode};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "evo_snake")]
#[command(version, about = "Snake on a 30x30 grid, played by you or by a trained agent")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// Agent weights written by train mode and read by play mode; the
    /// metadata sits next to it as `<stem>.meta.json`
    #[arg(long, default_value = "models/best_agent.mpk")]
    model: PathBuf,

    /// Generations to evaluate in train mode
    #[arg(long, default_value = "50")]
    generations: usize,

    /// Candidates per generation in train mode
    #[arg(long, default_value = "200")]
    population: usize,

    /// Seed for reproducible training runs
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
    /// Score generations of agents and export the best one
    Train,
    /// Watch an exported agent play
    Play,
}

impl Mode {
    /// The TUI owns the terminal in human and play modes, so only warnings
    /// are logged there unless RUST_LOG says otherwise.
    fn default_filter(self) -> &'static str {
        match self {
            Mode::Train => "evo_snake=info",
            Mode::Human | Mode::Play => "evo_snake=warn",
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stdout; the TUI draws on stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.mode.default_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .init();

    let config = GameConfig::default();

    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config);
            human_mode.run().await?;
        }
        Mode::Train => {
            let mut train_config = TrainConfig::new(cli.generations, cli.population, cli.model);
            train_config.seed = cli.seed;
            train_config.game_config = config;

            let outcome = TrainMode::new(train_config).run().await?;
            println!(
                "Exported generation {} agent (fitness {:.2}, score {}) to {:?} and {:?}",
                outcome.generation,
                outcome.report.fitness,
                outcome.report.score,
                outcome.weights_path,
                outcome.metadata_path
            );
        }
        Mode::Play => {
            let mut play_mode = PlayMode::new(&cli.model, config)?;
            play_mode.run().await?;
        }
    }

    Ok(())
}
