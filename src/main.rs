use anyhow::Result;
use catch_me::game::{GameConfig, GameEngine};
use catch_me::logging;
use catch_me::modes::{PlayMode, RecordMode, TrainConfig, TrainMode};
use catch_me::predictor::{PredictorKind, TrainingBackend, default_device, load_predictor};
use catch_me::render::Theme;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "catch_me")]
#[command(version, about = "Chase game where the enemy learns where you are going")]
struct Cli {
    /// What to run
    #[arg(long, default_value = "play")]
    mode: Mode,

    /// Trained enemy model (metadata is read from the matching .meta.json)
    #[arg(long, default_value = "models/enemy_lstm.mpk")]
    model: PathBuf,

    /// Movement log written by record mode and read by train mode
    #[arg(long, default_value = "movement_data.csv")]
    data: PathBuf,

    /// How the enemy predicts the player's next position
    #[arg(long, default_value = "lstm")]
    predictor: PredictorChoice,

    /// Game configuration JSON overriding the built-in defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Theme JSON for titles, labels and colors
    #[arg(long)]
    theme: Option<PathBuf>,

    /// Maximum training epochs
    #[arg(long, default_value = "50")]
    epochs: usize,

    /// Log file for the interactive modes
    #[arg(long, default_value = "catch_me.log")]
    log_file: PathBuf,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play against the enemy
    Play,
    /// Record your own movement for training
    Record,
    /// Train the enemy model from a movement log
    Train,
}

#[derive(Clone, ValueEnum)]
enum PredictorChoice {
    /// Trained LSTM model
    Lstm,
    /// Extrapolate recent velocity
    Extrapolate,
    /// Assume the player stays put
    LastValue,
}

impl From<PredictorChoice> for PredictorKind {
    fn from(choice: PredictorChoice) -> Self {
        match choice {
            PredictorChoice::Lstm => PredictorKind::Lstm,
            PredictorChoice::Extrapolate => PredictorKind::Extrapolate,
            PredictorChoice::LastValue => PredictorKind::LastValue,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.mode {
        Mode::Train => logging::init_stdout(),
        Mode::Play | Mode::Record => logging::init_file(&cli.log_file)?,
    }

    // Create game configuration, from file if given
    let config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Play => {
            let (predictor, bounds) = load_predictor(cli.predictor.into(), &cli.model, &config)?;
            let engine = GameEngine::new(config, bounds, predictor)?;
            let theme = Theme::load_or_default(cli.theme.as_deref());

            let mut play_mode = PlayMode::new(engine, theme);
            play_mode.run().await?;
        }
        Mode::Record => {
            let theme = Theme::load_or_default(cli.theme.as_deref());

            let mut record_mode = RecordMode::new(config, cli.data, theme);
            record_mode.run().await?;
        }
        Mode::Train => {
            let mut train_config = TrainConfig::new(cli.data, cli.model);
            train_config.trainer.epochs = cli.epochs;
            train_config.trainer.network.sequence_length = config.sequence_length;

            let mut train_mode = TrainMode::<TrainingBackend>::new(train_config, default_device())?;
            train_mode.run()?;
        }
    }

    Ok(())
}
