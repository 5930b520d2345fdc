use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use badword::config::{Config, ScorerBackend};
use badword::{Locale, ProfanityDetector};

/// badword: multi-locale profanity detection.
///
/// Classifies words and phrases with one trained model per locale. A word
/// flagged by any loaded locale counts as profane.
#[derive(Parser)]
#[command(name = "badword", version, about)]
struct Cli {
    /// Locale to load (repeatable). Overrides BADWORD_LOCALES.
    #[arg(long = "locale", global = true)]
    locales: Vec<String>,

    /// Load the default bundle (english, spanish, portuguese)
    #[arg(long, global = true)]
    all_locales: bool,

    /// Scorer backend. Overrides BADWORD_SCORER.
    #[arg(long, value_enum, global = true)]
    scorer: Option<ScorerBackend>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a single word
    Check {
        /// The word to classify
        word: String,
    },

    /// Classify a phrase token by token
    Phrase {
        /// The phrase to classify
        text: String,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a phrase with profane tokens masked
    Mask {
        /// The phrase to mask
        text: String,

        /// Character used to mask profane tokens
        #[arg(long, default_value = "*")]
        mask_char: char,
    },

    /// Download model files for the selected locales
    DownloadModel,

    /// Show configuration and which model files are present
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("badword=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = apply_overrides(Config::load()?, &cli)?;

    match cli.command {
        Commands::Check { word } => {
            let detector = build_detector(&config)?;
            let verdict = detector.classify(&word);
            let predictions = detector.predictions(&word);
            badword::output::terminal::display_word(&verdict, &predictions);
        }

        Commands::Phrase { text, json } => {
            let detector = build_detector(&config)?;
            let analysis = detector.analyze_phrase(&text);
            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                badword::output::terminal::display_phrase(&analysis);
            }
        }

        Commands::Mask { text, mask_char } => {
            let detector = build_detector(&config)?;
            println!("{}", detector.mask_profanity(&text, mask_char));
        }

        Commands::DownloadModel => {
            let base_url = config.require_model_url()?;
            let store = config.model_store();
            let locales = config.selected_locales();

            println!("Downloading models...");
            println!("  Destination: {}", store.dir().display());

            let fetched = badword::scorer::download::download_models(
                &store,
                &config.scorer_backend,
                &locales,
                base_url,
            )
            .await?;

            println!("\n{}", format!("{fetched} file(s) downloaded.").bold());
            println!("You can now run `badword check <word>` or `badword phrase \"<text>\"`.");
        }

        Commands::Status => {
            badword::output::terminal::display_status(
                &config.model_store(),
                &config.scorer_backend,
                &config.selected_locales(),
                config.threshold,
            );
        }
    }

    Ok(())
}

/// Apply CLI flags on top of the environment configuration.
fn apply_overrides(mut config: Config, cli: &Cli) -> Result<Config> {
    if !cli.locales.is_empty() {
        config.locales = cli
            .locales
            .iter()
            .map(|name| name.parse::<Locale>())
            .collect::<Result<_, _>>()?;
    }
    if cli.all_locales {
        config.all_locales = true;
    }
    if let Some(backend) = &cli.scorer {
        config.scorer_backend = backend.clone();
    }
    Ok(config)
}

/// Check model files, then load one scorer per selected locale.
fn build_detector(config: &Config) -> Result<ProfanityDetector> {
    config.require_models()?;
    info!(backend = ?config.scorer_backend, "Loading scorers");
    let detector = ProfanityDetector::from_config(config)?;
    Ok(detector)
}
