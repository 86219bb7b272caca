use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use storefront_reviews::config::DEFAULT_CONFIG_PATH;
use storefront_reviews::display::{headline, review_card};
use storefront_reviews::{
    Config, JsonFileStorage, RatingSummary, RawReviewInput, ReviewBoard, SubmitError,
};

#[derive(Parser)]
#[command(name = "storefront-reviews")]
#[command(about = "Collect and display customer reviews for the storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the YAML config file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Override the storage directory from the config
    #[arg(long, env = "STOREFRONT_STORE_DIR")]
    store_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the rating header and every review, newest first
    List,

    /// Show the rating header only
    Summary,

    /// Submit a new review
    Submit {
        /// Reviewer name
        #[arg(long, default_value = "")]
        name: String,

        /// Reviewer email
        #[arg(long, default_value = "")]
        email: String,

        /// Star rating, 1 to 5
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        rating: i64,

        /// Review text
        #[arg(long, default_value = "")]
        feedback: String,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("storefront_reviews=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(&cli.config)?;
    if let Some(dir) = cli.store_dir {
        config.store.dir = dir;
    }

    let mut board = ReviewBoard::open(&config)?;

    match cli.command {
        Commands::List => list_reviews(&mut board)?,
        Commands::Summary => {
            let summary = board.summary().context("Failed to load reviews")?;
            println!("{}", headline(&summary));
        }
        Commands::Submit {
            name,
            email,
            rating,
            feedback,
        } => {
            let candidate = RawReviewInput {
                name,
                email,
                rating,
                feedback,
            };
            submit_review(&mut board, &candidate)?;
        }
    }

    Ok(())
}

fn list_reviews(board: &mut ReviewBoard<JsonFileStorage>) -> Result<()> {
    let reviews = board.load().context("Failed to load reviews")?;

    println!("{}\n", headline(&RatingSummary::from_collection(&reviews)));
    for review in &reviews {
        println!("{}\n", review_card(review));
    }

    Ok(())
}

fn submit_review(
    board: &mut ReviewBoard<JsonFileStorage>,
    candidate: &RawReviewInput,
) -> Result<()> {
    match board.submit(candidate) {
        Ok(reviews) => {
            println!("Thank you for your review!");
            println!("{}", headline(&RatingSummary::from_collection(&reviews)));
            Ok(())
        }
        Err(SubmitError::Invalid(errors)) => {
            for (field, message) in errors.iter() {
                eprintln!("  {}: {}", field, message);
            }
            anyhow::bail!("Review rejected ({} invalid field(s))", errors.len());
        }
        Err(SubmitError::Store(e)) => Err(anyhow::Error::new(e).context("Failed to save review")),
    }
}
