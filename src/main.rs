//! `url-validity` command-line entrypoint.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, ensure};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use url_validity::config::Config;
use url_validity::embedding::{
    CachedEmbedder, SentenceEmbedder, SentimentClassifier, SequenceClassifier, TextEmbedder,
};
use url_validity::fetch::HttpFetcher;
use url_validity::pipeline::{BatchRunner, read_requests};
use url_validity::record::CsvRecorder;
use url_validity::scoring::{Aggregator, BiasScorer, RelevanceScorer, UrlValidator};

/// Rate web pages as sources for a question.
#[derive(Debug, Parser)]
#[command(name = "url-validity", version)]
#[command(about = "Score URL validity from content relevance and sentiment", long_about = None)]
struct Cli {
    /// Do not load any model; relevance scores 0 and bias scores 50.
    #[arg(long, global = true)]
    no_models: bool,

    /// Fetch timeout in seconds (overrides URL_VALIDITY_TIMEOUT_SECS).
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rate one URL against a query and print the scores as JSON.
    Rate {
        /// The user's question.
        #[arg(long)]
        query: String,

        /// Page to rate.
        #[arg(long)]
        url: String,
    },

    /// Rate every row of a request CSV and append the results.
    Batch {
        /// CSV with header `user_prompt,url_to_check,custom_rating`.
        #[arg(long)]
        input: PathBuf,

        /// Output table (overrides URL_VALIDITY_OUTPUT_PATH).
        #[arg(long)]
        output: Option<PathBuf>,

        /// Existing table to extend instead of the output file.
        #[arg(long)]
        prior: Option<PathBuf>,
    },

    /// Combine two sub-scores into the integer final score.
    Combine {
        /// Content relevance, 0-100.
        #[arg(long)]
        relevance: f64,

        /// Bias score, 0-100.
        #[arg(long)]
        bias: f64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(timeout_secs) = cli.timeout_secs {
        config.timeout_secs = timeout_secs;
    }

    match cli.command {
        Command::Rate { query, url } => {
            config.validate()?;
            let validator = build_validator(&config, cli.no_models)?;

            let result = validator.rate(&query, &url).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Batch {
            input,
            output,
            prior,
        } => {
            if let Some(output) = output {
                config.output_path = output;
            }
            if prior.is_some() {
                config.prior_path = prior;
            }
            config.validate()?;

            let requests = read_requests(&input)
                .with_context(|| format!("reading requests from {}", input.display()))?;
            info!(requests = requests.len(), input = %input.display(), "Loaded batch");

            let mut recorder = CsvRecorder::new(config.output_path.clone());
            if let Some(ref prior) = config.prior_path {
                recorder = recorder.with_prior_path(prior.clone());
            }

            let runner = BatchRunner::new(build_validator(&config, cli.no_models)?, recorder);
            let summary = runner.run(requests).await?;
            if summary.degraded > 0 {
                warn!(
                    degraded = summary.degraded,
                    rows = summary.rows,
                    "Some pages were scored as empty"
                );
            }

            println!("{}", config.output_path.display());
        }
        Command::Combine { relevance, bias } => {
            ensure!(
                (0.0..=100.0).contains(&relevance),
                "relevance must be between 0 and 100, got {relevance}"
            );
            ensure!(
                (0.0..=100.0).contains(&bias),
                "bias must be between 0 and 100, got {bias}"
            );

            println!("{}", Aggregator::default().combine_truncated(relevance, bias));
        }
    }

    Ok(())
}

fn build_validator(config: &Config, no_models: bool) -> anyhow::Result<UrlValidator<HttpFetcher>> {
    let fetcher = HttpFetcher::new(config.fetch_config())?;

    if no_models {
        warn!("Models disabled, relevance and bias use fallback scores");
        return Ok(UrlValidator::new(
            fetcher,
            RelevanceScorer::unavailable(),
            BiasScorer::unavailable(),
            Aggregator::default(),
        ));
    }

    if config.embedder_path.is_none() {
        warn!("No URL_VALIDITY_EMBEDDER_PATH configured, running embedder in stub mode");
    }
    let embedder = SentenceEmbedder::load(config.embedder_config())?;
    let embedder: Arc<dyn TextEmbedder> = if config.embed_cache_capacity > 0 {
        Arc::new(CachedEmbedder::new(embedder, config.embed_cache_capacity))
    } else {
        Arc::new(embedder)
    };

    if config.classifier_path.is_none() {
        warn!("No URL_VALIDITY_CLASSIFIER_PATH configured, running classifier in stub mode");
    }
    let classifier: Arc<dyn SentimentClassifier> =
        Arc::new(SequenceClassifier::load(config.classifier_config())?);

    info!(
        embedder_dim = embedder.embedding_dim(),
        timeout_secs = config.timeout_secs,
        "Validator ready"
    );

    Ok(UrlValidator::new(
        fetcher,
        RelevanceScorer::new(embedder),
        BiasScorer::new(classifier),
        Aggregator::default(),
    ))
}
