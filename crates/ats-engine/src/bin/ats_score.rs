//! ats-score — score a resume against a job description from the command
//! line and print the full analysis as JSON.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ats_engine::{AtsEngine, Taxonomy, TaxonomyStore};

#[derive(Parser, Debug)]
#[command(name = "ats-score", about = "Score a resume against a job description", version)]
struct Cli {
    /// Path to the resume text file.
    resume: PathBuf,

    /// Path to the job description text file.
    job: PathBuf,

    /// Target job title (defaults to the first lines of the job description).
    #[arg(long, default_value = "")]
    title: String,

    /// Path to a JSON taxonomy config replacing the built-in vocabulary.
    #[arg(long)]
    taxonomy: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let resume = fs::read_to_string(&cli.resume)
        .with_context(|| format!("reading resume {}", cli.resume.display()))?;
    let job = fs::read_to_string(&cli.job)
        .with_context(|| format!("reading job description {}", cli.job.display()))?;

    let taxonomy = match &cli.taxonomy {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading taxonomy {}", path.display()))?;
            let taxonomy = Taxonomy::from_json(&json)
                .with_context(|| format!("parsing taxonomy {}", path.display()))?;
            info!(terms = taxonomy.term_count(), "using custom taxonomy");
            taxonomy
        }
        None => Taxonomy::builtin(),
    };

    let engine = AtsEngine::new(Arc::new(TaxonomyStore::new(taxonomy)));
    let result = engine.score(&resume, &job, &cli.title)?;

    let output = if cli.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{output}");
    Ok(())
}
