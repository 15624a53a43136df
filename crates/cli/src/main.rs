use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use recall_corpus::{Corpus, Document};
use recall_search::{QueryService, DEFAULT_K};
use recall_store::Store;
use std::path::PathBuf;

mod seed;

#[derive(Parser)]
#[command(name = "recall")]
#[command(about = "Curated-corpus retrieval for a conversational assistant", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build and persist a namespace store from raw document records
    Build {
        /// JSON file holding an array of {id, text, meta} records
        #[arg(long)]
        input: PathBuf,

        /// Directory the store artifacts are written to
        #[arg(long)]
        store_dir: PathBuf,

        /// Namespace the store is published under
        #[arg(long)]
        namespace: String,
    },

    /// Provision the built-in corpora (quotes, journal, wellness)
    Seed {
        /// Directory the store artifacts are written to
        #[arg(long)]
        store_dir: PathBuf,
    },

    /// Search a persisted namespace and print hits as JSON lines
    Search {
        /// Directory holding the store artifacts
        #[arg(long)]
        store_dir: PathBuf,

        /// Namespace to search
        #[arg(long)]
        namespace: String,

        /// Free-text query; omitted means "one random document"
        #[arg(long)]
        query: Option<String>,

        /// Number of results (1 to 20)
        #[arg(short, default_value_t = DEFAULT_K)]
        k: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.quiet {
        "warn"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .target(env_logger::Target::Stderr)
        .init();

    match cli.command {
        Commands::Build {
            input,
            store_dir,
            namespace,
        } => build(&input, &store_dir, &namespace).await,
        Commands::Seed { store_dir } => seed(&store_dir).await,
        Commands::Search {
            store_dir,
            namespace,
            query,
            k,
        } => search(&store_dir, &namespace, query.as_deref(), k).await,
    }
}

async fn build(input: &PathBuf, store_dir: &PathBuf, namespace: &str) -> Result<()> {
    let bytes = tokio::fs::read(input)
        .await
        .with_context(|| format!("reading {}", input.display()))?;
    let records: Vec<Document> =
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", input.display()))?;

    let corpus = Corpus::from_records(records).context("validating corpus")?;
    let count = corpus.len();
    Store::build(corpus)
        .save(store_dir, namespace)
        .await
        .with_context(|| format!("saving namespace '{namespace}'"))?;

    log::info!("Published '{}' with {} documents", namespace, count);
    Ok(())
}

async fn seed(store_dir: &PathBuf) -> Result<()> {
    for (namespace, records) in seed::corpora() {
        let corpus = Corpus::from_records(records)
            .with_context(|| format!("validating seed corpus '{namespace}'"))?;
        Store::build(corpus)
            .save(store_dir, namespace)
            .await
            .with_context(|| format!("saving namespace '{namespace}'"))?;
    }
    log::info!("Seed corpora written to {}", store_dir.display());
    Ok(())
}

async fn search(
    store_dir: &PathBuf,
    namespace: &str,
    query: Option<&str>,
    k: usize,
) -> Result<()> {
    let service = QueryService::open(store_dir, [namespace])
        .await
        .with_context(|| format!("loading namespace '{namespace}'"))?;

    let hits = service.search(namespace, query, k)?;
    for hit in &hits {
        println!("{}", serde_json::to_string(hit)?);
    }
    Ok(())
}
