use anyhow::Result;
use clap::{Parser, Subcommand};
use pressdex_core::barrel::DEFAULT_BARREL_SIZE;
use pressdex_core::builder;
use pressdex_core::corpus::read_corpus;
use pressdex_core::persist::{save_index, IndexPaths};
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "pressdex-indexer")]
#[command(about = "Build the article search index from a CSV corpus", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index from a CSV file or a directory of CSV files
    Build {
        /// Corpus path
        #[arg(long, env = "CORPUS_PATH")]
        input: String,
        /// Output index directory
        #[arg(long, env = "INDEX_DIR", default_value = "./index")]
        output: String,
        /// Maximum term entries per barrel file
        #[arg(long, default_value_t = DEFAULT_BARREL_SIZE)]
        barrel_size: usize,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output, barrel_size } => build(&input, &output, barrel_size),
    }
}

fn build(input: &str, output: &str, barrel_size: usize) -> Result<()> {
    let docs = read_corpus(Path::new(input))?;
    tracing::info!(num_docs = docs.len(), input, "corpus read");

    let index = builder::build(docs);

    let paths = IndexPaths::new(output);
    save_index(&paths, &index, barrel_size)?;
    tracing::info!(output, "index build complete");
    Ok(())
}
