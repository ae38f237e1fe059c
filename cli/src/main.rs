use anyhow::{anyhow, Result};
use clap::Parser;
use pressdex_core::barrel::DEFAULT_BARREL_SIZE;
use pressdex_core::builder;
use pressdex_core::corpus::read_corpus;
use pressdex_core::persist::{index_exists, load_index, save_index, IndexPaths};
use pressdex_core::search::{search, Bm25Params};
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "pressdex")]
#[command(about = "Interactive article search prompt", long_about = None)]
struct Args {
    /// Index directory path
    #[arg(long, env = "INDEX_DIR", default_value = "./index")]
    index: String,
    /// Corpus to build from when the index has not been built yet
    #[arg(long, env = "CORPUS_PATH")]
    corpus: Option<String>,
    /// BM25 term-frequency saturation
    #[arg(long, default_value_t = 1.5)]
    k1: f32,
    /// BM25 length normalization
    #[arg(long, default_value_t = 0.75)]
    b: f32,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let paths = IndexPaths::new(&args.index);
    if !index_exists(&paths) {
        let corpus = args
            .corpus
            .as_deref()
            .ok_or_else(|| anyhow!("no index at {} and no --corpus to build one from", args.index))?;
        tracing::info!(index = %args.index, corpus, "index not found, building");
        let docs = read_corpus(Path::new(corpus))?;
        save_index(&paths, &builder::build(docs), DEFAULT_BARREL_SIZE)?;
    }
    let index = load_index(&paths)?;

    let params = Bm25Params { k1: args.k1, b: args.b };
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();
    loop {
        print!("query> ");
        stdout.flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let query = line.trim();
        if query.is_empty() {
            println!("query cannot be empty");
            continue;
        }

        let hits = search(query, &index, &params);
        if hits.is_empty() {
            println!("no matching documents");
            continue;
        }
        for (rank, hit) in hits.iter().enumerate() {
            let doc = &hit.document;
            let score = if hit.score.is_nan() {
                "n/a".to_string()
            } else {
                format!("{:.4}", hit.score)
            };
            println!(
                "{:>3}. [{}] {} ({}) {}",
                rank + 1,
                score,
                doc.title,
                doc.source_name,
                doc.url
            );
        }
    }
    Ok(())
}
