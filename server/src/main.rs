use anyhow::{anyhow, Result};
use axum::Router;
use clap::Parser;
use pressdex_core::barrel::DEFAULT_BARREL_SIZE;
use pressdex_core::builder;
use pressdex_core::corpus::read_corpus;
use pressdex_core::persist::{index_exists, save_index, IndexPaths};
use pressdex_server::build_app;
use std::net::SocketAddr;
use std::path::Path;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Index directory path
    #[arg(long, env = "INDEX_DIR", default_value = "./index")]
    index: String,
    /// Corpus to build from when the index has not been built yet
    #[arg(long, env = "CORPUS_PATH")]
    corpus: Option<String>,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
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

    let app: Router = build_app(args.index.clone())?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
