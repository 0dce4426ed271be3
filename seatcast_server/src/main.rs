mod error;
mod handlers;
mod pages;
mod state;

use axum::routing::{get, post};
use clap::Parser;
use log::info;
use seatcast::data::{load_data, CsvLoader};
use seatcast::ModelKind;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use crate::state::AppState;

/// Serves seat predictions and party statistics over HTTP.
#[derive(Debug, Parser)]
#[command(name = "seatcast-server", version, about)]
struct Args {
    /// Path to the cleaned election table.
    #[arg(long, default_value = "data/clean_election.csv")]
    data: PathBuf,

    /// Classifier family fitted at startup: 'logistic' or 'forest'.
    #[arg(long, default_value = "forest")]
    model: ModelKind,

    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    #[arg(long, env = "PORT", default_value_t = 5000)]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let records = load_data::<CsvLoader, _>(&args.data)?;
    info!("loaded {} records from {}", records.len(), args.data.display());

    // Everything the handlers read is built here, once; requests share it
    // immutably for the life of the process.
    let state = Arc::new(AppState::build(records, args.model)?);
    info!(
        "model ready: {:?}, accuracy {:.2}%, {} parties",
        state.model.kind(),
        state.model.accuracy() * 100.0,
        state.model.encoder().classes().len()
    );

    let app = axum::Router::new()
        .route("/", get(pages::index))
        .route("/parties", get(pages::parties_page))
        .route("/party/:name", get(pages::party_page))
        .route("/about", get(pages::about))
        .route("/api/parties", get(handlers::api_parties))
        .route("/api/party/:name", get(handlers::api_party))
        .route("/predict", post(handlers::predict))
        .route("/api/stats", get(handlers::api_stats))
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
