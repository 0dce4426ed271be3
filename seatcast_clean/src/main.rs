use clap::Parser;
use log::info;
use seatcast::clean::clean_records;
use seatcast::data::{load_raw_records, write_records};
use seatcast::stats;
use std::path::PathBuf;

/// Normalizes raw election rows into the canonical table: deduplicates,
/// collapses party-name variants, recomputes the winner flag and writes
/// the result. A one-shot batch step, not part of the live service.
#[derive(Debug, Parser)]
#[command(name = "seatcast-clean", version, about)]
struct Args {
    /// Raw CSV of election rows.
    #[arg(long)]
    input: PathBuf,

    /// Where to write the cleaned table.
    #[arg(long)]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let raw = load_raw_records(&args.input)?;
    info!("loaded {} raw rows from {}", raw.len(), args.input.display());

    let records = clean_records(raw)?;
    write_records(&args.output, &records)?;

    let parties = stats::list_parties(&records);
    let first_year = records.first().map(|r| r.year).unwrap_or(0);
    let last_year = records.last().map(|r| r.year).unwrap_or(0);
    info!(
        "wrote {} records to {} ({} parties: {}; years {}..{})",
        records.len(),
        args.output.display(),
        parties.len(),
        parties.join(", "),
        first_year,
        last_year
    );
    Ok(())
}
