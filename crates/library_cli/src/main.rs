//! Catalog probe.
//!
//! # Responsibility
//! - Open the configured database and load every collection once.
//! - Print per-kind counts, one kind's rows, or the whole snapshot as JSON.

use clap::Parser;
use library_core::{
    init_logging, Catalog, DbConfig, EntityKind, LogConfig, SqliteDataAccess,
};
use log::info;
use std::error::Error;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "library", version, about = "Inspect the library catalog database")]
struct Args {
    /// Print the row summaries of one kind, by position (0 = Authors ... 8 = Issued Books).
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..9))]
    kind: Option<u8>,

    /// Print the full snapshot as JSON.
    #[arg(long, conflicts_with = "kind")]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    init_logging(&LogConfig::from_env()?)?;
    let access = SqliteDataAccess::open(DbConfig::from_env()?)?;
    info!(
        "event=cli_start module=cli status=ok db_path={} core_version={}",
        access.config().path.display(),
        library_core::core_version()
    );

    let catalog = Catalog::load(Arc::new(access)).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(catalog.snapshot())?);
        return Ok(());
    }

    match args.kind.and_then(|index| EntityKind::from_index(usize::from(index))) {
        Some(kind) => print_rows(&catalog, kind),
        None => {
            for kind in EntityKind::ALL {
                println!("{}: {}", kind.label(), catalog.count(kind));
            }
        }
    }
    Ok(())
}

fn print_rows(catalog: &Catalog, kind: EntityKind) {
    println!("{kind}");
    for (position, row) in catalog.row_summaries(kind).into_iter().enumerate() {
        if row.detail.is_empty() {
            println!("{position:>4}  {}", row.title);
        } else {
            println!("{position:>4}  {}\n      {}", row.title, row.detail);
        }
    }
}
