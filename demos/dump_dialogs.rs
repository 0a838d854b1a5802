//! Dump dialogs into a snapshot
//!
//! Reads credentials from the environment (or a `.env` file), exports the
//! dialogs given on the command line and optionally lists the participants
//! of the first one.
//!
//! ```text
//! RUST_LOG=info cargo run --example dump_dialogs -- rustaceans rust_berlin
//! ```

use telegram_datasets::tables::MessageRow;
use telegram_datasets::{Config, Dataset, DatasetExporter, Event, Table};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let dialogs: Vec<String> = std::env::args().skip(1).collect();
    if dialogs.is_empty() {
        eprintln!("usage: dump_dialogs <dialog>...");
        return Ok(());
    }

    let config = Config::from_env()?;
    let exporter = DatasetExporter::from_config(&config)?;

    let mut events = exporter.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                Event::DialogFetched { dialog, records } => {
                    println!("fetched {records} records from {dialog}");
                }
                Event::EntityNotFound { kind, id } => {
                    println!("skipped {kind} {id}: not found");
                }
                Event::DatasetSaved { path, .. } => {
                    println!("saved snapshot to {}", path.display());
                }
                _ => {}
            }
        }
    });

    exporter.save_dataset_to_disk(&dialogs).await?;

    let messages: Table<MessageRow> = exporter.store().load_latest(Dataset::Messages)?;
    println!("{} messages in latest snapshot", messages.len());

    if std::env::var("DUMP_PARTICIPANTS").is_ok() {
        let path = exporter.save_participants(&dialogs[0]).await?;
        println!("participants written to {}", path.display());
    }

    Ok(())
}
