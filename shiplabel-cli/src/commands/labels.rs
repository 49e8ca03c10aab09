//! Label commands.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Subcommand;
use shiplabel::config::ConfigFile;
use shiplabel::context::Context;
use shiplabel::label::{LabelGenerator, StrategyRegistry};
use shiplabel::model::{LabelId, PackageId, ShipmentId};
use shiplabel::store::{InMemoryStore, ShipStore};
use shiplabel::ShipError;

use super::common::{open_store, save_store};
use crate::error::CliError;

/// Label subcommands.
#[derive(Debug, Subcommand)]
pub enum LabelCommands {
    /// Generate and store the labels of a shipment
    Generate {
        /// Shipment id
        shipment: u64,

        /// Only label these packages (repeatable)
        #[arg(long = "package")]
        packages: Vec<u64>,
    },

    /// List the labels stored for a shipment
    List {
        /// Shipment id
        shipment: u64,
    },

    /// Delete the labels of a shipment so they can be generated again
    Delete {
        /// Shipment id
        shipment: u64,
    },

    /// Write the stored labels of a shipment to a directory
    Export {
        /// Shipment id
        shipment: u64,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
}

/// Run a label subcommand.
pub fn run(
    command: LabelCommands,
    snapshot: &Path,
    config: &ConfigFile,
    ctx: &Context,
) -> Result<(), CliError> {
    let store = Arc::new(open_store(snapshot)?);

    match command {
        LabelCommands::Generate { shipment, packages } => {
            let registry = StrategyRegistry::from_config(config)
                .map_err(|e| CliError::Config(format!("cannot set up carrier gateway: {}", e)))?;
            let generator = LabelGenerator::new(store.clone(), registry);
            let filter: Vec<PackageId> = packages.into_iter().map(PackageId).collect();
            let filter = (!filter.is_empty()).then_some(filter.as_slice());

            let ids = generator.generate_labels(ctx, ShipmentId(shipment), filter)?;
            save_store(&store, snapshot)?;
            println!("Generated {} label(s) for shipment {}", ids.len(), shipment);
        }
        LabelCommands::List { shipment } => {
            let labels = labels_of(&store, shipment)?;
            if labels.is_empty() {
                println!("No labels for shipment {}", shipment);
            }
            for label in labels {
                let package = label.package_id.map(|p| p.to_string()).unwrap_or_default();
                println!(
                    "{:>5}  {:<30} {:<4} {:>8} bytes  {}",
                    label.id,
                    label.name,
                    label.file_type,
                    label.data.len(),
                    package
                );
            }
        }
        LabelCommands::Delete { shipment } => {
            let generator = LabelGenerator::new(store.clone(), StrategyRegistry::new());
            let removed = generator.delete_labels(ctx, ShipmentId(shipment))?;
            save_store(&store, snapshot)?;
            println!("Deleted {} label(s) of shipment {}", removed, shipment);
        }
        LabelCommands::Export { shipment, output } => {
            std::fs::create_dir_all(&output)
                .map_err(|e| CliError::Export(format!("{}: {}", output.display(), e)))?;
            let labels = labels_of(&store, shipment)?;
            for label in &labels {
                let path = output.join(export_file_name(label.id, &label.name));
                std::fs::write(&path, &label.data)
                    .map_err(|e| CliError::Export(format!("{}: {}", path.display(), e)))?;
                println!("{}", path.display());
            }
        }
    }

    Ok(())
}

/// File name for an exported label: the attachment id keeps copies of the
/// same label apart, and path separators in the label name are flattened so
/// every file lands directly in the output directory.
fn export_file_name(id: LabelId, name: &str) -> String {
    let flat: String = name
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{}_{}", id, flat)
}

fn labels_of(
    store: &InMemoryStore,
    shipment: u64,
) -> Result<Vec<shiplabel::model::LabelAttachment>, CliError> {
    store
        .labels_of_shipment(ShipmentId(shipment))
        .map_err(|e| CliError::Ship(ShipError::from(e)))
}
