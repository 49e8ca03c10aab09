//! Package weighing commands.

use std::path::Path;

use clap::Subcommand;
use shiplabel::context::Context;
use shiplabel::model::{PackageId, ShipmentId};
use shiplabel::store::ShipStore;
use shiplabel::weight::{WeightAggregator, WeightReport};

use super::common::{open_store, save_store};
use crate::error::CliError;

/// Weigh subcommands.
#[derive(Debug, Subcommand)]
pub enum WeighCommands {
    /// Weigh packages and everything nested in them
    Package {
        /// Package ids
        #[arg(required = true)]
        ids: Vec<u64>,
    },

    /// Weigh every package moved by a shipment
    Shipment {
        /// Shipment id
        id: u64,
    },
}

/// Run a weigh subcommand and write the weights back to the snapshot.
pub fn run(command: WeighCommands, snapshot: &Path, ctx: &Context) -> Result<(), CliError> {
    let store = open_store(snapshot)?;
    let aggregator = WeightAggregator::new(&store);

    match command {
        WeighCommands::Package { ids } => {
            for id in ids.into_iter().map(PackageId) {
                let report = aggregator.compute_weight(ctx, id)?;
                print_report(&store, id, &report)?;
            }
        }
        WeighCommands::Shipment { id } => {
            let reports = aggregator.set_pack_weights(ctx, ShipmentId(id))?;
            if reports.is_empty() {
                println!("Shipment {} moves no packages", id);
            }
            for (package_id, report) in &reports {
                print_report(&store, *package_id, report)?;
            }
        }
    }

    save_store(&store, snapshot)
}

fn print_report(store: &dyn ShipStore, id: PackageId, report: &WeightReport) -> Result<(), CliError> {
    let package = store.package(id).map_err(shiplabel::ShipError::from)?;
    println!("{:<30} {}", package.name, report);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiplabel::model::{Item, ItemId, LogisticUnit, Package, Product};
    use shiplabel::store::InMemoryStore;
    use tempfile::TempDir;

    #[test]
    fn test_weigh_package_updates_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        let store = InMemoryStore::new();
        store.insert_package(
            Package::new(PackageId(1), "PACK1").with_logistic_unit(LogisticUnit::new("Box", 0.5)),
        );
        store.insert_item(Item::new(ItemId(1), Product::new("A", 2.0), 3.0).into_package(PackageId(1)));
        save_store(&store, &path).unwrap();

        run(WeighCommands::Package { ids: vec![1] }, &path, &Context::new(1)).unwrap();

        let reopened = open_store(&path).unwrap();
        assert_eq!(reopened.package(PackageId(1)).unwrap().weight, 6.5);
    }

    #[test]
    fn test_weigh_unknown_package_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        save_store(&InMemoryStore::new(), &path).unwrap();

        let err = run(WeighCommands::Package { ids: vec![42] }, &path, &Context::new(1)).unwrap_err();
        assert_eq!(err.to_string(), "package 42 not found");
    }
}
