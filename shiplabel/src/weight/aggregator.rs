//! Weight aggregation over the package tree.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use super::report::WeightReport;
use crate::context::Context;
use crate::error::{ShipError, ShipResult};
use crate::model::{Item, PackageId, ShipmentId};
use crate::store::ShipStore;

/// Traversal step of the post-order walk.
enum Visit {
    Enter(PackageId),
    Exit(PackageId, Vec<PackageId>),
}

/// Computes package weights and writes them back to the store.
///
/// The package hierarchy is expected to be a tree. A package reached again
/// through its own descendants is reported as [`ShipError::PackageCycle`]
/// instead of looping.
pub struct WeightAggregator<'a, S: ShipStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: ShipStore + ?Sized> WeightAggregator<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Weigh a set of items and store each item's effective weight.
    ///
    /// Items without a product are skipped. An item whose unit weight
    /// cannot be resolved, or whose unit of measure is neither mass nor
    /// count, makes the report partial.
    pub fn weigh_items(&self, ctx: &Context, items: &[Item]) -> ShipResult<WeightReport> {
        let mut report = WeightReport::default();

        for item in items {
            let Some(product) = item.product.as_ref() else {
                continue;
            };
            let mut computable = true;

            if !product.has_weighable_uom() {
                warn!(
                    item = %item.id,
                    product = %product.name,
                    uom = %product.uom,
                    "Type conversion not implemented for product unit of measure"
                );
                computable = false;
            }

            let unit_weight = product.unit_weight().unwrap_or_else(|| {
                warn!(item = %item.id, product = %product.name, "No weight declared for product");
                computable = false;
                0.0
            });

            let weight = unit_weight * item.quantity;
            self.store.write_item_weight(ctx, item.id, weight)?;

            report.absorb(WeightReport {
                weight,
                fully_computable: computable,
            });
        }

        Ok(report)
    }

    /// Compute the weight of a package and of every package nested in it.
    ///
    /// Children are weighed before their parent and every visited package
    /// gets its weight written back. The traversal uses an explicit stack,
    /// so nesting depth is not limited by the call stack.
    pub fn compute_weight(&self, ctx: &Context, package_id: PackageId) -> ShipResult<WeightReport> {
        let mut weighed: HashMap<PackageId, WeightReport> = HashMap::new();
        let mut on_path: HashSet<PackageId> = HashSet::new();
        let mut stack = vec![Visit::Enter(package_id)];

        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Enter(id) => {
                    if !on_path.insert(id) {
                        return Err(ShipError::PackageCycle { package: id });
                    }
                    let children = self.store.children_of_package(id)?;
                    stack.push(Visit::Exit(id, children.clone()));
                    stack.extend(children.into_iter().rev().map(Visit::Enter));
                }
                Visit::Exit(id, children) => {
                    on_path.remove(&id);
                    let package = self.store.package(id)?;

                    // Items are queried rather than read from a cached
                    // relation; links created in this operation must count.
                    let items = self.store.items_of_package(id)?;
                    let mut report = self.weigh_items(ctx, &items)?;

                    for child in &children {
                        if let Some(child_report) = weighed.remove(child) {
                            report.absorb(child_report);
                        }
                    }
                    report.weight += package.enclosure_weight();

                    self.store.write_package_weight(ctx, id, report.weight)?;
                    debug!(
                        package = %id,
                        weight = report.weight,
                        fully_computable = report.fully_computable,
                        items = items.len(),
                        children = children.len(),
                        "Package weighed"
                    );
                    weighed.insert(id, report);
                }
            }
        }

        Ok(weighed.remove(&package_id).unwrap_or_default())
    }

    /// Weigh several packages; the report holds the sum of their weights.
    pub fn compute_weights(&self, ctx: &Context, packages: &[PackageId]) -> ShipResult<WeightReport> {
        packages
            .iter()
            .map(|id| self.compute_weight(ctx, *id))
            .sum::<ShipResult<WeightReport>>()
    }

    /// Weigh every package a shipment moves items into.
    ///
    /// Each item contributes its result package, or its source package when
    /// the package is moved as a whole. Every package is weighed once.
    pub fn set_pack_weights(
        &self,
        ctx: &Context,
        shipment: ShipmentId,
    ) -> ShipResult<Vec<(PackageId, WeightReport)>> {
        let mut seen = HashSet::new();
        let mut results = Vec::new();

        for item in self.store.items_of_shipment(shipment)? {
            let Some(package) = item.destination_package() else {
                continue;
            };
            if !seen.insert(package) {
                continue;
            }
            let report = self.compute_weight(ctx, package)?;
            results.push((package, report));
        }

        debug!(shipment = %shipment, packages = results.len(), "Shipment packages weighed");
        Ok(results)
    }
}
