//! Shipment create/update with carrier defaults.

use std::collections::HashSet;

use tracing::debug;

use super::options::{change_options, select_carrier};
use super::values::ShipmentValues;
use crate::context::Context;
use crate::error::ShipResult;
use crate::model::{Carrier, Package, Shipment, ShipmentId};
use crate::store::ShipStore;

/// Creates and updates shipments through the store.
pub struct ShipmentService<'a, S: ShipStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: ShipStore + ?Sized> ShipmentService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Create a shipment.
    ///
    /// When the values select a carrier but carry no (or an empty) option
    /// set, the carrier's default options are applied. An explicit set must
    /// keep every mandatory option of the carrier.
    pub fn create(&self, ctx: &Context, values: &ShipmentValues) -> ShipResult<ShipmentId> {
        let mut shipment = Shipment::default();
        values.apply_fields(&mut shipment);

        let carrier = match values.carrier_id {
            Some(Some(carrier_id)) => {
                let carrier = self.store.carrier(carrier_id)?;
                select_carrier(&mut shipment, Some(&carrier));
                Some(carrier)
            }
            _ => None,
        };
        if let Some(options) = values.explicit_options() {
            change_options(&mut shipment, carrier.as_ref(), options.clone())?;
        }

        let id = self.store.create_shipment(ctx, shipment)?;
        debug!(shipment = %id, options = ?values.option_ids, "Shipment created");
        Ok(id)
    }

    /// Update a shipment and return it as stored.
    ///
    /// Changing the carrier without an option set, or with an empty one,
    /// re-applies the new carrier's defaults. An explicit option set must
    /// keep every mandatory option of the resulting carrier; otherwise
    /// nothing is written.
    pub fn update(
        &self,
        ctx: &Context,
        id: ShipmentId,
        values: &ShipmentValues,
    ) -> ShipResult<Shipment> {
        let mut shipment = self.store.shipment(id)?;
        values.apply_fields(&mut shipment);

        let carrier = match values.carrier_id {
            Some(Some(carrier_id)) => {
                let carrier = self.store.carrier(carrier_id)?;
                select_carrier(&mut shipment, Some(&carrier));
                Some(carrier)
            }
            Some(None) => {
                select_carrier(&mut shipment, None);
                None
            }
            None => self.current_carrier(&shipment)?,
        };

        if let Some(options) = values.explicit_options() {
            change_options(&mut shipment, carrier.as_ref(), options.clone())?;
        }

        self.store.write_shipment(ctx, &shipment)?;
        debug!(shipment = %id, options = ?shipment.option_ids, "Shipment updated");
        Ok(shipment)
    }

    /// Packages moved by a shipment: the result package of each item, or
    /// its source package when it has none. Each package appears once.
    pub fn packages_of_shipment(&self, id: ShipmentId) -> ShipResult<Vec<Package>> {
        let mut seen = HashSet::new();
        let mut packages = Vec::new();
        for item in self.store.items_of_shipment(id)? {
            if let Some(package_id) = item.destination_package() {
                if seen.insert(package_id) {
                    packages.push(self.store.package(package_id)?);
                }
            }
        }
        Ok(packages)
    }

    fn current_carrier(&self, shipment: &Shipment) -> ShipResult<Option<Carrier>> {
        Ok(shipment
            .carrier_id
            .map(|id| self.store.carrier(id))
            .transpose()?)
    }
}
