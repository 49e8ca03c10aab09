//! Label generation entry point.

use std::sync::Arc;

use tracing::{debug, info};

use super::registry::StrategyRegistry;
use super::strategy::LabelJob;
use crate::context::{Context, DEFAULT_TYPE_KEY};
use crate::error::{ShipError, ShipResult};
use crate::model::{Label, LabelId, PackageId, ShipmentId};
use crate::store::ShipStore;

/// Generates and stores the labels of shipments.
pub struct LabelGenerator {
    store: Arc<dyn ShipStore>,
    registry: StrategyRegistry,
}

impl LabelGenerator {
    pub fn new(store: Arc<dyn ShipStore>, registry: StrategyRegistry) -> Self {
        Self { store, registry }
    }

    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    /// Run the shipment's label strategy without storing anything.
    ///
    /// Carrier strategies still register the shipment with the carrier and
    /// record its tracking reference.
    pub fn generate_shipping_labels(
        &self,
        ctx: &Context,
        shipment_id: ShipmentId,
        package_filter: Option<&[PackageId]>,
    ) -> ShipResult<Vec<Label>> {
        let shipment = self.store.shipment(shipment_id)?;
        let carrier = shipment
            .carrier_id
            .map(|id| self.store.carrier(id))
            .transpose()?;
        let strategy = self.registry.resolve(carrier.as_ref().map(|c| c.carrier_type));
        debug!(
            shipment = %shipment.name,
            strategy = strategy.name(),
            "Generating shipping labels"
        );

        let job = LabelJob {
            ctx,
            store: self.store.as_ref(),
            shipment: &shipment,
            carrier: carrier.as_ref(),
        };
        strategy.generate_shipping_labels(&job, package_filter)
    }

    /// Generate the labels of a shipment and store them as attachments.
    ///
    /// Fails with [`ShipError::LabelsAlreadyExist`] before contacting any
    /// carrier when the shipment already has labels.
    pub fn generate_labels(
        &self,
        ctx: &Context,
        shipment_id: ShipmentId,
        package_filter: Option<&[PackageId]>,
    ) -> ShipResult<Vec<LabelId>> {
        let existing = self.store.labels_of_shipment(shipment_id)?;
        if !existing.is_empty() {
            let shipment = self.store.shipment(shipment_id)?;
            return Err(ShipError::LabelsAlreadyExist {
                shipment: shipment.name,
            });
        }

        let labels = self.generate_shipping_labels(ctx, shipment_id, package_filter)?;

        // The caller's default_type targets its own records, not attachments.
        let attach_ctx = ctx.without(DEFAULT_TYPE_KEY);
        let ids = labels
            .iter()
            .map(|label| {
                self.store
                    .create_label_attachment(&attach_ctx, shipment_id, label)
                    .map_err(ShipError::from)
            })
            .collect::<ShipResult<Vec<_>>>()?;

        info!(shipment = %shipment_id, labels = ids.len(), "Labels stored");
        Ok(ids)
    }

    /// Label the whole shipment.
    pub fn action_generate_carrier_label(
        &self,
        ctx: &Context,
        shipment_id: ShipmentId,
    ) -> ShipResult<Vec<LabelId>> {
        self.generate_labels(ctx, shipment_id, None)
    }

    /// Delete every label of a shipment; returns how many were removed.
    pub fn delete_labels(&self, ctx: &Context, shipment_id: ShipmentId) -> ShipResult<usize> {
        let labels = self.store.labels_of_shipment(shipment_id)?;
        for label in &labels {
            self.store.delete_label_attachment(ctx, label.id)?;
        }
        if !labels.is_empty() {
            info!(shipment = %shipment_id, labels = labels.len(), "Labels deleted");
        }
        Ok(labels.len())
    }
}
