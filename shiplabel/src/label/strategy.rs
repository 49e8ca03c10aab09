//! Label strategy trait and the default strategy.

use tracing::info;

use crate::carrier::{AddressBlock, CarrierShipment, ParcelSpec};
use crate::context::Context;
use crate::error::{ShipError, ShipResult};
use crate::model::{Address, Carrier, Dimensions, FileType, Label, PackageId, Shipment};
use crate::store::ShipStore;

/// Everything a strategy may need to label one shipment.
pub struct LabelJob<'a> {
    pub ctx: &'a Context,
    pub store: &'a dyn ShipStore,
    pub shipment: &'a Shipment,
    /// The shipment's carrier, when one is selected.
    pub carrier: Option<&'a Carrier>,
}

impl<'a> LabelJob<'a> {
    /// The selected carrier, or [`ShipError::NoCarrier`].
    pub fn require_carrier(&self) -> ShipResult<&'a Carrier> {
        self.carrier.ok_or_else(|| ShipError::NoCarrier {
            shipment: self.shipment.name.clone(),
        })
    }
}

/// Produces the labels of a shipment.
///
/// `package_filter` restricts labelling to the given packages; `None`
/// means the whole shipment.
pub trait LabelStrategy: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// One label for the shipment.
    ///
    /// Fails with [`ShipError::NoLabelConfigured`] unless overridden.
    fn generate_default_label(
        &self,
        job: &LabelJob<'_>,
        package_filter: Option<&[PackageId]>,
    ) -> ShipResult<Label> {
        let _ = (job, package_filter);
        Err(ShipError::NoLabelConfigured)
    }

    /// All labels for the shipment.
    ///
    /// Without a filter this is the default label alone; with one, a copy
    /// of the default label per requested package.
    fn generate_shipping_labels(
        &self,
        job: &LabelJob<'_>,
        package_filter: Option<&[PackageId]>,
    ) -> ShipResult<Vec<Label>> {
        let default_label = self.generate_default_label(job, package_filter)?;
        Ok(replicate_per_package(default_label, package_filter))
    }
}

/// Copy `label` once per package of the filter, tagging each copy with its
/// package. An absent or empty filter yields the label itself.
pub fn replicate_per_package(label: Label, package_filter: Option<&[PackageId]>) -> Vec<Label> {
    match package_filter {
        Some(packages) if !packages.is_empty() => {
            packages.iter().map(|id| label.for_package(*id)).collect()
        }
        _ => vec![label],
    }
}

/// Split the shipment weight evenly over its parcels.
pub(crate) fn split_parcels(
    shipment: &Shipment,
    packaging_type: &str,
    dimensions: Dimensions,
) -> Vec<ParcelSpec> {
    let count = shipment.parcel_count();
    let weight = shipment.declared_weight() / f64::from(count);
    (0..count)
        .map(|_| ParcelSpec {
            packaging_type: packaging_type.to_string(),
            dimensions,
            weight,
        })
        .collect()
}

/// Error for a shipment whose warehouse has no address.
pub(crate) fn missing_warehouse_address(shipment: &Shipment) -> ShipError {
    ShipError::MissingWarehouseAddress {
        warehouse: shipment
            .warehouse
            .as_ref()
            .map(|w| w.name.clone())
            .unwrap_or_default(),
    }
}

/// The shipment's delivery address, or [`ShipError::MissingRecipient`].
pub(crate) fn recipient(shipment: &Shipment) -> ShipResult<&Address> {
    shipment
        .partner
        .as_ref()
        .ok_or_else(|| ShipError::MissingRecipient {
            shipment: shipment.name.clone(),
        })
}

/// Carrier address block; `country` and `state` are already in the
/// carrier's coding.
pub(crate) fn address_block(
    address: &Address,
    phone: Option<&String>,
    country: String,
    state: String,
) -> AddressBlock {
    AddressBlock {
        name: address.name.clone(),
        address1: address.street.clone().unwrap_or_default(),
        address2: address.street2.clone().unwrap_or_default(),
        city: address.city.clone().unwrap_or_default(),
        country,
        state,
        postal_code: address.postal_code().to_string(),
        phone: phone.cloned().unwrap_or_default(),
        email: address.email.clone().unwrap_or_default(),
    }
}

/// Turn a carrier's answer into labels named `<tracking>_<n>.<ext>` and
/// record the tracking number on the shipment.
pub(crate) fn carrier_labels(
    job: &LabelJob<'_>,
    carrier: &'static str,
    created: CarrierShipment,
    format: FileType,
) -> ShipResult<Vec<Label>> {
    let CarrierShipment {
        tracking_number,
        labels,
    } = created;
    let labels = labels
        .into_iter()
        .enumerate()
        .map(|(i, content)| {
            let name = format!("{}_{}.{}", tracking_number, i + 1, format.key());
            Label::new(name, content, format)
        })
        .collect::<Vec<_>>();

    job.store
        .set_tracking_ref(job.ctx, job.shipment.id, &tracking_number)?;
    info!(
        shipment = %job.shipment.name,
        carrier,
        tracking = %tracking_number,
        labels = labels.len(),
        "Carrier shipment created"
    );
    Ok(labels)
}

/// Strategy used for carriers without an integration.
#[derive(Debug, Default)]
pub struct DefaultLabelStrategy;

impl LabelStrategy for DefaultLabelStrategy {
    fn name(&self) -> &str {
        "default"
    }
}
