//! UPS label strategy.
//!
//! Creates one UPS shipment per delivery order. UPS answers with a
//! tracking number and one label per parcel; the package filter of the
//! generic flow does not apply.

use std::sync::Arc;

use super::strategy::{
    address_block, carrier_labels, missing_warehouse_address, recipient, split_parcels, LabelJob,
    LabelStrategy,
};
use crate::carrier::{
    AccountCredentials, AddressBlock, CarrierClient, FormatOptions, ShipmentRequest,
};
use crate::error::{ShipError, ShipResult};
use crate::model::{Address, CarrierType, Dimensions, Label, PackageId, Shipment, UpsConfig};

/// UPS packaging code for "customer supplied package".
const CUSTOMER_PACKAGING: &str = "02";

/// Countries whose addresses carry a state/province code for UPS.
const STATE_CODE_COUNTRIES: &[&str] = &["US", "CA"];

/// Country code UPS expects for an address.
///
/// The Canary Islands (Spanish postal codes starting with `35`) are a
/// separate customs territory for UPS and use `IC`.
pub fn ups_country_code(address: &Address) -> String {
    let country = address.country();
    if country == "ES" && address.postal_code().starts_with("35") {
        "IC".to_string()
    } else {
        country.to_string()
    }
}

/// State code UPS expects: only set for the countries that use one.
pub fn ups_state_code(address: &Address) -> String {
    if STATE_CODE_COUNTRIES.contains(&address.country()) {
        address.state_code.clone().unwrap_or_default()
    } else {
        String::new()
    }
}

fn ups_address_block(address: &Address, phone: Option<&String>) -> AddressBlock {
    address_block(address, phone, ups_country_code(address), ups_state_code(address))
}

/// Label strategy for carriers of type [`CarrierType::Ups`].
pub struct UpsLabelStrategy {
    client: Arc<dyn CarrierClient>,
    fallback_dimensions: Dimensions,
}

impl UpsLabelStrategy {
    pub fn new(client: Arc<dyn CarrierClient>) -> Self {
        Self {
            client,
            fallback_dimensions: Dimensions::default(),
        }
    }

    /// Dimensions announced for shipments that declare none.
    pub fn with_fallback_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.fallback_dimensions = dimensions;
        self
    }

    fn build_request(
        &self,
        config: &UpsConfig,
        sender: &Address,
        recipient: &Address,
        shipment: &Shipment,
    ) -> ShipmentRequest {
        let dimensions = shipment.dimensions.unwrap_or(self.fallback_dimensions);

        ShipmentRequest {
            carrier: CarrierType::Ups,
            account: AccountCredentials {
                username: config.username.clone(),
                password: config.password.clone(),
                account_number: config.shipper_number.clone(),
                access_key: Some(config.access_license.clone()),
                test_mode: config.is_test,
            },
            from_address: ups_address_block(sender, sender.phone.as_ref()),
            to_address: ups_address_block(
                recipient,
                recipient.mobile.as_ref().or(recipient.phone.as_ref()),
            ),
            packages: split_parcels(shipment, CUSTOMER_PACKAGING, dimensions),
            service_level: shipment.ups.service_type.key().to_string(),
            format: FormatOptions {
                file_format: config.label_file_format,
                description: shipment.ups.description(),
                dimensions_unit: config.dimension_uom.clone(),
                weight_unit: config.weight_uom.clone(),
            },
        }
    }
}

impl LabelStrategy for UpsLabelStrategy {
    fn name(&self) -> &str {
        "ups"
    }

    fn generate_shipping_labels(
        &self,
        job: &LabelJob<'_>,
        _package_filter: Option<&[PackageId]>,
    ) -> ShipResult<Vec<Label>> {
        let shipment = job.shipment;
        let carrier = job.require_carrier()?;
        let config = carrier
            .ups_config
            .as_ref()
            .ok_or(ShipError::NoCarrierConfig {
                kind: "UPS",
                carrier: carrier.id,
            })?;
        let sender = shipment
            .warehouse_address()
            .ok_or_else(|| missing_warehouse_address(shipment))?;
        let recipient = recipient(shipment)?;

        let request = self.build_request(config, sender, recipient, shipment);
        let created = self
            .client
            .create_shipment(&request)
            .map_err(|e| ShipError::Carrier {
                carrier: "UPS",
                message: e.to_string(),
            })?;

        carrier_labels(job, "UPS", created, config.label_file_format)
    }
}
