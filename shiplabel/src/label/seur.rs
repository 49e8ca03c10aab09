//! SEUR label strategy.

use std::sync::Arc;

use super::strategy::{
    address_block, carrier_labels, missing_warehouse_address, recipient, split_parcels, LabelJob,
    LabelStrategy,
};
use crate::carrier::{
    AccountCredentials, AddressBlock, CarrierClient, FormatOptions, ShipmentRequest,
};
use crate::error::{ShipError, ShipResult};
use crate::model::{Address, CarrierType, Dimensions, FileType, Label, PackageId};

fn seur_address_block(address: &Address, phone: Option<&String>) -> AddressBlock {
    address_block(address, phone, address.country().to_string(), String::new())
}

/// Label strategy for carriers of type [`CarrierType::Seur`].
///
/// SEUR labels are always PDF, one per parcel.
pub struct SeurLabelStrategy {
    client: Arc<dyn CarrierClient>,
    fallback_dimensions: Dimensions,
}

impl SeurLabelStrategy {
    pub fn new(client: Arc<dyn CarrierClient>) -> Self {
        Self {
            client,
            fallback_dimensions: Dimensions::default(),
        }
    }

    pub fn with_fallback_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.fallback_dimensions = dimensions;
        self
    }
}

impl LabelStrategy for SeurLabelStrategy {
    fn name(&self) -> &str {
        "seur"
    }

    fn generate_shipping_labels(
        &self,
        job: &LabelJob<'_>,
        _package_filter: Option<&[PackageId]>,
    ) -> ShipResult<Vec<Label>> {
        let shipment = job.shipment;
        let carrier = job.require_carrier()?;
        let config = carrier
            .seur_config
            .as_ref()
            .ok_or(ShipError::NoCarrierConfig {
                kind: "SEUR",
                carrier: carrier.id,
            })?;
        let sender = shipment
            .label_sender_address()
            .ok_or_else(|| missing_warehouse_address(shipment))?;
        let recipient = recipient(shipment)?;

        let dimensions = shipment.dimensions.unwrap_or(self.fallback_dimensions);
        let request = ShipmentRequest {
            carrier: CarrierType::Seur,
            account: AccountCredentials {
                username: config.username.clone(),
                password: config.password.clone(),
                account_number: format!("{}-{}", config.franchise_code, config.accounting_code),
                access_key: Some(config.integration_code.clone()),
                test_mode: config.is_test,
            },
            from_address: seur_address_block(sender, sender.phone.as_ref()),
            to_address: seur_address_block(
                recipient,
                recipient.mobile.as_ref().or(recipient.phone.as_ref()),
            ),
            packages: split_parcels(shipment, &config.product_code, dimensions),
            service_level: config.service_code.clone(),
            format: FormatOptions {
                file_format: FileType::Pdf,
                description: None,
                dimensions_unit: "CM".to_string(),
                weight_unit: "KG".to_string(),
            },
        };

        let created = self
            .client
            .create_shipment(&request)
            .map_err(|e| ShipError::Carrier {
                carrier: "SEUR",
                message: e.to_string(),
            })?;

        carrier_labels(job, "SEUR", created, FileType::Pdf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carrier::{CarrierError, MockCarrierClient};
    use crate::context::Context;
    use crate::model::{Carrier, CarrierId, SeurConfig, Shipment, ShipmentId, Warehouse};
    use crate::store::{InMemoryStore, ShipStore};

    fn seur_carrier() -> Carrier {
        Carrier::new(CarrierId(2), "SEUR 24", CarrierType::Seur).with_seur_config(SeurConfig {
            username: "user".to_string(),
            password: "secret".to_string(),
            vat: "B00000000".to_string(),
            franchise_code: "35".to_string(),
            accounting_code: "12345".to_string(),
            integration_code: "INT".to_string(),
            service_code: "031".to_string(),
            product_code: "002".to_string(),
            is_test: true,
        })
    }

    fn shipment() -> Shipment {
        Shipment::new(ShipmentId(3), "OUT/0003")
            .with_partner(
                Address::new("Juan")
                    .with_street("Calle Triana 2")
                    .with_city("Las Palmas")
                    .with_zip("35002")
                    .with_country("ES"),
            )
            .with_warehouse(Warehouse::new(
                "WH",
                Some(Address::new("Warehouse").with_country("ES").with_zip("28001")),
            ))
            .with_packages(2)
            .with_weight(5.0)
    }

    fn run(
        client: Arc<MockCarrierClient>,
        shipment: Shipment,
    ) -> (ShipResult<Vec<Label>>, InMemoryStore) {
        let store = InMemoryStore::new();
        store.insert_shipment(shipment.clone());
        let ctx = Context::new(1);
        let carrier = seur_carrier();
        let job = LabelJob {
            ctx: &ctx,
            store: &store,
            shipment: &shipment,
            carrier: Some(&carrier),
        };
        let result = SeurLabelStrategy::new(client).generate_shipping_labels(&job, None);
        (result, store)
    }

    #[test]
    fn test_request_uses_seur_codes() {
        let client = Arc::new(MockCarrierClient::returning("SEUR1", vec![vec![1], vec![2]]));
        let (result, _) = run(client.clone(), shipment());
        result.unwrap();

        let request = client.last_request().unwrap();
        assert_eq!(request.carrier, CarrierType::Seur);
        assert_eq!(request.service_level, "031");
        assert_eq!(request.account.account_number, "35-12345");
        assert!(request.account.test_mode);
        assert_eq!(request.packages.len(), 2);
        assert_eq!(request.packages[0].packaging_type, "002");
        assert_eq!(request.packages[0].weight, 2.5);
        // No Canary Islands override outside UPS.
        assert_eq!(request.to_address.country, "ES");
    }

    #[test]
    fn test_sender_prefers_company_address() {
        let client = Arc::new(MockCarrierClient::returning("SEUR1", vec![]));
        let mut ship = shipment();
        ship.company_address = Some(Address::new("Brand Shop"));
        let (result, _) = run(client.clone(), ship);
        result.unwrap();

        assert_eq!(client.last_request().unwrap().from_address.name, "Brand Shop");
    }

    #[test]
    fn test_labels_are_pdf_and_tracking_written() {
        let client = Arc::new(MockCarrierClient::returning("SEUR1", vec![vec![1], vec![2]]));
        let (result, store) = run(client, shipment());
        let labels = result.unwrap();

        assert_eq!(labels[1].name, "SEUR1_2.pdf");
        assert!(labels.iter().all(|l| l.file_type == FileType::Pdf));
        assert_eq!(
            store.shipment(ShipmentId(3)).unwrap().carrier_tracking_ref.as_deref(),
            Some("SEUR1")
        );
    }

    #[test]
    fn test_error_is_wrapped() {
        let client = Arc::new(MockCarrierClient::failing(CarrierError::Http(
            "timed out".to_string(),
        )));
        let (result, _) = run(client, shipment());
        assert_eq!(result.unwrap_err().to_string(), "SEUR Error: timed out");
    }
}
