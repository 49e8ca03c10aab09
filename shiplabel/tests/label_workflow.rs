//! Integration tests for shipment setup and label generation.
//!
//! These tests drive the public API end to end:
//! - carrier selection and default options through `ShipmentService`
//! - label dispatch through `LabelGenerator` and the strategy registry
//! - label persistence in `InMemoryStore`
//!
//! Run with: `cargo test --test label_workflow`

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use shiplabel::carrier::{CarrierClient, CarrierError, CarrierShipment, ShipmentRequest};
use shiplabel::context::{Context, DEFAULT_TYPE_KEY};
use shiplabel::label::{
    LabelGenerator, LabelJob, LabelStrategy, SeurLabelStrategy, StrategyRegistry,
    UpsLabelStrategy,
};
use shiplabel::model::{
    Address, AttachmentType, Carrier, CarrierId, CarrierOption, CarrierType, FileType, Label,
    OptionId, PackageId, UpsConfig, Warehouse,
};
use shiplabel::shipment::{ShipmentService, ShipmentValues};
use shiplabel::store::{InMemoryStore, ShipStore, StoreSnapshot};
use shiplabel::{ShipError, ShipResult};

// ============================================================================
// Helpers
// ============================================================================

/// Carrier client answering every request with the same shipment.
struct RecordingClient {
    tracking: String,
    labels: usize,
    requests: Mutex<Vec<ShipmentRequest>>,
}

impl RecordingClient {
    fn new(tracking: &str, labels: usize) -> Self {
        Self {
            tracking: tracking.to_string(),
            labels,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<ShipmentRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl CarrierClient for RecordingClient {
    fn create_shipment(&self, request: &ShipmentRequest) -> Result<CarrierShipment, CarrierError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(CarrierShipment {
            tracking_number: self.tracking.clone(),
            labels: (0..self.labels).map(|i| vec![i as u8]).collect(),
        })
    }
}

/// Strategy with a generic printed label only.
struct PrintedLabel;

impl LabelStrategy for PrintedLabel {
    fn name(&self) -> &str {
        "printed"
    }

    fn generate_default_label(
        &self,
        job: &LabelJob<'_>,
        _package_filter: Option<&[PackageId]>,
    ) -> ShipResult<Label> {
        Ok(Label::new(
            format!("{}.pdf", job.shipment.name),
            b"%PDF-1.4".to_vec(),
            FileType::Pdf,
        ))
    }
}

const UPS: CarrierId = CarrierId(1);
const SEUR: CarrierId = CarrierId(2);
const COURIER: CarrierId = CarrierId(3);

fn seeded_store() -> Arc<InMemoryStore> {
    let store = Arc::new(InMemoryStore::new());
    store.insert_carrier(
        Carrier::new(UPS, "UPS Standard", CarrierType::Ups)
            .with_code("UPS")
            .with_option(CarrierOption::new(OptionId(1), "Signature").mandatory())
            .with_option(CarrierOption::new(OptionId(2), "Insurance").by_default())
            .with_option(CarrierOption::new(OptionId(3), "Saturday delivery"))
            .with_ups_config(UpsConfig::new("LICENSE", "user", "secret", "A1B2C3")),
    );
    store.insert_carrier(Carrier::new(SEUR, "SEUR 24", CarrierType::Seur));
    store.insert_carrier(Carrier::new(COURIER, "Local courier", CarrierType::Other));
    store
}

fn base_values() -> ShipmentValues {
    ShipmentValues::new()
        .with_name("OUT/0042")
        .with_partner(
            Address::new("Ana")
                .with_street("Calle Mayor 1")
                .with_city("Las Palmas")
                .with_zip("35001")
                .with_country("ES")
                .with_mobile("+34 600 000 000"),
        )
        .with_warehouse(Warehouse::new(
            "Madrid",
            Some(
                Address::new("Main warehouse")
                    .with_city("Madrid")
                    .with_zip("28001")
                    .with_country("ES"),
            ),
        ))
        .with_packages(3)
        .with_weight(9.0)
}

fn registry(ups: Arc<RecordingClient>) -> StrategyRegistry {
    StrategyRegistry::new()
        .with_strategy(CarrierType::Ups, Arc::new(UpsLabelStrategy::new(ups)))
        .with_strategy(CarrierType::Other, Arc::new(PrintedLabel))
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_ups_shipment_end_to_end() {
    let store = seeded_store();
    let ctx = Context::new(1);
    let id = ShipmentService::new(store.as_ref())
        .create(&ctx, &base_values().with_carrier(UPS))
        .unwrap();

    let client = Arc::new(RecordingClient::new("1Z999AA10123456784", 3));
    let generator = LabelGenerator::new(store.clone(), registry(client.clone()));
    let ids = generator.action_generate_carrier_label(&ctx, id).unwrap();

    assert_eq!(ids.len(), 3);
    let request = &client.requests()[0];
    assert_eq!(request.to_address.country, "IC");
    assert_eq!(request.to_address.phone, "+34 600 000 000");
    assert_eq!(request.packages.len(), 3);
    assert!(request.packages.iter().all(|p| p.weight == 3.0));

    let stored = store.labels_of_shipment(id).unwrap();
    let names: Vec<_> = stored.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "1Z999AA10123456784_1.gif",
            "1Z999AA10123456784_2.gif",
            "1Z999AA10123456784_3.gif"
        ]
    );
    assert_eq!(
        store.shipment(id).unwrap().carrier_tracking_ref.as_deref(),
        Some("1Z999AA10123456784")
    );
}

#[test]
fn test_second_generation_is_refused_before_carrier_call() {
    let store = seeded_store();
    let ctx = Context::new(1);
    let id = ShipmentService::new(store.as_ref())
        .create(&ctx, &base_values().with_carrier(UPS))
        .unwrap();
    let client = Arc::new(RecordingClient::new("1Z1", 1));
    let generator = LabelGenerator::new(store.clone(), registry(client.clone()));

    generator.generate_labels(&ctx, id, None).unwrap();
    let err = generator.generate_labels(&ctx, id, None).unwrap_err();

    assert!(matches!(err, ShipError::LabelsAlreadyExist { ref shipment } if shipment == "OUT/0042"));
    assert_eq!(client.requests().len(), 1);
    assert_eq!(store.labels_of_shipment(id).unwrap().len(), 1);
}

#[test]
fn test_default_label_copied_per_requested_package() {
    let store = seeded_store();
    let ctx = Context::new(1);
    let id = ShipmentService::new(store.as_ref())
        .create(&ctx, &base_values().with_carrier(COURIER))
        .unwrap();
    let generator = LabelGenerator::new(store.clone(), registry(Arc::new(RecordingClient::new("x", 0))));

    let filter = [PackageId(10), PackageId(11), PackageId(12)];
    generator.generate_labels(&ctx, id, Some(&filter)).unwrap();

    let stored = store.labels_of_shipment(id).unwrap();
    assert_eq!(stored.len(), 3);
    for (label, package) in stored.iter().zip(filter) {
        assert_eq!(label.package_id, Some(package));
        assert_eq!(label.name, "OUT/0042.pdf");
        assert_eq!(label.data, b"%PDF-1.4");
    }
}

#[test]
fn test_carrier_without_integration_has_no_label() {
    let store = seeded_store();
    let ctx = Context::new(1);
    let id = ShipmentService::new(store.as_ref())
        .create(&ctx, &base_values().with_carrier(SEUR))
        .unwrap();
    let generator = LabelGenerator::new(store.clone(), StrategyRegistry::new());

    let err = generator.generate_labels(&ctx, id, None).unwrap_err();
    assert_eq!(
        err.to_string(),
        "No label is configured for the selected delivery method."
    );
}

#[test]
fn test_seur_without_config_is_a_configuration_error() {
    let store = seeded_store();
    let ctx = Context::new(1);
    let id = ShipmentService::new(store.as_ref())
        .create(&ctx, &base_values().with_carrier(SEUR))
        .unwrap();
    let client = Arc::new(RecordingClient::new("S1", 1));
    let generator = LabelGenerator::new(
        store.clone(),
        StrategyRegistry::new().with_strategy(CarrierType::Seur, Arc::new(SeurLabelStrategy::new(client.clone()))),
    );

    let err = generator.generate_labels(&ctx, id, None).unwrap_err();
    assert!(err.is_configuration());
    assert!(client.requests().is_empty());
}

#[test]
fn test_attachments_ignore_default_type_override() {
    let store = seeded_store();
    let ctx = Context::new(1).with_value(DEFAULT_TYPE_KEY, "url");
    let id = ShipmentService::new(store.as_ref())
        .create(&ctx, &base_values().with_carrier(COURIER))
        .unwrap();
    let generator = LabelGenerator::new(store.clone(), registry(Arc::new(RecordingClient::new("x", 0))));

    generator.generate_labels(&ctx, id, None).unwrap();

    let stored = store.labels_of_shipment(id).unwrap();
    assert_eq!(stored[0].attachment_type, AttachmentType::Binary);
}

#[test]
fn test_mandatory_option_cannot_be_removed() {
    let store = seeded_store();
    let ctx = Context::new(1);
    let service = ShipmentService::new(store.as_ref());
    let id = service.create(&ctx, &base_values().with_carrier(UPS)).unwrap();
    let before: BTreeSet<_> = [OptionId(1), OptionId(2)].into();
    assert_eq!(store.shipment(id).unwrap().option_ids, before);

    let err = service
        .update(&ctx, id, &ShipmentValues::new().with_options([OptionId(2), OptionId(3)]))
        .unwrap_err();

    assert!(err.to_string().contains("add back the option: Signature"));
    assert_eq!(store.shipment(id).unwrap().option_ids, before);
}

#[test]
fn test_labels_survive_snapshot_round_trip() {
    let store = seeded_store();
    let ctx = Context::new(1);
    let id = ShipmentService::new(store.as_ref())
        .create(&ctx, &base_values().with_carrier(COURIER))
        .unwrap();
    LabelGenerator::new(store.clone(), registry(Arc::new(RecordingClient::new("x", 0))))
        .generate_labels(&ctx, id, None)
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    store.snapshot().save(&path).unwrap();
    let reopened = InMemoryStore::from_snapshot(StoreSnapshot::load(&path).unwrap());

    let labels = reopened.labels_of_shipment(id).unwrap();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].data, b"%PDF-1.4");
}
