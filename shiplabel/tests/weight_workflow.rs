//! Integration tests for weighing the packages of a shipment.
//!
//! Run with: `cargo test --test weight_workflow`

use shiplabel::context::Context;
use shiplabel::model::{
    Item, ItemId, LogisticUnit, Package, PackageId, Product, ShipmentId, UnitOfMeasure,
};
use shiplabel::shipment::{ShipmentService, ShipmentValues};
use shiplabel::store::{InMemoryStore, ShipStore, StoreSnapshot};
use shiplabel::weight::WeightAggregator;

const SHIPMENT: ShipmentId = ShipmentId(1);

/// PACK67 holding PACK65 (1 × A, 2 × B) and PACK66 (1 × A), 0.5 kg boxes.
fn pallet_store() -> InMemoryStore {
    let store = InMemoryStore::new();
    let box_unit = LogisticUnit::new("Box", 0.5);
    store.insert_package(Package::new(PackageId(67), "PACK67").with_logistic_unit(box_unit.clone()));
    store.insert_package(
        Package::new(PackageId(65), "PACK65")
            .with_parent(PackageId(67))
            .with_logistic_unit(box_unit.clone()),
    );
    store.insert_package(
        Package::new(PackageId(66), "PACK66")
            .with_parent(PackageId(67))
            .with_logistic_unit(box_unit),
    );

    let a = Product::new("A", 2.0);
    let b = Product::new("B", 4.0);
    store.insert_item(Item::new(ItemId(1), a.clone(), 1.0).in_shipment(SHIPMENT).into_package(PackageId(65)));
    store.insert_item(Item::new(ItemId(2), b, 2.0).in_shipment(SHIPMENT).into_package(PackageId(65)));
    store.insert_item(Item::new(ItemId(3), a, 1.0).in_shipment(SHIPMENT).into_package(PackageId(66)));
    store
}

#[test]
fn test_pallet_weight_and_shipment_update() {
    let store = pallet_store();
    let ctx = Context::new(1);
    let service = ShipmentService::new(&store);
    let shipment = service
        .create(&ctx, &ShipmentValues::new().with_name("OUT/0001"))
        .unwrap();
    assert_eq!(shipment, SHIPMENT);

    let report = WeightAggregator::new(&store)
        .compute_weight(&ctx, PackageId(67))
        .unwrap();
    assert_eq!(report.weight, 13.5);
    assert!(report.fully_computable);

    let updated = service
        .update(&ctx, shipment, &ShipmentValues::new().with_weight(report.weight))
        .unwrap();
    assert_eq!(updated.weight, Some(13.5));
    assert_eq!(store.package(PackageId(65)).unwrap().display_name(), "PACK65 10.5 kg");
}

#[test]
fn test_shipment_packages_are_weighed_once() {
    let store = pallet_store();
    let ctx = Context::new(1);

    let reports = WeightAggregator::new(&store)
        .set_pack_weights(&ctx, SHIPMENT)
        .unwrap();

    let weighed: Vec<_> = reports.iter().map(|(id, r)| (*id, r.weight)).collect();
    assert_eq!(weighed, vec![(PackageId(65), 10.5), (PackageId(66), 2.5)]);

    let packages = ShipmentService::new(&store).packages_of_shipment(SHIPMENT).unwrap();
    assert_eq!(packages.len(), 2);
}

#[test]
fn test_incomplete_weight_survives_snapshot() {
    let store = pallet_store();
    store.insert_item(
        Item::new(
            ItemId(4),
            Product::new("Liquid", 1.0).with_uom(UnitOfMeasure::Other("litre".to_string())),
            3.0,
        )
        .into_package(PackageId(66)),
    );
    let ctx = Context::new(1);

    let report = WeightAggregator::new(&store)
        .compute_weight(&ctx, PackageId(67))
        .unwrap();
    assert!(!report.fully_computable);
    assert_eq!(report.weight, 16.5);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    store.snapshot().save(&path).unwrap();
    let reopened = InMemoryStore::from_snapshot(StoreSnapshot::load(&path).unwrap());
    assert_eq!(reopened.package(PackageId(67)).unwrap().weight, 16.5);
}
