//! In-memory store.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use super::snapshot::StoreSnapshot;
use super::traits::{ShipStore, StoreError, StoreResult};
use crate::context::{Context, DEFAULT_TYPE_KEY};
use crate::model::{
    AttachmentType, Carrier, CarrierId, Item, ItemId, Label, LabelAttachment, LabelId, Package,
    PackageId, Shipment, ShipmentId,
};

#[derive(Debug, Default)]
struct State {
    packages: BTreeMap<PackageId, Package>,
    items: BTreeMap<ItemId, Item>,
    shipments: BTreeMap<ShipmentId, Shipment>,
    carriers: BTreeMap<CarrierId, Carrier>,
    labels: BTreeMap<LabelId, LabelAttachment>,
}

/// A [`ShipStore`] holding every record in memory.
///
/// Used by tests and by the CLI, which loads it from and saves it to a
/// [`StoreSnapshot`] file.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

fn not_found(kind: &'static str, id: u64) -> StoreError {
    StoreError::NotFound { kind, id }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a snapshot.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        let state = State {
            packages: snapshot.packages.into_iter().map(|p| (p.id, p)).collect(),
            items: snapshot.items.into_iter().map(|i| (i.id, i)).collect(),
            shipments: snapshot.shipments.into_iter().map(|s| (s.id, s)).collect(),
            carriers: snapshot.carriers.into_iter().map(|c| (c.id, c)).collect(),
            labels: snapshot.labels.into_iter().map(|l| (l.id, l)).collect(),
        };
        Self {
            state: RwLock::new(state),
        }
    }

    /// Copy the current content out as a snapshot.
    pub fn snapshot(&self) -> StoreSnapshot {
        let state = self.state.read();
        StoreSnapshot {
            packages: state.packages.values().cloned().collect(),
            items: state.items.values().cloned().collect(),
            shipments: state.shipments.values().cloned().collect(),
            carriers: state.carriers.values().cloned().collect(),
            labels: state.labels.values().cloned().collect(),
        }
    }

    pub fn insert_package(&self, package: Package) {
        self.state.write().packages.insert(package.id, package);
    }

    pub fn insert_item(&self, item: Item) {
        self.state.write().items.insert(item.id, item);
    }

    pub fn insert_shipment(&self, shipment: Shipment) {
        self.state.write().shipments.insert(shipment.id, shipment);
    }

    pub fn insert_carrier(&self, carrier: Carrier) {
        self.state.write().carriers.insert(carrier.id, carrier);
    }

    /// Fetch a stored item.
    pub fn item(&self, id: ItemId) -> StoreResult<Item> {
        self.state
            .read()
            .items
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found("item", id.0))
    }
}

impl ShipStore for InMemoryStore {
    fn package(&self, id: PackageId) -> StoreResult<Package> {
        self.state
            .read()
            .packages
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found("package", id.0))
    }

    fn children_of_package(&self, id: PackageId) -> StoreResult<Vec<PackageId>> {
        Ok(self
            .state
            .read()
            .packages
            .values()
            .filter(|p| p.parent_id == Some(id))
            .map(|p| p.id)
            .collect())
    }

    fn items_of_package(&self, id: PackageId) -> StoreResult<Vec<Item>> {
        Ok(self
            .state
            .read()
            .items
            .values()
            .filter(|i| i.result_package_id == Some(id) && i.product.is_some())
            .cloned()
            .collect())
    }

    fn items_of_shipment(&self, id: ShipmentId) -> StoreResult<Vec<Item>> {
        Ok(self
            .state
            .read()
            .items
            .values()
            .filter(|i| i.shipment_id == Some(id))
            .cloned()
            .collect())
    }

    fn write_item_weight(&self, _ctx: &Context, id: ItemId, weight: f64) -> StoreResult<()> {
        let mut state = self.state.write();
        let item = state.items.get_mut(&id).ok_or_else(|| not_found("item", id.0))?;
        item.weight = weight;
        Ok(())
    }

    fn write_package_weight(&self, _ctx: &Context, id: PackageId, weight: f64) -> StoreResult<()> {
        let mut state = self.state.write();
        let package = state
            .packages
            .get_mut(&id)
            .ok_or_else(|| not_found("package", id.0))?;
        package.weight = weight;
        Ok(())
    }

    fn shipment(&self, id: ShipmentId) -> StoreResult<Shipment> {
        self.state
            .read()
            .shipments
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found("shipment", id.0))
    }

    fn create_shipment(&self, _ctx: &Context, mut shipment: Shipment) -> StoreResult<ShipmentId> {
        let mut state = self.state.write();
        if shipment.id == ShipmentId::default() {
            let next = state.shipments.keys().next_back().map_or(1, |id| id.0 + 1);
            shipment.id = ShipmentId(next);
        } else if state.shipments.contains_key(&shipment.id) {
            return Err(StoreError::Backend(format!(
                "shipment {} already exists",
                shipment.id
            )));
        }
        let id = shipment.id;
        state.shipments.insert(id, shipment);
        Ok(id)
    }

    fn write_shipment(&self, _ctx: &Context, shipment: &Shipment) -> StoreResult<()> {
        let mut state = self.state.write();
        let stored = state
            .shipments
            .get_mut(&shipment.id)
            .ok_or_else(|| not_found("shipment", shipment.id.0))?;
        *stored = shipment.clone();
        Ok(())
    }

    fn set_tracking_ref(&self, _ctx: &Context, id: ShipmentId, tracking: &str) -> StoreResult<()> {
        let mut state = self.state.write();
        let shipment = state
            .shipments
            .get_mut(&id)
            .ok_or_else(|| not_found("shipment", id.0))?;
        shipment.carrier_tracking_ref = Some(tracking.to_string());
        Ok(())
    }

    fn carrier(&self, id: CarrierId) -> StoreResult<Carrier> {
        self.state
            .read()
            .carriers
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found("carrier", id.0))
    }

    fn labels_of_shipment(&self, id: ShipmentId) -> StoreResult<Vec<LabelAttachment>> {
        Ok(self
            .state
            .read()
            .labels
            .values()
            .filter(|l| l.shipment_id == id)
            .cloned()
            .collect())
    }

    fn create_label_attachment(
        &self,
        ctx: &Context,
        shipment: ShipmentId,
        label: &Label,
    ) -> StoreResult<LabelId> {
        // Attachments pick up the caller's default type, like any record
        // created under that context.
        let attachment_type = match ctx.get(DEFAULT_TYPE_KEY) {
            Some(value) => value
                .parse::<AttachmentType>()
                .map_err(|_| StoreError::InvalidContext {
                    key: DEFAULT_TYPE_KEY.to_string(),
                    value: value.to_string(),
                })?,
            None => AttachmentType::default(),
        };

        let mut state = self.state.write();
        if !state.shipments.contains_key(&shipment) {
            return Err(not_found("shipment", shipment.0));
        }
        let id = LabelId(state.labels.keys().next_back().map_or(1, |id| id.0 + 1));
        state.labels.insert(
            id,
            LabelAttachment {
                id,
                shipment_id: shipment,
                package_id: label.package_id,
                name: label.name.clone(),
                data: label.file.clone(),
                file_type: label.file_type,
                attachment_type,
            },
        );
        Ok(id)
    }

    fn delete_label_attachment(&self, _ctx: &Context, id: LabelId) -> StoreResult<()> {
        self.state
            .write()
            .labels
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found("label", id.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FileType, Product};

    fn ctx() -> Context {
        Context::new(1)
    }

    #[test]
    fn test_children_of_package() {
        let store = InMemoryStore::new();
        store.insert_package(Package::new(PackageId(1), "ROOT"));
        store.insert_package(Package::new(PackageId(2), "A").with_parent(PackageId(1)));
        store.insert_package(Package::new(PackageId(3), "B").with_parent(PackageId(1)));
        store.insert_package(Package::new(PackageId(4), "C").with_parent(PackageId(2)));

        assert_eq!(
            store.children_of_package(PackageId(1)).unwrap(),
            vec![PackageId(2), PackageId(3)]
        );
        assert!(store.children_of_package(PackageId(4)).unwrap().is_empty());
    }

    #[test]
    fn test_items_of_package_skips_items_without_product() {
        let store = InMemoryStore::new();
        store.insert_item(Item::new(ItemId(1), Product::new("A", 2.0), 1.0).into_package(PackageId(1)));
        let mut bare = Item::new(ItemId(2), Product::new("B", 1.0), 1.0).into_package(PackageId(1));
        bare.product = None;
        store.insert_item(bare);
        store.insert_item(Item::new(ItemId(3), Product::new("C", 1.0), 1.0).into_package(PackageId(2)));

        let items = store.items_of_package(PackageId(1)).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, ItemId(1));
    }

    #[test]
    fn test_write_weight_missing_package() {
        let store = InMemoryStore::new();
        let err = store
            .write_package_weight(&ctx(), PackageId(9), 1.0)
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { kind: "package", id: 9 }));
    }

    #[test]
    fn test_create_shipment_assigns_id() {
        let store = InMemoryStore::new();
        store.insert_shipment(Shipment::new(ShipmentId(4), "OUT/0004"));

        let id = store
            .create_shipment(&ctx(), Shipment::new(ShipmentId::default(), "OUT/0005"))
            .unwrap();
        assert_eq!(id, ShipmentId(5));
        assert_eq!(store.shipment(id).unwrap().name, "OUT/0005");
    }

    #[test]
    fn test_create_shipment_rejects_duplicate_id() {
        let store = InMemoryStore::new();
        store.insert_shipment(Shipment::new(ShipmentId(4), "OUT/0004"));

        let result = store.create_shipment(&ctx(), Shipment::new(ShipmentId(4), "again"));
        assert!(matches!(result, Err(StoreError::Backend(_))));
    }

    #[test]
    fn test_label_attachment_lifecycle() {
        let store = InMemoryStore::new();
        store.insert_shipment(Shipment::new(ShipmentId(1), "OUT/0001"));

        let label = Label::new("a.pdf", vec![1], FileType::Pdf).for_package(PackageId(3));
        let id = store
            .create_label_attachment(&ctx(), ShipmentId(1), &label)
            .unwrap();

        let labels = store.labels_of_shipment(ShipmentId(1)).unwrap();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].package_id, Some(PackageId(3)));
        assert_eq!(labels[0].attachment_type, AttachmentType::Binary);

        store.delete_label_attachment(&ctx(), id).unwrap();
        assert!(store.labels_of_shipment(ShipmentId(1)).unwrap().is_empty());
    }

    #[test]
    fn test_label_attachment_honours_default_type() {
        let store = InMemoryStore::new();
        store.insert_shipment(Shipment::new(ShipmentId(1), "OUT/0001"));
        let label = Label::new("a.pdf", vec![1], FileType::Pdf);

        let url_ctx = ctx().with_value(DEFAULT_TYPE_KEY, "url");
        store
            .create_label_attachment(&url_ctx, ShipmentId(1), &label)
            .unwrap();
        assert_eq!(
            store.labels_of_shipment(ShipmentId(1)).unwrap()[0].attachment_type,
            AttachmentType::Url
        );

        let picking_ctx = ctx().with_value(DEFAULT_TYPE_KEY, "outgoing");
        let err = store
            .create_label_attachment(&picking_ctx, ShipmentId(1), &label)
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidContext { .. }));
    }

    #[test]
    fn test_snapshot_round_trip_preserves_records() {
        let store = InMemoryStore::new();
        store.insert_package(Package::new(PackageId(1), "PACK1"));
        store.insert_shipment(Shipment::new(ShipmentId(1), "OUT/0001"));

        let copy = InMemoryStore::from_snapshot(store.snapshot());
        assert_eq!(copy.package(PackageId(1)).unwrap().name, "PACK1");
        assert_eq!(copy.shipment(ShipmentId(1)).unwrap().name, "OUT/0001");
    }
}
