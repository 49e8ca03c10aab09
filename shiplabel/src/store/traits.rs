//! Store trait and errors.

use thiserror::Error;

use crate::context::Context;
use crate::model::{
    Carrier, CarrierId, Item, ItemId, Label, LabelAttachment, LabelId, Package, PackageId,
    Shipment, ShipmentId,
};

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors a store reports.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record of this kind with this id.
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: u64 },

    /// A context override holds a value the store cannot apply.
    #[error("invalid context value {key}={value}")]
    InvalidContext { key: String, value: String },

    /// Backend-specific failure.
    #[error("store error: {0}")]
    Backend(String),
}

/// Read and write access to packages, items, shipments, carriers and labels.
///
/// Reads of relations (`children_of_package`, `items_of_package`...) are
/// queries: they must reflect writes made earlier in the same operation.
/// Writes take the caller's [`Context`].
///
/// Implementations must be `Send + Sync`; they are shared behind `Arc`.
pub trait ShipStore: Send + Sync {
    /// Fetch a package.
    fn package(&self, id: PackageId) -> StoreResult<Package>;

    /// Ids of the packages directly nested in `id`.
    fn children_of_package(&self, id: PackageId) -> StoreResult<Vec<PackageId>>;

    /// Items put into package `id` (result package) that carry a product.
    fn items_of_package(&self, id: PackageId) -> StoreResult<Vec<Item>>;

    /// Items moved by shipment `id`.
    fn items_of_shipment(&self, id: ShipmentId) -> StoreResult<Vec<Item>>;

    fn write_item_weight(&self, ctx: &Context, id: ItemId, weight: f64) -> StoreResult<()>;

    fn write_package_weight(&self, ctx: &Context, id: PackageId, weight: f64) -> StoreResult<()>;

    fn shipment(&self, id: ShipmentId) -> StoreResult<Shipment>;

    /// Persist a new shipment and return its id.
    ///
    /// A shipment with the default id gets a fresh one assigned.
    fn create_shipment(&self, ctx: &Context, shipment: Shipment) -> StoreResult<ShipmentId>;

    /// Replace a stored shipment.
    fn write_shipment(&self, ctx: &Context, shipment: &Shipment) -> StoreResult<()>;

    fn set_tracking_ref(&self, ctx: &Context, id: ShipmentId, tracking: &str) -> StoreResult<()>;

    fn carrier(&self, id: CarrierId) -> StoreResult<Carrier>;

    /// Label attachments of a shipment.
    fn labels_of_shipment(&self, id: ShipmentId) -> StoreResult<Vec<LabelAttachment>>;

    /// Persist a label as an attachment of `shipment`, linked to the
    /// label's package when it has one.
    fn create_label_attachment(
        &self,
        ctx: &Context,
        shipment: ShipmentId,
        label: &Label,
    ) -> StoreResult<LabelId>;

    fn delete_label_attachment(&self, ctx: &Context, id: LabelId) -> StoreResult<()>;
}
