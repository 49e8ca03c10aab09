//! Domain model for packages, items, shipments, carriers and labels.
//!
//! These are plain data records. Behaviour that needs the store (weighing,
//! label dispatch, carrier selection) lives in the `weight`, `label` and
//! `shipment` modules.

mod address;
mod carrier;
mod ids;
mod item;
mod label;
mod package;
mod shipment;

pub use address::{Address, Warehouse};
pub use carrier::{Carrier, CarrierOption, CarrierType, SeurConfig, UpsConfig};
pub use ids::{CarrierId, ItemId, LabelId, OptionId, PackageId, ShipmentId};
pub use item::{Item, Product, UnitOfMeasure};
pub use label::{AttachmentType, FileType, Label, LabelAttachment};
pub use package::{LogisticUnit, Package};
pub use shipment::{Dimensions, Shipment, UpsServiceType, UpsShipmentSettings};
