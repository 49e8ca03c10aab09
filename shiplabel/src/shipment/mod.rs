//! Carrier selection and shipment updates.
//!
//! Selecting a carrier replaces the shipment's options with the carrier's
//! defaults. Options the carrier marks as mandatory cannot be removed while
//! it stays selected.

mod options;
mod service;
mod values;

pub use options::{change_options, select_carrier, OptionDomain};
pub use service::ShipmentService;
pub use values::ShipmentValues;
