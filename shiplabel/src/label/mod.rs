//! Label generation.
//!
//! Label generation is a strategy chain:
//!
//! 1. [`LabelStrategy::generate_default_label`] - one label for the whole
//!    shipment. The default implementation fails with
//!    [`ShipError::NoLabelConfigured`](crate::ShipError::NoLabelConfigured),
//!    so every carrier integration has to provide something.
//! 2. [`LabelStrategy::generate_shipping_labels`] - the labels of a
//!    shipment. By default the default label, copied once per requested
//!    package. Carrier strategies replace this with a call to their
//!    carrier, which returns one label per parcel.
//! 3. [`LabelGenerator::generate_labels`] - refuses to run twice for a
//!    shipment, dispatches to the strategy registered for the shipment's
//!    carrier type and stores the labels as attachments.

mod generator;
mod registry;
mod seur;
mod strategy;
mod ups;

pub use generator::LabelGenerator;
pub use registry::StrategyRegistry;
pub use seur::SeurLabelStrategy;
pub use strategy::{replicate_per_package, DefaultLabelStrategy, LabelJob, LabelStrategy};
pub use ups::{ups_country_code, ups_state_code, UpsLabelStrategy};
