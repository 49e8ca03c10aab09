//! shiplabel - Package weighing and carrier label generation
//!
//! This library computes the weight of nested packages and dispatches label
//! generation for outbound shipments to carrier-specific strategies (UPS,
//! SEUR). Persistence and carrier services are injected collaborators:
//!
//! - [`store::ShipStore`] reads and writes packages, items, shipments and
//!   label attachments
//! - [`carrier::CarrierClient`] talks to an external carrier service
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use shiplabel::context::Context;
//! use shiplabel::label::{LabelGenerator, StrategyRegistry};
//! use shiplabel::store::InMemoryStore;
//! use shiplabel::weight::WeightAggregator;
//!
//! let store = Arc::new(InMemoryStore::default());
//! let ctx = Context::new(1);
//!
//! let report = WeightAggregator::new(store.as_ref()).compute_weight(&ctx, package_id)?;
//! if !report.fully_computable {
//!     eprintln!("weight of {} is an estimate", package_id);
//! }
//!
//! let generator = LabelGenerator::new(store.clone(), StrategyRegistry::default());
//! generator.generate_labels(&ctx, shipment_id, None)?;
//! ```

pub mod carrier;
pub mod config;
pub mod context;
pub mod error;
pub mod label;
pub mod logging;
pub mod model;
pub mod shipment;
pub mod store;
pub mod weight;

pub use error::{ShipError, ShipResult};
