//! Carrier service clients.
//!
//! A label strategy describes the shipment it wants created as a
//! [`ShipmentRequest`] and hands it to a [`CarrierClient`]. The carrier's
//! own protocol stays behind that trait.
//!
//! # Gateway Client
//!
//! [`GatewayClient`] forwards requests as JSON to a carrier gateway over
//! any [`HttpClient`]:
//!
//! ```ignore
//! use shiplabel::carrier::{GatewayClient, ReqwestClient};
//!
//! let http = ReqwestClient::with_timeout(30)?;
//! let ups = GatewayClient::new(http, "https://gateway.example.com/ups");
//! let shipment = ups.create_shipment(&request)?;
//! ```

mod gateway;
mod http;
mod types;

pub use gateway::GatewayClient;
pub use http::{HttpClient, ReqwestClient};
pub use types::{
    AccountCredentials, AddressBlock, CarrierClient, CarrierError, CarrierShipment, FormatOptions,
    ParcelSpec, ShipmentRequest,
};

#[cfg(test)]
pub use http::tests::MockHttpClient;
#[cfg(test)]
pub use types::tests::MockCarrierClient;
