//! Carrier request/response types and the client trait.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{CarrierType, Dimensions, FileType};

/// Errors reported by a carrier client.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CarrierError {
    /// Transport failure (connection, timeout, HTTP status).
    #[error("{0}")]
    Http(String),

    /// The carrier refused the shipment; holds the carrier's message.
    #[error("{0}")]
    Rejected(String),

    /// The carrier answered with something that could not be understood.
    #[error("invalid carrier response: {0}")]
    InvalidResponse(String),
}

/// Account a shipment is created under.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountCredentials {
    pub username: String,
    pub password: String,
    /// Shipper or customer number at the carrier.
    pub account_number: String,
    /// API license or integration key, for carriers that need one.
    #[serde(default)]
    pub access_key: Option<String>,
    #[serde(default)]
    pub test_mode: bool,
}

/// Address as sent to a carrier. Every field is present, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressBlock {
    pub name: String,
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub country: String,
    pub state: String,
    pub postal_code: String,
    pub phone: String,
    pub email: String,
}

/// One physical parcel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParcelSpec {
    pub packaging_type: String,
    pub dimensions: Dimensions,
    pub weight: f64,
}

/// Label format and units for a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatOptions {
    pub file_format: FileType,
    #[serde(default)]
    pub description: Option<String>,
    pub dimensions_unit: String,
    pub weight_unit: String,
}

/// A shipment to create at a carrier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRequest {
    pub carrier: CarrierType,
    pub account: AccountCredentials,
    pub from_address: AddressBlock,
    pub to_address: AddressBlock,
    pub packages: Vec<ParcelSpec>,
    pub service_level: String,
    pub format: FormatOptions,
}

/// What the carrier returns for a created shipment.
#[derive(Debug, Clone, PartialEq)]
pub struct CarrierShipment {
    pub tracking_number: String,
    /// One label document per parcel, in parcel order.
    pub labels: Vec<Vec<u8>>,
}

/// Client for one carrier service.
///
/// Calls are blocking and made once; retries are up to the implementation.
pub trait CarrierClient: Send + Sync {
    fn create_shipment(&self, request: &ShipmentRequest) -> Result<CarrierShipment, CarrierError>;
}
