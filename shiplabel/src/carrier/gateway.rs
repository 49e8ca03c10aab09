//! JSON client for a carrier gateway.
//!
//! The gateway owns the carrier's native protocol. This client sends it a
//! [`ShipmentRequest`] as JSON on `POST {endpoint}/shipments` and expects
//! either
//!
//! ```text
//! {"tracking_number": "1Z...", "labels": ["<base64>", ...]}
//! ```
//!
//! or, when the carrier rejects the shipment,
//!
//! ```text
//! {"error": "<carrier message>"}
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use tracing::debug;

use super::http::HttpClient;
use super::types::{CarrierClient, CarrierError, CarrierShipment, ShipmentRequest};

#[derive(Debug, Deserialize)]
struct GatewayResponse {
    #[serde(default)]
    tracking_number: Option<String>,
    #[serde(default)]
    labels: Vec<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Carrier client backed by a gateway reachable over HTTP.
pub struct GatewayClient<H: HttpClient> {
    http_client: H,
    endpoint: String,
}

impl<H: HttpClient> GatewayClient<H> {
    /// Creates a client for the gateway at `endpoint`.
    ///
    /// A trailing slash on the endpoint is ignored.
    pub fn new(http_client: H, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Self {
            http_client,
            endpoint,
        }
    }

    fn shipments_url(&self) -> String {
        format!("{}/shipments", self.endpoint)
    }

    fn decode(body: &[u8]) -> Result<CarrierShipment, CarrierError> {
        let response: GatewayResponse = serde_json::from_slice(body)
            .map_err(|e| CarrierError::InvalidResponse(e.to_string()))?;

        if let Some(message) = response.error {
            return Err(CarrierError::Rejected(message));
        }

        let tracking_number = response
            .tracking_number
            .filter(|t| !t.is_empty())
            .ok_or_else(|| CarrierError::InvalidResponse("missing tracking number".to_string()))?;

        let labels = response
            .labels
            .iter()
            .map(|encoded| STANDARD.decode(encoded))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| CarrierError::InvalidResponse(format!("label is not base64: {}", e)))?;

        Ok(CarrierShipment {
            tracking_number,
            labels,
        })
    }
}

impl<H: HttpClient> CarrierClient for GatewayClient<H> {
    fn create_shipment(&self, request: &ShipmentRequest) -> Result<CarrierShipment, CarrierError> {
        let body = serde_json::to_vec(request)
            .map_err(|e| CarrierError::InvalidResponse(format!("cannot encode request: {}", e)))?;
        let url = self.shipments_url();

        debug!(
            carrier = %request.carrier,
            url = %url,
            packages = request.packages.len(),
            "Creating carrier shipment"
        );
        let response = self.http_client.post(&url, "application/json", body)?;
        Self::decode(&response)
    }
}
