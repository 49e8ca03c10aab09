//! Outbound shipments (delivery orders).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::address::{Address, Warehouse};
use super::carrier::CarrierType;
use super::ids::{CarrierId, OptionId, ShipmentId};

/// Maximum length of the free-text description UPS accepts.
pub const UPS_DESCRIPTION_MAX_LEN: usize = 49;

/// Declared parcel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            length,
            width,
            height,
        }
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::new(30.0, 30.0, 30.0)
    }
}

/// UPS service level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpsServiceType {
    #[default]
    #[serde(rename = "standard")]
    Standard,
    #[serde(rename = "1dayair")]
    NextDayAir,
    #[serde(rename = "2dayair")]
    SecondDayAir,
    #[serde(rename = "ground")]
    Ground,
    #[serde(rename = "worldwide_expedited")]
    WorldwideExpedited,
    #[serde(rename = "3_day_select")]
    ThreeDaySelect,
    #[serde(rename = "next_day_air_saver")]
    NextDayAirSaver,
    #[serde(rename = "next_day_air_early_am")]
    NextDayAirEarlyAm,
    #[serde(rename = "express_plus")]
    ExpressPlus,
    #[serde(rename = "2nd_day_air_am")]
    SecondDayAirAm,
    #[serde(rename = "ups_saver")]
    UpsSaver,
}

impl UpsServiceType {
    pub const ALL: [UpsServiceType; 11] = [
        UpsServiceType::Standard,
        UpsServiceType::NextDayAir,
        UpsServiceType::SecondDayAir,
        UpsServiceType::Ground,
        UpsServiceType::WorldwideExpedited,
        UpsServiceType::ThreeDaySelect,
        UpsServiceType::NextDayAirSaver,
        UpsServiceType::NextDayAirEarlyAm,
        UpsServiceType::ExpressPlus,
        UpsServiceType::SecondDayAirAm,
        UpsServiceType::UpsSaver,
    ];

    /// Key sent to the carrier.
    pub fn key(&self) -> &'static str {
        match self {
            UpsServiceType::Standard => "standard",
            UpsServiceType::NextDayAir => "1dayair",
            UpsServiceType::SecondDayAir => "2dayair",
            UpsServiceType::Ground => "ground",
            UpsServiceType::WorldwideExpedited => "worldwide_expedited",
            UpsServiceType::ThreeDaySelect => "3_day_select",
            UpsServiceType::NextDayAirSaver => "next_day_air_saver",
            UpsServiceType::NextDayAirEarlyAm => "next_day_air_early_am",
            UpsServiceType::ExpressPlus => "express_plus",
            UpsServiceType::SecondDayAirAm => "2nd_day_air_am",
            UpsServiceType::UpsSaver => "ups_saver",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UpsServiceType::Standard => "Standard",
            UpsServiceType::NextDayAir => "Next Day Air",
            UpsServiceType::SecondDayAir => "2nd Day Air",
            UpsServiceType::Ground => "Ground",
            UpsServiceType::WorldwideExpedited => "Expedited",
            UpsServiceType::ThreeDaySelect => "3 Day Select",
            UpsServiceType::NextDayAirSaver => "Next Day Air Saver",
            UpsServiceType::NextDayAirEarlyAm => "Next Day Air Early AM",
            UpsServiceType::ExpressPlus => "Express Plus",
            UpsServiceType::SecondDayAirAm => "2nd Day Air A.M.",
            UpsServiceType::UpsSaver => "UPS Saver",
        }
    }
}

/// UPS-specific settings carried by a shipment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpsShipmentSettings {
    #[serde(default)]
    pub service_type: UpsServiceType,
    #[serde(default)]
    pub description: Option<String>,
}

impl UpsShipmentSettings {
    /// Description cut to what UPS accepts.
    pub fn description(&self) -> Option<String> {
        self.description
            .as_ref()
            .map(|d| d.chars().take(UPS_DESCRIPTION_MAX_LEN).collect())
    }
}

/// An outbound delivery order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    pub id: ShipmentId,
    pub name: String,
    #[serde(default)]
    pub carrier_id: Option<CarrierId>,
    /// Read-out of the selected carrier's type.
    #[serde(default)]
    pub carrier_type: Option<CarrierType>,
    /// Read-out of the selected carrier's code.
    #[serde(default)]
    pub carrier_code: Option<String>,
    #[serde(default)]
    pub option_ids: BTreeSet<OptionId>,
    /// Recipient.
    #[serde(default)]
    pub partner: Option<Address>,
    #[serde(default)]
    pub warehouse: Option<Warehouse>,
    /// Sender address of the company, when it differs from the warehouse.
    #[serde(default)]
    pub company_address: Option<Address>,
    #[serde(default)]
    pub number_of_packages: Option<u32>,
    /// Total weight of the shipment, in kg.
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
    #[serde(default)]
    pub ups: UpsShipmentSettings,
    #[serde(default)]
    pub carrier_tracking_ref: Option<String>,
}

impl Shipment {
    pub fn new(id: ShipmentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_partner(mut self, partner: Address) -> Self {
        self.partner = Some(partner);
        self
    }

    pub fn with_warehouse(mut self, warehouse: Warehouse) -> Self {
        self.warehouse = Some(warehouse);
        self
    }

    pub fn with_packages(mut self, number_of_packages: u32) -> Self {
        self.number_of_packages = Some(number_of_packages);
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    /// Warehouse pickup address, if the warehouse has one.
    pub fn warehouse_address(&self) -> Option<&Address> {
        self.warehouse.as_ref().and_then(|w| w.address.as_ref())
    }

    /// Sender printed on labels: the company address, else the warehouse.
    pub fn label_sender_address(&self) -> Option<&Address> {
        self.company_address
            .as_ref()
            .or_else(|| self.warehouse_address())
    }

    /// Number of parcels to announce to the carrier; at least one.
    pub fn parcel_count(&self) -> u32 {
        self.number_of_packages.filter(|n| *n > 0).unwrap_or(1)
    }

    /// Weight to announce to the carrier; one unit when unknown.
    pub fn declared_weight(&self) -> f64 {
        self.weight.filter(|w| *w > 0.0).unwrap_or(1.0)
    }
}
