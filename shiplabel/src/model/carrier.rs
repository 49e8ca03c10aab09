//! Delivery carriers, their options and account configuration.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ids::{CarrierId, OptionId};
use super::label::FileType;

/// Carrier integration a delivery method is bound to.
///
/// Label strategies are registered per carrier type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CarrierType {
    Ups,
    Seur,
    Other,
}

impl CarrierType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CarrierType::Ups => "ups",
            CarrierType::Seur => "seur",
            CarrierType::Other => "other",
        }
    }
}

impl fmt::Display for CarrierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CarrierType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ups" => Ok(CarrierType::Ups),
            "seur" => Ok(CarrierType::Seur),
            "other" => Ok(CarrierType::Other),
            _ => Err(format!("unknown carrier type '{}'", s)),
        }
    }
}

/// An option a carrier offers on its shipments (insurance, signature...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarrierOption {
    pub id: OptionId,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    /// Cannot be removed from a shipment while this carrier is selected.
    #[serde(default)]
    pub mandatory: bool,
    /// Added to a shipment when this carrier is selected.
    #[serde(default)]
    pub by_default: bool,
}

impl CarrierOption {
    pub fn new(id: OptionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            code: None,
            mandatory: false,
            by_default: false,
        }
    }

    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    pub fn by_default(mut self) -> Self {
        self.by_default = true;
        self
    }
}

/// UPS account used to create shipments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsConfig {
    pub access_license: String,
    pub username: String,
    pub password: String,
    pub shipper_number: String,
    /// Use the carrier's test environment.
    #[serde(default)]
    pub is_test: bool,
    #[serde(default = "default_ups_label_format")]
    pub label_file_format: FileType,
    #[serde(default = "default_dimension_uom")]
    pub dimension_uom: String,
    #[serde(default = "default_weight_uom")]
    pub weight_uom: String,
}

fn default_ups_label_format() -> FileType {
    FileType::Gif
}

fn default_dimension_uom() -> String {
    "CM".to_string()
}

fn default_weight_uom() -> String {
    "KGS".to_string()
}

impl UpsConfig {
    pub fn new(
        access_license: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        shipper_number: impl Into<String>,
    ) -> Self {
        Self {
            access_license: access_license.into(),
            username: username.into(),
            password: password.into(),
            shipper_number: shipper_number.into(),
            is_test: false,
            label_file_format: default_ups_label_format(),
            dimension_uom: default_dimension_uom(),
            weight_uom: default_weight_uom(),
        }
    }

    pub fn with_test_mode(mut self, is_test: bool) -> Self {
        self.is_test = is_test;
        self
    }

    pub fn with_label_format(mut self, format: FileType) -> Self {
        self.label_file_format = format;
        self
    }
}

/// SEUR account used to create shipments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeurConfig {
    pub username: String,
    pub password: String,
    pub vat: String,
    pub franchise_code: String,
    pub accounting_code: String,
    pub integration_code: String,
    /// SEUR service code, e.g. `"031"` for 24h.
    pub service_code: String,
    /// SEUR product code, sent as the packaging type.
    pub product_code: String,
    #[serde(default)]
    pub is_test: bool,
}

/// A delivery carrier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Carrier {
    pub id: CarrierId,
    pub name: String,
    pub carrier_type: CarrierType,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub available_options: Vec<CarrierOption>,
    #[serde(default)]
    pub ups_config: Option<UpsConfig>,
    #[serde(default)]
    pub seur_config: Option<SeurConfig>,
}

impl Carrier {
    pub fn new(id: CarrierId, name: impl Into<String>, carrier_type: CarrierType) -> Self {
        Self {
            id,
            name: name.into(),
            carrier_type,
            code: None,
            available_options: Vec::new(),
            ups_config: None,
            seur_config: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_option(mut self, option: CarrierOption) -> Self {
        self.available_options.push(option);
        self
    }

    pub fn with_ups_config(mut self, config: UpsConfig) -> Self {
        self.ups_config = Some(config);
        self
    }

    pub fn with_seur_config(mut self, config: SeurConfig) -> Self {
        self.seur_config = Some(config);
        self
    }

    /// Options applied when this carrier is selected.
    ///
    /// Mandatory options are always part of the defaults so that selecting
    /// a carrier never leaves the shipment in a rejected state.
    pub fn default_options(&self) -> BTreeSet<OptionId> {
        self.available_options
            .iter()
            .filter(|o| o.by_default || o.mandatory)
            .map(|o| o.id)
            .collect()
    }

    /// Ids of every option this carrier offers.
    pub fn available_option_ids(&self) -> BTreeSet<OptionId> {
        self.available_options.iter().map(|o| o.id).collect()
    }

    pub fn mandatory_options(&self) -> impl Iterator<Item = &CarrierOption> {
        self.available_options.iter().filter(|o| o.mandatory)
    }
}
