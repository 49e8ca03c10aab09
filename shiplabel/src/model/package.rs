//! Packages: nodes of the parcel tree.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ids::PackageId;

/// The physical box, pallet or wrapper a package is made of.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticUnit {
    pub name: String,
    /// Weight of the empty enclosure, in kg.
    pub weight: f64,
}

impl LogisticUnit {
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

/// A container holding items and possibly other packages.
///
/// Packages form a tree through `parent_id`. The stored `weight` is the
/// result of the last weighing and includes the enclosure, the direct items
/// and every nested package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub id: PackageId,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<PackageId>,
    #[serde(default)]
    pub logistic_unit: Option<LogisticUnit>,
    /// Per-parcel tracking reference returned by the carrier.
    #[serde(default)]
    pub parcel_tracking: Option<String>,
    #[serde(default)]
    pub weight: f64,
}

impl Package {
    pub fn new(id: PackageId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id: None,
            logistic_unit: None,
            parcel_tracking: None,
            weight: 0.0,
        }
    }

    pub fn with_parent(mut self, parent_id: PackageId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_logistic_unit(mut self, unit: LogisticUnit) -> Self {
        self.logistic_unit = Some(unit);
        self
    }

    pub fn with_parcel_tracking(mut self, tracking: impl Into<String>) -> Self {
        self.parcel_tracking = Some(tracking.into());
        self
    }

    /// Weight of the enclosure alone; zero when the package has none.
    pub fn enclosure_weight(&self) -> f64 {
        self.logistic_unit.as_ref().map_or(0.0, |ul| ul.weight)
    }

    /// Name shown to users, e.g. `PACK67 [1Z999] 13.5 kg`.
    pub fn display_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(tracking) = self.parcel_tracking.as_deref().filter(|t| !t.is_empty()) {
            write!(f, " [{}]", tracking)?;
        }
        if self.weight != 0.0 {
            write!(f, " {} kg", self.weight)?;
        }
        Ok(())
    }
}
