//! Items moved into packages and the products they carry.

use serde::{Deserialize, Serialize};

use super::ids::{ItemId, PackageId, ShipmentId};

/// Unit of measure of a product.
///
/// Only mass (kilogram) and count (unit) measures can be turned into a
/// weight without a conversion table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitOfMeasure {
    Kilogram,
    Unit,
    Other(String),
}

impl UnitOfMeasure {
    /// True for measures whose quantity maps directly onto a weight.
    pub fn is_mass_or_count(&self) -> bool {
        matches!(self, UnitOfMeasure::Kilogram | UnitOfMeasure::Unit)
    }
}

impl std::fmt::Display for UnitOfMeasure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitOfMeasure::Kilogram => write!(f, "kg"),
            UnitOfMeasure::Unit => write!(f, "unit"),
            UnitOfMeasure::Other(name) => write!(f, "{}", name),
        }
    }
}

/// A product as far as weighing is concerned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    /// Declared gross weight per unit, in kg.
    #[serde(default)]
    pub weight: Option<f64>,
    /// Net weight per unit, used when no gross weight is declared.
    #[serde(default)]
    pub weight_net: Option<f64>,
    /// Stock unit of measure.
    pub uom: UnitOfMeasure,
    /// Sale unit of measure, if it differs from the stock one.
    #[serde(default)]
    pub uos: Option<UnitOfMeasure>,
}

impl Product {
    /// A product counted in units with the given gross weight.
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight: Some(weight),
            weight_net: None,
            uom: UnitOfMeasure::Unit,
            uos: None,
        }
    }

    pub fn with_net_weight(mut self, weight_net: f64) -> Self {
        self.weight_net = Some(weight_net);
        self
    }

    pub fn with_uom(mut self, uom: UnitOfMeasure) -> Self {
        self.uom = uom;
        self
    }

    pub fn with_uos(mut self, uos: UnitOfMeasure) -> Self {
        self.uos = Some(uos);
        self
    }

    /// Weight of one unit: declared weight, else net weight.
    ///
    /// A zero weight counts as "not declared". Returns `None` when neither
    /// source gives a value.
    pub fn unit_weight(&self) -> Option<f64> {
        let declared = |w: Option<f64>| w.filter(|w| *w != 0.0);
        declared(self.weight).or_else(|| declared(self.weight_net))
    }

    /// True when the stock or sale unit of measure is mass or count.
    pub fn has_weighable_uom(&self) -> bool {
        self.uom.is_mass_or_count() || self.uos.as_ref().is_some_and(|u| u.is_mass_or_count())
    }
}

/// A quantity of product moved by a shipment, optionally into a package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(default)]
    pub shipment_id: Option<ShipmentId>,
    /// `None` for operations that move a whole package without content.
    #[serde(default)]
    pub product: Option<Product>,
    pub quantity: f64,
    /// Package the goods are taken from.
    #[serde(default)]
    pub package_id: Option<PackageId>,
    /// Package the goods are put into.
    #[serde(default)]
    pub result_package_id: Option<PackageId>,
    /// Last computed effective weight (unit weight × quantity).
    #[serde(default)]
    pub weight: f64,
}

impl Item {
    pub fn new(id: ItemId, product: Product, quantity: f64) -> Self {
        Self {
            id,
            shipment_id: None,
            product: Some(product),
            quantity,
            package_id: None,
            result_package_id: None,
            weight: 0.0,
        }
    }

    pub fn in_shipment(mut self, shipment_id: ShipmentId) -> Self {
        self.shipment_id = Some(shipment_id);
        self
    }

    pub fn from_package(mut self, package_id: PackageId) -> Self {
        self.package_id = Some(package_id);
        self
    }

    pub fn into_package(mut self, package_id: PackageId) -> Self {
        self.result_package_id = Some(package_id);
        self
    }

    /// The package this item ends up in: the result package, or the
    /// source package when the whole package is moved.
    pub fn destination_package(&self) -> Option<PackageId> {
        self.result_package_id.or(self.package_id)
    }
}
