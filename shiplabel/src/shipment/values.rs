//! Field values for creating or updating a shipment.

use std::collections::BTreeSet;

use crate::model::{
    Address, CarrierId, Dimensions, OptionId, Shipment, UpsServiceType, Warehouse,
};

/// Fields to set on a shipment. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShipmentValues {
    pub name: Option<String>,
    /// `Some(None)` clears the carrier.
    pub carrier_id: Option<Option<CarrierId>>,
    pub option_ids: Option<BTreeSet<OptionId>>,
    pub partner: Option<Address>,
    pub warehouse: Option<Warehouse>,
    pub company_address: Option<Address>,
    pub number_of_packages: Option<u32>,
    pub weight: Option<f64>,
    pub dimensions: Option<Dimensions>,
    pub ups_service_type: Option<UpsServiceType>,
    pub ups_description: Option<String>,
}

impl ShipmentValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_carrier(mut self, carrier_id: CarrierId) -> Self {
        self.carrier_id = Some(Some(carrier_id));
        self
    }

    pub fn without_carrier(mut self) -> Self {
        self.carrier_id = Some(None);
        self
    }

    pub fn with_options(mut self, options: impl IntoIterator<Item = OptionId>) -> Self {
        self.option_ids = Some(options.into_iter().collect());
        self
    }

    pub fn with_partner(mut self, partner: Address) -> Self {
        self.partner = Some(partner);
        self
    }

    pub fn with_warehouse(mut self, warehouse: Warehouse) -> Self {
        self.warehouse = Some(warehouse);
        self
    }

    pub fn with_company_address(mut self, address: Address) -> Self {
        self.company_address = Some(address);
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

    pub fn with_ups_service(mut self, service_type: UpsServiceType) -> Self {
        self.ups_service_type = Some(service_type);
        self
    }

    pub fn with_ups_description(mut self, description: impl Into<String>) -> Self {
        self.ups_description = Some(description.into());
        self
    }

    /// Option set to apply after carrier selection.
    ///
    /// `None` when no set was given, or when the values select a carrier and
    /// the set is empty: the carrier's defaults apply in both cases.
    pub(crate) fn explicit_options(&self) -> Option<&BTreeSet<OptionId>> {
        let selects_carrier = matches!(self.carrier_id, Some(Some(_)));
        self.option_ids
            .as_ref()
            .filter(|options| !(selects_carrier && options.is_empty()))
    }

    /// Copy every plain field onto `shipment`.
    ///
    /// Carrier and options are left to the caller, which has to resolve
    /// the carrier first.
    pub(crate) fn apply_fields(&self, shipment: &mut Shipment) {
        if let Some(name) = &self.name {
            shipment.name = name.clone();
        }
        if let Some(partner) = &self.partner {
            shipment.partner = Some(partner.clone());
        }
        if let Some(warehouse) = &self.warehouse {
            shipment.warehouse = Some(warehouse.clone());
        }
        if let Some(address) = &self.company_address {
            shipment.company_address = Some(address.clone());
        }
        if let Some(count) = self.number_of_packages {
            shipment.number_of_packages = Some(count);
        }
        if let Some(weight) = self.weight {
            shipment.weight = Some(weight);
        }
        if let Some(dimensions) = self.dimensions {
            shipment.dimensions = Some(dimensions);
        }
        if let Some(service_type) = self.ups_service_type {
            shipment.ups.service_type = service_type;
        }
        if let Some(description) = &self.ups_description {
            shipment.ups.description = Some(description.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ShipmentId;

    #[test]
    fn test_apply_fields_leaves_unset_fields() {
        let mut shipment = Shipment::new(ShipmentId(1), "OUT/0001").with_weight(3.0);
        ShipmentValues::new()
            .with_packages(2)
            .with_ups_service(UpsServiceType::Ground)
            .apply_fields(&mut shipment);

        assert_eq!(shipment.name, "OUT/0001");
        assert_eq!(shipment.weight, Some(3.0));
        assert_eq!(shipment.number_of_packages, Some(2));
        assert_eq!(shipment.ups.service_type, UpsServiceType::Ground);
    }

    #[test]
    fn test_empty_options_with_carrier_are_not_explicit() {
        let values = ShipmentValues::new().with_carrier(CarrierId(1)).with_options([]);
        assert!(values.explicit_options().is_none());

        let values = ShipmentValues::new().with_options([]);
        assert_eq!(values.explicit_options(), Some(&BTreeSet::new()));

        let values = ShipmentValues::new()
            .with_carrier(CarrierId(1))
            .with_options([OptionId(2)]);
        assert_eq!(values.explicit_options().map(|o| o.len()), Some(1));
    }

    #[test]
    fn test_carrier_tristate() {
        assert_eq!(ShipmentValues::new().carrier_id, None);
        assert_eq!(ShipmentValues::new().without_carrier().carrier_id, Some(None));
        assert_eq!(
            ShipmentValues::new().with_carrier(CarrierId(4)).carrier_id,
            Some(Some(CarrierId(4)))
        );
    }
}
