//! Carrier and option selection on a shipment.

use std::collections::BTreeSet;

use crate::error::{ShipError, ShipResult};
use crate::model::{Carrier, OptionId, Shipment};

/// Options a shipment may choose from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionDomain {
    /// No carrier selected; any option may be set.
    Unrestricted,
    /// The options offered by the selected carrier.
    Restricted(BTreeSet<OptionId>),
}

impl OptionDomain {
    pub fn allows(&self, option: OptionId) -> bool {
        match self {
            OptionDomain::Unrestricted => true,
            OptionDomain::Restricted(ids) => ids.contains(&option),
        }
    }
}

/// Select (or clear) the carrier of a shipment.
///
/// The carrier's type and code are copied to the shipment and its options
/// are replaced by the carrier's defaults. Clearing the carrier keeps the
/// current options.
pub fn select_carrier(shipment: &mut Shipment, carrier: Option<&Carrier>) -> OptionDomain {
    match carrier {
        Some(carrier) => {
            shipment.carrier_id = Some(carrier.id);
            shipment.carrier_type = Some(carrier.carrier_type);
            shipment.carrier_code = carrier.code.clone();
            shipment.option_ids = carrier.default_options();
            OptionDomain::Restricted(carrier.available_option_ids())
        }
        None => {
            shipment.carrier_id = None;
            shipment.carrier_type = None;
            shipment.carrier_code = None;
            OptionDomain::Unrestricted
        }
    }
}

/// Replace the options of a shipment.
///
/// Fails with [`ShipError::MandatoryOptionRemoved`] when a mandatory option
/// of `carrier` is missing from `options`; the shipment is left untouched.
pub fn change_options(
    shipment: &mut Shipment,
    carrier: Option<&Carrier>,
    options: BTreeSet<OptionId>,
) -> ShipResult<()> {
    if let Some(carrier) = carrier {
        if let Some(missing) = carrier.mandatory_options().find(|o| !options.contains(&o.id)) {
            return Err(ShipError::MandatoryOptionRemoved {
                option: missing.name.clone(),
            });
        }
    }
    shipment.option_ids = options;
    Ok(())
}
