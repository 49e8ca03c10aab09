//! Newtype identifiers for stored records.

use serde::{Deserialize, Serialize};

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        #[repr(transparent)]
        pub struct $name(pub u64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }
    };
}

record_id!(
    /// Identifier of a package (a node in the parcel tree).
    PackageId
);
record_id!(
    /// Identifier of an item (pack operation) moved into a package.
    ItemId
);
record_id!(
    /// Identifier of an outbound shipment.
    ShipmentId
);
record_id!(
    /// Identifier of a delivery carrier.
    CarrierId
);
record_id!(
    /// Identifier of a carrier option.
    OptionId
);
record_id!(
    /// Identifier of a persisted label attachment.
    LabelId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_raw_number() {
        assert_eq!(PackageId(65).to_string(), "65");
        assert_eq!(ShipmentId::from(7).to_string(), "7");
    }

    #[test]
    fn test_display_honours_width() {
        assert_eq!(format!("{:>5}", LabelId(7)), "    7");
        assert_eq!(format!("{:<3}|", PackageId(12)), "12 |");
    }

    #[test]
    fn test_serializes_transparently() {
        let json = serde_json::to_string(&PackageId(12)).unwrap();
        assert_eq!(json, "12");

        let id: CarrierId = serde_json::from_str("3").unwrap();
        assert_eq!(id, CarrierId(3));
    }
}
