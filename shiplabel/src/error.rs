//! Error types for weighing and label generation.

use thiserror::Error;

use crate::model::{CarrierId, PackageId};
use crate::store::StoreError;

/// Result type for shipping operations.
pub type ShipResult<T> = Result<T, ShipError>;

/// Errors raised to the caller of a weighing or label operation.
///
/// A weight that could not be fully computed is not an error; see
/// [`crate::weight::WeightReport`].
#[derive(Debug, Error)]
pub enum ShipError {
    /// The shipment has no carrier to generate labels with.
    #[error("no carrier is selected on shipment {shipment}")]
    NoCarrier { shipment: String },

    /// The carrier lacks the account configuration its integration needs.
    #[error("No {kind} config defined in carrier {carrier}")]
    NoCarrierConfig { kind: &'static str, carrier: CarrierId },

    /// The warehouse the shipment leaves from has no address.
    #[error("Please define an address in the {warehouse} warehouse")]
    MissingWarehouseAddress { warehouse: String },

    /// The shipment has no recipient address.
    #[error("shipment {shipment} has no recipient address")]
    MissingRecipient { shipment: String },

    /// A mandatory option of the selected carrier would be removed.
    #[error(
        "You should not remove a mandatory option. \
         Please cancel the edit or add back the option: {option}."
    )]
    MandatoryOptionRemoved { option: String },

    /// Default label strategy: no carrier integration produced a label.
    #[error("No label is configured for the selected delivery method.")]
    NoLabelConfigured,

    /// Labels were already generated for the shipment.
    #[error(
        "Some labels already exist for the shipment {shipment}.\n\
         Please delete the existing labels in the attachments of this shipment and try again"
    )]
    LabelsAlreadyExist { shipment: String },

    /// The carrier service rejected or failed the request.
    #[error("{carrier} Error: {message}")]
    Carrier {
        carrier: &'static str,
        message: String,
    },

    /// A package contains itself through its nested packages.
    #[error("package {package} contains itself")]
    PackageCycle { package: PackageId },

    /// The store could not serve the request.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ShipError {
    /// Configuration problems: fix the carrier or warehouse setup and retry.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ShipError::NoCarrier { .. }
                | ShipError::NoCarrierConfig { .. }
                | ShipError::MissingWarehouseAddress { .. }
                | ShipError::MissingRecipient { .. }
        )
    }
}
