//! CLI error type.

use std::fmt;

use shiplabel::config::ConfigError;
use shiplabel::logging::LoggingError;
use shiplabel::store::SnapshotError;
use shiplabel::ShipError;

/// Errors reported to the user by the command line tool.
#[derive(Debug)]
pub enum CliError {
    /// Configuration file or key problem.
    Config(String),
    /// The store snapshot could not be read or written.
    Snapshot(String),
    /// Logging could not be set up.
    Logging(String),
    /// A weighing or label operation failed.
    Ship(ShipError),
    /// Writing label files failed.
    Export(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Snapshot(msg) => write!(f, "Store snapshot error: {}", msg),
            CliError::Logging(msg) => write!(f, "Logging error: {}", msg),
            CliError::Ship(e) if e.is_configuration() => {
                write!(f, "{}\nCheck the carrier and warehouse setup.", e)
            }
            CliError::Ship(e) => write!(f, "{}", e),
            CliError::Export(msg) => write!(f, "Export failed: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Ship(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<SnapshotError> for CliError {
    fn from(e: SnapshotError) -> Self {
        CliError::Snapshot(e.to_string())
    }
}

impl From<LoggingError> for CliError {
    fn from(e: LoggingError) -> Self {
        CliError::Logging(e.to_string())
    }
}

impl From<ShipError> for CliError {
    fn from(e: ShipError) -> Self {
        CliError::Ship(e)
    }
}
