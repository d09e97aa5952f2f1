//! Error types for SamudraIO

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// SamudraIO error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error (socket creation, config file access)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Configuration parsed but is not usable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Destination host did not resolve to a socket address
    #[error("Cannot resolve {host}:{port}: {reason}")]
    AddressResolution {
        /// Destination host as configured
        host: String,
        /// Destination port
        port: u16,
        /// Resolver failure description
        reason: String,
    },

    /// Datagram could not be handed to the network stack
    #[error("Send to {destination} failed: {reason}")]
    Send {
        /// Resolved destination address
        destination: String,
        /// Underlying failure description
        reason: String,
    },

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
