//! Custom error types for the liveness monitor
//!
//! Provides structured error handling with context for the failure
//! scenarios that cross module boundaries: static configuration problems
//! (the only fatal class) and JSON-RPC decode problems (absorbed by the
//! quorum layer).

use std::fmt;

/// Configuration error variants
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to load configuration file
    LoadFailed { path: String, reason: String },

    /// Invalid configuration value
    InvalidValue { field: String, reason: String },

    /// Missing required configuration
    MissingRequired { field: String },

    /// Configuration parsing error
    ParseError { reason: String },
}

/// JSON-RPC decode error variants
#[derive(Debug)]
pub enum RpcError {
    /// Endpoint returned a JSON-RPC error object
    Endpoint { code: i64, message: String },

    /// A hex quantity could not be parsed
    InvalidQuantity { value: String },

    /// The response lacked an expected field
    MissingField { field: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path, reason)
            }
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
            ConfigError::MissingRequired { field } => {
                write!(f, "Missing required field: {}", field)
            }
            ConfigError::ParseError { reason } => {
                write!(f, "Failed to parse config: {}", reason)
            }
        }
    }
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RpcError::Endpoint { code, message } => {
                write!(f, "RPC error {}: {}", code, message)
            }
            RpcError::InvalidQuantity { value } => {
                write!(f, "Invalid hex quantity '{}'", value)
            }
            RpcError::MissingField { field } => {
                write!(f, "Missing field in RPC response: {}", field)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for RpcError {}
