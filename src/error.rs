//! Error types for conversion operations

use std::fmt;

/// Errors that can occur while turning a page into text
///
/// Malformed markup is never an error: the parser recovers and the
/// converter works on whatever tree it gets back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// Input bytes could not be decoded as text
    DecodeError(String),
    /// URI lacks a scheme or a host
    InvalidUri(String),
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::DecodeError(msg) => write!(f, "Decode error: {}", msg),
            ConversionError::InvalidUri(uri) => write!(f, "Invalid URI: {}", uri),
        }
    }
}

impl std::error::Error for ConversionError {}
