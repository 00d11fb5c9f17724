//! # Catalog Error Types
//!
//! Failures while loading, validating or saving reference data.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Catalog Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │   File Access   │  │     Parsing     │  │      Validation         │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Io             │  │  TomlParse      │  │  InvalidConfig          │ │
//! │  │  NoConfigPath   │  │  TomlSerialize  │  │  DuplicateSupplier      │ │
//! │  │                 │  │  Json           │  │  InvalidCatalog         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pricing engine itself never fails; every error here is raised before
//! a quote is computed.

use thiserror::Error;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    // =========================================================================
    // File Access
    // =========================================================================
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No explicit path was given and the platform has no config directory.
    #[error("No config path available")]
    NoConfigPath,

    // =========================================================================
    // Parsing
    // =========================================================================
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to write TOML config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Failed to parse supplier catalog: {0}")]
    Json(#[from] serde_json::Error),

    // =========================================================================
    // Validation
    // =========================================================================
    #[error("Invalid valuation configuration: {0}")]
    InvalidConfig(String),

    #[error("Supplier '{0}' is defined more than once")]
    DuplicateSupplier(String),

    #[error("Invalid catalog for supplier '{supplier}' at row {row}: {reason}")]
    InvalidCatalog {
        supplier: String,
        row: usize,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CatalogError::DuplicateSupplier("melee".to_string());
        assert_eq!(err.to_string(), "Supplier 'melee' is defined more than once");

        let err = CatalogError::InvalidCatalog {
            supplier: "melee".to_string(),
            row: 2,
            reason: "duplicate mm".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid catalog for supplier 'melee' at row 2: duplicate mm"
        );
    }

    #[test]
    fn test_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CatalogError = io.into();
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
