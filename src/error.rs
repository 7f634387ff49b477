//! Error types for copperflow.
//!
//! A failed layout run has no partial result: a half-built board is not a
//! useful artifact, so every error here aborts generation and unwinds to
//! the entry point, which reports it and writes nothing.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Errors raised during board construction.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Two buses (or a bus and a distributor) disagree in conductor count.
    #[error("bus length mismatch in {context}: expected {expected}, got {actual}")]
    GeometryMismatch {
        /// Operation that detected the mismatch (e.g. "meet", "breakout").
        context: String,
        /// Conductor count required by the receiving side.
        expected: usize,
        /// Conductor count actually supplied.
        actual: usize,
    },

    /// A pad or rail name was requested that nothing registered.
    #[error("no pad or rail named '{name}'")]
    NameNotFound {
        /// The name that failed to resolve.
        name: String,
    },

    /// A rename would give two pads of one component the same name.
    #[error("duplicate pad name '{name}'")]
    NameCollision {
        /// The name already in use.
        name: String,
    },

    /// A pooled interface role was requested more times than pins exist.
    #[error("interface pool '{role}' exhausted after {capacity} allocations")]
    PoolExhausted {
        /// The pooled role name.
        role: String,
        /// Number of physical pins the pool started with.
        capacity: usize,
    },

    /// A river's members do not share one heading.
    #[error("river member {index} heads {actual}°, expected {expected}°")]
    HeadingMismatch {
        /// Index of the offending member.
        index: usize,
        /// Heading of the first member in degrees.
        expected: f64,
        /// Heading of the offending member in degrees.
        actual: f64,
    },

    /// A bus conductor reached `breakout` without a name to propagate.
    #[error("bus member {index} has no name to bind a rail to")]
    UnnamedConductor {
        /// Index of the nameless member within the bus.
        index: usize,
    },

    /// An escape pivot has no successor pad to measure lead spacing from.
    #[error("escape pivot {pivot} has no successor among {available} pads")]
    PivotOutOfRange {
        /// The footprint's pivot index into the filtered pad list.
        pivot: usize,
        /// Length of the filtered pad list.
        available: usize,
    },
}

impl LayoutError {
    /// Creates a geometry mismatch error.
    pub fn geometry_mismatch(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::GeometryMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }

    /// Creates a name lookup error.
    pub fn name_not_found(name: impl Into<String>) -> Self {
        Self::NameNotFound { name: name.into() }
    }

    /// Creates a name collision error.
    pub fn name_collision(name: impl Into<String>) -> Self {
        Self::NameCollision { name: name.into() }
    }

    /// Creates a pool exhaustion error.
    pub fn pool_exhausted(role: impl Into<String>, capacity: usize) -> Self {
        Self::PoolExhausted {
            role: role.into(),
            capacity,
        }
    }
}

/// Errors that can occur during configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration file: {path}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation failure.
        message: String,
    },
}

/// Errors raised while writing output artifacts.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Output file could not be written.
    #[error("failed to write output file: {path}")]
    FileWrite {
        /// Path to the output file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_mismatch_display() {
        let err = LayoutError::geometry_mismatch("breakout", 6, 5);
        assert_eq!(
            err.to_string(),
            "bus length mismatch in breakout: expected 6, got 5"
        );
    }

    #[test]
    fn name_not_found_display() {
        let err = LayoutError::name_not_found("SDA");
        assert_eq!(err.to_string(), "no pad or rail named 'SDA'");
    }

    #[test]
    fn pool_exhausted_display() {
        let err = LayoutError::pool_exhausted("analog", 3);
        assert_eq!(
            err.to_string(),
            "interface pool 'analog' exhausted after 3 allocations"
        );
    }

    #[test]
    fn validation_error_display() {
        let error = ConfigError::ValidationError {
            message: "invalid setting".to_string(),
        };
        assert!(error.to_string().contains("invalid setting"));
    }
}
