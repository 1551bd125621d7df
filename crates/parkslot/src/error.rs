//! Error types for parkslot.
//!
//! Every failure in the crate is an [`Error`]. Callers that need to decide how
//! to surface a failure (HTTP status, exit code) ask for its [`ErrorKind`].

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for parkslot operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Slot Errors ===
    /// The referenced slot does not exist.
    #[error("slot not found: {slot_number}")]
    SlotNotFound {
        /// The slot number that was looked up.
        slot_number: String,
    },

    /// Malformed input from the caller.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of what was wrong with the input.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for parkslot operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Caller-facing classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A referenced slot does not exist. Client error, not retried.
    NotFound,
    /// Malformed input. Client error.
    InvalidArgument,
    /// Storage unreachable or a query failed. Server error.
    StoreUnavailable,
    /// Anything else. Reported as a generic server error.
    Internal,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::InvalidArgument => write!(f, "invalid_argument"),
            Self::StoreUnavailable => write!(f, "store_unavailable"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a slot-not-found error.
    #[must_use]
    pub fn slot_not_found(slot_number: impl Into<String>) -> Self {
        Self::SlotNotFound {
            slot_number: slot_number.into(),
        }
    }

    /// Create an invalid argument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SlotNotFound { .. } => ErrorKind::NotFound,
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::DatabaseOpen { .. }
            | Self::DatabaseQuery(_)
            | Self::DatabaseMigration { .. }
            | Self::DirectoryCreate { .. }
            | Self::Io(_) => ErrorKind::StoreUnavailable,
            Self::ConfigLoad(_)
            | Self::ConfigValidation { .. }
            | Self::Json(_)
            | Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Check if this error means the slot does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Check if this error was caused by bad caller input.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        self.kind() == ErrorKind::InvalidArgument
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::slot_not_found("Z9");
        assert_eq!(err.to_string(), "slot not found: Z9");

        let err = Error::invalid_argument("numberOfSlots must be positive");
        assert_eq!(
            err.to_string(),
            "invalid argument: numberOfSlots must be positive"
        );
    }

    #[test]
    fn test_internal_error() {
        let err = Error::internal("something went wrong");
        assert_eq!(err.to_string(), "internal error: something went wrong");
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_kind_not_found() {
        let err = Error::slot_not_found("A1");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.is_not_found());
        assert!(!err.is_invalid_argument());
    }

    #[test]
    fn test_kind_invalid_argument() {
        let err = Error::invalid_argument("blank slot number");
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.is_invalid_argument());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_from_rusqlite_error_is_store_unavailable() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err: Error = sqlite_err.into();
            assert!(matches!(err, Error::DatabaseQuery(_)));
            assert_eq!(err.kind(), ErrorKind::StoreUnavailable);
        }
    }

    #[test]
    fn test_database_migration_error_display() {
        let err = Error::DatabaseMigration {
            message: "version mismatch".to_string(),
        };
        assert!(err.to_string().contains("version mismatch"));
        assert_eq!(err.kind(), ErrorKind::StoreUnavailable);
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "port must be non-zero".to_string(),
        };
        assert!(err.to_string().contains("port must be non-zero"));
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
        assert_eq!(err.kind(), ErrorKind::StoreUnavailable);
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::NotFound.to_string(), "not_found");
        assert_eq!(ErrorKind::InvalidArgument.to_string(), "invalid_argument");
        assert_eq!(ErrorKind::StoreUnavailable.to_string(), "store_unavailable");
        assert_eq!(ErrorKind::Internal.to_string(), "internal");
    }
}
