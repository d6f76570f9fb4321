//! Storage-specific error type wrapping sqlx errors.

use smarthome_domain::error::SmartHomeError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to serialize or deserialize a stored JSON value.
    #[error("JSON serialization error")]
    Json(#[from] serde_json::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for SmartHomeError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// Turn a domain decoding failure into a row decoding error.
pub(crate) fn decode<E>(err: E) -> sqlx::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    sqlx::Error::Decode(Box::new(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_box_storage_error_into_domain_error() {
        let err: SmartHomeError = StorageError::Database(sqlx::Error::RowNotFound).into();
        assert!(matches!(err, SmartHomeError::Storage(_)));
    }
}
