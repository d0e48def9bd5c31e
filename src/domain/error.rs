use thiserror::Error;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The detail cache could not be reached on the read path.
    /// Retryable; the read is aborted rather than degraded to the store.
    #[error("Unable to connect to cache: {0}")]
    CacheUnavailable(String),

    /// The backing store rejected an operation, carrying its own descriptions.
    #[error("Store failure: {}", .0.join(", "))]
    Store(Vec<String>),
}

impl DirectoryError {
    /// Whether the operation may succeed if retried unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DirectoryError::CacheUnavailable(_))
    }

    /// Human-readable messages for a uniform API error body.
    pub fn messages(&self) -> Vec<String> {
        match self {
            DirectoryError::Store(msgs) => msgs.clone(),
            other => vec![other.to_string()],
        }
    }
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;
