/// Failure reported by a [`crate::DogStore`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// The storage layer could not be reached.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// A statement reached the storage layer and failed there.
    #[error("Query failed: {0}")]
    Query(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_) => StoreError::Connection(err.to_string()),
            other => StoreError::Query(other.to_string()),
        }
    }
}
