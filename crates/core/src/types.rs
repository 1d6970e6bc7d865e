/// Record ids come from a PostgreSQL BIGSERIAL column.
pub type DbId = i64;

/// Stored timestamps are always UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
