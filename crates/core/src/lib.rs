//! Domain building blocks shared by the storage layer and the HTTP server.

pub mod error;
pub mod hashing;
pub mod storage;
pub mod types;
pub mod upload;
