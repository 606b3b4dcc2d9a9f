//! Adapter implementations
//!
//! Adapters implement the repository port with concrete storage:
//! - DuckDB for durable, on-disk wishlists
//! - Process memory for tests and embedding

pub mod duckdb;
pub mod memory;
