//! Repository Module
//!
//! Provides CRUD operations for the SurrealDB tables of the catalog domain.

pub mod brand;
pub mod category;
pub mod product;
pub mod product_image;

// Re-exports
pub use brand::BrandRepository;
pub use category::CategoryRepository;
pub use product::ProductRepository;
pub use product_image::ProductImageRepository;

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: 全栈统一使用 "table:id" 格式
// =============================================================================
//
// API 层接受 "table:id" 或裸 key 两种写法，仓库层一律折叠成 RecordId。

/// Build a RecordId from an API-supplied id, tolerating a "table:" prefix
pub fn record_id(table: &str, id: &str) -> RecordId {
    match id.split_once(':') {
        Some((tb, key)) if tb == table => RecordId::from_table_key(table, key),
        _ => RecordId::from_table_key(table, id),
    }
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_accepts_bare_key() {
        let id = record_id("brand", "abc123");
        assert_eq!(id.to_string(), "brand:abc123");
    }

    #[test]
    fn test_record_id_strips_table_prefix() {
        let id = record_id("brand", "brand:abc123");
        assert_eq!(id.to_string(), "brand:abc123");
    }
}
