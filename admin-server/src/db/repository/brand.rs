//! Brand Repository

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::{Brand, BrandCreate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "brand";

#[derive(Clone)]
pub struct BrandRepository {
    base: BaseRepository,
}

impl BrandRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all non-deleted brands ordered by name
    pub async fn find_active(&self) -> RepoResult<Vec<Brand>> {
        let brands: Vec<Brand> = self
            .base
            .db()
            .query("SELECT * FROM brand WHERE is_deleted = false ORDER BY name")
            .await?
            .take(0)?;
        Ok(brands)
    }

    /// Find brand by id (deleted rows included)
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Brand>> {
        let brand: Option<Brand> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(brand)
    }

    /// Create a new brand
    pub async fn create(&self, data: BrandCreate) -> RepoResult<Brand> {
        let mut result = self
            .base
            .db()
            .query("CREATE brand SET name = $name, is_deleted = false")
            .bind(("name", data.name))
            .await?;
        let brands: Vec<Brand> = result.take(0)?;
        brands
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create brand".to_string()))
    }

    /// Soft-delete a brand (excluded from active queries, rows keep referencing it)
    pub async fn soft_delete(&self, id: &str) -> RepoResult<()> {
        let thing = record_id(TABLE, id);
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET is_deleted = true RETURN AFTER")
            .bind(("thing", thing))
            .await?;
        let brands: Vec<Brand> = result.take(0)?;
        if brands.is_empty() {
            return Err(RepoError::NotFound(format!("Brand {} not found", id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use surrealdb::engine::local::Mem;

    async fn test_db() -> Surreal<Db> {
        let db = Surreal::new::<Mem>(()).await.unwrap();
        db.use_ns("test").use_db("test").await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_find_active_excludes_soft_deleted() {
        let repo = BrandRepository::new(test_db().await);

        let nike = repo
            .create(BrandCreate {
                name: "Nike".to_string(),
            })
            .await
            .unwrap();
        repo.create(BrandCreate {
            name: "Adidas".to_string(),
        })
        .await
        .unwrap();

        let nike_id = nike.id.unwrap().to_string();
        repo.soft_delete(&nike_id).await.unwrap();

        let active = repo.find_active().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Adidas");

        // Deleted row is still readable by id
        let deleted = repo.find_by_id(&nike_id).await.unwrap().unwrap();
        assert!(deleted.is_deleted);
    }

    #[tokio::test]
    async fn test_soft_delete_unknown_brand() {
        let repo = BrandRepository::new(test_db().await);
        let result = repo.soft_delete("missing").await;
        assert!(matches!(result, Err(RepoError::NotFound(_))));
    }
}
