//! Category Repository

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::{Category, CategoryCreate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "category";

#[derive(Clone)]
pub struct CategoryRepository {
    base: BaseRepository,
}

impl CategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find categories products may be assigned to
    /// (non-deleted, non-umbrella), ordered by name
    pub async fn find_selectable(&self) -> RepoResult<Vec<Category>> {
        let categories: Vec<Category> = self
            .base
            .db()
            .query(
                "SELECT * FROM category WHERE is_deleted = false AND is_main = false ORDER BY name",
            )
            .await?
            .take(0)?;
        Ok(categories)
    }

    /// Find category by id (deleted and umbrella rows included)
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Category>> {
        let category: Option<Category> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(category)
    }

    /// Create a new category
    pub async fn create(&self, data: CategoryCreate) -> RepoResult<Category> {
        let mut result = self
            .base
            .db()
            .query("CREATE category SET name = $name, is_deleted = false, is_main = $is_main")
            .bind(("name", data.name))
            .bind(("is_main", data.is_main))
            .await?;
        let categories: Vec<Category> = result.take(0)?;
        categories
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create category".to_string()))
    }

    /// Soft-delete a category
    pub async fn soft_delete(&self, id: &str) -> RepoResult<()> {
        let thing = record_id(TABLE, id);
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET is_deleted = true RETURN AFTER")
            .bind(("thing", thing))
            .await?;
        let categories: Vec<Category> = result.take(0)?;
        if categories.is_empty() {
            return Err(RepoError::NotFound(format!("Category {} not found", id)));
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
    async fn test_find_selectable_excludes_main_and_deleted() {
        let repo = CategoryRepository::new(test_db().await);

        repo.create(CategoryCreate {
            name: "Shoes".to_string(),
            is_main: false,
        })
        .await
        .unwrap();
        repo.create(CategoryCreate {
            name: "Apparel".to_string(),
            is_main: true,
        })
        .await
        .unwrap();
        let gone = repo
            .create(CategoryCreate {
                name: "Discontinued".to_string(),
                is_main: false,
            })
            .await
            .unwrap();
        repo.soft_delete(&gone.id.unwrap().to_string())
            .await
            .unwrap();

        let selectable = repo.find_selectable().await.unwrap();
        assert_eq!(selectable.len(), 1);
        assert_eq!(selectable[0].name, "Shoes");
    }
}
