//! Product Image Repository

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::ProductImage;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "product_image";

#[derive(Clone)]
pub struct ProductImageRepository {
    base: BaseRepository,
}

impl ProductImageRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Gallery of a product, in insertion order
    pub async fn find_by_product(&self, product: &RecordId) -> RepoResult<Vec<ProductImage>> {
        let images: Vec<ProductImage> = self
            .base
            .db()
            .query("SELECT * FROM product_image WHERE product = $product ORDER BY sort_order")
            .bind(("product", product.clone()))
            .await?
            .take(0)?;
        Ok(images)
    }

    /// Find one gallery image by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<ProductImage>> {
        let image: Option<ProductImage> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(image)
    }

    /// Attach a stored gallery file to a product
    pub async fn create(
        &self,
        product: RecordId,
        image: String,
        sort_order: i32,
    ) -> RepoResult<ProductImage> {
        let mut result = self
            .base
            .db()
            .query(
                "CREATE product_image SET \
                 product = $product, image = $image, sort_order = $sort_order",
            )
            .bind(("product", product))
            .bind(("image", image))
            .bind(("sort_order", sort_order))
            .await?;
        let images: Vec<ProductImage> = result.take(0)?;
        images
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create product image".to_string()))
    }

    /// Delete a gallery image row
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let deleted: Option<ProductImage> = self.base.db().delete(record_id(TABLE, id)).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!(
                "Product image {} not found",
                id
            )));
        }
        Ok(())
    }
}
