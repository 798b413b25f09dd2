//! Product Repository

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::{Product, ProductCreate, ProductEdit};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "product";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all products, oldest first (listing view)
    pub async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product ORDER BY created_at")
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find product by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let product: Option<Product> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(product)
    }

    /// Highest assigned code within a seria, if any product shares it
    ///
    /// Read-then-write: concurrent creates of the same seria may observe the
    /// same maximum and assign duplicate codes.
    pub async fn max_code_for_seria(&self, seria: &str) -> RepoResult<Option<i64>> {
        let seria_owned = seria.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT math::max(code) AS max_code FROM product WHERE seria = $seria GROUP ALL")
            .bind(("seria", seria_owned))
            .await?;
        let max_code: Option<i64> = result.take((0, "max_code"))?;
        Ok(max_code)
    }

    /// Create a new product
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        let created_at = chrono::Utc::now().timestamp_millis();
        let mut result = self
            .base
            .db()
            .query(
                "CREATE product SET \
                 name = $name, brand = $brand, category = $category, \
                 seria = $seria, code = $code, \
                 main_image = $main_image, hover_image = $hover_image, \
                 created_at = $created_at",
            )
            .bind(("name", data.name))
            .bind(("brand", data.brand))
            .bind(("category", data.category))
            .bind(("seria", data.seria))
            .bind(("code", data.code))
            .bind(("main_image", data.main_image))
            .bind(("hover_image", data.hover_image))
            .bind(("created_at", created_at))
            .await?;
        let products: Vec<Product> = result.take(0)?;
        products
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Apply an edit to an existing product
    ///
    /// Name, brand and category are always written; image paths only when a
    /// replacement was uploaded. `seria`/`code` are intentionally untouched.
    pub async fn update(&self, id: &str, data: ProductEdit) -> RepoResult<Product> {
        let thing = record_id(TABLE, id);

        let mut set_parts: Vec<&str> =
            vec!["name = $name", "brand = $brand", "category = $category"];
        if data.main_image.is_some() {
            set_parts.push("main_image = $main_image");
        }
        if data.hover_image.is_some() {
            set_parts.push("hover_image = $hover_image");
        }

        let query_str = format!("UPDATE $thing SET {} RETURN AFTER", set_parts.join(", "));

        let mut query = self
            .base
            .db()
            .query(&query_str)
            .bind(("thing", thing))
            .bind(("name", data.name))
            .bind(("brand", data.brand))
            .bind(("category", data.category));

        if let Some(v) = data.main_image {
            query = query.bind(("main_image", v));
        }
        if let Some(v) = data.hover_image {
            query = query.bind(("hover_image", v));
        }

        let mut result = query.await?;
        let products: Vec<Product> = result.take(0)?;
        products
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }
}
