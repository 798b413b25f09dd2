//! Product Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

pub type ProductId = RecordId;

/// Product model
///
/// `seria` + `code` 在创建时一次性派生，之后保持稳定 (更新不重算)。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<ProductId>,
    pub name: String,
    /// Record link to brand (must reference a non-deleted brand)
    #[serde(with = "serde_helpers::record_id")]
    pub brand: RecordId,
    /// Record link to category (non-deleted, non-main)
    #[serde(with = "serde_helpers::record_id")]
    pub category: RecordId,
    /// 品牌名前两位 + 商品名前两位，小写
    pub seria: String,
    /// Per-seria increment, starting at 1
    pub code: i64,
    /// Stored file name of the main image (never empty)
    pub main_image: String,
    /// Stored file name of the hover image (never empty)
    pub hover_image: String,
    /// 创建时间 (Unix millis)
    #[serde(default)]
    pub created_at: i64,
}

/// Create payload (repository level — all fields already validated/derived)
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub name: String,
    pub brand: RecordId,
    pub category: RecordId,
    pub seria: String,
    pub code: i64,
    pub main_image: String,
    pub hover_image: String,
}

/// Update payload — `main_image`/`hover_image` only set when replaced
#[derive(Debug, Clone)]
pub struct ProductEdit {
    pub name: String,
    pub brand: RecordId,
    pub category: RecordId,
    pub main_image: Option<String>,
    pub hover_image: Option<String>,
}
