//! Product Image Model
//!
//! 商品图库子记录，随商品创建/更新时追加，可单独删除

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// One gallery image attached to a product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductImage {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Owning product
    #[serde(with = "serde_helpers::record_id")]
    pub product: RecordId,
    /// Stored file name in the gallery folder
    pub image: String,
    /// Insertion order within the gallery
    #[serde(default)]
    pub sort_order: i32,
}
