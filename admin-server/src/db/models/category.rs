//! Category Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Category reference data
///
/// `is_main` 标记顶级伞形分类，商品不能直接挂到这类分类上。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_deleted: bool,
    /// Top-level umbrella category, not selectable for products
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_main: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub name: String,
    #[serde(default)]
    pub is_main: bool,
}
