//! Brand Model
//!
//! 品牌参照数据，软删除后从所有下拉与校验中排除

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Brand reference data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brand {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    /// Soft-delete flag; deleted brands stay in the table but are
    /// excluded from every active-record query
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_deleted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandCreate {
    pub name: String,
}
