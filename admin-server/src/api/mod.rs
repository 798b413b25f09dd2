//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`brands`] - 品牌参照数据 (下拉列表)
//! - [`categories`] - 分类参照数据 (下拉列表)
//! - [`products`] - 商品管理接口

pub mod brands;
pub mod categories;
pub mod health;
pub mod products;

// Re-export common types for handlers
pub use shared::{ApiResponse, AppResult};
