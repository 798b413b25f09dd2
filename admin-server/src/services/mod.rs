//! 服务层 - 服务器核心服务
//!
//! # 服务列表
//!
//! - [`ImageStore`] - 上传图片落盘与删除

pub mod image_store;

pub use image_store::ImageStore;
