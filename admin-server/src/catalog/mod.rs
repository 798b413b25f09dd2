//! 商品目录管理 - 后台核心领域逻辑
//!
//! # 模块结构
//!
//! - [`form`] - 表单解析 (multipart) 与表单上下文
//! - [`validate`] - 有序校验管线 (首个失败即返回)
//! - [`seria`] - 商品系列号与编号派生
//! - [`service`] - 创建 / 更新 / 删除图库图片

pub mod form;
pub mod seria;
pub mod service;
pub mod validate;

pub use form::{FormContext, ProductForm, UploadedImage};
pub use service::{ProductAdminService, ProductDetail};
