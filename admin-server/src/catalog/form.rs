//! Product form parsing
//!
//! 把 multipart 表单解析为 [`ProductForm`]，后续校验只针对解析结果，
//! 不再触碰请求流。创建与更新共用同一表单形状。

use axum::extract::Multipart;
use axum::extract::multipart::Field;
use serde::Serialize;
use validator::{Validate, ValidationError};

use crate::db::models::{Brand, Category};
use shared::{AppError, AppResult};

/// Form field names, shared by the multipart parser and validation errors
pub mod fields {
    pub const NAME: &str = "name";
    pub const BRAND_ID: &str = "brand_id";
    pub const CATEGORY_ID: &str = "category_id";
    pub const MAIN_FILE: &str = "main_file";
    pub const HOVER_FILE: &str = "hover_file";
    pub const GALLERY: &str = "gallery";
}

/// One uploaded file as received from the multipart form
#[derive(Debug, Clone, Default)]
pub struct UploadedImage {
    /// Original client-side file name
    pub file_name: Option<String>,
    /// Declared content type of the part
    pub content_type: Option<String>,
    /// Raw file bytes
    pub data: Vec<u8>,
}

impl UploadedImage {
    /// 浏览器会把空的 file input 提交成无文件名、零字节的 part，
    /// 这种情况视为“未上传”
    pub fn is_present(&self) -> bool {
        !self.data.is_empty() || self.file_name.as_deref().is_some_and(|n| !n.is_empty())
    }
}

/// Parsed product submission (create and update share the same shape)
#[derive(Debug, Default, Validate)]
pub struct ProductForm {
    #[validate(custom(function = validate_product_name))]
    pub name: String,
    pub brand_id: Option<String>,
    pub category_id: Option<String>,
    pub main_file: Option<UploadedImage>,
    pub hover_file: Option<UploadedImage>,
    pub gallery: Vec<UploadedImage>,
}

/// 商品名: 去空白后 2..=255 字符 (系列号需要名称前两位)
fn validate_product_name(name: &str) -> Result<(), ValidationError> {
    let len = name.trim().chars().count();
    if !(2..=255).contains(&len) {
        let mut err = ValidationError::new("length");
        err.message = Some("Product name must be 2-255 characters".into());
        return Err(err);
    }
    Ok(())
}

impl ProductForm {
    /// Parse a multipart submission into a form; unknown parts are ignored
    pub async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = ProductForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::validation(format!("Invalid multipart request: {e}")))?
        {
            let Some(name) = field.name().map(|s| s.to_string()) else {
                continue;
            };

            match name.as_str() {
                fields::NAME => form.name = read_text(field).await?,
                fields::BRAND_ID => form.brand_id = non_empty(read_text(field).await?),
                fields::CATEGORY_ID => form.category_id = non_empty(read_text(field).await?),
                fields::MAIN_FILE => {
                    let file = read_file(field).await?;
                    if file.is_present() {
                        form.main_file = Some(file);
                    }
                }
                fields::HOVER_FILE => {
                    let file = read_file(field).await?;
                    if file.is_present() {
                        form.hover_file = Some(file);
                    }
                }
                fields::GALLERY => {
                    let file = read_file(field).await?;
                    if file.is_present() {
                        form.gallery.push(file);
                    }
                }
                _ => {}
            }
        }

        Ok(form)
    }
}

async fn read_text(field: Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart request: {e}")))
}

async fn read_file(field: Field<'_>) -> AppResult<UploadedImage> {
    let file_name = field.file_name().map(|s| s.to_string());
    let content_type = field.content_type().map(|s| s.to_string());
    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart request: {e}")))?
        .to_vec();

    Ok(UploadedImage {
        file_name,
        content_type,
        data,
    })
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Reference data both admin forms render (brand/category dropdowns)
///
/// 每个请求只加载一次，校验作为其上的纯函数执行。
#[derive(Debug, Clone, Serialize)]
pub struct FormContext {
    pub brands: Vec<Brand>,
    pub categories: Vec<Category>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uploaded_image_presence() {
        let absent = UploadedImage::default();
        assert!(!absent.is_present());

        let named_empty = UploadedImage {
            file_name: Some("a.jpg".to_string()),
            ..Default::default()
        };
        assert!(named_empty.is_present());

        let with_bytes = UploadedImage {
            data: vec![1, 2, 3],
            ..Default::default()
        };
        assert!(with_bytes.is_present());
    }

    #[test]
    fn test_product_name_rules() {
        assert!(validate_product_name("Air Max").is_ok());
        assert!(validate_product_name("  Air Max  ").is_ok());
        assert!(validate_product_name("ok").is_ok());

        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name("a").is_err());
        assert!(validate_product_name(&"x".repeat(256)).is_err());
    }
}
