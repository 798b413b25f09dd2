//! 表单校验管线
//!
//! 校验器按声明顺序执行，第一个失败即返回 —— 与后台表单逐项报错的
//! 交互约定一致 (不聚合全部错误)。所有校验都是已加载数据上的纯函数，
//! 不做任何 IO。
//!
//! 创建时的完整顺序:
//!
//! 1. 字段级模型校验 (名称长度)
//! 2. 品牌存在于未删除品牌中
//! 3. 分类已选择
//! 4. 分类存在于可挂载分类中 (未删除、非伞形)
//! 5. 图库文件数不超过上限
//! 6. 主图: 必填、content-type、大小、JPEG 魔数
//! 7. 悬停图: 同上
//! 8. 每张图库图片: 同上 (非必填)

use surrealdb::RecordId;
use validator::Validate;

use shared::{AppError, AppResult, ErrorCode};

use super::form::{FormContext, ProductForm, UploadedImage, fields};
use crate::db::models::{Brand, Category};
use crate::utils::validation::{
    MAX_GALLERY_IMAGES, MAX_IMAGE_KB, exceeds_max_kb, has_jpeg_magic, is_jpeg_content_type,
};

/// Reference rows a submission resolved to
#[derive(Debug)]
pub struct ValidatedRefs<'a> {
    pub brand: &'a Brand,
    pub category: &'a Category,
}

/// Full create pipeline
pub fn validate_create<'a>(
    form: &ProductForm,
    ctx: &'a FormContext,
) -> AppResult<ValidatedRefs<'a>> {
    check_model(form)?;
    let refs = check_refs(form, ctx)?;
    check_gallery_capacity(form.gallery.len(), MAX_GALLERY_IMAGES)?;

    let main = form
        .main_file
        .as_ref()
        .ok_or_else(|| AppError::field_error(ErrorCode::MainImageRequired, fields::MAIN_FILE))?;
    check_image(main, fields::MAIN_FILE, "Main image")?;

    let hover = form
        .hover_file
        .as_ref()
        .ok_or_else(|| AppError::field_error(ErrorCode::HoverImageRequired, fields::HOVER_FILE))?;
    check_image(hover, fields::HOVER_FILE, "Hover image")?;

    for file in &form.gallery {
        check_image(file, fields::GALLERY, "Gallery image")?;
    }

    Ok(refs)
}

/// Field-level model validation (step 1)
pub fn check_model(form: &ProductForm) -> AppResult<()> {
    let Err(errors) = form.validate() else {
        return Ok(());
    };

    for (field, errs) in errors.field_errors() {
        if let Some(err) = errs.first() {
            let message = err
                .message
                .clone()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{field} is invalid"));
            return Err(
                AppError::with_message(ErrorCode::ValidationFailed, message)
                    .with_detail("field", field.to_string()),
            );
        }
    }

    Err(AppError::new(ErrorCode::ValidationFailed))
}

/// Brand and category resolution against loaded reference data (steps 2-4)
pub fn check_refs<'a>(form: &ProductForm, ctx: &'a FormContext) -> AppResult<ValidatedRefs<'a>> {
    let brand = form
        .brand_id
        .as_deref()
        .and_then(|id| ctx.brands.iter().find(|b| id_matches(&b.id, id)))
        .ok_or_else(|| AppError::field_error(ErrorCode::BrandNotFound, fields::BRAND_ID))?;

    let category_id = form
        .category_id
        .as_deref()
        .ok_or_else(|| AppError::field_error(ErrorCode::CategoryRequired, fields::CATEGORY_ID))?;

    let category = ctx
        .categories
        .iter()
        .find(|c| id_matches(&c.id, category_id))
        .ok_or_else(|| AppError::field_error(ErrorCode::CategoryNotFound, fields::CATEGORY_ID))?;

    Ok(ValidatedRefs { brand, category })
}

/// Gallery headcount check (step 5); `allowed` shrinks on update
pub fn check_gallery_capacity(count: usize, allowed: usize) -> AppResult<()> {
    if count > allowed {
        return Err(AppError::with_message(
            ErrorCode::GalleryLimitExceeded,
            format!("Can select at most {allowed} gallery images"),
        )
        .with_detail("field", fields::GALLERY));
    }
    Ok(())
}

/// Per-file checks: declared content type, size, JPEG magic bytes
pub fn check_image(file: &UploadedImage, field: &str, label: &str) -> AppResult<()> {
    if !is_jpeg_content_type(file.content_type.as_deref()) {
        return Err(AppError::with_message(
            ErrorCode::UnsupportedFileFormat,
            format!("{label} must be a .jpg file"),
        )
        .with_detail("field", field));
    }

    if exceeds_max_kb(file.data.len(), MAX_IMAGE_KB) {
        return Err(AppError::with_message(
            ErrorCode::FileTooLarge,
            format!("{label} must be at most {MAX_IMAGE_KB} KB"),
        )
        .with_detail("field", field));
    }

    if file.data.is_empty() {
        return Err(
            AppError::with_message(ErrorCode::EmptyFile, format!("{label} is empty"))
                .with_detail("field", field),
        );
    }

    if !has_jpeg_magic(&file.data) {
        return Err(AppError::with_message(
            ErrorCode::InvalidImageFile,
            format!("{label} is not a valid JPEG image"),
        )
        .with_detail("field", field));
    }

    Ok(())
}

/// API ids arrive either as "table:key" or as the bare key
fn id_matches(id: &Option<RecordId>, submitted: &str) -> bool {
    id.as_ref()
        .is_some_and(|id| id.to_string() == submitted || id.key().to_string() == submitted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{Brand, Category};
    use surrealdb::RecordId;

    fn brand(key: &str, name: &str) -> Brand {
        Brand {
            id: Some(RecordId::from_table_key("brand", key)),
            name: name.to_string(),
            is_deleted: false,
        }
    }

    fn category(key: &str, name: &str) -> Category {
        Category {
            id: Some(RecordId::from_table_key("category", key)),
            name: name.to_string(),
            is_deleted: false,
            is_main: false,
        }
    }

    fn ctx() -> FormContext {
        FormContext {
            brands: vec![brand("b1", "Nike")],
            categories: vec![category("c1", "Shoes")],
        }
    }

    fn jpeg(kb: usize) -> UploadedImage {
        let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0];
        data.resize(kb * 1024, 0);
        UploadedImage {
            file_name: Some("image.jpg".to_string()),
            content_type: Some("image/jpeg".to_string()),
            data,
        }
    }

    fn valid_form() -> ProductForm {
        ProductForm {
            name: "Air Max".to_string(),
            brand_id: Some("brand:b1".to_string()),
            category_id: Some("category:c1".to_string()),
            main_file: Some(jpeg(10)),
            hover_file: Some(jpeg(10)),
            gallery: vec![],
        }
    }

    #[test]
    fn test_valid_form_passes() {
        let ctx = ctx();
        let refs = validate_create(&valid_form(), &ctx).unwrap();
        assert_eq!(refs.brand.name, "Nike");
        assert_eq!(refs.category.name, "Shoes");
    }

    #[test]
    fn test_refs_accept_bare_keys() {
        let ctx = ctx();
        let mut form = valid_form();
        form.brand_id = Some("b1".to_string());
        form.category_id = Some("c1".to_string());
        assert!(validate_create(&form, &ctx).is_ok());
    }

    #[test]
    fn test_blank_name_fails_model_check() {
        let ctx = ctx();
        let mut form = valid_form();
        form.name = "   ".to_string();

        let err = validate_create(&form, &ctx).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.field(), Some("name"));
    }

    #[test]
    fn test_unknown_brand_fails() {
        let ctx = ctx();
        let mut form = valid_form();
        form.brand_id = Some("brand:ghost".to_string());

        let err = validate_create(&form, &ctx).unwrap_err();
        assert_eq!(err.code, ErrorCode::BrandNotFound);
        assert_eq!(err.field(), Some("brand_id"));
    }

    #[test]
    fn test_missing_category_fails_before_lookup() {
        let ctx = ctx();
        let mut form = valid_form();
        form.category_id = None;

        let err = validate_create(&form, &ctx).unwrap_err();
        assert_eq!(err.code, ErrorCode::CategoryRequired);
    }

    #[test]
    fn test_unknown_category_fails() {
        let ctx = ctx();
        let mut form = valid_form();
        form.category_id = Some("category:ghost".to_string());

        let err = validate_create(&form, &ctx).unwrap_err();
        assert_eq!(err.code, ErrorCode::CategoryNotFound);
        assert_eq!(err.field(), Some("category_id"));
    }

    #[test]
    fn test_gallery_over_capacity_fails() {
        let ctx = ctx();
        let mut form = valid_form();
        form.gallery = (0..6).map(|_| jpeg(5)).collect();

        let err = validate_create(&form, &ctx).unwrap_err();
        assert_eq!(err.code, ErrorCode::GalleryLimitExceeded);
        assert_eq!(err.field(), Some("gallery"));
    }

    #[test]
    fn test_missing_main_image_fails() {
        let ctx = ctx();
        let mut form = valid_form();
        form.main_file = None;

        let err = validate_create(&form, &ctx).unwrap_err();
        assert_eq!(err.code, ErrorCode::MainImageRequired);
    }

    #[test]
    fn test_missing_hover_image_fails() {
        let ctx = ctx();
        let mut form = valid_form();
        form.hover_file = None;

        let err = validate_create(&form, &ctx).unwrap_err();
        assert_eq!(err.code, ErrorCode::HoverImageRequired);
    }

    #[test]
    fn test_wrong_content_type_fails() {
        let ctx = ctx();
        let mut form = valid_form();
        if let Some(main) = form.main_file.as_mut() {
            main.content_type = Some("image/png".to_string());
        }

        let err = validate_create(&form, &ctx).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnsupportedFileFormat);
        assert_eq!(err.field(), Some("main_file"));
    }

    #[test]
    fn test_oversized_image_fails() {
        let ctx = ctx();
        let mut form = valid_form();
        form.hover_file = Some(jpeg(51));

        let err = validate_create(&form, &ctx).unwrap_err();
        assert_eq!(err.code, ErrorCode::FileTooLarge);
        assert_eq!(err.field(), Some("hover_file"));
    }

    #[test]
    fn test_non_jpeg_bytes_fail() {
        let ctx = ctx();
        let mut form = valid_form();
        form.main_file = Some(UploadedImage {
            file_name: Some("fake.jpg".to_string()),
            content_type: Some("image/jpeg".to_string()),
            data: b"just text pretending to be an image".to_vec(),
        });

        let err = validate_create(&form, &ctx).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidImageFile);
    }

    #[test]
    fn test_first_failure_wins() {
        // 同时违反品牌与图库上限，报出的必须是更靠前的品牌错误
        let ctx = ctx();
        let mut form = valid_form();
        form.brand_id = None;
        form.gallery = (0..6).map(|_| jpeg(5)).collect();

        let err = validate_create(&form, &ctx).unwrap_err();
        assert_eq!(err.code, ErrorCode::BrandNotFound);
    }

    #[test]
    fn test_update_capacity_uses_remaining_slots() {
        assert!(check_gallery_capacity(2, 2).is_ok());
        let err = check_gallery_capacity(3, 2).unwrap_err();
        assert_eq!(err.code, ErrorCode::GalleryLimitExceeded);
        assert!(err.message.contains("at most 2"));
    }
}
