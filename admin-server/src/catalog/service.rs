//! Product admin service
//!
//! 商品后台的三类操作: 创建、更新、删除图库图片。
//! 每个操作在单个请求内顺序执行: 加载表单上下文 → 纯函数校验 →
//! 文件落盘 → 行写入。文件与行写入之间没有分布式事务，行提交失败时
//! 显式清理已写文件，缩小存储与数据库漂移的窗口。

use serde::Serialize;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use shared::{AppError, AppResult, ErrorCode};

use super::form::{FormContext, ProductForm, fields};
use super::{seria, validate};
use crate::db::models::{Product, ProductCreate, ProductEdit, ProductImage};
use crate::db::repository::{
    BrandRepository, CategoryRepository, ProductImageRepository, ProductRepository,
};
use crate::services::ImageStore;
use crate::utils::validation::MAX_GALLERY_IMAGES;

/// Product plus its gallery (detail/edit view)
#[derive(Debug, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub gallery: Vec<ProductImage>,
}

/// 每请求构造的轻量服务，持有仓库与图片存储的浅拷贝
pub struct ProductAdminService {
    products: ProductRepository,
    images: ProductImageRepository,
    brands: BrandRepository,
    categories: CategoryRepository,
    store: ImageStore,
}

/// Files written to storage for one submission, by stored name
struct StagedUpload {
    main: Option<String>,
    hover: Option<String>,
    gallery: Vec<String>,
}

impl ProductAdminService {
    pub fn new(db: Surreal<Db>, store: ImageStore) -> Self {
        Self {
            products: ProductRepository::new(db.clone()),
            images: ProductImageRepository::new(db.clone()),
            brands: BrandRepository::new(db.clone()),
            categories: CategoryRepository::new(db),
            store,
        }
    }

    /// Listing view
    pub async fn list(&self) -> AppResult<Vec<Product>> {
        self.products
            .find_all()
            .await
            .map_err(|e| AppError::database(e.to_string()))
    }

    /// One product with its gallery
    pub async fn get(&self, id: &str) -> AppResult<ProductDetail> {
        let id = require_id(id, "Product id is required")?;

        let product = self
            .products
            .find_by_id(id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;

        let product_id = require_row_id(&product.id)?;
        let gallery = self
            .images
            .find_by_product(&product_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        Ok(ProductDetail { product, gallery })
    }

    /// Reference data for the create/update forms, loaded once per request
    pub async fn load_form_context(&self) -> AppResult<FormContext> {
        let brands = self
            .brands
            .find_active()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;
        let categories = self
            .categories
            .find_selectable()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        Ok(FormContext { brands, categories })
    }

    /// Create a product from a validated submission
    ///
    /// 校验全部通过后才开始写文件；系列号与编号在插入前派生一次。
    pub async fn create(&self, form: ProductForm) -> AppResult<ProductDetail> {
        let ctx = self.load_form_context().await?;
        let refs = validate::validate_create(&form, &ctx)?;

        let brand_id = require_row_id(&refs.brand.id)?;
        let category_id = require_row_id(&refs.category.id)?;

        let seria = seria::derive_seria(&refs.brand.name, &form.name);
        let max_code = self
            .products
            .max_code_for_seria(&seria)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;
        let code = seria::next_code(max_code);

        let staged = self.stage_files(&form).await?;
        let (Some(main_image), Some(hover_image)) = (staged.main.clone(), staged.hover.clone())
        else {
            // validate_create 保证两张命名图都已就位
            self.discard_staged(&staged).await;
            return Err(AppError::internal("named images missing after validation"));
        };

        let name = form.name.trim().to_string();
        tracing::info!(name = %name, seria = %seria, code = code, "Creating product");

        let product = match self
            .products
            .create(ProductCreate {
                name,
                brand: brand_id,
                category: category_id,
                seria,
                code,
                main_image,
                hover_image,
            })
            .await
        {
            Ok(product) => product,
            Err(e) => {
                self.discard_staged(&staged).await;
                return Err(AppError::database(e.to_string()));
            }
        };

        let product_id = require_row_id(&product.id)?;
        let gallery = self
            .append_gallery_rows(&product_id, &staged.gallery, 0)
            .await?;

        Ok(ProductDetail { product, gallery })
    }

    /// Update a product from a validated submission
    ///
    /// 命名图仅在重新上传时替换 (先删旧文件再写新文件)；图库图片追加，
    /// 容量按剩余空位计算；`seria`/`code` 不重算。
    pub async fn update(&self, id: &str, form: ProductForm) -> AppResult<ProductDetail> {
        validate::check_model(&form)?;

        let id = require_id(id, "Product id is required")?;
        let product = self
            .products
            .find_by_id(id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;

        let product_id = require_row_id(&product.id)?;
        let gallery = self
            .images
            .find_by_product(&product_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        let ctx = self.load_form_context().await?;
        let refs = validate::check_refs(&form, &ctx)?;
        validate::check_gallery_capacity(
            form.gallery.len(),
            MAX_GALLERY_IMAGES.saturating_sub(gallery.len()),
        )?;
        if let Some(main) = &form.main_file {
            validate::check_image(main, fields::MAIN_FILE, "Main image")?;
        }
        if let Some(hover) = &form.hover_file {
            validate::check_image(hover, fields::HOVER_FILE, "Hover image")?;
        }
        for file in &form.gallery {
            validate::check_image(file, fields::GALLERY, "Gallery image")?;
        }

        let brand_id = require_row_id(&refs.brand.id)?;
        let category_id = require_row_id(&refs.category.id)?;

        // 替换命名图: 先删旧文件 (删除失败只记录，行数据才是事实来源)
        if form.main_file.is_some() {
            if let Err(e) = self
                .store
                .delete(ImageStore::PRODUCT_DIR, &product.main_image)
                .await
            {
                tracing::warn!(error = %e, "Failed to remove replaced main image");
            }
        }
        if form.hover_file.is_some() {
            if let Err(e) = self
                .store
                .delete(ImageStore::PRODUCT_DIR, &product.hover_image)
                .await
            {
                tracing::warn!(error = %e, "Failed to remove replaced hover image");
            }
        }

        let staged = self.stage_files(&form).await?;

        tracing::info!(id = %product_id, "Updating product");

        let updated = match self
            .products
            .update(
                id,
                ProductEdit {
                    name: form.name.trim().to_string(),
                    brand: brand_id,
                    category: category_id,
                    main_image: staged.main.clone(),
                    hover_image: staged.hover.clone(),
                },
            )
            .await
        {
            Ok(product) => product,
            Err(e) => {
                self.discard_staged(&staged).await;
                return Err(AppError::database(e.to_string()));
            }
        };

        let next_order = gallery.last().map(|g| g.sort_order + 1).unwrap_or(0);
        let appended = self
            .append_gallery_rows(&product_id, &staged.gallery, next_order)
            .await?;

        let mut full_gallery = gallery;
        full_gallery.extend(appended);

        Ok(ProductDetail {
            product: updated,
            gallery: full_gallery,
        })
    }

    /// Delete one gallery image: row first (commit point), then the file
    ///
    /// Returns the owning product's remaining gallery for partial re-render.
    pub async fn delete_image(&self, image_id: &str) -> AppResult<Vec<ProductImage>> {
        let image_id = require_id(image_id, "Image id is required")?;

        let image = self
            .images
            .find_by_id(image_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::new(ErrorCode::ProductImageNotFound))?;

        self.images
            .delete(image_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        if let Err(e) = self
            .store
            .delete(ImageStore::PRODUCT_QUICK_DIR, &image.image)
            .await
        {
            tracing::warn!(file = %image.image, error = %e, "Failed to remove deleted gallery image");
        }

        tracing::info!(id = %image_id, product = %image.product, "Gallery image deleted");

        self.images
            .find_by_product(&image.product)
            .await
            .map_err(|e| AppError::database(e.to_string()))
    }

    // ========== Staging helpers ==========

    /// Write every uploaded file to storage; on partial failure remove what
    /// was already written before propagating the error
    async fn stage_files(&self, form: &ProductForm) -> AppResult<StagedUpload> {
        let mut written: Vec<(&'static str, String)> = Vec::new();

        match self.try_stage_files(form, &mut written).await {
            Ok(staged) => Ok(staged),
            Err(e) => {
                for (folder, stored) in &written {
                    if let Err(del) = self.store.delete(folder, stored).await {
                        tracing::warn!(folder = %folder, file = %stored, error = %del,
                            "Failed to remove staged image");
                    }
                }
                Err(e)
            }
        }
    }

    async fn try_stage_files(
        &self,
        form: &ProductForm,
        written: &mut Vec<(&'static str, String)>,
    ) -> AppResult<StagedUpload> {
        let mut main = None;
        if let Some(file) = &form.main_file {
            let stored = self.store.write(ImageStore::PRODUCT_DIR, &file.data).await?;
            written.push((ImageStore::PRODUCT_DIR, stored.clone()));
            main = Some(stored);
        }

        let mut hover = None;
        if let Some(file) = &form.hover_file {
            let stored = self.store.write(ImageStore::PRODUCT_DIR, &file.data).await?;
            written.push((ImageStore::PRODUCT_DIR, stored.clone()));
            hover = Some(stored);
        }

        let mut gallery = Vec::with_capacity(form.gallery.len());
        for file in &form.gallery {
            let stored = self
                .store
                .write(ImageStore::PRODUCT_QUICK_DIR, &file.data)
                .await?;
            written.push((ImageStore::PRODUCT_QUICK_DIR, stored.clone()));
            gallery.push(stored);
        }

        Ok(StagedUpload {
            main,
            hover,
            gallery,
        })
    }

    async fn discard_staged(&self, staged: &StagedUpload) {
        for stored in staged.main.iter().chain(staged.hover.iter()) {
            if let Err(e) = self.store.delete(ImageStore::PRODUCT_DIR, stored).await {
                tracing::warn!(file = %stored, error = %e, "Failed to remove staged image");
            }
        }
        for stored in &staged.gallery {
            if let Err(e) = self
                .store
                .delete(ImageStore::PRODUCT_QUICK_DIR, stored)
                .await
            {
                tracing::warn!(file = %stored, error = %e, "Failed to remove staged image");
            }
        }
    }

    /// Create one `product_image` row per staged gallery file
    ///
    /// A failed insert removes the files whose rows never landed; rows
    /// already committed keep their files.
    async fn append_gallery_rows(
        &self,
        product_id: &RecordId,
        stored_names: &[String],
        first_order: i32,
    ) -> AppResult<Vec<ProductImage>> {
        let mut rows = Vec::with_capacity(stored_names.len());

        for (i, stored) in stored_names.iter().enumerate() {
            match self
                .images
                .create(
                    product_id.clone(),
                    stored.clone(),
                    first_order + i as i32,
                )
                .await
            {
                Ok(row) => rows.push(row),
                Err(e) => {
                    for orphan in &stored_names[i..] {
                        if let Err(del) = self
                            .store
                            .delete(ImageStore::PRODUCT_QUICK_DIR, orphan)
                            .await
                        {
                            tracing::warn!(file = %orphan, error = %del,
                                "Failed to remove unreferenced gallery image");
                        }
                    }
                    return Err(AppError::database(e.to_string()));
                }
            }
        }

        Ok(rows)
    }
}

/// Reject blank ids before touching the database
fn require_id<'a>(id: &'a str, message: &str) -> AppResult<&'a str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::invalid_request(message));
    }
    Ok(id)
}

fn require_row_id(id: &Option<RecordId>) -> AppResult<RecordId> {
    id.clone()
        .ok_or_else(|| AppError::internal("row is missing its id"))
}
