//! Product API Handlers
//!
//! 处理器只负责解析请求并调用 [`ProductAdminService`]；
//! 校验与持久化都在服务层完成。

use axum::extract::{Extension, Multipart, Path, State};

use crate::auth::CurrentUser;
use crate::catalog::form::FormContext;
use crate::catalog::{ProductDetail, ProductForm};
use crate::core::ServerState;
use crate::db::models::{Product, ProductImage};
use shared::{ApiResponse, AppResult};

/// GET /api/products - 商品列表
pub async fn list(State(state): State<ServerState>) -> AppResult<ApiResponse<Vec<Product>>> {
    let products = state.product_admin().list().await?;
    Ok(ApiResponse::success(products))
}

/// GET /api/products/form-context - 表单参照数据 (品牌/分类下拉)
pub async fn form_context(
    State(state): State<ServerState>,
) -> AppResult<ApiResponse<FormContext>> {
    let ctx = state.product_admin().load_form_context().await?;
    Ok(ApiResponse::success(ctx))
}

/// GET /api/products/{id} - 单个商品及其图库
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<ProductDetail>> {
    let detail = state.product_admin().get(&id).await?;
    Ok(ApiResponse::success(detail))
}

/// POST /api/products - 创建商品 (multipart 表单)
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    multipart: Multipart,
) -> AppResult<ApiResponse<ProductDetail>> {
    let form = ProductForm::from_multipart(multipart).await?;

    tracing::info!(operator = %current_user.username, name = %form.name,
        "Product create requested");

    let detail = state.product_admin().create(form).await?;
    Ok(ApiResponse::success(detail))
}

/// PUT /api/products/{id} - 更新商品 (multipart 表单)
pub async fn update(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AppResult<ApiResponse<ProductDetail>> {
    let form = ProductForm::from_multipart(multipart).await?;

    tracing::info!(operator = %current_user.username, id = %id,
        "Product update requested");

    let detail = state.product_admin().update(&id, form).await?;
    Ok(ApiResponse::success(detail))
}

/// DELETE /api/products/images/{image_id} - 删除一张图库图片
///
/// 返回所属商品剩余的图库列表，供前端局部刷新。
pub async fn delete_image(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(image_id): Path<String>,
) -> AppResult<ApiResponse<Vec<ProductImage>>> {
    tracing::info!(operator = %current_user.username, id = %image_id,
        "Gallery image delete requested");

    let remaining = state.product_admin().delete_image(&image_id).await?;
    Ok(ApiResponse::success(remaining))
}
