//! Brand API Handlers

use axum::extract::State;

use crate::core::ServerState;
use crate::db::models::Brand;
use crate::db::repository::BrandRepository;
use shared::{ApiResponse, AppError, AppResult};

/// GET /api/brands - 获取所有未删除品牌
pub async fn list(State(state): State<ServerState>) -> AppResult<ApiResponse<Vec<Brand>>> {
    let repo = BrandRepository::new(state.db.clone());
    let brands = repo
        .find_active()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    Ok(ApiResponse::success(brands))
}
