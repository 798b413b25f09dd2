//! Category API Handlers

use axum::extract::State;

use crate::core::ServerState;
use crate::db::models::Category;
use crate::db::repository::CategoryRepository;
use shared::{ApiResponse, AppError, AppResult};

/// GET /api/categories - 获取所有可挂载分类
pub async fn list(State(state): State<ServerState>) -> AppResult<ApiResponse<Vec<Category>>> {
    let repo = CategoryRepository::new(state.db.clone());
    let categories = repo
        .find_selectable()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    Ok(ApiResponse::success(categories))
}
