//! Product API 模块

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/products", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        // Form reference data (must be before /{id} to avoid path conflicts)
        .route("/form-context", get(handler::form_context))
        .route("/{id}", get(handler::get_by_id).put(handler::update))
        // Gallery image delete returns the remaining gallery fragment
        .route("/images/{image_id}", delete(handler::delete_image))
}
