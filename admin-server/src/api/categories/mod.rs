//! Category API 模块
//!
//! 分类参照数据是只读接口；伞形分类与软删除行不会出现在列表里。

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/categories", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/", get(handler::list))
}
