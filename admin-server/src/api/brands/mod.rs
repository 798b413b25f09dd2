//! Brand API 模块
//!
//! 品牌参照数据是只读接口；品牌的维护属于另一套后台流程。

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/brands", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/", get(handler::list))
}
