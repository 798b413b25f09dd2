//! Allup Admin Server - 电商后台商品目录管理服务
//!
//! # 架构概述
//!
//! 本模块是后台管理服务的主入口，提供以下核心功能：
//!
//! - **商品管理** (`catalog`): 商品创建/更新、图库图片删除
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储
//! - **认证** (`auth`): JWT 角色校验 (SuperAdmin / Admin)
//! - **图片存储** (`services/image_store`): 上传文件落盘与清理
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! admin-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、角色门禁
//! ├── api/           # HTTP 路由和处理器
//! ├── catalog/       # 商品管理领域逻辑
//! ├── services/      # 图片存储
//! ├── db/            # 数据库层
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod auth;
pub mod catalog;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use catalog::ProductAdminService;
pub use core::{Config, Server, ServerState};
pub use services::ImageStore;

// Re-export unified error types from shared
pub use shared::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    utils::logger::init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ___    ____
   /   |  / / /_  ______
  / /| | / / / / / / __ \
 / ___ |/ / / /_/ / /_/ /
/_/  |_/_/_/\__,_/ .___/
                /_/   admin
    "#
    );
}
