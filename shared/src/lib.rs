//! Shared types for the Allup back office
//!
//! 统一错误系统 (错误码、错误类型、API 响应结构)，
//! 供 admin-server 及后续客户端 crate 复用。

pub mod error;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
