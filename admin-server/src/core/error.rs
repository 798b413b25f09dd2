use thiserror::Error;

/// 服务器启动/运行错误
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

/// 服务器层的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
