//! Image Store
//!
//! 负责上传图片的落盘、删除与路径解析。
//! 主图/悬停图与图库图片分目录存放，文件名使用 UUID 防止冲突。

use std::path::PathBuf;

use shared::AppError;
use tokio::fs;
use uuid::Uuid;

/// 图片存储服务
///
/// `root` 是上传图片根目录 (work_dir/uploads/images)，
/// 其下有两个命名子目录，存储的文件名不含目录部分。
#[derive(Clone, Debug)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    /// 主图/悬停图子目录
    pub const PRODUCT_DIR: &'static str = "product";
    /// 图库图片子目录
    pub const PRODUCT_QUICK_DIR: &'static str = "product-quick";

    /// 创建图片存储服务
    ///
    /// `root` 是上传图片根目录的完整路径
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// 确保两个子目录存在
    pub fn ensure_layout(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.root.join(Self::PRODUCT_DIR))?;
        std::fs::create_dir_all(self.root.join(Self::PRODUCT_QUICK_DIR))?;
        Ok(())
    }

    /// 获取存储文件的完整路径
    pub fn path_of(&self, folder: &str, stored: &str) -> PathBuf {
        self.root.join(folder).join(stored)
    }

    /// 检查存储文件是否存在
    pub fn exists(&self, folder: &str, stored: &str) -> bool {
        self.path_of(folder, stored).exists()
    }

    /// 写入一张图片，返回生成的存储文件名
    pub async fn write(&self, folder: &str, data: &[u8]) -> Result<String, AppError> {
        let stored = format!("{}.jpg", Uuid::new_v4());
        let path = self.path_of(folder, &stored);

        fs::write(&path, data)
            .await
            .map_err(|e| AppError::storage(format!("Failed to write {}: {}", path.display(), e)))?;

        tracing::debug!(folder = %folder, file = %stored, size = data.len(), "Image stored");
        Ok(stored)
    }

    /// 删除一张存储图片
    ///
    /// 文件缺失不算错误 (行数据是事实来源，文件可能已被手工清理)
    pub async fn delete(&self, folder: &str, stored: &str) -> Result<(), AppError> {
        let path = self.path_of(folder, stored);

        if !path.exists() {
            tracing::warn!(file = %path.display(), "Stored image already missing");
            return Ok(());
        }

        fs::remove_file(&path)
            .await
            .map_err(|e| AppError::storage(format!("Failed to delete {}: {}", path.display(), e)))
    }
}
