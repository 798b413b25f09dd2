use std::path::PathBuf;
use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::catalog::ProductAdminService;
use crate::core::Config;
use crate::db::DbService;
use crate::services::ImageStore;

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是后台服务的核心数据结构，持有所有服务的共享引用。
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | image_store | ImageStore | 上传图片存储 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 上传图片存储
    pub image_store: ImageStore,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`ServerState::initialize()`] 方法代替
    pub fn new(
        config: Config,
        db: Surreal<Db>,
        image_store: ImageStore,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            config,
            db,
            image_store,
            jwt_service,
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (work_dir/database/allup.db)
    /// 3. 图片存储 (work_dir/uploads/images)
    /// 4. JWT 服务
    ///
    /// # Panics
    ///
    /// 数据库或存储目录初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        // 0. Ensure work_dir structure exists
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        // 1. Initialize DB
        let db_path = config.database_dir().join("allup.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");
        let db = db_service.db;

        // 2. Initialize image store
        let image_store = ImageStore::new(config.uploads_dir());
        image_store
            .ensure_layout()
            .expect("Failed to create image storage layout");

        // 3. JWT service
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Self::new(config.clone(), db, image_store, jwt_service)
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 获取工作目录
    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// 构造商品管理服务 (每请求一个轻量实例)
    pub fn product_admin(&self) -> ProductAdminService {
        ProductAdminService::new(self.db.clone(), self.image_store.clone())
    }
}
