//! Cache Runtime - 默认缓存管理器的装配
//!
//! 进程启动时从配置构造一次，显式传递给所有需要 memoize 的代码，
//! 取代环境全局查找。development 环境下管理器额外通过
//! [`CacheRuntime::debug_manager`] 暴露用于人工检查。

use std::sync::Arc;

use serde_json::Value;

use crate::application::memoize::Cacheable;
use crate::application::ports::{CacheError, CacheManager};
use crate::config::AppConfig;
use crate::infrastructure::persistence::sled::{
    SessionCache, SessionCacheManager, SessionStore, SessionStoreConfig,
};

/// memoize 命名空间前缀
const CACHEABLE_PREFIX: &str = "cacheable/";

/// 缓存运行时
///
/// 持有进程内唯一的会话缓存管理器，所有 memoize 经由它分配命名空间
pub struct CacheRuntime {
    manager: Arc<SessionCacheManager>,
    development: bool,
}

impl CacheRuntime {
    /// 从配置构造运行时，打开会话存储
    pub fn new(config: &AppConfig) -> Result<Self, CacheError> {
        let store_config = SessionStoreConfig {
            path: config.store.path.clone(),
            temporary: config.store.temporary,
        };
        let store = Arc::new(SessionStore::open(&store_config)?);
        let manager = Arc::new(SessionCacheManager::new(store));

        let development = config.environment.is_development();
        if development {
            tracing::info!(
                "Development environment: the default cache manager can be inspected via CacheRuntime::debug_manager"
            );
        }

        Ok(Self {
            manager,
            development,
        })
    }

    /// 默认缓存管理器
    pub fn manager(&self) -> Arc<SessionCacheManager> {
        self.manager.clone()
    }

    /// 调试用管理器访问器
    ///
    /// 仅 development 环境返回 `Some`；只用于人工检查，
    /// 不改变管理器本身的契约，其他代码路径不得依赖
    pub fn debug_manager(&self) -> Option<Arc<SessionCacheManager>> {
        self.development.then(|| self.manager.clone())
    }

    /// 包装一个异步函数为缓存版本
    ///
    /// 命名空间为 `"cacheable/" + name`：同名的两次包装共享同一批条目，
    /// 调用方需选择不同的 name 避免碰撞
    pub fn cacheable<A, F>(&self, name: &str, func: F) -> Cacheable<A, F, SessionCache> {
        let cache = self.manager.get_cache(&format!("{CACHEABLE_PREFIX}{name}"));
        Cacheable::new(cache, func)
    }

    /// 包装一个异步函数为缓存版本，并指定 key 派生函数
    pub fn cacheable_with_key<A, F>(
        &self,
        name: &str,
        func: F,
        key_supplier: impl Fn(&A) -> Value + Send + Sync + 'static,
    ) -> Cacheable<A, F, SessionCache> {
        self.cacheable(name, func).with_key_supplier(key_supplier)
    }
}
