//! KV Cache Port - 键值缓存抽象
//!
//! 定义缓存与缓存管理器的抽象接口，具体实现有两种：
//! - 内存实现 (DashMap)
//! - 会话持久实现 (Sled)

use std::sync::Arc;

use thiserror::Error;

/// Cache 错误
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Storage capacity exceeded: {0}")]
    StorageFull(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Cache Port
///
/// 单一命名空间内的键值缓存契约：
/// - 同一 key 同时至多对应一个存储值，`set` 覆盖旧值
/// - `get` 无副作用，缺失返回 `Ok(None)`
pub trait Cache: Send + Sync {
    /// 缓存值类型
    type Value;

    /// 读取 key 对应的值
    ///
    /// 从未写入过的 key 返回 `Ok(None)`，不是错误
    fn get(&self, key: &str) -> Result<Option<Self::Value>, CacheError>;

    /// 写入 key 对应的值，覆盖旧值
    ///
    /// 返回 `&Self` 以支持链式调用
    fn set(&self, key: &str, value: Self::Value) -> Result<&Self, CacheError>;
}

/// Cache Manager Port
///
/// 命名空间 -> Cache 实例的映射。
/// 不变式：同一 name 的重复 `get_cache` 返回同一个实例（首次访问时惰性创建），
/// 在管理器生命周期内绝不返回一个全新的空缓存。
pub trait CacheManager: Send + Sync {
    /// 该管理器产出的缓存类型
    type Cache: Cache;

    /// 获取 name 对应的缓存，首次访问时创建并注册
    fn get_cache(&self, name: &str) -> Arc<Self::Cache>;
}
