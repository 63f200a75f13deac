//! Memocache - 异步函数结果缓存
//!
//! 以可插拔的键值缓存为后端的异步函数 memoize：
//! 以参数的序列化文本为 key，命中直接返回，未命中计算后写入。
//!
//! 应用层 (application/):
//! - Ports: Cache / CacheManager 端口与错误分类
//! - Codec: 共用序列化策略（null 丢弃、时间编码为毫秒、真值判定）
//! - Memoize: Cacheable 包装器
//!
//! 基础设施层 (infrastructure/):
//! - Memory: DashMap 内存缓存
//! - Persistence: Sled 会话持久缓存
//!
//! 装配 (runtime):
//! - CacheRuntime: 进程内唯一的默认管理器，显式传递，
//!   development 环境下可经 debug_manager 检查

pub mod application;
pub mod config;
pub mod infrastructure;
pub mod logging;
pub mod runtime;

pub use application::codec::Timestamp;
pub use application::error::MemoizeError;
pub use application::memoize::Cacheable;
pub use application::ports::{Cache, CacheError, CacheManager};
pub use config::{load_config, AppConfig};
pub use infrastructure::memory::{MapCache, MapCacheManager};
pub use infrastructure::persistence::sled::{
    SessionCache, SessionCacheManager, SessionStore, SessionStoreConfig,
};
pub use runtime::CacheRuntime;
