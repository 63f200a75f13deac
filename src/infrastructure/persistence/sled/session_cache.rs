//! Sled-based Session Cache Implementation
//!
//! 会话持久缓存：值序列化为 JSON 文本，以 `"{namespace}/{key}"`
//! 为原始 key 写入共享的 sled 存储。

use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;
use sled::Db;

use crate::application::codec;
use crate::application::ports::{Cache, CacheError, CacheManager};

/// 会话存储配置
#[derive(Debug, Clone)]
pub struct SessionStoreConfig {
    /// 数据库路径
    pub path: String,
    /// 临时模式：进程退出即丢弃（会话生命周期语义）
    pub temporary: bool,
}

impl Default for SessionStoreConfig {
    fn default() -> Self {
        Self {
            path: "data/session.sled".to_string(),
            temporary: false,
        }
    }
}

fn map_sled_error(e: sled::Error) -> CacheError {
    match &e {
        sled::Error::Io(io) if io.kind() == std::io::ErrorKind::StorageFull => {
            CacheError::StorageFull(e.to_string())
        }
        _ => CacheError::Storage(e.to_string()),
    }
}

/// 会话持久存储
///
/// 进程内共享的基础设施，按原始字符串 key 存取纯文本。
/// 命名空间约定（`"{namespace}/{key}"`）由上层 [`SessionCache`] 负责，
/// 存储本身不感知。
pub struct SessionStore {
    db: Db,
}

impl SessionStore {
    pub fn open(config: &SessionStoreConfig) -> Result<Self, CacheError> {
        let db = if config.temporary {
            sled::Config::new().temporary(true).open()
        } else {
            sled::open(&config.path)
        }
        .map_err(map_sled_error)?;

        tracing::info!(
            path = %config.path,
            temporary = config.temporary,
            "Session store opened"
        );

        Ok(Self { db })
    }

    /// 读取原始 key 对应的文本，缺失返回 `Ok(None)`
    pub fn read(&self, raw_key: &str) -> Result<Option<String>, CacheError> {
        match self.db.get(raw_key).map_err(map_sled_error)? {
            Some(bytes) => String::from_utf8(bytes.to_vec())
                .map(Some)
                .map_err(|e| CacheError::Parse(e.to_string())),
            None => Ok(None),
        }
    }

    /// 写入原始 key 对应的文本，覆盖旧值
    pub fn write(&self, raw_key: &str, text: &str) -> Result<(), CacheError> {
        self.db
            .insert(raw_key, text.as_bytes())
            .map(|_| ())
            .map_err(map_sled_error)
    }
}

/// 会话持久缓存
///
/// 以 name 为命名空间实现 [`Cache`]，只读写自己前缀下的条目，
/// 从不删除或枚举。构造无 I/O，所有 I/O 发生在 get/set。
pub struct SessionCache {
    name: String,
    store: Arc<SessionStore>,
}

impl SessionCache {
    pub fn new(name: impl Into<String>, store: Arc<SessionStore>) -> Self {
        Self {
            name: name.into(),
            store,
        }
    }

    fn raw_key(&self, key: &str) -> String {
        format!("{}/{}", self.name, key)
    }
}

impl Cache for SessionCache {
    type Value = Value;

    fn get(&self, key: &str) -> Result<Option<Value>, CacheError> {
        match self.store.read(&self.raw_key(key))? {
            Some(text) => codec::decode(&text).map(Some),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: Value) -> Result<&Self, CacheError> {
        let text = codec::encode(&value);
        self.store.write(&self.raw_key(key), &text)?;

        tracing::debug!(
            namespace = %self.name,
            key = %key,
            "Session cache entry written"
        );

        Ok(self)
    }
}

/// 会话缓存管理器
///
/// 每个 name 首次访问时在共享存储上构造一个 [`SessionCache`]，
/// 之后复用同一实例
pub struct SessionCacheManager {
    store: Arc<SessionStore>,
    caches: DashMap<String, Arc<SessionCache>>,
}

impl SessionCacheManager {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self {
            store,
            caches: DashMap::new(),
        }
    }
}

impl CacheManager for SessionCacheManager {
    type Cache = SessionCache;

    fn get_cache(&self, name: &str) -> Arc<SessionCache> {
        self.caches
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(SessionCache::new(name, self.store.clone())))
            .clone()
    }
}
