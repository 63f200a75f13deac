//! Sled Persistence - 会话持久存储实现

mod session_cache;

pub use session_cache::{SessionCache, SessionCacheManager, SessionStore, SessionStoreConfig};
