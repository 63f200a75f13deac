//! In-Memory Cache Implementation
//!
//! DashMap 实现的内存缓存及其管理器。
//! 无持久化：管理器被丢弃后内容随之消失。

use std::sync::Arc;

use dashmap::DashMap;

use crate::application::ports::{Cache, CacheError, CacheManager};

/// 内存缓存
///
/// 单一命名空间内 String -> V 的映射
pub struct MapCache<V> {
    entries: DashMap<String, V>,
}

impl<V> MapCache<V> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl<V> Default for MapCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Cache for MapCache<V>
where
    V: Clone + Send + Sync,
{
    type Value = V;

    fn get(&self, key: &str) -> Result<Option<V>, CacheError> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    fn set(&self, key: &str, value: V) -> Result<&Self, CacheError> {
        self.entries.insert(key.to_string(), value);
        Ok(self)
    }
}

/// 内存缓存管理器
///
/// 每个 name 首次访问时创建一个空的 [`MapCache`]，之后复用同一实例
pub struct MapCacheManager<V> {
    caches: DashMap<String, Arc<MapCache<V>>>,
}

impl<V> MapCacheManager<V> {
    pub fn new() -> Self {
        Self {
            caches: DashMap::new(),
        }
    }
}

impl<V> Default for MapCacheManager<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> CacheManager for MapCacheManager<V>
where
    V: Clone + Send + Sync,
{
    type Cache = MapCache<V>;

    fn get_cache(&self, name: &str) -> Arc<MapCache<V>> {
        self.caches
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(MapCache::new()))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_absent_key() {
        let cache: MapCache<i64> = MapCache::new();
        assert!(cache.get("missing").unwrap().is_none());
    }

    #[test]
    fn test_set_overwrites_and_chains() {
        let cache: MapCache<i64> = MapCache::new();
        cache.set("a", 1).unwrap().set("b", 2).unwrap();
        cache.set("a", 3).unwrap();

        assert_eq!(cache.get("a").unwrap(), Some(3));
        assert_eq!(cache.get("b").unwrap(), Some(2));
    }

    #[test]
    fn test_manager_reuses_cache_per_name() {
        let manager: MapCacheManager<i64> = MapCacheManager::new();

        let first = manager.get_cache("ns");
        first.set("k", 42).unwrap();

        let second = manager.get_cache("ns");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.get("k").unwrap(), Some(42));

        // 不同 name 得到独立的缓存
        let other = manager.get_cache("other");
        assert!(other.get("k").unwrap().is_none());
    }
}
