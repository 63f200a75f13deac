//! In-Memory Infrastructure - 内存实现

mod map_cache;

pub use map_cache::{MapCache, MapCacheManager};
