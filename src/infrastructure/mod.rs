//! Infrastructure Layer - 端口的具体实现
//!
//! - memory: DashMap 内存缓存
//! - persistence: Sled 会话持久缓存

pub mod memory;
pub mod persistence;
