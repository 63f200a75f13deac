//! Application Layer - 缓存抽象与 memoize 策略
//!
//! - ports: Cache / CacheManager 端口与错误分类
//! - codec: 共用的序列化策略（replacer、时间编码、真值判定）
//! - memoize: cacheable 包装器
//! - error: memoize 调用错误

pub mod codec;
pub mod error;
pub mod memoize;
pub mod ports;

pub use codec::Timestamp;
pub use error::MemoizeError;
pub use memoize::Cacheable;
