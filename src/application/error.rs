//! 应用层错误定义
//!
//! memoize 调用的统一错误类型

use thiserror::Error;

use crate::application::ports::CacheError;

/// memoize 调用错误
///
/// 缓存层失败与被包装函数自身的失败分开呈现，
/// 后者原样透传，绝不落入缓存。
#[derive(Debug, Error)]
pub enum MemoizeError<E>
where
    E: std::error::Error,
{
    /// 缓存层失败（解析、存储）
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// 被包装函数的失败，原样透传
    #[error(transparent)]
    Func(E),
}
