//! Memoize - 异步函数结果缓存
//!
//! 把一个异步函数包装成 get-or-compute-and-store 版本：
//! 以参数的序列化文本为 key，命中则直接返回缓存结果，
//! 未命中则调用原函数并把结果写入缓存。

use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::application::codec;
use crate::application::error::MemoizeError;
use crate::application::ports::{Cache, CacheError};

/// key 派生函数
///
/// 同步应用于调用参数，其返回值作为序列化基底；
/// 未提供时以原始参数为基底
type KeySupplier<A> = Box<dyn Fn(&A) -> Value + Send + Sync>;

/// 被 memoize 包装的异步函数
///
/// 并发语义：同 key 的并发调用不去重，各自独立执行，
/// 最后完成的 `set` 覆盖先前写入。
///
/// 命中判定沿用原有语义：缓存中的假值（0、空字符串、false、null）
/// 视为未命中并重新计算。这是已知的兼容性限制，由测试固定。
pub struct Cacheable<A, F, C> {
    cache: Arc<C>,
    func: F,
    key_supplier: Option<KeySupplier<A>>,
}

impl<A, F, C> Cacheable<A, F, C>
where
    C: Cache<Value = Value>,
{
    /// 在给定缓存上包装 func
    pub fn new(cache: Arc<C>, func: F) -> Self {
        Self {
            cache,
            func,
            key_supplier: None,
        }
    }

    /// 指定 key 派生函数，替代以原始参数为序列化基底
    pub fn with_key_supplier(
        mut self,
        supplier: impl Fn(&A) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.key_supplier = Some(Box::new(supplier));
        self
    }

    /// 单次尝试的 lookup/compute/store 序列
    ///
    /// - 命中真值：直接返回缓存结果，不调用 func
    /// - 未命中（含假值）：调用 func，等待结果，写入缓存后返回
    /// - func 失败：错误原样透传，不写入任何缓存条目
    pub async fn call<Fut, T, E>(&self, args: A) -> Result<T, MemoizeError<E>>
    where
        A: Serialize,
        F: Fn(A) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        T: Serialize + DeserializeOwned,
        E: std::error::Error,
    {
        let basis = match &self.key_supplier {
            Some(supplier) => supplier(&args),
            None => serde_json::to_value(&args).map_err(|e| CacheError::Parse(e.to_string()))?,
        };
        let key = codec::encode(&basis);

        if let Some(stored) = self.cache.get(&key)? {
            if codec::is_truthy(&stored) {
                tracing::debug!(key = %key, "Cache hit");
                let hit = serde_json::from_value(stored)
                    .map_err(|e| CacheError::Parse(e.to_string()))?;
                return Ok(hit);
            }
        }

        tracing::debug!(key = %key, "Cache miss, invoking function");
        let result = (self.func)(args).await.map_err(MemoizeError::Func)?;

        let value =
            serde_json::to_value(&result).map_err(|e| CacheError::Parse(e.to_string()))?;
        self.cache.set(&key, value)?;

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicU32, Ordering};

    use serde_json::json;

    use super::*;
    use crate::application::ports::CacheManager;
    use crate::infrastructure::memory::MapCacheManager;

    fn counting_sum(
        calls: Arc<AtomicU32>,
    ) -> impl Fn((i64, i64)) -> std::future::Ready<Result<i64, Infallible>> {
        move |(a, b)| {
            calls.fetch_add(1, Ordering::SeqCst);
            std::future::ready(Ok(a + b))
        }
    }

    fn memo_cache(name: &str) -> Arc<crate::infrastructure::memory::MapCache<Value>> {
        let manager = MapCacheManager::new();
        manager.get_cache(name)
    }

    #[tokio::test]
    async fn test_second_call_served_from_cache() {
        let calls = Arc::new(AtomicU32::new(0));
        let wrapped = Cacheable::new(memo_cache("cacheable/sum"), counting_sum(calls.clone()));

        assert_eq!(wrapped.call((1, 2)).await.unwrap(), 3);
        assert_eq!(wrapped.call((1, 2)).await.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_distinct_args_computed_independently() {
        let calls = Arc::new(AtomicU32::new(0));
        let wrapped = Cacheable::new(memo_cache("cacheable/sum"), counting_sum(calls.clone()));

        assert_eq!(wrapped.call((1, 2)).await.unwrap(), 3);
        assert_eq!(wrapped.call((2, 3)).await.unwrap(), 5);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_falsy_result_recomputed() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = calls.clone();
        let wrapped = Cacheable::new(memo_cache("cacheable/zero"), move |_: ()| {
            c.fetch_add(1, Ordering::SeqCst);
            std::future::ready(Ok::<i64, Infallible>(0))
        });

        assert_eq!(wrapped.call(()).await.unwrap(), 0);
        assert_eq!(wrapped.call(()).await.unwrap(), 0);
        // 假值结果不被视为命中，两次都执行
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failure_propagates_and_caches_nothing() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = calls.clone();
        let wrapped = Cacheable::new(memo_cache("cacheable/fail"), move |_: ()| {
            c.fetch_add(1, Ordering::SeqCst);
            std::future::ready(Err::<i64, std::io::Error>(std::io::Error::other("boom")))
        });

        let err = wrapped.call(()).await.unwrap_err();
        assert!(matches!(err, MemoizeError::Func(_)));

        let err = wrapped.call(()).await.unwrap_err();
        assert!(matches!(err, MemoizeError::Func(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_key_supplier_overrides_argument_basis() {
        let calls = Arc::new(AtomicU32::new(0));
        let wrapped = Cacheable::new(memo_cache("cacheable/sum"), counting_sum(calls.clone()))
            .with_key_supplier(|_args: &(i64, i64)| json!("fixed"));

        // 不同参数派生出同一个 key，第二次调用直接命中
        assert_eq!(wrapped.call((1, 2)).await.unwrap(), 3);
        assert_eq!(wrapped.call((7, 8)).await.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_same_namespace_shares_entries() {
        let cache = memo_cache("cacheable/shared");
        let calls = Arc::new(AtomicU32::new(0));
        let first = Cacheable::new(cache.clone(), counting_sum(calls.clone()));
        let second = Cacheable::new(cache, counting_sum(calls.clone()));

        assert_eq!(first.call((1, 2)).await.unwrap(), 3);
        assert_eq!(second.call((1, 2)).await.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concurrent_calls_not_deduplicated() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = calls.clone();
        let wrapped = Cacheable::new(memo_cache("cacheable/slow"), move |(a, b): (i64, i64)| {
            let c = c.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(std::time::Duration::from_millis(10)).await;
                Ok::<i64, Infallible>(a + b)
            }
        });

        let (left, right) = futures_util::future::join(wrapped.call((1, 2)), wrapped.call((1, 2))).await;
        assert_eq!(left.unwrap(), 3);
        assert_eq!(right.unwrap(), 3);
        // 两个并发调用都未命中，各自执行一次
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
