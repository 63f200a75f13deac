//! 缓存序列化策略
//!
//! 会话缓存的值编码与 memoize 的 key 派生共用同一套策略：
//! - 值序列化为 JSON 文本
//! - 对象字段中的 null 整体丢弃（数组元素中的 null 保留）
//! - 时间瞬时值（[`Timestamp`]）编码为 epoch 毫秒数，读取得到纯数字
//!   而不是重建的时间对象（有损，符合预期）

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::ports::CacheError;

/// 时间瞬时值
///
/// 缓存中的时间统一以 epoch 毫秒数表示。写入后再读出时，
/// 未指定目标类型（`Value` 层面）看到的是一个纯数字。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp(#[serde(with = "chrono::serde::ts_milliseconds")] pub DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// epoch 毫秒数
    pub fn millis(&self) -> i64 {
        self.0.timestamp_millis()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}

/// 编码为 JSON 文本，先应用 replacer
///
/// 顶层值若被 replacer 整体丢弃（即顶层 null），编码为 `"null"` 文本
pub fn encode(value: &Value) -> String {
    let normalized = apply_replacer(value.clone()).unwrap_or(Value::Null);
    normalized.to_string()
}

/// 从 JSON 文本解码
///
/// 文本不是合法 JSON 时返回 [`CacheError::Parse`]
pub fn decode(text: &str) -> Result<Value, CacheError> {
    serde_json::from_str(text).map_err(|e| CacheError::Parse(e.to_string()))
}

/// replacer：递归丢弃对象中的 null 字段
///
/// 返回 `None` 表示该值整体被丢弃。数组中被丢弃的元素保留为 null 占位。
fn apply_replacer(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Object(map) => {
            let map = map
                .into_iter()
                .filter_map(|(k, v)| apply_replacer(v).map(|v| (k, v)))
                .collect();
            Some(Value::Object(map))
        }
        Value::Array(items) => {
            let items = items
                .into_iter()
                .map(|v| apply_replacer(v).unwrap_or(Value::Null))
                .collect();
            Some(Value::Array(items))
        }
        other => Some(other),
    }
}

/// 真值判定
///
/// memoize 的命中判定沿用原有语义：null、false、0、空字符串视为"未缓存"。
/// 空数组与空对象视为真值。
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
