use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 分页查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginationQuery {
    #[serde(
        default = "default_page",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub page: i64,
    #[serde(
        default = "default_size",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub size: i64,
}

// 分页响应信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

// 分页列表响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginatedResponse<T: TS> {
    pub items: Vec<T>,
    pub pagination: PaginationInfo,
}

// 自定义反序列化函数，支持字符串到i64的转换
fn deserialize_string_to_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{Error, Unexpected, Visitor};
    use std::fmt;

    struct I64Visitor;

    impl<'de> Visitor<'de> for I64Visitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a string containing an integer")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            if value <= i64::MAX as u64 {
                Ok(value as i64)
            } else {
                Err(Error::invalid_value(Unexpected::Unsigned(value), &self))
            }
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            value
                .parse()
                .map_err(|_| Error::invalid_value(Unexpected::Str(value), &self))
        }
    }

    deserializer.deserialize_any(I64Visitor)
}

/// 可选整数参数，支持数字或数字字符串（查询字符串中经过 flatten 后均为字符串）
pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Int(v)) => Ok(Some(v)),
        Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Raw::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid integer: {s}"))),
    }
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    10
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self { page: 1, size: 10 }
    }
}

pub const MAX_PAGE_SIZE: i64 = 100;
/// 页码上限，保证 `page * size` 作为偏移量不会溢出
pub const MAX_PAGE: i64 = i64::MAX / MAX_PAGE_SIZE;

/// 规范化页码与每页数量：页码 1..=MAX_PAGE，每页 1..=100
pub fn page_bounds(page: Option<i64>, size: Option<i64>) -> (u64, u64) {
    (
        page.unwrap_or(1).clamp(1, MAX_PAGE) as u64,
        size.unwrap_or(10).clamp(1, MAX_PAGE_SIZE) as u64,
    )
}

impl PaginationQuery {
    pub fn normalized(&self) -> (u64, u64) {
        page_bounds(Some(self.page), Some(self.size))
    }
}

impl PaginationInfo {
    pub fn new(page: u64, page_size: u64, total: u64, total_pages: u64) -> Self {
        Self {
            page: page as i64,
            page_size: page_size as i64,
            total: total as i64,
            total_pages: total_pages as i64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Wrapper {
        #[serde(flatten)]
        pagination: PaginationQuery,
    }

    #[test]
    fn test_accepts_numbers_and_numeric_strings() {
        let q: PaginationQuery = serde_json::from_str(r#"{"page": 3, "size": "25"}"#).unwrap();
        assert_eq!(q.page, 3);
        assert_eq!(q.size, 25);
    }

    #[test]
    fn test_defaults_when_missing() {
        let q: PaginationQuery = serde_json::from_str("{}").unwrap();
        assert_eq!((q.page, q.size), (1, 10));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(serde_json::from_str::<PaginationQuery>(r#"{"page": "abc"}"#).is_err());
    }

    #[test]
    fn test_flattened_query_string() {
        let w: Wrapper = serde_json::from_str(r#"{"page": "2", "size": "5"}"#).unwrap();
        assert_eq!(w.pagination.page, 2);
        assert_eq!(w.pagination.size, 5);
    }

    #[derive(Debug, Deserialize)]
    struct OptionalId {
        #[serde(default, deserialize_with = "deserialize_optional_i64")]
        id: Option<i64>,
    }

    #[test]
    fn test_optional_i64() {
        let v: OptionalId = serde_json::from_str(r#"{"id": "42"}"#).unwrap();
        assert_eq!(v.id, Some(42));
        let v: OptionalId = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(v.id, Some(7));
        let v: OptionalId = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(v.id, None);
        assert!(serde_json::from_str::<OptionalId>(r#"{"id": "x"}"#).is_err());
    }

    #[test]
    fn test_normalized_clamps() {
        let q = PaginationQuery { page: 0, size: 1000 };
        assert_eq!(q.normalized(), (1, 100));
        let q = PaginationQuery { page: 4, size: 0 };
        assert_eq!(q.normalized(), (4, 1));
    }

    #[test]
    fn test_huge_page_cannot_overflow_offset() {
        let (page, size) = page_bounds(Some(i64::MAX), Some(100));
        assert_eq!(page, MAX_PAGE as u64);
        assert!(page.checked_mul(size).is_some());
        assert!((page * size) <= i64::MAX as u64);
        assert_eq!(page_bounds(None, None), (1, 10));
        assert_eq!(page_bounds(Some(-5), Some(-5)), (1, 1));
    }
}
