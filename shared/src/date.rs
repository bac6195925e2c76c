//! 时间格式模块
//!
//! 控制器返回两种时间格式：
//! - 实体字段（如 `created_at`）使用 ISO 8601，chrono 默认实现即可处理
//! - 活动日志的 `timestamp` 使用 `YYYY-MM-DD HH:MM:SS`，需要专门适配

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serializer};

/// 活动日志时间格式
pub const ACTIVITY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 解析活动日志时间
pub fn parse_activity_time(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), ACTIVITY_TIME_FORMAT).ok()
}

/// `#[serde(with = "activity_time")]` 适配器
pub mod activity_time {
    use super::*;

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(ACTIVITY_TIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_activity_time(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid activity timestamp: {raw}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_activity_format() {
        let t = parse_activity_time("2024-03-05 08:09:10").unwrap();
        assert_eq!((t.year(), t.month(), t.day()), (2024, 3, 5));
        assert_eq!((t.hour(), t.minute(), t.second()), (8, 9, 10));
    }

    #[test]
    fn rejects_iso_format() {
        assert!(parse_activity_time("2024-03-05T08:09:10").is_none());
        assert!(parse_activity_time("").is_none());
    }
}
