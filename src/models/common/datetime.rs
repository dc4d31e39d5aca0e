//! 服务端时间戳解析
//!
//! 服务端可能返回不带时区的时间（按 UTC 存储），也可能返回带偏移量的 RFC 3339 时间。
//! 两种格式统一转换为 `DateTime<Utc>`。

use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serializer};

use crate::errors::{PortalError, Result};

const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// 解析服务端时间戳
pub fn parse_instant(raw: &str) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
    let raw = raw.trim();
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(_) => NaiveDateTime::parse_from_str(raw, NAIVE_FORMAT).map(|naive| naive.and_utc()),
    }
}

const USER_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// 解析用户输入的截止时间
///
/// 带偏移量或 `Z` 的输入按原样解析；不带时区的 `YYYY-MM-DD HH:MM` / `YYYY-MM-DDTHH:MM[:SS]`
/// 按本地时间理解。
pub fn parse_user_deadline(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = USER_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .ok_or_else(|| {
            PortalError::date_parse(format!(
                "Unrecognised deadline '{raw}', expected e.g. 2030-05-01 12:00 or 2030-05-01T12:00:00Z"
            ))
        })?;

    // 夏令时切换造成的不存在时间按 UTC 处理
    Ok(Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc()))
}

/// 格式化为 ISO 8601（UTC，毫秒精度）
pub fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn serialize<S>(instant: &DateTime<Utc>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_instant(instant))
}

pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_instant(&raw)
        .map_err(|e| serde::de::Error::custom(format!("无效的时间戳: '{raw}' ({e})")))
}
