//! 人性化时间配置
//!
//! 配置文件中的时间字段统一写成 "30s"、"500ms"、"1m30s" 这样的字符串

use anyhow::{anyhow, Result};
use serde::{Deserialize, Deserializer, Serializer};
use std::time::Duration;

pub use serde_with::{serde_as, DeserializeAs, SerializeAs};

/// Duration 的字符串适配器，配合 `#[serde_as(as = "HumanDur")]` 使用
pub struct HumanDur;

impl SerializeAs<Duration> for HumanDur {
    fn serialize_as<S>(source: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_duration(*source))
    }
}

impl<'de> DeserializeAs<'de, Duration> for HumanDur {
    fn deserialize_as<D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_duration(&s).map_err(serde::de::Error::custom)
    }
}

/// 单位对应的纳秒数
fn unit_nanos(unit: &str) -> Option<f64> {
    let nanos = match unit {
        "ns" => 1.0,
        "us" => 1e3,
        "ms" => 1e6,
        "s" => 1e9,
        "m" => 60.0 * 1e9,
        "h" => 3600.0 * 1e9,
        "d" => 86400.0 * 1e9,
        _ => return None,
    };
    Some(nanos)
}

/// 解析时间字符串，支持组合写法，如 "1h30m"、"1m500ms"
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim().to_lowercase();
    if s.is_empty() {
        return Err(anyhow!("时间字符串为空"));
    }

    let mut total_nanos = 0f64;
    let mut rest = s.as_str();
    while !rest.is_empty() {
        let num_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if num_end == 0 {
            return Err(anyhow!("期望数字: {}", s));
        }
        let value: f64 = rest[..num_end]
            .parse()
            .map_err(|_| anyhow!("无效数字: {}", &rest[..num_end]))?;
        rest = &rest[num_end..];

        let unit_end = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        let unit = &rest[..unit_end];
        if unit.is_empty() {
            return Err(anyhow!("缺少时间单位: {}", s));
        }
        let nanos = unit_nanos(unit).ok_or_else(|| anyhow!("不支持的时间单位: {}", unit))?;
        total_nanos += value * nanos;
        rest = &rest[unit_end..];
    }

    Ok(Duration::from_nanos(total_nanos.round() as u64))
}

/// 格式化为最简的字符串表示: 90s -> "1m30s"
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.subsec_millis();
    let mut secs = duration.as_secs();

    if secs == 0 && duration.subsec_nanos() == 0 {
        return "0s".to_string();
    }
    // 不足毫秒的部分无法用 ms 表示
    if duration.subsec_nanos() % 1_000_000 != 0 {
        return format!("{}ns", duration.as_nanos());
    }

    let mut out = String::new();
    for (unit, size) in [("d", 86400), ("h", 3600), ("m", 60)] {
        if secs >= size {
            out.push_str(&format!("{}{}", secs / size, unit));
            secs %= size;
        }
    }
    if millis > 0 {
        out.push_str(&format!("{}ms", secs * 1000 + u64::from(millis)));
    } else if secs > 0 {
        out.push_str(&format!("{}s", secs));
    }
    out
}
