//! 时间与数字的展示格式化
//!
//! - `format_datetime`: 用户信息中的时间戳
//! - `format_duration`: 视频时长（秒）
//! - `format_count`: 浏览量、点赞数等计数

use chrono::{DateTime, Utc};

/// 缺失时间戳的占位文本
pub const NOT_AVAILABLE: &str = "N/A";

/// 格式化时间戳，缺失或为 Go 零值 (0001-01-01) 时返回 "N/A"
pub fn format_datetime(value: Option<&DateTime<Utc>>) -> String {
    match value {
        Some(dt) if dt.timestamp() > 0 => dt.format("%Y-%m-%d %H:%M UTC").to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// 将秒数格式化为 `mm:ss`，超过一小时时为 `hh:mm:ss`
///
/// 非有限值（直播流的 duration 为 Infinity）返回 "--:--"
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "--:--".to_string();
    }
    let total = seconds.floor() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

// Formats each x1000 step
pub fn format_count(number: u64) -> String {
    let num_str = number.to_string();
    let len = num_str.len();
    let mut result = String::with_capacity(len + len / 3);

    for (i, c) in num_str.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}
