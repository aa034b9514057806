//! 时间格式化工具

use chrono::{DateTime, Local, TimeZone};

/// 常规类型
pub const TIME_TEMPLATE_1: &str = "%Y-%m-%d %H:%M:%S";
/// 斜杠日期
pub const TIME_TEMPLATE_2: &str = "%Y/%m/%d %H:%M:%S";
/// 仅日期
pub const TIME_TEMPLATE_3: &str = "%Y-%m-%d";
/// 仅时间
pub const TIME_TEMPLATE_4: &str = "%H:%M:%S";
/// 精确到分钟
pub const TIME_TEMPLATE_5: &str = "%Y-%m-%d %H:%M";

/// 将秒级时间戳字符串格式化为本地时间
///
/// 无法解析的输入按 0 处理（1970-01-01 的本地时间）
pub fn unix_to_time(time_stamp_str: &str) -> String {
    let secs = time_stamp_str.trim().parse::<i64>().unwrap_or(0);
    format_unix(secs, TIME_TEMPLATE_1)
}

/// 按指定模板格式化秒级时间戳
pub fn format_unix(secs: i64, template: &str) -> String {
    let dt: DateTime<Local> = Local
        .timestamp_opt(secs, 0)
        .single()
        .unwrap_or_else(|| DateTime::<chrono::Utc>::UNIX_EPOCH.with_timezone(&Local));
    dt.format(template).to_string()
}

/// 当前时间（常规类型）
pub fn now_formatted() -> String {
    unix_to_time(&Local::now().timestamp().to_string())
}
