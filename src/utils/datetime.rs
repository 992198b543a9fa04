use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// 宽松解析时间戳，接受后台表单会提交的几种格式：
/// RFC3339、"YYYY-MM-DD HH:MM:SS"、"YYYY-MM-DDTHH:MM"、"YYYY-MM-DD"
pub fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    parse_date(value).map(day_start)
}

/// 解析 "YYYY-MM-DD"
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// 当天 00:00:00 (UTC)，日期下界用
pub fn day_start(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).expect("valid time"))
}

/// 当天 23:59:59 (UTC)，日期上界用（按日期筛选忽略时刻）
pub fn day_end(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(23, 59, 59).expect("valid time"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_datetime_formats() {
        assert!(parse_datetime("2025-01-01T21:30:00+08:00").is_some());
        assert!(parse_datetime("2025-01-01 21:30:00").is_some());
        assert!(parse_datetime("2025-01-01T21:30").is_some());
        assert!(parse_datetime("2025-01-01").is_some());
        assert!(parse_datetime("january first").is_none());
        assert!(parse_datetime("").is_none());
    }

    #[test]
    fn test_day_bounds() {
        let date = parse_date("2025-02-01").unwrap();
        let start = day_start(date);
        let end = day_end(date);
        assert!(start < end);
        assert_eq!(start.to_rfc3339(), "2025-02-01T00:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2025-02-01T23:59:59+00:00");
    }
}
