// ==========================================
// 餐厅排班管理系统 - 日期工具
// ==========================================
// 全引擎统一: 日键格式 %Y-%m-%d, 固定参考日历
// “前一日”为日历上整一天，不是 24 小时滚动窗口
// ==========================================

use chrono::{Datelike, NaiveDate};

/// 日键格式（全引擎统一）
pub const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// 计算日键（如 "2024-03-01"）
pub fn day_key(date: NaiveDate) -> String {
    date.format(DAY_KEY_FORMAT).to_string()
}

/// 日历上的前一天（仅在 NaiveDate::MIN 时为 None）
pub fn previous_day(date: NaiveDate) -> Option<NaiveDate> {
    date.pred_opt()
}

/// 是否为周日（固定参考日历, weekday == 0）
pub fn is_sunday(date: NaiveDate) -> bool {
    date.weekday().num_days_from_sunday() == 0
}

/// 月份首日（月份非法时为 None）
pub fn first_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// 月份末日
pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let next_month_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next_month_first.and_then(|d| d.pred_opt())
}

/// 月份内全部日历日，升序
pub fn month_days(year: i32, month: u32) -> Vec<NaiveDate> {
    match (first_day_of_month(year, month), last_day_of_month(year, month)) {
        (Some(first), Some(last)) => {
            let mut days = Vec::with_capacity(31);
            let mut current = first;
            while current <= last {
                days.push(current);
                match current.succ_opt() {
                    Some(next) => current = next,
                    None => break,
                }
            }
            days
        }
        _ => Vec::new(),
    }
}
