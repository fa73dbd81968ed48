// ==========================================
// 餐厅排班管理系统 - 班次名称归一化
// ==========================================
// 历史手工录入的班次名称为自由文本，按关键词子串映射到
// 三个标准班次; 无法识别返回 None（一等结果，不是错误），
// 由调用方决定记日志并跳过。
// ==========================================

use crate::domain::types::ShiftName;

/// 早班关键词
const MORNING_KEYWORDS: [&str; 5] = ["morning", "am", "open", "breakfast", "day"];

/// 晚班关键词
const EVENING_KEYWORDS: [&str; 5] = ["evening", "pm", "swing", "dinner", "afternoon"];

/// 夜班关键词
const NIGHT_KEYWORDS: [&str; 5] = ["night", "overnight", "graveyard", "close", "closing"];

/// 将自由文本班次名称归一化为标准班次
///
/// 匹配顺序: 早班 → 晚班 → 夜班; 子串匹配，不区分大小写。
pub fn normalize_shift_name(raw: &str) -> Option<ShiftName> {
    let lowered = raw.trim().to_lowercase();
    if lowered.is_empty() {
        return None;
    }

    if MORNING_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        return Some(ShiftName::Morning);
    }
    if EVENING_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        return Some(ShiftName::Evening);
    }
    if NIGHT_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        return Some(ShiftName::Night);
    }

    None
}
