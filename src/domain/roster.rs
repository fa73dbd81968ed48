// ==========================================
// 餐厅排班管理系统 - 排班实体与汇总视图
// ==========================================
// ShiftBlock: 固定班次目录（进程启动即不可变）
// DaySummary: 派生视图，每次查询重新构建，不落库
// ==========================================

use crate::domain::employee::Employee;
use crate::domain::types::{AssignmentStatus, ShiftName};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// ShiftBlock - 班次目录
// ==========================================

/// 班次目录条目（静态数据，无行为）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShiftBlock {
    pub name: ShiftName,
    pub start_time: &'static str,
    pub end_time: &'static str,
}

/// 固定班次目录: 早/晚/夜三个班次
pub const SHIFT_CATALOG: [ShiftBlock; 3] = [
    ShiftBlock {
        name: ShiftName::Morning,
        start_time: "06:00",
        end_time: "14:00",
    },
    ShiftBlock {
        name: ShiftName::Evening,
        start_time: "14:00",
        end_time: "22:00",
    },
    ShiftBlock {
        name: ShiftName::Night,
        start_time: "22:00",
        end_time: "06:00",
    },
];

impl ShiftBlock {
    /// 按名称查找目录条目
    pub fn find(name: ShiftName) -> ShiftBlock {
        // 目录覆盖所有枚举值，查找必然命中
        SHIFT_CATALOG
            .iter()
            .copied()
            .find(|block| block.name == name)
            .unwrap_or(SHIFT_CATALOG[0])
    }
}

// ==========================================
// ShiftAssignment - 排班记录
// ==========================================

/// 排班记录（归属于排班表，而非员工）
///
/// 生命周期: 校验通过后创建; 仅 status / notes 可变更; 显式删除。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftAssignment {
    pub id: String,
    pub employee_id: String,
    pub shift_name: ShiftName,
    /// 日历日（无时间分量，按日键比较）
    pub work_date: NaiveDate,
    pub status: AssignmentStatus,
    pub notes: Option<String>,
}

// ==========================================
// RosterEntry - 排班记录 + 内嵌员工
// ==========================================

/// 校验器与汇总器共同消费的形态（排班记录内嵌员工角色与头衔）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub assignment: ShiftAssignment,
    pub employee: Employee,
}

// ==========================================
// RawShiftRow - 未归一化的历史排班行
// ==========================================

/// 历史排班行: shift_name 为自由文本（历史手工录入），
/// 由月度汇总在读取时做关键词归一化。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawShiftRow {
    pub id: String,
    pub employee: Employee,
    pub shift_name: String,
    pub work_date: NaiveDate,
    pub status: AssignmentStatus,
    pub notes: Option<String>,
}

// ==========================================
// DaySummary - 单日汇总视图
// ==========================================

/// 单个班次在某日的汇总
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftDaySummary {
    pub assignments: Vec<RosterEntry>,
    /// 首次出现管理人员即置位，不再回退
    pub leader_on_duty: bool,
    pub total: u32,
    pub on_duty: u32,
    pub scheduled: u32,
    pub completed: u32,
    pub absent: u32,
}

impl ShiftDaySummary {
    pub fn empty() -> Self {
        Self {
            assignments: Vec::new(),
            leader_on_duty: false,
            total: 0,
            on_duty: 0,
            scheduled: 0,
            completed: 0,
            absent: 0,
        }
    }
}

/// 单个日历日的汇总（派生视图，不落库）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    /// 三个班次全部存在，即使当日无任何排班
    pub shifts: BTreeMap<ShiftName, ShiftDaySummary>,
}

impl DaySummary {
    /// 构建全空的单日汇总（三个班次、零计数）
    pub fn empty(date: NaiveDate) -> Self {
        let mut shifts = BTreeMap::new();
        for shift in ShiftName::ALL {
            shifts.insert(shift, ShiftDaySummary::empty());
        }
        Self { date, shifts }
    }
}
