// ==========================================
// 餐厅排班管理系统 - 排班汇总引擎
// ==========================================
// 职责: 单日分班分组 + 月度汇总
// 红线: 显式 fold，每次调用产出全新结构，不共享可变累积状态;
//       无法识别的历史班次名称记日志后跳过，不中断汇总
// ==========================================

use crate::domain::employee::Employee;
use crate::domain::roster::{DaySummary, RawShiftRow, RosterEntry, ShiftAssignment};
use crate::domain::types::{AssignmentStatus, ShiftName};
use crate::engine::date_utils::month_days;
use crate::engine::leadership::is_leadership;
use crate::engine::shift_name::normalize_shift_name;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// 排班汇总引擎（纯函数集合）
pub struct RosterAggregator;

impl RosterAggregator {
    /// 单日分班分组: 班次 -> 员工列表
    ///
    /// # 参数
    /// - entries: 当日排班（内嵌员工）
    /// - candidate: 假设候选（“如果加上这个人覆盖是什么样”），
    ///   追加到对应班次，不改输入
    ///
    /// 三个班次键始终存在。
    pub fn group_by_shift(
        entries: &[RosterEntry],
        candidate: Option<(&Employee, ShiftName)>,
    ) -> BTreeMap<ShiftName, Vec<Employee>> {
        let mut grouped: BTreeMap<ShiftName, Vec<Employee>> = BTreeMap::new();
        for shift in ShiftName::ALL {
            grouped.insert(shift, Vec::new());
        }

        for entry in entries {
            if let Some(bucket) = grouped.get_mut(&entry.assignment.shift_name) {
                bucket.push(entry.employee.clone());
            }
        }

        if let Some((employee, shift)) = candidate {
            if let Some(bucket) = grouped.get_mut(&shift) {
                bucket.push(employee.clone());
            }
        }

        grouped
    }

    /// 将一批当日排班折叠为单日汇总
    pub fn build_day_summary(date: NaiveDate, entries: &[RosterEntry]) -> DaySummary {
        let mut summary = DaySummary::empty(date);

        for entry in entries {
            let Some(shift) = summary.shifts.get_mut(&entry.assignment.shift_name) else {
                continue;
            };

            shift.total += 1;
            match entry.assignment.status {
                AssignmentStatus::OnDuty => shift.on_duty += 1,
                AssignmentStatus::Scheduled => shift.scheduled += 1,
                AssignmentStatus::Completed => shift.completed += 1,
                AssignmentStatus::Absent => shift.absent += 1,
            }
            if is_leadership(&entry.employee) {
                shift.leader_on_duty = true;
            }
            shift.assignments.push(entry.clone());
        }

        summary
    }

    /// 月度汇总: 每个日历日一条 DaySummary，升序，无排班的日期补全空汇总
    ///
    /// # 参数
    /// - year / month: 目标年月
    /// - rows: 该月的历史排班行（shift_name 为自由文本）
    ///
    /// 班次名称无法归一化的行记 warn 后丢弃; 日期不在目标月内的行忽略。
    /// 纯函数: 相同输入产出相同结果。
    pub fn build_month_roster(year: i32, month: u32, rows: &[RawShiftRow]) -> Vec<DaySummary> {
        let days = month_days(year, month);
        if days.is_empty() {
            warn!(year, month, "月度汇总: 非法年月，返回空结果");
            return Vec::new();
        }

        // 先按日归类，再统一折叠
        let mut per_day: BTreeMap<NaiveDate, Vec<RosterEntry>> = BTreeMap::new();
        for day in &days {
            per_day.insert(*day, Vec::new());
        }

        for row in rows {
            let Some(shift) = normalize_shift_name(&row.shift_name) else {
                warn!(
                    row_id = %row.id,
                    shift_name = %row.shift_name,
                    "月度汇总: 班次名称无法识别，已跳过"
                );
                continue;
            };

            let Some(bucket) = per_day.get_mut(&row.work_date) else {
                debug!(row_id = %row.id, date = %row.work_date, "月度汇总: 日期不在目标月内，忽略");
                continue;
            };

            bucket.push(RosterEntry {
                assignment: ShiftAssignment {
                    id: row.id.clone(),
                    employee_id: row.employee.id.clone(),
                    shift_name: shift,
                    work_date: row.work_date,
                    status: row.status,
                    notes: row.notes.clone(),
                },
                employee: row.employee.clone(),
            });
        }

        per_day
            .into_iter()
            .map(|(date, entries)| Self::build_day_summary(date, &entries))
            .collect()
    }
}
