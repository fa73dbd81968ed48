// ==========================================
// 餐厅排班管理系统 - 排班规则引擎
// ==========================================
// 职责: 校验单条候选排班是否合法
// 红线: 不落库，不改输入; 所有规则组都要评估，
//       触发的违规全部返回（调用方需展示每一条原因）
// ==========================================

use crate::domain::employee::Employee;
use crate::domain::roster::RosterEntry;
use crate::domain::types::{EmployeeRole, ShiftName};
use crate::engine::date_utils::{day_key, is_sunday, previous_day};
use crate::engine::leadership::is_leadership;
use crate::i18n;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// RuleKind - 规则类别
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleKind {
    DuplicateShift,   // 同日同班次重复
    DailyCap,         // 单日班次上限
    NightExclusive,   // 夜班排他
    RoleAvailability, // 角色可用性
    FirstLeader,      // 首位排班须为管理人员
    LeaderCoverage,   // 班次管理人员覆盖
    Cooldown,         // 连班冷却
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::DuplicateShift => write!(f, "DUPLICATE_SHIFT"),
            RuleKind::DailyCap => write!(f, "DAILY_CAP"),
            RuleKind::NightExclusive => write!(f, "NIGHT_EXCLUSIVE"),
            RuleKind::RoleAvailability => write!(f, "ROLE_AVAILABILITY"),
            RuleKind::FirstLeader => write!(f, "FIRST_LEADER"),
            RuleKind::LeaderCoverage => write!(f, "LEADER_COVERAGE"),
            RuleKind::Cooldown => write!(f, "COOLDOWN"),
        }
    }
}

// ==========================================
// Violation - 违规记录
// ==========================================

/// 单条违规: 规则类别 + 可读原因
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub rule: RuleKind,
    pub message: String,
}

impl Violation {
    fn new(rule: RuleKind, message: String) -> Self {
        Self { rule, message }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

// ==========================================
// RosterRuleConfig - 规则配置
// ==========================================

/// 规则配置
#[derive(Debug, Clone)]
pub struct RosterRuleConfig {
    /// 单个员工单日班次上限
    pub max_daily_shifts: usize,
}

impl Default for RosterRuleConfig {
    fn default() -> Self {
        Self { max_daily_shifts: 2 }
    }
}

// ==========================================
// RosterRuleEngine - 排班规则引擎
// ==========================================

/// 排班规则引擎
///
/// 纯同步计算: 所有上下文（当日/前一日排班快照）由调用方显式传入，
/// 快照一致性与持久化竞态由外部持久层负责（唯一索引兜底）。
#[derive(Debug, Clone, Default)]
pub struct RosterRuleEngine {
    config: RosterRuleConfig,
}

impl RosterRuleEngine {
    pub fn new(config: RosterRuleConfig) -> Self {
        Self { config }
    }

    /// 校验候选排班
    ///
    /// # 参数
    /// - candidate: 候选员工
    /// - shift_name: 请求班次
    /// - target_date: 目标日历日
    /// - day_entries: 目标日全部排班（所有员工，内嵌员工信息）
    /// - previous_day_entries: 前一日历日的全部排班
    ///
    /// # 返回
    /// 违规列表，空表示合法可落库
    pub fn validate(
        &self,
        candidate: &Employee,
        shift_name: ShiftName,
        target_date: NaiveDate,
        day_entries: &[RosterEntry],
        previous_day_entries: &[RosterEntry],
    ) -> Vec<Violation> {
        let mut violations = Vec::new();

        // 规则组 1: 单日负载（重复/上限/夜班排他）
        // 重复命中时短路本组其余检查，其他规则组照常评估
        let duplicates = self.check_duplicate_shift(candidate, shift_name, target_date, day_entries);
        if duplicates.is_empty() {
            violations.extend(self.check_daily_cap(candidate, target_date, day_entries));
            violations.extend(self.check_night_exclusive(
                candidate,
                shift_name,
                target_date,
                day_entries,
            ));
        } else {
            violations.extend(duplicates);
        }

        // 规则组 2: 角色可用性
        violations.extend(self.check_role_availability(candidate, shift_name, target_date));

        // 规则组 3: 管理人员覆盖（早/晚班）
        violations.extend(self.check_first_leader(candidate, shift_name, day_entries));
        violations.extend(self.check_leader_coverage(candidate, shift_name, target_date, day_entries));

        // 规则组 4: 连班冷却
        violations.extend(self.check_cooldown(
            candidate,
            shift_name,
            target_date,
            previous_day_entries,
        ));

        violations
    }

    /// 规则 1: 同日同班次重复
    fn check_duplicate_shift(
        &self,
        candidate: &Employee,
        shift_name: ShiftName,
        target_date: NaiveDate,
        day_entries: &[RosterEntry],
    ) -> Vec<Violation> {
        let duplicate = day_entries.iter().any(|entry| {
            entry.employee.id == candidate.id && entry.assignment.shift_name == shift_name
        });

        if duplicate {
            vec![Violation::new(
                RuleKind::DuplicateShift,
                i18n::t_with_args(
                    "roster.duplicate_shift",
                    &[
                        ("employee", &candidate.name),
                        ("date", &day_key(target_date)),
                        ("shift", &shift_label(shift_name)),
                    ],
                ),
            )]
        } else {
            Vec::new()
        }
    }

    /// 规则 2: 单日班次上限
    fn check_daily_cap(
        &self,
        candidate: &Employee,
        target_date: NaiveDate,
        day_entries: &[RosterEntry],
    ) -> Vec<Violation> {
        let count = day_entries
            .iter()
            .filter(|entry| entry.employee.id == candidate.id)
            .count();

        if count >= self.config.max_daily_shifts {
            vec![Violation::new(
                RuleKind::DailyCap,
                i18n::t_with_args(
                    "roster.daily_cap",
                    &[
                        ("employee", &candidate.name),
                        ("date", &day_key(target_date)),
                        ("max", &self.config.max_daily_shifts.to_string()),
                    ],
                ),
            )]
        } else {
            Vec::new()
        }
    }

    /// 规则 3: 夜班排他（双向: 夜班不与任何班次同日并存）
    fn check_night_exclusive(
        &self,
        candidate: &Employee,
        shift_name: ShiftName,
        target_date: NaiveDate,
        day_entries: &[RosterEntry],
    ) -> Vec<Violation> {
        let mine: Vec<&RosterEntry> = day_entries
            .iter()
            .filter(|entry| entry.employee.id == candidate.id)
            .collect();

        let conflict = if shift_name == ShiftName::Night {
            mine.iter()
                .any(|entry| entry.assignment.shift_name != ShiftName::Night)
        } else {
            mine.iter()
                .any(|entry| entry.assignment.shift_name == ShiftName::Night)
        };

        if conflict {
            vec![Violation::new(
                RuleKind::NightExclusive,
                i18n::t_with_args(
                    "roster.night_exclusive",
                    &[
                        ("employee", &candidate.name),
                        ("date", &day_key(target_date)),
                    ],
                ),
            )]
        } else {
            Vec::new()
        }
    }

    /// 规则 4: 角色可用性（库管员/配送员的班次政策）
    fn check_role_availability(
        &self,
        candidate: &Employee,
        shift_name: ShiftName,
        target_date: NaiveDate,
    ) -> Vec<Violation> {
        let mut violations = Vec::new();

        match candidate.role {
            EmployeeRole::StoreKeep => {
                if shift_name != ShiftName::Morning {
                    violations.push(Violation::new(
                        RuleKind::RoleAvailability,
                        i18n::t_with_args(
                            "roster.store_keep_shift",
                            &[("shift", &shift_label(shift_name))],
                        ),
                    ));
                }
                // 周日不参与排班，与班次检查相互独立，可同时触发
                if is_sunday(target_date) {
                    violations.push(Violation::new(
                        RuleKind::RoleAvailability,
                        i18n::t_with_args(
                            "roster.store_keep_sunday",
                            &[("date", &day_key(target_date))],
                        ),
                    ));
                }
            }
            EmployeeRole::DeliveryPerson => {
                if shift_name == ShiftName::Night {
                    violations.push(Violation::new(
                        RuleKind::RoleAvailability,
                        i18n::t("roster.delivery_night"),
                    ));
                }
            }
            _ => {}
        }

        violations
    }

    /// 规则 5: 早/晚班的首位排班须为管理人员
    fn check_first_leader(
        &self,
        candidate: &Employee,
        shift_name: ShiftName,
        day_entries: &[RosterEntry],
    ) -> Vec<Violation> {
        if shift_name == ShiftName::Night {
            return Vec::new();
        }

        let has_leader = day_entries
            .iter()
            .filter(|entry| entry.assignment.shift_name == shift_name)
            .any(|entry| is_leadership(&entry.employee));

        if !has_leader && !is_leadership(candidate) {
            vec![Violation::new(
                RuleKind::FirstLeader,
                i18n::t_with_args("roster.first_leader", &[("shift", &shift_label(shift_name))]),
            )]
        } else {
            Vec::new()
        }
    }

    /// 规则 6: 早/晚班管理人员覆盖（候选加入后的假设视图）
    ///
    /// 单候选场景下与规则 5 刻意重叠，按既有行为保留两条检查，
    /// 多排班日视图下需各自独立成立。
    fn check_leader_coverage(
        &self,
        candidate: &Employee,
        shift_name: ShiftName,
        target_date: NaiveDate,
        day_entries: &[RosterEntry],
    ) -> Vec<Violation> {
        if shift_name == ShiftName::Night {
            return Vec::new();
        }

        let covered = day_entries
            .iter()
            .filter(|entry| entry.assignment.shift_name == shift_name)
            .any(|entry| is_leadership(&entry.employee))
            || is_leadership(candidate);

        if !covered {
            vec![Violation::new(
                RuleKind::LeaderCoverage,
                i18n::t_with_args(
                    "roster.leader_coverage",
                    &[
                        ("shift", &shift_label(shift_name)),
                        ("date", &day_key(target_date)),
                    ],
                ),
            )]
        } else {
            Vec::new()
        }
    }

    /// 规则 7: 连班冷却 - 前一日早晚连班后，次日早/晚班必须休息
    fn check_cooldown(
        &self,
        candidate: &Employee,
        shift_name: ShiftName,
        target_date: NaiveDate,
        previous_day_entries: &[RosterEntry],
    ) -> Vec<Violation> {
        if shift_name == ShiftName::Night {
            return Vec::new();
        }

        let Some(prev_date) = previous_day(target_date) else {
            return Vec::new();
        };

        let worked_morning = previous_day_entries.iter().any(|entry| {
            entry.employee.id == candidate.id && entry.assignment.shift_name == ShiftName::Morning
        });
        let worked_evening = previous_day_entries.iter().any(|entry| {
            entry.employee.id == candidate.id && entry.assignment.shift_name == ShiftName::Evening
        });

        if worked_morning && worked_evening {
            vec![Violation::new(
                RuleKind::Cooldown,
                i18n::t_with_args(
                    "roster.cooldown",
                    &[
                        ("employee", &candidate.name),
                        ("prev_date", &day_key(prev_date)),
                    ],
                ),
            )]
        } else {
            Vec::new()
        }
    }
}

/// 班次的本地化名称（如 早班 / Morning shift）
fn shift_label(shift: ShiftName) -> String {
    i18n::t(&format!("shift.{}", shift.to_db_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::roster::ShiftAssignment;
    use crate::domain::types::AssignmentStatus;

    // ==========================================
    // 测试辅助函数
    // ==========================================

    fn manager(id: &str, name: &str) -> Employee {
        Employee::new(id, name, EmployeeRole::Manager, None)
    }

    fn waiter(id: &str, name: &str) -> Employee {
        Employee::new(id, name, EmployeeRole::Waiter, None)
    }

    fn entry(employee: &Employee, shift: ShiftName, date: NaiveDate) -> RosterEntry {
        RosterEntry {
            assignment: ShiftAssignment {
                id: format!("A-{}-{}", employee.id, shift),
                employee_id: employee.id.clone(),
                shift_name: shift,
                work_date: date,
                status: AssignmentStatus::Scheduled,
                notes: None,
            },
            employee: employee.clone(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rules_of(violations: &[Violation]) -> Vec<RuleKind> {
        violations.iter().map(|v| v.rule).collect()
    }

    // ==========================================
    // 测试用例
    // ==========================================

    #[test]
    fn test_valid_first_assignment_by_leader() {
        let engine = RosterRuleEngine::default();
        let boss = manager("E001", "王店长");
        let d = date(2024, 3, 4); // 周一

        let violations = engine.validate(&boss, ShiftName::Morning, d, &[], &[]);
        assert!(violations.is_empty(), "unexpected: {:?}", violations);
    }

    #[test]
    fn test_duplicate_shift_flagged_and_suppresses_load_group() {
        let engine = RosterRuleEngine::default();
        let boss = manager("E001", "王店长");
        let d = date(2024, 3, 4);
        let day = vec![entry(&boss, ShiftName::Morning, d)];

        let violations = engine.validate(&boss, ShiftName::Morning, d, &day, &[]);
        // 重复命中后，本组的上限/夜班检查不再追加
        assert_eq!(rules_of(&violations), vec![RuleKind::DuplicateShift]);
        assert!(violations[0].message.contains("王店长"));
        assert!(violations[0].message.contains("2024-03-04"));
    }

    #[test]
    fn test_daily_cap_on_third_assignment() {
        let engine = RosterRuleEngine::default();
        let boss = manager("E001", "王店长");
        let d = date(2024, 3, 4);
        let day = vec![
            entry(&boss, ShiftName::Morning, d),
            entry(&boss, ShiftName::Evening, d),
        ];

        // 第三个班次只能是夜班方向，上限与夜班排他同时触发
        let violations = engine.validate(&boss, ShiftName::Night, d, &day, &[]);
        assert!(rules_of(&violations).contains(&RuleKind::DailyCap));
        assert!(rules_of(&violations).contains(&RuleKind::NightExclusive));
    }

    #[test]
    fn test_night_exclusive_both_directions() {
        let engine = RosterRuleEngine::default();
        let boss = manager("E001", "王店长");
        let d = date(2024, 3, 4);

        // 已有早班，再排夜班
        let day = vec![entry(&boss, ShiftName::Morning, d)];
        let violations = engine.validate(&boss, ShiftName::Night, d, &day, &[]);
        assert!(rules_of(&violations).contains(&RuleKind::NightExclusive));

        // 已有夜班，再排早班
        let day = vec![entry(&boss, ShiftName::Night, d)];
        let violations = engine.validate(&boss, ShiftName::Morning, d, &day, &[]);
        assert!(rules_of(&violations).contains(&RuleKind::NightExclusive));
    }

    #[test]
    fn test_store_keep_morning_only() {
        let engine = RosterRuleEngine::default();
        let keeper = Employee::new("E010", "李库管", EmployeeRole::StoreKeep, None);
        let monday = date(2024, 3, 4);
        let boss = manager("E001", "王店长");
        let day = vec![entry(&boss, ShiftName::Evening, monday)];

        // 晚班: 角色违规（晚班已有店长，覆盖规则满足）
        let violations = engine.validate(&keeper, ShiftName::Evening, monday, &day, &[]);
        assert_eq!(rules_of(&violations), vec![RuleKind::RoleAvailability]);

        // 夜班: 角色违规
        let violations = engine.validate(&keeper, ShiftName::Night, monday, &[], &[]);
        assert_eq!(rules_of(&violations), vec![RuleKind::RoleAvailability]);
    }

    #[test]
    fn test_store_keep_sunday_blocked() {
        let engine = RosterRuleEngine::default();
        let keeper = Employee::new("E010", "李库管", EmployeeRole::StoreKeep, None);
        let sunday = date(2024, 3, 3);
        let boss = manager("E001", "王店长");
        let day = vec![entry(&boss, ShiftName::Morning, sunday)];

        // 周日早班: 仅周日违规
        let violations = engine.validate(&keeper, ShiftName::Morning, sunday, &day, &[]);
        assert_eq!(rules_of(&violations), vec![RuleKind::RoleAvailability]);
        assert!(violations[0].message.contains("2024-03-03"));

        // 周日晚班: 班次违规 + 周日违规同时触发
        let sunday_evening = vec![entry(&boss, ShiftName::Evening, sunday)];
        let violations = engine.validate(&keeper, ShiftName::Evening, sunday, &sunday_evening, &[]);
        assert_eq!(
            rules_of(&violations),
            vec![RuleKind::RoleAvailability, RuleKind::RoleAvailability]
        );
    }

    #[test]
    fn test_store_keep_weekday_morning_passes() {
        let engine = RosterRuleEngine::default();
        let keeper = Employee::new("E010", "李库管", EmployeeRole::StoreKeep, None);
        let monday = date(2024, 3, 4);
        let boss = manager("E001", "王店长");
        let day = vec![entry(&boss, ShiftName::Morning, monday)];

        let violations = engine.validate(&keeper, ShiftName::Morning, monday, &day, &[]);
        assert!(violations.is_empty(), "unexpected: {:?}", violations);
    }

    #[test]
    fn test_delivery_person_never_night() {
        let engine = RosterRuleEngine::default();
        let rider = Employee::new("E020", "赵配送", EmployeeRole::DeliveryPerson, None);
        let d = date(2024, 3, 4);

        let violations = engine.validate(&rider, ShiftName::Night, d, &[], &[]);
        assert_eq!(rules_of(&violations), vec![RuleKind::RoleAvailability]);

        // 早班无角色限制（晚到的覆盖规则另算）
        let boss = manager("E001", "王店长");
        let day = vec![entry(&boss, ShiftName::Morning, d)];
        let violations = engine.validate(&rider, ShiftName::Morning, d, &day, &[]);
        assert!(violations.is_empty());
    }

    #[test]
    fn test_first_assignment_by_non_leader_rejected() {
        let engine = RosterRuleEngine::default();
        let staff = waiter("E030", "孙服务");
        let d = date(2024, 3, 4);

        let violations = engine.validate(&staff, ShiftName::Morning, d, &[], &[]);
        // 首位管理人员与覆盖两条检查都触发（按既有行为保留）
        assert_eq!(
            rules_of(&violations),
            vec![RuleKind::FirstLeader, RuleKind::LeaderCoverage]
        );
    }

    #[test]
    fn test_non_leader_allowed_after_leader_present() {
        let engine = RosterRuleEngine::default();
        let boss = manager("E001", "王店长");
        let staff = waiter("E030", "孙服务");
        let d = date(2024, 3, 4);
        let day = vec![entry(&boss, ShiftName::Morning, d)];

        let violations = engine.validate(&staff, ShiftName::Morning, d, &day, &[]);
        assert!(violations.is_empty(), "unexpected: {:?}", violations);
    }

    #[test]
    fn test_leadership_title_satisfies_coverage() {
        let engine = RosterRuleEngine::default();
        let head_chef = Employee::new(
            "E040",
            "周主厨",
            EmployeeRole::Chef,
            Some("Head Chef".to_string()),
        );
        let d = date(2024, 3, 4);

        let violations = engine.validate(&head_chef, ShiftName::Evening, d, &[], &[]);
        assert!(violations.is_empty());
    }

    #[test]
    fn test_night_shift_has_no_leader_requirement() {
        let engine = RosterRuleEngine::default();
        let staff = waiter("E030", "孙服务");
        let d = date(2024, 3, 4);

        let violations = engine.validate(&staff, ShiftName::Night, d, &[], &[]);
        assert!(violations.is_empty());
    }

    #[test]
    fn test_cooldown_after_double_shift_day() {
        let engine = RosterRuleEngine::default();
        let boss = manager("E001", "王店长");
        let d = date(2024, 3, 5);
        let prev = date(2024, 3, 4);
        let prev_day = vec![
            entry(&boss, ShiftName::Morning, prev),
            entry(&boss, ShiftName::Evening, prev),
        ];

        // 次日早班与晚班都触发冷却
        for shift in [ShiftName::Morning, ShiftName::Evening] {
            let violations = engine.validate(&boss, shift, d, &[], &prev_day);
            assert_eq!(rules_of(&violations), vec![RuleKind::Cooldown]);
            assert!(violations[0].message.contains("2024-03-04"));
        }

        // 夜班不受冷却约束
        let violations = engine.validate(&boss, ShiftName::Night, d, &[], &prev_day);
        assert!(violations.is_empty());
    }

    #[test]
    fn test_single_previous_shift_no_cooldown() {
        let engine = RosterRuleEngine::default();
        let boss = manager("E001", "王店长");
        let d = date(2024, 3, 5);
        let prev_day = vec![entry(&boss, ShiftName::Morning, date(2024, 3, 4))];

        let violations = engine.validate(&boss, ShiftName::Morning, d, &[], &prev_day);
        assert!(violations.is_empty());
    }

    #[test]
    fn test_all_triggered_groups_reported_together() {
        // 库管员在周日排晚班，且前一日连班: 角色（班次+周日）与冷却一起返回
        let engine = RosterRuleEngine::default();
        let keeper = Employee::new("E010", "李库管", EmployeeRole::StoreKeep, None);
        let sunday = date(2024, 3, 3);
        let boss = manager("E001", "王店长");
        let day = vec![entry(&boss, ShiftName::Evening, sunday)];
        let prev_day = vec![
            entry(&keeper, ShiftName::Morning, date(2024, 3, 2)),
            entry(&keeper, ShiftName::Evening, date(2024, 3, 2)),
        ];

        let violations = engine.validate(&keeper, ShiftName::Evening, sunday, &day, &prev_day);
        let rules = rules_of(&violations);
        assert_eq!(
            rules,
            vec![
                RuleKind::RoleAvailability,
                RuleKind::RoleAvailability,
                RuleKind::Cooldown
            ]
        );
    }

    #[test]
    fn test_validate_does_not_mutate_inputs() {
        let engine = RosterRuleEngine::default();
        let boss = manager("E001", "王店长");
        let d = date(2024, 3, 4);
        let day = vec![entry(&boss, ShiftName::Morning, d)];
        let snapshot = day.clone();

        let _ = engine.validate(&boss, ShiftName::Evening, d, &day, &[]);
        assert_eq!(day, snapshot);
    }
}
