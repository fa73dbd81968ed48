// ==========================================
// API 层集成测试
// ==========================================
// 测试目标: 校验-落库全流程、违规原因完整返回、
//           单日/月度汇总视图
// ==========================================


use chrono::NaiveDate;
use restaurant_roster::api::ApiError;
use restaurant_roster::domain::types::{AssignmentStatus, ShiftName};
use restaurant_roster::engine::RuleKind;
use restaurant_roster::logging;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_add_assignment_full_flow() {
    logging::init_test();
    let (_temp, db_path) = test_helpers::create_test_db();
    let api = test_helpers::open_api(&db_path);

    api.employee_repo()
        .upsert(&test_helpers::manager("E001", "Alice"))
        .unwrap();
    api.employee_repo()
        .upsert(&test_helpers::waiter("E002", "Bob"))
        .unwrap();

    let d = date(2024, 3, 4); // 周一

    // 首位必须是管理人员: Bob 先来被拒
    let err = api
        .add_assignment("E002", ShiftName::Morning, d, None)
        .unwrap_err();
    let ApiError::RosterValidationError { violations, .. } = err else {
        panic!("expected RosterValidationError");
    };
    let rules: Vec<RuleKind> = violations.iter().map(|v| v.rule).collect();
    assert_eq!(rules, vec![RuleKind::FirstLeader, RuleKind::LeaderCoverage]);
    // 每条违规都有可读消息
    assert!(violations.iter().all(|v| !v.message.is_empty()));

    // Alice（店长）先排，Bob 随后合法
    let alice_shift = api
        .add_assignment("E001", ShiftName::Morning, d, Some("开店".to_string()))
        .unwrap();
    assert_eq!(alice_shift.status, AssignmentStatus::Scheduled);
    api.add_assignment("E002", ShiftName::Morning, d, None)
        .unwrap();

    // 单日汇总
    let summary = api.day_summary(d).unwrap();
    let morning = &summary.shifts[&ShiftName::Morning];
    assert_eq!(morning.total, 2);
    assert_eq!(morning.scheduled, 2);
    assert!(morning.leader_on_duty);
}

#[test]
fn test_rejection_reports_every_violation() {
    logging::init_test();
    let (_temp, db_path) = test_helpers::create_test_db();
    let api = test_helpers::open_api(&db_path);

    api.employee_repo()
        .upsert(&test_helpers::store_keeper("E010", "Keeper"))
        .unwrap();

    // 库管员在周日排晚班: 班次违规 + 周日违规 + 首位/覆盖违规全部返回
    let sunday = date(2024, 3, 3);
    let err = api
        .add_assignment("E010", ShiftName::Evening, sunday, None)
        .unwrap_err();
    let ApiError::RosterValidationError { violations, reason } = err else {
        panic!("expected RosterValidationError");
    };
    let rules: Vec<RuleKind> = violations.iter().map(|v| v.rule).collect();
    assert_eq!(
        rules,
        vec![
            RuleKind::RoleAvailability,
            RuleKind::RoleAvailability,
            RuleKind::FirstLeader,
            RuleKind::LeaderCoverage,
        ]
    );
    assert!(reason.contains('4'));
}

#[test]
fn test_duplicate_and_cap_via_api() {
    logging::init_test();
    let (_temp, db_path) = test_helpers::create_test_db();
    let api = test_helpers::open_api(&db_path);

    api.employee_repo()
        .upsert(&test_helpers::manager("E001", "Alice"))
        .unwrap();
    let d = date(2024, 3, 4);

    api.add_assignment("E001", ShiftName::Morning, d, None).unwrap();

    // 重复同班次
    let err = api
        .add_assignment("E001", ShiftName::Morning, d, None)
        .unwrap_err();
    let ApiError::RosterValidationError { violations, .. } = err else {
        panic!("expected RosterValidationError");
    };
    assert_eq!(violations[0].rule, RuleKind::DuplicateShift);

    // 第二班次合法
    api.add_assignment("E001", ShiftName::Evening, d, None).unwrap();

    // 第三班次触发上限（夜班方向还触发排他）
    let violations = api
        .validate_assignment("E001", ShiftName::Night, d)
        .unwrap();
    let rules: Vec<RuleKind> = violations.iter().map(|v| v.rule).collect();
    assert!(rules.contains(&RuleKind::DailyCap));
    assert!(rules.contains(&RuleKind::NightExclusive));
}

#[test]
fn test_cooldown_across_days_via_api() {
    logging::init_test();
    let (_temp, db_path) = test_helpers::create_test_db();
    let api = test_helpers::open_api(&db_path);

    api.employee_repo()
        .upsert(&test_helpers::manager("E001", "Alice"))
        .unwrap();
    let d = date(2024, 3, 4);

    api.add_assignment("E001", ShiftName::Morning, d, None).unwrap();
    api.add_assignment("E001", ShiftName::Evening, d, None).unwrap();

    // 次日早/晚班: 冷却违规
    let next = date(2024, 3, 5);
    let violations = api
        .validate_assignment("E001", ShiftName::Morning, next)
        .unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].rule, RuleKind::Cooldown);
    assert!(violations[0].message.contains("2024-03-04"));

    // 次日夜班不受冷却约束
    let violations = api
        .validate_assignment("E001", ShiftName::Night, next)
        .unwrap();
    assert!(violations.is_empty());

    // 隔一天恢复
    let later = date(2024, 3, 6);
    let violations = api
        .validate_assignment("E001", ShiftName::Morning, later)
        .unwrap();
    assert!(violations.is_empty());
}

#[test]
fn test_shift_preview_with_candidate() {
    logging::init_test();
    let (_temp, db_path) = test_helpers::create_test_db();
    let api = test_helpers::open_api(&db_path);

    api.employee_repo()
        .upsert(&test_helpers::manager("E001", "Alice"))
        .unwrap();
    api.employee_repo()
        .upsert(&test_helpers::waiter("E002", "Bob"))
        .unwrap();
    let d = date(2024, 3, 4);
    api.add_assignment("E001", ShiftName::Morning, d, None).unwrap();

    let preview = api
        .shift_preview(d, Some(("E002", ShiftName::Morning)))
        .unwrap();
    let names: Vec<&str> = preview[&ShiftName::Morning]
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names, vec!["Alice", "Bob"]);
    assert!(preview[&ShiftName::Evening].is_empty());

    // 预览不落库
    assert_eq!(api.day_summary(d).unwrap().shifts[&ShiftName::Morning].total, 1);
}

#[test]
fn test_month_roster_via_api() {
    logging::init_test();
    let (_temp, db_path) = test_helpers::create_test_db();
    let api = test_helpers::open_api(&db_path);

    api.employee_repo()
        .upsert(&test_helpers::head_chef("E003", "Chef Zhou"))
        .unwrap();
    api.add_assignment("E003", ShiftName::Evening, date(2024, 4, 10), None)
        .unwrap();

    let roster = api.month_roster(2024, 4).unwrap();
    assert_eq!(roster.len(), 30);
    assert_eq!(roster[9].date, date(2024, 4, 10));
    let evening = &roster[9].shifts[&ShiftName::Evening];
    assert_eq!(evening.total, 1);
    assert!(evening.leader_on_duty);
    // 其余日期补全空汇总
    assert_eq!(roster[0].shifts[&ShiftName::Evening].total, 0);

    // 非法月份
    assert!(matches!(
        api.month_roster(2024, 13).unwrap_err(),
        ApiError::InvalidInput(_)
    ));
}

#[test]
fn test_unknown_employee_not_found() {
    logging::init_test();
    let (_temp, db_path) = test_helpers::create_test_db();
    let api = test_helpers::open_api(&db_path);

    let err = api
        .add_assignment("E999", ShiftName::Morning, date(2024, 3, 4), None)
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[test]
fn test_status_and_removal_via_api() {
    logging::init_test();
    let (_temp, db_path) = test_helpers::create_test_db();
    let api = test_helpers::open_api(&db_path);

    api.employee_repo()
        .upsert(&test_helpers::manager("E001", "Alice"))
        .unwrap();
    let d = date(2024, 3, 4);
    let assignment = api.add_assignment("E001", ShiftName::Morning, d, None).unwrap();

    api.set_status(&assignment.id, AssignmentStatus::OnDuty).unwrap();
    api.set_notes(&assignment.id, Some("顶班")).unwrap();
    let summary = api.day_summary(d).unwrap();
    assert_eq!(summary.shifts[&ShiftName::Morning].on_duty, 1);

    api.remove_assignment(&assignment.id).unwrap();
    assert_eq!(api.day_summary(d).unwrap().shifts[&ShiftName::Morning].total, 0);
}
