// ==========================================
// 餐厅排班管理系统 - 排班 API
// ==========================================
// 职责: 先校验后落库; 只读汇总视图
// 说明: 当日/前一日快照由同一连接读取，唯一索引兜底并发竞争
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::employee::Employee;
use crate::domain::roster::{DaySummary, ShiftAssignment};
use crate::domain::types::{AssignmentStatus, ShiftName};
use crate::engine::aggregator::RosterAggregator;
use crate::engine::date_utils::previous_day;
use crate::engine::rules::{RosterRuleConfig, RosterRuleEngine, Violation};
use crate::i18n;
use crate::repository::employee_repo::EmployeeRepository;
use crate::repository::shift_repo::ShiftAssignmentRepository;
use chrono::NaiveDate;
use rusqlite::Connection;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tracing::{info, instrument};
use uuid::Uuid;

// ==========================================
// RosterApi - 排班业务接口
// ==========================================

/// 排班业务接口
///
/// 职责：
/// 1. 新排班请求的校验与落库（校验为空才允许落库）
/// 2. 单日/月度只读汇总视图
/// 3. 排班状态与备注的变更、显式删除
pub struct RosterApi {
    employee_repo: Arc<EmployeeRepository>,
    shift_repo: Arc<ShiftAssignmentRepository>,
    rule_engine: RosterRuleEngine,
}

impl RosterApi {
    /// 创建新的 RosterApi 实例
    pub fn new(
        employee_repo: Arc<EmployeeRepository>,
        shift_repo: Arc<ShiftAssignmentRepository>,
    ) -> Self {
        Self {
            employee_repo,
            shift_repo,
            rule_engine: RosterRuleEngine::default(),
        }
    }

    /// 从共享连接创建（仓储共用同一连接）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self::new(
            Arc::new(EmployeeRepository::from_connection(conn.clone())),
            Arc::new(ShiftAssignmentRepository::from_connection(conn)),
        )
    }

    /// 覆盖规则配置
    pub fn with_rule_config(mut self, config: RosterRuleConfig) -> Self {
        self.rule_engine = RosterRuleEngine::new(config);
        self
    }

    pub fn employee_repo(&self) -> &EmployeeRepository {
        &self.employee_repo
    }

    pub fn shift_repo(&self) -> &ShiftAssignmentRepository {
        &self.shift_repo
    }

    /// 校验候选排班（演练，不落库）
    ///
    /// # 返回
    /// 违规列表，空表示可提交
    pub fn validate_assignment(
        &self,
        employee_id: &str,
        shift_name: ShiftName,
        work_date: NaiveDate,
    ) -> ApiResult<Vec<Violation>> {
        let employee = self.load_employee(employee_id)?;
        let day_entries = self.shift_repo.find_entries_by_date(work_date)?;
        let previous_entries = match previous_day(work_date) {
            Some(prev) => self.shift_repo.find_entries_by_date(prev)?,
            None => Vec::new(),
        };

        Ok(self.rule_engine.validate(
            &employee,
            shift_name,
            work_date,
            &day_entries,
            &previous_entries,
        ))
    }

    /// 新增排班: 校验通过才落库
    ///
    /// # 返回
    /// - Ok(ShiftAssignment): 已落库的排班记录
    /// - Err(RosterValidationError): 校验失败，携带全部违规原因
    #[instrument(skip(self), fields(employee_id = %employee_id, shift = %shift_name))]
    pub fn add_assignment(
        &self,
        employee_id: &str,
        shift_name: ShiftName,
        work_date: NaiveDate,
        notes: Option<String>,
    ) -> ApiResult<ShiftAssignment> {
        let violations = self.validate_assignment(employee_id, shift_name, work_date)?;
        if !violations.is_empty() {
            return Err(ApiError::RosterValidationError {
                reason: i18n::t_with_args(
                    "roster.rejected",
                    &[("count", &violations.len().to_string())],
                ),
                violations,
            });
        }

        let assignment = ShiftAssignment {
            id: Uuid::new_v4().to_string(),
            employee_id: employee_id.to_string(),
            shift_name,
            work_date,
            status: AssignmentStatus::Scheduled,
            notes,
        };
        self.shift_repo.insert(&assignment)?;

        info!(
            assignment_id = %assignment.id,
            date = %work_date,
            "排班已创建"
        );
        Ok(assignment)
    }

    /// 单日汇总视图（派生，不落库）
    pub fn day_summary(&self, date: NaiveDate) -> ApiResult<DaySummary> {
        let entries = self.shift_repo.find_entries_by_date(date)?;
        Ok(RosterAggregator::build_day_summary(date, &entries))
    }

    /// 单日分班分组，可携带假设候选（“加上这个人覆盖是什么样”）
    pub fn shift_preview(
        &self,
        date: NaiveDate,
        candidate: Option<(&str, ShiftName)>,
    ) -> ApiResult<BTreeMap<ShiftName, Vec<Employee>>> {
        let entries = self.shift_repo.find_entries_by_date(date)?;

        match candidate {
            Some((employee_id, shift)) => {
                let employee = self.load_employee(employee_id)?;
                Ok(RosterAggregator::group_by_shift(
                    &entries,
                    Some((&employee, shift)),
                ))
            }
            None => Ok(RosterAggregator::group_by_shift(&entries, None)),
        }
    }

    /// 月度汇总: 每个日历日一条 DaySummary（升序、补全空日）
    pub fn month_roster(&self, year: i32, month: u32) -> ApiResult<Vec<DaySummary>> {
        if !(1..=12).contains(&month) {
            return Err(ApiError::InvalidInput(format!("非法月份: {}", month)));
        }
        let rows = self.shift_repo.find_raw_rows_by_month(year, month)?;
        Ok(RosterAggregator::build_month_roster(year, month, &rows))
    }

    /// 更新排班状态
    pub fn set_status(&self, assignment_id: &str, status: AssignmentStatus) -> ApiResult<()> {
        self.shift_repo.update_status(assignment_id, status)?;
        info!(assignment_id = %assignment_id, status = %status, "排班状态已更新");
        Ok(())
    }

    /// 更新排班备注
    pub fn set_notes(&self, assignment_id: &str, notes: Option<&str>) -> ApiResult<()> {
        self.shift_repo.update_notes(assignment_id, notes)?;
        Ok(())
    }

    /// 显式删除排班
    pub fn remove_assignment(&self, assignment_id: &str) -> ApiResult<()> {
        self.shift_repo.delete(assignment_id)?;
        info!(assignment_id = %assignment_id, "排班已删除");
        Ok(())
    }

    fn load_employee(&self, employee_id: &str) -> ApiResult<Employee> {
        self.employee_repo
            .find_by_id(employee_id)?
            .ok_or_else(|| ApiError::NotFound(format!("Employee (id={})", employee_id)))
    }
}
