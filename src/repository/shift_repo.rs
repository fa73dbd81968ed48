// ==========================================
// 餐厅排班管理系统 - 排班仓储
// ==========================================
// 红线: Repository 不含业务规则
// 说明: shift_name 列可能含历史自由文本; 按日查询在读取时归一化，
//       无法识别的行记 warn 后跳过（脏历史数据不阻断查询）
// ==========================================

use crate::domain::employee::Employee;
use crate::domain::roster::{RawShiftRow, RosterEntry, ShiftAssignment};
use crate::domain::types::{AssignmentStatus, EmployeeRole};
use crate::engine::date_utils::{day_key, first_day_of_month, last_day_of_month};
use crate::engine::shift_name::normalize_shift_name;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex};
use tracing::warn;

/// 排班记录 + 员工的 JOIN 查询列
const ENTRY_COLUMNS: &str = r#"
    a.id, a.employee_id, a.shift_name, a.work_date, a.status, a.notes,
    e.name, e.role, e.leadership_title
"#;

// ==========================================
// ShiftAssignmentRepository - 排班仓储
// ==========================================

/// 排班仓储
/// 职责: 管理 shift_assignment 表的 CRUD 与快照查询
pub struct ShiftAssignmentRepository {
    conn: Arc<Mutex<Connection>>,
}

/// JOIN 查询的中间行
struct JoinedRow {
    id: String,
    employee_id: String,
    shift_name: String,
    work_date: String,
    status: String,
    notes: Option<String>,
    employee_name: String,
    role: String,
    leadership_title: Option<String>,
}

impl ShiftAssignmentRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_joined_row(row: &Row<'_>) -> rusqlite::Result<JoinedRow> {
        Ok(JoinedRow {
            id: row.get(0)?,
            employee_id: row.get(1)?,
            shift_name: row.get(2)?,
            work_date: row.get(3)?,
            status: row.get(4)?,
            notes: row.get(5)?,
            employee_name: row.get(6)?,
            role: row.get(7)?,
            leadership_title: row.get(8)?,
        })
    }

    fn parse_date(field: &str, value: &str) -> RepositoryResult<NaiveDate> {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| RepositoryError::FieldValueError {
            field: field.to_string(),
            message: format!("日期格式错误: {} ({})", value, e),
        })
    }

    fn parse_status(value: &str) -> RepositoryResult<AssignmentStatus> {
        AssignmentStatus::from_db_str(value).ok_or_else(|| RepositoryError::FieldValueError {
            field: "status".to_string(),
            message: format!("未知状态: {}", value),
        })
    }

    fn parse_employee(row: &JoinedRow) -> RepositoryResult<Employee> {
        let role =
            EmployeeRole::from_db_str(&row.role).ok_or_else(|| RepositoryError::FieldValueError {
                field: "role".to_string(),
                message: format!("未知角色: {}", row.role),
            })?;
        Ok(Employee {
            id: row.employee_id.clone(),
            name: row.employee_name.clone(),
            role,
            leadership_title: row.leadership_title.clone(),
        })
    }

    /// 新增排班记录
    ///
    /// 唯一索引 (employee_id, work_date, shift_name) 为并发重复排班兜底，
    /// 冲突时返回 UniqueConstraintViolation。
    pub fn insert(&self, assignment: &ShiftAssignment) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO shift_assignment (id, employee_id, shift_name, work_date, status, notes)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                assignment.id,
                assignment.employee_id,
                assignment.shift_name.to_db_str(),
                day_key(assignment.work_date),
                assignment.status.to_db_str(),
                assignment.notes,
            ],
        )?;
        Ok(())
    }

    /// 新增历史排班行（shift_name 保留自由文本原样）
    pub fn insert_raw(&self, row: &RawShiftRow) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO shift_assignment (id, employee_id, shift_name, work_date, status, notes)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                row.id,
                row.employee.id,
                row.shift_name,
                day_key(row.work_date),
                row.status.to_db_str(),
                row.notes,
            ],
        )?;
        Ok(())
    }

    /// 按日历日查询当日全部排班（内嵌员工，班次名称已归一化）
    ///
    /// 存储的班次名称无法归一化时记 warn 并跳过该行。
    pub fn find_entries_by_date(&self, date: NaiveDate) -> RepositoryResult<Vec<RosterEntry>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT {ENTRY_COLUMNS}
            FROM shift_assignment a
            JOIN employee e ON e.id = a.employee_id
            WHERE a.work_date = ?1
            ORDER BY a.shift_name, a.id
            "#
        ))?;

        let rows = stmt.query_map(params![day_key(date)], Self::map_joined_row)?;

        let mut entries = Vec::new();
        for row in rows {
            let row = row?;
            let Some(shift) = normalize_shift_name(&row.shift_name) else {
                warn!(
                    assignment_id = %row.id,
                    shift_name = %row.shift_name,
                    "按日查询: 班次名称无法识别，已跳过"
                );
                continue;
            };

            let employee = Self::parse_employee(&row)?;
            entries.push(RosterEntry {
                assignment: ShiftAssignment {
                    id: row.id.clone(),
                    employee_id: row.employee_id.clone(),
                    shift_name: shift,
                    work_date: Self::parse_date("work_date", &row.work_date)?,
                    status: Self::parse_status(&row.status)?,
                    notes: row.notes.clone(),
                },
                employee,
            });
        }
        Ok(entries)
    }

    /// 按年月查询历史排班行（shift_name 保留原样，由汇总引擎归一化）
    pub fn find_raw_rows_by_month(&self, year: i32, month: u32) -> RepositoryResult<Vec<RawShiftRow>> {
        let (Some(first), Some(last)) = (first_day_of_month(year, month), last_day_of_month(year, month))
        else {
            return Err(RepositoryError::FieldValueError {
                field: "month".to_string(),
                message: format!("非法年月: {}-{}", year, month),
            });
        };

        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT {ENTRY_COLUMNS}
            FROM shift_assignment a
            JOIN employee e ON e.id = a.employee_id
            WHERE a.work_date BETWEEN ?1 AND ?2
            ORDER BY a.work_date, a.id
            "#
        ))?;

        let rows = stmt.query_map(params![day_key(first), day_key(last)], Self::map_joined_row)?;

        let mut result = Vec::new();
        for row in rows {
            let row = row?;
            let employee = Self::parse_employee(&row)?;
            result.push(RawShiftRow {
                id: row.id.clone(),
                employee,
                shift_name: row.shift_name.clone(),
                work_date: Self::parse_date("work_date", &row.work_date)?,
                status: Self::parse_status(&row.status)?,
                notes: row.notes.clone(),
            });
        }
        Ok(result)
    }

    /// 更新排班状态
    pub fn update_status(&self, id: &str, status: AssignmentStatus) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let changed = conn.execute(
            "UPDATE shift_assignment SET status = ?1, updated_at = datetime('now') WHERE id = ?2",
            params![status.to_db_str(), id],
        )?;
        if changed == 0 {
            return Err(RepositoryError::NotFound {
                entity: "ShiftAssignment".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// 更新排班备注
    pub fn update_notes(&self, id: &str, notes: Option<&str>) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let changed = conn.execute(
            "UPDATE shift_assignment SET notes = ?1, updated_at = datetime('now') WHERE id = ?2",
            params![notes, id],
        )?;
        if changed == 0 {
            return Err(RepositoryError::NotFound {
                entity: "ShiftAssignment".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// 显式删除排班记录
    pub fn delete(&self, id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let changed = conn.execute("DELETE FROM shift_assignment WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(RepositoryError::NotFound {
                entity: "ShiftAssignment".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// 排班记录总数（演示程序判断是否需要种子数据）
    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM shift_assignment", [], |row| row.get(0))?;
        Ok(count)
    }
}
