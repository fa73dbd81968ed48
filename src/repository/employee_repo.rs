// ==========================================
// 餐厅排班管理系统 - 员工仓储
// ==========================================
// 红线: Repository 不含业务规则
// ==========================================

use crate::domain::employee::Employee;
use crate::domain::types::EmployeeRole;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// EmployeeRepository - 员工仓储
// ==========================================

/// 员工仓储
/// 职责: 管理 employee 表的 CRUD 操作
pub struct EmployeeRepository {
    conn: Arc<Mutex<Connection>>,
}

impl EmployeeRepository {
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

    /// 将数据库行映射为员工实体
    fn map_row(row: &Row<'_>) -> rusqlite::Result<(String, String, String, Option<String>)> {
        Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
    }

    fn to_employee(
        (id, name, role_str, leadership_title): (String, String, String, Option<String>),
    ) -> RepositoryResult<Employee> {
        let role = EmployeeRole::from_db_str(&role_str).ok_or_else(|| {
            RepositoryError::FieldValueError {
                field: "role".to_string(),
                message: format!("未知角色: {}", role_str),
            }
        })?;
        Ok(Employee {
            id,
            name,
            role,
            leadership_title,
        })
    }

    /// 新增或更新员工（按 id upsert）
    pub fn upsert(&self, employee: &Employee) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO employee (id, name, role, leadership_title)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                role = excluded.role,
                leadership_title = excluded.leadership_title,
                updated_at = datetime('now')
            "#,
            params![
                employee.id,
                employee.name,
                employee.role.to_db_str(),
                employee.leadership_title,
            ],
        )?;
        Ok(())
    }

    /// 按 id 查询员工
    pub fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Employee>> {
        let conn = self.get_conn()?;
        let raw = conn
            .query_row(
                "SELECT id, name, role, leadership_title FROM employee WHERE id = ?1",
                params![id],
                Self::map_row,
            )
            .optional()?;

        raw.map(Self::to_employee).transpose()
    }

    /// 查询全部员工
    pub fn list_all(&self) -> RepositoryResult<Vec<Employee>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT id, name, role, leadership_title FROM employee ORDER BY id")?;

        let rows = stmt.query_map([], Self::map_row)?;

        let mut employees = Vec::new();
        for row in rows {
            employees.push(Self::to_employee(row?)?);
        }
        Ok(employees)
    }
}
