// ==========================================
// 餐厅排班管理系统 - 员工实体
// ==========================================
// 员工由外部账号体系维护，引擎只读
// ==========================================

use crate::domain::types::EmployeeRole;
use serde::{Deserialize, Serialize};

/// 员工实体（对排班引擎只读）
///
/// 不变量: 每个员工恰好一个角色; leadership_title 与角色相互独立，
/// 缺失的头衔视为“无头衔”而非错误。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    /// 显示名（如 "张三"）
    pub name: String,
    pub role: EmployeeRole,
    /// 管理头衔（可选，固定头衔集合之一）
    pub leadership_title: Option<String>,
}

impl Employee {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        role: EmployeeRole,
        leadership_title: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
            leadership_title,
        }
    }
}
