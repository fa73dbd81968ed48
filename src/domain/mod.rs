// ==========================================
// 餐厅排班管理系统 - 领域层
// ==========================================
// 职责: 实体与类型定义，不含业务规则
// ==========================================

pub mod employee;
pub mod roster;
pub mod types;

// 重导出领域实体
pub use employee::Employee;
pub use roster::{
    DaySummary, RawShiftRow, RosterEntry, ShiftAssignment, ShiftBlock, ShiftDaySummary,
    SHIFT_CATALOG,
};
