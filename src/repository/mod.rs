// ==========================================
// 餐厅排班管理系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务规则，只做数据访问
// ==========================================

pub mod employee_repo;
pub mod error;
pub mod shift_repo;

pub use employee_repo::EmployeeRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use shift_repo::ShiftAssignmentRepository;
