// ==========================================
// 餐厅排班管理系统 - API 层
// ==========================================
// 职责: 组合仓储与引擎，提供业务接口
// ==========================================

pub mod error;
pub mod roster_api;

pub use error::{ApiError, ApiResult};
pub use roster_api::RosterApi;
