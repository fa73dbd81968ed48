// ==========================================
// 餐厅排班管理系统 - API层错误类型
// ==========================================
// 职责: 转换仓储错误为用户友好的错误消息
// 红线: 校验失败必须携带全部违规原因，调用方逐条展示
// ==========================================

use crate::engine::rules::Violation;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    /// 排班校验失败（带全部违规原因）
    #[error("排班校验失败: {reason}")]
    RosterValidationError {
        reason: String,
        violations: Vec<Violation>,
    },

    /// 并发竞争下的重复排班（唯一索引兜底）
    #[error("重复排班: {0}")]
    DuplicateAssignment(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{} (id={})", entity, id))
            }
            RepositoryError::UniqueConstraintViolation(msg) => ApiError::DuplicateAssignment(msg),
            other => ApiError::DatabaseError(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
