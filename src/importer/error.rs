// ==========================================
// 餐厅排班管理系统 - 导入层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 导入层错误类型（文件级; 行级错误收集在 ImportReport 中）
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("CSV 解析失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
