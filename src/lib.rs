// ==========================================
// 餐厅排班管理系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 班次校验与覆盖引擎 (排班合法性 + 月度汇总)
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 排班规则
pub mod engine;

// 导入层 - 历史排班数据
pub mod importer;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AssignmentStatus, EmployeeRole, ShiftName};

// 领域实体
pub use domain::{
    DaySummary, Employee, RawShiftRow, RosterEntry, ShiftAssignment, ShiftBlock, ShiftDaySummary,
    SHIFT_CATALOG,
};

// 引擎
pub use engine::{
    is_leadership, normalize_shift_name, RosterAggregator, RosterRuleConfig, RosterRuleEngine,
    RuleKind, Violation, LEADERSHIP_TITLES,
};

// API
pub use api::RosterApi;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "餐厅排班管理系统";

// 数据库版本
pub const DB_VERSION: &str = "v0.1";
