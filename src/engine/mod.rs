// ==========================================
// 餐厅排班管理系统 - 引擎层
// ==========================================
// 职责: 排班规则与汇总，纯计算，不读写数据库
// 红线: 所有规则必须输出可解释的违规原因
// ==========================================

pub mod aggregator;
pub mod date_utils;
pub mod leadership;
pub mod rules;
pub mod shift_name;

// 重导出核心引擎
pub use aggregator::RosterAggregator;
pub use leadership::{is_leadership, LEADERSHIP_TITLES};
pub use rules::{RosterRuleConfig, RosterRuleEngine, RuleKind, Violation};
pub use shift_name::normalize_shift_name;
