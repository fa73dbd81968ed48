// ==========================================
// 餐厅排班管理系统 - 导入层
// ==========================================
// 职责: 历史排班 CSV 导入
// 政策: 行级错误收集，不中断整个文件;
//       无法识别的班次名称记日志后跳过
// ==========================================

pub mod error;
pub mod roster_importer;

pub use error::{ImportError, ImportResult};
pub use roster_importer::{ImportReport, RosterCsvImporter};
