// ==========================================
// 餐厅排班管理系统 - 历史排班 CSV 导入器
// ==========================================
// CSV 列: employee_id, employee_name, role, leadership_title,
//         shift_name, work_date, status, notes
// 清洗规则: TRIM / 空串归 NULL / 日期双格式 (%Y-%m-%d, %Y%m%d)
// 政策: 行级错误收集在报告中，不中断文件;
//       班次名称无法识别的行计入 skipped 并记 warn;
//       shift_name 原样入库，由月度汇总在读取时归一化
// ==========================================

use crate::domain::employee::Employee;
use crate::domain::roster::RawShiftRow;
use crate::domain::types::{AssignmentStatus, EmployeeRole};
use crate::engine::shift_name::normalize_shift_name;
use crate::i18n;
use crate::importer::error::{ImportError, ImportResult};
use crate::repository::employee_repo::EmployeeRepository;
use crate::repository::error::RepositoryError;
use crate::repository::shift_repo::ShiftAssignmentRepository;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};
use uuid::Uuid;

// ==========================================
// ImportReport - 导入报告
// ==========================================

/// 导入报告
#[derive(Debug, Default, Clone, Serialize)]
pub struct ImportReport {
    pub total_rows: usize,
    pub imported: usize,
    pub skipped_unknown_shift: usize,
    pub row_errors: Vec<String>,
}

/// CSV 原始记录
#[derive(Debug, Deserialize)]
struct CsvRecord {
    employee_id: String,
    employee_name: String,
    role: String,
    #[serde(default)]
    leadership_title: Option<String>,
    shift_name: String,
    work_date: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

// ==========================================
// RosterCsvImporter - CSV 导入器
// ==========================================

/// 历史排班 CSV 导入器
pub struct RosterCsvImporter;

impl RosterCsvImporter {
    /// 导入单个 CSV 文件
    ///
    /// # 参数
    /// - path: CSV 文件路径
    /// - employee_repo: 员工按 id upsert
    /// - shift_repo: 排班行原样入库
    ///
    /// # 返回
    /// - Ok(ImportReport): 导入报告（含行级错误与跳过计数）
    /// - Err(ImportError): 文件级错误（文件缺失/连接失败等）
    pub fn import_file(
        path: &Path,
        employee_repo: &EmployeeRepository,
        shift_repo: &ShiftAssignmentRepository,
    ) -> ImportResult<ImportReport> {
        if !path.exists() {
            return Err(ImportError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)?;

        let mut report = ImportReport::default();

        for (index, record) in reader.deserialize::<CsvRecord>().enumerate() {
            // 表头占第 1 行，数据行从第 2 行起
            let row_no = index + 2;
            report.total_rows += 1;

            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    report.row_errors.push(format!("第 {} 行: {}", row_no, e));
                    continue;
                }
            };

            match Self::import_record(row_no, record, employee_repo, shift_repo) {
                Ok(RowOutcome::Imported) => report.imported += 1,
                Ok(RowOutcome::SkippedUnknownShift) => report.skipped_unknown_shift += 1,
                Ok(RowOutcome::RowError(msg)) => report.row_errors.push(msg),
                Err(e) => return Err(e),
            }
        }

        info!(
            path = %path.display(),
            total = report.total_rows,
            imported = report.imported,
            skipped = report.skipped_unknown_shift,
            errors = report.row_errors.len(),
            "历史排班导入完成"
        );
        Ok(report)
    }

    fn import_record(
        row_no: usize,
        record: CsvRecord,
        employee_repo: &EmployeeRepository,
        shift_repo: &ShiftAssignmentRepository,
    ) -> ImportResult<RowOutcome> {
        // 角色解析失败: 行级错误
        let Some(role) = EmployeeRole::from_db_str(record.role.trim()) else {
            return Ok(RowOutcome::RowError(format!(
                "第 {} 行: 未知角色 {}",
                row_no, record.role
            )));
        };

        // 日期双格式解析失败: 行级错误
        let Some(work_date) = Self::parse_date(record.work_date.trim()) else {
            return Ok(RowOutcome::RowError(format!(
                "第 {} 行: 日期格式错误 {}",
                row_no, record.work_date
            )));
        };

        // 状态缺省为已排班，未知状态为行级错误
        let status = match normalize_null(record.status) {
            None => AssignmentStatus::Scheduled,
            Some(s) => match AssignmentStatus::from_db_str(&s) {
                Some(status) => status,
                None => {
                    return Ok(RowOutcome::RowError(format!(
                        "第 {} 行: 未知状态 {}",
                        row_no, s
                    )));
                }
            },
        };

        // 班次名称无法识别: 跳过，不算错误
        if normalize_shift_name(&record.shift_name).is_none() {
            warn!(
                "{}",
                i18n::t_with_args(
                    "import.row_unknown_shift",
                    &[("row", &row_no.to_string()), ("name", &record.shift_name)],
                )
            );
            return Ok(RowOutcome::SkippedUnknownShift);
        }

        let employee = Employee {
            id: record.employee_id.trim().to_string(),
            name: record.employee_name.trim().to_string(),
            role,
            leadership_title: normalize_null(record.leadership_title),
        };
        employee_repo.upsert(&employee)?;

        let row = RawShiftRow {
            id: Uuid::new_v4().to_string(),
            employee,
            shift_name: record.shift_name.trim().to_string(),
            work_date,
            status,
            notes: normalize_null(record.notes),
        };

        match shift_repo.insert_raw(&row) {
            Ok(()) => Ok(RowOutcome::Imported),
            // 重复的历史行: 行级错误，不中断文件
            Err(RepositoryError::UniqueConstraintViolation(msg)) => Ok(RowOutcome::RowError(
                format!("第 {} 行: 重复排班 ({})", row_no, msg),
            )),
            Err(e) => Err(ImportError::Repository(e)),
        }
    }

    /// 日期双格式解析（%Y-%m-%d 优先，兼容 %Y%m%d）
    fn parse_date(value: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(value, "%Y%m%d"))
            .ok()
    }
}

/// 单行处理结果
enum RowOutcome {
    Imported,
    SkippedUnknownShift,
    RowError(String),
}

/// TRIM 后空串归 NULL
fn normalize_null(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
