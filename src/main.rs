// ==========================================
// 餐厅排班管理系统 - 演示主入口
// ==========================================
// 用法:
//   restaurant-roster                    # 输出当月排班汇总 (JSON)
//   restaurant-roster <roster.csv>       # 先导入历史排班 CSV，再输出汇总
// 空库时自动写入演示数据，保证首次运行的汇总不全空
// ==========================================

use anyhow::Context;
use chrono::{Datelike, NaiveDate, Utc};
use restaurant_roster::domain::types::{EmployeeRole, ShiftName};
use restaurant_roster::importer::RosterCsvImporter;
use restaurant_roster::{db, logging, Employee, RosterApi, APP_NAME, VERSION};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

fn main() -> anyhow::Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", APP_NAME, VERSION);
    tracing::info!("==================================================");

    let db_path = default_db_path()?;
    tracing::info!("使用数据库: {}", db_path.display());

    let conn = db::open_sqlite_connection(
        db_path
            .to_str()
            .context("数据库路径包含非法字符")?,
    )?;
    db::init_schema(&conn)?;

    let api = RosterApi::from_connection(Arc::new(Mutex::new(conn)));

    // 可选: 导入历史排班 CSV
    if let Some(csv_path) = std::env::args().nth(1) {
        let report = RosterCsvImporter::import_file(
            Path::new(&csv_path),
            api.employee_repo(),
            api.shift_repo(),
        )?;
        tracing::info!(
            imported = report.imported,
            skipped = report.skipped_unknown_shift,
            errors = report.row_errors.len(),
            "导入完成"
        );
        for error in &report.row_errors {
            tracing::warn!("{}", error);
        }
    }

    let today = Utc::now().date_naive();

    // 空库时写入演示数据
    if api.shift_repo().count()? == 0 {
        seed_demo_data(&api, today)?;
    }

    // 输出当月排班汇总
    let roster = api
        .month_roster(today.year(), today.month())
        .map_err(|e| anyhow::anyhow!("月度汇总失败: {}", e))?;
    println!("{}", serde_json::to_string_pretty(&roster)?);

    Ok(())
}

/// 向空库写入一组演示排班（走正常校验通道）
fn seed_demo_data(api: &RosterApi, date: NaiveDate) -> anyhow::Result<()> {
    tracing::info!(date = %date, "数据库为空，写入演示数据");

    api.employee_repo().upsert(&Employee::new(
        "DEMO-001",
        "王店长",
        EmployeeRole::Manager,
        None,
    ))?;
    api.employee_repo().upsert(&Employee::new(
        "DEMO-002",
        "周主厨",
        EmployeeRole::Chef,
        Some("Head Chef".to_string()),
    ))?;
    api.employee_repo().upsert(&Employee::new(
        "DEMO-003",
        "孙服务",
        EmployeeRole::Waiter,
        None,
    ))?;

    // 管理人员先排，服务员随后（顺序满足首位管理人员规则）
    api.add_assignment("DEMO-001", ShiftName::Morning, date, None)?;
    api.add_assignment("DEMO-003", ShiftName::Morning, date, None)?;
    api.add_assignment("DEMO-002", ShiftName::Evening, date, Some("晚市".to_string()))?;

    Ok(())
}

/// 默认数据库路径（系统数据目录下）
fn default_db_path() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir().context("无法定位系统数据目录")?;
    let dir = base.join("restaurant-roster");
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("roster.db"))
}
