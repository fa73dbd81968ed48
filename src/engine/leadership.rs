// ==========================================
// 餐厅排班管理系统 - 管理人员判定
// ==========================================
// 早/晚班覆盖规则共用的纯谓词
// 头衔集合为启动即不可变的常量，非可变全局状态
// ==========================================

use crate::domain::employee::Employee;
use crate::domain::types::EmployeeRole;

/// 满足班次覆盖要求的管理头衔（精确匹配）
pub const LEADERSHIP_TITLES: [&str; 4] = ["Manager", "Assistant Manager", "Head Chef", "Sous Chef"];

/// 员工是否按角色或管理头衔计入“管理人员”
///
/// 规则: 角色为 MANAGER / ADMIN 直接判定;
/// 否则头衔存在且属于固定头衔集合时判定。
/// 全函数，无副作用; 缺失头衔视为“无头衔”。
pub fn is_leadership(employee: &Employee) -> bool {
    if matches!(employee.role, EmployeeRole::Manager | EmployeeRole::Admin) {
        return true;
    }

    match &employee.leadership_title {
        Some(title) => LEADERSHIP_TITLES.contains(&title.as_str()),
        None => false,
    }
}
