// ==========================================
// 餐厅排班管理系统 - 领域类型定义
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 班次名称 (Shift Name)
// ==========================================
// 固定三个班次; Ord 按一天内的先后顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftName {
    Morning, // 早班
    Evening, // 晚班
    Night,   // 夜班
}

impl ShiftName {
    /// 三个班次，按一天内顺序排列
    pub const ALL: [ShiftName; 3] = [ShiftName::Morning, ShiftName::Evening, ShiftName::Night];

    /// 从数据库字符串解析班次名称
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "MORNING" => Some(ShiftName::Morning),
            "EVENING" => Some(ShiftName::Evening),
            "NIGHT" => Some(ShiftName::Night),
            _ => None,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ShiftName::Morning => "MORNING",
            ShiftName::Evening => "EVENING",
            ShiftName::Night => "NIGHT",
        }
    }
}

impl fmt::Display for ShiftName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// 员工角色 (Employee Role)
// ==========================================
// 每个员工恰好一个角色; 管理头衔与角色相互独立
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmployeeRole {
    Manager,        // 店长
    Admin,          // 管理员
    Chef,           // 厨师
    StoreKeep,      // 库管员
    DeliveryPerson, // 配送员
    Waiter,         // 服务员
    KitchenHelper,  // 厨工
    Staff,          // 普通员工
    Customer,       // 顾客（账号体系遗留角色，不参与排班规则）
}

impl EmployeeRole {
    /// 从数据库字符串解析角色
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "MANAGER" => Some(EmployeeRole::Manager),
            "ADMIN" => Some(EmployeeRole::Admin),
            "CHEF" => Some(EmployeeRole::Chef),
            "STORE_KEEP" => Some(EmployeeRole::StoreKeep),
            "DELIVERY_PERSON" => Some(EmployeeRole::DeliveryPerson),
            "WAITER" => Some(EmployeeRole::Waiter),
            "KITCHEN_HELPER" => Some(EmployeeRole::KitchenHelper),
            "STAFF" => Some(EmployeeRole::Staff),
            "CUSTOMER" => Some(EmployeeRole::Customer),
            _ => None,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            EmployeeRole::Manager => "MANAGER",
            EmployeeRole::Admin => "ADMIN",
            EmployeeRole::Chef => "CHEF",
            EmployeeRole::StoreKeep => "STORE_KEEP",
            EmployeeRole::DeliveryPerson => "DELIVERY_PERSON",
            EmployeeRole::Waiter => "WAITER",
            EmployeeRole::KitchenHelper => "KITCHEN_HELPER",
            EmployeeRole::Staff => "STAFF",
            EmployeeRole::Customer => "CUSTOMER",
        }
    }
}

impl fmt::Display for EmployeeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// 排班状态 (Assignment Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssignmentStatus {
    Scheduled, // 已排班
    OnDuty,    // 在岗
    Completed, // 已完成
    Absent,    // 缺勤
}

impl AssignmentStatus {
    /// 从数据库字符串解析状态
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "SCHEDULED" => Some(AssignmentStatus::Scheduled),
            "ON_DUTY" => Some(AssignmentStatus::OnDuty),
            "COMPLETED" => Some(AssignmentStatus::Completed),
            "ABSENT" => Some(AssignmentStatus::Absent),
            _ => None,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Scheduled => "SCHEDULED",
            AssignmentStatus::OnDuty => "ON_DUTY",
            AssignmentStatus::Completed => "COMPLETED",
            AssignmentStatus::Absent => "ABSENT",
        }
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}
