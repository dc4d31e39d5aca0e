use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::users::entities::UserRef;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assignment {
    // 唯一 ID
    pub id: i64,
    // 作业标题
    pub title: String,
    // 作业描述
    pub description: String,
    // 截止时间
    #[serde(with = "crate::models::common::datetime")]
    pub deadline: DateTime<Utc>,
    // 附件（服务端相对路径）
    #[serde(default)]
    pub attachment_url: Option<String>,
    // 布置作业的教师
    pub owner: UserRef,
}

// 作业状态（学生视角）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AssignmentStatus {
    Pending,   // 未提交
    Submitted, // 按时提交
    Late,      // 逾期提交
}

impl AssignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Pending => "Pending",
            AssignmentStatus::Submitted => "Submitted",
            AssignmentStatus::Late => "Late",
        }
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 带状态的作业视图
///
/// 只能由作业与提交两个集合推导得到，不单独修改。
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DerivedAssignmentView {
    #[serde(flatten)]
    pub assignment: Assignment,
    pub status: AssignmentStatus,
}

impl DerivedAssignmentView {
    /// 只有未提交的作业可以提交
    pub fn can_submit(&self) -> bool {
        self.status == AssignmentStatus::Pending
    }
}

/// 具有截止时间的条目，用于按时间分组
pub trait HasDeadline {
    fn deadline(&self) -> DateTime<Utc>;
}

impl HasDeadline for Assignment {
    fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }
}

impl HasDeadline for DerivedAssignmentView {
    fn deadline(&self) -> DateTime<Utc> {
        self.assignment.deadline
    }
}
