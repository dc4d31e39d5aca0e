use chrono::{DateTime, Utc};
use serde::Deserialize;

// 创建作业接口直接返回数据库记录，不含 owner 嵌套对象
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CreatedAssignment {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(with = "crate::models::common::datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::models::common::datetime")]
    pub deadline: DateTime<Utc>,
    #[serde(default)]
    pub attachment_url: Option<String>,
    pub teacher_id: i64,
}
