use chrono::{DateTime, Utc};

use crate::models::files::entities::AttachmentUpload;

/// 创建作业表单
///
/// 以 multipart 方式提交，截止时间序列化为 ISO 8601。
#[derive(Debug, Clone, Default)]
pub struct CreateAssignmentForm {
    pub title: String,
    pub description: String,
    pub deadline: Option<DateTime<Utc>>,
    pub attachment: Option<AttachmentUpload>,
}
