use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::users::entities::UserRef;

/// 学生提交记录
///
/// 教师视角下的列表同样使用该结构，`student.username` 即展示用的学生名。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    #[serde(with = "crate::models::common::datetime")]
    pub submitted_at: DateTime<Utc>,
    pub student: UserRef,
    #[serde(default)]
    pub attachment_url: Option<String>,
}

impl Submission {
    pub fn student_name(&self) -> &str {
        &self.student.username
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_from_server_json() {
        let raw = r#"{"id":9,"submitted_at":"2024-01-11T00:00:00","attachment_url":"uploads/submissions/4_a.pdf",
            "student":{"id":4,"username":"anna"},"assignment_id":1}"#;
        let submission: Submission = serde_json::from_str(raw).unwrap();
        assert_eq!(submission.assignment_id, 1);
        assert_eq!(submission.student_name(), "anna");
    }
}
