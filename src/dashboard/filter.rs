//! 提交列表过滤

use chrono::{DateTime, Utc};

use crate::models::submissions::Submission;

/// 提交时间是否晚于截止时间
pub fn is_late(submission: &Submission, deadline: DateTime<Utc>) -> bool {
    submission.submitted_at > deadline
}

/// 过滤提交列表
///
/// `late_only` 为真时只保留逾期提交；再按学生名做不区分大小写的子串匹配，
/// 空搜索词匹配全部。结果保持输入顺序。
pub fn filter_submissions(
    submissions: &[Submission],
    deadline: DateTime<Utc>,
    search_term: &str,
    late_only: bool,
) -> Vec<Submission> {
    let needle = search_term.to_lowercase();
    submissions
        .iter()
        .filter(|s| !late_only || is_late(s, deadline))
        .filter(|s| s.student_name().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
