//! 作业状态推导
//!
//! 以提交记录中的作业 ID 为键，把提交关联到作业上，得到每个作业的状态。

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::errors::{PortalError, Result};
use crate::models::assignments::{Assignment, AssignmentStatus, DerivedAssignmentView, HasDeadline};
use crate::models::submissions::Submission;

/// 按截止时间划分的结果
#[derive(Debug, Clone, PartialEq)]
pub struct TimePartition<T> {
    pub active: Vec<T>,
    pub past: Vec<T>,
}

/// 根据提交时间与截止时间判定状态
pub fn classify(assignment: &Assignment, submission: Option<&Submission>) -> AssignmentStatus {
    match submission {
        None => AssignmentStatus::Pending,
        Some(s) if s.submitted_at > assignment.deadline => AssignmentStatus::Late,
        Some(_) => AssignmentStatus::Submitted,
    }
}

/// 推导作业状态
///
/// 同一作业存在多条提交时，以输入顺序中最后一条为准。输出保持作业的输入顺序。
pub fn derive_statuses(
    assignments: &[Assignment],
    submissions: &[Submission],
) -> Vec<DerivedAssignmentView> {
    let by_assignment: HashMap<i64, &Submission> = submissions
        .iter()
        .map(|s| (s.assignment_id, s))
        .collect();

    join(assignments, &by_assignment)
}

/// 严格模式：同一作业出现多条提交时返回数据完整性错误
pub fn derive_statuses_strict(
    assignments: &[Assignment],
    submissions: &[Submission],
) -> Result<Vec<DerivedAssignmentView>> {
    let mut by_assignment: HashMap<i64, &Submission> = HashMap::with_capacity(submissions.len());
    for submission in submissions {
        if let Some(previous) = by_assignment.insert(submission.assignment_id, submission) {
            return Err(PortalError::data_integrity(format!(
                "assignment {} has more than one submission ({} and {})",
                submission.assignment_id, previous.id, submission.id
            )));
        }
    }

    Ok(join(assignments, &by_assignment))
}

fn join(
    assignments: &[Assignment],
    by_assignment: &HashMap<i64, &Submission>,
) -> Vec<DerivedAssignmentView> {
    assignments
        .iter()
        .map(|assignment| DerivedAssignmentView {
            status: classify(assignment, by_assignment.get(&assignment.id).copied()),
            assignment: assignment.clone(),
        })
        .collect()
}

/// 按截止时间分为进行中与已截止
///
/// 截止时间严格晚于 `now` 才算进行中，恰好等于 `now` 归入已截止。
pub fn partition_by_time<T>(items: &[T], now: DateTime<Utc>) -> TimePartition<T>
where
    T: HasDeadline + Clone,
{
    let (active, past) = items.iter().cloned().partition(|item| item.deadline() > now);
    TimePartition { active, past }
}
