//! 终端输出格式

use chrono::{DateTime, Local, Utc};

use crate::models::assignments::{Assignment, DerivedAssignmentView};
use crate::models::submissions::Submission;

pub fn local_time(instant: &DateTime<Utc>) -> String {
    instant
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

/// 学生视角：名称 / 布置人 / 截止时间 / 状态 / 操作
pub fn student_table(views: &[DerivedAssignmentView]) -> String {
    if views.is_empty() {
        return "No assignments.".to_string();
    }
    let mut out = format!(
        "{:<6} {:<32} {:<16} {:<17} {:<10} {}\n",
        "ID", "NAME", "ASSIGNED BY", "DUE DATE", "STATUS", "ACTION"
    );
    for view in views {
        let a = &view.assignment;
        let action = if view.can_submit() {
            format!("portal submit {} <file>", a.id)
        } else {
            "None".to_string()
        };
        out.push_str(&format!(
            "{:<6} {:<32} {:<16} {:<17} {:<10} {}\n",
            a.id,
            truncate(&a.title, 32),
            truncate(&a.owner.username, 16),
            local_time(&a.deadline),
            view.status,
            action
        ));
    }
    out
}

/// 教师视角：名称 / 截止时间 / 附件
pub fn teacher_table(assignments: &[Assignment]) -> String {
    if assignments.is_empty() {
        return "No assignments.".to_string();
    }
    let mut out = format!(
        "{:<6} {:<40} {:<17} {}\n",
        "ID", "NAME", "DUE DATE", "ATTACHMENT"
    );
    for a in assignments {
        out.push_str(&format!(
            "{:<6} {:<40} {:<17} {}\n",
            a.id,
            truncate(&a.title, 40),
            local_time(&a.deadline),
            if a.attachment_url.is_some() { "yes" } else { "-" }
        ));
    }
    out
}

/// 提交列表，逾期的行带 Late 标记
pub fn submission_list(
    submissions: &[Submission],
    is_late: impl Fn(&Submission) -> bool,
    link: impl Fn(&Submission) -> Option<String>,
) -> String {
    if submissions.is_empty() {
        return "No matching submissions found.".to_string();
    }
    let mut out = String::new();
    for s in submissions {
        out.push_str(&format!(
            "{:<20} {:<5} submitted at {}",
            truncate(s.student_name(), 20),
            if is_late(s) { "Late" } else { "" },
            local_time(&s.submitted_at)
        ));
        if let Some(url) = link(s) {
            out.push_str(&format!("  {url}"));
        }
        out.push('\n');
    }
    out
}
