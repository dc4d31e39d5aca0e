use chrono::{DateTime, Utc};

use crate::errors::{PortalError, Result};
use crate::models::assignments::CreateAssignmentForm;
use crate::models::files::AttachmentUpload;

/// 校验创建作业表单，返回确认后的截止时间
///
/// 截止时间不能早于当前时间（恰好等于当前时间可以通过）。
pub fn validate_assignment_form(
    form: &CreateAssignmentForm,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>> {
    if form.title.trim().is_empty() {
        return Err(PortalError::validation("Please enter a title."));
    }
    if form.description.trim().is_empty() {
        return Err(PortalError::validation("Please enter a description."));
    }
    let deadline = form
        .deadline
        .ok_or_else(|| PortalError::validation("Please select a deadline."))?;
    if deadline < now {
        return Err(PortalError::validation("The deadline cannot be in the past."));
    }
    Ok(deadline)
}

/// 校验提交附件
pub fn validate_submission(attachment: Option<AttachmentUpload>) -> Result<AttachmentUpload> {
    attachment.ok_or_else(|| PortalError::validation("Please select a file to submit."))
}

/// 登录/注册前的必填项检查
pub fn validate_credentials(username: &str, password: &str) -> Result<()> {
    if username.trim().is_empty() {
        return Err(PortalError::validation("Username is required."));
    }
    if password.is_empty() {
        return Err(PortalError::validation("Password is required."));
    }
    Ok(())
}
