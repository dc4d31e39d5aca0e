use chrono::{DateTime, Utc};
use reqwest::multipart::{Form, Part};
use tracing::info;

use super::AssignmentService;
use crate::client::routes;
use crate::errors::Result;
use crate::models::assignments::{CreateAssignmentForm, CreatedAssignment};
use crate::models::common::datetime::format_instant;
use crate::utils::validate::validate_assignment_form;

pub async fn create_assignment(
    service: &AssignmentService,
    form: CreateAssignmentForm,
    now: DateTime<Utc>,
) -> Result<CreatedAssignment> {
    // 1. 表单校验（截止时间必填且不能早于当前时间）
    let deadline = validate_assignment_form(&form, now)?;

    // 2. 组装 multipart 表单
    let mut multipart = Form::new()
        .text("title", form.title)
        .text("description", form.description)
        .text("deadline", format_instant(&deadline));
    if let Some(attachment) = form.attachment {
        multipart = multipart.part(
            "attachment",
            Part::bytes(attachment.bytes).file_name(attachment.file_name),
        );
    }

    // 3. 提交
    let created: CreatedAssignment = service
        .client()
        .post_multipart(routes::ASSIGNMENTS, multipart)
        .await?;
    info!("Created assignment {} ({})", created.id, created.title);
    Ok(created)
}
