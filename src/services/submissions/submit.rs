use reqwest::multipart::{Form, Part};
use tracing::info;

use super::SubmissionService;
use crate::client::routes;
use crate::errors::Result;
use crate::models::files::AttachmentUpload;
use crate::models::submissions::Submission;
use crate::utils::validate::validate_submission;

pub async fn submit_assignment(
    service: &SubmissionService,
    assignment_id: i64,
    attachment: Option<AttachmentUpload>,
) -> Result<Submission> {
    let attachment = validate_submission(attachment)?;

    let form = Form::new().part(
        "attachment",
        Part::bytes(attachment.bytes).file_name(attachment.file_name),
    );
    let submission: Submission = service
        .client()
        .post_multipart(&routes::submit(assignment_id), form)
        .await?;
    info!(
        "Submitted work for assignment {} (submission {})",
        assignment_id, submission.id
    );
    Ok(submission)
}
