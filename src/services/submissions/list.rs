use super::SubmissionService;
use crate::client::routes;
use crate::errors::Result;
use crate::models::submissions::Submission;

pub async fn list_for_assignment(
    service: &SubmissionService,
    assignment_id: i64,
) -> Result<Vec<Submission>> {
    service
        .client()
        .get(&routes::assignment_submissions(assignment_id))
        .await
}
