use super::SubmissionService;
use crate::client::routes;
use crate::errors::Result;
use crate::models::submissions::Submission;

pub async fn my_submissions(service: &SubmissionService) -> Result<Vec<Submission>> {
    service.client().get(routes::MY_SUBMISSIONS).await
}

pub async fn my_submission(
    service: &SubmissionService,
    assignment_id: i64,
) -> Result<Option<Submission>> {
    service
        .client()
        .get_optional(&routes::my_submission(assignment_id))
        .await
}
