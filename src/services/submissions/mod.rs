pub mod list;
pub mod mine;
pub mod submit;

use std::sync::Arc;

use crate::client::ApiClient;
use crate::errors::Result;
use crate::models::files::AttachmentUpload;
use crate::models::submissions::Submission;

pub struct SubmissionService {
    client: Arc<ApiClient>,
}

impl SubmissionService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub(crate) fn client(&self) -> &ApiClient {
        &self.client
    }

    // 教师查看某作业的全部提交
    pub async fn list_for_assignment(&self, assignment_id: i64) -> Result<Vec<Submission>> {
        list::list_for_assignment(self, assignment_id).await
    }

    // 学生自己的全部提交
    pub async fn my_submissions(&self) -> Result<Vec<Submission>> {
        mine::my_submissions(self).await
    }

    // 学生在某作业下的提交，未提交时为 None
    pub async fn my_submission(&self, assignment_id: i64) -> Result<Option<Submission>> {
        mine::my_submission(self, assignment_id).await
    }

    pub async fn submit(
        &self,
        assignment_id: i64,
        attachment: Option<AttachmentUpload>,
    ) -> Result<Submission> {
        submit::submit_assignment(self, assignment_id, attachment).await
    }
}
