use std::sync::Arc;

use tracing::error;

use super::filter::{filter_submissions, is_late};
use crate::client::ApiClient;
use crate::errors::Result;
use crate::models::assignments::Assignment;
use crate::models::submissions::Submission;
use crate::runtime::RequestTracker;
use crate::services::SubmissionService;

/// 作业详情（教师视角）
pub struct AssignmentDetail {
    client: Arc<ApiClient>,
    submission_service: SubmissionService,
    tracker: Arc<RequestTracker>,
    assignment: Assignment,
    submissions: Vec<Submission>,
}

impl AssignmentDetail {
    pub fn new(client: Arc<ApiClient>, assignment: Assignment) -> Self {
        Self {
            submission_service: SubmissionService::new(client.clone()),
            client,
            tracker: Arc::new(RequestTracker::new()),
            assignment,
            submissions: Vec::new(),
        }
    }

    pub fn tracker(&self) -> Arc<RequestTracker> {
        self.tracker.clone()
    }

    pub async fn load(&mut self) -> Result<()> {
        let submissions = self
            .tracker
            .run(
                "load submissions",
                self.submission_service
                    .list_for_assignment(self.assignment.id),
            )
            .await
            .inspect_err(|e| error!("Failed to load submissions: {}", e))?;
        self.submissions = submissions;
        Ok(())
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    /// 按学生名与是否逾期过滤
    pub fn filtered(&self, search_term: &str, late_only: bool) -> Vec<Submission> {
        filter_submissions(
            &self.submissions,
            self.assignment.deadline,
            search_term,
            late_only,
        )
    }

    pub fn is_late(&self, submission: &Submission) -> bool {
        is_late(submission, self.assignment.deadline)
    }

    pub fn attachment_link(&self) -> Option<String> {
        self.assignment
            .attachment_url
            .as_deref()
            .map(|path| self.client.attachment_url(path))
    }

    pub fn submission_link(&self, submission: &Submission) -> Option<String> {
        submission
            .attachment_url
            .as_deref()
            .map(|path| self.client.attachment_url(path))
    }
}
