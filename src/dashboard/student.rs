use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info};

use super::Tab;
use super::status::{derive_statuses, partition_by_time};
use crate::client::ApiClient;
use crate::errors::{PortalError, Result};
use crate::models::assignments::{Assignment, DerivedAssignmentView};
use crate::models::files::AttachmentUpload;
use crate::models::submissions::Submission;
use crate::runtime::RequestTracker;
use crate::services::{AssignmentService, SubmissionService};

/// 学生仪表盘
///
/// 持有作业与提交两个原始集合，任一变化后重新推导带状态的视图。
pub struct StudentDashboard {
    assignment_service: AssignmentService,
    submission_service: SubmissionService,
    tracker: Arc<RequestTracker>,
    assignments: Vec<Assignment>,
    submissions: Vec<Submission>,
    views: Vec<DerivedAssignmentView>,
}

impl StudentDashboard {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            assignment_service: AssignmentService::new(client.clone()),
            submission_service: SubmissionService::new(client),
            tracker: Arc::new(RequestTracker::new()),
            assignments: Vec::new(),
            submissions: Vec::new(),
            views: Vec::new(),
        }
    }

    pub fn tracker(&self) -> Arc<RequestTracker> {
        self.tracker.clone()
    }

    /// 并发拉取作业与本人提交，两者都返回后再推导
    pub async fn load(&mut self) -> Result<()> {
        let fetched = self
            .tracker
            .run("load student dashboard", async {
                tokio::try_join!(
                    self.assignment_service.list_assignments(),
                    self.submission_service.my_submissions(),
                )
            })
            .await;

        match fetched {
            Ok((assignments, submissions)) => {
                self.assignments = assignments;
                self.submissions = submissions;
                self.recompute();
                Ok(())
            }
            Err(e) => {
                error!("Failed to fetch data: {}", e);
                Err(e)
            }
        }
    }

    fn recompute(&mut self) {
        self.views = derive_statuses(&self.assignments, &self.submissions);
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    /// 全部作业（带状态，保持服务端顺序）
    pub fn views(&self) -> &[DerivedAssignmentView] {
        &self.views
    }

    pub fn view(&self, assignment_id: i64) -> Option<&DerivedAssignmentView> {
        self.views.iter().find(|v| v.assignment.id == assignment_id)
    }

    /// 当前标签页下的作业
    pub fn tab(&self, tab: Tab, now: DateTime<Utc>) -> Vec<DerivedAssignmentView> {
        tab.pick(partition_by_time(&self.views, now))
    }

    /// 提交作业，成功后追加到本地提交集合
    pub async fn submit_work(
        &mut self,
        assignment_id: i64,
        attachment: Option<AttachmentUpload>,
    ) -> Result<Submission> {
        let view = self.view(assignment_id).ok_or_else(|| {
            PortalError::not_found(format!("Assignment {assignment_id} not found"))
        })?;
        if !view.can_submit() {
            return Err(PortalError::validation(
                "You have already submitted for this assignment",
            ));
        }

        let submission = self
            .tracker
            .run(
                "submit work",
                self.submission_service.submit(assignment_id, attachment),
            )
            .await
            .inspect_err(|e| error!("Submission failed: {}", e))?;

        info!("Submission {} recorded locally", submission.id);
        self.submissions.push(submission.clone());
        self.recompute();
        Ok(submission)
    }
}
