use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::error;

use super::Tab;
use super::detail::AssignmentDetail;
use super::status::partition_by_time;
use crate::client::ApiClient;
use crate::errors::{PortalError, Result};
use crate::models::assignments::{Assignment, CreateAssignmentForm, CreatedAssignment};
use crate::runtime::RequestTracker;
use crate::services::AssignmentService;

/// 教师仪表盘
pub struct TeacherDashboard {
    client: Arc<ApiClient>,
    assignment_service: AssignmentService,
    tracker: Arc<RequestTracker>,
    assignments: Vec<Assignment>,
}

impl TeacherDashboard {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            assignment_service: AssignmentService::new(client.clone()),
            client,
            tracker: Arc::new(RequestTracker::new()),
            assignments: Vec::new(),
        }
    }

    pub fn tracker(&self) -> Arc<RequestTracker> {
        self.tracker.clone()
    }

    pub async fn load(&mut self) -> Result<()> {
        let assignments = self
            .tracker
            .run(
                "load assignments",
                self.assignment_service.list_assignments(),
            )
            .await
            .inspect_err(|e| error!("Failed to fetch assignments: {}", e))?;
        self.assignments = assignments;
        Ok(())
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn tab(&self, tab: Tab, now: DateTime<Utc>) -> Vec<Assignment> {
        tab.pick(partition_by_time(&self.assignments, now))
    }

    /// 创建作业并刷新列表
    pub async fn create_assignment(
        &mut self,
        form: CreateAssignmentForm,
        now: DateTime<Utc>,
    ) -> Result<CreatedAssignment> {
        let created = self
            .tracker
            .run(
                "create assignment",
                self.assignment_service.create_assignment(form, now),
            )
            .await
            .inspect_err(|e| error!("Failed to create assignment: {}", e))?;
        self.load().await?;
        Ok(created)
    }

    /// 打开作业详情
    pub fn open_detail(&self, assignment_id: i64) -> Result<AssignmentDetail> {
        let assignment = self
            .assignments
            .iter()
            .find(|a| a.id == assignment_id)
            .cloned()
            .ok_or_else(|| {
                PortalError::not_found(format!("Assignment {assignment_id} not found"))
            })?;
        Ok(AssignmentDetail::new(self.client.clone(), assignment))
    }
}
