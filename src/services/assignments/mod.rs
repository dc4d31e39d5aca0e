pub mod create;
pub mod list;

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::client::ApiClient;
use crate::errors::Result;
use crate::models::assignments::{Assignment, CreateAssignmentForm, CreatedAssignment};

pub struct AssignmentService {
    client: Arc<ApiClient>,
}

impl AssignmentService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub(crate) fn client(&self) -> &ApiClient {
        &self.client
    }

    pub async fn list_assignments(&self) -> Result<Vec<Assignment>> {
        list::list_assignments(self).await
    }

    pub async fn create_assignment(
        &self,
        form: CreateAssignmentForm,
        now: DateTime<Utc>,
    ) -> Result<CreatedAssignment> {
        create::create_assignment(self, form, now).await
    }
}
