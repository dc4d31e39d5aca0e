use tracing::debug;

use super::AssignmentService;
use crate::client::routes;
use crate::errors::Result;
use crate::models::assignments::Assignment;

pub async fn list_assignments(service: &AssignmentService) -> Result<Vec<Assignment>> {
    let assignments: Vec<Assignment> = service.client().get(routes::ASSIGNMENTS).await?;
    debug!("Fetched {} assignments", assignments.len());
    Ok(assignments)
}
