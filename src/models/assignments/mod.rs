pub mod entities;
pub mod requests;
pub mod responses;

pub use entities::{Assignment, AssignmentStatus, DerivedAssignmentView, HasDeadline};
pub use requests::CreateAssignmentForm;
pub use responses::CreatedAssignment;
