pub mod assignments;
pub mod auth;
pub mod common;
pub mod files;
pub mod submissions;
pub mod users;

pub use assignments::{Assignment, AssignmentStatus, DerivedAssignmentView};
pub use submissions::Submission;
pub use users::{UserProfile, UserRef, UserRole};
