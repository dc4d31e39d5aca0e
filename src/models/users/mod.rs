pub mod entities;

pub use entities::{UserProfile, UserRef, UserRole};
