pub mod lifetime;
pub mod requests;

pub use requests::RequestTracker;
