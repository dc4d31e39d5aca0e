pub mod attachment;
pub mod validate;
