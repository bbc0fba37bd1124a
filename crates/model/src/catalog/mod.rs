pub mod job;
pub mod source;
