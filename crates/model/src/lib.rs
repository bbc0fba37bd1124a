pub mod catalog;
pub mod core;
pub mod events;
pub mod execution;
pub mod records;
