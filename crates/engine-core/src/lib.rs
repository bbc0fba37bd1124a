pub mod catalog;
pub mod error;
pub mod event_bus;
pub mod metrics;
pub mod state;
