pub mod adapter;
pub mod descriptor;
pub mod error;
pub mod sql;
