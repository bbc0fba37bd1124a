pub mod errors;
pub mod record;
pub mod report;
pub mod result;
