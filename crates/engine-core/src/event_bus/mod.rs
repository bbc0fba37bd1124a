pub mod bus;
pub mod sink;
