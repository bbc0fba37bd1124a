pub mod ast;
pub mod batch;
pub mod builder;
pub mod dialect;
pub mod renderer;
