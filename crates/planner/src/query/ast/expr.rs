use model::core::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A value bound as a statement parameter.
    Value(Value),
    /// A literal NULL written into the SQL text.
    Null,
}
