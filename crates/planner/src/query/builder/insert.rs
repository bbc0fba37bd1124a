use crate::query::ast::{common::TableRef, expr::Expr, insert::Insert};
use model::core::value::Value;

#[derive(Debug, Clone)]
pub struct InsertBuilder {
    ast: Insert,
}

impl InsertBuilder {
    pub fn new(table: TableRef) -> Self {
        Self {
            ast: Insert {
                table,
                ..Default::default()
            },
        }
    }

    pub fn columns(mut self, columns: &[String]) -> Self {
        self.ast.columns = columns.to_vec();
        self
    }

    /// Nulls are written inline rather than bound.
    pub fn values(mut self, row: Vec<Value>) -> Self {
        let row = row
            .into_iter()
            .map(|v| match v {
                Value::Null => Expr::Null,
                other => Expr::Value(other),
            })
            .collect();
        self.ast.values.push(row);
        self
    }

    pub fn build(self) -> Insert {
        self.ast
    }
}
