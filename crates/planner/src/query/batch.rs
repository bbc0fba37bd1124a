//! Splits a fetched row set into INSERT statements that fit the dialect's
//! parameter and row-constructor limits.

use crate::query::{
    ast::common::TableRef,
    builder::insert::InsertBuilder,
    dialect::Dialect,
    renderer::{Render, Renderer},
};
use model::{core::value::Value, records::row::RowSet};

/// A rendered statement ready to be executed with its bound parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
    pub row_count: usize,
}

/// Number of rows per INSERT given the column count and a caller limit.
pub fn rows_per_statement(dialect: &dyn Dialect, columns: usize, max_rows: usize) -> usize {
    let by_params = dialect.max_params() / columns.max(1);
    by_params
        .min(dialect.max_rows_per_insert())
        .min(max_rows.max(1))
        .max(1)
}

/// Renders one INSERT per chunk of `rows`. Returns nothing for an empty set.
pub fn insert_statements(
    dialect: &dyn Dialect,
    table: &str,
    rows: &RowSet,
    max_rows: usize,
) -> Vec<Statement> {
    if rows.is_empty() {
        return Vec::new();
    }

    let table = TableRef::parse(table);
    let chunk = rows_per_statement(dialect, rows.columns.len(), max_rows);

    rows.rows
        .chunks(chunk)
        .map(|slice| {
            let mut builder = InsertBuilder::new(table.clone()).columns(&rows.columns);
            for row in slice {
                builder = builder.values(row.values.clone());
            }

            let mut renderer = Renderer::new(dialect);
            builder.build().render(&mut renderer);
            let (sql, params) = renderer.finish();
            Statement {
                sql,
                params,
                row_count: slice.len(),
            }
        })
        .collect()
}
