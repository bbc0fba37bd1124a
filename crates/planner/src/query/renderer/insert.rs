use crate::query::{ast::insert::Insert, renderer::Render};

impl Render for Insert {
    fn render(&self, r: &mut super::Renderer) {
        r.sql.push_str("INSERT INTO ");
        r.render_table_ref(&self.table);
        r.sql.push_str(" (");
        let quoted_columns: Vec<String> = self
            .columns
            .iter()
            .map(|c| r.dialect.quote_identifier(c))
            .collect();
        r.sql.push_str(&quoted_columns.join(", "));
        r.sql.push(')');

        r.sql.push_str(" VALUES ");
        for (i, row) in self.values.iter().enumerate() {
            if i > 0 {
                r.sql.push_str(", ");
            }
            r.sql.push('(');
            for (j, val) in row.iter().enumerate() {
                if j > 0 {
                    r.sql.push_str(", ");
                }
                val.render(r);
            }
            r.sql.push(')');
        }
        r.sql.push(';');
    }
}

#[cfg(test)]
mod tests {
    use model::core::value::Value;

    use crate::query::{
        ast::{common::TableRef, expr::Expr, insert::Insert},
        dialect::SqlServer,
        renderer::{Render, Renderer},
    };

    #[test]
    fn test_render_batch_insert_sqlserver() {
        let ast = Insert {
            table: TableRef::parse("dbo.users"),
            columns: vec!["name".to_string(), "is_active".to_string()],
            values: vec![
                vec![
                    Expr::Value(Value::String("Alice".to_string())),
                    Expr::Value(Value::Boolean(true)),
                ],
                vec![
                    Expr::Value(Value::String("Bob".to_string())),
                    Expr::Null,
                ],
            ],
        };

        let dialect = SqlServer;
        let mut renderer = Renderer::new(&dialect);
        ast.render(&mut renderer);
        let (sql, params) = renderer.finish();

        assert_eq!(
            sql,
            "INSERT INTO [dbo].[users] ([name], [is_active]) VALUES (@P1, @P2), (@P3, NULL);"
        );
        assert_eq!(
            params,
            vec![
                Value::String("Alice".to_string()),
                Value::Boolean(true),
                Value::String("Bob".to_string()),
            ]
        );
    }
}
