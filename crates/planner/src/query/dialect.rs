//! Defines the `Dialect` trait for database-specific SQL syntax.

pub trait Dialect: Send + Sync {
    /// Wraps an identifier (like a table or column name) in the correct
    /// quotation marks for the dialect.
    ///
    /// - SQL Server uses brackets: `[my_column]`
    fn quote_identifier(&self, ident: &str) -> String;

    /// Returns the placeholder for a parameterized query.
    ///
    /// - SQL Server uses `@P1`, `@P2`, etc.
    fn get_placeholder(&self, index: usize) -> String;

    /// Upper bound on bound parameters in a single statement.
    fn max_params(&self) -> usize;

    /// Upper bound on row constructors in a single `VALUES` clause.
    fn max_rows_per_insert(&self) -> usize;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SqlServer;

impl Dialect for SqlServer {
    fn quote_identifier(&self, ident: &str) -> String {
        let bare = ident
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .map(|s| s.replace("]]", "]"))
            .unwrap_or_else(|| ident.to_string());
        format!("[{}]", bare.replace(']', "]]"))
    }

    fn get_placeholder(&self, index: usize) -> String {
        format!("@P{}", index + 1)
    }

    fn max_params(&self) -> usize {
        // Hard limit is 2100; leave headroom for the driver's own parameters.
        2000
    }

    fn max_rows_per_insert(&self) -> usize {
        1000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_with_brackets() {
        let d = SqlServer;
        assert_eq!(d.quote_identifier("customer_id"), "[customer_id]");
        assert_eq!(d.quote_identifier("[Order Date]"), "[Order Date]");
        assert_eq!(d.quote_identifier("weird]name"), "[weird]]name]");
    }

    #[test]
    fn placeholders_are_one_based() {
        let d = SqlServer;
        assert_eq!(d.get_placeholder(0), "@P1");
        assert_eq!(d.get_placeholder(9), "@P10");
    }
}
