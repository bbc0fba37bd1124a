use thiserror::Error;

/// All errors coming from the database/query layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// Low‐level I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Any SQL driver error, including server-side errors such as an
    /// invalid column name.
    #[error("SQL error: {0}")]
    Sql(#[from] tiberius::error::Error),

    /// The adapter was used after `close`.
    #[error("Connection is closed")]
    Closed,

    /// Writing rows to the database failed at the application level.
    #[error("Write error: {0}")]
    Write(String),
}

/// Errors happening during adapter or connection setup.
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("Failed to reach {server}: {source}")]
    Tcp {
        server: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Login failed: {0}")]
    Handshake(#[from] tiberius::error::Error),
}
