//! Maps a cataloged source to the connection descriptor its driver needs.
//!
//! Adding a database kind means adding a variant here and an adapter under
//! `sql/`; nothing above this crate changes.

use crate::error::AdapterError;
use model::catalog::source::{Credential, DatabaseKind, Source};
use std::fmt;

/// Engine-wide values that every descriptor carries regardless of source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorSettings {
    /// Database selected after login. Targets are resolved inside it.
    pub database: String,
    pub encrypt: bool,
    pub trust_server_certificate: bool,
}

impl Default for DescriptorSettings {
    fn default() -> Self {
        Self {
            database: "etl".to_string(),
            encrypt: true,
            trust_server_certificate: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionDescriptor {
    SqlServer(MsSqlDescriptor),
}

impl ConnectionDescriptor {
    /// Fails closed: every kind without an adapter is rejected by name.
    pub fn for_source(
        source: &Source,
        settings: &DescriptorSettings,
    ) -> Result<Self, AdapterError> {
        match source.kind {
            DatabaseKind::SqlServer => Ok(ConnectionDescriptor::SqlServer(MsSqlDescriptor {
                driver: MsSqlDescriptor::DRIVER,
                host: source.host.clone(),
                port: source.port,
                database: settings.database.clone(),
                username: source.username.clone(),
                credential: source.credential.clone(),
                encrypt: settings.encrypt,
                trust_server_certificate: settings.trust_server_certificate,
            })),
            DatabaseKind::MySql
            | DatabaseKind::PostgreSql
            | DatabaseKind::Oracle
            | DatabaseKind::Sqlite
            | DatabaseKind::MongoDb
            | DatabaseKind::Redis
            | DatabaseKind::Elasticsearch => Err(AdapterError::UnsupportedSourceKind(source.kind)),
        }
    }

    pub fn kind(&self) -> DatabaseKind {
        match self {
            ConnectionDescriptor::SqlServer(_) => DatabaseKind::SqlServer,
        }
    }
}

impl fmt::Display for ConnectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionDescriptor::SqlServer(d) => write!(f, "{d}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MsSqlDescriptor {
    pub driver: &'static str,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub credential: Credential,
    pub encrypt: bool,
    pub trust_server_certificate: bool,
}

impl MsSqlDescriptor {
    pub const DRIVER: &'static str = "tiberius";

    /// `host,port`, the SQL Server convention.
    pub fn server(&self) -> String {
        format!("{},{}", self.host, self.port)
    }
}

impl fmt::Display for MsSqlDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let yes_no = |flag: bool| if flag { "yes" } else { "no" };
        write!(
            f,
            "Driver={};Server={};Database={};Uid={};Pwd={};Encrypt={};TrustServerCertificate={}",
            self.driver,
            self.server(),
            self.database,
            self.username,
            self.credential,
            yes_no(self.encrypt),
            yes_no(self.trust_server_certificate)
        )
    }
}
