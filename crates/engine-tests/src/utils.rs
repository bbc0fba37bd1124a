use crate::TestServer;
use connectors::{
    adapter::Adapter,
    descriptor::{ConnectionDescriptor, DescriptorSettings},
    sql::base::adapter::{LoadOptions, SqlAdapter},
};
use engine_config::settings::EngineSettings;
use engine_core::{
    catalog::file_catalog::FileCatalog,
    event_bus::sink::TracingSink,
    state::{sled_store::SledRecordStore, writer::RecordWriter},
};
use engine_runtime::execution::{
    factory::DriverConnectionFactory, orchestrator::BatchOrchestrator,
};
use model::{
    catalog::{
        job::Job,
        source::{Credential, DatabaseKind, Source},
    },
    core::{
        identifiers::{JobId, SourceId},
        value::Value,
    },
};
use std::{path::Path, sync::Arc};

pub const SOURCE_TABLE: &str = "dbo.etl_test_customers";

/// Seed data for the extract side: three customers, one with a NULL email.
pub const SEED_SQL: &str = r#"
    IF OBJECT_ID('dbo.etl_test_customers', 'U') IS NOT NULL DROP TABLE dbo.etl_test_customers;
    CREATE TABLE dbo.etl_test_customers (
        id INT PRIMARY KEY,
        name NVARCHAR(100) NOT NULL,
        email NVARCHAR(200) NULL,
        is_active BIT NOT NULL,
        balance DECIMAL(10, 2) NOT NULL
    );
    INSERT INTO dbo.etl_test_customers VALUES
        (1, N'Ada', N'ada@example.com', 1, 120.50),
        (2, N'Brian', NULL, 0, 0.00),
        (3, N'Chloé', N'chloe@example.com', 1, 99.99);
"#;

pub fn descriptor_settings(server: &TestServer) -> DescriptorSettings {
    DescriptorSettings {
        database: server.database.clone(),
        encrypt: false,
        trust_server_certificate: true,
    }
}

pub fn source(server: &TestServer) -> Source {
    Source {
        id: SourceId::new(1),
        name: "live-mssql".into(),
        kind: DatabaseKind::SqlServer,
        host: server.host.clone(),
        port: server.port,
        username: server.username.clone(),
        credential: Credential::new(server.password.clone()),
        is_active: true,
        inserted_by: Some("engine-tests".into()),
        created_at: None,
        updated_at: None,
    }
}

pub fn job(id: u64, query: &str, target_table: &str) -> Job {
    Job {
        id: JobId::new(id),
        source_id: SourceId::new(1),
        name: format!("live-job-{id}"),
        source_table: SOURCE_TABLE.into(),
        target_table: target_table.into(),
        query: query.into(),
    }
}

/// A target table shaped like the seed table.
pub fn target_ddl(table: &str) -> String {
    format!(
        "IF OBJECT_ID('{table}', 'U') IS NOT NULL DROP TABLE {table};
         CREATE TABLE {table} (
             id INT PRIMARY KEY,
             name NVARCHAR(100) NOT NULL,
             email NVARCHAR(200) NULL,
             is_active BIT NOT NULL,
             balance DECIMAL(10, 2) NOT NULL
         );"
    )
}

pub async fn connect(server: &TestServer) -> Adapter {
    let descriptor =
        ConnectionDescriptor::for_source(&source(server), &descriptor_settings(server))
            .expect("descriptor");
    Adapter::connect(&descriptor, LoadOptions::default())
        .await
        .expect("connect to test server")
}

/// Runs a setup script, ignoring any rows it returns.
pub async fn execute(server: &TestServer, sql: &str) {
    let adapter = connect(server).await;
    adapter.get_sql().query_rows(sql).await.expect("setup script");
    adapter.get_sql().close().await.expect("close");
}

pub async fn fetch(server: &TestServer, sql: &str) -> Vec<Vec<Value>> {
    let adapter = connect(server).await;
    let rows = adapter.get_sql().query_rows(sql).await.expect("query");
    adapter.get_sql().close().await.expect("close");
    rows.rows.into_iter().map(|r| r.values).collect()
}

pub async fn row_count(server: &TestServer, table: &str) -> i64 {
    let rows = fetch(server, &format!("SELECT COUNT(*) AS n FROM {table}")).await;
    rows[0][0].as_i64().expect("count")
}

/// An orchestrator over an in-memory catalog and a sled store in `state_dir`.
pub fn orchestrator(server: &TestServer, jobs: Vec<Job>, state_dir: &Path) -> BatchOrchestrator {
    let catalog =
        Arc::new(FileCatalog::from_parts(vec![source(server)], jobs).expect("valid catalog"));
    let store = Arc::new(SledRecordStore::open(state_dir).expect("open sled"));
    let settings = EngineSettings {
        descriptor: descriptor_settings(server),
        state_dir: state_dir.to_path_buf(),
        ..EngineSettings::default()
    };
    BatchOrchestrator::new(
        catalog.clone(),
        catalog,
        Arc::new(DriverConnectionFactory::new(settings.load)),
        RecordWriter::new(store),
        Arc::new(TracingSink),
        &settings,
    )
}
