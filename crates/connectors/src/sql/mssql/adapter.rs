use crate::{
    descriptor::MsSqlDescriptor,
    sql::{
        base::{
            adapter::{LoadOptions, SqlAdapter},
            error::{ConnectorError, DbError},
        },
        mssql::{params::bind_values, row::to_row_data},
    },
};
use async_trait::async_trait;
use model::{
    catalog::source::DatabaseKind,
    records::row::{RowData, RowSet},
};
use planner::query::{
    batch::{Statement, insert_statements},
    dialect,
};
use tiberius::{AuthMethod, Client, Config, EncryptionLevel, Query};
use tokio::{net::TcpStream, sync::Mutex};
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};
use tracing::{debug, info, warn};

type MsSqlClient = Client<Compat<TcpStream>>;

pub struct MsSqlAdapter {
    client: Mutex<Option<MsSqlClient>>,
    dialect: dialect::SqlServer,
    load: LoadOptions,
}

impl MsSqlAdapter {
    pub async fn connect(
        descriptor: &MsSqlDescriptor,
        load: LoadOptions,
    ) -> Result<Self, ConnectorError> {
        let config = config_for(descriptor);
        let client = match open_client(config).await {
            // Azure SQL and availability groups may redirect the login.
            Err(ConnectorError::Handshake(tiberius::error::Error::Routing { host, port })) => {
                info!("Login redirected to {host}:{port}");
                let mut config = config_for(descriptor);
                config.host(&host);
                config.port(port);
                open_client(config).await?
            }
            other => other?,
        };

        debug!("Connected to {}", descriptor.server());
        Ok(MsSqlAdapter {
            client: Mutex::new(Some(client)),
            dialect: dialect::SqlServer,
            load,
        })
    }
}

fn config_for(descriptor: &MsSqlDescriptor) -> Config {
    let mut config = Config::new();
    config.host(&descriptor.host);
    config.port(descriptor.port);
    config.database(&descriptor.database);
    config.authentication(AuthMethod::sql_server(
        &descriptor.username,
        descriptor.credential.expose(),
    ));
    config.encryption(if descriptor.encrypt {
        EncryptionLevel::Required
    } else {
        EncryptionLevel::Off
    });
    if descriptor.trust_server_certificate {
        config.trust_cert();
    }
    config
}

async fn open_client(config: Config) -> Result<MsSqlClient, ConnectorError> {
    let addr = config.get_addr();
    let tcp = TcpStream::connect(&addr)
        .await
        .map_err(|source| ConnectorError::Tcp {
            server: addr.clone(),
            source,
        })?;
    tcp.set_nodelay(true).map_err(|source| ConnectorError::Tcp {
        server: addr,
        source,
    })?;
    Ok(Client::connect(config, tcp.compat_write()).await?)
}

async fn run_statements(client: &mut MsSqlClient, statements: &[Statement]) -> Result<u64, DbError> {
    let mut affected = 0;
    for statement in statements {
        let mut query = Query::new(statement.sql.as_str());
        bind_values(&mut query, &statement.params);
        let result = query.execute(client).await?;
        let total: u64 = result.rows_affected().iter().sum();
        debug!(
            "Inserted chunk of {} rows ({total} affected)",
            statement.row_count
        );
        affected += total;
    }
    Ok(affected)
}

async fn batch_command(client: &mut MsSqlClient, sql: &str) -> Result<(), DbError> {
    client.simple_query(sql).await?.into_results().await?;
    Ok(())
}

#[async_trait]
impl SqlAdapter for MsSqlAdapter {
    async fn query_rows(&self, sql: &str) -> Result<RowSet, DbError> {
        let mut guard = self.client.lock().await;
        let client = guard.as_mut().ok_or(DbError::Closed)?;

        let mut stream = client.simple_query(sql).await?;
        let columns: Vec<String> = stream
            .columns()
            .await?
            .map(|cols| cols.iter().map(|c| c.name().to_string()).collect())
            .unwrap_or_default();
        let rows = stream
            .into_first_result()
            .await?
            .into_iter()
            .map(to_row_data)
            .collect::<Result<Vec<RowData>, _>>()?;

        debug!("Fetched {} rows", rows.len());
        Ok(RowSet::new(columns, rows))
    }

    async fn insert_rows(&self, table: &str, rows: &RowSet) -> Result<u64, DbError> {
        let statements =
            insert_statements(&self.dialect, table, rows, self.load.max_rows_per_insert);
        if statements.is_empty() {
            return Ok(0);
        }

        let mut guard = self.client.lock().await;
        let client = guard.as_mut().ok_or(DbError::Closed)?;

        batch_command(client, "BEGIN TRANSACTION").await?;
        match run_statements(client, &statements).await {
            Ok(affected) => {
                batch_command(client, "COMMIT TRANSACTION").await?;
                debug!(
                    "Committed {} statements into {table} ({affected} rows)",
                    statements.len()
                );
                Ok(affected)
            }
            Err(err) => {
                if let Err(rollback) =
                    batch_command(client, "IF @@TRANCOUNT > 0 ROLLBACK TRANSACTION").await
                {
                    warn!("Rollback of {table} failed: {rollback}");
                }
                Err(err)
            }
        }
    }

    async fn ping(&self) -> Result<(), DbError> {
        let mut guard = self.client.lock().await;
        let client = guard.as_mut().ok_or(DbError::Closed)?;
        batch_command(client, "SELECT 1").await
    }

    async fn close(&self) -> Result<(), DbError> {
        let client = self.client.lock().await.take();
        match client {
            Some(client) => Ok(client.close().await?),
            None => Ok(()),
        }
    }

    fn kind(&self) -> DatabaseKind {
        DatabaseKind::SqlServer
    }
}
