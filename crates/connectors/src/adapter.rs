use crate::{
    descriptor::ConnectionDescriptor,
    error::AdapterError,
    sql::{
        base::adapter::{LoadOptions, SqlAdapter},
        mssql::adapter::MsSqlAdapter,
    },
};

/// One variant per database kind that can actually be executed against.
pub enum Adapter {
    SqlServer(MsSqlAdapter),
}

impl Adapter {
    pub async fn connect(
        descriptor: &ConnectionDescriptor,
        load: LoadOptions,
    ) -> Result<Self, AdapterError> {
        match descriptor {
            ConnectionDescriptor::SqlServer(d) => {
                let adapter = MsSqlAdapter::connect(d, load).await?;
                Ok(Adapter::SqlServer(adapter))
            }
        }
    }

    pub fn get_sql(&self) -> &(dyn SqlAdapter + Send + Sync) {
        match self {
            Adapter::SqlServer(adapter) => adapter,
        }
    }

    pub fn into_sql(self) -> Box<dyn SqlAdapter + Send + Sync> {
        match self {
            Adapter::SqlServer(adapter) => Box::new(adapter),
        }
    }
}
