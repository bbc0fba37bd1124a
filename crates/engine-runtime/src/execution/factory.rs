use async_trait::async_trait;
use connectors::{
    adapter::Adapter,
    descriptor::ConnectionDescriptor,
    error::AdapterError,
    sql::base::adapter::{LoadOptions, SqlAdapter},
};

/// Opens a live connection for a descriptor. The seam tests replace.
#[async_trait]
pub trait ConnectionFactory: Send + Sync {
    async fn connect(
        &self,
        descriptor: &ConnectionDescriptor,
    ) -> Result<Box<dyn SqlAdapter + Send + Sync>, AdapterError>;
}

/// Connects through the real drivers.
#[derive(Debug, Clone, Copy, Default)]
pub struct DriverConnectionFactory {
    load: LoadOptions,
}

impl DriverConnectionFactory {
    pub fn new(load: LoadOptions) -> Self {
        Self { load }
    }
}

#[async_trait]
impl ConnectionFactory for DriverConnectionFactory {
    async fn connect(
        &self,
        descriptor: &ConnectionDescriptor,
    ) -> Result<Box<dyn SqlAdapter + Send + Sync>, AdapterError> {
        let adapter = Adapter::connect(descriptor, self.load).await?;
        Ok(adapter.into_sql())
    }
}
