//! Read-only lookups the engine performs before a batch runs.

use crate::error::CatalogError;
use async_trait::async_trait;
use model::{
    catalog::{
        job::Job,
        source::{DatabaseKind, Source},
    },
    core::identifiers::SourceId,
};

pub mod file_catalog;
pub mod credential;

#[async_trait]
pub trait SourceCatalog: Send + Sync {
    /// Inactive sources are treated as absent.
    async fn get_active_by_id(&self, id: SourceId) -> Result<Option<Source>, CatalogError>;

    /// Active sources ordered by id.
    async fn list_active(&self) -> Result<Vec<Source>, CatalogError>;

    async fn list_by_kind(&self, kind: DatabaseKind) -> Result<Vec<Source>, CatalogError> {
        let sources = self.list_active().await?;
        Ok(sources.into_iter().filter(|s| s.kind == kind).collect())
    }
}

#[async_trait]
pub trait JobCatalog: Send + Sync {
    /// Jobs owned by `source_id`, ordered by job id ascending.
    async fn list_by_source(&self, source_id: SourceId) -> Result<Vec<Job>, CatalogError>;
}
