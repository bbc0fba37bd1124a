use crate::{
    catalog::{JobCatalog, SourceCatalog, credential::resolve_credential},
    error::CatalogError,
};
use async_trait::async_trait;
use model::{
    catalog::{
        job::Job,
        source::{Credential, Source},
    },
    core::identifiers::{JobId, SourceId},
};
use serde::Deserialize;
use std::{
    collections::{BTreeMap, HashMap},
    path::Path,
};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    sources: Vec<Source>,
    #[serde(default)]
    jobs: Vec<Job>,
}

/// Sources and jobs loaded once from a JSON document and served read-only.
///
/// ```json
/// { "sources": [{ "id": 1, "name": "erp", "kind": "sqlserver", ... }],
///   "jobs":    [{ "id": 10, "source_id": 1, "query": "SELECT ...", ... }] }
/// ```
#[derive(Debug, Clone, Default)]
pub struct FileCatalog {
    sources: BTreeMap<SourceId, Source>,
    jobs: BTreeMap<JobId, Job>,
}

impl FileCatalog {
    pub fn load(path: impl AsRef<Path>, vars: &HashMap<String, String>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&text, vars)?;
        debug!(
            "Loaded catalog {} ({} sources, {} jobs)",
            path.display(),
            catalog.sources.len(),
            catalog.jobs.len()
        );
        Ok(catalog)
    }

    /// A credential written as exactly `${VAR}` is resolved against `vars`;
    /// every other credential is kept verbatim.
    pub fn from_json(text: &str, vars: &HashMap<String, String>) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(text)?;
        let sources = file
            .sources
            .into_iter()
            .map(|mut source| {
                source.credential = Credential::new(resolve_credential(source.credential.expose(), vars)?);
                Ok(source)
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;
        Self::from_parts(sources, file.jobs)
    }

    pub fn from_parts(sources: Vec<Source>, jobs: Vec<Job>) -> Result<Self, CatalogError> {
        let mut by_id = BTreeMap::new();
        for source in sources {
            source.validate()?;
            let id = source.id;
            if by_id.insert(id, source).is_some() {
                return Err(CatalogError::DuplicateId {
                    kind: "source",
                    id: id.get(),
                });
            }
        }

        let mut jobs_by_id = BTreeMap::new();
        for job in jobs {
            job.validate()?;
            if !by_id.contains_key(&job.source_id) {
                return Err(CatalogError::OrphanJob {
                    job_id: job.id,
                    source_id: job.source_id,
                });
            }
            let id = job.id;
            if jobs_by_id.insert(id, job).is_some() {
                return Err(CatalogError::DuplicateId {
                    kind: "job",
                    id: id.get(),
                });
            }
        }

        Ok(FileCatalog {
            sources: by_id,
            jobs: jobs_by_id,
        })
    }
}

#[async_trait]
impl SourceCatalog for FileCatalog {
    async fn get_active_by_id(&self, id: SourceId) -> Result<Option<Source>, CatalogError> {
        Ok(self.sources.get(&id).filter(|s| s.is_active).cloned())
    }

    async fn list_active(&self) -> Result<Vec<Source>, CatalogError> {
        Ok(self
            .sources
            .values()
            .filter(|s| s.is_active)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl JobCatalog for FileCatalog {
    async fn list_by_source(&self, source_id: SourceId) -> Result<Vec<Job>, CatalogError> {
        Ok(self
            .jobs
            .values()
            .filter(|j| j.source_id == source_id)
            .cloned()
            .collect())
    }
}
