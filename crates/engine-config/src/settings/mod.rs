//! Engine settings resolved from a variable map (process env plus `.env`).

use crate::settings::{
    env::{lookup, parse_bool, parse_usize},
    error::SettingsError,
};
use connectors::{descriptor::DescriptorSettings, sql::base::adapter::LoadOptions};
use std::{collections::HashMap, path::PathBuf};
use tracing::warn;

pub mod env;
pub mod error;

pub const ETL_CATALOG: &str = "ETL_CATALOG";
pub const ETL_STATE_DIR: &str = "ETL_STATE_DIR";
pub const ETL_TARGET_DATABASE: &str = "ETL_TARGET_DATABASE";
pub const ETL_ENCRYPT: &str = "ETL_ENCRYPT";
pub const ETL_TRUST_SERVER_CERT: &str = "ETL_TRUST_SERVER_CERT";
pub const ETL_INSERT_BATCH_ROWS: &str = "ETL_INSERT_BATCH_ROWS";

const MAX_INSERT_BATCH_ROWS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    pub catalog_path: PathBuf,
    pub state_dir: PathBuf,
    pub descriptor: DescriptorSettings,
    pub load: LoadOptions,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("catalog.json"),
            state_dir: default_state_dir(),
            descriptor: DescriptorSettings::default(),
            load: LoadOptions::default(),
        }
    }
}

fn default_state_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".etl").join("state"))
        .unwrap_or_else(|| PathBuf::from(".etl/state"))
}

impl EngineSettings {
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, SettingsError> {
        let mut settings = EngineSettings::default();

        if let Some(path) = lookup(vars, ETL_CATALOG) {
            settings.catalog_path = PathBuf::from(path);
        }
        if let Some(dir) = lookup(vars, ETL_STATE_DIR) {
            settings.state_dir = PathBuf::from(dir);
        }
        if let Some(database) = lookup(vars, ETL_TARGET_DATABASE) {
            settings.descriptor.database = database.to_string();
        }
        if let Some(raw) = lookup(vars, ETL_ENCRYPT) {
            settings.descriptor.encrypt = parse_bool(ETL_ENCRYPT, raw)?;
        }
        if let Some(raw) = lookup(vars, ETL_TRUST_SERVER_CERT) {
            settings.descriptor.trust_server_certificate = parse_bool(ETL_TRUST_SERVER_CERT, raw)?;
        }
        if let Some(raw) = lookup(vars, ETL_INSERT_BATCH_ROWS) {
            let requested = parse_usize(ETL_INSERT_BATCH_ROWS, raw)?;
            let clamped = requested.clamp(1, MAX_INSERT_BATCH_ROWS);
            if clamped != requested {
                warn!("{ETL_INSERT_BATCH_ROWS}={requested} is out of range, using {clamped}");
            }
            settings.load.max_rows_per_insert = clamped;
        }

        Ok(settings)
    }
}
