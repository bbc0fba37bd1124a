use crate::error::CliError;
use std::{collections::HashMap, io::Read, path::Path};

/// Variables the engine reads its settings and catalog secrets from: the
/// process environment, optionally overlaid with a `.env` file.
#[derive(Debug, Clone, Default)]
pub struct EnvManager {
    vars: HashMap<String, String>,
}

impl EnvManager {
    pub fn new() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Overlays `path` when it exists; a missing file is not an error.
    pub fn load_if_present<P: AsRef<Path>>(&mut self, path: P) -> Result<bool, CliError> {
        if !path.as_ref().is_file() {
            return Ok(false);
        }
        self.load_from_file(path)?;
        Ok(true)
    }

    /// File values win over the process environment. The process env itself is
    /// left untouched.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), CliError> {
        let file = std::fs::File::open(path)?;
        self.load_from_reader(file)
    }

    fn load_from_reader<R: Read>(&mut self, reader: R) -> Result<(), CliError> {
        self.overlay(dotenvy::from_read_iter(reader))
    }

    fn overlay<I>(&mut self, entries: I) -> Result<(), CliError>
    where
        I: Iterator<Item = dotenvy::Result<(String, String)>>,
    {
        for entry in entries {
            let (key, value) = entry?;
            self.vars.insert(key, value);
        }
        Ok(())
    }

    pub fn all(&self) -> &HashMap<String, String> {
        &self.vars
    }
}
