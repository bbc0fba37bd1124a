use thiserror::Error;

/// Errors raised while resolving engine settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A variable was set but its value could not be parsed.
    #[error("Invalid value for {name}: '{value}' ({reason})")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}
