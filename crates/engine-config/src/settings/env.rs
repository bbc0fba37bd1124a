use crate::settings::error::SettingsError;
use std::collections::HashMap;

/// Looks up `name`, treating blank values as unset.
pub fn lookup<'a>(vars: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    vars.get(name).map(|v| v.trim()).filter(|v| !v.is_empty())
}

pub fn parse_bool(name: &'static str, raw: &str) -> Result<bool, SettingsError> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(SettingsError::InvalidValue {
            name,
            value: raw.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}

pub fn parse_usize(name: &'static str, raw: &str) -> Result<usize, SettingsError> {
    raw.parse::<usize>()
        .map_err(|e| SettingsError::InvalidValue {
            name,
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_accepts_common_spellings() {
        assert!(parse_bool("X", "YES").unwrap());
        assert!(!parse_bool("X", "0").unwrap());
        assert!(parse_bool("X", "maybe").is_err());
    }

    #[test]
    fn blank_is_unset() {
        let vars = HashMap::from([("A".to_string(), "  ".to_string())]);
        assert_eq!(lookup(&vars, "A"), None);
        assert_eq!(lookup(&vars, "B"), None);
    }
}
