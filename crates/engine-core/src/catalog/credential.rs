use crate::error::CatalogError;
use std::collections::HashMap;

/// Resolves a credential written as exactly `${NAME}` against `vars`.
///
/// Anything else is a literal secret and is returned unchanged, so `$`,
/// `$$` or a stray `${` inside a password survive as written.
pub fn resolve_credential(
    raw: &str,
    vars: &HashMap<String, String>,
) -> Result<String, CatalogError> {
    let Some(name) = raw
        .strip_prefix("${")
        .and_then(|rest| rest.strip_suffix('}'))
        .map(str::trim)
        .filter(|name| is_variable_name(name))
    else {
        return Ok(raw.to_string());
    };

    vars.get(name)
        .cloned()
        .ok_or_else(|| CatalogError::UndefinedVariable(name.to_string()))
}

fn is_variable_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars() -> HashMap<String, String> {
        HashMap::from([("ERP_PASSWORD".to_string(), "pa55".to_string())])
    }

    #[test]
    fn resolves_whole_reference() {
        assert_eq!(resolve_credential("${ERP_PASSWORD}", &vars()).unwrap(), "pa55");
        assert_eq!(resolve_credential("${ ERP_PASSWORD }", &vars()).unwrap(), "pa55");
    }

    #[test]
    fn literal_secrets_pass_through() {
        for raw in ["pa$$w0rd", "x${y", "cost$5", "a${ERP_PASSWORD}b", "${not a name}", "${}"] {
            assert_eq!(resolve_credential(raw, &vars()).unwrap(), raw);
        }
    }

    #[test]
    fn undefined_variable_is_an_error() {
        let err = resolve_credential("${MISSING}", &vars()).unwrap_err();
        assert!(matches!(err, CatalogError::UndefinedVariable(name) if name == "MISSING"));
    }
}
