use crate::Error;
use regex::{Captures, Regex};
use std::collections::HashMap;

/// replaces `${VAR}`, `${VAR:-default}` and `${VAR-default}` placeholders in `data`.
/// `:-` takes the default when VAR is unset or empty, `-` only when VAR is unset.
/// With no default an unset VAR becomes "".
pub fn substitute(data: &str, vars: &HashMap<String, String>) -> crate::Result<String> {
    let regex = Regex::new(r"\$\{([a-zA-Z_][a-zA-Z0-9_]*)(?:(:?)-(.*?))?\}")
        .map_err(|e| Error::Custom(format!("{:?}", e)))?;

    let out = regex.replace_all(data, |cap: &Captures| {
        let value = vars.get(&cap[1]);
        let default = cap.get(3).map(|m| m.as_str());
        let or_empty = cap.get(2).map_or(false, |m| !m.as_str().is_empty());
        match (value, default) {
            (Some(value), Some(default)) if or_empty && value.is_empty() => default.to_string(),
            (Some(value), _) => value.to_string(),
            (None, Some(default)) => default.to_string(),
            (None, None) => String::new(),
        }
    });
    Ok(out.into_owned())
}
