//! Keeps an existing config file in step with the current `Config` layout.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Keys of the current layout, in file order.
const KNOWN_FIELDS: [&str; 5] = [
    "database",
    "report_dir",
    "report_format",
    "separator_char",
    "log_level",
];

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Mapping::new());
    }
    match serde_yaml::from_str::<Value>(&content) {
        Ok(Value::Mapping(map)) => Ok(map),
        Ok(_) => Err(AppError::Config(format!(
            "{} is not a key/value document",
            path.display()
        ))),
        Err(e) => Err(AppError::Config(e.to_string())),
    }
}

/// Fields the file at `path` does not set.
pub fn missing_fields(path: &Path) -> AppResult<Vec<&'static str>> {
    let map = read_mapping(path)?;
    Ok(KNOWN_FIELDS
        .iter()
        .copied()
        .filter(|k| !map.contains_key(Value::String((*k).to_string())))
        .collect())
}

/// Write the default value of every missing field back to `path`.
/// Existing values are left alone. Returns the keys that were added.
pub fn fill_missing_fields(path: &Path) -> AppResult<Vec<&'static str>> {
    let mut map = read_mapping(path)?;

    let defaults = serde_yaml::to_value(Config::default())
        .map_err(|e| AppError::Config(e.to_string()))?;

    let mut added = Vec::new();
    for key in KNOWN_FIELDS {
        let k = Value::String(key.to_string());
        if map.contains_key(&k) {
            continue;
        }
        let v = defaults.get(key).cloned().unwrap_or(Value::Null);
        map.insert(k, v);
        added.push(key);
    }

    if !added.is_empty() {
        let serialized =
            serde_yaml::to_string(&Value::Mapping(map)).map_err(|e| AppError::Config(e.to_string()))?;
        fs::write(path, serialized)?;
        tracing::info!(path = %path.display(), fields = ?added, "config fields added");
    }

    Ok(added)
}
