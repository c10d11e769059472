//! Loading the data model handed to a run.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};
use tracing::warn;

/// Reads a data model file. `.json` files are parsed as JSON, anything else
/// as YAML.
pub fn load(path: &Path) -> Result<Map<String, Value>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read data {}", path.display()))?;

    let value: Value = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("invalid JSON in {}", path.display()))?,
        _ => serde_yaml::from_str(&content)
            .with_context(|| format!("invalid YAML in {}", path.display()))?,
    };

    into_model(value)
}

/// Turns a parsed document into run data, dropping a top-level `$schema`.
pub fn into_model(value: Value) -> Result<Map<String, Value>> {
    match value {
        Value::Object(mut map) => {
            if let Some(schema) = map.remove("$schema") {
                warn!(%schema, "ignoring $schema, schema validation is not supported");
            }
            Ok(map)
        }
        Value::Null => Ok(Map::new()),
        _ => bail!("data model must be a mapping at the top level"),
    }
}
