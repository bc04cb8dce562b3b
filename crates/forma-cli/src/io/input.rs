use std::fs;
use std::path::Path;

use anyhow::{anyhow, Result};

use forma_core::model::{FormSchema, Value};

pub fn read_schema<P: AsRef<Path>>(path: P) -> Result<FormSchema> {
    let raw = fs::read_to_string(path.as_ref())?;
    FormSchema::from_json_str(&raw).map_err(|e| anyhow!("{e}"))
}

/// Read a data file into overlay entries. The file must be a JSON object of
/// field id to scalar value; `null` marks the field as explicitly absent
/// (clearing any schema default).
pub fn read_data_overlay<P: AsRef<Path>>(path: P) -> Result<Vec<(String, Option<Value>)>> {
    let raw = fs::read_to_string(path.as_ref())?;
    let parsed: serde_json::Value =
        serde_json::from_str(&raw).map_err(|e| anyhow!("invalid json: {e}"))?;

    let serde_json::Value::Object(map) = parsed else {
        return Err(anyhow!("data file must be a json object of field id to value"));
    };

    let mut entries = Vec::with_capacity(map.len());
    for (id, value) in map {
        let value = match value {
            serde_json::Value::Null => None,
            serde_json::Value::Bool(b) => Some(Value::Bool(b)),
            serde_json::Value::Number(n) => {
                let n = n
                    .as_f64()
                    .ok_or_else(|| anyhow!("field {id}: number out of range"))?;
                Some(Value::Number(n))
            }
            serde_json::Value::String(s) => Some(Value::Text(s)),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                return Err(anyhow!("field {id}: arrays and objects are not form values"));
            }
        };
        entries.push((id, value));
    }
    Ok(entries)
}
