use std::collections::BTreeMap;

use anyhow::{anyhow, Result};
use serde::Serialize;
use termcolor::Color;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use forma_core::engine::{recompute_derived_fields_on, validate_form};
use forma_core::model::Snapshot;

use crate::io::input;
use crate::output;

#[derive(Debug, Serialize)]
pub struct EvalOut {
    pub ok: bool,
    pub values: Snapshot,
    pub changed: Vec<String>,
    pub errors: BTreeMap<String, Vec<String>>,
}

pub fn run(schema_path: &str, data_path: Option<&str>, today_arg: Option<&str>) -> Result<()> {
    let schema = input::read_schema(schema_path)?;

    let mut snapshot = schema.default_snapshot();
    if let Some(path) = data_path {
        for (id, value) in input::read_data_overlay(path)? {
            match value {
                Some(v) => {
                    snapshot.insert(id, v);
                }
                None => {
                    snapshot.remove(&id);
                }
            }
        }
    }

    let today = match today_arg {
        Some(raw) => parse_today(raw)?,
        None => OffsetDateTime::now_utc().date(),
    };

    let changed = recompute_derived_fields_on(&schema, &mut snapshot, today);
    let errors = validate_form(&schema, &snapshot);
    let ok = errors.is_empty();

    output::print(&EvalOut {
        ok,
        values: snapshot,
        changed,
        errors: errors.clone(),
    })?;

    if !output::is_json() {
        for (field_id, messages) in &errors {
            for message in messages {
                output::tagged_line("error", Color::Red, &format!("{field_id}: {message}"))?;
            }
        }
    }

    if !ok {
        return Err(anyhow!("form data failed validation"));
    }
    Ok(())
}

fn parse_today(raw: &str) -> Result<Date> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(raw, format).map_err(|_| anyhow!("--today must be a YYYY-MM-DD date"))
}
