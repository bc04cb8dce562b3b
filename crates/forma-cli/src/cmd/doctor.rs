use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use forma_core::digest::schema_digest_hex;
use forma_core::model::FormSchema;
use forma_store::{FormStore, StoreConfig};

use crate::output;

#[derive(Debug, Serialize)]
pub struct Check {
    pub name: String,
    pub ok: bool,
    pub detail: String,
}

#[derive(Debug, Serialize)]
pub struct DoctorOut {
    pub ok: bool,
    pub checks: Vec<Check>,
}

pub fn run(store_root: &str) -> Result<()> {
    let mut checks = Vec::new();

    let store = FormStore::open(StoreConfig::local(PathBuf::from(store_root)));
    checks.push(Check {
        name: "store.open".to_string(),
        ok: store.is_ok(),
        detail: format!("store root {store_root} must be creatable and writable"),
    });

    if let Ok(store) = &store {
        let listed = store.list();
        checks.push(Check {
            name: "store.index".to_string(),
            ok: listed.is_ok(),
            detail: match &listed {
                Ok(forms) => format!("{} saved form(s)", forms.len()),
                Err(e) => format!("index unreadable: {e}"),
            },
        });

        // Every indexed form must load cleanly, digest check included.
        if let Ok(forms) = listed {
            let mut broken = Vec::new();
            for record in &forms {
                if store.load(&record.id).is_err() {
                    broken.push(record.id.clone());
                }
            }
            checks.push(Check {
                name: "store.forms".to_string(),
                ok: broken.is_empty(),
                detail: if broken.is_empty() {
                    "all saved forms load and pass their digest checks".to_string()
                } else {
                    format!("broken forms: {}", broken.join(", "))
                },
            });
        }
    }

    let digest = schema_digest_hex(&FormSchema::new("doctor"));
    checks.push(Check {
        name: "core.digest".to_string(),
        ok: digest.is_ok(),
        detail: "schema digesting must work".to_string(),
    });

    let ok = checks.iter().all(|c| c.ok);
    output::print(&DoctorOut { ok, checks })?;
    Ok(())
}
