use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use forma_store::{FormStore, StoreConfig};

use crate::io::input;
use crate::output;

#[derive(Debug, Serialize)]
pub struct SaveOut {
    pub id: String,
    pub name: String,
    pub digest: String,
    pub created_at: String,
    pub saved_at: String,
    pub store_root: String,
}

pub fn run(store_root: &str, schema_path: &str) -> Result<()> {
    let mut schema = input::read_schema(schema_path)?;

    let store = FormStore::open(StoreConfig::local(PathBuf::from(store_root)))?;
    let record = store.save(&mut schema)?;

    output::print(&SaveOut {
        id: record.id,
        name: record.name,
        digest: record.digest,
        created_at: record.created_at,
        saved_at: record.saved_at,
        store_root: store_root.to_string(),
    })?;
    Ok(())
}
