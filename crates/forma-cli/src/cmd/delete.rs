use std::path::PathBuf;

use anyhow::{anyhow, Result};
use serde::Serialize;

use forma_store::{FormStore, StoreConfig};

use crate::output;

#[derive(Debug, Serialize)]
pub struct DeleteOut {
    pub id: String,
    pub deleted: bool,
}

pub fn run(store_root: &str, id: &str) -> Result<()> {
    let store = FormStore::open(StoreConfig::local(PathBuf::from(store_root)))?;
    let deleted = store.delete(id)?;

    if !deleted {
        return Err(anyhow!("form not found: {id}"));
    }

    output::print(&DeleteOut {
        id: id.to_string(),
        deleted,
    })?;
    Ok(())
}
