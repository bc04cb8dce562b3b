use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use forma_store::{FormRecord, FormStore, StoreConfig};

use crate::output;

#[derive(Debug, Serialize)]
pub struct ListOut {
    pub count: usize,
    pub forms: Vec<FormRecord>,
}

pub fn run(store_root: &str) -> Result<()> {
    let store = FormStore::open(StoreConfig::local(PathBuf::from(store_root)))?;
    let forms = store.list()?;

    output::print(&ListOut {
        count: forms.len(),
        forms,
    })?;
    Ok(())
}
