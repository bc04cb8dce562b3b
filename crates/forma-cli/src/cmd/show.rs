use std::path::PathBuf;

use anyhow::Result;

use forma_store::{FormStore, StoreConfig};

use crate::output;

pub fn run(store_root: &str, id: &str) -> Result<()> {
    let store = FormStore::open(StoreConfig::local(PathBuf::from(store_root)))?;
    let schema = store.load(id)?;

    output::print(&schema)?;
    Ok(())
}
