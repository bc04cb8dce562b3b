//! forma-store
//!
//! Local persistence for named form schemas. Layout under the store root:
//!
//! ```text
//! <root>/
//!   index.json        list of { id, name, digest, createdAt, savedAt }
//!   forms/<id>.json   one pretty-printed schema per file
//! ```
//!
//! The index records each schema's sha256 digest; `load` re-verifies it so
//! silent corruption surfaces as [`StoreError::Integrity`] instead of a
//! half-parsed schema. Index updates are guarded by an in-process mutex;
//! concurrent processes are out of scope for a local store.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use forma_core::digest::schema_digest_hex;
use forma_core::model::FormSchema;

mod error;

pub use error::{StoreError, StoreResult};

/// Store configuration. Explicit, caller-provided; the store reads no
/// environment variables.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub root: PathBuf,
}

impl StoreConfig {
    pub fn local(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

/// One index entry for a saved schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormRecord {
    pub id: String,
    pub name: String,
    pub digest: String,
    pub created_at: String,
    pub saved_at: String,
}

/// A local, file-backed store of form schemas.
pub struct FormStore {
    root: PathBuf,
    index_lock: Mutex<()>,
}

impl FormStore {
    /// Open (and if necessary create) a store under the configured root.
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        let store = Self {
            root: config.root,
            index_lock: Mutex::new(()),
        };
        fs::create_dir_all(store.forms_dir())?;
        if !store.index_path().exists() {
            store.write_index(&[])?;
        }
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn forms_dir(&self) -> PathBuf {
        self.root.join("forms")
    }

    fn index_path(&self) -> PathBuf {
        self.root.join("index.json")
    }

    fn form_path(&self, id: &str) -> PathBuf {
        self.forms_dir().join(format!("{id}.json"))
    }

    fn read_index(&self) -> StoreResult<Vec<FormRecord>> {
        let raw = fs::read_to_string(self.index_path())?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn write_index(&self, records: &[FormRecord]) -> StoreResult<()> {
        let raw = serde_json::to_vec_pretty(records)?;
        fs::write(self.index_path(), raw)?;
        Ok(())
    }

    /// Save a schema, stamping `created_at` on first save. Saving an id
    /// that already exists replaces the stored schema and its index entry.
    pub fn save(&self, schema: &mut FormSchema) -> StoreResult<FormRecord> {
        if schema.created_at.is_empty() {
            schema.created_at = now_rfc3339();
        }

        let raw = schema.to_json_string()?;
        let record = FormRecord {
            id: schema.id.clone(),
            name: schema.name.clone(),
            digest: schema_digest_hex(schema)?,
            created_at: schema.created_at.clone(),
            saved_at: now_rfc3339(),
        };

        let _guard = self.index_lock.lock();
        fs::write(self.form_path(&schema.id), raw)?;

        let mut index = self.read_index()?;
        match index.iter_mut().find(|r| r.id == record.id) {
            Some(slot) => *slot = record.clone(),
            None => index.push(record.clone()),
        }
        self.write_index(&index)?;

        Ok(record)
    }

    /// Load a schema by id, verifying its digest against the index.
    pub fn load(&self, id: &str) -> StoreResult<FormSchema> {
        let index = self.read_index()?;
        let record = index
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let raw = fs::read_to_string(self.form_path(id))?;
        let schema: FormSchema = serde_json::from_str(&raw)?;

        if schema_digest_hex(&schema)? != record.digest {
            return Err(StoreError::Integrity { id: id.to_string() });
        }
        Ok(schema)
    }

    /// All saved forms, in save order.
    pub fn list(&self) -> StoreResult<Vec<FormRecord>> {
        self.read_index()
    }

    pub fn find_by_name(&self, name: &str) -> StoreResult<Option<FormRecord>> {
        Ok(self.read_index()?.into_iter().find(|r| r.name == name))
    }

    /// Delete a saved form. Returns `false` when the id is unknown.
    pub fn delete(&self, id: &str) -> StoreResult<bool> {
        let _guard = self.index_lock.lock();
        let mut index = self.read_index()?;
        let before = index.len();
        index.retain(|r| r.id != id);
        if index.len() == before {
            return Ok(false);
        }

        let path = self.form_path(id);
        if path.exists() {
            fs::remove_file(path)?;
        }
        self.write_index(&index)?;
        Ok(true)
    }

}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use forma_core::model::{FieldDef, FieldKind};

    fn schema(name: &str) -> FormSchema {
        let mut schema = FormSchema::new(name);
        schema.push_field(FieldDef {
            id: String::new(),
            kind: FieldKind::Text,
            label: "Name".to_string(),
            required: true,
            default_value: None,
            validation_rules: vec![],
        });
        schema
    }

    fn open_temp() -> (tempfile::TempDir, FormStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FormStore::open(StoreConfig::local(dir.path().join("store"))).unwrap();
        (dir, store)
    }

    #[test]
    fn save_list_load_round_trip() {
        let (_dir, store) = open_temp();
        let mut form = schema("contact");

        let record = store.save(&mut form).unwrap();
        assert_eq!(record.name, "contact");
        assert!(!form.created_at.is_empty());

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, form.id);

        let loaded = store.load(&form.id).unwrap();
        assert_eq!(loaded, form);
    }

    #[test]
    fn saving_again_replaces_and_keeps_created_at() {
        let (_dir, store) = open_temp();
        let mut form = schema("contact");

        let first = store.save(&mut form).unwrap();
        form.name = "contact v2".to_string();
        let second = store.save(&mut form).unwrap();

        assert_eq!(first.created_at, second.created_at);
        assert_eq!(store.list().unwrap().len(), 1);
        assert_eq!(store.load(&form.id).unwrap().name, "contact v2");
    }

    #[test]
    fn load_unknown_id_is_not_found() {
        let (_dir, store) = open_temp();
        let err = store.load("missing").unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn tampered_file_fails_the_digest_check() {
        let (_dir, store) = open_temp();
        let mut form = schema("contact");
        store.save(&mut form).unwrap();

        let path = store.form_path(&form.id);
        let raw = fs::read_to_string(&path).unwrap();
        fs::write(&path, raw.replace("contact", "hijacked")).unwrap();

        let err = store.load(&form.id).unwrap_err();
        assert!(matches!(err, StoreError::Integrity { .. }));
    }

    #[test]
    fn delete_removes_file_and_entry() {
        let (_dir, store) = open_temp();
        let mut form = schema("contact");
        store.save(&mut form).unwrap();

        assert!(store.delete(&form.id).unwrap());
        assert!(!store.delete(&form.id).unwrap());
        assert!(store.list().unwrap().is_empty());
        assert!(!store.form_path(&form.id).exists());
    }

    #[test]
    fn find_by_name_matches_exactly() {
        let (_dir, store) = open_temp();
        let mut a = schema("alpha");
        let mut b = schema("beta");
        store.save(&mut a).unwrap();
        store.save(&mut b).unwrap();

        assert_eq!(store.find_by_name("beta").unwrap().unwrap().id, b.id);
        assert!(store.find_by_name("gamma").unwrap().is_none());
    }
}
