//! Schema editing operations.
//!
//! The orchestration layer (CLI, UI shells) owns a `FormSchema` being edited
//! and mutates it through these operations. They are plain synchronous
//! methods; ids are generated here so callers never invent them.
//!
//! Removing a base field cascades: every derived field listing the removed
//! id among its parents is dropped with it, so a schema never accumulates
//! derivations whose inputs are gone.

use crate::model::{DerivedFieldDef, FieldDef, FormSchema};

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl FormSchema {
    /// Append a base field, assigning it a fresh id. Returns the id.
    pub fn push_field(&mut self, mut field: FieldDef) -> String {
        field.id = new_id();
        let id = field.id.clone();
        self.fields.push(field);
        id
    }

    /// Append a derived field, assigning it a fresh id. Returns the id.
    pub fn push_derived_field(&mut self, mut field: DerivedFieldDef) -> String {
        field.id = new_id();
        let id = field.id.clone();
        self.derived_fields.push(field);
        id
    }

    /// Replace a base field by id. Returns `false` (and changes nothing)
    /// when the id is unknown.
    pub fn update_field(&mut self, field: FieldDef) -> bool {
        match self.fields.iter_mut().find(|f| f.id == field.id) {
            Some(slot) => {
                *slot = field;
                true
            }
            None => false,
        }
    }

    /// Replace a derived field by id. Returns `false` when the id is
    /// unknown.
    pub fn update_derived_field(&mut self, field: DerivedFieldDef) -> bool {
        match self.derived_fields.iter_mut().find(|f| f.id == field.id) {
            Some(slot) => {
                *slot = field;
                true
            }
            None => false,
        }
    }

    /// Remove a base field and every derived field that depends on it.
    /// Returns the ids of the removed derived fields.
    pub fn remove_field(&mut self, id: &str) -> Vec<String> {
        self.fields.retain(|f| f.id != id);

        let mut removed = Vec::new();
        self.derived_fields.retain(|d| {
            if d.parent_fields.iter().any(|p| p == id) {
                removed.push(d.id.clone());
                false
            } else {
                true
            }
        });
        removed
    }

    /// Remove a derived field by id. Returns whether anything was removed.
    pub fn remove_derived_field(&mut self, id: &str) -> bool {
        let before = self.derived_fields.len();
        self.derived_fields.retain(|f| f.id != id);
        self.derived_fields.len() != before
    }

    /// Reorder base fields to the given id sequence. The sequence must be a
    /// permutation of the current field ids; anything else is rejected and
    /// the order stays untouched.
    pub fn reorder_fields(&mut self, order: &[String]) -> bool {
        use std::collections::BTreeMap;

        if order.len() != self.fields.len() {
            return false;
        }

        let positions: BTreeMap<&str, usize> = order
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();

        if positions.len() != order.len() {
            return false;
        }
        if !self.fields.iter().all(|f| positions.contains_key(f.id.as_str())) {
            return false;
        }

        self.fields.sort_by_key(|f| positions[f.id.as_str()]);
        true
    }
}
