//! The form evaluation engine.
//!
//! Two pure, leaf-level components plus the two caller-facing passes built
//! on them:
//!
//! - [`validate_field`]: one field, one candidate value, ordered error
//!   messages (`validate`)
//! - [`compute_derived_field_value`]: one derived field against the
//!   snapshot (`derive`)
//! - [`recompute_derived_fields`]: the whole-schema recomputation pass run
//!   after every snapshot change
//! - [`validate_form`]: the submit-time pass over every field
//!
//! Everything here is synchronous and state-free. Functions read their
//! explicit arguments and nothing else, so concurrent callers need no
//! coordination.

use std::collections::BTreeMap;

use time::{Date, OffsetDateTime};

use crate::model::{FormSchema, Snapshot};

mod derive;
mod validate;

pub use derive::{compute_derived_field_value, compute_derived_field_value_on};
pub use validate::validate_field;

/// Recompute every derived field against today's date (UTC).
///
/// See [`recompute_derived_fields_on`].
pub fn recompute_derived_fields(schema: &FormSchema, snapshot: &mut Snapshot) -> Vec<String> {
    recompute_derived_fields_on(schema, snapshot, OffsetDateTime::now_utc().date())
}

/// Recompute every derived field in declaration order, writing results back
/// into the snapshot, and return the ids whose stored value changed.
///
/// Later derived fields see values written earlier in the same pass, so a
/// derived field may list another derived field as a parent. An absent
/// result removes the snapshot entry. The pass is idempotent: on an
/// unchanged snapshot it returns an empty list.
pub fn recompute_derived_fields_on(
    schema: &FormSchema,
    snapshot: &mut Snapshot,
    today: Date,
) -> Vec<String> {
    let all = schema.all_fields();
    let mut changed = Vec::new();

    for derived in &schema.derived_fields {
        let next = compute_derived_field_value_on(derived, snapshot, &all, today);
        if snapshot.get(&derived.id) != next.as_ref() {
            changed.push(derived.id.clone());
            match next {
                Some(value) => {
                    snapshot.insert(derived.id.clone(), value);
                }
                None => {
                    snapshot.remove(&derived.id);
                }
            }
        }
    }

    changed
}

/// Validate every field (base then derived) and collect the failures into
/// an error map keyed by field id. Fields without errors are omitted.
pub fn validate_form(schema: &FormSchema, snapshot: &Snapshot) -> BTreeMap<String, Vec<String>> {
    let mut errors = BTreeMap::new();

    for field in schema.all_fields() {
        let field_errors = validate_field(field, snapshot.get(field.id()), snapshot);
        if !field_errors.is_empty() {
            errors.insert(field.id().to_string(), field_errors);
        }
    }

    errors
}
