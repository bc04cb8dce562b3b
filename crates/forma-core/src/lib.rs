//! forma-core
//!
//! Core primitives for FORMA:
//! - Field, rule, and schema models with a stable JSON wire format
//! - The field validation pass (ordered, short-circuiting error messages)
//! - Derived-field computation (keyword decision list, date-aware)
//! - Whole-schema recomputation and submit-time validation passes
//! - Schema editing operations with dependent-field cleanup
//! - Structural schema checks and sha256 schema digests
//!
//! The crate performs no I/O and keeps no state; every function operates on
//! explicit arguments. The only system read is the documented convenience
//! entry points that resolve today's date before delegating to their
//! date-taking variants.

mod builder;
pub mod check;
pub mod digest;
pub mod engine;
pub mod errors;
pub mod model;

pub use crate::errors::{FormaError, FormaResult};

/// Convenience re-exports.
pub mod prelude {
    pub use crate::check::{check_schema, CheckFinding, CheckLevel, CheckReport};
    pub use crate::digest::schema_digest_hex;
    pub use crate::engine::{
        compute_derived_field_value, compute_derived_field_value_on, recompute_derived_fields,
        recompute_derived_fields_on, validate_field, validate_form,
    };
    pub use crate::model::{
        DerivedFieldDef, FieldDef, FieldHandle, FieldKind, FormSchema, RuleKind, Snapshot,
        ValidationRule, Value,
    };
    pub use crate::{FormaError, FormaResult};
}
