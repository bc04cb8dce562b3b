//! Derived-field computation.
//!
//! A derived field's formula is not an expression language. It is a fixed
//! priority list of substring tests over the lowercased, trimmed formula
//! text; the first matching branch wins and there is no fallthrough once a
//! branch produces a value:
//!
//! 1. `"age"` with exactly one parent: whole-year age from the parent's
//!    date-of-birth value (absent parent falls through to the later rules)
//! 2. `"sum"` or `"+"`: numeric sum over parents, non-numeric counts as 0
//! 3. `"concat"` or `"join"`: present, non-empty parent values joined with
//!    a single space, in parent order
//! 4. otherwise: the first parent's raw value, or the empty string when
//!    there are no parents
//!
//! Keeping this a decision list is deliberate. A real parser would change
//! which branch wins for ambiguous formulas (one containing both "age" and
//! "sum"), which is observable behavior.
//!
//! Computation never fails loudly. Anything that goes wrong inside a branch
//! (an unparseable date, a non-string date value) degrades to the empty
//! string.

use itertools::Itertools;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::model::{DerivedFieldDef, FieldHandle, Snapshot, Value};

/// Compute a derived field's current value against today's date (UTC).
///
/// Returns `None` when the computed value is absent (first-parent fallback
/// with no stored parent value). The field catalog is accepted so callers
/// and future formulas can resolve sibling metadata; the current formula
/// set reads only the snapshot.
pub fn compute_derived_field_value(
    derived: &DerivedFieldDef,
    snapshot: &Snapshot,
    all_fields: &[FieldHandle<'_>],
) -> Option<Value> {
    compute_derived_field_value_on(derived, snapshot, all_fields, OffsetDateTime::now_utc().date())
}

/// Compute a derived field's value as of an explicit evaluation date.
///
/// The date only affects age formulas. Callers that need reproducible
/// output (tests, batch evaluation) should prefer this entry point.
pub fn compute_derived_field_value_on(
    derived: &DerivedFieldDef,
    snapshot: &Snapshot,
    _all_fields: &[FieldHandle<'_>],
    today: Date,
) -> Option<Value> {
    let formula = derived.formula.to_lowercase();
    let formula = formula.trim();

    if formula.contains("age") && derived.parent_fields.len() == 1 {
        if let Some(value) = snapshot.get(&derived.parent_fields[0]) {
            return Some(match age_in_years(value, today) {
                Some(years) => Value::Number(years as f64),
                None => Value::Text(String::new()),
            });
        }
        // No date of birth yet: fall through to the remaining branches.
    }

    if formula.contains("sum") || formula.contains('+') {
        let sum: f64 = derived
            .parent_fields
            .iter()
            .filter_map(|id| snapshot.get(id))
            .filter_map(Value::as_number)
            .sum();
        return Some(Value::Number(sum));
    }

    if formula.contains("concat") || formula.contains("join") {
        let joined = derived
            .parent_fields
            .iter()
            .filter_map(|id| snapshot.get(id))
            .filter(|value| !value.is_empty_text())
            .map(Value::to_display)
            .join(" ");
        return Some(Value::Text(joined));
    }

    if let Some(first) = derived.parent_fields.first() {
        return snapshot.get(first).cloned();
    }

    Some(Value::Text(String::new()))
}

/// Whole-year age as of `today`, clamped at zero. `None` when the value is
/// not a parseable `YYYY-MM-DD` string.
fn age_in_years(value: &Value, today: Date) -> Option<i32> {
    let raw = value.as_text()?;
    let format = format_description!("[year]-[month]-[day]");
    let dob = Date::parse(raw.trim(), format).ok()?;

    let mut years = today.year() - dob.year();
    if (u8::from(today.month()), today.day()) < (u8::from(dob.month()), dob.day()) {
        // Birthday has not come around yet this year.
        years -= 1;
    }
    Some(years.max(0))
}
