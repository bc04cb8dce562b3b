//! Field validation pass.
//!
//! Given a field definition, a candidate value, and the data snapshot,
//! produce an ordered list of human-readable error messages. The pass is a
//! pure function: it reads its arguments, mutates nothing, and keeps no
//! state between calls.
//!
//! Ordering is externally observable and must hold:
//! - a missing required value short-circuits with exactly one message
//! - otherwise rules run in declaration order, one message per failing rule
//!
//! Malformed rules (a length rule without a usable bound, a rule applied to
//! a non-string value) are treated as satisfied. Validation never raises.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{FieldHandle, RuleKind, Snapshot, ValidationRule, Value};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Validate a single field against its declared rules.
///
/// The snapshot is part of the call contract so cross-field rules can be
/// introduced without touching every caller; the current rule set only
/// inspects the candidate value.
pub fn validate_field(
    field: FieldHandle<'_>,
    value: Option<&Value>,
    _snapshot: &Snapshot,
) -> Vec<String> {
    let mut errors = Vec::new();

    if field.required() && is_blank(value) {
        errors.push(format!("{} is required", field.label()));
        return errors;
    }

    if let Some(value) = value {
        if !value.is_empty_text() {
            for rule in field.validation_rules() {
                if let Some(message) = check_rule(rule, value, field.label()) {
                    errors.push(message);
                }
            }
        }
    }

    errors
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None => true,
        Some(v) => v.is_empty_text(),
    }
}

/// Evaluate one rule against a present, non-empty value. Returns the error
/// message on failure, `None` when the rule is satisfied or inapplicable.
fn check_rule(rule: &ValidationRule, value: &Value, label: &str) -> Option<String> {
    match rule.kind {
        // Required-ness is handled before rule evaluation; an explicit
        // `required` rule entry contributes nothing here.
        RuleKind::Required => None,

        RuleKind::MinLength => {
            let text = value.as_text()?;
            let bound = usable_bound(rule)?;
            if char_count(text) < bound {
                Some(rule_message(rule, || {
                    format!("{label} must be at least {bound} characters")
                }))
            } else {
                None
            }
        }

        RuleKind::MaxLength => {
            let text = value.as_text()?;
            let bound = usable_bound(rule)?;
            if char_count(text) > bound {
                Some(rule_message(rule, || {
                    format!("{label} must be no more than {bound} characters")
                }))
            } else {
                None
            }
        }

        RuleKind::Email => {
            let text = value.as_text()?;
            if !EMAIL_RE.is_match(text) {
                Some(rule_message(rule, || {
                    format!("{label} must be a valid email address")
                }))
            } else {
                None
            }
        }

        RuleKind::Password => {
            let text = value.as_text()?;
            let strong = char_count(text) >= 8 && text.chars().any(|c| c.is_ascii_digit());
            if !strong {
                Some(rule_message(rule, || {
                    format!("{label} must be at least 8 characters and contain at least one number")
                }))
            } else {
                None
            }
        }
    }
}

/// Length rules need a positive bound; a missing or zero bound makes the
/// rule inert, matching the historical wire format where zero was never a
/// meaningful limit.
fn usable_bound(rule: &ValidationRule) -> Option<usize> {
    match rule.value {
        Some(bound) if bound > 0 => Some(bound as usize),
        _ => None,
    }
}

/// Lengths are counted in Unicode scalar values, not bytes.
fn char_count(text: &str) -> usize {
    text.chars().count()
}

fn rule_message(rule: &ValidationRule, default: impl FnOnce() -> String) -> String {
    if rule.message.is_empty() {
        default()
    } else {
        rule.message.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldDef, FieldKind};
    use proptest::prelude::*;

    fn text_field(required: bool, rules: Vec<ValidationRule>) -> FieldDef {
        FieldDef {
            id: "f".to_string(),
            kind: FieldKind::Text,
            label: "Name".to_string(),
            required,
            default_value: None,
            validation_rules: rules,
        }
    }

    fn validate(field: &FieldDef, value: Option<&Value>) -> Vec<String> {
        validate_field(FieldHandle::Base(field), value, &Snapshot::new())
    }

    #[test]
    fn required_absent_short_circuits() {
        let field = text_field(true, vec![ValidationRule::min_length(5)]);
        let errors = validate(&field, None);
        assert_eq!(errors, vec!["Name is required".to_string()]);
    }

    #[test]
    fn required_empty_string_short_circuits() {
        let field = text_field(true, vec![ValidationRule::email()]);
        let errors = validate(&field, Some(&Value::from("")));
        assert_eq!(errors, vec!["Name is required".to_string()]);
    }

    #[test]
    fn optional_blank_value_passes_everything() {
        let field = text_field(false, vec![ValidationRule::min_length(5)]);
        assert!(validate(&field, None).is_empty());
        assert!(validate(&field, Some(&Value::from(""))).is_empty());
    }

    #[test]
    fn min_length_boundary() {
        let field = text_field(false, vec![ValidationRule::min_length(3)]);
        assert_eq!(
            validate(&field, Some(&Value::from("ab"))),
            vec!["Name must be at least 3 characters".to_string()]
        );
        assert!(validate(&field, Some(&Value::from("abc"))).is_empty());
    }

    #[test]
    fn max_length_boundary() {
        let field = text_field(false, vec![ValidationRule::max_length(3)]);
        assert!(validate(&field, Some(&Value::from("abc"))).is_empty());
        assert_eq!(
            validate(&field, Some(&Value::from("abcd"))),
            vec!["Name must be no more than 3 characters".to_string()]
        );
    }

    #[test]
    fn email_rule_cases() {
        let field = text_field(false, vec![ValidationRule::email()]);
        assert!(validate(&field, Some(&Value::from("a@b.co"))).is_empty());
        for bad in ["a@b", "ab.co", "@b.co", "a @b.co"] {
            assert_eq!(
                validate(&field, Some(&Value::from(bad))),
                vec!["Name must be a valid email address".to_string()],
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn password_rule_cases() {
        let field = text_field(false, vec![ValidationRule::password()]);
        assert!(validate(&field, Some(&Value::from("abcdefg1"))).is_empty());
        let expected =
            "Name must be at least 8 characters and contain at least one number".to_string();
        assert_eq!(
            validate(&field, Some(&Value::from("abcdefgh"))),
            vec![expected.clone()]
        );
        assert_eq!(validate(&field, Some(&Value::from("abc1"))), vec![expected]);
    }

    #[test]
    fn custom_message_wins_over_default() {
        let field = text_field(
            false,
            vec![ValidationRule::min_length(5).with_message("too short, friend")],
        );
        assert_eq!(
            validate(&field, Some(&Value::from("ab"))),
            vec!["too short, friend".to_string()]
        );
    }

    #[test]
    fn failing_rules_accumulate_in_declaration_order() {
        let field = text_field(
            false,
            vec![ValidationRule::email(), ValidationRule::min_length(10)],
        );
        let errors = validate(&field, Some(&Value::from("nope")));
        assert_eq!(
            errors,
            vec![
                "Name must be a valid email address".to_string(),
                "Name must be at least 10 characters".to_string(),
            ]
        );
    }

    #[test]
    fn required_rule_entry_is_inert() {
        let field = text_field(false, vec![ValidationRule::required()]);
        assert!(validate(&field, Some(&Value::from("x"))).is_empty());
    }

    #[test]
    fn length_rule_without_bound_never_fails() {
        let mut rule = ValidationRule::min_length(5);
        rule.value = None;
        let field = text_field(false, vec![rule]);
        assert!(validate(&field, Some(&Value::from("a"))).is_empty());
    }

    #[test]
    fn length_rule_with_zero_bound_never_fails() {
        let field = text_field(false, vec![ValidationRule::max_length(0)]);
        assert!(validate(&field, Some(&Value::from("anything"))).is_empty());
    }

    #[test]
    fn length_rules_skip_non_string_values() {
        let field = text_field(false, vec![ValidationRule::min_length(5)]);
        assert!(validate(&field, Some(&Value::from(3.0))).is_empty());
        assert!(validate(&field, Some(&Value::from(true))).is_empty());
    }

    #[test]
    fn lengths_count_chars_not_bytes() {
        let field = text_field(false, vec![ValidationRule::max_length(4)]);
        let value = Value::from("héllo");
        assert_eq!(validate(&field, Some(&value)).len(), 1);
    }

    proptest! {
        #[test]
        fn min_length_fails_iff_shorter(s in "[a-z]{0,12}", bound in 1u32..10) {
            let field = text_field(false, vec![ValidationRule::min_length(bound)]);
            let value = Value::from(s.as_str());
            let errors = validate(&field, Some(&value));
            let should_fail = !s.is_empty() && s.chars().count() < bound as usize;
            prop_assert_eq!(!errors.is_empty(), should_fail);
        }

        #[test]
        fn max_length_fails_iff_longer(s in "[a-z]{0,12}", bound in 1u32..10) {
            let field = text_field(false, vec![ValidationRule::max_length(bound)]);
            let value = Value::from(s.as_str());
            let errors = validate(&field, Some(&value));
            let should_fail = s.chars().count() > bound as usize;
            prop_assert_eq!(!errors.is_empty(), should_fail);
        }
    }
}
