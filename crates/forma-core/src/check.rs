//! Structural schema checking.
//!
//! Deterministic checks over a `FormSchema`, intended for:
//! - CLI (`forma check ...`)
//! - callers that want to surface authoring problems before a form is used
//!
//! The checker returns a report even when the schema is broken; use
//! `report.ok` or `report.has_errors()`. Levels follow the engine's
//! tolerance: anything the engine survives (dangling parent references,
//! unusable rule bounds) is a warning, anything that makes the schema
//! ambiguous (duplicate ids) is an error.
//!
//! This module performs no I/O and never mutates the schema.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::model::{FieldDef, FieldKind, FormSchema, RuleKind, ValidationRule, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckLevel {
    Info,
    Warning,
    Error,
}

/// A structured check finding.
#[derive(Debug, Clone, Serialize)]
pub struct CheckFinding {
    pub level: CheckLevel,
    pub code: String,
    pub message: String,
}

/// Check run result.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub ok: bool,
    pub findings: Vec<CheckFinding>,
}

impl CheckReport {
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.level == CheckLevel::Error)
    }

    pub fn warnings(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.level == CheckLevel::Warning)
            .count()
    }
}

fn push(
    findings: &mut Vec<CheckFinding>,
    level: CheckLevel,
    code: impl Into<String>,
    message: impl Into<String>,
) {
    findings.push(CheckFinding {
        level,
        code: code.into(),
        message: message.into(),
    });
}

/// Check a schema's structural invariants.
pub fn check_schema(schema: &FormSchema) -> CheckReport {
    let mut findings = Vec::new();

    if schema.name.trim().is_empty() {
        push(
            &mut findings,
            CheckLevel::Warning,
            "schema.name.empty",
            "schema has no name",
        );
    }

    // Ids must be present and unique across base and derived fields.
    let mut seen = BTreeSet::new();
    for handle in schema.all_fields() {
        let id = handle.id();
        if id.trim().is_empty() {
            push(
                &mut findings,
                CheckLevel::Error,
                "field.id.empty",
                format!("field {:?} has an empty id", handle.label()),
            );
            continue;
        }
        if !seen.insert(id) {
            push(
                &mut findings,
                CheckLevel::Error,
                "field.id.duplicate",
                format!("duplicate field id: {id}"),
            );
        }
        if handle.label().trim().is_empty() {
            push(
                &mut findings,
                CheckLevel::Warning,
                "field.label.empty",
                format!("field {id} has an empty label; error messages will read poorly"),
            );
        }
    }

    for field in &schema.fields {
        check_field_kind(&mut findings, &field.id, &field.kind);
        check_default_value(&mut findings, field);
        check_rules(&mut findings, &field.id, &field.validation_rules);
    }

    let known_ids: BTreeSet<&str> = schema
        .fields
        .iter()
        .map(|f| f.id.as_str())
        .chain(schema.derived_fields.iter().map(|f| f.id.as_str()))
        .collect();

    for derived in &schema.derived_fields {
        check_field_kind(&mut findings, &derived.id, &derived.kind);
        check_rules(&mut findings, &derived.id, &derived.validation_rules);

        if derived.parent_fields.is_empty() {
            push(
                &mut findings,
                CheckLevel::Warning,
                "derived.parents.empty",
                format!("derived field {} has no parents; it always computes an empty value", derived.id),
            );
        }
        for parent in &derived.parent_fields {
            if parent == &derived.id {
                push(
                    &mut findings,
                    CheckLevel::Warning,
                    "derived.parent.self",
                    format!("derived field {} lists itself as a parent", derived.id),
                );
            } else if !known_ids.contains(parent.as_str()) {
                push(
                    &mut findings,
                    CheckLevel::Warning,
                    "derived.parent.unknown",
                    format!(
                        "derived field {} references unknown parent {parent}; its value is treated as absent",
                        derived.id
                    ),
                );
            }
        }
    }

    let ok = !findings.iter().any(|f| f.level == CheckLevel::Error);
    CheckReport { ok, findings }
}

fn check_field_kind(findings: &mut Vec<CheckFinding>, id: &str, kind: &FieldKind) {
    if let Some(options) = kind.options() {
        if options.is_empty() {
            push(
                findings,
                CheckLevel::Error,
                "field.options.empty",
                format!("{} field {id} has no options", kind.as_str()),
            );
        }
    }
}

fn check_default_value(findings: &mut Vec<CheckFinding>, field: &FieldDef) {
    let Some(default) = &field.default_value else {
        return;
    };

    let matches_kind = match &field.kind {
        FieldKind::Text | FieldKind::Textarea | FieldKind::Date => {
            matches!(default, Value::Text(_))
        }
        FieldKind::Number => matches!(default, Value::Number(_)),
        FieldKind::Checkbox => matches!(default, Value::Bool(_)),
        FieldKind::Select { options } | FieldKind::Radio { options } => {
            match default {
                Value::Text(s) => {
                    if !options.iter().any(|o| o == s) {
                        push(
                            findings,
                            CheckLevel::Warning,
                            "field.default.option",
                            format!("field {} defaults to {s:?}, which is not one of its options", field.id),
                        );
                    }
                    true
                }
                _ => false,
            }
        }
    };

    if !matches_kind {
        push(
            findings,
            CheckLevel::Warning,
            "field.default.type",
            format!(
                "field {} has a default value that does not match its {} type",
                field.id,
                field.kind.as_str()
            ),
        );
    }
}

fn check_rules(findings: &mut Vec<CheckFinding>, id: &str, rules: &[ValidationRule]) {
    let mut min_bound: Option<u32> = None;
    let mut max_bound: Option<u32> = None;

    for rule in rules {
        match rule.kind {
            RuleKind::MinLength | RuleKind::MaxLength => {
                let usable = matches!(rule.value, Some(b) if b > 0);
                if !usable {
                    push(
                        findings,
                        CheckLevel::Warning,
                        "rule.bound.missing",
                        format!(
                            "field {id} has a length rule without a usable bound; it never fails"
                        ),
                    );
                } else if rule.kind == RuleKind::MinLength {
                    min_bound = rule.value;
                } else {
                    max_bound = rule.value;
                }
            }
            RuleKind::Required => {
                // The base required flag already covers this; the entry is
                // kept for wire compatibility and contributes nothing.
                push(
                    findings,
                    CheckLevel::Info,
                    "rule.required.redundant",
                    format!("field {id} lists a required rule; required-ness is a field flag"),
                );
            }
            RuleKind::Email | RuleKind::Password => {}
        }
    }

    if let (Some(min), Some(max)) = (min_bound, max_bound) {
        if min > max {
            push(
                findings,
                CheckLevel::Warning,
                "rule.bounds.conflict",
                format!("field {id} requires at least {min} but at most {max} characters"),
            );
        }
    }
}
