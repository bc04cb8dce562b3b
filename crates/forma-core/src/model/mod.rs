//! FORMA data models.
//!
//! This module defines the strongly-typed representations for form schemas:
//! field definitions, derived-field definitions, validation rules, runtime
//! values, and the data snapshot of an in-progress form instance.
//!
//! Design goals:
//! - **Dumb data:** models carry no behavior beyond accessors. The engine
//!   (`crate::engine`), the checker (`crate::check`), and the editing
//!   operations (`crate::builder`) apply all policy.
//! - **Stable wire format:** serde names match the persisted JSON format
//!   (`type`, `defaultValue`, `validationRules`, `parentFields`, ...).
//!   Schemas written by earlier builds must keep loading.
//! - **Deterministic iteration:** snapshots are `BTreeMap`s so that
//!   serialized output and digests never depend on hash ordering.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A runtime form value.
///
/// Absence is represented by the missing snapshot entry (or `None` at API
/// boundaries), not by a variant. JSON `null` collapses to absent when a
/// snapshot is ingested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Value {
    /// Numeric view. Only `Number` values are numeric; numeric-looking
    /// strings are not coerced.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// True for the empty string. Absence is a missing entry, so "blank"
    /// at the API boundary is `None` or an empty `Text`.
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Value::Text(s) if s.is_empty())
    }

    /// Render the value the way it would appear inside a concatenated
    /// string: numbers drop a trailing `.0`, booleans are `true`/`false`.
    pub fn to_display(&self) -> String {
        match self {
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Text(s) => s.clone(),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// The current mapping of field id to value for one form instance.
///
/// Created empty or seeded from [`FormSchema::default_snapshot`], mutated on
/// every user edit and by the recomputation pass. The Validator never
/// mutates it.
pub type Snapshot = BTreeMap<String, Value>;

/// The type of a field. Determines what shape the value takes.
///
/// Options exist exactly for the choice-like variants; the type makes the
/// invariant unrepresentable elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Number,
    Textarea,
    Select { options: Vec<String> },
    Radio { options: Vec<String> },
    Checkbox,
    Date,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Textarea => "textarea",
            FieldKind::Select { .. } => "select",
            FieldKind::Radio { .. } => "radio",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Date => "date",
        }
    }

    /// Choice-like kinds carry an options list.
    pub fn options(&self) -> Option<&[String]> {
        match self {
            FieldKind::Select { options } | FieldKind::Radio { options } => Some(options),
            _ => None,
        }
    }
}

/// A single validation rule attached to a field.
///
/// `value` is the numeric bound and is meaningful for the length rules only.
/// An empty `message` means the Validator synthesizes a default from the
/// field label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    #[serde(rename = "type")]
    pub kind: RuleKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u32>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleKind {
    Required,
    MinLength,
    MaxLength,
    Email,
    Password,
}

impl ValidationRule {
    pub fn required() -> Self {
        Self { kind: RuleKind::Required, value: None, message: String::new() }
    }

    pub fn min_length(bound: u32) -> Self {
        Self { kind: RuleKind::MinLength, value: Some(bound), message: String::new() }
    }

    pub fn max_length(bound: u32) -> Self {
        Self { kind: RuleKind::MaxLength, value: Some(bound), message: String::new() }
    }

    pub fn email() -> Self {
        Self { kind: RuleKind::Email, value: None, message: String::new() }
    }

    pub fn password() -> Self {
        Self { kind: RuleKind::Password, value: None, message: String::new() }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

/// A base field. Its value comes directly from user input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDef {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default)]
    pub validation_rules: Vec<ValidationRule>,
}

/// A derived field. Its value is computed from parent fields via a formula.
///
/// `parent_fields` order matters: it drives concatenation order and the
/// first-parent fallback. Entries should reference existing field ids, but
/// the engine tolerates dangling references by treating the value as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedFieldDef {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub validation_rules: Vec<ValidationRule>,
    #[serde(default)]
    pub parent_fields: Vec<String>,
    #[serde(default)]
    pub formula: String,
}

/// A named, persistable form schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
    #[serde(default)]
    pub derived_fields: Vec<DerivedFieldDef>,
    /// RFC 3339 timestamp, stamped by the store on first save. Empty until
    /// then.
    #[serde(default)]
    pub created_at: String,
}

impl FormSchema {
    /// A fresh, empty schema with a generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            fields: Vec::new(),
            derived_fields: Vec::new(),
            created_at: String::new(),
        }
    }

    pub fn from_json_str(raw: &str) -> crate::FormaResult<Self> {
        serde_json::from_str(raw)
            .map_err(|e| crate::FormaError::serialization(format!("invalid schema json: {e}")))
    }

    pub fn to_json_string(&self) -> crate::FormaResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| crate::FormaError::serialization(format!("failed to serialize schema: {e}")))
    }

    /// All fields, base then derived, in declared order.
    pub fn all_fields(&self) -> Vec<FieldHandle<'_>> {
        self.fields
            .iter()
            .map(FieldHandle::Base)
            .chain(self.derived_fields.iter().map(FieldHandle::Derived))
            .collect()
    }

    pub fn field(&self, id: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn derived_field(&self, id: &str) -> Option<&DerivedFieldDef> {
        self.derived_fields.iter().find(|f| f.id == id)
    }

    /// Seed a snapshot from declared default values. Fields without a
    /// default stay absent; derived fields are filled in by the
    /// recomputation pass.
    pub fn default_snapshot(&self) -> Snapshot {
        let mut snapshot = Snapshot::new();
        for field in &self.fields {
            if let Some(value) = &field.default_value {
                snapshot.insert(field.id.clone(), value.clone());
            }
        }
        snapshot
    }
}

/// A borrowed view over a base or derived field.
///
/// The Validator and submit pass treat both kinds uniformly; this handle
/// exposes the shared attributes without cloning.
#[derive(Debug, Clone, Copy)]
pub enum FieldHandle<'a> {
    Base(&'a FieldDef),
    Derived(&'a DerivedFieldDef),
}

impl<'a> FieldHandle<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            FieldHandle::Base(f) => &f.id,
            FieldHandle::Derived(f) => &f.id,
        }
    }

    pub fn label(&self) -> &'a str {
        match self {
            FieldHandle::Base(f) => &f.label,
            FieldHandle::Derived(f) => &f.label,
        }
    }

    pub fn required(&self) -> bool {
        match self {
            FieldHandle::Base(f) => f.required,
            FieldHandle::Derived(f) => f.required,
        }
    }

    pub fn validation_rules(&self) -> &'a [ValidationRule] {
        match self {
            FieldHandle::Base(f) => &f.validation_rules,
            FieldHandle::Derived(f) => &f.validation_rules,
        }
    }

    pub fn is_derived(&self) -> bool {
        matches!(self, FieldHandle::Derived(_))
    }
}

impl<'a> From<&'a FieldDef> for FieldHandle<'a> {
    fn from(f: &'a FieldDef) -> Self {
        FieldHandle::Base(f)
    }
}

impl<'a> From<&'a DerivedFieldDef> for FieldHandle<'a> {
    fn from(f: &'a DerivedFieldDef) -> Self {
        FieldHandle::Derived(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_kind_serializes_tagged() {
        let kind = FieldKind::Select {
            options: vec!["Red".to_string(), "Blue".to_string()],
        };
        let json = serde_json::to_string(&kind).unwrap();
        assert!(json.contains("\"kind\":\"select\""));
        assert!(json.contains("\"options\""));

        let parsed: FieldKind = serde_json::from_str(&json).unwrap();
        assert_eq!(kind, parsed);
    }

    #[test]
    fn field_def_uses_wire_names() {
        let field = FieldDef {
            id: "f1".to_string(),
            kind: FieldKind::Text,
            label: "First name".to_string(),
            required: true,
            default_value: Some(Value::from("Jane")),
            validation_rules: vec![ValidationRule::min_length(2)],
        };
        let json = serde_json::to_string(&field).unwrap();
        assert!(json.contains("\"type\""));
        assert!(json.contains("\"defaultValue\""));
        assert!(json.contains("\"validationRules\""));
        assert!(json.contains("\"minLength\""));
        assert!(!json.contains("default_value"));

        let parsed: FieldDef = serde_json::from_str(&json).unwrap();
        assert_eq!(field, parsed);
    }

    #[test]
    fn derived_field_round_trips() {
        let field = DerivedFieldDef {
            id: "d1".to_string(),
            kind: FieldKind::Text,
            label: "Full name".to_string(),
            required: false,
            validation_rules: vec![],
            parent_fields: vec!["f1".to_string(), "f2".to_string()],
            formula: "concat".to_string(),
        };
        let json = serde_json::to_string(&field).unwrap();
        assert!(json.contains("\"parentFields\""));

        let parsed: DerivedFieldDef = serde_json::from_str(&json).unwrap();
        assert_eq!(field, parsed);
    }

    #[test]
    fn value_is_untagged() {
        let parsed: Value = serde_json::from_str("5").unwrap();
        assert_eq!(parsed, Value::Number(5.0));

        let parsed: Value = serde_json::from_str("true").unwrap();
        assert_eq!(parsed, Value::Bool(true));

        let parsed: Value = serde_json::from_str("\"x\"").unwrap();
        assert_eq!(parsed, Value::Text("x".to_string()));
    }

    #[test]
    fn value_display_matches_form_output() {
        assert_eq!(Value::Number(5.0).to_display(), "5");
        assert_eq!(Value::Number(5.5).to_display(), "5.5");
        assert_eq!(Value::Bool(false).to_display(), "false");
        assert_eq!(Value::Text("abc".to_string()).to_display(), "abc");
    }

    #[test]
    fn default_snapshot_seeds_only_declared_defaults() {
        let mut schema = FormSchema::new("demo");
        schema.fields.push(FieldDef {
            id: "a".to_string(),
            kind: FieldKind::Text,
            label: "A".to_string(),
            required: false,
            default_value: Some(Value::from("hello")),
            validation_rules: vec![],
        });
        schema.fields.push(FieldDef {
            id: "b".to_string(),
            kind: FieldKind::Number,
            label: "B".to_string(),
            required: false,
            default_value: None,
            validation_rules: vec![],
        });

        let snapshot = schema.default_snapshot();
        assert_eq!(snapshot.get("a"), Some(&Value::from("hello")));
        assert!(!snapshot.contains_key("b"));
    }

    #[test]
    fn all_fields_keeps_declared_order() {
        let mut schema = FormSchema::new("demo");
        schema.fields.push(FieldDef {
            id: "a".to_string(),
            kind: FieldKind::Text,
            label: "A".to_string(),
            required: false,
            default_value: None,
            validation_rules: vec![],
        });
        schema.derived_fields.push(DerivedFieldDef {
            id: "d".to_string(),
            kind: FieldKind::Text,
            label: "D".to_string(),
            required: false,
            validation_rules: vec![],
            parent_fields: vec!["a".to_string()],
            formula: String::new(),
        });

        let all = schema.all_fields();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id(), "a");
        assert!(!all[0].is_derived());
        assert_eq!(all[1].id(), "d");
        assert!(all[1].is_derived());
    }
}
