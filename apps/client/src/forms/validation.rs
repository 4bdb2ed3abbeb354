//! Declarative field validation.
//!
//! A form is described once as a list of `FieldSpec`s. Every change to a
//! field re-runs that field's validator immediately, so the error map never
//! lags the values. Submission re-checks every field and the required set.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::errors::ClientError;

/// Pure check of one field value: an error message, or an empty string.
pub type Validate = fn(&Value) -> String;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    List,
    Number,
}

impl FieldKind {
    fn empty_value(self) -> Value {
        match self {
            FieldKind::Text => Value::String(String::new()),
            FieldKind::List => Value::Array(Vec::new()),
            FieldKind::Number => Value::Null,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub validate: Option<Validate>,
}

impl FieldSpec {
    pub const fn required(name: &'static str, label: &'static str, validate: Validate) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Text,
            required: true,
            validate: Some(validate),
        }
    }

    /// Required, with no check beyond being non-empty.
    pub const fn present(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Text,
            required: true,
            validate: None,
        }
    }

    pub const fn optional(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Text,
            required: false,
            validate: None,
        }
    }

    pub const fn of_kind(self, kind: FieldKind) -> Self {
        Self { kind, ..self }
    }

    pub const fn checked(self, validate: Validate) -> Self {
        Self {
            validate: Some(validate),
            ..self
        }
    }

    pub fn check(&self, value: &Value) -> String {
        self.validate.map(|f| f(value)).unwrap_or_default()
    }
}

/// Field name → message. An empty (or absent) message means the field is clean.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn get(&self, field: &str) -> &str {
        self.0.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: &str, message: String) {
        self.0.insert(field.to_string(), message);
    }

    pub fn is_clean(&self) -> bool {
        self.0.values().all(String::is_empty)
    }

    /// Non-empty messages in field order.
    pub fn messages(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter(|(_, m)| !m.is_empty())
            .map(|(f, m)| (f.as_str(), m.as_str()))
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.messages() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct FormSchema {
    fields: Vec<FieldSpec>,
}

impl FormSchema {
    pub fn new(fields: impl Into<Vec<FieldSpec>>) -> Self {
        Self {
            fields: fields.into(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }
}

/// Values plus live per-field errors for one form.
#[derive(Debug, Clone)]
pub struct FormState {
    schema: FormSchema,
    values: Map<String, Value>,
    errors: FieldErrors,
}

impl FormState {
    pub fn new(schema: FormSchema) -> Self {
        let values = schema
            .fields()
            .iter()
            .map(|f| (f.name.to_string(), f.kind.empty_value()))
            .collect();
        Self {
            schema,
            values,
            errors: FieldErrors::default(),
        }
    }

    /// Stores `value` and synchronously recomputes that field's error, which
    /// is returned. Names outside the schema are ignored.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> &str {
        let Some(spec) = self.schema.field(field).copied() else {
            debug!("Ignoring value for unknown field '{field}'");
            return "";
        };
        let value = value.into();
        self.errors.set(field, spec.check(&value));
        self.values.insert(field.to_string(), value);
        self.errors.get(field)
    }

    pub fn value(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    pub fn text(&self, field: &str) -> &str {
        self.values.get(field).and_then(Value::as_str).unwrap_or("")
    }

    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Swaps the schema (e.g. a field becoming required), keeping the values
    /// the new schema still knows about.
    pub fn reshape(&mut self, schema: FormSchema) {
        let mut next = FormState::new(schema);
        for (name, value) in &self.values {
            if next.schema.field(name).is_some() {
                next.values.insert(name.clone(), value.clone());
            }
        }
        *self = next;
    }

    /// Replaces every value wholesale and re-runs each field's validator, so
    /// loaded values are flagged the same way typed ones are.
    pub fn reset(&mut self, values: Map<String, Value>) {
        self.values = values;
        self.errors.clear();
        for spec in self.schema.fields() {
            let value = self.values.get(spec.name).unwrap_or(&Value::Null);
            self.errors.set(spec.name, spec.check(value));
        }
    }

    pub fn clear(&mut self) {
        *self = FormState::new(self.schema.clone());
    }

    /// Re-runs every validator, refreshes the error map, and refuses if any
    /// field reports a message or a required field is empty.
    pub fn validate_for_submit(&mut self) -> Result<(), ClientError> {
        for spec in self.schema.fields() {
            let value = self.values.get(spec.name).unwrap_or(&Value::Null);
            let mut message = spec.check(value);
            if message.is_empty() && spec.required && is_empty(value) {
                message = format!("{} is required", spec.label);
            }
            self.errors.set(spec.name, message);
        }
        if self.errors.is_clean() {
            Ok(())
        } else {
            debug!("Submission blocked: {}", self.errors);
            Err(ClientError::Validation(self.errors.clone()))
        }
    }
}

pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        _ => false,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// String predicates
// ────────────────────────────────────────────────────────────────────────────

/// `local@domain.tld`: no whitespace, exactly one `@`, and a dot in the domain
/// with something on both sides of it.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

const PASSWORD_SPECIALS: &str = "@$!%*?&";

/// At least 8 characters drawn from letters, digits and `@$!%*?&`, with at
/// least one of each: lowercase, uppercase, digit, special.
pub fn is_strong_password(password: &str) -> bool {
    let allowed = |c: char| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c);
    password.chars().count() >= 8
        && password.chars().all(allowed)
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

pub fn is_ten_digit_phone(phone: &str) -> bool {
    phone.len() == 10 && phone.chars().all(|c| c.is_ascii_digit())
}

fn text_of(value: &Value) -> &str {
    value.as_str().unwrap_or("")
}

fn message_unless(ok: bool, message: &str) -> String {
    if ok {
        String::new()
    } else {
        message.to_string()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Field validators shared by the forms
// ────────────────────────────────────────────────────────────────────────────

pub const PASSWORD_RULE: &str =
    "Password must be at least 8 characters, include uppercase, lowercase, number & special character";

pub fn email_format(value: &Value) -> String {
    message_unless(is_valid_email(text_of(value)), "Invalid email format")
}

pub fn strong_password(value: &Value) -> String {
    message_unless(is_strong_password(text_of(value)), PASSWORD_RULE)
}

pub fn ten_digit_phone(value: &Value) -> String {
    message_unless(is_ten_digit_phone(text_of(value)), "Phone must be 10 digits")
}

/// Optional number: null, empty, or anything that reads as a finite number.
pub fn optional_number(value: &Value) -> String {
    let ok = match value {
        Value::Null | Value::Number(_) => true,
        Value::String(s) => {
            s.trim().is_empty() || s.trim().parse::<f64>().is_ok_and(f64::is_finite)
        }
        _ => false,
    };
    message_unless(ok, "Must be a number")
}
