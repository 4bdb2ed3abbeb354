//! Diff-based partial updates.
//!
//! A `FormSnapshot` is the last state the server is known to hold. `diff`
//! compares the live form values against it and yields a `Patch` with only
//! the changed keys. After a successful save the snapshot is replaced by
//! `merged`, never edited in place.

use serde_json::{Map, Value};

pub type Patch = Map<String, Value>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormSnapshot {
    values: Map<String, Value>,
}

impl FormSnapshot {
    pub fn new(values: Map<String, Value>) -> Self {
        Self { values }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    /// A new snapshot: this one with `patch` laid over it. Fields the patch
    /// does not mention keep their previous value.
    pub fn merged(&self, patch: &Patch) -> Self {
        let mut values = self.values.clone();
        for (key, value) in patch {
            values.insert(key.clone(), value.clone());
        }
        Self { values }
    }
}

/// Keys of `current` whose value differs from `snapshot`. A key the snapshot
/// lacks counts as changed.
pub fn diff(current: &Map<String, Value>, snapshot: &FormSnapshot) -> Patch {
    current
        .iter()
        .filter(|(key, value)| differs(value, snapshot.get(key)))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

fn differs(current: &Value, previous: Option<&Value>) -> bool {
    let Some(previous) = previous else {
        return true;
    };
    match (current, previous) {
        // Lists compare by their serialized form, so order matters.
        (Value::Array(_), Value::Array(_)) => {
            serde_json::to_string(current).ok() != serde_json::to_string(previous).ok()
        }
        // 4 and 4.0 are the same number to the form.
        (Value::Number(a), Value::Number(b)) => a.as_f64() != b.as_f64(),
        _ => current != previous,
    }
}
