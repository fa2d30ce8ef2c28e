//! Request-body binding for person payloads.
//!
//! Binding is lenient per field: a property whose value cannot be converted
//! leaves its field at the default and is recorded as a [`FieldError`], while
//! the rest of the payload still binds. Only a body that is not a JSON object
//! at all counts as an absent payload.

use serde_json::{Map, Value};

use super::model::PersonInfo;

/// A property value that could not be converted to its field's type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// A person payload together with the field errors found while binding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundPerson {
    pub person: PersonInfo,
    pub errors: Vec<FieldError>,
}

impl BoundPerson {
    /// True when every present property converted cleanly.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// True when `field` failed to convert.
    pub fn has_error_on(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

/// Binds a raw request body to a person payload.
///
/// Returns `None` for an empty body, malformed JSON, `null`, or any JSON
/// value other than an object.
pub fn bind_person(body: &[u8]) -> Option<BoundPerson> {
    if body.is_empty() {
        return None;
    }

    match serde_json::from_slice::<Value>(body).ok()? {
        Value::Object(map) => Some(bind_object(&map)),
        _ => None,
    }
}

/// Binds a path segment to a person id. Unparseable input binds to `0`.
pub fn bind_route_id(raw: &str) -> i32 {
    raw.trim().parse().unwrap_or_default()
}

fn bind_object(map: &Map<String, Value>) -> BoundPerson {
    let mut person = PersonInfo::default();
    let mut errors = Vec::new();

    for (key, value) in map {
        match key.to_ascii_lowercase().as_str() {
            "id" => bind_int("ID", value, &mut person.id, &mut errors),
            "firstname" => bind_text("FirstName", value, &mut person.first_name, &mut errors),
            "lastname" => bind_text("LastName", value, &mut person.last_name, &mut errors),
            "gender" => bind_text("Gender", value, &mut person.gender, &mut errors),
            "age" => bind_int("Age", value, &mut person.age, &mut errors),
            _ => {}
        }
    }

    BoundPerson { person, errors }
}

fn bind_int(field: &'static str, value: &Value, slot: &mut i32, errors: &mut Vec<FieldError>) {
    let converted = match value {
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    };

    match converted {
        Some(n) => *slot = n,
        None => errors.push(FieldError {
            field,
            message: format!("could not convert {value} to a 32-bit integer"),
        }),
    }
}

fn bind_text(
    field: &'static str,
    value: &Value,
    slot: &mut Option<String>,
    errors: &mut Vec<FieldError>,
) {
    match value {
        Value::Null => *slot = None,
        Value::String(s) => *slot = Some(s.clone()),
        Value::Number(n) => *slot = Some(n.to_string()),
        Value::Bool(b) => *slot = Some(b.to_string()),
        Value::Array(_) | Value::Object(_) => errors.push(FieldError {
            field,
            message: "expected a string".to_string(),
        }),
    }
}
