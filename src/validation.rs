use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub violations: Vec<String>,
}

impl ValidationError {
    pub fn single(message: impl Into<String>) -> Self {
        ValidationError {
            violations: vec![message.into()],
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.violations.join(", "))
    }
}

impl std::error::Error for ValidationError {}

/// A request body type that can be built from untyped JSON, collecting every
/// violation instead of stopping at the first one.
pub trait InputSchema: Sized {
    fn from_json(value: &Value) -> Result<Self, ValidationError>;
}

/// Reads the fields of a JSON object one by one, recording violations.
///
/// Accessors return a placeholder value when the field is invalid, so a
/// schema can read all of its fields unconditionally and call
/// [`ObjectReader::finish`] at the end.
pub struct ObjectReader<'a> {
    map: &'a Map<String, Value>,
    known: Vec<&'static str>,
    violations: Vec<String>,
}

/// Whole numbers count as integers even when written as `2000.0`.
fn integer_value(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

impl<'a> ObjectReader<'a> {
    pub fn new(value: &'a Value) -> Result<Self, ValidationError> {
        match value {
            Value::Object(map) => Ok(ObjectReader {
                map,
                known: vec![],
                violations: vec![],
            }),
            _ => Err(ValidationError::single("request body must be a JSON object")),
        }
    }

    fn field(&mut self, name: &'static str) -> Option<&'a Value> {
        self.known.push(name);
        self.map.get(name)
    }

    pub fn required_string(&mut self, name: &'static str) -> String {
        match self.field(name) {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::String(_)) => {
                self.violations.push(format!("{} should not be empty", name));
                String::new()
            }
            None | Some(Value::Null) => {
                self.violations.push(format!("{} should not be empty", name));
                self.violations.push(format!("{} must be a string", name));
                String::new()
            }
            Some(_) => {
                self.violations.push(format!("{} must be a string", name));
                String::new()
            }
        }
    }

    /// Absent and `null` both read as `None`.
    pub fn optional_string(&mut self, name: &'static str) -> Option<String> {
        match self.field(name) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                self.violations.push(format!("{} must be a string", name));
                None
            }
        }
    }

    pub fn required_integer(&mut self, name: &'static str) -> i64 {
        match self.field(name).and_then(integer_value) {
            Some(n) => n,
            None => {
                self.violations
                    .push(format!("{} must be an integer number", name));
                0
            }
        }
    }

    pub fn required_bool(&mut self, name: &'static str) -> bool {
        match self.field(name) {
            Some(Value::Bool(b)) => *b,
            _ => {
                self.violations
                    .push(format!("{} must be a boolean value", name));
                false
            }
        }
    }

    /// Rejects unknown properties and returns `value` only if nothing was violated.
    pub fn finish<T>(mut self, value: T) -> Result<T, ValidationError> {
        for key in self.map.keys() {
            if !self.known.contains(&key.as_str()) {
                self.violations
                    .push(format!("property {} should not exist", key));
            }
        }
        if self.violations.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError {
                violations: self.violations,
            })
        }
    }
}
