/// Schema validation on top of `validator`, reporting failures the way the
/// document mapper does: `"<Model> validation failed: <path>: <message>, ..."`.
use std::borrow::Cow;
use std::cmp::Ordering;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

/// A single failed path, e.g. `steps.0.title`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{model} validation failed: {}", render(.errors))]
pub struct SchemaError {
    pub model: &'static str,
    pub errors: Vec<FieldError>,
}

fn render(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.path, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Declares the document model a payload validates as.
///
/// `FIELDS` maps Rust field names to document field names. Its order is the
/// schema order used when reporting several failures at once; nested fields
/// (like the members of an embedded step) are listed after their parents.
pub trait Schema: Validate {
    const MODEL: &'static str;
    const FIELDS: &'static [(&'static str, &'static str)];

    fn check(&self) -> Result<(), SchemaError> {
        self.validate()
            .map_err(|errors| SchemaError::from_validation(Self::MODEL, Self::FIELDS, &errors))
    }
}

impl SchemaError {
    pub fn from_validation(
        model: &'static str,
        fields: &[(&str, &str)],
        errors: &ValidationErrors,
    ) -> Self {
        let mut collected = Vec::new();
        collect(fields, "", errors, &mut collected);

        // A missing value outranks any other failure on the same path.
        collected.sort_by(|(a, a_required), (b, b_required)| {
            compare_paths(fields, &a.path, &b.path).then(b_required.cmp(a_required))
        });
        collected.dedup_by(|(b, _), (a, _)| a.path == b.path);

        Self {
            model,
            errors: collected.into_iter().map(|(error, _)| error).collect(),
        }
    }

    /// A uniqueness violation, raised by the store rather than the schema.
    pub fn unique(model: &'static str, path: &str, value: &str) -> Self {
        Self {
            model,
            errors: vec![FieldError {
                path: path.to_string(),
                message: format!("Error, expected `{path}` to be unique. Value: `{value}`"),
            }],
        }
    }
}

/// A number field after casting the raw JSON value. Numbers, numeric strings
/// and booleans become numbers; anything else is kept for the error message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Numeric {
    Value(f64),
    Uncastable(Value),
}

impl Numeric {
    /// `None` for `null` and blank strings, which count as missing.
    fn cast(raw: Value) -> Option<Self> {
        match raw {
            Value::Null => None,
            Value::Bool(b) => Some(Numeric::Value(if b { 1.0 } else { 0.0 })),
            Value::Number(n) => Some(match n.as_f64() {
                Some(f) => Numeric::Value(f),
                None => Numeric::Uncastable(Value::Number(n)),
            }),
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => match s.trim().parse::<f64>() {
                Ok(f) if f.is_finite() => Some(Numeric::Value(f)),
                _ => Some(Numeric::Uncastable(Value::String(s))),
            },
            other => Some(Numeric::Uncastable(other)),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Numeric::Value(f) => Some(*f),
            Numeric::Uncastable(_) => None,
        }
    }

    /// Fails with `cast`, `range` (carrying `min`/`max`) or `integer`.
    pub fn check_integer_range(&self, min: i64, max: i64) -> Result<(), ValidationError> {
        let Some(value) = self.as_f64() else {
            return Err(ValidationError::new("cast"));
        };

        if value < min as f64 || value > max as f64 {
            let mut error = ValidationError::new("range");
            error.add_param(Cow::from("min"), &min);
            error.add_param(Cow::from("max"), &max);
            return Err(error);
        }
        if value.fract() != 0.0 {
            return Err(ValidationError::new("integer"));
        }
        Ok(())
    }
}

/// `deserialize_with` helper for `Option<Numeric>` fields.
pub fn cast_number<'de, D>(deserializer: D) -> Result<Option<Numeric>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(Numeric::cast))
}

fn document_name<'a>(fields: &[(&'a str, &'a str)], name: &'a str) -> &'a str {
    fields
        .iter()
        .find(|(rust, doc)| *rust == name || *doc == name)
        .map(|(_, doc)| *doc)
        .unwrap_or(name)
}

fn collect(
    fields: &[(&str, &str)],
    prefix: &str,
    errors: &ValidationErrors,
    out: &mut Vec<(FieldError, bool)>,
) {
    for (field, kind) in errors.errors() {
        let field = field.to_string();
        let name = document_name(fields, &field);
        let path = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}.{name}")
        };

        match kind {
            ValidationErrorsKind::Field(list) => {
                out.extend(list.iter().map(|error| {
                    let field_error = FieldError {
                        path: path.clone(),
                        message: describe(name, error),
                    };
                    (field_error, error.code == "required")
                }));
            }
            ValidationErrorsKind::Struct(inner) => collect(fields, &path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(fields, &format!("{path}.{index}"), inner, out);
                }
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Segment {
    Field(usize),
    Index(usize),
}

fn segments(fields: &[(&str, &str)], path: &str) -> Vec<Segment> {
    path.split('.')
        .map(|part| match part.parse::<usize>() {
            Ok(index) => Segment::Index(index),
            Err(_) => Segment::Field(
                fields
                    .iter()
                    .position(|(_, doc)| *doc == part)
                    .unwrap_or(usize::MAX),
            ),
        })
        .collect()
}

fn compare_paths(fields: &[(&str, &str)], a: &str, b: &str) -> Ordering {
    segments(fields, a)
        .cmp(&segments(fields, b))
        .then_with(|| a.cmp(b))
}

fn describe(name: &str, error: &ValidationError) -> String {
    let param = |key: &str| error.params.get(key);

    match error.code.as_ref() {
        "required" => format!("Path `{name}` is required."),
        "range" => {
            let value = param("value");
            let above = value
                .zip(param("max"))
                .and_then(|(v, max)| Some(v.as_f64()? > max.as_f64()?))
                .unwrap_or(false);
            let below = value
                .zip(param("min"))
                .and_then(|(v, min)| Some(v.as_f64()? < min.as_f64()?))
                .unwrap_or(false);

            match (value, above, below) {
                (Some(v), true, _) => format!(
                    "Path `{name}` ({}) is more than maximum allowed value ({}).",
                    display_value(v),
                    param("max").map(display_value).unwrap_or_default()
                ),
                (Some(v), _, true) => format!(
                    "Path `{name}` ({}) is less than minimum allowed value ({}).",
                    display_value(v),
                    param("min").map(display_value).unwrap_or_default()
                ),
                _ => format!("Path `{name}` is out of range."),
            }
        }
        "cast" => format!(
            "Cast to Number failed for value \"{}\" at path \"{name}\"",
            param("value").map(display_value).unwrap_or_default()
        ),
        "integer" => format!(
            "Path `{name}` ({}) is not an integer.",
            param("value").map(display_value).unwrap_or_default()
        ),
        "email" => match param("value") {
            Some(v) => format!("Path `{name}` is invalid ({}).", display_value(v)),
            None => format!("Path `{name}` is invalid."),
        },
        _ => match &error.message {
            Some(message) => message.to_string(),
            None => format!("Validator failed for path `{name}`"),
        },
    }
}

/// Renders a parameter the way it was written: `20`, not `20.0` or `"20"`.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(f)) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}
