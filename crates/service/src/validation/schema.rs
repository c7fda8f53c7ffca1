//! Declarative object schemas.
//!
//! A [`Schema`] is plain data: an ordered list of [`Field`]s, each with a type,
//! presence rule, transforms, constraint rules and an optional default.
//! Validation turns untyped JSON into a normalized object holding only the
//! declared fields, or fails with one [`FieldIssue`] per failed constraint in
//! declaration order.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::errors::{AppError, FieldIssue, VALIDATION_FAILED};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Boolean,
    Integer,
    /// RFC 3339 string, `YYYY-MM-DD`, or unix milliseconds; normalized to RFC 3339.
    Date,
    StringList,
}

impl FieldType {
    fn expected(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Boolean => "boolean",
            FieldType::Integer => "integer",
            FieldType::Date => "date",
            FieldType::StringList => "array",
        }
    }
}

/// Applied to string values (and list items) before any rule runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    Trim,
    Lowercase,
}

#[derive(Debug, Clone)]
pub enum Rule {
    MinLength(usize),
    MaxLength(usize),
    Pattern { regex: Regex, message: &'static str },
    OneOf(&'static [&'static str]),
    Min(i64),
    /// Every list item must be non-empty after transforms.
    NonEmptyItems,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldDefault {
    Value(Value),
    /// Current time, rendered as RFC 3339.
    Now,
}

impl FieldDefault {
    fn materialize(&self) -> Value {
        match self {
            FieldDefault::Value(v) => v.clone(),
            FieldDefault::Now => Value::String(Utc::now().to_rfc3339()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Field {
    name: &'static str,
    label: Option<&'static str>,
    ty: FieldType,
    required: bool,
    transforms: Vec<Transform>,
    rules: Vec<Rule>,
    default: Option<FieldDefault>,
}

impl Field {
    fn of(name: &'static str, ty: FieldType) -> Self {
        Self { name, label: None, ty, required: true, transforms: Vec::new(), rules: Vec::new(), default: None }
    }

    pub fn string(name: &'static str) -> Self { Self::of(name, FieldType::String) }
    pub fn boolean(name: &'static str) -> Self { Self::of(name, FieldType::Boolean) }
    pub fn integer(name: &'static str) -> Self { Self::of(name, FieldType::Integer) }
    pub fn date(name: &'static str) -> Self { Self::of(name, FieldType::Date) }
    pub fn string_list(name: &'static str) -> Self { Self::of(name, FieldType::StringList) }

    pub fn label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn trim(mut self) -> Self {
        self.transforms.push(Transform::Trim);
        self
    }

    pub fn lowercase(mut self) -> Self {
        self.transforms.push(Transform::Lowercase);
        self
    }

    pub fn min_len(mut self, n: usize) -> Self {
        self.rules.push(Rule::MinLength(n));
        self
    }

    pub fn max_len(mut self, n: usize) -> Self {
        self.rules.push(Rule::MaxLength(n));
        self
    }

    pub fn pattern(mut self, regex: &Regex, message: &'static str) -> Self {
        self.rules.push(Rule::Pattern { regex: regex.clone(), message });
        self
    }

    pub fn one_of(mut self, allowed: &'static [&'static str]) -> Self {
        self.rules.push(Rule::OneOf(allowed));
        self
    }

    pub fn min(mut self, n: i64) -> Self {
        self.rules.push(Rule::Min(n));
        self
    }

    pub fn non_empty_items(mut self) -> Self {
        self.rules.push(Rule::NonEmptyItems);
        self
    }

    /// A field with a default is never reported missing.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(FieldDefault::Value(value.into()));
        self
    }

    pub fn default_now(mut self) -> Self {
        self.default = Some(FieldDefault::Now);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn display_label(&self) -> String {
        match self.label {
            Some(l) => l.to_string(),
            None => {
                let mut chars = self.name.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Full,
    Partial,
}

#[derive(Debug, Clone)]
pub struct Schema {
    name: &'static str,
    fields: Vec<Field>,
    mode: Mode,
}

impl Schema {
    pub fn new(name: &'static str, fields: Vec<Field>) -> Self {
        Self { name, fields, mode: Mode::Full }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn is_partial(&self) -> bool {
        self.mode == Mode::Partial
    }

    /// Every field optional, no defaults applied, same rules when a value is
    /// present. `null` and blank strings pass through untouched so the update
    /// filter can drop them.
    pub fn partial(&self) -> Schema {
        let fields = self
            .fields
            .iter()
            .cloned()
            .map(|mut f| {
                f.required = false;
                f.default = None;
                f
            })
            .collect();
        Schema { name: self.name, fields, mode: Mode::Partial }
    }

    /// Validate `input` and return the normalized object.
    pub fn validate(&self, input: &Value) -> Result<Map<String, Value>, AppError> {
        let obj = input.as_object().ok_or_else(|| {
            AppError::invalid_field("body", format!("Expected object, received {}", type_name(input)))
        })?;

        let mut out = Map::new();
        let mut issues = Vec::new();
        for field in &self.fields {
            match obj.get(field.name) {
                None | Some(Value::Null) if self.mode == Mode::Partial => {
                    if let Some(v) = obj.get(field.name) {
                        out.insert(field.name.to_string(), v.clone());
                    }
                }
                None | Some(Value::Null) => match &field.default {
                    Some(d) => {
                        out.insert(field.name.to_string(), d.materialize());
                    }
                    None if field.required => {
                        issues.push(FieldIssue::new(field.name, format!("{} is required", field.display_label())));
                    }
                    None => {}
                },
                Some(Value::String(s)) if self.mode == Mode::Partial && s.trim().is_empty() => {
                    out.insert(field.name.to_string(), Value::String(s.clone()));
                }
                Some(value) => {
                    if let Some(v) = check_field(field, value, &mut issues) {
                        out.insert(field.name.to_string(), v);
                    }
                }
            }
        }

        if issues.is_empty() {
            Ok(out)
        } else {
            Err(AppError::validation(VALIDATION_FAILED, issues))
        }
    }

    /// Validate and deserialize into a typed value.
    pub fn parse<T: DeserializeOwned>(&self, input: &Value) -> Result<T, AppError> {
        let map = self.validate(input)?;
        from_object(self.name, map)
    }
}

/// Deserialize an already-validated object; a mismatch here is a bug in the
/// schema/type pairing, not bad input.
pub(crate) fn from_object<T: DeserializeOwned>(schema: &str, map: Map<String, Value>) -> Result<T, AppError> {
    serde_json::from_value(Value::Object(map))
        .map_err(|e| AppError::system(format!("schema `{schema}` produced an undecodable value: {e}")))
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn type_issue(field: &Field, value: &Value) -> FieldIssue {
    FieldIssue::new(
        field.name,
        format!("Expected {}, received {}", field.ty.expected(), type_name(value)),
    )
}

fn apply_transforms(field: &Field, s: &str) -> String {
    field.transforms.iter().fold(s.to_string(), |acc, t| match t {
        Transform::Trim => acc.trim().to_string(),
        Transform::Lowercase => acc.to_lowercase(),
    })
}

/// Returns the normalized value, or `None` after recording issues.
fn check_field(field: &Field, value: &Value, issues: &mut Vec<FieldIssue>) -> Option<Value> {
    let before = issues.len();
    let normalized = match field.ty {
        FieldType::String => {
            let Some(s) = value.as_str() else {
                issues.push(type_issue(field, value));
                return None;
            };
            let s = apply_transforms(field, s);
            check_string_rules(field, field.name, &s, issues);
            Value::String(s)
        }
        FieldType::Boolean => {
            if !value.is_boolean() {
                issues.push(type_issue(field, value));
                return None;
            }
            value.clone()
        }
        FieldType::Integer => {
            let Some(n) = value.as_i64() else {
                issues.push(type_issue(field, value));
                return None;
            };
            for rule in &field.rules {
                if let Rule::Min(min) = rule {
                    if n < *min {
                        issues.push(FieldIssue::new(
                            field.name,
                            format!("{} must be greater than or equal to {}", field.display_label(), min),
                        ));
                    }
                }
            }
            Value::from(n)
        }
        FieldType::Date => match coerce_date(value) {
            Some(dt) => Value::String(dt.to_rfc3339()),
            None => {
                issues.push(FieldIssue::new(field.name, format!("{} must be a valid date", field.display_label())));
                return None;
            }
        },
        FieldType::StringList => {
            let Some(items) = value.as_array() else {
                issues.push(type_issue(field, value));
                return None;
            };
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                let path = format!("{}.{}", field.name, i);
                let Some(s) = item.as_str() else {
                    issues.push(FieldIssue::new(path, format!("Expected string, received {}", type_name(item))));
                    continue;
                };
                let s = apply_transforms(field, s);
                if field.rules.iter().any(|r| matches!(r, Rule::NonEmptyItems)) && s.is_empty() {
                    issues.push(FieldIssue::new(path, format!("{} entries must not be empty", field.display_label())));
                }
                out.push(Value::String(s));
            }
            Value::Array(out)
        }
    };
    (issues.len() == before).then_some(normalized)
}

fn check_string_rules(field: &Field, path: &str, s: &str, issues: &mut Vec<FieldIssue>) {
    let len = s.chars().count();
    let label = field.display_label();
    for rule in &field.rules {
        match rule {
            Rule::MinLength(n) if len < *n => {
                issues.push(FieldIssue::new(path, format!("{label} must be at least {n} characters")));
            }
            Rule::MaxLength(n) if len > *n => {
                issues.push(FieldIssue::new(path, format!("{label} must be at most {n} characters")));
            }
            Rule::Pattern { regex, message } if !regex.is_match(s) => {
                issues.push(FieldIssue::new(path, *message));
            }
            Rule::OneOf(allowed) if !allowed.iter().any(|a| *a == s) => {
                issues.push(FieldIssue::new(path, format!("{label} must be one of: {}", allowed.join(", "))));
            }
            _ => {}
        }
    }
}

fn coerce_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|naive| Utc.from_utc_datetime(&naive))
        }
        Value::Number(n) => n.as_i64().and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use serde_json::json;

    static CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{3}$").unwrap());

    fn sample() -> Schema {
        Schema::new(
            "sample",
            vec![
                Field::string("title").trim().min_len(3).max_len(10),
                Field::string("code").optional().pattern(&CODE, "Code must be three capitals"),
                Field::string("kind").lowercase().one_of(&["alpha", "beta"]),
                Field::integer("count").min(0).default_value(0),
                Field::boolean("flag").default_value(false),
                Field::date("when").default_now(),
                Field::string_list("tags").trim().non_empty_items(),
            ],
        )
    }

    #[test]
    fn applies_defaults_and_strips_unknown_keys() {
        let out = sample()
            .validate(&json!({"title": "  Hello ", "kind": "ALPHA", "tags": ["a"], "extra": 1}))
            .unwrap();
        assert_eq!(out["title"], "Hello");
        assert_eq!(out["kind"], "alpha");
        assert_eq!(out["count"], 0);
        assert_eq!(out["flag"], false);
        assert!(DateTime::parse_from_rfc3339(out["when"].as_str().unwrap()).is_ok());
        assert!(!out.contains_key("extra"));
        assert!(!out.contains_key("code"));
    }

    #[test]
    fn issues_follow_declaration_order() {
        let err = sample()
            .validate(&json!({"title": "x", "code": "abc", "kind": "gamma", "count": -1, "tags": ["ok", " "]}))
            .unwrap_err();
        let fields: Vec<&str> = err.field_issues().iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, vec!["title", "code", "kind", "count", "tags.1"]);
        assert_eq!(err.field_issues()[0].message, "Title must be at least 3 characters");
        assert_eq!(err.field_issues()[1].message, "Code must be three capitals");
    }

    #[test]
    fn missing_required_and_wrong_types() {
        let err = sample().validate(&json!({"title": 5, "flag": "yes"})).unwrap_err();
        let issues = err.field_issues();
        assert_eq!(issues[0], FieldIssue::new("title", "Expected string, received number"));
        assert_eq!(issues[1], FieldIssue::new("kind", "Kind is required"));
        assert_eq!(issues[2], FieldIssue::new("flag", "Expected boolean, received string"));
        assert_eq!(issues[3], FieldIssue::new("tags", "Tags is required"));
    }

    #[test]
    fn rejects_non_object_input() {
        let err = sample().validate(&json!([1, 2])).unwrap_err();
        assert_eq!(err.field_issues()[0].field, "body");
    }

    #[test]
    fn transform_runs_before_enum_check() {
        let out = sample().validate(&json!({"title": "abc", "kind": "Beta", "tags": []})).unwrap();
        assert_eq!(out["kind"], "beta");
    }

    #[test]
    fn dates_are_coerced() {
        for input in [json!("2024-03-01"), json!("2024-03-01T00:00:00Z"), json!(1_709_251_200_000i64)] {
            let out = sample()
                .validate(&json!({"title": "abc", "kind": "beta", "tags": [], "when": input}))
                .unwrap();
            let dt = DateTime::parse_from_rfc3339(out["when"].as_str().unwrap()).unwrap();
            assert_eq!(dt.timestamp(), 1_709_251_200);
        }
        let err = sample()
            .validate(&json!({"title": "abc", "kind": "beta", "tags": [], "when": "not a date"}))
            .unwrap_err();
        assert_eq!(err.field_issues()[0].field, "when");
    }

    #[test]
    fn partial_keeps_rules_but_drops_presence_and_defaults() {
        let partial = sample().partial();
        let out = partial.validate(&json!({"count": 3})).unwrap();
        assert_eq!(out.len(), 1);

        let err = partial.validate(&json!({"title": "x"})).unwrap_err();
        assert_eq!(err.field_issues()[0].field, "title");

        let out = partial.validate(&json!({"title": "", "code": null, "flag": false})).unwrap();
        assert_eq!(out["title"], "");
        assert_eq!(out["code"], Value::Null);
        assert_eq!(out["flag"], false);
    }
}
