use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// One failed field constraint, reported in schema declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

/// Discriminant of [`AppError`]; its name is what clients see in `error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Duplicate,
    NotFound,
    Credentials,
    Authorization,
    Ownership,
    System,
}

impl ErrorKind {
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::Validation => "ValidationError",
            ErrorKind::Duplicate => "DuplicateError",
            ErrorKind::NotFound => "NotFoundError",
            ErrorKind::Credentials => "CredentialsError",
            ErrorKind::Authorization => "AuthorizationError",
            ErrorKind::Ownership => "OwnershipError",
            ErrorKind::System => "SystemError",
        }
    }
}

/// The closed set of failures any business operation may return.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Vec<FieldIssue> },
    #[error("{message}")]
    Duplicate { message: String, details: Option<Value> },
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Credentials(String),
    #[error("{0}")]
    Authorization(String),
    #[error("{0}")]
    Ownership(String),
    /// `cause` is for server logs only.
    #[error("{message}")]
    System { message: String, cause: String },
}

pub const VALIDATION_FAILED: &str = "Validation failed";
pub const INSUFFICIENT_PERMISSIONS: &str = "Insufficient permissions";
pub const INTERNAL_ERROR: &str = "Internal server error";

impl AppError {
    pub fn validation(message: impl Into<String>, details: Vec<FieldIssue>) -> Self {
        Self::Validation { message: message.into(), details }
    }

    /// Single-field validation failure.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        Self::validation(VALIDATION_FAILED, vec![FieldIssue::new(field, message)])
    }

    pub fn duplicate(message: impl Into<String>, field: Option<&str>) -> Self {
        Self::Duplicate {
            message: message.into(),
            details: field.map(|f| serde_json::json!({ "field": f })),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn credentials(message: impl Into<String>) -> Self {
        Self::Credentials(message.into())
    }

    pub fn authorization(message: impl Into<String>) -> Self {
        Self::Authorization(message.into())
    }

    pub fn ownership(message: impl Into<String>) -> Self {
        Self::Ownership(message.into())
    }

    pub fn system(cause: impl Into<String>) -> Self {
        Self::System { message: INTERNAL_ERROR.into(), cause: cause.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation { .. } => ErrorKind::Validation,
            AppError::Duplicate { .. } => ErrorKind::Duplicate,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Credentials(_) => ErrorKind::Credentials,
            AppError::Authorization(_) => ErrorKind::Authorization,
            AppError::Ownership(_) => ErrorKind::Ownership,
            AppError::System { .. } => ErrorKind::System,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::Validation { message, .. }
            | AppError::Duplicate { message, .. }
            | AppError::System { message, .. } => message,
            AppError::NotFound(m)
            | AppError::Credentials(m)
            | AppError::Authorization(m)
            | AppError::Ownership(m) => m,
        }
    }

    /// Structured details, if the kind carries any.
    pub fn details(&self) -> Option<Value> {
        match self {
            AppError::Validation { details, .. } if !details.is_empty() => {
                serde_json::to_value(details).ok()
            }
            AppError::Duplicate { details, .. } => details.clone(),
            _ => None,
        }
    }

    /// Field issues of a validation failure; empty for every other kind.
    pub fn field_issues(&self) -> &[FieldIssue] {
        match self {
            AppError::Validation { details, .. } => details,
            _ => &[],
        }
    }
}

/// Failures reported by repositories. Never leaves the service crate: resource
/// operations translate it into [`AppError`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("duplicate value for unique field `{field}`")]
    Duplicate { field: String },
    #[error("document rejected by storage schema")]
    Invalid(Vec<FieldIssue>),
    #[error("malformed identifier `{0}`")]
    Cast(String),
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Default translation. Callers that treat a bad id as "absent" match
    /// `Cast` themselves before falling back to this.
    pub fn into_app_error(self, entity: &str) -> AppError {
        match self {
            StoreError::Duplicate { field } => AppError::duplicate(
                format!("A {} with this {} already exists", entity.to_lowercase(), field),
                Some(&field),
            ),
            StoreError::Invalid(details) => AppError::validation(VALIDATION_FAILED, details),
            StoreError::Cast(id) => AppError::invalid_field("id", format!("Invalid id format: {id}")),
            StoreError::Backend(cause) => AppError::system(cause),
        }
    }
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        if let Some(SqlErr::UniqueConstraintViolation(msg)) = err.sql_err() {
            let field = unique_field(&msg).unwrap_or("value").to_string();
            return StoreError::Duplicate { field };
        }
        match err {
            DbErr::Type(msg) | DbErr::Json(msg) => {
                StoreError::Invalid(vec![FieldIssue::new("document", msg)])
            }
            other => {
                let text = other.to_string();
                match schema_violation(&text) {
                    Some(issue) => StoreError::Invalid(vec![issue]),
                    None => StoreError::Backend(text),
                }
            }
        }
    }
}

/// Result of a load-then-update: a row deleted in between updates nothing,
/// which reads as "absent" rather than a backend failure.
pub(crate) fn absent_if_not_updated<T>(res: Result<T, DbErr>) -> Result<Option<T>, StoreError> {
    match res {
        Ok(model) => Ok(Some(model)),
        Err(DbErr::RecordNotUpdated) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Recover the column from a `uniq_<table>_<column>` index name in a driver
/// message.
pub(crate) fn unique_field(msg: &str) -> Option<&str> {
    let start = msg.find("uniq_")? + "uniq_".len();
    let rest = &msg[start..];
    let end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    let (_table, column) = rest[..end].split_once('_')?;
    (!column.is_empty()).then_some(column)
}

/// Not-null and check-constraint rejections carry the column in quotes.
fn schema_violation(msg: &str) -> Option<FieldIssue> {
    let rule = if msg.contains("violates not-null constraint") {
        "is required"
    } else if msg.contains("violates check constraint") || msg.contains("value too long") {
        "is invalid"
    } else {
        return None;
    };
    let column = msg
        .split_once("column \"")
        .and_then(|(_, rest)| rest.split_once('"'))
        .map(|(col, _)| col)
        .unwrap_or("document");
    Some(FieldIssue::new(column, format!("{column} {rule}")))
}
