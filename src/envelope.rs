//! Result Envelope
//!
//! Every accessor operation answers with an [`Envelope`]: either the
//! provider's data or an ordered list of `{code, message}` errors.

use crate::cloud::query::Reply;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Error code for a name or id that matches no record
pub const NOT_FOUND: &str = "not_found";

/// Error code for any provider failure without a more specific code
pub const UNPREDICTABLE_ERROR: &str = "unpredictable_error";

/// A single provider error entry
///
/// Fields beyond `code`, `message` and `more_info` (such as `target`) are
/// kept in `extra` and serialized back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub more_info: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            more_info: None,
            extra: Map::new(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.code == NOT_FOUND
    }
}

/// Outcome of a resource operation
///
/// Serializes to `{"errors": [...]}` or `{"data": ...}`, never both.
/// A failure also carries the other top-level fields of the provider body
/// (`trace`, `status_code`, ...) so it serializes back to that body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Envelope {
    Failure {
        errors: Vec<ApiError>,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
    Success { data: Value },
}

impl Envelope {
    pub fn success(data: Value) -> Self {
        Self::Success { data }
    }

    pub fn failure(errors: Vec<ApiError>) -> Self {
        Self::Failure {
            errors,
            extra: Map::new(),
        }
    }

    /// Failure with a single `not_found` entry
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::failure(vec![ApiError::new(NOT_FOUND, message)])
    }

    /// Success payload reported by a completed delete
    pub fn deleted() -> Self {
        Self::success(json!({ "status": "deleted" }))
    }

    /// Normalize a raw reply.
    ///
    /// A body carrying an `errors` array is a failure whatever the status.
    /// Any other non-2xx body becomes a single synthesized error. Either
    /// way the remaining top-level fields of the body are kept.
    pub fn from_reply(reply: Reply) -> Self {
        if let Some(errors) = parse_errors(&reply.data) {
            return Self::Failure {
                errors,
                extra: body_extras(&reply.data),
            };
        }

        if (200..300).contains(&reply.status) {
            return Self::success(reply.data);
        }

        let code = reply
            .data
            .get("error_code")
            .or_else(|| reply.data.get("code"))
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| {
                if reply.status == 404 {
                    NOT_FOUND.to_string()
                } else {
                    UNPREDICTABLE_ERROR.to_string()
                }
            });
        let message = reply
            .data
            .get("message")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("request failed with status {}", reply.status));

        Self::Failure {
            errors: vec![ApiError::new(code, message)],
            extra: body_extras(&reply.data),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// True when every error entry is `not_found`
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Failure { errors, .. } => !errors.is_empty() && errors.iter().all(ApiError::is_not_found),
            Self::Success { .. } => false,
        }
    }

    pub fn data(&self) -> Option<&Value> {
        match self {
            Self::Success { data } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    pub fn errors(&self) -> Option<&[ApiError]> {
        match self {
            Self::Failure { errors, .. } => Some(errors),
            Self::Success { .. } => None,
        }
    }

    pub fn into_data(self) -> Option<Value> {
        match self {
            Self::Success { data } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    /// `id` field of a successful single-record envelope
    pub fn record_id(&self) -> Option<&str> {
        self.data()?.get("id")?.as_str()
    }

    /// Id of the resolved record, or the failure to hand back to the caller
    pub fn into_id(self) -> Result<String, Envelope> {
        match self.record_id() {
            Some(id) => Ok(id.to_string()),
            None if self.is_success() => Err(Envelope::not_found("resolved record has no id")),
            None => Err(self),
        }
    }
}

/// Top-level fields of an object body other than `errors`
fn body_extras(body: &Value) -> Map<String, Value> {
    body.as_object()
        .map(|fields| {
            fields
                .iter()
                .filter(|(key, _)| key.as_str() != "errors")
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        })
        .unwrap_or_default()
}

fn parse_errors(body: &Value) -> Option<Vec<ApiError>> {
    let entries = body.get("errors")?.as_array()?;

    Some(entries.iter().map(parse_error).collect())
}

fn parse_error(entry: &Value) -> ApiError {
    let mut fields = entry.as_object().cloned().unwrap_or_default();

    let code = match fields.remove("code") {
        Some(Value::String(code)) => code,
        _ => UNPREDICTABLE_ERROR.to_string(),
    };
    let message = match fields.remove("message") {
        Some(Value::String(message)) => message,
        _ => String::new(),
    };
    let more_info = match fields.remove("more_info") {
        Some(Value::String(more_info)) => Some(more_info),
        Some(other) => {
            fields.insert("more_info".to_string(), other);
            None
        },
        None => None,
    };

    ApiError {
        code,
        message,
        more_info,
        extra: fields,
    }
}
