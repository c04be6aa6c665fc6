use serde::Serialize;
use thiserror::Error;

/// Unified API error type.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::Internal(_) => "internal_error",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::Internal(_) => 500,
        }
    }
}

/// JSON error envelope: `{ "error": { "code": "…", "message": "…", "details": {} } }`
#[derive(Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub details: serde_json::Value,
}

impl From<&ApiError> for ErrorEnvelope {
    fn from(e: &ApiError) -> Self {
        Self {
            error: ErrorBody {
                code: e.code().to_string(),
                message: e.to_string(),
                details: serde_json::Value::Object(serde_json::Map::new()),
            },
        }
    }
}

/// Body returned by the proxy when the upstream call fails.
#[derive(Debug, Serialize)]
pub struct ProxyErrorBody {
    pub error: String,
    pub message: String,
}

impl ProxyErrorBody {
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            error: "Internal Server Error".to_string(),
            message: message.into(),
        }
    }
}

/// Body returned when no proxy endpoint matches the request path.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointNotFound {
    pub error: String,
    pub requested_path: String,
    pub pattern: String,
    pub available_endpoints: Vec<String>,
}

/// Single-field error body used by the dedicated trending-movies endpoint.
#[derive(Debug, Serialize)]
pub struct SimpleErrorBody {
    pub error: String,
}

impl SimpleErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
