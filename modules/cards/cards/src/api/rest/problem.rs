//! RFC 9457 Problem Details and the module's error catalog.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(title = "Problem", description = "RFC 9457 Problem Details for HTTP APIs")]
#[must_use]
pub struct Problem {
    #[serde(rename = "type")]
    pub type_url: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub instance: String,
    pub code: String,
    pub trace_id: Option<String>,
}

impl Problem {
    pub fn new(status: StatusCode, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            type_url: "about:blank".to_owned(),
            title: title.into(),
            status: status.as_u16(),
            detail: detail.into(),
            instance: String::new(),
            code: String::new(),
            trace_id: None,
        }
    }

    pub fn with_type(mut self, type_url: impl Into<String>) -> Self {
        self.type_url = type_url.into();
        self
    }

    pub fn with_instance(mut self, uri: impl Into<String>) -> Self {
        self.instance = uri.into();
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut resp = axum::Json(self).into_response();
        *resp.status_mut() = status;
        resp.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(APPLICATION_PROBLEM_JSON),
        );
        resp
    }
}

/// Static error definition from the catalog.
#[derive(Debug, Clone, Copy)]
pub struct ErrDef {
    pub status: StatusCode,
    pub title: &'static str,
    pub code: &'static str,
}

impl ErrDef {
    pub fn as_problem(&self, detail: impl Into<String>) -> Problem {
        Problem::new(self.status, self.title, detail)
            .with_code(self.code)
            .with_type(format!("https://errors.sterlingcards.dev/{}", self.code))
    }

    /// Problem for the current request, tagged with the active span id.
    pub fn with_context(&self, detail: impl Into<String>, instance: &str) -> Problem {
        let problem = self.as_problem(detail).with_instance(instance);
        match tracing::Span::current().id() {
            Some(id) => problem.with_trace_id(id.into_u64().to_string()),
            None => problem,
        }
    }
}

pub struct ErrorCode;

impl ErrorCode {
    pub const NOT_FOUND: ErrDef = ErrDef {
        status: StatusCode::NOT_FOUND,
        title: "Not Found",
        code: "CARDS_NOT_FOUND",
    };
    pub const VALIDATION: ErrDef = ErrDef {
        status: StatusCode::UNPROCESSABLE_ENTITY,
        title: "Validation Failed",
        code: "CARDS_VALIDATION",
    };
    pub const USERNAME_TAKEN: ErrDef = ErrDef {
        status: StatusCode::CONFLICT,
        title: "Conflict",
        code: "CARDS_USERNAME_TAKEN",
    };
    pub const UPLOAD_REJECTED: ErrDef = ErrDef {
        status: StatusCode::UNPROCESSABLE_ENTITY,
        title: "Upload Rejected",
        code: "CARDS_UPLOAD_REJECTED",
    };
    pub const BAD_REQUEST: ErrDef = ErrDef {
        status: StatusCode::BAD_REQUEST,
        title: "Bad Request",
        code: "CARDS_BAD_REQUEST",
    };
    pub const UNAUTHENTICATED: ErrDef = ErrDef {
        status: StatusCode::UNAUTHORIZED,
        title: "Unauthorized",
        code: "CARDS_UNAUTHENTICATED",
    };
    pub const INTERNAL: ErrDef = ErrDef {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        title: "Internal Server Error",
        code: "CARDS_INTERNAL",
    };
}
