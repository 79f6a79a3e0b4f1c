use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::warn;

/// What was wrong with a single field of an inbound request body.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FieldProblem {
    Missing,
    NotAString,
    InvalidBody,
    TooLarge,
    Unreadable,
}

impl FieldProblem {
    fn message(&self) -> &'static str {
        match self {
            FieldProblem::Missing => "field required",
            FieldProblem::NotAString => "value is not a valid string",
            FieldProblem::InvalidBody => "request body must be a JSON object",
            FieldProblem::TooLarge => "request body is too large",
            FieldProblem::Unreadable => "request body could not be read",
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub problem: FieldProblem,
    pub message: &'static str,
}

impl FieldError {
    pub fn new(field: &'static str, problem: FieldProblem) -> Self {
        Self {
            field,
            problem,
            message: problem.message(),
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    /// The request body could not be turned into a call event.
    Validation(Vec<FieldError>),
    /// The body never arrived intact; carries the status the body extractor chose.
    UnreadableBody(StatusCode),
}

impl AppError {
    fn field_errors(&self) -> Vec<FieldError> {
        match self {
            AppError::Validation(errors) => errors.clone(),
            AppError::UnreadableBody(status) if *status == StatusCode::PAYLOAD_TOO_LARGE => {
                vec![FieldError::new("body", FieldProblem::TooLarge)]
            }
            AppError::UnreadableBody(_) => vec![FieldError::new("body", FieldProblem::Unreadable)],
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::UnreadableBody(status) => *status,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let fields = self
            .field_errors()
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<String>>()
            .join(", ");
        write!(f, "invalid request ({fields})")
    }
}

impl std::error::Error for AppError {}

#[derive(Serialize)]
struct ErrorBody<'a> {
    status: &'static str,
    detail: &'a [FieldError],
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        warn!(error=%self, "rejecting request");
        let errors = self.field_errors();
        let body = ErrorBody {
            status: "error",
            detail: &errors,
        };
        (self.status(), Json(body)).into_response()
    }
}
