use crate::consts::{DEFAULT_HOST, DEFAULT_PORT};
use crate::error::{AppError, FieldError, FieldProblem};

use axum::{
    async_trait,
    body::Bytes,
    extract::FromRequest,
    http::Request,
    response::IntoResponse,
};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::env;
use std::net::{AddrParseError, SocketAddr};
use time::OffsetDateTime;

/// Inbound description of a call nobody picked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallEvent {
    pub caller_name: String,
    /// Expected to be "morning", "business_hours" or "evening", but anything goes.
    pub time_of_day: String,
}

impl CallEvent {
    /// Validate a raw JSON body. Every offending field is reported, not just the first.
    pub fn from_json(body: &[u8]) -> Result<Self, AppError> {
        let value: Value = serde_json::from_slice(body).map_err(|_| invalid_body())?;
        let object = value.as_object().ok_or_else(invalid_body)?;

        let caller_name = required_str(object, "caller_name");
        let time_of_day = required_str(object, "time_of_day");
        match (caller_name, time_of_day) {
            (Ok(caller_name), Ok(time_of_day)) => Ok(Self {
                caller_name,
                time_of_day,
            }),
            (caller_name, time_of_day) => Err(AppError::Validation(
                [caller_name.err(), time_of_day.err()]
                    .into_iter()
                    .flatten()
                    .collect(),
            )),
        }
    }
}

fn invalid_body() -> AppError {
    AppError::Validation(vec![FieldError::new("body", FieldProblem::InvalidBody)])
}

fn required_str(object: &Map<String, Value>, field: &'static str) -> Result<String, FieldError> {
    match object.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(FieldError::new(field, FieldProblem::NotAString)),
        None => Err(FieldError::new(field, FieldProblem::Missing)),
    }
}

// The body is read as plain bytes so a missing or wrong Content-Type does not reject the call.
#[async_trait]
impl<S, B> FromRequest<S, B> for CallEvent
where
    Bytes: FromRequest<S, B>,
    B: Send + 'static,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::UnreadableBody(rejection.into_response().status()))?;
        Self::from_json(&body)
    }
}

/// Which rule produced the auto-reply. Serializes as its `label()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyAction {
    AfterHours,
    Priority,
    Standard,
}

impl Serialize for ReplyAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl ReplyAction {
    pub fn label(&self) -> &'static str {
        match self {
            ReplyAction::AfterHours => "Auto-Reply (After Hours Mode)",
            ReplyAction::Priority => "Priority Response (VIP List)",
            ReplyAction::Standard => "Standard Auto-Response",
        }
    }

    /// Seconds the client should wait before showing the text.
    pub fn delay_secs(&self) -> u64 {
        match self {
            ReplyAction::Priority => 1,
            ReplyAction::AfterHours | ReplyAction::Standard => 2,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ResponseRecord {
    pub status: &'static str,
    pub action: ReplyAction,
    pub message_body: &'static str,
    pub simulated_delay: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AddrParseError> {
        let host = env::var("MISSED_CALL_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = env::var("MISSED_CALL_PORT").unwrap_or_else(|_| DEFAULT_PORT.to_string());
        Self::from_parts(&host, &port)
    }

    fn from_parts(host: &str, port: &str) -> Result<Self, AddrParseError> {
        let bind_addr = format!("{host}:{port}").parse()?;
        Ok(Self { bind_addr })
    }
}
