use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::command::CommandError;

pub const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// Every way a webhook request can end, and the status/body the provider
/// receives for it. Business failures are acknowledged with 200 so the
/// provider does not retry or disable the endpoint; only handshake and
/// transport problems get another status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Preflight,
    HandshakeAccepted { challenge: String },
    HandshakeRejected,
    SecretMissing,
    NotText,
    InvalidData,
    AccountNotFound,
    InvalidFormat,
    InvalidValue,
    WriteFailed,
    Recorded,
    InternalError,
    MethodNotAllowed,
}

impl Outcome {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::HandshakeRejected => StatusCode::FORBIDDEN,
            Self::SecretMissing => StatusCode::INTERNAL_SERVER_ERROR,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::OK,
        }
    }

    pub fn body(&self) -> &str {
        match self {
            Self::Preflight => "ok",
            Self::HandshakeAccepted { challenge } => challenge.as_str(),
            Self::HandshakeRejected => "Verification token mismatch",
            Self::SecretMissing => "Verification token is not configured",
            Self::NotText => "EVENT_RECEIVED_NOT_TEXT",
            Self::InvalidData => "EVENT_RECEIVED_INVALID_DATA",
            Self::AccountNotFound => "USER_NOT_FOUND_OR_LINKED",
            Self::InvalidFormat => "INVALID_TRANSACTION_FORMAT",
            Self::InvalidValue => "INVALID_VALUE",
            Self::WriteFailed => "DB_INSERT_ERROR",
            Self::Recorded => "EVENT_RECEIVED",
            Self::InternalError => "INTERNAL_SERVER_ERROR",
            Self::MethodNotAllowed => "Method Not Allowed or Invalid Request",
        }
    }
}

impl From<CommandError> for Outcome {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Format => Self::InvalidFormat,
            CommandError::Value(_) => Self::InvalidValue,
        }
    }
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut resp = (status, self.body().to_string()).into_response();

        let headers = resp.headers_mut();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        );

        resp
    }
}
