//! JSON request decoding and response encoding

use std::fmt::Display;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body, Bytes},
    extract::{FromRequest, Request},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use http_body_util::LengthLimitError;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use thiserror::Error;
use tracing::{error, warn};

use crate::models::JsonResponse;

/// Largest request body accepted, in bytes (1 MiB)
pub const MAX_BODY_BYTES: usize = 1_048_576;

/// Why a request body could not be turned into a value
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("body must not be empty")]
    Empty,

    #[error("body must not be larger than {limit} bytes")]
    TooLarge { limit: usize },

    #[error("body contains badly-formed JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("body must have a single JSON object only")]
    MultipleValues,

    #[error("failed to read body: {0}")]
    Read(String),
}

impl DecodeError {
    pub fn status(&self) -> StatusCode {
        match self {
            DecodeError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

/// Decode exactly one JSON value from `body`.
///
/// Oversized bodies are refused before any parsing, and anything after the first
/// value other than whitespace is an error.
pub fn decode_request_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, DecodeError> {
    if body.len() > MAX_BODY_BYTES {
        return Err(DecodeError::TooLarge {
            limit: MAX_BODY_BYTES,
        });
    }
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(DecodeError::Empty);
    }

    let mut deserializer = serde_json::Deserializer::from_slice(body);
    let value = <T as Deserialize>::deserialize(&mut deserializer)?;
    deserializer
        .end()
        .map_err(|_| DecodeError::MultipleValues)?;

    Ok(value)
}

/// Serialize `payload` as tab-indented JSON and build the response.
///
/// Nothing is built unless serialization succeeds. Caller headers go in first and
/// the content type is always overwritten with `application/json`.
pub fn encode_response<T: Serialize + ?Sized>(
    status: StatusCode,
    payload: &T,
    headers: Option<HeaderMap>,
) -> Result<Response, serde_json::Error> {
    let mut out = Vec::with_capacity(128);
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"\t"));
    payload.serialize(&mut serializer)?;

    let mut response = Response::new(Body::from(out));
    if let Some(headers) = headers {
        response.headers_mut().extend(headers);
    }
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    *response.status_mut() = status;

    Ok(response)
}

/// Write `{"error": true, "message": <err>}` with `status`, or 400 when none is given
pub fn encode_error(err: impl Display, status: Option<StatusCode>) -> Response {
    let payload = JsonResponse::error(err.to_string());
    let status = status.unwrap_or(StatusCode::BAD_REQUEST);

    encode_response(status, &payload, None).unwrap_or_else(|e| {
        error!("Failed to encode error envelope: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    })
}

/// Error answered to the client as an error envelope
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Generic 500; details belong in the log, not the response
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "the server encountered a problem and could not process your request",
        )
    }
}

impl From<DecodeError> for ApiError {
    fn from(err: DecodeError) -> Self {
        warn!("Rejected request body: {}", err);
        Self::new(err.status(), err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        error!("Failed to encode response: {}", err);
        Self::internal()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        encode_error(self.message, Some(self.status))
    }
}

/// Extractor decoding the request body with `decode_request_body`
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let body = read_body(req).await?;
        Ok(JsonBody(decode_request_body(&body)?))
    }
}

/// Collect the body, refusing it as soon as it passes `MAX_BODY_BYTES`
async fn read_body(req: Request) -> Result<Bytes, DecodeError> {
    let declared = req
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());
    if declared.is_some_and(|len| len > MAX_BODY_BYTES) {
        return Err(DecodeError::TooLarge {
            limit: MAX_BODY_BYTES,
        });
    }

    to_bytes(req.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|e| {
            let inner = e.into_inner();
            if inner.is::<LengthLimitError>() {
                DecodeError::TooLarge {
                    limit: MAX_BODY_BYTES,
                }
            } else {
                DecodeError::Read(inner.to_string())
            }
        })
}
