//! `ValidatedJson<T>`: `axum::Json<T>` followed by `Validate::validate()`.
//!
//! Malformed bodies answer 400 (415 without a JSON content type); bodies that
//! parse but break a `#[validate]` rule answer 422 with one `field: message`
//! entry per failure.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use super::error_response;

pub struct ValidatedJson<T>(pub T);

pub enum ValidatedJsonRejection {
    Body(JsonRejection),
    Invalid(ValidationErrors),
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Body(JsonRejection::MissingJsonContentType(_)) => error_response(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Expected `Content-Type: application/json`",
            )
            .into_response(),
            Self::Body(rejection) => {
                error_response(StatusCode::BAD_REQUEST, format!("Invalid JSON: {}", rejection))
                    .into_response()
            }
            Self::Invalid(errors) => {
                let mut messages = Vec::new();
                collect_messages(None, &errors, &mut messages);
                let message = if messages.is_empty() {
                    "Validation failed".to_string()
                } else {
                    messages.join("; ")
                };
                error_response(StatusCode::UNPROCESSABLE_ENTITY, message).into_response()
            }
        }
    }
}

/// Flatten nested validation errors into `path: message` strings. Struct-level
/// (`schema`) failures are reported without a field prefix.
fn collect_messages(prefix: Option<&str>, errors: &ValidationErrors, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let field: &str = &**field;
        let path = match (prefix, field) {
            (Some(p), "__all__") => p.to_string(),
            (None, "__all__") => String::new(),
            (Some(p), f) => format!("{}.{}", p, f),
            (None, f) => f.to_string(),
        };
        match kind {
            ValidationErrorsKind::Field(errs) => {
                for e in errs {
                    let msg = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    if path.is_empty() {
                        out.push(msg);
                    } else {
                        out.push(format!("{}: {}", path, msg));
                    }
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_messages(Some(&path), inner, out),
            ValidationErrorsKind::List(items) => {
                for (idx, inner) in items {
                    collect_messages(Some(&format!("{}[{}]", path, idx)), inner, out);
                }
            }
        }
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::Body)?;
        value.validate().map_err(ValidatedJsonRejection::Invalid)?;
        Ok(Self(value))
    }
}
