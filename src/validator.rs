//! JSON extraction with `validator` rules applied before the handler runs.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::utils::errors::AppError;

/// Extractor wrapping [`Json`] that rejects payloads failing their
/// `#[validate]` rules with a 422 instead of handing them to the handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => value,
            Err(rejection) => return Err(map_rejection(rejection)),
        };

        value
            .validate()
            .map_err(|errors| AppError::validation(collect_messages(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

fn map_rejection(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            AppError::validation("Expected 'Content-Type: application/json'")
        }
        JsonRejection::JsonSyntaxError(_) => AppError::validation("Request body is not valid JSON"),
        JsonRejection::JsonDataError(err) => {
            // serde's message for an absent field is the most useful detail
            // we can surface without leaking type internals.
            let detail = err.body_text();
            match detail
                .split("missing field `")
                .nth(1)
                .and_then(|rest| rest.split('`').next())
            {
                Some(field) => AppError::validation(format!("{field} is required")),
                None => AppError::validation("Request body does not match the expected shape"),
            }
        }
        _ => AppError::validation("Invalid request body"),
    }
}

fn collect_messages(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| match &error.message {
                Some(msg) => msg.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}
