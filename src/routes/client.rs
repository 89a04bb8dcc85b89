use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{dto::validation::validate_client_id, error::AppError};

/// Header identifying the browser (or device) that owns a round.
pub const CLIENT_ID_HEADER: &str = "x-client-id";

/// Client identity extracted from the `X-Client-Id` header; keys the session store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientId(pub String);

impl ClientId {
    /// Identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for ClientId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(CLIENT_ID_HEADER)
            .ok_or_else(|| AppError::BadRequest {
                code: "missing_client_id",
                message: "missing client id header `X-Client-Id`".into(),
            })?
            .to_str()
            .map_err(|_| AppError::BadRequest {
                code: "invalid_client_id",
                message: "client id header must be visible ASCII".into(),
            })?;

        validate_client_id(value).map_err(|err| AppError::BadRequest {
            code: "invalid_client_id",
            message: err
                .message
                .map(|message| message.into_owned())
                .unwrap_or_else(|| err.code.into_owned()),
        })?;

        Ok(Self(value.trim().to_owned()))
    }
}
