use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{header::CONTENT_TYPE, request::Parts, HeaderMap},
};
use serde_json::Value;
use tracing::error;

use crate::models::{dto::AccountPayload, Error};

pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Account id taken from the `{id}` path segment. Anything that is not an
/// integer cannot name an account, so it is reported as not found
#[derive(Debug, Clone, Copy)]
pub struct AccountId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for AccountId
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| Error::not_found("The requested URL was not found on the server"))?;
        parse_account_id(&raw)
            .map(AccountId)
            .ok_or_else(|| Error::not_found(&format!("Account {raw} does not exist.")))
    }
}

/// Plain decimal digits only: no sign and no leading zero
fn parse_account_id(raw: &str) -> Option<i32> {
    let canonical = !raw.is_empty()
        && raw.bytes().all(|b| b.is_ascii_digit())
        && (raw == "0" || !raw.starts_with('0'));
    if canonical {
        raw.parse().ok()
    } else {
        None
    }
}

/// The raw body of a write request together with its declared media type.
/// Nothing is validated until [`JsonBody::account`] is called, so handlers
/// decide where in their flow a bad body is reported
#[derive(Debug)]
pub struct JsonBody {
    content_type: Option<String>,
    bytes: Bytes,
}

impl JsonBody {
    /// Checks the media type, decodes the JSON and validates it as an account
    pub fn account(&self) -> Result<AccountPayload, Error> {
        if self.content_type.as_deref() != Some(JSON_MEDIA_TYPE) {
            error!("Invalid Content-Type: {:?}", self.content_type);
            return Err(Error::unsupported_media_type(JSON_MEDIA_TYPE));
        }
        let value: Value = serde_json::from_slice(&self.bytes).map_err(|e| {
            error!("Malformed JSON body: {}", e);
            Error::bad_request(&format!("Invalid JSON: {e}"))
        })?;
        let payload = AccountPayload::from_value(value).map_err(|e| {
            error!("{}", e);
            e
        })?;
        Ok(payload)
    }
}

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = content_type(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| Error::new(rejection.status(), &rejection.body_text()))?;
        Ok(JsonBody {
            content_type,
            bytes,
        })
    }
}

fn content_type(headers: &HeaderMap) -> Option<String> {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
