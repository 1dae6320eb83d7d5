use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use thiserror::Error as ThisError;
use tracing::error;

use super::dto::ErrorBody;

const INTERNAL_ERROR_MESSAGE: &str = "The server encountered an internal error";

/// An error rendered to the client as a structured JSON body
#[derive(Debug)]
pub struct Error {
    pub code: StatusCode,
    pub body: Json<ErrorBody>,
}

impl Error {
    pub fn new(code: StatusCode, message: &str) -> Self {
        Self {
            code,
            body: Json(ErrorBody::new(code, message)),
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unsupported_media_type(media_type: &str) -> Self {
        Self::new(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            &format!("Content-Type must be {media_type}"),
        )
    }

    pub fn method_not_allowed() -> Self {
        Self::new(
            StatusCode::METHOD_NOT_ALLOWED,
            "The method is not allowed for the requested URL",
        )
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (self.code, self.body).into_response()
    }
}

impl From<PersistenceError> for Error {
    fn from(error: PersistenceError) -> Self {
        // Detail stays in the logs, the client only sees a generic 500
        error!("Persistence failure: {}", error);
        Self::internal()
    }
}

impl From<AccountError> for Error {
    fn from(error: AccountError) -> Self {
        Self::bad_request(&error.to_string())
    }
}

/// Failures coming out of the backing store
#[derive(Debug, ThisError)]
pub enum PersistenceError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("account {0} does not exist")]
    Missing(i32),
}

/// Reasons an account representation is rejected
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum AccountError {
    #[error("Invalid Account: body of request contained bad or no data")]
    NotAnObject,
    #[error("Invalid Account: missing {0}")]
    MissingField(&'static str),
    #[error("Invalid Account: {0}")]
    InvalidField(String),
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn body_of(error: Error) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_has_status_label_and_message() {
        let (status, body) = body_of(Error::not_found("Account 7 does not exist.")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], 404);
        assert_eq!(body["error"], "Not Found");
        assert_eq!(body["message"], "Account 7 does not exist.");
    }

    #[tokio::test]
    async fn unsupported_media_type_names_the_required_type() {
        let (status, body) = body_of(Error::unsupported_media_type("application/json")).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body["status"], 415);
        assert_eq!(body["message"], "Content-Type must be application/json");
    }

    #[tokio::test]
    async fn persistence_errors_do_not_leak_detail() {
        let error: Error = PersistenceError::Database(sqlx::Error::PoolTimedOut).into();
        let (status, body) = body_of(error).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal Server Error");
        assert_eq!(body["message"], INTERNAL_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn validation_errors_become_bad_requests() {
        let error: Error = AccountError::MissingField("email").into();
        let (status, body) = body_of(error).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid Account: missing email");
    }
}
