use std::sync::Arc;

use axum::{
    extract::State,
    http::{
        header::{HOST, LOCATION},
        HeaderMap, StatusCode,
    },
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use tracing::{error, info};
use utoipa::OpenApi;

use crate::{
    models::{dto::AccountResponse, Error},
    AppState,
};

use super::extract::{AccountId, JsonBody};
use super::method_not_allowed_handler;

/// Defines the OpenAPI spec for account endpoints
#[derive(OpenApi)]
#[openapi(paths(
    create_account_handler,
    list_accounts_handler,
    read_account_handler,
    update_account_handler,
    delete_account_handler
))]
pub struct AccountsApi;

/// Used to group account endpoints together in the OpenAPI documentation
pub const ACCOUNT_API_GROUP: &str = "ACCOUNT";

/// Builds a router for account routes
pub fn account_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/accounts",
            post(create_account_handler)
                .get(list_accounts_handler)
                .fallback(method_not_allowed_handler),
        )
        .route(
            "/accounts/:id",
            get(read_account_handler)
                .put(update_account_handler)
                .delete(delete_account_handler)
                .fallback(method_not_allowed_handler),
        )
}

fn not_found(id: i32) -> Error {
    error!("Account {} does not exist.", id);
    Error::not_found(&format!("Account {id} does not exist."))
}

/// Absolute read URL of an account when the client told us which host it used
fn location_of(headers: &HeaderMap, id: i32) -> String {
    match headers.get(HOST).and_then(|host| host.to_str().ok()) {
        Some(host) => format!("http://{host}/accounts/{id}"),
        None => format!("/accounts/{id}"),
    }
}

/// Create account handler function
#[utoipa::path(
    post,
    path = "/accounts",
    tag = ACCOUNT_API_GROUP,
    request_body(content = AccountPayload, content_type = "application/json"),
    responses(
        (status = 201, description = "Account successfully created", body = AccountResponse,
            headers(("Location" = String, description = "URL of the new account"))),
        (status = 400, description = "Missing or malformed field", body = ErrorBody),
        (status = 415, description = "Content-Type is not application/json", body = ErrorBody),
    )
)]
pub async fn create_account_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: JsonBody,
) -> Result<impl IntoResponse, Error> {
    info!("Request to create an Account");
    let new_account = body.account()?.into_new_account(Utc::now().date_naive());

    let account = state.db.create(&new_account).await?;
    info!("Account {} created", account.id);

    let location = location_of(&headers, account.id);
    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(AccountResponse::from(account)),
    ))
}

/// List accounts handler function
#[utoipa::path(
    get,
    path = "/accounts",
    tag = ACCOUNT_API_GROUP,
    responses(
        (status = 200, description = "Every stored account", body = [AccountResponse]),
    )
)]
pub async fn list_accounts_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AccountResponse>>, Error> {
    info!("Request to read all accounts");
    let accounts: Vec<AccountResponse> = state
        .db
        .all()
        .await?
        .into_iter()
        .map(AccountResponse::from)
        .collect();

    info!("Found [{}] accounts", accounts.len());
    Ok(Json(accounts))
}

/// Read account handler function
#[utoipa::path(
    get,
    path = "/accounts/{id}",
    tag = ACCOUNT_API_GROUP,
    responses(
        (status = 200, description = "Account found", body = AccountResponse),
        (status = 404, description = "Account not found", body = ErrorBody),
    ),
    params(
        ("id" = i32, Path, description = "Account ID")
    )
)]
pub async fn read_account_handler(
    State(state): State<Arc<AppState>>,
    AccountId(id): AccountId,
) -> Result<Json<AccountResponse>, Error> {
    info!("Request to read an Account with id: {}", id);
    let account = state.db.find(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(AccountResponse::from(account)))
}

/// Update account handler function
#[utoipa::path(
    put,
    path = "/accounts/{id}",
    tag = ACCOUNT_API_GROUP,
    request_body(content = AccountPayload, content_type = "application/json"),
    responses(
        (status = 200, description = "Account successfully updated", body = AccountResponse),
        (status = 400, description = "Invalid body or ID mismatch", body = ErrorBody),
        (status = 404, description = "Account not found", body = ErrorBody),
    ),
    params(
        ("id" = i32, Path, description = "Account ID")
    )
)]
pub async fn update_account_handler(
    State(state): State<Arc<AppState>>,
    AccountId(id): AccountId,
    body: JsonBody,
) -> Result<Json<AccountResponse>, Error> {
    info!("Request to update an Account with id: {}", id);
    let mut account = state.db.find(id).await?.ok_or_else(|| not_found(id))?;

    let payload = body.account()?;
    if let Some(payload_id) = payload.id {
        if payload_id != account.id {
            error!(
                "Invalid request, account id in URL: {}, and in the payload: {} is different",
                id, payload_id
            );
            return Err(Error::bad_request("ID mismatch"));
        }
    }

    payload.apply_to(&mut account);
    let updated_account = state.db.update(&account).await?;
    Ok(Json(AccountResponse::from(updated_account)))
}

/// Delete account handler function
#[utoipa::path(
    delete,
    path = "/accounts/{id}",
    tag = ACCOUNT_API_GROUP,
    responses(
        (status = 204, description = "Account deleted, or there was nothing to delete"),
    ),
    params(
        ("id" = i32, Path, description = "Account ID")
    )
)]
pub async fn delete_account_handler(
    State(state): State<Arc<AppState>>,
    AccountId(id): AccountId,
) -> Result<StatusCode, Error> {
    info!("Request to delete an Account with id: {}", id);
    if state.db.find(id).await?.is_some() {
        info!("Account {} has been found and will be deleted.", id);
        state.db.delete(id).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}
