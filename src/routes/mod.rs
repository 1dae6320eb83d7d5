mod account;
mod extract;
mod health;
mod swagger;
use crate::database;
use crate::models::Error;
use anyhow::Context;
use health::{health_checker_handler, index_handler};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::{AppState, Config};

use axum::{
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::any::Any;
use std::sync::Arc;

/// Connects to the database, makes sure the schema exists and builds the application router
pub async fn make_app(config: &Config) -> anyhow::Result<Router> {
    info!("Connecting to PostgreSQL...");
    let sqlx_db_connection = database::connect_sqlx(&config.db_url)
        .await
        .context("could not connect to the database")?;
    info!("Connected to PostgreSQL!");

    let db = database::PostgreDatabase::new(sqlx_db_connection);
    db.migrate()
        .await
        .context("could not create the account table")?;

    let state = Arc::new(AppState { db: Box::new(db) });
    Ok(router(state))
}

/// Wires every route to its handler over the given state
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler).fallback(method_not_allowed_handler))
        .route(
            "/health",
            get(health_checker_handler).fallback(method_not_allowed_handler),
        )
        .merge(account::account_routes())
        .merge(swagger::build_documentation())
        .fallback(not_found_handler)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_handler))
}

async fn not_found_handler() -> Error {
    Error::not_found("The requested URL was not found on the server")
}

async fn method_not_allowed_handler() -> Error {
    Error::method_not_allowed()
}

fn panic_handler(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("Handler panicked: {}", detail);
    Error::internal().into_response()
}
