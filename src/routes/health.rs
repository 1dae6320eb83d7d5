use crate::models::dto::{HealthStatus, ServiceInfo};
use axum::Json;
use utoipa::OpenApi;
#[derive(OpenApi)]
#[openapi(paths(health_checker_handler, index_handler))]
/// Defines the OpenAPI spec for service endpoints
pub struct HealthApi;
#[utoipa::path(
    get,
    path = "/health",
    tag = "HEALTH",
    responses(
        (status = OK, description = "Success", body = HealthStatus)
    )
)]
pub async fn health_checker_handler() -> Json<HealthStatus> {
    Json(HealthStatus::ok())
}

#[utoipa::path(
    get,
    path = "/",
    tag = "HEALTH",
    responses(
        (status = OK, description = "Service name and version", body = ServiceInfo)
    )
)]
pub async fn index_handler() -> Json<ServiceInfo> {
    Json(ServiceInfo::default())
}
