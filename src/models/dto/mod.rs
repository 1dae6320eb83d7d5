pub mod account;
pub mod service;
pub use account::*;
pub use service::*;

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(components(schemas(
    AccountPayload,
    AccountResponse,
    ErrorBody,
    HealthStatus,
    ServiceInfo,
)))]
/// Captures OpenAPI schemas defined in the DTO module
pub struct OpenApiSchemas;
