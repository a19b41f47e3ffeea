//! Route registration

use super::{dto::*, error::Problem, handlers};
use crate::domain::Service;
use axum::{
    extract::{Path, Query},
    routing::get,
    Extension, Json, Router,
};
use std::sync::Arc;
use uuid::Uuid;

/// Register all REST routes
pub fn register_routes(router: Router, service: Arc<Service>) -> anyhow::Result<Router> {
    let router = router
        .route(
            "/maintenance/{tenant_id}",
            get(get_config_handler).put(put_config_handler),
        )
        .route("/maintenance/{tenant_id}/status", get(get_status_handler))
        .route("/maintenance/{tenant_id}/access", get(check_access_handler))
        // Add service as extension for handlers
        .layer(Extension(service));

    Ok(router)
}

// ===== Handler wrappers that extract service from Extension =====

async fn get_config_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<Uuid>,
) -> Result<Json<MaintenanceConfigDto>, Problem> {
    handlers::get_config(service, path).await
}

async fn put_config_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<Uuid>,
    json: Json<UpdateMaintenanceConfigRequest>,
) -> Result<Json<MaintenanceConfigDto>, Problem> {
    handlers::put_config(service, path, json).await
}

async fn get_status_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<Uuid>,
) -> Result<Json<MaintenanceStatusDto>, Problem> {
    handlers::get_status(service, path).await
}

async fn check_access_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<Uuid>,
    query: Query<AccessCheckQuery>,
) -> Result<Json<AccessCheckResponse>, Problem> {
    handlers::check_access(service, path, query).await
}
