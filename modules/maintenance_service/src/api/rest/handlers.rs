//! HTTP request handlers - thin layer that delegates to domain service

use super::{
    dto::*,
    error::{map_domain_error, Problem},
};
use crate::domain::Service;
use axum::{
    extract::{Path, Query},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

/// Get a tenant's maintenance configuration
pub async fn get_config(
    service: Arc<Service>,
    Path(tenant_id): Path<Uuid>,
) -> Result<Json<MaintenanceConfigDto>, Problem> {
    let config = service
        .get_config(tenant_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(config.into()))
}

/// Replace a tenant's maintenance configuration
pub async fn put_config(
    service: Arc<Service>,
    Path(tenant_id): Path<Uuid>,
    Json(req): Json<UpdateMaintenanceConfigRequest>,
) -> Result<Json<MaintenanceConfigDto>, Problem> {
    let config = req
        .into_config(service.options().offset)
        .map_err(map_domain_error)?;

    let stored = service
        .set_config(tenant_id, config)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(stored.into()))
}

/// Mode, activity and notice right now
pub async fn get_status(
    service: Arc<Service>,
    Path(tenant_id): Path<Uuid>,
) -> Result<Json<MaintenanceStatusDto>, Problem> {
    let status = service.status(tenant_id).await.map_err(map_domain_error)?;
    Ok(Json(status.into()))
}

/// Whether a named remote operation would be allowed right now
pub async fn check_access(
    service: Arc<Service>,
    Path(tenant_id): Path<Uuid>,
    Query(query): Query<AccessCheckQuery>,
) -> Result<Json<AccessCheckResponse>, Problem> {
    let allowed = service
        .can_access(tenant_id, &query.operation)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(AccessCheckResponse {
        operation: query.operation,
        allowed,
    }))
}
