//! Page gate: maintenance gating for inbound page requests
//!
//! Requests that carry a [`TenantId`] extension are checked with the HTTP
//! method name as the operation, so reads pass in read-only mode and writes
//! are diverted. A request that goes through sees the tenant's controller and
//! notification scope in its extensions; the maintenance notice, if any is
//! left unclaimed, is attached to the response extensions.

use super::error::map_domain_error;
use crate::contract::{BounceAction, BounceContext, NotificationScope};
use crate::domain::Service;
use axum::{
    extract::{Request, State},
    http::header::{HeaderMap, REFERER},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use uuid::Uuid;

/// Tenant the request belongs to, set by an upstream layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantId(pub Uuid);

/// Whether the caller is a site administrator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SiteAdmin(pub bool);

/// The caller's preferred landing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomePath(pub String);

#[derive(Clone)]
pub struct PageGateState {
    service: Arc<Service>,
    www_root: String,
}

impl PageGateState {
    pub fn new(service: Arc<Service>, www_root: impl Into<String>) -> Self {
        Self {
            service,
            www_root: www_root.into(),
        }
    }
}

fn is_ajax(headers: &HeaderMap) -> bool {
    headers
        .get("x-requested-with")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.eq_ignore_ascii_case("XMLHttpRequest"))
}

fn bounce_context(request: &Request, www_root: &str) -> BounceContext {
    let target = request
        .uri()
        .path_and_query()
        .map_or_else(|| request.uri().path(), |pq| pq.as_str());
    let mut context = BounceContext::web(target)
        .with_www_root(www_root)
        .with_ajax(is_ajax(request.headers()))
        .with_site_admin(
            request
                .extensions()
                .get::<SiteAdmin>()
                .copied()
                .unwrap_or_default()
                .0,
        );

    if let Some(referer) = request
        .headers()
        .get(REFERER)
        .and_then(|value| value.to_str().ok())
    {
        context = context.with_referer(referer);
    }
    if let Some(HomePath(home)) = request.extensions().get::<HomePath>() {
        context = context.with_home(home.clone());
    }
    context
}

/// Gate a request against its tenant's maintenance state
pub async fn page_gate(
    State(state): State<PageGateState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(TenantId(tenant_id)) = request.extensions().get::<TenantId>().copied() else {
        return next.run(request).await;
    };

    let controller = match state.service.controller(tenant_id).await {
        Ok(controller) => Arc::new(controller),
        Err(e) => return map_domain_error(e).into_response(),
    };

    let operation = request.method().as_str().to_string();
    if !controller.can_access(&operation) {
        let context = bounce_context(&request, &state.www_root);
        match controller.decide_bounce(&context) {
            Ok(BounceAction::PassThrough) => {}
            Ok(action) => {
                tracing::warn!(
                    %tenant_id,
                    operation = %operation,
                    target = %context.target,
                    action = ?action,
                    "Request diverted by maintenance gate"
                );
                return action.into_response();
            }
            Err(e) => return map_domain_error(e).into_response(),
        }
    }

    let scope = Arc::new(NotificationScope::new());
    request.extensions_mut().insert(Arc::clone(&controller));
    request.extensions_mut().insert(Arc::clone(&scope));

    let mut response = next.run(request).await;
    if let Some(payload) = controller.notify(&scope) {
        response.extensions_mut().insert(payload);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_context_from_request() {
        let mut request = Request::builder()
            .method("POST")
            .uri("/mod/opencast/upload.php?id=4")
            .header(REFERER, "https://lms.example.org/course/view.php?id=4")
            .header("X-Requested-With", "xmlhttprequest")
            .body(Body::empty())
            .unwrap();
        request.extensions_mut().insert(SiteAdmin(true));
        request
            .extensions_mut()
            .insert(HomePath("/my/".to_string()));

        let context = bounce_context(&request, "/");
        assert_eq!(context.target, "/mod/opencast/upload.php?id=4");
        assert_eq!(
            context.referer.as_deref(),
            Some("https://lms.example.org/course/view.php?id=4")
        );
        assert!(context.is_ajax);
        assert!(context.is_site_admin);
        assert_eq!(context.home.as_deref(), Some("/my/"));
    }

    #[test]
    fn test_context_defaults() {
        let request = Request::builder()
            .uri("/blocks/opencast/index.php")
            .body(Body::empty())
            .unwrap();

        let context = bounce_context(&request, "/");
        assert!(context.referer.is_none());
        assert!(!context.is_ajax);
        assert!(!context.is_site_admin);
        assert!(context.home.is_none());
    }
}
