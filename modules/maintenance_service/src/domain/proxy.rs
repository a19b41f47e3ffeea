//! Maintenance-gated proxies around remote platform services
//!
//! Every call through a [`ServiceProxy`] is checked against the request's
//! [`MaintenanceController`]. A denied call is never forwarded; the caller
//! gets the bounce action instead. Handles returned by the wrapped service are
//! re-wrapped, so a fluent API cannot hand out an ungated reference.

use super::controller::MaintenanceController;
use crate::contract::error::ACCESS_DENIED_MESSAGE_KEY;
use crate::contract::{
    BounceAction, BounceContext, MaintenanceError, RemoteError, RemoteService, RemoteValue,
};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Why a proxied call did not produce a value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProxyError {
    /// Denied, and the caller must surface an access-denied error
    #[error("access denied during maintenance: {message_key}")]
    AccessDenied { message_key: String },

    /// Denied, and the caller must apply this bounce (redirect, close, or nothing)
    #[error("call bounced during maintenance: {0:?}")]
    Bounced(BounceAction),

    /// Denied, and the request context could not be classified
    #[error(transparent)]
    Gate(MaintenanceError),

    /// No sub-service with this name
    #[error("unknown remote service: {0}")]
    UnknownService(String),

    /// The call was allowed and the remote platform failed
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Result of a proxied call
pub enum ProxyValue {
    /// Response data, unchanged
    Data(serde_json::Value),
    /// A gated handle; the proxy itself when the service returned itself
    Proxy(Arc<ServiceProxy>),
}

impl ProxyValue {
    pub fn into_data(self) -> Option<serde_json::Value> {
        match self {
            Self::Data(value) => Some(value),
            Self::Proxy(_) => None,
        }
    }

    pub fn into_proxy(self) -> Option<Arc<ServiceProxy>> {
        match self {
            Self::Data(_) => None,
            Self::Proxy(proxy) => Some(proxy),
        }
    }
}

impl std::fmt::Debug for ProxyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Data(value) => f.debug_tuple("Data").field(value).finish(),
            Self::Proxy(proxy) => f.debug_tuple("Proxy").field(&proxy.name()).finish(),
        }
    }
}

/// Gate in front of one remote service
pub struct ServiceProxy {
    inner: Arc<dyn RemoteService>,
    gate: Arc<MaintenanceController>,
    context: Arc<BounceContext>,
}

impl ServiceProxy {
    pub fn new(
        inner: Arc<dyn RemoteService>,
        gate: Arc<MaintenanceController>,
        context: Arc<BounceContext>,
    ) -> Arc<Self> {
        Arc::new(Self {
            inner,
            gate,
            context,
        })
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Whether this proxy wraps exactly `service`
    pub fn wraps(&self, service: &Arc<dyn RemoteService>) -> bool {
        same_service(&self.inner, service)
    }

    /// Gate, then forward `operation` to the wrapped service
    pub async fn invoke(
        self: &Arc<Self>,
        operation: &str,
        args: Vec<serde_json::Value>,
    ) -> Result<ProxyValue, ProxyError> {
        if !self.gate.can_access(operation) {
            tracing::warn!(
                tenant_id = %self.gate.tenant_id(),
                service = self.name(),
                operation,
                "Remote call refused during maintenance"
            );
            return Err(self.bounce());
        }

        match Arc::clone(&self.inner).call(operation, args).await? {
            RemoteValue::Data(value) => Ok(ProxyValue::Data(value)),
            RemoteValue::Handle(handle) if same_service(&handle, &self.inner) => {
                Ok(ProxyValue::Proxy(Arc::clone(self)))
            }
            RemoteValue::Handle(handle) => Ok(ProxyValue::Proxy(ServiceProxy::new(
                handle,
                Arc::clone(&self.gate),
                Arc::clone(&self.context),
            ))),
        }
    }

    fn bounce(&self) -> ProxyError {
        match self.gate.decide_bounce(&self.context) {
            Ok(BounceAction::ThrowAccessDenied) => ProxyError::AccessDenied {
                message_key: ACCESS_DENIED_MESSAGE_KEY.to_string(),
            },
            Ok(action) => ProxyError::Bounced(action),
            Err(e) => ProxyError::Gate(e),
        }
    }
}

fn same_service(a: &Arc<dyn RemoteService>, b: &Arc<dyn RemoteService>) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}

/// A remote platform API surface made of independently gated sub-services
pub struct ProxiedApi {
    services: BTreeMap<String, Arc<ServiceProxy>>,
}

impl ProxiedApi {
    /// Wrap every sub-service with the same controller and request context
    pub fn new(
        services: impl IntoIterator<Item = Arc<dyn RemoteService>>,
        gate: Arc<MaintenanceController>,
        context: BounceContext,
    ) -> Self {
        let context = Arc::new(context);
        let services = services
            .into_iter()
            .map(|service| {
                let name = service.name().to_string();
                let proxy = ServiceProxy::new(service, Arc::clone(&gate), Arc::clone(&context));
                (name, proxy)
            })
            .collect();

        Self { services }
    }

    pub fn service(&self, name: &str) -> Option<Arc<ServiceProxy>> {
        self.services.get(name).cloned()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.services.keys().map(String::as_str)
    }

    /// Gated call on the named sub-service
    pub async fn invoke(
        &self,
        service: &str,
        operation: &str,
        args: Vec<serde_json::Value>,
    ) -> Result<ProxyValue, ProxyError> {
        let proxy = self
            .services
            .get(service)
            .ok_or_else(|| ProxyError::UnknownService(service.to_string()))?;
        proxy.invoke(operation, args).await
    }
}
