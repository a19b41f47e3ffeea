//! Common test utilities: service builders and remote platform mocks
#![allow(dead_code)]

use async_trait::async_trait;
use maintenance_service::config::Config;
use maintenance_service::contract::{
    RemoteError, RemoteMaintenanceQuery, RemoteMaintenanceStatus, RemoteService, RemoteValue,
};
use maintenance_service::domain::{EventPublisher, FixedClock, MaintenanceEvent, Service};
use maintenance_service::infra::storage::memory::InMemoryConfigurationProvider;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::Arc;

/// Fixed "now" for deterministic window evaluation
pub const NOW: i64 = 1_700_000_000;

/// Event publisher that keeps every event
#[derive(Default)]
pub struct RecordingPublisher {
    pub events: Mutex<Vec<MaintenanceEvent>>,
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish_audit(&self, event: MaintenanceEvent) -> anyhow::Result<()> {
        self.events.lock().push(event);
        Ok(())
    }
}

/// Event publisher whose sink is down
pub struct FailingPublisher;

#[async_trait]
impl EventPublisher for FailingPublisher {
    async fn publish_audit(&self, _event: MaintenanceEvent) -> anyhow::Result<()> {
        anyhow::bail!("audit sink unavailable")
    }
}

pub struct TestContext {
    pub provider: Arc<InMemoryConfigurationProvider>,
    pub publisher: Arc<RecordingPublisher>,
    pub clock: Arc<FixedClock>,
    pub service: Arc<Service>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let provider = Arc::new(InMemoryConfigurationProvider::new());
        let publisher = Arc::new(RecordingPublisher::default());
        let clock = Arc::new(FixedClock::at_timestamp(NOW));
        let service = Service::new(provider.clone(), publisher.clone(), &config)
            .expect("default config is valid")
            .with_clock(clock.clone());

        Self {
            provider,
            publisher,
            clock,
            service: Arc::new(service),
        }
    }
}

/// Remote "events" sub-service of a video platform
///
/// - `getEvent(id)` returns the event
/// - `withLimit(n)` returns the service itself (fluent API)
/// - `series()` returns the series sub-service
/// - `deleteEvent(id)` deletes
/// - `getTrack` fails with HTTP 503
pub struct EventsService {
    pub calls: Mutex<Vec<String>>,
    pub series: Arc<SeriesService>,
}

impl EventsService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            series: Arc::new(SeriesService::default()),
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl RemoteService for EventsService {
    fn name(&self) -> &str {
        "events"
    }

    async fn call(
        self: Arc<Self>,
        operation: &str,
        args: Vec<Value>,
    ) -> Result<RemoteValue, RemoteError> {
        self.calls.lock().push(operation.to_string());
        match operation {
            "getEvent" => Ok(RemoteValue::Data(json!({
                "identifier": args.first().cloned().unwrap_or(Value::Null),
                "title": "Lecture 1",
            }))),
            "withLimit" => Ok(RemoteValue::Handle(self)),
            "series" => Ok(RemoteValue::Handle(self.series.clone())),
            "deleteEvent" => Ok(RemoteValue::Data(json!({ "deleted": true }))),
            "getTrack" => Err(RemoteError::Status {
                code: 503,
                message: "Service Unavailable".to_string(),
            }),
            _ => Err(RemoteError::Unsupported),
        }
    }
}

/// Remote "series" sub-service
#[derive(Default)]
pub struct SeriesService {
    pub calls: Mutex<Vec<String>>,
}

#[async_trait]
impl RemoteService for SeriesService {
    fn name(&self) -> &str {
        "series"
    }

    async fn call(
        self: Arc<Self>,
        operation: &str,
        _args: Vec<Value>,
    ) -> Result<RemoteValue, RemoteError> {
        self.calls.lock().push(operation.to_string());
        Ok(RemoteValue::Data(json!({ "operation": operation })))
    }
}

/// Remote platform reporting a fixed maintenance state
pub struct StaticRemoteStatus(pub Result<RemoteMaintenanceStatus, RemoteError>);

#[async_trait]
impl RemoteMaintenanceQuery for StaticRemoteStatus {
    async fn remote_maintenance_status(&self) -> Result<RemoteMaintenanceStatus, RemoteError> {
        self.0.clone()
    }
}
