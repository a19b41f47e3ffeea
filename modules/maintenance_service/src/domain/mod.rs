//! Domain layer - business logic and services

pub mod bounce;
pub mod clock;
pub mod controller;
pub mod events;
pub mod policy;
pub mod proxy;
pub mod repository;
pub mod service;
pub mod validation;
pub mod window;

pub use bounce::{BounceStrategy, SitePath};
pub use clock::{Clock, FixedClock, SystemClock};
pub use controller::{ControllerOptions, MaintenanceController};
pub use events::{EventPublisher, MaintenanceEvent, NoOpEventPublisher};
pub use proxy::{ProxiedApi, ProxyError, ProxyValue, ServiceProxy};
pub use repository::ConfigurationProvider;
pub use service::Service;
