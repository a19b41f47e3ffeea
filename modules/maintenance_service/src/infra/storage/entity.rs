//! SeaORM entities for database tables

use sea_orm::entity::prelude::*;

/// Maintenance configuration table entity, one row per tenant
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "maintenance_config")]
pub struct Model {
    /// Tenant ID (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub tenant_id: Uuid,

    /// Mode code (0 disabled, 1 read-only, 2 enabled)
    pub mode: i16,

    /// Notification level code (0 info, 1 success, 2 warning, 3 error)
    pub notification_level: i16,

    /// Notice text
    #[sea_orm(column_type = "Text")]
    pub message: String,

    /// Whether the window start is enabled
    pub start_enabled: bool,

    /// Window start (Unix seconds)
    pub start_time: i64,

    /// Whether the window end is enabled
    pub end_enabled: bool,

    /// Window end (Unix seconds)
    pub end_time: i64,

    /// Last update timestamp
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
