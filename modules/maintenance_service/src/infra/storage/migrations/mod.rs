//! Database migrations for maintenance service

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20251018_000001_create_maintenance_config::Migration)]
    }
}

mod m20251018_000001_create_maintenance_config {
    use super::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(MaintenanceConfig::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(MaintenanceConfig::TenantId)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(MaintenanceConfig::Mode)
                                .small_integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(MaintenanceConfig::NotificationLevel)
                                .small_integer()
                                .not_null()
                                .default(2),
                        )
                        .col(
                            ColumnDef::new(MaintenanceConfig::Message)
                                .text()
                                .not_null()
                                .default(""),
                        )
                        .col(
                            ColumnDef::new(MaintenanceConfig::StartEnabled)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(MaintenanceConfig::StartTime)
                                .big_integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(MaintenanceConfig::EndEnabled)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(MaintenanceConfig::EndTime)
                                .big_integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(MaintenanceConfig::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(MaintenanceConfig::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum MaintenanceConfig {
        Table,
        TenantId,
        Mode,
        NotificationLevel,
        Message,
        StartEnabled,
        StartTime,
        EndEnabled,
        EndTime,
        UpdatedAt,
    }
}
