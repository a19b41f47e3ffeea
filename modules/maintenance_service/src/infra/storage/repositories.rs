//! SeaORM configuration provider

use super::{entity, mapper::to_active_model};
use crate::contract::MaintenanceConfig;
use crate::domain::repository::ConfigurationProvider;
use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};
use std::sync::Arc;
use uuid::Uuid;

pub struct SeaOrmConfigurationProvider {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmConfigurationProvider {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ConfigurationProvider for SeaOrmConfigurationProvider {
    async fn get(&self, tenant_id: Uuid) -> Result<Option<MaintenanceConfig>> {
        entity::Entity::find_by_id(tenant_id)
            .one(&*self.db)
            .await?
            .map(MaintenanceConfig::try_from)
            .transpose()
    }

    async fn set(&self, tenant_id: Uuid, config: &MaintenanceConfig) -> Result<()> {
        let existing = entity::Entity::find_by_id(tenant_id).one(&*self.db).await?;
        let active = to_active_model(tenant_id, config);

        if existing.is_some() {
            entity::Entity::update(active).exec(&*self.db).await?;
        } else {
            entity::Entity::insert(active).exec(&*self.db).await?;
        }

        Ok(())
    }
}
