//! In-memory variable stores.
//!
//! Backing for tests and single-process POC deployments. Both scopes share
//! the same map shape, keyed by `(owner id, variable name)`.

use crate::store::{LocalVariableStore, SharedVariableStore};
use crate::types::VariableValue;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryVariableStore {
    rows: Arc<RwLock<HashMap<(Uuid, String), VariableValue>>>,
}

impl MemoryVariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn has(&self, owner: Uuid, name: &str) -> bool {
        let rows = self.rows.read().await;
        rows.contains_key(&(owner, name.to_string()))
    }

    async fn get(&self, owner: Uuid, name: &str) -> Option<VariableValue> {
        let rows = self.rows.read().await;
        rows.get(&(owner, name.to_string())).cloned()
    }

    async fn set(&self, owner: Uuid, name: &str, value: VariableValue) {
        let mut rows = self.rows.write().await;
        rows.insert((owner, name.to_string()), value);
    }
}

#[async_trait]
impl LocalVariableStore for MemoryVariableStore {
    async fn has_variable(&self, work_item_id: Uuid, name: &str) -> Result<bool> {
        Ok(self.has(work_item_id, name).await)
    }

    async fn get_variable(&self, work_item_id: Uuid, name: &str) -> Result<Option<VariableValue>> {
        Ok(self.get(work_item_id, name).await)
    }

    async fn set_variable(
        &self,
        work_item_id: Uuid,
        name: &str,
        value: VariableValue,
    ) -> Result<()> {
        self.set(work_item_id, name, value).await;
        Ok(())
    }
}

#[async_trait]
impl SharedVariableStore for MemoryVariableStore {
    async fn has_variable(&self, case_instance_id: Uuid, name: &str) -> Result<bool> {
        Ok(self.has(case_instance_id, name).await)
    }

    async fn get_variable(
        &self,
        case_instance_id: Uuid,
        name: &str,
    ) -> Result<Option<VariableValue>> {
        Ok(self.get(case_instance_id, name).await)
    }

    async fn set_variable(
        &self,
        case_instance_id: Uuid,
        name: &str,
        value: VariableValue,
    ) -> Result<()> {
        self.set(case_instance_id, name, value).await;
        Ok(())
    }
}
