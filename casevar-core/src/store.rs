use crate::types::VariableValue;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Work-item-local variable rows.
///
/// The core reads and writes exclusively through this trait, enabling
/// pluggable backends (MemoryVariableStore for POC, Postgres for
/// production). Serializing concurrent writes for the same `(work_item_id,
/// name)` pair is the backend's responsibility — the core's existence check
/// and the eventual write are not atomic.
#[async_trait]
pub trait LocalVariableStore: Send + Sync {
    async fn has_variable(&self, work_item_id: Uuid, name: &str) -> Result<bool>;
    async fn get_variable(&self, work_item_id: Uuid, name: &str) -> Result<Option<VariableValue>>;
    async fn set_variable(&self, work_item_id: Uuid, name: &str, value: VariableValue)
        -> Result<()>;
}

/// Case-instance (shared scope) variable rows.
#[async_trait]
pub trait SharedVariableStore: Send + Sync {
    async fn has_variable(&self, case_instance_id: Uuid, name: &str) -> Result<bool>;
    async fn get_variable(
        &self,
        case_instance_id: Uuid,
        name: &str,
    ) -> Result<Option<VariableValue>>;
    async fn set_variable(
        &self,
        case_instance_id: Uuid,
        name: &str,
        value: VariableValue,
    ) -> Result<()>;
}
