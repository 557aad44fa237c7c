//! Variable read/write orchestration.
//!
//! Composes the resolver, the mutation guard and the type adapter into the
//! operations a boundary layer calls: resolve a variable, create or update
//! a plain value, create or update a binary upload. The service holds no
//! per-request state; durable reads and writes go through the store traits.

use crate::adapter::{SerializedDecoder, VariableTypeAdapter};
use crate::config::VariableEngineConfig;
use crate::error::VariableError;
use crate::guard::MutationGuard;
use crate::resolver::ScopeResolver;
use crate::store::{LocalVariableStore, SharedVariableStore};
use crate::types::{
    ScopeContext, VariableDescriptor, VariableScope, VariableTypeTag, VariableValue, WriteIntent,
};
use std::sync::Arc;
use tracing::debug;

pub struct VariableService {
    local: Arc<dyn LocalVariableStore>,
    shared: Arc<dyn SharedVariableStore>,
    resolver: ScopeResolver,
    adapter: VariableTypeAdapter,
}

impl VariableService {
    pub fn new(
        local: Arc<dyn LocalVariableStore>,
        shared: Arc<dyn SharedVariableStore>,
        decoder: Arc<dyn SerializedDecoder>,
        config: &VariableEngineConfig,
    ) -> Self {
        Self {
            resolver: ScopeResolver::new(local.clone(), shared.clone()),
            adapter: VariableTypeAdapter::new(decoder, config),
            local,
            shared,
        }
    }

    /// Resolve a variable for reading, honoring the context's scope hint.
    pub async fn get(
        &self,
        name: &str,
        ctx: &ScopeContext,
    ) -> Result<VariableDescriptor, VariableError> {
        let descriptor = self.resolver.resolve(name, ctx).await?;
        debug!(name, scope = ?descriptor.scope, "resolved variable");
        Ok(descriptor)
    }

    pub async fn create(
        &self,
        name: &str,
        ctx: &ScopeContext,
        value: VariableValue,
    ) -> Result<VariableDescriptor, VariableError> {
        self.write(name, ctx, value, WriteIntent::Create).await
    }

    pub async fn update(
        &self,
        name: &str,
        ctx: &ScopeContext,
        value: VariableValue,
    ) -> Result<VariableDescriptor, VariableError> {
        self.write(name, ctx, value, WriteIntent::Update).await
    }

    /// Create from a binary upload: classify the payload first, then run the
    /// regular write flow. Returns the tag so the boundary layer can echo
    /// which decoding path a later reader must use.
    pub async fn create_binary(
        &self,
        name: &str,
        ctx: &ScopeContext,
        type_token: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<(VariableTypeTag, VariableDescriptor), VariableError> {
        let (tag, value) = self.adapter.adapt(type_token, bytes)?;
        let descriptor = self.write(name, ctx, value, WriteIntent::Create).await?;
        Ok((tag, descriptor))
    }

    pub async fn update_binary(
        &self,
        name: &str,
        ctx: &ScopeContext,
        type_token: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<(VariableTypeTag, VariableDescriptor), VariableError> {
        let (tag, value) = self.adapter.adapt(type_token, bytes)?;
        let descriptor = self.write(name, ctx, value, WriteIntent::Update).await?;
        Ok((tag, descriptor))
    }

    /// The write flow shared by every mutation path.
    ///
    /// Writes without a scope hint target the local scope — unlike reads,
    /// there is no fallback chain to pick a scope from. Existence is probed
    /// on the target scope only, the guard authorizes, and the write is
    /// routed to the store owning that scope.
    async fn write(
        &self,
        name: &str,
        ctx: &ScopeContext,
        value: VariableValue,
        intent: WriteIntent,
    ) -> Result<VariableDescriptor, VariableError> {
        if name.is_empty() {
            return Err(VariableError::MissingName);
        }

        let scope = ctx.scope_hint.unwrap_or(VariableScope::Local);
        let exists = self.resolver.exists_on_scope(name, ctx, scope).await?;
        MutationGuard::authorize(name, ctx, scope, exists, intent)?;

        match (scope, ctx.case_instance_id) {
            (VariableScope::Local, _) => {
                self.local
                    .set_variable(ctx.work_item_id, name, value.clone())
                    .await?;
            }
            (VariableScope::Global, Some(case_id)) => {
                self.shared
                    .set_variable(case_id, name, value.clone())
                    .await?;
            }
            // Unreachable past the guard, kept exhaustive.
            (VariableScope::Global, None) => {
                return Err(VariableError::NoSharedScope {
                    work_item_id: ctx.work_item_id,
                    name: name.to_string(),
                })
            }
        }
        debug!(name, ?scope, ?intent, "wrote variable");

        Ok(VariableDescriptor {
            name: name.to_string(),
            scope,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::JsonSerializedDecoder;
    use crate::store_memory::MemoryVariableStore;
    use serde_json::json;
    use uuid::Uuid;

    struct Fixture {
        service: VariableService,
        local: Arc<MemoryVariableStore>,
        shared: Arc<MemoryVariableStore>,
    }

    fn make_fixture() -> Fixture {
        let local = Arc::new(MemoryVariableStore::new());
        let shared = Arc::new(MemoryVariableStore::new());
        Fixture {
            service: VariableService::new(
                local.clone(),
                shared.clone(),
                Arc::new(JsonSerializedDecoder),
                &VariableEngineConfig::default(),
            ),
            local,
            shared,
        }
    }

    #[tokio::test]
    async fn test_write_defaults_to_local_scope() {
        let fx = make_fixture();
        let work_item = Uuid::now_v7();
        let ctx = ScopeContext::new(work_item, Some(Uuid::now_v7()));

        let descriptor = fx.service.create("x", &ctx, json!(1).into()).await.unwrap();
        assert_eq!(descriptor.scope, VariableScope::Local);
        assert!(LocalVariableStore::has_variable(&*fx.local, work_item, "x")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_global_write_routes_to_shared_store() {
        let fx = make_fixture();
        let work_item = Uuid::now_v7();
        let case = Uuid::now_v7();
        let ctx = ScopeContext::new(work_item, Some(case)).with_hint(VariableScope::Global);

        fx.service.create("x", &ctx, json!(1).into()).await.unwrap();

        assert!(SharedVariableStore::has_variable(&*fx.shared, case, "x")
            .await
            .unwrap());
        assert!(!LocalVariableStore::has_variable(&*fx.local, work_item, "x")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_global_write_on_standalone_work_item_is_rejected() {
        let fx = make_fixture();
        let ctx = ScopeContext::new(Uuid::now_v7(), None).with_hint(VariableScope::Global);

        let result = fx.service.create("x", &ctx, json!(1).into()).await;
        assert!(matches!(result, Err(VariableError::NoSharedScope { .. })));
    }

    #[tokio::test]
    async fn test_create_twice_is_rejected() {
        let fx = make_fixture();
        let ctx = ScopeContext::new(Uuid::now_v7(), None);

        fx.service.create("x", &ctx, json!(1).into()).await.unwrap();
        let result = fx.service.create("x", &ctx, json!(2).into()).await;
        assert!(matches!(result, Err(VariableError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_update_missing_is_rejected() {
        let fx = make_fixture();
        let ctx = ScopeContext::new(Uuid::now_v7(), None);

        let result = fx.service.update("x", &ctx, json!(1).into()).await;
        assert!(matches!(result, Err(VariableError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_empty_name_is_rejected() {
        let fx = make_fixture();
        let ctx = ScopeContext::new(Uuid::now_v7(), None);

        let result = fx.service.create("", &ctx, json!(1).into()).await;
        assert!(matches!(result, Err(VariableError::MissingName)));
    }

    #[tokio::test]
    async fn test_binary_create_defaults_to_byte_array() {
        let fx = make_fixture();
        let ctx = ScopeContext::new(Uuid::now_v7(), None);

        let (tag, descriptor) = fx
            .service
            .create_binary("doc", &ctx, None, vec![0xDE, 0xAD])
            .await
            .unwrap();
        assert_eq!(tag, VariableTypeTag::ByteArray);
        assert_eq!(descriptor.value, VariableValue::Bytes(vec![0xDE, 0xAD]));
        assert!(descriptor.value.is_binary());
    }

    #[tokio::test]
    async fn test_binary_update_with_serializable_payload() {
        let fx = make_fixture();
        let ctx = ScopeContext::new(Uuid::now_v7(), None);

        fx.service
            .create("doc", &ctx, json!({"v": 1}).into())
            .await
            .unwrap();
        let (tag, descriptor) = fx
            .service
            .update_binary("doc", &ctx, Some("serializable"), br#"{"v": 2}"#.to_vec())
            .await
            .unwrap();
        assert_eq!(tag, VariableTypeTag::OpaqueSerialized);
        assert_eq!(descriptor.value, VariableValue::Json(json!({"v": 2})));
    }

    /// Shared has `x = 5`, local starts empty. Resolution without a hint
    /// falls back to Global; once local gains `x = 7`, no-hint resolution
    /// flips to Local while an explicit Global hint still sees 5.
    #[tokio::test]
    async fn test_scope_precedence_end_to_end() {
        let fx = make_fixture();
        let work_item = Uuid::now_v7();
        let case = Uuid::now_v7();
        let ctx = ScopeContext::new(work_item, Some(case));

        SharedVariableStore::set_variable(&*fx.shared, case, "x", json!(5).into())
            .await
            .unwrap();

        let descriptor = fx.service.get("x", &ctx).await.unwrap();
        assert_eq!(descriptor.scope, VariableScope::Global);
        assert_eq!(descriptor.value, VariableValue::Json(json!(5)));

        fx.service.create("x", &ctx, json!(7).into()).await.unwrap();

        let descriptor = fx.service.get("x", &ctx).await.unwrap();
        assert_eq!(descriptor.scope, VariableScope::Local);
        assert_eq!(descriptor.value, VariableValue::Json(json!(7)));

        let global_ctx = ctx.clone().with_hint(VariableScope::Global);
        let descriptor = fx.service.get("x", &global_ctx).await.unwrap();
        assert_eq!(descriptor.scope, VariableScope::Global);
        assert_eq!(descriptor.value, VariableValue::Json(json!(5)));
    }
}
