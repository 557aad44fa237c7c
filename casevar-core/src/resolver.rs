//! Scope resolution for variable reads.
//!
//! Decides which store holds the authoritative value for a name, given the
//! work-item context and an optional explicit scope. Read-only: the resolver
//! never writes and keeps no state between calls.

use crate::error::VariableError;
use crate::store::{LocalVariableStore, SharedVariableStore};
use crate::types::{ScopeContext, VariableDescriptor, VariableScope, VariableValue};
use std::sync::Arc;

pub struct ScopeResolver {
    local: Arc<dyn LocalVariableStore>,
    shared: Arc<dyn SharedVariableStore>,
}

impl ScopeResolver {
    pub fn new(local: Arc<dyn LocalVariableStore>, shared: Arc<dyn SharedVariableStore>) -> Self {
        Self { local, shared }
    }

    /// Resolve `name` for the given context.
    ///
    /// Without an explicit scope, local wins: the work item's own value is
    /// the most specific, most recently intended one. The shared scope is a
    /// fallback for values set before or outside the work item. A standalone
    /// work item (no linked case instance) has no shared scope at all.
    pub async fn resolve(
        &self,
        name: &str,
        ctx: &ScopeContext,
    ) -> Result<VariableDescriptor, VariableError> {
        match ctx.scope_hint {
            None => {
                if let Some(value) = self.local.get_variable(ctx.work_item_id, name).await? {
                    return Ok(found(name, VariableScope::Local, value));
                }
                if let Some(case_id) = ctx.case_instance_id {
                    if let Some(value) = self.shared.get_variable(case_id, name).await? {
                        return Ok(found(name, VariableScope::Global, value));
                    }
                }
                Err(self.not_found(name, ctx))
            }
            Some(VariableScope::Global) => {
                if let Some(case_id) = ctx.case_instance_id {
                    if let Some(value) = self.shared.get_variable(case_id, name).await? {
                        return Ok(found(name, VariableScope::Global, value));
                    }
                }
                Err(self.not_found(name, ctx))
            }
            Some(VariableScope::Local) => {
                match self.local.get_variable(ctx.work_item_id, name).await? {
                    Some(value) => Ok(found(name, VariableScope::Local, value)),
                    None => Err(self.not_found(name, ctx)),
                }
            }
        }
    }

    /// Existence probe for the single scope a write targets. Unlike reads,
    /// there is no fallback: a Global probe on a standalone work item simply
    /// reports absent.
    pub async fn exists_on_scope(
        &self,
        name: &str,
        ctx: &ScopeContext,
        scope: VariableScope,
    ) -> Result<bool, VariableError> {
        let exists = match scope {
            VariableScope::Local => self.local.has_variable(ctx.work_item_id, name).await?,
            VariableScope::Global => match ctx.case_instance_id {
                Some(case_id) => self.shared.has_variable(case_id, name).await?,
                None => false,
            },
        };
        Ok(exists)
    }

    fn not_found(&self, name: &str, ctx: &ScopeContext) -> VariableError {
        VariableError::NotFound {
            work_item_id: ctx.work_item_id,
            name: name.to_string(),
        }
    }
}

fn found(name: &str, scope: VariableScope, value: VariableValue) -> VariableDescriptor {
    VariableDescriptor {
        name: name.to_string(),
        scope,
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store_memory::MemoryVariableStore;
    use crate::types::VariableValue;
    use serde_json::json;
    use uuid::Uuid;

    struct Fixture {
        resolver: ScopeResolver,
        local: Arc<MemoryVariableStore>,
        shared: Arc<MemoryVariableStore>,
    }

    fn make_fixture() -> Fixture {
        let local = Arc::new(MemoryVariableStore::new());
        let shared = Arc::new(MemoryVariableStore::new());
        Fixture {
            resolver: ScopeResolver::new(local.clone(), shared.clone()),
            local,
            shared,
        }
    }

    #[tokio::test]
    async fn test_local_wins_without_hint() {
        let fx = make_fixture();
        let work_item = Uuid::now_v7();
        let case = Uuid::now_v7();
        let ctx = ScopeContext::new(work_item, Some(case));

        LocalVariableStore::set_variable(&*fx.local, work_item, "x", json!(7).into())
            .await
            .unwrap();
        SharedVariableStore::set_variable(&*fx.shared, case, "x", json!(5).into())
            .await
            .unwrap();

        let descriptor = fx.resolver.resolve("x", &ctx).await.unwrap();
        assert_eq!(descriptor.scope, VariableScope::Local);
        assert_eq!(descriptor.value, VariableValue::Json(json!(7)));
    }

    #[tokio::test]
    async fn test_shared_fallback_without_hint() {
        let fx = make_fixture();
        let work_item = Uuid::now_v7();
        let case = Uuid::now_v7();
        let ctx = ScopeContext::new(work_item, Some(case));

        SharedVariableStore::set_variable(&*fx.shared, case, "x", json!(5).into())
            .await
            .unwrap();

        let descriptor = fx.resolver.resolve("x", &ctx).await.unwrap();
        assert_eq!(descriptor.scope, VariableScope::Global);
        assert_eq!(descriptor.value, VariableValue::Json(json!(5)));
    }

    #[tokio::test]
    async fn test_standalone_work_item_has_no_fallback() {
        let fx = make_fixture();
        let ctx = ScopeContext::new(Uuid::now_v7(), None);

        let result = fx.resolver.resolve("x", &ctx).await;
        assert!(matches!(result, Err(VariableError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_global_hint_ignores_local_value() {
        let fx = make_fixture();
        let work_item = Uuid::now_v7();
        let case = Uuid::now_v7();

        LocalVariableStore::set_variable(&*fx.local, work_item, "x", json!(7).into())
            .await
            .unwrap();

        let ctx = ScopeContext::new(work_item, Some(case)).with_hint(VariableScope::Global);
        let result = fx.resolver.resolve("x", &ctx).await;
        assert!(matches!(result, Err(VariableError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_global_hint_on_standalone_work_item() {
        let fx = make_fixture();
        let ctx = ScopeContext::new(Uuid::now_v7(), None).with_hint(VariableScope::Global);

        let result = fx.resolver.resolve("x", &ctx).await;
        assert!(matches!(result, Err(VariableError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_local_hint_ignores_shared_value() {
        let fx = make_fixture();
        let work_item = Uuid::now_v7();
        let case = Uuid::now_v7();

        SharedVariableStore::set_variable(&*fx.shared, case, "x", json!(5).into())
            .await
            .unwrap();

        let ctx = ScopeContext::new(work_item, Some(case)).with_hint(VariableScope::Local);
        let result = fx.resolver.resolve("x", &ctx).await;
        assert!(matches!(result, Err(VariableError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_exists_on_scope_global_standalone_reports_absent() {
        let fx = make_fixture();
        let ctx = ScopeContext::new(Uuid::now_v7(), None);

        let exists = fx
            .resolver
            .exists_on_scope("x", &ctx, VariableScope::Global)
            .await
            .unwrap();
        assert!(!exists);
    }
}
