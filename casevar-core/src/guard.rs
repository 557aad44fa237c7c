//! Write authorization.
//!
//! Validates a create/update attempt against the existence facts the caller
//! already gathered. Pure: accepts or rejects, never touches a store. The
//! existence check and the eventual write are not atomic in this crate —
//! same-owner same-name writes must be serialized by the persistence
//! backend.

use crate::error::VariableError;
use crate::types::{ScopeContext, VariableScope, WriteIntent};

pub struct MutationGuard;

impl MutationGuard {
    /// Check order: a standalone work item can never hold shared-scope
    /// variables, so the missing-case rejection fires before any existence
    /// rule; then create-over-existing and update-over-missing.
    pub fn authorize(
        name: &str,
        ctx: &ScopeContext,
        scope: VariableScope,
        exists: bool,
        intent: WriteIntent,
    ) -> Result<(), VariableError> {
        if scope == VariableScope::Global && ctx.case_instance_id.is_none() {
            return Err(VariableError::NoSharedScope {
                work_item_id: ctx.work_item_id,
                name: name.to_string(),
            });
        }

        match intent {
            WriteIntent::Create if exists => Err(VariableError::AlreadyExists {
                work_item_id: ctx.work_item_id,
                name: name.to_string(),
            }),
            WriteIntent::Update if !exists => Err(VariableError::NotFound {
                work_item_id: ctx.work_item_id,
                name: name.to_string(),
            }),
            _ => Ok(()),
        }
    }
}
