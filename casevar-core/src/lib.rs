//! casevar-core: the variable-resolution core of a case-execution runtime.
//!
//! This crate contains the pure resolution and rewriting logic with NO
//! persistence dependencies:
//! - Expression alias rewriting (shorthand calls to the canonical form)
//! - Scoped variable resolution (work-item-local vs. linked case scope)
//! - Create/update mutation guarding
//! - Binary upload typing behind an immutable policy flag
//!
//! Durable storage stays behind the `LocalVariableStore` /
//! `SharedVariableStore` traits (MemoryVariableStore for POC, a database
//! backend in production); the expression evaluator consumes the rewriter's
//! output and lives outside this crate.

pub mod adapter;
pub mod config;
pub mod el;
pub mod error;
pub mod guard;
pub mod resolver;
pub mod service;
pub mod store;
pub mod store_memory;
pub mod types;

// Re-export commonly used types
pub use adapter::{JsonSerializedDecoder, SerializedDecoder, VariableTypeAdapter};
pub use config::VariableEngineConfig;
pub use el::{AliasRule, Arity, ExpressionRewriter};
pub use error::{AliasConfigError, VariableError};
pub use guard::MutationGuard;
pub use resolver::ScopeResolver;
pub use service::VariableService;
pub use store::{LocalVariableStore, SharedVariableStore};
pub use store_memory::MemoryVariableStore;
pub use types::{
    ScopeContext, VariableDescriptor, VariableScope, VariableTypeTag, VariableValue, WriteIntent,
};
