//! Error taxonomy for the variable core.
//!
//! Two families: `AliasConfigError` is fatal at alias-compile time and never
//! surfaces per-request; `VariableError` is the per-request result every
//! resolution/mutation path returns to its caller. Nothing in this crate
//! logs-and-swallows a failure and nothing retries — all failures are either
//! caller-input problems or collaborator-reported states.

use uuid::Uuid;

/// Raised while compiling an alias rule set. Configuration-time only.
#[derive(Debug, thiserror::Error)]
pub enum AliasConfigError {
    #[error("alias rule '{canonical}' declares no prefix options")]
    EmptyPrefixOptions { canonical: String },

    #[error("alias rule '{canonical}' declares no function name options")]
    EmptyNameOptions { canonical: String },

    #[error("alias rule declares an empty canonical prefix or name")]
    EmptyCanonicalForm,

    #[error("alias pattern failed to build: {0}")]
    Pattern(#[from] regex::Error),

    /// The canonical output form re-matches the rule's own matcher, which
    /// would make rewriting non-idempotent.
    #[error("canonical form '{canonical}' re-matches its own alias pattern")]
    CanonicalRematch { canonical: String },

    /// Two families can match the same literal substring; application order
    /// would silently decide the winner.
    #[error("alias families '{first}' and '{second}' match overlapping text")]
    AmbiguousRules { first: String, second: String },
}

/// Per-request failure of a variable read or write.
#[derive(Debug, thiserror::Error)]
pub enum VariableError {
    #[error("work item '{work_item_id}' doesn't have a variable with name: '{name}'")]
    NotFound { work_item_id: Uuid, name: String },

    #[error("variable '{name}' is already present on work item '{work_item_id}'")]
    AlreadyExists { work_item_id: Uuid, name: String },

    #[error(
        "cannot access global variable '{name}' on work item '{work_item_id}', \
         work item is not part of a case"
    )]
    NoSharedScope { work_item_id: Uuid, name: String },

    #[error("only 'binary' and 'serializable' are supported as variable type, got '{0}'")]
    UnsupportedType(String),

    #[error("serialized variables are not allowed by configuration")]
    DisallowedType,

    #[error("cannot decode serialized variable payload: {0}")]
    UnreadablePayload(String),

    #[error("variable name is required")]
    MissingName,

    /// Collaborator store failure, passed through untouched.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}
