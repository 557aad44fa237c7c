use serde::{Deserialize, Serialize};

/// Engine-wide policy for the variable core. Built once at wiring time and
/// handed to constructors as an immutable value — never process-global
/// mutable state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableEngineConfig {
    /// Whether binary uploads may carry the 'serializable' type tag. When
    /// false, such requests are rejected before any decode is attempted.
    pub allow_serialized_variables: bool,
}

impl Default for VariableEngineConfig {
    fn default() -> Self {
        Self {
            allow_serialized_variables: true,
        }
    }
}
