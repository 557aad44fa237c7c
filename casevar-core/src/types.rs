use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Scopes ───────────────────────────────────────────────────

/// Storage scope a variable resolved to (or is written into).
///
/// `Local` is the work item itself; `Global` is the case instance the work
/// item belongs to. A request may also carry *no* scope, modeled as
/// `Option<VariableScope>` so every consumer matches exhaustively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableScope {
    Local,
    Global,
}

impl VariableScope {
    /// Parse the wire spelling used by boundary layers. Unknown spellings
    /// map to `None`, which callers treat as "no scope supplied".
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "local" => Some(VariableScope::Local),
            "global" => Some(VariableScope::Global),
            _ => None,
        }
    }
}

/// Per-operation resolution context. Built fresh per request, never stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeContext {
    /// The work item (task/activity instance) the operation targets.
    pub work_item_id: Uuid,
    /// The owning case instance. `None` for standalone work items, which
    /// have no shared scope at all.
    pub case_instance_id: Option<Uuid>,
    /// Explicit scope requested by the caller, if any.
    pub scope_hint: Option<VariableScope>,
}

impl ScopeContext {
    pub fn new(work_item_id: Uuid, case_instance_id: Option<Uuid>) -> Self {
        Self {
            work_item_id,
            case_instance_id,
            scope_hint: None,
        }
    }

    pub fn with_hint(mut self, hint: VariableScope) -> Self {
        self.scope_hint = Some(hint);
        self
    }
}

// ─── Values ───────────────────────────────────────────────────

/// A variable payload. The core never interprets `Json` contents; it only
/// routes values between callers and stores.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    Json(serde_json::Value),
    Bytes(Vec<u8>),
}

impl VariableValue {
    /// True when a reader must use the binary decoding path.
    pub fn is_binary(&self) -> bool {
        matches!(self, VariableValue::Bytes(_))
    }
}

impl From<serde_json::Value> for VariableValue {
    fn from(value: serde_json::Value) -> Self {
        VariableValue::Json(value)
    }
}

/// Produced by a successful resolution or write. Owned by the caller; the
/// core retains nothing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VariableDescriptor {
    pub name: String,
    pub scope: VariableScope,
    pub value: VariableValue,
}

// ─── Binary upload typing ─────────────────────────────────────

/// On-the-wire representation of a binary variable upload. Determines which
/// decoding path a later reader must use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableTypeTag {
    /// Raw byte sequence, stored unchanged.
    ByteArray,
    /// Opaque serialized object, decoded before storage.
    OpaqueSerialized,
}

impl VariableTypeTag {
    /// Wire token accepted for this tag ("binary" / "serializable").
    pub fn as_token(&self) -> &'static str {
        match self {
            VariableTypeTag::ByteArray => "binary",
            VariableTypeTag::OpaqueSerialized => "serializable",
        }
    }
}

// ─── Write intent ─────────────────────────────────────────────

/// Create can only target new variables; existing ones must be updated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WriteIntent {
    Create,
    Update,
}
