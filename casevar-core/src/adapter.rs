//! Binary upload typing.
//!
//! Classifies an incoming binary payload into one of the two supported
//! on-the-wire variable representations and shapes the value for the
//! storage boundary. Opaque serialized payloads are decoded through a
//! collaborator-supplied decoder, gated by an immutable policy flag.

use crate::config::VariableEngineConfig;
use crate::error::VariableError;
use crate::types::{VariableTypeTag, VariableValue};
use std::sync::Arc;

/// Decodes an opaque serialized payload into a structured value.
pub trait SerializedDecoder: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<serde_json::Value, VariableError>;
}

/// The shipped decoder: payloads are serialized as JSON documents.
pub struct JsonSerializedDecoder;

impl SerializedDecoder for JsonSerializedDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<serde_json::Value, VariableError> {
        serde_json::from_slice(bytes).map_err(|e| VariableError::UnreadablePayload(e.to_string()))
    }
}

pub struct VariableTypeAdapter {
    decoder: Arc<dyn SerializedDecoder>,
    allow_serialized: bool,
}

impl VariableTypeAdapter {
    pub fn new(decoder: Arc<dyn SerializedDecoder>, config: &VariableEngineConfig) -> Self {
        Self {
            decoder,
            allow_serialized: config.allow_serialized_variables,
        }
    }

    /// Classify a payload and build the value to store.
    ///
    /// An absent type token defaults to the raw byte representation. The
    /// policy rejection for serialized payloads fires before any decode
    /// attempt, and a decode failure leaves nothing mutated.
    pub fn adapt(
        &self,
        type_token: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<(VariableTypeTag, VariableValue), VariableError> {
        let tag = match type_token {
            None => VariableTypeTag::ByteArray,
            Some("binary") => VariableTypeTag::ByteArray,
            Some("serializable") => VariableTypeTag::OpaqueSerialized,
            Some(other) => return Err(VariableError::UnsupportedType(other.to_string())),
        };

        match tag {
            VariableTypeTag::ByteArray => Ok((tag, VariableValue::Bytes(bytes))),
            VariableTypeTag::OpaqueSerialized => {
                if !self.allow_serialized {
                    return Err(VariableError::DisallowedType);
                }
                let value = self.decoder.decode(&bytes)?;
                Ok((tag, VariableValue::Json(value)))
            }
        }
    }
}
