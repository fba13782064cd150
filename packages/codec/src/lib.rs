//! # Vellum Codec Contract
//!
//! Two-way conversion between a document's canonical text form and the
//! structured tree the rich editing surface operates on.
//!
//! The controller consumes this contract; it never implements parsing or
//! printing itself. Implementations live with the rich surface they serve
//! (a markdown codec, a test fake, a passthrough wrapper).

use serde_json::Value;
use thiserror::Error;

/// The parsed tree form of a document.
///
/// The rich editing surface's native value is a JSON document tree; the
/// controller treats it as opaque and never inspects its structure.
pub type StructuredValue = Value;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Encode error: {0}")]
    Encode(String),
}

/// Converts canonical text to and from the structured tree.
///
/// Contract: `encode(decode(t))` approximates `t` up to leading/trailing
/// whitespace. Exactness across arbitrary input is not guaranteed; callers
/// compensate by trimming before comparison, not by validating round-trip
/// fidelity.
pub trait Codec: Send + Sync {
    /// Parse canonical text into the structured tree.
    fn decode(&self, text: &str) -> Result<StructuredValue, CodecError>;

    /// Print the structured tree back to canonical text.
    fn encode(&self, value: &StructuredValue) -> Result<String, CodecError>;
}
