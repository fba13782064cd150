//! # Rich Change Classification
//!
//! Change events from the rich surface carry the surface's new value plus the
//! operations that produced it. Operations are classified content vs.
//! non-content: pure selection movement and wholesale value replacement carry
//! no semantic change and must never mark the document dirty or invoke the
//! codec.

use serde::{Deserialize, Serialize};
use vellum_codec::StructuredValue;

/// Kind of operation the rich surface applied to its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    InsertText,
    RemoveText,
    InsertNode,
    RemoveNode,
    SplitNode,
    MergeNode,
    SetNode,
    AddMark,
    RemoveMark,
    SetSelection,
    SetValue,
}

impl OperationKind {
    /// Whether the operation changes document content.
    pub fn is_content(self) -> bool {
        !matches!(self, OperationKind::SetSelection | OperationKind::SetValue)
    }
}

/// A change event emitted by the rich editing surface.
#[derive(Debug, Clone)]
pub struct RichChange {
    /// The surface's new value, carried explicitly because the surface's own
    /// state commit is asynchronous and may not be observable yet.
    pub value: StructuredValue,

    /// Operations that produced this value.
    pub operations: Vec<OperationKind>,
}

impl RichChange {
    pub fn new(value: StructuredValue, operations: Vec<OperationKind>) -> Self {
        Self { value, operations }
    }

    /// True if at least one operation survives the non-content filter.
    pub fn has_content_ops(&self) -> bool {
        self.operations.iter().any(|op| op.is_content())
    }
}
