//! Error types for the editor

use thiserror::Error;

use crate::document::EditorMode;
use crate::store::StoreError;
use vellum_codec::CodecError;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid mode transition: {from:?} -> {to:?}")]
    InvalidTransition { from: EditorMode, to: EditorMode },

    #[error("The {expected:?} surface is not active (current mode: {actual:?})")]
    WrongSurface {
        expected: EditorMode,
        actual: EditorMode,
    },
}
