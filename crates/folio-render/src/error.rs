//! Renderer failure modes.

use folio_core::LayoutError;
use thiserror::Error;

/// Errors surfaced while building a draw list.
#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    /// A character carries a color string in none of the supported forms.
    #[error("unrecognized color string {0:?}")]
    InvalidColor(String),
    /// The layout core reported an inconsistency while being traversed.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}
