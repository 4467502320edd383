use folio_layout::LayoutError;
use folio_render::RenderError;
use folio_style::StyleError;
use thiserror::Error;

/// Every error a template or document operation can raise.
#[derive(Error, Debug)]
pub enum FolioError {
    /// A template declares something that cannot be set up: a missing or
    /// unreadable font file, an unregistered font, a bad page size.
    #[error("Invalid template configuration: {0}")]
    Configuration(String),

    #[error(transparent)]
    Style(#[from] StyleError),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid content description: {0}")]
    Json(#[from] serde_json::Error),
}

impl FolioError {
    pub fn is_unknown_style(&self) -> bool {
        matches!(self, FolioError::Style(StyleError::UnknownStyle(_)))
    }
}
