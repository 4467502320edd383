//! PDF output for laid-out folio pages.
//!
//! [`PdfRenderer`] turns a [`folio_layout::LayoutOutput`] into a complete PDF
//! byte buffer: one content stream per page, font and image resources shared
//! by every page, an optional outline tree and the Info dictionary.

mod fonts;
mod images;
mod outline;
mod page;
mod renderer;
mod writer;

pub use renderer::{PdfRenderer, RenderOptions};
pub use writer::PdfWriter;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF generation error: {0}")]
    Pdf(String),
    #[error("Font '{0}' is used on a page but not registered")]
    MissingFont(String),
    #[error("Other rendering error: {0}")]
    Other(String),
}

impl From<lopdf::Error> for RenderError {
    fn from(err: lopdf::Error) -> Self {
        RenderError::Pdf(err.to_string())
    }
}
