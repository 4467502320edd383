//! Paragraph setting and pagination.
//!
//! The [`LayoutEngine`] takes a flat list of [`Element`]s, breaks paragraphs
//! into lines using the metrics in a [`FontRegistry`], and flows the result
//! through one or more column frames per page.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Node has a height of {0:.2} which exceeds the total page content height of {1:.2}.")]
    ElementTooLarge(f32, f32),
    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(String),
    #[error("Could not read font file '{path}': {reason}")]
    FontFile { path: String, reason: String },
    #[error("Font '{name}' could not be parsed: {reason}")]
    InvalidFont { name: String, reason: String },
    #[error("Unknown font '{0}'")]
    UnknownFont(String),
    #[error("Image error: {0}")]
    Image(String),
}

pub mod elements;
pub mod encoding;
pub mod engine;
pub mod fonts;
pub mod image;
pub mod metrics;
pub mod text;

pub use self::elements::{DrawKind, Element, ImageBlock, Paragraph, PositionedElement, Rule, TextRun};
pub use self::engine::{LayoutEngine, LayoutOutput, PageGeometry};
pub use self::fonts::{FontFace, FontProgram, FontRegistry};
pub use self::image::DecodedImage;
