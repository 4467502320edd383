//! Flowables accepted by the engine and the positioned primitives it emits.

use crate::image::DecodedImage;
use folio_style::{Style, TextAlign};
use folio_types::Color;
use std::sync::Arc;

/// A block of text set in one resolved style.
#[derive(Debug, Clone)]
pub struct Paragraph {
    pub text: String,
    pub style: Arc<Style>,
    /// List marker drawn in the left indent, hanging before the first line.
    pub marker: Option<String>,
    /// Bookmark depth when the paragraph is a heading.
    pub outline_level: Option<u8>,
}

impl Paragraph {
    pub fn new(text: impl Into<String>, style: Arc<Style>) -> Self {
        Self {
            text: text.into(),
            style,
            marker: None,
            outline_level: None,
        }
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = Some(marker.into());
        self
    }

    pub fn with_outline_level(mut self, level: u8) -> Self {
        self.outline_level = Some(level);
        self
    }
}

/// A horizontal rule spanning the frame minus its insets.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub thickness: f32,
    pub color: Color,
    pub left_inset: f32,
    pub right_inset: f32,
}

#[derive(Debug, Clone)]
pub struct ImageBlock {
    pub image: Arc<DecodedImage>,
    /// Requested display width; natural size (capped to the frame) if unset.
    pub width: Option<f32>,
    pub alignment: TextAlign,
}

/// One unit of flowing content.
#[derive(Debug, Clone)]
pub enum Element {
    Paragraph(Paragraph),
    Spacer { height: f32 },
    Rule(Rule),
    Image(ImageBlock),
    PageBreak,
    ColumnBreak,
}

impl Element {
    pub fn kind(&self) -> &'static str {
        match self {
            Element::Paragraph(_) => "Paragraph",
            Element::Spacer { .. } => "Spacer",
            Element::Rule(_) => "Rule",
            Element::Image(_) => "Image",
            Element::PageBreak => "PageBreak",
            Element::ColumnBreak => "ColumnBreak",
        }
    }
}

/// A single line of text ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub font: String,
    pub size: f32,
    pub color: Color,
    /// Extra space added to each word gap (justified lines).
    pub word_spacing: f32,
}

/// A primitive placed on a page. Coordinates are measured from the top-left
/// corner of the page, in points; `y` is the top of the element's box.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedElement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: DrawKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawKind {
    /// `baseline` is the distance from `y` down to the text baseline.
    Text { run: TextRun, baseline: f32 },
    Line { thickness: f32, color: Color },
    /// Index into [`crate::LayoutOutput::images`].
    Image { index: usize },
}
