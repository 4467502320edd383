use serde::{Deserialize, Serialize};

/// A bookmark in the document outline, produced for each heading.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutlineEntry {
    /// Outline depth (0 = top level, taken from h1).
    pub level: u8,
    /// The plain text of the heading.
    pub title: String,
    /// Zero-based index of the page the heading landed on.
    pub page_index: usize,
    /// Distance from the top of the page to the top of the heading, in points.
    pub y: f32,
}

/// Metadata written to the PDF Info dictionary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}
