//! JSON descriptions of document content, as read by the CLI.

use crate::document::{Document, LINE_BREAK_HEIGHT};
use crate::error::FolioError;
use folio_style::ElementOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_paragraph_style() -> String {
    "p".to_string()
}

fn default_list_style() -> String {
    "ul".to_string()
}

fn default_rule_height() -> f32 {
    1.0
}

fn default_spacer_height() -> f32 {
    LINE_BREAK_HEIGHT
}

/// One content call. A JSON array of these, each tagged by `type`,
/// describes a whole document:
///
/// ```json
/// [
///   {"type": "heading", "level": 1, "text": "Report"},
///   {"type": "paragraph", "text": "Body", "options": {"align": "justify"}},
///   {"type": "list", "style": "ol", "items": ["one", "two"]},
///   {"type": "page_break"}
/// ]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentItem {
    Paragraph {
        text: String,
        #[serde(default = "default_paragraph_style")]
        style: String,
        #[serde(default)]
        options: Option<ElementOptions>,
    },
    Heading {
        level: u8,
        text: String,
        #[serde(default)]
        options: Option<ElementOptions>,
    },
    List {
        items: Vec<String>,
        #[serde(default = "default_list_style")]
        style: String,
        #[serde(default)]
        options: Option<ElementOptions>,
    },
    Separator {
        #[serde(default = "default_rule_height")]
        height: f32,
        #[serde(default)]
        options: Option<ElementOptions>,
    },
    Spacer {
        #[serde(default = "default_spacer_height")]
        height: f32,
    },
    Image {
        path: PathBuf,
        #[serde(default)]
        width: Option<f32>,
        #[serde(default)]
        options: Option<ElementOptions>,
    },
    PageBreak,
    ColumnBreak,
}

pub fn parse_content(json: &str) -> Result<Vec<ContentItem>, FolioError> {
    Ok(serde_json::from_str(json)?)
}

impl Document {
    /// Applies content items in order. Relative image paths are taken from
    /// `base_dir`.
    pub fn add_content(&mut self, items: &[ContentItem], base_dir: &Path) -> Result<(), FolioError> {
        for item in items {
            match item {
                ContentItem::Paragraph { text, style, options } => {
                    self.add_paragraph(text, style, options.as_ref())?
                }
                ContentItem::Heading { level, text, options } => {
                    self.heading(*level, text, options.as_ref())?
                }
                ContentItem::List { items, style, options } => {
                    self.add_list(items, style, options.as_ref())?
                }
                ContentItem::Separator { height, options } => {
                    self.add_separator(*height, options.as_ref())?
                }
                ContentItem::Spacer { height } => self.add_spacer(*height)?,
                ContentItem::Image { path, width, options } => {
                    let path = if path.is_relative() { base_dir.join(path) } else { path.clone() };
                    self.add_image(path, *width, options.as_ref())?
                }
                ContentItem::PageBreak => self.add_page_break(),
                ContentItem::ColumnBreak => self.add_column_break(),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{Template, TemplateConfig};
    use folio_layout::Element;

    #[test]
    fn test_parse_content_defaults() {
        let items = parse_content(
            r#"[
                {"type": "paragraph", "text": "Hello"},
                {"type": "list", "items": ["a"]},
                {"type": "separator"},
                {"type": "spacer"},
                {"type": "column_break"}
            ]"#,
        )
        .unwrap();
        assert_eq!(
            items,
            vec![
                ContentItem::Paragraph { text: "Hello".into(), style: "p".into(), options: None },
                ContentItem::List { items: vec!["a".into()], style: "ul".into(), options: None },
                ContentItem::Separator { height: 1.0, options: None },
                ContentItem::Spacer { height: LINE_BREAK_HEIGHT },
                ContentItem::ColumnBreak,
            ]
        );
    }

    #[test]
    fn test_unknown_item_type_is_a_json_error() {
        let err = parse_content(r#"[{"type": "table"}]"#).unwrap_err();
        assert!(matches!(err, FolioError::Json(_)));
    }

    #[test]
    fn test_add_content_appends_in_order() {
        let items = parse_content(
            r#"[
                {"type": "heading", "level": 2, "text": "Intro"},
                {"type": "paragraph", "text": "Red", "options": {"color": "red"}},
                {"type": "list", "style": "ol", "items": ["one", "two"]},
                {"type": "page_break"}
            ]"#,
        )
        .unwrap();
        let mut doc = Document::new(Template::new(TemplateConfig::default()).unwrap());
        doc.add_content(&items, Path::new(".")).unwrap();
        let kinds: Vec<&str> = doc.elements().iter().map(Element::kind).collect();
        assert_eq!(kinds, vec!["Paragraph", "Paragraph", "Paragraph", "Paragraph", "PageBreak"]);
    }

    #[test]
    fn test_add_content_stops_at_first_error() {
        let items = parse_content(
            r#"[
                {"type": "paragraph", "text": "ok"},
                {"type": "paragraph", "text": "bad", "style": "Missing"},
                {"type": "paragraph", "text": "never"}
            ]"#,
        )
        .unwrap();
        let mut doc = Document::new(Template::new(TemplateConfig::default()).unwrap());
        let err = doc.add_content(&items, Path::new(".")).unwrap_err();
        assert!(err.is_unknown_style());
        assert_eq!(doc.elements().len(), 1);
    }

    #[test]
    fn test_negative_spacer_is_rejected() {
        let items = parse_content(r#"[{"type": "spacer", "height": -4}]"#).unwrap();
        let mut doc = Document::new(Template::new(TemplateConfig::default()).unwrap());
        let err = doc.add_content(&items, Path::new(".")).unwrap_err();
        assert!(matches!(err, FolioError::Style(_)));
        assert!(doc.elements().is_empty());
    }
}
