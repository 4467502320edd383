//! Documents: an ordered list of content built against a template.

use crate::error::FolioError;
use crate::template::Template;
use folio_layout::{
    DecodedImage, Element, ImageBlock, LayoutEngine, Paragraph, Rule,
};
use folio_render::{PdfRenderer, RenderOptions};
use folio_style::parsers::parse_color;
use folio_style::{ElementOptions, Style, StyleError, TextAlign};
use folio_types::Color;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Height of the spacer added by [`Document::br`].
pub const LINE_BREAK_HEIGHT: f32 = 12.0;

/// Where an image comes from.
#[derive(Debug, Clone)]
pub enum ImageSource {
    Bytes(Vec<u8>),
    Path(PathBuf),
}

impl From<Vec<u8>> for ImageSource {
    fn from(bytes: Vec<u8>) -> Self {
        ImageSource::Bytes(bytes)
    }
}

impl From<&[u8]> for ImageSource {
    fn from(bytes: &[u8]) -> Self {
        ImageSource::Bytes(bytes.to_vec())
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        ImageSource::Path(path)
    }
}

impl From<&Path> for ImageSource {
    fn from(path: &Path) -> Self {
        ImageSource::Path(path.to_path_buf())
    }
}

/// Outline level for a heading style name (`h1`..`h6`, `heading1`..`heading6`).
pub fn outline_level(style_name: &str) -> Option<u8> {
    let name = style_name.trim().to_ascii_lowercase();
    let digits = name
        .strip_prefix("heading")
        .or_else(|| name.strip_prefix('h'))?;
    match digits.parse::<u8>() {
        Ok(n @ 1..=6) => Some(n - 1),
        _ => None,
    }
}

/// A document under construction.
///
/// Every content call resolves its style immediately, so a bad style name or
/// option fails at the call that introduced it.
pub struct Document {
    template: Template,
    elements: Vec<Element>,
}

fn check_height(height: f32) -> Result<(), StyleError> {
    if height.is_finite() && height >= 0.0 {
        Ok(())
    } else {
        Err(StyleError::InvalidValue {
            option: "height".to_string(),
            value: height.to_string(),
        })
    }
}

impl Document {
    pub fn new(template: Template) -> Self {
        Self {
            template,
            elements: Vec::new(),
        }
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    fn resolve(&mut self, style: &str, options: Option<&ElementOptions>) -> Result<Arc<Style>, FolioError> {
        Ok(self.template.stylesheet_mut().resolve(style, options)?)
    }

    pub fn add_paragraph(
        &mut self,
        text: &str,
        style: &str,
        options: Option<&ElementOptions>,
    ) -> Result<(), FolioError> {
        let resolved = self.resolve(style, options)?;
        let mut paragraph = Paragraph::new(text, resolved);
        if self.template.config().outlines
            && let Some(level) = outline_level(style)
        {
            paragraph = paragraph.with_outline_level(level);
        }
        self.elements.push(Element::Paragraph(paragraph));
        Ok(())
    }

    pub fn h1(&mut self, text: &str, options: Option<&ElementOptions>) -> Result<(), FolioError> {
        self.add_paragraph(text, "h1", options)
    }

    pub fn h2(&mut self, text: &str, options: Option<&ElementOptions>) -> Result<(), FolioError> {
        self.add_paragraph(text, "h2", options)
    }

    pub fn h3(&mut self, text: &str, options: Option<&ElementOptions>) -> Result<(), FolioError> {
        self.add_paragraph(text, "h3", options)
    }

    pub fn h4(&mut self, text: &str, options: Option<&ElementOptions>) -> Result<(), FolioError> {
        self.add_paragraph(text, "h4", options)
    }

    pub fn h5(&mut self, text: &str, options: Option<&ElementOptions>) -> Result<(), FolioError> {
        self.add_paragraph(text, "h5", options)
    }

    pub fn h6(&mut self, text: &str, options: Option<&ElementOptions>) -> Result<(), FolioError> {
        self.add_paragraph(text, "h6", options)
    }

    /// Heading by number, 1 to 6.
    pub fn heading(&mut self, level: u8, text: &str, options: Option<&ElementOptions>) -> Result<(), FolioError> {
        if !(1..=6).contains(&level) {
            return Err(StyleError::InvalidValue {
                option: "level".to_string(),
                value: level.to_string(),
            }
            .into());
        }
        self.add_paragraph(text, &format!("h{}", level), options)
    }

    pub fn p(&mut self, text: &str, options: Option<&ElementOptions>) -> Result<(), FolioError> {
        self.add_paragraph(text, "p", options)
    }

    /// One paragraph per item. Items get a marker when the style has a
    /// bullet type.
    pub fn add_list<S: AsRef<str>>(
        &mut self,
        items: &[S],
        style: &str,
        options: Option<&ElementOptions>,
    ) -> Result<(), FolioError> {
        let resolved = self.resolve(style, options)?;
        for (index, text) in items.iter().enumerate() {
            let mut paragraph = Paragraph::new(text.as_ref(), Arc::clone(&resolved));
            if let Some(bullet) = resolved.bullet {
                paragraph = paragraph.with_marker(bullet.marker(index + 1));
            }
            self.elements.push(Element::Paragraph(paragraph));
        }
        Ok(())
    }

    pub fn ol<S: AsRef<str>>(&mut self, items: &[S], options: Option<&ElementOptions>) -> Result<(), FolioError> {
        self.add_list(items, "ol", options)
    }

    pub fn ul<S: AsRef<str>>(&mut self, items: &[S], options: Option<&ElementOptions>) -> Result<(), FolioError> {
        self.add_list(items, "ul", options)
    }

    /// A horizontal line `height` points thick. Margin options add space
    /// above/below and inset the line; `color` sets the stroke color.
    pub fn add_separator(&mut self, height: f32, options: Option<&ElementOptions>) -> Result<(), FolioError> {
        let (margins, color) = match options {
            Some(options) => {
                let color = match &options.color {
                    Some(token) => parse_color(token).map_err(|_| StyleError::InvalidColor(token.clone()))?,
                    None => Color::BLACK,
                };
                (options.resolved_margins()?, color)
            }
            None => (Default::default(), Color::BLACK),
        };

        check_height(height)?;
        if margins.top > 0.0 {
            self.add_spacer(margins.top)?;
        }
        self.elements.push(Element::Rule(Rule {
            thickness: height,
            color,
            left_inset: margins.left,
            right_inset: margins.right,
        }));
        if margins.bottom > 0.0 {
            self.add_spacer(margins.bottom)?;
        }
        Ok(())
    }

    pub fn hr(&mut self, height: f32, options: Option<&ElementOptions>) -> Result<(), FolioError> {
        self.add_separator(height, options)
    }

    /// Vertical space of `height` points. Negative or non-finite heights
    /// are rejected.
    pub fn add_spacer(&mut self, height: f32) -> Result<(), FolioError> {
        check_height(height)?;
        self.elements.push(Element::Spacer { height });
        Ok(())
    }

    pub fn br(&mut self) {
        self.elements.push(Element::Spacer { height: LINE_BREAK_HEIGHT });
    }

    /// Adds a PNG, JPEG or GIF image. Without `width` the image keeps its
    /// natural size, capped to the frame width.
    pub fn add_image(
        &mut self,
        source: impl Into<ImageSource>,
        width: Option<f32>,
        options: Option<&ElementOptions>,
    ) -> Result<(), FolioError> {
        let image = match source.into() {
            ImageSource::Bytes(bytes) => DecodedImage::from_bytes(&bytes)?,
            ImageSource::Path(path) => DecodedImage::from_path(&path)?,
        };
        let alignment = match options {
            Some(options) => options.text_align()?.unwrap_or_default(),
            None => TextAlign::default(),
        };
        self.elements.push(Element::Image(ImageBlock {
            image: Arc::new(image),
            width,
            alignment,
        }));
        Ok(())
    }

    pub fn add_page_break(&mut self) {
        self.elements.push(Element::PageBreak);
    }

    pub fn add_column_break(&mut self) {
        self.elements.push(Element::ColumnBreak);
    }

    /// Lays out and renders the document.
    pub fn bytes(&self) -> Result<Vec<u8>, FolioError> {
        let geometry = self.template.geometry();
        let engine = LayoutEngine::new(self.template.fonts(), geometry.clone())?;
        let output = engine.layout(&self.elements)?;

        let config = self.template.config();
        let options = RenderOptions {
            page_numbers: config.page_numbers,
            outlines: config.outlines,
            footer_font: self.template.default_font().map(|family| family.name.clone()),
            info: config.info.clone(),
        };
        let bytes = PdfRenderer::new(self.template.fonts(), options).render(&output, geometry)?;
        log::debug!(
            "Rendered {} elements into {} page(s), {} bytes",
            self.elements.len(),
            output.pages.len(),
            bytes.len()
        );
        Ok(bytes)
    }

    pub fn save_as(&self, path: impl AsRef<Path>) -> Result<(), FolioError> {
        let bytes = self.bytes()?;
        std::fs::write(path.as_ref(), bytes)?;
        log::info!("Wrote {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateConfig;

    fn document() -> Document {
        Document::new(Template::new(TemplateConfig::default()).unwrap())
    }

    fn paragraph(element: &Element) -> &Paragraph {
        match element {
            Element::Paragraph(p) => p,
            other => panic!("expected a paragraph, got {}", other.kind()),
        }
    }

    #[test]
    fn test_outline_level_from_style_name() {
        assert_eq!(outline_level("h1"), Some(0));
        assert_eq!(outline_level("Heading2"), Some(1));
        assert_eq!(outline_level("H3"), Some(2));
        assert_eq!(outline_level("heading6"), Some(5));
        assert_eq!(outline_level("h7"), None);
        assert_eq!(outline_level("p"), None);
        assert_eq!(outline_level("hr"), None);
    }

    #[test]
    fn test_new_document_is_empty() {
        let doc = document();
        assert!(doc.elements().is_empty());
    }

    #[test]
    fn test_heading_helpers_use_their_styles() {
        let mut doc = document();
        doc.h1("Title", None).unwrap();
        doc.h4("Deep", None).unwrap();
        doc.p("Body", None).unwrap();
        let styles: Vec<&str> = doc
            .elements()
            .iter()
            .map(|el| paragraph(el).style.name.as_str())
            .collect();
        assert_eq!(styles, vec!["Heading1", "Heading4", "Paragraph"]);
        assert_eq!(paragraph(&doc.elements()[0]).outline_level, Some(0));
        assert_eq!(paragraph(&doc.elements()[1]).outline_level, Some(3));
        assert_eq!(paragraph(&doc.elements()[2]).outline_level, None);
        assert!(doc.heading(7, "x", None).is_err());
    }

    #[test]
    fn test_unknown_style_fails_every_content_call() {
        let mut doc = document();
        assert!(doc.add_paragraph("x", "InvalidStyle", None).unwrap_err().is_unknown_style());
        assert!(doc.add_list(&["a"], "nope", None).unwrap_err().is_unknown_style());
        assert!(doc.elements().is_empty());
    }

    #[test]
    fn test_options_share_a_substyle() {
        let mut doc = document();
        let options = ElementOptions::new().color("red").align("right");
        doc.p("one", Some(&options)).unwrap();
        doc.p("two", Some(&options)).unwrap();
        let first = &paragraph(&doc.elements()[0]).style;
        let second = &paragraph(&doc.elements()[1]).style;
        assert!(Arc::ptr_eq(first, second));
        assert_eq!(first.parent.as_deref(), Some("Paragraph"));
        assert_eq!(first.alignment, TextAlign::Right);
    }

    #[test]
    fn test_lists_get_markers_from_their_style() {
        let mut doc = document();
        doc.ol(&["first", "second"], None).unwrap();
        doc.ul(&["dot"], None).unwrap();
        doc.add_list(&["plain"], "p", None).unwrap();
        let markers: Vec<Option<&str>> = doc
            .elements()
            .iter()
            .map(|el| paragraph(el).marker.as_deref())
            .collect();
        assert_eq!(markers, vec![Some("1."), Some("2."), Some("\u{2022}"), None]);
    }

    #[test]
    fn test_separator_expands_margins_into_spacers() {
        let mut doc = document();
        let options = ElementOptions::new()
            .color("#ff0000")
            .margins(6.0, 10.0, 8.0, 20.0);
        doc.hr(2.0, Some(&options)).unwrap();
        let kinds: Vec<&str> = doc.elements().iter().map(Element::kind).collect();
        assert_eq!(kinds, vec!["Spacer", "Rule", "Spacer"]);
        match &doc.elements()[1] {
            Element::Rule(rule) => {
                assert_eq!(rule.thickness, 2.0);
                assert_eq!(rule.color, Color::rgb(255, 0, 0));
                assert_eq!((rule.left_inset, rule.right_inset), (20.0, 10.0));
            }
            other => panic!("expected a rule, got {}", other.kind()),
        }

        let mut doc = document();
        doc.add_separator(1.0, None).unwrap();
        assert_eq!(doc.elements().len(), 1);
        let bad = ElementOptions::new().color("nope");
        assert!(doc.add_separator(1.0, Some(&bad)).is_err());
    }

    #[test]
    fn test_breaks_and_spacers() {
        let mut doc = document();
        doc.br();
        doc.add_page_break();
        doc.add_column_break();
        let kinds: Vec<&str> = doc.elements().iter().map(Element::kind).collect();
        assert_eq!(kinds, vec!["Spacer", "PageBreak", "ColumnBreak"]);
        assert!(matches!(doc.elements()[0], Element::Spacer { height } if height == LINE_BREAK_HEIGHT));
    }

    #[test]
    fn test_negative_or_non_finite_heights_are_rejected() {
        let mut doc = document();
        for height in [-5.0, f32::NAN, f32::INFINITY] {
            let err = doc.add_spacer(height).unwrap_err();
            assert!(matches!(
                err,
                FolioError::Style(StyleError::InvalidValue { ref option, .. }) if option == "height"
            ));
        }
        assert!(doc.hr(-1.0, None).is_err());
        let spaced = ElementOptions::new().margins(6.0, 0.0, 6.0, 0.0);
        assert!(doc.add_separator(f32::NAN, Some(&spaced)).is_err());
        assert!(doc.elements().is_empty());

        doc.add_spacer(0.0).unwrap();
        doc.hr(0.0, None).unwrap();
        assert_eq!(doc.elements().len(), 2);
    }

    #[test]
    fn test_bad_image_bytes_are_rejected() {
        let mut doc = document();
        let err = doc.add_image(b"not an image".as_slice(), None, None).unwrap_err();
        assert!(matches!(err, FolioError::Layout(_)));
    }

    #[test]
    fn test_outlines_can_be_disabled() {
        let config = TemplateConfig {
            outlines: false,
            ..Default::default()
        };
        let mut doc = Document::new(Template::new(config).unwrap());
        doc.h1("Title", None).unwrap();
        assert_eq!(paragraph(&doc.elements()[0]).outline_level, None);
    }
}
