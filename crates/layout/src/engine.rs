//! Flows elements into column frames and pages.

use crate::elements::{DrawKind, Element, ImageBlock, Paragraph, PositionedElement, Rule, TextRun};
use crate::fonts::{FontFace, FontRegistry};
use crate::image::DecodedImage;
use crate::text::{Line, LineBreaker};
use crate::LayoutError;
use folio_style::{Margins, TextAlign};
use folio_types::{OutlineEntry, Rect, Size};
use std::sync::Arc;

const EPSILON: f32 = 0.01;

/// Page size, margins and column layout shared by every page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margins: Margins,
    pub columns: usize,
    pub column_gap: f32,
}

impl PageGeometry {
    pub fn content_area(&self) -> Rect {
        Rect::new(
            self.margins.left,
            self.margins.top,
            self.width - self.margins.left - self.margins.right,
            self.height - self.margins.top - self.margins.bottom,
        )
    }

    /// Column frames, left to right.
    pub fn frames(&self) -> Result<Vec<Rect>, LayoutError> {
        let area = self.content_area();
        let columns = self.columns.max(1);
        let gaps = self.column_gap * (columns - 1) as f32;
        let frame_width = (area.width - gaps) / columns as f32;
        if frame_width <= 0.0 || area.height <= 0.0 {
            return Err(LayoutError::InvalidGeometry(format!(
                "{} column(s) leave a {:.2} x {:.2} frame",
                columns, frame_width, area.height
            )));
        }
        Ok((0..columns)
            .map(|i| {
                Rect::new(
                    area.x + i as f32 * (frame_width + self.column_gap),
                    area.y,
                    frame_width,
                    area.height,
                )
            })
            .collect())
    }
}

/// The result of a layout pass.
#[derive(Debug, Clone, Default)]
pub struct LayoutOutput {
    /// Positioned elements, one vector per page. Never empty.
    pub pages: Vec<Vec<PositionedElement>>,
    pub outline: Vec<OutlineEntry>,
    pub images: Vec<Arc<DecodedImage>>,
}

pub struct LayoutEngine<'a> {
    fonts: &'a FontRegistry,
    geometry: PageGeometry,
    frames: Vec<Rect>,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(fonts: &'a FontRegistry, geometry: PageGeometry) -> Result<Self, LayoutError> {
        let frames = geometry.frames()?;
        Ok(Self {
            fonts,
            geometry,
            frames,
        })
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn layout(&self, elements: &[Element]) -> Result<LayoutOutput, LayoutError> {
        let mut ctx = FlowContext::new(&self.frames);

        for element in elements {
            match element {
                Element::Paragraph(paragraph) => self.place_paragraph(&mut ctx, paragraph)?,
                Element::Spacer { height } => place_spacer(&mut ctx, *height),
                Element::Rule(rule) => place_rule(&mut ctx, rule),
                Element::Image(block) => place_image(&mut ctx, block),
                Element::PageBreak => {
                    if !ctx.page_is_blank() {
                        ctx.new_page();
                    }
                }
                Element::ColumnBreak => ctx.next_frame(),
            }
        }

        let output = ctx.finish();
        log::debug!(
            "Laid out {} elements onto {} page(s)",
            elements.len(),
            output.pages.len()
        );
        Ok(output)
    }

    fn place_paragraph(&self, ctx: &mut FlowContext, paragraph: &Paragraph) -> Result<(), LayoutError> {
        let style = &paragraph.style;
        let face = self.fonts.resolve(&style.font_name)?;
        let frame_width = ctx.bounds().width;
        let text_width = frame_width - style.left_indent - style.right_indent;
        let first_width = text_width - style.first_line_indent;
        if text_width <= 0.0 || first_width <= 0.0 {
            return Err(LayoutError::InvalidGeometry(format!(
                "style '{}' leaves no room for text in a {:.2}pt frame",
                style.name, frame_width
            )));
        }

        let lines = LineBreaker::new(face, style.font_size, style.hyphenate).break_lines(
            &paragraph.text,
            first_width,
            text_width,
        );
        if lines.is_empty() {
            ctx.prepare_for_block(style.space_before);
            ctx.finish_block(style.space_after);
            return Ok(());
        }

        let leading = style.leading();
        let frame_height = ctx.bounds().height;
        if leading > frame_height + EPSILON {
            return Err(LayoutError::ElementTooLarge(leading, frame_height));
        }

        let mut index = 0;
        let mut first_chunk = true;
        while index < lines.len() {
            let space_before = if first_chunk { style.space_before } else { 0.0 };
            if ctx.prepare_for_block(space_before) {
                ctx.next_frame();
                continue;
            }

            let fit = ((ctx.available_height() + EPSILON) / leading).floor() as usize;
            let remaining = lines.len() - index;
            let mut take = fit.min(remaining);
            if !style.allow_widows && take < remaining && remaining - take == 1 {
                if take > 1 {
                    take -= 1;
                } else if !ctx.is_at_frame_top() {
                    take = 0;
                }
            }
            if take == 0 {
                if ctx.is_at_frame_top() {
                    return Err(LayoutError::ElementTooLarge(leading, ctx.available_height()));
                }
                ctx.next_frame();
                continue;
            }

            if first_chunk && let Some(level) = paragraph.outline_level {
                ctx.outline.push(OutlineEntry {
                    level,
                    title: paragraph.text.split_whitespace().collect::<Vec<_>>().join(" "),
                    page_index: ctx.page_index(),
                    y: ctx.absolute_y(),
                });
            }

            for (offset, line) in lines[index..index + take].iter().enumerate() {
                let is_first_line = index + offset == 0;
                self.emit_line(ctx, paragraph, face, line, is_first_line, leading);
                ctx.advance(leading);
            }

            index += take;
            first_chunk = false;
            if index < lines.len() {
                ctx.next_frame();
            }
        }

        ctx.finish_block(style.space_after);
        Ok(())
    }

    fn emit_line(
        &self,
        ctx: &mut FlowContext,
        paragraph: &Paragraph,
        face: &FontFace,
        line: &Line,
        is_first_line: bool,
        leading: f32,
    ) {
        let style = &paragraph.style;
        let bounds = ctx.bounds();
        let indent = style.left_indent + if is_first_line { style.first_line_indent } else { 0.0 };
        let line_width = bounds.width - indent - style.right_indent;
        let free = (line_width - line.width).max(0.0);
        let baseline = (leading - style.font_size) / 2.0 + face.ascent_at(style.font_size);

        let (offset, word_spacing) = match style.alignment {
            TextAlign::Left => (0.0, 0.0),
            TextAlign::Right => (free, 0.0),
            TextAlign::Center => (free / 2.0, 0.0),
            TextAlign::Justify if !line.last && line.spaces > 0 => (0.0, free / line.spaces as f32),
            TextAlign::Justify => (0.0, 0.0),
        };

        let run = |text: String| TextRun {
            text,
            font: face.name.clone(),
            size: style.font_size,
            color: style.text_color,
            word_spacing: 0.0,
        };

        if is_first_line && let Some(marker) = &paragraph.marker {
            let marker_width = face.text_width(marker, style.font_size);
            let gap = style.font_size * 0.5;
            let x = (bounds.x + style.left_indent - gap - marker_width).max(bounds.x);
            ctx.push(PositionedElement {
                x,
                y: ctx.absolute_y(),
                width: marker_width,
                height: leading,
                kind: DrawKind::Text {
                    run: run(marker.clone()),
                    baseline,
                },
            });
        }

        if line.text.is_empty() {
            return;
        }

        let width = if word_spacing > 0.0 { line_width } else { line.width };
        ctx.push(PositionedElement {
            x: bounds.x + indent + offset,
            y: ctx.absolute_y(),
            width,
            height: leading,
            kind: DrawKind::Text {
                run: TextRun {
                    word_spacing,
                    ..run(line.text.clone())
                },
                baseline,
            },
        });
    }
}

fn place_spacer(ctx: &mut FlowContext, height: f32) {
    if ctx.prepare_for_block(0.0) || (height > ctx.available_height() + EPSILON && !ctx.is_at_frame_top()) {
        // A spacer that does not fit is consumed by the frame break.
        ctx.next_frame();
        return;
    }
    ctx.advance(height.min(ctx.available_height()));
    ctx.finish_block(0.0);
}

fn place_rule(ctx: &mut FlowContext, rule: &Rule) {
    if ctx.prepare_for_block(0.0) || (rule.thickness > ctx.available_height() + EPSILON && !ctx.is_at_frame_top()) {
        ctx.next_frame();
    }
    let bounds = ctx.bounds();
    let width = bounds.width - rule.left_inset - rule.right_inset;
    if width <= 0.0 {
        log::warn!("Skipping separator: insets leave {:.2}pt", width);
        return;
    }
    ctx.push(PositionedElement {
        x: bounds.x + rule.left_inset,
        y: ctx.absolute_y(),
        width,
        height: rule.thickness,
        kind: DrawKind::Line {
            thickness: rule.thickness,
            color: rule.color,
        },
    });
    ctx.advance(rule.thickness);
    ctx.finish_block(0.0);
}

fn place_image(ctx: &mut FlowContext, block: &ImageBlock) {
    let bounds = ctx.bounds();
    let mut size = block.image.display_size(block.width, bounds.width);
    if size.height > bounds.height || size.width > bounds.width {
        log::warn!(
            "Image of {:.1}x{:.1}pt does not fit the frame; scaling it down",
            size.width,
            size.height
        );
        size = size.fit_within(Size::new(bounds.width, bounds.height));
    }

    if ctx.prepare_for_block(0.0) || (size.height > ctx.available_height() + EPSILON && !ctx.is_at_frame_top()) {
        ctx.next_frame();
    }

    let free = (bounds.width - size.width).max(0.0);
    let offset = match block.alignment {
        TextAlign::Right => free,
        TextAlign::Center => free / 2.0,
        TextAlign::Left | TextAlign::Justify => 0.0,
    };
    let index = ctx.images.len();
    ctx.images.push(Arc::clone(&block.image));
    let bounds = ctx.bounds();
    ctx.push(PositionedElement {
        x: bounds.x + offset,
        y: ctx.absolute_y(),
        width: size.width,
        height: size.height,
        kind: DrawKind::Image { index },
    });
    ctx.advance(size.height);
    ctx.finish_block(0.0);
}

/// Mutable flow state: the current page, frame and vertical cursor.
struct FlowContext<'f> {
    frames: &'f [Rect],
    frame_index: usize,
    cursor_y: f32,
    last_v_margin: f32,
    pages: Vec<Vec<PositionedElement>>,
    outline: Vec<OutlineEntry>,
    images: Vec<Arc<DecodedImage>>,
}

impl<'f> FlowContext<'f> {
    fn new(frames: &'f [Rect]) -> Self {
        Self {
            frames,
            frame_index: 0,
            cursor_y: 0.0,
            last_v_margin: 0.0,
            pages: vec![Vec::new()],
            outline: Vec::new(),
            images: Vec::new(),
        }
    }

    fn bounds(&self) -> Rect {
        self.frames[self.frame_index]
    }

    fn page_index(&self) -> usize {
        self.pages.len() - 1
    }

    fn absolute_y(&self) -> f32 {
        self.bounds().y + self.cursor_y
    }

    fn available_height(&self) -> f32 {
        (self.bounds().height - self.cursor_y).max(0.0)
    }

    fn is_at_frame_top(&self) -> bool {
        self.cursor_y < 0.001
    }

    fn page_is_blank(&self) -> bool {
        self.frame_index == 0
            && self.is_at_frame_top()
            && self.pages.last().is_none_or(|page| page.is_empty())
    }

    fn advance(&mut self, dy: f32) {
        self.cursor_y += dy;
    }

    /// Applies the collapsed gap before a block. Returns true when the gap
    /// does not fit and the block has to move to the next frame. Gaps are
    /// dropped at the top of a frame.
    fn prepare_for_block(&mut self, space_before: f32) -> bool {
        if self.is_at_frame_top() {
            self.last_v_margin = 0.0;
            return false;
        }
        let gap = space_before.max(self.last_v_margin);
        if gap > self.available_height() {
            return true;
        }
        self.advance(gap);
        self.last_v_margin = 0.0;
        false
    }

    fn finish_block(&mut self, space_after: f32) {
        self.last_v_margin = space_after;
    }

    fn next_frame(&mut self) {
        if self.frame_index + 1 < self.frames.len() {
            self.frame_index += 1;
            self.cursor_y = 0.0;
            self.last_v_margin = 0.0;
        } else {
            self.new_page();
        }
    }

    fn new_page(&mut self) {
        self.pages.push(Vec::new());
        self.frame_index = 0;
        self.cursor_y = 0.0;
        self.last_v_margin = 0.0;
    }

    fn push(&mut self, element: PositionedElement) {
        if let Some(page) = self.pages.last_mut() {
            page.push(element);
        }
    }

    fn finish(mut self) -> LayoutOutput {
        while self.pages.len() > 1 && self.pages.last().is_some_and(|page| page.is_empty()) {
            self.pages.pop();
        }
        LayoutOutput {
            pages: self.pages,
            outline: self.outline,
            images: self.images,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::tiny_png;
    use folio_style::Style;

    fn geometry(columns: usize) -> PageGeometry {
        // 100pt tall content area.
        PageGeometry {
            width: 300.0,
            height: 140.0,
            margins: Margins::all(20.0),
            columns,
            column_gap: 20.0,
        }
    }

    fn courier(size: f32, line_height: f32) -> Style {
        let mut style = Style::new("Body");
        style.font_name = "Courier".into();
        style.font_size = size;
        style.line_height = line_height;
        style
    }

    fn paragraph(text: &str, style: Style) -> Element {
        Element::Paragraph(Paragraph::new(text, Arc::new(style)))
    }

    fn texts(page: &[PositionedElement]) -> Vec<String> {
        page.iter()
            .filter_map(|el| match &el.kind {
                DrawKind::Text { run, .. } => Some(run.text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_frames_split_content_width() {
        let frames = geometry(2).frames().unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0], Rect::new(20.0, 20.0, 120.0, 100.0));
        assert_eq!(frames[1], Rect::new(160.0, 20.0, 120.0, 100.0));

        let mut bad = geometry(1);
        bad.margins = Margins::all(200.0);
        assert!(matches!(bad.frames(), Err(LayoutError::InvalidGeometry(_))));
    }

    #[test]
    fn test_empty_input_yields_one_blank_page() {
        let fonts = FontRegistry::new();
        let engine = LayoutEngine::new(&fonts, geometry(1)).unwrap();
        let output = engine.layout(&[]).unwrap();
        assert_eq!(output.pages.len(), 1);
        assert!(output.pages[0].is_empty());
    }

    #[test]
    fn test_paragraph_flows_onto_next_page() {
        let fonts = FontRegistry::new();
        let engine = LayoutEngine::new(&fonts, geometry(1)).unwrap();
        // 10pt leading: ten lines per page.
        let text = (0..15).map(|i| format!("line{:02}", i)).collect::<Vec<_>>().join("\n");
        let output = engine.layout(&[paragraph(&text, courier(10.0, 1.0))]).unwrap();
        assert_eq!(output.pages.len(), 2);
        assert_eq!(texts(&output.pages[0]).len(), 10);
        assert_eq!(texts(&output.pages[1])[0], "line10");
        assert_eq!(output.pages[1][0].y, 20.0);
    }

    #[test]
    fn test_widow_control_moves_an_extra_line() {
        let fonts = FontRegistry::new();
        let engine = LayoutEngine::new(&fonts, geometry(1)).unwrap();
        let text = (0..11).map(|i| format!("w{}", i)).collect::<Vec<_>>().join("\n");

        let output = engine.layout(&[paragraph(&text, courier(10.0, 1.0))]).unwrap();
        assert_eq!(texts(&output.pages[1]).len(), 1);

        let mut strict = courier(10.0, 1.0);
        strict.allow_widows = false;
        let output = engine.layout(&[paragraph(&text, strict)]).unwrap();
        assert_eq!(texts(&output.pages[0]).len(), 9);
        assert_eq!(texts(&output.pages[1]).len(), 2);
    }

    #[test]
    fn test_column_break_and_page_break() {
        let fonts = FontRegistry::new();
        let engine = LayoutEngine::new(&fonts, geometry(2)).unwrap();
        let output = engine
            .layout(&[
                paragraph("left", courier(10.0, 1.2)),
                Element::ColumnBreak,
                paragraph("right", courier(10.0, 1.2)),
                Element::PageBreak,
                paragraph("next", courier(10.0, 1.2)),
            ])
            .unwrap();
        assert_eq!(output.pages.len(), 2);
        assert_eq!(output.pages[0][0].x, 20.0);
        assert_eq!(output.pages[0][1].x, 160.0);
        assert_eq!(texts(&output.pages[1]), vec!["next"]);
    }

    #[test]
    fn test_redundant_page_breaks_do_not_add_blank_pages() {
        let fonts = FontRegistry::new();
        let engine = LayoutEngine::new(&fonts, geometry(1)).unwrap();
        let output = engine
            .layout(&[
                Element::PageBreak,
                paragraph("a", courier(10.0, 1.2)),
                Element::PageBreak,
                Element::PageBreak,
            ])
            .unwrap();
        assert_eq!(output.pages.len(), 1);
    }

    #[test]
    fn test_space_between_blocks_collapses() {
        let fonts = FontRegistry::new();
        let engine = LayoutEngine::new(&fonts, geometry(1)).unwrap();
        let mut first = courier(10.0, 1.0);
        first.space_after = 6.0;
        let mut second = courier(10.0, 1.0);
        second.space_before = 12.0;
        let output = engine
            .layout(&[paragraph("a", first), paragraph("b", second)])
            .unwrap();
        let page = &output.pages[0];
        assert_eq!(page[0].y, 20.0);
        // 10pt line, then max(6, 12) of space.
        assert_eq!(page[1].y, 42.0);
    }

    #[test]
    fn test_alignment_offsets() {
        let fonts = FontRegistry::new();
        let engine = LayoutEngine::new(&fonts, geometry(1)).unwrap();
        let mut right = courier(10.0, 1.0);
        right.alignment = TextAlign::Right;
        let mut center = courier(10.0, 1.0);
        center.alignment = TextAlign::Center;
        let output = engine
            .layout(&[paragraph("abcde", right), paragraph("abcde", center)])
            .unwrap();
        // Frame is 260pt wide; "abcde" is 30pt.
        assert_eq!(output.pages[0][0].x, 20.0 + 230.0);
        assert_eq!(output.pages[0][1].x, 20.0 + 115.0);
    }

    #[test]
    fn test_justified_lines_get_word_spacing() {
        let fonts = FontRegistry::new();
        let engine = LayoutEngine::new(&fonts, geometry(1)).unwrap();
        let mut style = courier(10.0, 1.0);
        style.alignment = TextAlign::Justify;
        let words = vec!["word"; 20].join(" ");
        let output = engine.layout(&[paragraph(&words, style)]).unwrap();
        let spacings: Vec<f32> = output.pages[0]
            .iter()
            .filter_map(|el| match &el.kind {
                DrawKind::Text { run, .. } => Some(run.word_spacing),
                _ => None,
            })
            .collect();
        assert!(spacings.len() > 1);
        assert!(spacings[0] > 0.0);
        assert_eq!(*spacings.last().unwrap(), 0.0);
    }

    #[test]
    fn test_heading_records_outline_entry() {
        let fonts = FontRegistry::new();
        let engine = LayoutEngine::new(&fonts, geometry(1)).unwrap();
        let heading = Paragraph::new("Intro  text", Arc::new(courier(10.0, 1.0))).with_outline_level(0);
        let output = engine
            .layout(&[Element::PageBreak, Element::Paragraph(heading)])
            .unwrap();
        assert_eq!(
            output.outline,
            vec![OutlineEntry {
                level: 0,
                title: "Intro text".into(),
                page_index: 0,
                y: 20.0,
            }]
        );
    }

    #[test]
    fn test_list_marker_hangs_in_indent() {
        let fonts = FontRegistry::new();
        let engine = LayoutEngine::new(&fonts, geometry(1)).unwrap();
        let mut style = courier(10.0, 1.0);
        style.left_indent = 18.0;
        let item = Paragraph::new("item", Arc::new(style)).with_marker("1.");
        let output = engine.layout(&[Element::Paragraph(item)]).unwrap();
        let page = &output.pages[0];
        assert_eq!(texts(page), vec!["1.", "item"]);
        assert!(page[0].x < page[1].x);
        assert_eq!(page[1].x, 38.0);
    }

    #[test]
    fn test_rule_and_image_placement() {
        let fonts = FontRegistry::new();
        let engine = LayoutEngine::new(&fonts, geometry(1)).unwrap();
        let image = Arc::new(DecodedImage::from_bytes(&tiny_png(4, 2)).unwrap());
        let output = engine
            .layout(&[
                Element::Rule(Rule {
                    thickness: 1.0,
                    color: folio_types::Color::BLACK,
                    left_inset: 10.0,
                    right_inset: 10.0,
                }),
                Element::Image(ImageBlock {
                    image,
                    width: Some(100.0),
                    alignment: TextAlign::Center,
                }),
            ])
            .unwrap();
        let page = &output.pages[0];
        assert_eq!(page[0].x, 30.0);
        assert_eq!(page[0].width, 240.0);
        assert_eq!(page[1].kind, DrawKind::Image { index: 0 });
        assert_eq!((page[1].width, page[1].height), (100.0, 50.0));
        assert_eq!(page[1].x, 20.0 + 80.0);
        assert_eq!(page[1].y, 21.0);
        assert_eq!(output.images.len(), 1);
    }

    #[test]
    fn test_line_taller_than_frame_is_an_error() {
        let fonts = FontRegistry::new();
        let engine = LayoutEngine::new(&fonts, geometry(1)).unwrap();
        let err = engine
            .layout(&[paragraph("huge", courier(200.0, 1.0))])
            .unwrap_err();
        assert!(matches!(err, LayoutError::ElementTooLarge(..)));
    }
}
