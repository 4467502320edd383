//! Drawing one page of positioned elements into a content stream.

use crate::fonts::FontResources;
use crate::images::ImageResources;
use crate::RenderError;
use folio_layout::encoding::encode_win_ansi;
use folio_layout::{DrawKind, PositionedElement, TextRun};
use folio_types::Color;
use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};

#[derive(Default, Clone, PartialEq)]
struct PageRenderState {
    font_name: String,
    font_size: f32,
    word_spacing: f32,
    fill_color: Option<Color>,
    stroke_color: Option<Color>,
    line_width: Option<f32>,
}

pub(crate) struct PageContext<'a> {
    page_height: f32,
    content: Content,
    state: PageRenderState,
    fonts: &'a FontResources,
    images: &'a ImageResources,
}

fn rgb_operands(color: &Color) -> Vec<Object> {
    let (r, g, b) = color.unit_rgb();
    vec![r.into(), g.into(), b.into()]
}

impl<'a> PageContext<'a> {
    pub fn new(page_height: f32, fonts: &'a FontResources, images: &'a ImageResources) -> Self {
        Self {
            page_height,
            content: Content { operations: vec![] },
            state: PageRenderState::default(),
            fonts,
            images,
        }
    }

    pub fn finish(self) -> Content {
        self.content
    }

    fn op(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    pub fn draw_element(&mut self, el: &PositionedElement) -> Result<(), RenderError> {
        match &el.kind {
            DrawKind::Text { run, baseline } => self.draw_text(run, el, *baseline),
            DrawKind::Line { thickness, color } => {
                self.draw_line(el, *thickness, color);
                Ok(())
            }
            DrawKind::Image { index } => self.draw_image(*index, el),
        }
    }

    fn set_font(&mut self, run: &TextRun) -> Result<(), RenderError> {
        let fonts = self.fonts;
        let resource = fonts
            .resource_name(&run.font)
            .ok_or_else(|| RenderError::MissingFont(run.font.clone()))?;
        if self.state.font_name != resource || self.state.font_size != run.size {
            self.state.font_name = resource.to_string();
            self.state.font_size = run.size;
            self.op(
                "Tf",
                vec![Object::Name(resource.as_bytes().to_vec()), run.size.into()],
            );
        }
        Ok(())
    }

    fn set_fill_color(&mut self, color: &Color) {
        if self.state.fill_color != Some(*color) {
            self.op("rg", rgb_operands(color));
            self.state.fill_color = Some(*color);
        }
    }

    fn draw_text(&mut self, run: &TextRun, el: &PositionedElement, baseline: f32) -> Result<(), RenderError> {
        if run.text.trim().is_empty() {
            return Ok(());
        }
        self.op("BT", vec![]);
        self.set_font(run)?;
        self.set_fill_color(&run.color);
        if self.state.word_spacing != run.word_spacing {
            self.op("Tw", vec![run.word_spacing.into()]);
            self.state.word_spacing = run.word_spacing;
        }
        let pdf_y = self.page_height - (el.y + baseline);
        self.op("Td", vec![el.x.into(), pdf_y.into()]);
        self.op(
            "Tj",
            vec![Object::String(encode_win_ansi(&run.text), StringFormat::Literal)],
        );
        self.op("ET", vec![]);
        Ok(())
    }

    fn draw_line(&mut self, el: &PositionedElement, thickness: f32, color: &Color) {
        if self.state.line_width != Some(thickness) {
            self.op("w", vec![thickness.into()]);
            self.state.line_width = Some(thickness);
        }
        if self.state.stroke_color != Some(*color) {
            self.op("RG", rgb_operands(color));
            self.state.stroke_color = Some(*color);
        }
        let line_y = self.page_height - (el.y + thickness / 2.0);
        self.op("m", vec![el.x.into(), line_y.into()]);
        self.op("l", vec![(el.x + el.width).into(), line_y.into()]);
        self.op("S", vec![]);
    }

    fn draw_image(&mut self, index: usize, el: &PositionedElement) -> Result<(), RenderError> {
        let name = self
            .images
            .resource_name(index)
            .ok_or_else(|| RenderError::Other(format!("No image resource for index {}", index)))?
            .to_string();
        let bottom = self.page_height - (el.y + el.height);
        self.op("q", vec![]);
        self.op(
            "cm",
            vec![
                el.width.into(),
                0.into(),
                0.into(),
                el.height.into(),
                el.x.into(),
                bottom.into(),
            ],
        );
        self.op("Do", vec![Object::Name(name.into_bytes())]);
        self.op("Q", vec![]);
        Ok(())
    }
}
