use crate::fonts::FontResources;
use crate::images::ImageResources;
use crate::outline::build_outlines;
use crate::page::PageContext;
use crate::writer::PdfWriter;
use crate::RenderError;
use folio_layout::encoding::encode_win_ansi;
use folio_layout::{DrawKind, FontRegistry, LayoutOutput, PageGeometry, PositionedElement, TextRun};
use folio_style::DEFAULT_FONT_FAMILY;
use folio_types::{Color, DocumentInfo};
use lopdf::{dictionary, Dictionary, Object, StringFormat};
use once_cell::sync::Lazy;

const PDF_VERSION: &str = "1.7";
const FOOTER_FONT_SIZE: f32 = 9.0;

static PRODUCER: Lazy<String> = Lazy::new(|| format!("folio {}", env!("CARGO_PKG_VERSION")));

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Draw a right-aligned "Page N" footer in the bottom margin.
    pub page_numbers: bool,
    /// Write the page outline built from headings.
    pub outlines: bool,
    /// Face for the page number footer; Helvetica when unset.
    pub footer_font: Option<String>,
    pub info: DocumentInfo,
}

pub struct PdfRenderer<'a> {
    fonts: &'a FontRegistry,
    options: RenderOptions,
}

impl<'a> PdfRenderer<'a> {
    pub fn new(fonts: &'a FontRegistry, options: RenderOptions) -> Self {
        Self { fonts, options }
    }

    pub fn render(&self, output: &LayoutOutput, geometry: &PageGeometry) -> Result<Vec<u8>, RenderError> {
        let mut writer = PdfWriter::new(PDF_VERSION);

        let footers = if self.options.page_numbers {
            (1..=output.pages.len())
                .map(|n| self.page_number(n, geometry))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            Vec::new()
        };

        let mut fonts = FontResources::default();
        for el in output.pages.iter().flatten().chain(footers.iter()) {
            if let DrawKind::Text { run, .. } = &el.kind {
                fonts.use_font(&run.font);
            }
        }
        let font_dict = fonts.write(&mut writer, self.fonts)?;
        let images = ImageResources::write(&mut writer, &output.images);

        for (index, page) in output.pages.iter().enumerate() {
            let mut ctx = PageContext::new(geometry.height, &fonts, &images);
            for el in page.iter().chain(footers.get(index)) {
                ctx.draw_element(el)?;
            }
            let content_id = writer.buffer_content_stream(ctx.finish())?;
            writer.add_page(content_id, geometry.width, geometry.height);
        }

        let mut resources = dictionary! { "Font" => font_dict };
        if !images.is_empty() {
            resources.set("XObject", images.into_dictionary());
        }
        writer.set_resources(resources);

        if self.options.outlines {
            let page_ids = writer.page_ids().to_vec();
            let root = build_outlines(&mut writer, &output.outline, &page_ids, geometry.height);
            writer.set_outline_root_id(root);
        }

        writer.set_info(self.info_dictionary());
        writer.finish()
    }

    fn page_number(&self, number: usize, geometry: &PageGeometry) -> Result<PositionedElement, RenderError> {
        let font = self.options.footer_font.as_deref().unwrap_or(DEFAULT_FONT_FAMILY);
        let face = self
            .fonts
            .get(font)
            .ok_or_else(|| RenderError::MissingFont(font.to_string()))?;
        let text = format!("Page {}", number);
        let width = face.text_width(&text, FOOTER_FONT_SIZE);
        let baseline = face.ascent_at(FOOTER_FONT_SIZE);
        Ok(PositionedElement {
            x: geometry.width - geometry.margins.right - width,
            y: geometry.height - (geometry.margins.bottom + FOOTER_FONT_SIZE) / 2.0,
            width,
            height: FOOTER_FONT_SIZE,
            kind: DrawKind::Text {
                run: TextRun {
                    text,
                    font: face.name.clone(),
                    size: FOOTER_FONT_SIZE,
                    color: Color::BLACK,
                    word_spacing: 0.0,
                },
                baseline,
            },
        })
    }

    fn info_dictionary(&self) -> Dictionary {
        let text = |s: &str| Object::String(encode_win_ansi(s), StringFormat::Literal);
        let mut info = dictionary! {
            "Producer" => text(PRODUCER.as_str()),
            "CreationDate" => text(&chrono::Utc::now().format("D:%Y%m%d%H%M%SZ").to_string()),
        };
        let fields = [
            ("Title", &self.options.info.title),
            ("Author", &self.options.info.author),
            ("Subject", &self.options.info.subject),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                info.set(key, text(value));
            }
        }
        info
    }
}
