#![allow(dead_code)]

use folio::{Document, FolioError, Template, TemplateConfig};
use lopdf::{Dictionary, Document as LopdfDocument, Object};
use std::path::PathBuf;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Text of one page, 1-based.
    pub fn page_text(&self, page: u32) -> String {
        self.doc.extract_text(&[page]).unwrap_or_default()
    }

    pub fn text(&self) -> String {
        let mut text = String::new();
        for page in 1..=self.page_count() as u32 {
            text.push_str(&self.page_text(page));
            text.push('\n');
        }
        text
    }

    pub fn catalog(&self) -> &Dictionary {
        self.doc.catalog().expect("catalog")
    }

    /// `[x0 y0 x1 y1]` of the first page.
    pub fn media_box(&self) -> Vec<f32> {
        let (_, page_id) = self.doc.get_pages().into_iter().next().expect("a page");
        let page = self.doc.get_dictionary(page_id).expect("page dictionary");
        page.get(b"MediaBox")
            .and_then(Object::as_array)
            .expect("MediaBox")
            .iter()
            .map(|value| value.as_float().expect("number"))
            .collect()
    }

    /// Every dictionary in the file with `/Type /{kind}`.
    pub fn dictionaries_of_type(&self, kind: &[u8]) -> Vec<&Dictionary> {
        self.doc
            .objects
            .values()
            .filter_map(|object| object.as_dict().ok())
            .filter(|dict| dict.get(b"Type").and_then(Object::as_name).is_ok_and(|name| name == kind))
            .collect()
    }

    /// Save PDF to a file for manual debugging
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

pub fn render(doc: &Document) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    GeneratedPdf::from_bytes(doc.bytes()?)
}

pub fn document() -> Result<Document, FolioError> {
    Ok(Document::new(Template::new(TemplateConfig::default())?))
}

pub fn font_path(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fonts").join(file)
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 30, 30, 128]));
    let mut bytes = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("png encode");
    bytes
}

pub fn lorem(words: usize) -> String {
    const WORDS: [&str; 8] = ["lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit"];
    (0..words).map(|i| WORDS[i % WORDS.len()]).collect::<Vec<_>>().join(" ")
}
