//! Font resources: one PDF font dictionary per face used in the document.

use crate::writer::PdfWriter;
use crate::RenderError;
use folio_layout::metrics::{FIRST_CHAR, LAST_CHAR};
use folio_layout::{FontFace, FontProgram, FontRegistry};
use lopdf::{dictionary, Dictionary, Object, Stream};
use std::collections::HashMap;

/// Maps face names to the resource names (`F1`, `F2`, ...) used in content
/// streams.
#[derive(Debug, Default)]
pub(crate) struct FontResources {
    names: HashMap<String, String>,
    order: Vec<String>,
}

impl FontResources {
    /// Registers `font` if it has not been seen yet.
    pub fn use_font(&mut self, font: &str) {
        if !self.names.contains_key(font) {
            let resource = format!("F{}", self.order.len() + 1);
            self.names.insert(font.to_string(), resource);
            self.order.push(font.to_string());
        }
    }

    pub fn resource_name(&self, font: &str) -> Option<&str> {
        self.names.get(font).map(String::as_str)
    }

    /// Writes every used face and returns the `/Font` resource dictionary.
    pub fn write(&self, writer: &mut PdfWriter, registry: &FontRegistry) -> Result<Dictionary, RenderError> {
        let mut fonts = Dictionary::new();
        for name in &self.order {
            let face = registry
                .get(name)
                .ok_or_else(|| RenderError::MissingFont(name.clone()))?;
            let dict = match &face.program {
                FontProgram::Standard => standard_font(face),
                FontProgram::TrueType(data) => truetype_font(writer, face, data),
            };
            let id = writer.buffer_object(dict.into());
            if let Some(resource) = self.names.get(name) {
                fonts.set(resource.as_bytes(), id);
            }
        }
        Ok(fonts)
    }
}

fn standard_font(face: &FontFace) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => face.name.clone(),
        "Encoding" => "WinAnsiEncoding",
    }
}

fn base_font_name(name: &str) -> String {
    name.chars().filter(|c| !c.is_whitespace()).collect()
}

fn truetype_font(writer: &mut PdfWriter, face: &FontFace, data: &[u8]) -> Dictionary {
    let base_font = base_font_name(&face.name);
    let file = Stream::new(dictionary! { "Length1" => data.len() as i64 }, data.to_vec());
    let file_id = writer.buffer_object(Object::Stream(file));

    let mut flags = 32;
    if face.italic_angle != 0.0 {
        flags |= 64;
    }
    let descriptor = dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => base_font.clone(),
        "Flags" => flags,
        "FontBBox" => face.bbox.iter().map(|v| Object::Integer(i64::from(*v))).collect::<Vec<_>>(),
        "ItalicAngle" => face.italic_angle,
        "Ascent" => i64::from(face.ascent),
        "Descent" => i64::from(face.descent),
        "CapHeight" => i64::from(face.ascent),
        "StemV" => 80,
        "FontFile2" => file_id,
    };
    let descriptor_id = writer.buffer_object(descriptor.into());

    dictionary! {
        "Type" => "Font",
        "Subtype" => "TrueType",
        "BaseFont" => base_font,
        "FirstChar" => i64::from(FIRST_CHAR),
        "LastChar" => i64::from(LAST_CHAR),
        "Widths" => face.widths.iter().map(|w| Object::Integer(i64::from(*w))).collect::<Vec<_>>(),
        "FontDescriptor" => descriptor_id,
        "Encoding" => "WinAnsiEncoding",
    }
}
