//! Font registry for the layout engine.
//!
//! A `FontRegistry` knows the standard PDF fonts out of the box and accepts
//! TrueType files registered by name. Every registered face carries a width
//! table over WinAnsi codes 32..=255 so that text can be measured during
//! layout and the same widths written to the PDF font dictionary.

use crate::LayoutError;
use crate::encoding::{win_ansi_char, win_ansi_code};
use crate::metrics::{self, FIRST_CHAR, LAST_CHAR, STANDARD_FONTS};
use folio_style::DEFAULT_FONT_FAMILY;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// How a font reaches the PDF.
#[derive(Clone)]
pub enum FontProgram {
    /// One of the standard fonts; referenced by name, never embedded.
    Standard,
    /// Raw TrueType data, embedded as `FontFile2`.
    TrueType(Arc<Vec<u8>>),
}

impl std::fmt::Debug for FontProgram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FontProgram::Standard => f.write_str("Standard"),
            FontProgram::TrueType(data) => f
                .debug_struct("TrueType")
                .field("data_len", &data.len())
                .finish(),
        }
    }
}

/// A registered face with its metrics.
#[derive(Debug, Clone)]
pub struct FontFace {
    /// Name used in styles and as the PDF `BaseFont`.
    pub name: String,
    pub program: FontProgram,
    /// Advance widths in 1/1000 em for codes `FIRST_CHAR..=LAST_CHAR`.
    pub widths: Vec<u16>,
    pub ascent: i16,
    pub descent: i16,
    /// Font bounding box in 1/1000 em.
    pub bbox: [i16; 4],
    pub italic_angle: f32,
}

impl FontFace {
    fn standard(name: &str) -> Option<Self> {
        let m = metrics::standard_metrics(name)?;
        Some(Self {
            name: name.to_string(),
            program: FontProgram::Standard,
            widths: m.widths.clone(),
            ascent: m.ascent,
            descent: m.descent,
            bbox: [-200, m.descent, 1000, m.ascent],
            italic_angle: 0.0,
        })
    }

    /// Parses TrueType `data` with ttf-parser and samples its advances.
    pub fn from_truetype(name: &str, data: Vec<u8>) -> Result<Self, LayoutError> {
        let face = ttf_parser::Face::parse(&data, 0).map_err(|e| LayoutError::InvalidFont {
            name: name.to_string(),
            reason: e.to_string(),
        })?;

        let units = f32::from(face.units_per_em());
        let scale = |v: f32| (v * 1000.0 / units).round();
        let missing = face
            .glyph_index(' ')
            .and_then(|gid| face.glyph_hor_advance(gid))
            .map(|adv| scale(f32::from(adv)) as u16)
            .unwrap_or(500);

        let widths = (FIRST_CHAR..=LAST_CHAR)
            .map(|code| {
                win_ansi_char(code)
                    .and_then(|c| face.glyph_index(c))
                    .and_then(|gid| face.glyph_hor_advance(gid))
                    .map(|adv| scale(f32::from(adv)) as u16)
                    .unwrap_or(missing)
            })
            .collect();

        let rect = face.global_bounding_box();
        let bbox = [
            scale(f32::from(rect.x_min)) as i16,
            scale(f32::from(rect.y_min)) as i16,
            scale(f32::from(rect.x_max)) as i16,
            scale(f32::from(rect.y_max)) as i16,
        ];
        let ascent = scale(f32::from(face.ascender())) as i16;
        let descent = scale(f32::from(face.descender())) as i16;
        let italic_angle = face.italic_angle();

        log::debug!(
            "Parsed TrueType font '{}' ({} bytes, {} units/em)",
            name,
            data.len(),
            units
        );

        Ok(Self {
            name: name.to_string(),
            program: FontProgram::TrueType(Arc::new(data)),
            widths,
            ascent,
            descent,
            bbox,
            italic_angle,
        })
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self.program, FontProgram::TrueType(_))
    }

    /// Width of `c` at `size` points. Unmappable characters measure as `?`.
    pub fn char_width(&self, c: char, size: f32) -> f32 {
        let code = win_ansi_code(c).unwrap_or(b'?');
        let units = self
            .widths
            .get(usize::from(code.saturating_sub(FIRST_CHAR)))
            .copied()
            .unwrap_or(0);
        f32::from(units) * size / 1000.0
    }

    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars().map(|c| self.char_width(c, size)).sum()
    }

    /// Distance from the top of a line box to the baseline.
    pub fn ascent_at(&self, size: f32) -> f32 {
        f32::from(self.ascent) * size / 1000.0
    }
}

/// Registered fonts, by case-insensitive name, in registration order.
#[derive(Debug, Clone)]
pub struct FontRegistry {
    faces: Vec<Arc<FontFace>>,
    by_name: HashMap<String, usize>,
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FontRegistry {
    /// A registry preloaded with the standard fonts.
    pub fn new() -> Self {
        let mut registry = Self {
            faces: Vec::new(),
            by_name: HashMap::new(),
        };
        for name in STANDARD_FONTS {
            if let Some(face) = FontFace::standard(name) {
                registry.insert(face);
            }
        }
        registry
    }

    /// Replaces a face registered under the same name. A name that is only
    /// an alias is repointed at the new face and the aliased face is kept.
    fn insert(&mut self, face: FontFace) -> Arc<FontFace> {
        let key = face.name.to_lowercase();
        let face = Arc::new(face);
        match self.by_name.get(&key) {
            Some(&index) if self.faces[index].name.eq_ignore_ascii_case(&face.name) => {
                self.faces[index] = Arc::clone(&face)
            }
            _ => {
                self.by_name.insert(key, self.faces.len());
                self.faces.push(Arc::clone(&face));
            }
        }
        face
    }

    /// Registers the TrueType file at `path` under `name`.
    pub fn register_file(&mut self, name: &str, path: &Path) -> Result<Arc<FontFace>, LayoutError> {
        let data = std::fs::read(path).map_err(|e| LayoutError::FontFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        log::debug!("Registering font '{}' from {}", name, path.display());
        self.register_bytes(name, data)
    }

    pub fn register_bytes(&mut self, name: &str, data: Vec<u8>) -> Result<Arc<FontFace>, LayoutError> {
        let face = FontFace::from_truetype(name, data)?;
        Ok(self.insert(face))
    }

    /// Makes `alias` measure and render as the already registered `target`.
    pub fn register_alias(&mut self, alias: &str, target: &str) -> Result<(), LayoutError> {
        let index = *self
            .by_name
            .get(&target.to_lowercase())
            .ok_or_else(|| LayoutError::UnknownFont(target.to_string()))?;
        self.by_name.insert(alias.to_lowercase(), index);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<FontFace>> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&index| &self.faces[index])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Like [`FontRegistry::get`], falling back to the default family.
    pub fn resolve(&self, name: &str) -> Result<&Arc<FontFace>, LayoutError> {
        if let Some(face) = self.get(name) {
            return Ok(face);
        }
        log::warn!("Font '{}' is not registered, using {}", name, DEFAULT_FONT_FAMILY);
        self.get(DEFAULT_FONT_FAMILY)
            .ok_or_else(|| LayoutError::UnknownFont(name.to_string()))
    }

    /// Distinct faces in registration order.
    pub fn faces(&self) -> &[Arc<FontFace>] {
        &self.faces
    }
}
