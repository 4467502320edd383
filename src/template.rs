//! Templates: page geometry, fonts and the stylesheet shared by documents.

use crate::error::FolioError;
use folio_layout::{FontRegistry, PageGeometry};
use folio_style::font::variant_name;
use folio_style::parsers::MM;
use folio_style::{
    base_stylesheet, sample_stylesheet, FontVariant, Margins, Orientation, PageSize, StyleDecl,
    Stylesheet, DEFAULT_FONT_FAMILY,
};
use folio_types::DocumentInfo;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// A TrueType family: the normal face plus optional bold/italic variants.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FontFamily {
    pub name: String,
    pub normal: PathBuf,
    #[serde(default)]
    pub bold: Option<PathBuf>,
    #[serde(default)]
    pub italic: Option<PathBuf>,
    #[serde(default)]
    pub bold_italic: Option<PathBuf>,
    /// Use this family for every built-in style.
    #[serde(default)]
    pub default: bool,
}

impl FontFamily {
    pub fn new(name: impl Into<String>, normal: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            normal: normal.into(),
            bold: None,
            italic: None,
            bold_italic: None,
            default: false,
        }
    }

    pub fn bold(mut self, path: impl Into<PathBuf>) -> Self {
        self.bold = Some(path.into());
        self
    }

    pub fn italic(mut self, path: impl Into<PathBuf>) -> Self {
        self.italic = Some(path.into());
        self
    }

    pub fn bold_italic(mut self, path: impl Into<PathBuf>) -> Self {
        self.bold_italic = Some(path.into());
        self
    }

    pub fn as_default(mut self) -> Self {
        self.default = true;
        self
    }

    fn variants(&self) -> [(FontVariant, Option<&Path>); 3] {
        [
            (FontVariant::Bold, self.bold.as_deref()),
            (FontVariant::Italic, self.italic.as_deref()),
            (FontVariant::BoldItalic, self.bold_italic.as_deref()),
        ]
    }
}

fn default_margins() -> Margins {
    Margins::all(15.0 * MM)
}

/// Everything a template declares. Deserializable from JSON; every field
/// has a default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub page_size: PageSize,
    pub orientation: Orientation,
    pub margins: Margins,
    pub columns: usize,
    pub column_gap: f32,
    pub fonts: Vec<FontFamily>,
    pub use_sample_stylesheet: bool,
    pub styles: Vec<StyleDecl>,
    /// Turn headings into PDF bookmarks.
    pub outlines: bool,
    pub page_numbers: bool,
    pub info: DocumentInfo,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            orientation: Orientation::Portrait,
            margins: default_margins(),
            columns: 1,
            column_gap: 12.0,
            fonts: Vec::new(),
            use_sample_stylesheet: true,
            styles: Vec::new(),
            outlines: true,
            page_numbers: false,
            info: DocumentInfo::default(),
        }
    }
}

impl TemplateConfig {
    pub fn from_json(json: &str) -> Result<Self, FolioError> {
        serde_json::from_str(json).map_err(|e| FolioError::Configuration(e.to_string()))
    }

    /// Sets the page size from a name such as `"A4"` or `"letter"`.
    pub fn page_size_name(mut self, name: &str) -> Result<Self, FolioError> {
        self.page_size =
            PageSize::from_name(name).map_err(|e| FolioError::Configuration(e.to_string()))?;
        Ok(self)
    }

    pub fn font(mut self, family: FontFamily) -> Self {
        self.fonts.push(family);
        self
    }

    pub fn style(mut self, decl: StyleDecl) -> Self {
        self.styles.push(decl);
        self
    }

    pub fn columns(mut self, columns: usize, gap: f32) -> Self {
        self.columns = columns;
        self.column_gap = gap;
        self
    }

    pub fn default_font(&self) -> Option<&FontFamily> {
        self.fonts.iter().find(|font| font.default)
    }
}

/// A configured template: registered fonts, a stylesheet and page geometry.
pub struct Template {
    config: TemplateConfig,
    fonts: FontRegistry,
    stylesheet: Stylesheet,
    geometry: PageGeometry,
}

impl Template {
    pub fn new(config: TemplateConfig) -> Result<Self, FolioError> {
        let geometry = page_geometry(&config)?;
        let fonts = register_fonts(&config.fonts)?;

        let family = config
            .default_font()
            .map(|font| font.name.as_str())
            .unwrap_or(DEFAULT_FONT_FAMILY);
        let mut stylesheet = if config.use_sample_stylesheet {
            sample_stylesheet(family)?
        } else {
            base_stylesheet(family)?
        };
        for decl in &config.styles {
            register_style(&mut stylesheet, &fonts, decl)?;
        }

        log::debug!(
            "Template ready: {} styles, {} font faces, {}x{}pt page",
            stylesheet.len(),
            fonts.faces().len(),
            geometry.width,
            geometry.height
        );
        Ok(Self {
            config,
            fonts,
            stylesheet,
            geometry,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, FolioError> {
        Self::new(TemplateConfig::from_json(json)?)
    }

    pub fn config(&self) -> &TemplateConfig {
        &self.config
    }

    pub fn fonts(&self) -> &FontRegistry {
        &self.fonts
    }

    pub fn stylesheet(&self) -> &Stylesheet {
        &self.stylesheet
    }

    pub fn stylesheet_mut(&mut self) -> &mut Stylesheet {
        &mut self.stylesheet
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn default_font(&self) -> Option<&FontFamily> {
        self.config.default_font()
    }

    /// Width of one column frame.
    pub fn frame_width(&self) -> f32 {
        let area = self.geometry.content_area();
        let columns = self.geometry.columns.max(1) as f32;
        (area.width - self.geometry.column_gap * (columns - 1.0)) / columns
    }
}

fn page_geometry(config: &TemplateConfig) -> Result<PageGeometry, FolioError> {
    if config.columns == 0 {
        return Err(FolioError::Configuration(
            "a template needs at least one column".to_string(),
        ));
    }
    let (width, height) = config.page_size.oriented(config.orientation);
    let geometry = PageGeometry {
        width,
        height,
        margins: config.margins,
        columns: config.columns,
        column_gap: config.column_gap,
    };
    geometry
        .frames()
        .map_err(|e| FolioError::Configuration(e.to_string()))?;
    Ok(geometry)
}

fn register_fonts(families: &[FontFamily]) -> Result<FontRegistry, FolioError> {
    let mut registry = FontRegistry::new();
    for family in families {
        if !family.normal.is_file() {
            return Err(FolioError::Configuration(format!(
                "Font {} must have a normal variant which is an existing file.",
                family.name
            )));
        }
        registry
            .register_file(&family.name, &family.normal)
            .map_err(|e| FolioError::Configuration(e.to_string()))?;

        for (variant, path) in family.variants() {
            let name = variant_name(&family.name, variant);
            match path {
                Some(path) if !path.is_file() => {
                    return Err(FolioError::Configuration(format!(
                        "Font file {} ({}) does not exist.",
                        path.display(),
                        name
                    )));
                }
                Some(path) => {
                    registry
                        .register_file(&name, path)
                        .map_err(|e| FolioError::Configuration(e.to_string()))?;
                }
                // Missing variants render with the normal face.
                None => registry
                    .register_alias(&name, &family.name)
                    .map_err(|e| FolioError::Configuration(e.to_string()))?,
            }
        }
    }
    Ok(registry)
}

/// Derives `decl` from its parent and adds it, replacing any existing
/// style of the same name.
fn register_style(
    sheet: &mut Stylesheet,
    fonts: &FontRegistry,
    decl: &StyleDecl,
) -> Result<(), FolioError> {
    if let Some(font) = &decl.font_name
        && !fonts.contains(font)
    {
        return Err(FolioError::Configuration(format!(
            "Font {} is not registered.",
            font
        )));
    }

    let overrides = decl.overrides()?;
    let existing = sheet.get(&decl.name).cloned();
    let style = match (&decl.parent, existing) {
        // Redefinition in place keeps the existing name and parent.
        (None, Some(existing)) => {
            let mut style = existing.derive(existing.name.clone(), &overrides);
            style.parent = existing.parent.clone();
            style
        }
        (parent, existing) => {
            let parent = sheet.require(parent.as_deref().unwrap_or("Normal"))?;
            let name = existing.map_or_else(|| decl.name.clone(), |style| style.name.clone());
            parent.derive(name, &overrides)
        }
    };

    log::debug!(
        "Registering style '{}' (parent {:?})",
        style.name,
        style.parent
    );
    sheet.add(style, decl.alias.as_deref(), true)?;
    Ok(())
}
