//! Concrete styles, attribute overrides and style declarations.

use crate::error::StyleError;
use crate::font::DEFAULT_FONT_FAMILY;
use crate::list::BulletType;
use crate::options::ElementOptions;
use crate::parsers;
use crate::text::TextAlign;
use folio_types::Color;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A fully resolved, immutable bundle of typographic attributes.
///
/// Styles are shared as `Arc<Style>` by the stylesheet; deriving a style
/// never touches the parent, it copies the parent's values and applies a
/// [`StyleOverrides`] on top.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Style {
    pub name: String,
    pub parent: Option<String>,
    pub font_name: String,
    pub font_size: f32,
    /// Line height as a multiple of `font_size`.
    pub line_height: f32,
    pub text_color: Color,
    pub alignment: TextAlign,
    pub space_before: f32,
    pub space_after: f32,
    pub left_indent: f32,
    pub right_indent: f32,
    pub first_line_indent: f32,
    pub bullet: Option<BulletType>,
    pub hyphenate: bool,
    pub allow_widows: bool,
}

impl Style {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            font_name: DEFAULT_FONT_FAMILY.to_string(),
            font_size: 10.0,
            line_height: 1.2,
            text_color: Color::BLACK,
            alignment: TextAlign::Left,
            space_before: 0.0,
            space_after: 0.0,
            left_indent: 0.0,
            right_indent: 0.0,
            first_line_indent: 0.0,
            bullet: None,
            hyphenate: false,
            allow_widows: true,
        }
    }

    /// Distance between consecutive baselines, in points.
    pub fn leading(&self) -> f32 {
        self.font_size * self.line_height
    }

    /// Builds a child of `self` named `name`: every attribute is copied from
    /// this style, then the attributes set in `overrides` replace them.
    pub fn derive(&self, name: impl Into<String>, overrides: &StyleOverrides) -> Style {
        let mut style = self.clone();
        style.name = name.into();
        style.parent = Some(self.name.clone());
        overrides.apply_to(&mut style);
        style
    }
}

/// A sparse set of attribute changes. Unset fields inherit from the parent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleOverrides {
    pub font_name: Option<String>,
    pub font_size: Option<f32>,
    pub line_height: Option<f32>,
    pub text_color: Option<Color>,
    pub alignment: Option<TextAlign>,
    pub space_before: Option<f32>,
    pub space_after: Option<f32>,
    pub left_indent: Option<f32>,
    pub right_indent: Option<f32>,
    pub first_line_indent: Option<f32>,
    pub bullet: Option<BulletType>,
    pub hyphenate: Option<bool>,
    pub allow_widows: Option<bool>,
}

impl StyleOverrides {
    pub fn is_empty(&self) -> bool {
        *self == StyleOverrides::default()
    }

    pub fn apply_to(&self, style: &mut Style) {
        if let Some(font_name) = &self.font_name {
            style.font_name = font_name.clone();
        }
        if let Some(v) = self.font_size {
            style.font_size = v;
        }
        if let Some(v) = self.line_height {
            style.line_height = v;
        }
        if let Some(v) = self.text_color {
            style.text_color = v;
        }
        if let Some(v) = self.alignment {
            style.alignment = v;
        }
        if let Some(v) = self.space_before {
            style.space_before = v;
        }
        if let Some(v) = self.space_after {
            style.space_after = v;
        }
        if let Some(v) = self.left_indent {
            style.left_indent = v;
        }
        if let Some(v) = self.right_indent {
            style.right_indent = v;
        }
        if let Some(v) = self.first_line_indent {
            style.first_line_indent = v;
        }
        if let Some(v) = self.bullet {
            style.bullet = Some(v);
        }
        if let Some(v) = self.hyphenate {
            style.hyphenate = v;
        }
        if let Some(v) = self.allow_widows {
            style.allow_widows = v;
        }
    }

    /// Layers `other` on top of `self`; fields set in `other` win.
    pub fn merged_with(mut self, other: StyleOverrides) -> StyleOverrides {
        macro_rules! take {
            ($($field:ident),*) => { $( if other.$field.is_some() { self.$field = other.$field; } )* };
        }
        take!(
            font_name,
            font_size,
            line_height,
            text_color,
            alignment,
            space_before,
            space_after,
            left_indent,
            right_indent,
            first_line_indent,
            bullet,
            hyphenate,
            allow_widows
        );
        self
    }

    /// Canonical `key=value` pairs in a fixed attribute order, joined by `;`.
    pub fn canonical(&self) -> String {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        if let Some(v) = &self.font_name {
            pairs.push(("font", v.to_lowercase()));
        }
        if let Some(v) = self.font_size {
            pairs.push(("size", v.to_string()));
        }
        if let Some(v) = self.line_height {
            pairs.push(("line_height", v.to_string()));
        }
        if let Some(v) = self.text_color {
            pairs.push(("color", v.to_hex()));
        }
        if let Some(v) = self.alignment {
            pairs.push(("align", v.as_str().to_string()));
        }
        if let Some(v) = self.space_before {
            pairs.push(("space_before", v.to_string()));
        }
        if let Some(v) = self.right_indent {
            pairs.push(("right_indent", v.to_string()));
        }
        if let Some(v) = self.space_after {
            pairs.push(("space_after", v.to_string()));
        }
        if let Some(v) = self.left_indent {
            pairs.push(("left_indent", v.to_string()));
        }
        if let Some(v) = self.first_line_indent {
            pairs.push(("first_line_indent", v.to_string()));
        }
        if let Some(v) = self.bullet {
            pairs.push(("bullet", v.as_str().to_string()));
        }
        if let Some(v) = self.hyphenate {
            pairs.push(("hyphenate", v.to_string()));
        }
        if let Some(v) = self.allow_widows {
            pairs.push(("allow_widows", v.to_string()));
        }
        pairs
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .join(";")
    }
}

/// A style declaration as written in a template.
///
/// Declarations are sparse: anything left out is inherited from the parent
/// style when the template registers the declaration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StyleDecl {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub options: Option<ElementOptions>,
    #[serde(default)]
    pub font_name: Option<String>,
    #[serde(default)]
    pub font_size: Option<f32>,
    #[serde(default)]
    pub line_height: Option<f32>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub first_line_indent: Option<f32>,
    #[serde(default)]
    pub bullet: Option<BulletType>,
    #[serde(default)]
    pub allow_widows: Option<bool>,
    #[serde(default)]
    pub hyphenate: Option<bool>,
}

impl StyleDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn font(mut self, font_name: impl Into<String>) -> Self {
        self.font_name = Some(font_name.into());
        self
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn line_height(mut self, line_height: f32) -> Self {
        self.line_height = Some(line_height);
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn options(mut self, options: ElementOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn bullet(mut self, bullet: BulletType) -> Self {
        self.bullet = Some(bullet);
        self
    }

    pub fn allow_widows(mut self, allow: bool) -> Self {
        self.allow_widows = Some(allow);
        self
    }

    pub fn hyphenate(mut self, hyphenate: bool) -> Self {
        self.hyphenate = Some(hyphenate);
        self
    }

    /// Attribute changes this declaration makes relative to its parent.
    /// The explicit fields are layered over the `options` deltas.
    pub fn overrides(&self) -> Result<StyleOverrides, StyleError> {
        let from_options = match &self.options {
            Some(options) => options.to_overrides()?,
            None => StyleOverrides::default(),
        };
        let text_color = match &self.color {
            Some(token) => Some(
                parsers::parse_color(token).map_err(|_| StyleError::InvalidColor(token.clone()))?,
            ),
            None => None,
        };
        let explicit = StyleOverrides {
            font_name: self.font_name.clone(),
            font_size: self.font_size,
            line_height: self.line_height,
            text_color,
            first_line_indent: self.first_line_indent,
            bullet: self.bullet,
            hyphenate: self.hyphenate,
            allow_widows: self.allow_widows,
            ..Default::default()
        };
        Ok(from_options.merged_with(explicit))
    }
}
