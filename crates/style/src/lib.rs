//! Styles, stylesheets and the per-element style resolver.
//!
//! A [`Stylesheet`] maps case-insensitive names (and aliases) to immutable
//! [`Style`]s. [`Stylesheet::resolve`] turns a base style plus transient
//! [`ElementOptions`] into a concrete style, deriving and caching substyles
//! on first use.

pub mod dimension;
pub mod error;
pub mod font;
pub mod list;
pub mod options;
pub mod parsers;
pub mod resolver;
pub mod sample;
pub mod style;
pub mod stylesheet;
pub mod text;

pub use dimension::{Margins, Orientation, PageSize};
pub use error::StyleError;
pub use font::{FontVariant, DEFAULT_FONT_FAMILY};
pub use list::BulletType;
pub use options::{ElementOptions, MarginsValue};
pub use parsers::StyleParseError;
pub use resolver::substyle_key;
pub use sample::{base_stylesheet, sample_stylesheet};
pub use style::{Style, StyleDecl, StyleOverrides};
pub use stylesheet::Stylesheet;
pub use text::TextAlign;
