//! Declarative PDF documents.
//!
//! A [`Template`] fixes the page geometry, the registered fonts and the
//! stylesheet. A [`Document`] collects content calls against a template and
//! renders them into a paginated PDF.
//!
//! ```no_run
//! use folio::{Document, ElementOptions, Template, TemplateConfig};
//!
//! let template = Template::new(TemplateConfig::default())?;
//! let mut doc = Document::new(template);
//! doc.h1("Quarterly report", None)?;
//! doc.p("Numbers went up.", Some(&ElementOptions::new().align("justify")))?;
//! doc.save_as("report.pdf")?;
//! # Ok::<(), folio::FolioError>(())
//! ```

pub mod content;
pub mod document;
pub mod error;
pub mod template;

pub use content::{parse_content, ContentItem};
pub use document::{Document, ImageSource};
pub use error::FolioError;
pub use template::{FontFamily, Template, TemplateConfig};

pub use folio_style::{
    BulletType, ElementOptions, Margins, Orientation, PageSize, Style, StyleDecl, StyleError,
    Stylesheet, TextAlign,
};
pub use folio_types::{Color, DocumentInfo};
