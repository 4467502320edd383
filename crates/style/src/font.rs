use serde::{Deserialize, Serialize};

/// Family used by the built-in styles when no template font is marked default.
pub const DEFAULT_FONT_FAMILY: &str = "Helvetica";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FontVariant {
    #[default]
    Normal,
    Bold,
    Italic,
    BoldItalic,
}

impl FontVariant {
    /// Suffix appended to a family name for registered fonts ("-Bold", ...).
    pub fn suffix(&self) -> &'static str {
        match self {
            FontVariant::Normal => "",
            FontVariant::Bold => "-Bold",
            FontVariant::Italic => "-Italic",
            FontVariant::BoldItalic => "-BoldItalic",
        }
    }
}

/// Returns the font name of `variant` within `family`.
///
/// The three standard PDF families follow their own naming (`Times-Roman`
/// becomes `Times-Bold`, `Helvetica` becomes `Helvetica-Oblique`); any other
/// family uses the registration convention `Family-Bold`, `Family-Italic`,
/// `Family-BoldItalic`.
pub fn variant_name(family: &str, variant: FontVariant) -> String {
    let standard = match family {
        "Helvetica" => Some(("Helvetica", "Helvetica-", "Oblique")),
        "Times-Roman" | "Times" => Some(("Times-Roman", "Times-", "Italic")),
        "Courier" => Some(("Courier", "Courier-", "Oblique")),
        _ => None,
    };

    match standard {
        Some((normal, prefix, slant)) => match variant {
            FontVariant::Normal => normal.to_string(),
            FontVariant::Bold => format!("{}Bold", prefix),
            FontVariant::Italic => format!("{}{}", prefix, slant),
            FontVariant::BoldItalic => format!("{}Bold{}", prefix, slant),
        },
        None => format!("{}{}", family, variant.suffix()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_family_variants() {
        assert_eq!(variant_name("Helvetica", FontVariant::Bold), "Helvetica-Bold");
        assert_eq!(variant_name("Helvetica", FontVariant::BoldItalic), "Helvetica-BoldOblique");
        assert_eq!(variant_name("Times-Roman", FontVariant::Normal), "Times-Roman");
        assert_eq!(variant_name("Times-Roman", FontVariant::Italic), "Times-Italic");
        assert_eq!(variant_name("Courier", FontVariant::Italic), "Courier-Oblique");
    }

    #[test]
    fn test_registered_family_variants() {
        assert_eq!(variant_name("Lexend", FontVariant::Normal), "Lexend");
        assert_eq!(variant_name("Lexend", FontVariant::BoldItalic), "Lexend-BoldItalic");
    }
}
