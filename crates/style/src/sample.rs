//! The built-in stylesheets.

use crate::error::StyleError;
use crate::font::{variant_name, FontVariant};
use crate::list::BulletType;
use crate::style::{Style, StyleOverrides};
use crate::stylesheet::Stylesheet;

/// A stylesheet holding only `Normal`, set in `family` at 10pt.
pub fn base_stylesheet(family: &str) -> Result<Stylesheet, StyleError> {
    let mut sheet = Stylesheet::new();
    let mut normal = Style::new("Normal");
    normal.font_name = family.to_string();
    sheet.add(normal, None, false)?;
    Ok(sheet)
}

/// Body, heading, list and code styles built on `Normal`.
///
/// Every style uses `family` or one of its bold/italic variants, except
/// `Code` which is always Courier.
pub fn sample_stylesheet(family: &str) -> Result<Stylesheet, StyleError> {
    let mut sheet = base_stylesheet(family)?;
    let bold = variant_name(family, FontVariant::Bold);
    let italic = variant_name(family, FontVariant::Italic);
    let bold_italic = variant_name(family, FontVariant::BoldItalic);

    let body = derive(
        &mut sheet,
        "Normal",
        "BodyText",
        Some("body"),
        StyleOverrides {
            space_before: Some(6.0),
            ..Default::default()
        },
    )?;
    derive(
        &mut sheet,
        &body,
        "Italic",
        None,
        StyleOverrides {
            font_name: Some(italic),
            ..Default::default()
        },
    )?;

    let headings: [(&str, &str, &String, f32, f32, f32, f32); 6] = [
        ("Heading1", "h1", &bold, 18.0, 22.0, 0.0, 6.0),
        ("Heading2", "h2", &bold, 14.0, 18.0, 12.0, 6.0),
        ("Heading3", "h3", &bold_italic, 12.0, 14.0, 12.0, 6.0),
        ("Heading4", "h4", &bold_italic, 10.0, 12.0, 10.0, 4.0),
        ("Heading5", "h5", &bold, 9.0, 11.0, 8.0, 3.0),
        ("Heading6", "h6", &bold_italic, 8.0, 10.0, 6.0, 2.0),
    ];
    for (name, alias, font, size, leading, before, after) in headings {
        derive(
            &mut sheet,
            "Normal",
            name,
            Some(alias),
            StyleOverrides {
                font_name: Some(font.clone()),
                font_size: Some(size),
                line_height: Some(leading / size),
                space_before: Some(before),
                space_after: Some(after),
                ..Default::default()
            },
        )?;
    }

    derive(&mut sheet, "Normal", "Paragraph", Some("p"), StyleOverrides::default())?;
    derive(
        &mut sheet,
        "Normal",
        "Bullet",
        Some("bu"),
        StyleOverrides {
            space_before: Some(3.0),
            ..Default::default()
        },
    )?;
    derive(
        &mut sheet,
        "Normal",
        "Definition",
        Some("df"),
        StyleOverrides {
            left_indent: Some(36.0),
            space_before: Some(6.0),
            ..Default::default()
        },
    )?;
    derive(
        &mut sheet,
        "Normal",
        "Code",
        None,
        StyleOverrides {
            font_name: Some("Courier".to_string()),
            font_size: Some(8.0),
            line_height: Some(1.1),
            left_indent: Some(36.0),
            ..Default::default()
        },
    )?;

    for (name, alias, bullet) in [
        ("UnorderedList", "ul", BulletType::Disc),
        ("OrderedList", "ol", BulletType::Decimal),
    ] {
        derive(
            &mut sheet,
            "Normal",
            name,
            Some(alias),
            StyleOverrides {
                left_indent: Some(18.0),
                bullet: Some(bullet),
                ..Default::default()
            },
        )?;
    }

    Ok(sheet)
}

fn derive(
    sheet: &mut Stylesheet,
    parent: &str,
    name: &str,
    alias: Option<&str>,
    overrides: StyleOverrides,
) -> Result<String, StyleError> {
    let style = sheet.require(parent)?.derive(name, &overrides);
    sheet.add(style, alias, false)?;
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_stylesheet_only_has_normal() {
        let sheet = base_stylesheet("Helvetica").unwrap();
        assert_eq!(sheet.names(), vec!["Normal"]);
        assert_eq!(sheet.get("normal").unwrap().font_size, 10.0);
    }

    #[test]
    fn test_sample_aliases_resolve() {
        let sheet = sample_stylesheet("Helvetica").unwrap();
        for alias in ["body", "h1", "h2", "h3", "h4", "h5", "h6", "p", "bu", "df", "ul", "ol"] {
            assert!(sheet.contains(alias), "missing alias {}", alias);
        }
        assert!(sheet.contains("Code"));
        assert!(sheet.contains("Italic"));
    }

    #[test]
    fn test_heading_metrics() {
        let sheet = sample_stylesheet("Helvetica").unwrap();
        let h1 = sheet.get("h1").unwrap();
        assert_eq!(h1.font_name, "Helvetica-Bold");
        assert_eq!(h1.font_size, 18.0);
        assert!((h1.leading() - 22.0).abs() < 1e-4);
        assert_eq!(h1.space_after, 6.0);
        assert_eq!(sheet.get("h3").unwrap().font_name, "Helvetica-BoldOblique");
    }

    #[test]
    fn test_family_is_applied_everywhere_but_code() {
        let sheet = sample_stylesheet("Lexend").unwrap();
        assert_eq!(sheet.get("Normal").unwrap().font_name, "Lexend");
        assert_eq!(sheet.get("h2").unwrap().font_name, "Lexend-Bold");
        assert_eq!(sheet.get("Italic").unwrap().font_name, "Lexend-Italic");
        assert_eq!(sheet.get("Italic").unwrap().space_before, 6.0);
        assert_eq!(sheet.get("Code").unwrap().font_name, "Courier");
    }

    #[test]
    fn test_list_styles_carry_bullets() {
        let sheet = sample_stylesheet("Helvetica").unwrap();
        assert_eq!(sheet.get("ul").unwrap().bullet, Some(BulletType::Disc));
        assert_eq!(sheet.get("ol").unwrap().bullet, Some(BulletType::Decimal));
        assert_eq!(sheet.get("p").unwrap().bullet, None);
    }
}
