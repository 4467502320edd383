mod common;

use common::*;
use folio::{Document, DocumentInfo, ElementOptions, FolioError, Template, TemplateConfig};
use lopdf::Object;

#[test]
fn test_empty_document_is_one_blank_page() -> TestResult {
    init_logger();
    let pdf = render(&document()?)?;
    assert_eq!(pdf.page_count(), 1);
    assert!(pdf.bytes.starts_with(b"%PDF-"));
    Ok(())
}

#[test]
fn test_headings_and_paragraphs_are_extractable() -> TestResult {
    init_logger();
    let mut doc = document()?;
    doc.h1("Annual Report", None)?;
    doc.p("The first paragraph of the report.", None)?;
    doc.h2("Details", None)?;
    doc.p("Another paragraph.", Some(&ElementOptions::new().align("right").color("navy")))?;

    let pdf = render(&doc)?;
    assert_eq!(pdf.page_count(), 1);
    let text = pdf.text();
    for needle in ["Annual Report", "first paragraph", "Details", "Another paragraph."] {
        assert!(text.contains(needle), "missing '{}' in {:?}", needle, text);
    }
    Ok(())
}

#[test]
fn test_long_content_flows_across_pages() -> TestResult {
    init_logger();
    let mut doc = document()?;
    for _ in 0..40 {
        doc.p(&lorem(80), None)?;
    }
    let pdf = render(&doc)?;
    assert!(pdf.page_count() > 2, "got {} pages", pdf.page_count());
    Ok(())
}

#[test]
fn test_page_breaks() -> TestResult {
    init_logger();
    let mut doc = document()?;
    doc.p("first", None)?;
    doc.add_page_break();
    doc.add_page_break();
    doc.p("second", None)?;
    doc.add_page_break();

    let pdf = render(&doc)?;
    // Repeated breaks do not leave blank pages, and a trailing break adds none.
    assert_eq!(pdf.page_count(), 2);
    assert!(pdf.page_text(1).contains("first"));
    assert!(pdf.page_text(2).contains("second"));
    Ok(())
}

#[test]
fn test_column_break_stays_on_the_page_with_two_columns() -> TestResult {
    init_logger();
    let config = TemplateConfig::default().columns(2, 18.0);
    let mut doc = Document::new(Template::new(config)?);
    doc.p("left column", None)?;
    doc.add_column_break();
    doc.p("right column", None)?;
    doc.add_column_break();
    doc.p("next page", None)?;

    let pdf = render(&doc)?;
    assert_eq!(pdf.page_count(), 2);
    assert!(pdf.page_text(1).contains("right column"));
    assert!(pdf.page_text(2).contains("next page"));
    Ok(())
}

#[test]
fn test_lists_render_markers() -> TestResult {
    init_logger();
    let mut doc = document()?;
    doc.ol(&["alpha", "beta", "gamma"], None)?;
    let pdf = render(&doc)?;
    let text = pdf.text();
    assert!(text.contains("1."));
    assert!(text.contains("3."));
    assert!(text.contains("gamma"));
    Ok(())
}

#[test]
fn test_outline_from_headings() -> TestResult {
    init_logger();
    let mut doc = document()?;
    doc.h1("Chapter", None)?;
    doc.h2("Section", None)?;
    doc.p("Body", None)?;

    let pdf = render(&doc)?;
    let outlines_id = pdf.catalog().get(b"Outlines")?.as_reference()?;
    let outlines = pdf.doc.get_dictionary(outlines_id)?;
    assert_eq!(outlines.get(b"Count")?.as_i64()?, 2);
    let chapter = pdf.doc.get_dictionary(outlines.get(b"First")?.as_reference()?)?;
    assert_eq!(chapter.get(b"Title")?.as_str()?, b"Chapter");
    Ok(())
}

#[test]
fn test_outline_disabled() -> TestResult {
    init_logger();
    let config = TemplateConfig {
        outlines: false,
        ..Default::default()
    };
    let mut doc = Document::new(Template::new(config)?);
    doc.h1("Chapter", None)?;
    let pdf = render(&doc)?;
    assert!(pdf.catalog().get(b"Outlines").is_err());
    Ok(())
}

#[test]
fn test_page_numbers() -> TestResult {
    init_logger();
    let config = TemplateConfig {
        page_numbers: true,
        ..Default::default()
    };
    let mut doc = Document::new(Template::new(config)?);
    doc.p("one", None)?;
    doc.add_page_break();
    doc.p("two", None)?;
    let pdf = render(&doc)?;
    assert!(pdf.page_text(1).contains("Page 1"));
    assert!(pdf.page_text(2).contains("Page 2"));
    Ok(())
}

#[test]
fn test_document_info() -> TestResult {
    init_logger();
    let config = TemplateConfig {
        info: DocumentInfo {
            title: Some("Minutes".to_string()),
            author: Some("Board".to_string()),
            subject: None,
        },
        ..Default::default()
    };
    let pdf = render(&Document::new(Template::new(config)?))?;
    let info_id = pdf.doc.trailer.get(b"Info")?.as_reference()?;
    let info = pdf.doc.get_dictionary(info_id)?;
    assert_eq!(info.get(b"Title")?.as_str()?, b"Minutes");
    assert_eq!(info.get(b"Author")?.as_str()?, b"Board");
    assert!(info.get(b"Producer").is_ok());
    Ok(())
}

#[test]
fn test_separator_and_image() -> TestResult {
    init_logger();
    let mut doc = document()?;
    doc.hr(2.0, Some(&ElementOptions::new().color("#cc0000").margins(6.0, 0.0, 6.0, 0.0)))?;
    doc.br();
    doc.add_image(png_bytes(40, 20), Some(120.0), Some(&ElementOptions::new().align("center")))?;

    let pdf = render(&doc)?;
    assert_eq!(pdf.page_count(), 1);
    let images: Vec<_> = pdf
        .doc
        .objects
        .values()
        .filter_map(|object| match object {
            Object::Stream(stream) => Some(&stream.dict),
            _ => None,
        })
        .filter(|dict| dict.get(b"Subtype").and_then(Object::as_name).is_ok_and(|name| name == b"Image"))
        .collect();
    // The RGB image plus its soft mask.
    assert_eq!(images.len(), 2);
    Ok(())
}

#[test]
fn test_image_from_path() -> TestResult {
    init_logger();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("dot.png");
    std::fs::write(&path, png_bytes(4, 4))?;

    let mut doc = document()?;
    doc.add_image(path.as_path(), None, None)?;
    assert_eq!(render(&doc)?.page_count(), 1);

    let missing = doc.add_image(dir.path().join("missing.png"), None, None);
    assert!(matches!(missing, Err(FolioError::Layout(_))));
    Ok(())
}

#[test]
fn test_save_as_writes_the_same_pdf() -> TestResult {
    init_logger();
    let mut doc = document()?;
    doc.p("Saved to disk", None)?;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("out.pdf");
    doc.save_as(&path)?;

    let pdf = GeneratedPdf::from_bytes(std::fs::read(&path)?)?;
    assert!(pdf.text().contains("Saved to disk"));
    Ok(())
}

#[test]
fn test_unknown_style_is_rejected_by_content_calls() -> TestResult {
    let mut doc = document()?;
    assert!(doc.add_paragraph("text", "InvalidStyle", None).unwrap_err().is_unknown_style());
    assert!(doc.add_list(&["a", "b"], "InvalidStyle", None).unwrap_err().is_unknown_style());
    assert!(doc.elements().is_empty());
    Ok(())
}

#[test]
fn test_invalid_options_are_rejected() -> TestResult {
    let mut doc = document()?;
    let bad_color = ElementOptions::new().color("not-a-color");
    assert!(matches!(
        doc.p("x", Some(&bad_color)),
        Err(FolioError::Style(folio::StyleError::InvalidColor(_)))
    ));
    let bad_align = ElementOptions::new().align("middle");
    assert!(matches!(
        doc.p("x", Some(&bad_align)),
        Err(FolioError::Style(folio::StyleError::InvalidValue { .. }))
    ));
    Ok(())
}
