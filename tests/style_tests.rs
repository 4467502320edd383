mod common;

use common::*;
use folio::{Color, ElementOptions, StyleError, Template, TemplateConfig, TextAlign};
use std::sync::Arc;

fn template() -> Template {
    Template::new(TemplateConfig::default()).expect("default template")
}

#[test]
fn test_identical_requests_share_one_substyle() {
    init_logger();
    let mut template = template();
    let sheet = template.stylesheet_mut();
    let before = sheet.len();
    let options = ElementOptions::new().color("#336699").margin_top(4.0);
    let first = sheet.resolve("body", Some(&options)).unwrap();
    let second = sheet.resolve("BodyText", Some(&options.clone())).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(sheet.len(), before + 1);
}

#[test]
fn test_discrete_margins_and_tuple_agree() {
    let mut template = template();
    let sheet = template.stylesheet_mut();
    let discrete = ElementOptions::new()
        .color("#000000")
        .align("left")
        .margin_top(20.0)
        .margin_right(10.0)
        .margin_bottom(30.0)
        .margin_left(40.0);
    let style = sheet.resolve("Normal", Some(&discrete)).unwrap();
    assert_eq!(style.text_color, Color::BLACK);
    assert_eq!(style.alignment, TextAlign::Left);
    assert_eq!(
        (style.space_before, style.right_indent, style.space_after, style.left_indent),
        (20.0, 10.0, 30.0, 40.0)
    );

    let tuple = ElementOptions::new().color("red").margins(20.0, 10.0, 30.0, 40.0);
    let red = sheet.resolve("Normal", Some(&tuple)).unwrap();
    assert_eq!(red.text_color, Color::rgb(255, 0, 0));
    assert_eq!(
        (red.space_before, red.right_indent, red.space_after, red.left_indent),
        (20.0, 10.0, 30.0, 40.0)
    );
}

#[test]
fn test_malformed_margins_from_json() {
    let mut template = template();
    for raw in [
        r#"{"margins": "20 10"}"#,
        r#"{"margins": {"top": 1}}"#,
        r#"{"margins": [1, 2, 3]}"#,
    ] {
        let options: ElementOptions = serde_json::from_str(raw).unwrap();
        let err = template.stylesheet_mut().resolve("p", Some(&options)).unwrap_err();
        assert!(matches!(err, StyleError::InvalidMargins(_)), "{}: {:?}", raw, err);
    }
}

#[test]
fn test_unknown_style() {
    let mut template = template();
    assert_eq!(
        template.stylesheet_mut().resolve("InvalidStyle", None).unwrap_err(),
        StyleError::UnknownStyle("InvalidStyle".to_string())
    );
}
