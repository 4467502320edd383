//! Low-level nom parser functions for style values.
//!
//! This module provides composable parser functions for lengths with units,
//! margin shorthands and colors, as they appear in template configuration
//! and per-element options.

use crate::dimension::Margins;
use folio_types::Color;
use nom::branch::alt;
use nom::bytes::complete::{tag_no_case, take_while_m_n};
use nom::character::complete::{char, digit1, space0, space1};
use nom::combinator::{all_consuming, map, map_res, opt, recognize};
use nom::multi::separated_list1;
use nom::sequence::{delimited, pair, preceded};
use nom::{IResult, Parser};
use thiserror::Error;

/// Points per millimetre.
pub const MM: f32 = 72.0 / 25.4;
/// Points per centimetre.
pub const CM: f32 = 72.0 / 2.54;
/// Points per inch.
pub const INCH: f32 = 72.0;

/// Errors that can occur during style value parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleParseError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid value for '{property}': {value}")]
    InvalidValue { property: String, value: String },
}

// --- Helper Parsers ---

fn parse_f32(input: &str) -> IResult<&str, f32> {
    map_res(
        recognize(pair(
            opt(alt((char('+'), char('-')))),
            alt((
                recognize(pair(digit1, opt(pair(char('.'), digit1)))),
                recognize(pair(char('.'), digit1)),
            )),
        )),
        |s: &str| s.parse::<f32>(),
    )
    .parse(input)
}

// --- Unit & Length Parsers ---

fn parse_unit(input: &str) -> IResult<&str, f32> {
    alt((
        map(tag_no_case("pt"), |_| 1.0),
        map(tag_no_case("px"), |_| 1.0),
        map(tag_no_case("in"), |_| INCH),
        map(tag_no_case("cm"), |_| CM),
        map(tag_no_case("mm"), |_| MM),
    ))
    .parse(input)
}

/// Parses a length value with optional unit (e.g., "12pt", "1in", "10mm").
/// A bare number is taken as points.
pub fn parse_length(input: &str) -> IResult<&str, f32> {
    map(pair(parse_f32, opt(parse_unit)), |(value, unit)| {
        value * unit.unwrap_or(1.0)
    })
    .parse(input)
}

/// Parses CSS shorthand margins (1, 2, or 4 values).
pub fn parse_shorthand_margins(input: &str) -> Result<Margins, StyleParseError> {
    let parsed = all_consuming(delimited(
        space0,
        separated_list1(space1, parse_length),
        space0,
    ))
    .parse(input);

    match parsed {
        Ok((_, parts)) => match parts.as_slice() {
            [all] => Ok(Margins::all(*all)),
            [y, x] => Ok(Margins::new(*y, *x, *y, *x)),
            [top, right, bottom, left] => Ok(Margins::new(*top, *right, *bottom, *left)),
            _ => Err(StyleParseError::Parse(format!(
                "Invalid number of values for margin shorthand: got {}, expected 1, 2, or 4.",
                parts.len()
            ))),
        },
        Err(_) => Err(StyleParseError::Parse(format!(
            "Failed to parse margins value: '{}'",
            input
        ))),
    }
}

// --- Color Parsers ---

fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

fn hex_primary(input: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(2, 2, is_hex_digit), |s: &str| {
        u8::from_str_radix(s, 16)
    })
    .parse(input)
}

fn hex_short(input: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(1, 1, is_hex_digit), |s: &str| {
        u8::from_str_radix(s, 16).map(|v| v * 17)
    })
    .parse(input)
}

fn hex_color_6(input: &str) -> IResult<&str, Color> {
    map((hex_primary, hex_primary, hex_primary), |(r, g, b)| {
        Color::rgb(r, g, b)
    })
    .parse(input)
}

fn hex_color_3(input: &str) -> IResult<&str, Color> {
    map((hex_short, hex_short, hex_short), |(r, g, b)| {
        Color::rgb(r, g, b)
    })
    .parse(input)
}

/// Parses a hex color (e.g., "#FF0000" or "#F00").
pub fn parse_hex_color(input: &str) -> IResult<&str, Color> {
    preceded(char('#'), alt((hex_color_6, hex_color_3))).parse(input)
}

/// Parses a color token: a hex color or one of the named colors.
pub fn parse_color(input: &str) -> Result<Color, StyleParseError> {
    let input = input.trim();
    if input.starts_with('#') {
        return run_parser(parse_hex_color, input);
    }
    Color::from_name(input).ok_or_else(|| StyleParseError::InvalidValue {
        property: "color".to_string(),
        value: input.to_string(),
    })
}

/// Helper to run a nom parser over the whole input and convert its result
/// to a `Result<T, StyleParseError>`.
pub fn run_parser<'a, T, F>(parser: F, input: &'a str) -> Result<T, StyleParseError>
where
    F: Parser<&'a str, Output = T, Error = nom::error::Error<&'a str>>,
{
    match all_consuming(parser).parse(input) {
        Ok((_, value)) => Ok(value),
        Err(e) => Err(StyleParseError::Parse(format!(
            "Failed to parse '{}': {}",
            input, e
        ))),
    }
}
