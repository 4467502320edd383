//! List bullet types and their marker text.
use crate::error::StyleError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
#[derive(Default)]
pub enum BulletType {
    #[default]
    Disc,
    Circle,
    Dash,
    Decimal,
    LowerAlpha,
    UpperAlpha,
    LowerRoman,
    UpperRoman,
}

impl BulletType {
    pub fn is_ordered(&self) -> bool {
        !matches!(self, BulletType::Disc | BulletType::Circle | BulletType::Dash)
    }

    /// Marker text for the item at one-based `position`.
    pub fn marker(&self, position: usize) -> String {
        match self {
            BulletType::Disc => "\u{2022}".to_string(),
            BulletType::Circle => "\u{00b0}".to_string(),
            BulletType::Dash => "\u{2013}".to_string(),
            BulletType::Decimal => format!("{}.", position),
            BulletType::LowerAlpha => format!("{}.", to_alpha(position)),
            BulletType::UpperAlpha => format!("{}.", to_alpha(position).to_uppercase()),
            BulletType::LowerRoman => format!("{}.", to_roman(position)),
            BulletType::UpperRoman => format!("{}.", to_roman(position).to_uppercase()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BulletType::Disc => "disc",
            BulletType::Circle => "circle",
            BulletType::Dash => "dash",
            BulletType::Decimal => "decimal",
            BulletType::LowerAlpha => "lower-alpha",
            BulletType::UpperAlpha => "upper-alpha",
            BulletType::LowerRoman => "lower-roman",
            BulletType::UpperRoman => "upper-roman",
        }
    }
}

impl FromStr for BulletType {
    type Err = StyleError;

    /// Accepts the kebab-case names as well as the short forms
    /// `1`, `a`, `A`, `i`, `I` and `-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bullet = match s {
            "1" => BulletType::Decimal,
            "a" => BulletType::LowerAlpha,
            "A" => BulletType::UpperAlpha,
            "i" => BulletType::LowerRoman,
            "I" => BulletType::UpperRoman,
            "-" => BulletType::Dash,
            _ => match s.to_ascii_lowercase().as_str() {
                "disc" | "bullet" => BulletType::Disc,
                "circle" => BulletType::Circle,
                "dash" => BulletType::Dash,
                "decimal" => BulletType::Decimal,
                "lower-alpha" => BulletType::LowerAlpha,
                "upper-alpha" => BulletType::UpperAlpha,
                "lower-roman" => BulletType::LowerRoman,
                "upper-roman" => BulletType::UpperRoman,
                _ => {
                    return Err(StyleError::InvalidValue {
                        option: "bullet".to_string(),
                        value: s.to_string(),
                    });
                }
            },
        };
        Ok(bullet)
    }
}

fn to_alpha(mut n: usize) -> String {
    let mut out = Vec::new();
    while n > 0 {
        n -= 1;
        out.push((b'a' + (n % 26) as u8) as char);
        n /= 26;
    }
    out.iter().rev().collect()
}

fn to_roman(mut n: usize) -> String {
    const NUMERALS: [(usize, &str); 13] = [
        (1000, "m"),
        (900, "cm"),
        (500, "d"),
        (400, "cd"),
        (100, "c"),
        (90, "xc"),
        (50, "l"),
        (40, "xl"),
        (10, "x"),
        (9, "ix"),
        (5, "v"),
        (4, "iv"),
        (1, "i"),
    ];
    let mut out = String::new();
    for (value, numeral) in NUMERALS {
        while n >= value {
            out.push_str(numeral);
            n -= value;
        }
    }
    out
}
