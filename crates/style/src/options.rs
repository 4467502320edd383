//! Per-element override options.
//!
//! An [`ElementOptions`] is the small, transient record a content call can
//! pass next to a style name. It is translated into a [`StyleOverrides`]
//! before the resolver derives (or reuses) a substyle.

use crate::dimension::Margins;
use crate::error::StyleError;
use crate::parsers;
use crate::style::StyleOverrides;
use crate::text::TextAlign;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementOptions {
    pub color: Option<String>,
    pub align: Option<String>,
    pub margin_top: Option<f32>,
    pub margin_right: Option<f32>,
    pub margin_bottom: Option<f32>,
    pub margin_left: Option<f32>,
    /// `(top, right, bottom, left)`; wins over the discrete `margin_*` keys.
    pub margins: Option<MarginsValue>,
}

/// The raw `margins` option.
///
/// Anything other than a sequence of exactly four numbers is kept as
/// `Malformed` so the error surfaces when the options are used, with the
/// offending value in the message.
#[derive(Debug, Clone, PartialEq)]
pub enum MarginsValue {
    Edges(Margins),
    Malformed(String),
}

impl ElementOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn align(mut self, align: impl Into<String>) -> Self {
        self.align = Some(align.into());
        self
    }

    pub fn margin_top(mut self, value: f32) -> Self {
        self.margin_top = Some(value);
        self
    }

    pub fn margin_right(mut self, value: f32) -> Self {
        self.margin_right = Some(value);
        self
    }

    pub fn margin_bottom(mut self, value: f32) -> Self {
        self.margin_bottom = Some(value);
        self
    }

    pub fn margin_left(mut self, value: f32) -> Self {
        self.margin_left = Some(value);
        self
    }

    pub fn margins(mut self, top: f32, right: f32, bottom: f32, left: f32) -> Self {
        self.margins = Some(MarginsValue::Edges(Margins::new(top, right, bottom, left)));
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == ElementOptions::default()
    }

    /// Effective margins. A 4-tuple `margins` replaces the discrete keys;
    /// missing discrete keys count as zero.
    pub fn resolved_margins(&self) -> Result<Margins, StyleError> {
        match &self.margins {
            Some(MarginsValue::Edges(margins)) => Ok(*margins),
            Some(MarginsValue::Malformed(raw)) => Err(StyleError::InvalidMargins(raw.clone())),
            None => Ok(Margins::new(
                self.margin_top.unwrap_or(0.0),
                self.margin_right.unwrap_or(0.0),
                self.margin_bottom.unwrap_or(0.0),
                self.margin_left.unwrap_or(0.0),
            )),
        }
    }

    pub fn text_align(&self) -> Result<Option<TextAlign>, StyleError> {
        self.align.as_deref().map(str::parse).transpose()
    }

    /// Normalizes these options into style attribute deltas.
    pub fn to_overrides(&self) -> Result<StyleOverrides, StyleError> {
        let mut overrides = StyleOverrides::default();

        if let Some(token) = &self.color {
            let color = parsers::parse_color(token)
                .map_err(|_| StyleError::InvalidColor(token.clone()))?;
            overrides.text_color = Some(color);
        }
        overrides.alignment = self.text_align()?;

        let margins = self.resolved_margins()?;
        let nonzero = |v: f32| (v != 0.0).then_some(v);
        overrides.space_before = nonzero(margins.top);
        overrides.right_indent = nonzero(margins.right);
        overrides.space_after = nonzero(margins.bottom);
        overrides.left_indent = nonzero(margins.left);

        Ok(overrides)
    }
}

impl Serialize for MarginsValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            MarginsValue::Edges(m) => [m.top, m.right, m.bottom, m.left].serialize(serializer),
            MarginsValue::Malformed(raw) => serializer.serialize_str(raw),
        }
    }
}

impl<'de> Deserialize<'de> for MarginsValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MarginsValueVisitor;

        impl<'de> de::Visitor<'de> for MarginsValueVisitor {
            type Value = MarginsValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a sequence of 4 numbers")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<MarginsValue, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut values: Vec<Option<f32>> = Vec::with_capacity(4);
                while let Some(value) = seq.next_element::<maybe_number::MaybeNumber>()? {
                    values.push(value.0);
                }
                match values.as_slice() {
                    [Some(top), Some(right), Some(bottom), Some(left)] => {
                        Ok(MarginsValue::Edges(Margins::new(*top, *right, *bottom, *left)))
                    }
                    [_, _, _, _] => Ok(MarginsValue::Malformed(
                        "a sequence with non-numeric values".to_string(),
                    )),
                    _ => Ok(MarginsValue::Malformed(format!(
                        "a sequence of {} values",
                        values.len()
                    ))),
                }
            }

            fn visit_str<E>(self, value: &str) -> Result<MarginsValue, E>
            where
                E: de::Error,
            {
                Ok(MarginsValue::Malformed(format!("{:?}", value)))
            }

            fn visit_map<A>(self, mut map: A) -> Result<MarginsValue, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                while map.next_entry::<de::IgnoredAny, de::IgnoredAny>()?.is_some() {}
                Ok(MarginsValue::Malformed("a mapping".to_string()))
            }

            fn visit_f64<E>(self, value: f64) -> Result<MarginsValue, E>
            where
                E: de::Error,
            {
                Ok(MarginsValue::Malformed(value.to_string()))
            }

            fn visit_i64<E>(self, value: i64) -> Result<MarginsValue, E>
            where
                E: de::Error,
            {
                Ok(MarginsValue::Malformed(value.to_string()))
            }

            fn visit_u64<E>(self, value: u64) -> Result<MarginsValue, E>
            where
                E: de::Error,
            {
                Ok(MarginsValue::Malformed(value.to_string()))
            }

            fn visit_bool<E>(self, value: bool) -> Result<MarginsValue, E>
            where
                E: de::Error,
            {
                Ok(MarginsValue::Malformed(value.to_string()))
            }
        }

        deserializer.deserialize_any(MarginsValueVisitor)
    }
}

/// Sequence elements that may or may not be numbers.
mod maybe_number {
    use serde::de::{self, Deserialize, Deserializer, IgnoredAny, Visitor};
    use std::fmt;

    pub struct MaybeNumber(pub Option<f32>);

    impl<'de> Deserialize<'de> for MaybeNumber {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            struct NumberVisitor;

            impl<'de> Visitor<'de> for NumberVisitor {
                type Value = MaybeNumber;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    formatter.write_str("any value")
                }

                fn visit_f64<E: de::Error>(self, v: f64) -> Result<MaybeNumber, E> {
                    Ok(MaybeNumber(Some(v as f32)))
                }

                fn visit_i64<E: de::Error>(self, v: i64) -> Result<MaybeNumber, E> {
                    Ok(MaybeNumber(Some(v as f32)))
                }

                fn visit_u64<E: de::Error>(self, v: u64) -> Result<MaybeNumber, E> {
                    Ok(MaybeNumber(Some(v as f32)))
                }

                fn visit_str<E: de::Error>(self, _: &str) -> Result<MaybeNumber, E> {
                    Ok(MaybeNumber(None))
                }

                fn visit_bool<E: de::Error>(self, _: bool) -> Result<MaybeNumber, E> {
                    Ok(MaybeNumber(None))
                }

                fn visit_unit<E: de::Error>(self) -> Result<MaybeNumber, E> {
                    Ok(MaybeNumber(None))
                }

                fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<MaybeNumber, A::Error> {
                    while seq.next_element::<IgnoredAny>()?.is_some() {}
                    Ok(MaybeNumber(None))
                }

                fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<MaybeNumber, A::Error> {
                    while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
                    Ok(MaybeNumber(None))
                }
            }

            deserializer.deserialize_any(NumberVisitor)
        }
    }
}
