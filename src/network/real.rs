//! Non-finite reals in network JSON.
//!
//! Strict JSON has no NaN or infinity, but a network left behind by a
//! diverged training run carries them. They are written as the bare tokens
//! `NaN`, `Infinity` and `-Infinity` (the tokens Python's `json` module uses)
//! and accepted back on read. Every NaN is written as `NaN`, so NaN payload
//! bits and sign are not kept.

use std::borrow::Cow;
use std::fmt;

use serde::de::{self, Deserializer, Unexpected, Visitor};

pub const NAN_TOKEN: &str = "NaN";
pub const INFINITY_TOKEN: &str = "Infinity";
pub const NEG_INFINITY_TOKEN: &str = "-Infinity";

/// `-Infinity` first: it must win over a bare `Infinity` match one byte later.
const TOKENS: [&str; 3] = [NEG_INFINITY_TOKEN, INFINITY_TOKEN, NAN_TOKEN];

/// The bare token for a non-finite value, `None` for finite ones.
pub fn non_finite_token(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some(NAN_TOKEN)
    } else if value == f64::INFINITY {
        Some(INFINITY_TOKEN)
    } else if value == f64::NEG_INFINITY {
        Some(NEG_INFINITY_TOKEN)
    } else {
        None
    }
}

fn from_token(token: &str) -> Option<f64> {
    match token {
        NAN_TOKEN => Some(f64::NAN),
        INFINITY_TOKEN => Some(f64::INFINITY),
        NEG_INFINITY_TOKEN => Some(f64::NEG_INFINITY),
        _ => None,
    }
}

/// Wraps bare non-finite tokens outside string literals in quotes so that a
/// strict JSON parser accepts the text; [`deserialize`] turns them back into
/// reals.
pub(crate) fn quote_non_finite(text: &str) -> Cow<'_, str> {
    if !text.contains(NAN_TOKEN) && !text.contains(INFINITY_TOKEN) {
        return Cow::Borrowed(text);
    }

    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len() + 16);
    let mut start = 0;
    let mut in_string = false;
    let mut escaped = false;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            i += 1;
            continue;
        }
        if b == b'"' {
            in_string = true;
            i += 1;
            continue;
        }
        match TOKENS.iter().find(|t| bytes[i..].starts_with(t.as_bytes())) {
            Some(token) => {
                // `i` sits on an ASCII byte, so it is a char boundary.
                out.push_str(&text[start..i]);
                out.push('"');
                out.push_str(token);
                out.push('"');
                i += token.len();
                start = i;
            }
            None => i += 1,
        }
    }
    out.push_str(&text[start..]);
    Cow::Owned(out)
}

/// Deserializes a real from a JSON number or a quoted non-finite token.
pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(RealVisitor)
}

struct RealVisitor;

impl<'de> Visitor<'de> for RealVisitor {
    type Value = f64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a number or one of NaN, Infinity, -Infinity")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
        from_token(v).ok_or_else(|| E::invalid_value(Unexpected::Str(v), &self))
    }
}
