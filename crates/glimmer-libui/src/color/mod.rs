//! Color normalization.
//!
//! Declarative code passes colors in many shapes: channel lists, channel maps
//! (`r`/`red`, ...), hex strings or integers, and CSS color names. Everything
//! is normalized into a [`ColorSpec`] before it crosses into the toolkit.

mod names;

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

pub use names::named_color;

/// Bare 3- or 6-digit hex (no prefix), checked against the lowercased input.
static HEX_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[0-9a-f]{6}|[0-9a-f]{3})$").expect("valid hex pattern"));

/// Loosely typed color input.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorInput {
    Int(i64),
    /// Strings and symbols alike: hex text or a color name.
    Text(String),
    /// `[r, g, b]`, `[r, g, b, a]`, a single wrapped value, or any of these
    /// followed by a trailing options map.
    Seq(Vec<ColorInput>),
    Map(BTreeMap<String, ColorInput>),
}

impl ColorInput {
    /// Builds a map input from `(key, value)` pairs.
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<ColorInput>,
    {
        ColorInput::Map(entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    fn as_int(&self) -> Option<i64> {
        match self {
            ColorInput::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<i64> for ColorInput {
    fn from(v: i64) -> Self {
        ColorInput::Int(v)
    }
}

impl From<i32> for ColorInput {
    fn from(v: i32) -> Self {
        ColorInput::Int(i64::from(v))
    }
}

impl From<u32> for ColorInput {
    fn from(v: u32) -> Self {
        ColorInput::Int(i64::from(v))
    }
}

impl From<&str> for ColorInput {
    fn from(v: &str) -> Self {
        ColorInput::Text(v.to_string())
    }
}

impl From<String> for ColorInput {
    fn from(v: String) -> Self {
        ColorInput::Text(v)
    }
}

impl<T: Into<ColorInput>, const N: usize> From<[T; N]> for ColorInput {
    fn from(v: [T; N]) -> Self {
        ColorInput::Seq(v.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<ColorInput>> for ColorInput {
    fn from(v: Vec<ColorInput>) -> Self {
        ColorInput::Seq(v)
    }
}

/// Normalized color: integer channels in `0..=255`.
///
/// An all-`None` spec means "no color resolved". Alpha left `None` is filled
/// in by the toolkit side.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ColorSpec {
    pub r: Option<u8>,
    pub g: Option<u8>,
    pub b: Option<u8>,
    pub a: Option<u8>,
}

impl ColorSpec {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r: Some(r), g: Some(g), b: Some(b), a: None }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r: Some(r), g: Some(g), b: Some(b), a: Some(a) }
    }

    pub fn is_empty(&self) -> bool {
        self.r.is_none() && self.g.is_none() && self.b.is_none() && self.a.is_none()
    }

    /// Channels as the `0.0..=1.0` doubles libui's drawing API takes.
    ///
    /// `None` unless all of `r`, `g`, `b` are set; alpha defaults to opaque.
    pub fn to_unit_rgba(&self) -> Option<(f64, f64, f64, f64)> {
        let unit = |c: u8| f64::from(c) / 255.0;
        Some((
            unit(self.r?),
            unit(self.g?),
            unit(self.b?),
            self.a.map_or(1.0, unit),
        ))
    }

    /// Applies one channel entry; accepts long aliases. Unknown keys are ignored.
    fn set_channel(&mut self, key: &str, value: &ColorInput) {
        let Some(v) = value.as_int().map(clamp_channel) else {
            log::debug!("ignoring non-integer color channel {key}={value:?}");
            return;
        };
        match key {
            "r" | "red" => self.r = Some(v),
            "g" | "green" => self.g = Some(v),
            "b" | "blue" => self.b = Some(v),
            "a" | "alpha" => self.a = Some(v),
            other => log::debug!("ignoring color option '{other}'"),
        }
    }

    fn merge(&mut self, options: &BTreeMap<String, ColorInput>) {
        for (key, value) in options {
            self.set_channel(key, value);
        }
    }
}

fn clamp_channel(v: i64) -> u8 {
    v.clamp(0, 255) as u8
}

/// Normalizes any supported color shape into a [`ColorSpec`].
///
/// Never fails: input that is neither hex nor a known color name yields an
/// empty spec.
pub fn interpret_color(value: impl Into<ColorInput>) -> ColorSpec {
    let mut value = value.into();

    let options = match &mut value {
        ColorInput::Seq(items) if matches!(items.last(), Some(ColorInput::Map(_))) => match items.pop() {
            Some(ColorInput::Map(map)) => Some(map),
            _ => None,
        },
        _ => None,
    };

    let unwrapped = match &mut value {
        ColorInput::Seq(items) if items.len() == 1 => items.pop(),
        _ => None,
    };
    if let Some(inner) = unwrapped {
        value = inner;
    }

    let nested = match &mut value {
        ColorInput::Map(map) => map.remove("color"),
        _ => None,
    };
    if let Some(inner) = nested {
        value = inner;
    }

    let mut spec = match &value {
        ColorInput::Seq(items) => {
            let channel = |i: usize| items.get(i).and_then(ColorInput::as_int).map(clamp_channel);
            ColorSpec { r: channel(0), g: channel(1), b: channel(2), a: channel(3) }
        }
        ColorInput::Map(map) => {
            let mut spec = ColorSpec::default();
            spec.merge(map);
            spec
        }
        ColorInput::Text(text) if !text.starts_with("0x") && !HEX_PATTERN.is_match(&text.to_ascii_lowercase()) => {
            match extract_color(text) {
                Some(spec) => spec,
                None => {
                    log::warn!("unrecognized color {text:?}");
                    ColorSpec::default()
                }
            }
        }
        other => hex_to_rgb(other.clone()),
    };

    if let Some(options) = options {
        spec.merge(&options);
    }
    spec
}

/// Finds the first color among the words of `text`: a CSS `#rgb`/`#rrggbb`
/// token or a color name.
pub fn extract_color(text: &str) -> Option<ColorSpec> {
    text.split(|c: char| !(c.is_ascii_alphanumeric() || c == '#'))
        .filter(|word| !word.is_empty())
        .find_map(|word| match word.strip_prefix('#') {
            Some(digits) if HEX_PATTERN.is_match(&digits.to_ascii_lowercase()) => Some(hex_to_rgb(digits)),
            Some(_) => None,
            None => named_color(word).map(|rgb| hex_to_rgb(i64::from(rgb))),
        })
}

/// Splits a hex integer or hex string (`"0xff0000"`, `"ff0000"`, `"f00"`)
/// into `r`, `g`, `b`. Alpha is never set.
pub fn hex_to_rgb(value: impl Into<ColorInput>) -> ColorSpec {
    let hex = match value.into() {
        ColorInput::Int(v) => v,
        ColorInput::Text(text) => {
            let digits = match text.strip_prefix("0x") {
                Some(digits) => digits.to_string(),
                None if text.chars().count() == 3 => text.chars().flat_map(|c| [c, c]).collect(),
                None => text,
            };
            match i64::from_str_radix(&digits, 16) {
                Ok(v) => v,
                Err(_) => {
                    log::warn!("invalid hex color {digits:?}");
                    return ColorSpec::default();
                }
            }
        }
        _ => return ColorSpec::default(),
    };
    ColorSpec::rgb(
        ((hex >> 16) & 0xFF) as u8,
        ((hex >> 8) & 0xFF) as u8,
        (hex & 0xFF) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── sequences ─────────────────────────────────────────────────────────

    #[test]
    fn channel_lists_pass_through() {
        assert_eq!(interpret_color([10, 20, 30]), ColorSpec::rgb(10, 20, 30));
        assert_eq!(interpret_color([10, 20, 30, 40]), ColorSpec::rgba(10, 20, 30, 40));
    }

    #[test]
    fn single_element_list_is_unwrapped() {
        assert_eq!(interpret_color(["f00"]), ColorSpec::rgb(255, 0, 0));
        assert_eq!(interpret_color(vec![ColorInput::Int(0x102030)]), ColorSpec::rgb(16, 32, 48));
    }

    #[test]
    fn trailing_options_override_channels() {
        let input = ColorInput::Seq(vec![
            ColorInput::Text("blue".into()),
            ColorInput::map([("alpha", 128), ("r", 7)]),
        ]);
        assert_eq!(interpret_color(input), ColorSpec::rgba(7, 0, 255, 128));
    }

    #[test]
    fn out_of_range_channels_are_clamped() {
        assert_eq!(interpret_color([300, -5, 0]), ColorSpec::rgb(255, 0, 0));
    }

    // ── maps ──────────────────────────────────────────────────────────────

    #[test]
    fn long_channel_names_are_normalized() {
        let spec = interpret_color(ColorInput::map([("red", 1), ("green", 2), ("blue", 3)]));
        assert_eq!(spec, ColorSpec::rgb(1, 2, 3));
    }

    #[test]
    fn color_key_is_unwrapped() {
        let spec = interpret_color(ColorInput::map([("color", "0x00ff00")]));
        assert_eq!(spec, ColorSpec::rgb(0, 255, 0));
    }

    // ── strings ───────────────────────────────────────────────────────────

    #[test]
    fn hex_strings() {
        assert_eq!(interpret_color("0xff0000"), ColorSpec::rgb(255, 0, 0));
        assert_eq!(interpret_color("f00"), ColorSpec::rgb(255, 0, 0));
        assert_eq!(interpret_color("00FF00"), ColorSpec::rgb(0, 255, 0));
    }

    #[test]
    fn hex_takes_priority_over_names() {
        // "bad" is valid 3-digit hex.
        assert_eq!(interpret_color("bad"), ColorSpec::rgb(0xBB, 0xAA, 0xDD));
    }

    #[test]
    fn color_names() {
        assert_eq!(interpret_color("red"), ColorSpec::rgb(255, 0, 0));
        assert_eq!(interpret_color("DarkSlateGray"), ColorSpec::rgb(0x2F, 0x4F, 0x4F));
    }

    #[test]
    fn css_hex_tokens() {
        assert_eq!(interpret_color("#f00"), ColorSpec::rgb(255, 0, 0));
        assert_eq!(interpret_color("#FF8000"), ColorSpec::rgb(255, 128, 0));
        assert_eq!(interpret_color("border: #00ff00 solid"), ColorSpec::rgb(0, 255, 0));
        assert!(interpret_color("#ff00").is_empty());
    }

    #[test]
    fn first_color_in_text_wins() {
        assert_eq!(extract_color("paint it red, then blue"), Some(ColorSpec::rgb(255, 0, 0)));
        assert_eq!(extract_color("blue or #f00"), Some(ColorSpec::rgb(0, 0, 255)));
        assert_eq!(extract_color("#0f0 or blue"), Some(ColorSpec::rgb(0, 255, 0)));
        assert_eq!(extract_color("dark red"), Some(ColorSpec::rgb(255, 0, 0)));
        assert_eq!(extract_color("nothing here"), None);
    }

    #[test]
    fn unknown_text_is_empty() {
        let spec = interpret_color("not a colour");
        assert!(spec.is_empty());
        assert_eq!(spec.to_unit_rgba(), None);
    }

    // ── hex_to_rgb ────────────────────────────────────────────────────────

    #[test]
    fn hex_integer_splits_into_channels() {
        assert_eq!(hex_to_rgb(0x102030), ColorSpec::rgb(16, 32, 48));
    }

    #[test]
    fn invalid_hex_text_is_empty() {
        assert!(hex_to_rgb("0xzz").is_empty());
    }

    #[test]
    fn unit_rgba_defaults_alpha_to_opaque() {
        assert_eq!(ColorSpec::rgb(255, 0, 51).to_unit_rgba(), Some((1.0, 0.0, 0.2, 1.0)));
    }
}
