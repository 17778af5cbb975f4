use derive_more::{Deref, From, Into};
use palette::Srgba;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use strum::EnumString;
use thiserror::Error;

/// Fill color used for items when no image is set.
#[derive(Debug, Clone, Copy, PartialEq, Deref, From, Into, SerializeDisplay, DeserializeFromStr)]
pub struct ItemColor(Srgba<f64>);

impl ItemColor {
    pub fn white() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }

    pub fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self(Srgba::new(red, green, blue, alpha))
    }
}

impl Default for ItemColor {
    fn default() -> Self {
        Self::white()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
enum NamedColor {
    White,
    Black,
    #[strum(serialize = "gray", serialize = "grey")]
    Gray,
    Red,
    Green,
    Blue,
    Yellow,
    Orange,
    Transparent,
}

impl From<NamedColor> for ItemColor {
    fn from(name: NamedColor) -> Self {
        match name {
            NamedColor::White => Self::white(),
            NamedColor::Black => Self::new(0.0, 0.0, 0.0, 1.0),
            NamedColor::Gray => Self::new(0.5, 0.5, 0.5, 1.0),
            NamedColor::Red => Self::new(1.0, 0.0, 0.0, 1.0),
            NamedColor::Green => Self::new(0.0, 1.0, 0.0, 1.0),
            NamedColor::Blue => Self::new(0.0, 0.0, 1.0, 1.0),
            NamedColor::Yellow => Self::new(1.0, 1.0, 0.0, 1.0),
            NamedColor::Orange => Self::new(1.0, 0.5, 0.0, 1.0),
            NamedColor::Transparent => Self::new(0.0, 0.0, 0.0, 0.0),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid color '{0}': expected a color name, #rrggbb or #rrggbbaa")]
pub struct ParseColorError(String);

impl FromStr for ItemColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(named) = NamedColor::from_str(s) {
            return Ok(named.into());
        }

        let err = || ParseColorError(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(err)?;
        if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
            return Err(err());
        }

        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map(|v| v as f64 / 255.0)
                .map_err(|_| err())
        };
        let alpha = if hex.len() == 8 { channel(6)? } else { 1.0 };

        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, alpha))
    }
}

impl fmt::Display for ItemColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b, a) = self.0.into_components();
        let byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            byte(r),
            byte(g),
            byte(b),
            byte(a)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors() {
        let cases = vec![
            ("white", ItemColor::white()),
            ("WHITE", ItemColor::white()),
            ("Grey", ItemColor::new(0.5, 0.5, 0.5, 1.0)),
            (" black ", ItemColor::new(0.0, 0.0, 0.0, 1.0)),
        ];

        for (input, expected) in cases {
            assert_eq!(input.parse::<ItemColor>().unwrap(), expected, "{input}");
        }
    }

    #[test]
    fn test_hex_colors() {
        let c: ItemColor = "#ff0000".parse().unwrap();
        assert_eq!(c, ItemColor::new(1.0, 0.0, 0.0, 1.0));

        let c: ItemColor = "#00ff0080".parse().unwrap();
        let (r, g, b, a) = c.into_components();
        assert_eq!((r, g, b), (0.0, 1.0, 0.0));
        assert!((a - 128.0 / 255.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_colors() {
        for input in ["", "#fff", "ff0000", "#gg0000", "#ff00001", "chartreuse"] {
            assert!(input.parse::<ItemColor>().is_err(), "{input}");
        }
    }

    #[test]
    fn test_display_uses_hex() {
        assert_eq!(ItemColor::white().to_string(), "#ffffffff");
        assert_eq!(
            "#12345678".parse::<ItemColor>().unwrap().to_string(),
            "#12345678"
        );
    }

    #[test]
    fn test_color_deserialization() {
        let c: ItemColor = serde_json::from_str("\"orange\"").unwrap();
        assert_eq!(c, ItemColor::new(1.0, 0.5, 0.0, 1.0));
    }
}
