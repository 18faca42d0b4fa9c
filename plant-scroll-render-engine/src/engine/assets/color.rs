use bevy::prelude::*;
use serde::{Deserialize, Deserializer, de};

/// Parse `#rrggbb`, `rrggbb` or `0xrrggbb` into a packed 24-bit colour.
pub fn parse_hex_color(input: &str) -> Option<u32> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix('#')
        .or_else(|| trimmed.strip_prefix("0x"))
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.len() != 6 {
        return None;
    }

    u32::from_str_radix(digits, 16).ok()
}

/// Accept either a colour string or an integer from JSON.
pub fn color_from_json(value: &serde_json::Value) -> Option<u32> {
    match value {
        serde_json::Value::String(text) => parse_hex_color(text),
        serde_json::Value::Number(number) => number
            .as_u64()
            .filter(|packed| *packed <= 0xffffff)
            .map(|packed| packed as u32),
        _ => None,
    }
}

pub fn color_from_hex(packed: u32) -> Color {
    Color::srgb_u8(
        ((packed >> 16) & 0xff) as u8,
        ((packed >> 8) & 0xff) as u8,
        (packed & 0xff) as u8,
    )
}

pub fn hex_string(packed: u32) -> String {
    format!("#{:06x}", packed & 0xffffff)
}

/// Serde adapter for optional config fields holding a colour.
pub fn deserialize_optional_color<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(value) = Option::<serde_json::Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    color_from_json(&value)
        .map(Some)
        .ok_or_else(|| de::Error::custom(format!("expected a 0xrrggbb colour, got {value}")))
}
