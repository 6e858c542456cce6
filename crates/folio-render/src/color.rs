//! Color strings and their resolution cache.
//!
//! Characters carry their color as the string the author typed; resolution
//! to channel values happens here, once per distinct string, and the result
//! is memoized for the rest of the session.

use std::collections::HashMap;

use crate::error::RenderError;

/// A resolved color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel; parsed colors are opaque.
    pub a: u8,
}

impl Rgba {
    /// Opaque black, the caret and fallback color.
    pub const BLACK: Rgba = Rgba {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };

    /// Parses `"#rrggbb"`, `"#rgb"`, or `"rgb(r, g, b)"`.
    pub fn parse(text: &str) -> Result<Rgba, RenderError> {
        parse(text).ok_or_else(|| RenderError::InvalidColor(text.to_string()))
    }
}

fn parse(text: &str) -> Option<Rgba> {
    if let Some(hex) = text.strip_prefix('#') {
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(hex, 16).ok()?;
        return match hex.len() {
            6 => Some(Rgba {
                r: (value >> 16) as u8,
                g: (value >> 8) as u8,
                b: value as u8,
                a: 255,
            }),
            3 => Some(Rgba {
                r: nibble((value >> 8) as u8),
                g: nibble((value >> 4) as u8),
                b: nibble(value as u8),
                a: 255,
            }),
            _ => None,
        };
    }
    let body = text.strip_prefix("rgb(")?.strip_suffix(')')?;
    let mut channels = body.split(',').map(|part| part.trim().parse::<u8>().ok());
    let (r, g, b) = (channels.next()??, channels.next()??, channels.next()??);
    if channels.next().is_some() {
        return None;
    }
    Some(Rgba { r, g, b, a: 255 })
}

/// Expands one shorthand hex digit to its doubled form (`f` → `ff`).
fn nibble(digit: u8) -> u8 {
    (digit & 0xf) * 17
}

/// String-to-color memo map, owned by the renderer.
///
/// Entries are last-write-wins per key; a string resolves at most once per
/// cache lifetime.
#[derive(Debug, Default)]
pub struct ColorCache {
    colors: HashMap<String, Rgba>,
}

impl ColorCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        ColorCache::default()
    }

    /// Resolves `color`, consulting the memo first.
    pub fn resolve(&mut self, color: &str) -> Result<Rgba, RenderError> {
        if let Some(&hit) = self.colors.get(color) {
            return Ok(hit);
        }
        let parsed = Rgba::parse(color)?;
        self.colors.insert(color.to_string(), parsed);
        Ok(parsed)
    }

    /// Number of distinct strings resolved so far.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether nothing has been resolved yet.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
