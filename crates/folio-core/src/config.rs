//! Page geometry and default style.

use crate::styled::FontId;

/// Page dimensions, margins, and the style applied to newly typed text.
///
/// Defaults describe a US Letter page at 96 DPI with one-inch margins.
#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    /// Page width in pixels.
    pub width: f32,
    /// Page height in pixels.
    pub height: f32,
    /// Vertical gap between consecutive pages (and above the first).
    pub gap: f32,
    /// Top margin.
    pub margin_top: f32,
    /// Bottom margin.
    pub margin_bottom: f32,
    /// Left margin.
    pub margin_left: f32,
    /// Right margin.
    pub margin_right: f32,
    /// Multiplier applied to every row's dominant line height.
    pub line_spacing: f32,
    /// Point size for newly typed characters.
    pub point_size: u32,
    /// Color string for newly typed characters.
    pub color: String,
    /// Typeface for newly typed characters.
    pub font: FontId,
}

impl Default for PageConfig {
    fn default() -> Self {
        PageConfig {
            width: 816.0,
            height: 1056.0,
            gap: 50.0,
            margin_top: 96.0,
            margin_bottom: 96.0,
            margin_left: 96.0,
            margin_right: 96.0,
            line_spacing: 1.15,
            point_size: 11,
            color: "#000000".to_string(),
            font: FontId(0),
        }
    }
}

impl PageConfig {
    /// Page pitch: the vertical distance between the tops of consecutive
    /// pages (page height plus gap).
    pub fn pitch(&self) -> f32 {
        self.height + self.gap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_defaults() {
        let config = PageConfig::default();
        assert_eq!(config.width, 816.0);
        assert_eq!(config.height, 1056.0);
        assert_eq!(config.pitch(), 1106.0);
        assert_eq!(config.point_size, 11);
    }
}
