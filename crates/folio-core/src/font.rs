//! The measurement seam between the layout core and real fonts.
//!
//! The layout engine treats character widths and vertical metrics as opaque
//! numbers supplied at insertion time; it performs no font measurement
//! itself. Hosts with a real text stack implement [`FontMetrics`] over it.
//! [`CellMetrics`] is the built-in deterministic provider used by tests,
//! examples, and hosts that render on a character grid: advances derive from
//! UAX #11 cell widths, so wide CJK glyphs take twice the space of ASCII.

use unicode_width::UnicodeWidthChar;

use crate::styled::FontId;

/// Pixels per typographic point at 96 DPI.
pub const PX_PER_PT: f32 = 96.0 / 72.0;

/// Supplies per-character measurements for one or more typefaces.
pub trait FontMetrics {
    /// Advance width of `value` in pixels at the given pixel size.
    fn advance(&self, value: char, font: FontId, pixel_size: f32) -> f32;

    /// Ascent + descent + leading in pixels at the given pixel size.
    fn line_height(&self, font: FontId, pixel_size: f32) -> f32;

    /// Descent + leading in pixels at the given pixel size.
    fn padding(&self, font: FontId, pixel_size: f32) -> f32;
}

/// Deterministic metrics over an idealized em square.
///
/// Every typeface measures the same: ascent 0.8 em, descent 0.2 em, leading
/// 0.05 em, and an advance of half an em per terminal cell. Control
/// characters (including the line break) have no advance.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellMetrics;

impl CellMetrics {
    const ASCENT_EM: f32 = 0.8;
    const DESCENT_EM: f32 = 0.2;
    const LEADING_EM: f32 = 0.05;
    const ADVANCE_EM: f32 = 0.5;
}

impl FontMetrics for CellMetrics {
    fn advance(&self, value: char, _font: FontId, pixel_size: f32) -> f32 {
        let cells = UnicodeWidthChar::width(value).unwrap_or(0);
        cells as f32 * Self::ADVANCE_EM * pixel_size
    }

    fn line_height(&self, _font: FontId, pixel_size: f32) -> f32 {
        (Self::ASCENT_EM + Self::DESCENT_EM + Self::LEADING_EM) * pixel_size
    }

    fn padding(&self, _font: FontId, pixel_size: f32) -> f32 {
        (Self::DESCENT_EM + Self::LEADING_EM) * pixel_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_advance_is_half_em() {
        let m = CellMetrics;
        assert_eq!(m.advance('a', FontId(0), 16.0), 8.0);
    }

    #[test]
    fn test_wide_char_takes_two_cells() {
        let m = CellMetrics;
        assert_eq!(m.advance('界', FontId(0), 16.0), 16.0);
    }

    #[test]
    fn test_line_break_has_no_advance() {
        let m = CellMetrics;
        assert_eq!(m.advance('\n', FontId(0), 16.0), 0.0);
    }

    #[test]
    fn test_vertical_metrics_scale_with_size() {
        let m = CellMetrics;
        assert!((m.line_height(FontId(0), 20.0) - 21.0).abs() < 1e-4);
        assert!((m.padding(FontId(0), 20.0) - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_point_to_pixel_ratio() {
        assert!((11.0 * PX_PER_PT - 14.666_667).abs() < 1e-3);
    }
}
