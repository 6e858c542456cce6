//! The document character and its style inputs.

/// Opaque reference to a typeface known to the host's font provider.
///
/// The core never resolves fonts; it only carries the reference through to
/// the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontId(pub u32);

/// One styled character of the document.
///
/// The style inputs (`width`, `line_height`, `padding`, sizes, color, font)
/// are fixed when the character is created, measured by the host's font
/// provider. `column` and `row` are layout outputs written exclusively by the
/// layout engine; `row` is `None` only between construction and the first
/// layout walk that reaches the character.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledChar {
    /// The code point.
    pub value: char,
    /// Advance width in pixels. 0 for a line break, the fixed tab width for
    /// a tab.
    pub width: f32,
    /// Ascent + descent + leading of the character's font at `pixel_size`.
    pub line_height: f32,
    /// Descent + leading, used for inter-row spacing when font sizes differ.
    pub padding: f32,
    /// Rendered glyph size in pixels.
    pub pixel_size: f32,
    /// Nominal size in points; rows track their dominant font by this key.
    pub point_size: u32,
    /// Color string as authored (e.g. `"#d32f2f"`). Opaque to the core;
    /// resolved by the renderer.
    pub color: String,
    /// Typeface reference, opaque to the core.
    pub font: FontId,
    /// X pixel position within the row. Layout output.
    pub column: f32,
    /// Logical row number, monotonically non-decreasing in document order.
    /// Layout output.
    pub row: Option<usize>,
}

impl StyledChar {
    /// Builds a character from its style inputs, with layout outputs unset.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        value: char,
        width: f32,
        line_height: f32,
        padding: f32,
        pixel_size: f32,
        point_size: u32,
        color: String,
        font: FontId,
    ) -> Self {
        StyledChar {
            value,
            width,
            line_height,
            padding,
            pixel_size,
            point_size,
            color,
            font,
            column: 0.0,
            row: None,
        }
    }
}
