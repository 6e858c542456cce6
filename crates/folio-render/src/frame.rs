//! Draw-list construction.

use folio_core::{Document, FontId, FontMetrics};

use crate::color::{ColorCache, Rgba};
use crate::error::RenderError;

/// One page background rectangle, in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRect {
    /// X of the left edge.
    pub x: f32,
    /// Y of the top edge, scroll included.
    pub y: f32,
    /// Page width.
    pub width: f32,
    /// Page height.
    pub height: f32,
}

/// One character to draw at its resolved position.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphCommand {
    /// The code point.
    pub value: char,
    /// X of the glyph's leading edge.
    pub x: f32,
    /// Baseline y, scroll included.
    pub baseline: f32,
    /// Glyph size in pixels.
    pub pixel_size: f32,
    /// Resolved color.
    pub color: Rgba,
    /// Typeface reference for the host's font stack.
    pub font: FontId,
}

/// The caret bar: drawn from `baseline - height` down to `baseline` at `x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaretCommand {
    /// X of the bar.
    pub x: f32,
    /// Baseline y the bar rests on.
    pub baseline: f32,
    /// Bar height.
    pub height: f32,
}

/// A complete frame: everything a backend needs to paint one view of a
/// document, in paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Page backgrounds, front to back in page order.
    pub pages: Vec<PageRect>,
    /// Characters in document order.
    pub glyphs: Vec<GlyphCommand>,
    /// The caret.
    pub caret: CaretCommand,
}

impl Frame {
    /// Builds the draw list for the document's current state, resolving
    /// colors through `colors`.
    pub fn build<M: FontMetrics>(
        doc: &Document<M>,
        colors: &mut ColorCache,
    ) -> Result<Frame, RenderError> {
        let config = doc.config();
        let pages = (0..doc.page_count())
            .map(|page| PageRect {
                x: doc.center(),
                y: doc.draw_start() + page as f32 * config.pitch(),
                width: config.width,
                height: config.height,
            })
            .collect();

        let mut glyphs = Vec::with_capacity(doc.bank().len());
        let mut bad_color = None;
        doc.bank().for_each(|placed| {
            if bad_color.is_some() {
                return;
            }
            match colors.resolve(&placed.ch.color) {
                Ok(color) => glyphs.push(GlyphCommand {
                    value: placed.ch.value,
                    x: placed.ch.column,
                    baseline: placed.baseline,
                    pixel_size: placed.ch.pixel_size,
                    color,
                    font: placed.ch.font,
                }),
                Err(e) => bad_color = Some(e),
            }
        })?;
        if let Some(e) = bad_color {
            return Err(e);
        }

        let caret = doc.caret();
        Ok(Frame {
            pages,
            glyphs,
            caret: CaretCommand {
                x: caret.x,
                baseline: caret.baseline,
                height: caret.pixel_size,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use folio_core::PageConfig;
    use pretty_assertions::assert_eq;

    use super::*;

    fn small_pages() -> PageConfig {
        PageConfig {
            height: 300.0,
            ..PageConfig::default()
        }
    }

    #[test]
    fn test_empty_document_still_has_a_page_and_a_caret() {
        let doc = Document::new((1280.0, 720.0), PageConfig::default());
        let frame = Frame::build(&doc, &mut ColorCache::new()).unwrap();
        assert_eq!(frame.glyphs.len(), 0);
        assert_eq!(
            frame.pages,
            vec![PageRect {
                x: 232.0,
                y: 50.0,
                width: 816.0,
                height: 1056.0,
            }]
        );
        let caret = doc.caret();
        assert_eq!(frame.caret.x, caret.x);
        assert_eq!(frame.caret.baseline, caret.baseline);
        assert_eq!(frame.caret.height, caret.pixel_size);
    }

    #[test]
    fn test_glyphs_carry_resolved_positions_and_colors() {
        let mut doc = Document::new((1280.0, 720.0), PageConfig::default());
        doc.add_char('a', "#d32f2f", 11);
        doc.add_char('b', "#d32f2f", 11);

        let mut colors = ColorCache::new();
        let frame = Frame::build(&doc, &mut colors).unwrap();
        assert_eq!(frame.glyphs.len(), 2);
        assert_eq!(frame.glyphs[0].value, 'a');
        assert_eq!(frame.glyphs[0].x, doc.bank().get(0).unwrap().column);
        assert_eq!(frame.glyphs[1].x, doc.bank().get(1).unwrap().column);
        assert_eq!(frame.glyphs[0].baseline, doc.bank().baseline(0).unwrap());
        assert_eq!(
            frame.glyphs[0].color,
            Rgba {
                r: 211,
                g: 47,
                b: 47,
                a: 255
            }
        );
        assert_eq!(colors.len(), 1);
    }

    #[test]
    fn test_one_rect_per_page_offset_by_the_pitch() {
        let mut doc = Document::new((1280.0, 720.0), small_pages());
        for _ in 0..8 {
            doc.add_str("a\n");
        }
        assert!(doc.page_count() > 1);

        let frame = Frame::build(&doc, &mut ColorCache::new()).unwrap();
        assert_eq!(frame.pages.len(), doc.page_count());
        let pitch = small_pages().pitch();
        for (i, rect) in frame.pages.iter().enumerate() {
            assert_eq!(rect.y, doc.draw_start() + i as f32 * pitch);
            assert_eq!(rect.height, 300.0);
        }
    }

    #[test]
    fn test_unresolvable_color_aborts_the_frame() {
        let mut doc = Document::new((1280.0, 720.0), PageConfig::default());
        doc.add_char('a', "cornflower", 11);
        let err = Frame::build(&doc, &mut ColorCache::new()).unwrap_err();
        assert_eq!(err, RenderError::InvalidColor("cornflower".to_string()));
    }
}
