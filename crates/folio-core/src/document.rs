//! The document facade.
//!
//! [`Document`] ties the layout engine to everything a host UI deals in: a
//! canvas the pages are centered on, a cursor, a selection, page settings,
//! and a font-metrics provider that measures newly typed characters. Hosts
//! feed it keystrokes and pointer coordinates; the renderer reads back
//! placed characters, page geometry, and the caret.

use crate::bank::TextBank;
use crate::config::PageConfig;
use crate::font::{CellMetrics, FontMetrics, PX_PER_PT};
use crate::styled::StyledChar;

/// Width of a tab stop in pixels (half an inch at 96 DPI).
pub const TAB_WIDTH: f32 = 48.0;

/// Caret geometry: a vertical bar of height `pixel_size` whose bottom end
/// sits on `baseline` at `x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Caret {
    /// X pixel position of the bar.
    pub x: f32,
    /// Baseline y the bar rests on, scroll applied.
    pub baseline: f32,
    /// Height of the bar.
    pub pixel_size: f32,
}

/// An editable, paginated document placed on a canvas.
pub struct Document<M = CellMetrics> {
    bank: TextBank,
    config: PageConfig,
    canvas: (f32, f32),
    /// X of the left page edge; pages are horizontally centered.
    center: f32,
    /// Y of the first page's top edge. Rests at the page gap; scrolling
    /// moves it.
    draw_start: f32,
    cursor: usize,
    selection: Option<(usize, usize)>,
    metrics: M,
}

impl Document<CellMetrics> {
    /// Creates a document measured by the built-in deterministic provider.
    pub fn new(canvas: (f32, f32), config: PageConfig) -> Self {
        Document::with_metrics(canvas, config, CellMetrics)
    }
}

impl<M: FontMetrics> Document<M> {
    /// Creates a document measured by `metrics`.
    pub fn with_metrics(canvas: (f32, f32), config: PageConfig, metrics: M) -> Self {
        let mut doc = Document {
            bank: TextBank::new(config.line_spacing),
            draw_start: config.gap,
            config,
            canvas,
            center: 0.0,
            cursor: 0,
            selection: None,
            metrics,
        };
        doc.reconfigure();
        doc
    }

    /// Inserts `value` at the cursor with an explicit style, measuring it
    /// through the font provider, and advances the cursor.
    pub fn add_char(&mut self, value: char, color: &str, point_size: u32) {
        let pixel_size = point_size as f32 * PX_PER_PT;
        let width = match value {
            '\t' => TAB_WIDTH,
            '\n' => 0.0,
            _ => self.metrics.advance(value, self.config.font, pixel_size),
        };
        let ch = StyledChar::new(
            value,
            width,
            self.metrics.line_height(self.config.font, pixel_size),
            self.metrics.padding(self.config.font, pixel_size),
            pixel_size,
            point_size,
            color.to_string(),
            self.config.font,
        );
        self.bank.insert(ch, self.cursor);
        self.cursor += 1;
    }

    /// Types `text` at the cursor with the configured default style.
    pub fn add_str(&mut self, text: &str) {
        let color = self.config.color.clone();
        let point_size = self.config.point_size;
        for value in text.chars() {
            self.add_char(value, &color, point_size);
        }
    }

    /// Removes the character before the cursor. No-op at the document start.
    pub fn delete_back(&mut self) {
        if self.bank.is_empty() || self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        if let Err(e) = self.bank.remove_single(self.cursor) {
            log::error!("backspace at {}: {e}", self.cursor);
        }
    }

    /// Removes the selected range, if any, and parks the cursor at its
    /// start.
    pub fn delete_selection(&mut self) {
        if let Some(range) = self.selection.take() {
            self.cursor = self.bank.remove_selection(range);
        }
    }

    /// Places the cursor at the character nearest to `point`, after it when
    /// the point falls past the end of the line. Clears the selection.
    pub fn click(&mut self, point: (f32, f32)) {
        self.selection = None;
        self.cursor = match self.bank.find_nearest_char(point) {
            Some(hit) => hit.index + usize::from(hit.end_of_line),
            None => 0,
        };
    }

    /// Selects the range between the characters nearest to two pointer
    /// positions, e.g. the anchor and head of a drag.
    pub fn select(&mut self, anchor: (f32, f32), head: (f32, f32)) {
        self.selection = self.bank.find_range(anchor, head);
    }

    /// Moves the cursor one character left, stopping at the start.
    pub fn pan_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the cursor one character right, stopping past the last
    /// character.
    pub fn pan_right(&mut self) {
        if self.cursor < self.bank.len() {
            self.cursor += 1;
        }
    }

    /// Scrolls the pages by `delta_y`, clamped so the view neither rises
    /// above the first page's resting position nor runs past the last page.
    pub fn scroll_by(&mut self, delta_y: f32) {
        let floor = (self.canvas.1
            - self.config.gap
            - self.bank.page_count() as f32 * self.config.pitch())
        .min(self.config.gap);
        self.draw_start = (self.draw_start - delta_y).clamp(floor, self.config.gap);
        self.bank.set_scroll(self.draw_start);
    }

    /// Resizes the canvas, recentering the pages and re-laying the text.
    pub fn set_canvas(&mut self, canvas: (f32, f32)) {
        self.canvas = canvas;
        self.reconfigure();
    }

    /// Replaces the page settings and re-lays the text.
    pub fn set_config(&mut self, config: PageConfig) {
        let respaced = config.line_spacing != self.config.line_spacing;
        self.config = config;
        if respaced {
            self.bank.set_line_spacing(self.config.line_spacing);
        }
        self.reconfigure();
    }

    /// Derives the caret position from the cursor.
    ///
    /// The caret sits at the trailing edge of the character before the
    /// cursor, on that character's baseline, sized like it. After a line
    /// break it moves to the band start: on the next character's row when
    /// one exists, otherwise one default line height further down. At the
    /// document start it sits at the first baseline position on an empty
    /// first row.
    pub fn caret(&self) -> Caret {
        let default_px = self.config.point_size as f32 * PX_PER_PT;
        let origin_x = self.center + self.config.margin_left;
        if self.cursor > 0
            && let Some(prev) = self.bank.get(self.cursor - 1)
        {
            let mut x = prev.column + prev.width;
            let mut baseline = prev
                .row
                .and_then(|row| self.bank.baseline(row))
                .unwrap_or_default();
            let mut pixel_size = prev.pixel_size;
            if prev.value == '\n' {
                x = origin_x;
                if let Some(next) = self.bank.get(self.cursor) {
                    baseline = next
                        .row
                        .and_then(|row| self.bank.baseline(row))
                        .unwrap_or(baseline);
                    pixel_size = next.pixel_size;
                } else {
                    baseline += self.metrics.line_height(self.config.font, default_px)
                        * self.config.line_spacing;
                }
            }
            Caret {
                x,
                baseline,
                pixel_size,
            }
        } else {
            Caret {
                x: origin_x,
                baseline: self.draw_start
                    + self.config.margin_top
                    + self.metrics.line_height(self.config.font, default_px)
                        * self.config.line_spacing,
                pixel_size: default_px,
            }
        }
    }

    /// The layout engine, for reading placed characters and row geometry.
    pub fn bank(&self) -> &TextBank {
        &self.bank
    }

    /// Current page settings.
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Cursor position, in characters from the document start.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current selection as an inclusive index range.
    pub fn selection(&self) -> Option<(usize, usize)> {
        self.selection
    }

    /// X of the left page edge.
    pub fn center(&self) -> f32 {
        self.center
    }

    /// Y of the first page's top edge, scroll included.
    pub fn draw_start(&self) -> f32 {
        self.draw_start
    }

    /// Pages the document currently spans.
    pub fn page_count(&self) -> usize {
        self.bank.page_count()
    }

    /// Re-derives the text band and vertical geometry from the canvas and
    /// page settings and pushes them into the engine.
    fn reconfigure(&mut self) {
        self.center = self.canvas.0 / 2.0 - self.config.width / 2.0;
        self.bank.configure_boundaries(
            self.center + self.config.margin_left,
            self.center + self.config.width - self.config.margin_right,
            self.config.margin_top,
            self.config.height,
            self.config.pitch(),
            self.config.margin_bottom,
            self.draw_start,
        );
    }
}
