//! The layout engine.
//!
//! [`TextBank`] owns the ordered character store and the row-metrics map. On
//! every edit it re-walks only the suffix of the document that the edit can
//! affect, reassigning columns and rows, keeping the per-row font
//! bookkeeping current, and re-deriving pagination. Reads never trigger
//! work: iteration and the geometric queries are pure projections over
//! already-resolved state.
//!
//! Vertical coordinates are stored in document space (scroll excluded); the
//! configured scroll offset is applied whenever a baseline leaves the
//! engine, which keeps scrolling an O(1) field update.

use crate::metrics::{self, RowInfo, RowMap};
use crate::store::{IndexOutOfRange, Iter, OrderedList};
use crate::styled::StyledChar;

/// Reportable failures of the layout engine.
///
/// `RowMetricMissing` and `Unassigned` signal a transient inconsistency
/// between the character store and the row map; a traversal observing one
/// aborts and reports rather than panicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    /// A character index outside the store bounds.
    OutOfRange(IndexOutOfRange),
    /// A positioned character references a row with no metrics entry.
    RowMetricMissing {
        /// The row index that has no entry.
        row: usize,
    },
    /// A character has not been assigned a row yet.
    Unassigned {
        /// Index of the unpositioned character.
        index: usize,
    },
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutError::OutOfRange(e) => write!(f, "{}", e),
            LayoutError::RowMetricMissing { row } => {
                write!(f, "no metrics recorded for row {}", row)
            }
            LayoutError::Unassigned { index } => {
                write!(f, "character {} has no row assignment", index)
            }
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LayoutError::OutOfRange(e) => Some(e),
            _ => None,
        }
    }
}

impl From<IndexOutOfRange> for LayoutError {
    fn from(e: IndexOutOfRange) -> Self {
        LayoutError::OutOfRange(e)
    }
}

/// Result of a nearest-character query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    /// Index of the nearest character.
    pub index: usize,
    /// True when the query point is closer to the trailing edge of the row's
    /// last character than to its leading edge; the caret then belongs after
    /// the glyph rather than before it.
    pub end_of_line: bool,
}

/// One character as a traversal yields it: position fully resolved.
#[derive(Debug, Clone, Copy)]
pub struct PlacedChar<'a> {
    /// Document index.
    pub index: usize,
    /// The stored character.
    pub ch: &'a StyledChar,
    /// Row the character sits on.
    pub row: usize,
    /// Baseline y with the scroll offset applied.
    pub baseline: f32,
    /// Page the character's row falls on.
    pub page: usize,
}

/// Layout freshness. Edits accumulate the smallest affected index so that a
/// batch of removals is re-walked once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LayoutState {
    Clean,
    Dirty { from: usize },
}

/// The layout engine: ordered character storage plus incremental line
/// breaking, pagination, and hit testing.
pub struct TextBank {
    chars: OrderedList<StyledChar>,
    rows: RowMap,
    /// Horizontal text band: x of the first column, rightmost usable x.
    band: (f32, f32),
    /// Y of the first baseline origin on each page (the top margin line).
    y_top: f32,
    /// Y of a page's bottom edge.
    y_bottom: f32,
    /// Vertical distance between the tops of consecutive pages.
    pitch: f32,
    bottom_margin: f32,
    scroll: f32,
    line_spacing: f32,
    state: LayoutState,
    page_count: usize,
}

impl TextBank {
    /// Creates an empty, unconfigured engine.
    pub fn new(line_spacing: f32) -> Self {
        TextBank {
            chars: OrderedList::new(),
            rows: RowMap::new(),
            band: (0.0, 0.0),
            y_top: 0.0,
            y_bottom: 0.0,
            pitch: 0.0,
            bottom_margin: 0.0,
            scroll: 0.0,
            line_spacing,
            state: LayoutState::Clean,
            page_count: 1,
        }
    }

    /// Sets the text band and the vertical geometry rows and pages derive
    /// from. The relayout this implies runs before the call returns.
    #[allow(clippy::too_many_arguments)]
    pub fn configure_boundaries(
        &mut self,
        x_start: f32,
        x_end: f32,
        y_top: f32,
        y_bottom: f32,
        pitch: f32,
        bottom_margin: f32,
        scroll: f32,
    ) {
        self.band = (x_start, x_end);
        self.y_top = y_top;
        self.y_bottom = y_bottom;
        self.pitch = pitch;
        self.bottom_margin = bottom_margin;
        self.scroll = scroll;
        if !self.chars.is_empty() {
            self.mark_dirty(0);
            self.reflow();
        }
        self.repaginate();
    }

    /// Replaces the line-spacing factor and re-resolves every row height.
    pub fn set_line_spacing(&mut self, line_spacing: f32) {
        self.line_spacing = line_spacing;
        metrics::refresh_all(&mut self.rows, line_spacing);
        self.repaginate();
    }

    /// Shifts the baseline coordinate space. Row assignment and page breaks
    /// are unaffected, so this is a plain field update.
    pub fn set_scroll(&mut self, offset: f32) {
        self.scroll = offset;
    }

    /// Number of stored characters.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether the document holds no characters and no row metrics.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty() && self.rows.is_empty()
    }

    /// Pages the document currently spans. An empty document spans one page.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Borrows the character at `index`.
    pub fn get(&self, index: usize) -> Option<&StyledChar> {
        self.chars.get(index).ok()
    }

    /// Borrows the metrics of `row`. Baselines in the returned value are in
    /// document space; [`TextBank::baseline`] applies the scroll offset.
    pub fn row_info(&self, row: usize) -> Option<&RowInfo> {
        self.rows.get(&row)
    }

    /// Baseline y of `row` with the scroll offset applied.
    pub fn baseline(&self, row: usize) -> Option<f32> {
        self.rows.get(&row).map(|info| info.baseline + self.scroll)
    }

    /// Iterates the stored characters in document order.
    pub fn iter(&self) -> Iter<'_, StyledChar> {
        self.chars.iter()
    }

    /// Inserts `ch` so that it becomes the character at `index` and re-lays
    /// the suffix starting there.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`, like `Vec::insert`.
    pub fn insert(&mut self, ch: StyledChar, index: usize) {
        self.chars.insert(index, ch);
        self.mark_dirty(index);
        self.reflow();
        self.repaginate();
    }

    /// Removes the character at `index`, releases its row bookkeeping, and
    /// re-lays the suffix starting one position earlier.
    pub fn remove_single(&mut self, index: usize) -> Result<(), LayoutError> {
        self.remove_char(index)?;
        self.reflow();
        self.repaginate();
        Ok(())
    }

    /// Removes the inclusive range `start..=end`, high to low, then re-lays
    /// the suffix once for the whole batch. `end` is clamped to the last
    /// index; a store failure mid-loop aborts the remaining removals.
    /// Returns `start`, the caller's new cursor position.
    pub fn remove_selection(&mut self, selection: (usize, usize)) -> usize {
        let (start, end) = selection;
        if self.chars.is_empty() {
            return start;
        }
        let mut index = end.min(self.chars.len() - 1);
        while index >= start {
            if let Err(e) = self.remove_char(index) {
                log::error!("range removal aborted at {index}: {e}");
                break;
            }
            if index == 0 {
                break;
            }
            index -= 1;
        }
        self.reflow();
        self.repaginate();
        start
    }

    /// Visits every character in document order with its resolved position.
    ///
    /// Aborts with an error if a character turns out to be unpositioned or
    /// to reference a missing row; both conditions are reported to the
    /// caller, never escalated to a panic.
    pub fn for_each<F>(&self, mut f: F) -> Result<(), LayoutError>
    where
        F: FnMut(PlacedChar<'_>),
    {
        for (index, ch) in self.chars.iter().enumerate() {
            let Some(row) = ch.row else {
                return Err(LayoutError::Unassigned { index });
            };
            let Some(info) = self.rows.get(&row) else {
                return Err(LayoutError::RowMetricMissing { row });
            };
            f(PlacedChar {
                index,
                ch,
                row,
                baseline: info.baseline + self.scroll,
                page: info.page,
            });
        }
        Ok(())
    }

    /// Finds the character nearest to `point`, or `None` for an empty
    /// document (emptiness is a normal state, not a failure).
    pub fn find_nearest_char(&self, point: (f32, f32)) -> Option<Hit> {
        let (row, info) = self.nearest_row(point.1)?;
        self.nearest_in_row(row, info.start, point.0)
    }

    /// Finds the pair of characters nearest to two points, e.g. the anchor
    /// and head of a pointer drag. The result is ordered by document index.
    pub fn find_range(&self, a: (f32, f32), b: (f32, f32)) -> Option<(usize, usize)> {
        let (upper, lower) = if a.1 <= b.1 { (a, b) } else { (b, a) };
        let first = self.find_nearest_char(upper)?;
        let second = self.find_nearest_char(lower)?;
        Some((
            first.index.min(second.index),
            first.index.max(second.index),
        ))
    }

    /// Removes one character and releases its bookkeeping without running
    /// the relayout; shared by single and batched removal.
    fn remove_char(&mut self, index: usize) -> Result<(), LayoutError> {
        let removed = self.chars.remove_at(index)?;
        if let Some(row) = removed.row {
            metrics::reduce_quantity(&mut self.rows, row, removed.point_size, self.line_spacing);
        }
        self.mark_dirty(index.saturating_sub(1));
        Ok(())
    }

    fn mark_dirty(&mut self, index: usize) {
        self.state = match self.state {
            LayoutState::Clean => LayoutState::Dirty { from: index },
            LayoutState::Dirty { from } => LayoutState::Dirty {
                from: from.min(index),
            },
        };
    }

    /// The incremental relayout walk: seeds column/row from the character
    /// before the first dirty index, then re-walks the suffix. A character
    /// starts a new row when it would cross the band's right edge or when
    /// its predecessor was a line break. Characters whose row changes move
    /// their metric registration; a row's `start` is refreshed whenever the
    /// walk enters it at a break.
    fn reflow(&mut self) {
        let LayoutState::Dirty { from } = self.state else {
            return;
        };
        let mut column = self.band.0;
        let mut row = 0usize;
        let mut after_break = false;
        if from > 0
            && let Ok(prev) = self.chars.get(from - 1)
        {
            column = prev.column + prev.width;
            row = prev.row.unwrap_or_default();
            after_break = prev.value == '\n';
        }
        for index in from..self.chars.len() {
            let Ok(ch) = self.chars.get_mut(index) else {
                log::error!("relayout walk lost character {index}");
                break;
            };
            let wrapped = after_break || column + ch.width > self.band.1;
            if wrapped {
                column = self.band.0;
                row += 1;
            }
            after_break = ch.value == '\n';
            let stored = ch.row;
            ch.column = column;
            ch.row = Some(row);
            column += ch.width;
            match stored {
                Some(old) if old == row => {}
                Some(old) => {
                    let point_size = ch.point_size;
                    metrics::reduce_quantity(&mut self.rows, old, point_size, self.line_spacing);
                    metrics::record_char(&mut self.rows, row, ch, self.line_spacing);
                }
                None => metrics::record_char(&mut self.rows, row, ch, self.line_spacing),
            }
            if (wrapped || index == 0)
                && let Some(info) = self.rows.get_mut(&row)
            {
                info.start = index;
            }
        }
        self.state = LayoutState::Clean;
    }

    /// Walks rows in order accumulating heights against the usable page
    /// height; a row that would cross the bottom margin starts the next
    /// page, with its baseline reset relative to that page's top. Baselines
    /// are stored scroll-free.
    fn repaginate(&mut self) {
        let mut limit = self.y_bottom - self.bottom_margin;
        let mut offset = self.y_top;
        let mut page = 0usize;
        for info in self.rows.values_mut() {
            offset += info.height;
            if offset > limit {
                page += 1;
                let page_top = self.pitch * page as f32;
                limit = self.y_bottom + page_top - self.bottom_margin;
                offset = self.y_top + page_top + info.height;
            }
            info.baseline = offset;
            info.page = page;
        }
        self.page_count = page + 1;
    }

    /// Nearest row by baseline distance. Baselines grow monotonically with
    /// the row index, so the scan stops at the first distance increase.
    fn nearest_row(&self, y: f32) -> Option<(usize, &RowInfo)> {
        let mut best: Option<(f32, usize, &RowInfo)> = None;
        for (&row, info) in &self.rows {
            let dist = (y - (info.baseline + self.scroll)).abs();
            match best {
                Some((best_dist, _, _)) if dist >= best_dist => break,
                _ => best = Some((dist, row, info)),
            }
        }
        best.map(|(_, row, info)| (row, info))
    }

    /// Nearest character within `row` by leading-edge distance, scanning
    /// from the row's first character. Columns grow monotonically within a
    /// row, so the scan stops at the first distance increase. The trailing
    /// edge only competes on the row's last character.
    fn nearest_in_row(&self, row: usize, start: usize, x: f32) -> Option<Hit> {
        let mut best: Option<(f32, usize)> = None;
        let mut index = start;
        while let Ok(ch) = self.chars.get(index) {
            if ch.row != Some(row) {
                break;
            }
            let dist = (x - ch.column).abs();
            match best {
                Some((best_dist, _)) if dist >= best_dist => break,
                _ => best = Some((dist, index)),
            }
            index += 1;
        }
        let (best_dist, best_index) = best?;
        let ch = self.chars.get(best_index).ok()?;
        let last_in_row = match self.chars.get(best_index + 1) {
            Ok(next) => next.row != Some(row),
            Err(_) => true,
        };
        let end_of_line = last_in_row && (x - (ch.column + ch.width)).abs() < best_dist;
        Some(Hit {
            index: best_index,
            end_of_line,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styled::FontId;

    fn ch(value: char, width: f32, point_size: u32) -> StyledChar {
        StyledChar::new(
            value,
            width,
            point_size as f32 * 1.2,
            point_size as f32 * 0.3,
            point_size as f32 * 96.0 / 72.0,
            point_size,
            "#000000".to_string(),
            FontId(0),
        )
    }

    fn bank() -> TextBank {
        let mut bank = TextBank::new(1.15);
        bank.configure_boundaries(192.0, 720.0, 96.0, 1056.0, 1106.0, 96.0, 0.0);
        bank
    }

    #[test]
    fn test_empty_document() {
        let bank = bank();
        assert!(bank.is_empty());
        assert_eq!(bank.page_count(), 1);
        assert_eq!(bank.find_nearest_char((200.0, 100.0)), None);
        assert_eq!(bank.find_range((0.0, 0.0), (50.0, 50.0)), None);
    }

    #[test]
    fn test_columns_advance_within_a_row() {
        let mut bank = bank();
        for (i, c) in "Hi".chars().enumerate() {
            bank.insert(ch(c, 10.0, 11), i);
        }
        assert_eq!(bank.get(0).unwrap().column, 192.0);
        assert_eq!(bank.get(1).unwrap().column, 202.0);
        assert_eq!(bank.get(0).unwrap().row, Some(0));
        assert_eq!(bank.get(1).unwrap().row, Some(0));
    }

    #[test]
    fn test_line_break_forces_next_row() {
        let mut bank = bank();
        bank.insert(ch('a', 10.0, 11), 0);
        bank.insert(ch('\n', 0.0, 11), 1);
        bank.insert(ch('b', 10.0, 11), 2);
        assert_eq!(bank.get(1).unwrap().row, Some(0));
        assert_eq!(bank.get(2).unwrap().row, Some(1));
        assert_eq!(bank.get(2).unwrap().column, 192.0);
        assert_eq!(bank.row_info(1).unwrap().start, 2);
    }

    #[test]
    fn test_insert_in_middle_shifts_suffix() {
        let mut bank = bank();
        for (i, c) in "ac".chars().enumerate() {
            bank.insert(ch(c, 10.0, 11), i);
        }
        bank.insert(ch('b', 10.0, 11), 1);
        let columns: Vec<f32> = bank.iter().map(|c| c.column).collect();
        assert_eq!(columns, vec![192.0, 202.0, 212.0]);
    }

    #[test]
    fn test_remove_single_rewalks_suffix() {
        let mut bank = bank();
        for (i, c) in "abc".chars().enumerate() {
            bank.insert(ch(c, 10.0, 11), i);
        }
        bank.remove_single(1).unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.get(1).unwrap().value, 'c');
        assert_eq!(bank.get(1).unwrap().column, 202.0);
    }

    #[test]
    fn test_remove_out_of_range_reports() {
        let mut bank = bank();
        bank.insert(ch('a', 10.0, 11), 0);
        assert_eq!(
            bank.remove_single(5),
            Err(LayoutError::OutOfRange(IndexOutOfRange { index: 5, len: 1 }))
        );
    }

    #[test]
    fn test_empty_after_removing_everything() {
        let mut bank = bank();
        bank.insert(ch('a', 10.0, 11), 0);
        bank.remove_single(0).unwrap();
        assert!(bank.is_empty());
        assert_eq!(bank.page_count(), 1);
        assert_eq!(bank.row_info(0), None);
    }

    #[test]
    fn test_for_each_yields_resolved_positions() {
        let mut bank = bank();
        for (i, c) in "ab".chars().enumerate() {
            bank.insert(ch(c, 10.0, 11), i);
        }
        let expected_baseline = 96.0 + bank.row_info(0).unwrap().height;
        let mut seen = Vec::new();
        bank.for_each(|p| seen.push((p.index, p.ch.value, p.row, p.baseline, p.page)))
            .unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].0, 0);
        assert_eq!(seen[1].1, 'b');
        assert!((seen[0].3 - expected_baseline).abs() < 1e-4);
        assert_eq!(seen[0].4, 0);
    }

    #[test]
    fn test_scroll_shifts_baseline_reads_only() {
        let mut bank = bank();
        bank.insert(ch('a', 10.0, 11), 0);
        let before = bank.baseline(0).unwrap();
        bank.set_scroll(-120.0);
        assert!((bank.baseline(0).unwrap() - (before - 120.0)).abs() < 1e-4);
        assert_eq!(bank.get(0).unwrap().row, Some(0));
        assert_eq!(bank.row_info(0).unwrap().baseline, before);
    }

    #[test]
    fn test_remove_selection_clamps_and_returns_start() {
        let mut bank = bank();
        for (i, c) in "abcdef".chars().enumerate() {
            bank.insert(ch(c, 10.0, 11), i);
        }
        let cursor = bank.remove_selection((2, 99));
        assert_eq!(cursor, 2);
        assert_eq!(bank.len(), 2);
        let rest: String = bank.iter().map(|c| c.value).collect();
        assert_eq!(rest, "ab");
    }

    #[test]
    fn test_remove_selection_on_empty_is_a_no_op() {
        let mut bank = bank();
        assert_eq!(bank.remove_selection((0, 3)), 0);
        assert!(bank.is_empty());
    }
}
