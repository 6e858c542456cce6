//! Per-row font bookkeeping.
//!
//! Every row tracks, per point size, how many of its characters use that
//! size. The largest size present is the row's dominant font and decides the
//! row height. The bookkeeping here is purely incremental: characters are
//! recorded when they enter a row and released when they leave it, and a row
//! disappears the moment its last character does.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::styled::StyledChar;

/// Accumulated metrics for one point size within a row.
#[derive(Debug, Clone, PartialEq)]
pub struct CharMetric {
    /// Ascent + descent + leading at this size, fixed by the first character
    /// recorded at this size.
    pub line_height: f32,
    /// Descent + leading at this size.
    pub padding: f32,
    /// Count of live characters of this size in the row.
    pub quantity: usize,
}

/// Metrics and placement of one visual row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowInfo {
    /// Point size → metrics, ordered; the last entry is the dominant font.
    pub size_by_metric: BTreeMap<u32, CharMetric>,
    /// Resolved row height: dominant line height times the line-spacing
    /// factor, plus the previous row's dominant padding when the previous
    /// row's dominant point size is strictly larger.
    pub height: f32,
    /// Baseline y in document space. The layout engine adds the scroll
    /// offset when the value is read.
    pub baseline: f32,
    /// Index of the row's first character.
    pub start: usize,
    /// Page the row falls on.
    pub page: usize,
}

pub(crate) type RowMap = BTreeMap<usize, RowInfo>;

/// Registers `ch` on `row`, creating the row and the size bucket on first
/// sight. A new bucket can change the row's dominant font, so the row height
/// is re-resolved in that case.
pub(crate) fn record_char(rows: &mut RowMap, row: usize, ch: &StyledChar, spacing: f32) {
    let info = rows.entry(row).or_default();
    let created = match info.size_by_metric.entry(ch.point_size) {
        Entry::Vacant(slot) => {
            slot.insert(CharMetric {
                line_height: ch.line_height,
                padding: ch.padding,
                quantity: 1,
            });
            true
        }
        Entry::Occupied(mut slot) => {
            slot.get_mut().quantity += 1;
            false
        }
    };
    if created {
        refresh_height(rows, row, spacing);
    }
}

/// Releases one character of size `point_size` from `row`. A bucket that
/// reaches zero is retired; a row whose last bucket is retired is removed
/// from the map entirely.
pub(crate) fn reduce_quantity(rows: &mut RowMap, row: usize, point_size: u32, spacing: f32) {
    let Some(info) = rows.get_mut(&row) else {
        return;
    };
    let Some(metric) = info.size_by_metric.get_mut(&point_size) else {
        return;
    };
    metric.quantity = metric.quantity.saturating_sub(1);
    if metric.quantity > 0 {
        return;
    }
    info.size_by_metric.remove(&point_size);
    if info.size_by_metric.is_empty() {
        rows.remove(&row);
        return;
    }
    refresh_height(rows, row, spacing);
}

/// Re-resolves the height of every row, in row order. Used when the
/// line-spacing factor changes.
pub(crate) fn refresh_all(rows: &mut RowMap, spacing: f32) {
    let keys: Vec<usize> = rows.keys().copied().collect();
    for row in keys {
        refresh_height(rows, row, spacing);
    }
}

/// Resolves one row's height from its dominant font and the previous row's
/// dominant size.
fn refresh_height(rows: &mut RowMap, row: usize, spacing: f32) {
    let Some(info) = rows.get(&row) else {
        return;
    };
    let Some((&size, metric)) = info.size_by_metric.last_key_value() else {
        return;
    };
    let mut height = metric.line_height;
    if row > 0
        && let Some(prev) = rows.get(&(row - 1))
        && let Some((&prev_size, prev_metric)) = prev.size_by_metric.last_key_value()
        && prev_size > size
    {
        height += prev_metric.padding;
    }
    if let Some(info) = rows.get_mut(&row) {
        info.height = height * spacing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styled::FontId;

    const SPACING: f32 = 1.15;

    fn sample(point_size: u32, line_height: f32, padding: f32) -> StyledChar {
        StyledChar::new(
            'x',
            10.0,
            line_height,
            padding,
            point_size as f32 * 96.0 / 72.0,
            point_size,
            "#000000".to_string(),
            FontId(0),
        )
    }

    #[test]
    fn test_record_creates_row_and_resolves_height() {
        let mut rows = RowMap::new();
        record_char(&mut rows, 0, &sample(11, 16.0, 4.0), SPACING);
        let info = &rows[&0];
        assert_eq!(info.size_by_metric[&11].quantity, 1);
        assert!((info.height - 16.0 * SPACING).abs() < 1e-4);
    }

    #[test]
    fn test_dominant_is_largest_size() {
        let mut rows = RowMap::new();
        record_char(&mut rows, 0, &sample(11, 16.0, 4.0), SPACING);
        record_char(&mut rows, 0, &sample(24, 30.0, 8.0), SPACING);
        assert!((rows[&0].height - 30.0 * SPACING).abs() < 1e-4);
        // A smaller size joining the row does not change the height.
        record_char(&mut rows, 0, &sample(8, 11.0, 3.0), SPACING);
        assert!((rows[&0].height - 30.0 * SPACING).abs() < 1e-4);
    }

    #[test]
    fn test_height_shrinks_when_dominant_retires() {
        let mut rows = RowMap::new();
        record_char(&mut rows, 0, &sample(12, 17.0, 4.0), SPACING);
        record_char(&mut rows, 0, &sample(24, 30.0, 8.0), SPACING);
        reduce_quantity(&mut rows, 0, 24, SPACING);
        assert!(!rows[&0].size_by_metric.contains_key(&24));
        assert!((rows[&0].height - 17.0 * SPACING).abs() < 1e-4);
    }

    #[test]
    fn test_quantity_counts_before_retiring() {
        let mut rows = RowMap::new();
        record_char(&mut rows, 0, &sample(11, 16.0, 4.0), SPACING);
        record_char(&mut rows, 0, &sample(11, 16.0, 4.0), SPACING);
        reduce_quantity(&mut rows, 0, 11, SPACING);
        assert_eq!(rows[&0].size_by_metric[&11].quantity, 1);
        reduce_quantity(&mut rows, 0, 11, SPACING);
        assert!(!rows.contains_key(&0));
    }

    #[test]
    fn test_padding_added_only_when_previous_dominant_larger() {
        let mut rows = RowMap::new();
        record_char(&mut rows, 0, &sample(24, 30.0, 8.0), SPACING);
        record_char(&mut rows, 1, &sample(12, 17.0, 4.0), SPACING);
        // Previous dominant (24) is larger, so its padding joins row 1.
        assert!((rows[&1].height - (17.0 + 8.0) * SPACING).abs() < 1e-4);

        let mut rows = RowMap::new();
        record_char(&mut rows, 0, &sample(12, 17.0, 4.0), SPACING);
        record_char(&mut rows, 1, &sample(12, 17.0, 4.0), SPACING);
        assert!((rows[&1].height - 17.0 * SPACING).abs() < 1e-4);

        let mut rows = RowMap::new();
        record_char(&mut rows, 0, &sample(12, 17.0, 4.0), SPACING);
        record_char(&mut rows, 1, &sample(24, 30.0, 8.0), SPACING);
        assert!((rows[&1].height - 30.0 * SPACING).abs() < 1e-4);
    }

    #[test]
    fn test_refresh_all_rescales_heights() {
        let mut rows = RowMap::new();
        record_char(&mut rows, 0, &sample(11, 16.0, 4.0), SPACING);
        refresh_all(&mut rows, 2.0);
        assert!((rows[&0].height - 32.0).abs() < 1e-4);
    }
}
