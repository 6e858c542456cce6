//! Hit testing validation tests
//!
//! Validation criteria:
//! 1. Nearest-character queries resolve by baseline distance first, then by
//!    leading-edge distance within the row, first match winning ties.
//! 2. The end-of-line flag fires only past the trailing edge of a row's
//!    last character.
//! 3. Range queries accept their two points in either order and answer in
//!    document order.
//! 4. An empty document answers every query with the no-character sentinel.

use folio_core::{FontId, StyledChar, TextBank};

fn bank() -> TextBank {
    let mut bank = TextBank::new(1.15);
    bank.configure_boundaries(192.0, 720.0, 96.0, 1056.0, 1106.0, 96.0, 0.0);
    bank
}

fn styled(value: char, width: f32) -> StyledChar {
    StyledChar::new(
        value,
        width,
        22.0,
        5.5,
        11.0 * 96.0 / 72.0,
        11,
        "#000000".to_string(),
        FontId(0),
    )
}

fn fill(bank: &mut TextBank, text: &str, width: f32) {
    for (i, value) in text.chars().enumerate() {
        let width = if value == '\n' { 0.0 } else { width };
        bank.insert(styled(value, width), i);
    }
}

#[test]
fn test_leading_edge_beats_trailing_edge() {
    let mut bank = bank();
    bank.insert(styled('a', 10.0), 0);
    let row_y = bank.baseline(0).unwrap();

    let hit = bank.find_nearest_char((196.0, row_y)).unwrap();
    assert_eq!(hit.index, 0);
    assert!(!hit.end_of_line);

    // 199 is 7 from the leading edge but 3 from the trailing edge at 202.
    let hit = bank.find_nearest_char((199.0, row_y)).unwrap();
    assert_eq!(hit.index, 0);
    assert!(hit.end_of_line);
}

#[test]
fn test_end_of_line_only_fires_on_the_last_character() {
    let mut bank = bank();
    fill(&mut bank, "abc", 10.0);
    let row_y = bank.baseline(0).unwrap();

    // Past 'a', but 'b' follows on the same row; the caret goes before 'b'.
    let hit = bank.find_nearest_char((201.0, row_y)).unwrap();
    assert_eq!(hit.index, 1);
    assert!(!hit.end_of_line);

    // Past the whole row.
    let hit = bank.find_nearest_char((230.0, row_y)).unwrap();
    assert_eq!(hit.index, 2);
    assert!(hit.end_of_line);
}

#[test]
fn test_query_resolves_to_the_nearest_row() {
    let mut bank = bank();
    fill(&mut bank, "ab\ncd", 10.0);
    let first = bank.baseline(0).unwrap();
    let second = bank.baseline(1).unwrap();

    let hit = bank.find_nearest_char((202.0, second + 3.0)).unwrap();
    assert_eq!(hit.index, 4);

    let hit = bank.find_nearest_char((192.0, first - 40.0)).unwrap();
    assert_eq!(hit.index, 0);
}

#[test]
fn test_equidistant_rows_resolve_to_the_first() {
    let mut bank = bank();
    fill(&mut bank, "a\nb", 10.0);
    let first = bank.baseline(0).unwrap();
    let second = bank.baseline(1).unwrap();
    let midpoint = (first + second) / 2.0;

    let hit = bank.find_nearest_char((192.0, midpoint)).unwrap();
    assert_eq!(hit.index, 0);
}

#[test]
fn test_range_accepts_points_in_either_order() {
    let mut bank = bank();
    fill(&mut bank, "aaaa\nbbbb", 10.0);
    let first = bank.baseline(0).unwrap();
    let second = bank.baseline(1).unwrap();
    let at_1 = (202.0, first);
    let at_6 = (202.0, second);

    assert_eq!(bank.find_range(at_1, at_6), Some((1, 6)));
    assert_eq!(bank.find_range(at_6, at_1), Some((1, 6)));
}

#[test]
fn test_backwards_drag_on_one_row_orders_by_index() {
    let mut bank = bank();
    fill(&mut bank, "abcdef", 10.0);
    let row_y = bank.baseline(0).unwrap();

    let range = bank.find_range((232.0, row_y), (202.0, row_y)).unwrap();
    assert_eq!(range, (1, 4));
}

#[test]
fn test_empty_document_answers_with_the_sentinel() {
    let bank = bank();
    assert!(bank.find_nearest_char((400.0, 500.0)).is_none());
    assert!(bank.find_range((0.0, 0.0), (800.0, 900.0)).is_none());
}
