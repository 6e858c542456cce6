use folio_core::{Document, PageConfig};

fn main() {
    let mut doc = Document::new((1280.0, 720.0), PageConfig::default());
    doc.add_str("The first line\nand the second");

    // Click on the first row, one character in.
    let first_baseline = doc.bank().baseline(0).unwrap();
    let one_char = doc.center() + doc.config().margin_left + 8.0;
    doc.click((one_char, first_baseline));
    assert_eq!(doc.cursor(), 1);

    // Drag from there to the middle of the second row and delete.
    let second_baseline = doc.bank().baseline(1).unwrap();
    doc.select((one_char, first_baseline), (one_char + 40.0, second_baseline));
    let (start, end) = doc.selection().unwrap();
    println!("selected characters {start}..={end}");

    doc.delete_selection();
    assert_eq!(doc.cursor(), start);

    let remaining: String = doc.bank().iter().map(|c| c.value).collect();
    println!("left with {remaining:?}");
}
