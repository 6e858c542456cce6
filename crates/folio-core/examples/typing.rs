use folio_core::{Document, PageConfig};

fn main() {
    let mut doc = Document::new((1280.0, 720.0), PageConfig::default());

    // Type two lines, then fix a typo with backspace.
    doc.add_str("Dear reader,\nwelcomee");
    doc.delete_back();
    assert_eq!(doc.cursor(), 20);

    // The caret sits after the last character of the second row.
    let caret = doc.caret();
    let last = doc.bank().get(doc.cursor() - 1).unwrap();
    assert_eq!(caret.x, last.column + last.width);
    let row = last.row.unwrap();

    // Mixed sizes on one row: the larger font decides the row height.
    doc.add_char('!', "#d32f2f", 24);
    let info = doc.bank().row_info(row).unwrap();
    println!(
        "row {} height {:.1}px across {} point sizes",
        row,
        info.height,
        info.size_by_metric.len()
    );

    for page in 0..doc.page_count() {
        println!("page {page} of {}", doc.page_count());
    }
}
