use paket_catalog::{load_catalog, load_catalog_from_bytes};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use rust_xlsxwriter::Workbook;

/// Builds a realistic rental price list: header row, a description column in
/// the middle that the loader must ignore, and the price in the last column.
fn price_list_bytes() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Artikel").unwrap();
    sheet.write_string(0, 1, "Beschreibung").unwrap();
    sheet.write_string(0, 2, "Preis").unwrap();

    sheet.write_string(1, 0, "Regal").unwrap();
    sheet.write_string(1, 1, "Standardregal 2m").unwrap();
    sheet.write_number(1, 2, 49.90).unwrap();

    sheet.write_string(2, 0, "Tisch").unwrap();
    sheet.write_string(2, 1, "Arbeitstisch").unwrap();
    sheet.write_string(2, 2, "120.00").unwrap();

    sheet.write_string(3, 0, "Sonderposten").unwrap();
    sheet.write_string(3, 1, "Preis noch offen").unwrap();
    sheet.write_string(3, 2, "auf Anfrage").unwrap();

    workbook.save_to_buffer().unwrap()
}

#[test]
fn loads_first_and_last_columns_skipping_the_header() {
    let catalog = load_catalog_from_bytes(&price_list_bytes()).unwrap();

    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.price_of("Regal"), Some(dec!(49.90)));
    assert_eq!(catalog.price_of("Tisch"), Some(dec!(120.00)));
    // Lenient policy: a non-numeric price loads as zero, not as an error.
    assert_eq!(catalog.price_of("Sonderposten"), Some(Decimal::ZERO));
}

#[test]
fn loads_from_a_file_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Miete.xlsx");
    std::fs::write(&path, price_list_bytes()).unwrap();

    let catalog = load_catalog(&path).unwrap();
    assert_eq!(catalog.len(), 3);
}

#[test]
fn missing_file_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_catalog(dir.path().join("fehlt.xlsx"));
    assert!(result.is_err());
}

#[test]
fn garbage_bytes_are_a_load_error() {
    assert!(load_catalog_from_bytes(b"definitiv kein xlsx").is_err());
}
