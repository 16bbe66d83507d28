use crate::domain::PropertyRecord;
use crate::errors::{AnalyticsError, AnalyticsResult};
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

const HEADERS: [&str; 11] = [
    "Type",
    "Address",
    "Postcode",
    "District",
    "Price",
    "Date",
    "Sale Type",
    "Size (m²)",
    "Price per m²",
    "Rooms",
    "Year Built",
];

/// Writes records to an XLSX workbook and returns the file bytes.
/// Saving or serving the bytes is up to the caller.
pub fn export_records_xlsx(records: &[PropertyRecord]) -> AnalyticsResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(|e| xlsx_err(&format!("header '{header}'"), e))?;
    }

    for (i, record) in records.iter().enumerate() {
        write_row(worksheet, (i + 1) as u32, record)?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| xlsx_err("save workbook", e))
}

fn write_row(worksheet: &mut Worksheet, r: u32, record: &PropertyRecord) -> AnalyticsResult<()> {
    let text_cells: [(u16, &str, &str); 6] = [
        (0, "type", record.property_type.as_str()),
        (1, "address", record.address.as_str()),
        (2, "postcode", record.postcode.as_str()),
        (3, "district", record.district.as_str()),
        (5, "date", record.date.as_str()),
        (6, "sale type", record.sale_type.as_str()),
    ];
    for (col, what, value) in text_cells {
        worksheet
            .write_string(r, col, value)
            .map_err(|e| xlsx_err(what, e))?;
    }

    let number_cells: [(u16, &str, f64); 5] = [
        (4, "price", record.price),
        (7, "size", record.size_m2),
        (8, "price per m²", record.price_per_m2),
        (9, "rooms", record.rooms as f64),
        (10, "year built", record.year_built as f64),
    ];
    for (col, what, value) in number_cells {
        worksheet
            .write_number(r, col, value)
            .map_err(|e| xlsx_err(what, e))?;
    }

    Ok(())
}

fn xlsx_err(what: &str, e: XlsxError) -> AnalyticsError {
    AnalyticsError::XlsxError(format!("Failed to write {what}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawRecord;
    use crate::normalize::normalize;

    #[test]
    fn test_export_produces_xlsx_bytes() {
        let records = vec![normalize(
            &RawRecord::new()
                .with("property_type", "Villa")
                .with("address", "Vej 1, 2500 Valby")
                .with("price", 2_000_000),
        )];

        let bytes = export_records_xlsx(&records).unwrap();
        // XLSX is a zip container
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_export_empty_view() {
        let bytes = export_records_xlsx(&[]).unwrap();
        assert!(!bytes.is_empty());
    }
}
