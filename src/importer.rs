use std::path::Path;

use crate::classifier::classify;
use crate::error::Result;
#[cfg(not(feature = "xlsx"))]
use crate::error::PerksError;
use crate::models::{CellValue, RawRow, Transaction, UNKNOWN_DATE};

re!(re_inline_amount, r"\$?(\d+\.?\d*)");

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0];

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Run the row classifier over a decoded sheet. Row 0 is always treated as
/// a header; blank rows are skipped.
pub fn extract(rows: &[RawRow]) -> Vec<Transaction> {
    rows.iter()
        .skip(1)
        .filter(|row| !row.iter().all(CellValue::is_empty))
        .filter_map(|row| classify(row))
        .collect()
}

/// Parse pasted lines like `DUNKIN $6.50`. The first number on a line is the
/// amount and whatever remains is the merchant.
pub fn parse_free_text(text: &str) -> Vec<Transaction> {
    let re = re_inline_amount();
    let mut out = Vec::new();
    for line in text.split('\n').filter(|l| !l.trim().is_empty()) {
        let Some(caps) = re.captures(line) else {
            continue;
        };
        let amount: f64 = caps[1].parse().unwrap_or(0.0);
        let merchant = re.replace(line, "").trim().to_string();
        if merchant.is_empty() || amount <= 0.0 {
            continue;
        }
        out.push(Transaction {
            date: UNKNOWN_DATE.to_string(),
            description: merchant.clone(),
            merchant,
            amount,
        });
    }
    out
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Csv,
    Tsv,
    Workbook,
}

/// Pick a decoder from the file extension, falling back to sniffing the
/// leading bytes for zip/OLE containers.
pub fn detect_format(file_name: &str, bytes: &[u8]) -> SheetFormat {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("csv") | Some("txt") => SheetFormat::Csv,
        Some("tsv") => SheetFormat::Tsv,
        Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => SheetFormat::Workbook,
        _ if bytes.starts_with(ZIP_MAGIC) || bytes.starts_with(OLE_MAGIC) => SheetFormat::Workbook,
        _ => SheetFormat::Csv,
    }
}

pub fn decode_rows(file_name: &str, bytes: Vec<u8>) -> Result<Vec<RawRow>> {
    match detect_format(file_name, &bytes) {
        SheetFormat::Csv => read_delimited(&bytes, b','),
        SheetFormat::Tsv => read_delimited(&bytes, b'\t'),
        SheetFormat::Workbook => read_workbook(bytes),
    }
}

/// Decode a whole statement file and extract its transactions.
pub fn parse_statement_bytes(file_name: &str, bytes: Vec<u8>) -> Result<Vec<Transaction>> {
    let rows = decode_rows(file_name, bytes)?;
    let transactions = extract(&rows);
    tracing::debug!(
        file = file_name,
        rows = rows.len(),
        transactions = transactions.len(),
        "extracted statement"
    );
    Ok(transactions)
}

fn read_delimited(bytes: &[u8], delimiter: u8) -> Result<Vec<RawRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(bytes);
    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(
            record
                .iter()
                .map(|field| {
                    if field.trim().is_empty() {
                        CellValue::Empty
                    } else {
                        CellValue::text(field)
                    }
                })
                .collect(),
        );
    }
    Ok(rows)
}

#[cfg(feature = "xlsx")]
fn read_workbook(bytes: Vec<u8>) -> Result<Vec<RawRow>> {
    use calamine::Reader;

    let mut workbook = calamine::open_workbook_auto_from_rs(std::io::Cursor::new(bytes))?;
    let Some(range) = workbook.worksheet_range_at(0) else {
        return Ok(Vec::new());
    };
    let range = range?;
    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect())
}

#[cfg(not(feature = "xlsx"))]
fn read_workbook(_bytes: Vec<u8>) -> Result<Vec<RawRow>> {
    Err(PerksError::UnsupportedFormat(
        "spreadsheet files need the `xlsx` feature".to_string(),
    ))
}

#[cfg(feature = "xlsx")]
fn cell_from_data(cell: &calamine::Data) -> CellValue {
    use calamine::Data;
    match cell {
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::String(s) if s.trim().is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTime(dt) if dt.is_duration() => CellValue::Number(dt.as_f64()),
        Data::DateTime(dt) => CellValue::Text(excel_serial_to_date(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) | Data::Empty => CellValue::Empty,
    }
}

/// Render an Excel serial as `MM/DD/YYYY` so date cells read like CSV dates.
#[cfg(any(feature = "xlsx", test))]
pub fn excel_serial_to_date(serial: f64) -> String {
    // Excel epoch is 1899-12-30 (accounting for the 1900 leap year bug)
    if !serial.is_finite() || serial < 0.0 {
        return serial.to_string();
    }
    chrono::NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|base| base.checked_add_days(chrono::Days::new(serial.trunc() as u64)))
        .map(|d| d.format("%m/%d/%Y").to_string())
        .unwrap_or_else(|| serial.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> RawRow {
        cells
            .iter()
            .map(|c| if c.is_empty() { CellValue::Empty } else { CellValue::text(*c) })
            .collect()
    }

    #[test]
    fn test_extract_skips_header_and_blank_rows() {
        let rows = vec![
            row(&["Date", "Description", "Amount"]),
            row(&["03/01/2024", "GRUBHUB ORDER", "18.40"]),
            Vec::new(),
            row(&["", "", ""]),
            row(&["03/02/2024", "TOTAL BALANCE", ""]),
            row(&["03/03/2024", "DUNKIN #1102", "7.25"]),
        ];
        let txns = extract(&rows);
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].merchant, "GRUBHUB ORDER");
        assert_eq!(txns[1].merchant, "DUNKIN #1102");
    }

    #[test]
    fn test_extract_header_is_skipped_even_if_it_looks_like_data() {
        let rows = vec![
            row(&["03/01/2024", "UBER TRIP", "14.00"]),
            row(&["03/02/2024", "UBER TRIP", "14.00"]),
        ];
        assert_eq!(extract(&rows).len(), 1);
    }

    #[test]
    fn test_extract_keeps_duplicates_in_order() {
        let rows = vec![
            row(&["Date", "Description", "Amount"]),
            row(&["03/01/2024", "SPOTIFY USA", "11.99"]),
            row(&["04/01/2024", "SPOTIFY USA", "11.99"]),
        ];
        let txns = extract(&rows);
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].date, "03/01/2024");
        assert_eq!(txns[1].date, "04/01/2024");
    }

    #[test]
    fn test_free_text_line() {
        let txns = parse_free_text("DUNKIN $6.50");
        assert_eq!(
            txns,
            vec![Transaction {
                date: "N/A".to_string(),
                merchant: "DUNKIN".to_string(),
                description: "DUNKIN".to_string(),
                amount: 6.50,
            }]
        );
    }

    #[test]
    fn test_free_text_drops_unusable_lines() {
        let text = "UBER EATS 23.10\n\n   \nno amount here\n$5.00\nFREEBIE $0\r\nSAKS 50";
        let txns = parse_free_text(text);
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].merchant, "UBER EATS");
        assert_eq!(txns[0].amount, 23.10);
        assert_eq!(txns[1].merchant, "SAKS");
        assert_eq!(txns[1].amount, 50.0);
    }

    #[test]
    fn test_free_text_only_first_number_is_the_amount() {
        let txns = parse_free_text("UBER 2 RIDES 14.20");
        assert_eq!(txns[0].amount, 2.0);
        assert_eq!(txns[0].merchant, "UBER  RIDES 14.20");
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format("march.CSV", b""), SheetFormat::Csv);
        assert_eq!(detect_format("march.tsv", b""), SheetFormat::Tsv);
        assert_eq!(detect_format("march.xlsx", b""), SheetFormat::Workbook);
        assert_eq!(detect_format("download", b"PK\x03\x04rest"), SheetFormat::Workbook);
        assert_eq!(detect_format("download", b"Date,Amount"), SheetFormat::Csv);
    }

    #[test]
    fn test_parse_csv_bytes() {
        let content = "\
Date,Description,Amount
03/04/2024,GRUBHUB*ORDER,\"1,018.40\"
03/05/2024,Payment Thank You,
";
        let txns = parse_statement_bytes("stmt.csv", content.as_bytes().to_vec()).unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].merchant, "GRUBHUB*ORDER");
        assert_eq!(txns[0].amount, 1018.40);
    }

    #[test]
    fn test_parse_tsv_bytes() {
        let content = "Date\tDescription\tAmount\n2024-03-04\tPEACOCK TV\t5.99\n";
        let txns = parse_statement_bytes("stmt.tsv", content.as_bytes().to_vec()).unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].date, "2024-03-04");
    }

    #[test]
    fn test_corrupt_workbook_is_an_error() {
        let result = parse_statement_bytes("broken.xlsx", b"this is not a workbook".to_vec());
        assert!(result.is_err());
    }

    #[cfg(feature = "xlsx")]
    fn sample_workbook() -> Vec<u8> {
        use rust_xlsxwriter::{Format, Workbook};

        let date = Format::new().set_num_format("mm/dd/yyyy");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Date").unwrap();
        sheet.write_string(0, 1, "Description").unwrap();
        sheet.write_string(0, 2, "Amount").unwrap();
        sheet.write_number_with_format(1, 0, 45366.0, &date).unwrap();
        sheet.write_string(1, 1, "GRUBHUB ORDER").unwrap();
        sheet.write_number(1, 2, 18.4).unwrap();
        sheet.write_number_with_format(2, 0, 45367.0, &date).unwrap();
        sheet.write_string(2, 1, "RESY* CARBONE NYC").unwrap();
        sheet.write_number(2, 2, -75.0).unwrap();
        workbook.save_to_buffer().unwrap()
    }

    #[cfg(feature = "xlsx")]
    #[test]
    fn test_workbook_cells_decode() {
        let rows = decode_rows("march.xlsx", sample_workbook()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][0], CellValue::text("Date"));
        assert_eq!(rows[1][0], CellValue::text("03/15/2024"));
        assert_eq!(rows[1][1], CellValue::text("GRUBHUB ORDER"));
        assert_eq!(rows[1][2], CellValue::Number(18.4));
    }

    #[cfg(feature = "xlsx")]
    #[test]
    fn test_workbook_without_extension_is_sniffed() {
        let txns = parse_statement_bytes("download", sample_workbook()).unwrap();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].date, "03/15/2024");
        assert_eq!(txns[0].amount, 18.4);
        assert_eq!(txns[1].date, "03/16/2024");
        assert_eq!(txns[1].merchant, "RESY* CARBONE NYC");
        assert_eq!(txns[1].amount, 75.0);
    }

    #[test]
    fn test_excel_serial_to_date() {
        assert_eq!(excel_serial_to_date(45667.0), "01/10/2025");
    }
}
