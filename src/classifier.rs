use regex::Regex;

use crate::models::{CellValue, Transaction, UNKNOWN_DATE};

// ---------------------------------------------------------------------------
// Column heuristics
// ---------------------------------------------------------------------------

const DATE_SCAN_COLUMNS: usize = 5;
const MERCHANT_SCAN_COLUMNS: usize = 4;
const MIN_MERCHANT_LEN: usize = 3;

/// Numbers at or above this are read as Excel date serials, not money.
const EXCEL_SERIAL_FLOOR: f64 = 40_000.0;
const AMOUNT_CEILING: f64 = 100_000.0;
const MIN_AMOUNT: f64 = 0.01;
/// Bare integers up to here may be a day or month component.
const DAY_MONTH_CEILING: f64 = 31.0;

re!(re_date_slash, r"^\d{1,2}/\d{1,2}/\d{2,4}$");
re!(re_date_iso, r"^\d{4}-\d{2}-\d{2}$");
re!(re_date_dash, r"^\d{2}-\d{2}-\d{4}$");
re!(re_date_month_day, r"^[A-Z][a-z]{2}\s+\d{1,2}$");
re!(re_leading_number, r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?");

fn date_patterns() -> [&'static Regex; 4] {
    [re_date_slash(), re_date_iso(), re_date_dash(), re_date_month_day()]
}

pub fn is_date_like(s: &str) -> bool {
    date_patterns().iter().any(|re| re.is_match(s))
}

/// True when the text starts with something numeric once currency noise is
/// removed, so "7-Eleven" counts as number-like.
pub fn is_number_like(s: &str) -> bool {
    let cleaned: String = s
        .chars()
        .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
        .collect();
    re_leading_number().is_match(&cleaned)
}

/// Strip `$`, `,`, whitespace and parentheses from a money string.
fn clean_amount(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '$' | ',' | '(' | ')') && !c.is_whitespace())
        .collect()
}

fn parse_clean(cleaned: &str) -> Option<f64> {
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

struct Candidate {
    value: f64,
    has_decimal: bool,
}

impl Candidate {
    fn preferred(&self) -> bool {
        self.has_decimal || self.value > DAY_MONTH_CEILING
    }
}

fn strict_candidate(cell: &CellValue) -> Option<Candidate> {
    match cell {
        CellValue::Number(n) => {
            let n = n.abs();
            let has_decimal = n.fract() != 0.0;
            let plausible = has_decimal || (1.0..=AMOUNT_CEILING).contains(&n);
            (n < EXCEL_SERIAL_FLOOR && n >= MIN_AMOUNT && plausible)
                .then_some(Candidate { value: n, has_decimal })
        }
        CellValue::Text(s) => {
            if !s.contains('$') && !s.contains('.') {
                return None;
            }
            let cleaned = clean_amount(s);
            let value = parse_clean(&cleaned).map(f64::abs).filter(|v| *v > 0.0)?;
            Some(Candidate {
                value,
                has_decimal: cleaned.contains('.'),
            })
        }
        CellValue::Empty => None,
    }
}

/// Fallback read of a cell once no preferred amount exists. Numeric cells
/// still have to sit below the Excel serial floor.
fn loose_candidate(cell: &CellValue) -> Option<f64> {
    let value = match cell {
        CellValue::Number(n) if n.abs() >= EXCEL_SERIAL_FLOOR => return None,
        CellValue::Number(n) => n.abs(),
        CellValue::Text(s) => parse_clean(&clean_amount(s))?.abs(),
        CellValue::Empty => return None,
    };
    (value > 0.0 && value < AMOUNT_CEILING).then_some(value)
}

fn find_amount(row: &[CellValue], date_columns: &[usize]) -> Option<f64> {
    let eligible = || {
        row.iter()
            .enumerate()
            .filter(|(i, _)| !date_columns.contains(i))
            .map(|(_, cell)| cell)
    };

    eligible()
        .filter_map(strict_candidate)
        .find(Candidate::preferred)
        .map(|c| c.value)
        .or_else(|| eligible().find_map(loose_candidate))
}

// ---------------------------------------------------------------------------
// classify
// ---------------------------------------------------------------------------

/// Recover a transaction from one schema-less row, or `None` when the row has
/// no usable merchant or amount (headers, totals, disclaimers).
pub fn classify(row: &[CellValue]) -> Option<Transaction> {
    let mut date: Option<String> = None;
    let mut date_columns = Vec::new();
    for (i, cell) in row.iter().take(DATE_SCAN_COLUMNS).enumerate() {
        let CellValue::Text(s) = cell else { continue };
        let s = s.trim();
        if is_date_like(s) {
            date_columns.push(i);
            date.get_or_insert_with(|| s.to_string());
        }
    }

    let merchant = row
        .iter()
        .take(MERCHANT_SCAN_COLUMNS)
        .enumerate()
        .filter(|(i, _)| !date_columns.contains(i))
        .find_map(|(_, cell)| match cell {
            CellValue::Text(s) => {
                let s = s.trim();
                (s.chars().count() > MIN_MERCHANT_LEN && !is_number_like(s)).then(|| s.to_string())
            }
            _ => None,
        })?;

    let amount = find_amount(row, &date_columns)?;
    if amount == 0.0 {
        return None;
    }

    Some(Transaction {
        date: date.unwrap_or_else(|| UNKNOWN_DATE.to_string()),
        description: merchant.clone(),
        merchant,
        amount,
    })
}
