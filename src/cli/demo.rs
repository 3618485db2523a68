use chrono::{Datelike, Local};

use crate::analysis::Analysis;
use crate::catalog::{builtin_catalog, find_card, initialize_benefits};
use crate::cli::analyze::render;
use crate::error::{PerksError, Result};
use crate::importer::extract;
use crate::matcher::match_transactions;
use crate::models::{CellValue, RawRow};
use crate::periods::annualize;
use crate::reports::summarize;
use crate::settings::load_settings;

/// A sample statement line; laid out like a typical issuer export.
struct DemoRow {
    month: u32,
    day: u32,
    description: &'static str,
    category: &'static str,
    amount: &'static str,
}

const ROWS: &[DemoRow] = &[
    DemoRow { month: 1, day: 3, description: "UBER EATS", category: "Restaurant", amount: "18.42" },
    DemoRow { month: 1, day: 9, description: "DUNKIN #350012", category: "Restaurant", amount: "6.19" },
    DemoRow { month: 1, day: 14, description: "GRUBHUB*ORDER", category: "Restaurant", amount: "31.00" },
    DemoRow { month: 1, day: 22, description: "SPOTIFY USA", category: "Entertainment", amount: "11.99" },
    DemoRow { month: 2, day: 2, description: "DELTA AIR LINES BAG FEE", category: "Travel", amount: "$35.00" },
    DemoRow { month: 2, day: 11, description: "RESY* CARBONE NYC", category: "Restaurant", amount: "$142.80" },
    DemoRow { month: 2, day: 11, description: "Resy Credit Adjustment", category: "", amount: "(50.00)" },
    DemoRow { month: 2, day: 19, description: "SAKS FIFTH AVENUE", category: "Shopping", amount: "88.20" },
    DemoRow { month: 3, day: 1, description: "EQUINOX+ MEMBERSHIP", category: "Health", amount: "40.00" },
    DemoRow { month: 3, day: 4, description: "LYFT RIDE TUE 8PM", category: "Travel", amount: "14.75" },
    DemoRow { month: 3, day: 9, description: "DOORDASH DASHPASS", category: "Restaurant", amount: "9.99" },
    DemoRow { month: 3, day: 17, description: "WALMART+ MONTHLY", category: "Shopping", amount: "12.95" },
    DemoRow { month: 3, day: 28, description: "TRADER JOES #552", category: "Groceries", amount: "64.31" },
];

fn demo_rows(year: i32) -> Vec<RawRow> {
    let mut rows: Vec<RawRow> = vec![["Date", "Description", "Category", "Amount"]
        .into_iter()
        .map(CellValue::text)
        .collect()];
    for r in ROWS {
        let category = if r.category.is_empty() {
            CellValue::Empty
        } else {
            CellValue::text(r.category)
        };
        rows.push(vec![
            CellValue::Text(format!("{:02}/{:02}/{year}", r.month, r.day)),
            CellValue::text(r.description),
            category,
            CellValue::text(r.amount),
        ]);
    }
    rows
}

pub fn run(card: Option<&str>) -> Result<()> {
    let settings = load_settings();
    let catalog = builtin_catalog();
    let card_id = card.unwrap_or(settings.default_card.as_str());
    let card = find_card(&catalog, card_id).ok_or_else(|| PerksError::UnknownCard(card_id.to_string()))?;

    let transactions = extract(&demo_rows(Local::now().year()));
    let benefits = match_transactions(&transactions, &annualize(initialize_benefits(card)));
    let analysis = Analysis {
        transactions_found: transactions.len(),
        benefits,
    };
    let summary = summarize(card, &analysis.benefits);
    render(card, &analysis, &summary);
    Ok(())
}
