use comfy_table::{Cell, Table};

use crate::catalog::{active_catalog, find_card, initialize_benefits};
use crate::error::{PerksError, Result};
use crate::fmt::money;
use crate::periods::annualize;
use crate::settings::load_settings;

pub fn list(catalog: Option<&str>) -> Result<()> {
    let settings = load_settings();
    let catalog = active_catalog(catalog, &settings)?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Card", "Issuer", "Annual Fee", "Benefits"]);
    for card in &catalog {
        let id = if card.id == settings.default_card {
            format!("{} *", card.id)
        } else {
            card.id.clone()
        };
        table.add_row(vec![
            Cell::new(id),
            Cell::new(&card.display_name),
            Cell::new(&card.issuer),
            Cell::new(money(card.annual_fee)),
            Cell::new(card.benefits.len()),
        ]);
    }
    println!("Cards\n{table}");
    Ok(())
}

pub fn benefits(card_id: &str, catalog: Option<&str>) -> Result<()> {
    let settings = load_settings();
    let catalog = active_catalog(catalog, &settings)?;
    let card = find_card(&catalog, card_id).ok_or_else(|| PerksError::UnknownCard(card_id.to_string()))?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Benefit", "Per Period", "Resets", "Annual Cap", "Keywords"]);
    for b in annualize(initialize_benefits(card)) {
        table.add_row(vec![
            Cell::new(&b.id),
            Cell::new(&b.name),
            Cell::new(money(b.period_amount)),
            Cell::new(b.reset_period),
            Cell::new(money(b.total_amount)),
            Cell::new(b.merchant_keywords.join(", ")),
        ]);
    }
    println!("{} ({})\n{table}", card.display_name, money(card.annual_fee));
    Ok(())
}
