use colored::Colorize;
use comfy_table::{Cell, Table};
use serde::Serialize;

use crate::aggregator::StatementFile;
use crate::analysis::{analyze, Analysis};
use crate::catalog::{active_catalog, find_card};
use crate::error::{PerksError, Result};
use crate::fmt::{money, percent};
use crate::models::{Benefit, CreditCard, FileProgress, ProgressStatus};
use crate::reports::{summarize, UtilizationSummary};
use crate::settings::load_settings;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    transactions_found: usize,
    benefits: &'a [Benefit],
    summary: &'a UtilizationSummary,
}

pub fn run(
    files: &[String],
    card: Option<&str>,
    text: Option<&str>,
    text_file: Option<&str>,
    json: bool,
    catalog: Option<&str>,
) -> Result<()> {
    let settings = load_settings();
    let catalog = active_catalog(catalog, &settings)?;
    let card_id = card.unwrap_or(settings.default_card.as_str());
    let card = find_card(&catalog, card_id).ok_or_else(|| PerksError::UnknownCard(card_id.to_string()))?;

    let mut pasted = text.unwrap_or_default().to_string();
    if let Some(path) = text_file {
        let body = std::fs::read_to_string(path)?;
        if !pasted.is_empty() {
            pasted.push('\n');
        }
        pasted.push_str(&body);
    }
    let files: Vec<StatementFile> = files.iter().map(StatementFile::from_path).collect();
    if pasted.trim().is_empty() && files.is_empty() {
        return Err(PerksError::NoInput);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let analysis = runtime.block_on(analyze(card, Some(&pasted), &files, print_progress));
    let summary = summarize(card, &analysis.benefits);

    if json {
        let report = JsonReport {
            transactions_found: analysis.transactions_found,
            benefits: &analysis.benefits,
            summary: &summary,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render(card, &analysis, &summary);
    }
    Ok(())
}

fn print_progress(p: &FileProgress) {
    let status = match p.status {
        ProgressStatus::Processing => return,
        ProgressStatus::Complete => "ok".green(),
        ProgressStatus::Error => "failed".red(),
    };
    eprintln!("[{}/{}] {} {}", p.current_file, p.total_files, p.file_name, status);
}

pub(crate) fn render(card: &CreditCard, analysis: &Analysis, summary: &UtilizationSummary) {
    let mut table = Table::new();
    table.set_header(vec!["Benefit", "Resets", "Used", "Annual Cap", "%", "Matched"]);
    for (benefit, line) in analysis.benefits.iter().zip(&summary.lines) {
        let name = if line.total > 0.0 && benefit.is_fully_used() {
            benefit.name.green().bold()
        } else {
            benefit.name.normal()
        };
        table.add_row(vec![
            Cell::new(name),
            Cell::new(benefit.reset_period),
            Cell::new(money(line.used)),
            Cell::new(money(line.total)),
            Cell::new(percent(line.percent_used)),
            Cell::new(line.matched),
        ]);
    }
    println!("{}\n{table}", card.display_name.bold());

    let net = money(summary.net_value);
    let net = if summary.net_value >= 0.0 { net.green().bold() } else { net.red().bold() };
    println!("Transactions found:  {}", analysis.transactions_found);
    println!(
        "Captured:            {} of {}",
        money(summary.total_used),
        money(summary.total_available)
    );
    println!("Annual fee:          {}", money(summary.annual_fee));
    println!("Net value:           {net}");
}
