use serde::Serialize;

use crate::models::{Benefit, CreditCard, ResetPeriod};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefitLine {
    pub id: String,
    pub name: String,
    pub reset_period: ResetPeriod,
    pub used: f64,
    pub total: f64,
    pub remaining: f64,
    pub percent_used: f64,
    pub matched: usize,
}

/// Captured value against the card's fee, the figures a renderer needs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UtilizationSummary {
    pub card_id: String,
    pub card_name: String,
    pub total_available: f64,
    pub total_used: f64,
    pub annual_fee: f64,
    pub net_value: f64,
    pub fully_used: usize,
    pub lines: Vec<BenefitLine>,
}

pub fn percent_used(benefit: &Benefit) -> f64 {
    if benefit.total_amount <= 0.0 {
        return 0.0;
    }
    (benefit.used_amount / benefit.total_amount * 100.0).clamp(0.0, 100.0)
}

pub fn summarize(card: &CreditCard, benefits: &[Benefit]) -> UtilizationSummary {
    let lines: Vec<BenefitLine> = benefits
        .iter()
        .map(|b| BenefitLine {
            id: b.id.clone(),
            name: b.name.clone(),
            reset_period: b.reset_period,
            used: b.used_amount,
            total: b.total_amount,
            remaining: b.remaining(),
            percent_used: percent_used(b),
            matched: b.transactions.len(),
        })
        .collect();

    let total_available: f64 = benefits.iter().map(|b| b.total_amount).sum();
    let total_used: f64 = benefits.iter().map(|b| b.used_amount).sum();
    // zero-cap status benefits are never "used up"
    let fully_used = benefits
        .iter()
        .filter(|b| b.total_amount > 0.0 && b.is_fully_used())
        .count();

    UtilizationSummary {
        card_id: card.id.clone(),
        card_name: card.display_name.clone(),
        total_available,
        total_used,
        annual_fee: card.annual_fee,
        net_value: total_used - card.annual_fee,
        fully_used,
        lines,
    }
}
