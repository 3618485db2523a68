use crate::aggregator::{gather, StatementFile};
use crate::catalog::initialize_benefits;
use crate::matcher::match_transactions;
use crate::models::{Benefit, CreditCard, FileProgress};
use crate::periods::annualize;

pub struct Analysis {
    pub transactions_found: usize,
    pub benefits: Vec<Benefit>,
}

/// Full pipeline for one card: collect transactions, annualize fresh
/// benefits, then allocate.
pub async fn analyze<F>(
    card: &CreditCard,
    text: Option<&str>,
    files: &[StatementFile],
    on_progress: F,
) -> Analysis
where
    F: FnMut(&FileProgress),
{
    let transactions = gather(text, files, on_progress).await;
    let benefits = annualize(initialize_benefits(card));
    let benefits = match_transactions(&transactions, &benefits);
    Analysis {
        transactions_found: transactions.len(),
        benefits,
    }
}
