use crate::models::{Benefit, LoggedTransaction, Transaction};

/// Statement text that marks money coming back rather than going out.
const CREDIT_KEYWORDS: &[&str] = &[
    "credit",
    "adjustment",
    "reimbursement",
    "refund",
    "rebate",
    "payment",
    "credit adjustment",
];

/// Resy pays out in $50 halves regardless of its annual total.
const RESY_BENEFIT_ID: &str = "resy";
const RESY_PER_TRANSACTION_CAP: f64 = 50.0;

pub fn is_credit_transaction(txn: &Transaction) -> bool {
    let text = format!("{} {}", txn.merchant, txn.description).to_lowercase();
    CREDIT_KEYWORDS.iter().any(|k| text.contains(k))
}

/// Most a single charge can contribute to a benefit.
pub fn per_transaction_cap(benefit: &Benefit) -> f64 {
    if benefit.id == RESY_BENEFIT_ID {
        RESY_PER_TRANSACTION_CAP
    } else {
        benefit.period_amount
    }
}

fn keyword_hit(benefit: &Benefit, merchant: &str, description: &str) -> bool {
    benefit.merchant_keywords.iter().any(|keyword| {
        if keyword.trim().is_empty() {
            return false;
        }
        let keyword = keyword.to_lowercase();
        merchant.contains(&keyword) || description.contains(&keyword)
    })
}

/// Assign each transaction to the first benefit in catalog order whose
/// keywords it contains, and accumulate capped credit per benefit.
///
/// The input benefits are not touched; the result is a fresh copy with
/// `used_amount` and `transactions` rebuilt from zero.
pub fn match_transactions(transactions: &[Transaction], benefits: &[Benefit]) -> Vec<Benefit> {
    let mut matched: Vec<Benefit> = benefits
        .iter()
        .map(|b| Benefit {
            used_amount: 0.0,
            transactions: Vec::new(),
            ..b.clone()
        })
        .collect();

    let mut unmatched = 0usize;
    for txn in transactions {
        let merchant = txn.merchant.to_lowercase();
        let description = txn.description.to_lowercase();
        let Some(benefit) = matched
            .iter_mut()
            .find(|b| keyword_hit(b, &merchant, &description))
        else {
            unmatched += 1;
            continue;
        };

        let credited = if is_credit_transaction(txn) {
            txn.amount
        } else {
            txn.amount.min(per_transaction_cap(benefit))
        };
        let headroom = benefit.total_amount - benefit.used_amount;
        let to_add = credited.min(headroom).max(0.0);

        benefit.transactions.push(LoggedTransaction::from(txn));
        if to_add > 0.0 {
            benefit.used_amount = (benefit.used_amount + to_add).min(benefit.total_amount);
        }
    }

    tracing::debug!(
        transactions = transactions.len(),
        unmatched,
        "matched transactions to benefits"
    );
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BenefitDefinition, ResetPeriod};
    use crate::periods::annualize;

    fn benefit(id: &str, amount: f64, period: ResetPeriod, keywords: &[&str]) -> Benefit {
        Benefit::from_definition(&BenefitDefinition {
            id: id.to_string(),
            name: id.to_string(),
            total_amount: amount,
            reset_period: period,
            description: String::new(),
            merchant_keywords: keywords.iter().map(|k| k.to_string()).collect(),
        })
    }

    fn txn(merchant: &str, amount: f64) -> Transaction {
        Transaction {
            date: "03/15/2024".to_string(),
            merchant: merchant.to_string(),
            description: merchant.to_string(),
            amount,
        }
    }

    #[test]
    fn test_running_total_caps_second_charge() {
        let benefits = vec![benefit("dining", 10.0, ResetPeriod::Annually, &["grubhub"])];
        let out = match_transactions(&[txn("GRUBHUB A", 8.0), txn("GRUBHUB B", 8.0)], &benefits);
        assert_eq!(out[0].used_amount, 10.0);
        let logged: Vec<f64> = out[0].transactions.iter().map(|t| t.amount).collect();
        assert_eq!(logged, [8.0, 8.0]);
    }

    #[test]
    fn test_monthly_charge_capped_at_period_amount() {
        let benefits = annualize(vec![benefit("dining", 10.0, ResetPeriod::Monthly, &["grubhub"])]);
        assert_eq!(benefits[0].total_amount, 120.0);
        let out = match_transactions(&[txn("GRUBHUB", 50.0)], &benefits);
        assert_eq!(out[0].used_amount, 10.0);
        assert_eq!(out[0].transactions[0].amount, 50.0);
    }

    #[test]
    fn test_resy_capped_at_fifty() {
        let benefits = vec![benefit("resy", 100.0, ResetPeriod::Annually, &["resy"])];
        let out = match_transactions(&[txn("RESY NYC", 75.0)], &benefits);
        assert_eq!(out[0].used_amount, 50.0);
    }

    #[test]
    fn test_refund_bypasses_per_transaction_cap() {
        let benefits = annualize(vec![benefit("uber", 10.0, ResetPeriod::Monthly, &["uber"])]);
        let out = match_transactions(&[txn("UBER EATS REFUND", 50.0)], &benefits);
        assert_eq!(out[0].used_amount, 50.0);
    }

    #[test]
    fn test_refund_still_bounded_by_headroom() {
        let benefits = vec![benefit("saks", 50.0, ResetPeriod::Annually, &["saks"])];
        let out = match_transactions(
            &[txn("SAKS", 30.0), txn("SAKS CREDIT ADJUSTMENT", 40.0)],
            &benefits,
        );
        assert_eq!(out[0].used_amount, 50.0);
        assert_eq!(out[0].transactions.len(), 2);
    }

    #[test]
    fn test_credit_keywords() {
        assert!(is_credit_transaction(&txn("Amex Dunkin Credit", 7.0)));
        assert!(is_credit_transaction(&txn("PAYMENT RECEIVED", 7.0)));
        assert!(is_credit_transaction(&txn("Rebate", 7.0)));
        assert!(!is_credit_transaction(&txn("DUNKIN #1234", 7.0)));
    }

    #[test]
    fn test_first_catalog_match_wins() {
        let benefits = vec![
            benefit("travel", 300.0, ResetPeriod::Annually, &["uber", "lyft"]),
            benefit("uber", 10.0, ResetPeriod::Annually, &["uber"]),
        ];
        let out = match_transactions(&[txn("UBER TRIP", 20.0)], &benefits);
        assert_eq!(out[0].transactions.len(), 1);
        assert!(out[1].transactions.is_empty());
        assert_eq!(out[1].used_amount, 0.0);
    }

    #[test]
    fn test_keywords_match_case_insensitively_in_description() {
        let benefits = vec![benefit("equinox", 25.0, ResetPeriod::Monthly, &["Equinox"])];
        let t = Transaction {
            date: "N/A".to_string(),
            merchant: "MEMBERSHIP".to_string(),
            description: "equinox+ monthly".to_string(),
            amount: 40.0,
        };
        let out = match_transactions(&[t], &benefits);
        assert_eq!(out[0].used_amount, 25.0);
    }

    #[test]
    fn test_unmatched_transactions_dropped() {
        let benefits = vec![benefit("dunkin", 7.0, ResetPeriod::Monthly, &["dunkin"])];
        let out = match_transactions(&[txn("STARBUCKS", 5.0)], &benefits);
        assert!(out[0].transactions.is_empty());
        assert_eq!(out[0].used_amount, 0.0);
    }

    #[test]
    fn test_blank_keyword_matches_nothing() {
        let benefits = vec![benefit("other", 10.0, ResetPeriod::Annually, &["", "  "])];
        let out = match_transactions(&[txn("ANYTHING", 5.0)], &benefits);
        assert!(out[0].transactions.is_empty());
    }

    #[test]
    fn test_padded_keyword_is_matched_literally() {
        let benefits = vec![benefit("uber", 15.0, ResetPeriod::Monthly, &[" uber "])];
        let out = match_transactions(
            &[txn("UBEREATS ORDER", 12.0), txn("PAID UBER TRIP", 9.0)],
            &benefits,
        );
        assert_eq!(out[0].transactions.len(), 1);
        assert_eq!(out[0].transactions[0].merchant, "PAID UBER TRIP");
    }

    #[test]
    fn test_zero_cap_benefit_logs_without_credit() {
        let benefits = vec![benefit("hertz", 0.0, ResetPeriod::Annually, &["hertz"])];
        let out = match_transactions(&[txn("HERTZ RENTAL", 120.0)], &benefits);
        assert_eq!(out[0].transactions.len(), 1);
        assert_eq!(out[0].used_amount, 0.0);
    }

    #[test]
    fn test_inputs_untouched_and_result_repeatable() {
        let mut seeded = benefit("dunkin", 7.0, ResetPeriod::Annually, &["dunkin"]);
        seeded.used_amount = 5.0;
        let benefits = vec![seeded.clone()];
        let txns = [txn("DUNKIN", 4.0), txn("DUNKIN", 4.0)];
        let first = match_transactions(&txns, &benefits);
        let second = match_transactions(&txns, &benefits);
        assert_eq!(first, second);
        assert_eq!(first[0].used_amount, 7.0);
        assert_eq!(benefits[0], seeded);
    }

    #[test]
    fn test_used_never_exceeds_total() {
        let benefits = annualize(vec![
            benefit("uber", 15.0, ResetPeriod::Monthly, &["uber"]),
            benefit("saks", 50.0, ResetPeriod::SemiAnnually, &["saks"]),
        ]);
        let txns: Vec<Transaction> = (0..40)
            .map(|i| if i % 2 == 0 { txn("UBER", 33.0) } else { txn("SAKS REFUND", 80.0) })
            .collect();
        let out = match_transactions(&txns, &benefits);
        for b in &out {
            assert!(b.used_amount >= 0.0 && b.used_amount <= b.total_amount);
        }
        assert_eq!(out[0].transactions.len(), 20);
        assert_eq!(out[1].used_amount, 100.0);
    }
}
