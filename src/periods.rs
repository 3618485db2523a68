use crate::models::Benefit;

/// Scale every benefit's cap to a yearly ceiling so the allocator works
/// against a single total. Run on freshly initialized benefits only.
///
/// The annual total is always derived from `period_amount`, so a second pass
/// leaves the benefits unchanged.
pub fn annualize(benefits: Vec<Benefit>) -> Vec<Benefit> {
    benefits.into_iter().map(annualize_one).collect()
}

fn annualize_one(mut benefit: Benefit) -> Benefit {
    let periods = benefit.reset_period.periods_per_year();
    benefit.total_amount = benefit.period_amount * f64::from(periods);
    if periods > 1 {
        let note = format!(" (Annual total: {periods} × ${})", benefit.period_amount);
        if !benefit.description.ends_with(&note) {
            benefit.description.push_str(&note);
        }
    }
    benefit
}
