use std::fmt;

use serde::{Deserialize, Serialize};

/// One cell of a decoded spreadsheet row.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Empty,
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) => false,
        }
    }
}

/// An ordered row of cells exactly as the source file laid them out.
pub type RawRow = Vec<CellValue>;

/// Placeholder date for rows where no date column was recognised.
pub const UNKNOWN_DATE: &str = "N/A";

/// A statement line recovered from a file or pasted text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub date: String,
    pub merchant: String,
    pub description: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResetPeriod {
    Monthly,
    Annually,
    SemiAnnually,
}

impl ResetPeriod {
    /// How many times the cap renews in a year.
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Self::Monthly => 12,
            Self::SemiAnnually => 2,
            Self::Annually => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Annually => "annually",
            Self::SemiAnnually => "semi-annually",
        }
    }
}

impl fmt::Display for ResetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefitDefinition {
    pub id: String,
    pub name: String,
    pub total_amount: f64,
    pub reset_period: ResetPeriod,
    pub description: String,
    pub merchant_keywords: Vec<String>,
}

/// Entry in a benefit's audit log. Keeps the original, uncapped amount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoggedTransaction {
    pub date: String,
    pub merchant: String,
    pub amount: f64,
}

impl From<&Transaction> for LoggedTransaction {
    fn from(t: &Transaction) -> Self {
        Self {
            date: t.date.clone(),
            merchant: t.merchant.clone(),
            amount: t.amount,
        }
    }
}

/// Working copy of a benefit for a single analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Benefit {
    pub id: String,
    pub name: String,
    /// Cap the allocator works against (annual once normalized).
    pub total_amount: f64,
    /// Nominal cap for a single reset period, as the catalog states it.
    pub period_amount: f64,
    pub reset_period: ResetPeriod,
    pub description: String,
    pub merchant_keywords: Vec<String>,
    pub used_amount: f64,
    pub transactions: Vec<LoggedTransaction>,
}

impl Benefit {
    pub fn from_definition(def: &BenefitDefinition) -> Self {
        Self {
            id: def.id.clone(),
            name: def.name.clone(),
            total_amount: def.total_amount,
            period_amount: def.total_amount,
            reset_period: def.reset_period,
            description: def.description.clone(),
            merchant_keywords: def.merchant_keywords.clone(),
            used_amount: 0.0,
            transactions: Vec::new(),
        }
    }

    pub fn remaining(&self) -> f64 {
        (self.total_amount - self.used_amount).max(0.0)
    }

    pub fn is_fully_used(&self) -> bool {
        self.used_amount >= self.total_amount
    }
}

/// Presentation colours handed through to renderers untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardTheme {
    pub primary: String,
    pub secondary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub issuer: String,
    pub annual_fee: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<CardTheme>,
    pub benefits: Vec<BenefitDefinition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStatus {
    Processing,
    Complete,
    Error,
}

/// Per-file progress event emitted by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileProgress {
    pub current_file: usize,
    pub total_files: usize,
    pub file_name: String,
    pub status: ProgressStatus,
}
