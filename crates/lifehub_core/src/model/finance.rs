use crate::model::entity::{new_record_id, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

/// One income or expense line. `amount` is always a positive magnitude;
/// the sign comes from `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialTransaction {
    pub id: RecordId,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
}

impl FinancialTransaction {
    pub fn new(kind: TransactionType, amount: f64, category: impl Into<String>) -> Self {
        Self {
            id: new_record_id(),
            amount,
            kind,
            category: category.into(),
            description: String::new(),
            date: Utc::now(),
            account: None,
        }
    }

    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

impl_entity!(
    FinancialTransaction,
    Transaction,
    financial_transactions,
    date
);
