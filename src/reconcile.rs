use serde::{Deserialize, Serialize};

use crate::normalize;

/// One pemasukan/pengeluaran line attached to a shift's reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "normalize::de_quantity")]
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemClass {
    /// Description and a positive amount: counts toward the totals.
    Valid,
    /// Nothing filled in: ignored (trailing empty form rows).
    Blank,
    /// Half filled in: the submission must be rejected before calculating.
    Incomplete,
}

impl LineItem {
    pub fn classify(&self) -> ItemClass {
        match (self.description.trim().is_empty(), self.amount > 0.0) {
            (false, true) => ItemClass::Valid,
            (true, false) => ItemClass::Blank,
            _ => ItemClass::Incomplete,
        }
    }
}

/// Every derived number for one setoran submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub total_liters: f64,
    pub gross_deposit: f64,
    pub cash_portion: f64,
    pub total_expenses: f64,
    pub total_income: f64,
    /// May be negative. A shortfall is surfaced, never clamped away.
    pub net_total: f64,
    pub valid_expenses: Vec<LineItem>,
    pub valid_income: Vec<LineItem>,
}

fn valid_items(items: &[LineItem]) -> Vec<LineItem> {
    items
        .iter()
        .filter(|item| item.classify() == ItemClass::Valid)
        .cloned()
        .collect()
}

/// Derives liters, the cash/QRIS split and the reconciled total from raw
/// meter and payment inputs.
///
/// Pure: same inputs give same outputs, and no non-negative input panics.
/// Tolerance policy for dirty inputs:
/// - an end meter below the start meter clamps liters to zero (meter reset
///   or typo, the submission itself is still accepted)
/// - QRIS above the gross deposit clamps the cash portion to zero
pub fn reconcile(
    start_meter: f64,
    end_meter: f64,
    qris_amount: f64,
    expenses: &[LineItem],
    income: &[LineItem],
    price_per_liter: f64,
) -> Reconciliation {
    let total_liters = (end_meter - start_meter).max(0.0);
    let gross_deposit = total_liters * price_per_liter;
    let cash_portion = (gross_deposit - qris_amount).max(0.0);

    let valid_expenses = valid_items(expenses);
    let valid_income = valid_items(income);

    let total_expenses = valid_expenses.iter().map(|item| item.amount).sum::<f64>();
    let total_income = valid_income.iter().map(|item| item.amount).sum::<f64>();

    let net_total = cash_portion + total_income - total_expenses;

    Reconciliation {
        total_liters,
        gross_deposit,
        cash_portion,
        total_expenses,
        total_income,
        net_total,
        valid_expenses,
        valid_income,
    }
}
