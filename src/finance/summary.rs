//! Balance and spending summaries over recorded transactions

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::types::*;
use crate::utils::money;

/// Totals across a set of transactions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceSummary {
    /// Income minus expenses
    pub balance: BigDecimal,
    pub income: BigDecimal,
    pub expenses: BigDecimal,
}

impl FinanceSummary {
    /// Summarize a list of transactions
    pub fn from_transactions(transactions: &[FinanceTransaction]) -> Self {
        let income = total_of(transactions, TransactionKind::Income);
        let expenses = total_of(transactions, TransactionKind::Expense);
        let balance = money::round2(&(&income - &expenses));

        Self {
            balance,
            income,
            expenses,
        }
    }
}

fn total_of(transactions: &[FinanceTransaction], kind: TransactionKind) -> BigDecimal {
    let sum: BigDecimal = transactions
        .iter()
        .filter(|t| t.kind == kind)
        .map(|t| &t.amount)
        .sum();
    money::round2(&sum)
}

/// Expense totals per category, largest first.
///
/// Categories with equal totals keep the order they were first seen in.
pub fn expenses_by_category(transactions: &[FinanceTransaction]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for txn in transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Expense)
    {
        match totals.iter_mut().find(|c| c.category == txn.category) {
            Some(existing) => existing.total += &txn.amount,
            None => totals.push(CategoryTotal {
                category: txn.category.clone(),
                total: txn.amount.clone(),
            }),
        }
    }

    for entry in totals.iter_mut() {
        entry.total = money::round2(&entry.total);
    }
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(kind: TransactionKind, category: &str, cents: i64) -> FinanceTransaction {
        FinanceTransaction::new(
            new_id(),
            money::cents(cents),
            category.to_string(),
            String::new(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            kind,
        )
    }

    #[test]
    fn test_summary_totals() {
        let transactions = vec![
            txn(TransactionKind::Income, "", 250000),
            txn(TransactionKind::Expense, "Rent", 120000),
            txn(TransactionKind::Expense, "Food", 4550),
        ];
        let summary = FinanceSummary::from_transactions(&transactions);

        assert_eq!(summary.income, money::cents(250000));
        assert_eq!(summary.expenses, money::cents(124550));
        assert_eq!(summary.balance, money::cents(125450));
    }

    #[test]
    fn test_empty_summary() {
        let summary = FinanceSummary::from_transactions(&[]);
        assert_eq!(summary.balance, BigDecimal::from(0));
        assert!(expenses_by_category(&[]).is_empty());
    }

    #[test]
    fn test_expenses_grouped_and_sorted() {
        let transactions = vec![
            txn(TransactionKind::Expense, "Food", 1000),
            txn(TransactionKind::Expense, "Travel", 3000),
            txn(TransactionKind::Income, "", 99999),
            txn(TransactionKind::Expense, "Food", 2500),
            txn(TransactionKind::Expense, "Shopping", 3000),
        ];
        let categories = expenses_by_category(&transactions);

        let order: Vec<&str> = categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(order, vec!["Food", "Travel", "Shopping"]);
        assert_eq!(categories[0].total, money::cents(3500));
    }
}
