//! Validation utilities

use bigdecimal::BigDecimal;

use crate::group::GroupDraft;
use crate::traits::*;
use crate::types::*;

/// Validate that an amount is positive
pub fn validate_positive_amount(amount: &BigDecimal) -> FinanceResult<()> {
    if *amount <= BigDecimal::from(0) {
        Err(FinanceError::Validation("Amount must be positive".to_string()))
    } else {
        Ok(())
    }
}

/// Validate that an amount is zero or more
pub fn validate_non_negative_amount(amount: &BigDecimal) -> FinanceResult<()> {
    if *amount < BigDecimal::from(0) {
        Err(FinanceError::Validation("Amount cannot be negative".to_string()))
    } else {
        Ok(())
    }
}

/// Validate that a display name is present and reasonably short
pub fn validate_name(field: &str, name: &str) -> FinanceResult<()> {
    if name.trim().is_empty() {
        return Err(FinanceError::Validation(format!("{} cannot be empty", field)));
    }

    if name.len() > 100 {
        return Err(FinanceError::Validation(format!("{} cannot exceed 100 characters", field)));
    }

    Ok(())
}

/// Validate that a transaction description is valid
pub fn validate_transaction_description(description: &str) -> FinanceResult<()> {
    if description.len() > 500 {
        return Err(FinanceError::Validation(
            "Transaction description cannot exceed 500 characters".to_string(),
        ));
    }

    Ok(())
}

/// Enhanced transaction validator with detailed checks
pub struct EnhancedTransactionValidator;

impl TransactionValidator for EnhancedTransactionValidator {
    fn validate_transaction(&self, transaction: &FinanceTransaction) -> FinanceResult<()> {
        validate_positive_amount(&transaction.amount)?;
        validate_transaction_description(&transaction.description)?;

        if transaction.kind == TransactionKind::Expense
            && !EXPENSE_CATEGORIES.contains(&transaction.category.as_str())
        {
            return Err(FinanceError::Validation(format!(
                "Unknown expense category '{}'",
                transaction.category
            )));
        }

        Ok(())
    }
}

/// Enhanced group validator that also rejects duplicate member names
///
/// Settlement transfers identify members by name, so two members sharing a
/// name would produce ambiguous "A owes B" lines.
pub struct EnhancedGroupValidator;

impl GroupValidator for EnhancedGroupValidator {
    fn validate_draft(&self, draft: &GroupDraft) -> FinanceResult<()> {
        draft.validate()?;

        let mut names = std::collections::HashSet::new();
        for member in &draft.members {
            if !names.insert(member.name.trim().to_lowercase()) {
                return Err(FinanceError::Validation(format!(
                    "Member '{}' appears multiple times in group",
                    member.name
                )));
            }
        }

        Ok(())
    }
}
