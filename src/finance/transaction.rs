//! Income and expense tracking

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::traits::*;
use crate::types::*;

/// Transaction manager for handling income and expense records
pub struct TransactionManager<S: FinanceStorage> {
    storage: S,
    validator: Box<dyn TransactionValidator>,
}

impl<S: FinanceStorage> TransactionManager<S> {
    /// Create a new transaction manager
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultTransactionValidator),
        }
    }

    /// Create a new transaction manager with custom validator
    pub fn with_validator(storage: S, validator: Box<dyn TransactionValidator>) -> Self {
        Self { storage, validator }
    }

    /// Record a new transaction
    pub async fn record_transaction(
        &mut self,
        transaction: FinanceTransaction,
    ) -> FinanceResult<FinanceTransaction> {
        self.validator.validate_transaction(&transaction)?;

        if self.storage.get_transaction(&transaction.id).await?.is_some() {
            return Err(FinanceError::Validation(format!(
                "Transaction with ID '{}' already exists",
                transaction.id
            )));
        }

        self.storage.save_transaction(&transaction).await?;

        tracing::debug!(
            transaction_id = %transaction.id,
            kind = ?transaction.kind,
            amount = %transaction.amount,
            "recorded transaction"
        );
        Ok(transaction)
    }

    /// Get a transaction by ID
    pub async fn get_transaction(
        &self,
        transaction_id: &str,
    ) -> FinanceResult<Option<FinanceTransaction>> {
        self.storage.get_transaction(transaction_id).await
    }

    /// Get a transaction by ID, returning an error if not found
    pub async fn get_transaction_required(
        &self,
        transaction_id: &str,
    ) -> FinanceResult<FinanceTransaction> {
        self.storage
            .get_transaction(transaction_id)
            .await?
            .ok_or_else(|| FinanceError::TransactionNotFound(transaction_id.to_string()))
    }

    /// List transactions newest first, optionally only income or only expenses
    pub async fn list_transactions(
        &self,
        kind: Option<TransactionKind>,
    ) -> FinanceResult<Vec<FinanceTransaction>> {
        self.storage.list_transactions(kind).await
    }

    /// Apply a partial update to an existing transaction
    pub async fn edit_transaction(
        &mut self,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> FinanceResult<FinanceTransaction> {
        let mut transaction = self.get_transaction_required(transaction_id).await?;
        transaction.apply_update(update);

        self.validator.validate_transaction(&transaction)?;
        self.storage.update_transaction(&transaction).await?;

        tracing::debug!(%transaction_id, "edited transaction");
        Ok(transaction)
    }

    /// Delete a transaction
    pub async fn delete_transaction(&mut self, transaction_id: &str) -> FinanceResult<()> {
        self.storage.delete_transaction(transaction_id).await?;
        tracing::debug!(%transaction_id, "deleted transaction");
        Ok(())
    }
}

/// Builder for income and expense records
#[derive(Debug)]
pub struct TransactionBuilder {
    id: String,
    amount: BigDecimal,
    kind: TransactionKind,
    category: String,
    description: String,
    date: NaiveDate,
}

impl TransactionBuilder {
    /// Start an expense dated today
    pub fn expense(amount: BigDecimal) -> Self {
        Self::with_kind(TransactionKind::Expense, amount)
    }

    /// Start an income record dated today
    pub fn income(amount: BigDecimal) -> Self {
        Self::with_kind(TransactionKind::Income, amount)
    }

    fn with_kind(kind: TransactionKind, amount: BigDecimal) -> Self {
        Self {
            id: new_id(),
            amount,
            kind,
            category: String::new(),
            description: String::new(),
            date: chrono::Utc::now().date_naive(),
        }
    }

    /// Use a specific ID instead of a generated one
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the spending category (ignored for income)
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the date the money moved
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Build the transaction
    pub fn build(self) -> FinanceResult<FinanceTransaction> {
        let transaction = FinanceTransaction::new(
            self.id,
            self.amount,
            self.category,
            self.description,
            self.date,
            self.kind,
        );
        DefaultTransactionValidator.validate_transaction(&transaction)?;
        Ok(transaction)
    }
}
