//! Traits for storage abstraction and extensibility

use async_trait::async_trait;

use crate::group::GroupDraft;
use crate::types::*;

/// Storage abstraction for the finance system
///
/// This trait allows the finance core to work with any storage backend
/// (SQLite, a key-value store on device, in-memory, etc.) by implementing these methods.
/// Records are stored whole; derived values (balances, settlements) are never persisted.
#[async_trait]
pub trait FinanceStorage: Send + Sync {
    /// Save a transaction to storage
    async fn save_transaction(&mut self, transaction: &FinanceTransaction) -> FinanceResult<()>;

    /// Get a transaction by ID
    async fn get_transaction(&self, transaction_id: &str)
        -> FinanceResult<Option<FinanceTransaction>>;

    /// List transactions, optionally filtered by kind, newest first
    async fn list_transactions(
        &self,
        kind: Option<TransactionKind>,
    ) -> FinanceResult<Vec<FinanceTransaction>>;

    /// Update an existing transaction
    async fn update_transaction(&mut self, transaction: &FinanceTransaction) -> FinanceResult<()>;

    /// Delete a transaction
    async fn delete_transaction(&mut self, transaction_id: &str) -> FinanceResult<()>;

    /// Save a group to storage
    async fn save_group(&mut self, group: &Group) -> FinanceResult<()>;

    /// Get a group by ID
    async fn get_group(&self, group_id: &str) -> FinanceResult<Option<Group>>;

    /// List all groups in creation order
    async fn list_groups(&self) -> FinanceResult<Vec<Group>>;

    /// Update an existing group
    async fn update_group(&mut self, group: &Group) -> FinanceResult<()>;

    /// Delete a group and its members
    async fn delete_group(&mut self, group_id: &str) -> FinanceResult<()>;

    /// Save a saving goal to storage
    async fn save_goal(&mut self, goal: &SavingGoal) -> FinanceResult<()>;

    /// Get a saving goal by ID
    async fn get_goal(&self, goal_id: &str) -> FinanceResult<Option<SavingGoal>>;

    /// List all saving goals in creation order
    async fn list_goals(&self) -> FinanceResult<Vec<SavingGoal>>;

    /// Update an existing saving goal
    async fn update_goal(&mut self, goal: &SavingGoal) -> FinanceResult<()>;

    /// Delete a saving goal
    async fn delete_goal(&mut self, goal_id: &str) -> FinanceResult<()>;

    /// Save a tip to storage
    async fn save_tip(&mut self, tip: &Tip) -> FinanceResult<()>;

    /// Get a tip by ID
    async fn get_tip(&self, tip_id: &str) -> FinanceResult<Option<Tip>>;

    /// List all tips in creation order
    async fn list_tips(&self) -> FinanceResult<Vec<Tip>>;

    /// Update an existing tip
    async fn update_tip(&mut self, tip: &Tip) -> FinanceResult<()>;

    /// Delete a tip
    async fn delete_tip(&mut self, tip_id: &str) -> FinanceResult<()>;
}

/// Trait for implementing custom group validation rules
pub trait GroupValidator: Send + Sync {
    /// Validate a group draft before it is created or applied to an existing group
    fn validate_draft(&self, draft: &GroupDraft) -> FinanceResult<()>;
}

/// Trait for implementing custom transaction validation rules
pub trait TransactionValidator: Send + Sync {
    /// Validate a transaction before saving
    fn validate_transaction(&self, transaction: &FinanceTransaction) -> FinanceResult<()>;
}

/// Default group validator with the rules the group form enforces
pub struct DefaultGroupValidator;

impl GroupValidator for DefaultGroupValidator {
    fn validate_draft(&self, draft: &GroupDraft) -> FinanceResult<()> {
        draft.validate()
    }
}

/// Default transaction validator: positive amount and a bounded description
pub struct DefaultTransactionValidator;

impl TransactionValidator for DefaultTransactionValidator {
    fn validate_transaction(&self, transaction: &FinanceTransaction) -> FinanceResult<()> {
        crate::utils::validate_positive_amount(&transaction.amount)?;
        crate::utils::validate_transaction_description(&transaction.description)
    }
}
