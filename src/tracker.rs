//! Main finance tracker that coordinates transactions, groups, goals and tips

use bigdecimal::BigDecimal;

use crate::finance::{expenses_by_category, FinanceSummary, TransactionManager};
use crate::group::{GroupDraft, GroupManager, Settlement, SettlementCalculator};
use crate::savings::{GoalDraft, SavingsManager};
use crate::traits::*;
use crate::types::*;
use crate::utils::validate_name;

/// Main finance system that orchestrates all personal finance operations
pub struct Tracker<S: FinanceStorage> {
    transaction_manager: TransactionManager<S>,
    group_manager: GroupManager<S>,
    savings_manager: SavingsManager<S>,
    storage: S,
}

impl<S: FinanceStorage + Clone> Tracker<S> {
    /// Create a new tracker with the given storage backend
    pub fn new(storage: S) -> Self {
        Self {
            transaction_manager: TransactionManager::new(storage.clone()),
            group_manager: GroupManager::new(storage.clone()),
            savings_manager: SavingsManager::new(storage.clone()),
            storage,
        }
    }

    /// Create a new tracker with custom validators
    pub fn with_validators(
        storage: S,
        group_validator: Box<dyn GroupValidator>,
        transaction_validator: Box<dyn TransactionValidator>,
    ) -> Self {
        Self {
            transaction_manager: TransactionManager::with_validator(
                storage.clone(),
                transaction_validator,
            ),
            group_manager: GroupManager::with_validator(storage.clone(), group_validator),
            savings_manager: SavingsManager::new(storage.clone()),
            storage,
        }
    }

    /// Use a custom settlement calculator for group settlements
    pub fn with_settlement_calculator(mut self, calculator: SettlementCalculator) -> Self {
        self.group_manager.set_calculator(calculator);
        self
    }

    // Transaction operations
    /// Record a new income or expense
    pub async fn add_transaction(
        &mut self,
        transaction: FinanceTransaction,
    ) -> FinanceResult<FinanceTransaction> {
        self.transaction_manager
            .record_transaction(transaction)
            .await
    }

    /// Get a transaction by ID
    pub async fn get_transaction(
        &self,
        transaction_id: &str,
    ) -> FinanceResult<Option<FinanceTransaction>> {
        self.transaction_manager.get_transaction(transaction_id).await
    }

    /// List transactions newest first, optionally filtered by kind
    pub async fn list_transactions(
        &self,
        kind: Option<TransactionKind>,
    ) -> FinanceResult<Vec<FinanceTransaction>> {
        self.transaction_manager.list_transactions(kind).await
    }

    /// Apply a partial update to a transaction
    pub async fn edit_transaction(
        &mut self,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> FinanceResult<FinanceTransaction> {
        self.transaction_manager
            .edit_transaction(transaction_id, update)
            .await
    }

    /// Delete a transaction
    pub async fn delete_transaction(&mut self, transaction_id: &str) -> FinanceResult<()> {
        self.transaction_manager
            .delete_transaction(transaction_id)
            .await
    }

    // Summary operations
    /// Balance, income and expense totals over all transactions
    pub async fn summary(&self) -> FinanceResult<FinanceSummary> {
        let transactions = self.list_transactions(None).await?;
        Ok(FinanceSummary::from_transactions(&transactions))
    }

    /// Current balance (income minus expenses)
    pub async fn balance(&self) -> FinanceResult<BigDecimal> {
        Ok(self.summary().await?.balance)
    }

    /// Expense totals per category, largest first
    pub async fn expenses_by_category(&self) -> FinanceResult<Vec<CategoryTotal>> {
        let expenses = self
            .list_transactions(Some(TransactionKind::Expense))
            .await?;
        Ok(expenses_by_category(&expenses))
    }

    // Group operations
    /// Create a group from a draft
    pub async fn create_group(&mut self, draft: GroupDraft) -> FinanceResult<Group> {
        self.group_manager.create_group(draft).await
    }

    /// Get a group by ID
    pub async fn get_group(&self, group_id: &str) -> FinanceResult<Option<Group>> {
        self.group_manager.get_group(group_id).await
    }

    /// List all groups
    pub async fn list_groups(&self) -> FinanceResult<Vec<Group>> {
        self.group_manager.list_groups().await
    }

    /// Replace a group's details and members
    pub async fn update_group(&mut self, group_id: &str, draft: GroupDraft) -> FinanceResult<Group> {
        self.group_manager.update_group(group_id, draft).await
    }

    /// Delete a group
    pub async fn delete_group(&mut self, group_id: &str) -> FinanceResult<()> {
        self.group_manager.delete_group(group_id).await
    }

    /// Set how much a group member has paid
    pub async fn record_payment(
        &mut self,
        group_id: &str,
        member_id: &str,
        amount_paid: BigDecimal,
    ) -> FinanceResult<Group> {
        self.group_manager
            .record_payment(group_id, member_id, amount_paid)
            .await
    }

    /// Compute who owes whom in a group
    pub async fn settle_group(&self, group_id: &str) -> FinanceResult<Settlement> {
        self.group_manager.settle(group_id).await
    }

    // Savings operations
    /// Create a saving goal
    pub async fn create_goal(&mut self, draft: GoalDraft) -> FinanceResult<SavingGoal> {
        self.savings_manager.create_goal(draft).await
    }

    /// List all saving goals
    pub async fn list_goals(&self) -> FinanceResult<Vec<SavingGoal>> {
        self.savings_manager.list_goals().await
    }

    /// Replace a saving goal's fields
    pub async fn edit_goal(&mut self, goal_id: &str, draft: GoalDraft) -> FinanceResult<SavingGoal> {
        self.savings_manager.edit_goal(goal_id, draft).await
    }

    /// Delete a saving goal
    pub async fn delete_goal(&mut self, goal_id: &str) -> FinanceResult<()> {
        self.savings_manager.delete_goal(goal_id).await
    }

    /// Add money to a saving goal
    pub async fn contribute_to_goal(
        &mut self,
        goal_id: &str,
        amount: BigDecimal,
    ) -> FinanceResult<SavingGoal> {
        self.savings_manager.contribute(goal_id, amount).await
    }

    // Tip operations
    /// Add a tip
    pub async fn add_tip(&mut self, title: String, content: String) -> FinanceResult<Tip> {
        validate_name("Tip title", &title)?;

        let tip = Tip::new(new_id(), title.trim().to_string(), content);
        self.storage.save_tip(&tip).await?;
        Ok(tip)
    }

    /// List all tips
    pub async fn list_tips(&self) -> FinanceResult<Vec<Tip>> {
        self.storage.list_tips().await
    }

    /// Change a tip's title and content
    pub async fn edit_tip(
        &mut self,
        tip_id: &str,
        title: String,
        content: String,
    ) -> FinanceResult<Tip> {
        validate_name("Tip title", &title)?;

        let mut tip = self
            .storage
            .get_tip(tip_id)
            .await?
            .ok_or_else(|| FinanceError::TipNotFound(tip_id.to_string()))?;
        tip.title = title.trim().to_string();
        tip.content = content;

        self.storage.update_tip(&tip).await?;
        Ok(tip)
    }

    /// Delete a tip
    pub async fn delete_tip(&mut self, tip_id: &str) -> FinanceResult<()> {
        self.storage.delete_tip(tip_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finance::TransactionBuilder;
    use crate::utils::memory_storage::MemoryStorage;

    #[tokio::test]
    async fn test_tracker_basic_operations() {
        let mut tracker = Tracker::new(MemoryStorage::new());

        tracker
            .add_transaction(
                TransactionBuilder::income(BigDecimal::from(2000))
                    .description("Salary")
                    .build()
                    .unwrap(),
            )
            .await
            .unwrap();
        tracker
            .add_transaction(
                TransactionBuilder::expense(BigDecimal::from(750))
                    .category("Rent")
                    .build()
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(tracker.balance().await.unwrap(), BigDecimal::from(1250));

        let categories = tracker.expenses_by_category().await.unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].category, "Rent");
    }

    #[tokio::test]
    async fn test_tips() {
        let mut tracker = Tracker::new(MemoryStorage::new());

        assert!(tracker
            .add_tip(" ".to_string(), "content".to_string())
            .await
            .is_err());

        let tip = tracker
            .add_tip("Pay yourself first".to_string(), "Save before spending".to_string())
            .await
            .unwrap();
        let edited = tracker
            .edit_tip(&tip.id, "Automate savings".to_string(), String::new())
            .await
            .unwrap();
        assert_eq!(edited.title, "Automate savings");

        tracker.delete_tip(&tip.id).await.unwrap();
        assert!(tracker.list_tips().await.unwrap().is_empty());
        assert!(matches!(
            tracker.edit_tip(&tip.id, "x".to_string(), String::new()).await,
            Err(FinanceError::TipNotFound(_))
        ));
    }
}
