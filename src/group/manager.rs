//! Group management: saving drafts, recording payments, settling on demand

use bigdecimal::BigDecimal;

use crate::group::builder::GroupDraft;
use crate::group::settlement::{Settlement, SettlementCalculator};
use crate::traits::*;
use crate::types::*;
use crate::utils::{money, validate_non_negative_amount};

/// Group manager for handling shared expense groups
pub struct GroupManager<S: FinanceStorage> {
    storage: S,
    validator: Box<dyn GroupValidator>,
    calculator: SettlementCalculator,
}

impl<S: FinanceStorage> GroupManager<S> {
    /// Create a new group manager
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultGroupValidator),
            calculator: SettlementCalculator::new(),
        }
    }

    /// Create a new group manager with custom validator
    pub fn with_validator(storage: S, validator: Box<dyn GroupValidator>) -> Self {
        Self {
            storage,
            validator,
            calculator: SettlementCalculator::new(),
        }
    }

    /// Replace the settlement calculator (e.g. to change the tolerance)
    pub fn set_calculator(&mut self, calculator: SettlementCalculator) {
        self.calculator = calculator;
    }

    /// Create a new group from a draft
    pub async fn create_group(&mut self, draft: GroupDraft) -> FinanceResult<Group> {
        self.validator.validate_draft(&draft)?;

        let group = draft.build();
        self.storage.save_group(&group).await?;

        tracing::debug!(group_id = %group.id, members = group.members.len(), "created group");
        Ok(group)
    }

    /// Get a group by ID
    pub async fn get_group(&self, group_id: &str) -> FinanceResult<Option<Group>> {
        self.storage.get_group(group_id).await
    }

    /// Get a group by ID, returning an error if not found
    pub async fn get_group_required(&self, group_id: &str) -> FinanceResult<Group> {
        self.storage
            .get_group(group_id)
            .await?
            .ok_or_else(|| FinanceError::GroupNotFound(group_id.to_string()))
    }

    /// List all groups
    pub async fn list_groups(&self) -> FinanceResult<Vec<Group>> {
        self.storage.list_groups().await
    }

    /// Replace a group's details and member list, re-applying the even split
    pub async fn update_group(&mut self, group_id: &str, draft: GroupDraft) -> FinanceResult<Group> {
        let mut group = self.get_group_required(group_id).await?;

        self.validator.validate_draft(&draft)?;

        group.name = draft.name.trim().to_string();
        group.description = draft.description.clone();
        group.total_amount = money::round2(&draft.total_amount);
        group.members = draft.build_members();
        let now = chrono::Utc::now().naive_utc();
        group.date = now.date();
        group.updated_at = now;

        self.storage.update_group(&group).await?;

        tracing::debug!(group_id = %group.id, members = group.members.len(), "updated group");
        Ok(group)
    }

    /// Delete a group
    pub async fn delete_group(&mut self, group_id: &str) -> FinanceResult<()> {
        self.storage.delete_group(group_id).await?;
        tracing::debug!(%group_id, "deleted group");
        Ok(())
    }

    /// Set how much a member has paid in so far.
    ///
    /// Payments may push the group past its total; settlement flags that
    /// rather than this call rejecting it.
    pub async fn record_payment(
        &mut self,
        group_id: &str,
        member_id: &str,
        amount_paid: BigDecimal,
    ) -> FinanceResult<Group> {
        validate_non_negative_amount(&amount_paid)?;

        let mut group = self.get_group_required(group_id).await?;
        let member = group
            .members
            .iter_mut()
            .find(|m| m.id == member_id)
            .ok_or_else(|| FinanceError::MemberNotFound(member_id.to_string()))?;

        member.amount_paid = money::round2(&amount_paid);
        group.updated_at = chrono::Utc::now().naive_utc();

        self.storage.update_group(&group).await?;

        tracing::debug!(%group_id, %member_id, %amount_paid, "recorded member payment");
        Ok(group)
    }

    /// Compute the current settlement for a group
    pub async fn settle(&self, group_id: &str) -> FinanceResult<Settlement> {
        let group = self.get_group_required(group_id).await?;
        Ok(self.calculator.settle(&group))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::builder::MemberDraft;
    use crate::group::settlement::SettlementStatus;
    use crate::utils::memory_storage::MemoryStorage;

    fn dinner() -> GroupDraft {
        GroupDraft::new("Dinner", BigDecimal::from(100))
            .member(MemberDraft::new("A", BigDecimal::from(0)))
            .member(MemberDraft::new("B", BigDecimal::from(0)))
    }

    #[tokio::test]
    async fn test_payments_change_settlement() {
        let mut manager = GroupManager::new(MemoryStorage::new());
        let group = manager.create_group(dinner()).await.unwrap();

        let before = manager.settle(&group.id).await.unwrap();
        assert_eq!(before.status, SettlementStatus::UnderCollected);
        assert_eq!(before.transfers.len(), 2);

        let a = group.members[0].id.clone();
        manager
            .record_payment(&group.id, &a, BigDecimal::from(100))
            .await
            .unwrap();

        let after = manager.settle(&group.id).await.unwrap();
        assert_eq!(after.status, SettlementStatus::NeedsTransfers);
        assert_eq!(
            after.transfers,
            vec![Transfer::to_member("B", "A", BigDecimal::from(50))]
        );
    }

    #[tokio::test]
    async fn test_record_payment_errors() {
        let mut manager = GroupManager::new(MemoryStorage::new());
        let group = manager.create_group(dinner()).await.unwrap();

        let negative = manager
            .record_payment(&group.id, &group.members[0].id, BigDecimal::from(-1))
            .await;
        assert!(matches!(negative, Err(FinanceError::Validation(_))));

        let unknown_member = manager
            .record_payment(&group.id, "ghost", BigDecimal::from(1))
            .await;
        assert!(matches!(unknown_member, Err(FinanceError::MemberNotFound(_))));

        let unknown_group = manager.settle("missing").await;
        assert!(matches!(unknown_group, Err(FinanceError::GroupNotFound(_))));
    }

    #[tokio::test]
    async fn test_update_group_resplits() {
        let mut manager = GroupManager::new(MemoryStorage::new());
        let group = manager.create_group(dinner()).await.unwrap();

        let draft = GroupDraft::from_group(&group)
            .member(MemberDraft::new("C", BigDecimal::from(0)));
        let draft = GroupDraft {
            total_amount: BigDecimal::from(150),
            ..draft
        };
        let updated = manager.update_group(&group.id, draft).await.unwrap();

        assert_eq!(updated.id, group.id);
        assert_eq!(updated.members.len(), 3);
        assert_eq!(updated.members[0].id, group.members[0].id);
        for member in &updated.members {
            assert_eq!(member.should_pay, BigDecimal::from(50));
        }

        let invalid = GroupDraft::new("", BigDecimal::from(10));
        assert!(manager.update_group(&group.id, invalid).await.is_err());
    }
}
