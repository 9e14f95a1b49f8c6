//! Savings goals: targets, contributions and progress

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::traits::*;
use crate::types::*;
use crate::utils::{money, validate_name, validate_non_negative_amount, validate_positive_amount};

/// How a goal's deadline relates to a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeadlineStatus {
    /// The deadline has passed
    Expired,
    /// Whole days until the deadline (0 when it is today)
    DaysLeft(i64),
}

impl SavingGoal {
    /// Create a goal, marking it completed if the target is already met
    pub fn new(
        id: String,
        name: String,
        description: String,
        target_amount: BigDecimal,
        current_amount: BigDecimal,
        deadline: NaiveDate,
    ) -> Self {
        let now = chrono::Utc::now().naive_utc();
        let target_amount = money::round2(&target_amount);
        let current_amount = money::round2(&current_amount);
        Self {
            id,
            name,
            description,
            completed: current_amount >= target_amount,
            target_amount,
            current_amount,
            deadline,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check the rules every saved goal must satisfy
    pub fn validate(&self) -> FinanceResult<()> {
        validate_name("Goal name", &self.name)?;
        validate_positive_amount(&self.target_amount)?;
        validate_non_negative_amount(&self.current_amount)?;

        if self.current_amount > self.target_amount {
            return Err(FinanceError::Validation(
                "Saved amount cannot exceed target amount".to_string(),
            ));
        }

        Ok(())
    }

    /// Add money to the goal. Reaching the target caps the saved amount at the
    /// target and marks the goal completed.
    pub fn contribute(&mut self, amount: &BigDecimal) -> FinanceResult<()> {
        validate_positive_amount(amount)?;

        let new_amount = money::round2(&(&self.current_amount + amount));
        self.completed = new_amount >= self.target_amount;
        self.current_amount = if self.completed {
            self.target_amount.clone()
        } else {
            new_amount
        };
        self.updated_at = chrono::Utc::now().naive_utc();
        Ok(())
    }

    /// Percentage of the target saved, capped at 100
    pub fn progress_percent(&self) -> BigDecimal {
        if self.target_amount <= BigDecimal::from(0) {
            return money::zero();
        }
        let percent = &self.current_amount * BigDecimal::from(100) / &self.target_amount;
        money::round2(&percent.min(BigDecimal::from(100)))
    }

    /// Whether the deadline has passed as of `today`
    pub fn deadline_status(&self, today: NaiveDate) -> DeadlineStatus {
        if self.deadline < today {
            DeadlineStatus::Expired
        } else {
            DeadlineStatus::DaysLeft((self.deadline - today).num_days())
        }
    }
}

/// Fields of a goal as entered on create or edit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalDraft {
    pub name: String,
    pub description: String,
    pub target_amount: BigDecimal,
    pub current_amount: BigDecimal,
    pub deadline: NaiveDate,
}

/// Savings manager for handling goals
pub struct SavingsManager<S: FinanceStorage> {
    storage: S,
}

impl<S: FinanceStorage> SavingsManager<S> {
    /// Create a new savings manager
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Create a new goal
    pub async fn create_goal(&mut self, draft: GoalDraft) -> FinanceResult<SavingGoal> {
        let goal = SavingGoal::new(
            new_id(),
            draft.name.trim().to_string(),
            draft.description,
            draft.target_amount,
            draft.current_amount,
            draft.deadline,
        );
        goal.validate()?;

        self.storage.save_goal(&goal).await?;
        tracing::debug!(goal_id = %goal.id, "created saving goal");
        Ok(goal)
    }

    /// Get a goal by ID
    pub async fn get_goal(&self, goal_id: &str) -> FinanceResult<Option<SavingGoal>> {
        self.storage.get_goal(goal_id).await
    }

    /// Get a goal by ID, returning an error if not found
    pub async fn get_goal_required(&self, goal_id: &str) -> FinanceResult<SavingGoal> {
        self.storage
            .get_goal(goal_id)
            .await?
            .ok_or_else(|| FinanceError::GoalNotFound(goal_id.to_string()))
    }

    /// List all goals
    pub async fn list_goals(&self) -> FinanceResult<Vec<SavingGoal>> {
        self.storage.list_goals().await
    }

    /// Replace a goal's fields, recomputing whether it is completed
    pub async fn edit_goal(&mut self, goal_id: &str, draft: GoalDraft) -> FinanceResult<SavingGoal> {
        let existing = self.get_goal_required(goal_id).await?;

        let mut goal = SavingGoal::new(
            existing.id,
            draft.name.trim().to_string(),
            draft.description,
            draft.target_amount,
            draft.current_amount,
            draft.deadline,
        );
        goal.created_at = existing.created_at;
        goal.validate()?;

        self.storage.update_goal(&goal).await?;
        tracing::debug!(%goal_id, "edited saving goal");
        Ok(goal)
    }

    /// Delete a goal
    pub async fn delete_goal(&mut self, goal_id: &str) -> FinanceResult<()> {
        self.storage.delete_goal(goal_id).await?;
        tracing::debug!(%goal_id, "deleted saving goal");
        Ok(())
    }

    /// Add money to a goal
    pub async fn contribute(
        &mut self,
        goal_id: &str,
        amount: BigDecimal,
    ) -> FinanceResult<SavingGoal> {
        let mut goal = self.get_goal_required(goal_id).await?;
        goal.contribute(&amount)?;

        self.storage.update_goal(&goal).await?;
        tracing::debug!(%goal_id, %amount, completed = goal.completed, "contributed to saving goal");
        Ok(goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::memory_storage::MemoryStorage;

    fn deadline() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
    }

    fn laptop(saved: i64) -> SavingGoal {
        SavingGoal::new(
            "g1".to_string(),
            "Laptop".to_string(),
            String::new(),
            BigDecimal::from(1000),
            BigDecimal::from(saved),
            deadline(),
        )
    }

    #[test]
    fn test_contribution_caps_at_target() {
        let mut goal = laptop(900);
        goal.contribute(&BigDecimal::from(50)).unwrap();
        assert!(!goal.completed);
        assert_eq!(goal.current_amount, BigDecimal::from(950));

        goal.contribute(&BigDecimal::from(200)).unwrap();
        assert!(goal.completed);
        assert_eq!(goal.current_amount, BigDecimal::from(1000));
        assert_eq!(goal.progress_percent(), BigDecimal::from(100));

        assert!(goal.contribute(&BigDecimal::from(0)).is_err());
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(laptop(0).progress_percent(), BigDecimal::from(0));
        assert_eq!(laptop(333).progress_percent(), money::cents(3330));
    }

    #[test]
    fn test_deadline_status() {
        let goal = laptop(0);
        assert_eq!(
            goal.deadline_status(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()),
            DeadlineStatus::Expired
        );
        assert_eq!(
            goal.deadline_status(NaiveDate::from_ymd_opt(2025, 6, 20).unwrap()),
            DeadlineStatus::DaysLeft(10)
        );
        assert_eq!(goal.deadline_status(deadline()), DeadlineStatus::DaysLeft(0));
    }

    #[test]
    fn test_goal_validation() {
        assert!(laptop(0).validate().is_ok());
        assert!(laptop(1001).validate().is_err());

        let mut unnamed = laptop(0);
        unnamed.name = " ".to_string();
        assert!(unnamed.validate().is_err());
    }

    #[tokio::test]
    async fn test_manager_flow() {
        let mut manager = SavingsManager::new(MemoryStorage::new());
        let goal = manager
            .create_goal(GoalDraft {
                name: "Holiday".to_string(),
                description: "Summer trip".to_string(),
                target_amount: BigDecimal::from(500),
                current_amount: BigDecimal::from(500),
                deadline: deadline(),
            })
            .await
            .unwrap();
        assert!(goal.completed);

        let edited = manager
            .edit_goal(
                &goal.id,
                GoalDraft {
                    name: "Holiday".to_string(),
                    description: String::new(),
                    target_amount: BigDecimal::from(800),
                    current_amount: BigDecimal::from(500),
                    deadline: deadline(),
                },
            )
            .await
            .unwrap();
        assert!(!edited.completed);
        assert_eq!(edited.id, goal.id);

        let topped_up = manager.contribute(&goal.id, BigDecimal::from(300)).await.unwrap();
        assert!(topped_up.completed);

        manager.delete_goal(&goal.id).await.unwrap();
        assert!(matches!(
            manager.contribute(&goal.id, BigDecimal::from(1)).await,
            Err(FinanceError::GoalNotFound(_))
        ));
    }
}
