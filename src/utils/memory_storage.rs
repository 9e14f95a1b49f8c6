//! In-memory storage implementation for testing

use async_trait::async_trait;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::traits::*;
use crate::types::*;

/// Records that can live in a [`MemoryStorage`] table
trait Record: Clone {
    fn record_id(&self) -> &str;
}

impl Record for FinanceTransaction {
    fn record_id(&self) -> &str {
        &self.id
    }
}

impl Record for Group {
    fn record_id(&self) -> &str {
        &self.id
    }
}

impl Record for SavingGoal {
    fn record_id(&self) -> &str {
        &self.id
    }
}

impl Record for Tip {
    fn record_id(&self) -> &str {
        &self.id
    }
}

/// Insertion-ordered table of records
type Table<T> = Arc<RwLock<Vec<T>>>;

fn read<T>(table: &Table<T>) -> FinanceResult<RwLockReadGuard<'_, Vec<T>>> {
    table
        .read()
        .map_err(|e| FinanceError::Storage(format!("lock poisoned: {}", e)))
}

fn write<T>(table: &Table<T>) -> FinanceResult<RwLockWriteGuard<'_, Vec<T>>> {
    table
        .write()
        .map_err(|e| FinanceError::Storage(format!("lock poisoned: {}", e)))
}

fn save<T: Record>(table: &Table<T>, record: &T) -> FinanceResult<()> {
    let mut rows = write(table)?;
    match rows.iter_mut().find(|r| r.record_id() == record.record_id()) {
        Some(existing) => *existing = record.clone(),
        None => rows.push(record.clone()),
    }
    Ok(())
}

fn get<T: Record>(table: &Table<T>, id: &str) -> FinanceResult<Option<T>> {
    Ok(read(table)?.iter().find(|r| r.record_id() == id).cloned())
}

/// Replace an existing record; returns `false` if it was not present
fn update<T: Record>(table: &Table<T>, record: &T) -> FinanceResult<bool> {
    let mut rows = write(table)?;
    match rows.iter_mut().find(|r| r.record_id() == record.record_id()) {
        Some(existing) => {
            *existing = record.clone();
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Remove a record; returns `false` if it was not present
fn delete<T: Record>(table: &Table<T>, id: &str) -> FinanceResult<bool> {
    let mut rows = write(table)?;
    let before = rows.len();
    rows.retain(|r| r.record_id() != id);
    Ok(rows.len() != before)
}

/// In-memory storage implementation for testing and development
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    transactions: Table<FinanceTransaction>,
    groups: Table<Group>,
    goals: Table<SavingGoal>,
    tips: Table<Tip>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) -> FinanceResult<()> {
        write(&self.transactions)?.clear();
        write(&self.groups)?.clear();
        write(&self.goals)?.clear();
        write(&self.tips)?.clear();
        Ok(())
    }
}

#[async_trait]
impl FinanceStorage for MemoryStorage {
    async fn save_transaction(&mut self, transaction: &FinanceTransaction) -> FinanceResult<()> {
        save(&self.transactions, transaction)
    }

    async fn get_transaction(
        &self,
        transaction_id: &str,
    ) -> FinanceResult<Option<FinanceTransaction>> {
        get(&self.transactions, transaction_id)
    }

    async fn list_transactions(
        &self,
        kind: Option<TransactionKind>,
    ) -> FinanceResult<Vec<FinanceTransaction>> {
        let rows = read(&self.transactions)?;
        Ok(rows
            .iter()
            .rev()
            .filter(|txn| kind.is_none_or(|k| txn.kind == k))
            .cloned()
            .collect())
    }

    async fn update_transaction(&mut self, transaction: &FinanceTransaction) -> FinanceResult<()> {
        if update(&self.transactions, transaction)? {
            Ok(())
        } else {
            Err(FinanceError::TransactionNotFound(transaction.id.clone()))
        }
    }

    async fn delete_transaction(&mut self, transaction_id: &str) -> FinanceResult<()> {
        if delete(&self.transactions, transaction_id)? {
            Ok(())
        } else {
            Err(FinanceError::TransactionNotFound(transaction_id.to_string()))
        }
    }

    async fn save_group(&mut self, group: &Group) -> FinanceResult<()> {
        save(&self.groups, group)
    }

    async fn get_group(&self, group_id: &str) -> FinanceResult<Option<Group>> {
        get(&self.groups, group_id)
    }

    async fn list_groups(&self) -> FinanceResult<Vec<Group>> {
        Ok(read(&self.groups)?.clone())
    }

    async fn update_group(&mut self, group: &Group) -> FinanceResult<()> {
        if update(&self.groups, group)? {
            Ok(())
        } else {
            Err(FinanceError::GroupNotFound(group.id.clone()))
        }
    }

    async fn delete_group(&mut self, group_id: &str) -> FinanceResult<()> {
        if delete(&self.groups, group_id)? {
            Ok(())
        } else {
            Err(FinanceError::GroupNotFound(group_id.to_string()))
        }
    }

    async fn save_goal(&mut self, goal: &SavingGoal) -> FinanceResult<()> {
        save(&self.goals, goal)
    }

    async fn get_goal(&self, goal_id: &str) -> FinanceResult<Option<SavingGoal>> {
        get(&self.goals, goal_id)
    }

    async fn list_goals(&self) -> FinanceResult<Vec<SavingGoal>> {
        Ok(read(&self.goals)?.clone())
    }

    async fn update_goal(&mut self, goal: &SavingGoal) -> FinanceResult<()> {
        if update(&self.goals, goal)? {
            Ok(())
        } else {
            Err(FinanceError::GoalNotFound(goal.id.clone()))
        }
    }

    async fn delete_goal(&mut self, goal_id: &str) -> FinanceResult<()> {
        if delete(&self.goals, goal_id)? {
            Ok(())
        } else {
            Err(FinanceError::GoalNotFound(goal_id.to_string()))
        }
    }

    async fn save_tip(&mut self, tip: &Tip) -> FinanceResult<()> {
        save(&self.tips, tip)
    }

    async fn get_tip(&self, tip_id: &str) -> FinanceResult<Option<Tip>> {
        get(&self.tips, tip_id)
    }

    async fn list_tips(&self) -> FinanceResult<Vec<Tip>> {
        Ok(read(&self.tips)?.clone())
    }

    async fn update_tip(&mut self, tip: &Tip) -> FinanceResult<()> {
        if update(&self.tips, tip)? {
            Ok(())
        } else {
            Err(FinanceError::TipNotFound(tip.id.clone()))
        }
    }

    async fn delete_tip(&mut self, tip_id: &str) -> FinanceResult<()> {
        if delete(&self.tips, tip_id)? {
            Ok(())
        } else {
            Err(FinanceError::TipNotFound(tip_id.to_string()))
        }
    }
}
