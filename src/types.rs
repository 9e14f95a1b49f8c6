//! Core types and data structures for the finance system

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::money;

/// Whether a transaction brings money in or takes it out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Money received (salary, refunds, gifts)
    Income,
    /// Money spent
    Expense,
}

/// Category every income transaction is filed under
pub const INCOME_CATEGORY: &str = "Income";

/// Category used when an expense is recorded without one
pub const FALLBACK_EXPENSE_CATEGORY: &str = "Others";

/// Default expense categories offered to users
pub const EXPENSE_CATEGORIES: [&str; 8] = [
    "Food",
    "Travel",
    "Rent",
    "Utilities",
    "Shopping",
    "Healthcare",
    "Entertainment",
    FALLBACK_EXPENSE_CATEGORY,
];

/// A single income or expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceTransaction {
    /// Unique identifier for the transaction
    pub id: String,
    /// Amount of money moved, always positive
    pub amount: BigDecimal,
    /// Spending category (always `Income` for income transactions)
    pub category: String,
    /// Free-form description
    pub description: String,
    /// Date the money moved
    pub date: NaiveDate,
    /// Income or expense
    pub kind: TransactionKind,
    /// When the record was created
    pub created_at: NaiveDateTime,
    /// When the record was last updated
    pub updated_at: NaiveDateTime,
}

impl FinanceTransaction {
    /// Create a new transaction
    ///
    /// Income transactions are always filed under [`INCOME_CATEGORY`]; a blank
    /// expense category falls back to [`FALLBACK_EXPENSE_CATEGORY`].
    pub fn new(
        id: String,
        amount: BigDecimal,
        category: String,
        description: String,
        date: NaiveDate,
        kind: TransactionKind,
    ) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id,
            amount: money::round2(&amount),
            category: normalize_category(kind, category),
            description,
            date,
            kind,
            created_at: now,
            updated_at: now,
        }
    }

    /// Signed contribution of this transaction to the running balance
    pub fn signed_amount(&self) -> BigDecimal {
        match self.kind {
            TransactionKind::Income => self.amount.clone(),
            TransactionKind::Expense => -self.amount.clone(),
        }
    }

    /// Apply a partial update
    pub fn apply_update(&mut self, update: TransactionUpdate) {
        if let Some(amount) = update.amount {
            self.amount = money::round2(&amount);
        }
        if let Some(kind) = update.kind {
            self.kind = kind;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        let category = update.category.unwrap_or_else(|| self.category.clone());
        self.category = normalize_category(self.kind, category);
        self.updated_at = chrono::Utc::now().naive_utc();
    }
}

fn normalize_category(kind: TransactionKind, category: String) -> String {
    match kind {
        TransactionKind::Income => INCOME_CATEGORY.to_string(),
        TransactionKind::Expense if category.trim().is_empty() => {
            FALLBACK_EXPENSE_CATEGORY.to_string()
        }
        TransactionKind::Expense => category.trim().to_string(),
    }
}

/// Partial update for an existing transaction; `None` leaves a field as is
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionUpdate {
    pub amount: Option<BigDecimal>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub kind: Option<TransactionKind>,
}

/// Total spent in one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: BigDecimal,
}

/// A participant in a shared expense group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Unique identifier within the group
    pub id: String,
    /// Display name, used in settlement transfers
    pub name: String,
    /// How much this member has put in so far
    pub amount_paid: BigDecimal,
    /// This member's share of the group total
    pub should_pay: BigDecimal,
    /// Set when `should_pay` was given explicitly instead of by the even split
    #[serde(default)]
    pub share_overridden: bool,
}

impl Member {
    /// Create a member with no share assigned yet
    pub fn new(id: String, name: String, amount_paid: BigDecimal) -> Self {
        Self {
            id,
            name,
            amount_paid: money::round2(&amount_paid),
            should_pay: money::zero(),
            share_overridden: false,
        }
    }

    /// Create a member with an explicit share, overriding the even split
    pub fn with_share(
        id: String,
        name: String,
        amount_paid: BigDecimal,
        should_pay: BigDecimal,
    ) -> Self {
        Self {
            id,
            name,
            amount_paid: money::round2(&amount_paid),
            should_pay: money::round2(&should_pay),
            share_overridden: true,
        }
    }

    /// Paid minus owed, rounded to cents. Positive means the member is owed money.
    pub fn net(&self) -> BigDecimal {
        money::round2(&(&self.amount_paid - &self.should_pay))
    }
}

/// A shared expense split between members
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Unique identifier for the group
    pub id: String,
    /// Human-readable group name
    pub name: String,
    /// Optional longer description
    pub description: String,
    /// Declared total of the shared expense; authoritative once set
    pub total_amount: BigDecimal,
    /// Participants and what each has paid / owes
    pub members: Vec<Member>,
    /// Date the group was created or last edited
    pub date: NaiveDate,
    /// When the group was created
    pub created_at: NaiveDateTime,
    /// When the group was last updated
    pub updated_at: NaiveDateTime,
}

impl Group {
    /// Create a new group from already-built members
    pub fn new(
        id: String,
        name: String,
        description: String,
        total_amount: BigDecimal,
        members: Vec<Member>,
    ) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id,
            name,
            description,
            total_amount,
            members,
            date: now.date(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sum of everything members have paid in, rounded to cents
    pub fn total_paid(&self) -> BigDecimal {
        let sum: BigDecimal = self.members.iter().map(|m| &m.amount_paid).sum();
        money::round2(&sum)
    }

    /// Find a member by ID
    pub fn member(&self, member_id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == member_id)
    }
}

/// Receiving side of a settlement transfer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransferTarget {
    /// Another member of the group, by name
    Member(String),
    /// The group pot itself (group is not fully collected yet)
    Group,
}

impl fmt::Display for TransferTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferTarget::Member(name) => f.write_str(name),
            TransferTarget::Group => f.write_str("Group"),
        }
    }
}

/// One "A owes B" line of a settlement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    /// Name of the paying member
    pub from: String,
    /// Who receives the money
    pub to: TransferTarget,
    /// Amount to move, rounded to cents
    pub amount: BigDecimal,
}

impl Transfer {
    /// Transfer between two members
    pub fn to_member(from: &str, to: &str, amount: BigDecimal) -> Self {
        Self {
            from: from.to_string(),
            to: TransferTarget::Member(to.to_string()),
            amount: money::round2(&amount),
        }
    }

    /// Transfer from a member into the group pot
    pub fn to_group(from: &str, amount: BigDecimal) -> Self {
        Self {
            from: from.to_string(),
            to: TransferTarget::Group,
            amount: money::round2(&amount),
        }
    }
}

impl fmt::Display for Transfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} owes {} ${}", self.from, self.to, money::format(&self.amount))
    }
}

/// A savings target the user is working towards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingGoal {
    /// Unique identifier for the goal
    pub id: String,
    /// Short goal name
    pub name: String,
    /// Optional longer description
    pub description: String,
    /// Amount the user wants to reach
    pub target_amount: BigDecimal,
    /// Amount saved so far, never above the target
    pub current_amount: BigDecimal,
    /// Date the user wants to reach the target by
    pub deadline: NaiveDate,
    /// Whether the target has been reached
    pub completed: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A short piece of financial advice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tip {
    pub id: String,
    pub title: String,
    pub content: String,
    pub date: NaiveDate,
}

impl Tip {
    /// Create a new tip dated today
    pub fn new(id: String, title: String, content: String) -> Self {
        Self {
            id,
            title,
            content,
            date: chrono::Utc::now().date_naive(),
        }
    }
}

/// Errors that can occur in the finance system
#[derive(Debug, thiserror::Error)]
pub enum FinanceError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Group not found: {0}")]
    GroupNotFound(String),
    #[error("Member not found: {0}")]
    MemberNotFound(String),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),
    #[error("Saving goal not found: {0}")]
    GoalNotFound(String),
    #[error("Tip not found: {0}")]
    TipNotFound(String),
}

/// Result type for finance operations
pub type FinanceResult<T> = Result<T, FinanceError>;

/// Generate a fresh record identifier
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
