//! # Finance Core
//!
//! A personal finance library providing income and expense tracking, group
//! expense splitting with who-owes-whom settlement, and savings goals.
//!
//! ## Features
//!
//! - **Transactions**: Income and expense records with balance and per-category totals
//! - **Group expenses**: Even split of a shared total and greedy debt settlement
//! - **Savings goals**: Contributions, completion tracking and deadline status
//! - **Tips**: Short pieces of financial advice
//! - **Storage abstraction**: Backend-agnostic design with trait-based storage
//!
//! ## Quick Start
//!
//! ```rust
//! use finance_core::{compute_settlement, GroupDraft, MemberDraft};
//! use bigdecimal::BigDecimal;
//!
//! let group = GroupDraft::new("Dinner", BigDecimal::from(100))
//!     .member(MemberDraft::new("Alice", BigDecimal::from(100)))
//!     .member(MemberDraft::new("Bob", BigDecimal::from(0)))
//!     .build();
//!
//! let transfers = compute_settlement(&group);
//! assert_eq!(transfers[0].to_string(), "Bob owes Alice $50.00");
//! ```

pub mod finance;
pub mod group;
pub mod savings;
pub mod tracker;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use finance::*;
pub use group::*;
pub use savings::*;
pub use tracker::*;
pub use traits::*;
pub use types::*;
