//! Finance module containing transaction tracking and summaries

pub mod summary;
pub mod transaction;

pub use summary::*;
pub use transaction::*;
