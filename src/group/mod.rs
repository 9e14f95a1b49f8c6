//! Group expense splitting: drafts, even split, settlement and group management

pub mod builder;
pub mod manager;
pub mod settlement;
pub mod split;

pub use builder::*;
pub use manager::*;
pub use settlement::*;
pub use split::*;
