pub mod inventory;
pub mod stack;

pub use inventory::Inventory;
pub use stack::{Stack, Tag};
