//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod db;
mod option;
mod seed;

#[cfg(test)]
mod tests;

pub use traits::Repository;
pub use db::DbState;
pub use option::{OptionHierarchyOperations, OptionRepository};
pub use seed::seed_if_empty;
