//! Option Repository Module
//!
//! This module provides option repository functionality split into specialized sub-modules:
//! - option_repo: Core CRUD operations
//! - option_hierarchy: Parent-child lookups used by the cascading selector

mod option_repo;
mod option_hierarchy;

pub use option_repo::OptionRepository;

// Re-export the operation trait so it can be used by importing OptionRepository
pub use option_hierarchy::OptionHierarchyOperations;
