//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO external dependencies (except serde and thiserror).

mod entity;
mod option_node;

pub use entity::{Entity, DomainError, DomainResult};
pub use option_node::{OptionNode, RESERVED_VALUE};
