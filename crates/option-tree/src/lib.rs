//! Option Tree
//!
//! Cascading selector over a tree of options (residence → etage → chambre).
//!
//! - node: the selectable option and its synthetic "select all" twin
//! - level: one rank of the hierarchy and its per-level selection
//! - selection: the category-keyed selection map and initial values
//! - source: the data source abstraction the selector fetches from
//! - request: tagged fetch requests and their responses
//! - selector: the state machine tying it all together

mod config;
mod label;
mod level;
mod memory;
mod node;
mod request;
mod selection;
mod selector;
mod source;

pub use config::{SelectMode, SelectorConfig};
pub use label::{AllLabelPolicy, GenderedAllLabel};
pub use level::{Level, LevelState, Selection};
pub use memory::MemorySource;
pub use node::{OptionNode, SELECT_ALL_ID, SELECT_ALL_VALUE};
pub use request::{BackfillRequest, BackfillResponse, LevelRequest, LevelResponse, Ticket};
pub use selection::{InitialEntry, InitialValue, InitialValues, SelectionMap};
pub use selector::{CascadeSelector, SelectError};
pub use source::{OptionQuery, OptionSource, SourceError};
