//! UI Components
//!
//! Reusable Leptos components.

mod cascading_select;
mod selection_summary;
mod option_admin;
mod log_panel;
mod delete_confirm_button;

pub use cascading_select::CascadingSelect;
pub use selection_summary::SelectionSummary;
pub use option_admin::OptionAdmin;
pub use log_panel::LogPanel;
pub use delete_confirm_button::DeleteConfirmButton;
