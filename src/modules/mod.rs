//! UI Modules
//!
//! Self-contained pieces of the shell:
//! - search_modal: overlay with local query state and suggestion chips
//! - export: JSON/CSV export of catalogue content

pub mod export;
pub mod search_modal;
