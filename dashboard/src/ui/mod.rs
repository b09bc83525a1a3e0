//! # Console UI
//!
//! - **[`render`]**: text for the stats and collections panels, including their error state
//! - **[`console`]**: [`ConsoleView`], the terminal [`DashboardView`](crate::core::service::DashboardView)

pub mod console;
pub mod render;

pub use console::ConsoleView;
pub use render::{render_collections, render_stats, render_update};
