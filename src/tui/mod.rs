//! TUI module: Terminal front end using Ratatui.
//!
//! One screen per [`crate::domain::Page`], with tabs for navigation.

mod app;
mod styles;
mod ui;

pub use app::App;
pub use styles::AirTheme;
