//! UI rendering module for SpaceScope
//!
//! This module contains all the rendering logic for the terminal user
//! interface, using the ratatui library for TUI components.

pub mod event_detail;
pub mod event_list;
pub mod gallery;
pub mod help_overlay;
pub mod launches;
pub mod weather;
pub mod widgets;

pub use event_detail::render as render_event_detail;
pub use event_list::render as render_event_list;
pub use gallery::render as render_gallery;
pub use help_overlay::render as render_help_overlay;
pub use launches::render as render_launches;
pub use weather::render as render_weather;
