//! `ratatui-retained` is a retained-mode widget tree for ratatui terminal UIs.
//!
//! Widgets are long-lived objects that own their children. A [`window::Window`] owns the named
//! root components, routes every input event through the tree and repaints the terminal only
//! after an event changed something.
//!
//! The widgets themselves live in `ratatui-retained-core` and are re-exported here.
//!
//! ## Getting started
//!
//! Enable the `crossterm` feature, open a [`terminal::TerminalSession`] and hand it to
//! [`window::Window::run`] together with a [`event_source::CrosstermEvents`] source. See
//! `examples/demo.rs`.
//!
//! For tests or custom loops, implement [`event_source::EventSource`] yourself, or skip `run`
//! and call [`window::Window::dispatch`] and [`window::Window::draw`] directly.
pub use ratatui_retained_core::button;
pub use ratatui_retained_core::color;
pub use ratatui_retained_core::color_select;
pub use ratatui_retained_core::combo_box;
pub use ratatui_retained_core::component;
pub use ratatui_retained_core::dropdown;
pub use ratatui_retained_core::expandable;
pub use ratatui_retained_core::geometry;
pub use ratatui_retained_core::input;
pub use ratatui_retained_core::keymap;
pub use ratatui_retained_core::panel;
pub use ratatui_retained_core::scroll;
pub use ratatui_retained_core::slider;
pub use ratatui_retained_core::surface;
pub use ratatui_retained_core::text;
pub use ratatui_retained_core::text_input;

#[cfg(feature = "crossterm")]
pub use ratatui_retained_core::crossterm_input;

pub mod error;
pub mod event_source;
pub mod window;

#[cfg(feature = "crossterm")]
pub mod terminal;

pub use error::Error;
pub use window::Window;
