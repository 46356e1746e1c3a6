//! `ratatui-retained-core` provides the retained widget tree behind `ratatui-retained`.
//!
//! Components own their children, receive events through [`component::Component::handle_event`]
//! and paint into a ratatui buffer through the [`surface::Surface`] capability. Positions are
//! absolute cell rectangles; containers move their subtree with `translate`.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: feed [`input::Event`]s from any source, draw into any `Buffer`.
//! - Single-threaded: all widgets run synchronously on the caller's thread.
//! - Typed ownership: composites keep concrete child types, and row buttons report
//!   intents instead of calling back into their owner.
//!
//! ## Getting started
//!
//! Most users should depend on the facade crate `ratatui-retained`, which adds the root
//! `Window` and a terminal loop. Use this crate directly to embed the widgets in your own loop.
//!
//! Useful entry points:
//! - [`panel::Panel`] and [`scroll::ScrollPanel`]: containers.
//! - [`expandable::Expandable`]: trigger + popup, the base of the composites below.
//! - [`combo_box::ComboBox`], [`dropdown::Dropdown`], [`color_select::ColorSelect`].
//! - [`slider::Slider`] and [`text_input::TextInput`]: interactive leaves.
//!
//! ## Event routing
//!
//! Every handler returns a [`component::Status`]. Containers stop at the first `Handled` child,
//! keep going past `Forwarded` ones and report `Handled` if anything changed.
pub mod color;
pub mod component;
pub mod error;
pub mod geometry;
pub mod input;
pub mod keymap;
pub mod surface;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod button;
pub mod text;

pub mod panel;
pub mod scroll;

pub mod expandable;

pub mod color_select;
pub mod combo_box;
pub mod dropdown;
pub mod slider;
pub mod text_input;
