//! Root surface context: named root components, the event pump and demand-driven redraw.

use std::collections::BTreeMap;
use std::time::Duration;

use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui_retained_core::color::ColorDepth;
use ratatui_retained_core::component::Component;
use ratatui_retained_core::component::Status;
use ratatui_retained_core::input::Event;
use ratatui_retained_core::input::KeyCode;
use ratatui_retained_core::input::KeyEvent;
use ratatui_retained_core::keymap;
use ratatui_retained_core::surface::BufferSurface;
use ratatui_retained_core::surface::Surface;
use ratatui_retained_core::surface::SurfaceContext;
use tracing::debug;
use tracing::trace;
use tracing::warn;

use crate::error::Error;
use crate::error::Result;
use crate::event_source::EventSource;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum State {
    #[default]
    Init,
    Run,
    Exit,
}

#[derive(Clone, Debug)]
pub struct WindowOptions {
    /// Longest wait for input between two loop iterations.
    pub tick: Duration,
    /// Keys that end [`Window::run`]; checked before any component sees the event.
    pub exit_keys: Vec<KeyEvent>,
    pub color_depth: ColorDepth,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(5),
            exit_keys: vec![keymap::key(KeyCode::Esc)],
            color_depth: ColorDepth::default(),
        }
    }
}

/// Owns the root components, keyed by name.
///
/// Events reach the roots in key order; the first `Handled` stops the round. Any non-ignored
/// result marks the window dirty, and a dirty window repaints every root once before the next
/// poll.
pub struct Window {
    components: BTreeMap<String, Box<dyn Component>>,
    options: WindowOptions,
    ctx: SurfaceContext,
    state: State,
    dirty: bool,
}

impl Default for Window {
    fn default() -> Self {
        Self::new()
    }
}

impl Window {
    pub fn new() -> Self {
        Self::with_options(WindowOptions::default())
    }

    pub fn with_options(options: WindowOptions) -> Self {
        Self {
            ctx: SurfaceContext::new(options.color_depth),
            components: BTreeMap::new(),
            options,
            state: State::Init,
            dirty: true,
        }
    }

    pub fn context(&self) -> SurfaceContext {
        self.ctx
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Makes the next [`Window::run`] iteration return.
    pub fn request_exit(&mut self) {
        debug!("exit requested");
        self.state = State::Exit;
    }

    /// Attaches `component` under `key`; returns the component it replaced, if any.
    pub fn add_component(
        &mut self,
        key: impl Into<String>,
        mut component: Box<dyn Component>,
    ) -> Option<Box<dyn Component>> {
        let key = key.into();
        component.set_window(self.ctx);
        self.dirty = true;
        let old = self.components.insert(key.clone(), component);
        if old.is_some() {
            warn!(key = %key, "root component replaced");
        }
        old
    }

    pub fn get_component(&self, key: &str) -> Option<&dyn Component> {
        self.components.get(key).map(|c| c.as_ref())
    }

    pub fn get_component_mut(&mut self, key: &str) -> Option<&mut (dyn Component + 'static)> {
        self.components.get_mut(key).map(|c| c.as_mut())
    }

    pub fn remove_component(&mut self, key: &str) -> Option<Box<dyn Component>> {
        let old = self.components.remove(key);
        if old.is_some() {
            self.dirty = true;
        }
        old
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Routes one event: quit and exit keys first, then every root in key order.
    pub fn dispatch(&mut self, event: &Event) -> Status {
        match event {
            Event::Quit => {
                self.request_exit();
                return Status::Handled;
            }
            Event::Key(key) if keymap::matches_any(&self.options.exit_keys, key) => {
                self.request_exit();
                return Status::Handled;
            }
            Event::Resize { width, height } => {
                trace!(width, height, "resized");
                self.dirty = true;
            }
            _ => {}
        }

        let mut status = Status::Ignored;
        for (key, component) in &mut self.components {
            let s = component.handle_event(event);
            if !s.is_ignored() {
                trace!(key = %key, status = ?s, "event consumed");
            }
            status = status.strongest(s);
            if s.is_handled() {
                break;
            }
        }
        if !status.is_ignored() {
            self.dirty = true;
        }
        status
    }

    /// Clears `surface` and paints every root in key order.
    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.clear();
        for component in self.components.values() {
            component.draw(surface);
        }
    }

    /// Runs until a quit event or exit key.
    ///
    /// A terminal without area (or whose size cannot be read) is rejected up front: the window
    /// moves to [`State::Exit`] and no event is read.
    pub fn run<B: Backend, E: EventSource>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &mut E,
    ) -> Result<()> {
        let size = match terminal.size() {
            Ok(size) => size,
            Err(err) => {
                self.state = State::Exit;
                return Err(err.into());
            }
        };
        if size.width == 0 || size.height == 0 {
            debug!(width = size.width, height = size.height, "invalid surface");
            self.state = State::Exit;
            return Err(Error::InvalidSurface {
                width: size.width,
                height: size.height,
            });
        }

        debug!(components = self.components.len(), "window running");
        self.state = State::Run;
        self.dirty = true;
        let res = self.pump(terminal, events);
        self.state = State::Exit;
        debug!(ok = res.is_ok(), "window stopped");
        res
    }

    fn pump<B: Backend, E: EventSource>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &mut E,
    ) -> Result<()> {
        while self.state == State::Run {
            let mut timeout = self.options.tick;
            while let Some(event) = events.poll(timeout)? {
                let _ = self.dispatch(&event);
                if self.state != State::Run {
                    return Ok(());
                }
                timeout = Duration::ZERO;
            }
            if self.dirty {
                self.redraw(terminal)?;
            }
        }
        Ok(())
    }

    fn redraw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let ctx = self.ctx;
        terminal.draw(|frame| {
            let mut surface = BufferSurface::new(frame.buffer_mut(), ctx);
            self.draw(&mut surface);
        })?;
        self.dirty = false;
        trace!("redrawn");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ratatui_retained_core::button::Button;
    use ratatui_retained_core::color::ColorScheme;
    use ratatui_retained_core::geometry::Rect;

    use super::*;

    fn button(x: i32) -> Box<dyn Component> {
        Box::new(Button::new(Rect::new(x, 0, 3, 1), "b", ColorScheme::default()))
    }

    #[test]
    fn exit_keys_win_over_components() {
        let mut w = Window::new();
        w.add_component("a", button(0));
        assert_eq!(w.dispatch(&Event::key(KeyCode::Esc)), Status::Handled);
        assert_eq!(w.state(), State::Exit);
    }

    #[test]
    fn handled_root_stops_the_round_and_marks_dirty() {
        let mut w = Window::new();
        w.add_component("a", button(0));
        w.add_component("b", button(0));
        w.dirty = false;

        assert_eq!(w.dispatch(&Event::click(1, 0)), Status::Handled);
        assert!(w.is_dirty());

        w.dirty = false;
        assert_eq!(w.dispatch(&Event::click(9, 9)), Status::Ignored);
        assert!(!w.is_dirty());
    }

    #[test]
    fn replacing_a_key_returns_the_old_component() {
        let mut w = Window::new();
        assert!(w.add_component("a", button(0)).is_none());
        let old = w.add_component("a", button(5));
        assert_eq!(old.map(|c| c.rect().x), Some(0));
        assert_eq!(w.get_component("a").map(|c| c.rect().x), Some(5));
        assert_eq!(w.len(), 1);
        assert!(w.remove_component("a").is_some());
        assert!(w.is_empty());
    }

    #[test]
    fn attach_binds_context() {
        let mut w = Window::new();
        w.add_component("a", button(0));
        assert_eq!(
            w.get_component("a").and_then(|c| c.window()),
            Some(w.context())
        );
    }
}
