use std::time::Duration;

use ratatui_retained_core::input::Event;

/// Supplies input events to [`crate::window::Window::run`].
pub trait EventSource {
    /// Waits at most `timeout` for the next event. `Ok(None)` means nothing arrived.
    fn poll(&mut self, timeout: Duration) -> std::io::Result<Option<Event>>;
}

/// Reads events from the terminal, synthesizing click counts.
#[cfg(feature = "crossterm")]
#[derive(Clone, Debug, Default)]
pub struct CrosstermEvents {
    clicks: ratatui_retained_core::crossterm_input::ClickTracker,
}

#[cfg(feature = "crossterm")]
impl CrosstermEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_click_interval(interval: Duration) -> Self {
        Self {
            clicks: ratatui_retained_core::crossterm_input::ClickTracker::new(interval),
        }
    }
}

#[cfg(feature = "crossterm")]
impl EventSource for CrosstermEvents {
    fn poll(&mut self, timeout: Duration) -> std::io::Result<Option<Event>> {
        if !crossterm::event::poll(timeout)? {
            return Ok(None);
        }
        let ev = crossterm::event::read()?;
        Ok(ratatui_retained_core::crossterm_input::event_from_crossterm(
            ev,
            &mut self.clicks,
        ))
    }
}
