use std::time::Duration;
use std::time::Instant;

use crate::input::Event;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;
use crate::input::MouseButton;

/// Synthesizes click counts, which terminals do not report.
#[derive(Clone, Debug)]
pub struct ClickTracker {
    interval: Duration,
    last: Option<(u16, u16, MouseButton, Instant)>,
    count: u8,
}

impl Default for ClickTracker {
    fn default() -> Self {
        Self::new(Duration::from_millis(400))
    }
}

impl ClickTracker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
            count: 0,
        }
    }

    pub fn press(&mut self, column: u16, row: u16, button: MouseButton, now: Instant) -> u8 {
        let repeat = matches!(
            self.last,
            Some((x, y, b, at)) if x == column
                && y == row
                && b == button
                && now.saturating_duration_since(at) <= self.interval
        );
        self.count = if repeat {
            self.count.saturating_add(1)
        } else {
            1
        };
        self.last = Some((column, row, button, now));
        self.count
    }
}

pub fn event_from_crossterm(ev: crossterm::event::Event, clicks: &mut ClickTracker) -> Option<Event> {
    match ev {
        crossterm::event::Event::Key(key) => {
            if key.kind != crossterm::event::KeyEventKind::Press {
                return None;
            }
            let key = key_event_from_crossterm(key)?;
            match key.code {
                KeyCode::Char('c') if key.modifiers.ctrl => Some(Event::Quit),
                KeyCode::Char(c) if !key.modifiers.ctrl && !key.modifiers.alt => {
                    Some(Event::Text(c))
                }
                _ => Some(Event::Key(key)),
            }
        }
        crossterm::event::Event::Mouse(m) => mouse_event_from_crossterm(m, clicks, Instant::now()),
        crossterm::event::Event::Resize(width, height) => Some(Event::Resize { width, height }),
        _ => None,
    }
}

pub fn key_event_from_crossterm(key: crossterm::event::KeyEvent) -> Option<KeyEvent> {
    let code = match key.code {
        crossterm::event::KeyCode::Char(c) => KeyCode::Char(c),
        crossterm::event::KeyCode::Enter => KeyCode::Enter,
        crossterm::event::KeyCode::Backspace => KeyCode::Backspace,
        crossterm::event::KeyCode::Delete => KeyCode::Delete,
        crossterm::event::KeyCode::Tab => KeyCode::Tab,
        crossterm::event::KeyCode::Esc => KeyCode::Esc,
        crossterm::event::KeyCode::Left => KeyCode::Left,
        crossterm::event::KeyCode::Right => KeyCode::Right,
        crossterm::event::KeyCode::Up => KeyCode::Up,
        crossterm::event::KeyCode::Down => KeyCode::Down,
        crossterm::event::KeyCode::Home => KeyCode::Home,
        crossterm::event::KeyCode::End => KeyCode::End,
        crossterm::event::KeyCode::PageUp => KeyCode::PageUp,
        crossterm::event::KeyCode::PageDown => KeyCode::PageDown,
        _ => return None,
    };

    Some(KeyEvent {
        code,
        modifiers: modifiers_from_crossterm(key.modifiers),
    })
}

pub fn mouse_event_from_crossterm(
    m: crossterm::event::MouseEvent,
    clicks: &mut ClickTracker,
    now: Instant,
) -> Option<Event> {
    let x = i32::from(m.column);
    let y = i32::from(m.row);
    match m.kind {
        crossterm::event::MouseEventKind::Moved | crossterm::event::MouseEventKind::Drag(_) => {
            Some(Event::MouseMove { x, y })
        }
        crossterm::event::MouseEventKind::Down(b) => {
            let button = mouse_button_from_crossterm(b);
            Some(Event::MouseDown {
                x,
                y,
                button,
                clicks: clicks.press(m.column, m.row, button, now),
            })
        }
        crossterm::event::MouseEventKind::Up(b) => Some(Event::MouseUp {
            x,
            y,
            button: mouse_button_from_crossterm(b),
        }),
        crossterm::event::MouseEventKind::ScrollUp => Some(Event::Wheel { delta_y: 1 }),
        crossterm::event::MouseEventKind::ScrollDown => Some(Event::Wheel { delta_y: -1 }),
        _ => None,
    }
}

fn modifiers_from_crossterm(m: crossterm::event::KeyModifiers) -> KeyModifiers {
    KeyModifiers {
        shift: m.contains(crossterm::event::KeyModifiers::SHIFT),
        ctrl: m.contains(crossterm::event::KeyModifiers::CONTROL),
        alt: m.contains(crossterm::event::KeyModifiers::ALT),
    }
}

fn mouse_button_from_crossterm(b: crossterm::event::MouseButton) -> MouseButton {
    match b {
        crossterm::event::MouseButton::Left => MouseButton::Left,
        crossterm::event::MouseButton::Right => MouseButton::Right,
        crossterm::event::MouseButton::Middle => MouseButton::Middle,
    }
}
