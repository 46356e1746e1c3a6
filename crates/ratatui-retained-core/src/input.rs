use crate::geometry::Point;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl KeyModifiers {
    pub fn none() -> Self {
        Self::default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyCode {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    Esc,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::none(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: KeyModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// One entry of the input stream delivered to the widget tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    MouseMove {
        x: i32,
        y: i32,
    },
    MouseDown {
        x: i32,
        y: i32,
        button: MouseButton,
        /// 1 for a single click, 2 for a double click, ...
        clicks: u8,
    },
    MouseUp {
        x: i32,
        y: i32,
        button: MouseButton,
    },
    /// Positive values scroll away from the user.
    Wheel {
        delta_y: i32,
    },
    /// Raw character input; only captured by an active text input.
    Text(char),
    Key(KeyEvent),
    Resize {
        width: u16,
        height: u16,
    },
    Quit,
}

impl Event {
    pub fn key(code: KeyCode) -> Self {
        Event::Key(KeyEvent::new(code))
    }

    pub fn click(x: i32, y: i32) -> Self {
        Event::MouseDown {
            x,
            y,
            button: MouseButton::Left,
            clicks: 1,
        }
    }

    pub fn release(x: i32, y: i32) -> Self {
        Event::MouseUp {
            x,
            y,
            button: MouseButton::Left,
        }
    }

    /// Pointer position for mouse events.
    pub fn position(&self) -> Option<Point> {
        match *self {
            Event::MouseMove { x, y }
            | Event::MouseDown { x, y, .. }
            | Event::MouseUp { x, y, .. } => Some(Point::new(x, y)),
            _ => None,
        }
    }

    /// Position and click count of a button press.
    pub fn press(&self) -> Option<(Point, u8)> {
        match *self {
            Event::MouseDown { x, y, clicks, .. } => Some((Point::new(x, y), clicks)),
            _ => None,
        }
    }
}
