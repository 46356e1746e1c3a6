use tracing::debug;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::color::ColorScheme;
use crate::component::Component;
use crate::component::ComponentBase;
use crate::component::Status;
use crate::geometry::Rect;
use crate::input::Event;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::keymap;
use crate::surface::Surface;
use crate::surface::TextAlign;

#[derive(Clone, Debug)]
pub struct TextInputOptions {
    /// Hidden while inactive; shown by [`TextInput::activate`].
    pub auto_hide: bool,
    pub confirm_keys: Vec<KeyEvent>,
}

impl Default for TextInputOptions {
    fn default() -> Self {
        Self {
            auto_hide: false,
            confirm_keys: vec![keymap::key(KeyCode::Enter)],
        }
    }
}

pub type ConfirmCallback = Box<dyn FnMut(&str)>;

/// Single-line editor with a caret.
///
/// Inactive inputs only react to a click, which activates them. Active inputs capture
/// [`Event::Text`] and editing keys; a confirm key or a press outside deactivates and confirms.
/// The caret is a char index in `0..=len`.
pub struct TextInput {
    base: ComponentBase,
    text: String,
    caret: usize,
    active: bool,
    options: TextInputOptions,
    confirmed: Option<String>,
    on_confirm: Option<ConfirmCallback>,
}

impl TextInput {
    pub fn new(rect: Rect, text: impl Into<String>, colors: ColorScheme) -> Self {
        Self::with_options(rect, text, colors, TextInputOptions::default())
    }

    pub fn with_options(
        rect: Rect,
        text: impl Into<String>,
        colors: ColorScheme,
        options: TextInputOptions,
    ) -> Self {
        let mut base = ComponentBase::new(rect, colors);
        base.set_visible(!options.auto_hide);
        let text = text.into();
        Self {
            base,
            caret: text.chars().count(),
            text,
            active: false,
            options,
            confirmed: None,
            on_confirm: None,
        }
    }

    pub fn on_confirm(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_confirm = Some(Box::new(f));
        self
    }

    pub fn set_callback(&mut self, f: impl FnMut(&str) + 'static) {
        self.on_confirm = Some(Box::new(f));
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the content and moves the caret to the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.caret = self.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.caret = 0;
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Length in chars.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn activate(&mut self) {
        self.active = true;
        if self.options.auto_hide {
            self.base.set_visible(true);
        }
    }

    /// Leaves edit mode and confirms the current text.
    pub fn deactivate(&mut self) {
        self.active = false;
        if self.options.auto_hide {
            self.base.set_visible(false);
        }
        debug!(text = %self.text, "text input confirmed");
        if let Some(cb) = self.on_confirm.as_mut() {
            cb(&self.text);
        }
        self.confirmed = Some(self.text.clone());
    }

    /// Text of the last confirmation, if not taken yet.
    pub fn take_confirmed(&mut self) -> Option<String> {
        self.confirmed.take()
    }

    /// Inserts `ch` before char `index`; `false` (no change) when `index > len`.
    pub fn insert_char(&mut self, ch: char, index: usize) -> bool {
        if index > self.len() {
            return false;
        }
        let at = byte_index_from_char_index(&self.text, index);
        self.text.insert(at, ch);
        true
    }

    /// Removes the char at `index`; `false` (no change) when `index >= len`.
    pub fn delete_char(&mut self, index: usize) -> bool {
        if index >= self.len() {
            return false;
        }
        let start = byte_index_from_char_index(&self.text, index);
        let end = byte_index_from_char_index(&self.text, index + 1);
        self.text.replace_range(start..end, "");
        true
    }

    fn text_area(&self) -> Rect {
        let r = self.base.rect();
        Rect::new(r.x + 1, r.y, r.w - 1, r.h)
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if keymap::matches_any(&self.options.confirm_keys, key) {
            self.deactivate();
            return true;
        }
        match key.code {
            KeyCode::Left => self.caret = self.caret.saturating_sub(1),
            KeyCode::Right => self.caret = (self.caret + 1).min(self.len()),
            KeyCode::Home => self.caret = 0,
            KeyCode::End => self.caret = self.len(),
            KeyCode::Delete => {
                self.delete_char(self.caret);
            }
            KeyCode::Backspace => {
                if self.caret > 0 {
                    self.caret -= 1;
                    self.delete_char(self.caret);
                }
            }
            _ => return false,
        }
        true
    }
}

impl Component for TextInput {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn handle_event(&mut self, event: &Event) -> Status {
        if !self.base.is_visible() {
            return Status::Ignored;
        }
        if !self.active {
            if self.base.clicked(event) > 0 {
                self.activate();
                return Status::Handled;
            }
            return Status::Ignored;
        }
        if self.base.clicked_outside(event) > 0 {
            // the outside press stays available to the enclosing widget
            self.deactivate();
            return Status::Ignored;
        }
        match event {
            Event::MouseDown { x, .. } => {
                let col = (*x - self.text_area().x).max(0) as usize;
                self.caret = col_from_display_x(&self.text, col);
                Status::Handled
            }
            Event::Text(ch) => {
                if self.insert_char(*ch, self.caret) {
                    self.caret += 1;
                }
                Status::Handled
            }
            Event::Key(key) => Status::changed(self.handle_key(key)),
            _ => Status::Ignored,
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if !self.base.is_visible() {
            return;
        }
        let colors = self.base.colors();
        let fill = if self.active {
            colors.highlight()
        } else {
            colors.background()
        };
        let area = self.text_area();
        surface.fill_rect_with_border(self.base.rect(), 0, fill, colors.border());
        surface.draw_text(area, &self.text, colors.text(), TextAlign::LEFT);
        if !self.active {
            return;
        }

        let head = &self.text[..byte_index_from_char_index(&self.text, self.caret)];
        let cx = area.x + UnicodeWidthStr::width(head) as i32;
        let cy = area.y + (area.h - 1) / 2;
        if cx >= area.right() {
            return;
        }
        surface.fill_rect(Rect::new(cx, cy, 1, 1), colors.text());
        if let Some(ch) = self.text.chars().nth(self.caret) {
            let mut tmp = [0u8; 4];
            surface.draw_text_at(cx, cy, ch.encode_utf8(&mut tmp), fill);
        }
    }
}

fn col_from_display_x(line: &str, target_x: usize) -> usize {
    let mut cols = 0usize;
    let mut col = 0usize;
    for ch in line.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if cols + w > target_x {
            break;
        }
        cols += w;
        col += 1;
    }
    col
}

fn byte_index_from_char_index(s: &str, char_idx: usize) -> usize {
    match s.char_indices().nth(char_idx) {
        Some((i, _)) => i,
        None => s.len(),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use ratatui::buffer::Buffer;
    use ratatui::style::Color;

    use super::*;
    use crate::color::ColorDepth;
    use crate::surface::BufferSurface;
    use crate::surface::SurfaceContext;
    use crate::surface::testing::row_text;

    fn input(text: &str) -> TextInput {
        TextInput::new(Rect::new(0, 0, 12, 1), text, ColorScheme::default())
    }

    fn active(text: &str) -> TextInput {
        let mut t = input(text);
        t.activate();
        t
    }

    fn key(code: KeyCode) -> Event {
        Event::key(code)
    }

    #[test]
    fn click_activates_and_typing_inserts_at_caret() {
        let mut t = input("");
        assert_eq!(t.handle_event(&Event::Text('a')), Status::Ignored);
        assert_eq!(t.handle_event(&Event::click(3, 0)), Status::Handled);
        assert!(t.is_active());

        for ch in "acd".chars() {
            assert_eq!(t.handle_event(&Event::Text(ch)), Status::Handled);
        }
        let _ = t.handle_event(&key(KeyCode::Left));
        let _ = t.handle_event(&key(KeyCode::Left));
        let _ = t.handle_event(&Event::Text('b'));
        assert_eq!(t.text(), "abcd");
        assert_eq!(t.caret(), 2);
    }

    #[test]
    fn backspace_moves_then_deletes() {
        let mut t = active("abc");
        let _ = t.handle_event(&key(KeyCode::Backspace));
        assert_eq!((t.text(), t.caret()), ("ab", 2));
        let _ = t.handle_event(&key(KeyCode::Home));
        assert_eq!(t.handle_event(&key(KeyCode::Backspace)), Status::Handled);
        assert_eq!((t.text(), t.caret()), ("ab", 0));
        let _ = t.handle_event(&key(KeyCode::Delete));
        assert_eq!((t.text(), t.caret()), ("b", 0));
    }

    #[test]
    fn caret_stays_in_bounds() {
        let mut t = active("héllo");
        let script = [
            key(KeyCode::Right),
            key(KeyCode::Right),
            key(KeyCode::Backspace),
            key(KeyCode::Home),
            key(KeyCode::Left),
            key(KeyCode::Delete),
            key(KeyCode::Delete),
            key(KeyCode::End),
            Event::Text('x'),
            key(KeyCode::Right),
            key(KeyCode::Backspace),
            key(KeyCode::Backspace),
            key(KeyCode::Backspace),
            key(KeyCode::Backspace),
            key(KeyCode::Backspace),
            key(KeyCode::Left),
        ];
        for ev in script {
            let _ = t.handle_event(&ev);
            assert!(t.caret() <= t.len(), "{} > {}", t.caret(), t.len());
        }
        assert_eq!(t.caret(), 0);
    }

    #[test]
    fn insert_and_delete_respect_index_bounds() {
        let mut t = input("héllo");
        assert!(t.insert_char('_', 2));
        assert_eq!(t.text(), "hé_llo");
        assert!(!t.insert_char('_', 7));
        assert!(!t.delete_char(6));
        assert_eq!(t.text(), "hé_llo");
        assert!(t.delete_char(1));
        assert_eq!(t.text(), "h_llo");
    }

    #[test]
    fn enter_confirms_and_deactivates() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut t = active("42").on_confirm(move |s| sink.borrow_mut().push(s.to_string()));
        assert_eq!(t.handle_event(&key(KeyCode::Enter)), Status::Handled);
        assert!(!t.is_active());
        assert_eq!(t.take_confirmed().as_deref(), Some("42"));
        assert_eq!(t.take_confirmed(), None);
        assert_eq!(*seen.borrow(), vec!["42".to_string()]);
        assert_eq!(t.handle_event(&Event::Text('x')), Status::Ignored);
    }

    #[test]
    fn outside_press_deactivates_without_consuming() {
        let mut t = active("ab");
        assert_eq!(t.handle_event(&Event::click(30, 4)), Status::Ignored);
        assert!(!t.is_active());
        assert_eq!(t.take_confirmed().as_deref(), Some("ab"));
    }

    #[test]
    fn unrelated_keys_are_ignored() {
        let mut t = active("ab");
        assert_eq!(t.handle_event(&key(KeyCode::Tab)), Status::Ignored);
        assert!(t.is_active());
    }

    #[test]
    fn click_positions_caret_while_active() {
        let mut t = active("a界b");
        let _ = t.handle_event(&Event::click(3, 0));
        assert_eq!(t.caret(), 1);
        let _ = t.handle_event(&Event::click(4, 0));
        assert_eq!(t.caret(), 2);
        let _ = t.handle_event(&Event::click(11, 0));
        assert_eq!(t.caret(), 3);
    }

    #[test]
    fn auto_hide_follows_activation() {
        let mut t = TextInput::with_options(
            Rect::new(0, 0, 8, 1),
            "",
            ColorScheme::default(),
            TextInputOptions {
                auto_hide: true,
                ..TextInputOptions::default()
            },
        );
        assert!(!t.is_visible());
        assert_eq!(t.handle_event(&Event::click(1, 0)), Status::Ignored);
        t.activate();
        assert!(t.is_visible());
        t.deactivate();
        assert!(!t.is_visible());
    }

    #[test]
    fn draws_text_and_caret() {
        let mut t = active("abc");
        t.set_window(SurfaceContext::new(ColorDepth::TrueColor));
        *t.base_mut().colors_mut() = ColorScheme::new(&[0, 0, 0xFFFFFF, 0x0000FF]);
        t.map_colors(&SurfaceContext::default());
        let _ = t.handle_event(&key(KeyCode::Left));

        let mut buf = Buffer::empty(ratatui::layout::Rect::new(0, 0, 12, 1));
        t.draw(&mut BufferSurface::new(&mut buf, SurfaceContext::default()));
        assert_eq!(row_text(&buf, 0), " abc");
        assert_eq!(buf[(3, 0)].bg, Color::Rgb(0xFF, 0xFF, 0xFF));
        assert_eq!(buf[(3, 0)].fg, Color::Rgb(0, 0, 0xFF));
        assert_eq!(buf[(2, 0)].bg, Color::Rgb(0, 0, 0xFF));
    }
}
