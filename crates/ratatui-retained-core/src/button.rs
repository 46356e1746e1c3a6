use crate::color::ColorScheme;
use crate::component::Component;
use crate::component::ComponentBase;
use crate::component::Status;
use crate::geometry::Rect;
use crate::input::Event;
use crate::surface::Surface;
use crate::surface::TextAlign;

pub type ButtonCallback = Box<dyn FnMut()>;

/// Clickable label with hover highlight.
///
/// A click sets a flag the owner can drain with [`Button::take_clicked`], and runs the optional
/// callback. Owners that need to react inside their own state read the flag instead of capturing
/// themselves in the callback.
pub struct Button {
    base: ComponentBase,
    pub text: String,
    on_click: Option<ButtonCallback>,
    clicked: bool,
}

impl std::fmt::Debug for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Button")
            .field("rect", &self.base.rect())
            .field("text", &self.text)
            .field("clicked", &self.clicked)
            .finish()
    }
}

impl Button {
    pub fn new(rect: Rect, text: impl Into<String>, colors: ColorScheme) -> Self {
        Self {
            base: ComponentBase::new(rect, colors),
            text: text.into(),
            on_click: None,
            clicked: false,
        }
    }

    pub fn on_click(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    pub fn set_callback(&mut self, f: impl FnMut() + 'static) {
        self.on_click = Some(Box::new(f));
    }

    pub fn take_clicked(&mut self) -> bool {
        std::mem::take(&mut self.clicked)
    }
}

impl Component for Button {
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
        if self.base.update_hover(event) {
            return Status::Forwarded;
        }
        if self.base.clicked(event) > 0 {
            self.clicked = true;
            if let Some(cb) = self.on_click.as_mut() {
                cb();
            }
            return Status::Handled;
        }
        Status::Ignored
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if !self.base.is_visible() {
            return;
        }
        let colors = self.base.colors();
        let fill = if self.base.is_hovered() {
            colors.highlight()
        } else {
            colors.background()
        };
        surface.fill_rect_with_border(self.base.rect(), 0, fill, colors.border());
        surface.draw_text(self.base.rect(), &self.text, colors.text(), TextAlign::CENTER);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn click_sets_flag_and_runs_callback() {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let mut b = Button::new(Rect::new(0, 0, 3, 1), "+", ColorScheme::default())
            .on_click(move || counter.set(counter.get() + 1));

        assert_eq!(b.handle_event(&Event::click(5, 5)), Status::Ignored);
        assert_eq!(b.handle_event(&Event::click(1, 0)), Status::Handled);
        assert_eq!(hits.get(), 1);
        assert!(b.take_clicked());
        assert!(!b.take_clicked());
    }

    #[test]
    fn hidden_button_ignores_clicks() {
        let mut b = Button::new(Rect::new(0, 0, 3, 1), "x", ColorScheme::default());
        b.hide();
        assert_eq!(b.handle_event(&Event::click(1, 0)), Status::Ignored);
        assert!(!b.take_clicked());
    }

    #[test]
    fn hover_transitions_are_forwarded() {
        let mut b = Button::new(Rect::new(0, 0, 3, 1), "x", ColorScheme::default());
        assert_eq!(b.handle_event(&Event::MouseMove { x: 1, y: 0 }), Status::Forwarded);
        assert_eq!(b.handle_event(&Event::MouseMove { x: 2, y: 0 }), Status::Ignored);
        assert_eq!(b.handle_event(&Event::MouseMove { x: 5, y: 0 }), Status::Forwarded);
        assert!(!b.is_hovered());
    }
}
