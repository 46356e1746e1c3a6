use crate::color::ColorScheme;
use crate::color::Rgb;
use crate::component::Component;
use crate::component::ComponentBase;
use crate::component::Status;
use crate::geometry::Rect;
use crate::input::Event;
use crate::surface::Surface;
use crate::surface::TextAlign;

/// Static label, centered in its rectangle.
#[derive(Clone, Debug)]
pub struct Text {
    base: ComponentBase,
    pub text: String,
    pub align: TextAlign,
}

impl Text {
    pub fn new(rect: Rect, text: impl Into<String>, color: Rgb) -> Self {
        Self {
            base: ComponentBase::new(rect, ColorScheme::new(&[0, 0, color])),
            text: text.into(),
            align: TextAlign::CENTER,
        }
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }
}

impl Component for Text {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn handle_event(&mut self, _event: &Event) -> Status {
        Status::Ignored
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if !self.base.is_visible() {
            return;
        }
        surface.draw_text(
            self.base.rect(),
            &self.text,
            self.base.colors().text(),
            self.align,
        );
    }
}
