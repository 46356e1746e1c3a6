//! Trigger rectangle bound to an owned popup.
//!
//! [`Expandable`] is the shared "trigger + popup" piece behind the combo box, the dropdown list
//! and the color selector. Those composites wrap it rather than specialize it: the popup type is
//! a parameter, and the [`Popup`] hook lets the popup react to being opened or closed.

use tracing::debug;

use crate::color::ColorMap;
use crate::color::ColorScheme;
use crate::component::Component;
use crate::component::ComponentBase;
use crate::component::Status;
use crate::geometry::Point;
use crate::geometry::Rect;
use crate::input::Event;
use crate::panel::Panel;
use crate::scroll::ScrollPanel;
use crate::surface::Surface;
use crate::surface::SurfaceContext;
use crate::surface::TextAlign;

/// Where the popup opens relative to the trigger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExpandDir {
    /// Directly above.
    Up,
    /// Directly below.
    #[default]
    Down,
    /// To the left, bottom edges aligned.
    LeftUp,
    /// To the right, bottom edges aligned.
    RightUp,
    /// To the left, top edges aligned.
    LeftDown,
    /// To the right, top edges aligned.
    RightDown,
}

impl ExpandDir {
    /// Popup origin relative to the trigger origin.
    pub fn offset(self, trigger: Rect, popup: Rect) -> Point {
        match self {
            ExpandDir::Up => Point::new(0, -popup.h),
            ExpandDir::Down => Point::new(0, trigger.h),
            ExpandDir::LeftUp => Point::new(-popup.w, -(popup.h - trigger.h)),
            ExpandDir::RightUp => Point::new(trigger.w, -(popup.h - trigger.h)),
            ExpandDir::LeftDown => Point::new(-popup.w, 0),
            ExpandDir::RightDown => Point::new(trigger.w, 0),
        }
    }
}

pub trait Popup: Component {
    /// Runs after the owner showed (`true`) or hid (`false`) the popup.
    fn on_expanded(&mut self, _expanded: bool) {}
}

impl<C: Component> Popup for Panel<C> {}

impl<C: Component> Popup for ScrollPanel<C> {
    fn on_expanded(&mut self, _expanded: bool) {
        self.scroll_content();
    }
}

pub struct Expandable<P: Popup = Panel> {
    base: ComponentBase,
    label: String,
    expanded: bool,
    popup: P,
    dir: ExpandDir,
}

impl<P: Popup> Expandable<P> {
    pub fn new(
        rect: Rect,
        label: impl Into<String>,
        colors: ColorScheme,
        mut popup: P,
        dir: ExpandDir,
    ) -> Self {
        popup.hide();
        let mut this = Self {
            base: ComponentBase::new(rect, colors),
            label: label.into(),
            expanded: false,
            popup,
            dir,
        };
        this.adjust_popup();
        this
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn popup(&self) -> &P {
        &self.popup
    }

    pub fn popup_mut(&mut self) -> &mut P {
        &mut self.popup
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn set_expanded(&mut self, expanded: bool) {
        if self.expanded != expanded {
            debug!(expanded, label = %self.label, "popup toggled");
        }
        self.expanded = expanded;
        self.popup.set_visible(expanded);
        self.popup.on_expanded(expanded);
    }

    pub fn toggle_expanded(&mut self) {
        self.set_expanded(!self.expanded);
    }

    pub fn expand_dir(&self) -> ExpandDir {
        self.dir
    }

    pub fn set_expand_dir(&mut self, dir: ExpandDir) {
        self.dir = dir;
        self.adjust_popup();
    }

    /// Paints the trigger box with `label`, highlighted while hovered.
    pub fn draw_trigger(&self, surface: &mut dyn Surface, label: &str) {
        let colors = self.base.colors();
        let fill = if self.base.is_hovered() {
            colors.highlight()
        } else {
            colors.background()
        };
        surface.fill_rect_with_border(self.base.rect(), 0, fill, colors.border());
        surface.draw_text(self.base.rect(), label, colors.text(), TextAlign::CENTER);
    }

    fn adjust_popup(&mut self) {
        let rect = self.base.rect();
        let off = self.dir.offset(rect, self.popup.rect());
        self.popup.set_pos(rect.x + off.x, rect.y + off.y);
    }
}

impl<P: Popup> Component for Expandable<P> {
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
        let hover = Status::hover(self.base.update_hover(event));

        let inner = self.popup.handle_event(event);
        if !inner.is_ignored() {
            return inner.strongest(hover);
        }
        if self.base.clicked(event) == 1 {
            self.toggle_expanded();
            return Status::Forwarded;
        }
        if self.expanded
            && let Some((p, _)) = event.press()
            && !self.popup.rect().contains(p)
        {
            self.set_expanded(false);
            return Status::Forwarded;
        }
        hover
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if !self.base.is_visible() {
            return;
        }
        self.draw_trigger(surface, &self.label);
        self.popup.draw(surface);
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.base.translate(dx, dy);
        self.popup.translate(dx, dy);
    }

    fn set_window(&mut self, ctx: SurfaceContext) {
        self.base.bind(ctx);
        self.base.colors_mut().resolve(&ctx);
        self.popup.set_window(ctx);
    }

    fn map_colors(&mut self, map: &dyn ColorMap) {
        self.base.colors_mut().resolve(map);
        self.popup.map_colors(map);
    }
}
