//! The component contract shared by every node of the widget tree.
//!
//! A component owns its rectangle, color scheme and visibility through a [`ComponentBase`], and
//! reacts to the input stream through [`Component::handle_event`]. The returned [`Status`] drives
//! propagation:
//!
//! - [`Status::Ignored`]: the event was irrelevant, siblings get it next.
//! - [`Status::Forwarded`]: state changed, but siblings and ancestors should still see the event.
//! - [`Status::Handled`]: the event was consumed, the enclosing container stops iterating.
//!
//! Containers treat anything but `Ignored` as "redraw needed".

use crate::color::ColorMap;
use crate::color::ColorScheme;
use crate::geometry::Point;
use crate::geometry::Rect;
use crate::input::Event;
use crate::surface::Surface;
use crate::surface::SurfaceContext;

/// Event routing result, ordered by strength: `Ignored < Forwarded < Handled`.
#[must_use]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    #[default]
    Ignored,
    Forwarded,
    Handled,
}

impl Status {
    pub fn is_ignored(self) -> bool {
        self == Status::Ignored
    }

    pub fn is_handled(self) -> bool {
        self == Status::Handled
    }

    pub fn strongest(self, other: Status) -> Status {
        self.max(other)
    }

    /// `Handled` when `changed`, `Ignored` otherwise.
    pub fn changed(changed: bool) -> Status {
        if changed {
            Status::Handled
        } else {
            Status::Ignored
        }
    }

    /// `Forwarded` on a hover enter/leave, so siblings still see the same motion.
    pub fn hover(changed: bool) -> Status {
        if changed {
            Status::Forwarded
        } else {
            Status::Ignored
        }
    }
}

#[derive(Clone, Debug)]
pub struct ComponentBase {
    rect: Rect,
    colors: ColorScheme,
    window: Option<SurfaceContext>,
    visible: bool,
    hovered: bool,
}

impl ComponentBase {
    pub fn new(rect: Rect, colors: ColorScheme) -> Self {
        Self {
            rect,
            colors,
            window: None,
            visible: true,
            hovered: false,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn set_dims(&mut self, w: i32, h: i32) {
        self.rect = self.rect.with_size(w, h);
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.rect = self.rect.translated(dx, dy);
    }

    pub fn colors(&self) -> &ColorScheme {
        &self.colors
    }

    pub fn colors_mut(&mut self) -> &mut ColorScheme {
        &mut self.colors
    }

    pub fn window(&self) -> Option<SurfaceContext> {
        self.window
    }

    pub fn bind(&mut self, ctx: SurfaceContext) {
        self.window = Some(ctx);
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn contains(&self, p: Point) -> bool {
        self.rect.contains(p)
    }

    /// Tracks pointer motion; `true` only on an enter/leave transition.
    pub fn update_hover(&mut self, event: &Event) -> bool {
        self.update_hover_in(self.rect, event)
    }

    /// Like [`ComponentBase::update_hover`], hit-testing against `area` instead of the own rect.
    pub fn update_hover_in(&mut self, area: Rect, event: &Event) -> bool {
        if let Event::MouseMove { x, y } = *event {
            let inside = area.contains(Point::new(x, y));
            if inside != self.hovered {
                self.hovered = inside;
                return true;
            }
        }
        false
    }

    /// Click count of a press inside the rectangle, 0 for anything else.
    pub fn clicked(&self, event: &Event) -> u8 {
        match event.press() {
            Some((p, clicks)) if self.contains(p) => clicks,
            _ => 0,
        }
    }

    /// Click count of a press outside the rectangle, 0 for anything else.
    pub fn clicked_outside(&self, event: &Event) -> u8 {
        match event.press() {
            Some((p, clicks)) if !self.contains(p) => clicks,
            _ => 0,
        }
    }
}

pub trait Component {
    fn base(&self) -> &ComponentBase;

    fn base_mut(&mut self) -> &mut ComponentBase;

    /// Hidden components must return [`Status::Ignored`].
    fn handle_event(&mut self, event: &Event) -> Status;

    /// Hidden components must not paint.
    fn draw(&self, surface: &mut dyn Surface);

    /// Moves the component and everything it owns by the same delta.
    fn translate(&mut self, dx: i32, dy: i32) {
        self.base_mut().translate(dx, dy);
    }

    /// Binds the surface context and resolves colors for the whole owned subtree.
    fn set_window(&mut self, ctx: SurfaceContext) {
        self.base_mut().bind(ctx);
        self.map_colors(&ctx);
    }

    fn map_colors(&mut self, map: &dyn ColorMap) {
        self.base_mut().colors_mut().resolve(map);
    }

    fn rect(&self) -> Rect {
        self.base().rect()
    }

    fn set_pos(&mut self, x: i32, y: i32) {
        let r = self.rect();
        self.translate(x.saturating_sub(r.x), y.saturating_sub(r.y));
    }

    fn set_dims(&mut self, w: i32, h: i32) {
        self.base_mut().set_dims(w, h);
    }

    fn is_visible(&self) -> bool {
        self.base().is_visible()
    }

    fn set_visible(&mut self, visible: bool) {
        self.base_mut().set_visible(visible);
    }

    fn show(&mut self) {
        self.set_visible(true);
    }

    fn hide(&mut self) {
        self.set_visible(false);
    }

    fn is_hovered(&self) -> bool {
        self.base().is_hovered()
    }

    fn colors(&self) -> &ColorScheme {
        self.base().colors()
    }

    fn window(&self) -> Option<SurfaceContext> {
        self.base().window()
    }
}

impl<C: Component + ?Sized> Component for Box<C> {
    fn base(&self) -> &ComponentBase {
        (**self).base()
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        (**self).base_mut()
    }

    fn handle_event(&mut self, event: &Event) -> Status {
        (**self).handle_event(event)
    }

    fn draw(&self, surface: &mut dyn Surface) {
        (**self).draw(surface)
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        (**self).translate(dx, dy)
    }

    fn set_window(&mut self, ctx: SurfaceContext) {
        (**self).set_window(ctx)
    }

    fn map_colors(&mut self, map: &dyn ColorMap) {
        (**self).map_colors(map)
    }

    fn set_dims(&mut self, w: i32, h: i32) {
        (**self).set_dims(w, h)
    }

    fn set_visible(&mut self, visible: bool) {
        (**self).set_visible(visible)
    }
}

/// Offers `event` to each child in order.
///
/// Stops at the first `Handled`; a `Forwarded` child does not stop iteration but upgrades the
/// overall result to `Handled`, so a state change is never dropped on the way up.
pub fn dispatch<C: Component>(children: &mut [C], event: &Event) -> Status {
    let mut seen = Status::Ignored;
    for child in children.iter_mut() {
        let status = child.handle_event(event);
        if status.is_handled() {
            return Status::Handled;
        }
        seen = seen.strongest(status);
    }
    if seen.is_ignored() {
        Status::Ignored
    } else {
        Status::Handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_strength_orders_handled_highest() {
        assert_eq!(Status::Ignored.strongest(Status::Forwarded), Status::Forwarded);
        assert_eq!(Status::Handled.strongest(Status::Forwarded), Status::Handled);
        assert!(Status::Ignored < Status::Forwarded);
    }

    #[test]
    fn hover_reports_only_transitions() {
        let mut base = ComponentBase::new(Rect::new(0, 0, 4, 2), ColorScheme::default());
        assert!(base.update_hover(&Event::MouseMove { x: 1, y: 1 }));
        assert!(!base.update_hover(&Event::MouseMove { x: 2, y: 1 }));
        assert!(base.is_hovered());
        assert!(base.update_hover(&Event::MouseMove { x: 9, y: 9 }));
        assert!(!base.update_hover(&Event::MouseMove { x: 8, y: 9 }));
        assert!(!base.update_hover(&Event::Wheel { delta_y: 1 }));
    }

    #[test]
    fn click_helpers_report_multiplicity() {
        let base = ComponentBase::new(Rect::new(0, 0, 4, 2), ColorScheme::default());
        let double = Event::MouseDown {
            x: 1,
            y: 1,
            button: crate::input::MouseButton::Left,
            clicks: 2,
        };
        assert_eq!(base.clicked(&double), 2);
        assert_eq!(base.clicked_outside(&double), 0);
        assert_eq!(base.clicked_outside(&Event::click(7, 7)), 1);
        assert_eq!(base.clicked(&Event::release(1, 1)), 0);
    }
}
