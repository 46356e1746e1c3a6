use std::ops::Range;

use crate::color::ColorMap;
use crate::color::ColorScheme;
use crate::color::Rgb;
use crate::component::Component;
use crate::component::ComponentBase;
use crate::component::Status;
use crate::geometry::Point;
use crate::geometry::Rect;
use crate::input::Event;
use crate::panel::Panel;
use crate::surface::Surface;
use crate::surface::SurfaceContext;

/// Panel showing a window of `num_shown` consecutive children, stacked from `scroll_begin`.
///
/// Children outside the window are hidden and keep their last rectangle. The window start stays
/// within `0..=len - num_shown` (or 0 when there are fewer children than slots).
pub struct ScrollPanel<C: Component = Box<dyn Component>> {
    panel: Panel<C>,
    index: usize,
    num_shown: usize,
    scroll_begin: Point,
}

impl<C: Component> ScrollPanel<C> {
    pub fn new(rect: Rect, background: Rgb, border: Rgb, num_shown: usize) -> Self {
        Self::with_colors(rect, ColorScheme::new(&[background, border]), num_shown)
    }

    pub fn with_colors(rect: Rect, colors: ColorScheme, num_shown: usize) -> Self {
        Self {
            panel: Panel::with_colors(rect, colors),
            index: 0,
            num_shown,
            scroll_begin: rect.origin(),
        }
    }

    pub fn with_scroll_begin(mut self, begin: Point) -> Self {
        self.scroll_begin = begin;
        self.scroll_content();
        self
    }

    pub fn add_component(&mut self, child: C) -> &mut C {
        self.panel.add_component(child);
        self.scroll_content();
        let last = self.panel.len() - 1;
        &mut self.panel.children_mut()[last]
    }

    pub fn remove(&mut self, index: usize) -> Option<C> {
        let removed = self.panel.remove(index)?;
        self.index = self.index.min(self.max_index());
        self.scroll_content();
        Some(removed)
    }

    pub fn swap(&mut self, a: usize, b: usize) -> bool {
        if !self.panel.swap(a, b) {
            return false;
        }
        self.scroll_content();
        true
    }

    pub fn len(&self) -> usize {
        self.panel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panel.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&C> {
        self.panel.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut C> {
        self.panel.get_mut(index)
    }

    pub fn children(&self) -> &[C] {
        self.panel.children()
    }

    pub fn children_mut(&mut self) -> &mut [C] {
        self.panel.children_mut()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn num_shown(&self) -> usize {
        self.num_shown
    }

    pub fn visible_range(&self) -> Range<usize> {
        self.index..self.index.saturating_add(self.num_shown).min(self.panel.len())
    }

    /// Moves the window by `offset`; refuses (returns `false`) any move that would leave it out
    /// of bounds.
    pub fn scroll_by(&mut self, offset: i32) -> bool {
        let Some(next) = self.index.checked_add_signed(offset as isize) else {
            return false;
        };
        if offset == 0 || next.saturating_add(self.num_shown) > self.panel.len() {
            return false;
        }
        self.index = next;
        self.scroll_content();
        true
    }

    /// Re-applies visibility and vertical stacking for the current window.
    pub fn scroll_content(&mut self) {
        let range = self.visible_range();
        let begin = self.scroll_begin;
        let mut yoff = 0;
        for (i, child) in self.panel.children_mut().iter_mut().enumerate() {
            if range.contains(&i) {
                child.show();
                child.set_pos(begin.x, begin.y + yoff);
                yoff += child.rect().h;
            } else {
                child.hide();
            }
        }
    }

    fn max_index(&self) -> usize {
        self.panel.len().saturating_sub(self.num_shown)
    }
}

impl<C: Component> Component for ScrollPanel<C> {
    fn base(&self) -> &ComponentBase {
        self.panel.base()
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        self.panel.base_mut()
    }

    fn handle_event(&mut self, event: &Event) -> Status {
        if !self.panel.is_visible() {
            return Status::Ignored;
        }
        let status = self.panel.handle_event(event);
        if status.is_handled() {
            return status;
        }
        if let Event::Wheel { delta_y } = *event
            && self.scroll_by(-delta_y.signum())
        {
            return Status::Handled;
        }
        status
    }

    fn draw(&self, surface: &mut dyn Surface) {
        self.panel.draw(surface);
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.panel.translate(dx, dy);
        self.scroll_begin = self.scroll_begin.offset(dx, dy);
    }

    fn set_window(&mut self, ctx: SurfaceContext) {
        self.panel.set_window(ctx);
    }

    fn map_colors(&mut self, map: &dyn ColorMap) {
        self.panel.map_colors(map);
    }
}

/// Height of `rows` stacked rows of `row_h` cells, saturating at `i32::MAX`.
pub fn stacked_height(row_h: i32, rows: usize) -> i32 {
    i32::try_from(rows).unwrap_or(i32::MAX).saturating_mul(row_h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::Text;

    fn rows(n: usize, shown: usize) -> ScrollPanel<Text> {
        let mut sp = ScrollPanel::new(Rect::new(2, 1, 10, shown as i32), 0, 0, shown);
        for i in 0..n {
            sp.add_component(Text::new(Rect::new(0, 0, 10, 1), format!("row {i}"), 0xFFFFFF));
        }
        sp
    }

    fn visible(sp: &ScrollPanel<Text>) -> Vec<usize> {
        sp.children()
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_visible())
            .map(|(i, _)| i)
            .collect()
    }

    fn wheel(delta_y: i32) -> Event {
        Event::Wheel { delta_y }
    }

    #[test]
    fn window_stacks_visible_children_from_scroll_begin() {
        let sp = rows(5, 3);
        assert_eq!(visible(&sp), vec![0, 1, 2]);
        assert_eq!(sp.get(0).map(|c| c.rect().origin()), Some(Point::new(2, 1)));
        assert_eq!(sp.get(2).map(|c| c.rect().origin()), Some(Point::new(2, 3)));
    }

    #[test]
    fn wheel_down_advances_until_the_last_full_window() {
        let mut sp = rows(5, 3);
        assert_eq!(sp.handle_event(&wheel(-1)), Status::Handled);
        assert_eq!(sp.handle_event(&wheel(-3)), Status::Handled);
        assert_eq!(sp.index(), 2);
        assert_eq!(sp.handle_event(&wheel(-1)), Status::Ignored);
        assert_eq!(sp.index(), 2);
        assert_eq!(visible(&sp), vec![2, 3, 4]);
        assert_eq!(sp.get(2).map(|c| c.rect().origin()), Some(Point::new(2, 1)));
    }

    #[test]
    fn window_bounds_hold_for_any_wheel_sequence() {
        let mut sp = rows(6, 4);
        for d in [1, -1, -1, -1, -1, 1, 1, 1, 1, -1, 0, 2, -5] {
            let _ = sp.handle_event(&wheel(d));
            assert!(sp.index() + sp.num_shown() <= sp.len());
            let expected: Vec<usize> = (sp.index()..sp.index() + sp.num_shown()).collect();
            assert_eq!(visible(&sp), expected);
        }
    }

    #[test]
    fn short_lists_never_scroll() {
        let mut sp = rows(2, 4);
        assert_eq!(sp.handle_event(&wheel(-1)), Status::Ignored);
        assert_eq!(visible(&sp), vec![0, 1]);
    }

    #[test]
    fn removal_clamps_window_start() {
        let mut sp = rows(5, 3);
        assert!(sp.scroll_by(2));
        assert!(sp.remove(4).is_some());
        assert_eq!(sp.index(), 1);
        assert_eq!(visible(&sp), vec![1, 2, 3]);
        assert!(sp.remove(9).is_none());
    }

    #[test]
    fn translate_moves_scroll_origin() {
        let mut sp = rows(3, 2);
        sp.set_pos(10, 10);
        assert!(sp.scroll_by(1));
        assert_eq!(sp.get(1).map(|c| c.rect().origin()), Some(Point::new(10, 10)));
    }

    #[test]
    fn unbounded_window_shows_everything_without_overflow() {
        let mut sp: ScrollPanel<Text> = ScrollPanel::new(Rect::new(0, 0, 10, 3), 0, 0, usize::MAX);
        for i in 0..3 {
            sp.add_component(Text::new(Rect::new(0, 0, 10, 1), format!("row {i}"), 0xFFFFFF));
        }
        assert_eq!(sp.visible_range(), 0..3);
        assert_eq!(sp.handle_event(&wheel(-1)), Status::Ignored);
        assert_eq!(sp.handle_event(&wheel(1)), Status::Ignored);
        assert_eq!(visible(&sp), vec![0, 1, 2]);
    }

    #[test]
    fn stacked_height_saturates() {
        assert_eq!(stacked_height(2, 3), 6);
        assert_eq!(stacked_height(1, usize::MAX), i32::MAX);
        assert_eq!(stacked_height(3, usize::MAX / 2), i32::MAX);
    }
}
