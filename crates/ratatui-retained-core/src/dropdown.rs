//! Editable, reorderable list behind a trigger.
//!
//! User rows are wrapped in a [`ListRow`] that adds optional move/delete buttons and tracks the
//! row's position. The buttons do not call back into the list: they leave a [`RowIntent`] on the
//! row, and [`Dropdown`] applies pending intents once the event has been routed.

use bitflags::bitflags;
use tracing::debug;

use crate::button::Button;
use crate::color::ColorMap;
use crate::color::ColorScheme;
use crate::component::Component;
use crate::component::ComponentBase;
use crate::component::Status;
use crate::expandable::ExpandDir;
use crate::expandable::Expandable;
use crate::geometry::Rect;
use crate::input::Event;
use crate::scroll::ScrollPanel;
use crate::scroll::stacked_height;
use crate::surface::Surface;
use crate::surface::SurfaceContext;

pub const BUTTON_WIDTH: i32 = 3;
pub const BUTTON_HEIGHT: i32 = 1;
pub const BUTTON_GAP: i32 = 1;

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct DropdownFlags: u8 {
        /// "+" button in the last popup row, backed by the row factory.
        const ADD = 1 << 0;
        /// Per-row delete button.
        const DELETE = 1 << 1;
        /// Per-row move-up/move-down buttons.
        const SWAP = 1 << 2;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapDir {
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowIntent {
    RemoveRequested(usize),
    SwapRequested(usize, SwapDir),
}

pub struct ListRow<R: Component = Box<dyn Component>> {
    base: ComponentBase,
    content: R,
    index: usize,
    up: Option<Button>,
    down: Option<Button>,
    del: Option<Button>,
    intent: Option<RowIntent>,
}

impl<R: Component> ListRow<R> {
    fn new(content: R, index: usize, flags: DropdownFlags, colors: &ColorScheme) -> Self {
        let r = content.rect();
        let by = r.y + (r.h - BUTTON_HEIGHT) / 2;
        let button = |x: i32, label: &str| {
            Button::new(
                Rect::new(x, by, BUTTON_WIDTH, BUTTON_HEIGHT),
                label,
                colors.clone(),
            )
        };
        let up_x = r.right() + BUTTON_GAP;
        let down_x = up_x + BUTTON_WIDTH + BUTTON_GAP;
        let del_x = r.right() + 2 * BUTTON_WIDTH + 3 * BUTTON_GAP;
        let swap = flags.contains(DropdownFlags::SWAP);
        Self {
            base: ComponentBase::new(
                Rect::new(r.x, r.y, decorated_width(r.w), r.h),
                colors.clone(),
            ),
            up: swap.then(|| button(up_x, "▲")),
            down: swap.then(|| button(down_x, "▼")),
            del: flags
                .contains(DropdownFlags::DELETE)
                .then(|| button(del_x, "x")),
            content,
            index,
            intent: None,
        }
    }

    /// Position in the list.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn content(&self) -> &R {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut R {
        &mut self.content
    }

    fn buttons_mut(&mut self) -> impl Iterator<Item = &mut Button> {
        [&mut self.up, &mut self.down, &mut self.del]
            .into_iter()
            .filter_map(Option::as_mut)
    }
}

impl<R: Component> Component for ListRow<R> {
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
        let mut status = self.content.handle_event(event);
        if status.is_handled() {
            return status;
        }
        let index = self.index;
        let controls = [
            (&mut self.up, RowIntent::SwapRequested(index, SwapDir::Up)),
            (&mut self.down, RowIntent::SwapRequested(index, SwapDir::Down)),
            (&mut self.del, RowIntent::RemoveRequested(index)),
        ];
        for (slot, intent) in controls {
            let Some(button) = slot.as_mut() else {
                continue;
            };
            status = status.strongest(button.handle_event(event));
            if button.take_clicked() {
                self.intent = Some(intent);
            }
        }
        status
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if !self.base.is_visible() {
            return;
        }
        self.content.draw(surface);
        for button in [&self.up, &self.down, &self.del].into_iter().flatten() {
            button.draw(surface);
        }
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.base.translate(dx, dy);
        self.content.translate(dx, dy);
        for button in self.buttons_mut() {
            button.translate(dx, dy);
        }
    }

    fn set_window(&mut self, ctx: SurfaceContext) {
        self.base.bind(ctx);
        self.base.colors_mut().resolve(&ctx);
        self.content.set_window(ctx);
        for button in self.buttons_mut() {
            button.set_window(ctx);
        }
    }

    fn map_colors(&mut self, map: &dyn ColorMap) {
        self.base.colors_mut().resolve(map);
        self.content.map_colors(map);
        for button in self.buttons_mut() {
            button.map_colors(map);
        }
    }
}

fn decorated_width(row_w: i32) -> i32 {
    row_w + 4 * BUTTON_GAP + 3 * BUTTON_WIDTH
}

pub type RowFactory<R> = Box<dyn FnMut(usize) -> R>;

pub struct Dropdown<R: Component = Box<dyn Component>> {
    inner: Expandable<ScrollPanel<ListRow<R>>>,
    row_rect: Rect,
    flags: DropdownFlags,
    add_button: Option<Button>,
    factory: Option<RowFactory<R>>,
}

impl<R: Component> Dropdown<R> {
    /// `row_rect` gives the size every row is set to; the popup holds `num_shown` rows plus one
    /// line for the add button.
    pub fn new(
        rect: Rect,
        row_rect: Rect,
        label: impl Into<String>,
        flags: DropdownFlags,
        num_shown: usize,
        colors: ColorScheme,
        dir: ExpandDir,
    ) -> Self {
        let popup_rect = Rect::new(
            0,
            0,
            decorated_width(row_rect.w),
            stacked_height(row_rect.h, num_shown.saturating_add(1)),
        );
        let popup = ScrollPanel::with_colors(popup_rect, colors.clone(), num_shown);
        let inner = Expandable::new(rect, label, colors.clone(), popup, dir);
        let add_button = flags.contains(DropdownFlags::ADD).then(|| {
            let p = inner.popup().rect();
            let r = Rect::new(
                p.x + BUTTON_GAP,
                p.bottom() - (row_rect.h + BUTTON_HEIGHT) / 2,
                BUTTON_WIDTH,
                BUTTON_HEIGHT,
            );
            Button::new(r, "+", colors)
        });
        Self {
            inner,
            row_rect,
            flags,
            add_button,
            factory: None,
        }
    }

    pub fn flags(&self) -> DropdownFlags {
        self.flags
    }

    /// Builds a row from the current row count when the add button is clicked.
    pub fn set_factory(&mut self, f: impl FnMut(usize) -> R + 'static) {
        self.factory = Some(Box::new(f));
    }

    pub fn with_factory(mut self, f: impl FnMut(usize) -> R + 'static) -> Self {
        self.set_factory(f);
        self
    }

    pub fn len(&self) -> usize {
        self.inner.popup().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.popup().is_empty()
    }

    pub fn rows(&self) -> &[ListRow<R>] {
        self.inner.popup().children()
    }

    pub fn row(&self, index: usize) -> Option<&R> {
        self.inner.popup().get(index).map(ListRow::content)
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut R> {
        self.inner.popup_mut().get_mut(index).map(ListRow::content_mut)
    }

    pub fn is_expanded(&self) -> bool {
        self.inner.is_expanded()
    }

    pub fn set_expanded(&mut self, expanded: bool) {
        self.inner.set_expanded(expanded);
    }

    /// Sizes `row` to the row rectangle, decorates it and appends it.
    pub fn add_row(&mut self, mut row: R) -> &mut R {
        row.set_dims(self.row_rect.w, self.row_rect.h);
        let index = self.len();
        let colors = self.inner.colors().clone();
        let decorated = ListRow::new(row, index, self.flags, &colors);
        debug!(index, "dropdown row added");
        &mut self.inner.popup_mut().add_component(decorated).content
    }

    /// Removes the row at `index` and renumbers the rows after it.
    pub fn remove_at(&mut self, index: usize) -> Option<R> {
        let popup = self.inner.popup_mut();
        let removed = popup.remove(index)?;
        for (i, row) in popup.children_mut().iter_mut().enumerate().skip(index) {
            row.index = i;
        }
        debug!(index, remaining = popup.len(), "dropdown row removed");
        Some(removed.content)
    }

    /// Exchanges two rows together with their indices; `false` if either is out of range.
    pub fn swap_rows(&mut self, a: usize, b: usize) -> bool {
        let popup = self.inner.popup_mut();
        if !popup.swap(a, b) {
            return false;
        }
        let rows = popup.children_mut();
        rows[a].index = a;
        rows[b].index = b;
        debug!(a, b, "dropdown rows swapped");
        true
    }

    fn add_from_factory(&mut self) {
        let n = self.len();
        let Some(factory) = self.factory.as_mut() else {
            return;
        };
        let row = factory(n);
        self.add_row(row);
    }

    fn apply_intents(&mut self) {
        let intents: Vec<RowIntent> = self
            .inner
            .popup_mut()
            .children_mut()
            .iter_mut()
            .filter_map(|row| row.intent.take())
            .collect();
        for intent in intents {
            match intent {
                RowIntent::RemoveRequested(i) => {
                    self.remove_at(i);
                }
                RowIntent::SwapRequested(i, SwapDir::Up) => {
                    if let Some(j) = i.checked_sub(1) {
                        self.swap_rows(i, j);
                    }
                }
                RowIntent::SwapRequested(i, SwapDir::Down) => {
                    self.swap_rows(i, i + 1);
                }
            }
        }
    }
}

impl<R: Component> Component for Dropdown<R> {
    fn base(&self) -> &ComponentBase {
        self.inner.base()
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        self.inner.base_mut()
    }

    fn handle_event(&mut self, event: &Event) -> Status {
        if !self.inner.is_visible() {
            return Status::Ignored;
        }
        if self.inner.is_expanded()
            && let Some(add) = self.add_button.as_mut()
        {
            let status = add.handle_event(event);
            if add.take_clicked() {
                self.add_from_factory();
                return Status::Handled;
            }
            if !status.is_ignored() {
                return status;
            }
        }
        let status = self.inner.handle_event(event);
        if status.is_ignored() {
            return status;
        }
        self.apply_intents();
        self.inner.popup_mut().scroll_content();
        status
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if !self.inner.is_visible() {
            return;
        }
        self.inner.draw(surface);
        if self.inner.is_expanded()
            && let Some(add) = &self.add_button
        {
            add.draw(surface);
        }
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.inner.translate(dx, dy);
        if let Some(add) = self.add_button.as_mut() {
            add.translate(dx, dy);
        }
    }

    fn set_window(&mut self, ctx: SurfaceContext) {
        self.inner.set_window(ctx);
        if let Some(add) = self.add_button.as_mut() {
            add.set_window(ctx);
        }
    }

    fn map_colors(&mut self, map: &dyn ColorMap) {
        self.inner.map_colors(map);
        if let Some(add) = self.add_button.as_mut() {
            add.map_colors(map);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::Text;

    fn row(text: &str) -> Text {
        Text::new(Rect::new(0, 0, 2, 1), text, 0xFFFFFF)
    }

    fn list(flags: DropdownFlags, names: &[&str]) -> Dropdown<Text> {
        let mut d = Dropdown::new(
            Rect::new(0, 0, 8, 1),
            Rect::new(0, 0, 6, 1),
            "items",
            flags,
            3,
            ColorScheme::default(),
            ExpandDir::Down,
        );
        for n in names {
            d.add_row(row(n));
        }
        d
    }

    fn contents(d: &Dropdown<Text>) -> Vec<(String, usize)> {
        d.rows()
            .iter()
            .map(|r| (r.content().text.clone(), r.index()))
            .collect()
    }

    fn pairs(items: &[(&str, usize)]) -> Vec<(String, usize)> {
        items.iter().map(|(s, i)| (s.to_string(), *i)).collect()
    }

    #[test]
    fn rows_are_sized_and_indexed() {
        let d = list(DropdownFlags::all(), &["A", "B"]);
        assert_eq!(d.row(1).map(|t| t.rect().w), Some(6));
        assert_eq!(d.rows()[1].rect().w, 6 + 4 + 9);
        assert_eq!(contents(&d), pairs(&[("A", 0), ("B", 1)]));
    }

    #[test]
    fn remove_and_swap_keep_indices_dense() {
        let mut d = list(DropdownFlags::all(), &["A", "B", "C"]);
        assert_eq!(d.remove_at(1).map(|t| t.text), Some("B".to_string()));
        assert_eq!(contents(&d), pairs(&[("A", 0), ("C", 1)]));
        assert!(d.swap_rows(0, 1));
        assert_eq!(contents(&d), pairs(&[("C", 0), ("A", 1)]));
        assert!(!d.swap_rows(1, 2));
        assert!(d.remove_at(5).is_none());
    }

    #[test]
    fn row_buttons_request_removal_and_moves() {
        let mut d = list(DropdownFlags::DELETE | DropdownFlags::SWAP, &["A", "B", "C"]);
        let _ = d.handle_event(&Event::click(1, 0));
        assert!(d.is_expanded());

        // delete button of the second row (popup starts at y = 1)
        assert_eq!(d.handle_event(&Event::click(16, 2)), Status::Handled);
        assert_eq!(contents(&d), pairs(&[("A", 0), ("C", 1)]));
        assert_eq!(d.row(1).map(|t| t.rect().y), Some(2));

        // move-down button of the first row
        assert_eq!(d.handle_event(&Event::click(12, 1)), Status::Handled);
        assert_eq!(contents(&d), pairs(&[("C", 0), ("A", 1)]));
        assert_eq!(d.row(0).map(|t| t.rect().y), Some(1));

        // move-up on the first row has nowhere to go
        let _ = d.handle_event(&Event::click(8, 1));
        assert_eq!(contents(&d), pairs(&[("C", 0), ("A", 1)]));
        assert!(d.is_expanded());
    }

    #[test]
    fn add_button_uses_factory_with_row_count() {
        let mut d = list(DropdownFlags::ADD, &["A"])
            .with_factory(|n| Text::new(Rect::new(0, 0, 1, 1), format!("row{n}"), 0));
        // hidden while collapsed
        assert_eq!(d.handle_event(&Event::click(2, 4)), Status::Ignored);
        assert_eq!(d.len(), 1);

        let _ = d.handle_event(&Event::click(1, 0));
        assert_eq!(d.handle_event(&Event::click(2, 4)), Status::Handled);
        assert_eq!(contents(&d), pairs(&[("A", 0), ("row1", 1)]));
        assert_eq!(d.row(1).map(|t| t.rect()), Some(Rect::new(0, 2, 6, 1)));
    }

    #[test]
    fn no_buttons_without_flags() {
        let mut d = list(DropdownFlags::empty(), &["A", "B"]);
        let _ = d.handle_event(&Event::click(1, 0));
        assert_eq!(d.handle_event(&Event::click(16, 2)), Status::Ignored);
        assert_eq!(d.len(), 2);
    }
}
