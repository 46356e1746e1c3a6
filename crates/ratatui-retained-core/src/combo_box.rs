use tracing::debug;

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
use crate::surface::TextAlign;

/// One choice in the popup; remembers which option it shows.
pub struct OptionRow {
    base: ComponentBase,
    index: usize,
    text: String,
    picked: bool,
}

impl OptionRow {
    fn new(rect: Rect, index: usize, text: String, colors: ColorScheme) -> Self {
        Self {
            base: ComponentBase::new(rect, colors),
            index,
            text,
            picked: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Component for OptionRow {
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
            self.picked = true;
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

pub type SelectionCallback = Box<dyn FnMut(usize, &str)>;

/// Single-choice list behind a trigger showing the current option.
///
/// The option list is fixed at construction and the first option starts selected. Picking a row
/// closes the popup.
pub struct ComboBox {
    inner: Expandable<ScrollPanel<OptionRow>>,
    options: Vec<String>,
    current: usize,
    on_change: Option<SelectionCallback>,
}

impl ComboBox {
    /// Rows have the trigger's size; `num_shown` of them are visible at a time.
    pub fn new<I, S>(rect: Rect, colors: ColorScheme, options: I, num_shown: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        let popup_rect = Rect::new(0, 0, rect.w, stacked_height(rect.h, num_shown));
        let mut popup = ScrollPanel::with_colors(popup_rect, colors.clone(), num_shown);
        for (i, text) in options.iter().enumerate() {
            let row = Rect::new(0, 0, rect.w, rect.h);
            popup.add_component(OptionRow::new(row, i, text.clone(), colors.clone()));
        }
        let label = options.first().cloned().unwrap_or_default();
        Self {
            inner: Expandable::new(rect, label, colors, popup, ExpandDir::Down),
            options,
            current: 0,
            on_change: None,
        }
    }

    pub fn with_expand_dir(mut self, dir: ExpandDir) -> Self {
        self.inner.set_expand_dir(dir);
        self
    }

    /// Called with the index and text of a newly picked option.
    pub fn on_change(mut self, f: impl FnMut(usize, &str) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    pub fn set_callback(&mut self, f: impl FnMut(usize, &str) + 'static) {
        self.on_change = Some(Box::new(f));
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Empty when there are no options.
    pub fn current_text(&self) -> &str {
        self.options.get(self.current).map_or("", String::as_str)
    }

    /// Selects without notifying; `false` when `index` is out of range.
    pub fn set_selection(&mut self, index: usize) -> bool {
        let Some(text) = self.options.get(index) else {
            return false;
        };
        self.current = index;
        self.inner.set_label(text.clone());
        true
    }

    pub fn is_expanded(&self) -> bool {
        self.inner.is_expanded()
    }

    pub fn set_expanded(&mut self, expanded: bool) {
        self.inner.set_expanded(expanded);
    }

    pub fn popup(&self) -> &ScrollPanel<OptionRow> {
        self.inner.popup()
    }

    fn take_picked(&mut self) -> Option<usize> {
        self.inner
            .popup_mut()
            .children_mut()
            .iter_mut()
            .find_map(|row| std::mem::take(&mut row.picked).then_some(row.index))
    }
}

impl Component for ComboBox {
    fn base(&self) -> &ComponentBase {
        self.inner.base()
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        self.inner.base_mut()
    }

    fn handle_event(&mut self, event: &Event) -> Status {
        let status = self.inner.handle_event(event);
        let Some(index) = self.take_picked() else {
            return status;
        };
        let changed = index != self.current;
        self.set_selection(index);
        self.inner.set_expanded(false);
        if changed {
            debug!(index, text = %self.current_text(), "combo box selection changed");
            if let Some(cb) = self.on_change.as_mut() {
                cb(index, self.options[index].as_str());
            }
        }
        Status::Handled
    }

    fn draw(&self, surface: &mut dyn Surface) {
        self.inner.draw(surface);
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.inner.translate(dx, dy);
    }

    fn set_window(&mut self, ctx: SurfaceContext) {
        self.inner.set_window(ctx);
    }

    fn map_colors(&mut self, map: &dyn ColorMap) {
        self.inner.map_colors(map);
    }
}
