use crate::color::ColorMap;
use crate::color::ColorScheme;
use crate::color::Rgb;
use crate::component::Component;
use crate::component::ComponentBase;
use crate::component::Status;
use crate::component::dispatch;
use crate::geometry::Rect;
use crate::input::Event;
use crate::surface::Surface;
use crate::surface::SurfaceContext;

/// Container that exclusively owns an ordered list of children.
///
/// Children paint in list order, so later ones cover earlier ones where they overlap. The child
/// type defaults to a boxed trait object; composites use a concrete type to keep typed access to
/// their rows.
pub struct Panel<C: Component = Box<dyn Component>> {
    base: ComponentBase,
    children: Vec<C>,
}

impl<C: Component> Panel<C> {
    pub fn new(rect: Rect, background: Rgb, border: Rgb) -> Self {
        Self::with_colors(rect, ColorScheme::new(&[background, border]))
    }

    pub fn with_colors(rect: Rect, colors: ColorScheme) -> Self {
        Self {
            base: ComponentBase::new(rect, colors),
            children: Vec::new(),
        }
    }

    /// Appends a child; if the panel is attached, the child is bound and its colors resolved.
    pub fn add_component(&mut self, mut child: C) -> &mut C {
        if let Some(ctx) = self.base.window() {
            child.set_window(ctx);
        }
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&C> {
        self.children.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut C> {
        self.children.get_mut(index)
    }

    pub fn children(&self) -> &[C] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [C] {
        &mut self.children
    }

    pub fn remove(&mut self, index: usize) -> Option<C> {
        (index < self.children.len()).then(|| self.children.remove(index))
    }

    pub fn swap(&mut self, a: usize, b: usize) -> bool {
        if a >= self.children.len() || b >= self.children.len() {
            return false;
        }
        self.children.swap(a, b);
        true
    }

    pub fn set_colors(&mut self, colors: ColorScheme) {
        *self.base.colors_mut() = colors;
        if let Some(ctx) = self.base.window() {
            self.base.colors_mut().resolve(&ctx);
        }
    }
}

impl<C: Component> Component for Panel<C> {
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
        dispatch(&mut self.children, event)
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if !self.base.is_visible() {
            return;
        }
        let colors = self.base.colors();
        surface.fill_rect_with_border(self.base.rect(), 1, colors.background(), colors.border());
        for child in &self.children {
            child.draw(surface);
        }
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.base.translate(dx, dy);
        for child in &mut self.children {
            child.translate(dx, dy);
        }
    }

    fn set_window(&mut self, ctx: SurfaceContext) {
        self.base.bind(ctx);
        self.base.colors_mut().resolve(&ctx);
        for child in &mut self.children {
            child.set_window(ctx);
        }
    }

    fn map_colors(&mut self, map: &dyn ColorMap) {
        self.base.colors_mut().resolve(map);
        for child in &mut self.children {
            child.map_colors(map);
        }
    }
}
