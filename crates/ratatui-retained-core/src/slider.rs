use crate::color::ColorScheme;
use crate::component::Component;
use crate::component::ComponentBase;
use crate::component::Status;
use crate::geometry::Point;
use crate::geometry::Rect;
use crate::input::Event;
use crate::surface::Surface;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SliderOptions {
    pub orientation: Orientation,
    /// Handle size along the track, in cells.
    pub handle_thickness: i32,
}

impl Default for SliderOptions {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            handle_thickness: 1,
        }
    }
}

pub type SliderCallback = Box<dyn FnMut(i32)>;

/// Draggable integer range control.
///
/// The raw value is continuous so slow drags accumulate; the observable value is quantized to
/// `min + k * step` and never leaves `[min, max]`. The handle is always placed from the quantized
/// value.
pub struct Slider {
    base: ComponentBase,
    min: i32,
    max: i32,
    step: i32,
    value: f32,
    options: SliderOptions,
    dragging: bool,
    last_pos: Point,
    last_notified: i32,
    on_change: Option<SliderCallback>,
}

impl Slider {
    pub fn new(rect: Rect, min: i32, max: i32, step: i32, colors: ColorScheme) -> Self {
        Self::with_options(rect, min, max, step, colors, SliderOptions::default())
    }

    /// `max` below `min` is raised to `min`; `step` is at least 1.
    pub fn with_options(
        rect: Rect,
        min: i32,
        max: i32,
        step: i32,
        colors: ColorScheme,
        options: SliderOptions,
    ) -> Self {
        Self {
            base: ComponentBase::new(rect, colors),
            min,
            max: max.max(min),
            step: step.max(1),
            value: min as f32,
            options,
            dragging: false,
            last_pos: Point::default(),
            last_notified: min,
            on_change: None,
        }
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn step(&self) -> i32 {
        self.step
    }

    /// Quantized value.
    pub fn value(&self) -> i32 {
        let v = i64::from(self.min) + self.step_index() * i64::from(self.step);
        i32::try_from(v).unwrap_or(self.max)
    }

    pub fn value_string(&self) -> String {
        self.value().to_string()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Stops drag tracking without a release event.
    pub fn cancel_drag(&mut self) {
        self.dragging = false;
    }

    /// Clamped to `[min, max]`; does not notify.
    pub fn set_value(&mut self, value: i32) {
        self.value = value as f32;
        self.clamp_value();
    }

    pub fn set_step_index(&mut self, index: i32) {
        self.value = self.min as f32 + index as f32 * self.step as f32;
        self.clamp_value();
    }

    /// Installs the change callback and invokes it once with the current value.
    pub fn set_callback(&mut self, mut f: impl FnMut(i32) + 'static) {
        let v = self.value();
        f(v);
        self.last_notified = v;
        self.on_change = Some(Box::new(f));
    }

    pub fn on_change(mut self, f: impl FnMut(i32) + 'static) -> Self {
        self.set_callback(f);
        self
    }

    /// Rectangle of the draggable handle for the current quantized value.
    pub fn handle_rect(&self) -> Rect {
        let r = self.base.rect();
        let t = self.options.handle_thickness;
        let off = (self.step_index() as f32 * self.cells_per_step()).round() as i32;
        match self.options.orientation {
            Orientation::Horizontal => Rect::new(r.x + off, r.y, t, r.h),
            Orientation::Vertical => Rect::new(r.x, r.y + off, r.w, t),
        }
    }

    fn span(&self) -> i64 {
        i64::from(self.max) - i64::from(self.min)
    }

    fn step_index(&self) -> i64 {
        let k = ((self.value - self.min as f32) / self.step as f32).round() as i64;
        k.clamp(0, self.span() / i64::from(self.step))
    }

    fn track(&self) -> i32 {
        let r = self.base.rect();
        let len = match self.options.orientation {
            Orientation::Horizontal => r.w,
            Orientation::Vertical => r.h,
        };
        len.saturating_sub(self.options.handle_thickness)
    }

    fn cells_per_step(&self) -> f32 {
        let span = self.span();
        if span == 0 {
            return 0.0;
        }
        self.track().max(0) as f32 / span as f32 * self.step as f32
    }

    fn units_per_cell(&self) -> f32 {
        let track = self.track();
        if track <= 0 {
            return 0.0;
        }
        self.span() as f32 / track as f32
    }

    fn clamp_value(&mut self) {
        self.value = self.value.clamp(self.min as f32, self.max as f32);
    }

    fn drag_to(&mut self, p: Point) {
        let delta = match self.options.orientation {
            Orientation::Horizontal => p.x.saturating_sub(self.last_pos.x),
            Orientation::Vertical => p.y.saturating_sub(self.last_pos.y),
        };
        self.last_pos = p;
        self.value += delta as f32 * self.units_per_cell();
        self.clamp_value();
        self.notify();
    }

    fn notify(&mut self) {
        let v = self.value();
        if v == self.last_notified {
            return;
        }
        self.last_notified = v;
        if let Some(cb) = self.on_change.as_mut() {
            cb(v);
        }
    }
}

impl Component for Slider {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn set_visible(&mut self, visible: bool) {
        if !visible {
            self.cancel_drag();
        }
        self.base.set_visible(visible);
    }

    fn handle_event(&mut self, event: &Event) -> Status {
        if !self.base.is_visible() {
            return Status::Ignored;
        }
        match *event {
            Event::MouseMove { x, y } => {
                if self.dragging {
                    self.drag_to(Point::new(x, y));
                }
                let handle = self.handle_rect();
                let hover = self.base.update_hover_in(handle, event);
                if self.dragging {
                    Status::Handled
                } else {
                    Status::hover(hover)
                }
            }
            Event::MouseDown { x, y, .. } => {
                let p = Point::new(x, y);
                if !self.handle_rect().contains(p) {
                    return Status::Ignored;
                }
                self.dragging = true;
                self.last_pos = p;
                Status::Handled
            }
            Event::MouseUp { .. } => {
                if std::mem::take(&mut self.dragging) {
                    Status::Forwarded
                } else {
                    Status::Ignored
                }
            }
            _ => Status::Ignored,
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if !self.base.is_visible() {
            return;
        }
        let colors = self.base.colors();
        surface.fill_rect(self.base.rect(), colors.extra1());
        let fill = if self.base.is_hovered() || self.dragging {
            colors.highlight()
        } else {
            colors.background()
        };
        surface.fill_rect(self.handle_rect(), fill);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn slider(w: i32, min: i32, max: i32, step: i32) -> Slider {
        Slider::new(Rect::new(0, 0, w, 1), min, max, step, ColorScheme::default())
    }

    fn moved(x: i32) -> Event {
        Event::MouseMove { x, y: 0 }
    }

    #[test]
    fn dragging_snaps_handle_to_steps() {
        let mut s = slider(11, 0, 100, 10);
        assert_eq!(s.handle_event(&Event::click(0, 0)), Status::Handled);
        assert_eq!(s.handle_event(&moved(3)), Status::Handled);
        assert_eq!(s.value(), 30);
        assert_eq!(s.handle_rect(), Rect::new(3, 0, 1, 1));
        assert_eq!(s.handle_event(&Event::release(3, 0)), Status::Forwarded);
        assert!(!s.is_dragging());
        assert_eq!(s.handle_event(&moved(9)), Status::Forwarded); // hover leaves the handle
        assert_eq!(s.value(), 30);
    }

    #[test]
    fn press_outside_handle_does_not_drag() {
        let mut s = slider(11, 0, 100, 10);
        assert_eq!(s.handle_event(&Event::click(5, 0)), Status::Ignored);
        assert_eq!(s.handle_event(&Event::release(5, 0)), Status::Ignored);
        assert_eq!(s.value(), 0);
    }

    #[test]
    fn quantized_value_stays_in_range_on_steps() {
        let mut s = slider(21, 0, 10, 4);
        let _ = s.handle_event(&Event::click(0, 0));
        for x in [5, 40, -30, 7, 13, 19, 20, 100, 2] {
            let _ = s.handle_event(&moved(x));
            let v = s.value();
            assert!((0..=10).contains(&v), "{v}");
            assert_eq!(v % 4, 0, "{v}");
        }
        s.set_value(10);
        assert_eq!(s.value(), 8);
        s.set_value(-3);
        assert_eq!(s.value(), 0);
    }

    #[test]
    fn change_callback_is_edge_triggered() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut s = slider(101, 0, 10, 5).on_change(move |v| sink.borrow_mut().push(v));
        assert_eq!(*seen.borrow(), vec![0]);

        let _ = s.handle_event(&Event::click(0, 0));
        for x in 1..=20 {
            let _ = s.handle_event(&moved(x));
        }
        assert_eq!(*seen.borrow(), vec![0]);
        let _ = s.handle_event(&moved(30));
        for x in 31..=40 {
            let _ = s.handle_event(&moved(x));
        }
        assert_eq!(*seen.borrow(), vec![0, 5]);
    }

    #[test]
    fn vertical_slider_tracks_y() {
        let mut s = Slider::with_options(
            Rect::new(2, 0, 1, 6),
            0,
            5,
            1,
            ColorScheme::default(),
            SliderOptions {
                orientation: Orientation::Vertical,
                handle_thickness: 1,
            },
        );
        let _ = s.handle_event(&Event::click(2, 0));
        let _ = s.handle_event(&Event::MouseMove { x: 9, y: 4 });
        assert_eq!(s.value(), 4);
        assert_eq!(s.handle_rect(), Rect::new(2, 4, 1, 1));
    }

    #[test]
    fn translate_moves_handle() {
        let mut s = slider(11, 0, 100, 10);
        s.set_value(50);
        s.set_pos(4, 2);
        assert_eq!(s.handle_rect(), Rect::new(9, 2, 1, 1));
    }

    #[test]
    fn hiding_ends_a_drag() {
        let mut s = slider(11, 0, 100, 10);
        let _ = s.handle_event(&Event::click(0, 0));
        assert!(s.is_dragging());
        s.hide();
        assert!(!s.is_dragging());
        assert_eq!(s.handle_event(&Event::release(0, 0)), Status::Ignored);

        s.show();
        let _ = s.handle_event(&moved(5));
        assert!(!s.is_dragging());
        assert_eq!(s.value(), 0);
    }

    #[test]
    fn full_i32_range_does_not_overflow() {
        let mut s = slider(11, i32::MIN, i32::MAX, 1);
        assert_eq!(s.value(), i32::MIN);
        s.set_value(i32::MAX);
        assert_eq!(s.value(), i32::MAX);
        assert_eq!(s.handle_rect(), Rect::new(10, 0, 1, 1));

        let _ = s.handle_event(&Event::click(10, 0));
        let _ = s.handle_event(&moved(0));
        assert_eq!(s.value(), i32::MIN);
    }
}
