//! Signed cell geometry.
//!
//! Components live in a signed coordinate space so popups may be anchored above or to the left
//! of their trigger without wrapping. Conversion to a ratatui [`ratatui::layout::Rect`] clips to
//! the target area.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// Axis-aligned rectangle; `w` and `h` never go below zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            x,
            y,
            w: if w < 0 { 0 } else { w },
            h: if h < 0 { 0 } else { h },
        }
    }

    pub const fn origin(self) -> Point {
        Point::new(self.x, self.y)
    }

    pub const fn right(self) -> i32 {
        self.x.saturating_add(self.w)
    }

    pub const fn bottom(self) -> i32 {
        self.y.saturating_add(self.h)
    }

    pub const fn is_empty(self) -> bool {
        self.w == 0 || self.h == 0
    }

    pub const fn contains(self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    pub const fn translated(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            w: self.w,
            h: self.h,
        }
    }

    pub const fn with_size(self, w: i32, h: i32) -> Self {
        Self::new(self.x, self.y, w, h)
    }

    pub fn intersection(self, other: Rect) -> Rect {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        Rect::new(x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0))
    }

    /// Clips to `area` and converts; `None` when nothing is left.
    pub fn clip_to(self, area: ratatui::layout::Rect) -> Option<ratatui::layout::Rect> {
        let clipped = self.intersection(Rect::from(area));
        if clipped.is_empty() {
            return None;
        }
        Some(ratatui::layout::Rect::new(
            clipped.x as u16,
            clipped.y as u16,
            clipped.w as u16,
            clipped.h as u16,
        ))
    }
}

impl From<ratatui::layout::Rect> for Rect {
    fn from(r: ratatui::layout::Rect) -> Self {
        Rect::new(
            i32::from(r.x),
            i32::from(r.y),
            i32::from(r.width),
            i32::from(r.height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_size_is_clamped() {
        let r = Rect::new(3, 4, -2, 5);
        assert_eq!(r.w, 0);
        assert!(r.is_empty());
    }

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(2, 2, 3, 1);
        assert!(r.contains(Point::new(2, 2)));
        assert!(r.contains(Point::new(4, 2)));
        assert!(!r.contains(Point::new(5, 2)));
        assert!(!r.contains(Point::new(2, 3)));
    }

    #[test]
    fn clip_handles_negative_origin() {
        let area = ratatui::layout::Rect::new(0, 0, 10, 5);
        let clipped = Rect::new(-3, -1, 5, 3).clip_to(area).unwrap();
        assert_eq!(clipped, ratatui::layout::Rect::new(0, 0, 2, 2));
        assert!(Rect::new(20, 0, 3, 3).clip_to(area).is_none());
    }

    #[test]
    fn edges_saturate_at_the_coordinate_limit() {
        let r = Rect::new(1, 1, 4, i32::MAX);
        assert_eq!(r.bottom(), i32::MAX);
        assert!(r.contains(Point::new(2, i32::MAX - 1)));
        assert_eq!(r.translated(0, i32::MAX).y, i32::MAX);
    }
}
