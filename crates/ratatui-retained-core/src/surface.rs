//! Rendering capability consumed by components.
//!
//! Components only need filled and bordered rectangles, aligned text and a way to map logical
//! colors. [`BufferSurface`] provides all of it on top of a ratatui [`Buffer`].

use ratatui::buffer::Buffer;
use ratatui::style::Color;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::color::ColorDepth;
use crate::color::ColorMap;
use crate::color::Rgb;
use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextAlign {
    pub h_center: bool,
    pub v_center: bool,
}

impl TextAlign {
    pub const CENTER: TextAlign = TextAlign {
        h_center: true,
        v_center: true,
    };
    pub const LEFT: TextAlign = TextAlign {
        h_center: false,
        v_center: true,
    };
}

impl Default for TextAlign {
    fn default() -> Self {
        Self::CENTER
    }
}

/// Capabilities a component relies on while attached to a surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SurfaceContext {
    pub color_depth: ColorDepth,
}

impl SurfaceContext {
    pub fn new(color_depth: ColorDepth) -> Self {
        Self { color_depth }
    }
}

impl ColorMap for SurfaceContext {
    fn map_color(&self, rgb: Rgb) -> Color {
        self.color_depth.map_color(rgb)
    }
}

pub trait Surface {
    fn context(&self) -> SurfaceContext;

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn draw_text(&mut self, rect: Rect, text: &str, color: Color, align: TextAlign);

    fn clear(&mut self);

    fn map_color(&self, rgb: Rgb) -> Color {
        self.context().map_color(rgb)
    }

    fn fill_rect_with_border(&mut self, rect: Rect, border: i32, fill: Color, border_color: Color) {
        self.fill_rect(rect, fill);
        if border <= 0 {
            return;
        }
        let b = border.min(rect.w).min(rect.h);
        self.fill_rect(Rect::new(rect.x, rect.y, b, rect.h), border_color);
        self.fill_rect(Rect::new(rect.right() - b, rect.y, b, rect.h), border_color);
        self.fill_rect(Rect::new(rect.x, rect.y, rect.w, b), border_color);
        self.fill_rect(Rect::new(rect.x, rect.bottom() - b, rect.w, b), border_color);
    }

    fn draw_text_at(&mut self, x: i32, y: i32, text: &str, color: Color) {
        let w = UnicodeWidthStr::width(text) as i32;
        self.draw_text(
            Rect::new(x, y, w, 1),
            text,
            color,
            TextAlign {
                h_center: false,
                v_center: false,
            },
        );
    }
}

pub struct BufferSurface<'a> {
    buf: &'a mut Buffer,
    ctx: SurfaceContext,
}

impl<'a> BufferSurface<'a> {
    pub fn new(buf: &'a mut Buffer, ctx: SurfaceContext) -> Self {
        Self { buf, ctx }
    }

    pub fn buffer(&self) -> &Buffer {
        self.buf
    }
}

impl Surface for BufferSurface<'_> {
    fn context(&self) -> SurfaceContext {
        self.ctx
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(area) = rect.clip_to(self.buf.area) else {
            return;
        };
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let Some(cell) = self.buf.cell_mut((x, y)) {
                    cell.set_symbol(" ");
                    cell.set_bg(color);
                }
            }
        }
    }

    fn draw_text(&mut self, rect: Rect, text: &str, color: Color, align: TextAlign) {
        if rect.is_empty() {
            return;
        }
        let text_w = UnicodeWidthStr::width(text) as i32;
        let x = if align.h_center {
            rect.x + (rect.w - text_w).max(0) / 2
        } else {
            rect.x
        };
        let y = if align.v_center {
            rect.y + (rect.h - 1) / 2
        } else {
            rect.y
        };
        let clip = rect.intersection(Rect::from(self.buf.area));
        if y < clip.y || y >= clip.bottom() {
            return;
        }

        let mut col = x;
        let mut tmp = [0u8; 4];
        for ch in text.chars() {
            let w = UnicodeWidthChar::width(ch).unwrap_or(0) as i32;
            if w == 0 {
                continue;
            }
            if col + w > clip.right() {
                return;
            }
            if col >= clip.x {
                let s = ch.encode_utf8(&mut tmp);
                if let Some(cell) = self.buf.cell_mut((col as u16, y as u16)) {
                    cell.set_symbol(s);
                    cell.set_fg(color);
                }
                if w == 2
                    && let Some(cell) = self.buf.cell_mut((col as u16 + 1, y as u16))
                {
                    cell.set_symbol("");
                    cell.set_fg(color);
                }
            }
            col += w;
        }
    }

    fn clear(&mut self) {
        self.buf.reset();
    }
}
