use ratatui::style::Color;

/// Logical color, `0xRRGGBB`.
pub type Rgb = u32;

pub const fn rgb_channels(rgb: Rgb) -> (u8, u8, u8) {
    (
        ((rgb >> 16) & 0xFF) as u8,
        ((rgb >> 8) & 0xFF) as u8,
        (rgb & 0xFF) as u8,
    )
}

/// Maps logical colors to backend-native ones.
pub trait ColorMap {
    fn map_color(&self, rgb: Rgb) -> Color;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorDepth {
    #[default]
    TrueColor,
    /// xterm 256-color palette.
    Indexed,
}

impl ColorMap for ColorDepth {
    fn map_color(&self, rgb: Rgb) -> Color {
        let (r, g, b) = rgb_channels(rgb);
        match self {
            ColorDepth::TrueColor => Color::Rgb(r, g, b),
            ColorDepth::Indexed => Color::Indexed(xterm_index(r, g, b)),
        }
    }
}

const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

fn nearest_cube_level(v: u8) -> usize {
    CUBE_LEVELS
        .iter()
        .enumerate()
        .min_by_key(|(_, l)| (i32::from(**l) - i32::from(v)).abs())
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn xterm_index(r: u8, g: u8, b: u8) -> u8 {
    let (ri, gi, bi) = (nearest_cube_level(r), nearest_cube_level(g), nearest_cube_level(b));
    let cube = (CUBE_LEVELS[ri], CUBE_LEVELS[gi], CUBE_LEVELS[bi]);

    // grayscale ramp 232..=255 covers 8..=238 in steps of 10
    let avg = (u32::from(r) + u32::from(g) + u32::from(b)) / 3;
    let gray_step = (avg.saturating_sub(8) / 10).min(23) as u8;
    let gray = 8 + gray_step * 10;

    let dist = |c: (u8, u8, u8)| {
        let d = |a: u8, b: u8| (i32::from(a) - i32::from(b)).pow(2);
        d(c.0, r) + d(c.1, g) + d(c.2, b)
    };
    if dist((gray, gray, gray)) < dist(cube) {
        232 + gray_step
    } else {
        16 + (36 * ri + 6 * gi + bi) as u8
    }
}

/// Seven logical color slots, each kept raw and resolved.
///
/// Raw values are author-specified `0xRRGGBB`. Resolved values are filled by
/// [`ColorScheme::resolve`] whenever the owning component is attached to a surface.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorScheme {
    raw: [Rgb; 7],
    resolved: [Color; 7],
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl ColorScheme {
    pub const BACKGROUND: usize = 0;
    pub const BORDER: usize = 1;
    pub const TEXT: usize = 2;
    pub const HIGHLIGHT: usize = 3;
    pub const EXTRA1: usize = 4;
    pub const EXTRA2: usize = 5;
    pub const EXTRA3: usize = 6;

    /// Slots are filled in order (background, border, text, highlight, extras); missing ones are
    /// black and anything past the seventh is ignored.
    pub fn new(colors: &[Rgb]) -> Self {
        let mut raw = [0; 7];
        for (slot, c) in raw.iter_mut().zip(colors) {
            *slot = *c;
        }
        Self {
            raw,
            resolved: [Color::Reset; 7],
        }
    }

    pub fn raw(&self, slot: usize) -> Rgb {
        self.raw.get(slot).copied().unwrap_or(0)
    }

    pub fn set_raw(&mut self, slot: usize, rgb: Rgb) {
        if let Some(s) = self.raw.get_mut(slot) {
            *s = rgb;
        }
    }

    pub fn with_raw(mut self, slot: usize, rgb: Rgb) -> Self {
        self.set_raw(slot, rgb);
        self
    }

    pub fn resolve(&mut self, map: &dyn ColorMap) {
        for (out, raw) in self.resolved.iter_mut().zip(self.raw) {
            *out = map.map_color(raw);
        }
    }

    pub fn get(&self, slot: usize) -> Color {
        self.resolved.get(slot).copied().unwrap_or(Color::Reset)
    }

    pub fn background(&self) -> Color {
        self.resolved[Self::BACKGROUND]
    }

    pub fn border(&self) -> Color {
        self.resolved[Self::BORDER]
    }

    pub fn text(&self) -> Color {
        self.resolved[Self::TEXT]
    }

    pub fn highlight(&self) -> Color {
        self.resolved[Self::HIGHLIGHT]
    }

    pub fn extra1(&self) -> Color {
        self.resolved[Self::EXTRA1]
    }

    pub fn extra2(&self) -> Color {
        self.resolved[Self::EXTRA2]
    }

    pub fn extra3(&self) -> Color {
        self.resolved[Self::EXTRA3]
    }
}
