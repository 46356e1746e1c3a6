use tracing::debug;

use crate::color::ColorMap;
use crate::color::ColorScheme;
use crate::color::Rgb;
use crate::component::Component;
use crate::component::ComponentBase;
use crate::component::Status;
use crate::component::dispatch;
use crate::error::HexColorError;
use crate::expandable::ExpandDir;
use crate::expandable::Expandable;
use crate::expandable::Popup;
use crate::geometry::Rect;
use crate::input::Event;
use crate::slider::Slider;
use crate::surface::Surface;
use crate::surface::SurfaceContext;
use crate::surface::TextAlign;
use crate::text_input::TextInput;
use crate::text_input::TextInputOptions;

const POPUP_W: i32 = 47;
const POPUP_H: i32 = 5;
const SLIDER_X: i32 = 8;
const SLIDER_W: i32 = 33;
const VALUE_X: i32 = 42;

/// Popup content: one slider per channel (red, green, blue) and a swatch.
pub struct ChannelPanel {
    base: ComponentBase,
    sliders: [Slider; 3],
}

impl ChannelPanel {
    fn new(colors: &ColorScheme) -> Self {
        let slider = |i: i32| {
            let rect = Rect::new(SLIDER_X, 1 + i, SLIDER_W, 1);
            let channel = colors
                .clone()
                .with_raw(ColorScheme::BACKGROUND, 0xFF0000 >> (8 * i));
            Slider::new(rect, 0, 255, 1, channel)
        };
        Self {
            base: ComponentBase::new(Rect::new(0, 0, POPUP_W, POPUP_H), colors.clone()),
            sliders: [slider(0), slider(1), slider(2)],
        }
    }

    pub fn sliders(&self) -> &[Slider; 3] {
        &self.sliders
    }

    pub fn color(&self) -> Rgb {
        let [r, g, b] = self.sliders.each_ref().map(|s| s.value() as Rgb);
        (r << 16) | (g << 8) | b
    }

    fn set_color(&mut self, rgb: Rgb) {
        for (i, slider) in self.sliders.iter_mut().enumerate() {
            slider.set_value(((rgb >> (16 - 8 * i)) & 0xFF) as i32);
        }
    }
}

impl Component for ChannelPanel {
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
        dispatch(&mut self.sliders, event)
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if !self.base.is_visible() {
            return;
        }
        let r = self.base.rect();
        let colors = self.base.colors();
        surface.fill_rect_with_border(r, 1, colors.background(), colors.border());
        let swatch = surface.map_color(self.color());
        surface.fill_rect(Rect::new(r.x + 2, r.y + 1, 4, 3), swatch);
        for slider in &self.sliders {
            slider.draw(surface);
            let s = slider.rect();
            surface.draw_text_at(r.x + VALUE_X, s.y, &slider.value_string(), colors.text());
        }
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.base.translate(dx, dy);
        for slider in &mut self.sliders {
            slider.translate(dx, dy);
        }
    }

    fn set_window(&mut self, ctx: SurfaceContext) {
        self.base.bind(ctx);
        self.base.colors_mut().resolve(&ctx);
        for slider in &mut self.sliders {
            slider.set_window(ctx);
        }
    }

    fn map_colors(&mut self, map: &dyn ColorMap) {
        self.base.colors_mut().resolve(map);
        for slider in &mut self.sliders {
            slider.map_colors(map);
        }
    }
}

impl Popup for ChannelPanel {
    fn on_expanded(&mut self, expanded: bool) {
        if !expanded {
            for slider in &mut self.sliders {
                slider.cancel_drag();
            }
        }
    }
}

/// 24-bit color picker.
///
/// The trigger shows the live `#RRGGBB` value and a swatch. Clicking it opens the slider popup;
/// clicking it again while open switches to a hex text field to the right of the trigger, and a
/// third click confirms the text and closes the popup.
pub struct ColorSelect {
    inner: Expandable<ChannelPanel>,
    input: TextInput,
}

impl ColorSelect {
    pub fn new(rect: Rect, colors: ColorScheme, dir: ExpandDir) -> Self {
        let popup = ChannelPanel::new(&colors);
        let input = TextInput::with_options(
            Rect::new(rect.right(), rect.y, rect.w, rect.h),
            "",
            colors.clone(),
            TextInputOptions {
                auto_hide: true,
                ..TextInputOptions::default()
            },
        );
        Self {
            inner: Expandable::new(rect, "", colors, popup, dir),
            input,
        }
    }

    pub fn color(&self) -> Rgb {
        self.inner.popup().color()
    }

    /// Uppercase `RRGGBB`, without `#`.
    pub fn hex_string(&self) -> String {
        format!("{:06X}", self.color())
    }

    pub fn set_color(&mut self, rgb: Rgb) {
        self.inner.popup_mut().set_color(rgb);
    }

    /// Parses exactly six hex digits, optionally prefixed by `#`. Nothing changes on `Err`.
    pub fn set_hex(&mut self, hex: &str) -> Result<(), HexColorError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let n = digits.chars().count();
        if n < 6 {
            return Err(HexColorError::TooShort(n));
        }
        if n > 6 {
            return Err(HexColorError::TooLong(n));
        }
        let rgb = digits.chars().try_fold(0, |acc: Rgb, c| {
            c.to_digit(16)
                .map(|d| (acc << 4) | d)
                .ok_or(HexColorError::InvalidDigit(c))
        })?;
        self.set_color(rgb);
        Ok(())
    }

    pub fn is_expanded(&self) -> bool {
        self.inner.is_expanded()
    }

    pub fn is_editing(&self) -> bool {
        self.input.is_active()
    }

    pub fn popup(&self) -> &ChannelPanel {
        self.inner.popup()
    }

    fn apply_confirmed(&mut self) {
        let Some(text) = self.input.take_confirmed() else {
            return;
        };
        if let Err(err) = self.set_hex(&text) {
            debug!(%err, text = %text, "hex color rejected");
        }
    }
}

impl Component for ColorSelect {
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
        if self.inner.base().clicked(event) > 0 {
            if self.input.is_visible() {
                self.input.deactivate();
                self.apply_confirmed();
                self.inner.toggle_expanded();
                return Status::Handled;
            }
            if self.inner.is_expanded() {
                self.input.clear();
                self.input.activate();
                return Status::Handled;
            }
        }
        let status = self.input.handle_event(event);
        self.apply_confirmed();
        if !status.is_ignored() {
            return status;
        }
        self.inner.handle_event(event)
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if !self.inner.is_visible() {
            return;
        }
        let r = self.inner.rect();
        self.inner.draw_trigger(surface, "");
        let swatch = surface.map_color(self.color());
        surface.fill_rect(Rect::new(r.x + 1, r.y + (r.h - 1) / 2, 2, 1), swatch);
        surface.draw_text(
            Rect::new(r.x + 3, r.y, r.w - 3, r.h),
            &format!("#{}", self.hex_string()),
            self.inner.colors().text(),
            TextAlign::CENTER,
        );
        self.inner.popup().draw(surface);
        self.input.draw(surface);
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.inner.translate(dx, dy);
        self.input.translate(dx, dy);
    }

    fn set_window(&mut self, ctx: SurfaceContext) {
        self.inner.set_window(ctx);
        self.input.set_window(ctx);
    }

    fn map_colors(&mut self, map: &dyn ColorMap) {
        self.inner.map_colors(map);
        self.input.map_colors(map);
    }
}
