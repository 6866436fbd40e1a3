//! Colors and theme selection
//!
//! Theme only ever changes colors, never geometry or timing.


use crate::sim::Gray;

/// Page color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark { Theme::Dark } else { Theme::Light }
    }

    pub fn is_dark(&self) -> bool {
        *self == Theme::Dark
    }
}

/// An sRGB color with straight alpha in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0,
        g: 0,
        b: 0,
        a: 0.0,
    };
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Same color at a new alpha; out-of-range or NaN alpha is clamped
    pub fn alpha(self, a: f32) -> Self {
        let a = if a.is_nan() { 0.0 } else { a.clamp(0.0, 1.0) };
        Self { a, ..self }
    }

    /// CSS `rgba()` string for canvas styles
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl From<Gray> for Rgba {
    fn from(gray: Gray) -> Self {
        Rgba::rgb(gray.0, gray.0, gray.0)
    }
}

/// Near-black used for light-theme strokes
const INK: Rgba = Rgba::rgb(7, 7, 7);

/// Orbit ring and glow base color
pub fn orbit_color(theme: Theme) -> Rgba {
    match theme {
        Theme::Dark => Rgba::WHITE,
        Theme::Light => INK,
    }
}

pub fn particle_color(theme: Theme) -> Rgba {
    match theme {
        Theme::Dark => Rgba::rgb(223, 233, 255),
        Theme::Light => INK,
    }
}

pub fn link_color(theme: Theme) -> Rgba {
    match theme {
        Theme::Dark => Rgba::WHITE,
        Theme::Light => INK,
    }
}

/// Star fill at the star's current opacity (halved on light backgrounds)
pub fn star_color(theme: Theme, opacity: f32) -> Rgba {
    match theme {
        Theme::Dark => Rgba::WHITE.alpha(opacity),
        Theme::Light => Rgba::rgb(150, 150, 150).alpha(opacity * 0.5),
    }
}

pub fn shooting_star_color(theme: Theme) -> Rgba {
    match theme {
        Theme::Dark => Rgba::WHITE,
        Theme::Light => Rgba::rgb(200, 200, 200),
    }
}

/// Snow stays legible on both backgrounds
pub fn snow_color(theme: Theme) -> Rgba {
    match theme {
        Theme::Dark => Rgba::WHITE,
        Theme::Light => Rgba::rgb(170, 185, 205),
    }
}
