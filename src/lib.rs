//! Orbit Backdrop - animated portfolio background
//!
//! Core modules:
//! - `sim`: Entity models, factory, per-frame physics and spawn timers
//! - `renderer`: Theme-aware drawing onto a 2D raster surface
//! - `scheduler`: Running/Paused frame loop driver
//! - `controller`: Owner of all animation state
//! - `platform`: Pointer throttling, resize debouncing, capability probing
//! - `settings`: Device-profile driven configuration

pub mod controller;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod scheduler;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use controller::BackdropController;
pub use error::BackdropError;
pub use settings::{DeviceProfile, Settings};

use glam::Vec2;

/// Animation tuning constants
pub mod consts {
    /// Orbit radius for the innermost orbit (px)
    pub const ORBIT_BASE_RADIUS: f32 = 100.0;
    /// Radius added per orbit index (px)
    pub const ORBIT_RADIUS_STEP: f32 = 80.0;
    /// Angular speed of the innermost orbit (radians per frame)
    pub const ORBIT_BASE_SPEED: f64 = 0.0005;
    /// Angular speed added per orbit index
    pub const ORBIT_SPEED_STEP: f64 = 0.0003;

    /// Pointer repulsion radius (px)
    pub const REPULSION_RADIUS: f32 = 100.0;
    /// Maximum displacement per frame at zero distance (px)
    pub const REPULSION_FORCE: f32 = 2.0;

    /// Particles closer than this are linked (px)
    pub const LINK_DISTANCE: f32 = 150.0;
    /// Link opacity at zero distance
    pub const LINK_MAX_OPACITY: f32 = 0.2;

    /// Stars are placed within this band of an edge (px)
    pub const STAR_EDGE_MARGIN: f32 = 300.0;
    pub const STAR_MIN_OPACITY: f32 = 0.1;
    pub const STAR_MAX_OPACITY: f32 = 0.8;
    /// Per-frame twinkle step amplitude
    pub const STAR_TWINKLE_STEP: f32 = 0.01;

    /// Delay between regular shooting stars (ms, half-open)
    pub const SHOOTING_STAR_DELAY_MS: (f64, f64) = (5_000.0, 15_000.0);
    pub const SHOOTING_STAR_LIFETIME: u32 = 100;
    /// Delay between meteor showers (ms, half-open)
    pub const METEOR_SHOWER_DELAY_MS: (f64, f64) = (60_000.0, 120_000.0);
    /// Meteors per shower (half-open)
    pub const METEOR_SHOWER_COUNT: (u32, u32) = (8, 15);
    /// Spacing between meteors of one shower (ms)
    pub const METEOR_SPACING_MS: f64 = 50.0;
    pub const METEOR_LIFETIME: u32 = 120;

    /// Horizontal swing amplitude of snowflakes (px per frame)
    pub const SNOW_SWING_AMPLITUDE: f32 = 0.5;

    /// Planet size pulse: 1 + sin(now * RATE + offset) * DEPTH
    pub const PLANET_PULSE_RATE: f64 = 0.002;
    pub const PLANET_PULSE_DEPTH: f32 = 0.15;

    /// Pointer updates closer together than this are coalesced (ms)
    pub const POINTER_THROTTLE_MS: f64 = 16.0;
    /// Resize is applied this long after the last resize event (ms)
    pub const RESIZE_DEBOUNCE_MS: f64 = 150.0;

    /// Viewport width below which the reduced profile is used (px)
    pub const REDUCED_VIEWPORT_WIDTH: f64 = 768.0;
}

/// Convert polar (r, theta) around `center` to cartesian
#[inline]
pub fn polar_to_cartesian(center: Vec2, r: f32, theta: f64) -> Vec2 {
    center + Vec2::new(r * theta.cos() as f32, r * theta.sin() as f32)
}

/// Uniform sample in `[lo, hi)`; collapses to `lo` when the range is empty
#[inline]
pub fn uniform<R: rand::Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    lo + rng.random::<f32>() * (hi - lo)
}
