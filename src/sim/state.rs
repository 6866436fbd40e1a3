//! Entity models and the scene that owns them
//!
//! Entities are plain data; all behaviour lives in `tick` and `renderer`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

/// An opaque grayscale swatch used for planets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gray(pub u8);

/// Planet palette (#333333 .. #cccccc)
pub const PLANET_GRAYS: [Gray; 6] = [
    Gray(0x33),
    Gray(0x55),
    Gray(0x77),
    Gray(0x99),
    Gray(0xaa),
    Gray(0xcc),
];

/// A glowing dot riding an orbit
#[derive(Debug, Clone)]
pub struct Planet {
    /// Fixed angular offset within the orbit (radians)
    pub angle: f64,
    pub size: f32,
    pub color: Gray,
}

/// A fixed-radius ring rotating about the canvas center
#[derive(Debug, Clone)]
pub struct Orbit {
    pub radius: f32,
    /// Radians per frame
    pub speed: f64,
    /// Accumulated rotation; only ever used through sin/cos
    pub angle: f64,
    pub planets: Vec<Planet>,
}

/// Looping opacity/radius easing for a particle (ping-pong, sine in-out)
#[derive(Debug, Clone, Copy)]
pub struct Breath {
    pub opacity_from: f32,
    pub opacity_to: f32,
    pub radius_from: f32,
    pub radius_to: f32,
    /// One leg of the ping-pong (ms)
    pub period_ms: f64,
    /// Start offset from scene start (ms)
    pub delay_ms: f64,
}

impl Breath {
    /// Eased progress in [0, 1] at `elapsed_ms` since scene start
    pub fn progress(&self, elapsed_ms: f64) -> f32 {
        let t = elapsed_ms - self.delay_ms;
        if t <= 0.0 || self.period_ms <= 0.0 {
            return 0.0;
        }
        let legs = t / self.period_ms;
        let leg = legs.floor();
        let mut x = legs - leg;
        if leg as u64 % 2 == 1 {
            x = 1.0 - x;
        }
        // easeInOutSine
        (-((std::f64::consts::PI * x).cos() - 1.0) / 2.0) as f32
    }
}

/// A free-floating dot with pointer repulsion and edge bounce
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub radius: f32,
    pub vel: Vec2,
    /// Always within [0, 1]
    pub opacity: f32,
    pub breath: Breath,
}

/// A twinkling background dot
#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
    /// Clamped to [STAR_MIN_OPACITY, STAR_MAX_OPACITY]
    pub opacity: f32,
    pub twinkle_speed: f32,
}

/// A short-lived streak with a fading tail
#[derive(Debug, Clone)]
pub struct ShootingStar {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Tail length as a multiple of the velocity vector
    pub length: f32,
    pub opacity: f32,
    /// Frames lived so far
    pub lifetime: u32,
    pub max_lifetime: u32,
}

impl ShootingStar {
    /// Still visible (removal happens once this is false)
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.opacity > 0.0
    }
}

/// A falling, swinging flake on the overlay layer
#[derive(Debug, Clone)]
pub struct Snowflake {
    pub pos: Vec2,
    pub radius: f32,
    pub fall_speed: f32,
    pub wind: f32,
    pub opacity: f32,
    pub swing: f32,
    pub swing_speed: f32,
}

/// Every entity collection, exclusively owned by the controller
#[derive(Debug, Clone)]
pub struct SceneState {
    /// Canvas size in px
    pub size: Vec2,
    pub orbits: Vec<Orbit>,
    pub particles: Vec<Particle>,
    pub stars: Vec<Star>,
    pub shooting_stars: Vec<ShootingStar>,
    pub snowflakes: Vec<Snowflake>,
    /// Wall-clock time at population (ms)
    pub started_ms: f64,
    /// Update passes run so far
    pub frame: u64,
    pub rng: Pcg32,
}

impl SceneState {
    /// Create an empty scene; see `factory::populate` for a filled one
    pub fn new(width: f32, height: f32, seed: u64, started_ms: f64) -> Self {
        Self {
            size: Vec2::new(width.max(0.0), height.max(0.0)),
            orbits: Vec::new(),
            particles: Vec::new(),
            stars: Vec::new(),
            shooting_stars: Vec::new(),
            snowflakes: Vec::new(),
            started_ms,
            frame: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Orbit system center
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.size / 2.0
    }

    /// Update the canvas size; entities keep their positions
    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width.max(0.0), height.max(0.0));
    }

    pub fn planet_count(&self) -> usize {
        self.orbits.iter().map(|o| o.planets.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breath() -> Breath {
        Breath {
            opacity_from: 0.2,
            opacity_to: 0.6,
            radius_from: 1.0,
            radius_to: 2.0,
            period_ms: 2000.0,
            delay_ms: 100.0,
        }
    }

    #[test]
    fn test_breath_ping_pong() {
        let b = breath();
        assert_eq!(b.progress(0.0), 0.0);
        assert_eq!(b.progress(100.0), 0.0);
        // Midway through the first leg
        assert!((b.progress(1100.0) - 0.5).abs() < 1e-5);
        // End of first leg, turning back
        assert!((b.progress(2099.0) - 1.0).abs() < 1e-3);
        // Midway back
        assert!((b.progress(3100.0) - 0.5).abs() < 1e-5);
        // Back at start
        assert!(b.progress(4100.0).abs() < 1e-5);
    }

    #[test]
    fn test_breath_zero_period() {
        let b = Breath {
            period_ms: 0.0,
            ..breath()
        };
        assert_eq!(b.progress(5000.0), 0.0);
    }

    #[test]
    fn test_scene_center_and_resize() {
        let mut scene = SceneState::new(800.0, 600.0, 7, 0.0);
        assert_eq!(scene.center(), Vec2::new(400.0, 300.0));
        scene.resize(-5.0, 100.0);
        assert_eq!(scene.size, Vec2::new(0.0, 100.0));
    }
}
