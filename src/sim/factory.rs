//! Entity factory
//!
//! Builds the initial populations. Counts come from `Settings`; every value
//! is drawn from a fixed range so structure is deterministic while exact
//! positions are not.

use glam::Vec2;
use rand::Rng;
use std::f64::consts::TAU;

use super::state::{
    Breath, Orbit, PLANET_GRAYS, Particle, Planet, SceneState, ShootingStar, Snowflake, Star,
};
use crate::consts::*;
use crate::settings::Settings;
use crate::uniform;

/// Create a fully populated scene for a canvas of the given size
pub fn populate(
    width: f32,
    height: f32,
    settings: &Settings,
    seed: u64,
    now_ms: f64,
) -> SceneState {
    let mut scene = SceneState::new(width, height, seed, now_ms);
    let size = scene.size;
    let rng = &mut scene.rng;

    scene.orbits = (0..settings.orbit_count)
        .map(|i| create_orbit(rng, i, settings.planets_per_orbit))
        .collect();
    scene.particles = (0..settings.particle_count)
        .map(|i| create_particle(rng, size, i))
        .collect();
    scene.stars = (0..settings.star_count)
        .map(|_| create_star(rng, size))
        .collect();
    scene.snowflakes = (0..settings.effective_snowflakes())
        .map(|_| create_snowflake(rng, size))
        .collect();

    log::info!(
        "Populated {}x{} scene: {} orbits, {} planets, {} particles, {} stars, {} snowflakes",
        width,
        height,
        scene.orbits.len(),
        scene.planet_count(),
        scene.particles.len(),
        scene.stars.len(),
        scene.snowflakes.len()
    );

    scene
}

/// Orbit `index` with its planets; radius and speed grow linearly with index
pub fn create_orbit<R: Rng + ?Sized>(rng: &mut R, index: usize, planet_count: usize) -> Orbit {
    let radius = ORBIT_BASE_RADIUS + index as f32 * ORBIT_RADIUS_STEP;
    Orbit {
        radius,
        speed: ORBIT_BASE_SPEED + index as f64 * ORBIT_SPEED_STEP,
        angle: rng.random::<f64>() * TAU,
        planets: create_planets(rng, planet_count),
    }
}

/// Planets evenly spaced around an orbit
pub fn create_planets<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Planet> {
    (0..count)
        .map(|i| Planet {
            angle: TAU / count as f64 * i as f64,
            size: uniform(rng, 3.0, 7.0),
            color: PLANET_GRAYS[rng.random_range(0..PLANET_GRAYS.len())],
        })
        .collect()
}

pub fn create_particle<R: Rng + ?Sized>(rng: &mut R, size: Vec2, index: usize) -> Particle {
    let radius = uniform(rng, 1.0, 3.0);
    let opacity = uniform(rng, 0.2, 0.7);
    Particle {
        pos: Vec2::new(uniform(rng, 0.0, size.x), uniform(rng, 0.0, size.y)),
        radius,
        vel: Vec2::new(
            (rng.random::<f32>() - 0.5) * 0.5,
            (rng.random::<f32>() - 0.5) * 0.5,
        ),
        opacity,
        breath: Breath {
            opacity_from: opacity,
            opacity_to: uniform(rng, 0.2, 0.7),
            radius_from: radius,
            radius_to: radius + uniform(rng, 0.0, 2.0),
            period_ms: 2000.0 + rng.random::<f64>() * 2000.0,
            delay_ms: index as f64 * 50.0,
        },
    }
}

/// Star biased toward a band along the canvas edges
pub fn create_star<R: Rng + ?Sized>(rng: &mut R, size: Vec2) -> Star {
    Star {
        pos: edge_biased_position(rng, size, STAR_EDGE_MARGIN),
        radius: uniform(rng, 0.0, 1.5),
        opacity: uniform(rng, 0.3, 0.8),
        twinkle_speed: uniform(rng, 0.01, 0.03),
    }
}

/// Pick left/right or top/bottom, then a point within `margin` of that edge
/// and anywhere along the perpendicular axis
pub fn edge_biased_position<R: Rng + ?Sized>(rng: &mut R, size: Vec2, margin: f32) -> Vec2 {
    let near = |rng: &mut R, extent: f32| {
        let offset = uniform(rng, 0.0, margin.min(extent));
        if rng.random_bool(0.5) {
            offset
        } else {
            extent - offset
        }
    };

    if rng.random_bool(0.5) {
        let x = near(rng, size.x);
        Vec2::new(x, uniform(rng, 0.0, size.y))
    } else {
        let y = near(rng, size.y);
        Vec2::new(uniform(rng, 0.0, size.x), y)
    }
}

/// A regular shooting star entering from above the top edge
pub fn create_shooting_star<R: Rng + ?Sized>(rng: &mut R, size: Vec2) -> ShootingStar {
    ShootingStar {
        pos: Vec2::new(uniform(rng, 0.0, size.x), -50.0),
        vel: Vec2::new((rng.random::<f32>() - 0.5) * 4.0, uniform(rng, 3.0, 6.0)),
        length: uniform(rng, 15.0, 30.0),
        opacity: 1.0,
        lifetime: 0,
        max_lifetime: SHOOTING_STAR_LIFETIME,
    }
}

/// A meteor-shower member entering near the top-right corner, heading down-left
pub fn create_meteor<R: Rng + ?Sized>(rng: &mut R, size: Vec2) -> ShootingStar {
    ShootingStar {
        pos: Vec2::new(
            uniform(rng, size.x - 50.0, size.x + 50.0),
            uniform(rng, -100.0, 100.0),
        ),
        vel: Vec2::new(uniform(rng, -12.0, -8.0), uniform(rng, 6.0, 9.0)),
        length: uniform(rng, 25.0, 45.0),
        opacity: 1.0,
        lifetime: 0,
        max_lifetime: METEOR_LIFETIME,
    }
}

pub fn create_snowflake<R: Rng + ?Sized>(rng: &mut R, size: Vec2) -> Snowflake {
    Snowflake {
        pos: Vec2::new(uniform(rng, 0.0, size.x), uniform(rng, 0.0, size.y)),
        radius: uniform(rng, 1.0, 4.0),
        fall_speed: uniform(rng, 0.5, 1.5),
        wind: uniform(rng, -0.3, 0.3),
        opacity: uniform(rng, 0.4, 0.9),
        swing: rng.random::<f32>() * std::f32::consts::TAU,
        swing_speed: uniform(rng, 0.01, 0.03),
    }
}
