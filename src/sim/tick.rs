//! Per-frame update step
//!
//! Advances every entity by exactly one frame. Nothing here can fail: values
//! that could leave their valid range are clamped in place.

use glam::Vec2;

use super::state::{Orbit, Particle, Planet, SceneState, ShootingStar, Snowflake, Star};
use crate::consts::*;
use crate::settings::Settings;
use crate::{polar_to_cartesian, uniform};

/// External inputs sampled once at the start of a frame
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Wall-clock time (ms)
    pub now_ms: f64,
    /// Last known pointer position, if any was ever observed
    pub pointer: Option<Vec2>,
}

/// A line between two nearby particles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: Vec2,
    pub b: Vec2,
    pub opacity: f32,
}

/// Advance the whole scene by one frame
pub fn tick(scene: &mut SceneState, input: &FrameInput, settings: &Settings) {
    scene.frame += 1;
    let size = scene.size;

    for orbit in &mut scene.orbits {
        advance_orbit(orbit);
    }

    let pointer = input.pointer.filter(|_| settings.pointer_repulsion);
    let elapsed_ms = input.now_ms - scene.started_ms;
    for particle in &mut scene.particles {
        if settings.particle_breathing {
            breathe(particle, elapsed_ms);
        }
        if let Some(pointer) = pointer {
            repel(particle, pointer);
        }
        advance_particle(particle, size);
    }

    for star in &mut scene.stars {
        twinkle(star, input.now_ms);
    }

    for shooting_star in &mut scene.shooting_stars {
        advance_shooting_star(shooting_star);
    }
    retain_visible(&mut scene.shooting_stars);

    let rng = &mut scene.rng;
    for flake in &mut scene.snowflakes {
        if advance_snowflake(flake, size) {
            // Fell off the bottom: re-enter above the top at a random column
            flake.pos = Vec2::new(uniform(rng, 0.0, size.x), -flake.radius);
        }
    }
}

/// `angle += speed`, never wrapped
#[inline]
pub fn advance_orbit(orbit: &mut Orbit) {
    orbit.angle += orbit.speed;
}

/// Where a planet is drawn this frame
#[inline]
pub fn planet_position(center: Vec2, orbit: &Orbit, planet: &Planet) -> Vec2 {
    polar_to_cartesian(center, orbit.radius, planet.angle + orbit.angle)
}

/// Breathing size multiplier, derived from wall-clock time
#[inline]
pub fn planet_pulse(planet: &Planet, now_ms: f64) -> f32 {
    1.0 + (now_ms * PLANET_PULSE_RATE + planet.angle).sin() as f32 * PLANET_PULSE_DEPTH
}

/// Apply the particle's breathing animation
pub fn breathe(particle: &mut Particle, elapsed_ms: f64) {
    let b = particle.breath;
    let t = b.progress(elapsed_ms);
    particle.opacity = sanitize_unit(b.opacity_from + (b.opacity_to - b.opacity_from) * t);
    particle.radius = (b.radius_from + (b.radius_to - b.radius_from) * t).max(0.0);
}

/// Push a particle away from the pointer when within the repulsion radius
pub fn repel(particle: &mut Particle, pointer: Vec2) {
    let delta = particle.pos - pointer;
    let dist_sq = delta.length_squared();
    if dist_sq >= REPULSION_RADIUS * REPULSION_RADIUS {
        return;
    }
    let dist = dist_sq.sqrt();
    // Direction is undefined when exactly on the pointer
    if dist <= f32::EPSILON {
        return;
    }
    let force = (REPULSION_RADIUS - dist) / REPULSION_RADIUS;
    particle.pos += delta / dist * force * REPULSION_FORCE;
}

/// Move by velocity and bounce off the canvas edges.
///
/// A component flips only while the particle is past an edge and still
/// heading outward, so each crossing flips it exactly once.
pub fn advance_particle(particle: &mut Particle, size: Vec2) {
    particle.pos += particle.vel;

    let Vec2 { x, y } = particle.pos;
    if (x < 0.0 && particle.vel.x < 0.0) || (x > size.x && particle.vel.x > 0.0) {
        particle.vel.x = -particle.vel.x;
    }
    if (y < 0.0 && particle.vel.y < 0.0) || (y > size.y && particle.vel.y > 0.0) {
        particle.vel.y = -particle.vel.y;
    }
    particle.opacity = sanitize_unit(particle.opacity);
}

/// Sinusoid-driven bounded walk of star opacity
pub fn twinkle(star: &mut Star, now_ms: f64) {
    let step = (now_ms * star.twinkle_speed as f64).sin() as f32 * STAR_TWINKLE_STEP;
    let opacity = star.opacity + step;
    star.opacity = if opacity.is_finite() {
        opacity.clamp(STAR_MIN_OPACITY, STAR_MAX_OPACITY)
    } else {
        STAR_MIN_OPACITY
    };
}

/// Move, age and fade a shooting star
pub fn advance_shooting_star(star: &mut ShootingStar) {
    star.pos += star.vel;
    star.lifetime = star.lifetime.saturating_add(1);
    star.opacity = if star.max_lifetime == 0 {
        0.0
    } else {
        (1.0 - star.lifetime as f32 / star.max_lifetime as f32).clamp(0.0, 1.0)
    };
}

/// Drop faded shooting stars (idempotent)
pub fn retain_visible(stars: &mut Vec<ShootingStar>) {
    stars.retain(ShootingStar::is_alive);
}

/// Fall, swing and wrap horizontally. Returns true when the flake passed the
/// bottom edge and must be re-seeded at the top.
pub fn advance_snowflake(flake: &mut Snowflake, size: Vec2) -> bool {
    flake.pos.y += flake.fall_speed;
    flake.swing += flake.swing_speed;
    flake.pos.x += flake.swing.sin() * SNOW_SWING_AMPLITUDE + flake.wind;

    if flake.pos.x > size.x {
        flake.pos.x = 0.0;
    } else if flake.pos.x < 0.0 {
        flake.pos.x = size.x;
    }
    flake.opacity = sanitize_unit(flake.opacity);

    flake.pos.y > size.y
}

/// Opacity of a link between particles `distance` apart
#[inline]
pub fn link_opacity(distance: f32, max_distance: f32) -> f32 {
    if max_distance <= 0.0 {
        return 0.0;
    }
    ((1.0 - distance / max_distance) * LINK_MAX_OPACITY).clamp(0.0, LINK_MAX_OPACITY)
}

/// All particle pairs closer than `max_distance` (O(n²))
pub fn particle_links(particles: &[Particle], max_distance: f32) -> Vec<Link> {
    let max_sq = max_distance * max_distance;
    let mut links = Vec::new();
    for (i, a) in particles.iter().enumerate() {
        for b in &particles[i + 1..] {
            let dist_sq = a.pos.distance_squared(b.pos);
            if dist_sq < max_sq {
                links.push(Link {
                    a: a.pos,
                    b: b.pos,
                    opacity: link_opacity(dist_sq.sqrt(), max_distance),
                });
            }
        }
    }
    links
}

/// Links for this frame, honoring the connection toggle
pub fn frame_links(scene: &SceneState, settings: &Settings) -> Vec<Link> {
    if settings.connections {
        particle_links(&scene.particles, LINK_DISTANCE)
    } else {
        Vec::new()
    }
}

/// Clamp into [0, 1]; NaN becomes 0
#[inline]
fn sanitize_unit(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::DeviceProfile;
    use crate::sim::factory::populate;
    use crate::sim::state::Breath;
    use proptest::prelude::*;

    const SIZE: Vec2 = Vec2::new(800.0, 600.0);

    fn particle(pos: Vec2, vel: Vec2) -> Particle {
        Particle {
            pos,
            radius: 2.0,
            vel,
            opacity: 0.5,
            breath: Breath {
                opacity_from: 0.5,
                opacity_to: 0.5,
                radius_from: 2.0,
                radius_to: 2.0,
                period_ms: 3000.0,
                delay_ms: 0.0,
            },
        }
    }

    fn shooting_star(max_lifetime: u32) -> ShootingStar {
        ShootingStar {
            pos: Vec2::new(100.0, -50.0),
            vel: Vec2::new(1.0, 4.0),
            length: 20.0,
            opacity: 1.0,
            lifetime: 0,
            max_lifetime,
        }
    }

    #[test]
    fn test_orbit_angle_accumulates_exactly() {
        let mut orbit = Orbit {
            radius: 100.0,
            speed: 0.0008,
            angle: 1.0,
            planets: Vec::new(),
        };
        for _ in 0..1000 {
            let before = orbit.angle;
            advance_orbit(&mut orbit);
            assert_eq!(orbit.angle, before + orbit.speed);
            assert!(orbit.angle > before);
        }
    }

    #[test]
    fn test_planet_position_follows_orbit() {
        let orbit = Orbit {
            radius: 100.0,
            speed: 0.0,
            angle: std::f64::consts::FRAC_PI_2,
            planets: Vec::new(),
        };
        let planet = Planet {
            angle: std::f64::consts::FRAC_PI_2,
            size: 4.0,
            color: crate::sim::state::Gray(0x77),
        };
        let pos = planet_position(Vec2::new(400.0, 300.0), &orbit, &planet);
        assert!((pos.x - 300.0).abs() < 1e-3);
        assert!((pos.y - 300.0).abs() < 1e-3);

        for t in [0.0, 500.0, 1234.5, 1.7e12] {
            let pulse = planet_pulse(&planet, t);
            assert!((0.85..=1.15).contains(&pulse));
        }
    }

    #[test]
    fn test_particle_bounce_flips_once_per_crossing() {
        let mut p = particle(Vec2::new(799.9, 300.0), Vec2::new(0.25, 0.0));
        advance_particle(&mut p, SIZE);
        assert!(p.pos.x > SIZE.x);
        assert_eq!(p.vel.x, -0.25);

        // Still outside on the next frame, but heading back in: no second flip
        let mut q = particle(Vec2::new(800.3, 300.0), Vec2::new(-0.25, 0.0));
        advance_particle(&mut q, SIZE);
        assert!(q.pos.x > SIZE.x);
        assert_eq!(q.vel.x, -0.25);

        advance_particle(&mut p, SIZE);
        assert_eq!(p.vel.x, -0.25);
        assert!(p.pos.x <= SIZE.x);
    }

    #[test]
    fn test_particle_bounces_off_top() {
        let mut p = particle(Vec2::new(10.0, 0.1), Vec2::new(0.0, -0.2));
        advance_particle(&mut p, SIZE);
        assert!(p.pos.y < 0.0);
        assert_eq!(p.vel.y, 0.2);
    }

    #[test]
    fn test_repel_pushes_away_from_pointer() {
        let pointer = Vec2::new(400.0, 300.0);
        let mut p = particle(Vec2::new(450.0, 300.0), Vec2::ZERO);
        repel(&mut p, pointer);
        // force = (100 - 50) / 100 = 0.5, push = 0.5 * 2
        assert!((p.pos.x - 451.0).abs() < 1e-4);
        assert_eq!(p.pos.y, 300.0);

        let mut far = particle(Vec2::new(600.0, 300.0), Vec2::ZERO);
        repel(&mut far, pointer);
        assert_eq!(far.pos, Vec2::new(600.0, 300.0));
    }

    #[test]
    fn test_repel_on_pointer_stays_finite() {
        let mut p = particle(Vec2::new(10.0, 10.0), Vec2::ZERO);
        repel(&mut p, Vec2::new(10.0, 10.0));
        assert!(p.pos.is_finite());
        assert_eq!(p.pos, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_star_twinkle_clamped() {
        let mut star = Star {
            pos: Vec2::ZERO,
            radius: 1.0,
            opacity: 0.8,
            twinkle_speed: 0.02,
        };
        for i in 0..10_000 {
            twinkle(&mut star, i as f64 * 16.7);
            assert!((STAR_MIN_OPACITY..=STAR_MAX_OPACITY).contains(&star.opacity));
        }
        star.opacity = f32::NAN;
        twinkle(&mut star, 0.0);
        assert_eq!(star.opacity, STAR_MIN_OPACITY);
    }

    #[test]
    fn test_shooting_star_fades_out_at_max_lifetime() {
        let mut stars = vec![shooting_star(100)];
        for frame in 1..=100u32 {
            advance_shooting_star(&mut stars[0]);
            assert_eq!(stars[0].lifetime, frame);
            if frame < 100 {
                assert!(stars[0].opacity > 0.0);
            }
        }
        assert!(stars[0].opacity <= 0.0);
        assert_eq!(stars[0].pos, Vec2::new(200.0, 350.0));

        retain_visible(&mut stars);
        assert!(stars.is_empty());
        retain_visible(&mut stars);
        assert!(stars.is_empty());
    }

    #[test]
    fn test_retain_visible_idempotent() {
        let mut a = shooting_star(100);
        a.lifetime = 99;
        advance_shooting_star(&mut a);
        let mut b = shooting_star(100);
        advance_shooting_star(&mut b);
        let mut stars = vec![a, b.clone(), b];

        retain_visible(&mut stars);
        let once = stars.len();
        retain_visible(&mut stars);
        assert_eq!(once, 2);
        assert_eq!(stars.len(), once);
    }

    #[test]
    fn test_zero_lifetime_star_is_dead() {
        let mut s = shooting_star(0);
        advance_shooting_star(&mut s);
        assert!(!s.is_alive());
    }

    #[test]
    fn test_snowflake_wraps() {
        let mut flake = Snowflake {
            pos: Vec2::new(799.9, 599.5),
            radius: 2.0,
            fall_speed: 1.0,
            wind: 0.3,
            opacity: 0.7,
            swing: 0.0,
            swing_speed: 0.0,
        };
        let respawn = advance_snowflake(&mut flake, SIZE);
        assert!(respawn);
        assert_eq!(flake.pos.x, 0.0);

        flake.pos = Vec2::new(0.1, 10.0);
        flake.wind = -0.3;
        assert!(!advance_snowflake(&mut flake, SIZE));
        assert_eq!(flake.pos.x, SIZE.x);
        assert_eq!(flake.pos.y, 11.0);
    }

    #[test]
    fn test_tick_respawns_snow_at_top() {
        let mut settings = Settings::default();
        settings.snow = true;
        let mut scene = populate(800.0, 600.0, &settings, 5, 0.0);
        for flake in &mut scene.snowflakes {
            flake.pos.y = 600.0;
        }
        tick(&mut scene, &FrameInput::default(), &settings);
        for flake in &scene.snowflakes {
            assert_eq!(flake.pos.y, -flake.radius);
            assert!((0.0..=800.0).contains(&flake.pos.x));
        }
    }

    #[test]
    fn test_link_opacity_linear() {
        assert_eq!(link_opacity(150.0, 150.0), 0.0);
        assert!((link_opacity(0.0, 150.0) - 0.2).abs() < 1e-6);
        assert!((link_opacity(75.0, 150.0) - 0.1).abs() < 1e-6);
        assert!((link_opacity(30.0, 150.0) - 0.16).abs() < 1e-6);
        assert_eq!(link_opacity(400.0, 150.0), 0.0);
    }

    #[test]
    fn test_particle_links_pairs() {
        let particles = vec![
            particle(Vec2::new(0.0, 0.0), Vec2::ZERO),
            particle(Vec2::new(90.0, 0.0), Vec2::ZERO),
            particle(Vec2::new(90.0, 120.0), Vec2::ZERO),
            particle(Vec2::new(700.0, 500.0), Vec2::ZERO),
        ];
        let links = particle_links(&particles, 150.0);
        // (0,1)=90, (0,2)=150 excluded, (1,2)=120
        assert_eq!(links.len(), 2);
        assert!((links[0].opacity - (1.0 - 90.0 / 150.0) * 0.2).abs() < 1e-6);
        assert_eq!(links[1].a, Vec2::new(90.0, 0.0));
        assert_eq!(links[1].b, Vec2::new(90.0, 120.0));
    }

    #[test]
    fn test_reduced_profile_skips_links() {
        let settings = Settings::from_profile(DeviceProfile::Reduced);
        let mut scene = populate(100.0, 100.0, &settings, 1, 0.0);
        assert!(!scene.particles.is_empty());
        assert!(frame_links(&scene, &settings).is_empty());

        let full = Settings::default();
        scene.particles.truncate(2);
        // Every pair on a 100x100 canvas is within 150 px
        assert_eq!(frame_links(&scene, &full).len(), 1);
    }

    #[test]
    fn test_pointer_ignored_when_repulsion_disabled() {
        let settings = Settings::from_profile(DeviceProfile::Reduced);
        let mut scene = populate(800.0, 600.0, &settings, 2, 0.0);
        scene.particles[0].pos = Vec2::new(400.0, 300.0);
        scene.particles[0].vel = Vec2::ZERO;
        let input = FrameInput {
            now_ms: 0.0,
            pointer: Some(Vec2::new(410.0, 300.0)),
        };
        tick(&mut scene, &input, &settings);
        assert_eq!(scene.particles[0].pos, Vec2::new(400.0, 300.0));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_particle_opacity_stays_in_unit_range(
            seed in any::<u64>(),
            frames in 1usize..300,
            px in -100.0f32..900.0,
            py in -100.0f32..700.0,
        ) {
            let settings = Settings::default();
            let mut scene = populate(800.0, 600.0, &settings, seed, 0.0);
            for f in 0..frames {
                let input = FrameInput {
                    now_ms: f as f64 * 16.7,
                    pointer: Some(Vec2::new(px, py)),
                };
                tick(&mut scene, &input, &settings);
                for p in &scene.particles {
                    prop_assert!((0.0..=1.0).contains(&p.opacity));
                    prop_assert!(p.pos.is_finite());
                }
            }
        }

        #[test]
        fn prop_star_opacity_stays_in_band(
            seed in any::<u64>(),
            frames in 1usize..500,
            start_ms in 0.0f64..2.0e12,
        ) {
            let settings = Settings::default();
            let mut scene = populate(800.0, 600.0, &settings, seed, start_ms);
            for f in 0..frames {
                let input = FrameInput { now_ms: start_ms + f as f64 * 16.7, pointer: None };
                tick(&mut scene, &input, &settings);
                for s in &scene.stars {
                    prop_assert!((STAR_MIN_OPACITY..=STAR_MAX_OPACITY).contains(&s.opacity));
                }
            }
        }

        #[test]
        fn prop_link_opacity_linear(d in 0.0f32..150.0) {
            let expected = (1.0 - d / 150.0) * 0.2;
            prop_assert!((link_opacity(d, 150.0) - expected).abs() < 1e-6);
        }
    }
}
