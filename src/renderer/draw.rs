//! Scene drawing
//!
//! Paints every entity collection onto a `Surface`, back to front:
//! stars, shooting stars, orbits with planets, particle links, particles,
//! then snow on top (or on a separate overlay surface).

use glam::Vec2;

use super::palette::{self, Rgba, Theme};
use super::surface::{ColorStop, Paint, RenderLayer, Shadow, Surface};
use crate::sim::tick::{Link, planet_position, planet_pulse};
use crate::sim::{Orbit, Particle, Planet, SceneState, ShootingStar, Snowflake, Star};

/// Orbit ring stroke width
const ORBIT_LINE_WIDTH: f32 = 1.5;
/// Soft glow band around each orbit ring (px either side)
const ORBIT_GLOW_BAND: f32 = 15.0;
const ORBIT_GLOW_WIDTH: f32 = 3.0;
const PLANET_SHADOW_BLUR: f32 = 10.0;
const SHOOTING_STAR_WIDTH: f32 = 3.0;
const SHOOTING_STAR_GLOW: f32 = 8.0;
const SHOOTING_STAR_HEAD: f32 = 2.5;

/// Everything the renderer reads for one frame
pub struct Frame<'a> {
    pub scene: &'a SceneState,
    pub links: &'a [Link],
    pub theme: Theme,
    /// Wall-clock time for the planet pulse (ms)
    pub now_ms: f64,
}

/// Draw a full frame. The base surface is always cleared first; when an
/// overlay is given it is cleared too and receives the snow layer.
pub fn render(frame: &Frame, base: &mut dyn Surface, overlay: Option<&mut dyn Surface>) {
    let scene = frame.scene;
    let theme = frame.theme;

    base.clear();

    base.begin_layer(RenderLayer::Stars);
    for star in &scene.stars {
        draw_star(base, star, theme);
    }

    base.begin_layer(RenderLayer::ShootingStars);
    for shooting_star in scene.shooting_stars.iter().filter(|s| s.is_alive()) {
        draw_shooting_star(base, shooting_star, theme);
    }

    base.begin_layer(RenderLayer::Orbits);
    let center = scene.center();
    for orbit in &scene.orbits {
        draw_orbit(base, center, orbit, theme);
        for planet in &orbit.planets {
            draw_planet(base, center, orbit, planet, frame.now_ms);
        }
    }

    base.begin_layer(RenderLayer::Connections);
    for link in frame.links {
        draw_link(base, link, theme);
    }

    base.begin_layer(RenderLayer::Particles);
    for particle in &scene.particles {
        draw_particle(base, particle, theme);
    }

    match overlay {
        Some(overlay) => {
            overlay.clear();
            draw_snow(overlay, &scene.snowflakes, theme);
        }
        None => draw_snow(base, &scene.snowflakes, theme),
    }
}

fn draw_snow(surface: &mut dyn Surface, flakes: &[Snowflake], theme: Theme) {
    if flakes.is_empty() {
        return;
    }
    surface.begin_layer(RenderLayer::Snow);
    for flake in flakes {
        draw_snowflake(surface, flake, theme);
    }
}

/// Solid ring plus a soft gradient ring around it
pub fn draw_orbit(surface: &mut dyn Surface, center: Vec2, orbit: &Orbit, theme: Theme) {
    let base = palette::orbit_color(theme);
    surface.stroke_circle(
        center,
        orbit.radius,
        ORBIT_LINE_WIDTH,
        &Paint::Solid(base.alpha(0.25)),
    );

    let stops = [
        ColorStop::new(0.0, base.alpha(0.15)),
        ColorStop::new(1.0, base.alpha(0.0)),
    ];
    let glow = Paint::Radial {
        inner: center,
        inner_radius: (orbit.radius - ORBIT_GLOW_BAND).max(0.0),
        outer: center,
        outer_radius: orbit.radius + ORBIT_GLOW_BAND,
        stops: &stops,
    };
    surface.stroke_circle(center, orbit.radius, ORBIT_GLOW_WIDTH, &glow);
}

/// Glow halo, shadowed body and an upper-left highlight
pub fn draw_planet(
    surface: &mut dyn Surface,
    center: Vec2,
    orbit: &Orbit,
    planet: &Planet,
    now_ms: f64,
) {
    let pos = planet_position(center, orbit, planet);
    let pulse = planet_pulse(planet, now_ms);
    let color = Rgba::from(planet.color);
    let body = planet.size * pulse;
    let glow_radius = body * 3.0;

    let glow_stops = [
        ColorStop::new(0.0, color),
        ColorStop::new(0.5, color.alpha(0.5)),
        ColorStop::new(1.0, Rgba::TRANSPARENT),
    ];
    surface.fill_circle(pos, glow_radius, &Paint::radial(pos, glow_radius, &glow_stops), None);

    surface.fill_circle(
        pos,
        body,
        &Paint::Solid(color),
        Some(Shadow {
            blur: PLANET_SHADOW_BLUR,
            color,
        }),
    );

    let highlight_stops = [
        ColorStop::new(0.0, Rgba::WHITE.alpha(0.4)),
        ColorStop::new(1.0, Rgba::TRANSPARENT),
    ];
    let highlight = Paint::Radial {
        inner: pos - Vec2::splat(planet.size * 0.3),
        inner_radius: 0.0,
        outer: pos,
        outer_radius: body,
        stops: &highlight_stops,
    };
    surface.fill_circle(pos, body, &highlight, None);
}

/// Gradient disc fading to transparent at twice the radius
pub fn draw_particle(surface: &mut dyn Surface, particle: &Particle, theme: Theme) {
    let color = palette::particle_color(theme);
    let radius = particle.radius * 2.0;
    let stops = [
        ColorStop::new(0.0, color.alpha(particle.opacity)),
        ColorStop::new(1.0, Rgba::TRANSPARENT),
    ];
    surface.fill_circle(
        particle.pos,
        radius,
        &Paint::radial(particle.pos, radius, &stops),
        None,
    );
}

pub fn draw_link(surface: &mut dyn Surface, link: &Link, theme: Theme) {
    let color = palette::link_color(theme).alpha(link.opacity);
    surface.stroke_line(link.a, link.b, 1.0, &Paint::Solid(color));
}

pub fn draw_star(surface: &mut dyn Surface, star: &Star, theme: Theme) {
    let color = palette::star_color(theme, star.opacity);
    surface.fill_circle(star.pos, star.radius, &Paint::Solid(color), None);
}

/// Tail running back along the velocity, glow, and head dot
pub fn draw_shooting_star(surface: &mut dyn Surface, star: &ShootingStar, theme: Theme) {
    let color = palette::shooting_star_color(theme);
    let opacity = star.opacity.clamp(0.0, 1.0);
    let tail_end = star.pos - star.vel * star.length;

    let tail_stops = [
        ColorStop::new(0.0, color.alpha(opacity * 0.9)),
        ColorStop::new(0.3, color.alpha(opacity * 0.6)),
        ColorStop::new(1.0, color.alpha(0.0)),
    ];
    let tail = Paint::Linear {
        from: star.pos,
        to: tail_end,
        stops: &tail_stops,
    };
    surface.stroke_line(star.pos, tail_end, SHOOTING_STAR_WIDTH, &tail);

    let glow_stops = [
        ColorStop::new(0.0, color.alpha(opacity)),
        ColorStop::new(1.0, color.alpha(0.0)),
    ];
    surface.fill_circle(
        star.pos,
        SHOOTING_STAR_GLOW,
        &Paint::radial(star.pos, SHOOTING_STAR_GLOW, &glow_stops),
        None,
    );

    surface.fill_circle(
        star.pos,
        SHOOTING_STAR_HEAD,
        &Paint::Solid(color.alpha(opacity)),
        None,
    );
}

/// Soft halo plus solid core
pub fn draw_snowflake(surface: &mut dyn Surface, flake: &Snowflake, theme: Theme) {
    let color = palette::snow_color(theme);
    let halo = flake.radius * 2.0;
    let stops = [
        ColorStop::new(0.0, color.alpha(flake.opacity)),
        ColorStop::new(1.0, color.alpha(0.0)),
    ];
    surface.fill_circle(flake.pos, halo, &Paint::radial(flake.pos, halo, &stops), None);
    surface.fill_circle(
        flake.pos,
        flake.radius * 0.6,
        &Paint::Solid(color.alpha(flake.opacity)),
        None,
    );
}
