//! Orbit Backdrop entry point
//!
//! The browser build is a library (`Backdrop` in `web.rs`). Natively this
//! runs the animation headless against a recording surface and logs a summary.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use orbit_backdrop::renderer::RecordingSurface;
    use orbit_backdrop::{BackdropController, DeviceProfile, Settings};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let profile = std::env::args()
        .nth(1)
        .and_then(|arg| DeviceProfile::from_str(&arg))
        .unwrap_or_else(DeviceProfile::detect);
    let mut settings = Settings::load(profile);
    settings.snow = true;

    const WIDTH: u32 = 800;
    const HEIGHT: u32 = 600;
    const FRAMES: u32 = 600;
    const FRAME_MS: f64 = 1000.0 / 60.0;

    log::info!("Orbit Backdrop (native) starting headless run: {} frames", FRAMES);

    let mut controller = BackdropController::new(WIDTH, HEIGHT, settings, 7, 0.0, true);
    let mut surface = RecordingSurface::new(WIDTH, HEIGHT);

    for i in 1..=FRAMES {
        let now = i as f64 * FRAME_MS;
        // Sweep the pointer across the middle of the canvas
        let x = (i as f32 / FRAMES as f32) * WIDTH as f32;
        controller.set_pointer(glam::Vec2::new(x, HEIGHT as f32 / 2.0), now);
        controller.frame(&mut surface, None, now);
    }

    let scene = controller.scene();
    log::info!(
        "Ran {} frames: {} orbits, {} particles, {} stars, {} shooting stars live, {} snowflakes",
        scene.frame,
        scene.orbits.len(),
        scene.particles.len(),
        scene.stars.len(),
        scene.shooting_stars.len(),
        scene.snowflakes.len()
    );
    for layer in surface.layer_order() {
        log::info!(
            "  {:?}: {} draw calls",
            layer,
            surface.layer_commands(layer).len()
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}
