//! Animation controller
//!
//! `BackdropController` exclusively owns every entity collection together with
//! the settings, theme, pointer and spawn timers. External collaborators only
//! write the theme flag and pointer; everything else happens inside `frame`.

use glam::Vec2;

use crate::platform::{PointerTracker, ResizeDebounce};
use crate::renderer::{self, Frame, Surface, Theme};
use crate::settings::Settings;
use crate::sim::{FrameInput, SceneState, Spawners, frame_links, populate, tick};

pub struct BackdropController {
    scene: SceneState,
    settings: Settings,
    theme: Theme,
    pointer: PointerTracker,
    resize_debounce: ResizeDebounce,
    spawners: Spawners,
}

impl BackdropController {
    /// Populate a scene for a `width` x `height` surface and arm the spawners
    pub fn new(
        width: u32,
        height: u32,
        settings: Settings,
        seed: u64,
        now_ms: f64,
        is_dark: bool,
    ) -> Self {
        let mut scene = populate(width as f32, height as f32, &settings, seed, now_ms);
        let spawners = Spawners::new(&settings, &mut scene, now_ms);
        let theme = Theme::from_dark(is_dark);
        log::info!(
            "Backdrop controller ready ({} profile, {:?} theme, seed {})",
            settings.profile.as_str(),
            theme,
            seed
        );

        Self {
            scene,
            settings,
            theme,
            pointer: PointerTracker::default(),
            resize_debounce: ResizeDebounce::default(),
            spawners,
        }
    }

    // === Theme ===

    /// Takes effect on the next render
    pub fn set_theme(&mut self, is_dark: bool) {
        let theme = Theme::from_dark(is_dark);
        if theme != self.theme {
            log::debug!("Theme -> {:?}", theme);
        }
        self.theme = theme;
    }

    pub fn is_dark(&self) -> bool {
        self.theme.is_dark()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    // === Input ===

    /// Pointer move in canvas px; ignored when repulsion is off
    pub fn set_pointer(&mut self, pos: Vec2, now_ms: f64) {
        if self.settings.pointer_repulsion {
            self.pointer.on_move(pos, now_ms);
        }
    }

    pub fn clear_pointer(&mut self) {
        self.pointer.on_leave();
    }

    /// Latest pointer visible to the frame loop
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer.position()
    }

    /// Record a resize event; applied once events settle
    pub fn request_resize(&mut self, width: u32, height: u32, now_ms: f64) {
        self.resize_debounce.on_resize(width, height, now_ms);
    }

    /// Apply a new surface size immediately
    pub fn resize(&mut self, width: u32, height: u32) {
        log::debug!("Resize to {}x{}", width, height);
        self.scene.resize(width as f32, height as f32);
    }

    // === Visibility ===

    /// Page hidden; freezes the spawn timers when configured to
    pub fn suspend(&mut self, now_ms: f64) {
        if self.settings.pause_spawners_when_hidden {
            self.spawners.suspend(now_ms);
        }
    }

    pub fn resume(&mut self, now_ms: f64) {
        self.spawners.resume(now_ms);
    }

    // === Frame ===

    /// One update pass: sample the pointer, spawn due entities, advance all
    pub fn update(&mut self, now_ms: f64) {
        let input = FrameInput {
            now_ms,
            pointer: self.pointer.flush(now_ms),
        };
        self.spawners.poll(&mut self.scene, now_ms);
        tick(&mut self.scene, &input, &self.settings);
    }

    /// One render pass with the current theme
    pub fn render(
        &self,
        surface: &mut dyn Surface,
        overlay: Option<&mut dyn Surface>,
        now_ms: f64,
    ) {
        let links = frame_links(&self.scene, &self.settings);
        let frame = Frame {
            scene: &self.scene,
            links: &links,
            theme: self.theme,
            now_ms,
        };
        renderer::render(&frame, surface, overlay);
    }

    /// Update then render, resizing the surfaces first if a resize settled
    pub fn frame(
        &mut self,
        surface: &mut dyn Surface,
        mut overlay: Option<&mut dyn Surface>,
        now_ms: f64,
    ) {
        if let Some((width, height)) = self.resize_debounce.poll(now_ms) {
            surface.resize(width, height);
            if let Some(overlay) = overlay.as_deref_mut() {
                overlay.resize(width, height);
            }
            self.resize(width, height);
        }
        self.update(now_ms);
        self.render(surface, overlay, now_ms);
    }

    // === Accessors ===

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn spawners(&self) -> &Spawners {
        &self.spawners
    }
}
