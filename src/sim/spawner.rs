//! Shooting star and meteor shower spawning

use rand::Rng;

use super::factory::{create_meteor, create_shooting_star};
use super::state::SceneState;
use super::timer::{Burst, CancelHandle, RepeatingTask};
use crate::consts::*;
use crate::settings::Settings;

/// Time-driven producers of shooting stars
#[derive(Debug, Clone)]
pub struct Spawners {
    shooting_star: RepeatingTask,
    meteor_shower: RepeatingTask,
    /// In-flight meteor showers
    bursts: Vec<Burst>,
    suspended_at: Option<f64>,
}

impl Spawners {
    /// Arm the enabled spawners; nothing appears before the first delay
    pub fn new(settings: &Settings, scene: &mut SceneState, now_ms: f64) -> Self {
        let mut shooting_star = RepeatingTask::new(SHOOTING_STAR_DELAY_MS);
        let mut meteor_shower = RepeatingTask::new(METEOR_SHOWER_DELAY_MS);
        if settings.shooting_stars {
            shooting_star.start(now_ms, &mut scene.rng);
        }
        if settings.meteor_showers {
            meteor_shower.start(now_ms, &mut scene.rng);
        }
        Self {
            shooting_star,
            meteor_shower,
            bursts: Vec::new(),
            suspended_at: None,
        }
    }

    /// Spawn everything due by `now_ms` into the scene
    pub fn poll(&mut self, scene: &mut SceneState, now_ms: f64) {
        if self.suspended_at.is_some() {
            return;
        }
        let size = scene.size;

        if self.shooting_star.poll(now_ms, &mut scene.rng) {
            scene
                .shooting_stars
                .push(create_shooting_star(&mut scene.rng, size));
            log::debug!("Shooting star ({} active)", scene.shooting_stars.len());
        }

        if self.meteor_shower.poll(now_ms, &mut scene.rng) {
            let count = shower_size(&mut scene.rng);
            log::info!("Meteor shower: {} meteors", count);
            self.bursts.push(Burst::new(count, now_ms, METEOR_SPACING_MS));
        }

        for burst in &mut self.bursts {
            for _ in 0..burst.drain_due(now_ms) {
                scene.shooting_stars.push(create_meteor(&mut scene.rng, size));
            }
        }
        self.bursts.retain(|b| !b.is_done());
    }

    /// Freeze all timers (page hidden)
    pub fn suspend(&mut self, now_ms: f64) {
        if self.suspended_at.is_some() {
            return;
        }
        self.shooting_star.suspend(now_ms);
        self.meteor_shower.suspend(now_ms);
        self.suspended_at = Some(now_ms);
    }

    /// Restart timers, preserving the time left on each
    pub fn resume(&mut self, now_ms: f64) {
        let Some(since) = self.suspended_at.take() else {
            return;
        };
        self.shooting_star.resume(now_ms);
        self.meteor_shower.resume(now_ms);
        for burst in &mut self.bursts {
            burst.delay(now_ms - since);
        }
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended_at.is_some()
    }

    /// Handles that stop the shooting star and meteor shower timers
    pub fn cancel_handles(&self) -> [CancelHandle; 2] {
        [
            self.shooting_star.cancel_handle(),
            self.meteor_shower.cancel_handle(),
        ]
    }

    /// Meteors still queued in running showers
    pub fn pending_meteors(&self) -> u32 {
        self.bursts.iter().map(Burst::remaining).sum()
    }

    pub fn next_shooting_star_ms(&self) -> Option<f64> {
        self.shooting_star.next_due_ms()
    }

    pub fn next_meteor_shower_ms(&self) -> Option<f64> {
        self.meteor_shower.next_due_ms()
    }
}

/// Meteors per shower, uniform over the half-open count range
fn shower_size<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    let (lo, hi) = METEOR_SHOWER_COUNT;
    rng.random_range(lo..hi)
}
