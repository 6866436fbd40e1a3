//! Simulation module
//!
//! Entity state and everything that mutates it. This module never touches a
//! raster surface or the browser:
//! - One `tick` per displayed frame
//! - Seeded RNG owned by the scene
//! - Spawn timers driven by the frame clock

pub mod factory;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod timer;

pub use factory::populate;
pub use spawner::Spawners;
pub use state::{
    Breath, Gray, Orbit, PLANET_GRAYS, Particle, Planet, SceneState, ShootingStar, Snowflake,
    Star,
};
pub use tick::{FrameInput, Link, frame_links, link_opacity, particle_links, tick};
pub use timer::{Burst, CancelHandle, RepeatingTask};
