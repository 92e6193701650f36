//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only).
//! Per-spawner wave bookkeeping is the one piece of state kept outside
//! components; it lives in `wave_spawner::WaveSpawner`.

pub mod ballistics;
pub mod cleanup;
pub mod contact;
pub mod explosion;
pub mod flight;
pub mod projectile;
pub mod snapshot;
pub mod steering;
pub mod wave_spawner;
