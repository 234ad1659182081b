//! Effects module - decorative animation driven by trainer events
//!
//! Re-exports only. All logic in submodules.

mod particles;

pub use particles::{Particle, ParticleSystem, GRAVITY, PARTICLE_LIFE};
