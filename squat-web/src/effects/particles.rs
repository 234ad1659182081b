//! Party popper particles
//!
//! Independent gravity-integrated dots in frame pixel coordinates. Spawned in
//! a burst on milestones, advanced once per frame, culled when their life
//! runs out.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Downward acceleration in pixels per frame²
pub const GRAVITY: f32 = 0.2;

/// Frames a particle stays alive
pub const PARTICLE_LIFE: u32 = 50;

#[derive(Clone, Debug)]
pub struct Particle {
    /// Position in frame pixels
    pub position: (f32, f32),
    /// Pixels per frame
    pub velocity: (f32, f32),
    pub color: [f32; 4],
    /// Radius in pixels
    pub radius: f32,
    life: u32,
}

impl Particle {
    fn burst(origin: (f32, f32), rng: &mut StdRng) -> Self {
        Self {
            position: origin,
            // Sideways spread, always launched upward
            velocity: (rng.gen_range(-5.0..=5.0), rng.gen_range(-5.0..=-1.0)),
            color: [rng.gen(), rng.gen(), rng.gen(), 1.0],
            radius: rng.gen_range(3..=6) as f32,
            life: PARTICLE_LIFE,
        }
    }

    /// Integrate one frame
    pub fn step(&mut self) {
        self.position.0 += self.velocity.0;
        self.position.1 += self.velocity.1;
        self.velocity.1 += GRAVITY;
        self.life = self.life.saturating_sub(1);
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    pub fn life(&self) -> u32 {
        self.life
    }
}

pub struct ParticleSystem {
    particles: Vec<Particle>,
    rng: StdRng,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Reproducible bursts
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            particles: Vec::new(),
            rng,
        }
    }

    /// Add `count` particles at `origin`
    pub fn spawn(&mut self, count: usize, origin: (f32, f32)) {
        self.particles.reserve(count);
        for _ in 0..count {
            let particle = Particle::burst(origin, &mut self.rng);
            self.particles.push(particle);
        }
    }

    /// Advance every particle one frame and drop the dead ones
    pub fn tick(&mut self) {
        for particle in &mut self.particles {
            particle.step();
        }
        self.particles.retain(Particle::is_alive);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new()
    }
}
