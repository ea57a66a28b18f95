use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use constants::particles as defaults;

/// Manual point-emitter parameters. Randomised per particle within the
/// configured ranges at emission time; the ranges themselves are fixed
/// at construction and never re-randomised by start/stop.
#[derive(Debug, Clone, PartialEq)]
pub struct EmitterConfig {
    pub capacity: usize,
    /// Particles per simulation second.
    pub emit_rate: f32,
    /// Emission direction corner pair; per-particle direction is a
    /// component-wise mix between the two.
    pub direction1: Vec3,
    pub direction2: Vec3,
    pub min_size: f32,
    pub max_size: f32,
    pub min_lifetime: f32,
    pub max_lifetime: f32,
    pub min_emit_power: f32,
    pub max_emit_power: f32,
    /// Simulation step applied per 60Hz frame.
    pub update_speed: f32,
    pub gravity: Vec3,
    pub color1: Vec4,
    pub color2: Vec4,
    pub color_dead: Vec4,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            capacity: defaults::PARTICLE_CAPACITY,
            emit_rate: defaults::EMIT_RATE,
            direction1: defaults::EMIT_DIRECTION_1,
            direction2: defaults::EMIT_DIRECTION_2,
            min_size: defaults::MIN_SIZE,
            max_size: defaults::MAX_SIZE,
            min_lifetime: defaults::MIN_LIFETIME,
            max_lifetime: defaults::MAX_LIFETIME,
            min_emit_power: defaults::MIN_EMIT_POWER,
            max_emit_power: defaults::MAX_EMIT_POWER,
            update_speed: defaults::UPDATE_SPEED,
            gravity: Vec3::ZERO,
            color1: Vec4::from_array(defaults::COLOR_1),
            color2: Vec4::from_array(defaults::COLOR_2),
            color_dead: Vec4::from_array(defaults::COLOR_DEAD),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub age: f32,
    pub lifetime: f32,
    pub size: f32,
    /// Mix between color1 and color2, fixed at emission.
    pub color_mix: f32,
}

impl Particle {
    /// Gradient colour for the particle's current age: the emission mix
    /// of color1/color2 fading to color_dead over the lifetime.
    pub fn color(&self, config: &EmitterConfig) -> Vec4 {
        let base = config.color1.lerp(config.color2, self.color_mix);
        base.lerp(config.color_dead, (self.age / self.lifetime).clamp(0.0, 1.0))
    }
}

/// CPU point-cloud emitter bound to a spatial anchor entity. Emission
/// starts and stops independently of the frame loop; already-emitted
/// particles keep aging out after a stop.
#[derive(Component)]
pub struct ParticleEmitter {
    pub config: EmitterConfig,
    pub anchor: Entity,
    running: bool,
    spawn_carry: f32,
    particles: Vec<Particle>,
    rng: StdRng,
}

impl ParticleEmitter {
    pub fn new(config: EmitterConfig, anchor: Entity) -> Self {
        let particles = Vec::with_capacity(config.capacity);
        Self {
            config,
            anchor,
            running: false,
            spawn_carry: 0.0,
            particles,
            rng: StdRng::seed_from_u64(0x0ddba11),
        }
    }

    pub fn started(config: EmitterConfig, anchor: Entity) -> Self {
        let mut emitter = Self::new(config, anchor);
        emitter.start();
        emitter
    }

    /// Begin (or resume) emission. Idempotent; configured ranges are
    /// left untouched.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Halt emission. Idempotent; live particles age out naturally.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Advance the simulation by one frame of `dt` seconds, emitting
    /// from `origin`. The configured update speed is a per-60Hz-frame
    /// step, so the whole simulation is frame-rate independent.
    pub fn step(&mut self, origin: Vec3, dt: f32) {
        let sim_step = dt * 60.0 * self.config.update_speed;

        // age and integrate
        let gravity = self.config.gravity;
        for particle in &mut self.particles {
            particle.age += sim_step;
            particle.velocity += gravity * sim_step;
            particle.position += particle.velocity * sim_step;
        }
        self.particles.retain(|p| p.age < p.lifetime);

        if !self.running {
            return;
        }

        self.spawn_carry += self.config.emit_rate * sim_step;
        let mut to_spawn = self.spawn_carry.floor() as usize;
        self.spawn_carry -= to_spawn as f32;
        to_spawn = to_spawn.min(self.config.capacity.saturating_sub(self.particles.len()));

        for _ in 0..to_spawn {
            let particle = self.emit_one(origin);
            self.particles.push(particle);
        }
    }

    fn emit_one(&mut self, origin: Vec3) -> Particle {
        // each component mixed independently between the two corners
        let mix = Vec3::new(
            self.rng.random::<f32>(),
            self.rng.random::<f32>(),
            self.rng.random::<f32>(),
        );
        let direction =
            self.config.direction1 + (self.config.direction2 - self.config.direction1) * mix;
        let power = self
            .rng
            .random_range(self.config.min_emit_power..=self.config.max_emit_power);
        Particle {
            position: origin,
            velocity: direction * power,
            age: 0.0,
            lifetime: self
                .rng
                .random_range(self.config.min_lifetime..=self.config.max_lifetime),
            size: self
                .rng
                .random_range(self.config.min_size..=self.config.max_size),
            color_mix: self.rng.random::<f32>(),
        }
    }
}

/// Advance every emitter from its anchor's current position.
pub fn update_emitters(
    time: Res<Time>,
    anchors: Query<&GlobalTransform>,
    mut emitters: Query<&mut ParticleEmitter>,
) {
    for mut emitter in &mut emitters {
        let origin = anchors
            .get(emitter.anchor)
            .map(|t| t.translation())
            .unwrap_or(Vec3::ZERO);
        emitter.step(origin, time.delta_secs());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    fn emitter() -> ParticleEmitter {
        let mut world = World::new();
        let anchor = world.spawn_empty().id();
        ParticleEmitter::started(EmitterConfig::default(), anchor)
    }

    #[test]
    fn stop_twice_is_idempotent() {
        let mut emitter = emitter();
        emitter.stop();
        emitter.stop();
        assert!(!emitter.is_running());
    }

    #[test]
    fn start_after_stop_keeps_configured_ranges() {
        let mut emitter = emitter();
        let before = emitter.config.clone();
        emitter.stop();
        emitter.start();
        assert!(emitter.is_running());
        assert_eq!(emitter.config, before);
    }

    #[test]
    fn stopped_emitter_spawns_nothing_but_ages_survivors() {
        let mut emitter = emitter();
        for _ in 0..20 {
            emitter.step(Vec3::ZERO, FRAME);
        }
        let live = emitter.particles().len();
        assert!(live > 0);

        emitter.stop();
        emitter.step(Vec3::ZERO, FRAME);
        assert!(emitter.particles().len() <= live);
    }

    #[test]
    fn capacity_bounds_live_particles() {
        let mut emitter = emitter();
        for _ in 0..2000 {
            emitter.step(Vec3::ZERO, FRAME);
        }
        assert!(emitter.particles().len() <= emitter.config.capacity);
    }

    #[test]
    fn gradient_fades_toward_dead_colour() {
        let config = EmitterConfig::default();
        let young = Particle {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            age: 0.0,
            lifetime: 1.0,
            size: 0.1,
            color_mix: 0.0,
        };
        let old = Particle {
            age: 1.0,
            ..young.clone()
        };
        assert_eq!(young.color(&config), config.color1);
        assert_eq!(old.color(&config), config.color_dead);
    }
}
